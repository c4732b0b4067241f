// Copyright (c) 2023-2024 The MobileCoin Foundation

//! Protocol / APDU definitions for Exchange app communication
//!
//! This crate provides the wire-level vocabulary of the Exchange
//! application: command classes and instructions, subcommand and rate
//! identifiers, status words, the MORE/EXTEND chunking convention for
//! payloads larger than a single frame, the TLV codec, and the signed
//! TLV descriptors (trusted names and instruction "swap templates")
//! consumed by device firmware.
//!
//! Everything here is a pure encoder. Transport, signing identities and
//! the transaction crafting pipeline live in the `ledger-exchange`
//! client crate.

use num_enum::{IntoPrimitive, TryFromPrimitive};

pub mod chunk;
pub mod pki;
pub mod status;
pub mod template;
pub mod tlv;
pub mod trusted_name;

mod helpers;
pub use helpers::{minimal_bytes, prefix_with_len, prefix_with_len_u16};

/// Exchange APDU class
pub const EXCHANGE_CLA: u8 = 0xE0;

/// Maximum data bytes per command frame
pub const MAX_CHUNK_SIZE: usize = 255;

/// Exchange APDU instruction codes
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(u8)]
pub enum Instruction {
    /// Fetch application version
    GetVersion = 0x02,

    /// Start a new exchange flow, returns the device transaction id
    StartNewTransaction = 0x03,

    /// Provide the partner credentials
    SetPartnerKey = 0x04,

    /// Provide the signature over the partner credentials
    CheckPartner = 0x05,

    /// Provide the framed transaction proposal (chunked)
    ProcessTransactionResponse = 0x06,

    /// Provide the partner signature over the transaction
    CheckTransactionSignature = 0x07,

    /// Validate and display the payout address (interactive)
    CheckPayoutAddress = 0x08,

    /// Validate and display the refund address (interactive)
    CheckRefundAddress = 0x09,

    /// Hand over to the coin application for signing
    StartSigningTransaction = 0x0A,

    /// Validate the refund address without user interaction
    CheckRefundAddressNoDisplay = 0x0C,

    /// Fetch a fresh 4-byte anti-replay challenge
    GetChallenge = 0x10,

    /// Provide a signed trusted-name descriptor (chunked)
    SendTrustedNameDescriptor = 0x11,

    /// Provide a signed instruction descriptor (chunked)
    SendSwapTemplate = 0x12,
}

/// Exchange operation kinds, carried in the high nibble of P2.
///
/// The NG variants use the wider framing described in [`chunk`] and the
/// self-describing flag-byte prefixes on proposals and signatures.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive, strum::Display,
)]
#[repr(u8)]
pub enum SubCommand {
    Swap = 0x00,
    Sell = 0x01,
    Fund = 0x02,
    SwapNg = 0x03,
    SellNg = 0x04,
    FundNg = 0x05,
}

impl SubCommand {
    /// True for the next-generation wire format variants
    pub fn is_ng(&self) -> bool {
        matches!(self, SubCommand::SwapNg | SubCommand::SellNg | SubCommand::FundNg)
    }
}

/// Rate kind, carried in P1
#[derive(Copy, Clone, Debug, PartialEq, TryFromPrimitive, IntoPrimitive, strum::Display)]
#[repr(u8)]
pub enum Rate {
    Fixed = 0x00,
    Floating = 0x01,
}

bitflags::bitflags! {
    /// P2 low-nibble flags.
    ///
    /// MORE is set on every frame but the last of a payload, EXTEND on
    /// every frame but the first. The remaining bits are
    /// operation-specific hints.
    pub struct P2Flags: u8 {
        /// Further frames follow this one
        const MORE = 0b0000_0001;
        /// This frame extends an open payload session
        const EXTEND = 0b0000_0010;
        /// Destination is an associated / token account
        const ATA = 0b0000_0100;
    }
}

/// Build a P2 byte from a subcommand and frame flags
pub fn p2(subcommand: SubCommand, flags: P2Flags) -> u8 {
    (u8::from(subcommand) << 4) | flags.bits()
}
