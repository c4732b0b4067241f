// Copyright (c) 2023-2024 The MobileCoin Foundation

//! Status words returned by the Exchange application

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Success status word
pub const SW_OK: u16 = 0x9000;

/// Known Exchange application status words.
///
/// Anything not listed here is an application-defined error category
/// and is surfaced to callers as its raw 2-byte value.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive, strum::Display,
)]
#[repr(u16)]
pub enum StatusWord {
    Ok = 0x9000,
    IncorrectCommandData = 0x6A80,
    DeserializationFailed = 0x6A81,
    WrongTransactionId = 0x6A82,
    InvalidAddress = 0x6A83,
    UserRefused = 0x6A84,
    InternalError = 0x6A85,
    WrongP1 = 0x6A86,
    WrongP2 = 0x6A87,
    WrongP2Extension = 0x6A88,
    InvalidP2Extension = 0x6A89,
    WrongChallenge = 0x6A8A,
    WrongTlvFormat = 0x6A8B,
    MissingTlvContent = 0x6A8C,
    WrongTlvContent = 0x6A8D,
    WrongTlvKeyId = 0x6A8E,
    WrongTlvSignature = 0x6A8F,
    NoCertificateLoaded = 0x6A90,
    InvalidInstruction = 0x6D00,
    UnexpectedInstruction = 0x6D01,
    ClassNotSupported = 0x6E00,
    SignVerificationFail = 0x9D1A,
}
