// Copyright (c) 2023-2024 The MobileCoin Foundation

//! Signed trusted-name descriptors
//!
//! A trusted-name descriptor binds an opaque identifier to an address
//! the device cannot validate on its own (a derived associated account,
//! for instance). The binding is endorsed by a trailing DER signature
//! computed over every byte emitted before it, and is only accepted by
//! firmware after a PKI certificate for the trusted-name usage class
//! has been loaded (see [`crate::pki`]).

use crate::tlv::tlv;

/// Structure type identifying a trusted-name payload
pub const STRUCTURE_TYPE_TRUSTED_NAME: u8 = 0x03;

/// Trusted-name descriptor format version
pub const TRUSTED_NAME_VERSION: u8 = 0x02;

/// Name type: context address
pub const NAME_TYPE_CONTEXT_ADDRESS: u8 = 0x06;

/// Name source: on-chain derivation
pub const NAME_SOURCE_DERIVED: u8 = 0x06;

/// TLV tags of the trusted-name descriptor, in emission order
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(u8)]
pub enum TrustedNameTag {
    StructureType = 0x01,
    Version = 0x02,
    Challenge = 0x12,
    SignerKeyId = 0x13,
    SignerAlgo = 0x14,
    DerSignature = 0x15,
    TrustedName = 0x20,
    Address = 0x22,
    ChainId = 0x23,
    NameType = 0x70,
    NameSource = 0x71,
    SourceContract = 0x73,
}

/// Builder for a signed trusted-name descriptor
#[derive(Clone, Debug, PartialEq)]
pub struct TrustedNameDescriptor<'a> {
    pub name_type: u8,
    pub name_source: u8,
    /// Opaque identifier asserted by the server
    pub trusted_name: &'a [u8],
    pub chain_id: u64,
    /// Address the identifier resolves to
    pub address: &'a [u8],
    /// Contract the resolution was derived from (e.g. a token mint)
    pub source_contract: &'a [u8],
    /// Device anti-replay challenge, when the firmware handed one out
    pub challenge: Option<u32>,
    pub signer_key_id: u8,
    pub signer_algo: u8,
}

impl<'a> TrustedNameDescriptor<'a> {
    /// Create a descriptor with the default type/source/signer fields
    pub fn new(
        trusted_name: &'a [u8],
        address: &'a [u8],
        source_contract: &'a [u8],
        chain_id: u64,
    ) -> Self {
        Self {
            name_type: NAME_TYPE_CONTEXT_ADDRESS,
            name_source: NAME_SOURCE_DERIVED,
            trusted_name,
            chain_id,
            address,
            source_contract,
            challenge: None,
            signer_key_id: 0x00,
            signer_algo: 0x01,
        }
    }

    /// Attach the device challenge
    pub fn with_challenge(mut self, challenge: u32) -> Self {
        self.challenge = Some(challenge);
        self
    }

    /// Encode the descriptor, closing it with a DER signature TLV
    /// computed by `sign` over all preceding bytes.
    pub fn encode<F>(&self, sign: F) -> Vec<u8>
    where
        F: FnOnce(&[u8]) -> Vec<u8>,
    {
        let mut payload = tlv(
            TrustedNameTag::StructureType as u8,
            STRUCTURE_TYPE_TRUSTED_NAME,
        );
        payload.extend(tlv(TrustedNameTag::Version as u8, TRUSTED_NAME_VERSION));
        payload.extend(tlv(TrustedNameTag::NameType as u8, self.name_type));
        payload.extend(tlv(TrustedNameTag::NameSource as u8, self.name_source));
        payload.extend(tlv(TrustedNameTag::TrustedName as u8, self.trusted_name));
        payload.extend(tlv(TrustedNameTag::ChainId as u8, self.chain_id));
        payload.extend(tlv(TrustedNameTag::Address as u8, self.address));
        payload.extend(tlv(
            TrustedNameTag::SourceContract as u8,
            self.source_contract,
        ));
        if let Some(challenge) = self.challenge {
            payload.extend(tlv(TrustedNameTag::Challenge as u8, challenge));
        }
        payload.extend(tlv(TrustedNameTag::SignerKeyId as u8, self.signer_key_id));
        payload.extend(tlv(TrustedNameTag::SignerAlgo as u8, self.signer_algo));

        let signature = sign(&payload);
        payload.extend(tlv(
            TrustedNameTag::DerSignature as u8,
            signature.as_slice(),
        ));
        payload
    }
}
