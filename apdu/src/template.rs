// Copyright (c) 2023-2024 The MobileCoin Foundation

//! Instruction descriptors ("swap templates")
//!
//! An instruction descriptor teaches firmware where to find the amount
//! and account roles inside an arbitrary on-chain instruction: which
//! program it belongs to, the discriminator identifying it, the byte
//! geometry of the embedded amount, and the indices of the asset and
//! recipient accounts. Several descriptors may be sent for one
//! transaction, each independently chunked; firmware bounds the count
//! and requires a consistent chain and template id across the set.

use crate::tlv::tlv;

/// Structure type identifying an instruction-descriptor payload
pub const STRUCTURE_TYPE_SWAP_TEMPLATE: u8 = 0x0A;

/// Instruction descriptor format version
pub const SWAP_TEMPLATE_VERSION: u8 = 0x01;

/// Maximum discriminator length accepted by firmware
pub const MAX_DISCRIMINATOR_LEN: usize = 8;

/// Amount-rules bit 0: amount is big-endian (little-endian when clear)
pub const AMOUNT_RULE_BIG_ENDIAN: u8 = 1 << 0;

/// Amount-rules bit 1: offset counts back from the end of instruction
/// data (from the start when clear)
pub const AMOUNT_RULE_OFFSET_FROM_END: u8 = 1 << 1;

/// TLV tags of the instruction descriptor, in emission order
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(u8)]
pub enum TemplateTag {
    StructureType = 0x01,
    Version = 0x02,
    DerSignature = 0x15,
    ChainId = 0x23,
    TemplateId = 0x90,
    ProgramId = 0x91,
    Discriminator = 0x92,
    AmountSize = 0x93,
    AmountOffset = 0x94,
    AmountRules = 0x95,
    AssetAccountIndex = 0x96,
    AssetAtaIndex = 0x97,
    RecipientAccountIndex = 0x98,
    RecipientAtaIndex = 0x99,
}

/// Instruction descriptor construction errors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TemplateError {
    /// Discriminators are exact-match prefixes of at most 8 bytes
    #[error("discriminator length {0} exceeds {MAX_DISCRIMINATOR_LEN} bytes")]
    DiscriminatorTooLong(usize),
}

/// Builder for a signed instruction descriptor
#[derive(Clone, Debug, PartialEq)]
pub struct InstructionDescriptor<'a> {
    pub chain_id: u64,
    /// Correlation id shared by all descriptors of one transaction,
    /// encoded as 8 little-endian bytes
    pub template_id: u64,
    /// Program owning the described instruction
    pub program_id: &'a [u8; 32],
    /// Exact-match prefix of the instruction data, up to 8 bytes
    pub discriminator: &'a [u8],
    /// Size in bytes of the embedded amount
    pub amount_size: u32,
    /// Offset of the amount within the instruction data
    pub amount_offset: u32,
    /// Amount is stored big-endian
    pub big_endian_amount: bool,
    /// `amount_offset` counts back from the end of instruction data
    pub offset_from_end: bool,
    pub asset_account_index: Option<u8>,
    pub asset_ata_index: Option<u8>,
    pub recipient_account_index: Option<u8>,
    pub recipient_ata_index: Option<u8>,
}

impl<'a> InstructionDescriptor<'a> {
    /// Create a descriptor with no optional account indices
    pub fn new(
        chain_id: u64,
        template_id: u64,
        program_id: &'a [u8; 32],
        discriminator: &'a [u8],
    ) -> Self {
        Self {
            chain_id,
            template_id,
            program_id,
            discriminator,
            amount_size: 0,
            amount_offset: 0,
            big_endian_amount: false,
            offset_from_end: false,
            asset_account_index: None,
            asset_ata_index: None,
            recipient_account_index: None,
            recipient_ata_index: None,
        }
    }

    /// Packed amount-rules flag byte
    pub fn amount_rules(&self) -> u8 {
        let mut rules = 0;
        if self.big_endian_amount {
            rules |= AMOUNT_RULE_BIG_ENDIAN;
        }
        if self.offset_from_end {
            rules |= AMOUNT_RULE_OFFSET_FROM_END;
        }
        rules
    }

    /// Encode the descriptor, closing it with a DER signature TLV
    /// computed by `sign` over all preceding bytes.
    pub fn encode<F>(&self, sign: F) -> Result<Vec<u8>, TemplateError>
    where
        F: FnOnce(&[u8]) -> Vec<u8>,
    {
        if self.discriminator.len() > MAX_DISCRIMINATOR_LEN {
            return Err(TemplateError::DiscriminatorTooLong(self.discriminator.len()));
        }

        let mut payload = tlv(
            TemplateTag::StructureType as u8,
            STRUCTURE_TYPE_SWAP_TEMPLATE,
        );
        payload.extend(tlv(TemplateTag::Version as u8, SWAP_TEMPLATE_VERSION));
        payload.extend(tlv(TemplateTag::ChainId as u8, self.chain_id));
        payload.extend(tlv(
            TemplateTag::TemplateId as u8,
            self.template_id.to_le_bytes().as_slice(),
        ));
        payload.extend(tlv(TemplateTag::ProgramId as u8, self.program_id.as_slice()));
        payload.extend(tlv(TemplateTag::Discriminator as u8, self.discriminator));
        payload.extend(tlv(TemplateTag::AmountSize as u8, self.amount_size));
        payload.extend(tlv(TemplateTag::AmountOffset as u8, self.amount_offset));
        payload.extend(tlv(TemplateTag::AmountRules as u8, self.amount_rules()));
        if let Some(idx) = self.asset_account_index {
            payload.extend(tlv(TemplateTag::AssetAccountIndex as u8, idx));
        }
        if let Some(idx) = self.asset_ata_index {
            payload.extend(tlv(TemplateTag::AssetAtaIndex as u8, idx));
        }
        if let Some(idx) = self.recipient_account_index {
            payload.extend(tlv(TemplateTag::RecipientAccountIndex as u8, idx));
        }
        if let Some(idx) = self.recipient_ata_index {
            payload.extend(tlv(TemplateTag::RecipientAtaIndex as u8, idx));
        }

        let signature = sign(&payload);
        payload.extend(tlv(TemplateTag::DerSignature as u8, signature.as_slice()));
        Ok(payload)
    }
}
