// Copyright (c) 2023-2024 The MobileCoin Foundation

//! Per-subcommand encoding specifications
//!
//! Each exchange operation kind differs along the same handful of axes:
//! which curve the partner signs on, whether the signed material is the
//! raw payload or its dot-prefixed base64 form, how the signature is
//! encoded on the wire, how the payload itself is encoded, which
//! protobuf message carries the proposal and which fields it may use.
//! [`SubCommandSpec`] captures one point in that space; the six
//! constants below cover the full operation set.

use base64::Engine;
use prost::Message;

use ledger_exchange_apdu::{minimal_bytes, prefix_with_len, prefix_with_len_u16, SubCommand};

use crate::fields::{take_bytes, take_decimal, take_text, FieldValue, TxFields};
use crate::proto::{NewFundResponse, NewSellResponse, NewTransactionResponse};
use crate::signer::{Curve, SigningAuthority};
use crate::Error;

/// What the partner actually signs
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SignatureComputation {
    /// Signature over the raw payload bytes
    BinaryEncodedPayload,
    /// Signature over `b"."` followed by the base64url payload
    DotPrefixedBase64Url,
}

/// Wire encoding of the partner signature
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SignatureEncoding {
    Der,
    /// Fixed-width 64-byte `r || s`
    PlainRS,
}

/// Wire encoding of the transaction payload
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PayloadEncoding {
    BytesArray,
    Base64Url,
}

/// Which protobuf message carries the proposal
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageType {
    Swap,
    Sell,
    Fund,
}

/// Encoding rules for one exchange operation kind
pub struct SubCommandSpec {
    pub subcommand: SubCommand,
    pub partner_curve: Curve,
    pub signature_computation: SignatureComputation,
    pub signature_encoding: SignatureEncoding,
    pub payload_encoding: PayloadEncoding,
    pub message_type: MessageType,
    /// Field keys the proposal message may carry
    pub allowed_fields: &'static [&'static str],
    /// Key under which the device transaction id is injected
    pub transaction_id_field: &'static str,
}

const SWAP_FIELDS: &[&str] = &[
    "payin_address",
    "payin_extra_id",
    "payin_extra_data",
    "refund_address",
    "refund_extra_id",
    "payout_address",
    "payout_extra_id",
    "currency_from",
    "currency_to",
    "amount_to_provider",
    "amount_to_wallet",
];

const SELL_FIELDS: &[&str] = &[
    "trader_email",
    "in_currency",
    "in_amount",
    "in_address",
    "in_extra_id",
    "out_currency",
    "out_amount",
];

const FUND_FIELDS: &[&str] = &[
    "user_id",
    "account_name",
    "in_currency",
    "in_amount",
    "in_address",
    "in_extra_id",
];

pub static SWAP_SPEC: SubCommandSpec = SubCommandSpec {
    subcommand: SubCommand::Swap,
    partner_curve: Curve::Secp256k1,
    signature_computation: SignatureComputation::BinaryEncodedPayload,
    signature_encoding: SignatureEncoding::Der,
    payload_encoding: PayloadEncoding::BytesArray,
    message_type: MessageType::Swap,
    allowed_fields: SWAP_FIELDS,
    transaction_id_field: "device_transaction_id",
};

pub static SELL_SPEC: SubCommandSpec = SubCommandSpec {
    subcommand: SubCommand::Sell,
    partner_curve: Curve::Secp256r1,
    signature_computation: SignatureComputation::DotPrefixedBase64Url,
    signature_encoding: SignatureEncoding::PlainRS,
    payload_encoding: PayloadEncoding::Base64Url,
    message_type: MessageType::Sell,
    allowed_fields: SELL_FIELDS,
    transaction_id_field: "device_transaction_id",
};

pub static FUND_SPEC: SubCommandSpec = SubCommandSpec {
    subcommand: SubCommand::Fund,
    partner_curve: Curve::Secp256r1,
    signature_computation: SignatureComputation::DotPrefixedBase64Url,
    signature_encoding: SignatureEncoding::Der,
    payload_encoding: PayloadEncoding::Base64Url,
    message_type: MessageType::Fund,
    allowed_fields: FUND_FIELDS,
    transaction_id_field: "device_transaction_id",
};

pub static SWAP_NG_SPEC: SubCommandSpec = SubCommandSpec {
    subcommand: SubCommand::SwapNg,
    partner_curve: Curve::Secp256r1,
    signature_computation: SignatureComputation::DotPrefixedBase64Url,
    signature_encoding: SignatureEncoding::PlainRS,
    payload_encoding: PayloadEncoding::Base64Url,
    message_type: MessageType::Swap,
    allowed_fields: SWAP_FIELDS,
    transaction_id_field: "device_transaction_id_ng",
};

pub static SELL_NG_SPEC: SubCommandSpec = SubCommandSpec {
    subcommand: SubCommand::SellNg,
    partner_curve: Curve::Secp256r1,
    signature_computation: SignatureComputation::DotPrefixedBase64Url,
    signature_encoding: SignatureEncoding::PlainRS,
    payload_encoding: PayloadEncoding::Base64Url,
    message_type: MessageType::Sell,
    allowed_fields: SELL_FIELDS,
    transaction_id_field: "device_transaction_id",
};

pub static FUND_NG_SPEC: SubCommandSpec = SubCommandSpec {
    subcommand: SubCommand::FundNg,
    partner_curve: Curve::Secp256r1,
    signature_computation: SignatureComputation::DotPrefixedBase64Url,
    signature_encoding: SignatureEncoding::PlainRS,
    payload_encoding: PayloadEncoding::Base64Url,
    message_type: MessageType::Fund,
    allowed_fields: FUND_FIELDS,
    transaction_id_field: "device_transaction_id",
};

/// Fetch the spec for an operation kind
pub fn spec_for(subcommand: SubCommand) -> &'static SubCommandSpec {
    match subcommand {
        SubCommand::Swap => &SWAP_SPEC,
        SubCommand::Sell => &SELL_SPEC,
        SubCommand::Fund => &FUND_SPEC,
        SubCommand::SwapNg => &SWAP_NG_SPEC,
        SubCommand::SellNg => &SELL_NG_SPEC,
        SubCommand::FundNg => &FUND_NG_SPEC,
    }
}

impl SubCommandSpec {
    pub fn is_ng(&self) -> bool {
        self.subcommand.is_ng()
    }

    /// Width of the transaction length prefix in framed payloads
    pub fn size_of_transaction_length(&self) -> usize {
        if self.is_ng() {
            2
        } else {
            1
        }
    }

    fn dot_prefix(&self) -> u8 {
        match self.signature_computation {
            SignatureComputation::DotPrefixedBase64Url => 0x01,
            SignatureComputation::BinaryEncodedPayload => 0x00,
        }
    }

    fn signature_encoding_prefix(&self) -> u8 {
        match self.signature_encoding {
            SignatureEncoding::PlainRS => 0x01,
            SignatureEncoding::Der => 0x00,
        }
    }

    fn payload_encoding_prefix(&self) -> u8 {
        match self.payload_encoding {
            PayloadEncoding::Base64Url => 0x01,
            PayloadEncoding::BytesArray => 0x00,
        }
    }

    /// Whether every key in `fields` is in this operation's allowed
    /// set.
    ///
    /// A subset is always acceptable; missing fields take their message
    /// defaults and are judged by the device, not here. The transaction
    /// id key is not part of the allowed set: it belongs to
    /// [`Self::craft`], which injects it itself.
    pub fn check_conf(&self, fields: &TxFields) -> bool {
        self.unknown_field(fields, false).is_none()
    }

    fn unknown_field<'a>(&self, fields: &'a TxFields, allow_id: bool) -> Option<&'a str> {
        fields
            .keys()
            .find(|k| {
                !self.allowed_fields.contains(&k.as_str())
                    && !(allow_id && k.as_str() == self.transaction_id_field)
            })
            .map(|k| k.as_str())
    }

    /// Partner credentials in the form this operation expects
    pub fn credentials(&self, partner: &SigningAuthority) -> Vec<u8> {
        if self.is_ng() {
            partner.credentials_ng()
        } else {
            partner.credentials()
        }
    }

    /// Serialize a proposal, injecting the device transaction id.
    ///
    /// Any caller-supplied value under the transaction id key is
    /// replaced, so a stale id cannot leak into the payload.
    pub fn craft(&self, fields: &TxFields, transaction_id: &[u8]) -> Result<Vec<u8>, Error> {
        if let Some(key) = self.unknown_field(fields, true) {
            return Err(Error::UnknownField(key.to_string()));
        }

        let mut fields = fields.clone();
        fields.insert(
            self.transaction_id_field.to_string(),
            FieldValue::Bytes(transaction_id.to_vec()),
        );

        let encoded = match self.message_type {
            MessageType::Swap => NewTransactionResponse {
                payin_address: take_text(&fields, "payin_address")?,
                payin_extra_id: take_text(&fields, "payin_extra_id")?,
                payin_extra_data: take_bytes(&fields, "payin_extra_data")?,
                refund_address: take_text(&fields, "refund_address")?,
                refund_extra_id: take_text(&fields, "refund_extra_id")?,
                payout_address: take_text(&fields, "payout_address")?,
                payout_extra_id: take_text(&fields, "payout_extra_id")?,
                currency_from: take_text(&fields, "currency_from")?,
                currency_to: take_text(&fields, "currency_to")?,
                amount_to_provider: take_bytes(&fields, "amount_to_provider")?,
                amount_to_wallet: take_bytes(&fields, "amount_to_wallet")?,
                device_transaction_id: take_text(&fields, "device_transaction_id")?,
                device_transaction_id_ng: take_bytes(&fields, "device_transaction_id_ng")?,
            }
            .encode_to_vec(),
            MessageType::Sell => NewSellResponse {
                trader_email: take_text(&fields, "trader_email")?,
                in_currency: take_text(&fields, "in_currency")?,
                in_amount: take_bytes(&fields, "in_amount")?,
                in_address: take_text(&fields, "in_address")?,
                in_extra_id: take_text(&fields, "in_extra_id")?,
                out_currency: take_text(&fields, "out_currency")?,
                out_amount: take_decimal(&fields, "out_amount")?,
                device_transaction_id: take_bytes(&fields, "device_transaction_id")?,
            }
            .encode_to_vec(),
            MessageType::Fund => NewFundResponse {
                user_id: take_text(&fields, "user_id")?,
                account_name: take_text(&fields, "account_name")?,
                in_currency: take_text(&fields, "in_currency")?,
                in_amount: take_bytes(&fields, "in_amount")?,
                in_address: take_text(&fields, "in_address")?,
                in_extra_id: take_text(&fields, "in_extra_id")?,
                device_transaction_id: take_bytes(&fields, "device_transaction_id")?,
            }
            .encode_to_vec(),
        };

        Ok(match self.payload_encoding {
            PayloadEncoding::BytesArray => encoded,
            PayloadEncoding::Base64Url => base64::engine::general_purpose::URL_SAFE
                .encode(&encoded)
                .into_bytes(),
        })
    }

    /// Frame a crafted payload with its fee for PROCESS_TRANSACTION.
    ///
    /// NG framing leads with the payload encoding marker and widens the
    /// transaction length prefix to two bytes.
    pub fn frame(&self, transaction: &[u8], fees: u64) -> Result<Vec<u8>, Error> {
        let max = if self.is_ng() {
            u16::MAX as usize
        } else {
            u8::MAX as usize
        };
        if transaction.len() > max {
            return Err(Error::LengthOverflow {
                item: "transaction",
                len: transaction.len(),
                max,
            });
        }

        let mut out = Vec::with_capacity(transaction.len() + 12);
        if self.is_ng() {
            out.push(self.payload_encoding_prefix());
            out.extend_from_slice(&prefix_with_len_u16(transaction));
        } else {
            out.extend_from_slice(&prefix_with_len(transaction));
        }
        out.extend_from_slice(&prefix_with_len(&minimal_bytes(fees)));

        Ok(out)
    }

    /// Sign a crafted payload and encode the signature for
    /// CHECK_TRANSACTION_SIGNATURE.
    pub fn sign_and_encode(
        &self,
        partner: &SigningAuthority,
        transaction: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let message = match self.signature_computation {
            SignatureComputation::BinaryEncodedPayload => transaction.to_vec(),
            SignatureComputation::DotPrefixedBase64Url => {
                let mut m = Vec::with_capacity(1 + transaction.len());
                m.push(b'.');
                m.extend_from_slice(transaction);
                m
            }
        };

        let der = partner.sign(&message);

        let encoded = match self.signature_encoding {
            SignatureEncoding::Der => der,
            SignatureEncoding::PlainRS => match self.partner_curve {
                Curve::Secp256k1 => k256::ecdsa::Signature::from_der(&der)?
                    .to_bytes()
                    .to_vec(),
                Curve::Secp256r1 => p256::ecdsa::Signature::from_der(&der)?
                    .to_bytes()
                    .to_vec(),
            },
        };

        if self.is_ng() {
            let mut out = Vec::with_capacity(2 + encoded.len());
            out.push(self.dot_prefix());
            out.push(self.signature_encoding_prefix());
            out.extend_from_slice(&encoded);
            Ok(out)
        } else {
            Ok(encoded)
        }
    }
}
