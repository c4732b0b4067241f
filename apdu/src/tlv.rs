// Copyright (c) 2023-2024 The MobileCoin Foundation

//! Tag/length/value codec for descriptor payloads
//!
//! Records are `tag (1) ‖ length (1) ‖ value`. This side only ever
//! writes records, decoding happens in firmware, so the encoding here
//! must stay bit-exact against that independent decoder.

use crate::helpers::minimal_bytes;

/// A value encodable into a TLV record
#[derive(Clone, Debug, PartialEq)]
pub enum TlvValue<'a> {
    /// Minimal big-endian integer, at least one byte
    Uint(u64),
    /// UTF-8 text, no terminator
    Text(&'a str),
    /// Raw bytes
    Bytes(&'a [u8]),
}

impl From<u64> for TlvValue<'_> {
    fn from(v: u64) -> Self {
        TlvValue::Uint(v)
    }
}

impl From<u32> for TlvValue<'_> {
    fn from(v: u32) -> Self {
        TlvValue::Uint(v as u64)
    }
}

impl From<u8> for TlvValue<'_> {
    fn from(v: u8) -> Self {
        TlvValue::Uint(v as u64)
    }
}

impl<'a> From<&'a str> for TlvValue<'a> {
    fn from(v: &'a str) -> Self {
        TlvValue::Text(v)
    }
}

impl<'a> From<&'a [u8]> for TlvValue<'a> {
    fn from(v: &'a [u8]) -> Self {
        TlvValue::Bytes(v)
    }
}

impl TlvValue<'_> {
    fn encode(&self) -> Vec<u8> {
        match self {
            TlvValue::Uint(v) => minimal_bytes(*v),
            TlvValue::Text(s) => s.as_bytes().to_vec(),
            TlvValue::Bytes(b) => b.to_vec(),
        }
    }
}

/// Encode a single TLV record.
///
/// The length byte caps values at 255 bytes by calling convention, the
/// codec itself does not reject longer values. Firmware refuses
/// overlong records.
pub fn tlv<'a>(tag: u8, value: impl Into<TlvValue<'a>>) -> Vec<u8> {
    let value = value.into().encode();

    let mut out = Vec::with_capacity(2 + value.len());
    out.push(tag);
    out.push(value.len() as u8);
    out.extend_from_slice(&value);
    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tlv_layout() {
        let rec = tlv(0x20, b"name".as_slice());
        assert_eq!(rec[0], 0x20);
        assert_eq!(rec[1], 4);
        assert_eq!(&rec[2..], b"name");
    }

    #[test]
    fn tlv_uint_minimal() {
        assert_eq!(tlv(0x23, 0u64), vec![0x23, 0x01, 0x00]);
        assert_eq!(tlv(0x23, 900u64), vec![0x23, 0x02, 0x03, 0x84]);
        assert_eq!(tlv(0x02, 2u8), vec![0x02, 0x01, 0x02]);
    }

    #[test]
    fn tlv_text_is_utf8() {
        assert_eq!(tlv(0x05, "SOL"), vec![0x05, 0x03, b'S', b'O', b'L']);
    }

    #[test]
    fn tlv_empty_value() {
        assert_eq!(tlv(0x92, b"".as_slice()), vec![0x92, 0x00]);
    }
}
