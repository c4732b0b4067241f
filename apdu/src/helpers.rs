// Copyright (c) 2023-2024 The MobileCoin Foundation

//! Shared byte-packing helpers for framing and TLV encoding

use byteorder::{BigEndian, WriteBytesExt};

/// Encode an integer as its minimal big-endian byte string.
///
/// Zero encodes as a single `0x00` byte, never as an empty string.
pub fn minimal_bytes(n: u64) -> Vec<u8> {
    let len = ((64 - n.leading_zeros() + 7) / 8).max(1) as usize;
    n.to_be_bytes()[8 - len..].to_vec()
}

/// Prefix `data` with its length as a single byte.
///
/// Panics when `data` exceeds 255 bytes, a truncated length byte must
/// never reach the wire.
pub fn prefix_with_len(data: &[u8]) -> Vec<u8> {
    assert!(data.len() <= u8::MAX as usize, "length prefix overflow");

    let mut out = Vec::with_capacity(1 + data.len());
    out.push(data.len() as u8);
    out.extend_from_slice(data);
    out
}

/// Prefix `data` with its length as a 2-byte big-endian value.
///
/// Panics when `data` exceeds 65535 bytes.
pub fn prefix_with_len_u16(data: &[u8]) -> Vec<u8> {
    assert!(data.len() <= u16::MAX as usize, "length prefix overflow");

    let mut out = Vec::with_capacity(2 + data.len());
    out.write_u16::<BigEndian>(data.len() as u16)
        .expect("write to Vec is infallible");
    out.extend_from_slice(data);
    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn minimal_bytes_zero_is_one_byte() {
        assert_eq!(minimal_bytes(0), vec![0x00]);
    }

    #[test]
    fn minimal_bytes_no_leading_zero() {
        assert_eq!(minimal_bytes(0x64), vec![0x64]);
        assert_eq!(minimal_bytes(0x0100), vec![0x01, 0x00]);
        assert_eq!(minimal_bytes(0xFF), vec![0xFF]);
        assert_eq!(
            minimal_bytes(u64::MAX),
            vec![0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );

        for n in [1u64, 0x80, 0x1234, 0x013f_c3a7_17fb_5000] {
            let b = minimal_bytes(n);
            assert_ne!(b[0], 0x00);
            assert_eq!(b.len(), ((64 - n.leading_zeros() + 7) / 8) as usize);
        }
    }

    #[test]
    fn length_prefixes() {
        assert_eq!(prefix_with_len(b"abc"), vec![0x03, b'a', b'b', b'c']);
        assert_eq!(prefix_with_len(b""), vec![0x00]);
        assert_eq!(
            prefix_with_len_u16(b"abc"),
            vec![0x00, 0x03, b'a', b'b', b'c']
        );

        let long = vec![0xAA; 300];
        let p = prefix_with_len_u16(&long);
        assert_eq!(&p[..2], &[0x01, 0x2C]);
        assert_eq!(p.len(), 302);
    }

    #[test]
    #[should_panic(expected = "length prefix overflow")]
    fn single_byte_prefix_overflow_panics() {
        prefix_with_len(&vec![0u8; 256]);
    }
}
