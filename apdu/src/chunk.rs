// Copyright (c) 2023-2024 The MobileCoin Foundation

//! MORE/EXTEND chunking for payloads larger than one command frame
//!
//! A payload is split into frames of at most the requested chunk size.
//! Every frame but the last carries MORE, every frame but the first
//! carries EXTEND, so a single-frame payload carries neither. The
//! channel allows exactly one open extension session at a time: a new
//! first frame before the previous LAST frame is a protocol violation,
//! detected by firmware rather than locally.

use crate::P2Flags;

/// One frame of a chunked payload
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Chunk<'a> {
    /// MORE/EXTEND flags for this frame
    pub flags: P2Flags,
    /// Frame data, at most the chunk size
    pub data: &'a [u8],
}

/// Split a payload into ordered frames.
///
/// An empty payload still produces exactly one zero-length frame, since
/// for some commands the absence of data is itself the request.
pub fn chunk_payload(payload: &[u8], chunk_size: usize) -> Vec<Chunk<'_>> {
    if payload.is_empty() {
        return vec![Chunk {
            flags: P2Flags::empty(),
            data: payload,
        }];
    }

    let pieces: Vec<&[u8]> = payload.chunks(chunk_size).collect();
    let last = pieces.len() - 1;

    pieces
        .into_iter()
        .enumerate()
        .map(|(i, data)| {
            let mut flags = P2Flags::empty();
            if i != last {
                flags |= P2Flags::MORE;
            }
            if i != 0 {
                flags |= P2Flags::EXTEND;
            }
            Chunk { flags, data }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::MAX_CHUNK_SIZE;

    #[test]
    fn empty_payload_is_one_frame() {
        let frames = chunk_payload(&[], MAX_CHUNK_SIZE);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].flags, P2Flags::empty());
        assert!(frames[0].data.is_empty());
    }

    #[test]
    fn single_frame_has_no_flags() {
        let payload = vec![0xAB; MAX_CHUNK_SIZE];
        let frames = chunk_payload(&payload, MAX_CHUNK_SIZE);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].flags, P2Flags::empty());
        assert_eq!(frames[0].data.len(), MAX_CHUNK_SIZE);
    }

    #[test]
    fn six_hundred_bytes_is_three_frames() {
        let payload = vec![0xCD; 600];
        let frames = chunk_payload(&payload, MAX_CHUNK_SIZE);

        let sizes: Vec<usize> = frames.iter().map(|f| f.data.len()).collect();
        assert_eq!(sizes, vec![255, 255, 90]);

        assert_eq!(frames[0].flags, P2Flags::MORE);
        assert_eq!(frames[1].flags, P2Flags::MORE | P2Flags::EXTEND);
        assert_eq!(frames[2].flags, P2Flags::EXTEND);
    }

    #[test]
    fn frame_count_is_ceil() {
        for len in [1usize, 254, 255, 256, 510, 511, 1000] {
            let payload = vec![0u8; len];
            let frames = chunk_payload(&payload, MAX_CHUNK_SIZE);
            assert_eq!(frames.len(), (len + MAX_CHUNK_SIZE - 1) / MAX_CHUNK_SIZE);

            // Reassembly must recover the payload exactly
            let total: usize = frames.iter().map(|f| f.data.len()).sum();
            assert_eq!(total, len);
        }
    }
}
