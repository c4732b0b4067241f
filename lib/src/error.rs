// Copyright (c) 2023-2024 The MobileCoin Foundation

use ledger_exchange_apdu::status::StatusWord;

/// Exchange client error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Field key not in the subcommand's allowed set, caught before
    /// any wire traffic
    #[error("unknown field '{0}' for this subcommand")]
    UnknownField(String),

    /// Field value type does not match the message schema
    #[error("field '{0}' does not accept the supplied value type")]
    FieldType(String),

    /// Payload exceeds the addressable prefix width, caught before
    /// transmission rather than truncated
    #[error("{item} length {len} exceeds {max} bytes")]
    LengthOverflow {
        item: &'static str,
        len: usize,
        max: usize,
    },

    /// Signature parse / re-encode failure
    #[error("malformed ECDSA signature: {0}")]
    Signature(#[from] k256::ecdsa::Error),

    /// User declined on the device, never retried automatically
    #[error("operation rejected by user")]
    UserRefused,

    /// Device-side signature or content verification failed
    #[error("device-side signature verification failed")]
    SignVerificationFail,

    /// Any other non-success status word, carried raw
    #[error("device returned status {0:#06x}")]
    Device(u16),

    /// Response frame too short or otherwise unparseable
    #[error("malformed response frame")]
    InvalidAnswer,

    /// No certificate issued for a PKI-capable model / usage pair
    #[error("no certificate registered for this device model and usage")]
    MissingCertificate,

    /// Transport i/o failure
    #[error("transport i/o: {0}")]
    Io(#[from] std::io::Error),

    /// Interactive request task failed to resolve
    #[error("interactive request did not resolve: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl Error {
    /// Classify a non-success status word into the error taxonomy
    pub fn from_status(sw: u16) -> Self {
        match StatusWord::try_from(sw) {
            Ok(StatusWord::UserRefused) => Error::UserRefused,
            Ok(StatusWord::SignVerificationFail) => Error::SignVerificationFail,
            _ => Error::Device(sw),
        }
    }

    /// Raw status word for device-reported failures
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::UserRefused => Some(StatusWord::UserRefused.into()),
            Error::SignVerificationFail => Some(StatusWord::SignVerificationFail.into()),
            Error::Device(sw) => Some(*sw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(matches!(Error::from_status(0x6A84), Error::UserRefused));
        assert!(matches!(
            Error::from_status(0x9D1A),
            Error::SignVerificationFail
        ));
        assert!(matches!(Error::from_status(0x6A80), Error::Device(0x6A80)));
        // Unknown words stay raw
        assert_eq!(Error::from_status(0x6F42).status(), Some(0x6F42));
    }
}
