// Copyright (c) 2023-2024 The MobileCoin Foundation

//! ECDSA signing identities (partner and test CA keys)

use ledger_exchange_apdu::prefix_with_len;

use crate::Error;

/// Curves accepted by the Exchange application
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
pub enum Curve {
    Secp256k1,
    Secp256r1,
}

impl Curve {
    /// Curve identifier byte used in NG credentials
    pub fn id(&self) -> u8 {
        match self {
            Curve::Secp256k1 => 0x00,
            Curve::Secp256r1 => 0x01,
        }
    }
}

enum KeyPair {
    K256(k256::ecdsa::SigningKey),
    P256(p256::ecdsa::SigningKey),
}

/// A named ECDSA key pair.
///
/// Signatures are ECDSA over the SHA-256 of the message, DER encoded.
/// Transcoding to the fixed-width form some operations require is the
/// caller's concern (see [`crate::spec::SubCommandSpec::sign_and_encode`]).
///
/// Names must fit the credential length prefix (255 bytes); encoding
/// credentials for a longer name panics.
pub struct SigningAuthority {
    name: String,
    keys: KeyPair,
}

impl SigningAuthority {
    /// Generate a fresh random identity on the given curve
    pub fn new(curve: Curve, name: impl Into<String>) -> Self {
        let keys = match curve {
            Curve::Secp256k1 => {
                KeyPair::K256(k256::ecdsa::SigningKey::random(&mut rand_core::OsRng))
            }
            Curve::Secp256r1 => {
                KeyPair::P256(p256::ecdsa::SigningKey::random(&mut rand_core::OsRng))
            }
        };

        Self {
            name: name.into(),
            keys,
        }
    }

    /// Load an identity from a raw 32-byte secret scalar
    pub fn from_secret_bytes(
        curve: Curve,
        name: impl Into<String>,
        secret: &[u8],
    ) -> Result<Self, Error> {
        let keys = match curve {
            Curve::Secp256k1 => KeyPair::K256(k256::ecdsa::SigningKey::from_slice(secret)?),
            Curve::Secp256r1 => KeyPair::P256(p256::ecdsa::SigningKey::from_slice(secret)?),
        };

        Ok(Self {
            name: name.into(),
            keys,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn curve(&self) -> Curve {
        match &self.keys {
            KeyPair::K256(_) => Curve::Secp256k1,
            KeyPair::P256(_) => Curve::Secp256r1,
        }
    }

    /// Uncompressed SEC1 public key (65 bytes, `0x04` prefixed)
    pub fn public_key(&self) -> Vec<u8> {
        match &self.keys {
            KeyPair::K256(k) => k
                .verifying_key()
                .to_encoded_point(false)
                .as_bytes()
                .to_vec(),
            KeyPair::P256(k) => k
                .verifying_key()
                .to_encoded_point(false)
                .as_bytes()
                .to_vec(),
        }
    }

    /// DER-encoded ECDSA-SHA256 signature over `message`
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        match &self.keys {
            KeyPair::K256(k) => {
                use k256::ecdsa::signature::Signer;
                let sig: k256::ecdsa::Signature = k.sign(message);
                sig.to_der().as_bytes().to_vec()
            }
            KeyPair::P256(k) => {
                use p256::ecdsa::signature::Signer;
                let sig: p256::ecdsa::Signature = k.sign(message);
                sig.to_der().as_bytes().to_vec()
            }
        }
    }

    /// Legacy partner credentials: name length, name, public key
    pub fn credentials(&self) -> Vec<u8> {
        let mut out = prefix_with_len(self.name.as_bytes());
        out.extend_from_slice(&self.public_key());
        out
    }

    /// NG partner credentials: a curve identifier byte sits between the
    /// name and the public key
    pub fn credentials_ng(&self) -> Vec<u8> {
        let mut out = prefix_with_len(self.name.as_bytes());
        out.push(self.curve().id());
        out.extend_from_slice(&self.public_key());
        out
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn credentials_layout() {
        let partner = SigningAuthority::new(Curve::Secp256k1, "Partner");
        let creds = partner.credentials();

        assert_eq!(creds[0], 7);
        assert_eq!(&creds[1..8], b"Partner");
        assert_eq!(creds.len(), 1 + 7 + 65);
        assert_eq!(creds[8], 0x04);
    }

    #[test]
    fn ng_credentials_carry_curve_id() {
        let k1 = SigningAuthority::new(Curve::Secp256k1, "P");
        let r1 = SigningAuthority::new(Curve::Secp256r1, "P");

        assert_eq!(k1.credentials_ng()[2], 0x00);
        assert_eq!(r1.credentials_ng()[2], 0x01);
        assert_eq!(k1.credentials_ng().len(), 1 + 1 + 1 + 65);
    }

    #[test]
    fn signature_verifies() {
        use k256::ecdsa::signature::Verifier;

        let signer = SigningAuthority::new(Curve::Secp256k1, "S");
        let message = b"exchange payload";
        let der = signer.sign(message);

        let key = k256::ecdsa::VerifyingKey::from_sec1_bytes(&signer.public_key()).unwrap();
        let sig = k256::ecdsa::Signature::from_der(&der).unwrap();
        assert!(key.verify(message, &sig).is_ok());
    }

    #[test]
    fn rejects_bad_secret() {
        assert!(SigningAuthority::from_secret_bytes(Curve::Secp256k1, "S", &[0u8; 4]).is_err());
    }
}
