// Copyright (c) 2023-2024 The MobileCoin Foundation

//! Caller-supplied transaction fields
//!
//! Proposals are described as a loose key/value map rather than typed
//! structs so a caller can omit fields: the device, not this layer, is
//! responsible for rejecting semantically incomplete proposals. The
//! only local check is that no unknown key is present (see
//! [`crate::spec::SubCommandSpec::check_conf`]).

use std::collections::BTreeMap;

use crate::proto::UDecimal;
use crate::Error;

/// A single transaction field value
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// UTF-8 text for string-typed schema fields
    Text(String),
    /// Raw bytes for bytes-typed schema fields
    Bytes(Vec<u8>),
    /// Unsigned decimal (sell out_amount)
    Decimal { coefficient: Vec<u8>, exponent: u32 },
}

impl FieldValue {
    pub fn text(v: impl Into<String>) -> Self {
        FieldValue::Text(v.into())
    }

    pub fn bytes(v: impl Into<Vec<u8>>) -> Self {
        FieldValue::Bytes(v.into())
    }

    pub fn decimal(coefficient: impl Into<Vec<u8>>, exponent: u32) -> Self {
        FieldValue::Decimal {
            coefficient: coefficient.into(),
            exponent,
        }
    }
}

/// Field map for one transaction proposal
pub type TxFields = BTreeMap<String, FieldValue>;

/// Extract a string-typed field, empty when absent.
///
/// Bytes are accepted and re-validated as UTF-8, matching the original
/// schema's tolerance for id fields delivered as raw device output.
pub(crate) fn take_text(fields: &TxFields, key: &str) -> Result<String, Error> {
    match fields.get(key) {
        None => Ok(String::new()),
        Some(FieldValue::Text(s)) => Ok(s.clone()),
        Some(FieldValue::Bytes(b)) => {
            String::from_utf8(b.clone()).map_err(|_| Error::FieldType(key.to_string()))
        }
        Some(_) => Err(Error::FieldType(key.to_string())),
    }
}

/// Extract a bytes-typed field, empty when absent
pub(crate) fn take_bytes(fields: &TxFields, key: &str) -> Result<Vec<u8>, Error> {
    match fields.get(key) {
        None => Ok(Vec::new()),
        Some(FieldValue::Bytes(b)) => Ok(b.clone()),
        Some(_) => Err(Error::FieldType(key.to_string())),
    }
}

/// Extract a decimal-typed field, `None` when absent
pub(crate) fn take_decimal(fields: &TxFields, key: &str) -> Result<Option<UDecimal>, Error> {
    match fields.get(key) {
        None => Ok(None),
        Some(FieldValue::Decimal {
            coefficient,
            exponent,
        }) => Ok(Some(UDecimal {
            coefficient: coefficient.clone(),
            exponent: *exponent,
        })),
        Some(_) => Err(Error::FieldType(key.to_string())),
    }
}
