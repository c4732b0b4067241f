// Copyright (c) 2023-2024 The MobileCoin Foundation

//! Exchange application client library
//!
//! Drives partner-brokered swap / sell / fund flows against the
//! on-device Exchange application: declarative per-operation encoding
//! specs, transaction crafting and signature transcoding, the chunked
//! command protocol, PKI certificate injection, and the signed TLV
//! descriptor payloads.

/// Re-export `ledger-exchange-apdu` for consumers
pub use ledger_exchange_apdu::{self as apdu};

pub use ledger_apdu::{APDUAnswer, APDUCommand};

mod error;
pub use error::Error;

pub mod fields;
pub mod proto;
pub mod spec;

mod signer;
pub use signer::{Curve, SigningAuthority};

pub mod transport;
pub use transport::Exchange;

mod client;
pub use client::{ExchangeClient, InteractiveRequest, Version};

mod pki;
pub use pki::PkiInjector;
