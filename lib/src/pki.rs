// Copyright (c) 2023-2024 The MobileCoin Foundation

//! PKI certificate injection

use std::sync::Arc;

use ledger_apdu::APDUCommand;
use log::debug;

use ledger_exchange_apdu::pki::{certificate, CertificateUsage, DeviceModel, PKI_CLA, PKI_INS};
use ledger_exchange_apdu::status::SW_OK;

use crate::transport::Exchange;
use crate::Error;

/// Loads usage certificates ahead of trust-dependent payloads.
///
/// Shares the flow's transport so the certificate lands on the same
/// channel as the descriptor it authorises.
pub struct PkiInjector<T: Exchange + ?Sized> {
    transport: Arc<T>,
    model: DeviceModel,
}

impl<T: Exchange + ?Sized> PkiInjector<T> {
    pub fn new(transport: Arc<T>, model: DeviceModel) -> Self {
        Self { transport, model }
    }

    /// Inject the certificate for a usage class.
    ///
    /// A no-op on models without PKI support, where firmware skips the
    /// corresponding verification.
    pub async fn inject(&self, usage: CertificateUsage) -> Result<(), Error> {
        if !self.model.supports_pki() {
            debug!("{} has no PKI support, skipping {} certificate", self.model, usage);
            return Ok(());
        }

        let blob = certificate(self.model, usage).ok_or(Error::MissingCertificate)?;

        let command = APDUCommand {
            cla: PKI_CLA,
            ins: PKI_INS,
            p1: usage.into(),
            p2: 0x00,
            data: blob,
        };

        let answer = self.transport.exchange(&command).await?;
        if answer.retcode() != SW_OK {
            return Err(Error::from_status(answer.retcode()));
        }

        Ok(())
    }
}
