// Copyright (c) 2023-2024 The MobileCoin Foundation

//! Exchange application client

use std::fmt;
use std::sync::Arc;

use ledger_apdu::APDUCommand;
use log::debug;
use tokio::task::JoinHandle;

use ledger_exchange_apdu::chunk::chunk_payload;
use ledger_exchange_apdu::status::SW_OK;
use ledger_exchange_apdu::{p2, Instruction, P2Flags, Rate, SubCommand, EXCHANGE_CLA, MAX_CHUNK_SIZE};

use crate::spec::{spec_for, SubCommandSpec};
use crate::transport::Exchange;
use crate::Error;

/// Exchange application version
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Client for one exchange flow.
///
/// A client is bound to a rate and operation kind at construction; the
/// pair is carried in P1/P2 of every command so the application can
/// reject commands from a mismatched flow.
pub struct ExchangeClient<T: Exchange + ?Sized> {
    transport: Arc<T>,
    rate: Rate,
    subcommand: SubCommand,
    spec: &'static SubCommandSpec,
}

/// Run the frames of one command against a transport, returning the
/// data of the final answer
async fn exchange_frames<T: Exchange + ?Sized>(
    transport: &T,
    rate: Rate,
    subcommand: SubCommand,
    ins: Instruction,
    flags: P2Flags,
    payload: &[u8],
) -> Result<Vec<u8>, Error> {
    let mut last = Vec::new();

    for chunk in chunk_payload(payload, MAX_CHUNK_SIZE) {
        let command = APDUCommand {
            cla: EXCHANGE_CLA,
            ins: ins as u8,
            p1: rate.into(),
            p2: p2(subcommand, chunk.flags | flags),
            data: chunk.data.to_vec(),
        };

        debug!(
            "{:?} {} {} ({} bytes, p2 {:#04x})",
            ins,
            rate,
            subcommand,
            chunk.data.len(),
            command.p2
        );

        let answer = transport.exchange(&command).await?;
        if answer.retcode() != SW_OK {
            return Err(Error::from_status(answer.retcode()));
        }

        last = answer.apdu_data().to_vec();
    }

    Ok(last)
}

impl<T: Exchange + ?Sized + 'static> ExchangeClient<T> {
    pub fn new(transport: Arc<T>, rate: Rate, subcommand: SubCommand) -> Self {
        Self {
            transport,
            rate,
            subcommand,
            spec: spec_for(subcommand),
        }
    }

    /// Encoding spec for this client's operation kind
    pub fn spec(&self) -> &'static SubCommandSpec {
        self.spec
    }

    /// Shared transport handle, for injecting certificates on the same
    /// channel as the flow
    pub fn transport(&self) -> Arc<T> {
        self.transport.clone()
    }

    async fn request(
        &self,
        ins: Instruction,
        flags: P2Flags,
        payload: &[u8],
    ) -> Result<Vec<u8>, Error> {
        exchange_frames(
            &*self.transport,
            self.rate,
            self.subcommand,
            ins,
            flags,
            payload,
        )
        .await
    }

    /// Fetch the application version
    pub async fn get_version(&self) -> Result<Version, Error> {
        let data = self
            .request(Instruction::GetVersion, P2Flags::empty(), &[])
            .await?;

        if data.len() < 3 {
            return Err(Error::InvalidAnswer);
        }

        Ok(Version {
            major: data[0],
            minor: data[1],
            patch: data[2],
        })
    }

    /// Open a new flow, returning the device transaction id.
    ///
    /// Legacy operations return a 10-character ASCII id, NG operations
    /// a 32-byte nonce; either feeds [`SubCommandSpec::craft`] as-is.
    pub async fn start_new_transaction(&self) -> Result<Vec<u8>, Error> {
        let id = self
            .request(Instruction::StartNewTransaction, P2Flags::empty(), &[])
            .await?;

        let expected = if self.spec.is_ng() { 32 } else { 10 };
        if id.len() != expected {
            return Err(Error::InvalidAnswer);
        }

        Ok(id)
    }

    /// Provide the partner credentials (see
    /// [`SubCommandSpec::credentials`])
    pub async fn set_partner_key(&self, credentials: &[u8]) -> Result<(), Error> {
        self.request(Instruction::SetPartnerKey, P2Flags::empty(), credentials)
            .await?;
        Ok(())
    }

    /// Provide the CA signature over the partner credentials
    pub async fn check_partner_key(&self, signed_credentials: &[u8]) -> Result<(), Error> {
        self.request(Instruction::CheckPartner, P2Flags::empty(), signed_credentials)
            .await?;
        Ok(())
    }

    /// Send the framed transaction proposal, chunked as needed
    pub async fn process_transaction(&self, framed: &[u8]) -> Result<(), Error> {
        self.request(Instruction::ProcessTransactionResponse, P2Flags::empty(), framed)
            .await?;
        Ok(())
    }

    /// Provide the partner signature over the proposal
    pub async fn check_transaction_signature(&self, signature: &[u8]) -> Result<(), Error> {
        self.request(
            Instruction::CheckTransactionSignature,
            P2Flags::empty(),
            signature,
        )
        .await?;
        Ok(())
    }

    /// Fetch a fresh 4-byte anti-replay challenge for descriptors
    pub async fn get_challenge(&self) -> Result<[u8; 4], Error> {
        let data = self
            .request(Instruction::GetChallenge, P2Flags::empty(), &[])
            .await?;

        data.try_into().map_err(|_| Error::InvalidAnswer)
    }

    /// Send a signed trusted-name descriptor, chunked as needed
    pub async fn send_trusted_name_descriptor(&self, descriptor: &[u8]) -> Result<(), Error> {
        self.request(
            Instruction::SendTrustedNameDescriptor,
            P2Flags::empty(),
            descriptor,
        )
        .await?;
        Ok(())
    }

    /// Send a signed instruction descriptor, chunked as needed
    pub async fn send_swap_template(&self, descriptor: &[u8]) -> Result<(), Error> {
        self.request(Instruction::SendSwapTemplate, P2Flags::empty(), descriptor)
            .await?;
        Ok(())
    }

    /// Validate the refund address without prompting the user
    pub async fn check_refund_address_no_display(&self, payload: &[u8]) -> Result<(), Error> {
        self.request(
            Instruction::CheckRefundAddressNoDisplay,
            P2Flags::empty(),
            payload,
        )
        .await?;
        Ok(())
    }

    /// Hand the flow over to the coin application for signing
    pub async fn start_signing_transaction(&self) -> Result<(), Error> {
        self.request(Instruction::StartSigningTransaction, P2Flags::empty(), &[])
            .await?;
        Ok(())
    }

    /// Start a command whose final frame blocks on user interaction.
    ///
    /// The exchange runs on its own task so the caller can drive the
    /// screen (or an emulator's button API) while the command is
    /// outstanding; [`InteractiveRequest::await_result`] joins it.
    fn begin_interactive(
        &self,
        ins: Instruction,
        flags: P2Flags,
        payload: Vec<u8>,
    ) -> InteractiveRequest {
        let transport = self.transport.clone();
        let rate = self.rate;
        let subcommand = self.subcommand;

        let task = tokio::spawn(async move {
            exchange_frames(&*transport, rate, subcommand, ins, flags, &payload).await
        });

        InteractiveRequest { task }
    }

    /// Validate and display the payout address.
    ///
    /// Set [`P2Flags::ATA`] when the payout destination is a derived
    /// token account rather than the owner address.
    pub fn check_payout_address(&self, payload: Vec<u8>, flags: P2Flags) -> InteractiveRequest {
        self.begin_interactive(Instruction::CheckPayoutAddress, flags, payload)
    }

    /// Validate and display the refund address, completing the
    /// on-screen proposal review
    pub fn check_refund_address(&self, payload: Vec<u8>) -> InteractiveRequest {
        self.begin_interactive(Instruction::CheckRefundAddress, P2Flags::empty(), payload)
    }
}

/// An in-flight interactive command.
///
/// Dropping the handle detaches the command rather than cancelling it;
/// the device keeps waiting for the user either way.
pub struct InteractiveRequest {
    task: JoinHandle<Result<Vec<u8>, Error>>,
}

impl InteractiveRequest {
    /// Wait for the user's decision and the final status word
    pub async fn await_result(self) -> Result<Vec<u8>, Error> {
        self.task.await?
    }
}
