// Copyright (c) 2023-2024 The MobileCoin Foundation

//! Device transports

use async_trait::async_trait;
use ledger_apdu::{APDUAnswer, APDUCommand};
use log::trace;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::sync::Mutex;

use crate::Error;

/// APDU exchange with a device (or emulator).
///
/// One request / one response; implementations serialise concurrent
/// callers so frames of a chunked payload cannot interleave.
#[async_trait]
pub trait Exchange: Send + Sync {
    async fn exchange(&self, command: &APDUCommand<Vec<u8>>) -> Result<APDUAnswer<Vec<u8>>, Error>;
}

/// TCP transport speaking the emulator's length-prefixed APDU protocol.
///
/// Each direction is a big-endian u32 length followed by the bytes; the
/// response data is followed by the two status bytes, which are not
/// counted in the response length.
pub struct TcpTransport {
    stream: Mutex<TcpStream>,
}

impl TcpTransport {
    /// Connect to an emulator APDU port (usually `127.0.0.1:9999`)
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, Error> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self {
            stream: Mutex::new(stream),
        })
    }
}

#[async_trait]
impl Exchange for TcpTransport {
    async fn exchange(&self, command: &APDUCommand<Vec<u8>>) -> Result<APDUAnswer<Vec<u8>>, Error> {
        let raw = command.serialize();
        trace!("tx: {}", hex::encode(&raw));

        let mut stream = self.stream.lock().await;

        stream.write_u32(raw.len() as u32).await?;
        stream.write_all(&raw).await?;
        stream.flush().await?;

        let len = stream.read_u32().await? as usize;
        let mut answer = vec![0u8; len + 2];
        stream.read_exact(&mut answer).await?;

        trace!("rx: {}", hex::encode(&answer));

        APDUAnswer::from_answer(answer).map_err(|_| Error::InvalidAnswer)
    }
}
