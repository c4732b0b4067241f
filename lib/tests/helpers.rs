use std::collections::VecDeque;
use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use log::LevelFilter;
use simplelog::SimpleLogger;

use ledger_exchange::{APDUAnswer, APDUCommand, Curve, Error, Exchange, SigningAuthority};

// Test CA key recognised by the application when built for testing
pub const TEST_CA_SECRET: &str =
    "b1ed47ef58f782e2bc4d5abe70ef66d9009c2957967017054470e0f3e10f5833";

/// Setup logging for test runs
#[allow(unused)]
pub fn init_logger() {
    let log_level = match std::env::var("LOG_LEVEL").map(|v| LevelFilter::from_str(&v)) {
        Ok(Ok(l)) => l,
        _ => LevelFilter::Debug,
    };

    let _ = SimpleLogger::init(log_level, simplelog::Config::default());
}

/// Signing authority matching the application's baked-in test CA key
#[allow(unused)]
pub fn test_ca() -> SigningAuthority {
    let secret = hex::decode(TEST_CA_SECRET).unwrap();
    SigningAuthority::from_secret_bytes(Curve::Secp256k1, "ledger_test_signer", &secret).unwrap()
}

/// One recorded command frame
#[derive(Clone, Debug, PartialEq)]
pub struct SentCommand {
    pub cla: u8,
    pub ins: u8,
    pub p1: u8,
    pub p2: u8,
    pub data: Vec<u8>,
}

/// Scripted in-memory transport.
///
/// Replies are served in push order; a request past the end of the
/// script answers INVALID_INSTRUCTION so a test failure surfaces as a
/// status error rather than a hang.
pub struct MockTransport {
    replies: Mutex<VecDeque<Vec<u8>>>,
    sent: Mutex<Vec<SentCommand>>,
}

#[allow(unused)]
impl MockTransport {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Queue a reply with the given data and status word
    pub fn push_reply(&self, data: &[u8], status: u16) {
        let mut reply = data.to_vec();
        reply.extend_from_slice(&status.to_be_bytes());
        self.replies.lock().unwrap().push_back(reply);
    }

    /// Queue `n` empty success replies
    pub fn push_ok(&self, n: usize) {
        for _ in 0..n {
            self.push_reply(&[], 0x9000);
        }
    }

    /// Commands sent so far, in order
    pub fn sent(&self) -> Vec<SentCommand> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Exchange for MockTransport {
    async fn exchange(&self, command: &APDUCommand<Vec<u8>>) -> Result<APDUAnswer<Vec<u8>>, Error> {
        self.sent.lock().unwrap().push(SentCommand {
            cla: command.cla,
            ins: command.ins,
            p1: command.p1,
            p2: command.p2,
            data: command.data.clone(),
        });

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| vec![0x6D, 0x00]);

        APDUAnswer::from_answer(reply).map_err(|_| Error::InvalidAnswer)
    }
}
