//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use cardano_address_splitter::blockchain::{
    ApiInfo, AssetAmount, BlockchainError, BlockchainResult, ChainApi, LatestBlock,
    TransactionInfo, Utxo,
};
use cardano_address_splitter::cardano::{
    CliError, CliResult, FeeEstimate, RawTransaction, TransactionTool,
};
use cardano_address_splitter::config::SplitterConfig;

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// Start a programmable mock backend on an ephemeral port.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(MockRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        let (status, body) = f(request).await;
                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            403 => "403 Forbidden",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Option<MockRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let content_length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Some(MockRequest {
        method,
        path,
        headers,
        body,
    })
}

pub fn utxo(hash: &str, index: u32, lovelace: u64) -> Utxo {
    Utxo {
        tx_hash: hash.to_string(),
        output_index: index,
        amount: vec![AssetAmount::lovelace(lovelace)],
    }
}

/// Configuration with every required value filled in.
pub fn test_config(work_root: &Path) -> SplitterConfig {
    let mut config = SplitterConfig::default();
    config.monitor.address = "addr_test1monitor".into();
    config.monitor.utxo_count_split = 3;
    config.split.lower_address = "addr_test1lower".into();
    config.split.higher_address = "addr_test1higher".into();
    config.blockfrost.project_id = "preprodtest".into();
    config.transaction.work_root = work_root.to_string_lossy().into_owned();
    config
}

/// In-memory chain API.
#[derive(Default)]
pub struct FakeChain {
    pub utxos: Mutex<Vec<Utxo>>,
    pub slot: Option<u64>,
    pub submit_hash: String,
    /// Responses to successive transaction lookups; empty means "not found".
    pub lookups: Mutex<VecDeque<BlockchainResult<Option<TransactionInfo>>>>,
    pub submitted: Mutex<Vec<Vec<u8>>>,
    pub lookup_count: Mutex<u32>,
    pub fail_utxos: bool,
}

impl FakeChain {
    pub fn with_utxos(utxos: Vec<Utxo>) -> Self {
        Self {
            utxos: Mutex::new(utxos),
            slot: Some(50_000_000),
            submit_hash: "f00dcafe".into(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl ChainApi for FakeChain {
    async fn info(&self) -> BlockchainResult<ApiInfo> {
        Ok(ApiInfo {
            url: "https://blockfrost.io/".into(),
            version: "0.1.0".into(),
        })
    }

    async fn address_utxos(&self, _address: &str) -> BlockchainResult<Vec<Utxo>> {
        if self.fail_utxos {
            return Err(BlockchainError::Api {
                status: 500,
                message: "boom".into(),
            });
        }
        Ok(self.utxos.lock().unwrap().clone())
    }

    async fn latest_block(&self) -> BlockchainResult<LatestBlock> {
        Ok(LatestBlock {
            hash: "blockhash".into(),
            height: Some(1),
            slot: self.slot,
        })
    }

    async fn submit_transaction(&self, cbor: Vec<u8>) -> BlockchainResult<String> {
        self.submitted.lock().unwrap().push(cbor);
        Ok(self.submit_hash.clone())
    }

    async fn transaction(&self, _hash: &str) -> BlockchainResult<Option<TransactionInfo>> {
        *self.lookup_count.lock().unwrap() += 1;
        self.lookups.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }
}

/// Step at which `FakeTool` fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Never,
    Draft,
    Fee,
    Sign,
}

/// Transaction tool that writes placeholder files instead of running cardano-cli.
pub struct FakeTool {
    pub fee: u64,
    pub fail_at: FailAt,
    pub signed_cbor_hex: String,
    pub built: Mutex<Vec<RawTransaction>>,
    pub estimates: Mutex<Vec<FeeEstimate>>,
    pub seen_dirs: Mutex<Vec<std::path::PathBuf>>,
}

impl FakeTool {
    pub fn new(fee: u64) -> Self {
        Self {
            fee,
            fail_at: FailAt::Never,
            signed_cbor_hex: "84a40081825820".into(),
            built: Mutex::new(Vec::new()),
            estimates: Mutex::new(Vec::new()),
            seen_dirs: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_at(mut self, step: FailAt) -> Self {
        self.fail_at = step;
        self
    }

    fn failure(step: &str) -> CliError {
        CliError::Failed {
            program: "cardano-cli".into(),
            status: "exit status: 1".into(),
            stderr: format!("{} failed", step),
        }
    }
}

#[async_trait]
impl TransactionTool for FakeTool {
    async fn build_raw(&self, tx: &RawTransaction) -> CliResult<()> {
        if let Some(dir) = tx.out_file.parent() {
            self.seen_dirs.lock().unwrap().push(dir.to_path_buf());
        }
        if self.fail_at == FailAt::Draft {
            return Err(Self::failure("build-raw"));
        }
        tokio::fs::write(&tx.out_file, b"body").await.unwrap();
        self.built.lock().unwrap().push(tx.clone());
        Ok(())
    }

    async fn calculate_min_fee(&self, estimate: &FeeEstimate) -> CliResult<u64> {
        self.estimates.lock().unwrap().push(estimate.clone());
        if self.fail_at == FailAt::Fee {
            return Err(Self::failure("calculate-min-fee"));
        }
        Ok(self.fee)
    }

    async fn sign(&self, _tx_body_file: &Path, out_file: &Path) -> CliResult<()> {
        if self.fail_at == FailAt::Sign {
            return Err(Self::failure("sign"));
        }
        let envelope = format!(
            r#"{{"type": "Witnessed Tx BabbageEra", "description": "", "cborHex": "{}"}}"#,
            self.signed_cbor_hex
        );
        tokio::fs::write(out_file, envelope).await.unwrap();
        Ok(())
    }
}
