//! Blockfrost REST client with timeout and error handling.
//!
//! # Responsibilities
//! - Authenticate with the `project_id` header
//! - Query chain state (address UTXOs, latest block, transactions)
//! - Submit signed transactions as raw CBOR
//! - Map transport failures and API error bodies onto `BlockchainError`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::blockchain::types::{
    ApiErrorBody, ApiInfo, BlockchainError, BlockchainResult, BlockfrostConfig, LatestBlock,
    TransactionInfo, Utxo,
};
use crate::observability::metrics;

/// Largest page Blockfrost serves for list endpoints.
pub const UTXO_PAGE_SIZE: usize = 100;

/// Chain queries and submission used by the splitter.
#[async_trait]
pub trait ChainApi: Send + Sync {
    /// API root information, used to verify credentials at startup.
    async fn info(&self) -> BlockchainResult<ApiInfo>;

    /// All unspent outputs of `address`, in API order, across every page.
    async fn address_utxos(&self, address: &str) -> BlockchainResult<Vec<Utxo>>;

    /// Most recent block.
    async fn latest_block(&self) -> BlockchainResult<LatestBlock>;

    /// Submit a CBOR encoded signed transaction, returning its hash.
    async fn submit_transaction(&self, cbor: Vec<u8>) -> BlockchainResult<String>;

    /// Look up a transaction; `None` while it is not yet on chain.
    async fn transaction(&self, hash: &str) -> BlockchainResult<Option<TransactionInfo>>;
}

/// Blockfrost API client.
#[derive(Clone)]
pub struct BlockfrostClient {
    http: reqwest::Client,
    base_url: Url,
    timeout_secs: u64,
}

impl BlockfrostClient {
    /// Create a new client.
    ///
    /// Fails if the base URL does not parse or the project id is not a valid
    /// header value.
    pub fn new(config: &BlockfrostConfig) -> BlockchainResult<Self> {
        let base_url = normalize_base_url(&config.api_url)?;

        let mut headers = HeaderMap::new();
        let mut project_id = HeaderValue::from_str(&config.project_id).map_err(|e| {
            BlockchainError::NotAvailable(format!("Invalid project id header: {}", e))
        })?;
        project_id.set_sensitive(true);
        headers.insert("project_id", project_id);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BlockchainError::NotAvailable(e.to_string()))?;

        tracing::debug!(api_url = %base_url, "Blockfrost client initialized");

        Ok(Self {
            http,
            base_url,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Base URL all endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> BlockchainResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| BlockchainError::NotAvailable(format!("Invalid endpoint '{}': {}", path, e)))
    }

    fn transport_error(&self, e: reqwest::Error) -> BlockchainError {
        if e.is_timeout() {
            BlockchainError::Timeout(self.timeout_secs)
        } else {
            BlockchainError::Http(e.to_string())
        }
    }

    /// GET `path`, decoding the body. A 404 maps to `Ok(None)`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
    ) -> BlockchainResult<Option<T>> {
        let url = self.endpoint(path)?;
        let result = self.http.get(url).send().await;
        let response = match result {
            Ok(r) => r,
            Err(e) => {
                metrics::record_api_request(endpoint, false);
                return Err(self.transport_error(e));
            }
        };

        if response.status() == StatusCode::NOT_FOUND {
            metrics::record_api_request(endpoint, true);
            return Ok(None);
        }

        let response = check_status(response).await.inspect_err(|_| {
            metrics::record_api_request(endpoint, false);
        })?;
        metrics::record_api_request(endpoint, true);

        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|e| BlockchainError::Decode(format!("{}: {}", endpoint, e)))
    }
}

#[async_trait]
impl ChainApi for BlockfrostClient {
    async fn info(&self) -> BlockchainResult<ApiInfo> {
        self.get_json("info", "")
            .await?
            .ok_or_else(|| BlockchainError::NotAvailable("API root returned 404".to_string()))
    }

    async fn address_utxos(&self, address: &str) -> BlockchainResult<Vec<Utxo>> {
        let mut utxos = Vec::new();
        for page in 1u32.. {
            let path = format!(
                "addresses/{}/utxos?count={}&page={}",
                address, UTXO_PAGE_SIZE, page
            );
            // Blockfrost answers 404 for an address that has never been used.
            let batch = self
                .get_json::<Vec<Utxo>>("address_utxos", &path)
                .await?
                .unwrap_or_default();
            let last_page = batch.len() < UTXO_PAGE_SIZE;
            utxos.extend(batch);
            if last_page {
                break;
            }
        }
        tracing::debug!(address, utxos = utxos.len(), "Fetched address utxos");
        Ok(utxos)
    }

    async fn latest_block(&self) -> BlockchainResult<LatestBlock> {
        self.get_json("latest_block", "blocks/latest")
            .await?
            .ok_or_else(|| BlockchainError::Decode("latest block returned 404".to_string()))
    }

    async fn submit_transaction(&self, cbor: Vec<u8>) -> BlockchainResult<String> {
        let url = self.endpoint("tx/submit")?;
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/cbor")
            .body(cbor)
            .send()
            .await
            .map_err(|e| {
                metrics::record_api_request("tx_submit", false);
                self.transport_error(e)
            })?;

        let response = check_status(response).await.inspect_err(|_| {
            metrics::record_api_request("tx_submit", false);
        })?;
        metrics::record_api_request("tx_submit", true);

        let body = response
            .text()
            .await
            .map_err(|e| BlockchainError::Decode(format!("tx_submit: {}", e)))?;
        Ok(body.trim().trim_matches('"').to_string())
    }

    async fn transaction(&self, hash: &str) -> BlockchainResult<Option<TransactionInfo>> {
        self.get_json("transaction", &format!("txs/{}", hash)).await
    }
}

impl std::fmt::Debug for BlockfrostClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockfrostClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Parse the base URL and make sure relative joins keep its path.
fn normalize_base_url(raw: &str) -> BlockchainResult<Url> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&with_slash)
        .map_err(|e| BlockchainError::NotAvailable(format!("Invalid API URL '{}': {}", raw, e)))
}

/// Turn a non-success response into `BlockchainError::Api`.
async fn check_status(response: Response) -> BlockchainResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) if !parsed.message.is_empty() => parsed.message,
        Ok(parsed) if !parsed.error.is_empty() => parsed.error,
        _ => body,
    };

    Err(BlockchainError::Api {
        status: status.as_u16(),
        message,
    })
}
