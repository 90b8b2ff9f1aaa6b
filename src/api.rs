// Safe Transaction Service client
//
// Fetches pending multisig transactions for (safe, nonce). The response is
// treated as untrusted input: candidates are re-filtered by nonce, exactly one
// must remain, and the caller still validates and hashes it locally.

use crate::networks::Network;
use crate::transaction::{RawScalar, RawTransaction};
use alloy_primitives::{Address, U256};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Request timeout for the transaction service
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transaction service returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Unsupported network: no transaction service known for chain id {chain_id}")]
    UnsupportedNetwork { chain_id: u64 },

    #[error("No transaction found for nonce {nonce}")]
    NoTransaction { nonce: u64 },

    #[error("{count} transactions share nonce {nonce}; exactly one is required before hashing")]
    AmbiguousNonce { nonce: u64, count: usize },

    #[error("Expected exactly one transaction in input, found {count}")]
    AmbiguousInput { count: usize },
}

/// One page of `GET /api/v1/safes/{safe}/multisig-transactions/`
#[derive(Debug, Clone, Deserialize)]
pub struct MultisigTransactionPage {
    #[serde(default)]
    pub count: Option<u64>,
    pub results: Vec<RawTransaction>,
}

/// Local input: either a service response page or a single transaction object
#[derive(Debug, Clone)]
pub enum TransactionInput {
    Page(MultisigTransactionPage),
    Single(RawTransaction),
}

/// Whether the candidate's nonce field equals `nonce`
fn matches_nonce(raw: &RawTransaction, nonce: u64) -> bool {
    let text = match &raw.nonce {
        Some(RawScalar::Text(s)) => s.trim().to_string(),
        Some(RawScalar::Number(n)) => n.to_string(),
        None => return false,
    };
    text.parse::<U256>().is_ok_and(|n| n == U256::from(nonce))
}

/// Keep only candidates for `nonce` and require exactly one
pub fn select_single(
    candidates: Vec<RawTransaction>,
    nonce: u64,
) -> Result<RawTransaction, ApiError> {
    let mut matching: Vec<RawTransaction> = candidates
        .into_iter()
        .filter(|raw| matches_nonce(raw, nonce))
        .collect();

    match matching.len() {
        0 => Err(ApiError::NoTransaction { nonce }),
        1 => Ok(matching.remove(0)),
        count => Err(ApiError::AmbiguousNonce { nonce, count }),
    }
}

/// Parse a local JSON document into exactly one transaction
///
/// A document with a `results` key is a service page and must parse as one;
/// anything else is a single transaction object. When `nonce` is given the
/// resolved transaction must carry it, whichever shape the document has.
/// Without a nonce a page must contain a single result.
pub fn parse_input(json: &str, nonce: Option<u64>) -> Result<RawTransaction, ApiError> {
    let document: serde_json::Value =
        serde_json::from_str(json).map_err(|e| ApiError::Parse(e.to_string()))?;

    let input = if document.get("results").is_some() {
        serde_json::from_value(document)
            .map(TransactionInput::Page)
            .map_err(|e| ApiError::Parse(format!("invalid service page: {e}")))?
    } else {
        serde_json::from_value(document)
            .map(TransactionInput::Single)
            .map_err(|e| ApiError::Parse(e.to_string()))?
    };

    match (input, nonce) {
        (TransactionInput::Single(raw), Some(nonce)) => select_single(vec![raw], nonce),
        (TransactionInput::Single(raw), None) => Ok(raw),
        (TransactionInput::Page(page), Some(nonce)) => select_single(page.results, nonce),
        (TransactionInput::Page(mut page), None) => match page.results.len() {
            1 => Ok(page.results.remove(0)),
            count => Err(ApiError::AmbiguousInput { count }),
        },
    }
}

/// Client for one Safe Transaction Service deployment
pub struct SafeApiClient {
    client: Client,
    base_url: String,
}

impl SafeApiClient {
    /// Create a client for an explicit base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::Http)?;

        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client for a network's hosted service
    pub fn for_network(network: Network) -> Result<Self, ApiError> {
        Self::new(network.api_url())
    }

    /// Create a client for the hosted service of a chain id
    pub fn for_chain_id(chain_id: u64) -> Result<Self, ApiError> {
        let network = Network::from_chain_id(chain_id).ok_or(ApiError::UnsupportedNetwork { chain_id })?;
        Self::for_network(network)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint listing multisig transactions of `safe` with `nonce`
    pub fn multisig_transactions_url(&self, safe: Address, nonce: u64) -> String {
        format!(
            "{}/api/v1/safes/{}/multisig-transactions/?nonce={}",
            self.base_url,
            safe.to_checksum(None),
            nonce
        )
    }

    /// Fetch the single pending transaction of `safe` with `nonce`
    pub async fn fetch_transaction(&self, safe: Address, nonce: u64) -> Result<RawTransaction, ApiError> {
        let url = self.multisig_transactions_url(safe, nonce);
        log::info!("Fetching transaction data from {url}");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let page: MultisigTransactionPage = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        log::debug!(
            "Service reported {} candidate(s), {} returned",
            page.count.unwrap_or(page.results.len() as u64),
            page.results.len()
        );

        select_single(page.results, nonce)
    }
}
