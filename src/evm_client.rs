//! EVM Client Module
//!
//! This module provides a client for communicating with EVM-compatible blockchain
//! nodes via their JSON-RPC API. It exposes the two read operations the activity
//! checks are built from: historical event log queries (`eth_getLogs`) and
//! read-only contract state calls (`eth_call`).

use alloy_primitives::U256;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::abi::{self, Event, Function, Token};
use crate::error::VerifierError;

// ============================================================================
// API RESPONSE STRUCTURES
// ============================================================================

/// EVM JSON-RPC request wrapper
#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: Vec<serde_json::Value>,
    id: u64,
}

/// EVM JSON-RPC response wrapper
#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    #[allow(dead_code)]
    jsonrpc: String,
    result: Option<T>,
    error: Option<JsonRpcError>,
    #[allow(dead_code)]
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

/// EVM event log entry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvmLog {
    /// Address of the contract that emitted the event
    pub address: String,
    /// Array of topics (indexed event parameters)
    pub topics: Vec<String>,
    /// Event data (non-indexed parameters)
    pub data: String,
    /// Block number (JSON-RPC uses camelCase: blockNumber)
    #[serde(rename = "blockNumber")]
    pub block_number: String,
    /// Transaction hash (JSON-RPC uses camelCase: transactionHash)
    #[serde(rename = "transactionHash")]
    pub transaction_hash: String,
    /// Log index (JSON-RPC uses camelCase: logIndex)
    #[serde(rename = "logIndex")]
    pub log_index: String,
}

// ============================================================================
// EVM CLIENT IMPLEMENTATION
// ============================================================================

/// Client for communicating with one EVM-compatible node via JSON-RPC.
///
/// The client is an immutable read-only handle: it is created once per network
/// at startup and shared across concurrent checks without locking.
pub struct EvmClient {
    /// HTTP client for making requests
    client: Client,
    /// Base URL of the EVM node (e.g., "http://127.0.0.1:8545")
    base_url: String,
}

impl EvmClient {
    /// Creates a new EVM client for the given node URL.
    ///
    /// # Arguments
    ///
    /// * `node_url` - Base URL of the EVM node (e.g., "http://127.0.0.1:8545")
    ///
    /// # Returns
    ///
    /// * `Ok(EvmClient)` - Successfully created client
    /// * `Err(VerifierError::Connection)` - Failed to create the HTTP client
    pub fn new(node_url: &str) -> Result<Self, VerifierError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| VerifierError::Connection(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: node_url.to_string(),
        })
    }

    /// Queries historical event logs for a contract via `eth_getLogs`.
    ///
    /// Builds the topic filter from the event descriptor's topic0 plus the
    /// supplied indexed-field values; `None` positions serialize as JSON
    /// `null`, which the node treats as a wildcard. Queries from `from_block`
    /// to `latest`, so the default of 0 covers the endpoint's full history.
    ///
    /// An empty result is the normal zero-match case and returns `Ok(vec![])`.
    ///
    /// # Arguments
    ///
    /// * `contract_address` - Address of the contract that emits the event
    /// * `event` - Typed event descriptor (carries the precomputed topic0)
    /// * `indexed_values` - Match values for indexed fields, `None` = wildcard
    /// * `from_block` - Starting block number of the query range
    pub async fn get_logs(
        &self,
        contract_address: &str,
        event: &Event,
        indexed_values: &[Option<String>],
        from_block: u64,
    ) -> Result<Vec<EvmLog>, VerifierError> {
        let mut topics: Vec<serde_json::Value> = vec![serde_json::json!(event.topic0)];
        for value in indexed_values {
            topics.push(match value {
                Some(v) => serde_json::json!(v),
                None => serde_json::Value::Null,
            });
        }
        // Trailing wildcards are redundant in the filter
        while topics.len() > 1 && topics.last() == Some(&serde_json::Value::Null) {
            topics.pop();
        }

        let filter = serde_json::json!({
            "address": contract_address,
            "topics": topics,
            "fromBlock": format!("0x{:x}", from_block),
            "toBlock": "latest",
        });

        let response: JsonRpcResponse<Vec<EvmLog>> =
            self.request("eth_getLogs", vec![filter]).await?;

        if let Some(error) = response.error {
            return Err(VerifierError::Contract(format!(
                "eth_getLogs failed for {} ({}): {} (code: {})",
                event.name, contract_address, error.message, error.code
            )));
        }

        Ok(response.result.unwrap_or_default())
    }

    /// Invokes a read-only contract function via `eth_call` at the latest
    /// block and decodes the returned 32-byte word as an unsigned 256-bit
    /// integer. Chain balances routinely exceed 64-bit range, so the value
    /// is never narrowed to a native integer here.
    ///
    /// # Arguments
    ///
    /// * `contract_address` - Address of the contract to call
    /// * `function` - Typed function descriptor (carries the selector)
    /// * `args` - Call arguments, encoded per the descriptor's signature
    pub async fn call(
        &self,
        contract_address: &str,
        function: &Function,
        args: &[Token],
    ) -> Result<U256, VerifierError> {
        let calldata = function.encode_call(args)?;

        let params = vec![
            serde_json::json!({
                "to": contract_address,
                "data": calldata,
            }),
            serde_json::json!("latest"),
        ];

        let response: JsonRpcResponse<String> = self.request("eth_call", params).await?;

        if let Some(error) = response.error {
            return Err(VerifierError::Contract(format!(
                "eth_call {} on {} reverted: {} (code: {})",
                function.name, contract_address, error.message, error.code
            )));
        }

        let word = response.result.ok_or_else(|| {
            VerifierError::Contract(format!(
                "no result for eth_call {} on {}",
                function.name, contract_address
            ))
        })?;

        abi::decode_uint_word(&word)
    }

    /// Sends one JSON-RPC request and parses the typed response envelope.
    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<JsonRpcResponse<T>, VerifierError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: 1,
        };

        self.client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                VerifierError::Connection(format!(
                    "failed to send {} request to {}: {}",
                    method, self.base_url, e
                ))
            })?
            .json()
            .await
            .map_err(|e| {
                VerifierError::Connection(format!(
                    "failed to parse {} response from {}: {}",
                    method, self.base_url, e
                ))
            })
    }

    /// Returns the base URL of this client
    #[allow(dead_code)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
