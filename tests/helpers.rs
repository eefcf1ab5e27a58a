//! Shared test helpers for integration tests
//!
//! This module provides constants, configuration builders, JSON-RPC response
//! builders, and wiremock matchers used across the test files.

use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use activity_verifier::abi;
use activity_verifier::config::{ApiConfig, ChainConfig, Config, ContractConfig, TokenConfig};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Reference address used throughout the scenario tests
pub const TEST_ADDRESS: &str = "0x73cb4Cf464Ba30bBB369Ce7AC58C0e1B1920EAF6";

/// Dummy bridge contract on the source chain
pub const DUMMY_BRIDGE_ADDR: &str = "0x00000000000000000000000000000000000000b1";

/// Dummy staking contract on the home chain
pub const DUMMY_STAKING_ADDR: &str = "0x00000000000000000000000000000000000000b2";

/// Dummy wrapped token contract on the home chain
pub const DUMMY_WRAPPED_TOKEN_ADDR: &str = "0x00000000000000000000000000000000000000b3";

/// Dummy bridge source token addresses
pub const DUMMY_TOKEN_USDC: &str = "0x00000000000000000000000000000000000000a1";
pub const DUMMY_TOKEN_USDT: &str = "0x00000000000000000000000000000000000000a2";
pub const DUMMY_TOKEN_DAI: &str = "0x00000000000000000000000000000000000000a3";
pub const DUMMY_TOKEN_WETH: &str = "0x00000000000000000000000000000000000000a4";

// ============================================================================
// CONFIGURATION BUILDERS
// ============================================================================

/// Builds a test configuration pointing both networks at the given mock
/// server URLs, with dummy contract addresses.
pub fn build_test_config(source_rpc_url: &str, home_rpc_url: &str) -> Config {
    Config {
        source_chain: ChainConfig {
            name: "Test Source".to_string(),
            rpc_url: source_rpc_url.to_string(),
        },
        home_chain: ChainConfig {
            name: "Test Home".to_string(),
            rpc_url: home_rpc_url.to_string(),
        },
        contracts: ContractConfig {
            bridge_address: DUMMY_BRIDGE_ADDR.to_string(),
            staking_address: DUMMY_STAKING_ADDR.to_string(),
            wrapped_token_address: DUMMY_WRAPPED_TOKEN_ADDR.to_string(),
            bridge_source_tokens: vec![
                token("USDC", DUMMY_TOKEN_USDC),
                token("USDT", DUMMY_TOKEN_USDT),
                token("DAI", DUMMY_TOKEN_DAI),
                token("WETH", DUMMY_TOKEN_WETH),
            ],
        },
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        default_address: TEST_ADDRESS.to_string(),
        from_block: 0,
    }
}

fn token(symbol: &str, address: &str) -> TokenConfig {
    TokenConfig {
        symbol: symbol.to_string(),
        address: address.to_string(),
    }
}

// ============================================================================
// JSON-RPC RESPONSE BUILDERS
// ============================================================================

/// Wraps a result value in a JSON-RPC 2.0 response envelope.
pub fn rpc_result(result: serde_json::Value) -> serde_json::Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": result
    })
}

/// A single eth_getLogs entry emitted by `contract` with the given topics.
pub fn log_entry(contract: &str, topics: &[String]) -> serde_json::Value {
    json!({
        "address": contract,
        "topics": topics,
        "data": format!("0x{:0>64}", "3e8"),
        "blockNumber": "0x64",
        "transactionHash": "0xabc123",
        "logIndex": "0x0"
    })
}

/// A 32-byte ABI word encoding the given hex value (no 0x prefix).
pub fn uint_word(hex_value: &str) -> String {
    format!("0x{:0>64}", hex_value)
}

// ============================================================================
// WIREMOCK MATCHERS AND MOUNT HELPERS
// ============================================================================

/// Matches an eth_getLogs request whose topic filter equals the given list
/// exactly (order-sensitive, as the client builds it).
pub struct LogsTopicsMatcher {
    topics: Vec<serde_json::Value>,
}

impl LogsTopicsMatcher {
    pub fn new(topics: Vec<serde_json::Value>) -> Self {
        Self { topics }
    }
}

impl Match for LogsTopicsMatcher {
    fn matches(&self, request: &Request) -> bool {
        let body: serde_json::Value = match serde_json::from_slice(&request.body) {
            Ok(body) => body,
            Err(_) => return false,
        };
        body["method"] == "eth_getLogs"
            && body["params"][0]["topics"] == serde_json::Value::Array(self.topics.clone())
    }
}

/// Matches any eth_getLogs request.
pub struct AnyLogsMatcher;

impl Match for AnyLogsMatcher {
    fn matches(&self, request: &Request) -> bool {
        let body: serde_json::Value = match serde_json::from_slice(&request.body) {
            Ok(body) => body,
            Err(_) => return false,
        };
        body["method"] == "eth_getLogs"
    }
}

/// Matches any eth_call request.
pub struct AnyCallMatcher;

impl Match for AnyCallMatcher {
    fn matches(&self, request: &Request) -> bool {
        let body: serde_json::Value = match serde_json::from_slice(&request.body) {
            Ok(body) => body,
            Err(_) => return false,
        };
        body["method"] == "eth_call"
    }
}

/// Topic filter the bridge check sends for one source token.
pub fn bridge_topics(token_address: &str, recipient: &str) -> Vec<serde_json::Value> {
    let deposit = abi::Event::new("Deposit", &["address", "address", "uint256"]).unwrap();
    vec![
        json!(deposit.topic0),
        json!(abi::address_topic(token_address)),
        json!(abi::address_topic(recipient)),
    ]
}

/// Topic filter the wrapping check sends (mint direction: zero -> recipient).
pub fn mint_topics(recipient: &str) -> Vec<serde_json::Value> {
    let transfer = abi::Event::new("Transfer", &["address", "address", "uint256"]).unwrap();
    vec![
        json!(transfer.topic0),
        json!(abi::address_topic(abi::ZERO_ADDRESS)),
        json!(abi::address_topic(recipient)),
    ]
}

/// Mounts a catch-all returning empty logs for every eth_getLogs request.
/// Mount specific matchers before this; wiremock picks the first match in
/// mount order for same-priority mocks, so use `mount` for specific mocks
/// first and this last.
pub async fn mount_empty_logs(server: &MockServer) {
    Mock::given(method("POST"))
        .and(AnyLogsMatcher)
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_result(json!([]))))
        .mount(server)
        .await;
}

/// Mounts an eth_getLogs mock for an exact topic filter returning one entry.
pub async fn mount_one_log(server: &MockServer, contract: &str, topics: Vec<serde_json::Value>) {
    let topic_strings: Vec<String> = topics
        .iter()
        .map(|t| t.as_str().unwrap().to_string())
        .collect();
    Mock::given(method("POST"))
        .and(LogsTopicsMatcher::new(topics))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(rpc_result(json!([log_entry(contract, &topic_strings)]))),
        )
        .mount(server)
        .await;
}

/// Mounts an eth_call mock returning the given 32-byte word.
pub async fn mount_call_result(server: &MockServer, word: &str) {
    Mock::given(method("POST"))
        .and(AnyCallMatcher)
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_result(json!(word))))
        .mount(server)
        .await;
}
