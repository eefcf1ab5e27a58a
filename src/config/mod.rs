//! Configuration management.
//!
//! Every endpoint URL and contract address is independently configurable via
//! environment variables, with documented fallback literals matching the
//! reference deployment. A TOML file (path in `VERIFIER_CONFIG_PATH`) can
//! override the same settings; fields omitted from the file fall back to the
//! environment and then to the defaults.
//!
//! The configuration is loaded once at startup and shared process-wide as an
//! immutable value; nothing mutates it after creation.

use serde::{Deserialize, Serialize};

// ============================================================================
// CONFIGURATION STRUCTURES
// ============================================================================

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address verified when a request does not supply one
    #[serde(default = "default_address")]
    pub default_address: String,
    /// Start of the historical log query range. 0 queries the full history
    /// the endpoint exposes; raise it for providers that cap log ranges.
    #[serde(default = "default_from_block")]
    pub from_block: u64,
    /// Network A: the chain carrying bridge deposit events
    #[serde(default = "default_source_chain")]
    pub source_chain: ChainConfig,
    /// Network B: the chain carrying the staking contract and wrapped token
    #[serde(default = "default_home_chain")]
    pub home_chain: ChainConfig,
    /// Contract addresses for the three activity checks
    #[serde(default)]
    pub contracts: ContractConfig,
    /// API server configuration
    #[serde(default)]
    pub api: ApiConfig,
}

/// A read-only connection target for one network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Human-readable name, used only in logs
    pub name: String,
    /// JSON-RPC endpoint URL
    pub rpc_url: String,
}

/// Contract addresses for the three checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Bridge contract on the source chain (deposit events)
    #[serde(default = "default_bridge_address")]
    pub bridge_address: String,
    /// Staking contract on the home chain (share balance view)
    #[serde(default = "default_staking_address")]
    pub staking_address: String,
    /// Wrapped token contract on the home chain (mint transfers)
    #[serde(default = "default_wrapped_token_address")]
    pub wrapped_token_address: String,
    /// Source tokens whose bridge deposits count toward the bridging check.
    /// A deposit of any one of them qualifies.
    #[serde(default = "default_bridge_source_tokens")]
    pub bridge_source_tokens: Vec<TokenConfig>,
}

/// A token recognized by the bridging check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    pub symbol: String,
    pub address: String,
}

/// API server bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_host")]
    pub host: String,
    #[serde(default = "default_api_port")]
    pub port: u16,
}

// ============================================================================
// DEFAULTS (environment variable, then documented fallback literal)
// ============================================================================

fn env_or(key: &str, fallback: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| fallback.to_string())
}

fn default_source_chain() -> ChainConfig {
    ChainConfig {
        name: "Ethereum".to_string(),
        rpc_url: env_or("SOURCE_CHAIN_RPC_URL", "https://rpc.ankr.com/eth"),
    }
}

fn default_home_chain() -> ChainConfig {
    ChainConfig {
        name: "Gnosis".to_string(),
        rpc_url: env_or("HOME_CHAIN_RPC_URL", "https://rpc.gnosischain.com"),
    }
}

fn default_bridge_address() -> String {
    env_or(
        "BRIDGE_CONTRACT_ADDRESS",
        "0x88ad09518695c6c3712AC10a214bE5109a655671",
    )
}

fn default_staking_address() -> String {
    env_or(
        "STAKING_CONTRACT_ADDRESS",
        "0xB87206f06D0dbD8874e0f8d047e86a2af838644c",
    )
}

fn default_wrapped_token_address() -> String {
    env_or(
        "WRAPPED_TOKEN_ADDRESS",
        "0x6C76971f98945AE98dD7d4DFcA8711ebea946eA6",
    )
}

fn default_bridge_source_tokens() -> Vec<TokenConfig> {
    vec![
        TokenConfig {
            symbol: "USDC".to_string(),
            address: env_or(
                "BRIDGE_TOKEN_USDC",
                "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
            ),
        },
        TokenConfig {
            symbol: "USDT".to_string(),
            address: env_or(
                "BRIDGE_TOKEN_USDT",
                "0xdAC17F958D2ee523a2206206994597C13D831ec7",
            ),
        },
        TokenConfig {
            symbol: "DAI".to_string(),
            address: env_or(
                "BRIDGE_TOKEN_DAI",
                "0x6B175474E89094C44Da98b954EedeAC495271d0F",
            ),
        },
        TokenConfig {
            symbol: "WETH".to_string(),
            address: env_or(
                "BRIDGE_TOKEN_WETH",
                "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
            ),
        },
    ]
}

fn default_address() -> String {
    env_or(
        "DEFAULT_ADDRESS",
        "0x73cb4Cf464Ba30bBB369Ce7AC58C0e1B1920EAF6",
    )
}

fn default_from_block() -> u64 {
    std::env::var("FROM_BLOCK")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn default_api_host() -> String {
    env_or("API_HOST", "127.0.0.1")
}

fn default_api_port() -> u16 {
    std::env::var("API_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000)
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            bridge_address: default_bridge_address(),
            staking_address: default_staking_address(),
            wrapped_token_address: default_wrapped_token_address(),
            bridge_source_tokens: default_bridge_source_tokens(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_api_host(),
            port: default_api_port(),
        }
    }
}

// ============================================================================
// CONFIGURATION LOADING
// ============================================================================

impl Config {
    /// Builds the configuration from environment variables, falling back to
    /// the documented reference-deployment literals.
    pub fn from_env() -> Self {
        Self {
            source_chain: default_source_chain(),
            home_chain: default_home_chain(),
            contracts: ContractConfig::default(),
            api: ApiConfig::default(),
            default_address: default_address(),
            from_block: default_from_block(),
        }
    }

    /// Loads configuration from the TOML file named by `VERIFIER_CONFIG_PATH`
    /// if it exists, otherwise from the environment. File fields that are
    /// omitted take the same environment-backed defaults as [`Config::from_env`].
    pub fn load() -> anyhow::Result<Self> {
        let config_path = std::env::var("VERIFIER_CONFIG_PATH")
            .unwrap_or_else(|_| "config/verifier.toml".to_string());

        if std::path::Path::new(&config_path).exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::from_env())
        }
    }
}
