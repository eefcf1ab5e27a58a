//! Activity Verifier Service Library
//!
//! This crate decides whether an address qualifies for a reward by checking
//! three independent on-chain activity signals (cross-chain bridging,
//! staking, token wrapping) against two networks and exposing the results
//! over HTTP.

pub mod abi;
pub mod api;
pub mod config;
pub mod error;
pub mod evm_client;
pub mod verifier;

// Re-export commonly used types
pub use api::ApiServer;
pub use config::{ApiConfig, ChainConfig, Config, ContractConfig, TokenConfig};
pub use error::VerifierError;
pub use evm_client::{EvmClient, EvmLog};
pub use verifier::{ActivityResult, ActivityVerifier};
