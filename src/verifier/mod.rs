//! Activity verification core.
//!
//! Three independent checks (bridge, stake, wrap) each answer "did this
//! address leave qualifying evidence on chain?" with a boolean. The
//! aggregator runs them concurrently and derives overall eligibility as the
//! AND of the three answers.
//!
//! Failure semantics: a check that hits a connection or contract error
//! reports `false` ("activity not detected") for itself only, after logging
//! the error. The checks never contaminate each other, and eligibility is
//! only computed once all three have resolved. The sole error that escapes
//! this module is address validation, which fails before any network call.

pub mod bridge;
pub mod staking;
pub mod wrapping;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::abi;
use crate::config::Config;
use crate::error::VerifierError;
use crate::evm_client::EvmClient;

// ============================================================================
// RESULT TYPES
// ============================================================================

/// Per-signal outcome of one verification run.
///
/// Each field is produced by exactly one check and is `true` only if that
/// check found qualifying on-chain evidence. There is no partial or unknown
/// state; a failed check collapses to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityResult {
    /// Bridge deposit of a recognized token credited to the address
    pub bridging: bool,
    /// Nonzero share balance in the staking contract
    pub staking: bool,
    /// Wrapped-token mint transfer credited to the address
    #[serde(rename = "tokenWrapping")]
    pub token_wrapping: bool,
}

impl ActivityResult {
    /// Overall eligibility: AND of the three signals. Always derived from
    /// the result, never stored independently.
    pub fn is_eligible(&self) -> bool {
        self.bridging && self.staking && self.token_wrapping
    }
}

// ============================================================================
// VERIFIER SERVICE
// ============================================================================

/// Process-wide verification service.
///
/// Holds the immutable configuration and one read-only client per network,
/// created once at startup and shared across concurrent checks. Connections
/// are never mutated after creation, so no locking is needed.
pub struct ActivityVerifier {
    config: Arc<Config>,
    /// Network A client (bridge deposits)
    source_client: Arc<EvmClient>,
    /// Network B client (staking and wrapping)
    home_client: Arc<EvmClient>,
}

impl ActivityVerifier {
    /// Creates the verification service from configuration, establishing one
    /// client handle per network.
    pub fn new(config: &Config) -> Result<Self, VerifierError> {
        let source_client = EvmClient::new(&config.source_chain.rpc_url)?;
        let home_client = EvmClient::new(&config.home_chain.rpc_url)?;
        info!(
            "Activity verifier initialized: source chain '{}', home chain '{}'",
            config.source_chain.name, config.home_chain.name
        );
        Ok(Self {
            config: Arc::new(config.clone()),
            source_client: Arc::new(source_client),
            home_client: Arc::new(home_client),
        })
    }

    /// Fail-fast syntactic address validation, applied before any entry
    /// point touches the network.
    fn validate_address(address: &str) -> Result<(), VerifierError> {
        if !abi::is_valid_address(address) {
            return Err(VerifierError::Validation(format!(
                "expected 0x-prefixed 40-hex-digit address, got {:?}",
                address
            )));
        }
        Ok(())
    }

    /// Runs the three activity checks concurrently for one address.
    ///
    /// Validates the address syntax first and fails fast with
    /// [`VerifierError::Validation`] before any network call. Waits for all
    /// three checks to resolve; one check's internal failure degrades only
    /// its own field to `false`.
    pub async fn check_activities(&self, address: &str) -> Result<ActivityResult, VerifierError> {
        Self::validate_address(address)?;

        debug!("Checking activities for {}", address);

        let (bridging, staking, token_wrapping) = tokio::join!(
            bridge::verify_bridge(&self.source_client, &self.config, address),
            staking::verify_staking(&self.home_client, &self.config, address),
            wrapping::verify_wrapping(&self.home_client, &self.config, address),
        );

        let result = ActivityResult {
            bridging,
            staking,
            token_wrapping,
        };
        info!(
            "Activity result for {}: bridging={} staking={} tokenWrapping={}",
            address, result.bridging, result.staking, result.token_wrapping
        );
        Ok(result)
    }

    /// Full eligibility decision for one address: AND of the three checks.
    pub async fn is_eligible(&self, address: &str) -> Result<bool, VerifierError> {
        Ok(self.check_activities(address).await?.is_eligible())
    }

    /// Bridge check on its own, for the per-signal endpoint.
    pub async fn verify_bridging(&self, address: &str) -> Result<bool, VerifierError> {
        Self::validate_address(address)?;
        Ok(bridge::verify_bridge(&self.source_client, &self.config, address).await)
    }

    /// Staking check on its own, for the per-signal endpoint.
    pub async fn verify_staking(&self, address: &str) -> Result<bool, VerifierError> {
        Self::validate_address(address)?;
        Ok(staking::verify_staking(&self.home_client, &self.config, address).await)
    }

    /// Wrapping check on its own, for the per-signal endpoint.
    pub async fn verify_wrapping(&self, address: &str) -> Result<bool, VerifierError> {
        Self::validate_address(address)?;
        Ok(wrapping::verify_wrapping(&self.home_client, &self.config, address).await)
    }
}
