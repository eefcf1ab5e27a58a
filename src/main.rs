//! Activity Verifier Service
//!
//! Decides whether an address qualifies for a reward by checking three
//! independent on-chain activity signals against two networks:
//!
//! 1. Bridging - deposits of recognized tokens into the bridge contract on
//!    the source chain, credited to the address
//! 2. Staking - a nonzero share balance in the staking contract on the home
//!    chain
//! 3. Token wrapping - wrapped-token mint transfers crediting the address on
//!    the home chain
//!
//! All three must hold for the address to be eligible. Results are exposed
//! over a small HTTP API.

use anyhow::Result;
use tracing::info;

use activity_verifier::api::ApiServer;
use activity_verifier::config::Config;
use activity_verifier::verifier::ActivityVerifier;

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

/// Initializes logging, loads configuration, builds the process-wide
/// verification service, and runs the API server until shutdown.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured logging for debugging and monitoring
    tracing_subscriber::fmt::init();

    info!("Starting Activity Verifier Service");

    // Environment-backed configuration with documented fallbacks
    let config = Config::load()?;
    info!("Configuration loaded successfully");

    // One connection handle per network, shared across all checks
    let verifier = ActivityVerifier::new(&config)?;

    // Run the service (this blocks until shutdown)
    let api_server = ApiServer::new(config, verifier);
    api_server.run().await?;

    Ok(())
}
