//! Token wrapping activity check.
//!
//! Detects wrap mints on the home chain: ERC-20 `Transfer` events on the
//! wrapped token contract from the zero address (the "minted from nothing"
//! sentinel) to the address under test.

use tracing::{debug, warn};

use crate::abi::{self, Event};
use crate::config::Config;
use crate::evm_client::EvmClient;

/// Returns `true` iff the wrapped token contract has at least one mint
/// transfer (zero address -> `address`).
///
/// Wrapping is detected one-directionally: unwrap transfers (`address` ->
/// zero address) are deliberately not counted and must not be enabled
/// without a product decision. A connection or contract error is logged and
/// degrades the check to `false`.
pub async fn verify_wrapping(client: &EvmClient, config: &Config, address: &str) -> bool {
    let event = match Event::new("Transfer", &["address", "address", "uint256"]) {
        Ok(event) => event,
        Err(e) => {
            warn!("Wrapping check aborted, bad event descriptor: {}", e);
            return false;
        }
    };

    let mints = client
        .get_logs(
            &config.contracts.wrapped_token_address,
            &event,
            &[
                Some(abi::address_topic(abi::ZERO_ADDRESS)),
                Some(abi::address_topic(address)),
            ],
            config.from_block,
        )
        .await;

    // Unwrap direction, kept for reference but disabled:
    // let burns = client
    //     .get_logs(
    //         &config.contracts.wrapped_token_address,
    //         &event,
    //         &[
    //             Some(abi::address_topic(address)),
    //             Some(abi::address_topic(abi::ZERO_ADDRESS)),
    //         ],
    //         config.from_block,
    //     )
    //     .await;

    match mints {
        Ok(logs) => {
            debug!("Wrap mints for {}: {} match(es)", address, logs.len());
            !logs.is_empty()
        }
        Err(e) => {
            warn!("Wrap mint query failed, counting as no activity: {}", e);
            false
        }
    }
}
