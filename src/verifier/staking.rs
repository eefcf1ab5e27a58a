//! Staking activity check.
//!
//! Reads the address's share balance from the staking contract on the home
//! chain. Any strictly positive balance counts as staking activity.

use alloy_primitives::U256;
use tracing::{debug, warn};

use crate::abi::{Function, Token};
use crate::config::Config;
use crate::evm_client::EvmClient;

/// Returns `true` iff the staking contract reports a share balance strictly
/// greater than zero for `address`.
///
/// The balance is a full 256-bit value; the comparison never narrows it to a
/// native integer. A connection or contract error is logged and degrades the
/// check to `false`.
pub async fn verify_staking(client: &EvmClient, config: &Config, address: &str) -> bool {
    let function = match Function::new("sharesOf", &["address"]) {
        Ok(function) => function,
        Err(e) => {
            warn!("Staking check aborted, bad function descriptor: {}", e);
            return false;
        }
    };

    let result = client
        .call(
            &config.contracts.staking_address,
            &function,
            &[Token::Address(address.to_string())],
        )
        .await;

    match result {
        Ok(shares) => {
            debug!("Staking shares for {}: {}", address, shares);
            shares > U256::ZERO
        }
        Err(e) => {
            warn!(
                "Staking shares query failed, counting as no activity: {}",
                e
            );
            false
        }
    }
}
