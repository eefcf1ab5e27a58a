//! Bridge activity check.
//!
//! Detects deposits into the bridge contract on the source chain that were
//! credited to the address under test. One log query runs per recognized
//! source token, all dispatched concurrently; a deposit of any one token
//! qualifies (OR across the queries).

use futures::future::join_all;
use tracing::{debug, warn};

use crate::abi::{self, Event};
use crate::config::Config;
use crate::evm_client::EvmClient;

/// Returns `true` iff any recognized token has at least one bridge deposit
/// event crediting `address`.
///
/// Event shape: `Deposit(address indexed token, address indexed recipient,
/// uint256 amount)` — token and recipient are matched through the topic
/// filter, the amount is wildcarded. A query that fails with a connection or
/// contract error is logged and contributes `false` to the OR; the check as
/// a whole only reports total failure if the event descriptor itself cannot
/// be built, before any query is dispatched.
pub async fn verify_bridge(client: &EvmClient, config: &Config, address: &str) -> bool {
    let event = match Event::new("Deposit", &["address", "address", "uint256"]) {
        Ok(event) => event,
        Err(e) => {
            warn!("Bridge check aborted, bad event descriptor: {}", e);
            return false;
        }
    };

    let recipient_topic = abi::address_topic(address);

    let queries = config.contracts.bridge_source_tokens.iter().map(|token| {
        let event = &event;
        let recipient_topic = recipient_topic.clone();
        async move {
            let result = client
                .get_logs(
                    &config.contracts.bridge_address,
                    event,
                    &[Some(abi::address_topic(&token.address)), Some(recipient_topic)],
                    config.from_block,
                )
                .await;

            match result {
                Ok(logs) => {
                    debug!(
                        "Bridge deposits of {} for {}: {} match(es)",
                        token.symbol,
                        address,
                        logs.len()
                    );
                    !logs.is_empty()
                }
                Err(e) => {
                    warn!(
                        "Bridge deposit query for {} failed, counting as no match: {}",
                        token.symbol, e
                    );
                    false
                }
            }
        }
    });

    join_all(queries).await.into_iter().any(|found| found)
}
