//! Test module organization
//!
//! This module re-exports test helpers for use in test files.

mod helpers;

#[allow(unused_imports)]
pub use helpers::{
    bridge_topics, build_test_config, log_entry, mint_topics, mount_call_result,
    mount_empty_logs, mount_one_log, rpc_result, uint_word, AnyCallMatcher, AnyLogsMatcher,
    LogsTopicsMatcher, DUMMY_BRIDGE_ADDR, DUMMY_STAKING_ADDR, DUMMY_TOKEN_DAI, DUMMY_TOKEN_USDC,
    DUMMY_TOKEN_USDT, DUMMY_TOKEN_WETH, DUMMY_WRAPPED_TOKEN_ADDR, TEST_ADDRESS,
};
