//! Minimal ABI handling for the contract interfaces this service touches.
//!
//! Contract interfaces are described with strongly-typed descriptors that are
//! validated when they are built, not when they are used: an [`Event`] computes
//! its topic0 hash at construction and a [`Function`] computes its selector,
//! so a typo in a signature fails at startup instead of mid-check.

use alloy_primitives::U256;
use sha3::{Digest, Keccak256};

use crate::error::VerifierError;

/// The reserved "no sender" address, conventionally the origin of minted
/// tokens.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Solidity parameter types supported by the descriptors.
const SUPPORTED_TYPES: &[&str] = &["address", "uint256", "uint8", "bytes32", "bool"];

// ============================================================================
// TYPED INTERFACE DESCRIPTORS
// ============================================================================

/// A contract event descriptor: name, parameter types, and the precomputed
/// topic0 (keccak256 of the canonical signature).
#[derive(Debug, Clone)]
pub struct Event {
    pub name: String,
    pub param_types: Vec<String>,
    /// keccak256("Name(type,...)") as a 0x-prefixed hex string
    pub topic0: String,
}

impl Event {
    /// Builds an event descriptor, validating the name and parameter types.
    ///
    /// Indexed-ness does not affect the signature hash, only the types do,
    /// so the descriptor does not track which parameters are indexed.
    pub fn new(name: &str, param_types: &[&str]) -> Result<Self, VerifierError> {
        validate_signature_parts(name, param_types)?;
        let signature = format!("{}({})", name, param_types.join(","));
        Ok(Self {
            name: name.to_string(),
            param_types: param_types.iter().map(|t| t.to_string()).collect(),
            topic0: keccak_hex(signature.as_bytes()),
        })
    }
}

/// A read-only contract function descriptor with its precomputed 4-byte
/// selector.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub param_types: Vec<String>,
    /// First 4 bytes of keccak256("name(type,...)")
    pub selector: [u8; 4],
}

/// An argument value for [`Function::encode_call`].
#[derive(Debug, Clone)]
pub enum Token {
    Address(String),
    Uint(U256),
}

impl Function {
    pub fn new(name: &str, param_types: &[&str]) -> Result<Self, VerifierError> {
        validate_signature_parts(name, param_types)?;
        let signature = format!("{}({})", name, param_types.join(","));
        let hash = Keccak256::digest(signature.as_bytes());
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&hash[..4]);
        Ok(Self {
            name: name.to_string(),
            param_types: param_types.iter().map(|t| t.to_string()).collect(),
            selector,
        })
    }

    /// ABI-encodes a call to this function: selector followed by each argument
    /// padded to a 32-byte word. Returns 0x-prefixed hex calldata.
    pub fn encode_call(&self, args: &[Token]) -> Result<String, VerifierError> {
        if args.len() != self.param_types.len() {
            return Err(VerifierError::Contract(format!(
                "{} expects {} argument(s), got {}",
                self.name,
                self.param_types.len(),
                args.len()
            )));
        }

        let mut calldata = Vec::with_capacity(4 + 32 * args.len());
        calldata.extend_from_slice(&self.selector);
        for arg in args {
            match arg {
                Token::Address(addr) => {
                    let clean = addr.strip_prefix("0x").unwrap_or(addr);
                    let bytes = hex::decode(clean).map_err(|e| {
                        VerifierError::Contract(format!("invalid address argument {}: {}", addr, e))
                    })?;
                    if bytes.len() != 20 {
                        return Err(VerifierError::Contract(format!(
                            "address argument {} is {} bytes, expected 20",
                            addr,
                            bytes.len()
                        )));
                    }
                    // Left-pad the 20-byte address to a 32-byte word
                    calldata.extend_from_slice(&[0u8; 12]);
                    calldata.extend_from_slice(&bytes);
                }
                Token::Uint(value) => {
                    calldata.extend_from_slice(&value.to_be_bytes::<32>());
                }
            }
        }
        Ok(format!("0x{}", hex::encode(calldata)))
    }
}

fn validate_signature_parts(name: &str, param_types: &[&str]) -> Result<(), VerifierError> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(VerifierError::Contract(format!(
            "invalid interface name: {:?}",
            name
        )));
    }
    for ty in param_types {
        if !SUPPORTED_TYPES.contains(ty) {
            return Err(VerifierError::Contract(format!(
                "unsupported parameter type {:?} in {}",
                ty, name
            )));
        }
    }
    Ok(())
}

// ============================================================================
// ENCODING HELPERS
// ============================================================================

/// Encodes an address as a 32-byte log topic (left-padded, 0x-prefixed).
pub fn address_topic(address: &str) -> String {
    let clean = address.strip_prefix("0x").unwrap_or(address);
    format!("0x{:0>64}", clean.to_lowercase())
}

/// Decodes a 32-byte ABI word (hex string) into a U256.
pub fn decode_uint_word(word: &str) -> Result<U256, VerifierError> {
    let clean = word.strip_prefix("0x").unwrap_or(word);
    if clean.is_empty() {
        // eth_call on a contract without the function returns "0x"
        return Err(VerifierError::Contract(
            "empty return data from call".to_string(),
        ));
    }
    U256::from_str_radix(clean, 16)
        .map_err(|e| VerifierError::Contract(format!("invalid uint256 word {:?}: {}", word, e)))
}

/// Checks that an address is syntactically well-formed: 0x followed by
/// exactly 40 hex characters. No checksum or normalization beyond this.
pub fn is_valid_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(body) => body.len() == 40 && body.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

fn keccak_hex(input: &[u8]) -> String {
    let hash = Keccak256::digest(input);
    format!("0x{}", hex::encode(hash))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_event_topic_matches_known_hash() {
        let event = Event::new("Transfer", &["address", "address", "uint256"]).unwrap();
        // Canonical ERC-20 Transfer signature hash
        assert_eq!(
            event.topic0,
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn event_rejects_unknown_param_type() {
        let result = Event::new("Deposit", &["address", "float64"]);
        assert!(matches!(result, Err(VerifierError::Contract(_))));
    }

    #[test]
    fn event_rejects_malformed_name() {
        assert!(Event::new("", &["address"]).is_err());
        assert!(Event::new("Bad Name", &["address"]).is_err());
    }

    #[test]
    fn balance_of_selector_matches_known_value() {
        let function = Function::new("balanceOf", &["address"]).unwrap();
        assert_eq!(function.selector, [0x70, 0xa0, 0x82, 0x31]);
    }

    #[test]
    fn encode_call_pads_address_to_word() {
        let function = Function::new("balanceOf", &["address"]).unwrap();
        let calldata = function
            .encode_call(&[Token::Address(
                "0x73cb4Cf464Ba30bBB369Ce7AC58C0e1B1920EAF6".to_string(),
            )])
            .unwrap();
        assert_eq!(
            calldata,
            "0x70a0823100000000000000000000000073cb4cf464ba30bbb369ce7ac58c0e1b1920eaf6"
        );
    }

    #[test]
    fn encode_call_rejects_wrong_arity() {
        let function = Function::new("balanceOf", &["address"]).unwrap();
        assert!(function.encode_call(&[]).is_err());
    }

    #[test]
    fn address_topic_left_pads_to_32_bytes() {
        let topic = address_topic("0x73cb4Cf464Ba30bBB369Ce7AC58C0e1B1920EAF6");
        assert_eq!(
            topic,
            "0x00000000000000000000000073cb4cf464ba30bbb369ce7ac58c0e1b1920eaf6"
        );
        assert_eq!(topic.len(), 66);
    }

    #[test]
    fn decode_uint_word_handles_values_beyond_u64() {
        // 2^200, far past anything a native integer can hold
        let word = format!("0x{:0>64}", "100000000000000000000000000000000000000000000000000");
        let value = decode_uint_word(&word).unwrap();
        assert!(value > U256::from(u128::MAX));
    }

    #[test]
    fn decode_uint_word_rejects_empty_return_data() {
        assert!(matches!(
            decode_uint_word("0x"),
            Err(VerifierError::Contract(_))
        ));
    }

    #[test]
    fn address_validation() {
        assert!(is_valid_address("0x73cb4Cf464Ba30bBB369Ce7AC58C0e1B1920EAF6"));
        assert!(is_valid_address(ZERO_ADDRESS));
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("0x123"));
        assert!(!is_valid_address("73cb4Cf464Ba30bBB369Ce7AC58C0e1B1920EAF6"));
        assert!(!is_valid_address("0xZZcb4Cf464Ba30bBB369Ce7AC58C0e1B1920EAF6"));
    }
}
