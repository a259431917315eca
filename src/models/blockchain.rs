//! Blockchain resource.

use serde::{Deserialize, Serialize};

use crate::models::Amount;

/// One fee estimate tier for a blockchain.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BlockchainFee {
    /// Fee amount for this tier.
    pub fee: Amount,

    /// Tier label (e.g. "10m", "1h").
    pub tier: String,

    /// Estimated confirmation time in milliseconds.
    pub estimated_confirmation_in: u64,
}

/// A blockchain known to the data service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Blockchain {
    pub id: String,
    pub name: String,

    /// Network name within the chain family (e.g. "mainnet", "testnet").
    pub network: String,

    pub is_mainnet: bool,

    pub native_currency_id: String,

    /// Height the service has verified up to; absent while syncing.
    #[serde(default)]
    pub verified_height: Option<u64>,

    #[serde(default)]
    pub verified_block_hash: Option<String>,

    #[serde(default)]
    pub fee_estimates: Vec<BlockchainFee>,

    pub confirmations_until_final: u32,
}
