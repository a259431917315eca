//! Transaction resource.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Amount, Transfer};

/// Collections embedded in a transaction response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TransactionEmbedded {
    #[serde(default)]
    pub transfers: Vec<Transfer>,
}

/// A transaction as served by the data service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Transaction {
    #[serde(rename = "transaction_id")]
    pub id: String,

    pub hash: String,

    pub blockchain_id: String,

    /// Chain-specific identifier; distinct from `hash` on some networks.
    #[serde(default)]
    pub identifier: Option<String>,

    /// Serialized size in bytes.
    pub size: u64,

    pub fee: Amount,

    /// Service-side status string ("confirmed", "submitted", "failed", ...).
    pub status: String,

    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(default)]
    pub first_seen: Option<DateTime<Utc>>,

    #[serde(default)]
    pub index: Option<u64>,

    #[serde(default)]
    pub block_hash: Option<String>,

    #[serde(default)]
    pub block_height: Option<u64>,

    #[serde(default)]
    pub acknowledgements: Option<u64>,

    #[serde(default)]
    pub confirmations: Option<u64>,

    /// Base64-encoded raw transaction bytes, when requested.
    #[serde(default)]
    pub raw: Option<String>,

    /// Base64-encoded inclusion proof, when requested.
    #[serde(default)]
    pub proof: Option<String>,

    #[serde(default, rename = "_embedded")]
    pub embedded: Option<TransactionEmbedded>,

    #[serde(default)]
    pub meta: HashMap<String, String>,
}

impl Transaction {
    /// Raw transaction bytes, decoded from base64. `None` when the field is
    /// absent or does not decode.
    pub fn raw_bytes(&self) -> Option<Vec<u8>> {
        self.raw.as_ref().and_then(|raw| BASE64.decode(raw).ok())
    }

    /// The embedded transfers, empty when none were requested.
    pub fn transfers(&self) -> &[Transfer] {
        self.embedded
            .as_ref()
            .map(|embedded| embedded.transfers.as_slice())
            .unwrap_or_default()
    }
}

/// Server acknowledgement of a created transaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransactionIdentifier {
    #[serde(rename = "transaction_id")]
    pub id: String,

    pub blockchain_id: String,

    pub identifier: String,

    #[serde(default)]
    pub hash: Option<String>,
}

/// Fee estimate for a prospective transaction.
///
/// `cost_units` is the service's best estimate of the cost units needed for
/// inclusion; it carries no margin and may be an upper limit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransactionFee {
    pub cost_units: u64,

    #[serde(default)]
    pub properties: Option<HashMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        serde_json::from_str(
            r#"{
                "transaction_id": "bitcoin-mainnet:abcd",
                "hash": "abcd",
                "blockchain_id": "bitcoin-mainnet",
                "size": 250,
                "fee": {"currency_id": "bitcoin-mainnet:__native__", "amount": "1000"},
                "status": "confirmed",
                "timestamp": "2020-03-21T17:32:28Z",
                "block_height": 622666,
                "raw": "AQIDBA==",
                "_embedded": {
                    "transfers": [{
                        "transfer_id": "bitcoin-mainnet:abcd:0",
                        "blockchain_id": "bitcoin-mainnet",
                        "index": 0,
                        "amount": {"currency_id": "bitcoin-mainnet:__native__", "amount": "54321"}
                    }]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_transaction_wire_shape() {
        let transaction = sample();
        assert_eq!(transaction.status, "confirmed");
        assert_eq!(transaction.block_height, Some(622666));
        assert_eq!(transaction.transfers().len(), 1);
    }

    #[test]
    fn test_raw_bytes_decode() {
        let transaction = sample();
        assert_eq!(transaction.raw_bytes(), Some(vec![1, 2, 3, 4]));
    }

    #[test]
    fn test_raw_bytes_absent_or_invalid() {
        let mut transaction = sample();
        transaction.raw = None;
        assert_eq!(transaction.raw_bytes(), None);

        transaction.raw = Some("!!not base64!!".to_string());
        assert_eq!(transaction.raw_bytes(), None);
    }

    #[test]
    fn test_transaction_fee_wire_shape() {
        let fee: TransactionFee =
            serde_json::from_str(r#"{"cost_units": 21000, "properties": {"gas_price": "20"}}"#)
                .unwrap();
        assert_eq!(fee.cost_units, 21000);
        assert_eq!(
            fee.properties.unwrap().get("gas_price").map(String::as_str),
            Some("20")
        );
    }
}
