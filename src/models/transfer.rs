//! Transfer resource.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Amount;

/// One movement of value within a transaction.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Transfer {
    #[serde(rename = "transfer_id")]
    pub id: String,

    pub blockchain_id: String,

    /// Position of this transfer within its transaction.
    pub index: u64,

    pub amount: Amount,

    #[serde(default)]
    pub from_address: Option<String>,

    #[serde(default)]
    pub to_address: Option<String>,

    /// Owning transaction, when the service knows it.
    #[serde(default)]
    pub transaction_id: Option<String>,

    #[serde(default)]
    pub acknowledgements: Option<u64>,

    /// Free-form metadata supplied by the service.
    #[serde(default)]
    pub meta: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_wire_shape() {
        let transfer: Transfer = serde_json::from_str(
            r#"{
                "transfer_id": "bitcoin-mainnet:abcd:0",
                "blockchain_id": "bitcoin-mainnet",
                "index": 0,
                "amount": {"currency_id": "bitcoin-mainnet:__native__", "amount": "54321"},
                "from_address": "1BoatSLRHtKNngkdXEeobR76b53LETtpyT",
                "transaction_id": "bitcoin-mainnet:abcd",
                "meta": {"memo": "rent"}
            }"#,
        )
        .unwrap();

        assert_eq!(transfer.index, 0);
        assert_eq!(transfer.to_address, None);
        assert_eq!(transfer.meta.get("memo").map(String::as_str), Some("rent"));
    }
}
