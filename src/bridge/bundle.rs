//! Engine-facing result bundles.
//!
//! Flat records handed to the synchronization engine. The engine becomes
//! sole owner on receipt; bundles carry no references back into the bridge.

use std::collections::HashMap;

use crate::models::{Currency, Transaction, Transfer};

/// Transfer status as the engine understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    /// Included in a block.
    Included,
    /// Known to the network, not yet final (includes reverted).
    Submitted,
    /// Rejected or failed.
    Errored,
    /// No longer tracked by the service.
    Deleted,
}

impl TransferStatus {
    /// Map the service's status string to the engine status.
    pub fn from_api_status(status: &str) -> TransferStatus {
        match status {
            "confirmed" => TransferStatus::Included,
            "submitted" | "reverted" => TransferStatus::Submitted,
            "failed" | "rejected" => TransferStatus::Errored,
            _ => TransferStatus::Deleted,
        }
    }
}

/// One transaction, reduced to what the engine consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionBundle {
    pub status: TransferStatus,

    /// Raw transaction bytes; always present.
    pub raw: Vec<u8>,

    /// Unix seconds; `None` when unknown.
    pub timestamp: Option<u64>,

    /// `None` when unknown (unconfirmed).
    pub block_height: Option<u64>,
}

impl TransactionBundle {
    /// Reduce a service transaction; transactions without raw bytes cannot
    /// be announced and yield `None`.
    pub fn from_transaction(transaction: &Transaction) -> Option<TransactionBundle> {
        let Some(raw) = transaction.raw_bytes() else {
            tracing::error!(
                transaction_id = %transaction.id,
                "transaction missing raw bytes, dropped from announcement"
            );
            return None;
        };

        Some(TransactionBundle {
            status: TransferStatus::from_api_status(&transaction.status),
            raw,
            timestamp: transaction
                .timestamp
                .map(|timestamp| timestamp.timestamp() as u64),
            block_height: transaction.block_height,
        })
    }
}

/// One transfer, flattened with its owning transaction's context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferBundle {
    pub status: TransferStatus,
    pub id: String,
    pub hash: Option<String>,
    pub identifier: Option<String>,
    pub from_address: Option<String>,
    pub to_address: Option<String>,

    /// Amount value in the currency's base units.
    pub amount: String,
    pub currency: String,
    pub fee: Option<String>,

    pub block_timestamp: Option<u64>,
    pub block_height: Option<u64>,
    pub block_confirmations: Option<u64>,
    pub block_transaction_index: Option<u64>,
    pub block_hash: Option<String>,

    pub attributes: HashMap<String, String>,
}

impl TransferBundle {
    /// Flatten one embedded transfer with the context of its owning
    /// transaction. The transfer itself carries no status; the
    /// transaction's status applies to each of its transfers.
    pub fn from_transfer(transaction: &Transaction, transfer: &Transfer) -> TransferBundle {
        TransferBundle {
            status: TransferStatus::from_api_status(&transaction.status),
            id: transfer.id.clone(),
            hash: Some(transaction.hash.clone()),
            identifier: transaction.identifier.clone(),
            from_address: transfer.from_address.clone(),
            to_address: transfer.to_address.clone(),
            amount: transfer.amount.amount.clone(),
            currency: transfer.amount.currency_id.clone(),
            fee: Some(transaction.fee.amount.clone()),
            block_timestamp: transaction
                .timestamp
                .map(|timestamp| timestamp.timestamp() as u64),
            block_height: transaction.block_height,
            block_confirmations: transaction.confirmations,
            block_transaction_index: transaction.index,
            block_hash: transaction.block_hash.clone(),
            attributes: transfer.meta.clone(),
        }
    }
}

/// One denomination of an announced currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyDenominationBundle {
    pub name: String,
    pub code: String,
    pub decimals: u8,
}

/// One currency, reduced to what the engine consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyBundle {
    pub id: String,
    pub name: String,
    pub code: String,
    pub kind: String,
    pub blockchain_id: String,
    pub address: Option<String>,
    pub verified: bool,
    pub denominations: Vec<CurrencyDenominationBundle>,
}

impl CurrencyBundle {
    pub fn from_currency(currency: &Currency) -> CurrencyBundle {
        CurrencyBundle {
            id: currency.currency_id.clone(),
            name: currency.name.clone(),
            code: currency.code.clone(),
            kind: currency.kind.clone(),
            blockchain_id: currency.blockchain_id.clone(),
            address: currency.address.clone(),
            verified: currency.verified,
            denominations: currency
                .denominations
                .iter()
                .map(|denomination| CurrencyDenominationBundle {
                    name: denomination.name.clone(),
                    code: denomination.short_name.clone(),
                    decimals: denomination.decimals,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction_json(status: &str, raw: Option<&str>) -> Transaction {
        let raw_field = match raw {
            Some(raw) => format!(r#","raw":"{}""#, raw),
            None => String::new(),
        };
        serde_json::from_str(&format!(
            r#"{{"transaction_id":"tx-1","hash":"h1","blockchain_id":"bitcoin-mainnet",
                "size":100,"fee":{{"currency_id":"btc","amount":"10"}},
                "status":"{}","timestamp":"2020-03-21T00:00:00Z","block_height":700,
                "confirmations":3,"index":5{}
                ,"_embedded":{{"transfers":[{{
                    "transfer_id":"tx-1:0","blockchain_id":"bitcoin-mainnet","index":0,
                    "amount":{{"currency_id":"btc","amount":"999"}},
                    "to_address":"dest","meta":{{"k":"v"}}}}]}}}}"#,
            status, raw_field
        ))
        .unwrap()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            TransferStatus::from_api_status("confirmed"),
            TransferStatus::Included
        );
        assert_eq!(
            TransferStatus::from_api_status("submitted"),
            TransferStatus::Submitted
        );
        assert_eq!(
            TransferStatus::from_api_status("reverted"),
            TransferStatus::Submitted
        );
        assert_eq!(
            TransferStatus::from_api_status("failed"),
            TransferStatus::Errored
        );
        assert_eq!(
            TransferStatus::from_api_status("rejected"),
            TransferStatus::Errored
        );
        assert_eq!(
            TransferStatus::from_api_status("garbage"),
            TransferStatus::Deleted
        );
    }

    #[test]
    fn test_transaction_bundle_requires_raw() {
        let with_raw = transaction_json("confirmed", Some("AQID"));
        let bundle = TransactionBundle::from_transaction(&with_raw).unwrap();
        assert_eq!(bundle.status, TransferStatus::Included);
        assert_eq!(bundle.raw, vec![1, 2, 3]);
        assert_eq!(bundle.block_height, Some(700));
        assert!(bundle.timestamp.is_some());

        let without_raw = transaction_json("confirmed", None);
        assert!(TransactionBundle::from_transaction(&without_raw).is_none());
    }

    #[test]
    fn test_transfer_bundle_takes_transaction_context() {
        let transaction = transaction_json("failed", Some("AQID"));
        let transfer = &transaction.transfers()[0];

        let bundle = TransferBundle::from_transfer(&transaction, transfer);
        assert_eq!(bundle.status, TransferStatus::Errored);
        assert_eq!(bundle.hash.as_deref(), Some("h1"));
        assert_eq!(bundle.amount, "999");
        assert_eq!(bundle.currency, "btc");
        assert_eq!(bundle.block_height, Some(700));
        assert_eq!(bundle.block_confirmations, Some(3));
        assert_eq!(bundle.block_transaction_index, Some(5));
        assert_eq!(bundle.attributes.get("k").map(String::as_str), Some("v"));
    }
}
