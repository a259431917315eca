//! Resource models served by the data service.
//!
//! Flat serde DTOs mirroring the service's wire shapes. Every struct
//! tolerates unknown fields so server-side additions never break parsing.

pub mod blockchain;
pub mod currency;
pub mod subscription;
pub mod transaction;
pub mod transfer;

use serde::{Deserialize, Serialize};

pub use blockchain::{Blockchain, BlockchainFee};
pub use currency::{Currency, CurrencyDenomination};
pub use subscription::{
    NewSubscription, Subscription, SubscriptionCurrency, SubscriptionEndpoint, SubscriptionEvent,
};
pub use transaction::{Transaction, TransactionFee, TransactionIdentifier};
pub use transfer::Transfer;

/// A currency-qualified value, as the service represents amounts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Amount {
    pub currency_id: String,
    pub amount: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_wire_shape() {
        let amount: Amount =
            serde_json::from_str(r#"{"currency_id":"bitcoin-mainnet:__native__","amount":"1000"}"#)
                .unwrap();
        assert_eq!(amount.amount, "1000");
        assert_eq!(amount.currency_id, "bitcoin-mainnet:__native__");
    }
}
