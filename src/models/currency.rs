//! Currency resource.

use serde::{Deserialize, Serialize};

/// One display denomination of a currency.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CurrencyDenomination {
    pub name: String,

    /// Short code (e.g. "btc", "sat").
    pub short_name: String,

    pub decimals: u8,
}

/// A currency known to the data service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Currency {
    pub currency_id: String,
    pub name: String,
    pub code: String,

    /// Currency kind (e.g. "native", "erc20").
    #[serde(rename = "type")]
    pub kind: String,

    pub blockchain_id: String,

    /// Contract address, for token currencies.
    #[serde(default)]
    pub address: Option<String>,

    pub verified: bool,

    #[serde(default)]
    pub denominations: Vec<CurrencyDenomination>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_wire_shape() {
        let currency: Currency = serde_json::from_str(
            r#"{
                "currency_id": "ethereum-mainnet:0x558ec3152e2eb2174905cd19aea4e34a23de9ad6",
                "name": "BRD Token",
                "code": "brd",
                "type": "erc20",
                "blockchain_id": "ethereum-mainnet",
                "address": "0x558ec3152e2eb2174905cd19aea4e34a23de9ad6",
                "verified": true,
                "denominations": [
                    {"name": "BRD Token INT", "short_name": "BRDI", "decimals": 0},
                    {"name": "BRD Token", "short_name": "BRD", "decimals": 18}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(currency.kind, "erc20");
        assert_eq!(currency.denominations.len(), 2);
        assert_eq!(currency.denominations[1].decimals, 18);
    }
}
