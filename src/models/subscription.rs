//! Subscription resource.
//!
//! A subscription tells the service's push-notification provider which
//! (currency, addresses, event) triples to watch for a device endpoint.

use serde::{Deserialize, Serialize};

/// Where notifications are delivered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubscriptionEndpoint {
    /// Delivery environment ("production", "sandbox").
    pub environment: String,

    /// Endpoint kind (e.g. "fcm", "apns").
    pub kind: String,

    /// Provider-specific endpoint value (device token, topic).
    pub value: String,
}

/// An event to watch, with the confirmation depths to notify at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubscriptionEvent {
    pub name: String,

    #[serde(default)]
    pub confirmations: Vec<u32>,
}

/// Addresses and events watched for one currency.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubscriptionCurrency {
    pub currency_id: String,

    pub addresses: Vec<String>,

    pub events: Vec<SubscriptionEvent>,
}

/// A registered subscription, identified by its server-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Subscription {
    #[serde(rename = "subscription_id")]
    pub id: String,

    pub device_id: String,

    pub endpoint: SubscriptionEndpoint,

    pub currencies: Vec<SubscriptionCurrency>,
}

/// Creation payload: a subscription without its server-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSubscription {
    pub device_id: String,

    pub endpoint: SubscriptionEndpoint,

    pub currencies: Vec<SubscriptionCurrency>,
}

impl From<&Subscription> for NewSubscription {
    fn from(subscription: &Subscription) -> Self {
        Self {
            device_id: subscription.device_id.clone(),
            endpoint: subscription.endpoint.clone(),
            currencies: subscription.currencies.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_wire_shape() {
        let subscription: Subscription = serde_json::from_str(
            r#"{
                "subscription_id": "sub-1",
                "device_id": "device-1",
                "endpoint": {"environment": "production", "kind": "fcm", "value": "token-xyz"},
                "currencies": [{
                    "currency_id": "bitcoin-mainnet:__native__",
                    "addresses": ["1BoatSLRHtKNngkdXEeobR76b53LETtpyT"],
                    "events": [{"name": "confirmed", "confirmations": [1, 6]}]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(subscription.id, "sub-1");
        assert_eq!(subscription.currencies[0].events[0].confirmations, vec![1, 6]);
    }

    #[test]
    fn test_new_subscription_omits_id() {
        let endpoint = SubscriptionEndpoint {
            environment: "production".to_string(),
            kind: "fcm".to_string(),
            value: "token".to_string(),
        };
        let new_subscription = NewSubscription {
            device_id: "device-1".to_string(),
            endpoint,
            currencies: Vec::new(),
        };

        let json = serde_json::to_value(&new_subscription).unwrap();
        assert!(json.get("subscription_id").is_none());
        assert_eq!(json["device_id"], "device-1");
    }
}
