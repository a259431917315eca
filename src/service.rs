//! Typed resource operations against the data service.
//!
//! # Responsibilities
//! - One method per service resource operation (blockchains, currencies,
//!   transactions, transfers, submission, fee estimation, subscriptions)
//! - Chunk large address sets and accumulate paginated results in order
//!
//! Pagination follows server-supplied `next` links strictly in sequence;
//! each page's URL is derived from the previous response, so pages of one
//! logical fetch are never fetched concurrently. The loop is bounded only
//! by the server terminating its `next` links; callers who distrust a
//! server should impose their own timeout.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::de::DeserializeOwned;

use crate::capabilities::Capabilities;
use crate::client::api::DataClient;
use crate::client::request::Query;
use crate::config::schema::{BridgeConfig, ServiceConfig};
use crate::error::{ClientError, ClientResult};
use crate::models::{
    Blockchain, Currency, NewSubscription, Subscription, Transaction, TransactionFee,
    TransactionIdentifier, Transfer,
};

/// High-level client for the data service's resources.
#[derive(Debug, Clone)]
pub struct ChainDataService {
    client: DataClient,
    address_chunk_size: usize,
    max_page_size: usize,
}

impl ChainDataService {
    /// Build a service with its own transport.
    pub fn new(config: &BridgeConfig, capabilities: Capabilities) -> ClientResult<Self> {
        let client = DataClient::new(config, capabilities)?;
        Ok(Self::with_client(client, &config.service))
    }

    /// Build a service over an existing [`DataClient`].
    pub fn with_client(client: DataClient, config: &ServiceConfig) -> Self {
        Self {
            client,
            address_chunk_size: config.address_chunk_size,
            max_page_size: config.max_page_size,
        }
    }

    pub fn client(&self) -> &DataClient {
        &self.client
    }

    // Blockchains

    pub async fn get_blockchains(&self, mainnet: Option<bool>) -> ClientResult<Vec<Blockchain>> {
        let mut query = Query::new().param("verified", "true");
        if let Some(mainnet) = mainnet {
            query.add("testnet", (!mainnet).to_string());
        }
        self.client
            .get_array(&["blockchains"], "blockchains", &query)
            .await
    }

    pub async fn get_blockchain(&self, blockchain_id: &str) -> ClientResult<Blockchain> {
        let query = Query::new().param("verified", "true");
        self.client
            .get_one(&["blockchains", blockchain_id], &query)
            .await
    }

    /// The height the service has verified for `blockchain_id`.
    pub async fn get_block_height(&self, blockchain_id: &str) -> ClientResult<u64> {
        let blockchain = self.get_blockchain(blockchain_id).await?;
        blockchain.verified_height.ok_or_else(|| {
            ClientError::BadResponse(format!(
                "no verified height for blockchain '{}'",
                blockchain_id
            ))
        })
    }

    // Currencies

    pub async fn get_currencies(
        &self,
        blockchain_id: Option<&str>,
        mainnet: bool,
    ) -> ClientResult<Vec<Currency>> {
        let mut query = Query::new();
        if let Some(blockchain_id) = blockchain_id {
            query.add("blockchain_id", blockchain_id);
        }
        query.add("testnet", (!mainnet).to_string());
        query.add("verified", "true");
        self.fetch_all_pages(&["currencies"], "currencies", &query)
            .await
    }

    pub async fn get_currency(&self, currency_id: &str) -> ClientResult<Currency> {
        self.client
            .get_one(&["currencies", currency_id], &Query::new())
            .await
    }

    // Transactions

    #[allow(clippy::too_many_arguments)]
    pub async fn get_transactions(
        &self,
        blockchain_id: &str,
        addresses: &[String],
        begin_height: Option<u64>,
        end_height: Option<u64>,
        include_raw: bool,
        include_proof: bool,
        include_transfers: bool,
    ) -> ClientResult<Vec<Transaction>> {
        if addresses.is_empty() {
            return Err(ClientError::BadRequest("empty address list".to_string()));
        }

        // Requests with embedded transfers are heavier; page them smaller.
        let pages_factor = if include_transfers { 1 } else { 3 };
        let max_page_size = pages_factor * self.max_page_size;

        let mut transactions = Vec::new();
        for chunk in addresses.chunks(self.address_chunk_size) {
            let mut query = Query::new().param("blockchain_id", blockchain_id);
            if let Some(height) = begin_height {
                query.add("start_height", height.to_string());
            }
            if let Some(height) = end_height {
                query.add("end_height", height.to_string());
            }
            query.add("include_proof", include_proof.to_string());
            query.add("include_raw", include_raw.to_string());
            query.add("include_transfers", include_transfers.to_string());
            query.add("max_page_size", max_page_size.to_string());
            for address in chunk {
                query.add("address", address.clone());
            }

            let mut chunk_transactions = self
                .fetch_all_pages(&["transactions"], "transactions", &query)
                .await?;
            transactions.append(&mut chunk_transactions);
        }
        Ok(transactions)
    }

    pub async fn get_transaction(
        &self,
        transaction_id: &str,
        include_raw: bool,
        include_proof: bool,
    ) -> ClientResult<Transaction> {
        let query = Query::new()
            .param("include_proof", include_proof.to_string())
            .param("include_raw", include_raw.to_string());
        self.client
            .get_one(&["transactions", transaction_id], &query)
            .await
    }

    /// Submit raw transaction bytes for inclusion.
    pub async fn create_transaction(
        &self,
        blockchain_id: &str,
        identifier: Option<&str>,
        raw: &[u8],
    ) -> ClientResult<TransactionIdentifier> {
        let data = BASE64.encode(raw);
        let body = serde_json::json!({
            "blockchain_id": blockchain_id,
            "submit_context": submit_context(blockchain_id, identifier, &data, false),
            "data": data,
        });
        self.client
            .post(&["transactions"], &Query::new(), &body)
            .await
    }

    /// Estimate the cost units needed to include `raw`.
    pub async fn estimate_transaction_fee(
        &self,
        blockchain_id: &str,
        raw: &[u8],
    ) -> ClientResult<TransactionFee> {
        let data = BASE64.encode(raw);
        let body = serde_json::json!({
            "blockchain_id": blockchain_id,
            "submit_context": submit_context(blockchain_id, None, &data, true),
            "data": data,
        });
        let query = Query::new().param("estimate_fee", "true");
        self.client.post(&["transactions"], &query, &body).await
    }

    // Transfers

    pub async fn get_transfers(
        &self,
        blockchain_id: &str,
        addresses: &[String],
        begin_height: Option<u64>,
        end_height: Option<u64>,
    ) -> ClientResult<Vec<Transfer>> {
        if addresses.is_empty() {
            return Err(ClientError::BadRequest("empty address list".to_string()));
        }

        let mut transfers = Vec::new();
        for chunk in addresses.chunks(self.address_chunk_size) {
            let mut query = Query::new().param("blockchain_id", blockchain_id);
            if let Some(height) = begin_height {
                query.add("start_height", height.to_string());
            }
            if let Some(height) = end_height {
                query.add("end_height", height.to_string());
            }
            query.add("max_page_size", (3 * self.max_page_size).to_string());
            for address in chunk {
                query.add("address", address.clone());
            }

            let mut chunk_transfers = self
                .fetch_all_pages(&["transfers"], "transfers", &query)
                .await?;
            transfers.append(&mut chunk_transfers);
        }
        Ok(transfers)
    }

    pub async fn get_transfer(&self, transfer_id: &str) -> ClientResult<Transfer> {
        self.client
            .get_one(&["transfers", transfer_id], &Query::new())
            .await
    }

    // Subscriptions

    pub async fn get_subscriptions(&self) -> ClientResult<Vec<Subscription>> {
        self.client
            .get_array(&["subscriptions"], "subscriptions", &Query::new())
            .await
    }

    pub async fn get_subscription(&self, subscription_id: &str) -> ClientResult<Subscription> {
        self.client
            .get_one(&["subscriptions", subscription_id], &Query::new())
            .await
    }

    pub async fn create_subscription(
        &self,
        subscription: &NewSubscription,
    ) -> ClientResult<Subscription> {
        self.client
            .post(&["subscriptions"], &Query::new(), subscription)
            .await
    }

    /// Fetch `subscription` by id, creating it if the fetch fails.
    pub async fn get_or_create_subscription(
        &self,
        subscription: &Subscription,
    ) -> ClientResult<Subscription> {
        match self.get_subscription(&subscription.id).await {
            Ok(existing) => Ok(existing),
            Err(_) => {
                self.create_subscription(&NewSubscription::from(subscription))
                    .await
            }
        }
    }

    pub async fn update_subscription(
        &self,
        subscription: &Subscription,
    ) -> ClientResult<Subscription> {
        self.client
            .put(
                &["subscriptions", &subscription.id],
                &Query::new(),
                subscription,
            )
            .await
    }

    pub async fn delete_subscription(&self, subscription_id: &str) -> ClientResult<()> {
        self.client
            .delete(&["subscriptions", subscription_id], &Query::new())
            .await
    }

    /// Fetch every page of an embedded collection, in page order.
    async fn fetch_all_pages<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        embedded_key: &str,
        query: &Query,
    ) -> ClientResult<Vec<T>> {
        let mut items = Vec::new();
        let mut page = self.client.get_paged(segments, embedded_key, query).await?;
        loop {
            items.append(&mut page.items);
            match page.next {
                Some(next) => {
                    page = self.client.get_paged_url(&next, embedded_key).await?;
                }
                None => break,
            }
        }
        Ok(items)
    }
}

fn submit_context(
    blockchain_id: &str,
    identifier: Option<&str>,
    data: &str,
    fee_estimate: bool,
) -> String {
    let tag = match identifier {
        Some(identifier) => identifier.to_string(),
        None => format!("Data:{}", &data[..data.len().min(20)]),
    };
    if fee_estimate {
        format!("chaindata:{}:{} (FeeEstimate)", blockchain_id, tag)
    } else {
        format!("chaindata:{}:{}", blockchain_id, tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::transport::fake::FakeTransport;
    use crate::client::transport::Transport;
    use std::sync::Arc;

    fn service_over(transport: Arc<FakeTransport>) -> ChainDataService {
        let config = ServiceConfig::default();
        let client = DataClient::with_transport(
            transport as Arc<dyn Transport>,
            &config,
            Capabilities::CURRENT,
        );
        ChainDataService::with_client(client, &config)
    }

    fn transactions_page(names: &[&str], next: Option<&str>) -> String {
        let items: Vec<String> = names
            .iter()
            .map(|name| {
                format!(
                    r#"{{"transaction_id":"{0}","hash":"{0}","blockchain_id":"bitcoin-mainnet",
                        "size":100,"fee":{{"currency_id":"btc","amount":"10"}},"status":"confirmed",
                        "raw":"AQID"}}"#,
                    name
                )
            })
            .collect();
        match next {
            Some(next) => format!(
                r#"{{"_embedded":{{"transactions":[{}]}},"next":"{}"}}"#,
                items.join(","),
                next
            ),
            None => format!(r#"{{"_embedded":{{"transactions":[{}]}}}}"#, items.join(",")),
        }
    }

    #[tokio::test]
    async fn test_paged_fetch_accumulates_in_order() {
        let transport = Arc::new(
            FakeTransport::new()
                .respond(
                    "cursor=2",
                    200,
                    &transactions_page(
                        &["t3", "t4"],
                        Some("https://api.chaindata.example/transactions?cursor=3"),
                    ),
                )
                .respond("cursor=3", 200, &transactions_page(&["t5", "t6"], None))
                .respond(
                    "transactions",
                    200,
                    &transactions_page(
                        &["t1", "t2"],
                        Some("https://api.chaindata.example/transactions?cursor=2"),
                    ),
                ),
        );
        let service = service_over(Arc::clone(&transport));

        let transactions = service
            .get_transactions(
                "bitcoin-mainnet",
                &["addr1".to_string()],
                None,
                None,
                true,
                false,
                true,
            )
            .await
            .unwrap();

        assert_eq!(transport.request_count(), 3);
        let ids: Vec<&str> = transactions
            .iter()
            .map(|transaction| transaction.id.as_str())
            .collect();
        assert_eq!(ids, vec!["t1", "t2", "t3", "t4", "t5", "t6"]);
    }

    #[tokio::test]
    async fn test_addresses_are_chunked() {
        let transport = Arc::new(FakeTransport::new().respond(
            "transactions",
            200,
            &transactions_page(&[], None),
        ));
        let service = service_over(Arc::clone(&transport));

        let addresses: Vec<String> = (0..60).map(|i| format!("addr{}", i)).collect();
        let transactions = service
            .get_transactions(
                "bitcoin-mainnet",
                &addresses,
                None,
                None,
                false,
                false,
                false,
            )
            .await
            .unwrap();

        assert!(transactions.is_empty());
        // 60 addresses with a chunk size of 50 → two underlying queries.
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_address_list_is_bad_request() {
        let transport = Arc::new(FakeTransport::new());
        let service = service_over(Arc::clone(&transport));

        let result = service
            .get_transactions("bitcoin-mainnet", &[], None, None, false, false, false)
            .await;
        assert!(matches!(result, Err(ClientError::BadRequest(_))));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_transactions_query_parameters() {
        let transport = Arc::new(FakeTransport::new().respond(
            "transactions",
            200,
            &transactions_page(&[], None),
        ));
        let service = service_over(Arc::clone(&transport));

        service
            .get_transactions(
                "bitcoin-mainnet",
                &["addr1".to_string(), "addr2".to_string()],
                Some(100),
                Some(200),
                true,
                false,
                true,
            )
            .await
            .unwrap();

        let url = transport.request_urls().remove(0);
        assert!(url.contains("blockchain_id=bitcoin-mainnet"));
        assert!(url.contains("start_height=100"));
        assert!(url.contains("end_height=200"));
        assert!(url.contains("include_raw=true"));
        assert!(url.contains("include_transfers=true"));
        assert!(url.contains("max_page_size=20"));
        assert!(url.contains("address=addr1"));
        assert!(url.contains("address=addr2"));
    }

    #[tokio::test]
    async fn test_get_block_height() {
        let transport = Arc::new(FakeTransport::new().respond(
            "blockchains/bitcoin-mainnet",
            200,
            r#"{"id":"bitcoin-mainnet","name":"Bitcoin","network":"mainnet",
                "is_mainnet":true,"native_currency_id":"btc",
                "verified_height":750000,"confirmations_until_final":6}"#,
        ));
        let service = service_over(transport);

        let height = service.get_block_height("bitcoin-mainnet").await.unwrap();
        assert_eq!(height, 750000);
    }

    #[tokio::test]
    async fn test_get_block_height_missing_is_bad_response() {
        let transport = Arc::new(FakeTransport::new().respond(
            "blockchains/bitcoin-testnet",
            200,
            r#"{"id":"bitcoin-testnet","name":"Bitcoin Testnet","network":"testnet",
                "is_mainnet":false,"native_currency_id":"btc",
                "confirmations_until_final":6}"#,
        ));
        let service = service_over(transport);

        let result = service.get_block_height("bitcoin-testnet").await;
        assert!(matches!(result, Err(ClientError::BadResponse(_))));
    }

    #[tokio::test]
    async fn test_create_transaction_posts_base64() {
        let transport = Arc::new(FakeTransport::new().respond(
            "transactions",
            200,
            r#"{"transaction_id":"tid","blockchain_id":"bitcoin-mainnet","identifier":"ident","hash":"h"}"#,
        ));
        let service = service_over(Arc::clone(&transport));

        let identifier = service
            .create_transaction("bitcoin-mainnet", None, &[1, 2, 3])
            .await
            .unwrap();
        assert_eq!(identifier.id, "tid");

        let request = transport.requests().remove(0);
        let body: serde_json::Value =
            serde_json::from_slice(&request.body.unwrap()).unwrap();
        assert_eq!(body["blockchain_id"], "bitcoin-mainnet");
        assert_eq!(body["data"], "AQID");
        assert!(body["submit_context"]
            .as_str()
            .unwrap()
            .starts_with("chaindata:bitcoin-mainnet:"));
    }

    #[tokio::test]
    async fn test_estimate_fee_sets_query_flag() {
        let transport = Arc::new(FakeTransport::new().respond(
            "estimate_fee=true",
            200,
            r#"{"cost_units": 21000}"#,
        ));
        let service = service_over(Arc::clone(&transport));

        let fee = service
            .estimate_transaction_fee("ethereum-mainnet", &[1, 2, 3])
            .await
            .unwrap();
        assert_eq!(fee.cost_units, 21000);
    }

    #[tokio::test]
    async fn test_get_or_create_subscription_falls_back_to_create() {
        let subscription: Subscription = serde_json::from_str(
            r#"{"subscription_id":"sub-1","device_id":"device-1",
                "endpoint":{"environment":"production","kind":"fcm","value":"token"},
                "currencies":[]}"#,
        )
        .unwrap();

        let transport = Arc::new(
            FakeTransport::new()
                .respond("subscriptions/sub-1", 404, "")
                .respond(
                    "subscriptions",
                    200,
                    r#"{"subscription_id":"sub-2","device_id":"device-1",
                        "endpoint":{"environment":"production","kind":"fcm","value":"token"},
                        "currencies":[]}"#,
                ),
        );
        let service = service_over(Arc::clone(&transport));

        let created = service
            .get_or_create_subscription(&subscription)
            .await
            .unwrap();
        assert_eq!(created.id, "sub-2");
        assert_eq!(transport.request_count(), 2);
    }
}
