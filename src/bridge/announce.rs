//! Engine facade.
//!
//! # Responsibilities
//! - One operation per data kind the engine can request
//! - Translate service DTOs into engine bundles
//! - Deliver exactly one completion per issued cookie, on every path
//!
//! Operations return immediately; the work runs on the Tokio runtime and the
//! completion fires from a worker thread. Paginated kinds accumulate every
//! page before completing, so the engine never sees a partial page. The
//! pagination loop is bounded only by the server's `next` links, and nothing
//! here retries or times out: both policies belong to the caller, which must
//! treat a late completion as a no-op once it has given up.

use std::sync::Arc;

use crate::bridge::bundle::{CurrencyBundle, TransactionBundle, TransferBundle};
use crate::bridge::token::Completion;
use crate::error::ClientResult;
use crate::models::{TransactionFee, TransactionIdentifier};
use crate::service::ChainDataService;

/// The facade the synchronization engine calls to retrieve data.
///
/// Must be used from within a Tokio runtime.
#[derive(Debug, Clone)]
pub struct AnnounceBridge {
    service: Arc<ChainDataService>,
}

impl AnnounceBridge {
    pub fn new(service: Arc<ChainDataService>) -> Self {
        Self { service }
    }

    /// Current verified block height for a blockchain.
    pub fn block_height(&self, blockchain_id: String, completion: Completion<u64>) {
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let result = service.get_block_height(&blockchain_id).await;
            log_outcome("block_height", completion.cookie().0, &result);
            completion.complete(result);
        });
    }

    /// All transactions touching `addresses`, with raw bytes and embedded
    /// transfers, accumulated across every page.
    pub fn transactions(
        &self,
        blockchain_id: String,
        addresses: Vec<String>,
        begin_height: Option<u64>,
        end_height: Option<u64>,
        completion: Completion<Vec<TransactionBundle>>,
    ) {
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let result = service
                .get_transactions(
                    &blockchain_id,
                    &addresses,
                    begin_height,
                    end_height,
                    true,
                    false,
                    true,
                )
                .await
                .map(|transactions| {
                    transactions
                        .iter()
                        .filter_map(TransactionBundle::from_transaction)
                        .collect::<Vec<_>>()
                });
            log_outcome("transactions", completion.cookie().0, &result);
            completion.complete(result);
        });
    }

    /// All transfers touching `addresses`, flattened from their owning
    /// transactions so each bundle carries the transaction's status.
    pub fn transfers(
        &self,
        blockchain_id: String,
        addresses: Vec<String>,
        begin_height: Option<u64>,
        end_height: Option<u64>,
        completion: Completion<Vec<TransferBundle>>,
    ) {
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let result = service
                .get_transactions(
                    &blockchain_id,
                    &addresses,
                    begin_height,
                    end_height,
                    false,
                    false,
                    true,
                )
                .await
                .map(|transactions| {
                    transactions
                        .iter()
                        .flat_map(|transaction| {
                            transaction.transfers().iter().map(move |transfer| {
                                TransferBundle::from_transfer(transaction, transfer)
                            })
                        })
                        .collect::<Vec<_>>()
                });
            log_outcome("transfers", completion.cookie().0, &result);
            completion.complete(result);
        });
    }

    /// Every verified currency, optionally restricted to one blockchain.
    pub fn currencies(
        &self,
        blockchain_id: Option<String>,
        mainnet: bool,
        completion: Completion<Vec<CurrencyBundle>>,
    ) {
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let result = service
                .get_currencies(blockchain_id.as_deref(), mainnet)
                .await
                .map(|currencies| {
                    currencies
                        .iter()
                        .map(CurrencyBundle::from_currency)
                        .collect::<Vec<_>>()
                });
            log_outcome("currencies", completion.cookie().0, &result);
            completion.complete(result);
        });
    }

    /// Submit raw transaction bytes; a 422 rejection surfaces as
    /// `ClientError::Submission` with the classified reason.
    pub fn submit(
        &self,
        blockchain_id: String,
        identifier: Option<String>,
        raw: Vec<u8>,
        completion: Completion<TransactionIdentifier>,
    ) {
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let result = service
                .create_transaction(&blockchain_id, identifier.as_deref(), &raw)
                .await;
            log_outcome("submit", completion.cookie().0, &result);
            completion.complete(result);
        });
    }

    /// Estimate the cost units a prospective transaction needs.
    pub fn estimate_fee(
        &self,
        blockchain_id: String,
        raw: Vec<u8>,
        completion: Completion<TransactionFee>,
    ) {
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let result = service
                .estimate_transaction_fee(&blockchain_id, &raw)
                .await;
            log_outcome("estimate_fee", completion.cookie().0, &result);
            completion.complete(result);
        });
    }
}

fn log_outcome<T>(operation: &'static str, cookie: usize, result: &ClientResult<T>) {
    match result {
        Ok(_) => tracing::debug!(operation, cookie, "announcing success"),
        Err(error) => tracing::warn!(operation, cookie, error = %error, "announcing failure"),
    }
}
