//! Asynchronous data-fetch bridge for a blockchain data service.
//!
//! A local, callback-driven synchronization engine knows nothing about HTTP;
//! this crate lets it obtain blockchain data (block heights, transactions,
//! transfers, fee estimates, submission results) from a remote data service
//! and routes each result back to the engine's waiting call site.
//!
//! # Architecture Overview
//!
//! ```text
//! engine ──▶ bridge (cookie + completion)
//!                │
//!                ▼
//!            service (typed resource operations, pagination)
//!                │
//!                ▼
//!            client (request builder → transport → classifier → parsers)
//!                │
//!                ▼
//!            remote data service (HTTP + JSON)
//! ```
//!
//! Every operation accepts an opaque engine cookie and delivers exactly one
//! completion, success or classified failure, from a runtime worker thread.
//! Nothing blocks the caller, nothing is retried internally, and no ordering
//! holds between concurrently issued requests.

pub mod bridge;
pub mod capabilities;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod service;

pub use bridge::{AnnounceBridge, Completion, Cookie, TransactionBundle, TransferBundle};
pub use capabilities::Capabilities;
pub use client::DataClient;
pub use config::{load_config, BridgeConfig};
pub use error::{ClientError, ClientResult, SubmitError};
pub use service::ChainDataService;
