//! Data-service HTTP client.
//!
//! # Data Flow
//! ```text
//! request.rs (assemble URL + headers)
//!     → transport.rs (execute on the shared pool)
//!     → status.rs (classify the status code)
//!     → parse.rs (root / embedded / paged strategies)
//! ```
//!
//! `api.rs` ties the four together into typed verbs.

pub mod api;
pub mod parse;
pub mod request;
pub mod status;
pub mod transport;

pub use api::DataClient;
pub use parse::Paged;
pub use request::{Method, Query};
pub use transport::{HttpResponse, HttpTransport, Transport};
