//! Bridge between the synchronization engine and the data service.
//!
//! # Data Flow
//! ```text
//! engine ──(request + cookie)──▶ announce.rs
//!                                    │ service calls, pagination
//!                                    ▼
//!                                bundle.rs (DTO → engine bundle)
//!                                    │
//! engine ◀──(one completion)──── token.rs (consume-once pairing)
//! ```

pub mod announce;
pub mod bundle;
pub mod token;

pub use announce::AnnounceBridge;
pub use bundle::{
    CurrencyBundle, CurrencyDenominationBundle, TransactionBundle, TransferBundle, TransferStatus,
};
pub use token::{Completion, Cookie};
