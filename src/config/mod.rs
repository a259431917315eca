//! Configuration subsystem.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::load_config;
pub use schema::BridgeConfig;
