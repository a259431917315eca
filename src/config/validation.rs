//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, chunk sizes > 0)
//! - Check the base URL parses before any request is attempted
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: BridgeConfig → Result<(), Vec<ValidationError>>

use url::Url;

use crate::config::schema::BridgeConfig;

/// A single configuration violation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The service base URL does not parse.
    InvalidBaseUrl { url: String, reason: String },
    /// A numeric field that must be positive is zero.
    ZeroValue { field: &'static str },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBaseUrl { url, reason } => {
                write!(f, "invalid base URL '{}': {}", url, reason)
            }
            ValidationError::ZeroValue { field } => {
                write!(f, "{} must be greater than zero", field)
            }
        }
    }
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = Url::parse(&config.service.base_url) {
        errors.push(ValidationError::InvalidBaseUrl {
            url: config.service.base_url.clone(),
            reason: e.to_string(),
        });
    }

    if config.service.address_chunk_size == 0 {
        errors.push(ValidationError::ZeroValue {
            field: "service.address_chunk_size",
        });
    }
    if config.service.max_page_size == 0 {
        errors.push(ValidationError::ZeroValue {
            field: "service.max_page_size",
        });
    }
    if config.transport.timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue {
            field: "transport.timeout_secs",
        });
    }
    if config.transport.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue {
            field: "transport.connect_timeout_secs",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
