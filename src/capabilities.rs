//! Protocol capability negotiation.
//!
//! # Responsibilities
//! - Describe which optional response fields/behaviors the data service supports
//! - Derive the `Accept` header sent with every request
//!
//! # Design Decisions
//! - Composition is bitwise OR; support checks are subset tests
//! - The `Accept` mapping is an exact-match table over known presets, not
//!   per-flag arithmetic: unrecognized combinations fall back to plain JSON

use std::ops::BitOr;

/// Bit-set of optional protocol features, fixed at client construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities(u32);

impl Capabilities {
    /// The `Transfer` JSON may include a status of "revert".
    pub const TRANSFER_STATUS_REVERT: Capabilities = Capabilities(1 << 0);

    /// The `Transfer` JSON may include a status of "reject".
    pub const TRANSFER_STATUS_REJECT: Capabilities = Capabilities(1 << 1);

    /// The 2020-03-21 protocol revision: 'revert' and 'reject'.
    pub const V2020_03_21: Capabilities =
        Capabilities(Self::TRANSFER_STATUS_REVERT.0 | Self::TRANSFER_STATUS_REJECT.0);

    /// The capabilities negotiated by default.
    pub const CURRENT: Capabilities = Self::V2020_03_21;

    /// An empty capability set.
    pub const fn none() -> Capabilities {
        Capabilities(0)
    }

    /// Union of `self` and `other`.
    pub const fn compose(self, other: Capabilities) -> Capabilities {
        Capabilities(self.0 | other.0)
    }

    /// True iff every flag in `subset` is present in `self`.
    pub fn has_capabilities(self, subset: Capabilities) -> bool {
        subset.0 == (subset.0 & self.0)
    }

    /// The `Accept` header value for this capability set.
    pub fn version_description(self) -> &'static str {
        if self == Self::V2020_03_21 {
            "application/vnd.chaindata.2020-03-21+json"
        } else {
            "application/json"
        }
    }
}

impl BitOr for Capabilities {
    type Output = Capabilities;

    fn bitor(self, rhs: Capabilities) -> Capabilities {
        self.compose(rhs)
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::CURRENT
    }
}
