//! # XOR Distance
//!
//! The comparable XOR metric between two 256-bit values. Smaller means
//! closer; the simulator uses it to break ties in elder ordering and
//! relocation candidate selection.

use std::fmt;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Distance between two points in XOR space.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct XorDistance(U256);

impl XorDistance {
    /// Wrap a raw XOR result.
    pub fn new(raw: U256) -> Self {
        Self(raw)
    }

    /// Distance between two raw 256-bit values.
    pub fn between(a: U256, b: U256) -> Self {
        Self(a ^ b)
    }

    /// The farthest representable distance.
    pub fn max() -> Self {
        Self(U256::MAX)
    }

    /// True when the two points coincide.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Debug for XorDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XorDistance({:x})", self.0)
    }
}
