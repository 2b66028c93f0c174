//! # Addresses
//!
//! A vault name is a uniformly random 256-bit value. Names are compared
//! numerically; numeric order is only ever used as an arbitrary
//! deterministic tie-break, never as a metric. The metric between names is
//! [`XorDistance`].

use std::fmt;

use primitive_types::U256;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::distance::XorDistance;

/// Width of the address space in bits.
pub const ADDRESS_BITS: usize = 256;

/// A 256-bit name in XOR space.
///
/// Immutable once created; relocation replaces the whole value rather than
/// mutating bits in place.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(U256);

impl Address {
    /// Draw a uniformly random address from the given generator.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        Self(U256::from_big_endian(&bytes))
    }

    /// Construct an address from a raw 256-bit value.
    pub fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// The raw 256-bit value of this address.
    pub fn raw(&self) -> U256 {
        self.0
    }

    /// The `i`-th bit counted from the most significant end.
    ///
    /// Bit 0 is the first bit a prefix would match against.
    pub fn bit(&self, i: usize) -> bool {
        debug_assert!(i < ADDRESS_BITS);
        self.0.bit(ADDRESS_BITS - 1 - i)
    }

    /// XOR distance between this address and another.
    pub fn xor_distance(&self, other: &Address) -> XorDistance {
        XorDistance::new(self.0 ^ other.0)
    }

    /// The address rendered as a 256-character binary string.
    pub fn to_binary_string(&self) -> String {
        (0..ADDRESS_BITS)
            .map(|i| if self.bit(i) { '1' } else { '0' })
            .collect()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:064x}", self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Leading 16 hex digits identify a name well enough in logs.
        let hex = format!("{:064x}", self.0);
        write!(f, "Address({}..)", &hex[..16])
    }
}
