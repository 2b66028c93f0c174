//! # Prefixes
//!
//! A prefix is an ordered sequence of 0..=256 bits naming one subtree of the
//! address space. The resident prefixes of a network always form a binary
//! trie that covers the whole space without overlap, so every address
//! matches exactly one resident prefix.
//!
//! The canonical identity of a prefix is the pair (bit length, packed bits).
//! Packing alone is not enough: `0` and `00` pack to the same bytes, and an
//! encoding that conflates them aliases trie lookups. Deriving `Eq`/`Hash`
//! over both fields keeps prefixes of different lengths distinguishable,
//! and the masking invariant below keeps equal prefixes byte-identical.

use std::fmt;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::address::{Address, ADDRESS_BITS};
use crate::distance::XorDistance;
use crate::errors::XorSpaceError;

/// A binary address-space prefix of 0..=256 bits.
///
/// Invariant: `bits` holds the prefix left-aligned and every bit beyond
/// `len` is zero, so the derived `Eq`/`Hash` are canonical. The derived
/// ordering (length first, then bit pattern) is arbitrary but
/// deterministic, for sorted reporting.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Prefix {
    len: u16,
    bits: U256,
}

impl Prefix {
    /// The zero-length prefix covering the entire address space.
    pub fn root() -> Self {
        Self {
            len: 0,
            bits: U256::zero(),
        }
    }

    /// Number of bits in this prefix.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// True for the zero-length prefix.
    pub fn is_root(&self) -> bool {
        self.len == 0
    }

    /// The `i`-th bit of the prefix, counted from the most significant end.
    pub fn bit(&self, i: usize) -> Result<bool, XorSpaceError> {
        if i >= self.len() {
            return Err(XorSpaceError::BitOutOfRange {
                index: i,
                len: self.len(),
            });
        }
        Ok(self.bits.bit(ADDRESS_BITS - 1 - i))
    }

    /// Append a `0` bit.
    pub fn extend_left(&self) -> Result<Self, XorSpaceError> {
        if self.len() >= ADDRESS_BITS {
            return Err(XorSpaceError::PrefixExhausted(self.len()));
        }
        Ok(Self {
            len: self.len + 1,
            bits: self.bits,
        })
    }

    /// Append a `1` bit.
    pub fn extend_right(&self) -> Result<Self, XorSpaceError> {
        if self.len() >= ADDRESS_BITS {
            return Err(XorSpaceError::PrefixExhausted(self.len()));
        }
        Ok(Self {
            len: self.len + 1,
            bits: self.bits | (U256::one() << (ADDRESS_BITS - 1 - self.len())),
        })
    }

    /// Append the given bit.
    pub fn extend(&self, bit: bool) -> Result<Self, XorSpaceError> {
        if bit {
            self.extend_right()
        } else {
            self.extend_left()
        }
    }

    /// Drop the final bit. Fails on the zero-length prefix.
    pub fn parent(&self) -> Result<Self, XorSpaceError> {
        if self.is_root() {
            return Err(XorSpaceError::RootHasNoParent);
        }
        let len = self.len - 1;
        Ok(Self {
            len,
            bits: self.bits & high_mask(len as usize),
        })
    }

    /// Flip the final bit. Fails on the zero-length prefix.
    pub fn sibling(&self) -> Result<Self, XorSpaceError> {
        if self.is_root() {
            return Err(XorSpaceError::RootHasNoSibling);
        }
        Ok(Self {
            len: self.len,
            bits: self.bits ^ (U256::one() << (ADDRESS_BITS - self.len())),
        })
    }

    /// A copy of this prefix with the `i`-th bit flipped.
    ///
    /// Used by the relocation protocol, which scans every prefix reachable
    /// by flipping exactly one bit of a vault's home prefix.
    pub fn with_flipped_bit(&self, i: usize) -> Result<Self, XorSpaceError> {
        if i >= self.len() {
            return Err(XorSpaceError::BitOutOfRange {
                index: i,
                len: self.len(),
            });
        }
        Ok(Self {
            len: self.len,
            bits: self.bits ^ (U256::one() << (ADDRESS_BITS - 1 - i)),
        })
    }

    /// True when the leading bits of `addr` equal this prefix.
    pub fn matches(&self, addr: &Address) -> bool {
        addr.raw() & high_mask(self.len()) == self.bits
    }

    /// True when this prefix is `other` or an ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &Prefix) -> bool {
        self.len <= other.len && other.bits & high_mask(self.len()) == self.bits
    }

    /// Overlay this prefix onto an address, keeping the remaining bits.
    ///
    /// The result always matches this prefix; relocation uses it to assign
    /// a fresh name inside the destination section.
    pub fn overlay(&self, addr: &Address) -> Address {
        let mask = high_mask(self.len());
        Address::from_raw((addr.raw() & !mask) | self.bits)
    }

    /// XOR distance between the left-aligned bit patterns of two prefixes.
    ///
    /// Not a metric over subtrees, only a deterministic tie-break.
    pub fn xor_distance(&self, other: &Prefix) -> XorDistance {
        XorDistance::between(self.bits, other.bits)
    }

    /// Number of differing bits over the leading `min(len, other.len)` bits.
    ///
    /// Reported as the neighbourhood hop count when a vault relocates.
    pub fn hamming_distance(&self, other: &Prefix) -> u32 {
        let shared = self.len().min(other.len());
        let diff = (self.bits ^ other.bits) & high_mask(shared);
        (0..shared)
            .filter(|&i| diff.bit(ADDRESS_BITS - 1 - i))
            .count() as u32
    }

    /// The prefix rendered as a binary string, e.g. `"01101"`.
    pub fn to_binary_string(&self) -> String {
        (0..self.len())
            .map(|i| {
                if self.bits.bit(ADDRESS_BITS - 1 - i) {
                    '1'
                } else {
                    '0'
                }
            })
            .collect()
    }
}

/// Mask selecting the leading `len` bits of a 256-bit value.
fn high_mask(len: usize) -> U256 {
    if len == 0 {
        U256::zero()
    } else {
        U256::MAX << (ADDRESS_BITS - len)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "(root)")
        } else {
            write!(f, "{}", self.to_binary_string())
        }
    }
}

impl fmt::Debug for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Prefix({})", self)
    }
}
