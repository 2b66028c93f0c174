//! # Domain Errors
//!
//! Error types for the membership engine. Every variant is an invariant
//! violation: a bug in the caller or the engine, never a valid simulated
//! state. Refusals and warnings are not represented here; refusals are
//! returned as values and warnings are logged.

use sim_xor_space::{Address, Prefix, XorSpaceError};
use thiserror::Error;

/// Membership engine error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// A section was given a member whose address does not match its prefix.
    #[error("vault {address:?} does not match section prefix {prefix}")]
    MemberOutsidePrefix {
        /// Prefix of the section being constructed.
        prefix: Prefix,
        /// Offending member address.
        address: Address,
    },

    /// Two resident prefixes overlap, so some address matches both.
    #[error("resident prefixes overlap: {a} and {b}")]
    OverlappingPrefixes {
        /// First resident prefix.
        a: Prefix,
        /// Second resident prefix, inside the first's subtree.
        b: Prefix,
    },

    /// The resident prefixes leave part of the address space uncovered.
    #[error("resident prefixes cover {covered}/{expected} of the address space at depth {depth}")]
    IncompleteCoverage {
        /// Covered subtree units at the deepest resident length.
        covered: u128,
        /// Units required for full coverage.
        expected: u128,
        /// Deepest resident prefix length.
        depth: usize,
    },

    /// A resident prefix is too deep for coverage accounting.
    #[error("prefix length {0} exceeds coverage accounting depth")]
    CoverageDepthExceeded(usize),

    /// A section's elder set shrank below the guaranteed floor.
    #[error("elder set of {elders} below floor {floor}")]
    ElderFloorViolated {
        /// Actual elder count.
        elders: usize,
        /// Guaranteed minimum, `min(group_size, members)`.
        floor: usize,
    },

    /// An address-space operation failed.
    #[error(transparent)]
    XorSpace(#[from] XorSpaceError),
}
