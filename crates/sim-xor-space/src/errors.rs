//! # XOR Space Errors
//!
//! Error types for address-space operations. All variants indicate a broken
//! caller invariant rather than a recoverable simulation state.

use thiserror::Error;

/// Address-space error types.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum XorSpaceError {
    /// `parent()` called on the zero-length prefix.
    #[error("the zero-length prefix has no parent")]
    RootHasNoParent,

    /// `sibling()` called on the zero-length prefix.
    #[error("the zero-length prefix has no sibling")]
    RootHasNoSibling,

    /// A prefix cannot be extended past the address width.
    #[error("prefix of {0} bits cannot be extended past the address width")]
    PrefixExhausted(usize),

    /// A bit index beyond the prefix length was addressed.
    #[error("bit index {index} out of range for prefix of {len} bits")]
    BitOutOfRange {
        /// Offending bit index.
        index: usize,
        /// Length of the prefix being indexed.
        len: usize,
    },
}
