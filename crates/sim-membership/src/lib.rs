//! # Sim Membership
//!
//! The membership and partitioning engine of the section ageing simulator.
//!
//! ## Purpose
//!
//! Simulate the self-organizing membership protocol of a peer-to-peer
//! storage network without a real network:
//!
//! - Vaults join an XOR namespace and are grouped into sections keyed by
//!   binary address prefixes
//! - Sections elect elders (their oldest members), split as they grow and
//!   merge as they shrink
//! - Pseudo-random event hashes drive vault relocation and ageing
//! - An attack quorum test reports when colluding vaults control a section
//!
//! The engine is single-threaded and fully deterministic given a seed: one
//! `StdRng` instance, owned by the [`Network`], drives name creation, event
//! hashes and random sampling.
//!
//! ## Module Structure
//!
//! ```text
//! sim-membership/
//! ├── domain/          # Core types: Vault, Section, EventHash, invariants
//! ├── network/         # Orchestration: routing, split/merge cascades, relocation
//! ├── ports/           # API trait consumed by simulation drivers
//! └── config.rs        # Protocol constants and swappable policy knobs
//! ```
//!
//! ## Error taxonomy
//!
//! | Class | Surface |
//! |-------|---------|
//! | Refusal (age-1 join guard) | [`JoinOutcome::Disallowed`] value |
//! | Warning (stale reference, empty draw) | `tracing::warn!`, call is a no-op |
//! | Invariant violation (programmer error) | [`MembershipError`] via `Result` |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod domain;
pub mod network;
pub mod ports;

// Re-exports
pub use config::{
    MergeTrigger, QuorumRule, RelocationPick, SimConfig, GROUP_SIZE, QUORUM_DENOMINATOR,
    QUORUM_NUMERATOR, SPLIT_BUFFER, SPLIT_SIZE,
};
pub use domain::{
    cmp_eldership, invariant_elder_floor, invariant_members_match_prefix,
    invariant_trie_partition, EventHash, JoinOutcome, LifeStage, MembershipError, Section,
    SectionUpdate, Vault, ADULT_AGE_THRESHOLD, INFANT_AGE,
};
pub use network::{Network, NetworkStats};
pub use ports::MembershipApi;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
