//! # Domain Layer
//!
//! Core entities and value objects of the membership engine.

mod errors;
mod event;
mod invariants;
mod section;
mod vault;

pub use errors::MembershipError;
pub use event::{EventHash, JoinOutcome, SectionUpdate};
pub use invariants::{
    invariant_elder_floor, invariant_members_match_prefix, invariant_trie_partition,
};
pub use section::Section;
pub use vault::{cmp_eldership, LifeStage, Vault, ADULT_AGE_THRESHOLD, INFANT_AGE};
