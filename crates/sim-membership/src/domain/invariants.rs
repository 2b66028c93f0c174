//! # Domain Invariants
//!
//! Checkable statements that must hold for any valid network state. The
//! engine maintains them by construction; tests call these helpers after
//! churn to prove it.

use sim_xor_space::Prefix;

use crate::config::SimConfig;

use super::errors::MembershipError;
use super::section::Section;

/// Depth limit for the coverage sum. Far beyond any reachable trie depth:
/// a prefix of length d only becomes resident with at least `split_size`
/// adults on each side of every split above it.
const COVERAGE_DEPTH_LIMIT: usize = 127;

/// Invariant: resident prefixes are mutually exclusive and jointly
/// exhaustive, so every address matches exactly one of them.
///
/// Disjointness is pairwise (no prefix is an ancestor of another);
/// exhaustiveness is checked by summing subtree weights at the deepest
/// resident length. An empty set is vacuously valid.
pub fn invariant_trie_partition(prefixes: &[Prefix]) -> Result<(), MembershipError> {
    if prefixes.is_empty() {
        return Ok(());
    }
    for (i, a) in prefixes.iter().enumerate() {
        for b in &prefixes[i + 1..] {
            if a.is_ancestor_of(b) || b.is_ancestor_of(a) {
                return Err(MembershipError::OverlappingPrefixes { a: *a, b: *b });
            }
        }
    }
    let depth = prefixes.iter().map(Prefix::len).max().unwrap_or(0);
    if depth > COVERAGE_DEPTH_LIMIT {
        return Err(MembershipError::CoverageDepthExceeded(depth));
    }
    let expected = 1u128 << depth;
    let covered: u128 = prefixes
        .iter()
        .map(|p| 1u128 << (depth - p.len()))
        .sum();
    if covered != expected {
        return Err(MembershipError::IncompleteCoverage {
            covered,
            expected,
            depth,
        });
    }
    Ok(())
}

/// Invariant: every member of a section matches the section's prefix.
pub fn invariant_members_match_prefix(section: &Section) -> Result<(), MembershipError> {
    for vault in section.members() {
        if !section.prefix().matches(&vault.address) {
            return Err(MembershipError::MemberOutsidePrefix {
                prefix: *section.prefix(),
                address: vault.address,
            });
        }
    }
    Ok(())
}

/// Invariant: the elder set never falls below `min(group_size, members)`;
/// any excess comes only from exact-age ties at the cut boundary.
pub fn invariant_elder_floor(
    section: &Section,
    config: &SimConfig,
) -> Result<(), MembershipError> {
    let elders = section.total_elders(config);
    let floor = config.group_size.min(section.total_members());
    if elders < floor {
        return Err(MembershipError::ElderFloorViolated { elders, floor });
    }
    Ok(())
}
