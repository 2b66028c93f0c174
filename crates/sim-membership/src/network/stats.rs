//! # Network Statistics
//!
//! Monotonic counters and the neighbourhood-hop record, kept by the
//! network and read by reporting drivers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Aggregate counters for one simulation run.
///
/// Relocation re-enters the join/departure paths, so `total_joins` and
/// `total_departures` include relocation-driven churn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStats {
    /// Vault joins, including relocation re-insertions.
    pub total_joins: u64,
    /// Vault departures, including relocation removals.
    pub total_departures: u64,
    /// Section splits; a cascade producing `n` leaves counts `n - 1`.
    pub total_splits: u64,
    /// Section merges.
    pub total_merges: u64,
    /// Vault relocations.
    pub total_relocations: u64,
    /// Joins refused by the age-1 guard or dropped by routing.
    pub disallowed_joins: u64,
    /// Hamming distance between old and new resident prefix, one entry
    /// per relocation.
    pub neighbourhood_hops: Vec<u32>,
}

impl NetworkStats {
    /// Hop counts bucketed for reporting.
    pub fn hop_histogram(&self) -> BTreeMap<u32, u64> {
        let mut histogram = BTreeMap::new();
        for &hops in &self.neighbourhood_hops {
            *histogram.entry(hops).or_insert(0) += 1;
        }
        histogram
    }
}
