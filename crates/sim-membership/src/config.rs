//! # Simulation Configuration
//!
//! Protocol constants and the policy knobs the protocol's history left
//! divergent. Each knob canonicalizes one historical decision point.

use serde::{Deserialize, Serialize};

/// Number of elders per section, and the section-size floor for merging.
pub const GROUP_SIZE: usize = 8;

/// Extra qualifying members each split half needs beyond the group size.
pub const SPLIT_BUFFER: usize = 3;

/// Qualifying members each hypothetical half needs before a section splits.
pub const SPLIT_SIZE: usize = GROUP_SIZE + SPLIT_BUFFER;

/// Attack quorum numerator: a section is attacked when
/// `attacker_elders * QUORUM_DENOMINATOR > elders * QUORUM_NUMERATOR`.
pub const QUORUM_NUMERATOR: usize = 1;

/// Attack quorum denominator.
pub const QUORUM_DENOMINATOR: usize = 2;

/// Which member count triggers a merge when it drops below the group size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MergeTrigger {
    /// Merge when the elder count drops below the group size.
    #[default]
    ElderCount,
    /// Merge when the adult count drops below the group size.
    AdultCount,
}

/// Which qualifying member an event hash relocates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RelocationPick {
    /// Relocate the youngest member passing the `H mod 2^age` test.
    #[default]
    YoungestQualifying,
    /// Relocate the oldest member passing the test.
    OldestQualifying,
}

/// How elder votes are weighed in the attack quorum test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QuorumRule {
    /// One vote per elder.
    #[default]
    VoteCount,
    /// One vote per elder, and attackers must also hold a strict majority
    /// of summed elder age.
    AgeWeighted,
}

/// Tunable parameters of a simulation run.
///
/// Drivers may deserialize this from a config file; the core only ever
/// reads it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Elders per section.
    pub group_size: usize,
    /// Extra qualifying members per split half beyond `group_size`.
    pub split_buffer: usize,
    /// Attack quorum numerator.
    pub quorum_numerator: usize,
    /// Attack quorum denominator.
    pub quorum_denominator: usize,
    /// Merge trigger convention.
    pub merge_trigger: MergeTrigger,
    /// Relocation candidate convention.
    pub relocation_pick: RelocationPick,
    /// Attack quorum convention.
    pub quorum_rule: QuorumRule,
    /// Increment member ages whenever a section is constructed
    /// (split, merge and the initial seed section alike).
    pub age_on_formation: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            group_size: GROUP_SIZE,
            split_buffer: SPLIT_BUFFER,
            quorum_numerator: QUORUM_NUMERATOR,
            quorum_denominator: QUORUM_DENOMINATOR,
            merge_trigger: MergeTrigger::default(),
            relocation_pick: RelocationPick::default(),
            quorum_rule: QuorumRule::default(),
            age_on_formation: true,
        }
    }
}

impl SimConfig {
    /// Qualifying members each hypothetical half needs before a split.
    pub fn split_size(&self) -> usize {
        self.group_size + self.split_buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_protocol_constants() {
        let config = SimConfig::default();
        assert_eq!(config.group_size, 8);
        assert_eq!(config.split_size(), 11);
        assert_eq!(config.quorum_numerator, 1);
        assert_eq!(config.quorum_denominator, 2);
        assert!(config.age_on_formation);
    }

    #[test]
    fn test_default_policies() {
        let config = SimConfig::default();
        assert_eq!(config.merge_trigger, MergeTrigger::ElderCount);
        assert_eq!(config.relocation_pick, RelocationPick::YoungestQualifying);
        assert_eq!(config.quorum_rule, QuorumRule::VoteCount);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = SimConfig {
            quorum_rule: QuorumRule::AgeWeighted,
            age_on_formation: false,
            ..SimConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
