//! # Sections
//!
//! A section is the set of vaults whose address matches one resident
//! prefix. It elects elders, refuses suspicious joins, decides when to
//! split or merge, reports its attack status, and nominates members for
//! relocation. The network applies the state changes a section returns;
//! the section itself never touches the trie.

use rand::Rng;
use tracing::warn;

use sim_xor_space::{Address, Prefix};

use crate::config::SimConfig;

use super::errors::MembershipError;
use super::event::{EventHash, SectionUpdate};
use super::vault::{cmp_eldership, Vault};
use crate::config::RelocationPick;

/// The set of vaults sharing a resident prefix.
#[derive(Debug)]
pub struct Section {
    prefix: Prefix,
    vaults: Vec<Vault>,
    /// Sorted addresses of the current elder set, cached so membership
    /// changes can detect when the set actually changed.
    elder_cache: Vec<Address>,
}

impl Section {
    /// Construct a section at `prefix` from existing vaults.
    ///
    /// Applies the ageing-on-formation policy, then splits recursively if
    /// the membership already warrants it, so the result is one or more
    /// leaf sections ready for installation.
    pub fn build(
        prefix: Prefix,
        mut vaults: Vec<Vault>,
        config: &SimConfig,
    ) -> Result<Vec<Section>, MembershipError> {
        for vault in &mut vaults {
            if !prefix.matches(&vault.address) {
                return Err(MembershipError::MemberOutsidePrefix {
                    prefix,
                    address: vault.address,
                });
            }
            if config.age_on_formation {
                vault.increment_age();
            }
            vault.set_prefix(prefix);
        }
        let mut section = Section {
            prefix,
            vaults,
            elder_cache: Vec::new(),
        };
        section.refresh_elders(config);
        if section.split_eligible(config) {
            section.split(config)
        } else {
            Ok(vec![section])
        }
    }

    /// The section's resident prefix.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    /// Current members.
    pub fn members(&self) -> &[Vault] {
        &self.vaults
    }

    /// Number of members.
    pub fn total_members(&self) -> usize {
        self.vaults.len()
    }

    /// Number of adult members.
    pub fn total_adults(&self) -> usize {
        self.vaults.iter().filter(|v| v.is_adult()).count()
    }

    /// Number of elders.
    pub fn total_elders(&self, config: &SimConfig) -> usize {
        self.elders(config).len()
    }

    /// Consume the section, yielding its members for a merge.
    pub(crate) fn into_vaults(self) -> Vec<Vault> {
        self.vaults
    }

    /// The elder set: the `group_size` oldest members, extended past the
    /// cut when members at the boundary share an exact age. Equal ages are
    /// ordered by address (see [`cmp_eldership`]).
    pub fn elders(&self, config: &SimConfig) -> Vec<&Vault> {
        let mut sorted: Vec<&Vault> = self.vaults.iter().collect();
        sorted.sort_by(|a, b| cmp_eldership(a, b));
        if sorted.len() > config.group_size {
            let boundary_age = sorted[config.group_size - 1].age;
            let mut cut = config.group_size;
            while cut < sorted.len() && sorted[cut].age == boundary_age {
                cut += 1;
            }
            sorted.truncate(cut);
        }
        sorted
    }

    /// Recompute the elder cache. Returns true when the elder set (by
    /// membership or size) differs from the previous one, which is what
    /// makes a membership change relocation-eligible.
    fn refresh_elders(&mut self, config: &SimConfig) -> bool {
        let mut fresh: Vec<Address> = self
            .elders(config)
            .iter()
            .map(|v| v.address)
            .collect();
        fresh.sort();
        if fresh == self.elder_cache {
            false
        } else {
            self.elder_cache = fresh;
            true
        }
    }

    /// True when any member is still age 1.
    pub fn has_infant(&self) -> bool {
        self.vaults.iter().any(|v| v.is_infant())
    }

    /// A section is complete once it holds a full group of adults.
    pub fn is_complete(&self, config: &SimConfig) -> bool {
        self.total_adults() >= config.group_size
    }

    /// Admit a vault, or refuse it under the age-1 guard.
    ///
    /// A complete section refuses a second age-1 member in one step; this
    /// keeps an attacker from flooding a mature section with fresh
    /// identities. On a split the section hands back replacement leaves
    /// and must be discarded by the caller.
    pub fn add_vault<R: Rng + ?Sized>(
        &mut self,
        mut vault: Vault,
        config: &SimConfig,
        rng: &mut R,
    ) -> Result<SectionUpdate, MembershipError> {
        if vault.is_infant() && self.has_infant() && self.is_complete(config) {
            return Ok(SectionUpdate::Refused);
        }
        if !self.prefix.matches(&vault.address) {
            return Err(MembershipError::MemberOutsidePrefix {
                prefix: self.prefix,
                address: vault.address,
            });
        }
        vault.set_prefix(self.prefix);
        self.vaults.push(vault);
        if self.split_eligible(config) {
            let vaults = std::mem::take(&mut self.vaults);
            return Section {
                prefix: self.prefix,
                vaults,
                elder_cache: Vec::new(),
            }
            .split(config)
            .map(SectionUpdate::Split);
        }
        let relocation = self.after_membership_change(config, rng);
        Ok(SectionUpdate::Settled { relocation })
    }

    /// Remove the member at `address`, if present, and report a relocation
    /// candidate when the departure changed the elder set. Merge
    /// evaluation stays with the network, which can see the siblings.
    pub fn remove_vault<R: Rng + ?Sized>(
        &mut self,
        address: &Address,
        config: &SimConfig,
        rng: &mut R,
    ) -> (Option<Vault>, Option<Address>) {
        let Some(index) = self.vaults.iter().position(|v| v.address == *address) else {
            return (None, None);
        };
        let removed = self.vaults.swap_remove(index);
        let relocation = self.after_membership_change(config, rng);
        (Some(removed), relocation)
    }

    /// Elder recomputation and relocation gating shared by joins and
    /// departures: only an elder-set change constitutes an event, and only
    /// an event draws a hash.
    fn after_membership_change<R: Rng + ?Sized>(
        &mut self,
        config: &SimConfig,
        rng: &mut R,
    ) -> Option<Address> {
        if !self.refresh_elders(config) {
            return None;
        }
        let hash = EventHash::random(rng);
        self.relocation_candidate(&hash, config)
    }

    /// Hypothetical halves of this section under its extended prefixes.
    /// `None` when the prefix cannot be extended further.
    fn halves(&self) -> Option<(Prefix, Prefix)> {
        let left = self.prefix.extend_left().ok()?;
        let right = self.prefix.extend_right().ok()?;
        Some((left, right))
    }

    /// The split test: both hypothetical halves need `split_size`
    /// qualifying members. Adults qualify; if the adult test fails, elders
    /// are counted instead so a nascent network whose elders are still
    /// infants can split at all.
    pub fn split_eligible(&self, config: &SimConfig) -> bool {
        let Some((left, right)) = self.halves() else {
            return false;
        };
        let split_size = config.split_size();
        let adults = |p: &Prefix| {
            self.vaults
                .iter()
                .filter(|v| v.is_adult() && p.matches(&v.address))
                .count()
        };
        if adults(&left) >= split_size && adults(&right) >= split_size {
            return true;
        }
        let elders = self.elders(config);
        let elder_side = |p: &Prefix| elders.iter().filter(|v| p.matches(&v.address)).count();
        elder_side(&left) >= split_size && elder_side(&right) >= split_size
    }

    /// Partition members across the extended prefixes and build both
    /// children, recursing while they remain split-eligible.
    fn split(self, config: &SimConfig) -> Result<Vec<Section>, MembershipError> {
        // split_eligible already proved the prefix extends
        let left_prefix = self.prefix.extend_left()?;
        let right_prefix = self.prefix.extend_right()?;
        let mut left = Vec::new();
        let mut right = Vec::new();
        for vault in self.vaults {
            if left_prefix.matches(&vault.address) {
                left.push(vault);
            } else {
                right.push(vault);
            }
        }
        let mut leaves = Section::build(left_prefix, left, config)?;
        leaves.extend(Section::build(right_prefix, right, config)?);
        Ok(leaves)
    }

    /// The merge test: the configured member count fell below the group
    /// size. Whether a merge is possible at all is the network's call.
    pub fn should_merge(&self, config: &SimConfig) -> bool {
        use crate::config::MergeTrigger;
        let count = match config.merge_trigger {
            MergeTrigger::ElderCount => self.total_elders(config),
            MergeTrigger::AdultCount => self.total_adults(),
        };
        count < config.group_size
    }

    /// Relocation candidate selection for one event hash.
    ///
    /// Members qualify when `H mod 2^age == 0`. Among qualifiers the
    /// configured convention picks the youngest (default) or oldest age,
    /// and exact-age ties go to the member XOR-closest to the hash.
    pub fn relocation_candidate(
        &self,
        hash: &EventHash,
        config: &SimConfig,
    ) -> Option<Address> {
        let qualifying = self.vaults.iter().filter(|v| hash.qualifies(v.age));
        let picked = match config.relocation_pick {
            RelocationPick::YoungestQualifying => {
                qualifying.min_by_key(|v| (v.age, hash.distance_to(&v.address)))
            }
            RelocationPick::OldestQualifying => {
                qualifying.max_by_key(|v| (v.age, std::cmp::Reverse(hash.distance_to(&v.address))))
            }
        };
        picked.map(|v| v.address)
    }

    /// The attack quorum test: strictly more than half of elder votes are
    /// attacker-controlled. The age-weighted convention additionally
    /// requires attackers to hold a strict majority of summed elder age.
    pub fn is_attacked(&self, config: &SimConfig) -> bool {
        use crate::config::QuorumRule;
        let elders = self.elders(config);
        let voters = elders.len();
        let attacking_votes = elders.iter().filter(|v| v.is_attacker).count();
        let vote_quorum =
            attacking_votes * config.quorum_denominator > voters * config.quorum_numerator;
        match config.quorum_rule {
            QuorumRule::VoteCount => vote_quorum,
            QuorumRule::AgeWeighted => {
                let total_age: u64 = elders.iter().map(|v| u64::from(v.age)).sum();
                let attacking_age: u64 = elders
                    .iter()
                    .filter(|v| v.is_attacker)
                    .map(|v| u64::from(v.age))
                    .sum();
                vote_quorum
                    && attacking_age * config.quorum_denominator as u64
                        > total_age * config.quorum_numerator as u64
            }
        }
    }

    /// Draw a uniformly random member.
    pub fn random_vault<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Vault> {
        if self.vaults.is_empty() {
            warn!(prefix = %self.prefix, "random vault draw on empty section");
            return None;
        }
        let index = rng.gen_range(0..self.vaults.len());
        self.vaults.get(index)
    }
}
