//! # Network Orchestration
//!
//! The global registry mapping resident prefixes to sections. The network
//! routes vaults to sections by trie walk, installs the state changes
//! sections return (split leaves, merge unions), runs the relocation
//! protocol, and keeps the run's counters.
//!
//! Cross-references between sections are always canonical prefix keys
//! resolved against the registry on demand; no section holds a direct
//! reference to another.

mod relocation;
mod routing;
mod stats;

pub use stats::NetworkStats;

use std::collections::{BTreeMap, HashMap};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use sim_xor_space::{Address, Prefix};

use crate::config::SimConfig;
use crate::domain::{JoinOutcome, MembershipError, Section, SectionUpdate, Vault};

/// The simulated network: a prefix trie of sections plus run statistics.
///
/// Fully deterministic given a seed; the single generator owned here
/// drives every address, event hash and random draw of the run.
#[derive(Debug)]
pub struct Network {
    sections: HashMap<Prefix, Section>,
    rng: StdRng,
    config: SimConfig,
    stats: NetworkStats,
}

impl Network {
    /// Create an empty network seeded for a reproducible run.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_config(seed, SimConfig::default())
    }

    /// Create an empty network with explicit policies.
    pub fn with_config(seed: u64, config: SimConfig) -> Self {
        Self {
            sections: HashMap::new(),
            rng: StdRng::seed_from_u64(seed),
            config,
            stats: NetworkStats::default(),
        }
    }

    /// Create a fresh vault named by the network's own generator.
    pub fn spawn_vault(&mut self) -> Vault {
        Vault::new(&mut self.rng)
    }

    /// Create a fresh attacker-flagged vault.
    pub fn spawn_attacker(&mut self) -> Vault {
        Vault::new_attacker(&mut self.rng)
    }

    /// Route a vault to its section and admit it, applying any resulting
    /// split and relocation cascade.
    ///
    /// `Disallowed` means the age-1 guard refused the join; regenerate the
    /// vault and retry.
    pub fn add_vault(&mut self, vault: Vault) -> Result<JoinOutcome, MembershipError> {
        self.add_vault_inner(vault, 0)
    }

    /// Remove a vault, applying any resulting merge and relocation
    /// cascade. A stale reference (no section at the vault's prefix, or
    /// the vault missing from it) is a warning and the call is a no-op.
    pub fn remove_vault(&mut self, vault: &Vault) -> Result<(), MembershipError> {
        self.remove_vault_inner(vault.prefix, vault.address, 0)
            .map(|_| ())
    }

    pub(crate) fn add_vault_inner(
        &mut self,
        vault: Vault,
        depth: usize,
    ) -> Result<JoinOutcome, MembershipError> {
        self.stats.total_joins += 1;
        if self.sections.is_empty() {
            for section in Section::build(Prefix::root(), Vec::new(), &self.config)? {
                self.sections.insert(*section.prefix(), section);
            }
        }
        let Some(resident) = self.resolve_prefix(&vault.address) else {
            warn!(address = ?vault.address, "no resident prefix for joining vault");
            self.stats.disallowed_joins += 1;
            return Ok(JoinOutcome::Disallowed);
        };
        let Some(section) = self.sections.get_mut(&resident) else {
            warn!(prefix = %resident, "resolved prefix has no section");
            self.stats.disallowed_joins += 1;
            return Ok(JoinOutcome::Disallowed);
        };
        match section.add_vault(vault, &self.config, &mut self.rng)? {
            SectionUpdate::Refused => {
                self.stats.disallowed_joins += 1;
                Ok(JoinOutcome::Disallowed)
            }
            SectionUpdate::Split(leaves) => {
                debug!(prefix = %resident, leaves = leaves.len(), "section split");
                self.stats.total_splits += leaves.len() as u64 - 1;
                self.sections.remove(&resident);
                for leaf in leaves {
                    self.sections.insert(*leaf.prefix(), leaf);
                }
                Ok(JoinOutcome::Joined)
            }
            SectionUpdate::Settled { relocation } => {
                if let Some(candidate) = relocation {
                    self.relocate(resident, candidate, depth)?;
                }
                Ok(JoinOutcome::Joined)
            }
        }
    }

    pub(crate) fn remove_vault_inner(
        &mut self,
        home: Prefix,
        address: Address,
        depth: usize,
    ) -> Result<Option<Vault>, MembershipError> {
        self.stats.total_departures += 1;
        let Some(section) = self.sections.get_mut(&home) else {
            warn!(prefix = %home, "no section for departing vault");
            return Ok(None);
        };
        let (removed, relocation) = section.remove_vault(&address, &self.config, &mut self.rng);
        if removed.is_none() {
            warn!(prefix = %home, address = ?address, "departing vault not found in its section");
            return Ok(None);
        }
        let merge_wanted = section.should_merge(&self.config);
        if merge_wanted && self.sections.len() > 1 {
            self.stats.total_merges += 1;
            self.merge(home)?;
        } else if let Some(candidate) = relocation {
            self.relocate(home, candidate, depth)?;
        }
        Ok(removed)
    }

    /// Merge the section at `prefix` with its sibling subtree into their
    /// parent. If the exact sibling is not resident, the sibling's
    /// resident descendants contribute instead. The merged section may
    /// immediately re-split if the union is large enough.
    fn merge(&mut self, prefix: Prefix) -> Result<(), MembershipError> {
        let parent = prefix.parent()?;
        let sibling = prefix.sibling()?;
        debug!(%prefix, %parent, "merging into parent");
        let mut pool = match self.sections.remove(&prefix) {
            Some(section) => section.into_vaults(),
            None => {
                warn!(%prefix, "merging section vanished from the trie");
                Vec::new()
            }
        };
        if let Some(section) = self.sections.remove(&sibling) {
            pool.extend(section.into_vaults());
        } else {
            for child in self.descendant_prefixes(&sibling) {
                if let Some(section) = self.sections.remove(&child) {
                    pool.extend(section.into_vaults());
                }
            }
        }
        let leaves = Section::build(parent, pool, &self.config)?;
        if leaves.len() > 1 {
            self.stats.total_splits += leaves.len() as u64 - 1;
        }
        for leaf in leaves {
            self.sections.insert(*leaf.prefix(), leaf);
        }
        Ok(())
    }

    /// Resolve a random address to its section.
    ///
    /// Approximates uniform selection over sections: subtrees are sampled
    /// by their address-space share, not their vault count. `None` on an
    /// empty network.
    pub fn get_random_section(&mut self) -> Option<&Section> {
        let addr = Address::random(&mut self.rng);
        let prefix = self.resolve_prefix(&addr)?;
        self.sections.get(&prefix)
    }

    /// Draw a uniformly random member of a randomly resolved section.
    /// `None` on an empty network.
    pub fn get_random_vault(&mut self) -> Option<Vault> {
        let addr = Address::random(&mut self.rng);
        let prefix = self.resolve_prefix(&addr)?;
        let section = self.sections.get(&prefix)?;
        section.random_vault(&mut self.rng).cloned()
    }

    /// Total vaults across all sections.
    pub fn total_vaults(&self) -> usize {
        self.sections.values().map(Section::total_members).sum()
    }

    /// Number of resident sections.
    pub fn total_sections(&self) -> usize {
        self.sections.len()
    }

    /// Number of sections currently failing the attack quorum test.
    pub fn total_attacked_sections(&self) -> usize {
        let config = self.config;
        self.sections
            .values()
            .filter(|s| s.is_attacked(&config))
            .count()
    }

    /// Read-only iteration over resident sections, for reporting.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    /// The section at a resident prefix, if any.
    pub fn section(&self, prefix: &Prefix) -> Option<&Section> {
        self.sections.get(prefix)
    }

    /// The resident prefixes, in no particular order.
    pub fn resident_prefixes(&self) -> Vec<Prefix> {
        self.sections.keys().copied().collect()
    }

    /// Vault count per age, sorted by age.
    pub fn age_histogram(&self) -> BTreeMap<u32, u64> {
        let mut histogram = BTreeMap::new();
        for section in self.sections.values() {
            for vault in section.members() {
                *histogram.entry(vault.age).or_insert(0) += 1;
            }
        }
        histogram
    }

    /// Section count per adult count, sorted.
    pub fn adult_histogram(&self) -> BTreeMap<usize, u64> {
        let mut histogram = BTreeMap::new();
        for section in self.sections.values() {
            *histogram.entry(section.total_adults()).or_insert(0) += 1;
        }
        histogram
    }

    /// Counters for this run.
    pub fn stats(&self) -> &NetworkStats {
        &self.stats
    }

    /// The run's policy configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}
