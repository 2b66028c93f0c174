//! # Inbound Ports
//!
//! API trait defining what a simulation driver can ask of the membership
//! engine. [`Network`] is the canonical implementation; the trait lets
//! drivers and harnesses take the engine abstractly.

use sim_xor_space::Prefix;

use crate::domain::{JoinOutcome, MembershipError, Section, Vault};
use crate::network::{Network, NetworkStats};

/// Membership API - inbound port.
pub trait MembershipApi {
    /// Create a fresh vault named by the engine's generator.
    fn spawn_vault(&mut self) -> Vault;

    /// Create a fresh attacker-flagged vault.
    fn spawn_attacker(&mut self) -> Vault;

    /// Route a vault to its section and admit it, applying any resulting
    /// split and relocation cascade.
    fn add_vault(&mut self, vault: Vault) -> Result<JoinOutcome, MembershipError>;

    /// Remove a vault, applying any resulting merge and relocation
    /// cascade.
    fn remove_vault(&mut self, vault: &Vault) -> Result<(), MembershipError>;

    /// Draw a section, weighted by address-space share.
    fn get_random_section(&mut self) -> Option<&Section>;

    /// Draw a vault: a random section first, then a uniform member of it.
    fn get_random_vault(&mut self) -> Option<Vault>;

    /// The section at a resident prefix, if any.
    fn section(&self, prefix: &Prefix) -> Option<&Section>;

    /// Total vaults across all sections.
    fn total_vaults(&self) -> usize;

    /// Number of resident sections.
    fn total_sections(&self) -> usize;

    /// Counters for this run.
    fn stats(&self) -> &NetworkStats;
}

impl MembershipApi for Network {
    fn spawn_vault(&mut self) -> Vault {
        Network::spawn_vault(self)
    }

    fn spawn_attacker(&mut self) -> Vault {
        Network::spawn_attacker(self)
    }

    fn add_vault(&mut self, vault: Vault) -> Result<JoinOutcome, MembershipError> {
        Network::add_vault(self, vault)
    }

    fn remove_vault(&mut self, vault: &Vault) -> Result<(), MembershipError> {
        Network::remove_vault(self, vault)
    }

    fn get_random_section(&mut self) -> Option<&Section> {
        Network::get_random_section(self)
    }

    fn get_random_vault(&mut self) -> Option<Vault> {
        Network::get_random_vault(self)
    }

    fn section(&self, prefix: &Prefix) -> Option<&Section> {
        Network::section(self, prefix)
    }

    fn total_vaults(&self) -> usize {
        Network::total_vaults(self)
    }

    fn total_sections(&self) -> usize {
        Network::total_sections(self)
    }

    fn stats(&self) -> &NetworkStats {
        Network::stats(self)
    }
}
