//! # Vaults
//!
//! A vault is one simulated network participant: a random 256-bit address,
//! the prefix of the section it currently belongs to, an age that only ever
//! grows, and an attacker flag fixed at creation.

use std::cmp::Ordering;

use rand::Rng;
use serde::{Deserialize, Serialize};

use sim_xor_space::{Address, Prefix};

/// Age assigned to a freshly created vault.
pub const INFANT_AGE: u32 = 1;

/// A vault is an adult once its age exceeds this threshold.
pub const ADULT_AGE_THRESHOLD: u32 = 4;

/// Life stage of a vault, derived from its age.
///
/// Eldership is a transient overlay recomputed per section membership
/// change, not a stage of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeStage {
    /// Age 1, just joined.
    Infant,
    /// Age 2..=4, relocated at least once.
    Growing,
    /// Age above 4, counts toward split/merge thresholds.
    Adult,
}

/// A simulated network participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    /// Current 256-bit name.
    pub address: Address,
    /// Prefix of the owning section. Matches `address` at all times except
    /// the instant of relocation reassignment.
    pub prefix: Prefix,
    /// Relocation count plus one. Never decreases.
    pub age: u32,
    /// Fixed at creation; attacker-flagged elders count toward the quorum
    /// attack test.
    pub is_attacker: bool,
}

impl Vault {
    /// Create a vault with a random address, age 1 and no section assigned.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            address: Address::random(rng),
            prefix: Prefix::root(),
            age: INFANT_AGE,
            is_attacker: false,
        }
    }

    /// Create an attacker-flagged vault.
    pub fn new_attacker<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            is_attacker: true,
            ..Self::new(rng)
        }
    }

    /// Increment the vault's age by exactly one. No ceiling.
    pub fn increment_age(&mut self) {
        self.age += 1;
    }

    /// True once the age exceeds the adult threshold.
    pub fn is_adult(&self) -> bool {
        self.age > ADULT_AGE_THRESHOLD
    }

    /// True at age 1, before any relocation.
    pub fn is_infant(&self) -> bool {
        self.age == INFANT_AGE
    }

    /// Current life stage.
    pub fn life_stage(&self) -> LifeStage {
        if self.is_infant() {
            LifeStage::Infant
        } else if self.is_adult() {
            LifeStage::Adult
        } else {
            LifeStage::Growing
        }
    }

    /// Record the owning section's prefix.
    pub(crate) fn set_prefix(&mut self, prefix: Prefix) {
        self.prefix = prefix;
    }

    /// Replace address and prefix atomically for a relocation: a fresh
    /// random name with the destination prefix overlaid.
    pub(crate) fn relocate_to<R: Rng + ?Sized>(&mut self, rng: &mut R, destination: Prefix) {
        self.address = destination.overlay(&Address::random(rng));
        self.prefix = destination;
    }
}

/// Eldership ordering: oldest first, equal ages ordered by address.
///
/// The lineage breaks age ties by XOR-combining the two tied names and
/// comparing each name's distance to the combination; that reduces to plain
/// address order, which is what we implement.
pub fn cmp_eldership(a: &Vault, b: &Vault) -> Ordering {
    b.age
        .cmp(&a.age)
        .then_with(|| a.address.cmp(&b.address))
}
