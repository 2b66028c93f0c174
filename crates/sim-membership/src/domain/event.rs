//! # Membership Events
//!
//! Value objects produced by membership changes: the pseudo-random event
//! hash that drives relocation, and the outcomes a section reports back to
//! the network.

use primitive_types::U256;
use rand::Rng;
use serde::{Deserialize, Serialize};

use sim_xor_space::{Address, XorDistance};

use super::section::Section;

/// A pseudo-randomly generated 256-bit "block hash".
///
/// One is drawn whenever a membership change alters a section's elder set;
/// it decides whether a relocation happens and which member moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventHash(U256);

impl EventHash {
    /// Draw a fresh event hash from the generator.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        Self(U256::from_big_endian(&bytes))
    }

    /// Construct an event hash from a raw value.
    pub fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// The relocation test: `H mod 2^age == 0`.
    ///
    /// Equivalent to the hash carrying at least `age` trailing zero bits,
    /// so a member of age `a` qualifies with probability `2^-a`.
    pub fn qualifies(&self, age: u32) -> bool {
        if self.0.is_zero() {
            return true;
        }
        self.0.trailing_zeros() >= age
    }

    /// XOR distance between the hash and a member's address, used to break
    /// ties among equal-age qualifying members.
    pub fn distance_to(&self, addr: &Address) -> XorDistance {
        XorDistance::between(self.0, addr.raw())
    }
}

/// Result of delegating a join to a section, as seen by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinOutcome {
    /// The vault was admitted.
    Joined,
    /// The age-1 join guard refused the vault; regenerate and retry.
    Disallowed,
}

impl JoinOutcome {
    /// True when the join was refused.
    pub fn is_disallowed(&self) -> bool {
        matches!(self, JoinOutcome::Disallowed)
    }
}

/// State change a section hands back to the network after a join.
#[derive(Debug)]
pub enum SectionUpdate {
    /// The age-1 join guard refused the vault; nothing was mutated.
    Refused,
    /// The section split; install these leaf sections and discard the
    /// original. Splits can cascade, so more than two leaves may appear.
    Split(Vec<Section>),
    /// The section absorbed the change in place, possibly electing a
    /// relocation candidate.
    Settled {
        /// Member chosen for relocation by the event hash, if any.
        relocation: Option<Address>,
    },
}
