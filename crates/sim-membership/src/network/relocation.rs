//! # Relocation Protocol
//!
//! Moving an elected vault to a neighbouring section: pick the
//! destination among the prefixes reachable by flipping one home-prefix
//! bit, extract the vault (merging if the departure demands it), rename
//! and age it, and re-insert it (splitting if the arrival demands it).

use tracing::warn;

use sim_xor_space::{Address, Prefix, XorDistance, ADDRESS_BITS};

use crate::domain::{MembershipError, Section};

use super::Network;

/// Re-insertion and removal recurse back into the network; the cascade
/// cannot meaningfully exceed the trie depth.
const MAX_CASCADE_DEPTH: usize = ADDRESS_BITS;

impl Network {
    /// Relocate `candidate` out of the section at `home`.
    pub(crate) fn relocate(
        &mut self,
        home: Prefix,
        candidate: Address,
        depth: usize,
    ) -> Result<(), MembershipError> {
        if depth >= MAX_CASCADE_DEPTH {
            warn!(depth, "relocation cascade hit the depth bound; dropped");
            return Ok(());
        }
        self.stats.total_relocations += 1;
        let destination = self.relocation_target(&home)?;
        self.stats
            .neighbourhood_hops
            .push(home.hamming_distance(&destination));
        let Some(mut vault) = self.remove_vault_inner(home, candidate, depth + 1)? else {
            warn!(prefix = %home, "relocation candidate left before moving");
            return Ok(());
        };
        vault.relocate_to(&mut self.rng, destination);
        vault.increment_age();
        if self.add_vault_inner(vault, depth + 1)?.is_disallowed() {
            warn!(prefix = %destination, "destination refused a relocated vault");
        }
        Ok(())
    }

    /// Choose the destination among all neighbours of `home`.
    ///
    /// Each neighbour prefix (one home bit flipped) resolves to whatever
    /// resident ancestor or descendants the trie actually holds. Shortest
    /// resident prefix wins; fewest members breaks a length tie; smallest
    /// XOR distance from the home prefix breaks the rest. The zero-length
    /// prefix has no neighbours and falls back to `home` itself.
    fn relocation_target(&self, home: &Prefix) -> Result<Prefix, MembershipError> {
        let mut best: Option<(usize, usize, XorDistance, Prefix)> = None;
        for i in 0..home.len() {
            let flipped = home.with_flipped_bit(i)?;
            for candidate in self.matching_prefixes(&flipped) {
                let members = self
                    .sections
                    .get(&candidate)
                    .map_or(0, Section::total_members);
                let key = (candidate.len(), members, home.xor_distance(&candidate));
                let better = match &best {
                    None => true,
                    Some((len, size, distance, _)) => key < (*len, *size, *distance),
                };
                if better {
                    best = Some((key.0, key.1, key.2, candidate));
                }
            }
        }
        Ok(best.map_or(*home, |(_, _, _, prefix)| prefix))
    }
}
