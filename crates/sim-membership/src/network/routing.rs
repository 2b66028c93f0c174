//! # Trie Routing
//!
//! Resolving addresses and prefixes against the resident trie. The walk
//! starts at the zero-length prefix and extends one bit at a time, so it
//! touches at most one prefix per trie level.

use tracing::warn;

use sim_xor_space::{Address, Prefix, ADDRESS_BITS};

use super::Network;

impl Network {
    /// The resident prefix matching an address, found by extending from
    /// the root one bit at a time.
    ///
    /// `None` when no resident prefix matches; with more than one vault
    /// present that indicates a broken trie invariant and is logged.
    pub(crate) fn resolve_prefix(&self, addr: &Address) -> Option<Prefix> {
        let mut prefix = Prefix::root();
        loop {
            if self.sections.contains_key(&prefix) {
                return Some(prefix);
            }
            if prefix.len() >= ADDRESS_BITS {
                break;
            }
            match prefix.extend(addr.bit(prefix.len())) {
                Ok(next) => prefix = next,
                Err(_) => break,
            }
        }
        if self.total_vaults() > 1 {
            warn!(address = ?addr, "trie walk found no resident prefix");
        }
        None
    }

    /// The resident prefixes covering `target`'s subtree: the resident
    /// ancestor (or `target` itself) when one exists, otherwise the
    /// resident descendants. Sections at different depths may cover a
    /// neighbour's subtree after independent splits and merges.
    pub(crate) fn matching_prefixes(&self, target: &Prefix) -> Vec<Prefix> {
        let mut prefix = Prefix::root();
        loop {
            if self.sections.contains_key(&prefix) {
                return vec![prefix];
            }
            if prefix.len() >= target.len() {
                break;
            }
            let Ok(bit) = target.bit(prefix.len()) else {
                break;
            };
            let Ok(next) = prefix.extend(bit) else {
                break;
            };
            prefix = next;
        }
        self.descendant_prefixes(target)
    }

    /// Resident prefixes strictly below `target`, recursing through
    /// non-resident levels. Bounded by the address width.
    pub(crate) fn descendant_prefixes(&self, target: &Prefix) -> Vec<Prefix> {
        let mut found = Vec::new();
        let (Ok(left), Ok(right)) = (target.extend_left(), target.extend_right()) else {
            warn!(prefix = %target, "no descendants below a full-width prefix");
            return found;
        };
        match (
            self.sections.contains_key(&left),
            self.sections.contains_key(&right),
        ) {
            (true, true) => {
                found.push(left);
                found.push(right);
            }
            (true, false) => {
                found.push(left);
                found.extend(self.descendant_prefixes(&right));
            }
            (false, true) => {
                found.push(right);
                found.extend(self.descendant_prefixes(&left));
            }
            (false, false) => {
                found.extend(self.descendant_prefixes(&left));
                found.extend(self.descendant_prefixes(&right));
            }
        }
        found
    }
}
