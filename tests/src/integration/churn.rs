//! # Churn Scenarios
//!
//! Grow a network well past its first splits, shrink it back down, and
//! prove the trie partition, prefix-membership, and elder-floor
//! invariants hold at every interesting point.

#[cfg(test)]
mod tests {
    use sim_membership::{
        invariant_elder_floor, invariant_members_match_prefix, invariant_trie_partition, Network,
    };

    fn grow(network: &mut Network, joins: usize) {
        for _ in 0..joins {
            let vault = network.spawn_vault();
            network.add_vault(vault).unwrap();
        }
    }

    fn shrink_to(network: &mut Network, floor: usize) {
        while network.total_vaults() > floor {
            let Some(vault) = network.get_random_vault() else {
                break;
            };
            network.remove_vault(&vault).unwrap();
        }
    }

    fn assert_invariants(network: &Network) {
        invariant_trie_partition(&network.resident_prefixes()).unwrap();
        for section in network.sections() {
            invariant_members_match_prefix(section).unwrap();
            invariant_elder_floor(section, network.config()).unwrap();
            assert!(
                !section.split_eligible(network.config()),
                "section {} left split-eligible",
                section.prefix()
            );
        }
    }

    #[test]
    fn test_sustained_growth_forms_a_partitioned_trie() {
        let mut network = Network::from_seed(0);
        grow(&mut network, 1500);
        assert!(
            network.total_sections() > 2,
            "only {} sections after 1500 joins",
            network.total_sections()
        );
        assert!(network.stats().total_splits >= 2);
        assert_invariants(&network);
    }

    #[test]
    fn test_invariants_hold_throughout_growth() {
        let mut network = Network::from_seed(100);
        for _ in 0..20 {
            grow(&mut network, 50);
            assert_invariants(&network);
        }
    }

    #[test]
    fn test_decay_merges_back_to_a_single_section() {
        let mut network = Network::from_seed(2);
        grow(&mut network, 1500);
        let grown_sections = network.total_sections();
        assert!(grown_sections > 1);

        shrink_to(&mut network, 10);
        assert_invariants(&network);
        // Two sections need at least eight elders each to avoid merging.
        assert_eq!(network.total_sections(), 1);
        assert!(network.stats().total_merges >= 1);
    }

    #[test]
    fn test_decay_to_empty_is_clean() {
        let mut network = Network::from_seed(8);
        grow(&mut network, 100);
        shrink_to(&mut network, 0);
        assert_eq!(network.total_vaults(), 0);
        assert!(network.get_random_vault().is_none());
    }

    #[test]
    fn test_interleaved_churn_preserves_invariants() {
        let mut network = Network::from_seed(77);
        for round in 0..30 {
            grow(&mut network, 40);
            let target = network.total_vaults().saturating_sub(20);
            shrink_to(&mut network, target);
            if round % 5 == 0 {
                assert_invariants(&network);
            }
        }
        assert_invariants(&network);
        let stats = network.stats();
        assert_eq!(stats.neighbourhood_hops.len() as u64, stats.total_relocations);
    }

    #[test]
    fn test_relocations_age_the_population() {
        let mut network = Network::from_seed(4);
        grow(&mut network, 800);
        let histogram = network.age_histogram();
        assert!(
            histogram.keys().any(|&age| age > 1),
            "no vault ever aged past 1"
        );
        let total: u64 = histogram.values().sum();
        assert_eq!(total, network.total_vaults() as u64);
    }
}
