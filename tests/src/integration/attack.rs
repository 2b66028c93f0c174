//! # Attack Scenarios
//!
//! Join attacks against the elder quorum. The defense under test is
//! ageing: fresh attacker identities enter at age 1 and cannot displace
//! older honest elders, however many of them arrive.

#[cfg(test)]
mod tests {
    use primitive_types::U256;
    use sim_membership::{invariant_trie_partition, Network, Section, SimConfig, Vault};
    use sim_xor_space::{Address, Prefix};

    fn handcrafted(salt: u64, age: u32, is_attacker: bool) -> Vault {
        Vault {
            address: Address::from_raw(U256::from(salt) << 128),
            prefix: Prefix::root(),
            age,
            is_attacker,
        }
    }

    fn static_config() -> SimConfig {
        SimConfig {
            age_on_formation: false,
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_pure_attacker_network_is_fully_captured() {
        let mut network = Network::from_seed(666);
        for _ in 0..500 {
            let attacker = network.spawn_attacker();
            network.add_vault(attacker).unwrap();
        }
        assert!(network.total_sections() > 1);
        assert_eq!(network.total_attacked_sections(), network.total_sections());
    }

    #[test]
    fn test_member_majority_without_elder_majority_is_not_an_attack() {
        let config = static_config();
        // Twelve young attackers against eight old honest vaults: the
        // attackers hold the member majority but none of the elderships.
        let mut members: Vec<Vault> = (0..12).map(|i| handcrafted(i, 2, true)).collect();
        members.extend((0..8).map(|i| handcrafted(100 + i, 9, false)));
        let sections = Section::build(Prefix::root(), members, &config).unwrap();
        assert_eq!(sections.len(), 1);
        assert!(!sections[0].is_attacked(&config));
    }

    #[test]
    fn test_aged_attacker_majority_is_an_attack() {
        let config = static_config();
        let mut members: Vec<Vault> = (0..5).map(|i| handcrafted(i, 9, true)).collect();
        members.extend((0..3).map(|i| handcrafted(100 + i, 9, false)));
        let sections = Section::build(Prefix::root(), members, &config).unwrap();
        assert!(sections[0].is_attacked(&config));
    }

    #[test]
    fn test_quorum_is_monotone_in_attacker_elders() {
        let config = static_config();
        let mut previous = false;
        // Eight equal-age elders; converting honest elders to attackers one
        // at a time can only ever switch the verdict from false to true.
        for attackers in 0..=8u64 {
            let mut members: Vec<Vault> =
                (0..attackers).map(|i| handcrafted(i, 9, true)).collect();
            members.extend((attackers..8).map(|i| handcrafted(i, 9, false)));
            let sections = Section::build(Prefix::root(), members, &config).unwrap();
            let attacked = sections[0].is_attacked(&config);
            assert!(attacked >= previous, "verdict regressed at {attackers} attackers");
            previous = attacked;
        }
        assert!(previous);
    }

    #[test]
    fn test_attacker_flood_against_an_established_network() {
        let mut network = Network::from_seed(31);
        for _ in 0..800 {
            let vault = network.spawn_vault();
            network.add_vault(vault).unwrap();
        }
        assert_eq!(network.total_attacked_sections(), 0);

        for _ in 0..800 {
            let attacker = network.spawn_attacker();
            network.add_vault(attacker).unwrap();
        }
        invariant_trie_partition(&network.resident_prefixes()).unwrap();

        // Attack status must agree with a direct elder head-count.
        let config = *network.config();
        for section in network.sections() {
            let elders = section.elders(&config);
            let attacking = elders.iter().filter(|v| v.is_attacker).count();
            assert_eq!(
                section.is_attacked(&config),
                attacking * config.quorum_denominator > elders.len() * config.quorum_numerator,
            );
        }
    }
}
