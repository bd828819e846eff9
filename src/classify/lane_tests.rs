//! Tests for lane classification and partitioning.

use super::{LANE_RULES, Lane, Lanes, Satellite, classify};
use crate::inventory::InventoryNode;

fn node(name: &str, tags: &[&str]) -> InventoryNode {
    InventoryNode::new(name).with_tags(tags.iter().copied())
}

mod precedence {
    use super::*;

    #[test]
    fn each_rule_in_isolation() {
        assert_eq!(classify(&node("a", &["icinga2-client"])), Lane::IcingaClient);
        assert_eq!(classify(&node("b", &["nrpe-client"])), Lane::NrpeClient);
        assert_eq!(classify(&node("c", &["nrpe-windows"])), Lane::NrpeWindows);
        assert_eq!(
            classify(&node("d", &["icinga2-windows"])),
            Lane::IcingaWindows
        );
    }

    #[test]
    fn icinga_client_wins_over_nrpe_client() {
        let both = node("a", &["nrpe-client", "icinga2-client"]);
        assert_eq!(classify(&both), Lane::IcingaClient);
    }

    #[test]
    fn nrpe_windows_wins_over_icinga_windows() {
        let both = node("a", &["icinga2-windows", "nrpe-windows"]);
        assert_eq!(classify(&both), Lane::NrpeWindows);
    }

    #[test]
    fn every_pair_resolves_to_the_higher_ranked_rule() {
        for (i, high) in LANE_RULES.iter().enumerate() {
            for low in &LANE_RULES[i + 1..] {
                let n = node("pair", &[low.tag, high.tag]);
                assert_eq!(classify(&n), high.outcome, "{} vs {}", high.tag, low.tag);
            }
        }
    }

    #[test]
    fn all_lane_tags_resolve_to_icinga_client() {
        let all: Vec<_> = LANE_RULES.iter().map(|r| r.tag).collect();
        assert_eq!(classify(&node("a", &all)), Lane::IcingaClient);
    }

    #[test]
    fn unrelated_tags_fall_back_to_undefined_default() {
        assert_eq!(
            classify(&node("a", &["icinga2", "kvm", "mdadm"])),
            Lane::UndefinedDefault
        );
        assert_eq!(classify(&node("b", &[])), Lane::UndefinedDefault);
    }

    #[test]
    fn tag_match_is_exact() {
        assert_eq!(
            classify(&node("a", &["icinga2-client-old", "nrpe"])),
            Lane::UndefinedDefault
        );
    }
}

mod routing {
    use super::*;

    #[test]
    fn satellites_per_lane() {
        assert_eq!(Lane::IcingaClient.satellite(), Satellite::Icinga);
        assert_eq!(Lane::IcingaWindows.satellite(), Satellite::Icinga);
        assert_eq!(Lane::UndefinedDefault.satellite(), Satellite::Icinga);
        assert_eq!(Lane::NrpeClient.satellite(), Satellite::Nrpe);
        assert_eq!(Lane::NrpeWindows.satellite(), Satellite::Nrpe);
    }

    #[test]
    fn only_native_agent_lanes_get_zone_files() {
        let zoned: Vec<_> = Lane::ALL
            .into_iter()
            .filter(|lane| lane.has_zone_file())
            .collect();

        assert_eq!(zoned, vec![Lane::IcingaClient, Lane::IcingaWindows]);
    }

    #[test]
    fn zone_lanes_live_on_the_icinga_satellite() {
        for lane in Lane::ALL.into_iter().filter(|l| l.has_zone_file()) {
            assert_eq!(lane.satellite(), Satellite::Icinga);
        }
    }
}

mod partition {
    use super::*;

    fn sample() -> Vec<InventoryNode> {
        vec![
            node("web01.example.com", &["icinga2-client"]),
            node("db01.example.com", &["nrpe-client"]),
            node("win01.example.com", &["nrpe-windows"]),
            node("win02.example.com", &["icinga2-windows"]),
            node("switch01.example.com", &[]),
            node("web02.example.com", &["icinga2-client", "kvm"]),
        ]
    }

    #[test]
    fn every_node_lands_in_exactly_one_lane() {
        let input = sample();
        let lanes = Lanes::partition(input.clone());

        assert_eq!(lanes.len(), input.len());
        for n in &input {
            let hits = Lane::ALL
                .into_iter()
                .filter(|&lane| lanes.get(lane).iter().any(|m| m.name == n.name))
                .count();
            assert_eq!(hits, 1, "{} appears in {hits} lanes", n.name);
        }
    }

    #[test]
    fn input_order_is_kept_within_a_lane() {
        let lanes = Lanes::partition(sample());
        let names: Vec<_> = lanes
            .get(Lane::IcingaClient)
            .iter()
            .map(|n| n.name.as_str())
            .collect();

        assert_eq!(names, vec!["web01.example.com", "web02.example.com"]);
    }

    #[test]
    fn counts_follow_lane_order() {
        let lanes = Lanes::partition(sample());

        assert_eq!(
            lanes.counts(),
            [
                (Lane::IcingaClient, 2),
                (Lane::NrpeClient, 1),
                (Lane::NrpeWindows, 1),
                (Lane::IcingaWindows, 1),
                (Lane::UndefinedDefault, 1),
            ]
        );
    }

    #[test]
    fn lane_of_finds_assignment() {
        let lanes = Lanes::partition(sample());

        assert_eq!(
            lanes.lane_of("switch01.example.com"),
            Some(Lane::UndefinedDefault)
        );
        assert_eq!(lanes.lane_of("missing"), None);
    }

    #[test]
    fn empty_input_gives_empty_lanes() {
        let lanes = Lanes::partition(Vec::new());

        assert!(lanes.is_empty());
        assert_eq!(lanes.len(), 0);
    }
}

#[test]
fn lane_display_uses_tag_names() {
    assert_eq!(Lane::IcingaClient.to_string(), "icinga2-client");
    assert_eq!(Lane::UndefinedDefault.to_string(), "undefined-default");
    assert_eq!(Satellite::Nrpe.to_string(), "nrpe");
}
