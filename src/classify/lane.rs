//! Monitoring lanes and the lane precedence table.

use std::fmt;

use crate::inventory::InventoryNode;

use super::{TagRule, first_match};

/// Satellite zone role receiving a node's generated configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Satellite {
    /// Satellite running native icinga2 agents.
    Icinga,
    /// Satellite polling hosts through NRPE.
    Nrpe,
}

impl Satellite {
    /// Every satellite role, in reset order.
    pub const ALL: [Self; 2] = [Self::Icinga, Self::Nrpe];
}

impl fmt::Display for Satellite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Icinga => write!(f, "icinga2"),
            Self::Nrpe => write!(f, "nrpe"),
        }
    }
}

/// Exclusive monitoring bucket of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lane {
    /// Linux host with a native icinga2 agent.
    IcingaClient,
    /// Linux host checked through NRPE.
    NrpeClient,
    /// Windows host checked through NRPE.
    NrpeWindows,
    /// Windows host with a native icinga2 agent.
    IcingaWindows,
    /// Node without any lane tag; monitored from the icinga2 satellite.
    UndefinedDefault,
}

impl Lane {
    /// Every lane, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::IcingaClient,
        Self::NrpeClient,
        Self::NrpeWindows,
        Self::IcingaWindows,
        Self::UndefinedDefault,
    ];

    /// Satellite whose hosts tree receives this lane's host files.
    #[must_use]
    pub const fn satellite(self) -> Satellite {
        match self {
            Self::IcingaClient | Self::IcingaWindows | Self::UndefinedDefault => {
                Satellite::Icinga
            }
            Self::NrpeClient | Self::NrpeWindows => Satellite::Nrpe,
        }
    }

    /// Returns true if nodes of this lane get an agent zone file.
    ///
    /// Zones only exist for native icinga2 agents.
    #[must_use]
    pub const fn has_zone_file(self) -> bool {
        matches!(self, Self::IcingaClient | Self::IcingaWindows)
    }

    const fn index(self) -> usize {
        match self {
            Self::IcingaClient => 0,
            Self::NrpeClient => 1,
            Self::NrpeWindows => 2,
            Self::IcingaWindows => 3,
            Self::UndefinedDefault => 4,
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IcingaClient => write!(f, "icinga2-client"),
            Self::NrpeClient => write!(f, "nrpe-client"),
            Self::NrpeWindows => write!(f, "nrpe-windows"),
            Self::IcingaWindows => write!(f, "icinga2-windows"),
            Self::UndefinedDefault => write!(f, "undefined-default"),
        }
    }
}

/// Lane precedence, highest first. A node matching none is [`Lane::UndefinedDefault`].
pub const LANE_RULES: [TagRule<Lane>; 4] = [
    TagRule::new("icinga2-client", Lane::IcingaClient),
    TagRule::new("nrpe-client", Lane::NrpeClient),
    TagRule::new("nrpe-windows", Lane::NrpeWindows),
    TagRule::new("icinga2-windows", Lane::IcingaWindows),
];

/// Assigns a node to exactly one lane.
///
/// Emits a warning when no lane tag is present, since the node then
/// lacks the inventory metadata that decides how it is monitored.
#[must_use]
pub fn classify(node: &InventoryNode) -> Lane {
    first_match(&LANE_RULES, node).unwrap_or_else(|| {
        tracing::warn!(
            node = %node.name,
            "No monitoring lane tag, falling back to {}",
            Lane::UndefinedDefault
        );
        Lane::UndefinedDefault
    })
}

/// Nodes partitioned by lane, each list in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lanes {
    buckets: [Vec<InventoryNode>; 5],
}

impl Lanes {
    /// Classifies every node and partitions them by lane.
    #[must_use]
    pub fn partition(nodes: impl IntoIterator<Item = InventoryNode>) -> Self {
        let mut lanes = Self::default();
        for node in nodes {
            let lane = classify(&node);
            lanes.push(lane, node);
        }
        lanes
    }

    /// Appends a node to a lane.
    pub fn push(&mut self, lane: Lane, node: InventoryNode) {
        self.buckets[lane.index()].push(node);
    }

    /// Returns the nodes of a lane.
    #[must_use]
    pub fn get(&self, lane: Lane) -> &[InventoryNode] {
        &self.buckets[lane.index()]
    }

    /// Returns the total number of classified nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Returns true if no node was classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Returns the node count of every lane, in [`Lane::ALL`] order.
    #[must_use]
    pub fn counts(&self) -> [(Lane, usize); 5] {
        Lane::ALL.map(|lane| (lane, self.get(lane).len()))
    }

    /// Returns the lane a node name was assigned to, if present.
    #[must_use]
    pub fn lane_of(&self, name: &str) -> Option<Lane> {
        Lane::ALL
            .into_iter()
            .find(|&lane| self.get(lane).iter().any(|node| node.name == name))
    }
}
