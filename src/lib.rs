// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Edge weighting core for routing over [OpenStreetMap](https://www.openstreetmap.org/) data.
//!
//! Waycost converts OSM tags into compact per-edge attributes (access, speed, priority, ...)
//! packed into fixed-width records, and answers the weight and time of traversing edges
//! and turns. Interpretation of OSM data is customizable via [profiles](crate::osm::Profile).
//! Waycost supports one-way streets, access tags, barriers, route relations and
//! turn restrictions. Graph topology and path search are left to the caller.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use waycost::ev::Registry;
//! use waycost::osm::{VehicleEncodedValues, MOUNTAIN_BIKE_PROFILE};
//! use waycost::{Direction, EdgeStore, Weighting};
//! use waycost::{TurnCostProvider, TurnCostStore, TurnCostsConfig};
//!
//! let profile = &MOUNTAIN_BIKE_PROFILE;
//! let mut registry = Registry::new(64);
//! let encoded = VehicleEncodedValues::register(&mut registry, profile).unwrap();
//! let mut edges = EdgeStore::new(registry.build(), 1);
//!
//! let tags = HashMap::from([("highway".to_string(), "track".to_string())]);
//! encoded.write(&mut edges, 0, &profile.way_attributes(&tags, &[])).unwrap();
//!
//! let turn_costs = TurnCostStore::new(Registry::new(32).build());
//! let tcp = TurnCostProvider::new(&turn_costs, None, &TurnCostsConfig::default()).unwrap();
//! let weighting = Weighting::new(encoded, &edges, tcp);
//!
//! println!("Weight: {}", weighting.calc_edge_weight(0, Direction::Forward, 250.0));
//! ```

pub mod ev;
pub mod osm;
mod store;
mod turn_cost;
mod weighting;

pub use store::EdgeStore;
pub use turn_cost::{
    Turn, TurnCostProvider, TurnCostStore, TurnCostsConfig, UTurnCosts, INFINITE_U_TURN_COSTS,
};
pub use weighting::Weighting;

/// Identifier of an edge of the routing graph. Edge ids are dense, starting from zero.
pub type EdgeId = u32;

/// Identifier of a node of the routing graph.
pub type NodeId = u32;

/// Placeholder for a missing edge, e.g. before the first or after the last edge of a path.
pub const NO_EDGE: EdgeId = EdgeId::MAX;

/// Returns `false` for [NO_EDGE].
pub fn is_valid_edge(edge: EdgeId) -> bool {
    edge != NO_EDGE
}

/// Direction of travel along an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_edges() {
        assert!(is_valid_edge(0));
        assert!(is_valid_edge(1_000_000));
        assert!(!is_valid_edge(NO_EDGE));
    }

    #[test]
    fn direction_reversed() {
        assert_eq!(Direction::Forward.reversed(), Direction::Backward);
        assert_eq!(Direction::Backward.reversed(), Direction::Forward);
    }
}
