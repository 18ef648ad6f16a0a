// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::ev::Priority;
use crate::osm::VehicleEncodedValues;
use crate::{Direction, EdgeId, EdgeStore, NodeId, TurnCostProvider};

/// Converts stored edge attributes into routing weights.
///
/// The weight of an edge is its travel time in seconds divided by the
/// [priority factor](Priority::factor), so preferred edges look shorter.
#[derive(Debug, Clone, Copy)]
pub struct Weighting<'a> {
    encoded: VehicleEncodedValues,
    store: &'a EdgeStore,
    turn_costs: TurnCostProvider<'a>,
}

impl<'a> Weighting<'a> {
    pub fn new(
        encoded: VehicleEncodedValues,
        store: &'a EdgeStore,
        turn_costs: TurnCostProvider<'a>,
    ) -> Self {
        Self {
            encoded,
            store,
            turn_costs,
        }
    }

    pub fn turn_costs(&self) -> &TurnCostProvider<'a> {
        &self.turn_costs
    }

    /// Returns the speed (in km/h) of an edge in a given direction,
    /// or `None` if that direction can't be used.
    fn speed(&self, edge: EdgeId, direction: Direction) -> Option<f64> {
        if !self.encoded.is_accessible(self.store, edge, direction) {
            return None;
        }

        let speed = self
            .store
            .get_decimal(&self.encoded.average_speed, edge, direction);
        if speed > 0.0 {
            Some(speed)
        } else {
            None
        }
    }

    /// Returns the weight of traversing `distance` meters of an edge in a given direction,
    /// or [f64::INFINITY] if the edge can't be used in that direction.
    pub fn calc_edge_weight(&self, edge: EdgeId, direction: Direction, distance: f64) -> f64 {
        let speed = match self.speed(edge, direction) {
            Some(speed) => speed,
            None => return f64::INFINITY,
        };

        let priority = self
            .store
            .get_enum(&self.encoded.priority, edge, Direction::Forward);
        if priority == Priority::Exclude {
            return f64::INFINITY;
        }

        distance / (speed / 3.6) / priority.factor()
    }

    /// Returns the time (in milliseconds) of traversing `distance` meters of an edge
    /// in a given direction, or [u64::MAX] if the edge can't be used in that direction.
    pub fn calc_edge_millis(&self, edge: EdgeId, direction: Direction, distance: f64) -> u64 {
        match self.speed(edge, direction) {
            Some(speed) => (distance / (speed / 3.6) * 1000.0).round() as u64,
            None => u64::MAX,
        }
    }

    pub fn calc_turn_weight(&self, from: EdgeId, via: NodeId, to: EdgeId) -> f64 {
        self.turn_costs.calc_turn_weight(from, via, to)
    }

    pub fn calc_turn_millis(&self, from: EdgeId, via: NodeId, to: EdgeId) -> u64 {
        self.turn_costs.calc_turn_millis(from, via, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ev::{Registry, RouteNetwork, Smoothness};
    use crate::osm::{WayAttributes, MOUNTAIN_BIKE_PROFILE};
    use crate::{TurnCostStore, TurnCostsConfig};
    use crate::Direction::{Backward, Forward};

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-4),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    fn attrs(forward: bool, backward: bool, speed: f64, priority: Priority) -> WayAttributes {
        WayAttributes {
            forward,
            backward,
            speed,
            priority,
            smoothness: Smoothness::Missing,
            bike_network: RouteNetwork::Missing,
            mtb_network: RouteNetwork::Missing,
            roundabout: false,
        }
    }

    fn fixture() -> (EdgeStore, VehicleEncodedValues, TurnCostStore) {
        let mut r = Registry::new(64);
        let encoded = VehicleEncodedValues::register(&mut r, &MOUNTAIN_BIKE_PROFILE).unwrap();
        let mut store = EdgeStore::new(r.build(), 3);
        encoded
            .write(&mut store, 0, &attrs(true, false, 18.0, Priority::Unchanged))
            .unwrap();
        encoded
            .write(&mut store, 1, &attrs(true, true, 18.0, Priority::Best))
            .unwrap();
        encoded
            .write(&mut store, 2, &attrs(false, false, 0.0, Priority::Exclude))
            .unwrap();
        (store, encoded, TurnCostStore::new(Registry::new(32).build()))
    }

    #[test]
    fn edge_weight() {
        let (store, encoded, turn_costs) = fixture();
        let tcp = TurnCostProvider::new(&turn_costs, None, &TurnCostsConfig::default()).unwrap();
        let w = Weighting::new(encoded, &store, tcp);

        // 18 km/h = 5 m/s
        assert_almost_eq!(w.calc_edge_weight(0, Forward, 100.0), 20.0);
        assert_almost_eq!(w.calc_edge_weight(1, Forward, 100.0), 20.0 / 1.5);
        assert_almost_eq!(w.calc_edge_weight(1, Backward, 100.0), 20.0 / 1.5);
        assert_eq!(w.calc_edge_weight(0, Backward, 100.0), f64::INFINITY);
        assert_eq!(w.calc_edge_weight(2, Forward, 100.0), f64::INFINITY);
    }

    #[test]
    fn edge_millis() {
        let (store, encoded, turn_costs) = fixture();
        let tcp = TurnCostProvider::new(&turn_costs, None, &TurnCostsConfig::default()).unwrap();
        let w = Weighting::new(encoded, &store, tcp);

        assert_eq!(w.calc_edge_millis(0, Forward, 100.0), 20_000);
        assert_eq!(w.calc_edge_millis(1, Backward, 100.0), 20_000);
        assert_eq!(w.calc_edge_millis(0, Backward, 100.0), u64::MAX);
        assert_eq!(w.calc_edge_millis(2, Forward, 100.0), u64::MAX);
    }

    #[test]
    fn turns_delegate_to_provider() {
        let (store, encoded, turn_costs) = fixture();
        let config = TurnCostsConfig { u_turn_costs: 30 };
        let tcp = TurnCostProvider::new(&turn_costs, None, &config).unwrap();
        let w = Weighting::new(encoded, &store, tcp);

        assert_eq!(w.calc_turn_weight(0, 5, 0), 30.0);
        assert_eq!(w.calc_turn_weight(0, 5, 1), 0.0);
        assert_eq!(w.calc_turn_millis(0, 5, 0), 0);
        assert_eq!(w.turn_costs().to_string(), "default_tcp_30");
    }
}
