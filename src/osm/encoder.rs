// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::profile::Profile;
use super::rules::WayAttributes;
use crate::ev::{
    BoolHandle, DecimalHandle, EnumHandle, Error, Layout, Priority, Registry, RouteNetwork,
    Smoothness,
};
use crate::{Direction, EdgeId, EdgeStore};

/// Handles to all per-edge encoded values of a single [Profile].
///
/// Values specific to the travel mode are prefixed with the profile name,
/// e.g. `mtb_access` or `mtb_average_speed`. Values describing the way itself
/// (`bike_network`, `mtb_network`, `roundabout` and `smoothness`) are not prefixed,
/// so every profile needs its own [Registry]; registering a second profile
/// in the same registry fails with [Error::Conflict].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleEncodedValues {
    pub access: BoolHandle,
    pub average_speed: DecimalHandle,
    pub priority: EnumHandle<Priority>,
    pub bike_network: EnumHandle<RouteNetwork>,
    pub mtb_network: EnumHandle<RouteNetwork>,
    pub roundabout: BoolHandle,
    pub smoothness: EnumHandle<Smoothness>,
}

impl VehicleEncodedValues {
    /// Registers the encoded values of `profile` in a registry.
    pub fn register(registry: &mut Registry, profile: &Profile) -> Result<Self, Error> {
        let name = profile.name;
        let access = registry.register_bool(&format!("{name}_access"), true)?;
        let average_speed = registry.register_decimal(
            &format!("{name}_average_speed"),
            profile.speed_bits,
            profile.speed_factor,
            true,
        )?;
        let priority = registry.register_enum(&format!("{name}_priority"), false)?;
        let bike_network = registry.register_enum("bike_network", false)?;
        let mtb_network = registry.register_enum("mtb_network", false)?;
        let roundabout = registry.register_bool("roundabout", false)?;
        let smoothness = registry.register_enum("smoothness", false)?;
        log::debug!("registered encoded values of profile {name:?}");

        Ok(Self {
            access,
            average_speed,
            priority,
            bike_network,
            mtb_network,
            roundabout,
            smoothness,
        })
    }

    /// Recovers the handles of `profile` from an already built layout.
    /// Returns `None` if any of them is missing.
    pub fn find(layout: &Layout, profile: &Profile) -> Option<Self> {
        let name = profile.name;
        Some(Self {
            access: layout.find_bool(&format!("{name}_access"))?,
            average_speed: layout.find_decimal(&format!("{name}_average_speed"))?,
            priority: layout.find_enum(&format!("{name}_priority"))?,
            bike_network: layout.find_enum("bike_network")?,
            mtb_network: layout.find_enum("mtb_network")?,
            roundabout: layout.find_bool("roundabout")?,
            smoothness: layout.find_enum("smoothness")?,
        })
    }

    /// Registers the turn restriction flag of `profile` in a turn cost registry.
    pub fn register_turn_restriction(
        registry: &mut Registry,
        profile: &Profile,
    ) -> Result<BoolHandle, Error> {
        registry.register_bool(&format!("{}_turn_restriction", profile.name), false)
    }

    /// Stores the attributes of a way on one of its edges.
    ///
    /// Directions which can't be used get a zero speed. Speeds above the storable
    /// maximum are clamped, other errors (e.g. a negative speed) are propagated.
    pub fn write(
        &self,
        store: &mut EdgeStore,
        edge: EdgeId,
        attrs: &WayAttributes,
    ) -> Result<(), Error> {
        let speed = attrs.speed.min(self.average_speed.max_value());
        let mut record = store.record_mut(edge);

        for (direction, accessible) in [
            (Direction::Forward, attrs.forward),
            (Direction::Backward, attrs.backward),
        ] {
            record.set_bool(&self.access, direction, accessible)?;
            record.set_decimal(
                &self.average_speed,
                direction,
                if accessible { speed } else { 0.0 },
            )?;
        }

        record.set_enum(&self.priority, Direction::Forward, attrs.priority)?;
        record.set_enum(&self.bike_network, Direction::Forward, attrs.bike_network)?;
        record.set_enum(&self.mtb_network, Direction::Forward, attrs.mtb_network)?;
        record.set_bool(&self.roundabout, Direction::Forward, attrs.roundabout)?;
        record.set_enum(&self.smoothness, Direction::Forward, attrs.smoothness)?;
        Ok(())
    }

    /// Reads back what [VehicleEncodedValues::write] stored, for a single direction of an edge.
    pub fn is_accessible(&self, store: &EdgeStore, edge: EdgeId, direction: Direction) -> bool {
        store.get_bool(&self.access, edge, direction)
    }
}
