// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod encoder;
mod importer;
pub mod model;
mod profile;
pub mod rules;

pub use encoder::VehicleEncodedValues;
pub use importer::{ImportStats, ImportSummary, Importer};
pub use profile::{
    ClassAccess, NetworkFloor, Profile, RoadClass, SmoothnessEffect, SmoothnessRule, SurfaceRule,
    TrackGrade, TurnRestriction, BICYCLE_PROFILE, MIN_SPEED, MOUNTAIN_BIKE_PROFILE,
    PUSHING_SECTION_SPEED,
};
pub use rules::WayAttributes;
