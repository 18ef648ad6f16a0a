// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Individual stages of way tag interpretation.
//!
//! Every stage is a pure function of its inputs. Stages which can deny access do so
//! by returning `None`, and once denied, a way stays denied; later stages only ever
//! adjust speed and priority.

use std::collections::HashMap;

use super::profile::{ClassAccess, RoadClass, SmoothnessEffect, TrackGrade};
use crate::ev::{Priority, RouteNetwork, Smoothness};

/// Per-edge attributes computed from the tags of a way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WayAttributes {
    /// Can the way be used in its forward direction?
    pub forward: bool,

    /// Can the way be used against its direction?
    pub backward: bool,

    /// Speed in km/h, already discretized to the profile's speed factor.
    /// Zero if the way isn't accessible.
    pub speed: f64,

    /// [Priority::Exclude] if the way isn't accessible.
    pub priority: Priority,

    pub smoothness: Smoothness,

    /// Most important tier of the bicycle route relations containing the way.
    pub bike_network: RouteNetwork,

    /// Most important tier of the mountain bike route relations containing the way.
    pub mtb_network: RouteNetwork,

    pub roundabout: bool,
}

impl WayAttributes {
    pub fn inaccessible(smoothness: Smoothness, roundabout: bool) -> Self {
        Self {
            forward: false,
            backward: false,
            speed: 0.0,
            priority: Priority::Exclude,
            smoothness,
            bike_network: RouteNetwork::Missing,
            mtb_network: RouteNetwork::Missing,
            roundabout,
        }
    }

    pub fn is_accessible(&self) -> bool {
        self.forward || self.backward
    }
}

/// Finds the [RoadClass] of a way by its highway tag.
pub fn classify<'a>(
    classes: &'a [RoadClass<'a>],
    tags: &HashMap<String, String>,
) -> Option<&'a RoadClass<'a>> {
    let highway = tags.get("highway")?;
    classes.iter().find(|c| c.highway == highway.as_str())
}

/// Replaces the speed by the pushing speed and lowers the priority by one step.
pub fn pushing_section(pushing_speed: f64, priority: Priority) -> (f64, Priority) {
    (pushing_speed, priority.step(-1))
}

/// Replaces both speed and priority by the values of a track grade, if there is one.
pub fn track_grade(grade: Option<&TrackGrade>, speed: f64, priority: Priority) -> (f64, Priority) {
    match grade {
        Some(grade) => (grade.speed, grade.priority),
        None => (speed, priority),
    }
}

/// Applies an explicit travel mode tag (e.g. `bicycle=designated`).
///
/// [ClassAccess::ExplicitOnly] classes are denied (`None`) unless the mode tag grants access.
/// A granting tag raises the priority of pushing sections by one step, and
/// `designated` raises the priority of any class by one step. Never touches the speed.
pub fn mode_override(
    access: ClassAccess,
    mode_value: Option<&str>,
    priority: Priority,
) -> Option<Priority> {
    let granted = matches!(mode_value, Some("yes") | Some("designated") | Some("permissive"));
    let designated = mode_value == Some("designated");

    match access {
        ClassAccess::ExplicitOnly if !granted => None,
        ClassAccess::Pushing if granted => Some(priority.step(1)),
        _ if designated => Some(priority.step(1)),
        _ => Some(priority),
    }
}

/// Moves the priority by the surface delta, limited to a single step either way.
pub fn surface(delta: i8, priority: Priority) -> Priority {
    priority.step(delta.clamp(-1, 1) as i32)
}

/// Adjusts the speed by a smoothness effect.
pub fn smoothness(effect: Option<SmoothnessEffect>, min_speed: f64, speed: f64) -> f64 {
    match effect {
        Some(SmoothnessEffect::Factor(factor)) => speed * factor,
        Some(SmoothnessEffect::Cap(cap)) => speed.min(cap),
        Some(SmoothnessEffect::Impassable) => min_speed,
        None => speed,
    }
}

/// Rounds the speed to the nearest multiple of `factor` and clamps it to `[min_speed, max_speed]`.
pub fn finalize_speed(speed: f64, min_speed: f64, max_speed: f64, factor: f64) -> f64 {
    let rounded = if factor > 0.0 {
        (speed / factor).round() * factor
    } else {
        speed
    };
    rounded.clamp(min_speed, max_speed)
}

/// Raises the priority to the network floor. Never lowers it.
pub fn network_floor(floor: Option<Priority>, priority: Priority) -> Priority {
    match floor {
        Some(floor) => priority.max(floor),
        None => priority,
    }
}

/// Returns the most important network tier out of relations with the provided `route` tag.
/// Relations without a recognized network tag count as [RouteNetwork::Other].
pub fn route_network(route: &str, relations: &[HashMap<String, String>]) -> RouteNetwork {
    relations
        .iter()
        .filter(|r| r.get("route").map(|v| v.as_str()) == Some(route))
        .map(|r| {
            r.get("network")
                .map_or(RouteNetwork::Other, |v| RouteNetwork::from_tag(v))
        })
        .min()
        .unwrap_or(RouteNetwork::Missing)
}

/// Decides if a barrier node blocks passage, given the barrier's default and
/// the value of the most specific access tag on the node.
pub fn barrier(blocks_by_default: bool, access_value: Option<&str>) -> bool {
    match access_value {
        Some("no") | Some("private") => true,
        Some("yes") | Some("designated") | Some("permissive") => false,
        _ => blocks_by_default,
    }
}
