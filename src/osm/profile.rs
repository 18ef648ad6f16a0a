// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use super::rules::{self, WayAttributes};
use crate::ev::{Priority, Smoothness};

/// Lowest speed (in km/h) of an accessible way in the bicycle profiles.
pub const MIN_SPEED: f64 = 2.0;

/// Speed (in km/h) of pushing a bicycle along a way where riding isn't possible.
pub const PUSHING_SECTION_SPEED: f64 = 4.0;

/// Describes how to convert OSM tags into per-edge attributes.
///
/// A Profile is plain data: all the numbers which make one travel mode different
/// from another are kept in the lookup tables, while the order in which they are
/// applied is fixed (see [Profile::way_attributes]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile<'a> {
    /// Short name of the routing profile, used as the prefix of its encoded values
    /// (e.g. "mtb" gives "mtb_access", "mtb_average_speed", ...).
    pub name: &'a str,

    /// Array of OSM [access tags](https://wiki.openstreetmap.org/wiki/Key:access#Land-based_transportation)
    /// (in order from least to most specific) to consider when checking for road prohibitions.
    ///
    /// The last entry is the tag of the travel mode itself (e.g. "bicycle"), which is also used
    /// for explicit mode overrides of way classes and barriers.
    ///
    /// This array is also used to follow mode-specific one-way and turn restrictions
    /// (see [Profile::is_allowed], [Profile::way_direction] and [Profile::is_exempted]).
    pub access: &'a [&'a str],

    /// Force no routing over [motorroad=yes](https://wiki.openstreetmap.org/wiki/Key:motorroad) ways.
    pub disallow_motorroad: bool,

    /// Force ignoring of [turn restrictions](https://wiki.openstreetmap.org/wiki/Turn_restriction).
    pub disable_restrictions: bool,

    /// Usable [highway](https://wiki.openstreetmap.org/wiki/Key:highway) values with their
    /// base speed and priority. Ways with any other highway value are not accessible.
    pub road_classes: &'a [RoadClass<'a>],

    /// Refinements of `highway=track` by the
    /// [tracktype](https://wiki.openstreetmap.org/wiki/Key:tracktype) tag.
    /// Tracks with a missing or unlisted grade keep the values of their road class.
    pub track_grades: &'a [TrackGrade<'a>],

    /// Priority adjustments by the [surface](https://wiki.openstreetmap.org/wiki/Key:surface) tag.
    pub surfaces: &'a [SurfaceRule<'a>],

    /// Speed adjustments by the [smoothness](https://wiki.openstreetmap.org/wiki/Key:smoothness) tag.
    pub smoothness: &'a [SmoothnessRule],

    /// Speed adjustment for smoothness tags with an unrecognized value.
    pub unknown_smoothness: Option<SmoothnessEffect>,

    /// Priority floors for ways which are members of route relations.
    pub networks: &'a [NetworkFloor<'a>],

    /// [Barrier](https://wiki.openstreetmap.org/wiki/Key:barrier) values which block
    /// passage unless explicitly allowed for the travel mode. Other barriers are passable
    /// unless explicitly forbidden.
    pub blocking_barriers: &'a [&'a str],

    /// Lowest speed of an accessible way, in km/h.
    pub min_speed: f64,

    /// Highest speed of any way, in km/h. Must be storable with
    /// [Profile::speed_bits] and [Profile::speed_factor].
    pub max_speed: f64,

    /// Speed of [ClassAccess::Pushing] road classes, in km/h.
    pub pushing_speed: f64,

    /// Number of bits used to store the speed of an edge in one direction.
    pub speed_bits: u8,

    /// Speed discretization step, in km/h.
    pub speed_factor: f64,
}

/// Base attributes of ways with a specific `highway` value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadClass<'a> {
    /// Value of the highway tag, e.g. "residential".
    pub highway: &'a str,

    /// Speed in km/h.
    pub speed: f64,

    pub priority: Priority,

    pub access: ClassAccess,
}

/// How a [RoadClass] may be used by the travel mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassAccess {
    /// The way can be normally used.
    Open,

    /// The way can be used, but only at [Profile::pushing_speed].
    Pushing,

    /// The way can only be used if the travel mode is explicitly allowed,
    /// e.g. with `bicycle=yes`.
    ExplicitOnly,
}

/// Speed and priority of a `highway=track` way with a specific `tracktype`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGrade<'a> {
    /// Value of the tracktype tag, e.g. "grade1".
    pub tracktype: &'a str,
    pub speed: f64,
    pub priority: Priority,
}

/// Priority adjustment for ways with a specific `surface`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceRule<'a> {
    pub surface: &'a str,

    /// Number of priority steps; only -1, 0 and +1 are meaningful,
    /// larger values are clamped.
    pub delta: i8,
}

/// Speed adjustment for ways with a specific [Smoothness].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothnessRule {
    pub smoothness: Smoothness,
    pub effect: SmoothnessEffect,
}

/// How a smoothness value changes the speed of a way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmoothnessEffect {
    /// Speed is multiplied by the provided factor.
    Factor(f64),

    /// Speed is limited to the provided value.
    Cap(f64),

    /// Speed is forced down to [Profile::min_speed].
    Impassable,
}

/// Minimal priority of ways which are members of a route relation
/// with specific `route` and `network` tags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkFloor<'a> {
    /// Value of the route tag, e.g. "bicycle" or "mtb".
    pub route: &'a str,

    /// Value of the network tag, e.g. "lcn" or "ncn".
    pub network: &'a str,

    pub floor: Priority,
}

/// Turn restriction kind indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRestriction {
    /// Not a turn restriction, or a turn restriction which does not apply for the current [Profile].
    Inapplicable,

    /// The sequence of edges indicated by this restriction is prohibited.
    Prohibitory,

    /// The sequence of edges must be followed after using the `from` edge.
    Mandatory,
}

impl<'a> Profile<'a> {
    /// Converts the tags of a way into its attributes.
    ///
    /// `relations` holds the tags of all route relations containing the way.
    /// The one with the highest [NetworkFloor] sets the priority floor
    /// (see [Profile::best_route_relation]), while the network tiers of bicycle and
    /// mountain bike routes are recorded independently of the floors.
    ///
    /// The tags are interpreted in a fixed order, with every stage only adjusting
    /// what the previous stages have computed:
    /// 1. access tags and the road class, which may deny access for good,
    /// 2. pushing sections,
    /// 3. track grades,
    /// 4. explicit travel mode overrides,
    /// 5. surface,
    /// 6. smoothness,
    /// 7. route network floors.
    pub fn way_attributes(
        &self,
        tags: &HashMap<String, String>,
        relations: &[HashMap<String, String>],
    ) -> WayAttributes {
        let smoothness = tags
            .get("smoothness")
            .map_or(Smoothness::Missing, |v| Smoothness::from_tag(v));
        let roundabout = matches!(
            tags.get("junction").map(|v| v.as_str()),
            Some("roundabout") | Some("circular")
        );
        let inaccessible = WayAttributes::inaccessible(smoothness, roundabout);

        if !self.is_allowed(tags) {
            return inaccessible;
        }

        let class = match rules::classify(self.road_classes, tags) {
            Some(class) => class,
            None => return inaccessible,
        };

        let mut speed = class.speed;
        let mut priority = class.priority;

        if class.access == ClassAccess::Pushing {
            (speed, priority) = rules::pushing_section(self.pushing_speed, priority);
        }

        if class.highway == "track" {
            (speed, priority) = rules::track_grade(self.track_grade(tags), speed, priority);
        }

        priority = match rules::mode_override(class.access, self.mode_value(tags), priority) {
            Some(priority) => priority,
            None => return inaccessible,
        };

        priority = rules::surface(self.surface_delta(tags), priority);

        speed = rules::smoothness(self.smoothness_effect(smoothness), self.min_speed, speed);
        speed = rules::finalize_speed(speed, self.min_speed, self.max_speed, self.speed_factor);

        let floor = self.network_floor(self.best_route_relation(relations));
        priority = rules::network_floor(floor, priority);

        let (forward, backward) = self.way_direction(tags);
        log::trace!(
            "{}: highway={} → speed {speed}, priority {priority:?}, \
             forward {forward}, backward {backward}",
            self.name,
            class.highway,
        );

        WayAttributes {
            forward,
            backward,
            speed,
            priority,
            smoothness,
            bike_network: rules::route_network("bicycle", relations),
            mtb_network: rules::route_network("mtb", relations),
            roundabout,
        }
    }

    /// Checks if a node with the provided tags blocks passage for the travel mode.
    ///
    /// Nodes without a barrier tag never block. Barrier values listed in
    /// [Profile::blocking_barriers] block by default, others are passable by default.
    /// The most specific access tag on the node overrides the default in either direction.
    pub fn is_barrier(&self, tags: &HashMap<String, String>) -> bool {
        match tags.get("barrier") {
            Some(barrier) => {
                let blocks_by_default = self.blocking_barriers.contains(&barrier.as_str());
                rules::barrier(blocks_by_default, self.most_specific_access_value(tags))
            }
            None => false,
        }
    }

    /// Selects the route relation with the highest [NetworkFloor] for this profile,
    /// out of all relations containing a way. On ties, the first one wins.
    /// Returns `None` if no relation has an applicable floor.
    pub fn best_route_relation<'t, I>(
        &self,
        relations: I,
    ) -> Option<&'t HashMap<String, String>>
    where
        I: IntoIterator<Item = &'t HashMap<String, String>>,
    {
        let mut best: Option<(Priority, &'t HashMap<String, String>)> = None;
        for relation in relations {
            if let Some(floor) = self.network_floor(Some(relation)) {
                if best.map_or(true, |(best_floor, _)| floor > best_floor) {
                    best = Some((floor, relation));
                }
            }
        }
        best.map(|(_, relation)| relation)
    }

    /// Returns the priority floor of a route relation,
    /// or `None` if there is no matching [NetworkFloor].
    pub fn network_floor(&self, relation: Option<&HashMap<String, String>>) -> Option<Priority> {
        let tags = relation?;
        let route = tags.get("route")?;
        let network = tags.get("network")?;
        self.networks
            .iter()
            .find(|n| n.route == route.as_str() && n.network == network.as_str())
            .map(|n| n.floor)
    }

    fn track_grade(&self, tags: &HashMap<String, String>) -> Option<&'a TrackGrade<'a>> {
        let tracktype = tags.get("tracktype")?;
        self.track_grades
            .iter()
            .find(|g| g.tracktype == tracktype.as_str())
    }

    fn surface_delta(&self, tags: &HashMap<String, String>) -> i8 {
        tags.get("surface")
            .and_then(|surface| self.surfaces.iter().find(|s| s.surface == surface.as_str()))
            .map_or(0, |s| s.delta)
    }

    fn smoothness_effect(&self, smoothness: Smoothness) -> Option<SmoothnessEffect> {
        match smoothness {
            Smoothness::Missing => None,
            Smoothness::Other => self.unknown_smoothness,
            _ => self
                .smoothness
                .iter()
                .find(|s| s.smoothness == smoothness)
                .map(|s| s.effect),
        }
    }

    /// Returns the value of the travel mode tag (the last entry of [Profile::access]).
    fn mode_value<'t>(&self, tags: &'t HashMap<String, String>) -> Option<&'t str> {
        self.access
            .last()
            .and_then(|&mode| tags.get(mode))
            .map(|v| v.as_str())
    }

    /// Returns the value of the most specific access tag present in `tags`.
    fn most_specific_access_value<'t>(&self, tags: &'t HashMap<String, String>) -> Option<&'t str> {
        self.access
            .iter()
            .rev()
            .find_map(|&mode| tags.get(mode).map(|v| v.as_str()))
    }

    /// Checks if the way is routable, by considering motor roads ([Profile::disallow_motorroad])
    /// and access tags ([Profile::access]).
    pub fn is_allowed(&self, tags: &HashMap<String, String>) -> bool {
        // Check against the motorroad tag
        if self.disallow_motorroad && tags.get("motorroad").map(|v| v.as_str()) == Some("yes") {
            return false;
        }

        // Check against the access tags
        match self.most_specific_access_value(tags) {
            Some("no") | Some("private") => false,
            _ => true,
        }
    }

    /// Checks if a way is traversable forward (first return value) and
    /// backwards (second return value) by investigating mode-specific and generic one-way tags.
    ///
    /// Some ways (highway=motorway, highway=motorway_link, junction=roundabout and
    /// junction=circular) default to being one-way, except if overridden by specific tags.
    pub fn way_direction(&self, tags: &HashMap<String, String>) -> (bool, bool) {
        let mut forward = true;
        let mut backward = true;

        match tags.get("highway").map(|s| s.as_str()).unwrap_or("") {
            "motorway" | "motorway_link" => {
                backward = false;
            }
            _ => {}
        }

        match tags.get("junction").map(|s| s.as_str()).unwrap_or("") {
            "roundabout" | "circular" => {
                backward = false;
            }
            _ => {}
        }

        // Check the oneway tag
        match self.get_active_oneway_value(tags) {
            "yes" | "true" | "1" => {
                forward = true;
                backward = false;
            }

            "-1" | "reverse" => {
                forward = false;
                backward = true;
            }

            "no" => {
                forward = true;
                backward = true;
            }

            _ => {}
        }

        return (forward, backward);
    }

    /// Returns the value of the most specific "oneway:MODE" tag (based on [Profile::access]),
    /// falling back to simply "oneway", and returning an empty string if no relevant tag was found.
    fn get_active_oneway_value<'t>(&self, tags: &'t HashMap<String, String>) -> &'t str {
        self.access
            .iter()
            .rev()
            .filter(|&&mode| mode != "access")
            .find_map(|&mode| tags.get(&format!("oneway:{}", mode)))
            .or_else(|| tags.get("oneway"))
            .map(|oneway_tag| oneway_tag.as_str())
            .unwrap_or("")
    }

    /// Figures out what kind of [TurnRestriction] a relation with given tags represents.
    pub fn restriction_kind(&self, tags: &HashMap<String, String>) -> TurnRestriction {
        // Short-circuit when restrictions are disabled,
        // relation is not a restriction, or the current profile is exempted
        if self.disable_restrictions
            || tags.get("type").map(|v| v.as_str()) != Some("restriction")
            || self.is_exempted(tags)
        {
            return TurnRestriction::Inapplicable;
        }

        // Parse the restriction tag
        let (kind, description) = self
            .get_active_restriction_tag(tags)
            .split_once('_')
            .unwrap_or(("", ""));

        // Check that the description is supported
        match description {
            "right_turn" | "left_turn" | "u_turn" | "straight_on" => {}
            _ => return TurnRestriction::Inapplicable,
        }

        // Return the applicable restriction kind
        return match kind {
            "no" => TurnRestriction::Prohibitory,
            "only" => TurnRestriction::Mandatory,
            _ => TurnRestriction::Inapplicable,
        };
    }

    /// Returns true if [Profile::access] intersects with any mode present in the `except` tag.
    /// If the tag is missing, returns false.
    pub fn is_exempted(&self, tags: &HashMap<String, String>) -> bool {
        tags.get("except")
            .map_or("", |v| v.as_str())
            .split(';')
            .any(|exempted_type| self.access.contains(&exempted_type))
    }

    /// Returns the value of the most specific "restriction:MODE" tag (based on [Profile::access]),
    /// falling back to simply "restriction", and returning an empty string if no relevant tag
    /// was found.
    fn get_active_restriction_tag<'t>(&self, tags: &'t HashMap<String, String>) -> &'t str {
        self.access
            .iter()
            .rev()
            .filter(|&&mode| mode != "access")
            .find_map(|&mode| tags.get(&format!("restriction:{}", mode)))
            .or_else(|| tags.get("restriction"))
            .map(|v| v.as_str())
            .unwrap_or("")
    }
}

const fn class(
    highway: &str,
    speed: f64,
    priority: Priority,
    access: ClassAccess,
) -> RoadClass<'_> {
    RoadClass {
        highway,
        speed,
        priority,
        access,
    }
}

const fn grade(tracktype: &str, speed: f64, priority: Priority) -> TrackGrade<'_> {
    TrackGrade {
        tracktype,
        speed,
        priority,
    }
}

const fn network(
    route: &'static str,
    network: &'static str,
    floor: Priority,
) -> NetworkFloor<'static> {
    NetworkFloor {
        route,
        network,
        floor,
    }
}

const fn smooth(smoothness: Smoothness, effect: SmoothnessEffect) -> SmoothnessRule {
    SmoothnessRule { smoothness, effect }
}

/// Example routing [Profile] for city and touring bicycles, with preferences for
/// dedicated cycling infrastructure and quiet, paved roads.
pub const BICYCLE_PROFILE: Profile = Profile {
    name: "bike",
    access: &["access", "vehicle", "bicycle"],
    disallow_motorroad: true,
    disable_restrictions: false,
    road_classes: &[
        class("cycleway", 18.0, Priority::VeryNice, ClassAccess::Open),
        class("primary", 18.0, Priority::AvoidMore, ClassAccess::Open),
        class("primary_link", 18.0, Priority::AvoidMore, ClassAccess::Open),
        class("secondary", 18.0, Priority::Avoid, ClassAccess::Open),
        class("secondary_link", 18.0, Priority::Avoid, ClassAccess::Open),
        class("tertiary", 18.0, Priority::Unchanged, ClassAccess::Open),
        class("tertiary_link", 18.0, Priority::Unchanged, ClassAccess::Open),
        class("unclassified", 16.0, Priority::Prefer, ClassAccess::Open),
        class("residential", 18.0, Priority::Prefer, ClassAccess::Open),
        class("living_street", 6.0, Priority::Prefer, ClassAccess::Open),
        class("service", 14.0, Priority::Unchanged, ClassAccess::Open),
        class("road", 12.0, Priority::Unchanged, ClassAccess::Open),
        class("track", 12.0, Priority::Unchanged, ClassAccess::Open),
        class("path", 10.0, Priority::SlightAvoid, ClassAccess::Open),
        class("footway", 6.0, Priority::Unchanged, ClassAccess::Pushing),
        class("pedestrian", 6.0, Priority::Unchanged, ClassAccess::Pushing),
        class("platform", 6.0, Priority::Unchanged, ClassAccess::Pushing),
        class("steps", 2.0, Priority::Avoid, ClassAccess::Pushing),
        class("bridleway", 8.0, Priority::Avoid, ClassAccess::ExplicitOnly),
    ],
    track_grades: &[
        grade("grade1", 18.0, Priority::Unchanged),
        grade("grade2", 12.0, Priority::SlightAvoid),
        grade("grade3", 8.0, Priority::Avoid),
        grade("grade4", 6.0, Priority::Avoid),
        grade("grade5", 4.0, Priority::AvoidMore),
    ],
    surfaces: &[
        SurfaceRule { surface: "unpaved", delta: -1 },
        SurfaceRule { surface: "gravel", delta: -1 },
        SurfaceRule { surface: "ground", delta: -1 },
        SurfaceRule { surface: "dirt", delta: -1 },
        SurfaceRule { surface: "grass", delta: -1 },
        SurfaceRule { surface: "sand", delta: -1 },
        SurfaceRule { surface: "mud", delta: -1 },
        SurfaceRule { surface: "cobblestone", delta: -1 },
        SurfaceRule { surface: "sett", delta: -1 },
    ],
    smoothness: &[
        smooth(Smoothness::Intermediate, SmoothnessEffect::Cap(16.0)),
        smooth(Smoothness::Bad, SmoothnessEffect::Cap(12.0)),
        smooth(Smoothness::VeryBad, SmoothnessEffect::Cap(8.0)),
        smooth(Smoothness::Horrible, SmoothnessEffect::Cap(6.0)),
        smooth(Smoothness::VeryHorrible, SmoothnessEffect::Cap(4.0)),
        smooth(Smoothness::Impassable, SmoothnessEffect::Impassable),
    ],
    unknown_smoothness: None,
    networks: &[
        network("bicycle", "icn", Priority::Best),
        network("bicycle", "ncn", Priority::Best),
        network("bicycle", "rcn", Priority::VeryNice),
        network("bicycle", "lcn", Priority::Prefer),
    ],
    blocking_barriers: &[
        "kissing_gate",
        "stile",
        "turnstile",
        "full-height_turnstile",
        "fence",
        "wall",
        "hampshire_gate",
    ],
    min_speed: MIN_SPEED,
    max_speed: 30.0,
    pushing_speed: PUSHING_SECTION_SPEED,
    speed_bits: 4,
    speed_factor: 2.0,
};

/// Example routing [Profile] for mountain bikes, with preferences for
/// tracks, paths and rough surfaces.
pub const MOUNTAIN_BIKE_PROFILE: Profile = Profile {
    name: "mtb",
    access: &["access", "vehicle", "bicycle"],
    disallow_motorroad: true,
    disable_restrictions: false,
    road_classes: &[
        class("trunk", 18.0, Priority::VeryBad, ClassAccess::Open),
        class("trunk_link", 18.0, Priority::VeryBad, ClassAccess::Open),
        class("primary", 18.0, Priority::Bad, ClassAccess::Open),
        class("primary_link", 18.0, Priority::Bad, ClassAccess::Open),
        class("secondary", 18.0, Priority::Avoid, ClassAccess::Open),
        class("secondary_link", 18.0, Priority::Avoid, ClassAccess::Open),
        class("tertiary", 18.0, Priority::Prefer, ClassAccess::Open),
        class("tertiary_link", 18.0, Priority::Prefer, ClassAccess::Open),
        class("unclassified", 16.0, Priority::Prefer, ClassAccess::Open),
        class("residential", 16.0, Priority::Prefer, ClassAccess::Open),
        class("living_street", 6.0, Priority::Prefer, ClassAccess::Open),
        class("service", 12.0, Priority::Unchanged, ClassAccess::Open),
        class("road", 12.0, Priority::Unchanged, ClassAccess::Open),
        class("track", 18.0, Priority::Prefer, ClassAccess::Open),
        class("path", 16.0, Priority::Prefer, ClassAccess::Open),
        class("bridleway", 12.0, Priority::Unchanged, ClassAccess::Open),
        class("cycleway", 18.0, Priority::Unchanged, ClassAccess::Open),
        class("footway", 4.0, Priority::Unchanged, ClassAccess::Pushing),
        class("pedestrian", 4.0, Priority::Unchanged, ClassAccess::Pushing),
        class("platform", 4.0, Priority::Unchanged, ClassAccess::Pushing),
        class("steps", 2.0, Priority::Avoid, ClassAccess::Pushing),
    ],
    track_grades: &[
        grade("grade1", 18.0, Priority::SlightPrefer),
        grade("grade2", 16.0, Priority::Prefer),
        grade("grade3", 12.0, Priority::VeryNice),
        grade("grade4", 8.0, Priority::VeryNice),
        grade("grade5", 6.0, Priority::VeryNice),
    ],
    surfaces: &[
        SurfaceRule { surface: "dirt", delta: 1 },
        SurfaceRule { surface: "earth", delta: 1 },
        SurfaceRule { surface: "sand", delta: -1 },
        SurfaceRule { surface: "mud", delta: -1 },
    ],
    smoothness: &[
        smooth(Smoothness::Excellent, SmoothnessEffect::Factor(1.1)),
        smooth(Smoothness::Good, SmoothnessEffect::Factor(1.0)),
        smooth(Smoothness::Intermediate, SmoothnessEffect::Factor(0.9)),
        smooth(Smoothness::Bad, SmoothnessEffect::Factor(0.7)),
        smooth(Smoothness::VeryBad, SmoothnessEffect::Factor(0.6)),
        smooth(Smoothness::Horrible, SmoothnessEffect::Factor(0.5)),
        smooth(Smoothness::VeryHorrible, SmoothnessEffect::Factor(0.4)),
        smooth(Smoothness::Impassable, SmoothnessEffect::Impassable),
    ],
    unknown_smoothness: Some(SmoothnessEffect::Factor(0.7)),
    networks: &[
        network("bicycle", "lcn", Priority::Best),
        network("bicycle", "rcn", Priority::Prefer),
        network("bicycle", "ncn", Priority::Prefer),
        network("bicycle", "icn", Priority::Prefer),
        network("mtb", "lcn", Priority::Prefer),
        network("mtb", "rcn", Priority::Prefer),
        network("mtb", "ncn", Priority::Prefer),
        network("mtb", "icn", Priority::Prefer),
    ],
    blocking_barriers: &[
        "stile",
        "turnstile",
        "full-height_turnstile",
        "fence",
        "wall",
        "hampshire_gate",
    ],
    min_speed: MIN_SPEED,
    max_speed: 30.0,
    pushing_speed: PUSHING_SECTION_SPEED,
    speed_bits: 4,
    speed_factor: 2.0,
};
