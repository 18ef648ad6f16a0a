// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fmt;

/// Closed set of values which can be stored in an
/// [EnumHandle](super::EnumHandle) encoded value.
///
/// Values are stored by their position in [EncodedEnum::VALUES],
/// thus reordering that table invalidates all previously stored data.
pub trait EncodedEnum: Copy + PartialEq + fmt::Debug + 'static {
    /// All values, in the order of their stored ordinals.
    const VALUES: &'static [Self];

    /// Position of this value in [EncodedEnum::VALUES].
    fn ordinal(self) -> u32;

    /// Inverse of [EncodedEnum::ordinal].
    fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::VALUES.get(ordinal as usize).copied()
    }

    /// Number of bits required to store any of the values.
    fn bits() -> u8 {
        let max_ordinal = Self::VALUES.len().saturating_sub(1) as u32;
        (u32::BITS - max_ordinal.leading_zeros()).max(1) as u8
    }
}

/// Ordinal routing preference of a way, independent of its speed.
///
/// Ordered from worst to best; "one step" up or down means moving by one
/// position in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Priority {
    Exclude,
    ReachDestination,
    VeryBad,
    Bad,
    AvoidMore,
    Avoid,
    SlightAvoid,
    Unchanged,
    SlightPrefer,
    Prefer,
    VeryNice,
    Best,
}

impl Priority {
    /// Numeric code of the priority, [Priority::Unchanged] being 10.
    pub fn code(self) -> u8 {
        match self {
            Self::Exclude => 0,
            Self::ReachDestination => 1,
            Self::VeryBad => 3,
            Self::Bad => 5,
            Self::AvoidMore => 6,
            Self::Avoid => 8,
            Self::SlightAvoid => 9,
            Self::Unchanged => 10,
            Self::SlightPrefer => 11,
            Self::Prefer => 12,
            Self::VeryNice => 13,
            Self::Best => 15,
        }
    }

    /// Multiplier of the speed used by a [Weighting](crate::Weighting):
    /// 1.0 for [Priority::Unchanged], more for preferred ways, less for avoided ways.
    pub fn factor(self) -> f64 {
        self.code() as f64 / 10.0
    }

    /// Moves the priority by `delta` steps.
    ///
    /// The result never goes above [Priority::Best]. Stepping down stops at
    /// [Priority::VeryBad], as lower priorities are reserved for restricted ways;
    /// a priority which is already below that is never lowered further.
    pub fn step(self, delta: i32) -> Self {
        let idx = self.ordinal() as i32;
        let floor = idx.min(Self::VeryBad.ordinal() as i32);
        let ceil = Self::Best.ordinal() as i32;
        let new_idx = (idx + delta).clamp(floor, ceil);
        Self::VALUES[new_idx as usize]
    }
}

impl EncodedEnum for Priority {
    const VALUES: &'static [Self] = &[
        Self::Exclude,
        Self::ReachDestination,
        Self::VeryBad,
        Self::Bad,
        Self::AvoidMore,
        Self::Avoid,
        Self::SlightAvoid,
        Self::Unchanged,
        Self::SlightPrefer,
        Self::Prefer,
        Self::VeryNice,
        Self::Best,
    ];

    fn ordinal(self) -> u32 {
        self as u32
    }
}

/// Value of the [smoothness](https://wiki.openstreetmap.org/wiki/Key:smoothness) tag,
/// ordered from the best to the worst surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Smoothness {
    /// No smoothness tag.
    Missing,
    Excellent,
    Good,
    Intermediate,
    Bad,
    VeryBad,
    Horrible,
    VeryHorrible,
    Impassable,
    /// A smoothness tag with an unrecognized value.
    Other,
}

impl Smoothness {
    /// Parses the value of a smoothness tag. Unrecognized values map to [Smoothness::Other].
    pub fn from_tag(value: &str) -> Self {
        match value {
            "excellent" => Self::Excellent,
            "good" => Self::Good,
            "intermediate" => Self::Intermediate,
            "bad" => Self::Bad,
            "very_bad" => Self::VeryBad,
            "horrible" => Self::Horrible,
            "very_horrible" => Self::VeryHorrible,
            "impassable" => Self::Impassable,
            _ => Self::Other,
        }
    }
}

impl EncodedEnum for Smoothness {
    const VALUES: &'static [Self] = &[
        Self::Missing,
        Self::Excellent,
        Self::Good,
        Self::Intermediate,
        Self::Bad,
        Self::VeryBad,
        Self::Horrible,
        Self::VeryHorrible,
        Self::Impassable,
        Self::Other,
    ];

    fn ordinal(self) -> u32 {
        self as u32
    }
}

/// Tier of a route relation's [network](https://wiki.openstreetmap.org/wiki/Key:network) tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum RouteNetwork {
    /// The way is not a member of any applicable route relation.
    Missing,
    International,
    National,
    Regional,
    Local,
    Other,
}

impl RouteNetwork {
    /// Parses the value of a network tag, like "lcn" (local cycling network)
    /// or "rwn" (regional walking network).
    pub fn from_tag(value: &str) -> Self {
        match value {
            "icn" | "iwn" | "ihn" => Self::International,
            "ncn" | "nwn" | "nhn" => Self::National,
            "rcn" | "rwn" | "rhn" => Self::Regional,
            "lcn" | "lwn" | "lhn" => Self::Local,
            _ => Self::Other,
        }
    }
}

impl EncodedEnum for RouteNetwork {
    const VALUES: &'static [Self] = &[
        Self::Missing,
        Self::International,
        Self::National,
        Self::Regional,
        Self::Local,
        Self::Other,
    ];

    fn ordinal(self) -> u32 {
        self as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits() {
        assert_eq!(Priority::bits(), 4);
        assert_eq!(Smoothness::bits(), 4);
        assert_eq!(RouteNetwork::bits(), 3);
    }

    #[test]
    fn ordinals_match_table() {
        for (idx, &p) in Priority::VALUES.iter().enumerate() {
            assert_eq!(p.ordinal() as usize, idx);
            assert_eq!(Priority::from_ordinal(idx as u32), Some(p));
        }
        assert_eq!(Priority::from_ordinal(12), None);
    }

    #[test]
    fn priority_step() {
        assert_eq!(Priority::Prefer.step(1), Priority::VeryNice);
        assert_eq!(Priority::Unchanged.step(-1), Priority::SlightAvoid);
        assert_eq!(Priority::Best.step(1), Priority::Best);
        assert_eq!(Priority::VeryBad.step(-1), Priority::VeryBad);
        assert_eq!(Priority::Exclude.step(-1), Priority::Exclude);
        assert_eq!(Priority::Exclude.step(3), Priority::Bad);
    }

    #[test]
    fn priority_factor() {
        assert_eq!(Priority::Unchanged.factor(), 1.0);
        assert_eq!(Priority::Best.factor(), 1.5);
        assert_eq!(Priority::Exclude.factor(), 0.0);
    }

    #[test]
    fn from_tag() {
        assert_eq!(Smoothness::from_tag("bad"), Smoothness::Bad);
        assert_eq!(Smoothness::from_tag("unknown"), Smoothness::Other);
        assert_eq!(RouteNetwork::from_tag("lcn"), RouteNetwork::Local);
        assert_eq!(RouteNetwork::from_tag("ncn"), RouteNetwork::National);
        assert_eq!(RouteNetwork::from_tag("foo"), RouteNetwork::Other);
    }
}
