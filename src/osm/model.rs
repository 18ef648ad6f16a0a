// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::{EdgeId, NodeId};

/// A single edge of the routing graph created from a part of a [Way].
///
/// The forward direction of the edge goes from `from` to `to`,
/// which is always along the way's direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WayEdge {
    pub edge: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
}

/// Represents an [OSM way](https://wiki.openstreetmap.org/wiki/Way),
/// already split into routing graph edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Way {
    pub id: i64,
    pub edges: Vec<WayEdge>,
    pub tags: HashMap<String, String>,

    /// Tags of all route relations this way is a member of.
    pub relations: Vec<HashMap<String, String>>,
}

/// Represents an [OSM node](https://wiki.openstreetmap.org/wiki/Node)
/// which is also a node of the routing graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub tags: HashMap<String, String>,
}

/// Type of an [OSM feature/element](https://wiki.openstreetmap.org/wiki/Elements).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureType {
    Node,
    Way,
    Relation,
}

impl std::fmt::Display for FeatureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node => write!(f, "node"),
            Self::Way => write!(f, "way"),
            Self::Relation => write!(f, "relation"),
        }
    }
}

/// Represents a member of an [OSM relation](https://wiki.openstreetmap.org/wiki/Relation).
///
/// Node members reference routing graph [NodeId]s, way members reference [Way::id]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationMember {
    pub type_: FeatureType,
    pub ref_: i64,
    pub role: String,
}

/// Represents an [OSM relation](https://wiki.openstreetmap.org/wiki/Relation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub id: i64,
    pub members: Vec<RelationMember>,
    pub tags: HashMap<String, String>,
}

/// Union over all possible [OSM features/elements](https://wiki.openstreetmap.org/wiki/Elements).
#[derive(Debug, Clone)]
pub enum Feature {
    Node(Node),
    Way(Way),
    Relation(Relation),
}
