// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BTreeSet, HashMap};

use super::encoder::VehicleEncodedValues;
use super::model::{self, FeatureType, WayEdge};
use super::profile::{Profile, TurnRestriction};
use crate::ev::{BoolHandle, Error};
use crate::{EdgeId, EdgeStore, NodeId, TurnCostStore};

/// Counters of what happened during an import.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    pub accessible_ways: usize,
    pub inaccessible_ways: usize,
    pub restrictions: usize,
    pub invalid_restrictions: usize,
    pub restricted_turns: usize,
}

/// Result of an import, returned by [Importer::finish].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Nodes which block passage for the profile. Splitting edges at these nodes
    /// is the responsibility of the graph topology.
    pub barrier_nodes: BTreeSet<NodeId>,
    pub stats: ImportStats,
}

/// Writes attributes of [OSM features](model::Feature) of a single [Profile]
/// into an [EdgeStore] and a [TurnCostStore].
///
/// Ways must be added before the turn restrictions which reference them.
/// Every [WayEdge::edge] must be a valid edge of the [EdgeStore].
pub struct Importer<'a> {
    profile: &'a Profile<'a>,
    encoded: VehicleEncodedValues,
    turn_restriction: BoolHandle,
    edges: &'a mut EdgeStore,
    turn_costs: &'a mut TurnCostStore,
    way_edges: HashMap<i64, Vec<WayEdge>>,
    node_edges: HashMap<NodeId, Vec<EdgeId>>,
    barrier_nodes: BTreeSet<NodeId>,
    stats: ImportStats,
}

impl<'a> Importer<'a> {
    pub fn new(
        profile: &'a Profile<'a>,
        encoded: VehicleEncodedValues,
        turn_restriction: BoolHandle,
        edges: &'a mut EdgeStore,
        turn_costs: &'a mut TurnCostStore,
    ) -> Self {
        Self {
            profile,
            encoded,
            turn_restriction,
            edges,
            turn_costs,
            way_edges: HashMap::default(),
            node_edges: HashMap::default(),
            barrier_nodes: BTreeSet::default(),
            stats: ImportStats::default(),
        }
    }

    /// Adds all provided features, in order.
    pub fn add_features<I>(&mut self, features: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = model::Feature>,
    {
        for f in features {
            self.add_feature(&f)?;
        }
        Ok(())
    }

    pub fn add_feature(&mut self, f: &model::Feature) -> Result<(), Error> {
        match f {
            model::Feature::Node(n) => {
                self.add_node(n);
                Ok(())
            }
            model::Feature::Way(w) => self.add_way(w),
            model::Feature::Relation(r) => self.add_restriction(r),
        }
    }

    pub fn add_node(&mut self, n: &model::Node) {
        if self.profile.is_barrier(&n.tags) {
            log::trace!("{}: node {} is a barrier", self.profile.name, n.id);
            self.barrier_nodes.insert(n.id);
        }
    }

    /// Computes the attributes of a way (see [Profile::way_attributes]),
    /// and stores them on all of its edges.
    pub fn add_way(&mut self, w: &model::Way) -> Result<(), Error> {
        let attrs = self.profile.way_attributes(&w.tags, &w.relations);

        if attrs.is_accessible() {
            self.stats.accessible_ways += 1;
        } else {
            self.stats.inaccessible_ways += 1;
        }

        for e in &w.edges {
            self.encoded.write(self.edges, e.edge, &attrs)?;
        }

        self.update_state_after_adding_way(w);
        Ok(())
    }

    fn update_state_after_adding_way(&mut self, w: &model::Way) {
        for e in &w.edges {
            for node in [e.from, e.to] {
                let incident = self.node_edges.entry(node).or_default();
                if !incident.contains(&e.edge) {
                    incident.push(e.edge);
                }
            }
        }
        self.way_edges.insert(w.id, w.edges.clone());
    }

    /// Records a turn restriction relation in the [TurnCostStore].
    ///
    /// Relations which aren't applicable for the profile are ignored.
    /// Invalid or unsupported relations (e.g. with a via way) are skipped with a warning.
    /// Only a turn restriction handle foreign to the [TurnCostStore] is an error.
    pub fn add_restriction(&mut self, r: &model::Relation) -> Result<(), Error> {
        let kind = self.profile.restriction_kind(&r.tags);
        if kind == TurnRestriction::Inapplicable {
            return Ok(());
        }

        match self.get_restriction_edges(r) {
            Ok(turn) => {
                self.stats.restrictions += 1;
                self.store_restriction(turn, kind)
            }
            Err(e) => {
                self.stats.invalid_restrictions += 1;
                log::warn!(
                    "{}: skipping turn restriction {}: {}",
                    self.profile.name,
                    r.id,
                    e
                );
                Ok(())
            }
        }
    }

    /// Returns the (from edge, via node, to edge) triple of a turn restriction.
    fn get_restriction_edges(
        &self,
        r: &model::Relation,
    ) -> Result<(EdgeId, NodeId, EdgeId), InvalidRestriction> {
        let (from, via, to) = Self::get_restriction_members(r)?;

        let via = match via.type_ {
            FeatureType::Node => NodeId::try_from(via.ref_)
                .ok()
                .filter(|id| self.node_edges.contains_key(id))
                .ok_or(InvalidRestriction::ReferenceToUnknownNode(via.ref_))?,
            FeatureType::Way => return Err(InvalidRestriction::ViaWayUnsupported),
            FeatureType::Relation => {
                return Err(InvalidRestriction::InvalidMemberType(
                    via.role.clone(),
                    via.type_,
                ))
            }
        };

        let from = self.get_edge_at(from, via)?;
        let to = self.get_edge_at(to, via)?;
        Ok((from, via, to))
    }

    /// Returns the `from`, `via` and `to` members of a turn restriction,
    /// ensuring there is exactly one of each.
    fn get_restriction_members(
        r: &model::Relation,
    ) -> Result<
        (
            &model::RelationMember,
            &model::RelationMember,
            &model::RelationMember,
        ),
        InvalidRestriction,
    > {
        let mut from: Option<&model::RelationMember> = None;
        let mut via: Option<&model::RelationMember> = None;
        let mut to: Option<&model::RelationMember> = None;

        for m in &r.members {
            let (slot, duplicate) = match m.role.as_str() {
                "from" => (&mut from, InvalidRestriction::MultipleFromMembers),
                "via" => (&mut via, InvalidRestriction::MultipleViaMembers),
                "to" => (&mut to, InvalidRestriction::MultipleToMembers),
                _ => continue,
            };

            if slot.is_some() {
                return Err(duplicate);
            }
            *slot = Some(m);
        }

        match (from, via, to) {
            (Some(from), Some(via), Some(to)) => Ok((from, via, to)),
            (None, _, _) => Err(InvalidRestriction::MissingFromMember),
            (_, None, _) => Err(InvalidRestriction::MissingViaMember),
            (_, _, None) => Err(InvalidRestriction::MissingToMember),
        }
    }

    /// Returns the end edge of a `from` or `to` way member at the `via` node.
    ///
    /// The `via` node must be the first or the last node of the way,
    /// otherwise the member is [disjoint](InvalidRestriction::Disjoint).
    fn get_edge_at(
        &self,
        m: &model::RelationMember,
        via: NodeId,
    ) -> Result<EdgeId, InvalidRestriction> {
        if m.type_ != FeatureType::Way {
            return Err(InvalidRestriction::InvalidMemberType(
                m.role.clone(),
                m.type_,
            ));
        }

        let edges = self
            .way_edges
            .get(&m.ref_)
            .ok_or(InvalidRestriction::ReferenceToUnknownWay(m.ref_))?;

        match (edges.first(), edges.last()) {
            (Some(first), _) if first.from == via => Ok(first.edge),
            (_, Some(last)) if last.to == via => Ok(last.edge),
            _ => Err(InvalidRestriction::Disjoint(m.ref_)),
        }
    }

    fn store_restriction(
        &mut self,
        (from, via, to): (EdgeId, NodeId, EdgeId),
        kind: TurnRestriction,
    ) -> Result<(), Error> {
        match kind {
            TurnRestriction::Prohibitory => self.set_restricted(from, via, to),

            TurnRestriction::Mandatory => {
                let others: Vec<EdgeId> = self
                    .node_edges
                    .get(&via)
                    .map(|edges| edges.iter().copied().filter(|&e| e != to).collect())
                    .unwrap_or_default();

                for other in others {
                    self.set_restricted(from, via, other)?;
                }
                Ok(())
            }

            TurnRestriction::Inapplicable => Ok(()),
        }
    }

    fn set_restricted(&mut self, from: EdgeId, via: NodeId, to: EdgeId) -> Result<(), Error> {
        self.turn_costs
            .set_bool(&self.turn_restriction, from, via, to, true)?;
        self.stats.restricted_turns += 1;
        Ok(())
    }

    pub fn barrier_nodes(&self) -> &BTreeSet<NodeId> {
        &self.barrier_nodes
    }

    pub fn stats(&self) -> ImportStats {
        self.stats
    }

    pub fn finish(self) -> ImportSummary {
        log::debug!(
            "{}: imported {} accessible and {} inaccessible ways, \
             {} turn restrictions ({} invalid) restricting {} turns, {} barrier nodes",
            self.profile.name,
            self.stats.accessible_ways,
            self.stats.inaccessible_ways,
            self.stats.restrictions,
            self.stats.invalid_restrictions,
            self.stats.restricted_turns,
            self.barrier_nodes.len(),
        );

        ImportSummary {
            barrier_nodes: self.barrier_nodes,
            stats: self.stats,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
enum InvalidRestriction {
    #[error("'from' or 'to' way {0} does not touch the 'via' node")]
    Disjoint(i64),

    #[error("multiple 'from' members")]
    MultipleFromMembers,

    #[error("multiple 'via' members")]
    MultipleViaMembers,

    #[error("multiple 'to' members")]
    MultipleToMembers,

    #[error("missing 'from' member")]
    MissingFromMember,

    #[error("missing 'via' member")]
    MissingViaMember,

    #[error("missing 'to' member")]
    MissingToMember,

    #[error("'via' ways are not supported")]
    ViaWayUnsupported,

    #[error("reference to unknown node {0}")]
    ReferenceToUnknownNode(i64),

    #[error("reference to unknown way {0}")]
    ReferenceToUnknownWay(i64),

    #[error("invalid member type for {0:?}: {1}")]
    InvalidMemberType(String, FeatureType),
}

#[cfg(test)]
mod tests {
    use super::super::MOUNTAIN_BIKE_PROFILE;
    use super::*;
    use crate::ev::Registry;
    use crate::Direction::{Backward, Forward};

    macro_rules! tags {
        {} => { HashMap::default() };
        {$( $k:literal : $v:literal ),+} => {
            HashMap::from_iter([ $( ($k.to_string(), $v.to_string()) ),+ ])
        };
    }

    fn way(
        id: i64,
        edges: &[(EdgeId, NodeId, NodeId)],
        tags: HashMap<String, String>,
    ) -> model::Way {
        model::Way {
            id,
            edges: edges
                .iter()
                .map(|&(edge, from, to)| WayEdge { edge, from, to })
                .collect(),
            tags,
            relations: vec![],
        }
    }

    fn member(type_: FeatureType, ref_: i64, role: &str) -> model::RelationMember {
        model::RelationMember {
            type_,
            ref_,
            role: role.to_string(),
        }
    }

    fn restriction(
        id: i64,
        restriction: &str,
        members: Vec<model::RelationMember>,
    ) -> model::Relation {
        model::Relation {
            id,
            members,
            tags: HashMap::from_iter([
                ("type".to_string(), "restriction".to_string()),
                ("restriction".to_string(), restriction.to_string()),
            ]),
        }
    }

    struct Fixture {
        edges: EdgeStore,
        turn_costs: TurnCostStore,
        encoded: VehicleEncodedValues,
        turn_restriction: BoolHandle,
    }

    impl Fixture {
        fn new(edge_count: usize) -> Self {
            let mut edge_registry = Registry::new(64);
            let encoded =
                VehicleEncodedValues::register(&mut edge_registry, &MOUNTAIN_BIKE_PROFILE).unwrap();
            let mut turn_registry = Registry::new(32);
            let turn_restriction = VehicleEncodedValues::register_turn_restriction(
                &mut turn_registry,
                &MOUNTAIN_BIKE_PROFILE,
            )
            .unwrap();

            Self {
                edges: EdgeStore::new(edge_registry.build(), edge_count),
                turn_costs: TurnCostStore::new(turn_registry.build()),
                encoded,
                turn_restriction,
            }
        }

        fn importer(&mut self) -> Importer<'_> {
            Importer::new(
                &MOUNTAIN_BIKE_PROFILE,
                self.encoded,
                self.turn_restriction,
                &mut self.edges,
                &mut self.turn_costs,
            )
        }
    }

    //  1 ─0─ 2 ─1─ 3 ─2→ 4
    //              │
    //              3
    //              │
    //              5
    fn add_ways(importer: &mut Importer) {
        importer
            .add_way(&way(10, &[(0, 1, 2), (1, 2, 3)], tags! {"highway": "residential"}))
            .unwrap();
        importer
            .add_way(&way(11, &[(2, 3, 4)], tags! {"highway": "track", "oneway": "yes"}))
            .unwrap();
        importer
            .add_way(&way(12, &[(3, 3, 5)], tags! {"highway": "footway"}))
            .unwrap();
    }

    #[test]
    fn ways() {
        let mut f = Fixture::new(5);
        let stats = {
            let mut importer = f.importer();
            add_ways(&mut importer);
            importer
                .add_way(&way(13, &[(4, 5, 1)], tags! {"highway": "motorway"}))
                .unwrap();
            importer.finish().stats
        };

        assert_eq!(stats.accessible_ways, 3);
        assert_eq!(stats.inaccessible_ways, 1);

        let ev = &f.encoded;
        assert!(ev.is_accessible(&f.edges, 1, Forward));
        assert!(ev.is_accessible(&f.edges, 1, Backward));
        assert!(ev.is_accessible(&f.edges, 2, Forward));
        assert!(!ev.is_accessible(&f.edges, 2, Backward));
        assert!(!ev.is_accessible(&f.edges, 4, Forward));
        assert_eq!(f.edges.get_decimal(&ev.average_speed, 0, Forward), 16.0);
        assert_eq!(f.edges.get_decimal(&ev.average_speed, 3, Backward), 4.0);
        assert_eq!(f.edges.get_decimal(&ev.average_speed, 2, Backward), 0.0);
    }

    #[test]
    fn way_with_route_relations() {
        let mut f = Fixture::new(1);
        {
            let mut importer = f.importer();
            let mut w = way(10, &[(0, 1, 2)], tags! {"highway": "track"});
            w.relations = vec![
                tags! {"route": "hiking", "network": "lwn"},
                tags! {"route": "bicycle", "network": "lcn"},
            ];
            importer.add_way(&w).unwrap();
        }

        assert_eq!(
            f.edges.get_enum(&f.encoded.priority, 0, Forward),
            crate::ev::Priority::Best
        );
        assert_eq!(
            f.edges.get_enum(&f.encoded.bike_network, 0, Forward),
            crate::ev::RouteNetwork::Local
        );
    }

    #[test]
    fn barrier_nodes() {
        let mut f = Fixture::new(0);
        let mut importer = f.importer();
        importer.add_node(&model::Node {
            id: 1,
            tags: tags! {"barrier": "kissing_gate"},
        });
        importer.add_node(&model::Node {
            id: 2,
            tags: tags! {"barrier": "kissing_gate", "bicycle": "no"},
        });
        importer.add_node(&model::Node {
            id: 3,
            tags: tags! {"barrier": "stile"},
        });
        importer.add_node(&model::Node { id: 4, tags: tags! {} });

        assert_eq!(importer.barrier_nodes(), &BTreeSet::from([2, 3]));
    }

    #[test]
    fn prohibitory_restriction() {
        let mut f = Fixture::new(4);
        {
            let mut importer = f.importer();
            add_ways(&mut importer);
            let r = restriction(
                100,
                "no_left_turn",
                vec![
                    member(FeatureType::Way, 10, "from"),
                    member(FeatureType::Node, 3, "via"),
                    member(FeatureType::Way, 11, "to"),
                ],
            );
            importer.add_restriction(&r).unwrap();
            assert_eq!(importer.stats().restrictions, 1);
        }

        let turns: Vec<_> = f
            .turn_costs
            .iter()
            .map(|(t, _)| (t.from, t.via, t.to))
            .collect();
        assert_eq!(turns, vec![(1, 3, 2)]);
    }

    //        5
    //        │
    //       (1)
    //        │
    //  1 ─0─ 3 ─2─ 4
    //
    // Way 11 runs 5 → 3 → 4, so node 3 is in its middle.
    #[test]
    fn via_node_inside_member_way() {
        let mut f = Fixture::new(3);
        let (stats, summary) = {
            let mut importer = f.importer();
            importer
                .add_way(&way(10, &[(0, 1, 3)], tags! {"highway": "residential"}))
                .unwrap();
            importer
                .add_way(&way(11, &[(1, 5, 3), (2, 3, 4)], tags! {"highway": "residential"}))
                .unwrap();

            for (id, kind) in [(100, "no_left_turn"), (101, "only_right_turn")] {
                let r = restriction(
                    id,
                    kind,
                    vec![
                        member(FeatureType::Way, 10, "from"),
                        member(FeatureType::Node, 3, "via"),
                        member(FeatureType::Way, 11, "to"),
                    ],
                );
                importer.add_restriction(&r).unwrap();
            }
            let stats = importer.stats();
            (stats, importer.finish())
        };

        assert_eq!(stats.restrictions, 0);
        assert_eq!(stats.invalid_restrictions, 2);
        assert_eq!(summary.stats.restricted_turns, 0);
        assert!(f.turn_costs.is_empty());
    }

    #[test]
    fn member_ways_are_matched_by_their_ends() {
        // The "from" way ends at the via node, the "to" way starts there
        let mut f = Fixture::new(4);
        {
            let mut importer = f.importer();
            importer
                .add_way(&way(10, &[(0, 1, 2), (1, 2, 3)], tags! {"highway": "residential"}))
                .unwrap();
            importer
                .add_way(&way(11, &[(2, 3, 4), (3, 4, 5)], tags! {"highway": "residential"}))
                .unwrap();

            let r = restriction(
                100,
                "no_straight_on",
                vec![
                    member(FeatureType::Way, 10, "from"),
                    member(FeatureType::Node, 3, "via"),
                    member(FeatureType::Way, 11, "to"),
                ],
            );
            importer.add_restriction(&r).unwrap();
        }

        assert!(f.turn_costs.get_bool(&f.turn_restriction, 1, 3, 2));
        assert_eq!(f.turn_costs.len(), 1);
    }

    #[test]
    fn foreign_restriction_handle_is_an_error() {
        let mut f = Fixture::new(4);
        let mut other = Registry::new(32);
        f.turn_restriction =
            VehicleEncodedValues::register_turn_restriction(&mut other, &MOUNTAIN_BIKE_PROFILE)
                .unwrap();

        let mut importer = f.importer();
        add_ways(&mut importer);
        let r = restriction(
            100,
            "no_left_turn",
            vec![
                member(FeatureType::Way, 10, "from"),
                member(FeatureType::Node, 3, "via"),
                member(FeatureType::Way, 11, "to"),
            ],
        );
        assert!(matches!(
            importer.add_restriction(&r),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(importer.stats().restricted_turns, 0);
    }

    #[test]
    fn mandatory_restriction() {
        let mut f = Fixture::new(4);
        {
            let mut importer = f.importer();
            add_ways(&mut importer);
            let r = restriction(
                100,
                "only_straight_on",
                vec![
                    member(FeatureType::Way, 10, "from"),
                    member(FeatureType::Node, 3, "via"),
                    member(FeatureType::Way, 11, "to"),
                ],
            );
            importer.add_restriction(&r).unwrap();
        }

        let r = &f.turn_restriction;
        assert!(!f.turn_costs.get_bool(r, 1, 3, 2));
        assert!(f.turn_costs.get_bool(r, 1, 3, 3));
        assert!(f.turn_costs.get_bool(r, 1, 3, 1));
    }

    #[test]
    fn inapplicable_restrictions() {
        let mut f = Fixture::new(4);
        let stats = {
            let mut importer = f.importer();
            add_ways(&mut importer);

            let mut exempted = restriction(
                100,
                "no_left_turn",
                vec![
                    member(FeatureType::Way, 10, "from"),
                    member(FeatureType::Node, 3, "via"),
                    member(FeatureType::Way, 11, "to"),
                ],
            );
            exempted.tags.insert("except".to_string(), "bicycle".to_string());
            importer.add_restriction(&exempted).unwrap();

            let mut not_a_restriction = exempted.clone();
            not_a_restriction.tags = tags! {"type": "route", "route": "bicycle"};
            importer.add_restriction(&not_a_restriction).unwrap();

            importer.stats()
        };

        assert_eq!(stats.restrictions, 0);
        assert_eq!(stats.invalid_restrictions, 0);
        assert!(f.turn_costs.is_empty());
    }

    #[test]
    fn invalid_restrictions_are_skipped() {
        let mut f = Fixture::new(4);
        let stats = {
            let mut importer = f.importer();
            add_ways(&mut importer);

            let invalid = [
                // via way
                vec![
                    member(FeatureType::Way, 10, "from"),
                    member(FeatureType::Way, 12, "via"),
                    member(FeatureType::Way, 11, "to"),
                ],
                // unknown way
                vec![
                    member(FeatureType::Way, 99, "from"),
                    member(FeatureType::Node, 3, "via"),
                    member(FeatureType::Way, 11, "to"),
                ],
                // unknown via node
                vec![
                    member(FeatureType::Way, 10, "from"),
                    member(FeatureType::Node, 42, "via"),
                    member(FeatureType::Way, 11, "to"),
                ],
                // from way doesn't touch via
                vec![
                    member(FeatureType::Way, 12, "from"),
                    member(FeatureType::Node, 2, "via"),
                    member(FeatureType::Way, 10, "to"),
                ],
                // missing to
                vec![
                    member(FeatureType::Way, 10, "from"),
                    member(FeatureType::Node, 3, "via"),
                ],
                // multiple from
                vec![
                    member(FeatureType::Way, 10, "from"),
                    member(FeatureType::Way, 12, "from"),
                    member(FeatureType::Node, 3, "via"),
                    member(FeatureType::Way, 11, "to"),
                ],
            ];

            for (idx, members) in invalid.into_iter().enumerate() {
                importer
                    .add_restriction(&restriction(100 + idx as i64, "no_left_turn", members))
                    .unwrap();
            }
            importer.stats()
        };

        assert_eq!(stats.restrictions, 0);
        assert_eq!(stats.invalid_restrictions, 6);
        assert!(f.turn_costs.is_empty());
    }

    #[test]
    fn restriction_members() {
        let r = restriction(
            1,
            "no_u_turn",
            vec![
                member(FeatureType::Way, 10, "from"),
                member(FeatureType::Node, 3, "via"),
                member(FeatureType::Way, 10, "to"),
                member(FeatureType::Node, 7, "location_hint"),
            ],
        );
        let (from, via, to) = Importer::get_restriction_members(&r).unwrap();
        assert_eq!((from.ref_, via.ref_, to.ref_), (10, 3, 10));

        let r = restriction(2, "no_u_turn", vec![member(FeatureType::Node, 3, "via")]);
        assert_eq!(
            Importer::get_restriction_members(&r).unwrap_err(),
            InvalidRestriction::MissingFromMember
        );
    }
}
