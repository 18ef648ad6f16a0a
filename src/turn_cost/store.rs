// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::btree_map::{BTreeMap, Entry};

use crate::ev::{BoolHandle, DecimalHandle, Error, Layout, Record, RecordMut};
use crate::{Direction, EdgeId, NodeId};

/// Identifies a turn: entering `via` over `from`, and leaving it over `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Turn {
    pub from: EdgeId,
    pub via: NodeId,
    pub to: EdgeId,
}

/// Sparse table of turn restrictions and turn costs.
///
/// Only turns with non-default values are stored; every other turn reads as
/// "not restricted" and "zero cost". Several encoded values (e.g. restrictions
/// for different vehicles) live side by side in the same record, as laid out
/// by the [Layout] of a dedicated [Registry](crate::ev::Registry).
///
/// Turn cost encoded values are never directional; the direction is implied by
/// the order of the edges.
#[derive(Debug, Clone)]
pub struct TurnCostStore {
    layout: Layout,
    index: BTreeMap<Turn, usize>,
    words: Vec<u32>,
}

impl TurnCostStore {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            index: BTreeMap::default(),
            words: Vec::default(),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Returns the number of turns with a record.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns all recorded turns with their records, ordered by (from, via, to).
    pub fn iter(&self) -> impl Iterator<Item = (Turn, Record<'_>)> {
        self.index
            .iter()
            .map(|(&turn, &idx)| (turn, Record::new(&self.layout, self.words_at(idx))))
    }

    pub fn record(&self, from: EdgeId, via: NodeId, to: EdgeId) -> Option<Record<'_>> {
        self.index
            .get(&Turn { from, via, to })
            .map(|&idx| Record::new(&self.layout, self.words_at(idx)))
    }

    /// Returns `false` for turns without a record.
    pub fn get_bool(&self, handle: &BoolHandle, from: EdgeId, via: NodeId, to: EdgeId) -> bool {
        self.record(from, via, to)
            .map(|r| r.get_bool(handle, Direction::Forward))
            .unwrap_or(false)
    }

    /// Returns `0.0` for turns without a record.
    pub fn get_decimal(
        &self,
        handle: &DecimalHandle,
        from: EdgeId,
        via: NodeId,
        to: EdgeId,
    ) -> f64 {
        self.record(from, via, to)
            .map(|r| r.get_decimal(handle, Direction::Forward))
            .unwrap_or(0.0)
    }

    /// Stores a flag of a turn. Clearing a flag of a turn without a record
    /// doesn't create one.
    pub fn set_bool(
        &mut self,
        handle: &BoolHandle,
        from: EdgeId,
        via: NodeId,
        to: EdgeId,
        value: bool,
    ) -> Result<(), Error> {
        self.layout.check_owns(&handle.0)?;
        let turn = Turn { from, via, to };
        if !value && !self.index.contains_key(&turn) {
            return Ok(());
        }

        self.record_mut(turn)
            .set_bool(handle, Direction::Forward, value)
    }

    /// Stores a finite turn cost. Fails with [Error::Range] (without creating a record)
    /// if the cost doesn't fit in the handle's domain. Setting a zero cost of a turn
    /// without a record doesn't create one.
    pub fn set_decimal(
        &mut self,
        handle: &DecimalHandle,
        from: EdgeId,
        via: NodeId,
        to: EdgeId,
        value: f64,
    ) -> Result<(), Error> {
        self.layout.check_owns(&handle.field)?;
        let raw = handle.to_raw(value).ok_or_else(|| Error::Range {
            name: self.layout.name_of(&handle.field).to_string(),
            value,
        })?;

        let turn = Turn { from, via, to };
        if raw == 0 && !self.index.contains_key(&turn) {
            return Ok(());
        }

        self.record_mut(turn)
            .set_decimal(handle, Direction::Forward, value)
    }

    fn record_mut(&mut self, turn: Turn) -> RecordMut<'_> {
        let len = self.layout.words_per_record();
        let idx = match self.index.entry(turn) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let idx = self.words.len() / len.max(1);
                self.words.resize(self.words.len() + len, 0);
                *e.insert(idx)
            }
        };

        RecordMut::new(&self.layout, &mut self.words[idx * len..(idx + 1) * len])
    }

    fn words_at(&self, idx: usize) -> &[u32] {
        let len = self.layout.words_per_record();
        &self.words[idx * len..(idx + 1) * len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ev::Registry;

    fn fixture() -> (TurnCostStore, BoolHandle, BoolHandle, DecimalHandle) {
        let mut r = Registry::new(32);
        let bike = r.register_bool("bike_turn_restriction", false).unwrap();
        let mtb = r.register_bool("mtb_turn_restriction", false).unwrap();
        let cost = r.register_decimal("turn_cost", 7, 1.0, false).unwrap();
        (TurnCostStore::new(r.build()), bike, mtb, cost)
    }

    #[test]
    fn defaults_for_missing_turns() {
        let (s, bike, _, cost) = fixture();
        assert!(!s.get_bool(&bike, 1, 2, 3));
        assert_eq!(s.get_decimal(&cost, 1, 2, 3), 0.0);
        assert!(s.is_empty());
    }

    #[test]
    fn set_and_get() {
        let (mut s, bike, mtb, cost) = fixture();
        s.set_bool(&bike, 1, 2, 3, true).unwrap();
        s.set_decimal(&cost, 4, 2, 1, 30.0).unwrap();

        assert!(s.get_bool(&bike, 1, 2, 3));
        assert!(!s.get_bool(&mtb, 1, 2, 3));
        assert_eq!(s.get_decimal(&cost, 4, 2, 1), 30.0);

        // Turns are ordered triples
        assert!(!s.get_bool(&bike, 3, 2, 1));
        assert!(!s.get_bool(&bike, 1, 5, 3));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn handles_coexist_on_one_turn() {
        let (mut s, bike, mtb, cost) = fixture();
        s.set_bool(&bike, 1, 2, 3, true).unwrap();
        s.set_bool(&mtb, 1, 2, 3, true).unwrap();
        s.set_decimal(&cost, 1, 2, 3, 12.0).unwrap();
        s.set_bool(&bike, 1, 2, 3, false).unwrap();

        assert!(!s.get_bool(&bike, 1, 2, 3));
        assert!(s.get_bool(&mtb, 1, 2, 3));
        assert_eq!(s.get_decimal(&cost, 1, 2, 3), 12.0);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn out_of_range_cost_creates_no_record() {
        let (mut s, _, _, cost) = fixture();
        assert!(matches!(
            s.set_decimal(&cost, 1, 2, 3, 200.0),
            Err(Error::Range { .. })
        ));
        assert!(s.is_empty());
    }

    #[test]
    fn defaults_create_no_record() {
        let (mut s, bike, mtb, cost) = fixture();
        s.set_bool(&bike, 1, 2, 3, false).unwrap();
        s.set_decimal(&cost, 1, 2, 3, 0.0).unwrap();
        assert!(s.is_empty());

        // Clearing a flag of a recorded turn keeps its other values
        s.set_bool(&mtb, 1, 2, 3, true).unwrap();
        s.set_bool(&bike, 1, 2, 3, false).unwrap();
        assert_eq!(s.len(), 1);
        assert!(s.get_bool(&mtb, 1, 2, 3));
    }

    #[test]
    fn foreign_handles_are_rejected() {
        let (mut s, _, _, _) = fixture();
        let mut other = Registry::new(32);
        let car = other.register_bool("car_turn_restriction", false).unwrap();
        let cost = other.register_decimal("turn_cost", 7, 1.0, false).unwrap();

        assert!(matches!(
            s.set_bool(&car, 1, 2, 3, true),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            s.set_decimal(&cost, 1, 2, 3, 10.0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(s.is_empty());
    }

    #[test]
    fn iter_in_key_order() {
        let (mut s, bike, _, _) = fixture();
        s.set_bool(&bike, 5, 1, 6, true).unwrap();
        s.set_bool(&bike, 1, 9, 2, true).unwrap();
        s.set_bool(&bike, 1, 3, 2, true).unwrap();

        let turns: Vec<_> = s.iter().map(|(t, _)| (t.from, t.via, t.to)).collect();
        assert_eq!(turns, vec![(1, 3, 2), (1, 9, 2), (5, 1, 6)]);
        assert!(s.iter().all(|(_, r)| r.get_bool(&bike, Direction::Forward)));
    }
}
