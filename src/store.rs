// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::ev::{
    BoolHandle, DecimalHandle, EncodedEnum, EnumHandle, Error, IntHandle, Layout, Record,
    RecordMut,
};
use crate::{Direction, EdgeId};

/// Fixed-width records of encoded values, one per edge.
///
/// The store is allocated once for a known number of edges and never resized.
/// Edge ids must be smaller than [EdgeStore::edge_count]; other ids are a violation
/// of the topology contract and cause a panic.
///
/// There is no internal locking. Writes require `&mut EdgeStore` (or disjoint
/// records from [EdgeStore::records_mut]), and once the import is done the store can be
/// shared between any number of reading threads.
#[derive(Debug, Clone)]
pub struct EdgeStore {
    layout: Layout,
    edge_count: usize,
    words: Vec<u32>,
}

impl EdgeStore {
    /// Allocates zeroed records for `edge_count` edges.
    pub fn new(layout: Layout, edge_count: usize) -> Self {
        let words = vec![0; edge_count * layout.words_per_record()];
        Self {
            layout,
            edge_count,
            words,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn record(&self, edge: EdgeId) -> Record<'_> {
        let range = self.range_of(edge);
        Record::new(&self.layout, &self.words[range])
    }

    pub fn record_mut(&mut self, edge: EdgeId) -> RecordMut<'_> {
        let range = self.range_of(edge);
        RecordMut::new(&self.layout, &mut self.words[range])
    }

    /// Returns mutable views over all records, in edge id order.
    ///
    /// The records are disjoint, so they may be handed out to different threads,
    /// as long as each edge is written by exactly one of them.
    pub fn records_mut(&mut self) -> impl Iterator<Item = (EdgeId, RecordMut<'_>)> {
        let layout = &self.layout;
        let chunk = layout.words_per_record().max(1);
        let empty_records = if layout.words_per_record() == 0 {
            self.edge_count
        } else {
            0
        };

        // Layouts without any words still have one (empty) record per edge
        let with_words = self
            .words
            .chunks_mut(chunk)
            .map(move |words| RecordMut::new(layout, words));
        let without_words =
            (0..empty_records).map(move |_| RecordMut::new(layout, Default::default()));

        with_words
            .chain(without_words)
            .enumerate()
            .map(|(idx, r)| (idx as EdgeId, r))
    }

    pub fn get_bool(&self, handle: &BoolHandle, edge: EdgeId, direction: Direction) -> bool {
        self.record(edge).get_bool(handle, direction)
    }

    pub fn get_int(&self, handle: &IntHandle, edge: EdgeId, direction: Direction) -> u32 {
        self.record(edge).get_int(handle, direction)
    }

    pub fn get_decimal(&self, handle: &DecimalHandle, edge: EdgeId, direction: Direction) -> f64 {
        self.record(edge).get_decimal(handle, direction)
    }

    pub fn get_enum<E: EncodedEnum>(
        &self,
        handle: &EnumHandle<E>,
        edge: EdgeId,
        direction: Direction,
    ) -> E {
        self.record(edge).get_enum(handle, direction)
    }

    pub fn set_bool(
        &mut self,
        handle: &BoolHandle,
        edge: EdgeId,
        direction: Direction,
        value: bool,
    ) -> Result<(), Error> {
        self.record_mut(edge).set_bool(handle, direction, value)
    }

    pub fn set_int(
        &mut self,
        handle: &IntHandle,
        edge: EdgeId,
        direction: Direction,
        value: u32,
    ) -> Result<(), Error> {
        self.record_mut(edge).set_int(handle, direction, value)
    }

    pub fn set_decimal(
        &mut self,
        handle: &DecimalHandle,
        edge: EdgeId,
        direction: Direction,
        value: f64,
    ) -> Result<(), Error> {
        self.record_mut(edge).set_decimal(handle, direction, value)
    }

    pub fn set_enum<E: EncodedEnum>(
        &mut self,
        handle: &EnumHandle<E>,
        edge: EdgeId,
        direction: Direction,
        value: E,
    ) -> Result<(), Error> {
        self.record_mut(edge).set_enum(handle, direction, value)
    }

    fn range_of(&self, edge: EdgeId) -> std::ops::Range<usize> {
        let idx = edge as usize;
        assert!(
            idx < self.edge_count,
            "edge {idx} out of bounds ({} edges)",
            self.edge_count,
        );
        let len = self.layout.words_per_record();
        idx * len..(idx + 1) * len
    }
}
