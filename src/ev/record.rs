// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::registry::Field;
use super::{BoolHandle, DecimalHandle, EncodedEnum, EnumHandle, Error, IntHandle, Layout};
use crate::Direction;

/// Read-only view over a single fixed-width record.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    layout: &'a Layout,
    words: &'a [u32],
}

/// Mutable view over a single fixed-width record.
#[derive(Debug)]
pub struct RecordMut<'a> {
    layout: &'a Layout,
    words: &'a mut [u32],
}

fn read(layout: &Layout, words: &[u32], field: &Field, direction: Direction) -> u32 {
    assert!(layout.owns(field), "handle from a different layout");
    (words[field.word as usize] >> field.shift_for(direction)) & field.mask()
}

fn write(words: &mut [u32], field: &Field, direction: Direction, raw: u32) {
    debug_assert!(raw <= field.mask());
    let shift = field.shift_for(direction);
    let word = &mut words[field.word as usize];
    *word = (*word & !(field.mask() << shift)) | (raw << shift);
}

impl<'a> Record<'a> {
    pub(crate) fn new(layout: &'a Layout, words: &'a [u32]) -> Self {
        Self { layout, words }
    }

    pub fn get_bool(&self, handle: &BoolHandle, direction: Direction) -> bool {
        read(self.layout, self.words, &handle.0, direction) != 0
    }

    pub fn get_int(&self, handle: &IntHandle, direction: Direction) -> u32 {
        read(self.layout, self.words, &handle.0, direction)
    }

    pub fn get_decimal(&self, handle: &DecimalHandle, direction: Direction) -> f64 {
        handle.from_raw(read(self.layout, self.words, &handle.field, direction))
    }

    pub fn get_enum<E: EncodedEnum>(&self, handle: &EnumHandle<E>, direction: Direction) -> E {
        let raw = read(self.layout, self.words, &handle.field, direction);
        E::from_ordinal(raw).unwrap_or(E::VALUES[0])
    }
}

impl<'a> RecordMut<'a> {
    pub(crate) fn new(layout: &'a Layout, words: &'a mut [u32]) -> Self {
        Self { layout, words }
    }

    /// Reborrows the record as read-only.
    pub fn as_record(&self) -> Record<'_> {
        Record::new(self.layout, self.words)
    }

    /// Stores a boolean value. Fails with [Error::InvalidArgument] if the handle
    /// was issued for a different layout.
    pub fn set_bool(
        &mut self,
        handle: &BoolHandle,
        direction: Direction,
        value: bool,
    ) -> Result<(), Error> {
        self.layout.check_owns(&handle.0)?;
        write(self.words, &handle.0, direction, value as u32);
        Ok(())
    }

    /// Stores an integer value, failing with [Error::Range] if it doesn't fit in the handle's bits.
    pub fn set_int(
        &mut self,
        handle: &IntHandle,
        direction: Direction,
        value: u32,
    ) -> Result<(), Error> {
        self.layout.check_owns(&handle.0)?;
        if value > handle.0.mask() {
            return Err(self.range_error(&handle.0, value as f64));
        }
        write(self.words, &handle.0, direction, value);
        Ok(())
    }

    /// Stores a decimal value, rounded to the nearest step of the handle's factor.
    /// Fails with [Error::Range] for negative, non-finite or too large values.
    pub fn set_decimal(
        &mut self,
        handle: &DecimalHandle,
        direction: Direction,
        value: f64,
    ) -> Result<(), Error> {
        self.layout.check_owns(&handle.field)?;
        let raw = handle
            .to_raw(value)
            .ok_or_else(|| self.range_error(&handle.field, value))?;
        write(self.words, &handle.field, direction, raw);
        Ok(())
    }

    pub fn set_enum<E: EncodedEnum>(
        &mut self,
        handle: &EnumHandle<E>,
        direction: Direction,
        value: E,
    ) -> Result<(), Error> {
        self.layout.check_owns(&handle.field)?;
        let raw = value.ordinal();
        if raw > handle.field.mask() {
            return Err(self.range_error(&handle.field, raw as f64));
        }
        write(self.words, &handle.field, direction, raw);
        Ok(())
    }

    fn range_error(&self, field: &Field, value: f64) -> Error {
        Error::Range {
            name: self.layout.name_of(field).to_string(),
            value,
        }
    }
}
