// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::any::type_name;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use super::{EncodedEnum, Error};
use crate::Direction;

/// Fields never cross a word boundary, so that reading a field is a single shift-and-mask.
const WORD_BITS: u32 = u32::BITS;

static NEXT_LAYOUT_ID: AtomicU32 = AtomicU32::new(1);

/// Location of an encoded value within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Field {
    pub(crate) layout: u32,
    pub(crate) word: u32,
    pub(crate) shift: u8,
    pub(crate) bits: u8,
    pub(crate) directional: bool,
}

impl Field {
    pub(crate) fn mask(&self) -> u32 {
        if self.bits as u32 >= WORD_BITS {
            u32::MAX
        } else {
            (1 << self.bits) - 1
        }
    }

    /// Shift of the bits for the provided direction. Non-directional fields
    /// use the same bits in both directions.
    pub(crate) fn shift_for(&self, direction: Direction) -> u32 {
        if self.directional && direction == Direction::Backward {
            self.shift as u32 + self.bits as u32
        } else {
            self.shift as u32
        }
    }

    fn width(&self) -> u32 {
        if self.directional {
            2 * self.bits as u32
        } else {
            self.bits as u32
        }
    }
}

/// Handle to a boolean encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoolHandle(pub(crate) Field);

/// Handle to an unsigned integer encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntHandle(pub(crate) Field);

impl IntHandle {
    /// Largest storable value.
    pub fn max_value(&self) -> u32 {
        self.0.mask()
    }
}

/// Handle to a non-negative decimal encoded value, stored in steps of `factor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecimalHandle {
    pub(crate) field: Field,
    pub(crate) factor: f64,
}

impl DecimalHandle {
    /// Size of a single discretization step.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Largest storable value.
    pub fn max_value(&self) -> f64 {
        self.field.mask() as f64 * self.factor
    }

    /// Returns the value which would be read back after storing `value`.
    /// Discretizing an already discretized value returns it unchanged.
    pub fn discretize(&self, value: f64) -> Option<f64> {
        self.to_raw(value).map(|raw| self.from_raw(raw))
    }

    pub(crate) fn to_raw(&self, value: f64) -> Option<u32> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }

        let raw = (value / self.factor).round();
        if raw > self.field.mask() as f64 {
            None
        } else {
            Some(raw as u32)
        }
    }

    pub(crate) fn from_raw(&self, raw: u32) -> f64 {
        raw as f64 * self.factor
    }
}

/// Handle to an [EncodedEnum] encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumHandle<E: EncodedEnum> {
    pub(crate) field: Field,
    _values: PhantomData<E>,
}

/// Kind of an encoded value, as seen by a [Layout].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind {
    Bool,
    Int,
    Decimal { factor: f64 },
    Enum { type_name: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    name: String,
    kind: Kind,
    field: Field,
}

/// Collects encoded values of a single profile (or a single turn cost table)
/// and assigns each one a fixed range of bits in a record.
///
/// Bits are assigned in the registration order. Changing that order changes the
/// [Layout] and invalidates all stores created with the old one.
#[derive(Debug)]
pub struct Registry {
    id: u32,
    max_words: u32,
    word: u32,
    shift: u32,
    entries: Vec<Entry>,
    built: Option<Layout>,
}

impl Registry {
    /// Creates an empty registry for records of at most `record_bits` bits
    /// (rounded up to whole 32-bit words).
    pub fn new(record_bits: u32) -> Self {
        Self {
            id: NEXT_LAYOUT_ID.fetch_add(1, Ordering::Relaxed),
            max_words: record_bits.div_ceil(WORD_BITS),
            word: 0,
            shift: 0,
            entries: Vec::default(),
            built: None,
        }
    }

    pub fn register_bool(&mut self, name: &str, directional: bool) -> Result<BoolHandle, Error> {
        self.allocate(name, 1, directional, Kind::Bool)
            .map(BoolHandle)
    }

    pub fn register_int(
        &mut self,
        name: &str,
        bits: u8,
        directional: bool,
    ) -> Result<IntHandle, Error> {
        self.allocate(name, bits, directional, Kind::Int)
            .map(IntHandle)
    }

    /// Registers a decimal value stored as `round(value / factor)` in `bits` bits.
    pub fn register_decimal(
        &mut self,
        name: &str,
        bits: u8,
        factor: f64,
        directional: bool,
    ) -> Result<DecimalHandle, Error> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "factor of {name:?} must be positive, got {factor}"
            )));
        }

        self.allocate(name, bits, directional, Kind::Decimal { factor })
            .map(|field| DecimalHandle { field, factor })
    }

    pub fn register_enum<E: EncodedEnum>(
        &mut self,
        name: &str,
        directional: bool,
    ) -> Result<EnumHandle<E>, Error> {
        let kind = Kind::Enum {
            type_name: type_name::<E>(),
        };
        self.allocate(name, E::bits(), directional, kind)
            .map(|field| EnumHandle {
                field,
                _values: PhantomData,
            })
    }

    /// Freezes the registry and returns its [Layout].
    /// Any later registration fails with [Error::Frozen].
    pub fn build(&mut self) -> Layout {
        if let Some(layout) = &self.built {
            return layout.clone();
        }

        let words_per_record = self.word + if self.shift > 0 { 1 } else { 0 };
        let layout = Layout(Arc::new(LayoutInner {
            id: self.id,
            words_per_record: words_per_record as usize,
            entries: std::mem::take(&mut self.entries),
        }));

        log::debug!(
            "built layout {} with {} encoded values in {} bits ({} words per record)",
            layout.id(),
            layout.len(),
            layout.bits_used(),
            layout.words_per_record(),
        );

        self.built = Some(layout.clone());
        layout
    }

    fn allocate(
        &mut self,
        name: &str,
        bits: u8,
        directional: bool,
        kind: Kind,
    ) -> Result<Field, Error> {
        if self.built.is_some() {
            return Err(Error::Frozen(name.to_string()));
        }

        if self.entries.iter().any(|e| e.name == name) {
            return Err(Error::Conflict {
                name: name.to_string(),
                reason: "name is already registered".to_string(),
            });
        }

        let mut field = Field {
            layout: self.id,
            word: self.word,
            shift: self.shift as u8,
            bits,
            directional,
        };

        let width = field.width();
        if bits == 0 || width > WORD_BITS {
            return Err(Error::InvalidArgument(format!(
                "{name:?} needs {width} bits, must be between 1 and {WORD_BITS}"
            )));
        }

        // Move to the next word if the field doesn't fit in the current one
        if self.shift + width > WORD_BITS {
            field.word += 1;
            field.shift = 0;
        }

        if field.word >= self.max_words {
            return Err(Error::Conflict {
                name: name.to_string(),
                reason: format!(
                    "not enough bits left for {width} more (record has {} bits)",
                    self.max_words * WORD_BITS
                ),
            });
        }

        self.word = field.word;
        self.shift = field.shift as u32 + width;
        if self.shift == WORD_BITS {
            self.word += 1;
            self.shift = 0;
        }

        self.entries.push(Entry {
            name: name.to_string(),
            kind,
            field,
        });
        Ok(field)
    }
}

#[derive(Debug)]
struct LayoutInner {
    id: u32,
    words_per_record: usize,
    entries: Vec<Entry>,
}

/// Immutable assignment of bits to encoded values, produced by [Registry::build].
///
/// Cloning a Layout is cheap; clones share the same underlying data.
#[derive(Debug, Clone)]
pub struct Layout(Arc<LayoutInner>);

impl Layout {
    /// Unique identifier of the layout. Handles remember the layout which issued them.
    pub fn id(&self) -> u32 {
        self.0.id
    }

    pub fn words_per_record(&self) -> usize {
        self.0.words_per_record
    }

    /// Number of bits actually occupied by encoded values.
    pub fn bits_used(&self) -> u32 {
        self.0.entries.iter().map(|e| e.field.width()).sum()
    }

    /// Returns the number of encoded values in the layout.
    pub fn len(&self) -> usize {
        self.0.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.entries.is_empty()
    }

    /// Names and kinds of all encoded values, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Kind)> {
        self.0.entries.iter().map(|e| (e.name.as_str(), e.kind))
    }

    pub fn find_bool(&self, name: &str) -> Option<BoolHandle> {
        self.find(name, |k| k == Kind::Bool).map(BoolHandle)
    }

    pub fn find_int(&self, name: &str) -> Option<IntHandle> {
        self.find(name, |k| k == Kind::Int).map(IntHandle)
    }

    pub fn find_decimal(&self, name: &str) -> Option<DecimalHandle> {
        let entry = self.0.entries.iter().find(|e| e.name == name)?;
        match entry.kind {
            Kind::Decimal { factor } => Some(DecimalHandle {
                field: entry.field,
                factor,
            }),
            _ => None,
        }
    }

    pub fn find_enum<E: EncodedEnum>(&self, name: &str) -> Option<EnumHandle<E>> {
        let expected = Kind::Enum {
            type_name: type_name::<E>(),
        };
        self.find(name, |k| k == expected).map(|field| EnumHandle {
            field,
            _values: PhantomData,
        })
    }

    /// Returns true if the handle was issued by the registry which built this layout.
    pub fn contains(&self, handle: &BoolHandle) -> bool {
        self.owns(&handle.0)
    }

    pub(crate) fn owns(&self, field: &Field) -> bool {
        field.layout == self.0.id
    }

    /// Fails with [Error::InvalidArgument] if `field` was not issued for this layout.
    pub(crate) fn check_owns(&self, field: &Field) -> Result<(), Error> {
        if self.owns(field) {
            Ok(())
        } else {
            Err(Error::InvalidArgument(format!(
                "handle of layout {} used with layout {}",
                field.layout, self.0.id
            )))
        }
    }

    pub(crate) fn name_of(&self, field: &Field) -> &str {
        self.0
            .entries
            .iter()
            .find(|e| e.field == *field)
            .map(|e| e.name.as_str())
            .unwrap_or("<unknown>")
    }

    fn find(&self, name: &str, kind_matches: impl Fn(Kind) -> bool) -> Option<Field> {
        self.0
            .entries
            .iter()
            .find(|e| e.name == name && kind_matches(e.kind))
            .map(|e| e.field)
    }
}
