// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Encoded values: named, typed fields packed into fixed-width records.

mod error;
mod record;
mod registry;
mod values;

pub use error::Error;
pub use record::{Record, RecordMut};
pub use registry::{BoolHandle, DecimalHandle, EnumHandle, IntHandle, Kind, Layout, Registry};
pub use values::{EncodedEnum, Priority, RouteNetwork, Smoothness};
