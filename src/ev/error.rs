// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Error conditions which may occur while setting up encoded values and
/// writing them into a store.
///
/// All of them are programmer or configuration errors, raised during import or setup.
/// Reading a store never fails.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// An encoded value can't be registered, either because its name is already taken,
    /// or because the record has no room left for it.
    #[error("can't register {name:?}: {reason}")]
    Conflict { name: String, reason: String },

    /// Registration was attempted after [Registry::build](super::Registry::build).
    #[error("can't register {0:?}: layout is already built")]
    Frozen(String),

    /// A value outside of the encoded value's domain was written.
    #[error("value {value} is out of range for {name:?}")]
    Range { name: String, value: f64 },

    /// Invalid configuration of an encoded value or a turn cost provider,
    /// or a write with a handle issued for a different layout.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
