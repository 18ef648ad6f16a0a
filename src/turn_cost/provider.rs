// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fmt;

use super::TurnCostStore;
use crate::ev::{BoolHandle, Error};
use crate::{is_valid_edge, EdgeId, NodeId};

/// Value of [TurnCostsConfig::u_turn_costs] which forbids u-turns altogether.
pub const INFINITE_U_TURN_COSTS: i32 = -1;

/// Turn-related settings of a routing profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnCostsConfig {
    /// Cost of a u-turn, in seconds, or [INFINITE_U_TURN_COSTS].
    /// Other negative values are invalid.
    pub u_turn_costs: i32,
}

impl Default for TurnCostsConfig {
    fn default() -> Self {
        Self {
            u_turn_costs: INFINITE_U_TURN_COSTS,
        }
    }
}

/// Validated cost of a u-turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UTurnCosts {
    Finite(u32),
    Infinite,
}

impl UTurnCosts {
    pub fn weight(self) -> f64 {
        match self {
            Self::Finite(cost) => cost as f64,
            Self::Infinite => f64::INFINITY,
        }
    }
}

impl TryFrom<i32> for UTurnCosts {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            INFINITE_U_TURN_COSTS => Ok(Self::Infinite),
            v if v >= 0 => Ok(Self::Finite(v as u32)),
            v => Err(Error::InvalidArgument(format!(
                "u-turn costs must be non-negative, or equal to {INFINITE_U_TURN_COSTS} \
                 (infinite), got {v}"
            ))),
        }
    }
}

impl From<UTurnCosts> for i32 {
    fn from(value: UTurnCosts) -> Self {
        match value {
            UTurnCosts::Finite(cost) => cost.min(i32::MAX as u32) as i32,
            UTurnCosts::Infinite => INFINITE_U_TURN_COSTS,
        }
    }
}

/// Computes the extra weight of moving from one edge to another over a node.
///
/// The variant without a restriction handle is still useful for edge-based search,
/// as it knows the u-turn costs.
#[derive(Debug, Clone, Copy)]
pub enum TurnCostProvider<'a> {
    /// Only u-turns have a cost, all other turns are free.
    UTurnOnly { u_turn: UTurnCosts },

    /// Turns marked in the store by `restriction` are forbidden.
    Restricted {
        u_turn: UTurnCosts,
        restriction: BoolHandle,
        store: &'a TurnCostStore,
    },
}

impl<'a> TurnCostProvider<'a> {
    /// Creates a provider over the provided store.
    ///
    /// Fails with [Error::InvalidArgument] if the configured u-turn costs are invalid,
    /// or if `restriction` does not belong to the store's layout.
    pub fn new(
        store: &'a TurnCostStore,
        restriction: Option<BoolHandle>,
        config: &TurnCostsConfig,
    ) -> Result<Self, Error> {
        let u_turn = UTurnCosts::try_from(config.u_turn_costs)?;
        match restriction {
            None => Ok(Self::UTurnOnly { u_turn }),
            Some(restriction) if store.layout().contains(&restriction) => Ok(Self::Restricted {
                u_turn,
                restriction,
                store,
            }),
            Some(_) => Err(Error::InvalidArgument(
                "no turn cost storage for the turn restriction encoded value".to_string(),
            )),
        }
    }

    /// Returns the turn restriction encoded value consulted by the provider, if any.
    pub fn restriction(&self) -> Option<BoolHandle> {
        match *self {
            Self::UTurnOnly { .. } => None,
            Self::Restricted { restriction, .. } => Some(restriction),
        }
    }

    pub fn u_turn_costs(&self) -> UTurnCosts {
        match *self {
            Self::UTurnOnly { u_turn } => u_turn,
            Self::Restricted { u_turn, .. } => u_turn,
        }
    }

    /// Returns the weight of a turn: 0 at path boundaries (invalid edges), the u-turn
    /// costs for `from == to`, [f64::INFINITY] for restricted turns and 0 otherwise.
    ///
    /// U-turn costs always take precedence over anything recorded in the store.
    pub fn calc_turn_weight(&self, from: EdgeId, via: NodeId, to: EdgeId) -> f64 {
        if !is_valid_edge(from) || !is_valid_edge(to) {
            return 0.0;
        }

        if from == to {
            return self.u_turn_costs().weight();
        }

        match self {
            Self::UTurnOnly { .. } => 0.0,
            Self::Restricted {
                restriction, store, ..
            } => {
                if store.get_bool(restriction, from, via, to) {
                    f64::INFINITY
                } else {
                    0.0
                }
            }
        }
    }

    /// Returns the time it takes to make a turn, which is always zero.
    ///
    /// Turn durations are hard to estimate; u-turn and restriction costs only
    /// penalize the weight. Callers must not assume turn weight and time are proportional.
    pub fn calc_turn_millis(&self, _from: EdgeId, _via: NodeId, _to: EdgeId) -> u64 {
        0
    }
}

impl fmt::Display for TurnCostProvider<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "default_tcp_{}", i32::from(self.u_turn_costs()))
    }
}
