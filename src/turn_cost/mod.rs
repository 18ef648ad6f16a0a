// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod provider;
mod store;

pub use provider::{TurnCostProvider, TurnCostsConfig, UTurnCosts, INFINITE_U_TURN_COSTS};
pub use store::{Turn, TurnCostStore};
