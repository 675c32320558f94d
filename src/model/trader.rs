// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::TraderId;

/// Canonical lane order (lower-cased trader keys). Unknown traders go after these.
pub const TRADER_ORDER: [&str; 9] = [
    "prapor",
    "therapist",
    "skier",
    "peacekeeper",
    "mechanic",
    "ragman",
    "jaeger",
    "fence",
    "lightkeeper",
];

const GOLD: &str = "#b39d70";
const GUNMETAL: &str = "#383945";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trader {
    pub id: TraderId,
    pub name: String,
}

impl Trader {
    pub fn new(id: TraderId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraderColor {
    pub primary: &'static str,
    pub bg: &'static str,
}

/// Position of a lane key in [`TRADER_ORDER`], if it is a canonical trader.
pub fn canonical_rank(lane_key: &str) -> Option<usize> {
    TRADER_ORDER.iter().position(|known| *known == lane_key)
}

/// All traders share the gold theme; lanes are told apart by name instead.
pub fn trader_color(_trader_id: &str) -> TraderColor {
    TraderColor { primary: GOLD, bg: GUNMETAL }
}
