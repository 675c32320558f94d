// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Quests own their objectives (with the user's progress records attached) and point at their
//! prerequisites by id. Reverse edges are derived by [`crate::graph::QuestIndex`].

pub(crate) mod fixtures;
pub mod ids;
pub mod progress;
pub mod quest;
pub mod trader;

pub use ids::{Id, IdError, ObjectiveId, QuestId, TraderId};
pub use progress::{is_objective_complete, ObjectiveProgress, ProgressRecord};
pub use quest::{
    Objective, ParseQuestStatusError, Quest, QuestDependency, QuestStatus, StatusMap,
};
pub use trader::{canonical_rank, trader_color, Trader, TraderColor, TRADER_ORDER};
