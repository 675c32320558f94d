// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Graph layout.
//!
//! Quests are split into trader lanes, each lane gets its own layered layout, and the lanes are
//! stacked into one graph with styled edges. A single-graph layout is available as well.

pub mod config;
pub mod lanes;
pub mod layered;
pub mod stack;
pub mod style;

pub use config::{ConfigError, LayoutConfig, LAYOUT_ENV};
pub use lanes::{
    compute_trader_order, cross_trader_weights, layout_trader_lane, split_quests_by_trader,
    CrossTraderDep, GraphOptions, IntraTraderDep, Position, QuestNode, QuestNodeData,
    TraderGroups, TraderLaneLayout, TraderQuestGroup,
};
pub use layered::{layout_layered, LayeredLayout, LayeredParams, NodePlacement};
pub use stack::{
    build_cross_trader_edges, build_quest_graph, build_trader_lane_graph, stack_trader_lanes,
    GraphNode, LaneBand, QuestGraph, StackedLayout, TraderLaneGraph, TraderNode, TraderNodeData,
};
pub use style::{EdgeData, EdgeFocus, EdgeKind, EdgeStyle, GraphEdge};
