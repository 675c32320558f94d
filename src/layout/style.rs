// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Edge styling.
//!
//! Every style decision is a pure function of the dependent quest's status, its achievement
//! flag, and the focus state.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::{QuestId, QuestStatus};

pub const STROKE_COMPLETED: &str = "#10B981";
pub const STROKE_AVAILABLE: &str = "#3B82F6";
pub const STROKE_LOCKED: &str = "#6B7280";
pub const STROKE_NEUTRAL: &str = "#9CA3AF";
pub const STROKE_DIMMED: &str = "#D1D5DB";
pub const STROKE_CROSS_DIMMED: &str = "#E5E7EB";

const STROKE_WIDTH_WIDE: f64 = 3.0;
const STROKE_WIDTH_DEFAULT: f64 = 2.0;
const STROKE_WIDTH_CROSS: f64 = 1.5;
const CROSS_DASH: &str = "6,4";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Bezier curve between lane-local quests.
    Default,
    SmoothStep,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    pub stroke: &'static str,
    pub stroke_width: f64,
    pub opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EdgeData {
    #[serde(rename_all = "camelCase")]
    Quest { source_status: QuestStatus, target_status: QuestStatus },
    #[serde(rename_all = "camelCase")]
    CrossTrader { is_cross_trader: bool, source_trader_id: String, target_trader_id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: QuestId,
    pub target: QuestId,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub animated: bool,
    pub style: EdgeStyle,
    pub data: EdgeData,
}

/// Focus state shared by every edge of one graph build.
#[derive(Debug, Clone, Copy)]
pub struct EdgeFocus<'a> {
    pub has_focus_mode: bool,
    pub chain: Option<&'a BTreeSet<QuestId>>,
}

impl EdgeFocus<'_> {
    pub fn contains_edge(&self, source: &QuestId, target: &QuestId) -> bool {
        self.chain.is_some_and(|chain| chain.contains(source) && chain.contains(target))
    }

    /// A focus mode is active and the edge is outside the chain.
    pub fn dims_edge(&self, source: &QuestId, target: &QuestId) -> bool {
        self.has_focus_mode && !self.contains_edge(source, target)
    }
}

pub fn status_stroke(status: QuestStatus) -> &'static str {
    match status {
        QuestStatus::Completed => STROKE_COMPLETED,
        QuestStatus::Available => STROKE_AVAILABLE,
        QuestStatus::Locked => STROKE_LOCKED,
        QuestStatus::InProgress => STROKE_NEUTRAL,
    }
}

pub fn quest_edge_style(
    target_status: QuestStatus,
    target_kappa_required: bool,
    in_focus_chain: bool,
    dimmed: bool,
) -> EdgeStyle {
    let stroke = if dimmed { STROKE_DIMMED } else { status_stroke(target_status) };
    let stroke_width = if in_focus_chain || target_kappa_required {
        STROKE_WIDTH_WIDE
    } else {
        STROKE_WIDTH_DEFAULT
    };
    let opacity = if dimmed {
        0.2
    } else if target_status == QuestStatus::Locked {
        0.4
    } else {
        1.0
    };
    EdgeStyle { stroke, stroke_width, opacity, stroke_dasharray: None }
}

pub fn is_edge_animated(target_status: QuestStatus, dimmed: bool) -> bool {
    target_status == QuestStatus::Available && !dimmed
}

pub fn cross_trader_edge_style(dimmed: bool) -> EdgeStyle {
    EdgeStyle {
        stroke: if dimmed { STROKE_CROSS_DIMMED } else { STROKE_NEUTRAL },
        stroke_width: STROKE_WIDTH_CROSS,
        opacity: if dimmed { 0.2 } else { 0.6 },
        stroke_dasharray: Some(CROSS_DASH),
    }
}

/// Styled prerequisite edge `source -> target`.
pub fn quest_edge(
    source: &QuestId,
    target: &QuestId,
    source_status: QuestStatus,
    target_status: QuestStatus,
    target_kappa_required: bool,
    focus: EdgeFocus<'_>,
) -> GraphEdge {
    let in_focus_chain = focus.contains_edge(source, target);
    let dimmed = focus.dims_edge(source, target);
    GraphEdge {
        id: format!("{source}-{target}"),
        source: source.clone(),
        target: target.clone(),
        kind: EdgeKind::Default,
        animated: is_edge_animated(target_status, dimmed),
        style: quest_edge_style(target_status, target_kappa_required, in_focus_chain, dimmed),
        data: EdgeData::Quest { source_status, target_status },
    }
}

pub fn cross_trader_edge(
    source: &QuestId,
    target: &QuestId,
    source_trader_id: &str,
    target_trader_id: &str,
    focus: EdgeFocus<'_>,
) -> GraphEdge {
    let dimmed = focus.dims_edge(source, target);
    GraphEdge {
        id: format!("cross-{source}-{target}"),
        source: source.clone(),
        target: target.clone(),
        kind: EdgeKind::SmoothStep,
        animated: false,
        style: cross_trader_edge_style(dimmed),
        data: EdgeData::CrossTrader {
            is_cross_trader: true,
            source_trader_id: source_trader_id.to_owned(),
            target_trader_id: target_trader_id.to_owned(),
        },
    }
}
