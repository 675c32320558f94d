// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Trader lanes: partitioning, ordering and per-lane layout.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::graph::get_quest_chain;
use crate::model::{canonical_rank, Quest, QuestId, QuestStatus, StatusMap, Trader, TraderId};

use super::config::LayoutConfig;
use super::layered::layout_layered;
use super::style::{quest_edge, EdgeFocus, GraphEdge};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphOptions {
    pub selected_quest_id: Option<QuestId>,
    pub focused_quest_id: Option<QuestId>,
    pub focus_chain: Option<BTreeSet<QuestId>>,
    pub include_cross_trader_edges: bool,
}

impl GraphOptions {
    /// Focuses `quest_id` and computes its chain over `quests`.
    pub fn with_focus(mut self, quest_id: QuestId, quests: &[Quest]) -> Self {
        self.focus_chain = Some(get_quest_chain(&quest_id, quests));
        self.focused_quest_id = Some(quest_id);
        self
    }

    pub fn has_focus_mode(&self) -> bool {
        self.focused_quest_id.is_some()
    }

    pub fn in_focus_chain(&self, quest_id: &QuestId) -> bool {
        self.focus_chain.as_ref().is_some_and(|chain| chain.contains(quest_id))
    }

    pub fn edge_focus(&self) -> EdgeFocus<'_> {
        EdgeFocus { has_focus_mode: self.has_focus_mode(), chain: self.focus_chain.as_ref() }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestNodeData {
    pub title: String,
    pub trader_id: TraderId,
    pub status: QuestStatus,
    pub kappa_required: bool,
    pub is_selected: bool,
    pub is_root: bool,
    pub is_leaf: bool,
    pub is_focused: bool,
    pub is_in_focus_chain: bool,
    pub has_focus_mode: bool,
    /// Prerequisites owned by other traders, shown as badges instead of edges.
    pub cross_trader_prerequisites: Vec<QuestId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestNode {
    pub id: QuestId,
    pub position: Position,
    pub width: f64,
    pub height: f64,
    pub data: QuestNodeData,
}

pub(crate) struct QuestNodeFlags {
    pub(crate) is_root: bool,
    pub(crate) is_leaf: bool,
}

pub(crate) fn quest_node(
    quest: &Quest,
    position: Position,
    status: QuestStatus,
    flags: QuestNodeFlags,
    cross_trader_prerequisites: Vec<QuestId>,
    options: &GraphOptions,
    config: &LayoutConfig,
) -> QuestNode {
    QuestNode {
        id: quest.id.clone(),
        position,
        width: config.quest_width,
        height: config.quest_height,
        data: QuestNodeData {
            title: quest.title.clone(),
            trader_id: quest.trader_id.clone(),
            status,
            kappa_required: quest.kappa_required,
            is_selected: options.selected_quest_id.as_ref() == Some(&quest.id),
            is_root: flags.is_root,
            is_leaf: flags.is_leaf,
            is_focused: options.focused_quest_id.as_ref() == Some(&quest.id),
            is_in_focus_chain: options.in_focus_chain(&quest.id),
            has_focus_mode: options.has_focus_mode(),
            cross_trader_prerequisites,
        },
    }
}

/// Computed status, `Locked` when the quest has none.
pub(crate) fn status_of(statuses: &StatusMap, quest_id: &QuestId) -> QuestStatus {
    statuses.get(quest_id).copied().unwrap_or(QuestStatus::Locked)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntraTraderDep {
    pub source_id: QuestId,
    pub target_id: QuestId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossTraderDep {
    pub source_quest_id: QuestId,
    pub source_trader_id: String,
    pub target_quest_id: QuestId,
    pub target_trader_id: String,
}

/// One trader's share of the quest graph. `trader_id` is the lower-cased lane key.
#[derive(Debug, Clone)]
pub struct TraderQuestGroup<'a> {
    pub trader_id: String,
    pub trader: Trader,
    pub quests: Vec<&'a Quest>,
    /// Quests without an intra-trader prerequisite.
    pub root_quests: Vec<QuestId>,
    pub intra_trader_deps: Vec<IntraTraderDep>,
    /// Cross-trader deps touching this lane, as source or as target.
    pub cross_trader_deps: Vec<CrossTraderDep>,
}

/// Trader groups in encounter order, addressable by lane key.
#[derive(Debug, Clone, Default)]
pub struct TraderGroups<'a> {
    groups: Vec<TraderQuestGroup<'a>>,
    by_key: BTreeMap<String, usize>,
}

impl<'a> TraderGroups<'a> {
    pub fn get(&self, trader_id: &str) -> Option<&TraderQuestGroup<'a>> {
        self.by_key.get(trader_id).map(|idx| &self.groups[*idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraderQuestGroup<'a>> {
        self.groups.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.trader_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Groups quests by lower-cased trader id and classifies every known prerequisite edge.
///
/// Trader metadata comes from `traders` (matched case-insensitively); a trader missing there
/// is named after its id. Prerequisites outside `quests` are skipped.
pub fn split_quests_by_trader<'a>(quests: &'a [Quest], traders: &[Trader]) -> TraderGroups<'a> {
    let mut groups = TraderGroups::default();
    let quest_by_id = quests.iter().map(|quest| (&quest.id, quest)).collect::<BTreeMap<_, _>>();

    for quest in quests {
        let trader_id = quest.trader_id.lane_key();
        let idx = match groups.by_key.get(&trader_id) {
            Some(idx) => *idx,
            None => {
                let trader = traders
                    .iter()
                    .find(|trader| trader.id.lane_key() == trader_id)
                    .cloned()
                    .unwrap_or_else(|| {
                        Trader::new(quest.trader_id.clone(), quest.trader_id.as_str())
                    });
                groups.groups.push(TraderQuestGroup {
                    trader_id: trader_id.clone(),
                    trader,
                    quests: Vec::new(),
                    root_quests: Vec::new(),
                    intra_trader_deps: Vec::new(),
                    cross_trader_deps: Vec::new(),
                });
                groups.by_key.insert(trader_id, groups.groups.len() - 1);
                groups.groups.len() - 1
            }
        };
        groups.groups[idx].quests.push(quest);
    }

    for quest in quests {
        let trader_id = quest.trader_id.lane_key();
        let Some(&idx) = groups.by_key.get(&trader_id) else {
            continue;
        };
        let mut has_intra_trader_dep = false;

        for dependency in &quest.depends_on {
            let Some(required) = quest_by_id.get(&dependency.quest_id) else {
                continue;
            };
            let source_trader_id = required.trader_id.lane_key();

            if source_trader_id == trader_id {
                groups.groups[idx].intra_trader_deps.push(IntraTraderDep {
                    source_id: required.id.clone(),
                    target_id: quest.id.clone(),
                });
                has_intra_trader_dep = true;
                continue;
            }

            let dep = CrossTraderDep {
                source_quest_id: required.id.clone(),
                source_trader_id: source_trader_id.clone(),
                target_quest_id: quest.id.clone(),
                target_trader_id: trader_id.clone(),
            };
            if let Some(&source_idx) = groups.by_key.get(&source_trader_id) {
                groups.groups[source_idx].cross_trader_deps.push(dep.clone());
            }
            groups.groups[idx].cross_trader_deps.push(dep);
        }

        if !has_intra_trader_dep {
            groups.groups[idx].root_quests.push(quest.id.clone());
        }
    }

    groups
}

/// Per lane: how many cross-trader deps it shares with each source trader.
pub fn cross_trader_weights(
    groups: &TraderGroups<'_>,
) -> BTreeMap<String, BTreeMap<String, usize>> {
    let mut weights = BTreeMap::<String, BTreeMap<String, usize>>::new();
    for group in groups.iter() {
        let lane = weights.entry(group.trader_id.clone()).or_default();
        for dep in &group.cross_trader_deps {
            *lane.entry(dep.source_trader_id.clone()).or_default() += 1;
        }
    }
    weights
}

/// Canonical traders first in their fixed order, then the rest in encounter order.
///
/// The cross-trader weights are computed and traced, but they do not reorder lanes.
pub fn compute_trader_order(groups: &TraderGroups<'_>) -> Vec<String> {
    let weights = cross_trader_weights(groups);
    tracing::trace!(?weights, "cross-trader weights");

    let mut order = groups.keys().map(str::to_owned).collect::<Vec<_>>();
    order.sort_by_key(|trader_id| canonical_rank(trader_id).unwrap_or(usize::MAX));
    order
}

/// One lane laid out in lane-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct TraderLaneLayout {
    pub trader_id: String,
    pub nodes: Vec<QuestNode>,
    pub edges: Vec<GraphEdge>,
    pub lane_height: f64,
    pub lane_width: f64,
    pub content_height: f64,
}

/// Lays out one trader's quests using only intra-trader edges.
///
/// Quest content is centered vertically inside the lane, so every node lies in
/// `0..lane_height`.
pub fn layout_trader_lane(
    group: &TraderQuestGroup<'_>,
    statuses: &StatusMap,
    options: &GraphOptions,
    config: &LayoutConfig,
) -> TraderLaneLayout {
    let params = config.lane_params();
    let node_ids = group.quests.iter().map(|quest| quest.id.clone()).collect::<Vec<_>>();
    let edge_pairs = group
        .intra_trader_deps
        .iter()
        .map(|dep| (dep.source_id.clone(), dep.target_id.clone()))
        .collect::<Vec<_>>();
    let layered = layout_layered(&node_ids, &edge_pairs, &params);

    let content_height =
        if group.quests.is_empty() { config.quest_height } else { layered.content_height() };
    let lane_height = config.lane_height(content_height);
    let top = (lane_height - content_height) / 2.0;

    let roots = group.root_quests.iter().collect::<BTreeSet<_>>();
    let has_outgoing =
        group.intra_trader_deps.iter().map(|dep| &dep.source_id).collect::<BTreeSet<_>>();

    let mut nodes = Vec::with_capacity(group.quests.len());
    let mut emitted = BTreeSet::<&QuestId>::new();
    let mut lane_width = 0.0f64;
    for quest in &group.quests {
        let Some(placement) = layered.placement(&quest.id) else {
            continue;
        };
        if !emitted.insert(&quest.id) {
            continue;
        }
        let position = Position { x: placement.x(), y: placement.y() - params.margin_y + top };
        lane_width = lane_width.max(position.x + config.quest_width);

        let badges = group
            .cross_trader_deps
            .iter()
            .filter(|dep| dep.target_quest_id == quest.id)
            .map(|dep| dep.source_quest_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let flags = QuestNodeFlags {
            is_root: roots.contains(&quest.id),
            is_leaf: !has_outgoing.contains(&quest.id),
        };
        nodes.push(quest_node(
            quest,
            position,
            status_of(statuses, &quest.id),
            flags,
            badges,
            options,
            config,
        ));
    }

    let kappa = group
        .quests
        .iter()
        .map(|quest| (&quest.id, quest.kappa_required))
        .collect::<BTreeMap<_, _>>();
    let focus = options.edge_focus();
    let mut seen_edges = BTreeSet::<(&QuestId, &QuestId)>::new();
    let mut edges = Vec::with_capacity(group.intra_trader_deps.len());
    for dep in &group.intra_trader_deps {
        if !seen_edges.insert((&dep.source_id, &dep.target_id)) {
            continue;
        }
        edges.push(quest_edge(
            &dep.source_id,
            &dep.target_id,
            status_of(statuses, &dep.source_id),
            status_of(statuses, &dep.target_id),
            kappa.get(&dep.target_id).copied().unwrap_or(false),
            focus,
        ));
    }

    tracing::debug!(
        trader = %group.trader_id,
        quests = nodes.len(),
        edges = edges.len(),
        lane_height,
        crossings = layered.crossings(),
        "laid out trader lane"
    );

    TraderLaneLayout {
        trader_id: group.trader_id.clone(),
        nodes,
        edges,
        lane_height,
        lane_width,
        content_height,
    }
}
