// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use serde::Serialize;

use crate::graph::QuestIndex;
use crate::model::{trader_color, Quest, QuestId, QuestStatus, StatusMap, Trader};

use super::config::LayoutConfig;
use super::lanes::{
    compute_trader_order, layout_trader_lane, quest_node, split_quests_by_trader, status_of,
    GraphOptions, Position, QuestNode, QuestNodeFlags, TraderGroups, TraderLaneLayout,
};
use super::layered::layout_layered;
use super::style::{cross_trader_edge, quest_edge, EdgeFocus, GraphEdge};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderNodeData {
    pub trader_id: String,
    pub trader_name: String,
    pub color: &'static str,
    pub quest_count: usize,
    pub completed_count: usize,
}

/// Lane header with the trader's progress counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraderNode {
    pub id: String,
    pub position: Position,
    pub width: f64,
    pub height: f64,
    pub data: TraderNodeData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GraphNode {
    Quest(QuestNode),
    Trader(TraderNode),
}

impl GraphNode {
    pub fn id(&self) -> &str {
        match self {
            Self::Quest(node) => node.id.as_str(),
            Self::Trader(node) => &node.id,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Self::Quest(node) => node.position,
            Self::Trader(node) => node.position,
        }
    }

    pub fn as_quest(&self) -> Option<&QuestNode> {
        match self {
            Self::Quest(node) => Some(node),
            Self::Trader(_) => None,
        }
    }
}

/// Vertical band allocated to one lane, in graph coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneBand {
    pub trader_id: String,
    pub y: f64,
    pub height: f64,
}

impl LaneBand {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StackedLayout {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub lane_offsets: Vec<LaneBand>,
}

/// Stacks lanes top to bottom in `trader_order`, each preceded by its header node.
///
/// Traders without a lane or a group are skipped.
pub fn stack_trader_lanes(
    lanes: Vec<TraderLaneLayout>,
    trader_order: &[String],
    groups: &TraderGroups<'_>,
    statuses: &StatusMap,
    config: &LayoutConfig,
) -> StackedLayout {
    let mut lanes_by_trader = lanes
        .into_iter()
        .map(|lane| (lane.trader_id.clone(), lane))
        .collect::<BTreeMap<_, _>>();

    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut lane_offsets = Vec::new();
    let x_offset = config.quest_x_offset();
    let mut current_y = config.graph_margin_y;

    for trader_id in trader_order {
        let (Some(lane), Some(group)) = (lanes_by_trader.remove(trader_id), groups.get(trader_id))
        else {
            continue;
        };

        lane_offsets.push(LaneBand {
            trader_id: trader_id.clone(),
            y: current_y,
            height: lane.lane_height,
        });

        let quest_ids = group.quests.iter().map(|quest| &quest.id).collect::<BTreeSet<_>>();
        let completed_count = quest_ids
            .iter()
            .filter(|quest_id| status_of(statuses, quest_id) == QuestStatus::Completed)
            .count();
        nodes.push(GraphNode::Trader(TraderNode {
            id: format!("trader-{trader_id}"),
            position: Position {
                x: config.graph_margin_x,
                y: current_y + lane.lane_height / 2.0 - config.trader_height / 2.0,
            },
            width: config.trader_width,
            height: config.trader_height,
            data: TraderNodeData {
                trader_id: trader_id.clone(),
                trader_name: group.trader.name.clone(),
                color: trader_color(trader_id).primary,
                quest_count: quest_ids.len(),
                completed_count,
            },
        }));

        for mut node in lane.nodes {
            node.position.x += x_offset;
            node.position.y += current_y;
            nodes.push(GraphNode::Quest(node));
        }
        edges.extend(lane.edges);

        current_y += lane.lane_height + config.lane_spacing;
    }

    StackedLayout { nodes, edges, lane_offsets }
}

/// Dashed edges between lanes, emitted once from the source lane.
pub fn build_cross_trader_edges(
    groups: &TraderGroups<'_>,
    focus: EdgeFocus<'_>,
) -> Vec<GraphEdge> {
    let mut seen = BTreeSet::<String>::new();
    let mut edges = Vec::new();

    for group in groups.iter() {
        for dep in &group.cross_trader_deps {
            if dep.source_trader_id != group.trader_id {
                continue;
            }
            let edge = cross_trader_edge(
                &dep.source_quest_id,
                &dep.target_quest_id,
                &dep.source_trader_id,
                &dep.target_trader_id,
                focus,
            );
            if seen.insert(edge.id.clone()) {
                edges.push(edge);
            }
        }
    }

    edges
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderLaneGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub lane_offsets: Vec<LaneBand>,
    pub trader_order: Vec<String>,
}

/// Full lane pipeline: split, order, lay out every lane, then stack.
///
/// Lanes are laid out in parallel; output order follows the trader order. Cross-trader edges
/// are only emitted with [`GraphOptions::include_cross_trader_edges`]; otherwise they show up
/// as badges on quest nodes.
pub fn build_trader_lane_graph(
    quests: &[Quest],
    traders: &[Trader],
    statuses: &StatusMap,
    options: &GraphOptions,
    config: &LayoutConfig,
) -> TraderLaneGraph {
    let groups = split_quests_by_trader(quests, traders);
    let trader_order = compute_trader_order(&groups);

    let lanes = trader_order
        .par_iter()
        .filter_map(|trader_id| groups.get(trader_id))
        .map(|group| layout_trader_lane(group, statuses, options, config))
        .collect::<Vec<_>>();

    let StackedLayout { nodes, mut edges, lane_offsets } =
        stack_trader_lanes(lanes, &trader_order, &groups, statuses, config);

    if options.include_cross_trader_edges {
        edges.extend(build_cross_trader_edges(&groups, options.edge_focus()));
    }

    tracing::debug!(
        lanes = lane_offsets.len(),
        nodes = nodes.len(),
        edges = edges.len(),
        "built trader lane graph"
    );

    TraderLaneGraph { nodes, edges, lane_offsets, trader_order }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestGraph {
    pub nodes: Vec<QuestNode>,
    pub edges: Vec<GraphEdge>,
}

/// Single layered layout of every quest, roots aligned to the left margin.
pub fn build_quest_graph(
    quests: &[Quest],
    statuses: &StatusMap,
    options: &GraphOptions,
    config: &LayoutConfig,
) -> QuestGraph {
    let index = QuestIndex::new(quests);
    let focus = options.edge_focus();

    let mut seen_edges = BTreeSet::<(&QuestId, &QuestId)>::new();
    let mut edge_pairs = Vec::new();
    let mut edges = Vec::new();
    for quest in quests {
        for dependency in &quest.depends_on {
            let source = &dependency.quest_id;
            if !index.contains(source) || !seen_edges.insert((source, &quest.id)) {
                continue;
            }
            edge_pairs.push((source.clone(), quest.id.clone()));
            edges.push(quest_edge(
                source,
                &quest.id,
                status_of(statuses, source),
                status_of(statuses, &quest.id),
                quest.kappa_required,
                focus,
            ));
        }
    }

    let node_ids = index.quest_ids().cloned().collect::<Vec<_>>();
    let layered = layout_layered(&node_ids, &edge_pairs, &config.graph_params());

    let min_root_x = index
        .quest_ids()
        .filter(|quest_id| index.prerequisites(quest_id).is_empty())
        .filter_map(|quest_id| layered.placement(quest_id))
        .map(|placement| placement.x())
        .fold(f64::INFINITY, f64::min);
    let shift_x = if min_root_x.is_finite() { min_root_x - config.graph_margin_x } else { 0.0 };

    let mut emitted = BTreeSet::<&QuestId>::new();
    let mut nodes = Vec::with_capacity(index.len());
    for quest in quests {
        if !emitted.insert(&quest.id) {
            continue;
        }
        let Some(placement) = layered.placement(&quest.id) else {
            continue;
        };
        let lane_key = quest.trader_id.lane_key();
        let badges = index
            .prerequisites(&quest.id)
            .iter()
            .filter(|prerequisite| {
                index
                    .quest(prerequisite)
                    .is_some_and(|required| required.trader_id.lane_key() != lane_key)
            })
            .cloned()
            .collect();
        let flags = QuestNodeFlags {
            is_root: index.prerequisites(&quest.id).is_empty(),
            is_leaf: index.dependents(&quest.id).is_empty(),
        };
        nodes.push(quest_node(
            quest,
            Position { x: placement.x() - shift_x, y: placement.y() },
            status_of(statuses, &quest.id),
            flags,
            badges,
            options,
            config,
        ));
    }

    QuestGraph { nodes, edges }
}
