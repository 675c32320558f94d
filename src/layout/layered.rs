// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::QuestId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayeredParams {
    pub node_width: f64,
    pub node_height: f64,
    /// Gap between neighbors inside one rank (vertical axis).
    pub node_sep: f64,
    /// Gap between consecutive ranks (horizontal axis).
    pub rank_sep: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    /// Alternating barycenter sweeps (down, up, down, ...).
    pub sweeps: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayeredLayout {
    layers: Vec<Vec<QuestId>>,
    placements: BTreeMap<QuestId, NodePlacement>,
    ignored_edges: Vec<(QuestId, QuestId)>,
    crossings: usize,
    width: f64,
    height: f64,
    content_height: f64,
}

impl LayeredLayout {
    /// Real nodes per rank, in final in-rank order.
    pub fn layers(&self) -> &[Vec<QuestId>] {
        &self.layers
    }

    pub fn placements(&self) -> &BTreeMap<QuestId, NodePlacement> {
        &self.placements
    }

    pub fn placement(&self, node_id: &QuestId) -> Option<&NodePlacement> {
        self.placements.get(node_id)
    }

    /// Edges dropped to break dependency cycles.
    pub fn ignored_edges(&self) -> &[(QuestId, QuestId)] {
        &self.ignored_edges
    }

    /// Edge crossings left after ordering, counted on the virtualized graph.
    pub fn crossings(&self) -> usize {
        self.crossings
    }

    /// Graph width including both horizontal margins.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Graph height including both vertical margins.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Distance from the topmost node top to the bottommost node bottom.
    pub fn content_height(&self) -> f64 {
        self.content_height
    }
}

/// Top-left anchored node box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePlacement {
    layer: usize,
    index_in_layer: usize,
    x: f64,
    y: f64,
}

impl NodePlacement {
    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn index_in_layer(&self) -> usize {
        self.index_in_layer
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LayerNode {
    Real(QuestId),
    /// Bend point of an edge spanning more than one rank.
    Virtual,
}

impl LayerNode {
    fn is_real(&self) -> bool {
        matches!(self, Self::Real(_))
    }
}

/// Deterministic topological order. When only cycles remain, the smallest unplaced id is
/// forced out next.
fn topo_sort_nodes(
    nodes: &BTreeSet<QuestId>,
    outgoing: &BTreeMap<QuestId, Vec<QuestId>>,
) -> Vec<QuestId> {
    let mut indegree = nodes.iter().map(|node_id| (node_id, 0usize)).collect::<BTreeMap<_, _>>();
    for tos in outgoing.values() {
        for to in tos {
            if let Some(degree) = indegree.get_mut(to) {
                *degree += 1;
            }
        }
    }

    let mut ready = indegree
        .iter()
        .filter_map(|(node_id, degree)| (*degree == 0).then_some(*node_id))
        .collect::<BTreeSet<_>>();
    let mut placed = BTreeSet::<&QuestId>::new();
    let mut topo = Vec::<QuestId>::with_capacity(nodes.len());

    while topo.len() < nodes.len() {
        let next = match ready.pop_first() {
            Some(next) => next,
            None => {
                let Some(forced) = nodes.iter().find(|node_id| !placed.contains(node_id)) else {
                    break;
                };
                tracing::warn!(quest = %forced, "dependency cycle; breaking at quest");
                forced
            }
        };
        if !placed.insert(next) {
            continue;
        }
        topo.push(next.clone());

        for to in outgoing.get(next).into_iter().flatten() {
            if placed.contains(to) {
                continue;
            }
            if let Some(degree) = indegree.get_mut(to) {
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    ready.insert(to);
                }
            }
        }
    }

    topo
}

fn assign_layers(topo: &[usize], successors: &[Vec<usize>], node_count: usize) -> Vec<usize> {
    let mut layers = vec![0usize; node_count];
    for &from in topo {
        let from_layer = layers[from];
        for &to in &successors[from] {
            layers[to] = layers[to].max(from_layer + 1);
        }
    }
    layers
}

/// Orders one rank by the mean position of its neighbors in the adjacent rank.
///
/// Nodes without neighbors on that side keep their slot. Ties keep the current order.
fn sort_layer_by_barycenter(layer: &mut [usize], positions: &[usize], neighbors: &[Vec<usize>]) {
    let mut fixed = vec![None; layer.len()];
    let mut movable = Vec::<(usize, usize, usize, usize)>::new();

    for (slot, &node) in layer.iter().enumerate() {
        let (sum, count) = neighbors[node].iter().fold((0usize, 0usize), |(sum, count), neighbor| {
            (sum + positions[*neighbor], count + 1)
        });
        if count == 0 {
            fixed[slot] = Some(node);
        } else {
            movable.push((node, sum, count, slot));
        }
    }

    movable.sort_by(|a, b| {
        // Compare sum_a/count_a vs sum_b/count_b without floats.
        let left = (a.1 as u128) * (b.2 as u128);
        let right = (b.1 as u128) * (a.2 as u128);
        left.cmp(&right).then_with(|| a.3.cmp(&b.3))
    });

    let mut movable = movable.into_iter().map(|entry| entry.0);
    let reordered = fixed
        .into_iter()
        .filter_map(|slot| slot.or_else(|| movable.next()))
        .collect::<Vec<_>>();
    layer.copy_from_slice(&reordered);
}

fn record_positions(layer: &[usize], positions: &mut [usize]) {
    for (index, &node) in layer.iter().enumerate() {
        positions[node] = index;
    }
}

fn count_crossings(layers: &[Vec<usize>], positions: &[usize], successors: &[Vec<usize>]) -> usize {
    let mut total = 0;
    for layer in layers {
        let mut segments = layer
            .iter()
            .flat_map(move |&from| successors[from].iter().map(move |&to| (from, to)))
            .map(|(from, to)| (positions[from], positions[to]))
            .collect::<Vec<_>>();
        segments.sort_unstable();

        for (i, upper) in segments.iter().enumerate() {
            total += segments[i + 1..]
                .iter()
                .filter(|lower| lower.0 > upper.0 && lower.1 < upper.1)
                .count();
        }
    }
    total
}

/// Deterministic left-to-right layered layout.
///
/// - Cycles are broken, and the dropped back edges are reported by
///   [`LayeredLayout::ignored_edges`].
/// - Ranks come from longest-path layering, so every kept edge points to a strictly higher rank.
/// - Edges spanning several ranks get virtual bend nodes; ranks are ordered with alternating
///   barycenter sweeps and the ordering with the fewest crossings wins.
/// - Each node is pulled toward the mean height of its predecessors, keeping at least
///   `node_sep` between neighbors.
///
/// Edges naming unknown nodes and self loops are skipped.
pub fn layout_layered(
    nodes: &[QuestId],
    edges: &[(QuestId, QuestId)],
    params: &LayeredParams,
) -> LayeredLayout {
    let node_set = nodes.iter().cloned().collect::<BTreeSet<_>>();
    let edge_set = edges
        .iter()
        .filter(|(from, to)| from != to && node_set.contains(from) && node_set.contains(to))
        .cloned()
        .collect::<BTreeSet<_>>();

    let mut outgoing = BTreeMap::<QuestId, Vec<QuestId>>::new();
    for (from, to) in &edge_set {
        outgoing.entry(from.clone()).or_default().push(to.clone());
    }

    let topo = topo_sort_nodes(&node_set, &outgoing);
    let topo_rank = topo
        .iter()
        .enumerate()
        .map(|(rank, node_id)| (node_id, rank))
        .collect::<BTreeMap<_, _>>();

    let index_of = node_set
        .iter()
        .enumerate()
        .map(|(index, node_id)| (node_id.clone(), index))
        .collect::<BTreeMap<_, _>>();
    let mut kinds = node_set.iter().cloned().map(LayerNode::Real).collect::<Vec<_>>();
    let real_count = kinds.len();

    let mut ignored_edges = Vec::new();
    let mut forward = Vec::<(usize, usize)>::new();
    for (from, to) in &edge_set {
        if topo_rank[from] < topo_rank[to] {
            forward.push((index_of[from], index_of[to]));
        } else {
            ignored_edges.push((from.clone(), to.clone()));
        }
    }

    let mut successors = vec![Vec::<usize>::new(); real_count];
    for &(from, to) in &forward {
        successors[from].push(to);
    }
    let topo_indices = topo.iter().map(|node_id| index_of[node_id]).collect::<Vec<_>>();
    let mut node_layers = assign_layers(&topo_indices, &successors, real_count);

    // Split long edges into unit-length segments through virtual nodes.
    let mut successors = vec![Vec::<usize>::new(); real_count];
    let mut predecessors = vec![Vec::<usize>::new(); real_count];
    for &(from, to) in &forward {
        let mut previous = from;
        for layer in node_layers[from] + 1..node_layers[to] {
            let dummy = kinds.len();
            kinds.push(LayerNode::Virtual);
            node_layers.push(layer);
            successors.push(Vec::new());
            predecessors.push(Vec::new());
            successors[previous].push(dummy);
            predecessors[dummy].push(previous);
            previous = dummy;
        }
        successors[previous].push(to);
        predecessors[to].push(previous);
    }

    let max_layer = node_layers.iter().copied().max().unwrap_or(0);
    let mut layers = vec![Vec::<usize>::new(); if kinds.is_empty() { 0 } else { max_layer + 1 }];
    for (node, &layer) in node_layers.iter().enumerate() {
        layers[layer].push(node);
    }

    let mut positions = vec![0usize; kinds.len()];
    for layer in &layers {
        record_positions(layer, &mut positions);
    }

    let mut best_layers = layers.clone();
    let mut best_crossings = count_crossings(&layers, &positions, &successors);
    for sweep in 0..params.sweeps {
        if best_crossings == 0 {
            break;
        }
        if sweep % 2 == 0 {
            for layer_idx in 1..layers.len() {
                sort_layer_by_barycenter(&mut layers[layer_idx], &positions, &predecessors);
                record_positions(&layers[layer_idx], &mut positions);
            }
        } else {
            for layer_idx in (0..layers.len().saturating_sub(1)).rev() {
                sort_layer_by_barycenter(&mut layers[layer_idx], &positions, &successors);
                record_positions(&layers[layer_idx], &mut positions);
            }
        }

        let crossings = count_crossings(&layers, &positions, &successors);
        if crossings < best_crossings {
            best_crossings = crossings;
            best_layers = layers.clone();
        }
    }
    let layers = best_layers;
    for layer in &layers {
        record_positions(layer, &mut positions);
    }

    let center_y =
        assign_vertical_centers(&layers, &kinds, &predecessors, &successors, params);

    let mut min_top = f64::INFINITY;
    let mut max_bottom = f64::NEG_INFINITY;
    for (node, kind) in kinds.iter().enumerate() {
        if kind.is_real() {
            min_top = min_top.min(center_y[node] - params.node_height / 2.0);
            max_bottom = max_bottom.max(center_y[node] + params.node_height / 2.0);
        }
    }
    let (shift, content_height) = if real_count == 0 {
        (0.0, 0.0)
    } else {
        (params.margin_y - min_top, max_bottom - min_top)
    };

    let mut placements = BTreeMap::<QuestId, NodePlacement>::new();
    let mut real_layers = Vec::<Vec<QuestId>>::with_capacity(layers.len());
    let mut max_right = 0.0f64;
    for (layer, layer_nodes) in layers.iter().enumerate() {
        let x = params.margin_x + layer as f64 * (params.node_width + params.rank_sep);
        let mut real_nodes = Vec::new();
        for &node in layer_nodes {
            let LayerNode::Real(node_id) = &kinds[node] else {
                continue;
            };
            let placement = NodePlacement {
                layer,
                index_in_layer: real_nodes.len(),
                x,
                y: center_y[node] - params.node_height / 2.0 + shift,
            };
            max_right = max_right.max(x + params.node_width);
            placements.insert(node_id.clone(), placement);
            real_nodes.push(node_id.clone());
        }
        real_layers.push(real_nodes);
    }

    let (width, height) = if real_count == 0 {
        (params.margin_x * 2.0, params.margin_y * 2.0)
    } else {
        (max_right + params.margin_x, content_height + params.margin_y * 2.0)
    };

    LayeredLayout {
        layers: real_layers,
        placements,
        ignored_edges,
        crossings: best_crossings,
        width,
        height,
        content_height,
    }
}

fn assign_vertical_centers(
    layers: &[Vec<usize>],
    kinds: &[LayerNode],
    predecessors: &[Vec<usize>],
    successors: &[Vec<usize>],
    params: &LayeredParams,
) -> Vec<f64> {
    let height_of =
        |node: usize| if kinds[node].is_real() { params.node_height } else { 0.0 };
    let gap = |upper: usize, lower: usize| {
        (height_of(upper) + height_of(lower)) / 2.0 + params.node_sep
    };
    let mean = |neighbors: &[usize], center_y: &[f64]| {
        (!neighbors.is_empty()).then(|| {
            neighbors.iter().map(|neighbor| center_y[*neighbor]).sum::<f64>()
                / neighbors.len() as f64
        })
    };

    let mut center_y = vec![0.0f64; kinds.len()];

    // Down pass: follow predecessors, never closer than the minimum gap.
    for layer in layers {
        let mut previous: Option<usize> = None;
        for &node in layer {
            let desired = mean(&predecessors[node], &center_y);
            center_y[node] = match previous {
                None => desired.unwrap_or(height_of(node) / 2.0),
                Some(prev) => {
                    let min = center_y[prev] + gap(prev, node);
                    desired.map_or(min, |desired| desired.max(min))
                }
            };
            previous = Some(node);
        }
    }

    // Up pass: nodes without predecessors move toward their successors within the free space.
    for layer in layers.iter().rev() {
        for (slot, &node) in layer.iter().enumerate() {
            if !predecessors[node].is_empty() {
                continue;
            }
            let Some(desired) = mean(&successors[node], &center_y) else {
                continue;
            };
            let lower = slot
                .checked_sub(1)
                .map(|prev_slot| center_y[layer[prev_slot]] + gap(layer[prev_slot], node))
                .unwrap_or(f64::NEG_INFINITY);
            let upper = layer
                .get(slot + 1)
                .map(|&next| center_y[next] - gap(node, next))
                .unwrap_or(f64::INFINITY);
            if lower <= upper {
                center_y[node] = desired.clamp(lower, upper);
            }
        }
    }

    center_y
}
