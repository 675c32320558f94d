// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use questlane::graph::QuestIndex;
use questlane::layout::{GraphNode, TraderLaneGraph};
use questlane::model::{
    Objective, ObjectiveId, ProgressRecord, Quest, QuestId, QuestStatus, StatusMap, Trader,
    TraderId, TRADER_ORDER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignParams {
    pub traders: usize,
    pub layers: usize,
    pub quests_per_layer: usize,
    pub fanout: usize,
    /// Every n-th quest also depends on the previous trader's lane (0 disables).
    pub cross_every: usize,
    pub objectives: usize,
}

impl CampaignParams {
    pub const fn new(
        traders: usize,
        layers: usize,
        quests_per_layer: usize,
        fanout: usize,
        cross_every: usize,
        objectives: usize,
    ) -> Self {
        Self { traders, layers, quests_per_layer, fanout, cross_every, objectives }
    }

    pub const fn quest_count(self) -> usize {
        self.traders * self.layers * self.quests_per_layer
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    pub const fn params(self) -> CampaignParams {
        match self {
            Self::Small => CampaignParams::new(3, 4, 3, 2, 5, 2),
            Self::Medium => CampaignParams::new(6, 8, 6, 2, 4, 3),
            Self::Large => CampaignParams::new(9, 14, 10, 3, 3, 4),
        }
    }

    pub const ALL: [Case; 3] = [Self::Small, Self::Medium, Self::Large];
}

pub struct Campaign {
    pub traders: Vec<Trader>,
    pub quests: Vec<Quest>,
}

impl Campaign {
    pub fn statuses(&self) -> StatusMap {
        QuestIndex::new(&self.quests).resolve_statuses()
    }

    /// A quest from the middle of the first lane, useful as a focus target.
    pub fn middle_quest(&self) -> QuestId {
        self.quests[self.quests.len() / 2].id.clone()
    }
}

const MAPS: [&str; 4] = ["Customs", "Woods", "Factory", "Shoreline"];

fn trader_key(trader: usize) -> String {
    match TRADER_ORDER.get(trader) {
        Some(key) => (*key).to_owned(),
        None => format!("trader{trader:02}"),
    }
}

fn quest_id(trader: usize, layer: usize, idx: usize) -> QuestId {
    QuestId::new(format!("{}_l{layer:02}_q{idx:03}", trader_key(trader))).expect("valid quest id")
}

fn objectives(quest: &QuestId, count: usize, seed: usize) -> Vec<Objective> {
    (0..count)
        .map(|k| {
            let id = ObjectiveId::new(format!("{quest}_o{k}")).expect("valid objective id");
            let mut objective = Objective::new(id, format!("Objective {k}"));
            objective.map = Some(MAPS[(seed + k) % MAPS.len()].to_owned());
            objective.optional = k == 3;
            if k % 2 == 0 {
                objective.count = Some(5);
                objective.progress.push(ProgressRecord::numeric(((seed + k) % 6) as u32, 5));
            } else {
                objective.progress.push(ProgressRecord::binary((seed + k) % 3 == 0));
            }
            objective
        })
        .collect()
}

/// Deterministic multi-trader campaign.
///
/// - Prerequisites always point to an earlier layer, so the graph is acyclic.
/// - Layer 0 of the first trader is partly completed to seed reachable statuses.
pub fn campaign(params: CampaignParams) -> Campaign {
    assert!(params.traders >= 1, "traders must be >= 1");
    assert!(params.layers >= 1, "layers must be >= 1");
    assert!(params.quests_per_layer >= 1, "quests_per_layer must be >= 1");

    let traders = (0..params.traders)
        .map(|trader| {
            let key = trader_key(trader);
            let name = format!("{}{}", key[..1].to_uppercase(), &key[1..]);
            Trader::new(TraderId::new(key).expect("valid trader id"), name)
        })
        .collect::<Vec<_>>();

    let fanout = params.fanout.min(params.quests_per_layer).max(1);
    let mut quests = Vec::with_capacity(params.quest_count());
    let mut seed = 0usize;

    for trader in 0..params.traders {
        for layer in 0..params.layers {
            for idx in 0..params.quests_per_layer {
                let id = quest_id(trader, layer, idx);
                let mut quest = Quest::new(id.clone(), traders[trader].id.clone());
                quest.title = format!("{} task {layer}-{idx}", traders[trader].name);
                quest.kappa_required = seed % 7 == 0;
                quest.objectives = objectives(&id, params.objectives, seed);

                if layer > 0 {
                    for k in 0..fanout {
                        let from_idx = (idx + k) % params.quests_per_layer;
                        quest = quest.with_prerequisite(quest_id(trader, layer - 1, from_idx));
                    }
                    if trader > 0 && params.cross_every > 0 && seed % params.cross_every == 0 {
                        quest = quest.with_prerequisite(quest_id(trader - 1, layer - 1, idx));
                    }
                } else if trader == 0 && idx % 2 == 0 {
                    quest.stored_status = Some(QuestStatus::Completed);
                }

                quests.push(quest);
                seed += 1;
            }
        }
    }

    Campaign { traders, quests }
}

pub fn fixture(case: Case) -> Campaign {
    campaign(case.params())
}

pub fn checksum_lane_graph(graph: &TraderLaneGraph) -> u64 {
    let mut acc = 0u64;
    for node in &graph.nodes {
        let position = node.position();
        acc = acc.wrapping_mul(131).wrapping_add(node.id().len() as u64);
        acc = acc.wrapping_add(position.x as u64).wrapping_add(position.y as u64);
        if let GraphNode::Quest(quest) = node {
            acc = acc.wrapping_add(quest.data.cross_trader_prerequisites.len() as u64);
        }
    }
    acc.wrapping_add(graph.edges.len() as u64)
}
