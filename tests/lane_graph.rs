// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};

use questlane::graph::QuestIndex;
use questlane::layout::{build_trader_lane_graph, GraphNode, GraphOptions, LayoutConfig};
use questlane::model::{ObjectiveId, QuestId, QuestStatus};
use questlane::ops::{commit_objective_patch, ObjectivePatch};
use questlane::query::{quest_maps, QuestFilter, QuestSearch};
use questlane::status::ProgressStats;
use questlane::store::QuestDataset;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

fn load_campaign() -> QuestDataset {
    let path = fixture_path("campaign.json");
    QuestDataset::load(&path).unwrap_or_else(|err| panic!("failed to load {path:?}: {err}"))
}

fn qid(value: &str) -> QuestId {
    QuestId::new(value).expect("quest id")
}

#[test]
fn statuses_follow_reachability_and_stored_overrides() {
    let dataset = load_campaign();
    let statuses = QuestIndex::new(&dataset.quests).resolve_statuses();

    let expected = [
        ("debut", QuestStatus::Completed),
        ("search_mission", QuestStatus::Available),
        ("checking", QuestStatus::Available),
        ("shootout_picnic", QuestStatus::Locked),
        ("shortage", QuestStatus::Available),
        ("sanitary_standards", QuestStatus::Locked),
        ("supplier", QuestStatus::Locked),
        ("gunsmith_1", QuestStatus::InProgress),
        ("gunsmith_2", QuestStatus::Locked),
    ];
    for (quest_id, status) in expected {
        assert_eq!(statuses.get(&qid(quest_id)), Some(&status), "status of {quest_id}");
    }

    let stats = ProgressStats::from_statuses(&statuses);
    assert_eq!(
        (stats.total, stats.completed, stats.in_progress, stats.available, stats.locked),
        (9, 1, 1, 3, 4)
    );
}

#[test]
fn lanes_are_ordered_and_do_not_overlap() {
    let dataset = load_campaign();
    let statuses = QuestIndex::new(&dataset.quests).resolve_statuses();
    let graph = build_trader_lane_graph(
        &dataset.quests,
        &dataset.traders,
        &statuses,
        &GraphOptions::default(),
        &LayoutConfig::default(),
    );

    assert_eq!(graph.trader_order, vec!["prapor", "therapist", "skier", "mechanic"]);
    assert_eq!(graph.lane_offsets.len(), 4);
    for pair in graph.lane_offsets.windows(2) {
        assert!(pair[0].bottom() <= pair[1].y, "lanes {pair:?} overlap");
    }

    let config = LayoutConfig::default();
    for node in &graph.nodes {
        let GraphNode::Quest(quest) = node else {
            continue;
        };
        let band = graph
            .lane_offsets
            .iter()
            .find(|band| band.trader_id == quest.data.trader_id.lane_key())
            .expect("quest lane");
        assert!(quest.position.y >= band.y, "{} above its lane", quest.id);
        assert!(
            quest.position.y + config.quest_height <= band.bottom(),
            "{} below its lane",
            quest.id
        );
        assert!(quest.position.x >= config.quest_x_offset());
    }

    let headers = graph
        .nodes
        .iter()
        .filter(|node| matches!(node, GraphNode::Trader(_)))
        .map(GraphNode::id)
        .collect::<Vec<_>>();
    assert_eq!(
        headers,
        vec!["trader-prapor", "trader-therapist", "trader-skier", "trader-mechanic"]
    );
}

#[test]
fn cross_trader_dependencies_are_badges_unless_requested() {
    let dataset = load_campaign();
    let statuses = QuestIndex::new(&dataset.quests).resolve_statuses();
    let config = LayoutConfig::default();

    let graph = build_trader_lane_graph(
        &dataset.quests,
        &dataset.traders,
        &statuses,
        &GraphOptions::default(),
        &config,
    );
    assert_eq!(graph.edges.len(), 6);
    assert!(graph.edges.iter().all(|edge| !edge.id.starts_with("cross-")));

    let badges = |id: &str| {
        graph
            .nodes
            .iter()
            .filter_map(GraphNode::as_quest)
            .find(|node| node.id.as_str() == id)
            .map(|node| node.data.cross_trader_prerequisites.clone())
            .expect("quest node")
    };
    assert_eq!(badges("shortage"), vec![qid("debut")]);
    assert_eq!(badges("supplier"), vec![qid("shortage")]);
    assert!(badges("checking").is_empty());

    let options = GraphOptions { include_cross_trader_edges: true, ..GraphOptions::default() };
    let graph =
        build_trader_lane_graph(&dataset.quests, &dataset.traders, &statuses, &options, &config);
    let mut cross = graph
        .edges
        .iter()
        .filter(|edge| edge.id.starts_with("cross-"))
        .map(|edge| edge.id.as_str())
        .collect::<Vec<_>>();
    cross.sort_unstable();
    assert_eq!(cross, vec!["cross-debut-shortage", "cross-shortage-supplier"]);
}

#[test]
fn focus_mode_dims_everything_outside_the_chain() {
    let dataset = load_campaign();
    let statuses = QuestIndex::new(&dataset.quests).resolve_statuses();
    let options = GraphOptions::default().with_focus(qid("checking"), &dataset.quests);
    let graph = build_trader_lane_graph(
        &dataset.quests,
        &dataset.traders,
        &statuses,
        &options,
        &LayoutConfig::default(),
    );

    let chain = options.focus_chain.as_ref().expect("focus chain");
    assert_eq!(
        chain.iter().map(QuestId::as_str).collect::<Vec<_>>(),
        vec!["checking", "debut", "shootout_picnic"]
    );

    for edge in &graph.edges {
        let inside = chain.contains(&edge.source) && chain.contains(&edge.target);
        if inside {
            assert_eq!(edge.style.stroke_width, 3.0, "{}", edge.id);
            assert!(edge.style.opacity > 0.2, "{}", edge.id);
        } else {
            assert_eq!(edge.style.opacity, 0.2, "{}", edge.id);
            assert!(!edge.animated, "{}", edge.id);
        }
    }

    let debut_checking =
        graph.edges.iter().find(|edge| edge.id == "debut-checking").expect("edge");
    assert_eq!(debut_checking.style.stroke, "#3B82F6");
    assert!(debut_checking.animated);
}

#[test]
fn completing_an_objective_unlocks_dependents_across_lanes() {
    let mut dataset = load_campaign();
    let outcome = commit_objective_patch(
        &mut dataset.quests,
        &qid("shortage"),
        &ObjectiveId::new("shortage-salewa").expect("objective id"),
        ObjectivePatch::SetCompleted(true),
        1_700_000_000_000,
    )
    .expect("commit");

    assert_eq!(outcome.patch.previous_status, QuestStatus::Available);
    assert_eq!(outcome.patch.new_status, QuestStatus::Completed);
    assert!(outcome.patch.auto_complete);
    assert_eq!(outcome.patch.record.current, Some(3));
    assert_eq!(outcome.unlocked, vec![qid("sanitary_standards"), qid("supplier")]);

    let statuses = QuestIndex::new(&dataset.quests).resolve_statuses();
    assert_eq!(statuses.get(&qid("sanitary_standards")), Some(&QuestStatus::Available));
    assert_eq!(statuses.get(&qid("supplier")), Some(&QuestStatus::Available));
}

#[test]
fn filters_and_maps_over_the_dataset() {
    let dataset = load_campaign();
    let statuses = QuestIndex::new(&dataset.quests).resolve_statuses();

    assert_eq!(quest_maps(&dataset.quests), vec!["Customs", "Factory", "Woods"]);

    let filter = QuestFilter {
        trader: Some("THERAPIST".to_owned()),
        ..QuestFilter::default()
    };
    let ids = filter
        .apply(&dataset.quests, &statuses)
        .expect("filter")
        .into_iter()
        .map(|quest| quest.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["shortage", "sanitary_standards"]);

    let filter = QuestFilter {
        search: Some(QuestSearch::Regex(r"^gunsmith - part \d$".to_owned())),
        ..QuestFilter::default()
    };
    assert_eq!(filter.apply(&dataset.quests, &statuses).expect("filter").len(), 2);
}

#[test]
fn lane_graph_serializes_for_the_renderer() {
    let dataset = load_campaign();
    let statuses = QuestIndex::new(&dataset.quests).resolve_statuses();
    let graph = build_trader_lane_graph(
        &dataset.quests,
        &dataset.traders,
        &statuses,
        &GraphOptions::default(),
        &LayoutConfig::default(),
    );

    let json = serde_json::to_value(&graph).expect("serialize");
    assert_eq!(json["traderOrder"][0], "prapor");
    assert_eq!(json["laneOffsets"].as_array().map(Vec::len), Some(4));

    let nodes = json["nodes"].as_array().expect("nodes");
    assert_eq!(nodes[0]["type"], "trader");
    assert_eq!(nodes[0]["data"]["traderName"], "Prapor");
    let debut = nodes.iter().find(|node| node["id"] == "debut").expect("debut node");
    assert_eq!(debut["type"], "quest");
    assert_eq!(debut["data"]["status"], "completed");
    assert_eq!(debut["data"]["isRoot"], true);
}
