// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Questlane CLI entrypoint.
//!
//! Loads a quest dataset, resolves quest statuses, and prints the trader-lane graph as JSON.
//! `--stats` and `--chain` print the progress summary or a focus chain instead.

use std::error::Error;

use questlane::graph::{get_quest_chain, QuestIndex};
use questlane::layout::{build_quest_graph, build_trader_lane_graph, GraphOptions, LayoutConfig};
use questlane::model::{Quest, QuestId};
use questlane::query::{QuestFilter, QuestSearch};
use questlane::status::ProgressStats;
use questlane::store::QuestDataset;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "QUESTLANE_LOG";
const DEFAULT_LOG_FILTER: &str = "questlane=info";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <dataset.json> [--focus <quest>] [--select <quest>] [--trader <id>]\n      [--search <text>] [--search-mode substring|regex|fuzzy] [--cross-edges] [--flat]\n      [--layout <key=value,...>] [--compact]\n  {program} <dataset.json> --chain <quest> [--compact]\n  {program} <dataset.json> --stats [--compact]\n\nPrints the trader-lane graph as JSON. --flat prints the single-graph layout instead.\n--layout overrides layout constants on top of QUESTLANE_LAYOUT.\nLogging goes to stderr and is filtered by {LOG_ENV} (default `{DEFAULT_LOG_FILTER}`)."
    );
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum SearchMode {
    #[default]
    Substring,
    Regex,
    Fuzzy,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    dataset: String,
    focus: Option<String>,
    select: Option<String>,
    trader: Option<String>,
    search: Option<String>,
    search_mode: Option<SearchMode>,
    cross_edges: bool,
    flat: bool,
    layout: Option<String>,
    chain: Option<String>,
    stats: bool,
    compact: bool,
}

fn set_once(slot: &mut Option<String>, value: Option<String>) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    *slot = Some(value.ok_or(())?);
    Ok(())
}

fn set_flag(flag: &mut bool) -> Result<(), ()> {
    if *flag {
        return Err(());
    }
    *flag = true;
    Ok(())
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();
    let mut dataset = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--focus" => set_once(&mut options.focus, args.next())?,
            "--select" => set_once(&mut options.select, args.next())?,
            "--trader" => set_once(&mut options.trader, args.next())?,
            "--search" => set_once(&mut options.search, args.next())?,
            "--layout" => set_once(&mut options.layout, args.next())?,
            "--chain" => set_once(&mut options.chain, args.next())?,
            "--search-mode" => {
                if options.search_mode.is_some() {
                    return Err(());
                }
                let mode = match args.next().ok_or(())?.as_str() {
                    "substring" => SearchMode::Substring,
                    "regex" => SearchMode::Regex,
                    "fuzzy" => SearchMode::Fuzzy,
                    _ => return Err(()),
                };
                options.search_mode = Some(mode);
            }
            "--cross-edges" => set_flag(&mut options.cross_edges)?,
            "--flat" => set_flag(&mut options.flat)?,
            "--stats" => set_flag(&mut options.stats)?,
            "--compact" => set_flag(&mut options.compact)?,
            _ if arg.starts_with('-') => return Err(()),
            _ => set_once(&mut dataset, Some(arg))?,
        }
    }

    options.dataset = dataset.ok_or(())?;

    if options.stats && options.chain.is_some() {
        return Err(());
    }
    if options.search_mode.is_some() && options.search.is_none() {
        return Err(());
    }

    Ok(options)
}

impl CliOptions {
    fn quest_filter(&self) -> QuestFilter {
        let search = self.search.clone().map(|needle| match self.search_mode.unwrap_or_default() {
            SearchMode::Substring => QuestSearch::Substring(needle),
            SearchMode::Regex => QuestSearch::Regex(needle),
            SearchMode::Fuzzy => QuestSearch::fuzzy(needle),
        });
        QuestFilter { trader: self.trader.clone(), search, ..QuestFilter::default() }
    }

    fn layout_config(&self) -> Result<LayoutConfig, Box<dyn Error>> {
        let mut config = LayoutConfig::from_env()?;
        if let Some(overrides) = &self.layout {
            config.apply_overrides(overrides).map_err(|err| format!("--layout: {err}"))?;
        }
        Ok(config)
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<(), Box<dyn Error>> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{json}");
    Ok(())
}

fn run(options: CliOptions) -> Result<(), Box<dyn Error>> {
    let dataset = QuestDataset::load(&options.dataset)?;
    let statuses = QuestIndex::new(&dataset.quests).resolve_statuses();

    if options.stats {
        return print_json(&ProgressStats::from_statuses(&statuses), options.compact);
    }

    if let Some(chain) = &options.chain {
        let quest_id = QuestId::new(chain.as_str())?;
        let chain = get_quest_chain(&quest_id, &dataset.quests);
        return print_json(&chain, options.compact);
    }

    let filter = options.quest_filter();
    let quests: Vec<Quest> = if filter.is_empty() {
        dataset.quests.clone()
    } else {
        filter.apply(&dataset.quests, &statuses)?.into_iter().cloned().collect()
    };
    tracing::info!(total = dataset.quests.len(), shown = quests.len(), "quests selected");

    let mut graph_options = GraphOptions {
        include_cross_trader_edges: options.cross_edges,
        ..GraphOptions::default()
    };
    if let Some(select) = &options.select {
        graph_options.selected_quest_id = Some(QuestId::new(select.as_str())?);
    }
    if let Some(focus) = &options.focus {
        graph_options = graph_options.with_focus(QuestId::new(focus.as_str())?, &dataset.quests);
    }

    let config = options.layout_config()?;
    if options.flat {
        let graph = build_quest_graph(&quests, &statuses, &graph_options, &config);
        print_json(&graph, options.compact)
    } else {
        let graph =
            build_trader_lane_graph(&quests, &dataset.traders, &statuses, &graph_options, &config);
        print_json(&graph, options.compact)
    }
}

fn main() {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "questlane".to_owned());

    let options = match parse_options(args) {
        Ok(options) => options,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    init_tracing();

    if let Err(err) = run(options) {
        eprintln!("questlane: {err}");
        std::process::exit(1);
    }
}
