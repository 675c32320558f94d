// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over quest lists.
//!
//! Queries provide the filtered views (trader, status, map, search) that feed the graph builders.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::model::{Quest, QuestStatus, StatusMap};

pub const DEFAULT_FUZZY_RATIO: f64 = 0.6;

/// Sorted, de-duplicated objective map names.
pub fn quest_maps(quests: &[Quest]) -> Vec<String> {
    let maps: BTreeSet<&str> = quests
        .iter()
        .flat_map(|quest| quest.objectives.iter())
        .filter_map(|objective| objective.map.as_deref())
        .map(str::trim)
        .filter(|map| !map.is_empty())
        .collect();
    maps.into_iter().map(str::to_owned).collect()
}

pub fn filter_quests_by_trader<'a>(quests: &'a [Quest], trader_id: &str) -> Vec<&'a Quest> {
    let key = trader_id.trim().to_lowercase();
    quests.iter().filter(|quest| quest.trader_id.lane_key() == key).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuestSearch {
    /// Case-insensitive substring of the title or id.
    Substring(String),
    Regex(String),
    Fuzzy { needle: String, min_ratio: f64 },
}

impl QuestSearch {
    pub fn fuzzy(needle: impl Into<String>) -> Self {
        Self::Fuzzy { needle: needle.into(), min_ratio: DEFAULT_FUZZY_RATIO }
    }

    fn compile(&self) -> Result<SearchMatcher, QueryError> {
        match self {
            Self::Substring(needle) => Ok(SearchMatcher::Substring(needle.trim().to_lowercase())),
            Self::Regex(pattern) => RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map(SearchMatcher::Regex)
                .map_err(|source| QueryError::InvalidRegex { pattern: pattern.clone(), source }),
            Self::Fuzzy { needle, min_ratio } => Ok(SearchMatcher::Fuzzy {
                needle: needle.trim().to_lowercase(),
                min_ratio: *min_ratio,
            }),
        }
    }
}

enum SearchMatcher {
    Substring(String),
    Regex(Regex),
    Fuzzy { needle: String, min_ratio: f64 },
}

impl SearchMatcher {
    fn matches(&self, quest: &Quest) -> bool {
        match self {
            Self::Substring(needle) => {
                quest.title.to_lowercase().contains(needle.as_str())
                    || quest.id.as_str().to_lowercase().contains(needle.as_str())
            }
            Self::Regex(regex) => regex.is_match(&quest.title) || regex.is_match(quest.id.as_str()),
            Self::Fuzzy { needle, min_ratio } => {
                if needle.is_empty() {
                    return true;
                }
                let title = quest.title.to_lowercase();
                title.contains(needle.as_str()) || fuzzy_ratio(needle, &title) >= *min_ratio
            }
        }
    }
}

fn fuzzy_ratio(needle: &str, haystack: &str) -> f64 {
    rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars())
}

/// Conjunctive quest filter; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestFilter {
    pub trader: Option<String>,
    /// Empty means every status.
    pub statuses: BTreeSet<QuestStatus>,
    pub map: Option<String>,
    pub kappa_only: bool,
    pub search: Option<QuestSearch>,
}

impl QuestFilter {
    pub fn is_empty(&self) -> bool {
        self.trader.is_none()
            && self.statuses.is_empty()
            && self.map.is_none()
            && !self.kappa_only
            && self.search.is_none()
    }

    /// Applies the filter in input order. Quests missing from `statuses` count as locked.
    pub fn apply<'a>(
        &self,
        quests: &'a [Quest],
        statuses: &StatusMap,
    ) -> Result<Vec<&'a Quest>, QueryError> {
        let matcher = self.search.as_ref().map(QuestSearch::compile).transpose()?;
        let trader = self.trader.as_deref().map(|trader| trader.trim().to_lowercase());
        let map = self.map.as_deref().map(str::trim);

        Ok(quests
            .iter()
            .filter(|quest| trader.as_deref().map_or(true, |key| quest.trader_id.lane_key() == key))
            .filter(|quest| !self.kappa_only || quest.kappa_required)
            .filter(|quest| {
                self.statuses.is_empty() || {
                    let status = statuses.get(&quest.id).copied().unwrap_or(QuestStatus::Locked);
                    self.statuses.contains(&status)
                }
            })
            .filter(|quest| map.map_or(true, |map| quest_visits_map(quest, map)))
            .filter(|quest| matcher.as_ref().map_or(true, |matcher| matcher.matches(quest)))
            .collect())
    }
}

fn quest_visits_map(quest: &Quest, map: &str) -> bool {
    quest
        .objectives
        .iter()
        .filter_map(|objective| objective.map.as_deref())
        .any(|candidate| candidate.trim().eq_ignore_ascii_case(map))
}

#[derive(Debug)]
pub enum QueryError {
    InvalidRegex { pattern: String, source: regex::Error },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegex { pattern, source } => {
                write!(f, "invalid search regex `{pattern}`: {source}")
            }
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
        }
    }
}
