// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ids::{ObjectiveId, QuestId, TraderId};
use super::progress::ProgressRecord;

/// Quest-level status shared by the stored user status and the computed graph status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    #[serde(alias = "LOCKED")]
    Locked,
    #[serde(alias = "AVAILABLE")]
    Available,
    #[serde(alias = "IN_PROGRESS")]
    InProgress,
    #[serde(alias = "COMPLETED")]
    Completed,
}

impl QuestStatus {
    pub const ALL: [QuestStatus; 4] =
        [Self::Locked, Self::Available, Self::InProgress, Self::Completed];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Available => "available",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseQuestStatusError {
    value: String,
}

impl fmt::Display for ParseQuestStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown quest status: {}", self.value)
    }
}

impl std::error::Error for ParseQuestStatusError {}

impl FromStr for QuestStatus {
    type Err = ParseQuestStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseQuestStatusError { value: s.to_owned() })
    }
}

/// Computed statuses keyed by quest id.
pub type StatusMap = BTreeMap<QuestId, QuestStatus>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub id: ObjectiveId,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub progress: Vec<ProgressRecord>,
}

impl Objective {
    pub fn new(id: ObjectiveId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            map: None,
            count: None,
            optional: false,
            progress: Vec::new(),
        }
    }

    /// `count == 0` is binary, same as an absent count.
    pub fn is_numeric(&self) -> bool {
        self.count.is_some_and(|count| count > 0)
    }

    /// The user's progress record; only the first one is meaningful.
    pub fn current_progress(&self) -> Option<&ProgressRecord> {
        self.progress.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestDependency {
    pub quest_id: QuestId,
    #[serde(default)]
    pub requirement_status: Vec<String>,
}

impl QuestDependency {
    pub fn complete(quest_id: QuestId) -> Self {
        Self { quest_id, requirement_status: vec!["complete".to_owned()] }
    }

    pub fn requires_complete(&self) -> bool {
        self.requirement_status.iter().any(|status| status.contains("complete"))
    }

    pub fn requires_active(&self) -> bool {
        self.requirement_status.iter().any(|status| status.contains("active"))
    }

    pub fn requirement_label(&self) -> String {
        if self.requires_complete() {
            "Complete".to_owned()
        } else if self.requires_active() {
            "Have Active".to_owned()
        } else {
            self.requirement_status.join(", ")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    #[serde(default)]
    pub title: String,
    pub trader_id: TraderId,
    #[serde(default)]
    pub level_required: u32,
    #[serde(default)]
    pub kappa_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wiki_link: Option<String>,
    #[serde(default)]
    pub objectives: Vec<Objective>,
    #[serde(default)]
    pub depends_on: Vec<QuestDependency>,
    /// Last status the user set explicitly, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_status: Option<QuestStatus>,
}

impl Quest {
    pub fn new(id: QuestId, trader_id: TraderId) -> Self {
        Self {
            title: id.to_string(),
            id,
            trader_id,
            level_required: 0,
            kappa_required: false,
            wiki_link: None,
            objectives: Vec::new(),
            depends_on: Vec::new(),
            stored_status: None,
        }
    }

    pub fn with_prerequisite(mut self, quest_id: QuestId) -> Self {
        self.depends_on.push(QuestDependency::complete(quest_id));
        self
    }

    pub fn objective(&self, objective_id: &ObjectiveId) -> Option<&Objective> {
        self.objectives.iter().find(|objective| &objective.id == objective_id)
    }

    pub fn objective_mut(&mut self, objective_id: &ObjectiveId) -> Option<&mut Objective> {
        self.objectives.iter_mut().find(|objective| &objective.id == objective_id)
    }
}

#[cfg(test)]
mod tests {
    use super::{QuestDependency, QuestStatus};
    use crate::model::QuestId;

    #[test]
    fn quest_status_parses_both_vocabularies() {
        assert_eq!("LOCKED".parse::<QuestStatus>(), Ok(QuestStatus::Locked));
        assert_eq!("in_progress".parse::<QuestStatus>(), Ok(QuestStatus::InProgress));
        assert_eq!("IN_PROGRESS".parse::<QuestStatus>(), Ok(QuestStatus::InProgress));
        assert!("done".parse::<QuestStatus>().is_err());
    }

    #[test]
    fn every_status_parses_from_its_own_name() {
        for status in QuestStatus::ALL {
            assert_eq!(status.as_str().parse::<QuestStatus>(), Ok(status));
            assert_eq!(status.to_string().to_uppercase().parse::<QuestStatus>(), Ok(status));
        }
    }

    #[test]
    fn quest_status_serializes_snake_case() {
        let json = serde_json::to_string(&QuestStatus::InProgress).expect("serialize");
        assert_eq!(json, "\"in_progress\"");

        let parsed: QuestStatus = serde_json::from_str("\"IN_PROGRESS\"").expect("deserialize");
        assert_eq!(parsed, QuestStatus::InProgress);
    }

    #[test]
    fn requirement_label_prefers_complete_then_active() {
        let id = QuestId::new("q").expect("quest id");
        let mut dep = QuestDependency::complete(id);
        assert_eq!(dep.requirement_label(), "Complete");

        dep.requirement_status = vec!["active".to_owned()];
        assert_eq!(dep.requirement_label(), "Have Active");

        dep.requirement_status = vec!["failed".to_owned(), "other".to_owned()];
        assert_eq!(dep.requirement_label(), "failed, other");
    }
}
