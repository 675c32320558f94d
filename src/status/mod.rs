// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Objective-driven quest status.
//!
//! Everything here is a pure function over objective states. `Locked` is sticky: progress never
//! unlocks a quest, and progress alone never moves a quest backwards; a status only regresses
//! through an explicit external write.

use serde::Serialize;

use crate::model::{Objective, ObjectiveId, ObjectiveProgress, QuestStatus, StatusMap};

/// Objective as seen by the status engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveState {
    pub id: ObjectiveId,
    pub optional: bool,
    pub progress: Option<ObjectiveProgress>,
}

impl ObjectiveState {
    pub fn new(id: ObjectiveId, optional: bool, progress: Option<ObjectiveProgress>) -> Self {
        Self { id, optional, progress }
    }

    pub fn is_complete(&self) -> bool {
        self.progress.is_some_and(|progress| progress.is_complete())
    }
}

impl From<&Objective> for ObjectiveState {
    fn from(objective: &Objective) -> Self {
        Self {
            id: objective.id.clone(),
            optional: objective.optional,
            progress: objective.current_progress().map(|record| record.progress()),
        }
    }
}

pub fn objective_states(objectives: &[Objective]) -> Vec<ObjectiveState> {
    objectives.iter().map(ObjectiveState::from).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ObjectiveTally {
    pub total: usize,
    pub completed: usize,
    pub required_total: usize,
    pub required_completed: usize,
}

/// The required subset: non-optional objectives, or all of them when every objective is
/// optional.
fn required_objectives(objectives: &[ObjectiveState]) -> impl Iterator<Item = &ObjectiveState> {
    let any_required = objectives.iter().any(|objective| !objective.optional);
    objectives.iter().filter(move |objective| !any_required || !objective.optional)
}

pub fn compute_objective_progress(objectives: &[ObjectiveState]) -> ObjectiveTally {
    let mut tally = ObjectiveTally { total: objectives.len(), ..ObjectiveTally::default() };
    tally.completed = objectives.iter().filter(|objective| objective.is_complete()).count();

    for objective in required_objectives(objectives) {
        tally.required_total += 1;
        if objective.is_complete() {
            tally.required_completed += 1;
        }
    }

    tally
}

pub fn compute_quest_status(
    stored_status: Option<QuestStatus>,
    objectives: &[ObjectiveState],
    default_status: QuestStatus,
) -> QuestStatus {
    if stored_status == Some(QuestStatus::Locked) {
        return QuestStatus::Locked;
    }

    let fallback = stored_status.unwrap_or(default_status);
    if objectives.is_empty() {
        return fallback;
    }

    let tally = compute_objective_progress(objectives);
    if tally.required_total > 0 && tally.required_completed == tally.required_total {
        QuestStatus::Completed
    } else if tally.required_completed > 0 {
        QuestStatus::InProgress
    } else {
        fallback
    }
}

/// A quest with zero objectives never auto-completes; it has to be marked explicitly.
pub fn should_auto_complete_quest(objectives: &[ObjectiveState]) -> bool {
    let mut required = required_objectives(objectives).peekable();
    required.peek().is_some() && required.all(ObjectiveState::is_complete)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub would_change: bool,
    pub new_status: QuestStatus,
}

/// Previews the quest status after setting one objective's completion.
pub fn would_objective_change_quest_status(
    stored_status: Option<QuestStatus>,
    objectives: &[ObjectiveState],
    toggled_objective_id: &ObjectiveId,
    new_completed: bool,
) -> StatusChange {
    let current_status = compute_quest_status(stored_status, objectives, QuestStatus::Available);

    let simulated = objectives
        .iter()
        .map(|objective| {
            if &objective.id != toggled_objective_id {
                return objective.clone();
            }
            let progress = match objective.progress {
                Some(progress) => progress.with_completed(new_completed),
                None => ObjectiveProgress::Binary { completed: new_completed },
            };
            ObjectiveState { progress: Some(progress), ..objective.clone() }
        })
        .collect::<Vec<_>>();

    let new_status = compute_quest_status(stored_status, &simulated, QuestStatus::Available);
    StatusChange { would_change: new_status != current_status, new_status }
}

/// Status a click on the quest node moves to. Locked quests do not cycle.
pub fn next_status_on_click(current: QuestStatus) -> Option<QuestStatus> {
    match current {
        QuestStatus::Locked => None,
        QuestStatus::Available => Some(QuestStatus::InProgress),
        QuestStatus::InProgress => Some(QuestStatus::Completed),
        QuestStatus::Completed => Some(QuestStatus::Available),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub available: usize,
    pub locked: usize,
}

impl ProgressStats {
    pub fn from_statuses(statuses: &StatusMap) -> Self {
        let mut stats = Self { total: statuses.len(), ..Self::default() };
        for status in statuses.values() {
            match status {
                QuestStatus::Completed => stats.completed += 1,
                QuestStatus::InProgress => stats.in_progress += 1,
                QuestStatus::Available => stats.available += 1,
                QuestStatus::Locked => stats.locked += 1,
            }
        }
        stats
    }
}
