// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Objective progress writes.
//!
//! A patch is applied to one objective's progress record, the quest status is recomputed from
//! the patched objectives, and a commit persists both back into the in-memory quest list.

use std::fmt;

use crate::graph::QuestIndex;
use crate::model::{Objective, ObjectiveId, ProgressRecord, Quest, QuestId, QuestStatus};
use crate::status::{compute_quest_status, objective_states, should_auto_complete_quest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectivePatch {
    SetCurrent(u32),
    SetCompleted(bool),
    Increment,
    Decrement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub objective_id: ObjectiveId,
    pub record: ProgressRecord,
    pub previous_status: QuestStatus,
    pub new_status: QuestStatus,
    pub auto_complete: bool,
}

impl PatchOutcome {
    pub fn status_changed(&self) -> bool {
        self.previous_status != self.new_status
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub patch: PatchOutcome,
    /// Dependents that became available because this commit completed the quest.
    pub unlocked: Vec<QuestId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpsError {
    QuestNotFound { quest_id: QuestId },
    ObjectiveNotFound { quest_id: QuestId, objective_id: ObjectiveId },
}

impl fmt::Display for OpsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuestNotFound { quest_id } => write!(f, "quest not found (id={quest_id})"),
            Self::ObjectiveNotFound { quest_id, objective_id } => {
                write!(f, "objective not found (quest={quest_id}, id={objective_id})")
            }
        }
    }
}

impl std::error::Error for OpsError {}

/// Numeric target of an objective: its `count`, or the target already on its record.
fn objective_target(objective: &Objective) -> Option<u32> {
    if objective.is_numeric() {
        return objective.count;
    }
    objective.current_progress().and_then(|record| record.target).filter(|target| *target > 0)
}

fn patched_record(objective: &Objective, patch: ObjectivePatch, now_ms: u64) -> ProgressRecord {
    let mut record = objective.current_progress().cloned().unwrap_or_default();

    match objective_target(objective) {
        Some(target) => {
            let current = record.current.unwrap_or(0).min(target);
            let current = match patch {
                ObjectivePatch::SetCurrent(value) => value.min(target),
                ObjectivePatch::SetCompleted(true) => target,
                ObjectivePatch::SetCompleted(false) => 0,
                ObjectivePatch::Increment => current.saturating_add(1).min(target),
                ObjectivePatch::Decrement => current.saturating_sub(1),
            };
            record.current = Some(current);
            record.target = Some(target);
            record.completed = current >= target;
        }
        None => {
            record.completed = match patch {
                ObjectivePatch::SetCurrent(value) => value > 0,
                ObjectivePatch::SetCompleted(completed) => completed,
                ObjectivePatch::Increment => true,
                ObjectivePatch::Decrement => false,
            };
        }
    }

    record.updated_at_ms = Some(now_ms);
    record
}

/// Applies `patch` to a copy of the objective's progress and recomputes the quest status.
///
/// The quest itself is left untouched; see [`commit_objective_patch`] for the write.
pub fn apply_objective_patch(
    quest: &Quest,
    objective_id: &ObjectiveId,
    patch: ObjectivePatch,
    now_ms: u64,
) -> Result<PatchOutcome, OpsError> {
    let Some(objective) = quest.objective(objective_id) else {
        return Err(OpsError::ObjectiveNotFound {
            quest_id: quest.id.clone(),
            objective_id: objective_id.clone(),
        });
    };
    let record = patched_record(objective, patch, now_ms);

    let before = objective_states(&quest.objectives);
    let after = before
        .iter()
        .map(|state| {
            if &state.id == objective_id {
                let mut state = state.clone();
                state.progress = Some(record.progress());
                state
            } else {
                state.clone()
            }
        })
        .collect::<Vec<_>>();

    let previous_status = compute_quest_status(quest.stored_status, &before, QuestStatus::Available);
    let new_status = compute_quest_status(quest.stored_status, &after, QuestStatus::Available);
    let auto_complete = new_status != QuestStatus::Locked && should_auto_complete_quest(&after);

    Ok(PatchOutcome {
        objective_id: objective_id.clone(),
        record,
        previous_status,
        new_status,
        auto_complete,
    })
}

/// Applies `patch` and writes the result back into `quests`.
///
/// A quest without an explicit status is evaluated from its resolved reachability status, so
/// progress on a locked quest is recorded without unlocking it. The recomputed status is
/// persisted into `stored_status` only when it changed.
pub fn commit_objective_patch(
    quests: &mut [Quest],
    quest_id: &QuestId,
    objective_id: &ObjectiveId,
    patch: ObjectivePatch,
    now_ms: u64,
) -> Result<CommitOutcome, OpsError> {
    let (outcome, unlocked) = {
        let index = QuestIndex::new(quests);
        let Some(quest) = index.quest(quest_id) else {
            return Err(OpsError::QuestNotFound { quest_id: quest_id.clone() });
        };
        let statuses = index.resolve_statuses();

        let mut working = quest.clone();
        if working.stored_status.is_none() {
            working.stored_status = statuses.get(quest_id).copied();
        }
        let outcome = apply_objective_patch(&working, objective_id, patch, now_ms)?;

        let completed_now = outcome.new_status == QuestStatus::Completed
            && outcome.previous_status != QuestStatus::Completed;
        let unlocked =
            if completed_now { index.unlocked_by(quest_id, &statuses) } else { Vec::new() };
        (outcome, unlocked)
    };

    // Duplicate ids resolve to the last record, same as the index.
    let Some(quest) = quests.iter_mut().rev().find(|quest| &quest.id == quest_id) else {
        return Err(OpsError::QuestNotFound { quest_id: quest_id.clone() });
    };
    let Some(objective) = quest.objective_mut(objective_id) else {
        return Err(OpsError::ObjectiveNotFound {
            quest_id: quest_id.clone(),
            objective_id: objective_id.clone(),
        });
    };
    match objective.progress.first_mut() {
        Some(first) => *first = outcome.record.clone(),
        None => objective.progress.push(outcome.record.clone()),
    }
    if outcome.status_changed() {
        quest.stored_status = Some(outcome.new_status);
    }

    tracing::debug!(
        quest = %quest_id,
        objective = %objective_id,
        from = %outcome.previous_status,
        to = %outcome.new_status,
        unlocked = unlocked.len(),
        "objective patch committed"
    );

    Ok(CommitOutcome { patch: outcome, unlocked })
}
