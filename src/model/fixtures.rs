// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![cfg(test)]

use super::ids::{ObjectiveId, QuestId, TraderId};
use super::progress::ProgressRecord;
use super::quest::{Objective, Quest, QuestStatus};
use super::trader::Trader;

pub(crate) fn qid(value: &str) -> QuestId {
    QuestId::new(value).expect("quest id")
}

pub(crate) fn tid(value: &str) -> TraderId {
    TraderId::new(value).expect("trader id")
}

pub(crate) fn obid(value: &str) -> ObjectiveId {
    ObjectiveId::new(value).expect("objective id")
}

pub(crate) fn quest(id: &str, trader: &str, prerequisites: &[&str]) -> Quest {
    let mut quest = Quest::new(qid(id), tid(trader));
    for prerequisite in prerequisites {
        quest = quest.with_prerequisite(qid(prerequisite));
    }
    quest
}

pub(crate) fn binary_objective(id: &str, completed: Option<bool>) -> Objective {
    let mut objective = Objective::new(obid(id), format!("objective {id}"));
    if let Some(completed) = completed {
        objective.progress.push(ProgressRecord::binary(completed));
    }
    objective
}

pub(crate) fn numeric_objective(id: &str, current: Option<u32>, target: u32) -> Objective {
    let mut objective = Objective::new(obid(id), format!("objective {id}"));
    objective.count = Some(target);
    if let Some(current) = current {
        objective.progress.push(ProgressRecord::numeric(current, target));
    }
    objective
}

pub(crate) fn traders() -> Vec<Trader> {
    vec![
        Trader::new(tid("prapor"), "Prapor"),
        Trader::new(tid("therapist"), "Therapist"),
        Trader::new(tid("skier"), "Skier"),
        Trader::new(tid("ref"), "Ref"),
    ]
}

/// Two-lane-plus fixture:
///
/// ```text
/// prapor:    p1 -> p2 -> p4
///             \--> p3 --/
/// therapist: (p1) -> t1 -> t2
/// skier:     (t2) -> s1
/// ref:       r1
/// ```
pub(crate) fn campaign() -> Vec<Quest> {
    let mut p1 = quest("p1", "Prapor", &[]);
    p1.stored_status = Some(QuestStatus::Completed);
    let mut p4 = quest("p4", "prapor", &["p2", "p3"]);
    p4.kappa_required = true;

    vec![
        quest("r1", "ref", &[]),
        p1,
        quest("p2", "prapor", &["p1"]),
        quest("p3", "prapor", &["p1"]),
        p4,
        quest("t1", "therapist", &["p1"]),
        quest("t2", "therapist", &["t1"]),
        quest("s1", "skier", &["t2"]),
    ]
}
