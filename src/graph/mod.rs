// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Prerequisite/dependent adjacency and reachability-driven status.
//!
//! Edges to quest ids outside the indexed set are dropped when the index is built, so every
//! query here only ever sees known quests.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Quest, QuestId, QuestStatus, StatusMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainDirection {
    Prerequisites,
    Dependents,
    Both,
}

#[derive(Debug, Clone)]
pub struct QuestIndex<'a> {
    quests: BTreeMap<QuestId, &'a Quest>,
    prerequisites: BTreeMap<QuestId, Vec<QuestId>>,
    dependents: BTreeMap<QuestId, Vec<QuestId>>,
}

impl<'a> QuestIndex<'a> {
    pub fn new(quests: &'a [Quest]) -> Self {
        let mut by_id: BTreeMap<QuestId, &'a Quest> = BTreeMap::new();
        for quest in quests {
            if by_id.insert(quest.id.clone(), quest).is_some() {
                tracing::warn!(quest = %quest.id, "duplicate quest id; last record wins");
            }
        }

        let mut prerequisites: BTreeMap<QuestId, BTreeSet<QuestId>> = BTreeMap::new();
        let mut dependents: BTreeMap<QuestId, BTreeSet<QuestId>> = BTreeMap::new();
        for quest_id in by_id.keys() {
            prerequisites.entry(quest_id.clone()).or_default();
            dependents.entry(quest_id.clone()).or_default();
        }

        for (quest_id, quest) in &by_id {
            for dependency in &quest.depends_on {
                if !by_id.contains_key(&dependency.quest_id) {
                    tracing::debug!(
                        quest = %quest_id,
                        prerequisite = %dependency.quest_id,
                        "skipping dependency on unknown quest"
                    );
                    continue;
                }
                prerequisites
                    .entry(quest_id.clone())
                    .or_default()
                    .insert(dependency.quest_id.clone());
                dependents
                    .entry(dependency.quest_id.clone())
                    .or_default()
                    .insert(quest_id.clone());
            }
        }

        Self {
            quests: by_id,
            prerequisites: into_lists(prerequisites),
            dependents: into_lists(dependents),
        }
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    pub fn contains(&self, quest_id: &QuestId) -> bool {
        self.quests.contains_key(quest_id)
    }

    pub fn quest(&self, quest_id: &QuestId) -> Option<&'a Quest> {
        self.quests.get(quest_id).copied()
    }

    pub fn quest_ids(&self) -> impl Iterator<Item = &QuestId> {
        self.quests.keys()
    }

    /// Known prerequisites of `quest_id`, sorted by id.
    pub fn prerequisites(&self, quest_id: &QuestId) -> &[QuestId] {
        self.prerequisites.get(quest_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Known dependents of `quest_id`, sorted by id.
    pub fn dependents(&self, quest_id: &QuestId) -> &[QuestId] {
        self.dependents.get(quest_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Transitive closure from `quest_id` in the given direction, always including `quest_id`.
    pub fn chain(&self, quest_id: &QuestId, direction: ChainDirection) -> BTreeSet<QuestId> {
        let mut chain = BTreeSet::from([quest_id.clone()]);
        if matches!(direction, ChainDirection::Prerequisites | ChainDirection::Both) {
            chain.extend(walk(&self.prerequisites, quest_id));
        }
        if matches!(direction, ChainDirection::Dependents | ChainDirection::Both) {
            chain.extend(walk(&self.dependents, quest_id));
        }
        chain
    }

    /// Reachability status for every indexed quest.
    ///
    /// Prerequisites are resolved before their dependents. A quest that sits on a dependency
    /// cycle and has no explicit status resolves to `Locked`.
    pub fn resolve_statuses(&self) -> StatusMap {
        let mut resolved = StatusMap::new();
        let mut on_stack: BTreeSet<QuestId> = BTreeSet::new();
        let mut stack: Vec<(QuestId, bool)> = Vec::new();

        for root in self.quests.keys() {
            if resolved.contains_key(root) {
                continue;
            }
            stack.push((root.clone(), false));

            while let Some((quest_id, expanded)) = stack.pop() {
                if resolved.contains_key(&quest_id) {
                    continue;
                }

                if expanded {
                    on_stack.remove(&quest_id);
                    if let Some(quest) = self.quest(&quest_id) {
                        resolved.insert(quest_id, compute_quest_status(self, quest, &resolved));
                    }
                    continue;
                }

                if on_stack.contains(&quest_id) {
                    continue;
                }
                if let Some(stored) = self.quest(&quest_id).and_then(|quest| quest.stored_status) {
                    resolved.insert(quest_id, stored);
                    continue;
                }

                on_stack.insert(quest_id.clone());
                stack.push((quest_id.clone(), true));
                for prerequisite in self.prerequisites(&quest_id).iter().rev() {
                    if resolved.contains_key(prerequisite) {
                        continue;
                    }
                    if on_stack.contains(prerequisite) {
                        tracing::warn!(
                            quest = %quest_id,
                            prerequisite = %prerequisite,
                            "dependency cycle; prerequisite treated as incomplete"
                        );
                        continue;
                    }
                    stack.push((prerequisite.clone(), false));
                }
            }
        }

        resolved
    }

    /// Dependents of `quest_id` that become available once it is completed.
    ///
    /// Only dependents without an explicit status qualify, and every one of their other
    /// prerequisites must already be completed in `statuses`.
    pub fn unlocked_by(&self, quest_id: &QuestId, statuses: &StatusMap) -> Vec<QuestId> {
        self.dependents(quest_id)
            .iter()
            .filter(|dependent| {
                self.quest(dependent).is_some_and(|quest| quest.stored_status.is_none())
                    && statuses.get(*dependent) != Some(&QuestStatus::Available)
                    && self.prerequisites(dependent).iter().all(|prerequisite| {
                        prerequisite == quest_id
                            || statuses.get(prerequisite) == Some(&QuestStatus::Completed)
                    })
            })
            .cloned()
            .collect()
    }
}

fn into_lists(map: BTreeMap<QuestId, BTreeSet<QuestId>>) -> BTreeMap<QuestId, Vec<QuestId>> {
    map.into_iter()
        .map(|(quest_id, neighbors)| (quest_id, neighbors.into_iter().collect()))
        .collect()
}

fn walk(adjacency: &BTreeMap<QuestId, Vec<QuestId>>, start: &QuestId) -> BTreeSet<QuestId> {
    let mut visited: BTreeSet<QuestId> = BTreeSet::new();
    let mut stack: Vec<&QuestId> = vec![start];

    while let Some(quest_id) = stack.pop() {
        for next_id in adjacency.get(quest_id).into_iter().flatten() {
            if visited.insert(next_id.clone()) {
                stack.push(next_id);
            }
        }
    }

    visited
}

/// Reachability status of one quest given already-resolved prerequisite statuses.
///
/// An explicit stored status wins. Otherwise the quest is available when every prerequisite
/// known to `index` is completed in `statuses`. A known prerequisite without an entry counts as
/// incomplete; ids outside the index are not prerequisites at all.
pub fn compute_quest_status(
    index: &QuestIndex<'_>,
    quest: &Quest,
    statuses: &StatusMap,
) -> QuestStatus {
    if let Some(stored) = quest.stored_status {
        return stored;
    }

    let all_completed = index
        .prerequisites(&quest.id)
        .iter()
        .all(|prerequisite| statuses.get(prerequisite) == Some(&QuestStatus::Completed));
    if all_completed {
        QuestStatus::Available
    } else {
        QuestStatus::Locked
    }
}

/// The focus chain of `quest_id`: itself plus all ancestors and descendants.
pub fn get_quest_chain(quest_id: &QuestId, quests: &[Quest]) -> BTreeSet<QuestId> {
    QuestIndex::new(quests).chain(quest_id, ChainDirection::Both)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rstest::{fixture, rstest};

    use super::{compute_quest_status, get_quest_chain, ChainDirection, QuestIndex};
    use crate::model::fixtures::{campaign, qid, quest};
    use crate::model::{Quest, QuestId, QuestStatus, StatusMap};

    #[fixture]
    fn quests() -> Vec<Quest> {
        campaign()
    }

    fn ids(values: &[&str]) -> BTreeSet<QuestId> {
        values.iter().map(|value| qid(value)).collect()
    }

    #[test]
    fn chain_walks_both_directions() {
        let quests = vec![
            quest("c", "prapor", &[]),
            quest("b", "prapor", &["c"]),
            quest("a", "prapor", &["b"]),
        ];
        assert_eq!(get_quest_chain(&qid("b"), &quests), ids(&["a", "b", "c"]));
        assert_eq!(get_quest_chain(&qid("a"), &quests), ids(&["a", "b", "c"]));
    }

    #[rstest]
    fn chain_excludes_siblings(quests: Vec<Quest>) {
        assert_eq!(get_quest_chain(&qid("p2"), &quests), ids(&["p1", "p2", "p4"]));
    }

    #[rstest]
    fn chain_follows_cross_trader_edges(quests: Vec<Quest>) {
        let index = QuestIndex::new(&quests);
        assert_eq!(
            index.chain(&qid("t1"), ChainDirection::Dependents),
            ids(&["t1", "t2", "s1"])
        );
        assert_eq!(
            index.chain(&qid("s1"), ChainDirection::Prerequisites),
            ids(&["s1", "t2", "t1", "p1"])
        );
    }

    #[test]
    fn chain_of_unknown_quest_is_itself() {
        assert_eq!(get_quest_chain(&qid("ghost"), &[]), ids(&["ghost"]));
    }

    #[test]
    fn chain_survives_cycles() {
        let quests = vec![quest("a", "prapor", &["b"]), quest("b", "prapor", &["a"])];
        assert_eq!(get_quest_chain(&qid("a"), &quests), ids(&["a", "b"]));
    }

    #[test]
    fn unknown_prerequisites_are_skipped() {
        let quests = vec![quest("a", "prapor", &["missing"])];
        let index = QuestIndex::new(&quests);
        assert!(index.prerequisites(&qid("a")).is_empty());
        assert_eq!(index.resolve_statuses().get(&qid("a")), Some(&QuestStatus::Available));
    }

    #[rstest]
    fn resolve_statuses_propagates_over_multiple_hops(quests: Vec<Quest>) {
        let statuses = QuestIndex::new(&quests).resolve_statuses();
        let expected = StatusMap::from([
            (qid("r1"), QuestStatus::Available),
            (qid("p1"), QuestStatus::Completed),
            (qid("p2"), QuestStatus::Available),
            (qid("p3"), QuestStatus::Available),
            (qid("p4"), QuestStatus::Locked),
            (qid("t1"), QuestStatus::Available),
            (qid("t2"), QuestStatus::Locked),
            (qid("s1"), QuestStatus::Locked),
        ]);
        assert_eq!(statuses, expected);
    }

    #[test]
    fn resolve_statuses_is_independent_of_input_order() {
        let mut a = quest("a", "prapor", &[]);
        a.stored_status = Some(QuestStatus::Completed);
        let mut b = quest("b", "prapor", &["a"]);
        b.stored_status = Some(QuestStatus::Completed);
        let c = quest("c", "prapor", &["b"]);

        let forward = vec![a.clone(), b.clone(), c.clone()];
        let backward = vec![c, b, a];
        let forward_statuses = QuestIndex::new(&forward).resolve_statuses();
        assert_eq!(forward_statuses.get(&qid("c")), Some(&QuestStatus::Available));
        assert_eq!(QuestIndex::new(&backward).resolve_statuses(), forward_statuses);
    }

    #[test]
    fn quests_on_a_cycle_resolve_to_locked() {
        let quests = vec![
            quest("a", "prapor", &["b"]),
            quest("b", "prapor", &["a"]),
            quest("c", "prapor", &[]),
        ];
        let statuses = QuestIndex::new(&quests).resolve_statuses();
        assert_eq!(statuses.get(&qid("a")), Some(&QuestStatus::Locked));
        assert_eq!(statuses.get(&qid("b")), Some(&QuestStatus::Locked));
        assert_eq!(statuses.get(&qid("c")), Some(&QuestStatus::Available));
    }

    #[test]
    fn explicit_status_wins_over_reachability() {
        let mut started = quest("a", "prapor", &["b"]);
        started.stored_status = Some(QuestStatus::InProgress);
        let quests = vec![started, quest("b", "prapor", &[])];
        let index = QuestIndex::new(&quests);
        let statuses = StatusMap::from([(qid("b"), QuestStatus::Locked)]);
        assert_eq!(
            compute_quest_status(&index, &quests[0], &statuses),
            QuestStatus::InProgress
        );
    }

    #[rstest]
    #[case(&[], QuestStatus::Available)]
    #[case(&[QuestStatus::Completed, QuestStatus::Completed], QuestStatus::Available)]
    #[case(&[QuestStatus::Completed, QuestStatus::InProgress], QuestStatus::Locked)]
    #[case(&[QuestStatus::Available], QuestStatus::Locked)]
    fn reachability_requires_completed_prerequisites(
        #[case] prerequisite_statuses: &[QuestStatus],
        #[case] expected: QuestStatus,
    ) {
        let names = ["x", "y", "z"];
        let prerequisites = &names[..prerequisite_statuses.len()];
        let mut quests = vec![quest("q", "prapor", prerequisites)];
        quests.extend(prerequisites.iter().map(|name| quest(name, "prapor", &[])));
        let index = QuestIndex::new(&quests);
        let statuses = prerequisites
            .iter()
            .zip(prerequisite_statuses)
            .map(|(name, status)| (qid(name), *status))
            .collect::<StatusMap>();
        assert_eq!(compute_quest_status(&index, &quests[0], &statuses), expected);
    }

    #[test]
    fn known_prerequisite_without_a_status_locks() {
        let quests = vec![quest("b", "prapor", &[]), quest("c", "prapor", &["b"])];
        let index = QuestIndex::new(&quests);
        assert_eq!(
            compute_quest_status(&index, &quests[1], &StatusMap::new()),
            QuestStatus::Locked
        );
    }

    #[test]
    fn unknown_prerequisite_is_ignored() {
        let quests = vec![quest("c", "prapor", &["ghost"])];
        let index = QuestIndex::new(&quests);
        assert_eq!(
            compute_quest_status(&index, &quests[0], &StatusMap::new()),
            QuestStatus::Available
        );
    }

    #[rstest]
    fn unlocked_by_reports_dependents_with_all_prerequisites_done(quests: Vec<Quest>) {
        let index = QuestIndex::new(&quests);
        let mut statuses = index.resolve_statuses();

        assert_eq!(index.unlocked_by(&qid("p2"), &statuses), Vec::<QuestId>::new());

        statuses.insert(qid("p3"), QuestStatus::Completed);
        assert_eq!(index.unlocked_by(&qid("p2"), &statuses), vec![qid("p4")]);
        assert_eq!(index.unlocked_by(&qid("t1"), &statuses), vec![qid("t2")]);
    }
}
