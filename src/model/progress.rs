// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

/// Raw per-user objective progress as delivered by the progress data provider.
///
/// The record is loosely shaped (numeric fields are optional); use [`ProgressRecord::progress`]
/// to get the discriminated [`ObjectiveProgress`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at_ms: Option<u64>,
}

impl ProgressRecord {
    pub fn binary(completed: bool) -> Self {
        Self { completed, ..Self::default() }
    }

    pub fn numeric(current: u32, target: u32) -> Self {
        Self {
            completed: current >= target,
            current: Some(current),
            target: Some(target),
            ..Self::default()
        }
    }

    pub fn progress(&self) -> ObjectiveProgress {
        ObjectiveProgress::from_record(self)
    }
}

/// Completion state of a single objective.
///
/// A record with a non-zero target is numeric; everything else (no target, or a target of `0`)
/// is binary. The numeric rule ignores the stored `completed` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveProgress {
    Binary { completed: bool },
    Numeric { current: u32, target: u32 },
}

impl ObjectiveProgress {
    pub fn from_record(record: &ProgressRecord) -> Self {
        match record.target {
            Some(target) if target > 0 => {
                Self::Numeric { current: record.current.unwrap_or(0), target }
            }
            _ => Self::Binary { completed: record.completed },
        }
    }

    pub fn is_complete(&self) -> bool {
        match *self {
            Self::Binary { completed } => completed,
            Self::Numeric { current, target } => current >= target,
        }
    }

    /// Returns a copy with its completion forced to `completed`.
    ///
    /// Numeric progress jumps to its target (or back to zero).
    pub fn with_completed(self, completed: bool) -> Self {
        match self {
            Self::Binary { .. } => Self::Binary { completed },
            Self::Numeric { target, .. } => {
                Self::Numeric { current: if completed { target } else { 0 }, target }
            }
        }
    }
}

/// Completeness predicate over an optional progress record.
pub fn is_objective_complete(progress: Option<&ProgressRecord>) -> bool {
    progress.is_some_and(|record| record.progress().is_complete())
}
