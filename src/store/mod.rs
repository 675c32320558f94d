// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Quest datasets on disk.
//!
//! A dataset is one JSON document holding the trader list and the quest list with the user's
//! progress already merged in.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::model::{Quest, Trader};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestDataset {
    #[serde(default)]
    pub traders: Vec<Trader>,
    #[serde(default)]
    pub quests: Vec<Quest>,
}

impl QuestDataset {
    pub fn new(traders: Vec<Trader>, quests: Vec<Quest>) -> Self {
        Self { traders, quests }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
        let dataset: Self = serde_json::from_str(&json)
            .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })?;

        tracing::debug!(
            path = %path.display(),
            traders = dataset.traders.len(),
            quests = dataset.quests.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Writes the dataset through a temp file in the same directory, then renames it into place.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let json = serde_json::to_vec_pretty(self)
            .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })?;

        let Some(file_name) = path.file_name() else {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source: io::Error::other("path has no file name"),
            });
        };
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let tmp_path =
            parent.join(format!(".questlane.tmp.{}.{}", file_name.to_string_lossy(), nanos));

        let write_tmp = || -> io::Result<()> {
            let mut file = fs::OpenOptions::new().write(true).create_new(true).open(&tmp_path)?;
            file.write_all(&json)?;
            file.write_all(b"\n")?;
            file.sync_all()
        };
        if let Err(source) = write_tmp() {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::Io { path: tmp_path, source });
        }

        fs::rename(&tmp_path, path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            StoreError::Io { path: path.to_path_buf(), source }
        })
    }
}

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}
