// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Questlane: quest progress status engine and trader-lane graph layout.
//!
//! The crate is pure computation over in-memory quest lists. `model` holds the data types,
//! `status` and `graph` derive quest statuses, and `layout` turns a quest list into positioned
//! nodes and styled edges ready for a graph renderer.

pub mod graph;
pub mod layout;
pub mod model;
pub mod ops;
pub mod query;
pub mod status;
pub mod store;
