// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::error::Error;
use std::fmt;

use super::layered::LayeredParams;

pub const LAYOUT_ENV: &str = "QUESTLANE_LAYOUT";

/// Geometry constants for both the lane layout and the single-graph layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub quest_width: f64,
    pub quest_height: f64,
    pub rank_sep: f64,
    pub lane_node_sep: f64,
    pub lane_margin: f64,
    pub graph_node_sep: f64,
    pub graph_margin_x: f64,
    pub graph_margin_y: f64,
    pub trader_width: f64,
    pub trader_height: f64,
    pub base_lane_height: f64,
    pub lane_padding: f64,
    pub lane_spacing: f64,
    pub trader_gap: f64,
    pub sweeps: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            quest_width: 200.0,
            quest_height: 64.0,
            rank_sep: 160.0,
            lane_node_sep: 25.0,
            lane_margin: 10.0,
            graph_node_sep: 35.0,
            graph_margin_x: 50.0,
            graph_margin_y: 30.0,
            trader_width: 100.0,
            trader_height: 60.0,
            base_lane_height: 100.0,
            lane_padding: 20.0,
            lane_spacing: 30.0,
            trader_gap: 60.0,
            sweeps: 4,
        }
    }
}

impl LayoutConfig {
    /// Defaults with `QUESTLANE_LAYOUT` overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let value = match env::var(LAYOUT_ENV) {
            Ok(value) => value,
            Err(env::VarError::NotPresent) => return Ok(config),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::InvalidEnv {
                    name: LAYOUT_ENV.to_string(),
                    value: "<non-unicode>".to_string(),
                });
            }
        };

        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(config);
        }

        config.apply_overrides(trimmed).map_err(|error| ConfigError::InvalidEnv {
            name: LAYOUT_ENV.to_string(),
            value: format!("{trimmed} ({error})"),
        })?;
        Ok(config)
    }

    /// Applies a `key=value,key=value` override list.
    pub fn apply_overrides(&mut self, list: &str) -> Result<(), String> {
        for entry in list.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let Some((key, value)) = entry.split_once('=') else {
                return Err(format!("expected key=value, got `{entry}`"));
            };
            self.set(key.trim(), value.trim())?;
        }
        Ok(())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        if key == "sweeps" {
            self.sweeps = value
                .parse::<usize>()
                .map_err(|_| format!("sweeps must be a non-negative integer, got `{value}`"))?;
            return Ok(());
        }

        let slot = match key {
            "quest_width" => &mut self.quest_width,
            "quest_height" => &mut self.quest_height,
            "rank_sep" => &mut self.rank_sep,
            "lane_node_sep" => &mut self.lane_node_sep,
            "lane_margin" => &mut self.lane_margin,
            "graph_node_sep" => &mut self.graph_node_sep,
            "graph_margin_x" => &mut self.graph_margin_x,
            "graph_margin_y" => &mut self.graph_margin_y,
            "trader_width" => &mut self.trader_width,
            "trader_height" => &mut self.trader_height,
            "base_lane_height" => &mut self.base_lane_height,
            "lane_padding" => &mut self.lane_padding,
            "lane_spacing" => &mut self.lane_spacing,
            "trader_gap" => &mut self.trader_gap,
            _ => return Err(format!("unknown layout key `{key}`")),
        };

        match value.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() && parsed >= 0.0 => {
                *slot = parsed;
                Ok(())
            }
            _ => Err(format!("{key} must be a non-negative number, got `{value}`")),
        }
    }

    pub fn lane_params(&self) -> LayeredParams {
        LayeredParams {
            node_width: self.quest_width,
            node_height: self.quest_height,
            node_sep: self.lane_node_sep,
            rank_sep: self.rank_sep,
            margin_x: self.lane_margin,
            margin_y: self.lane_margin,
            sweeps: self.sweeps,
        }
    }

    pub fn graph_params(&self) -> LayeredParams {
        LayeredParams {
            node_width: self.quest_width,
            node_height: self.quest_height,
            node_sep: self.graph_node_sep,
            rank_sep: self.rank_sep,
            margin_x: self.graph_margin_x,
            margin_y: self.graph_margin_y,
            sweeps: self.sweeps,
        }
    }

    /// Horizontal offset of lane content: left margin, trader header, then the gap.
    pub fn quest_x_offset(&self) -> f64 {
        self.graph_margin_x + self.trader_width + self.trader_gap
    }

    pub fn lane_height(&self, content_height: f64) -> f64 {
        self.base_lane_height.max(content_height + self.lane_padding)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}={value}"),
        }
    }
}

impl Error for ConfigError {}
