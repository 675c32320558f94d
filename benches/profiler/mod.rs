// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Questlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Questlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

/// Criterion knobs, overridable through `QUESTLANE_BENCH_*` variables.
struct BenchSettings {
    profile_frequency: i32,
    sample_size: usize,
    warm_up: Duration,
    measurement: Duration,
}

fn env_or<T: FromStr + Ord>(suffix: &str, default: T, min: T, max: T) -> T {
    std::env::var(format!("QUESTLANE_BENCH_{suffix}"))
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
        .clamp(min, max)
}

impl BenchSettings {
    fn from_env() -> Self {
        Self {
            profile_frequency: env_or("PROFILE_FREQ", 100, 1, 1000),
            sample_size: env_or("SAMPLE_SIZE", 40, 10, 200),
            warm_up: Duration::from_secs(env_or("WARMUP_SECS", 2, 1, 60)),
            measurement: Duration::from_secs(env_or("MEASUREMENT_SECS", 4, 1, 120)),
        }
    }
}

pub fn criterion() -> Criterion {
    let settings = BenchSettings::from_env();

    Criterion::default()
        .sample_size(settings.sample_size)
        .warm_up_time(settings.warm_up)
        .measurement_time(settings.measurement)
        .with_profiler(PProfProfiler::new(settings.profile_frequency, Output::Flamegraph(None)))
}
