// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Timing and repetition wrapper for benchmarking estimator calls.

use std::time::{Duration, Instant};
use tracing::info;

use crate::estimators::error::{MiError, Result};

/// Values and wall-clock durations of the timed runs of one estimator call.
#[derive(Debug, Clone)]
pub struct HarnessReport {
    pub label: String,
    pub values: Vec<f64>,
    pub durations: Vec<Duration>,
}

impl HarnessReport {
    pub fn mean_duration(&self) -> Duration {
        if self.durations.is_empty() {
            return Duration::ZERO;
        }
        self.durations.iter().sum::<Duration>() / self.durations.len() as u32
    }

    pub fn min_duration(&self) -> Duration {
        self.durations.iter().min().copied().unwrap_or(Duration::ZERO)
    }

    /// True when every run returned a bit-identical value.
    pub fn values_consistent(&self) -> bool {
        self.values
            .windows(2)
            .all(|w| w[0].to_bits() == w[1].to_bits())
    }
}

/// Runs an estimator closure repeatedly and records each result and its duration.
pub struct Harness {
    pub repetitions: usize,
    pub warmup: usize,
}

impl Harness {
    pub fn new(repetitions: usize) -> Self {
        Self {
            repetitions,
            warmup: 0,
        }
    }

    /// Untimed runs before measurement starts.
    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    pub fn run<F>(&self, label: &str, mut call: F) -> Result<HarnessReport>
    where
        F: FnMut() -> Result<f64>,
    {
        if self.repetitions == 0 {
            return Err(MiError::invalid("repetitions", 0, "at least one timed run is required"));
        }
        for _ in 0..self.warmup {
            call()?;
        }
        let mut values = Vec::with_capacity(self.repetitions);
        let mut durations = Vec::with_capacity(self.repetitions);
        for _ in 0..self.repetitions {
            let start = Instant::now();
            let value = call()?;
            durations.push(start.elapsed());
            values.push(value);
        }
        let report = HarnessReport {
            label: label.to_owned(),
            values,
            durations,
        };
        info!(
            label,
            runs = self.repetitions,
            mean_us = report.mean_duration().as_micros() as u64,
            min_us = report.min_duration().as_micros() as u64,
            consistent = report.values_consistent(),
            "harness finished"
        );
        Ok(report)
    }
}
