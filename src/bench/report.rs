// src/bench/report.rs
//
// Folds an AttackResult sequence into per-key-size statistics. The
// rendered table is a deterministic function of the results, so it is
// suitable for golden-output comparison; only the timestamp varies.

use crate::bench::results::AttackResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeySizeSummary {
    pub key_bits: u32,
    pub total: usize,
    pub successes: usize,
    /// Percentage in [0, 100].
    pub success_rate: f64,
    pub mean_elapsed_seconds: f64,
    /// Mean of the strategies' reported step counts, over the results
    /// that carry one.
    pub mean_steps: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub timestamp: DateTime<Utc>,
    pub strategy: String,
    pub total: usize,
    pub successes: usize,
    pub success_rate: f64,
    pub by_key_size: Vec<KeySizeSummary>,
}

pub struct ReportAggregator;

impl ReportAggregator {
    pub fn aggregate(strategy: &str, results: &[AttackResult]) -> BenchmarkReport {
        let mut groups: BTreeMap<u32, Vec<&AttackResult>> = BTreeMap::new();
        for result in results {
            groups.entry(result.key_bits).or_default().push(result);
        }

        let by_key_size = groups
            .into_iter()
            .map(|(key_bits, group)| {
                let total = group.len();
                let successes = group.iter().filter(|r| r.success).count();
                let elapsed_sum: f64 = group.iter().map(|r| r.elapsed_seconds).sum();
                let steps: Vec<f64> = group
                    .iter()
                    .filter_map(|r| r.extra.get("steps").and_then(|v| v.as_f64()))
                    .collect();
                KeySizeSummary {
                    key_bits,
                    total,
                    successes,
                    success_rate: percentage(successes, total),
                    mean_elapsed_seconds: elapsed_sum / total as f64,
                    mean_steps: if steps.is_empty() {
                        0.0
                    } else {
                        steps.iter().sum::<f64>() / steps.len() as f64
                    },
                }
            })
            .collect();

        let successes = results.iter().filter(|r| r.success).count();
        BenchmarkReport {
            timestamp: Utc::now(),
            strategy: strategy.to_string(),
            total: results.len(),
            successes,
            success_rate: percentage(successes, results.len()),
            by_key_size,
        }
    }
}

fn percentage(successes: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        successes as f64 * 100.0 / total as f64
    }
}

impl BenchmarkReport {
    /// Fixed-width table over everything but the timestamp.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "strategy: {}", self.strategy);
        let _ = writeln!(
            out,
            "overall: {} / {} succeeded ({:.1}%)",
            self.successes, self.total, self.success_rate
        );
        let _ = writeln!(
            out,
            "{:>6} {:>7} {:>9} {:>7} {:>12} {:>12}",
            "bits", "total", "successes", "rate%", "mean_s", "mean_steps"
        );
        for row in &self.by_key_size {
            let _ = writeln!(
                out,
                "{:>6} {:>7} {:>9} {:>7.1} {:>12.6} {:>12.1}",
                row.key_bits,
                row.total,
                row.successes,
                row.success_rate,
                row.mean_elapsed_seconds,
                row.mean_steps
            );
        }
        out
    }

    pub fn save_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    pub fn load_from_file(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let report = serde_json::from_str(&json)?;
        Ok(report)
    }
}
