// src/bench/mod.rs
//
// Benchmark orchestration: the harness times and classifies one strategy
// across a sequence of moduli; the aggregator folds the results into a
// per-key-size report.

pub mod harness;
pub mod report;
pub mod results;

pub use harness::BenchmarkHarness;
pub use report::{BenchmarkReport, KeySizeSummary, ReportAggregator};
pub use results::AttackResult;
