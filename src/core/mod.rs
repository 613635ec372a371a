// src/core/mod.rs

pub mod control_signal;
pub mod rng;

pub use control_signal::ControlSignal;
pub use rng::BenchRng;
