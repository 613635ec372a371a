// src/lib.rs

pub mod attack;
pub mod bench;
pub mod config;
pub mod core;
pub mod integer_math;
pub mod keygen;
pub mod qs;
