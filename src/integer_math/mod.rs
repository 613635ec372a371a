// src/integer_math/mod.rs

pub mod gcd;
pub mod legendre;
pub mod primes;
pub mod tonelli;
