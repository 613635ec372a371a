// src/config/bench_config.rs
//
// Layered configuration: coded defaults, then an optional TOML file,
// then FACTORBENCH__* environment variables, each layer overriding the
// previous one.

use crate::attack::fermat::FermatConfig;
use crate::attack::pollard_pm1::PollardPm1Config;
use crate::attack::pollard_rho::PollardRhoConfig;
use crate::attack::trial_division::TrialDivisionConfig;
use crate::keygen::MIN_KEY_BITS;
use crate::qs::QsConfig;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Key sizes to benchmark, in bits.
    pub key_sizes_bits: Vec<u32>,
    /// Base public exponent for key synthesis.
    pub e: u64,
    /// RNG seed; entropy-seeded when unset.
    pub seed: Option<u64>,
    pub strategy: String,
    pub log_level: String,
    pub trial_division: TrialDivisionConfig,
    pub fermat: FermatConfig,
    pub pollard_rho: PollardRhoConfig,
    pub pollard_pm1: PollardPm1Config,
    pub qs: QsConfig,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            key_sizes_bits: vec![16, 20, 24, 28, 32],
            e: 65537,
            seed: None,
            strategy: "trial_division".to_string(),
            log_level: "info".to_string(),
            trial_division: TrialDivisionConfig::default(),
            fermat: FermatConfig::default(),
            pollard_rho: PollardRhoConfig::default(),
            pollard_pm1: PollardPm1Config::default(),
            qs: QsConfig::default(),
        }
    }
}

impl BenchConfig {
    /// Defaults, `factorbench.toml` in the working directory when present,
    /// then the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_file("factorbench")
    }

    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Config::try_from(&BenchConfig::default())?)
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("FACTORBENCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Reject settings that key synthesis cannot honor. Called after CLI
    /// overrides so bad `--bits` values surface as errors, not panics.
    pub fn validate(&self) -> Result<(), String> {
        if self.key_sizes_bits.is_empty() {
            return Err("key_sizes_bits must not be empty".to_string());
        }
        for &bits in &self.key_sizes_bits {
            if bits < MIN_KEY_BITS {
                return Err(format!(
                    "key size {} is below the minimum of {} bits",
                    bits, MIN_KEY_BITS
                ));
            }
        }
        Ok(())
    }
}
