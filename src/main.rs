// src/main.rs

use env_logger::Env;
use factorbench::attack::{strategy_by_name, STRATEGY_NAMES};
use factorbench::bench::{BenchmarkHarness, ReportAggregator};
use factorbench::config::BenchConfig;
use factorbench::core::BenchRng;
use factorbench::keygen::{Modulus, RsaKeyGen};
use log::{error, info};
use std::process;

struct CliArgs {
    config_path: Option<String>,
    strategy: Option<String>,
    bits: Option<Vec<u32>>,
    seed: Option<u64>,
    out: Option<String>,
}

fn parse_args() -> Result<CliArgs, String> {
    let mut parsed = CliArgs {
        config_path: None,
        strategy: None,
        bits: None,
        seed: None,
        out: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(flag) = args.next() {
        let mut value = |name: &str| {
            args.next().ok_or_else(|| format!("{} expects a value", name))
        };
        match flag.as_str() {
            "--config" => parsed.config_path = Some(value("--config")?),
            "--strategy" => parsed.strategy = Some(value("--strategy")?),
            "--seed" => {
                let raw = value("--seed")?;
                parsed.seed = Some(
                    raw.parse()
                        .map_err(|_| format!("invalid seed: {}", raw))?,
                );
            }
            "--bits" => {
                let raw = value("--bits")?;
                let sizes: Result<Vec<u32>, _> =
                    raw.split(',').map(|s| s.trim().parse::<u32>()).collect();
                parsed.bits =
                    Some(sizes.map_err(|_| format!("invalid bit list: {}", raw))?);
            }
            "--out" => parsed.out = Some(value("--out")?),
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => return Err(format!("unknown flag: {}", other)),
        }
    }
    Ok(parsed)
}

fn print_usage() {
    println!("factorbench - RSA factorization attack benchmark");
    println!();
    println!("Options:");
    println!("  --config <path>     configuration file (default: factorbench.toml)");
    println!("  --strategy <name>   one of: {}", STRATEGY_NAMES.join(", "));
    println!("  --bits <list>       comma-separated key sizes, e.g. 16,24,32");
    println!("  --seed <n>          RNG seed for a reproducible run");
    println!("  --out <path>        write the aggregated report as JSON");
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("error: {}", message);
            print_usage();
            process::exit(2);
        }
    };

    let config = match args.config_path.as_deref() {
        Some(path) => BenchConfig::load_from_file(path),
        None => BenchConfig::load(),
    };
    let mut config = match config {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: failed to load configuration: {}", err);
            process::exit(2);
        }
    };

    // CLI flags win over file and environment
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if let Some(bits) = args.bits {
        config.key_sizes_bits = bits;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Err(message) = config.validate() {
        eprintln!("error: {}", message);
        process::exit(2);
    }

    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level.as_str())).init();

    let strategy = match strategy_by_name(&config.strategy, &config) {
        Some(strategy) => strategy,
        None => {
            eprintln!(
                "error: unknown strategy '{}'; available: {}",
                config.strategy,
                STRATEGY_NAMES.join(", ")
            );
            process::exit(2);
        }
    };

    let mut rng = match config.seed {
        Some(seed) => BenchRng::seeded(seed),
        None => BenchRng::from_entropy(),
    };

    let keygen = RsaKeyGen::new(config.e);
    let moduli: Vec<Modulus> = config
        .key_sizes_bits
        .iter()
        .map(|&bits| keygen.generate(bits, &mut rng).modulus())
        .collect();
    info!(
        "benchmarking {} against {} moduli",
        strategy.name(),
        moduli.len()
    );

    let harness = BenchmarkHarness::new();
    {
        let control = harness.control().clone();
        if let Err(err) = ctrlc::set_handler(move || {
            control.raise();
        }) {
            error!("could not install interrupt handler: {}", err);
        }
    }

    let results = harness.run(strategy.as_ref(), &moduli, &mut rng);
    let report = ReportAggregator::aggregate(strategy.name(), &results);
    println!("{}", report.render());

    if let Some(path) = args.out {
        match report.save_to_file(&path) {
            Ok(()) => println!("report written to {}", path),
            Err(err) => {
                eprintln!("error: could not write report to {}: {}", path, err);
                process::exit(1);
            }
        }
    }
}
