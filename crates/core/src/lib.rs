//! primefinder: trial-division primality strategies and a timing harness
//!
//! Five variants of the same primality test, each a single loop with a
//! tighter bound than the last, plus a runner that counts primes below a
//! limit with each one and reports how long it took.
//!
//! # Modules
//!
//! - `primality`: the five checks and a reference sieve
//! - `strategy`: `Strategy` enum naming each check
//! - `runner`: `BenchmarkRunner`, `BenchmarkResult`, count verification
//! - `report`: human and JSON rendering, report destinations
//! - `config`: TOML config file and layered run settings
//!
//! ```rust,ignore
//! use primefinder::{BenchmarkRunner, ReportConfig};
//!
//! let results = BenchmarkRunner::new(10_000).run_and_report(&ReportConfig::default())?;
//! primefinder::verify(&results)?;
//! ```

pub mod config;
pub mod primality;
pub mod report;
pub mod runner;
pub mod strategy;

pub use config::{DEFAULT_LIMIT, FileConfig, RunConfig};
pub use primality::{
    MAX_CANDIDATE, MAX_SIEVE_LIMIT, is_prime_basic, is_prime_halved, is_prime_incremented,
    is_prime_six_k, is_prime_sqrt, reference_prime_count, sieve,
};
pub use report::{ReportConfig, ReportDestination, ReportFormat, Reporter};
pub use runner::{BenchmarkResult, BenchmarkRunner, count_primes, run_timer_test, verify};
pub use strategy::Strategy;

/// Run a fully resolved configuration: benchmark, report, optionally verify
pub fn run(config: &RunConfig) -> Result<Vec<BenchmarkResult>, String> {
    config.validate()?;
    let results = BenchmarkRunner::new(config.limit)
        .with_strategies(&config.strategies)
        .run_and_report(&config.report)?;
    if config.verify {
        verify(&results)?;
        tracing::info!(limit = config.limit, "all counts match the reference sieve");
    }
    Ok(results)
}
