//! Benchmark runner
//!
//! Counts the primes in `[1, limit]` once per strategy and times each pass.
//! Passes run sequentially in [`Strategy::ALL`] order; each result is handed
//! to the caller as soon as its pass finishes so reports appear while later
//! (slower) strategies are still running.

use crate::primality::reference_prime_count;
use crate::report::{ReportConfig, Reporter};
use crate::strategy::{self, Strategy};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Outcome of one strategy pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkResult {
    pub strategy: Strategy,
    /// Upper bound of the counted range
    pub limit: i64,
    pub elapsed: Duration,
    pub prime_count: u64,
}

impl BenchmarkResult {
    /// Elapsed time in whole nanoseconds, saturating at `u64::MAX`
    pub fn elapsed_nanos(&self) -> u64 {
        u64::try_from(self.elapsed.as_nanos()).unwrap_or(u64::MAX)
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Count the values in `[1, limit]` that `strategy` reports as prime
///
/// A limit below 1 is an empty range and yields 0.
pub fn count_primes(strategy: Strategy, limit: i64) -> u64 {
    let mut count = 0;
    for i in 1..=limit {
        if strategy.check(i) {
            count += 1;
        }
    }
    count
}

/// Runs the selected strategies over `[1, limit]`
#[derive(Debug, Clone)]
pub struct BenchmarkRunner {
    limit: i64,
    strategies: Vec<Strategy>,
}

impl BenchmarkRunner {
    /// Runner for every strategy
    pub fn new(limit: i64) -> Self {
        BenchmarkRunner {
            limit,
            strategies: Strategy::ALL.to_vec(),
        }
    }

    /// Restrict to a subset (kept in benchmark order, empty means all)
    pub fn with_strategies(mut self, strategies: &[Strategy]) -> Self {
        self.strategies = strategy::normalize(strategies);
        self
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Time a single pass
    pub fn run_one(&self, strategy: Strategy) -> BenchmarkResult {
        debug!(strategy = strategy.id(), limit = self.limit, "starting pass");
        let start = Instant::now();
        let prime_count = count_primes(strategy, self.limit);
        let elapsed = start.elapsed();
        debug!(
            strategy = strategy.id(),
            prime_count,
            elapsed_ns = elapsed.as_nanos() as u64,
            "finished pass"
        );

        BenchmarkResult {
            strategy,
            limit: self.limit,
            elapsed,
            prime_count,
        }
    }

    /// Run every pass, calling `on_result` after each one
    ///
    /// Stops at the first error returned by `on_result`.
    pub fn run_with<F>(&self, mut on_result: F) -> Result<Vec<BenchmarkResult>, String>
    where
        F: FnMut(&BenchmarkResult) -> Result<(), String>,
    {
        let start = Instant::now();
        let mut results = Vec::with_capacity(self.strategies.len());
        for &strategy in &self.strategies {
            let result = self.run_one(strategy);
            on_result(&result)?;
            results.push(result);
        }
        info!(
            limit = self.limit,
            passes = results.len(),
            total_ms = start.elapsed().as_millis() as u64,
            "benchmark complete"
        );
        Ok(results)
    }

    /// Run every pass without reporting
    pub fn run(&self) -> Vec<BenchmarkResult> {
        self.strategies.iter().map(|&s| self.run_one(s)).collect()
    }

    /// Run every pass, writing each result to the configured report
    pub fn run_and_report(&self, config: &ReportConfig) -> Result<Vec<BenchmarkResult>, String> {
        let mut reporter = Reporter::open(config, self.limit)?;
        let results = self.run_with(|result| reporter.emit(result))?;
        reporter.finish()?;
        Ok(results)
    }
}

/// Benchmark all five strategies up to `n` and print the report to stdout
pub fn run_timer_test(n: i64) -> Result<Vec<BenchmarkResult>, String> {
    BenchmarkRunner::new(n).run_and_report(&ReportConfig::default())
}

/// Check every result's count against the reference sieve
///
/// Limits below 1 expect a count of 0.
pub fn verify(results: &[BenchmarkResult]) -> Result<(), String> {
    let mut mismatches = Vec::new();
    let mut expected_by_limit: Vec<(i64, u64)> = Vec::new();

    for result in results {
        let expected = match expected_by_limit.iter().find(|(l, _)| *l == result.limit) {
            Some(&(_, count)) => count,
            None => {
                let count = reference_prime_count(result.limit)?;
                expected_by_limit.push((result.limit, count));
                count
            }
        };

        if result.prime_count != expected {
            mismatches.push(format!(
                "{}: expected {} primes up to {}, found {}",
                result.strategy.id(),
                expected,
                result.limit,
                result.prime_count
            ));
        } else {
            debug!(strategy = result.strategy.id(), expected, "count verified");
        }
    }

    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(format!("Verification failed:\n  {}", mismatches.join("\n  ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportFormat;

    fn counts(limit: i64) -> Vec<(Strategy, u64)> {
        BenchmarkRunner::new(limit)
            .run()
            .into_iter()
            .map(|r| (r.strategy, r.prime_count))
            .collect()
    }

    #[test]
    fn test_count_up_to_ten() {
        for (strategy, count) in counts(10) {
            assert_eq!(count, 4, "{} miscounted", strategy);
        }
    }

    #[test]
    fn test_count_up_to_one() {
        for (strategy, count) in counts(1) {
            assert_eq!(count, 0, "{} miscounted", strategy);
        }
    }

    #[test]
    fn test_count_up_to_twenty() {
        for (strategy, count) in counts(20) {
            assert_eq!(count, 8, "{} miscounted", strategy);
        }
    }

    #[test]
    fn test_degenerate_limits() {
        for limit in [0, -1, -100] {
            for (strategy, count) in counts(limit) {
                assert_eq!(count, 0, "{} miscounted for {}", strategy, limit);
            }
        }
    }

    #[test]
    fn test_fixed_order() {
        let order: Vec<Strategy> = counts(5).into_iter().map(|(s, _)| s).collect();
        assert_eq!(order, Strategy::ALL.to_vec());
    }

    #[test]
    fn test_subset_keeps_benchmark_order() {
        let runner = BenchmarkRunner::new(30).with_strategies(&[Strategy::SixK, Strategy::Halved]);
        let results = runner.run();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].strategy, Strategy::Halved);
        assert_eq!(results[1].strategy, Strategy::SixK);
        assert!(results.iter().all(|r| r.prime_count == 10 && r.limit == 30));
    }

    #[test]
    fn test_run_with_callback_sees_every_pass() {
        let mut seen = Vec::new();
        let results = BenchmarkRunner::new(10)
            .run_with(|r| {
                seen.push(r.strategy);
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, Strategy::ALL.to_vec());
        assert_eq!(results.len(), 5);
    }

    #[test]
    fn test_run_with_stops_on_error() {
        let mut calls = 0;
        let err = BenchmarkRunner::new(10)
            .run_with(|_| {
                calls += 1;
                Err("sink closed".to_string())
            })
            .unwrap_err();
        assert_eq!(err, "sink closed");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_elapsed_conversions() {
        let result = BenchmarkResult {
            strategy: Strategy::Basic,
            limit: 1,
            elapsed: Duration::from_millis(1500),
            prime_count: 0,
        };
        assert_eq!(result.elapsed_nanos(), 1_500_000_000);
        assert!((result.elapsed_secs() - 1.5).abs() < f64::EPSILON);

        let huge = BenchmarkResult {
            elapsed: Duration::MAX,
            ..result
        };
        assert_eq!(huge.elapsed_nanos(), u64::MAX);
    }

    #[test]
    fn test_verify_accepts_correct_counts() {
        let results = BenchmarkRunner::new(1000).run();
        assert!(verify(&results).is_ok());
    }

    #[test]
    fn test_verify_reports_mismatch() {
        let mut results = BenchmarkRunner::new(20).run();
        results[2].prime_count = 7;
        let err = verify(&results).unwrap_err();
        assert!(err.contains("incremented: expected 8 primes up to 20, found 7"));
        assert!(!err.contains("basic:"));
    }

    #[test]
    fn test_run_and_report_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let config = ReportConfig::default()
            .with_format(ReportFormat::Human)
            .with_destination(crate::report::ReportDestination::File(path.clone()));

        let results = BenchmarkRunner::new(20).run_and_report(&config).unwrap();
        assert_eq!(results.len(), 5);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("Primes found: 8").count(), 5);
    }
}
