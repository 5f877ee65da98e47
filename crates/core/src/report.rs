//! Benchmark reports
//!
//! Results can be rendered two ways, selected by `--format`, the config file
//! or the `PRIMEFINDER_REPORT` env var:
//! - `human` → one text block per strategy, written as soon as the pass ends
//! - `json` → a single JSON document written once every pass has finished
//! - `json:/path` → JSON to a file instead of stdout
//!
//! ## Feature Flag
//!
//! JSON output requires the `report-json` feature (enabled by default).
//! Without it, JSON requests fall back to the human format.

use crate::runner::BenchmarkResult;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Line printed between successive human-readable blocks
pub const DELIMITER: &str = "=====================================================";

/// Environment variable consulted by [`ReportConfig::from_env`]
pub const REPORT_ENV_VAR: &str = "PRIMEFINDER_REPORT";

// =============================================================================
// Report Configuration
// =============================================================================

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Human,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(ReportFormat::Human),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!(
                "Unknown report format '{}'. Expected 'human' or 'json'",
                other
            )),
        }
    }
}

/// Output destination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReportDestination {
    #[default]
    Stdout,
    File(PathBuf),
}

/// Where and how the report is written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportConfig {
    pub format: ReportFormat,
    pub destination: ReportDestination,
}

impl ReportConfig {
    /// Parse a `PRIMEFINDER_REPORT` value
    ///
    /// Returns `None` for empty or unrecognised values.
    pub fn parse(val: &str) -> Option<Self> {
        match val {
            "" => None,
            "human" | "1" => Some(ReportConfig {
                format: ReportFormat::Human,
                destination: ReportDestination::Stdout,
            }),
            "json" => Some(ReportConfig {
                format: ReportFormat::Json,
                destination: ReportDestination::Stdout,
            }),
            s if s.starts_with("json:") && s.len() > 5 => Some(ReportConfig {
                format: ReportFormat::Json,
                destination: ReportDestination::File(PathBuf::from(&s[5..])),
            }),
            _ => {
                tracing::warn!("{}='{}' not recognized, ignoring", REPORT_ENV_VAR, val);
                None
            }
        }
    }

    /// Read from the `PRIMEFINDER_REPORT` environment variable
    pub fn from_env() -> Option<Self> {
        let val = std::env::var(REPORT_ENV_VAR).ok()?;
        Self::parse(&val)
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_destination(mut self, destination: ReportDestination) -> Self {
        self.destination = destination;
        self
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Render one strategy pass as a human-readable block
pub fn format_human(result: &BenchmarkResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Total primes in first {} numbers using {}\n",
        result.limit,
        result.strategy.display_name()
    ));
    out.push_str(&format!("Time taken  : {} ns\n", result.elapsed_nanos()));
    out.push_str(&format!("Time taken  : {:.6} s\n", result.elapsed_secs()));
    out.push_str(&format!("Primes found: {}\n", result.prime_count));
    out
}

#[cfg(feature = "report-json")]
#[derive(serde::Serialize)]
struct JsonResult<'a> {
    strategy: &'a str,
    name: &'a str,
    elapsed_ns: u64,
    elapsed_secs: f64,
    prime_count: u64,
}

#[cfg(feature = "report-json")]
#[derive(serde::Serialize)]
struct JsonReport<'a> {
    limit: i64,
    results: Vec<JsonResult<'a>>,
}

/// Render a full run as a JSON document
#[cfg(feature = "report-json")]
pub fn format_json(limit: i64, results: &[BenchmarkResult]) -> Result<String, String> {
    let report = JsonReport {
        limit,
        results: results
            .iter()
            .map(|r| JsonResult {
                strategy: r.strategy.id(),
                name: r.strategy.display_name(),
                elapsed_ns: r.elapsed_nanos(),
                elapsed_secs: r.elapsed_secs(),
                prime_count: r.prime_count,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report).map_err(|e| format!("Failed to encode report: {}", e))
}

#[cfg(not(feature = "report-json"))]
pub fn format_json(_limit: i64, results: &[BenchmarkResult]) -> Result<String, String> {
    tracing::warn!("JSON reports require the 'report-json' feature. Falling back to human format.");
    let blocks: Vec<String> = results.iter().map(format_human).collect();
    Ok(blocks.join(format!("\n{}\n\n", DELIMITER).as_str()))
}

// =============================================================================
// Sink
// =============================================================================

/// Writes results to the configured destination as the runner produces them
pub struct Reporter<W: Write> {
    format: ReportFormat,
    writer: W,
    limit: i64,
    pending: Vec<BenchmarkResult>,
    emitted: usize,
}

impl Reporter<Box<dyn Write>> {
    /// Open the destination named by `config`
    pub fn open(config: &ReportConfig, limit: i64) -> Result<Self, String> {
        let writer: Box<dyn Write> = match &config.destination {
            ReportDestination::Stdout => Box::new(io::stdout()),
            ReportDestination::File(path) => {
                let file = File::create(path).map_err(|e| {
                    format!("Failed to create report file {}: {}", path.display(), e)
                })?;
                Box::new(BufWriter::new(file))
            }
        };
        Ok(Reporter::new(config.format, writer, limit))
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(format: ReportFormat, writer: W, limit: i64) -> Self {
        Reporter {
            format,
            writer,
            limit,
            pending: Vec::new(),
            emitted: 0,
        }
    }

    /// Accept one finished pass
    ///
    /// Human blocks are written immediately, preceded by [`DELIMITER`] for
    /// every block after the first. JSON results are held until [`finish`].
    ///
    /// [`finish`]: Reporter::finish
    pub fn emit(&mut self, result: &BenchmarkResult) -> Result<(), String> {
        match self.format {
            ReportFormat::Human => {
                if self.emitted > 0 {
                    write!(self.writer, "\n{}\n\n", DELIMITER).map_err(write_error)?;
                }
                self.writer
                    .write_all(format_human(result).as_bytes())
                    .map_err(write_error)?;
                self.writer.flush().map_err(write_error)?;
            }
            ReportFormat::Json => self.pending.push(result.clone()),
        }
        self.emitted += 1;
        Ok(())
    }

    /// Flush anything still buffered and hand back the writer
    pub fn finish(mut self) -> Result<W, String> {
        if self.format == ReportFormat::Json {
            let json = format_json(self.limit, &self.pending)?;
            writeln!(self.writer, "{}", json).map_err(write_error)?;
        }
        self.writer.flush().map_err(write_error)?;
        Ok(self.writer)
    }
}

fn write_error(e: io::Error) -> String {
    format!("Failed to write report: {}", e)
}
