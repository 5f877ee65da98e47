//! primefinder CLI
//!
//! Command-line interface for benchmarking the trial-division strategies
//! and checking individual numbers against all of them.

use clap::{CommandFactory, Parser as ClapParser, Subcommand};
use clap_complete::{Shell, generate};
use primefinder::{FileConfig, ReportFormat, RunConfig, Strategy};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "primefinder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compare trial-division primality strategies", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count primes up to LIMIT with each strategy and time every pass
    Run {
        /// Upper bound of the counted range (defaults to 100000)
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        limit: Option<i64>,

        /// Only run these strategies (repeatable)
        #[arg(short, long = "strategy", value_name = "ID", value_parser = parse_strategy)]
        strategies: Vec<Strategy>,

        /// Report format: human or json
        #[arg(long, value_parser = parse_format)]
        format: Option<ReportFormat>,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to a TOML run configuration
        #[arg(long)]
        config: Option<PathBuf>,

        /// Check every count against a reference sieve (exit 1 on mismatch)
        #[arg(long)]
        verify: bool,
    },

    /// Show what every strategy says about the given numbers
    Check {
        /// Numbers to classify
        #[arg(required = true, allow_negative_numbers = true)]
        numbers: Vec<i64>,
    },

    /// List the available strategies
    List,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_strategy(s: &str) -> Result<Strategy, String> {
    s.parse()
}

fn parse_format(s: &str) -> Result<ReportFormat, String> {
    s.parse()
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            limit,
            strategies,
            format,
            output,
            config,
            verify,
        } => {
            run_benchmark(limit, &strategies, format, output, config, verify);
        }
        Commands::Check { numbers } => {
            run_check(&numbers);
        }
        Commands::List => {
            run_list();
        }
        Commands::Completions { shell } => {
            run_completions(shell);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "primefinder=debug" } else { "primefinder=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "primefinder", &mut io::stdout());
}

fn run_benchmark(
    limit: Option<i64>,
    strategies: &[Strategy],
    format: Option<ReportFormat>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    verify: bool,
) {
    let mut config = RunConfig::from_env();

    if let Some(path) = config_path {
        match FileConfig::load(&path) {
            Ok(file) => {
                debug!(path = %path.display(), "loaded config file");
                config.merge(file);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    }

    let mut config = config.with_strategies(strategies);
    if let Some(limit) = limit {
        config = config.with_limit(limit);
    }
    if let Some(format) = format {
        config = config.with_format(format);
    }
    if let Some(output) = output {
        config = config.with_output(output);
    }
    if verify {
        config = config.with_verify(true);
    }

    info!(
        limit = config.limit,
        strategies = config.strategies.len(),
        "running benchmark"
    );

    if let Err(e) = primefinder::run(&config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_check(numbers: &[i64]) {
    let mut disagreements = 0;

    for &n in numbers {
        let verdicts: Vec<(Strategy, bool)> =
            Strategy::ALL.iter().map(|&s| (s, s.check(n))).collect();
        let first = verdicts[0].1;
        let agree = verdicts.iter().all(|&(_, v)| v == first);

        println!("{}", n);
        for (strategy, is_prime) in &verdicts {
            let verdict = if *is_prime { "prime" } else { "not prime" };
            println!("  {:12} {}", strategy.id(), verdict);
        }
        if !agree {
            println!("  strategies DISAGREE");
            disagreements += 1;
        }
    }

    if disagreements > 0 {
        eprintln!("Error: strategies disagree on {} number(s)", disagreements);
        process::exit(1);
    }
}

fn run_list() {
    println!("{:12} {:8} NAME", "ID", "COST");
    for strategy in Strategy::ALL {
        println!(
            "{:12} {:8} {}",
            strategy.id(),
            strategy.complexity(),
            strategy.display_name()
        );
    }
}
