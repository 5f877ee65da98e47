//! Strategy catalogue
//!
//! Names each primality check so the runner, the report and the CLI can
//! refer to it without juggling function pointers.

use crate::primality;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five trial-division variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Every divisor in `[2, n - 1]`
    Basic,
    /// Every divisor in `[2, n / 2]`
    Halved,
    /// Odd divisors in `[3, n / 2)`
    Incremented,
    /// Odd divisors up to `√n`
    #[serde(rename = "sqrt", alias = "sqrt-bounded")]
    SqrtBounded,
    /// `6k ± 1` divisors up to `√n`
    #[serde(alias = "6k")]
    SixK,
}

impl Strategy {
    /// All strategies, in benchmark order
    pub const ALL: [Strategy; 5] = [
        Strategy::Basic,
        Strategy::Halved,
        Strategy::Incremented,
        Strategy::SqrtBounded,
        Strategy::SixK,
    ];

    /// Stable identifier used on the command line, in config files and in JSON
    pub fn id(&self) -> &'static str {
        match self {
            Strategy::Basic => "basic",
            Strategy::Halved => "halved",
            Strategy::Incremented => "incremented",
            Strategy::SqrtBounded => "sqrt",
            Strategy::SixK => "six-k",
        }
    }

    /// Human-readable name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Strategy::Basic => "basic trial division",
            Strategy::Halved => "half-bound trial division",
            Strategy::Incremented => "odd-increment trial division",
            Strategy::SqrtBounded => "square-root-bound trial division",
            Strategy::SixK => "6k±1 trial division",
        }
    }

    /// Asymptotic cost of a single check
    pub fn complexity(&self) -> &'static str {
        match self {
            Strategy::Basic | Strategy::Halved | Strategy::Incremented => "O(n)",
            Strategy::SqrtBounded | Strategy::SixK => "O(√n)",
        }
    }

    /// Run this strategy's primality check on `n`
    #[inline]
    pub fn check(&self, n: i64) -> bool {
        match self {
            Strategy::Basic => primality::is_prime_basic(n),
            Strategy::Halved => primality::is_prime_halved(n),
            Strategy::Incremented => primality::is_prime_incremented(n),
            Strategy::SqrtBounded => primality::is_prime_sqrt(n),
            Strategy::SixK => primality::is_prime_six_k(n),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Strategy::Basic),
            "halved" => Ok(Strategy::Halved),
            "incremented" => Ok(Strategy::Incremented),
            "sqrt" | "sqrt-bounded" => Ok(Strategy::SqrtBounded),
            "six-k" | "6k" => Ok(Strategy::SixK),
            other => {
                let known: Vec<&str> = Strategy::ALL.iter().map(|s| s.id()).collect();
                Err(format!(
                    "Unknown strategy '{}'. Expected one of: {}",
                    other,
                    known.join(", ")
                ))
            }
        }
    }
}

/// Put `strategies` in benchmark order and drop duplicates
///
/// An empty selection means every strategy.
pub fn normalize(strategies: &[Strategy]) -> Vec<Strategy> {
    if strategies.is_empty() {
        return Strategy::ALL.to_vec();
    }
    let mut selected = strategies.to_vec();
    selected.sort();
    selected.dedup();
    selected
}
