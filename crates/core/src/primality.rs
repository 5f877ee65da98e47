//! Trial-division primality checks
//!
//! Five variants of the same test, differing only in which divisors they try
//! and where the loop stops. Every check takes an `i64` and returns `true`
//! iff the value is prime; anything `<= 1` (zero and negatives included) is
//! not prime.
//!
//! The square-root bound is written as `i <= n / i` rather than `i * i <= n`.
//! For positive integers the two are equivalent, and the division form cannot
//! overflow, so every check accepts candidates up to `i64::MAX`.
//!
//! A Sieve of Eratosthenes is provided as an independent reference for
//! verifying benchmark counts.

/// Largest candidate any check accepts.
pub const MAX_CANDIDATE: i64 = i64::MAX;

/// Largest limit [`sieve`] and [`reference_prime_count`] will allocate for.
pub const MAX_SIEVE_LIMIT: i64 = 100_000_000;

/// Divide by every integer in `[2, n - 1]`. O(n)
pub fn is_prime_basic(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    for i in 2..n {
        if n % i == 0 {
            return false;
        }
    }
    true
}

/// Divide by every integer in `[2, n / 2]`. O(n)
///
/// Nothing greater than `n / 2` can divide `n` evenly. For `n = 2` and
/// `n = 3` the range is empty and the value is accepted.
pub fn is_prime_halved(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    for i in 2..=n / 2 {
        if n % i == 0 {
            return false;
        }
    }
    true
}

/// Reject evens up front, then divide by odd integers in `[3, n / 2)`. O(n)
///
/// The upper bound is exclusive, unlike [`is_prime_halved`].
pub fn is_prime_incremented(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    for i in (3..n / 2).step_by(2) {
        if n % i == 0 {
            return false;
        }
    }
    true
}

/// Reject evens up front, then divide by odd `i` while `i * i <= n`. O(√n)
///
/// Any composite has a divisor no larger than its square root.
pub fn is_prime_sqrt(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut i = 3;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Reject multiples of 2 and 3, then try only `6k - 1` and `6k + 1`. O(√n)
///
/// Every prime above 3 has one of those two forms, so two thirds of the odd
/// divisors tried by [`is_prime_sqrt`] are skipped.
pub fn is_prime_six_k(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5;
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Sieve of Eratosthenes over `[0, limit]`.
///
/// Index `k` of the returned vector is `true` iff `k` is prime. A negative
/// limit yields an empty vector.
pub fn sieve(limit: i64) -> Result<Vec<bool>, String> {
    if limit > MAX_SIEVE_LIMIT {
        return Err(format!(
            "Sieve limit {} exceeds maximum of {}",
            limit, MAX_SIEVE_LIMIT
        ));
    }
    if limit < 0 {
        return Ok(Vec::new());
    }

    let size = limit as usize + 1;
    let mut is_prime = vec![true; size];
    is_prime[0] = false;
    if size > 1 {
        is_prime[1] = false;
    }

    let mut p = 2;
    while p * p < size {
        if is_prime[p] {
            for multiple in (p * p..size).step_by(p) {
                is_prime[multiple] = false;
            }
        }
        p += 1;
    }

    Ok(is_prime)
}

/// Number of primes in `[1, limit]`, computed with [`sieve`].
pub fn reference_prime_count(limit: i64) -> Result<u64, String> {
    let table = sieve(limit)?;
    Ok(table.iter().filter(|&&p| p).count() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKS: [(&str, fn(i64) -> bool); 5] = [
        ("basic", is_prime_basic),
        ("halved", is_prime_halved),
        ("incremented", is_prime_incremented),
        ("sqrt", is_prime_sqrt),
        ("six-k", is_prime_six_k),
    ];

    /// Brute force with no shortcuts at all
    fn oracle(n: i64) -> bool {
        n >= 2 && (2..n).all(|d| n % d != 0)
    }

    #[test]
    fn test_all_checks_agree_with_oracle() {
        for n in -5..=50 {
            for (name, check) in CHECKS {
                assert_eq!(check(n), oracle(n), "{} disagrees on {}", name, n);
            }
        }
    }

    #[test]
    fn test_non_positive_and_one_are_not_prime() {
        for n in [i64::MIN, -100, -5, -1, 0, 1] {
            for (name, check) in CHECKS {
                assert!(!check(n), "{} accepted {}", name, n);
            }
        }
    }

    #[test]
    fn test_small_boundaries() {
        for (name, check) in CHECKS {
            assert!(check(2), "{} rejected 2", name);
            assert!(check(3), "{} rejected 3", name);
            for composite in [4, 6, 8, 9] {
                assert!(!check(composite), "{} accepted {}", name, composite);
            }
            for prime in [7, 11, 13] {
                assert!(check(prime), "{} rejected {}", name, prime);
            }
        }
    }

    #[test]
    fn test_odd_squares_rejected() {
        // The square-root bound must be inclusive
        for (name, check) in CHECKS {
            for square in [9, 25, 49, 121, 169, 289, 361, 529] {
                assert!(!check(square), "{} accepted {}", name, square);
            }
        }
    }

    #[test]
    fn test_large_prime_with_sqrt_bounded_checks() {
        assert!(is_prime_sqrt(1_000_000_007));
        assert!(is_prime_six_k(1_000_000_007));
        assert!(!is_prime_sqrt(1_000_000_007 * 3));
        assert!(!is_prime_six_k(1_000_000_011 * 7));
    }

    #[test]
    fn test_max_candidate_does_not_overflow() {
        // 2^63 - 1 = 7^2 * 73 * 127 * 337 * 92737 * 649657
        assert!(!is_prime_sqrt(MAX_CANDIDATE));
        assert!(!is_prime_six_k(MAX_CANDIDATE));
    }

    #[test]
    fn test_sieve_small() {
        let table = sieve(20).unwrap();
        let primes: Vec<usize> = table
            .iter()
            .enumerate()
            .filter(|(_, p)| **p)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19]);
    }

    #[test]
    fn test_sieve_degenerate_limits() {
        assert!(sieve(-3).unwrap().is_empty());
        assert_eq!(sieve(0).unwrap(), vec![false]);
        assert_eq!(sieve(1).unwrap(), vec![false, false]);
    }

    #[test]
    fn test_sieve_rejects_oversized_limit() {
        let err = sieve(MAX_SIEVE_LIMIT + 1).unwrap_err();
        assert!(err.contains("exceeds maximum"));
    }

    #[test]
    fn test_reference_prime_count() {
        assert_eq!(reference_prime_count(1).unwrap(), 0);
        assert_eq!(reference_prime_count(10).unwrap(), 4);
        assert_eq!(reference_prime_count(1000).unwrap(), 168);
        assert_eq!(reference_prime_count(100_000).unwrap(), 9592);
    }
}
