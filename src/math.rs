use std::fmt;

use num_integer::{Integer, Roots};
use num_traits::CheckedAdd;

/// Numeric capabilities a Fibonacci value needs to flow through the search.
///
/// Implemented for every type that can be added with overflow detection,
/// divided with remainder and square-rooted, which covers both `u64` and
/// `BigUint`.
pub trait FibValue: Integer + Roots + CheckedAdd + Clone + fmt::Display + fmt::Debug {}

impl<T> FibValue for T where T: Integer + Roots + CheckedAdd + Clone + fmt::Display + fmt::Debug {}

/// Trial-division primality test.
///
/// Candidate divisors run from 2 up to and including `isqrt(num)`: any
/// factorisation `num = a * b` with `a <= b` has `a <= sqrt(num)`, so nothing
/// above the bound needs checking.
///
/// Values `<= 1` (zero, one and negatives) are never prime.
///
/// # Example
/// ```
/// use prime_fibonacci::math::is_prime;
/// assert!(is_prime(&89u64));
/// assert!(!is_prime(&91u64));
/// assert!(!is_prime(&-7i64));
/// ```
pub fn is_prime<T>(num: &T) -> bool
where
    T: Integer + Roots + Clone,
{
    // Roots::sqrt panics on negatives, and nothing <= 1 is prime anyway
    if *num <= T::one() {
        return false;
    }

    let limit = num.sqrt();
    let mut divisor = T::one() + T::one();
    while divisor <= limit {
        if num.is_multiple_of(&divisor) {
            return false;
        }
        divisor = divisor + T::one();
    }

    true
}
