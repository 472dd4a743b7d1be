//! # Prime Fibonacci Search Library
//!
//! This library finds, for a given threshold, the next Fibonacci number that is strictly greater
//! than the threshold and is also prime. Values can be computed on fixed-width `u64` (with
//! overflow detection) or on arbitrary-precision `BigUint`.
//!
//! The sequence used throughout starts `1, 1, 2, 3, 5, 8, ...`, i.e. `F(0) = F(1) = 1`.
//!
//! ## Key Features
//! - **Memoized Recursion**: Fibonacci values are computed recursively through a cache shared by
//!   mutable reference, so each index is computed at most once per search.
//! - **Trial Division**: Primality is decided by checking divisors up to the square root.
//! - **Lazy Steps**: The search is exposed as an iterator of steps, so diagnostics can be rendered
//!   by an observer instead of being mixed into the algorithm.
//! - **Batch Search**: Several thresholds can be searched in parallel, each with its own cache.
//!
//! ## Overview of Functions
//!
//! ### Errors
//! - `SearchError`: invalid thresholds, numeric overflow of the chosen value type, or a search that
//!   passed its configured index cap.
//!
//! ### Primality
//!
//! #### `is_prime`
//! Trial division over any integer type, `u64`, `i64` and `BigUint` included. Everything `<= 1`
//! is non-prime.
//!
//! ### Fibonacci Computation
//!
//! #### `fibonacci`
//! Computes `F(n)` with memoized recursion over a `Memo`. Base indices 0 and 1 are not cached.
//!
//! #### `fibonacci_sequence`
//! Returns the first `count` values through one shared memo.
//!
//! ### Search
//!
//! #### `SearchSteps`
//! Iterator over `(index, value, is_prime)` steps starting at index 1.
//!
//! #### `next_prime_fibonacci` / `next_prime_fibonacci_with`
//! Walks the steps until a value is prime and above the threshold. The `_with` form takes
//! `SearchLimits` and a `SearchObserver`.
//!
//! #### `search_many`
//! Runs independent searches for several thresholds on the Rayon pool.
//!
//! ## Usage Example
//! ```rust
//! use prime_fibonacci::search::next_prime_fibonacci;
//! use num_bigint::BigUint;
//! let outcome = next_prime_fibonacci(&BigUint::from(1_000u32)).unwrap();
//! assert_eq!(outcome.value, BigUint::from(1597u32));
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod fibonacci;
pub mod math;
pub mod search;
