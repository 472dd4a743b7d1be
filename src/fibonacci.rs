use std::collections::HashMap;

use num_traits::{CheckedAdd, One};

use crate::error::SearchError;

/// Cache of Fibonacci values keyed by index, scoped to one search.
///
/// Only indices `>= 2` are ever stored. An entry is written once and never
/// replaced.
#[derive(Debug, Clone)]
pub struct Memo<T> {
    values: HashMap<u64, T>,
}

impl<T> Memo<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn get(&self, index: u64) -> Option<&T> {
        self.values.get(&index)
    }

    pub fn contains(&self, index: u64) -> bool {
        self.values.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn record(&mut self, index: u64, value: T) {
        self.values.entry(index).or_insert(value);
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes F(n) for the sequence 1, 1, 2, 3, 5, 8, ... (F(0) = F(1) = 1).
///
/// Every recursive call shares `memo`, so across a whole search each index is
/// computed at most once. Base indices 0 and 1 are returned directly and not
/// cached.
///
/// # Errors
/// `SearchError::NumericOverflow` if a sum does not fit in `T`; `memo` then
/// holds no entry for the failing index.
///
/// # Example
/// ```
/// use prime_fibonacci::fibonacci::{fibonacci, Memo};
/// let mut memo = Memo::new();
/// assert_eq!(fibonacci(10, &mut memo), Ok(89u64));
/// assert!(memo.contains(9));
/// ```
pub fn fibonacci<T>(n: u64, memo: &mut Memo<T>) -> Result<T, SearchError>
where
    T: CheckedAdd + One + Clone,
{
    if let Some(value) = memo.get(n) {
        return Ok(value.clone());
    }
    if n <= 1 {
        return Ok(T::one());
    }

    let previous = fibonacci(n - 1, memo)?;
    let before_previous = fibonacci(n - 2, memo)?;
    let value = previous
        .checked_add(&before_previous)
        .ok_or(SearchError::NumericOverflow { index: n })?;

    memo.record(n, value.clone());
    Ok(value)
}

/// Returns F(0) through F(count - 1), computed through one shared memo.
///
/// # Example
/// ```
/// use prime_fibonacci::fibonacci;
/// use num_bigint::BigUint;
/// let fib_sequence = fibonacci::fibonacci_sequence::<BigUint>(11).unwrap();
/// assert_eq!(fib_sequence[10], BigUint::from(89u32));
/// ```
pub fn fibonacci_sequence<T>(count: u64) -> Result<Vec<T>, SearchError>
where
    T: CheckedAdd + One + Clone,
{
    let mut memo = Memo::new();
    (0..count).map(|n| fibonacci(n, &mut memo)).collect()
}
