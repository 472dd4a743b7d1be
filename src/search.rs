use std::fmt;
use std::str::FromStr;

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, info, trace};

use crate::error::SearchError;
use crate::fibonacci::{fibonacci, Memo};
use crate::math::{is_prime, FibValue};

/// One evaluated position of the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchStep<T> {
    pub index: u64,
    pub value: T,
    pub is_prime: bool,
}

impl<T: PartialOrd> SearchStep<T> {
    /// Whether this step ends a search past `threshold`.
    pub fn qualifies(&self, threshold: &T) -> bool {
        self.is_prime && self.value > *threshold
    }
}

/// The first Fibonacci value that is prime and above the threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<T> {
    pub index: u64,
    pub value: T,
}

/// Optional bounds on how far a search may walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Highest index the search evaluates before giving up.
    pub max_index: Option<u64>,
}

impl SearchLimits {
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn up_to(max_index: u64) -> Self {
        Self {
            max_index: Some(max_index),
        }
    }
}

/// Lazy sequence of search steps starting at index 1.
///
/// Owns the memo for its whole life, so each step reuses every value computed
/// by earlier steps. Yields at most one error, after which it is exhausted.
///
/// # Example
/// ```
/// use prime_fibonacci::search::SearchSteps;
/// let primes: Vec<u64> = SearchSteps::<u64>::new()
///     .take(10)
///     .filter_map(Result::ok)
///     .filter(|step| step.is_prime)
///     .map(|step| step.value)
///     .collect();
/// assert_eq!(primes, [2, 3, 5, 13, 89]);
/// ```
#[derive(Debug)]
pub struct SearchSteps<T> {
    memo: Memo<T>,
    current_index: u64,
    limits: SearchLimits,
    finished: bool,
}

impl<T: FibValue> SearchSteps<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(SearchLimits::unbounded())
    }

    #[must_use]
    pub fn with_limits(limits: SearchLimits) -> Self {
        Self {
            memo: Memo::new(),
            current_index: 1,
            limits,
            finished: false,
        }
    }

    /// Index the next step will evaluate.
    pub fn current_index(&self) -> u64 {
        self.current_index
    }

    /// Evaluate the current index and advance past it.
    pub fn next_step(&mut self) -> Result<SearchStep<T>, SearchError> {
        if let Some(max_index) = self.limits.max_index {
            if self.current_index > max_index {
                return Err(SearchError::LimitExceeded { max_index });
            }
        }

        let index = self.current_index;
        let value = fibonacci(index, &mut self.memo)?;
        let is_prime = is_prime(&value);
        self.current_index += 1;

        Ok(SearchStep {
            index,
            value,
            is_prime,
        })
    }
}

impl<T: FibValue> Default for SearchSteps<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FibValue> Iterator for SearchSteps<T> {
    type Item = Result<SearchStep<T>, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let step = self.next_step();
        self.finished = step.is_err();
        Some(step)
    }
}

/// Receives every step of a search as it happens.
pub trait SearchObserver<T> {
    fn on_step(&mut self, _step: &SearchStep<T>, _threshold: &T) {}

    fn on_found(&mut self, _outcome: &SearchOutcome<T>) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpObserver;

impl<T> SearchObserver<T> for NoOpObserver {}

/// Reports steps through `tracing`: each candidate at debug level, index
/// advances at trace level and the result at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl<T: FibValue> SearchObserver<T> for TracingObserver {
    fn on_step(&mut self, step: &SearchStep<T>, threshold: &T) {
        debug!(
            index = step.index,
            value = %step.value,
            threshold = %threshold,
            prime = step.is_prime,
            "evaluated fibonacci candidate"
        );
        if !step.qualifies(threshold) {
            trace!(next_index = step.index + 1, "advancing search index");
        }
    }

    fn on_found(&mut self, outcome: &SearchOutcome<T>) {
        info!(index = outcome.index, value = %outcome.value, "found next prime fibonacci");
    }
}

/// Keeps every step it sees, in order.
#[derive(Debug, Clone)]
pub struct RecordingObserver<T> {
    pub steps: Vec<SearchStep<T>>,
    pub outcome: Option<SearchOutcome<T>>,
}

impl<T> RecordingObserver<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            outcome: None,
        }
    }
}

impl<T> Default for RecordingObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> SearchObserver<T> for RecordingObserver<T> {
    fn on_step(&mut self, step: &SearchStep<T>, _threshold: &T) {
        self.steps.push(step.clone());
    }

    fn on_found(&mut self, outcome: &SearchOutcome<T>) {
        self.outcome = Some(outcome.clone());
    }
}

/// Finds the first Fibonacci value that is prime and strictly greater than
/// `threshold`, reporting progress through [`TracingObserver`].
///
/// The search is unbounded; with `u64` it ends in
/// `SearchError::NumericOverflow` once values no longer fit.
///
/// # Example
/// ```
/// use prime_fibonacci::search::next_prime_fibonacci;
/// let outcome = next_prime_fibonacci(&20u64).unwrap();
/// assert_eq!((outcome.index, outcome.value), (10, 89));
/// ```
pub fn next_prime_fibonacci<T: FibValue>(
    threshold: &T,
) -> Result<SearchOutcome<T>, SearchError> {
    next_prime_fibonacci_with(threshold, SearchLimits::unbounded(), &mut TracingObserver)
}

/// General form of [`next_prime_fibonacci`] with explicit limits and observer.
pub fn next_prime_fibonacci_with<T, O>(
    threshold: &T,
    limits: SearchLimits,
    observer: &mut O,
) -> Result<SearchOutcome<T>, SearchError>
where
    T: FibValue,
    O: SearchObserver<T> + ?Sized,
{
    let mut steps = SearchSteps::with_limits(limits);
    loop {
        let step = steps.next_step()?;
        observer.on_step(&step, threshold);

        if step.qualifies(threshold) {
            let outcome = SearchOutcome {
                index: step.index,
                value: step.value,
            };
            observer.on_found(&outcome);
            return Ok(outcome);
        }
    }
}

/// Runs one independent search per threshold on the rayon pool.
///
/// Each search owns its own memo. Results come back in input order.
pub fn search_many<T>(
    thresholds: &[T],
    limits: SearchLimits,
) -> Vec<Result<SearchOutcome<T>, SearchError>>
where
    T: FibValue + Send + Sync,
{
    thresholds
        .par_iter()
        .map(|threshold| next_prime_fibonacci_with(threshold, limits, &mut TracingObserver))
        .collect()
}

/// Parses a threshold from text: an optional `+` followed by ASCII digits.
///
/// The same text is accepted or rejected whatever `T` is; only a value too
/// large for `T` fails after the digits check.
pub fn parse_threshold<T>(text: &str) -> Result<T, SearchError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let text = text.trim();
    if text.starts_with('-') {
        return Err(SearchError::InvalidArgument(format!(
            "threshold must be non-negative, got `{text}`"
        )));
    }

    let digits = text.strip_prefix('+').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SearchError::InvalidArgument(format!(
            "threshold must be a non-negative integer, got `{text}`"
        )));
    }

    digits
        .parse::<T>()
        .map_err(|e| SearchError::InvalidArgument(format!("threshold `{text}`: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    #[test]
    fn threshold_zero_finds_two() {
        let outcome = next_prime_fibonacci(&0u64).unwrap();
        assert_eq!(outcome, SearchOutcome { index: 2, value: 2 });
    }

    #[test]
    fn threshold_twenty_finds_eighty_nine() {
        let outcome = next_prime_fibonacci(&20u64).unwrap();
        assert_eq!(outcome, SearchOutcome { index: 10, value: 89 });
    }

    #[test]
    fn result_is_strictly_above_threshold() {
        // 89 itself is prime, so the search has to move on to 233
        let outcome = next_prime_fibonacci(&89u64).unwrap();
        assert_eq!(outcome, SearchOutcome { index: 12, value: 233 });
    }

    #[test]
    fn walks_every_index_from_one() {
        let mut observer = RecordingObserver::new();
        next_prime_fibonacci_with(&20u64, SearchLimits::unbounded(), &mut observer).unwrap();

        let indices: Vec<u64> = observer.steps.iter().map(|s| s.index).collect();
        assert_eq!(indices, (1..=10).collect::<Vec<_>>());
        let values: Vec<u64> = observer.steps.iter().map(|s| s.value).collect();
        assert_eq!(values, [1, 2, 3, 5, 8, 13, 21, 34, 55, 89]);
        assert_eq!(observer.outcome, Some(SearchOutcome { index: 10, value: 89 }));
    }

    #[test]
    fn outcome_index_counts_the_steps_taken() {
        for threshold in [0u64, 20, 89, 1_000] {
            let mut observer = RecordingObserver::new();
            let outcome =
                next_prime_fibonacci_with(&threshold, SearchLimits::unbounded(), &mut observer)
                    .unwrap();
            assert_eq!(outcome.index, observer.steps.len() as u64);
        }
    }

    #[test]
    fn overflow_ends_the_search() {
        // the largest prime in the sequence that still fits in u64
        let result = next_prime_fibonacci_with(
            &99_194_853_094_755_497u64,
            SearchLimits::unbounded(),
            &mut NoOpObserver,
        );
        assert_eq!(result, Err(SearchError::NumericOverflow { index: 93 }));
    }

    #[test]
    fn biguint_matches_u64() {
        for threshold in [0u64, 1, 2, 3, 20, 100, 1_000, 1_000_000] {
            let small = next_prime_fibonacci(&threshold).unwrap();
            let big = next_prime_fibonacci(&BigUint::from(threshold)).unwrap();
            assert_eq!(small.index, big.index);
            assert_eq!(BigUint::from(small.value), big.value);
        }
    }

    #[test]
    fn limit_stops_the_search() {
        let result =
            next_prime_fibonacci_with(&1_000u64, SearchLimits::up_to(10), &mut NoOpObserver);
        assert_eq!(result, Err(SearchError::LimitExceeded { max_index: 10 }));
    }

    #[test]
    fn limit_at_the_answer_still_succeeds() {
        let result =
            next_prime_fibonacci_with(&20u64, SearchLimits::up_to(10), &mut NoOpObserver);
        assert_eq!(result.map(|o| o.value), Ok(89));
    }

    #[test]
    fn steps_end_after_an_error() {
        let mut steps = SearchSteps::<u64>::with_limits(SearchLimits::up_to(3));
        assert!(steps.by_ref().take(3).all(|s| s.is_ok()));
        assert_eq!(
            steps.next(),
            Some(Err(SearchError::LimitExceeded { max_index: 3 }))
        );
        assert_eq!(steps.next(), None);
    }

    #[test]
    fn search_many_keeps_input_order() {
        let thresholds = [1_000u64, 0, 20, 89];
        let results: Vec<u64> = search_many(&thresholds, SearchLimits::unbounded())
            .into_iter()
            .map(|r| r.unwrap().value)
            .collect();
        assert_eq!(results, [1597, 2, 89, 233]);
    }

    #[test]
    fn search_many_reports_each_failure_separately() {
        let results = search_many(&[20u64, 1_000], SearchLimits::up_to(12));
        assert_eq!(results[0].as_ref().map(|o| o.value), Ok(89));
        assert_eq!(results[1], Err(SearchError::LimitExceeded { max_index: 12 }));
    }

    #[test]
    fn parse_threshold_accepts_integers() {
        assert_eq!(parse_threshold::<u64>("20"), Ok(20));
        assert_eq!(parse_threshold::<u64>(" 7 "), Ok(7));
        assert_eq!(parse_threshold::<BigUint>("0"), Ok(BigUint::from(0u32)));
        assert_eq!(parse_threshold::<u64>("+5"), Ok(5));
        assert_eq!(parse_threshold::<BigUint>("+5"), Ok(BigUint::from(5u32)));
    }

    #[test]
    fn parse_threshold_rejects_bad_input() {
        for text in ["-5", "abc", "1.5", "", "-0", "1_000", "+", "++3", "1 000", "0x10"] {
            assert!(
                matches!(parse_threshold::<u64>(text), Err(SearchError::InvalidArgument(_))),
                "accepted `{text}`"
            );
            assert!(
                matches!(parse_threshold::<BigUint>(text), Err(SearchError::InvalidArgument(_))),
                "accepted `{text}` as BigUint"
            );
        }
    }

    #[test]
    fn parse_threshold_rejects_u64_overflow() {
        assert!(parse_threshold::<u64>("18446744073709551616").is_err());
        assert!(parse_threshold::<BigUint>("18446744073709551616").is_ok());
    }
}
