//! Day 11: Plutonian Pebbles
//!
//! Every blink rewrites each stone by the first matching rule:
//!
//! 1. `0` becomes `1`
//! 2. a stone with an even number of digits splits into its left and right
//!    halves (`1000` becomes `10` and `0`)
//! 3. anything else is multiplied by 2024
//!
//! Stones never interact, so the count a stone expands into depends only on
//! its value and the blinks left. That pair is the memo key.
//!
//! A stone whose product no longer fits in a `u64` makes the whole count an
//! [`BlinkError::StoneOverflow`]; nothing wraps.

use std::sync::Arc;

use anyhow::Context;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use rayon::ThreadPool;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::utils::digits::split_digits;
use crate::utils::dp_cache::{
    DashMapBackend, DpCache, DpProblem, HashMapBackend, ParallelDpCache,
};

pub type Stone = u64;
/// Remaining blinks
pub type Blinks = u32;
/// Stones a key expands into, or why it could not be counted
pub type Count = Result<u64, BlinkError>;

pub const PART_1_BLINKS: Blinks = 25;
pub const PART_2_BLINKS: Blinks = 75;

const MULTIPLIER: Stone = 2024;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BlinkError {
    #[error("blink budget must be non-negative, got {0}")]
    NegativeBudget(i64),
    #[error("blink budget {0} is too large")]
    BudgetTooLarge(i64),
    #[error("stone {0} times 2024 does not fit in 64 bits")]
    StoneOverflow(Stone),
    #[error("stone count does not fit in 64 bits")]
    CountOverflow,
}

impl From<BlinkError> for SolveError {
    fn from(e: BlinkError) -> Self {
        SolveError::SolveFailed(Box::new(e))
    }
}

/// Converts a signed budget, rejecting values no stone can be blinked by.
pub fn blinks_from_signed(blinks: i64) -> Result<Blinks, BlinkError> {
    if blinks < 0 {
        return Err(BlinkError::NegativeBudget(blinks));
    }
    Blinks::try_from(blinks).map_err(|_| BlinkError::BudgetTooLarge(blinks))
}

/// What one stone turns into after a single blink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Successors {
    One(Stone),
    Two(Stone, Stone),
}

/// Applies the single rule matching `stone`.
pub fn successors(stone: Stone) -> Result<Successors, BlinkError> {
    if stone == 0 {
        return Ok(Successors::One(1));
    }
    match split_digits(stone) {
        Some((left, right)) => Ok(Successors::Two(left, right)),
        None => stone
            .checked_mul(MULTIPLIER)
            .map(Successors::One)
            .ok_or(BlinkError::StoneOverflow(stone)),
    }
}

/// The stone recurrence as a DP problem over `(stone, blinks left)`.
///
/// Zero blinks left is a base case worth one stone, so it never reaches the
/// memo table. A stone that overflows has no dependencies and stores its
/// error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blink;

impl DpProblem<(Stone, Blinks), Count> for Blink {
    fn base_case(&self, &(_, blinks): &(Stone, Blinks)) -> Option<Count> {
        (blinks == 0).then_some(Ok(1))
    }

    fn deps(&self, &(stone, blinks): &(Stone, Blinks)) -> Vec<(Stone, Blinks)> {
        let next = blinks - 1;
        match successors(stone) {
            Ok(Successors::One(stone)) => vec![(stone, next)],
            Ok(Successors::Two(left, right)) => vec![(left, next), (right, next)],
            Err(_) => Vec::new(),
        }
    }

    fn compute(&self, &(stone, _): &(Stone, Blinks), deps: Vec<Count>) -> Count {
        successors(stone)?;
        deps.into_iter().try_fold(0u64, |total, count| {
            total.checked_add(count?).ok_or(BlinkError::CountOverflow)
        })
    }
}

/// Adds per-stone counts left to right, tracing the running total.
fn sum_counts(stones: &[Stone], counts: impl IntoIterator<Item = Count>) -> Count {
    stones
        .iter()
        .zip(counts)
        .try_fold(0u64, |total, (&stone, count)| {
            let total = total.checked_add(count?).ok_or(BlinkError::CountOverflow)?;
            trace!(stone, running_total = total, "expanded stone");
            Ok(total)
        })
}

/// Counts stones with a memo table owned by this value.
///
/// Drop the counter to discard the table; two counters never share entries.
pub struct StoneCounter {
    cache: DpCache<(Stone, Blinks), Count, HashMapBackend<(Stone, Blinks), Count>, Blink>,
}

impl StoneCounter {
    pub fn new() -> Self {
        Self {
            cache: DpCache::new(HashMapBackend::new(), Blink),
        }
    }

    /// Number of stones `stone` becomes after `blinks` blinks.
    ///
    /// ```
    /// use aoc_2024::year_2024::day_11::{BlinkError, StoneCounter};
    ///
    /// let counter = StoneCounter::new();
    /// assert_eq!(counter.expand(17, 1), Ok(2));
    /// assert_eq!(counter.expand(125, 0), Ok(1));
    /// assert_eq!(
    ///     counter.expand(u64::MAX / 1000, 1),
    ///     Err(BlinkError::StoneOverflow(u64::MAX / 1000))
    /// );
    /// ```
    pub fn expand(&self, stone: Stone, blinks: Blinks) -> Count {
        self.cache.get(&(stone, blinks))
    }

    /// [`expand`](Self::expand) for a signed budget, rejecting negatives.
    pub fn try_expand(&self, stone: Stone, blinks: i64) -> Count {
        self.expand(stone, blinks_from_signed(blinks)?)
    }

    /// Total stones after `blinks` blinks, summed left to right.
    pub fn count_all(&self, stones: &[Stone], blinks: Blinks) -> Count {
        let total = sum_counts(
            stones,
            stones.iter().map(|&stone| self.expand(stone, blinks)),
        )?;
        debug!(
            stones = stones.len(),
            blinks,
            memo_entries = self.memo_len(),
            total,
            "counted stones"
        );
        Ok(total)
    }

    /// Entries in the memo table
    pub fn memo_len(&self) -> usize {
        self.cache.len()
    }
}

impl Default for StoneCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts starting stones on Rayon workers that share one sharded memo table.
///
/// Gives exactly the same totals as [`StoneCounter`].
pub struct ParallelStoneCounter {
    cache: ParallelDpCache<(Stone, Blinks), Count, DashMapBackend<(Stone, Blinks), Count>, Blink>,
}

impl ParallelStoneCounter {
    pub fn new() -> Self {
        Self {
            cache: ParallelDpCache::new(DashMapBackend::new(), Blink),
        }
    }

    pub fn with_pool(pool: Arc<ThreadPool>) -> Self {
        Self {
            cache: ParallelDpCache::with_pool(DashMapBackend::new(), Blink, pool),
        }
    }

    pub fn expand(&self, stone: Stone, blinks: Blinks) -> Count {
        self.cache.get(&(stone, blinks))
    }

    pub fn count_all(&self, stones: &[Stone], blinks: Blinks) -> Count {
        let keys: Vec<_> = stones.iter().map(|&stone| (stone, blinks)).collect();
        let total = sum_counts(stones, self.cache.get_many(&keys))?;
        debug!(
            stones = stones.len(),
            blinks,
            memo_entries = self.memo_len(),
            total,
            "counted stones in parallel"
        );
        Ok(total)
    }

    pub fn memo_len(&self) -> usize {
        self.cache.len()
    }
}

impl Default for ParallelStoneCounter {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_stone(field: &str) -> anyhow::Result<Stone> {
    field
        .parse()
        .with_context(|| format!("'{field}' is not a non-negative integer"))
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 11, tags = ["2024", "memoization"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Stone>;

    /// Reads whitespace-separated stones from every line, skipping fields
    /// that are not non-negative integers. No stones at all counts as zero.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let stones: Vec<Stone> = input
            .split_whitespace()
            .filter_map(|field| match parse_stone(field) {
                Ok(stone) => Some(stone),
                Err(e) => {
                    warn!("skipping stone: {e:#}");
                    None
                }
            })
            .collect();

        if stones.is_empty() {
            warn!("no stones in input");
        }
        Ok(stones)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(StoneCounter::new()
            .count_all(shared, PART_1_BLINKS)?
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(ParallelStoneCounter::new()
            .count_all(shared, PART_2_BLINKS)?
            .to_string())
    }
}
