//! Core solver traits

use crate::error::{ParseError, SolveError};

/// Parses raw puzzle input into the data every part works on.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Stones;
///
/// impl AocParser for Stones {
///     type SharedData<'a> = Vec<u64>;
///
///     fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
///         input
///             .split_whitespace()
///             .map(|field| {
///                 field
///                     .parse()
///                     .map_err(|_| ParseError::InvalidFormat(field.to_string()))
///             })
///             .collect()
///     }
/// }
///
/// assert_eq!(Stones::parse("125 17").unwrap(), vec![125, 17]);
/// ```
pub trait AocParser {
    /// Parsed input plus any state the parts want to share.
    ///
    /// Owned types are the common case; borrow from the input through `'a`
    /// when no transformation is needed.
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// Implement once per part and let `#[derive(AocSolver)]` generate the
/// [`Solver`] dispatch.
///
/// ```
/// use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
///
/// struct Sum;
///
/// impl AocParser for Sum {
///     type SharedData<'a> = Vec<u64>;
///
///     fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
///         input
///             .split_whitespace()
///             .map(|f| f.parse().map_err(|_| ParseError::InvalidFormat(f.into())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Sum {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         Ok(shared.iter().sum::<u64>().to_string())
///     }
/// }
///
/// let mut shared = Sum::parse("1 2 3").unwrap();
/// assert_eq!(<Sum as PartSolver<1>>::solve(&mut shared).unwrap(), "6");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A complete puzzle solver: a parser plus `PARTS` numbered parts.
///
/// Parts receive mutable access to the shared data so later parts can reuse
/// work from earlier ones.
pub trait Solver: AocParser {
    /// Number of parts this solver answers
    const PARTS: u8;

    /// Solve `part`, returning [`SolveError::PartNotImplemented`] for parts
    /// without an implementation.
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked entry point shared by every [`Solver`].
pub trait SolverExt: Solver {
    /// Like [`Solver::solve_part`], but rejects part 0 and parts above
    /// `PARTS` with [`SolveError::PartOutOfRange`].
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
