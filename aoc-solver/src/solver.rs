//! Core solver traits

use std::ops::RangeInclusive;

use crate::error::{ParseError, SolveError};

/// Trait for parsing puzzle input into the data shared by every part
///
/// Parsing is kept separate from solving so that a solver instance can parse
/// once and then answer each part against the same data.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Ops;
///
/// impl AocParser for Ops {
///     type SharedData<'a> = Vec<&'a str>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         let lines: Vec<&str> = input.lines().collect();
///         if lines.is_empty() {
///             return Err(ParseError::MissingData("no operations".into()));
///         }
///         Ok(lines)
///     }
/// }
///
/// assert_eq!(Ops::parse("noop\naddx 3").unwrap().len(), 2);
/// ```
pub trait AocParser {
    /// The shared data structure that holds parsed input and intermediate results.
    ///
    /// Owned structures are the common case; `&'a str` slices work when the
    /// parts only need borrowed views of the input.
    type SharedData<'a>;

    /// Parse the input string into the shared data structure.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Trait for solving one part of a puzzle.
///
/// The const generic `N` is the part number (1, 2, ...). `#[derive(AocSolver)]`
/// dispatches `Solver::solve_part` to these impls.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, PartSolver, ParseError, SolveError};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat("bad int".into())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Depths {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         Ok(shared.iter().max().copied().unwrap_or_default().to_string())
///     }
/// }
///
/// let mut shared = Depths::parse("3\n9\n4").unwrap();
/// assert_eq!(<Depths as PartSolver<1>>::solve(&mut shared).unwrap(), "9");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    /// Solve this part of the puzzle against the shared data.
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// Core trait that all solvers implement.
///
/// Usually generated by `#[derive(AocSolver)]`; written by hand it is a
/// `PARTS` count plus a `match` on the part number:
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Totals;
///
/// impl AocParser for Totals {
///     type SharedData<'a> = Vec<i64>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat("bad int".into())))
///             .collect()
///     }
/// }
///
/// impl Solver for Totals {
///     const PARTS: u8 = 2;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         match part {
///             1 => Ok(shared.iter().sum::<i64>().to_string()),
///             2 => Ok(shared.iter().product::<i64>().to_string()),
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
///
/// let mut shared = Totals::parse("2\n3\n4").unwrap();
/// assert_eq!(Totals::solve_checked(&mut shared, 2).unwrap(), "24");
/// assert!(Totals::solve_checked(&mut shared, 3).is_err());
/// ```
pub trait Solver: AocParser {
    /// Number of parts, numbered from 1
    const PARTS: u8;

    /// Answer `part` without checking it against `PARTS`
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;

    fn part_range() -> RangeInclusive<u8> {
        1..=Self::PARTS
    }

    /// Answer `part`, rejecting numbers outside [`Solver::part_range`]
    /// with `PartOutOfRange` before the shared data is touched.
    fn solve_checked(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        if !Self::part_range().contains(&part) {
            return Err(SolveError::PartOutOfRange(part));
        }
        Self::solve_part(shared, part)
    }
}
