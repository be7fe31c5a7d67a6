//! Day 10: replay the register program, then read the signal and the screen.

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::engines::cycle_sim::{self, Operation, SamplePoints};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 10, tags = ["simulation"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Operation>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                line.trim()
                    .parse::<Operation>()
                    .map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        cycle_sim::signal_strength(shared, SamplePoints::default())
            .map(|total| total.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        cycle_sim::render_crt(shared).map_err(SolveError::failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    #[test]
    fn test_parse_reports_line() {
        let err = Solver::parse("noop\naddx 1\njmp 4\n").unwrap_err();
        assert!(err.to_string().contains("(line 3)"), "{err}");
    }

    #[test]
    fn test_signal_with_single_add() {
        // x becomes 3 after tick 2 and stays there through tick 220
        let mut input = String::from("addx 2\n");
        input.push_str(&"noop\n".repeat(218));
        let mut shared = Solver::parse(&input).unwrap();

        let expected = 3 * (20 + 60 + 100 + 140 + 180 + 220);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), expected.to_string());
    }

    #[test]
    fn test_screen_follows_sprite() {
        // Sprite moves right by one every two ticks, so pixels stay lit for a while
        let input = "addx 1\n".repeat(20);
        let mut shared = Solver::parse(&input).unwrap();
        let screen = Solver::solve_part(&mut shared, 2).unwrap();

        assert_eq!(screen.lines().count(), 1);
        assert_eq!(screen.len(), 40);
        assert!(screen.starts_with("##"));
    }
}
