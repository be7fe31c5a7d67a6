//! Day 16: release as much pressure as possible, alone and then with an elephant.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::engines::resource_search::RouteNetwork;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 16, tags = ["graph", "search", "memo"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = RouteNetwork;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        RouteNetwork::parse(input.lines(), RouteNetwork::START)
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .best_release(30, 1)
            .map(|pressure| pressure.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .best_release(26, 2)
            .map(|pressure| pressure.to_string())
            .map_err(SolveError::failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
Valve AA has flow rate=0; tunnels lead to valves DD, II, BB
Valve BB has flow rate=13; tunnels lead to valves CC, AA
Valve CC has flow rate=2; tunnels lead to valves DD, BB
Valve DD has flow rate=20; tunnels lead to valves CC, AA, EE
Valve EE has flow rate=3; tunnels lead to valves FF, DD
Valve FF has flow rate=0; tunnels lead to valves EE, GG
Valve GG has flow rate=0; tunnels lead to valves FF, HH
Valve HH has flow rate=22; tunnel leads to valve GG
Valve II has flow rate=0; tunnels lead to valves AA, JJ
Valve JJ has flow rate=21; tunnel leads to valve II
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "1651");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "1707");
    }

    #[test]
    fn test_missing_start() {
        let err = Solver::parse("Valve BB has flow rate=13; tunnel leads to valve BB").unwrap_err();
        assert!(err.to_string().contains("AA"), "{err}");
    }
}
