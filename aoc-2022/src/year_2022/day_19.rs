//! Day 19: best geode yield per robot-factory blueprint.

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::engines::resource_search::{Blueprint, PruningConfig};

/// Only optimum-preserving cuts, so reported answers are exact
const PRUNING: PruningConfig = PruningConfig::exact();

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 19, tags = ["search", "optimization"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Blueprint>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let blueprints = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                line.trim()
                    .parse::<Blueprint>()
                    .map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

        if blueprints.is_empty() {
            return Err(ParseError::MissingData("no blueprints".to_string()));
        }
        Ok(blueprints)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .iter()
            .map(|blueprint| blueprint.quality_level(24, &PRUNING))
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let product: u64 = shared
            .iter()
            .take(3)
            .map(|blueprint| u64::from(blueprint.max_geodes(32, &PRUNING).best))
            .product();
        Ok(product.to_string())
    }
}
