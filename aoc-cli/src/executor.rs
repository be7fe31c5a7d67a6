//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, ParseError, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Outcome of comparing an answer with the recorded one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerCheck {
    Correct,
    Incorrect { expected: String },
    /// No `.answer` file for this part
    Unknown,
    /// The `.answer` file exists but could not be read
    Unreadable { reason: String },
}

/// Result from a single solver execution
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, SolverError>,
    pub solve_duration: TimeDelta,
    /// Set on the first part solved by each parsed instance
    pub parse_duration: Option<TimeDelta>,
    /// `None` when checking is disabled or the part failed
    pub check: Option<AnswerCheck>,
}

impl SolverResult {
    /// Answer contradicts the recorded one, or the record cannot be read
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self.check,
            Some(AnswerCheck::Incorrect { .. } | AnswerCheck::Unreadable { .. })
        )
    }
}

/// Work item representing a solver to execute
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    context: ExecutionContext,
    thread_pool: rayon::ThreadPool,
}

/// Everything a worker thread needs, shared by reference
struct ExecutionContext {
    registry: SolverRegistry,
    store: InputStore,
    check_answers: bool,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            context: ExecutionContext {
                registry,
                store: InputStore::new(config.input_dir.clone()),
                check_answers: config.check_answers,
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn store(&self) -> &InputStore {
        &self.context.store
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.context;
        cfg.registry
            .storage()
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Restrict `1..=max_parts` to the part filter
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.context.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0,
            None => 1..=max_parts,
        }
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        debug!(
            items = work_items.len(),
            mode = ?self.context.parallelize_by,
            "executing"
        );

        match self.context.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work(&work, &tx, &self.context) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();
                self.execute_grouped(by_year, &tx)
            }
            ParallelizeBy::Day | ParallelizeBy::Part => {
                let singles = work_items.into_iter().map(|w| vec![w]).collect();
                self.execute_grouped(singles, &tx)
            }
        }
    }

    /// Run groups in parallel; items within a group run in order
    fn execute_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let context = &self.context;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_work(&work, tx, context) {
                            err = Some(ArcExecutorError::combine_opt(err, e));
                        }
                    }
                    err
                })
                .reduce(
                    || None,
                    |left, right| match (left, right) {
                        (Some(l), Some(r)) => Some(ArcExecutorError::combine(l, r)),
                        (l, r) => l.or(r),
                    },
                )
                .map_or(Ok(()), Err)
        })
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ArcExecutorError::from(ExecutorError::ChannelSend))
}

/// Result for a part that never reached its solver
fn failed_result(year: u16, day: u8, part: u8, error: SolverError) -> SolverResult {
    SolverResult {
        year,
        day,
        part,
        answer: Err(error),
        solve_duration: TimeDelta::zero(),
        parse_duration: None,
        check: None,
    }
}

/// Copy of a creation error for each affected part
fn replicate(error: &SolverError) -> SolverError {
    match error {
        SolverError::NotFound(y, d) => SolverError::NotFound(*y, *d),
        SolverError::InvalidYearDay(y, d) => SolverError::InvalidYearDay(*y, *d),
        SolverError::ParseError(e) => SolverError::ParseError(e.clone()),
        SolverError::SolveError(e) => SolverError::ParseError(ParseError::Other(e.to_string())),
    }
}

/// Read the input for one work item and solve its parts
fn run_work(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    context: &ExecutionContext,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let input = match context.store.input(year, day) {
        Ok(input) => input,
        Err(source) => {
            let error = ExecutorError::Input { year, day, source };
            warn!(year, day, %error, "skipping");
            let message = error.to_string();
            for part in work.parts.clone() {
                let missing = SolverError::ParseError(ParseError::MissingData(message.clone()));
                send(tx, failed_result(year, day, part, missing))?;
            }
            return Ok(());
        }
    };

    if matches!(context.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, tx, context)
    } else {
        run_parts_in_order(work, &input, tx, context)
    }
}

/// Parse once, then solve each part on the current thread
fn run_parts_in_order(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    context: &ExecutionContext,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let mut solver = match context.registry.create_solver(year, day, input) {
        Ok(solver) => solver,
        Err(e) => {
            for part in work.parts.clone() {
                send(tx, failed_result(year, day, part, replicate(&e)))?;
            }
            return Ok(());
        }
    };

    let mut parse_duration = Some(solver.parse_duration());
    for part in work.parts.clone() {
        let result = solve_part(year, day, part, &mut *solver, parse_duration.take(), context);
        send(tx, result)?;
    }
    Ok(())
}

/// Solve every part on its own instance, emitting results in part order
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    context: &ExecutionContext,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let mut results: Vec<SolverResult> = work
        .parts
        .clone()
        .into_par_iter()
        .map(|part| match context.registry.create_solver(year, day, input) {
            Ok(mut solver) => {
                let parse_duration = Some(solver.parse_duration());
                solve_part(year, day, part, &mut *solver, parse_duration, context)
            }
            Err(e) => failed_result(year, day, part, e),
        })
        .collect();

    results.sort_by_key(|r| r.part);
    for result in results {
        send(tx, result)?;
    }
    Ok(())
}

fn solve_part(
    year: u16,
    day: u8,
    part: u8,
    solver: &mut (dyn DynSolver + '_),
    parse_duration: Option<TimeDelta>,
    context: &ExecutionContext,
) -> SolverResult {
    debug!(year, day, part, "solving");
    let (answer, solve_duration) = match solver.solve(part) {
        Ok(result) => {
            let duration = result.duration();
            (Ok(result.answer), duration)
        }
        Err(e) => (Err(SolverError::from(e)), TimeDelta::zero()),
    };

    let check = match &answer {
        Ok(answer) if context.check_answers => {
            Some(check_answer(&context.store, year, day, part, answer))
        }
        _ => None,
    };

    SolverResult {
        year,
        day,
        part,
        answer,
        solve_duration,
        parse_duration,
        check,
    }
}

fn check_answer(store: &InputStore, year: u16, day: u8, part: u8, answer: &str) -> AnswerCheck {
    match store.expected_answer(year, day, part) {
        Ok(Some(expected)) if expected == answer.trim() => AnswerCheck::Correct,
        Ok(Some(expected)) => AnswerCheck::Incorrect { expected },
        Ok(None) => AnswerCheck::Unknown,
        Err(e) => {
            warn!(year, day, part, error = %e, "expected answer unreadable");
            AnswerCheck::Unreadable {
                reason: e.to_string(),
            }
        }
    }
}
