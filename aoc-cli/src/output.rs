//! Output formatting for solver results

use crate::executor::{AnswerCheck, SolverResult};
use chrono::TimeDelta;

/// Counts shown in the summary and used for the exit status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub solved: usize,
    pub failed: usize,
    pub mismatched: usize,
}

impl Tally {
    pub fn of(results: &[SolverResult]) -> Self {
        let mut tally = Self::default();
        for result in results {
            match &result.answer {
                Ok(_) => tally.solved += 1,
                Err(_) => tally.failed += 1,
            }
            if result.is_mismatch() {
                tally.mismatched += 1;
            }
        }
        tally
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.mismatched == 0
    }
}

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &SolverResult) {
        if self.quiet {
            match &result.answer {
                Ok(answer) => println!("{}", answer),
                Err(e) => eprintln!("Error: {}", e),
            }
        } else {
            match &result.answer {
                Ok(_) => println!("{}", format_result(result)),
                Err(_) => eprintln!("{}", format_result(result)),
            }
        }
    }

    /// Print a summary after all results
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let tally = Tally::of(results);
        let total_parse_time: TimeDelta = results.iter().filter_map(|r| r.parse_duration).sum();
        let total_solve_time: TimeDelta = results.iter().map(|r| r.solve_duration).sum();
        let elapsed_time = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!(
            "Parts: {} solved, {} failed, {} mismatched",
            tally.solved, tally.failed, tally.mismatched
        );
        println!("Total parse time: {}", format_duration(total_parse_time));
        println!("Total solve time: {}", format_duration(total_solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(elapsed_time)
        );
        if !elapsed_time.is_zero() {
            let compute_secs = (total_parse_time + total_solve_time)
                .num_microseconds()
                .unwrap_or(0) as f64
                / 1_000_000.0;
            println!("Speedup factor: {:.2}x", compute_secs / elapsed_time.as_secs_f64());
        }
    }
}

/// One result as shown outside quiet mode
///
/// Multi-line answers (rendered screens) start on their own line.
fn format_result(result: &SolverResult) -> String {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);

    let answer = match &result.answer {
        Ok(answer) => answer,
        Err(e) => return format!("{}: Error - {}", prefix, e),
    };

    let parse_timing = result
        .parse_duration
        .map(|d| format!("parse: {}, ", format_duration(d)))
        .unwrap_or_default();
    let check = result
        .check
        .as_ref()
        .map(|c| format!(" {}", format_check(c)))
        .unwrap_or_default();
    let timing = format!(
        "({}solve: {}){}",
        parse_timing,
        format_duration(result.solve_duration),
        check
    );

    if answer.contains('\n') {
        format!("{}: {}\n{}", prefix, timing, answer.trim_end())
    } else {
        format!("{}: {} {}", prefix, answer, timing)
    }
}

fn format_check(check: &AnswerCheck) -> String {
    match check {
        AnswerCheck::Correct => "✓".to_string(),
        AnswerCheck::Incorrect { expected } if expected.contains('\n') => {
            "✗ expected a different screen".to_string()
        }
        AnswerCheck::Incorrect { expected } => format!("✗ expected {}", expected),
        AnswerCheck::Unknown => "?".to_string(),
        AnswerCheck::Unreadable { reason } => format!("✗ expected answer unreadable: {}", reason),
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
