//! Configuration resolution from CLI args and environment

use crate::cli::{Args, ParallelizeBy};
use std::path::{Path, PathBuf};

/// Environment variable consulted when `--input-dir` is absent
pub const INPUT_DIR_ENV: &str = "AOC_INPUT_DIR";

/// Fallback when neither the flag nor the environment names a directory
pub const DEFAULT_INPUT_DIR: &str = "~/.cache/aoc_solver/inputs";

/// Resolved runtime configuration
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    /// Directory with inputs and expected answers
    pub input_dir: PathBuf,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Whether answers are compared with `.answer` files
    pub check_answers: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args and the process environment
    pub fn from_args(args: Args) -> Self {
        let env_dir = std::env::var(INPUT_DIR_ENV).ok();
        Self::from_args_with_env(args, env_dir.as_deref())
    }

    fn from_args_with_env(args: Args, env_dir: Option<&str>) -> Self {
        let input_dir = resolve_input_dir(args.input_dir.as_deref(), env_dir);
        let thread_count = args.threads.unwrap_or_else(num_cpus);

        Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input_dir,
            thread_count,
            parallelize_by: args.parallelize_by,
            check_answers: !args.no_check,
            quiet: args.quiet,
        }
    }
}

/// Pick the input directory: flag, then environment, then the default
fn resolve_input_dir(flag: Option<&Path>, env_dir: Option<&str>) -> PathBuf {
    let chosen = match (flag, env_dir) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(dir)) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_INPUT_DIR),
    };
    expand_tilde(&chosen)
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && let Some(rest) = path_str
            .strip_prefix("~/")
            .or_else(|| (path_str == "~").then_some(""))
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
