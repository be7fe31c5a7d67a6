//! Error types for the CLI

use std::path::PathBuf;

use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input store error
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Solver error
    #[error("Solver error: {0}")]
    Solver(#[from] aoc_solver::SolverError),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// Some parts failed or disagreed with their expected answers
    #[error("{failed} part(s) failed, {mismatched} answer(s) did not match")]
    Verification { failed: usize, mismatched: usize },

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Input could not be read
    #[error("Input unavailable for {year}/{day}: {source}")]
    Input {
        year: u16,
        day: u8,
        #[source]
        source: InputError,
    },

    /// Solver execution failed
    #[error("Solver execution failed: {0}")]
    Solver(#[from] aoc_solver::SolverError),

    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merge two errors into one `Multiple`, flattening nested `Multiple`s
    /// and keeping `first` before `second`.
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let mut errors = Vec::new();
        for error in [first, second] {
            match error.inner() {
                ExecutorError::Multiple(nested) => errors.extend(nested.iter().cloned()),
                _ => errors.push(error),
            }
        }
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

/// Errors reading inputs and expected answers
#[derive(Error, Debug)]
pub enum InputError {
    /// No input file for the puzzle
    #[error("{} does not exist", .0.display())]
    Missing(PathBuf),

    /// The file exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(message: &str) -> ArcExecutorError {
        ExecutorError::ThreadPool(message.to_string()).into()
    }

    fn messages(error: &ArcExecutorError) -> Vec<String> {
        match error.inner() {
            ExecutorError::Multiple(errors) => errors.iter().map(|e| e.to_string()).collect(),
            other => vec![other.to_string()],
        }
    }

    #[test]
    fn test_combine_flattens_in_order() {
        let ab = ArcExecutorError::combine(single("a"), single("b"));
        let cd = ArcExecutorError::combine(single("c"), single("d"));
        let all = ArcExecutorError::combine(ab, cd);

        assert_eq!(
            messages(&all),
            ["a", "b", "c", "d"].map(|m| format!("Thread pool creation failed: {m}"))
        );
        assert_eq!(all.to_string(), "Multiple errors occurred (4 total)");
    }

    #[test]
    fn test_combine_opt() {
        let only = ArcExecutorError::combine_opt(None, single("x"));
        assert_eq!(messages(&only).len(), 1);

        let both = ArcExecutorError::combine_opt(Some(only), single("y"));
        assert_eq!(messages(&both).len(), 2);
    }
}
