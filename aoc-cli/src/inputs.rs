//! Read-only store of puzzle inputs and expected answers

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory layout:
/// - `{dir}/{year}_day{day:02}.txt`: puzzle input
/// - `{dir}/{year}_day{day:02}_part{part}.answer`: expected answer
pub struct InputStore {
    dir: PathBuf,
}

impl InputStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        self.dir.join(format!("{}_day{:02}.txt", year, day))
    }

    pub fn answer_path(&self, year: u16, day: u8, part: u8) -> PathBuf {
        self.dir
            .join(format!("{}_day{:02}_part{}.answer", year, day, part))
    }

    /// Check if an input file exists
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    /// Read the puzzle input; a missing file is an error
    pub fn input(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.input_path(year, day);
        read_optional(&path)?.ok_or(InputError::Missing(path))
    }

    /// Expected answer with surrounding whitespace removed, if one is recorded
    pub fn expected_answer(
        &self,
        year: u16,
        day: u8,
        part: u8,
    ) -> Result<Option<String>, InputError> {
        let path = self.answer_path(year, day, part);
        Ok(read_optional(&path)?.map(|s| s.trim().to_string()))
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, InputError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(InputError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
