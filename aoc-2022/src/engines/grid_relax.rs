//! Goal-directed breadth-first relaxation over an elevation grid
//!
//! The search starts at the single sink and walks moves backwards, so one pass
//! finds the nearest of any number of goal cells. Cells live in a flat arena
//! indexed by `y * width + x`.
//!
//! ```
//! use aoc_2022::engines::grid_relax::Grid;
//!
//! let mut grid: Grid = "Sbcdefghijklm\nEzyxwvutsrqpo".parse().unwrap();
//! assert_eq!(grid.shortest_distance(|cell| cell.is_source()).unwrap(), 25);
//! ```

use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, trace};

/// Highest elevation, written `z` (and `E`) in text grids
pub const MAX_ELEVATION: u8 = 25;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no rows")]
    Empty,
    #[error("row {row} has width {found}, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unexpected cell {found:?} at ({y}, {x})")]
    InvalidCell { found: char, y: usize, x: usize },
    #[error("{found} elevations cannot fill rows of width {width}")]
    ElevationCount { found: usize, width: usize },
    #[error("({y}, {x}) is outside the {height}x{width} grid")]
    OutOfBounds {
        y: usize,
        x: usize,
        height: usize,
        width: usize,
    },
    #[error("grid needs exactly one sink, found {0}")]
    SinkCount(usize),
    #[error("grid has no source cell")]
    NoSource,
    #[error("no path from the sink reaches a goal cell")]
    NoPath,
}

/// One grid position and its search label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub y: usize,
    pub x: usize,
    pub elevation: u8,
    cost: Option<u32>,
    source: bool,
    sink: bool,
}

impl Cell {
    fn new(y: usize, x: usize, elevation: u8) -> Self {
        Self {
            y,
            x,
            elevation,
            cost: None,
            source: false,
            sink: false,
        }
    }

    /// Best known number of moves to the sink, `None` while unreached
    pub fn cost(&self) -> Option<u32> {
        self.cost
    }

    pub fn is_source(&self) -> bool {
        self.source
    }

    pub fn is_sink(&self) -> bool {
        self.sink
    }
}

/// A move from `from` to an adjacent `to` is allowed when it climbs at most one level.
pub fn climbable(from: &Cell, to: &Cell) -> bool {
    u16::from(to.elevation) <= u16::from(from.elevation) + 1
}

#[derive(Debug, Clone)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
    sink: usize,
}

impl Grid {
    /// Build a grid from pre-split text rows.
    ///
    /// `a..=z` are elevations, `S` marks a source at `a`, `E` the sink at `z`.
    pub fn from_lines<'a, I>(lines: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;

        for (y, line) in lines.into_iter().enumerate() {
            let row_width = line.chars().count();
            match width {
                None => width = Some(row_width),
                Some(expected) if expected != row_width => {
                    return Err(GridError::Ragged {
                        row: y,
                        expected,
                        found: row_width,
                    });
                }
                Some(_) => {}
            }

            for (x, ch) in line.chars().enumerate() {
                let cell = match ch {
                    'S' => Cell {
                        source: true,
                        ..Cell::new(y, x, 0)
                    },
                    'E' => Cell {
                        sink: true,
                        ..Cell::new(y, x, MAX_ELEVATION)
                    },
                    'a'..='z' => Cell::new(y, x, ch as u8 - b'a'),
                    found => return Err(GridError::InvalidCell { found, y, x }),
                };
                cells.push(cell);
            }
            height += 1;
        }

        let width = match width {
            Some(w) if w > 0 => w,
            _ => return Err(GridError::Empty),
        };
        Self::validated(height, width, cells)
    }

    /// Build a grid from row-major elevations and explicit role coordinates.
    pub fn from_elevations(
        width: usize,
        elevations: Vec<u8>,
        sink: (usize, usize),
        sources: &[(usize, usize)],
    ) -> Result<Self, GridError> {
        if width == 0 || elevations.is_empty() {
            return Err(GridError::Empty);
        }
        if elevations.len() % width != 0 {
            return Err(GridError::ElevationCount {
                found: elevations.len(),
                width,
            });
        }
        let height = elevations.len() / width;

        let mut cells: Vec<Cell> = elevations
            .into_iter()
            .enumerate()
            .map(|(i, elevation)| Cell::new(i / width, i % width, elevation))
            .collect();

        let index_of = |(y, x): (usize, usize)| {
            if y < height && x < width {
                Ok(y * width + x)
            } else {
                Err(GridError::OutOfBounds {
                    y,
                    x,
                    height,
                    width,
                })
            }
        };

        cells[index_of(sink)?].sink = true;
        for &source in sources {
            cells[index_of(source)?].source = true;
        }
        Self::validated(height, width, cells)
    }

    fn validated(height: usize, width: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        let sinks: Vec<usize> = cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.sink)
            .map(|(i, _)| i)
            .collect();
        let [sink] = sinks[..] else {
            return Err(GridError::SinkCount(sinks.len()));
        };
        if !cells.iter().any(|c| c.source) {
            return Err(GridError::NoSource);
        }

        Ok(Self {
            height,
            width,
            cells,
            sink,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn cell(&self, y: usize, x: usize) -> Option<&Cell> {
        if y < self.height && x < self.width {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Recorded cost at `(y, x)` after the last search
    pub fn cost(&self, y: usize, x: usize) -> Option<u32> {
        self.cell(y, x).and_then(Cell::cost)
    }

    pub fn sink(&self) -> &Cell {
        &self.cells[self.sink]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Fewest [`climbable`] moves from any cell matching `goal` to the sink.
    pub fn shortest_distance<G>(&mut self, goal: G) -> Result<u32, GridError>
    where
        G: Fn(&Cell) -> bool,
    {
        self.search(goal, climbable)
    }

    /// Relax costs outward from the sink until a cell matching `goal` is reached.
    ///
    /// `can_step(from, to)` decides whether the forward move `from -> to` is
    /// allowed; the search applies it in reverse. Costs are reset first, so
    /// repeated searches on the same grid are idempotent.
    pub fn search<G, C>(&mut self, goal: G, can_step: C) -> Result<u32, GridError>
    where
        G: Fn(&Cell) -> bool,
        C: Fn(&Cell, &Cell) -> bool,
    {
        for cell in &mut self.cells {
            cell.cost = None;
        }
        self.cells[self.sink].cost = Some(0);
        if goal(&self.cells[self.sink]) {
            return Ok(0);
        }

        let mut frontier = vec![self.sink];
        let mut next = Vec::new();
        let mut relaxations = 0usize;

        while !frontier.is_empty() {
            for &dest in &frontier {
                let Some(dest_cost) = self.cells[dest].cost else {
                    continue;
                };
                let candidate = dest_cost + 1;

                for src in self.neighbours(dest).into_iter().flatten() {
                    if !can_step(&self.cells[src], &self.cells[dest]) {
                        continue;
                    }
                    let cell = &mut self.cells[src];
                    if cell.cost.is_some_and(|cost| cost <= candidate) {
                        continue;
                    }
                    cell.cost = Some(candidate);
                    relaxations += 1;
                    trace!(y = cell.y, x = cell.x, cost = candidate, "relaxed");

                    if goal(&*cell) {
                        debug!(
                            y = cell.y,
                            x = cell.x,
                            distance = candidate,
                            relaxations,
                            "goal reached"
                        );
                        return Ok(candidate);
                    }
                    next.push(src);
                }
            }
            std::mem::swap(&mut frontier, &mut next);
            next.clear();
        }

        debug!(relaxations, "frontier exhausted");
        Err(GridError::NoPath)
    }

    /// Orthogonal neighbours in up, down, left, right order; bounds checked here.
    fn neighbours(&self, index: usize) -> [Option<usize>; 4] {
        let (y, x) = (index / self.width, index % self.width);
        [
            y.checked_sub(1).map(|_| index - self.width),
            (y + 1 < self.height).then(|| index + self.width),
            x.checked_sub(1).map(|_| index - 1),
            (x + 1 < self.width).then(|| index + 1),
        ]
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_lines(s.lines().map(str::trim_end).filter(|l| !l.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
Sabqponm
abcryxxl
accszExk
acctuvwj
abdefghi
";

    fn ramp() -> Grid {
        let elevations = (0..5)
            .flat_map(|y| (0..5).map(move |x| (y + x) as u8))
            .collect();
        Grid::from_elevations(5, elevations, (4, 4), &[(0, 0)]).unwrap()
    }

    #[test]
    fn test_example_marked_source() {
        let mut grid: Grid = EXAMPLE.parse().unwrap();
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.width(), 8);
        assert_eq!(grid.sink().elevation, MAX_ELEVATION);
        assert_eq!(grid.shortest_distance(Cell::is_source).unwrap(), 31);
    }

    #[test]
    fn test_example_any_lowest_cell() {
        let mut grid: Grid = EXAMPLE.parse().unwrap();
        assert_eq!(grid.shortest_distance(|c| c.elevation == 0).unwrap(), 29);
    }

    #[test]
    fn test_ramp_distance_is_manhattan() {
        let mut grid = ramp();
        assert_eq!(grid.shortest_distance(Cell::is_source).unwrap(), 8);
        assert_eq!(grid.cost(0, 0), Some(8));
    }

    #[test]
    fn test_search_is_idempotent() {
        let mut grid: Grid = EXAMPLE.parse().unwrap();
        let first = grid.shortest_distance(Cell::is_source).unwrap();
        let costs: Vec<_> = grid.cells().map(Cell::cost).collect();

        let second = grid.shortest_distance(Cell::is_source).unwrap();
        let again: Vec<_> = grid.cells().map(Cell::cost).collect();

        assert_eq!(first, second);
        assert_eq!(costs, again);
    }

    #[test]
    fn test_sink_matching_goal_is_zero() {
        let mut grid = ramp();
        assert_eq!(grid.shortest_distance(Cell::is_sink).unwrap(), 0);
    }

    #[test]
    fn test_unreachable_goal_fails() {
        // The source cannot climb onto the ridge around the sink
        let mut grid: Grid = "Sz\nzE".parse().unwrap();
        assert_eq!(
            grid.shortest_distance(Cell::is_source),
            Err(GridError::NoPath)
        );
    }

    #[test]
    fn test_highest_elevations_climb_and_descend() {
        let mut grid = Grid::from_elevations(2, vec![255, 0], (0, 1), &[(0, 0)]).unwrap();
        assert_eq!(grid.shortest_distance(Cell::is_source), Ok(1));

        let mut grid = Grid::from_elevations(3, vec![253, 254, 255], (0, 2), &[(0, 0)]).unwrap();
        assert_eq!(grid.shortest_distance(Cell::is_source), Ok(2));

        let mut grid = Grid::from_elevations(2, vec![0, 255], (0, 1), &[(0, 0)]).unwrap();
        assert_eq!(grid.shortest_distance(Cell::is_source), Err(GridError::NoPath));
    }

    #[test]
    fn test_custom_step_rule() {
        // Allow only level moves: the ramp becomes unreachable
        let mut grid = ramp();
        let result = grid.search(Cell::is_source, |from, to| from.elevation == to.elevation);
        assert_eq!(result, Err(GridError::NoPath));
    }

    #[test]
    fn test_malformed_grids() {
        assert_eq!("".parse::<Grid>().unwrap_err(), GridError::Empty);
        assert_eq!(
            "Sab\nbE".parse::<Grid>().unwrap_err(),
            GridError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(
            "Sa1\nabE".parse::<Grid>().unwrap_err(),
            GridError::InvalidCell {
                found: '1',
                y: 0,
                x: 2
            }
        );
        assert_eq!("Sab\nabc".parse::<Grid>().unwrap_err(), GridError::SinkCount(0));
        assert_eq!("SEb\nabE".parse::<Grid>().unwrap_err(), GridError::SinkCount(2));
        assert_eq!("aab\nabE".parse::<Grid>().unwrap_err(), GridError::NoSource);
    }

    #[test]
    fn test_from_elevations_validation() {
        assert_eq!(
            Grid::from_elevations(3, vec![0; 4], (0, 0), &[(0, 1)]).unwrap_err(),
            GridError::ElevationCount { found: 4, width: 3 }
        );
        assert_eq!(
            Grid::from_elevations(2, vec![0; 4], (2, 0), &[(0, 1)]).unwrap_err(),
            GridError::OutOfBounds {
                y: 2,
                x: 0,
                height: 2,
                width: 2
            }
        );
    }
}
