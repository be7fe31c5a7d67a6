//! Tick-by-tick replay of multi-cycle instructions
//!
//! An instruction occupies the machine for [`Instruction::ticks`] cycles and
//! only then commits its effect, so observers see the pre-commit state on
//! every intermediate tick.

use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, trace};

/// Width of one CRT row in pixels
pub const CRT_WIDTH: u64 = 40;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("instruction consumes zero ticks")]
    ZeroTickInstruction,
    #[error("sample period must be at least 1 (got period 0, offset {offset})")]
    InvalidSamplePoints { offset: u64 },
    #[error("unknown operation: {0:?}")]
    UnknownOperation(String),
    #[error("invalid operand in {0:?}")]
    InvalidOperand(String),
}

/// Something the simulator can run against state `S`
pub trait Instruction<S> {
    /// Cycles consumed before the effect lands
    fn ticks(&self) -> u32;

    fn commit(&self, state: &mut S);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Noop,
    AddX(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub x: i64,
}

impl Default for Registers {
    fn default() -> Self {
        Self { x: 1 }
    }
}

impl Instruction<Registers> for Operation {
    fn ticks(&self) -> u32 {
        match self {
            Operation::Noop => 1,
            Operation::AddX(_) => 2,
        }
    }

    fn commit(&self, state: &mut Registers) {
        if let Operation::AddX(v) = self {
            state.x += v;
        }
    }
}

impl FromStr for Operation {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some("noop"), None, _) => Ok(Operation::Noop),
            (Some("addx"), Some(operand), None) => operand
                .parse()
                .map(Operation::AddX)
                .map_err(|_| SimError::InvalidOperand(s.to_string())),
            (Some("addx"), _, _) => Err(SimError::InvalidOperand(s.to_string())),
            _ => Err(SimError::UnknownOperation(s.to_string())),
        }
    }
}

/// Parse one operation per non-blank line.
pub fn parse_operations<'a, I>(lines: I) -> Result<Vec<Operation>, SimError>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::parse)
        .collect()
}

/// Ticks on which [`TickObserver::sample`] fires: `offset`, `offset + period`, ...
///
/// Ticks start at 1, so an offset of 0 first fires on tick `period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePoints {
    period: u64,
    offset: u64,
}

impl SamplePoints {
    pub fn new(period: u64, offset: u64) -> Result<Self, SimError> {
        if period == 0 {
            return Err(SimError::InvalidSamplePoints { offset });
        }
        Ok(Self { period, offset })
    }

    pub fn period(&self) -> u64 {
        self.period
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// First tick that fires
    pub fn first(&self) -> u64 {
        if self.offset == 0 {
            self.period
        } else {
            self.offset
        }
    }

    pub fn fires(&self, tick: u64) -> bool {
        let first = self.first();
        tick >= first && (tick - first) % self.period == 0
    }

    /// Number of sample points in `1..=last`
    pub fn count_through(&self, last: u64) -> u64 {
        let first = self.first();
        if last < first {
            0
        } else {
            (last - first) / self.period + 1
        }
    }
}

/// Every 40 cycles starting at cycle 20
impl Default for SamplePoints {
    fn default() -> Self {
        Self {
            period: CRT_WIDTH,
            offset: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ConsumingTicks(u32),
    EffectCommitted,
}

/// Callbacks invoked by [`CycleSimulator`] during a tick, before any commit
pub trait TickObserver<S> {
    /// Called on every tick
    fn render(&mut self, _tick: u64, _state: &S) {}

    /// Called on ticks selected by [`SamplePoints`]
    fn sample(&mut self, _tick: u64, _state: &S) {}
}

impl<S> TickObserver<S> for () {}

/// Adapts a pair of closures into a [`TickObserver`]
pub struct ClosureObserver<R, P> {
    render: R,
    sample: P,
}

impl<R, P> ClosureObserver<R, P> {
    pub fn new(render: R, sample: P) -> Self {
        Self { render, sample }
    }
}

impl<S, R, P> TickObserver<S> for ClosureObserver<R, P>
where
    R: FnMut(u64, &S),
    P: FnMut(u64, &S),
{
    fn render(&mut self, tick: u64, state: &S) {
        (self.render)(tick, state)
    }

    fn sample(&mut self, tick: u64, state: &S) {
        (self.sample)(tick, state)
    }
}

pub struct CycleSimulator<S> {
    tick: u64,
    state: S,
    phase: Phase,
    points: SamplePoints,
}

impl<S> CycleSimulator<S> {
    pub fn new(state: S, points: SamplePoints) -> Self {
        Self {
            tick: 0,
            state,
            phase: Phase::Idle,
            points,
        }
    }

    /// Completed ticks so far; ticks are numbered from 1
    pub fn elapsed(&self) -> u64 {
        self.tick
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn into_state(self) -> S {
        self.state
    }

    /// Run one instruction to completion, notifying `observer` on each of its ticks.
    pub fn execute<I, O>(&mut self, instruction: &I, observer: &mut O) -> Result<(), SimError>
    where
        I: Instruction<S> + ?Sized,
        O: TickObserver<S> + ?Sized,
    {
        let ticks = instruction.ticks();
        if ticks == 0 {
            return Err(SimError::ZeroTickInstruction);
        }

        self.phase = Phase::ConsumingTicks(ticks);
        while let Phase::ConsumingTicks(remaining) = self.phase {
            self.tick += 1;
            observer.render(self.tick, &self.state);
            if self.points.fires(self.tick) {
                observer.sample(self.tick, &self.state);
            }
            self.phase = match remaining {
                1 => Phase::EffectCommitted,
                n => Phase::ConsumingTicks(n - 1),
            };
        }

        instruction.commit(&mut self.state);
        trace!(tick = self.tick, ticks, "instruction committed");
        Ok(())
    }

    /// Replay `instructions` in order and return the final tick count.
    pub fn run<'i, I, O>(
        &mut self,
        instructions: impl IntoIterator<Item = &'i I>,
        observer: &mut O,
    ) -> Result<u64, SimError>
    where
        I: Instruction<S> + 'i,
        O: TickObserver<S> + ?Sized,
    {
        for instruction in instructions {
            self.execute(instruction, observer)?;
        }
        if self.phase == Phase::EffectCommitted {
            self.phase = Phase::Idle;
        }
        Ok(self.tick)
    }
}

/// Sum of `tick * x` over every sample point reached by `ops`.
pub fn signal_strength(ops: &[Operation], points: SamplePoints) -> Result<i64, SimError> {
    let mut total = 0;
    let mut observer = ClosureObserver::new(
        |_: u64, _: &Registers| {},
        |tick: u64, regs: &Registers| total += tick as i64 * regs.x,
    );
    let ticks = CycleSimulator::new(Registers::default(), points).run(ops, &mut observer)?;
    drop(observer);

    debug!(ticks, total, "signal strength");
    Ok(total)
}

#[derive(Default)]
struct Crt {
    rows: Vec<String>,
    row: String,
}

impl TickObserver<Registers> for Crt {
    fn render(&mut self, tick: u64, state: &Registers) {
        let column = ((tick - 1) % CRT_WIDTH) as i64;
        self.row
            .push(if (column - state.x).abs() <= 1 { '#' } else { '.' });
        if tick % CRT_WIDTH == 0 {
            self.rows.push(std::mem::take(&mut self.row));
        }
    }
}

/// Draw the sprite-scan image produced by `ops`, one line per 40-pixel row.
pub fn render_crt(ops: &[Operation]) -> Result<String, SimError> {
    let mut crt = Crt::default();
    CycleSimulator::new(Registers::default(), SamplePoints::default()).run(ops, &mut crt)?;
    if !crt.row.is_empty() {
        crt.rows.push(crt.row);
    }
    Ok(crt.rows.join("\n"))
}
