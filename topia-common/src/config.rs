use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

use crate::error::{TopiaError, TopiaResult};

pub const DIMENSION_RANGE: RangeInclusive<i64> = 5..=39;
pub const PERCENT_RANGE: RangeInclusive<i64> = 1..=99;

/// Microseconds between cycles in continuous mode.
pub const DEFAULT_DELAY_MICROS: u64 = 900_000;

/// How the driver loop runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Redraw in place forever, pausing `delay` between cycles.
    Continuous { delay: Duration },
    /// Print cycles `0..=max_cycle` one after another, then stop.
    Bounded { max_cycle: u64 },
}

impl Default for RunMode {
    fn default() -> Self {
        RunMode::Continuous { delay: Duration::from_micros(DEFAULT_DELAY_MICROS) }
    }
}

/// Per-run simulation parameters. Only constructible through the validating
/// setters, so every instance is within range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    dimension: usize,
    strength: u32,
    vacancy: u32,
    endline: u32,
    mode: RunMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            dimension: 15,
            strength: 50,
            vacancy: 20,
            endline: 60,
            mode: RunMode::default(),
        }
    }
}

fn percent(value: i64, err: fn(i64) -> TopiaError) -> TopiaResult<u32> {
    if PERCENT_RANGE.contains(&value) {
        Ok(value as u32)
    } else {
        Err(err(value))
    }
}

impl SimulationConfig {
    pub fn with_dimension(mut self, value: i64) -> TopiaResult<Self> {
        if !DIMENSION_RANGE.contains(&value) {
            return Err(TopiaError::Dimension(value));
        }
        self.dimension = value as usize;
        Ok(self)
    }

    pub fn with_strength(mut self, value: i64) -> TopiaResult<Self> {
        self.strength = percent(value, TopiaError::Strength)?;
        Ok(self)
    }

    pub fn with_vacancy(mut self, value: i64) -> TopiaResult<Self> {
        self.vacancy = percent(value, TopiaError::Vacancy)?;
        Ok(self)
    }

    pub fn with_endline(mut self, value: i64) -> TopiaResult<Self> {
        self.endline = percent(value, TopiaError::Endline)?;
        Ok(self)
    }

    /// Switches to bounded mode. A negative count is rejected.
    pub fn with_max_cycle(mut self, value: i64) -> TopiaResult<Self> {
        if value < 0 {
            return Err(TopiaError::NegativeCount(value));
        }
        self.mode = RunMode::Bounded { max_cycle: value as u64 };
        Ok(self)
    }

    /// Sets the continuous-mode delay. Negative values fall back to the
    /// default. Has no effect once bounded mode is selected.
    pub fn with_delay_micros(mut self, value: i64) -> Self {
        let micros = u64::try_from(value).unwrap_or(DEFAULT_DELAY_MICROS);
        if let RunMode::Continuous { delay } = &mut self.mode {
            *delay = Duration::from_micros(micros);
        }
        self
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn strength(&self) -> u32 {
        self.strength
    }

    pub fn vacancy(&self) -> u32 {
        self.vacancy
    }

    pub fn endline(&self) -> u32 {
        self.endline
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Happiness below which an agent tries to move.
    #[inline]
    pub fn threshold(&self) -> f32 {
        self.strength as f32 / 100.0
    }

    /// Number of cells of each kind on a fresh grid.
    pub fn population(&self) -> Population {
        let cells = self.dimension * self.dimension;
        let vacancy = f64::from(self.vacancy) / 100.0;
        let endline = f64::from(self.endline) / 100.0;

        // Truncating casts, evaluated in this operand order.
        let vacant = (cells as f64 * vacancy) as usize;
        let endline = (cells as f64 * (1.0 - vacancy) * endline) as usize;

        Population {
            vacant,
            endline,
            newline: cells - vacant - endline,
        }
    }
}

impl fmt::Display for SimulationConfig {
    /// The parameter summary line printed under every frame.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dim: {}, %strength of preference:  {}%, %vacancy:  {}%, %end:  {}%",
            self.dimension, self.strength, self.vacancy, self.endline
        )
    }
}

/// Cell-kind counts. Fixed at grid creation and conserved by every cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Population {
    pub vacant: usize,
    pub endline: usize,
    pub newline: usize,
}

impl Population {
    pub fn total(&self) -> usize {
        self.vacant + self.endline + self.newline
    }
}
