use std::thread;

use anyhow::{Context, Result};
use log::{info, trace};
use topia_common::{RunMode, SimulationConfig};

use crate::display::FrameSink;
use crate::simulation::Simulation;

/// Where the outer loop stands.
#[derive(Debug)]
enum Phase {
    /// No board yet.
    Init,
    Running(Simulation),
    Terminated,
}

/// Outer loop: renders each cycle to a sink until the run mode says stop.
/// An interrupt simply ends the process; there is nothing to clean up.
pub struct Driver<S: FrameSink> {
    config: SimulationConfig,
    sink: S,
    phase: Phase,
}

impl<S: FrameSink> Driver<S> {
    pub fn new(config: SimulationConfig, sink: S) -> Self {
        Self { config, sink, phase: Phase::Init }
    }

    /// Performs one transition: builds the board, shows one cycle, or stops.
    pub fn tick(&mut self) -> Result<()> {
        self.phase = match std::mem::replace(&mut self.phase, Phase::Terminated) {
            Phase::Init => Phase::Running(Simulation::new(&self.config)?),
            Phase::Running(mut simulation) => {
                if self.finished(simulation.current_cycle()) {
                    let population = simulation.grid().population();
                    info!(
                        "Reached cycle limit after {} cycles ({} endline, {} newline, {} vacant).",
                        simulation.current_cycle(),
                        population.endline,
                        population.newline,
                        population.vacant
                    );
                    Phase::Terminated
                } else {
                    let snapshot = simulation.step();
                    self.sink
                        .present(&snapshot.render(&self.config))
                        .with_context(|| format!("failed to display cycle {}", snapshot.cycle))?;
                    if let RunMode::Continuous { delay } = self.config.mode() {
                        trace!("Sleeping {:?}", delay);
                        thread::sleep(delay);
                    }
                    Phase::Running(simulation)
                }
            }
            Phase::Terminated => Phase::Terminated,
        };
        Ok(())
    }

    /// Runs until terminated. In continuous mode this never returns
    /// unless displaying a frame fails.
    pub fn run(&mut self) -> Result<()> {
        while !self.is_terminated() {
            self.tick()?;
        }
        Ok(())
    }

    fn finished(&self, cycle: u64) -> bool {
        match self.config.mode() {
            RunMode::Bounded { max_cycle } => cycle > max_cycle,
            RunMode::Continuous { .. } => false,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.phase, Phase::Terminated)
    }

    /// Index of the next cycle to display, once the board exists.
    #[cfg(test)]
    pub fn cycle(&self) -> Option<u64> {
        match &self.phase {
            Phase::Running(simulation) => Some(simulation.current_cycle()),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn into_sink(self) -> S {
        self.sink
    }
}
