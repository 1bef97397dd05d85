use log::{debug, info};
use topia_common::{CycleRunner, GlibcRandom, Grid, SimulationConfig, Snapshot, TopiaResult};

/// Owns the live board and advances it one cycle at a time.
#[derive(Debug)]
pub struct Simulation {
    /// The board as it stands before the next cycle.
    grid: Grid,
    runner: CycleRunner,
    /// Index of the cycle the next call to `step` will show.
    current_cycle: u64,
    /// Moves made by the most recent cycle.
    last_moves: usize,
}

impl Simulation {
    /// Builds the seeded starting board for `config`.
    pub fn new(config: &SimulationConfig) -> TopiaResult<Self> {
        let mut rng = GlibcRandom::seeded();
        let grid = Grid::populate(config, &mut rng)?;
        let population = grid.population();
        info!(
            "Board ready: {} vacant, {} endline, {} newline.",
            population.vacant, population.endline, population.newline
        );

        Ok(Self {
            runner: CycleRunner::new(config),
            grid,
            current_cycle: 0,
            last_moves: 0,
        })
    }

    /// Captures the current board, then replaces it with the next one.
    ///
    /// The snapshot reports the moves that produced the captured board (0 for
    /// the first) and that board's mean happiness.
    pub fn step(&mut self) -> Snapshot {
        let (next, stats) = self.runner.step(&self.grid);
        let shown = std::mem::replace(&mut self.grid, next);

        let snapshot = Snapshot {
            cycle: self.current_cycle,
            moves: self.last_moves,
            mean_happiness: stats.mean_happiness,
            grid: shown,
        };
        debug!(
            "Cycle {} | moves in: {} | moves out: {} | happiness {:.6}",
            snapshot.cycle, snapshot.moves, stats.moves, snapshot.mean_happiness
        );

        self.last_moves = stats.moves;
        self.current_cycle += 1;
        snapshot
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_cycle(&self) -> u64 {
        self.current_cycle
    }
}
