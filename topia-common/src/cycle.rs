use log::debug;

use crate::config::SimulationConfig;
use crate::grid::Grid;
use crate::happiness::mean_happiness;
use crate::resolver::{resolve, ScanCursor};

/// Aggregate figures for one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CycleStats {
    /// Agents relocated by the cycle.
    pub moves: usize,
    /// Mean happiness of the board the cycle started from.
    pub mean_happiness: f32,
}

/// Advances a board one cycle at a time.
#[derive(Debug, Clone)]
pub struct CycleRunner {
    threshold: f32,
    cursor: ScanCursor,
}

impl CycleRunner {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            threshold: config.threshold(),
            cursor: ScanCursor::new(),
        }
    }

    /// Runs one evaluate/resolve pass over `grid` and returns the board that
    /// replaces it. `grid` itself is left untouched.
    pub fn step(&mut self, grid: &Grid) -> (Grid, CycleStats) {
        self.cursor.reset();

        let mut next = grid.clone();
        let moves = resolve(grid, &mut next, &mut self.cursor, self.threshold);
        let stats = CycleStats {
            moves,
            mean_happiness: mean_happiness(grid),
        };
        debug!("Cycle resolved: {} moves, mean happiness {:.6}", stats.moves, stats.mean_happiness);

        (next, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GlibcRandom;

    #[test]
    fn step_reports_moves_and_prior_happiness() {
        let config = SimulationConfig::default().with_dimension(5).unwrap();
        let grid: Grid = "eeeee\neneee\neeeee\neeeee\n.....".parse().unwrap();
        let before = mean_happiness(&grid);

        let mut runner = CycleRunner::new(&config);
        let (next, stats) = runner.step(&grid);
        assert_eq!(stats.moves, 1);
        assert_eq!(stats.mean_happiness, before);
        assert_eq!(next.to_string(), "eeeee\ne.eee\neeeee\neeeee\nn....\n");
        assert_eq!(grid.to_string(), "eeeee\neneee\neeeee\neeeee\n.....\n");
    }

    #[test]
    fn cursor_resets_between_cycles() {
        let config = SimulationConfig::default().with_dimension(5).unwrap();
        let mut runner = CycleRunner::new(&config);
        let mut grid = Grid::populate(&config, &mut GlibcRandom::seeded()).unwrap();
        let start = grid.population();
        for _ in 0..10 {
            let (next, _) = runner.step(&grid);
            assert_eq!(next.population(), start);
            grid = next;
        }
    }

    #[test]
    fn seeded_smallest_board_first_cycle() {
        let config = SimulationConfig::default().with_dimension(5).unwrap();
        let grid = Grid::populate(&config, &mut GlibcRandom::seeded()).unwrap();
        assert_eq!(grid.to_string(), "..nee\nnen..\neeenn\nennne\ne.eee\n");

        let mut runner = CycleRunner::new(&config);
        let (next, stats) = runner.step(&grid);
        assert_eq!(stats.moves, 5);
        assert_eq!(format!("{:.6}", stats.mean_happiness), "0.466607");
        assert_eq!(next.to_string(), "ne..e\n.e.nn\nee.nn\nennne\neeeee\n");
    }

    #[test]
    fn weak_preference_barely_moves() {
        let config = SimulationConfig::default()
            .with_dimension(5)
            .and_then(|c| c.with_strength(1))
            .unwrap();
        let grid = Grid::populate(&config, &mut GlibcRandom::seeded()).unwrap();
        let mut runner = CycleRunner::new(&config);
        let (next, stats) = runner.step(&grid);
        // Only the n at (1,0), with no n among its neighbours, is below 1%.
        assert_eq!(stats.moves, 1);
        assert_eq!(next.to_string(), "n.nee\n.en..\neeenn\nennne\ne.eee\n");
    }
}
