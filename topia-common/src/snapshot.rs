use std::fmt::Write;

use crate::config::SimulationConfig;
use crate::grid::Grid;

/// One displayed cycle: the board as it stood and the figures shown with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Index of the cycle, starting at 0.
    pub cycle: u64,
    /// Moves made by the previous cycle, which produced this board.
    pub moves: usize,
    /// Mean happiness of this board's occupied cells.
    pub mean_happiness: f32,
    pub grid: Grid,
}

impl Snapshot {
    /// Frame text: the board followed by the status block.
    pub fn render(&self, config: &SimulationConfig) -> String {
        let mut out = self.grid.to_string();
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "cycle: {}\nmoves this cycle: {}\nteams' \"happiness\": {:.6}\n{}\nUse Control-C to quit.\n",
            self.cycle, self.moves, self.mean_happiness, config
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_layout() {
        let config = SimulationConfig::default().with_dimension(5).unwrap();
        let snapshot = Snapshot {
            cycle: 3,
            moves: 2,
            mean_happiness: 0.5,
            grid: "ee...\nnn...\n.....\n.....\n.....".parse().unwrap(),
        };
        assert_eq!(
            snapshot.render(&config),
            "ee...\nnn...\n.....\n.....\n.....\n\
             cycle: 3\n\
             moves this cycle: 2\n\
             teams' \"happiness\": 0.500000\n\
             dim: 5, %strength of preference:  50%, %vacancy:  20%, %end:  60%\n\
             Use Control-C to quit.\n"
        );
    }
}
