pub mod cell;
pub mod config;
pub mod cycle;
pub mod error;
pub mod grid;
pub mod happiness;
pub mod resolver;
pub mod rng;
pub mod snapshot;

// Re-export key types for easier use by dependent crates
pub use cell::Cell;
pub use config::{Population, RunMode, SimulationConfig};
pub use cycle::{CycleRunner, CycleStats};
pub use error::{TopiaError, TopiaResult};
pub use grid::{Grid, Position};
pub use happiness::{happiness, mean_happiness};
pub use resolver::{relocate, resolve, ScanCursor};
pub use rng::GlibcRandom;
pub use snapshot::Snapshot;
