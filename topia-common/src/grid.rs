use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use log::debug;
use rand::RngCore;

use crate::cell::Cell;
use crate::config::{Population, SimulationConfig};
use crate::error::{TopiaError, TopiaResult};

/// Row/column coordinate. Ordering is row-major scan order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[inline(always)]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offset into a row-major buffer of width `dim`.
    #[inline(always)]
    pub fn index(self, dim: usize) -> usize {
        self.row * dim + self.col
    }
}

/// Square board of cells stored row-major in one contiguous buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    dim: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Lays out `population` in scan order: vacancies, then endlines, then
    /// newlines. The population must cover exactly `dim * dim` cells.
    pub fn filled(dim: usize, population: Population) -> TopiaResult<Self> {
        let len = dim * dim;
        debug_assert_eq!(population.total(), len);

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| TopiaError::Allocation)?;
        cells.extend(std::iter::repeat(Cell::Vacant).take(population.vacant));
        cells.extend(std::iter::repeat(Cell::Endline).take(population.endline));
        cells.extend(std::iter::repeat(Cell::Newline).take(population.newline));

        Ok(Self { dim, cells })
    }

    /// Builds the starting board for `config` and scatters it with `rng`.
    pub fn populate<R: RngCore>(config: &SimulationConfig, rng: &mut R) -> TopiaResult<Self> {
        let population = config.population();
        debug!(
            "Populating {0}x{0} grid: {1} vacant, {2} endline, {3} newline",
            config.dimension(),
            population.vacant,
            population.endline,
            population.newline
        );
        let mut grid = Self::filled(config.dimension(), population)?;
        grid.scatter(rng);
        Ok(grid)
    }

    /// Visits cells in scan order and swaps each with a cell drawn uniformly
    /// from the whole board (itself included), row drawn before column.
    ///
    /// This is swap-with-replacement, not a Fisher-Yates shuffle, so some
    /// arrangements are more likely than others. The bias is intentional:
    /// reproducing it is what keeps seeded runs identical to earlier output.
    fn scatter<R: RngCore>(&mut self, rng: &mut R) {
        let dim = self.dim;
        for index in 0..self.cells.len() {
            let row = rng.next_u32() as usize % dim;
            let col = rng.next_u32() as usize % dim;
            self.cells.swap(index, Position::new(row, col).index(dim));
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if pos.row < self.dim && pos.col < self.dim {
            Some(self.cells[pos.index(self.dim)])
        } else {
            None
        }
    }

    /// All positions in scan order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let dim = self.dim;
        (0..dim).flat_map(move |row| (0..dim).map(move |col| Position::new(row, col)))
    }

    /// `(position, cell)` pairs in scan order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.positions().zip(self.cells.iter().copied())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks() rejects a zero size; an empty board has no rows anyway.
        self.cells.chunks(self.dim.max(1))
    }

    /// Current count of each cell kind.
    pub fn population(&self) -> Population {
        self.cells.iter().fold(Population::default(), |mut pop, cell| {
            match cell {
                Cell::Vacant => pop.vacant += 1,
                Cell::Endline => pop.endline += 1,
                Cell::Newline => pop.newline += 1,
            }
            pop
        })
    }

    /// Calls `f` for each of the up to eight cells around `pos`. Positions
    /// off the board are skipped; there is no wraparound.
    #[inline(always)]
    pub fn for_each_neighbor<F>(&self, pos: Position, mut f: F)
    where
        F: FnMut(Cell),
    {
        let dim = self.dim as isize;
        let (row, col) = (pos.row as isize, pos.col as isize);

        for dy in -1..=1 {
            for dx in -1..=1 {
                if dy == 0 && dx == 0 {
                    continue;
                }
                let check_row = row + dy;
                let check_col = col + dx;
                if check_row >= 0 && check_row < dim && check_col >= 0 && check_col < dim {
                    f(self.cells[(check_row * dim + check_col) as usize]);
                }
            }
        }
    }
}

impl Index<Position> for Grid {
    type Output = Cell;

    fn index(&self, pos: Position) -> &Cell {
        assert!(pos.col < self.dim, "column {} out of range for dim {}", pos.col, self.dim);
        &self.cells[pos.index(self.dim)]
    }
}

impl IndexMut<Position> for Grid {
    fn index_mut(&mut self, pos: Position) -> &mut Cell {
        assert!(pos.col < self.dim, "column {} out of range for dim {}", pos.col, self.dim);
        let dim = self.dim;
        &mut self.cells[pos.index(dim)]
    }
}

impl fmt::Display for Grid {
    /// One line of `dim` symbols per row, each terminated by a newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dim == 0 {
            return Ok(());
        }
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = TopiaError;

    /// Parses the rendered form back into a grid. Blank lines and
    /// surrounding whitespace are ignored; the board must be square.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let dim = rows.len();

        let mut cells = Vec::with_capacity(dim * dim);
        for (row, line) in rows.iter().enumerate() {
            let before = cells.len();
            for c in line.chars() {
                cells.push(Cell::try_from(c)?);
            }
            let got = cells.len() - before;
            if got != dim {
                return Err(TopiaError::RaggedRow { row, got, expected: dim });
            }
        }

        Ok(Self { dim, cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GlibcRandom;

    fn small_config() -> SimulationConfig {
        SimulationConfig::default().with_dimension(5).unwrap()
    }

    #[test]
    fn filled_is_in_scan_order() {
        let pop = Population { vacant: 2, endline: 1, newline: 1 };
        let grid = Grid::filled(2, pop).unwrap();
        assert_eq!(grid.to_string(), "..\nen\n");
    }

    #[test]
    fn populate_keeps_counts() {
        let config = small_config();
        let grid = Grid::populate(&config, &mut GlibcRandom::seeded()).unwrap();
        assert_eq!(grid.dim(), 5);
        assert_eq!(
            grid.population(),
            Population { vacant: 5, endline: 12, newline: 8 }
        );
    }

    #[test]
    fn populate_is_reproducible() {
        let config = SimulationConfig::default();
        let a = Grid::populate(&config, &mut GlibcRandom::seeded()).unwrap();
        let b = Grid::populate(&config, &mut GlibcRandom::seeded()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn scatter_draws_row_then_column() {
        // With a 2x2 board the draws map straight onto swap targets, so
        // replaying them by hand must give the same board.
        let pop = Population { vacant: 1, endline: 2, newline: 1 };
        let mut grid = Grid::filled(2, pop).unwrap();
        grid.scatter(&mut GlibcRandom::new(7));

        let mut expected = vec![Cell::Vacant, Cell::Endline, Cell::Endline, Cell::Newline];
        let mut rng = GlibcRandom::new(7);
        for i in 0..4 {
            let row = rng.next_u32() as usize % 2;
            let col = rng.next_u32() as usize % 2;
            expected.swap(i, row * 2 + col);
        }
        assert_eq!(grid.cells, expected);
    }

    #[test]
    fn get_is_bounds_checked() {
        let grid: Grid = "en\n.e".parse().unwrap();
        assert_eq!(grid.get(Position::new(1, 0)), Some(Cell::Vacant));
        assert_eq!(grid.get(Position::new(0, 2)), None);
        assert_eq!(grid.get(Position::new(2, 0)), None);
    }

    #[test]
    fn corner_has_three_neighbors() {
        let grid: Grid = "...\n...\n...".parse().unwrap();
        let mut seen = 0;
        grid.for_each_neighbor(Position::new(0, 0), |_| seen += 1);
        assert_eq!(seen, 3);

        let mut seen = 0;
        grid.for_each_neighbor(Position::new(1, 1), |_| seen += 1);
        assert_eq!(seen, 8);

        let mut seen = 0;
        grid.for_each_neighbor(Position::new(2, 1), |_| seen += 1);
        assert_eq!(seen, 5);
    }

    #[test]
    fn parse_rejects_ragged_board() {
        let err = "..\n...".parse::<Grid>().unwrap_err();
        assert_eq!(err, TopiaError::RaggedRow { row: 1, got: 3, expected: 2 });
    }

    #[test]
    fn display_roundtrips_through_parse() {
        let text = "e.n\nnne\n..e\n";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn positions_are_row_major() {
        let grid: Grid = "..\n..".parse().unwrap();
        let order: Vec<_> = grid.positions().collect();
        assert_eq!(
            order,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1)
            ]
        );
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }
}
