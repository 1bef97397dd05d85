use std::fmt;

use crate::error::TopiaError;

/// Contents of one grid position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Vacant,
    /// Agents that want their braces on a new line (`n`).
    Newline,
    /// Agents that want their braces at the end of the line (`e`).
    Endline,
}

impl Cell {
    #[inline(always)]
    pub fn is_occupied(self) -> bool {
        self != Cell::Vacant
    }

    /// Character used when rendering the grid.
    #[inline(always)]
    pub fn symbol(self) -> char {
        match self {
            Cell::Vacant => '.',
            Cell::Newline => 'n',
            Cell::Endline => 'e',
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Cell {
    type Error = TopiaError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '.' => Ok(Cell::Vacant),
            'n' => Ok(Cell::Newline),
            'e' => Ok(Cell::Endline),
            other => Err(TopiaError::UnknownCell(other)),
        }
    }
}
