use thiserror::Error;

/// Errors raised while configuring or building a simulation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopiaError {
    #[error("dimension ({0}) must be a value in [5...39]")]
    Dimension(i64),

    #[error("preference strength ({0}) must be a value in [1...99]")]
    Strength(i64),

    #[error("vacancy ({0}) must be a value in [1...99]")]
    Vacancy(i64),

    #[error("endline proportion ({0}) must be a value in [1...99]")]
    Endline(i64),

    #[error("count ({0}) must be a non-negative integer.")]
    NegativeCount(i64),

    #[error("Error: memory allocation failed")]
    Allocation,

    #[error("grid row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row:      usize,
        got:      usize,
        expected: usize,
    },

    #[error("unrecognised cell character {0:?}")]
    UnknownCell(char),
}

impl TopiaError {
    /// True for errors caused by a parameter outside its valid range.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            TopiaError::Dimension(_)
                | TopiaError::Strength(_)
                | TopiaError::Vacancy(_)
                | TopiaError::Endline(_)
                | TopiaError::NegativeCount(_)
        )
    }
}

/// Shorthand result type for the simulation core.
pub type TopiaResult<T> = Result<T, TopiaError>;
