use std::fmt::Display;

/// Ways a schedule table can fail to map onto day groups.
///
/// `row` is the position of the offending `tr` inside the table, counting the
/// header as row 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A lesson row showed up before any row carrying a day label.
    MissingDayLabel { row: usize },
    /// The row had no text at all.
    EmptyRow { row: usize },
    MissingCells {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl Error {
    pub const fn missing_day_label(row: usize) -> Self {
        Self::MissingDayLabel { row }
    }

    pub const fn empty_row(row: usize) -> Self {
        Self::EmptyRow { row }
    }

    pub const fn missing_cells(row: usize, expected: usize, found: usize) -> Self {
        Self::MissingCells {
            row,
            expected,
            found,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDayLabel { row } => write!(
                f,
                "Malformed schedule: table row {row} continues a day but no day label precedes it"
            ),
            Self::EmptyRow { row } => write!(f, "Malformed schedule: table row {row} is empty"),
            Self::MissingCells {
                row,
                expected,
                found,
            } => write!(
                f,
                "Malformed schedule: table row {row} has {found} cells, expected at least {expected}"
            ),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
