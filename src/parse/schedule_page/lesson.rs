use serde::Serialize;

/// Number of cells a lesson occupies in a table row.
pub const LESSON_CELLS: usize = 3;

/// One slot of the timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lesson {
    row: String,
    time: String,
    name: String,
}

impl Lesson {
    pub fn new(row: impl Into<String>, time: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            row: row.into(),
            time: time.into(),
            name: name.into(),
        }
    }

    /// Builds a lesson from the first three cells; `None` if there are fewer.
    pub fn from_cells(cells: &[&str]) -> Option<Self> {
        match cells {
            [row, time, name, ..] => Some(Self::new(*row, *time, *name)),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn row(&self) -> &str {
        &self.row
    }

    #[cfg(test)]
    pub fn time(&self) -> &str {
        &self.time
    }

    #[cfg(test)]
    pub fn name(&self) -> &str {
        &self.name
    }
}
