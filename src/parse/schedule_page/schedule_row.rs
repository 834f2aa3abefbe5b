use super::lesson::{Lesson, LESSON_CELLS};
use crate::parse::error::{Error, Result};
use crate::parse::row_cells::is_numeric;

/// A data row of the schedule table, classified by its first cell.
///
/// Rows whose first cell is a bare number continue the current day; any other
/// first cell is the label of a new day and the lesson follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleRow<'a> {
    NewDay { label: &'a str, lesson: Lesson },
    Continuation(Lesson),
}

impl<'a> ScheduleRow<'a> {
    /// `row` is only used to locate the row in error messages.
    pub fn from_cells(cells: &[&'a str], row: usize) -> Result<Self> {
        let Some(&first) = cells.first() else {
            return Err(Error::empty_row(row));
        };

        if is_numeric(first) {
            Lesson::from_cells(cells)
                .map(Self::Continuation)
                .ok_or_else(|| Error::missing_cells(row, LESSON_CELLS, cells.len()))
        } else {
            Lesson::from_cells(&cells[1..])
                .map(|lesson| Self::NewDay {
                    label: first,
                    lesson,
                })
                .ok_or_else(|| Error::missing_cells(row, LESSON_CELLS + 1, cells.len()))
        }
    }
}
