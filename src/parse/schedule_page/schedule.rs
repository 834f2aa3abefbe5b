use scraper::{ElementRef, Html};
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::lesson::Lesson;
use super::schedule_row::ScheduleRow;
use crate::parse::error::{Error, Result};
use crate::parse::row_cells::stripped_strings;
use crate::static_selector;

static_selector!(TABLE_SELECTOR <- "table.schedule-table");
static_selector!(ROW_SELECTOR <- "tr");

/// Lessons grouped under the day label that precedes them in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Day {
    label: String,
    lessons: Vec<Lesson>,
}

#[cfg(test)]
impl Day {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }
}

/// The timetable, keyed by day label in the order the days appear.
///
/// Serializes as a JSON object whose keys keep table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    days: Vec<Day>,
}

impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for day in &self.days {
            map.serialize_entry(&day.label, &day.lessons)?;
        }
        map.end()
    }
}

impl Schedule {
    /// Parses the schedule page. `Ok(None)` means the page has no schedule table.
    pub fn from_html(html: &str) -> Result<Option<Self>> {
        let document = Html::parse_document(html);
        Self::from_html_element(document.root_element())
    }

    pub fn from_html_element(element: ElementRef) -> Result<Option<Self>> {
        let Some(table) = element.select(&TABLE_SELECTOR).next() else {
            return Ok(None);
        };

        // the first row is the column header
        let rows = table
            .select(&ROW_SELECTOR)
            .skip(1)
            .map(|row| stripped_strings(row).collect::<Vec<_>>());

        Self::from_rows(rows).map(Some)
    }

    /// Groups already extracted data rows. Rows are numbered from 1 in errors,
    /// the header being row 0.
    pub fn from_rows<'a, I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<&'a str>>,
    {
        let mut schedule = Self::default();
        let mut current_day = None;
        for (index, cells) in rows.into_iter().enumerate() {
            let row = index + 1;
            match ScheduleRow::from_cells(&cells, row)? {
                ScheduleRow::NewDay { label, lesson } => {
                    let day = schedule.day_index(label);
                    schedule.days[day].lessons.push(lesson);
                    current_day = Some(day);
                }
                ScheduleRow::Continuation(lesson) => {
                    let day = current_day.ok_or_else(|| Error::missing_day_label(row))?;
                    schedule.days[day].lessons.push(lesson);
                }
            }
        }
        Ok(schedule)
    }

    /// Index of the day with `label`, appending an empty one if it is new.
    fn day_index(&mut self, label: &str) -> usize {
        if let Some(index) = self.days.iter().position(|day| day.label == label) {
            return index;
        }
        self.days.push(Day {
            label: label.to_owned(),
            lessons: Vec::new(),
        });
        self.days.len() - 1
    }

    #[cfg(test)]
    pub fn days(&self) -> impl Iterator<Item = &Day> {
        self.days.iter()
    }

    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<&[Lesson]> {
        self.days
            .iter()
            .find(|day| day.label == label)
            .map(Day::lessons)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
