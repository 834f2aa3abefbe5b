mod lesson;
mod schedule;
mod schedule_row;

pub use schedule::Schedule;
#[cfg(test)]
pub use {lesson::Lesson, schedule::Day};

#[cfg(test)]
pub(crate) use schedule::fixtures;
