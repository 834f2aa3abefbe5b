//! Everything that knows the portal's HTML layout lives here.
mod error;
mod login_page;
mod row_cells;
mod schedule_page;
mod static_selector;

pub use error::Error;
pub use login_page::is_login_page;
pub use schedule_page::Schedule;
#[cfg(test)]
pub use schedule_page::{Day, Lesson};
