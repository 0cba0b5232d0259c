//! Daily task log: quick-entry parsing, one CSV file per day, and weekly/account summaries.

pub mod app;
pub mod domain;
pub mod input;
pub mod logbook;
pub mod persistence;
pub mod report;

pub use app::{AddOutcome, LogSession};
pub use domain::{DailyLog, MonthChoice, SummaryKind, TaskEntry};
pub use input::parse_quick_entry;
pub use logbook::Logbook;
pub use persistence::{Settings, StoreError};
