pub mod daily_log;
pub mod enums;
pub mod hours;
pub mod task;

pub use daily_log::{file_name_for, DailyLog};
pub use enums::{MonthChoice, SummaryKind};
pub use hours::{format_hours, parse_hours};
pub use task::{TaskEntry, DEFAULT_ACCOUNT};
