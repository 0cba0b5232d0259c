pub mod generator;
pub mod stats;

pub use generator::{generate_account_summary, generate_weekly_summary};
pub use stats::{group_by_account, group_by_day, total_hours, AccountGroup, DayGroup};
