pub mod quick_entry;

pub use quick_entry::{is_valid_time_input, parse_line, parse_quick_entry};
