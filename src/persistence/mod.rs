pub mod error;
pub mod files;
pub mod log_file;
pub mod parser;
pub mod serializer;
pub mod settings;

pub use error::{StoreError, StoreResult};
pub use files::{
    atomic_write, ensure_dir, list_log_dates, read_file, resolve_root, unique_path, write_new_file,
    LINE_ENDING,
};
pub use log_file::{read_log_file, write_log_file};
pub use parser::parse_log_file;
pub use serializer::serialize_log_file;
pub use settings::{load_settings, save_settings, Settings, SETTINGS_FILE};
