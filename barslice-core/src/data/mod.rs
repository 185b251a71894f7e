//! Data access: CSV loading and the data directory.

pub mod dataset_dir;
pub mod loader;

pub use dataset_dir::{ensure_data_dir, list_csv_files, open_in_file_manager, DirError, DirListing};
pub use loader::{load_table, load_table_from_reader, parse_timestamp, DataFormatError};
