//! Data structures for entries, the on-disk database, and settings.

pub mod db_file;
pub mod entry;
pub mod settings;
