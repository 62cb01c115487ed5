//! Centralized constants for file names, keywords, and generation limits.

/// File name of the JSON database.
pub const DB_FILE_NAME: &str = "passwords.json";

/// File name of the optional settings file, kept next to the database.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Directory under the platform data dir that holds the database.
pub const APP_DIR_NAME: &str = "passkeep";

/// The wildcard selector for `show`/`remove`, and therefore forbidden as a
/// real keyword (in any case variant).
pub const RESERVED_KEYWORD: &str = "all";

/// Minimum length for a generated password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum length for a generated password.
pub const MAX_PASSWORD_LENGTH: usize = 32;

/// Generated-password length when neither `--length` nor settings say otherwise.
pub const DEFAULT_PASSWORD_LENGTH: usize = 16;

/// Maximum secret size in bytes (1 MiB).
pub const MAX_SECRET_SIZE: usize = 1_048_576;

/// Permission mode for the database file.
pub const DB_FILE_MODE: u32 = 0o600;
