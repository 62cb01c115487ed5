use chrono::{DateTime, Utc};

/// One stored credential: a unique keyword, its secret, and the wall-clock
/// time of the last insert or update.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub keyword: String,
    pub secret: String,
    pub updated_at: DateTime<Utc>,
}
