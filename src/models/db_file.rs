//! On-disk database model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The serialized shape of the database: two string maps sharing one key
/// set. `db1` is keyword → secret, `db2` is keyword → RFC 3339 timestamp.
/// The split exists only on disk; in memory the store holds one ordered
/// list of entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DbFile {
    #[serde(default)]
    pub db1: BTreeMap<String, String>,
    #[serde(default)]
    pub db2: BTreeMap<String, String>,
}
