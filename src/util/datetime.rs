//! Human-readable timestamps for table output.

use chrono::{DateTime, Local, Utc};

/// Format a stored timestamp in local time the way the tables show it,
/// e.g. "on 2 Dec 2024 at 5:30:12 PM".
pub fn format_last_updated(updated_at: DateTime<Utc>) -> String {
    format_local(updated_at.with_timezone(&Local))
}

fn format_local(dt: DateTime<Local>) -> String {
    dt.format("on %-d %b %Y at %-I:%M:%S %p").to_string()
}
