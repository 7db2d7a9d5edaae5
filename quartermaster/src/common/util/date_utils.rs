use chrono::Utc;

/// Returns the current time in milliseconds since the Unix epoch.
#[inline]
pub fn current_time_millis() -> i64 {
    Utc::now().timestamp_millis()
}
