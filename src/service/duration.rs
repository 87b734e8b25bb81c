use chrono::Duration;

/// Renders a stay duration as `X時間Y分Z秒`.
///
/// Zero components are omitted, except that a zero duration renders as `0秒` so the
/// result is never empty. Sub-second precision is truncated and negative input is
/// treated as zero.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    let mut formatted = String::new();
    if hours > 0 {
        formatted.push_str(&format!("{hours}時間"));
    }
    if minutes > 0 {
        formatted.push_str(&format!("{minutes}分"));
    }
    if seconds > 0 || formatted.is_empty() {
        formatted.push_str(&format!("{seconds}秒"));
    }

    formatted
}
