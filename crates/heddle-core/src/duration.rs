//! Human-readable elapsed times for the timing lines.

use std::time::Duration;

const SECOND: u128 = 1000;
const MINUTE: u128 = 60 * SECOND;
const HOUR: u128 = 60 * MINUTE;
const DAY: u128 = 24 * HOUR;

/// Format a duration as the largest fitting unit, rounded: `250ms`, `2s`,
/// `3m`, `1h`, `2d`. Sub-second durations stay in whole milliseconds.
pub fn format_duration(duration: Duration) -> String {
    let ms = duration.as_millis();
    if ms >= DAY {
        format!("{}d", round_div(ms, DAY))
    } else if ms >= HOUR {
        format!("{}h", round_div(ms, HOUR))
    } else if ms >= MINUTE {
        format!("{}m", round_div(ms, MINUTE))
    } else if ms >= SECOND {
        format!("{}s", round_div(ms, SECOND))
    } else {
        format!("{ms}ms")
    }
}

/// Integer division rounded half away from zero.
fn round_div(value: u128, unit: u128) -> u128 {
    (value + unit / 2) / unit
}
