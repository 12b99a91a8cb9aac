use serde::{Deserialize, Serialize};

/// How subtitle timestamps are rendered.
///
/// `Duration` prints a duration value: `H:MM:SS`, with `.ffffff` microseconds
/// appended only when the fractional part is non-zero (`0:00:02`,
/// `0:00:01.500000`). Hours are unpadded and never wrap into days.
///
/// `Srt` prints standard SubRip timestamps: `HH:MM:SS,mmm`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampStyle {
    #[default]
    Duration,
    Srt,
}

impl TimestampStyle {
    pub fn format(&self, seconds: f64) -> String {
        match self {
            TimestampStyle::Duration => format_timestamp(seconds),
            TimestampStyle::Srt => format_srt_timestamp(seconds),
        }
    }
}

/// Negative and non-finite inputs clamp to zero.
fn scaled(seconds: f64, units_per_second: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * units_per_second).round() as u64
}

/// Format seconds as a duration, `H:MM:SS[.ffffff]`
pub fn format_timestamp(seconds: f64) -> String {
    let micros = scaled(seconds, 1_000_000.0);
    let total_secs = micros / 1_000_000;
    let frac = micros % 1_000_000;

    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if frac == 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}:{:02}.{:06}", hours, mins, secs, frac)
    }
}

/// Format seconds as a SubRip timestamp, `HH:MM:SS,mmm`
pub fn format_srt_timestamp(seconds: f64) -> String {
    let millis = scaled(seconds, 1_000.0);
    let total_secs = millis / 1_000;

    format!(
        "{:02}:{:02}:{:02},{:03}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60,
        millis % 1_000
    )
}
