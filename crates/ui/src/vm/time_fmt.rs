pub use exam_core::model::format_clock;

/// Header countdown label, e.g. "Time Left: 149:59".
#[must_use]
pub fn timer_label(remaining_seconds: i64) -> String {
    format!("Time Left: {}", format_clock(remaining_seconds))
}
