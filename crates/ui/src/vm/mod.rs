mod attempt_vm;
mod chart_vm;
mod time_fmt;

pub use attempt_vm::{AttemptIntent, AttemptVm, StatusCounts, status_class, status_label};
pub use chart_vm::{DonutSlice, donut_slices};
pub use time_fmt::{format_clock, timer_label};
