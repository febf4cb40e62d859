//! Scheduling primitives: recurrence intervals and the simulation window.

pub mod interval;
pub mod window;

pub use interval::{biweekly_dates, Interval, Schedule};
pub use window::DateWindow;
