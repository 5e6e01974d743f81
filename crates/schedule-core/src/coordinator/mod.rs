//! Scheduling coordinator
//!
//! The coordinator is the only writer that crosses component boundaries.
//! Every compound operation runs all of its checks before the first
//! write, and writes in a fixed order (catalog roster before calendar
//! booking; for cancellation, calendars before catalog) so a reader can
//! reason about partially observed state.

mod audit;
mod coordinator;
mod ops;

pub use coordinator::ScheduleCoordinator;
