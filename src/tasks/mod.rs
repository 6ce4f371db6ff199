//! Background tasks module
//!
//! This module contains the tasks that run alongside the HTTP server: the
//! tick sources, the driver feeding ticks into the controller and the
//! system volume monitor.

pub mod countdown_driver;
pub mod interval_ticks;
pub mod volume_monitor;

// Re-export main items
pub use countdown_driver::countdown_driver_task;
pub use interval_ticks::IntervalTickScheduler;
pub use volume_monitor::{monitor_volume, volume_monitor_task, VOLUME_POLL_INTERVAL};
