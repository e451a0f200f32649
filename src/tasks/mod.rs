//! Background Tasks Module
//!
//! Contains background tasks owned by long-lived components.
//!
//! # Tasks
//! - Expiry sweep: Removes expired cache entries at a fixed interval

mod sweep;

pub use sweep::{spawn_sweep_task, SweepTask};
