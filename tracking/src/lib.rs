//! # Tracking
//!
//! In-memory store for positional tracking data of one session: one row per
//! tracked entity per sampled instant, carrying time (s), pitch coordinates (m)
//! and the instantaneous speed reported by the tracker (m/s).
//!
//! Rows are validated once at ingestion and split into the ball series and one
//! series per player, each sorted by time. Everything downstream works on
//! these series and never mutates them.

mod dataset;
mod error;
mod models;
mod pitch;

pub use dataset::*;
pub use error::*;
pub use models::*;
pub use pitch::*;
