//! # Physio-Progress
//!
//! Session history, practice streaks and achievements.
//!
//! ## Recording a session
//!
//! [`ProgressTracker::add_session`] runs as one logical transaction:
//!
//! 1. **Append**: the session joins the log with a fresh id and timestamp
//! 2. **Streak**: compared against the session recorded just before it
//! 3. **Achievements**: locked catalog entries whose predicate now holds unlock
//! 4. **Persist**: the complete state is written to the [`ProgressBackend`]
//!
//! Persistence failures are reported through [`ProgressError::NotSaved`]
//! while the in-memory state stays current.

pub mod achievements;
pub mod biometrics;
pub mod config;
pub mod error;
pub mod persistence;
pub mod session;
pub mod streak;
pub mod tracker;

pub use achievements::*;
pub use biometrics::*;
pub use config::*;
pub use error::*;
pub use persistence::*;
pub use session::*;
pub use streak::*;
pub use tracker::*;
