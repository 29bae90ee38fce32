//! # Physio-Core
//!
//! Core types and utilities for the physiotherapy form analysis and
//! progress tracking engine.
//!
//! - **types**: keypoints, poses, body parts and exercises
//! - **geometry**: joint angles and spine alignment over 2D keypoints
//! - **random**: injectable randomness for score jitter
//! - **clock**: injectable wall clock for session timestamps and streaks

pub mod clock;
pub mod error;
pub mod geometry;
pub mod random;
pub mod types;

pub use clock::*;
pub use error::{Error, Result};
pub use geometry::*;
pub use random::*;
pub use types::*;
