//! # Physio-Form
//!
//! Pose-based exercise form scoring.
//!
//! ## Scoring
//!
//! Each body part has an [`Analyzer`] that starts from a fixed base score and
//! deducts points for every failed geometric check:
//!
//! - **Neck** (85): head angle within 15° of 90° (-10), shoulders level (-5)
//! - **Shoulders** (80): elbow angles within 20° of each other (-15),
//!   both elbows open past 45° (-10)
//! - **Back** (82): spine alignment ratio ≥ 0.8 (-12), hips level (-8)
//! - **Hips, knees, ankles, wrists, core** (85): praise only
//!
//! The deterministic [`FormAssessment`] is then jittered by an injected
//! [`physio_core::RandomSource`] into the final [`AnalysisResult`].

pub mod analysis;
pub mod analyzer;
pub mod back;
pub mod coaching;
pub mod exercises;
pub mod general;
pub mod neck;
pub mod shoulders;
pub mod simulation;

pub use analysis::*;
pub use analyzer::*;
pub use coaching::*;
pub use simulation::*;
