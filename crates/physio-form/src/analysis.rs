//! Form assessment results.
//!
//! Scoring is split in two stages:
//!
//! 1. [`FormAssessment`] - deterministic: base score, failed checks, coaching
//! 2. [`AnalysisResult`] - final: assessment plus a bounded random jitter,
//!    clamped to `[0, 100]`

use physio_core::RandomSource;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_SCORE: f64 = 85.0;
pub const DEFAULT_FEEDBACK: &str = "Good form!";
pub const DEFAULT_KEY_POINTS: [&str; 2] = [
    "Maintain steady breathing",
    "Focus on quality over quantity",
];

/// Final per-frame analysis consumed by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Form score in [0, 100]
    pub score: f64,
    /// Corrections in check order, or a single praise line
    pub feedback: Vec<String>,
    /// Fixed coaching reminders for the body part
    pub key_points: Vec<String>,
}

/// A geometric form check that can fail and cost points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormCheck {
    HeadCentered,
    ShouldersLevel,
    ArmSymmetry,
    RangeOfMotion,
    NeutralSpine,
    HipsLevel,
}

impl FormCheck {
    pub fn deduction(&self) -> f64 {
        match self {
            FormCheck::HeadCentered => 10.0,
            FormCheck::ShouldersLevel => 5.0,
            FormCheck::ArmSymmetry => 15.0,
            FormCheck::RangeOfMotion => 10.0,
            FormCheck::NeutralSpine => 12.0,
            FormCheck::HipsLevel => 8.0,
        }
    }

    pub fn feedback(&self) -> &'static str {
        match self {
            FormCheck::HeadCentered => "Keep your head centered between your shoulders",
            FormCheck::ShouldersLevel => "Keep your shoulders level",
            FormCheck::ArmSymmetry => "Keep both arms moving symmetrically",
            FormCheck::RangeOfMotion => "Increase your range of motion",
            FormCheck::NeutralSpine => "Focus on maintaining neutral spine",
            FormCheck::HipsLevel => "Keep your hips level",
        }
    }
}

/// Random score adjustment drawn uniformly from `[offset, offset + span)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Jitter {
    pub offset: f64,
    pub span: f64,
}

impl Jitter {
    pub const fn new(offset: f64, span: f64) -> Self {
        Self { offset, span }
    }

    pub const fn none() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Maps a uniform sample in [0, 1) onto the jitter range
    pub fn apply(&self, sample: f64) -> f64 {
        self.offset + sample * self.span
    }
}

/// Deterministic portion of a form analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormAssessment {
    pub base_score: f64,
    /// Failed checks in evaluation order
    pub failed_checks: Vec<FormCheck>,
    /// Feedback used when every check passes
    pub praise: String,
    pub key_points: Vec<String>,
    pub jitter: Jitter,
}

impl FormAssessment {
    pub fn new(base_score: f64, praise: impl Into<String>, key_points: [&str; 2], jitter: Jitter) -> Self {
        Self {
            base_score,
            failed_checks: Vec::new(),
            praise: praise.into(),
            key_points: key_points.iter().map(|s| s.to_string()).collect(),
            jitter,
        }
    }

    /// Neutral analysis used for unmapped body parts and missing poses
    pub fn default_analysis() -> Self {
        Self::praise_only(DEFAULT_FEEDBACK)
    }

    /// Neutral analysis with a custom feedback line
    pub fn praise_only(message: impl Into<String>) -> Self {
        Self::new(
            DEFAULT_BASE_SCORE,
            message,
            DEFAULT_KEY_POINTS,
            Jitter::new(0.0, 10.0),
        )
    }

    pub fn fail(&mut self, check: FormCheck) {
        self.failed_checks.push(check);
    }

    pub fn passed(&self) -> bool {
        self.failed_checks.is_empty()
    }

    /// Base score minus every failed check's deduction
    pub fn deterministic_score(&self) -> f64 {
        let deductions: f64 = self.failed_checks.iter().map(FormCheck::deduction).sum();
        self.base_score - deductions
    }

    /// Lowest and highest final score this assessment can produce
    pub fn score_bounds(&self) -> (f64, f64) {
        let score = self.deterministic_score();
        (
            (score + self.jitter.offset).clamp(0.0, 100.0),
            (score + self.jitter.offset + self.jitter.span).clamp(0.0, 100.0),
        )
    }

    pub fn feedback(&self) -> Vec<String> {
        if self.passed() {
            vec![self.praise.clone()]
        } else {
            self.failed_checks
                .iter()
                .map(|check| check.feedback().to_string())
                .collect()
        }
    }

    /// Applies one jitter sample and clamps into [0, 100]
    pub fn finalize<R: RandomSource + ?Sized>(&self, rng: &R) -> AnalysisResult {
        let score = self.deterministic_score() + self.jitter.apply(rng.next());

        AnalysisResult {
            score: score.clamp(0.0, 100.0),
            feedback: self.feedback(),
            key_points: self.key_points.clone(),
        }
    }
}
