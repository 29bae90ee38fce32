//! Form analyzer dispatching poses to per-body-part analyzers.

use physio_core::{BodyPart, Exercise, Pose, RandomSource, ThreadRandom};
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisResult, FormAssessment};
use crate::back::BackAnalyzer;
use crate::general::GeneralAnalyzer;
use crate::neck::NeckAnalyzer;
use crate::shoulders::ShoulderAnalyzer;

/// Thresholds for the geometric form checks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Allowed deviation of the head angle from 90° (degrees)
    pub head_angle_tolerance: f64,
    /// Maximum vertical offset between shoulders (pixels)
    pub shoulder_level_tolerance: f64,
    /// Maximum difference between left and right elbow angles (degrees)
    pub arm_symmetry_tolerance: f64,
    /// Minimum elbow angle on either arm (degrees)
    pub min_arm_angle: f64,
    /// Minimum spine alignment ratio
    pub min_spine_alignment: f64,
    /// Maximum vertical offset between hips (pixels)
    pub hip_level_tolerance: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            head_angle_tolerance: 15.0,
            shoulder_level_tolerance: 20.0,
            arm_symmetry_tolerance: 20.0,
            min_arm_angle: 45.0,
            min_spine_alignment: 0.8,
            hip_level_tolerance: 15.0,
        }
    }
}

/// Scores one body part's exercise form from a pose
pub trait Analyzer: Send + Sync {
    fn body_part(&self) -> BodyPart;

    /// Deterministic assessment. Implementations fall back to
    /// [`FormAssessment::default_analysis`] when required keypoints are missing.
    fn assess(&self, exercise: &Exercise, pose: &Pose, previous_frames: &[Pose]) -> FormAssessment;
}

/// Complete form analyzer
pub struct FormAnalyzer<R = ThreadRandom> {
    analyzers: [Box<dyn Analyzer>; BodyPart::COUNT],
    rng: R,
}

impl FormAnalyzer<ThreadRandom> {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::with_rng(config, ThreadRandom)
    }
}

impl<R: RandomSource> FormAnalyzer<R> {
    pub fn with_rng(config: AnalyzerConfig, rng: R) -> Self {
        Self {
            analyzers: BodyPart::ALL.map(|part| build_analyzer(part, &config)),
            rng,
        }
    }

    pub fn analyzer(&self, body_part: BodyPart) -> &dyn Analyzer {
        self.analyzers[body_part as usize].as_ref()
    }

    /// Deterministic assessment without jitter
    pub fn assess(
        &self,
        body_part: BodyPart,
        exercise: &Exercise,
        pose: Option<&Pose>,
        previous_frames: &[Pose],
    ) -> FormAssessment {
        match pose {
            Some(pose) => self.analyzer(body_part).assess(exercise, pose, previous_frames),
            None => {
                tracing::debug!(%body_part, "No pose available, using default analysis");
                FormAssessment::default_analysis()
            }
        }
    }

    pub fn analyze(
        &self,
        body_part: BodyPart,
        exercise: &Exercise,
        pose: Option<&Pose>,
        previous_frames: &[Pose],
    ) -> AnalysisResult {
        self.assess(body_part, exercise, pose, previous_frames)
            .finalize(&self.rng)
    }

    /// Analyze by body part name. Unknown names get the default analysis.
    pub fn analyze_named(
        &self,
        body_part: &str,
        exercise: &Exercise,
        pose: Option<&Pose>,
        previous_frames: &[Pose],
    ) -> AnalysisResult {
        match body_part.parse::<BodyPart>() {
            Ok(part) => self.analyze(part, exercise, pose, previous_frames),
            Err(e) => {
                tracing::debug!("{}, using default analysis", e);
                FormAssessment::default_analysis().finalize(&self.rng)
            }
        }
    }
}

impl Default for FormAnalyzer<ThreadRandom> {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

fn build_analyzer(body_part: BodyPart, config: &AnalyzerConfig) -> Box<dyn Analyzer> {
    match body_part {
        BodyPart::Neck => Box::new(NeckAnalyzer::new(config)),
        BodyPart::Shoulders => Box::new(ShoulderAnalyzer::new(config)),
        BodyPart::Back => Box::new(BackAnalyzer::new(config)),
        BodyPart::Hips => Box::new(GeneralAnalyzer::new(BodyPart::Hips, "Good hip mobility work!")),
        BodyPart::Knees => Box::new(GeneralAnalyzer::new(
            BodyPart::Knees,
            "Keep those knees tracking well!",
        )),
        BodyPart::Ankles => Box::new(GeneralAnalyzer::new(
            BodyPart::Ankles,
            "Nice ankle range of motion!",
        )),
        BodyPart::Wrists => Box::new(GeneralAnalyzer::new(
            BodyPart::Wrists,
            "Good wrist flexibility work!",
        )),
        BodyPart::Core => Box::new(GeneralAnalyzer::new(BodyPart::Core, "Excellent core engagement!")),
    }
}
