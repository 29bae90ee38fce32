//! Back exercise analysis.

use physio_core::geometry::{alignment_ratio, level_difference};
use physio_core::{BodyPart, Exercise, Keypoint, Pose};

use crate::analysis::{FormAssessment, FormCheck, Jitter};
use crate::analyzer::{Analyzer, AnalyzerConfig};

const BASE_SCORE: f64 = 82.0;
const JITTER: Jitter = Jitter::new(-6.0, 12.0);
const KEY_POINTS: [&str; 2] = ["Engage your core", "Move slowly through full range"];

pub struct BackAnalyzer {
    min_spine_alignment: f64,
    hip_level_tolerance: f64,
}

impl BackAnalyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            min_spine_alignment: config.min_spine_alignment,
            hip_level_tolerance: config.hip_level_tolerance,
        }
    }
}

impl Analyzer for BackAnalyzer {
    fn body_part(&self) -> BodyPart {
        BodyPart::Back
    }

    fn assess(&self, _exercise: &Exercise, pose: &Pose, _previous_frames: &[Pose]) -> FormAssessment {
        let Some([ls, rs, lh, rh]) = pose.require([
            Keypoint::LeftShoulder,
            Keypoint::RightShoulder,
            Keypoint::LeftHip,
            Keypoint::RightHip,
        ]) else {
            tracing::debug!("Torso keypoints missing, using default analysis");
            return FormAssessment::default_analysis();
        };

        let mut assessment = FormAssessment::new(BASE_SCORE, "Perfect spinal movement!", KEY_POINTS, JITTER);

        if alignment_ratio(&ls, &rs, &lh, &rh) < self.min_spine_alignment {
            assessment.fail(FormCheck::NeutralSpine);
        }

        if level_difference(&lh, &rh) > self.hip_level_tolerance {
            assessment.fail(FormCheck::HipsLevel);
        }

        assessment
    }
}
