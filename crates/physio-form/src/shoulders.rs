//! Shoulder exercise analysis.
//!
//! Compares the elbow angles of both arms for symmetry and range of motion.

use physio_core::geometry::angle_between;
use physio_core::{BodyPart, Exercise, Keypoint, Pose};

use crate::analysis::{FormAssessment, FormCheck, Jitter};
use crate::analyzer::{Analyzer, AnalyzerConfig};

const BASE_SCORE: f64 = 80.0;
const JITTER: Jitter = Jitter::new(-7.0, 15.0);
const KEY_POINTS: [&str; 2] = ["Control the descent", "Feel the stretch at the top"];

pub struct ShoulderAnalyzer {
    arm_symmetry_tolerance: f64,
    min_arm_angle: f64,
}

impl ShoulderAnalyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            arm_symmetry_tolerance: config.arm_symmetry_tolerance,
            min_arm_angle: config.min_arm_angle,
        }
    }
}

impl Analyzer for ShoulderAnalyzer {
    fn body_part(&self) -> BodyPart {
        BodyPart::Shoulders
    }

    fn assess(&self, _exercise: &Exercise, pose: &Pose, _previous_frames: &[Pose]) -> FormAssessment {
        let Some([ls, le, lw, rs, re, rw]) = pose.require([
            Keypoint::LeftShoulder,
            Keypoint::LeftElbow,
            Keypoint::LeftWrist,
            Keypoint::RightShoulder,
            Keypoint::RightElbow,
            Keypoint::RightWrist,
        ]) else {
            tracing::debug!("Arm keypoints missing, using default analysis");
            return FormAssessment::default_analysis();
        };

        let mut assessment =
            FormAssessment::new(BASE_SCORE, "Excellent shoulder mobility!", KEY_POINTS, JITTER);

        let left_arm = angle_between(&ls, &le, &lw);
        let right_arm = angle_between(&rs, &re, &rw);

        if (left_arm - right_arm).abs() > self.arm_symmetry_tolerance {
            assessment.fail(FormCheck::ArmSymmetry);
        }

        if left_arm < self.min_arm_angle || right_arm < self.min_arm_angle {
            assessment.fail(FormCheck::RangeOfMotion);
        }

        assessment
    }
}
