//! Neck exercise analysis.
//!
//! Checks that the head sits centered over the shoulder line and that the
//! shoulders stay level while the neck moves.

use physio_core::geometry::{angle_between, level_difference};
use physio_core::{BodyPart, Exercise, Keypoint, Pose};

use crate::analysis::{FormAssessment, FormCheck, Jitter};
use crate::analyzer::{Analyzer, AnalyzerConfig};

const BASE_SCORE: f64 = 85.0;
const JITTER: Jitter = Jitter::new(-5.0, 10.0);
const KEY_POINTS: [&str; 2] = ["Maintain slow, controlled movement", "Keep shoulders relaxed"];

pub struct NeckAnalyzer {
    head_angle_tolerance: f64,
    shoulder_level_tolerance: f64,
}

impl NeckAnalyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            head_angle_tolerance: config.head_angle_tolerance,
            shoulder_level_tolerance: config.shoulder_level_tolerance,
        }
    }
}

impl Analyzer for NeckAnalyzer {
    fn body_part(&self) -> BodyPart {
        BodyPart::Neck
    }

    fn assess(&self, _exercise: &Exercise, pose: &Pose, _previous_frames: &[Pose]) -> FormAssessment {
        let Some([nose, left_shoulder, right_shoulder]) =
            pose.require([Keypoint::Nose, Keypoint::LeftShoulder, Keypoint::RightShoulder])
        else {
            tracing::debug!("Neck keypoints missing, using default analysis");
            return FormAssessment::default_analysis();
        };

        let mut assessment = FormAssessment::new(BASE_SCORE, "Great neck alignment!", KEY_POINTS, JITTER);

        // Head angle is measured at the left shoulder
        let head_angle = angle_between(&nose, &left_shoulder, &right_shoulder);
        if (head_angle - 90.0).abs() > self.head_angle_tolerance {
            assessment.fail(FormCheck::HeadCentered);
        }

        if level_difference(&left_shoulder, &right_shoulder) > self.shoulder_level_tolerance {
            assessment.fail(FormCheck::ShouldersLevel);
        }

        assessment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use physio_core::{Difficulty, Point2};

    fn assess(pose: &Pose) -> FormAssessment {
        let exercise = Exercise::new("Cervical Rotation", Difficulty::Beginner);
        NeckAnalyzer::new(&AnalyzerConfig::default()).assess(&exercise, pose, &[])
    }

    fn pose(nose: Point2, left_shoulder: Point2, right_shoulder: Point2) -> Pose {
        Pose::new()
            .with(Keypoint::Nose, nose)
            .with(Keypoint::LeftShoulder, left_shoulder)
            .with(Keypoint::RightShoulder, right_shoulder)
    }

    #[test]
    fn test_good_alignment() {
        let assessment = assess(&pose(
            Point2::new(260.0, 140.0),
            Point2::new(260.0, 200.0),
            Point2::new(380.0, 200.0),
        ));
        assert!(assessment.passed());
        assert_eq!(assessment.deterministic_score(), 85.0);
        assert_eq!(assessment.feedback(), vec!["Great neck alignment!".to_string()]);
        assert_eq!(
            assessment.key_points,
            vec![
                "Maintain slow, controlled movement".to_string(),
                "Keep shoulders relaxed".to_string(),
            ]
        );
    }

    #[test]
    fn test_head_off_center() {
        // Nose between the shoulders puts the angle near 34°
        let assessment = assess(&pose(
            Point2::new(320.0, 160.0),
            Point2::new(260.0, 200.0),
            Point2::new(380.0, 200.0),
        ));
        assert_eq!(assessment.failed_checks, vec![FormCheck::HeadCentered]);
        assert_eq!(assessment.deterministic_score(), 75.0);
    }

    #[test]
    fn test_both_violations() {
        let assessment = assess(&pose(
            Point2::new(320.0, 160.0),
            Point2::new(260.0, 200.0),
            Point2::new(380.0, 230.0),
        ));
        assert_eq!(
            assessment.failed_checks,
            vec![FormCheck::HeadCentered, FormCheck::ShouldersLevel]
        );
        assert_eq!(assessment.deterministic_score(), 70.0);
        assert_eq!(
            assessment.feedback(),
            vec![
                "Keep your head centered between your shoulders".to_string(),
                "Keep your shoulders level".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_nose_falls_back() {
        let pose = Pose::new()
            .with(Keypoint::LeftShoulder, Point2::new(260.0, 200.0))
            .with(Keypoint::RightShoulder, Point2::new(380.0, 200.0));
        assert_eq!(assess(&pose), FormAssessment::default_analysis());
    }
}
