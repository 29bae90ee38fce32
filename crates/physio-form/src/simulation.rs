//! Simulated pose source.
//!
//! Produces a synthetic standing skeleton centered in a 640×480 frame with a
//! gentle time-driven sway of the head, elbows and wrists. Used when no
//! camera feed is available and as a fixture for end-to-end tests.

use physio_core::{Clock, Keypoint, Point2, Pose, RandomSource};

pub const FRAME_WIDTH: f64 = 640.0;
pub const FRAME_HEIGHT: f64 = 480.0;

/// Supplies the most recent pose, if any
pub trait PoseSource {
    fn current_pose(&self) -> Option<Pose>;
}

pub struct SimulatedPoseSource<C> {
    clock: C,
    center: Point2,
}

impl<C: Clock> SimulatedPoseSource<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            center: Point2::new(FRAME_WIDTH / 2.0, FRAME_HEIGHT / 2.0),
        }
    }

    /// Skeleton at `t_ms` milliseconds since the Unix epoch
    pub fn pose_at(&self, t_ms: f64) -> Pose {
        let t = t_ms * 0.003;
        let Point2 { x: cx, y: cy } = self.center;

        Pose::new()
            .with(
                Keypoint::Nose,
                Point2::new(cx + t.sin() * 5.0, cy - 80.0 + (t * 1.5).cos() * 3.0),
            )
            .with(Keypoint::LeftShoulder, Point2::new(cx - 60.0, cy - 40.0))
            .with(Keypoint::RightShoulder, Point2::new(cx + 60.0, cy - 40.0))
            .with(
                Keypoint::LeftElbow,
                Point2::new(cx - 80.0 + (t * 2.0).sin() * 10.0, cy + 20.0),
            )
            .with(
                Keypoint::RightElbow,
                Point2::new(cx + 80.0 + (t * 2.0).cos() * 10.0, cy + 20.0),
            )
            .with(
                Keypoint::LeftWrist,
                Point2::new(cx - 90.0 + (t * 2.5).sin() * 15.0, cy + 60.0),
            )
            .with(
                Keypoint::RightWrist,
                Point2::new(cx + 90.0 + (t * 2.5).cos() * 15.0, cy + 60.0),
            )
            .with(Keypoint::LeftHip, Point2::new(cx - 40.0, cy + 80.0))
            .with(Keypoint::RightHip, Point2::new(cx + 40.0, cy + 80.0))
            .with(Keypoint::LeftKnee, Point2::new(cx - 45.0, cy + 140.0))
            .with(Keypoint::RightKnee, Point2::new(cx + 45.0, cy + 140.0))
            .with(Keypoint::LeftAnkle, Point2::new(cx - 50.0, cy + 200.0))
            .with(Keypoint::RightAnkle, Point2::new(cx + 50.0, cy + 200.0))
    }
}

impl<C: Clock> PoseSource for SimulatedPoseSource<C> {
    fn current_pose(&self) -> Option<Pose> {
        Some(self.pose_at(self.clock.now().timestamp_millis() as f64))
    }
}

/// Rough accuracy estimate for a simulated feed.
///
/// `75 + r·20` plus a slow ±5 sine drift, clamped to [0, 100].
/// Returns 0 when there is no pose.
pub fn simulated_accuracy<R: RandomSource + ?Sized>(pose: Option<&Pose>, t_ms: f64, rng: &R) -> f64 {
    if pose.is_none() {
        return 0.0;
    }

    let base = 75.0 + rng.next() * 20.0;
    let drift = (t_ms * 0.001).sin() * 5.0;
    (base + drift).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use physio_core::{BodyPart, Difficulty, Exercise, FixedClock, FixedRandom};

    use crate::analyzer::{AnalyzerConfig, FormAnalyzer};

    #[test]
    fn test_simulated_pose_is_complete() {
        let source = SimulatedPoseSource::new(FixedClock::new(Utc.timestamp_opt(0, 0).unwrap()));
        let pose = source.current_pose().unwrap();
        assert_eq!(pose.len(), Keypoint::COUNT);

        // At t = 0 the nose sits 77px above center
        assert_eq!(pose.get(Keypoint::Nose), Some(Point2::new(320.0, 163.0)));
        assert_eq!(pose.get(Keypoint::RightElbow), Some(Point2::new(410.0, 260.0)));
    }

    #[test]
    fn test_simulated_pose_feeds_analyzers() {
        let source = SimulatedPoseSource::new(FixedClock::new(Utc.timestamp_opt(0, 0).unwrap()));
        let pose = source.current_pose();
        let analyzer = FormAnalyzer::with_rng(AnalyzerConfig::default(), FixedRandom::zero());
        let exercise = Exercise::new("Cat Cow Mobilization", Difficulty::Beginner);

        // Shoulder and hip midpoints sit 120px apart
        let back = analyzer.assess(BodyPart::Back, &exercise, pose.as_ref(), &[]);
        assert_eq!(back.deterministic_score(), 82.0);

        let shoulders = analyzer.assess(BodyPart::Shoulders, &exercise, pose.as_ref(), &[]);
        assert!(shoulders.passed());
    }

    #[test]
    fn test_simulated_accuracy() {
        let pose = Pose::new();
        assert_eq!(simulated_accuracy(None, 0.0, &FixedRandom::new(0.5)), 0.0);
        assert_eq!(simulated_accuracy(Some(&pose), 0.0, &FixedRandom::new(0.5)), 85.0);

        for step in 0..100 {
            let t_ms = step as f64 * 137.0;
            let accuracy = simulated_accuracy(Some(&pose), t_ms, &physio_core::ThreadRandom);
            assert!((70.0..=100.0).contains(&accuracy));
        }
    }
}
