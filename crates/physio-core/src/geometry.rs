//! Geometric utilities over 2D keypoints.

use crate::types::Point2;

/// Absolute angle in degrees between ray `vertex→a` and ray `vertex→c`.
///
/// Computed as the absolute difference of the two `atan2` headings, with no
/// wrap into `[0, 180]`: results may reach up to 360°. Analyzer thresholds
/// are tuned against this unwrapped value.
///
/// Coincident points are well defined since `atan2(0, 0) == 0`.
pub fn angle_between(a: &Point2, vertex: &Point2, c: &Point2) -> f64 {
    let heading_a = (a.y - vertex.y).atan2(a.x - vertex.x);
    let heading_c = (c.y - vertex.y).atan2(c.x - vertex.x);
    (heading_a - heading_c).abs().to_degrees()
}

/// Spine alignment ratio in `(0, 1]`.
///
/// Takes the shoulder midpoint and hip midpoint and returns
/// `min(1, 100 / distance)`. Coincident midpoints yield exactly 1.
pub fn alignment_ratio(
    left_shoulder: &Point2,
    right_shoulder: &Point2,
    left_hip: &Point2,
    right_hip: &Point2,
) -> f64 {
    let shoulder_center = left_shoulder.midpoint(right_shoulder);
    let hip_center = left_hip.midpoint(right_hip);
    let distance = shoulder_center.distance_to(&hip_center);

    if distance <= 0.0 {
        return 1.0;
    }

    (100.0 / distance).min(1.0)
}

/// Absolute vertical offset between two points (pixels)
pub fn level_difference(a: &Point2, b: &Point2) -> f64 {
    (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_angle() {
        let a = Point2::new(0.0, 10.0);
        let vertex = Point2::origin();
        let c = Point2::new(10.0, 0.0);
        assert!((angle_between(&a, &vertex, &c) - 90.0).abs() < 1e-10);
    }

    #[test]
    fn test_angle_is_not_wrapped() {
        // Headings of +135° and -135° differ by 270° without normalization
        let a = Point2::new(-10.0, 10.0);
        let vertex = Point2::origin();
        let c = Point2::new(-10.0, -10.0);
        assert!((angle_between(&a, &vertex, &c) - 270.0).abs() < 1e-10);
    }

    #[test]
    fn test_degenerate_angle_is_finite() {
        let a = Point2::new(5.0, 5.0);
        let c = Point2::new(8.0, 5.0);

        let coincident = angle_between(&a, &a, &c);
        assert!(coincident.is_finite());
        assert_eq!(coincident, 0.0);

        let all_same = angle_between(&a, &a, &a);
        assert_eq!(all_same, 0.0);
    }

    #[test]
    fn test_alignment_ratio_coincident_midpoints() {
        let p = Point2::new(100.0, 100.0);
        assert_eq!(alignment_ratio(&p, &p, &p, &p), 1.0);
    }

    #[test]
    fn test_alignment_ratio_range() {
        let ls = Point2::new(260.0, 200.0);
        let rs = Point2::new(380.0, 200.0);

        // Torso of 120px -> 100/120
        let lh = Point2::new(280.0, 320.0);
        let rh = Point2::new(360.0, 320.0);
        let ratio = alignment_ratio(&ls, &rs, &lh, &rh);
        assert!((ratio - 100.0 / 120.0).abs() < 1e-10);

        // Short torso clamps to 1
        let lh = Point2::new(280.0, 250.0);
        let rh = Point2::new(360.0, 250.0);
        assert_eq!(alignment_ratio(&ls, &rs, &lh, &rh), 1.0);

        // Very long torso stays positive
        let lh = Point2::new(280.0, 1.0e6);
        let rh = Point2::new(360.0, 1.0e6);
        let ratio = alignment_ratio(&ls, &rs, &lh, &rh);
        assert!(ratio > 0.0 && ratio <= 1.0);
    }

    #[test]
    fn test_level_difference() {
        let a = Point2::new(0.0, 10.0);
        let b = Point2::new(50.0, 35.0);
        assert_eq!(level_difference(&a, &b), 25.0);
        assert_eq!(level_difference(&b, &a), 25.0);
    }
}
