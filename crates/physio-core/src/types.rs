//! Fundamental types for the physiotherapy engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// 2D position in image coordinates (pixels, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// 13-joint skeletal keypoint set used by the form analyzers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Keypoint {
    Nose = 0,
    LeftShoulder = 1,
    RightShoulder = 2,
    LeftElbow = 3,
    RightElbow = 4,
    LeftWrist = 5,
    RightWrist = 6,
    LeftHip = 7,
    RightHip = 8,
    LeftKnee = 9,
    RightKnee = 10,
    LeftAnkle = 11,
    RightAnkle = 12,
}

impl Keypoint {
    pub const COUNT: usize = 13;

    pub const ALL: [Keypoint; Keypoint::COUNT] = [
        Keypoint::Nose,
        Keypoint::LeftShoulder,
        Keypoint::RightShoulder,
        Keypoint::LeftElbow,
        Keypoint::RightElbow,
        Keypoint::LeftWrist,
        Keypoint::RightWrist,
        Keypoint::LeftHip,
        Keypoint::RightHip,
        Keypoint::LeftKnee,
        Keypoint::RightKnee,
        Keypoint::LeftAnkle,
        Keypoint::RightAnkle,
    ];

    pub fn from_index(idx: u8) -> Option<Self> {
        Self::ALL.get(idx as usize).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Keypoint::Nose => "nose",
            Keypoint::LeftShoulder => "leftShoulder",
            Keypoint::RightShoulder => "rightShoulder",
            Keypoint::LeftElbow => "leftElbow",
            Keypoint::RightElbow => "rightElbow",
            Keypoint::LeftWrist => "leftWrist",
            Keypoint::RightWrist => "rightWrist",
            Keypoint::LeftHip => "leftHip",
            Keypoint::RightHip => "rightHip",
            Keypoint::LeftKnee => "leftKnee",
            Keypoint::RightKnee => "rightKnee",
            Keypoint::LeftAnkle => "leftAnkle",
            Keypoint::RightAnkle => "rightAnkle",
        }
    }
}

impl fmt::Display for Keypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named keypoints for a single instant. May be partial.
///
/// Serializes as a map of keypoint name to `{x, y}`, e.g.
/// `{"nose": {"x": 320.0, "y": 160.0}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pose {
    keypoints: BTreeMap<Keypoint, Point2>,
}

impl Pose {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, keypoint: Keypoint, point: Point2) -> Self {
        self.set(keypoint, point);
        self
    }

    pub fn set(&mut self, keypoint: Keypoint, point: Point2) {
        self.keypoints.insert(keypoint, point);
    }

    pub fn get(&self, keypoint: Keypoint) -> Option<Point2> {
        self.keypoints.get(&keypoint).copied()
    }

    pub fn remove(&mut self, keypoint: Keypoint) -> Option<Point2> {
        self.keypoints.remove(&keypoint)
    }

    /// Looks up every requested keypoint, or `None` if any is missing.
    pub fn require<const N: usize>(&self, keypoints: [Keypoint; N]) -> Option<[Point2; N]> {
        let mut points = [Point2::origin(); N];
        for (slot, keypoint) in points.iter_mut().zip(keypoints) {
            *slot = self.get(keypoint)?;
        }
        Some(points)
    }

    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Keypoint, Point2)> + '_ {
        self.keypoints.iter().map(|(k, p)| (*k, *p))
    }
}

impl FromIterator<(Keypoint, Point2)> for Pose {
    fn from_iter<I: IntoIterator<Item = (Keypoint, Point2)>>(iter: I) -> Self {
        Self {
            keypoints: iter.into_iter().collect(),
        }
    }
}

/// Body regions exercises target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyPart {
    Neck,
    Shoulders,
    Back,
    Hips,
    Knees,
    Ankles,
    Wrists,
    Core,
}

impl BodyPart {
    pub const COUNT: usize = 8;

    pub const ALL: [BodyPart; BodyPart::COUNT] = [
        BodyPart::Neck,
        BodyPart::Shoulders,
        BodyPart::Back,
        BodyPart::Hips,
        BodyPart::Knees,
        BodyPart::Ankles,
        BodyPart::Wrists,
        BodyPart::Core,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyPart::Neck => "neck",
            BodyPart::Shoulders => "shoulders",
            BodyPart::Back => "back",
            BodyPart::Hips => "hips",
            BodyPart::Knees => "knees",
            BodyPart::Ankles => "ankles",
            BodyPart::Wrists => "wrists",
            BodyPart::Core => "core",
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyPart {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BodyPart::ALL
            .into_iter()
            .find(|part| part.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownBodyPart(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// An exercise as selected by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub difficulty: Difficulty,
}

impl Exercise {
    pub fn new(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            difficulty,
        }
    }
}
