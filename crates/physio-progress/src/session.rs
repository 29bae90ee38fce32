//! Session records.

use chrono::{DateTime, Utc};
use physio_core::{BodyPart, Difficulty};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Time-ordered unique session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// One completed exercise attempt. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
    pub body_part: BodyPart,
    #[serde(rename = "exercise")]
    pub exercise_name: String,
    /// Form accuracy percentage
    pub accuracy: f64,
    #[serde(rename = "duration")]
    pub duration_secs: u32,
    #[serde(rename = "reps")]
    pub rep_count: u32,
    pub difficulty: Difficulty,
}
