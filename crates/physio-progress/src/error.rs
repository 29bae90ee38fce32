//! Progress tracking errors.

use thiserror::Error;

use crate::tracker::RecordedSession;

#[derive(Error, Debug)]
pub enum ProgressError {
    /// Rejected before anything was recorded
    #[error("Accuracy must be a finite number, got {0}")]
    InvalidAccuracy(f64),

    /// The in-memory state was updated but writing it to the backend failed.
    /// `recorded` holds what the caller would have received on success.
    #[error("Progress recorded but not saved: {source}")]
    NotSaved {
        recorded: Box<RecordedSession>,
        source: physio_core::Error,
    },
}

impl ProgressError {
    /// The in-memory outcome, if the session was recorded
    pub fn recorded(&self) -> Option<&RecordedSession> {
        match self {
            ProgressError::NotSaved { recorded, .. } => Some(recorded),
            ProgressError::InvalidAccuracy(_) => None,
        }
    }

    pub fn into_recorded(self) -> Option<RecordedSession> {
        match self {
            ProgressError::NotSaved { recorded, .. } => Some(*recorded),
            ProgressError::InvalidAccuracy(_) => None,
        }
    }
}

pub type ProgressResult<T> = std::result::Result<T, ProgressError>;
