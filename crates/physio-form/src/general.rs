//! Praise-only analysis for body parts without geometric checks yet.

use physio_core::{BodyPart, Exercise, Pose};

use crate::analysis::FormAssessment;
use crate::analyzer::Analyzer;

pub struct GeneralAnalyzer {
    body_part: BodyPart,
    praise: &'static str,
}

impl GeneralAnalyzer {
    pub fn new(body_part: BodyPart, praise: &'static str) -> Self {
        Self { body_part, praise }
    }
}

impl Analyzer for GeneralAnalyzer {
    fn body_part(&self) -> BodyPart {
        self.body_part
    }

    fn assess(&self, _exercise: &Exercise, _pose: &Pose, _previous_frames: &[Pose]) -> FormAssessment {
        FormAssessment::praise_only(self.praise)
    }
}
