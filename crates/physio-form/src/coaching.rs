//! Coaching cue selection.
//!
//! Picks the text a voice guide or on-screen coach should present. Speech
//! output itself belongs to the host.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CuePriority {
    #[default]
    Normal,
    /// Interrupts whatever is currently being said
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoachingCue {
    pub text: &'static str,
    pub priority: CuePriority,
}

impl CoachingCue {
    const fn normal(text: &'static str) -> Self {
        Self {
            text,
            priority: CuePriority::Normal,
        }
    }
}

/// Spoken feedback for a live accuracy reading
pub fn accuracy_cue(accuracy: f64) -> CoachingCue {
    if accuracy > 90.0 {
        CoachingCue::normal("Excellent form! Keep it up!")
    } else if accuracy > 75.0 {
        CoachingCue::normal("Good job! Try to maintain better alignment.")
    } else if accuracy > 60.0 {
        CoachingCue::normal("Focus on your posture and slow down the movement.")
    } else {
        CoachingCue {
            text: "Let's pause and review the proper form.",
            priority: CuePriority::High,
        }
    }
}

/// Stages of a guided session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Warmup,
    Exercise,
    Rest,
    Cooldown,
    Complete,
}

impl SessionPhase {
    pub fn announcement(&self) -> CoachingCue {
        CoachingCue::normal(match self {
            SessionPhase::Warmup => "Let's start with a gentle warm-up",
            SessionPhase::Exercise => "Beginning exercise phase. Focus on your form",
            SessionPhase::Rest => "Take a 30-second rest. Breathe deeply",
            SessionPhase::Cooldown => "Great work! Time for cool-down stretches",
            SessionPhase::Complete => "Session complete! Excellent effort today",
        })
    }
}

/// Playback states of an exercise demonstration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoPhase {
    Start,
    Pause,
    Resume,
    Complete,
}

impl DemoPhase {
    pub fn announcement(&self) -> CoachingCue {
        CoachingCue::normal(match self {
            DemoPhase::Start => "Animation demonstration starting. Follow the movement pattern.",
            DemoPhase::Pause => "Animation paused. Take a moment to review the form.",
            DemoPhase::Resume => "Continuing animation. Match your movements to the demonstration.",
            DemoPhase::Complete => "Animation complete. Great job following along!",
        })
    }
}
