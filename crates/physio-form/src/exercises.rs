//! Exercise catalog and demonstration tempo.

use std::time::Duration;

use physio_core::BodyPart;
use serde::{Deserialize, Serialize};

/// Length of one demonstration cycle at normal speed
pub const BASE_CYCLE: Duration = Duration::from_millis(3000);

/// A known exercise and the demonstration animation that illustrates it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub slug: &'static str,
    pub body_part: BodyPart,
    pub animation: &'static str,
}

const fn entry(slug: &'static str, body_part: BodyPart, animation: &'static str) -> CatalogEntry {
    CatalogEntry {
        slug,
        body_part,
        animation,
    }
}

pub const CATALOG: &[CatalogEntry] = &[
    entry("cervical-rotation", BodyPart::Neck, "neck-rotation"),
    entry("upper-trap-stretches", BodyPart::Neck, "neck-stretch"),
    entry("neck-strengthening", BodyPart::Neck, "neck-stretch"),
    entry("pendulum-swings", BodyPart::Shoulders, "pendulum-swings"),
    entry("wall-angels", BodyPart::Shoulders, "arm-raises"),
    entry("rotator-cuff-strengthening", BodyPart::Shoulders, "shoulder-rolls"),
    entry("cat-cow-mobilization", BodyPart::Back, "cat-cow"),
    entry("thoracic-extension", BodyPart::Back, "back-extension"),
    entry("lower-back-strengthening", BodyPart::Back, "back-extension"),
    entry("hip-flexor-stretches", BodyPart::Hips, "hip-flexor-stretch"),
    entry("clamshells", BodyPart::Hips, "clamshells"),
    entry("straight-leg-raises", BodyPart::Knees, "leg-raises"),
    entry("hamstring-curls", BodyPart::Knees, "knee-bends"),
    entry("alphabet-draws", BodyPart::Ankles, "ankle-circles"),
    entry("calf-raises-progressive", BodyPart::Ankles, "calf-raises"),
    entry("wrist-flexor-stretches", BodyPart::Wrists, "wrist-stretch"),
    entry("grip-strengthening", BodyPart::Wrists, "grip-strengthening"),
    entry("dead-bug-exercise", BodyPart::Core, "dead-bug"),
    entry("bird-dog", BodyPart::Core, "bird-dog"),
];

/// Lowercases and joins whitespace runs with `-`: "Cat  Cow" -> "cat-cow"
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

pub fn lookup(exercise_name: &str) -> Option<&'static CatalogEntry> {
    let slug = slugify(exercise_name);
    CATALOG.iter().find(|entry| entry.slug == slug)
}

pub fn animation_key(exercise_name: &str) -> Option<&'static str> {
    lookup(exercise_name).map(|entry| entry.animation)
}

pub fn exercises_for(body_part: BodyPart) -> impl Iterator<Item = &'static CatalogEntry> {
    CATALOG.iter().filter(move |entry| entry.body_part == body_part)
}

/// Demonstration playback speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackSpeed {
    Half,
    #[default]
    Normal,
    Double,
}

impl PlaybackSpeed {
    pub fn multiplier(&self) -> f64 {
        match self {
            PlaybackSpeed::Half => 0.5,
            PlaybackSpeed::Normal => 1.0,
            PlaybackSpeed::Double => 2.0,
        }
    }

    /// Maps a multiplier back to a speed; anything unrecognized is normal
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier == 0.5 {
            PlaybackSpeed::Half
        } else if multiplier == 2.0 {
            PlaybackSpeed::Double
        } else {
            PlaybackSpeed::Normal
        }
    }

    /// Speed toggle order: 0.5x -> 1x -> 2x -> 0.5x
    pub fn next(&self) -> Self {
        match self {
            PlaybackSpeed::Half => PlaybackSpeed::Normal,
            PlaybackSpeed::Normal => PlaybackSpeed::Double,
            PlaybackSpeed::Double => PlaybackSpeed::Half,
        }
    }

    /// One animation cycle, which is also one repetition
    pub fn cycle_duration(&self) -> Duration {
        BASE_CYCLE.div_f64(self.multiplier())
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlaybackSpeed::Half => "0.5x",
            PlaybackSpeed::Normal => "1x",
            PlaybackSpeed::Double => "2x",
        }
    }
}

/// Counts demonstration repetitions as playback time elapses
#[derive(Debug, Clone, Default)]
pub struct RepCounter {
    count: u32,
    paused: bool,
    speed: PlaybackSpeed,
    pending: Duration,
}

impl RepCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    /// Advances playback time. Every full cycle adds a rep unless paused.
    /// Returns the number of reps added.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let interval = self.speed.cycle_duration();
        self.pending += elapsed;

        let mut added = 0;
        while self.pending >= interval {
            self.pending -= interval;
            if !self.paused {
                added += 1;
            }
        }

        self.count += added;
        added
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Switches to the next speed and restarts the current cycle
    pub fn cycle_speed(&mut self) -> PlaybackSpeed {
        self.speed = self.speed.next();
        self.pending = Duration::ZERO;
        self.speed
    }

    /// Clears the count and resumes at the current speed
    pub fn restart(&mut self) {
        self.count = 0;
        self.paused = false;
        self.pending = Duration::ZERO;
    }
}
