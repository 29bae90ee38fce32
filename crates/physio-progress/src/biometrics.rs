//! Simulated biometric readings during a session.
//!
//! Heart rate is modelled as a resting 70 bpm plus a random exercise
//! intensity of 30-70 bpm and a ±10 bpm oscillation. Calories accrue at a
//! flat 3.5 kcal per minute.

use chrono::{DateTime, Utc};
use physio_core::{Clock, RandomSource};
use serde::{Deserialize, Serialize};

pub const RESTING_HEART_RATE: u32 = 70;
pub const CALORIES_PER_MINUTE: f64 = 3.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricReading {
    pub heart_rate: u32,
    pub calories: u32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricSummary {
    pub duration_secs: u64,
    /// Last sampled heart rate
    pub avg_heart_rate: u32,
    pub calories_burned: u32,
}

pub struct BiometricMonitor<C, R> {
    clock: C,
    rng: R,
    started_at: Option<DateTime<Utc>>,
    heart_rate: u32,
    calories: u32,
}

impl<C: Clock, R: RandomSource> BiometricMonitor<C, R> {
    pub fn new(clock: C, rng: R) -> Self {
        Self {
            clock,
            rng,
            started_at: None,
            heart_rate: RESTING_HEART_RATE,
            calories: 0,
        }
    }

    pub fn start(&mut self) {
        self.started_at = Some(self.clock.now());
        self.calories = 0;
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    /// Takes a new sample while monitoring; otherwise returns the last values
    pub fn sample(&mut self) -> BiometricReading {
        if let Some(started_at) = self.started_at {
            let now = self.clock.now();
            let t_ms = now.timestamp_millis() as f64;

            let intensity = 30.0 + self.rng.next() * 40.0;
            let oscillation = (t_ms * 0.01).sin() * 10.0;
            self.heart_rate = (RESTING_HEART_RATE as f64 + intensity + oscillation).round() as u32;

            let elapsed_minutes = (now - started_at).num_milliseconds() as f64 / 60_000.0;
            self.calories = (elapsed_minutes * CALORIES_PER_MINUTE).round() as u32;
        }

        self.current()
    }

    pub fn current(&self) -> BiometricReading {
        BiometricReading {
            heart_rate: self.heart_rate,
            calories: self.calories,
            is_active: self.is_active(),
        }
    }

    /// Ends monitoring. Returns `None` if monitoring was never started.
    pub fn stop(&mut self) -> Option<BiometricSummary> {
        let started_at = self.started_at.take()?;
        let elapsed_ms = (self.clock.now() - started_at).num_milliseconds().max(0) as f64;

        Some(BiometricSummary {
            duration_secs: (elapsed_ms / 1000.0).round() as u64,
            avg_heart_rate: self.heart_rate,
            calories_burned: self.calories,
        })
    }
}
