//! Achievement catalog and unlock bookkeeping.

use chrono::{DateTime, Utc};
use physio_core::BodyPart;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::session::Session;
use crate::streak::StreakState;

pub const STREAK_TARGET: u32 = 7;
pub const ACCURACY_TARGET: f64 = 95.0;
pub const CENTURY_TARGET: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    #[serde(rename = "first_session")]
    FirstSession,
    #[serde(rename = "streak_7")]
    Streak7,
    #[serde(rename = "accuracy_master")]
    AccuracyMaster,
    #[serde(rename = "all_body_parts")]
    AllBodyParts,
    #[serde(rename = "century_sessions")]
    CenturySessions,
}

impl AchievementId {
    /// Catalog order, which is also evaluation and emission order
    pub const ALL: [AchievementId; 5] = [
        AchievementId::FirstSession,
        AchievementId::Streak7,
        AchievementId::AccuracyMaster,
        AchievementId::AllBodyParts,
        AchievementId::CenturySessions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstSession => "first_session",
            AchievementId::Streak7 => "streak_7",
            AchievementId::AccuracyMaster => "accuracy_master",
            AchievementId::AllBodyParts => "all_body_parts",
            AchievementId::CenturySessions => "century_sessions",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AchievementId::FirstSession => "Getting Started",
            AchievementId::Streak7 => "7-Day Warrior",
            AchievementId::AccuracyMaster => "Precision Master",
            AchievementId::AllBodyParts => "Full Body Explorer",
            AchievementId::CenturySessions => "Century Club",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementId::FirstSession => "Complete your first session",
            AchievementId::Streak7 => "Maintain a 7-day streak",
            AchievementId::AccuracyMaster => "Achieve 95%+ accuracy",
            AchievementId::AllBodyParts => "Exercise all body parts",
            AchievementId::CenturySessions => "Complete 100 sessions",
        }
    }

    /// Unlock predicate over the state right after `ctx.session` was recorded
    pub fn is_met(&self, ctx: &RuleContext<'_>) -> bool {
        match self {
            AchievementId::FirstSession => ctx.sessions.len() == 1,
            AchievementId::Streak7 => ctx.streak.current >= STREAK_TARGET,
            AchievementId::AccuracyMaster => ctx.session.accuracy >= ACCURACY_TARGET,
            AchievementId::AllBodyParts => {
                let parts: HashSet<BodyPart> = ctx.sessions.iter().map(|s| s.body_part).collect();
                parts.len() >= BodyPart::COUNT
            }
            AchievementId::CenturySessions => ctx.sessions.len() >= CENTURY_TARGET,
        }
    }
}

/// State the unlock predicates are evaluated against
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub sessions: &'a [Session],
    pub streak: StreakState,
    /// The session that triggered evaluation
    pub session: &'a Session,
}

/// An unlocked achievement as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: AchievementId,
    pub name: String,
    pub description: String,
    pub unlocked_at: DateTime<Utc>,
}

impl Achievement {
    pub fn unlock(id: AchievementId, at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: id.name().to_string(),
            description: id.description().to_string(),
            unlocked_at: at,
        }
    }
}

/// Catalog entry with its current lock state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStatus {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// Tracks which catalog achievements have been unlocked
#[derive(Debug, Clone, Default)]
pub struct AchievementEngine {
    /// Unlock order
    unlocked: Vec<Achievement>,
}

impl AchievementEngine {
    /// Restores previously unlocked achievements, keeping the first of any duplicates
    pub fn new(unlocked: Vec<Achievement>) -> Self {
        let mut seen = HashSet::new();
        let unlocked = unlocked.into_iter().filter(|a| seen.insert(a.id)).collect();
        Self { unlocked }
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.iter().any(|a| a.id == id)
    }

    pub fn unlocked(&self) -> &[Achievement] {
        &self.unlocked
    }

    /// Unlocks every still-locked achievement whose predicate now holds.
    /// Returns the new unlocks in catalog order.
    pub fn evaluate(&mut self, ctx: &RuleContext<'_>, now: DateTime<Utc>) -> Vec<Achievement> {
        let newly: Vec<Achievement> = AchievementId::ALL
            .into_iter()
            .filter(|id| !self.is_unlocked(*id) && id.is_met(ctx))
            .map(|id| Achievement::unlock(id, now))
            .collect();

        for achievement in &newly {
            tracing::info!(id = achievement.id.as_str(), "Achievement unlocked: {}", achievement.name);
        }

        self.unlocked.extend(newly.iter().cloned());
        newly
    }

    pub fn statuses(&self) -> Vec<AchievementStatus> {
        AchievementId::ALL
            .into_iter()
            .map(|id| AchievementStatus {
                id,
                name: id.name(),
                description: id.description(),
                unlocked_at: self
                    .unlocked
                    .iter()
                    .find(|a| a.id == id)
                    .map(|a| a.unlocked_at),
            })
            .collect()
    }
}
