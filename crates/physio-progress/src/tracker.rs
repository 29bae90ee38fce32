//! Progress tracker owning the session log, streaks and achievements.

use chrono::{Duration, FixedOffset, Offset, Utc};
use physio_core::{BodyPart, Clock, Exercise, SystemClock};
use serde::Serialize;

use crate::achievements::{Achievement, AchievementEngine, AchievementStatus, RuleContext};
use crate::config::ProgressConfig;
use crate::error::{ProgressError, ProgressResult};
use crate::persistence::{ProgressBackend, ProgressState};
use crate::session::{Session, SessionId};
use crate::streak::StreakState;

/// Outcome of recording a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedSession {
    pub session: Session,
    /// Achievements unlocked by this session, in catalog order
    pub unlocked: Vec<Achievement>,
}

/// Calendar settings the tracker needs from [`ProgressConfig`]
#[derive(Debug, Clone, Copy)]
pub struct TrackerSettings {
    pub calendar_offset: FixedOffset,
    pub weekly_window: Duration,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            calendar_offset: Utc.fix(),
            weekly_window: Duration::days(7),
        }
    }
}

/// Session store and achievement engine behind a persistence backend.
///
/// Mutating operations take `&mut self`; hosts sharing a tracker across
/// threads wrap it in a mutex so streak updates never race with appends.
pub struct ProgressTracker<B = Box<dyn ProgressBackend>, C = SystemClock> {
    backend: B,
    clock: C,
    settings: TrackerSettings,
    sessions: Vec<Session>,
    streak: StreakState,
    achievements: AchievementEngine,
}

impl ProgressTracker {
    /// Tracker with the configured backend and the system clock
    pub fn from_config(config: &ProgressConfig) -> physio_core::Result<Self> {
        let settings = TrackerSettings {
            calendar_offset: config.calendar.utc_offset()?,
            weekly_window: config.calendar.weekly_window(),
        };
        Ok(ProgressTracker::with_settings(
            config.build_backend(),
            SystemClock,
            settings,
        ))
    }
}

impl<B: ProgressBackend, C: Clock> ProgressTracker<B, C> {
    pub fn new(backend: B, clock: C) -> Self {
        Self::with_settings(backend, clock, TrackerSettings::default())
    }

    /// Loads existing progress from `backend`
    pub fn with_settings(backend: B, clock: C, settings: TrackerSettings) -> Self {
        let state = backend.load();
        tracing::debug!(
            sessions = state.sessions.len(),
            achievements = state.achievements.len(),
            "Loaded progress"
        );

        Self {
            backend,
            clock,
            settings,
            sessions: state.sessions,
            streak: state.streaks,
            achievements: AchievementEngine::new(state.achievements),
        }
    }

    /// Records a completed session, then updates the streak, evaluates
    /// achievements and persists, in that order.
    ///
    /// Non-finite accuracy is rejected without touching any state. On a
    /// failed save the in-memory state keeps the session and the error
    /// carries the [`RecordedSession`].
    pub fn add_session(
        &mut self,
        body_part: BodyPart,
        exercise: &Exercise,
        accuracy: f64,
        duration_secs: u32,
        rep_count: u32,
    ) -> ProgressResult<RecordedSession> {
        if !accuracy.is_finite() {
            return Err(ProgressError::InvalidAccuracy(accuracy));
        }

        let now = self.clock.now();
        let session = Session {
            id: SessionId::new(),
            timestamp: now,
            body_part,
            exercise_name: exercise.name.clone(),
            accuracy,
            duration_secs,
            rep_count,
            difficulty: exercise.difficulty,
        };

        self.sessions.push(session.clone());
        self.streak
            .record(&self.sessions, now, self.settings.calendar_offset);
        let unlocked = self.unlock_achievements(&session);

        tracing::info!(
            %body_part,
            exercise = %session.exercise_name,
            accuracy,
            streak = self.streak.current,
            "Session recorded"
        );

        self.persist(RecordedSession { session, unlocked })
    }

    /// Evaluates locked achievements against the current history with
    /// `session` as the triggering session, persisting any unlocks.
    pub fn check_achievements(&mut self, session: &Session) -> ProgressResult<Vec<Achievement>> {
        let unlocked = self.unlock_achievements(session);
        if unlocked.is_empty() {
            return Ok(unlocked);
        }

        self.persist(RecordedSession {
            session: session.clone(),
            unlocked,
        })
        .map(|recorded| recorded.unlocked)
    }

    fn unlock_achievements(&mut self, session: &Session) -> Vec<Achievement> {
        let ctx = RuleContext {
            sessions: &self.sessions,
            streak: self.streak,
            session,
        };
        self.achievements.evaluate(&ctx, self.clock.now())
    }

    fn persist(&self, recorded: RecordedSession) -> ProgressResult<RecordedSession> {
        match self.backend.save(&self.state()) {
            Ok(()) => Ok(recorded),
            Err(source) => {
                tracing::warn!("Progress not saved: {}", source);
                Err(ProgressError::NotSaved {
                    recorded: Box::new(recorded),
                    source,
                })
            }
        }
    }

    /// Sessions within the weekly window, in recording order
    pub fn weekly_progress(&self) -> impl Iterator<Item = &Session> + '_ {
        let cutoff = self.clock.now() - self.settings.weekly_window;
        self.sessions.iter().filter(move |s| s.timestamp > cutoff)
    }

    /// Mean accuracy over all sessions rounded to the nearest integer, 0 when empty
    pub fn average_accuracy(&self) -> u32 {
        if self.sessions.is_empty() {
            return 0;
        }

        let total: f64 = self.sessions.iter().map(|s| s.accuracy).sum();
        (total / self.sessions.len() as f64).round() as u32
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn streak(&self) -> StreakState {
        self.streak
    }

    /// Unlocked achievements in unlock order
    pub fn achievements(&self) -> &[Achievement] {
        self.achievements.unlocked()
    }

    pub fn achievement_statuses(&self) -> Vec<AchievementStatus> {
        self.achievements.statuses()
    }

    /// Snapshot of everything that gets persisted
    pub fn state(&self) -> ProgressState {
        ProgressState {
            sessions: self.sessions.clone(),
            achievements: self.achievements.unlocked().to_vec(),
            streaks: self.streak,
        }
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::AchievementId;
    use crate::persistence::{KeyValueBackend, KeyValueStore, MemoryStore};
    use chrono::{DateTime, TimeZone};
    use physio_core::{Difficulty, FixedClock};
    use std::sync::Arc;

    type TestTracker = ProgressTracker<KeyValueBackend<Arc<MemoryStore>>, Arc<FixedClock>>;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn tracker() -> (TestTracker, Arc<MemoryStore>, Arc<FixedClock>) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(start()));
        let tracker = ProgressTracker::new(KeyValueBackend::new(store.clone()), clock.clone());
        (tracker, store, clock)
    }

    fn exercise() -> Exercise {
        Exercise::new("Cervical Rotation", Difficulty::Beginner)
    }

    #[test]
    fn test_add_session_records_everything() {
        let (mut tracker, store, _clock) = tracker();
        let recorded = tracker
            .add_session(BodyPart::Neck, &exercise(), 96.0, 30, 10)
            .unwrap();

        assert_eq!(recorded.session.accuracy, 96.0);
        assert_eq!(recorded.session.timestamp, start());
        assert_eq!(recorded.session.difficulty, Difficulty::Beginner);
        assert_eq!(
            recorded.unlocked.iter().map(|a| a.id).collect::<Vec<_>>(),
            vec![AchievementId::FirstSession, AchievementId::AccuracyMaster]
        );
        assert_eq!(tracker.average_accuracy(), 96);
        assert_eq!(tracker.streak(), StreakState::new(1, 1));

        // Persisted state matches memory
        let reloaded = KeyValueBackend::new(store).load();
        assert_eq!(reloaded, tracker.state());
    }

    #[test]
    fn test_average_accuracy() {
        let (mut tracker, _store, _clock) = tracker();
        assert_eq!(tracker.average_accuracy(), 0);

        for accuracy in [70.0, 81.0, 90.0] {
            tracker
                .add_session(BodyPart::Back, &exercise(), accuracy, 60, 8)
                .unwrap();
        }
        // 241 / 3 = 80.33
        assert_eq!(tracker.average_accuracy(), 80);

        tracker
            .add_session(BodyPart::Back, &exercise(), 81.0, 60, 8)
            .unwrap();
        // 322 / 4 = 80.5 rounds up
        assert_eq!(tracker.average_accuracy(), 81);
    }

    #[test]
    fn test_weekly_progress_window() {
        let (mut tracker, _store, clock) = tracker();
        for _ in 0..3 {
            tracker
                .add_session(BodyPart::Knees, &exercise(), 80.0, 30, 10)
                .unwrap();
            clock.advance(Duration::days(3));
        }

        // Now = start + 9 days: only the sessions from day 3 and day 6 remain
        let weekly: Vec<_> = tracker.weekly_progress().collect();
        assert_eq!(weekly.len(), 2);
        assert_eq!(weekly[0].timestamp, start() + Duration::days(3));
        assert_eq!(weekly[1].timestamp, start() + Duration::days(6));

        // Recomputed on every call
        clock.advance(Duration::days(30));
        assert_eq!(tracker.weekly_progress().count(), 0);
    }

    #[test]
    fn test_week_boundary_is_exclusive() {
        let (mut tracker, _store, clock) = tracker();
        tracker
            .add_session(BodyPart::Knees, &exercise(), 80.0, 30, 10)
            .unwrap();

        clock.advance(Duration::days(7));
        assert_eq!(tracker.weekly_progress().count(), 0);
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let (mut tracker, store, _clock) = tracker();
        store.set_fail_writes(true);

        let err = tracker
            .add_session(BodyPart::Neck, &exercise(), 96.0, 30, 10)
            .unwrap_err();
        assert!(matches!(err, ProgressError::NotSaved { .. }));
        assert_eq!(err.recorded().unwrap().unlocked.len(), 2);

        assert_eq!(tracker.sessions().len(), 1);
        assert_eq!(tracker.streak().current, 1);
        assert!(store.get("physioVedaSessions").unwrap().is_none());

        // Later successful save writes the full state
        store.set_fail_writes(false);
        tracker
            .add_session(BodyPart::Neck, &exercise(), 50.0, 30, 10)
            .unwrap();
        assert_eq!(KeyValueBackend::new(store).load().sessions.len(), 2);
    }

    #[test]
    fn test_non_finite_accuracy_is_rejected() {
        let (mut tracker, store, _clock) = tracker();
        for accuracy in [70.0, 80.0, 90.0] {
            tracker
                .add_session(BodyPart::Neck, &exercise(), accuracy, 30, 10)
                .unwrap();
        }

        for accuracy in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = tracker
                .add_session(BodyPart::Neck, &exercise(), accuracy, 30, 10)
                .unwrap_err();
            assert!(matches!(err, ProgressError::InvalidAccuracy(_)));
            assert!(err.recorded().is_none());
        }

        assert_eq!(tracker.sessions().len(), 3);
        assert_eq!(tracker.average_accuracy(), 80);

        // History written so far still reloads in full
        let reloaded = KeyValueBackend::new(store).load();
        assert_eq!(reloaded.sessions.len(), 3);
        assert_eq!(reloaded, tracker.state());
    }

    #[test]
    fn test_check_achievements_never_reemits() {
        let (mut tracker, _store, _clock) = tracker();
        let recorded = tracker
            .add_session(BodyPart::Neck, &exercise(), 96.0, 30, 10)
            .unwrap();

        assert!(tracker.check_achievements(&recorded.session).unwrap().is_empty());
        assert_eq!(tracker.achievements().len(), 2);
    }

    #[test]
    fn test_progress_survives_restart() {
        let (mut tracker, store, clock) = tracker();
        tracker
            .add_session(BodyPart::Neck, &exercise(), 80.0, 30, 10)
            .unwrap();
        clock.advance(Duration::days(1));
        tracker
            .add_session(BodyPart::Neck, &exercise(), 80.0, 30, 10)
            .unwrap();

        let restarted = ProgressTracker::new(KeyValueBackend::new(store), clock.clone());
        assert_eq!(restarted.sessions().len(), 2);
        assert_eq!(restarted.streak(), StreakState::new(2, 2));
        assert!(restarted
            .achievement_statuses()
            .iter()
            .any(|s| s.id == AchievementId::FirstSession && s.unlocked_at == Some(start())));
    }

    #[test]
    fn test_seven_day_streak_unlocks() {
        let (mut tracker, _store, clock) = tracker();
        let mut unlocked_on = None;
        for day in 1..=8 {
            let recorded = tracker
                .add_session(BodyPart::Core, &exercise(), 70.0, 30, 10)
                .unwrap();
            if recorded.unlocked.iter().any(|a| a.id == AchievementId::Streak7) {
                assert!(unlocked_on.is_none());
                unlocked_on = Some(day);
            }
            clock.advance(Duration::days(1));
        }
        assert_eq!(unlocked_on, Some(7));
        assert_eq!(tracker.streak(), StreakState::new(8, 8));
    }

    #[test]
    fn test_from_config_memory_backend() {
        let mut config = ProgressConfig::default();
        config.storage.backend = crate::config::StorageKind::Memory;
        config.calendar.utc_offset_minutes = 120;

        let tracker = ProgressTracker::from_config(&config).unwrap();
        assert!(tracker.sessions().is_empty());
        assert_eq!(tracker.settings().calendar_offset.local_minus_utc(), 7200);
    }
}
