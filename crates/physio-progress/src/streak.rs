//! Daily practice streaks.
//!
//! The streak only advances when the newest session falls on today's date.
//! It then compares against the session recorded immediately before it:
//!
//! - previous session on yesterday's date: `current + 1`
//! - anything else (no previous session, same day, older gap): reset to 1
//!
//! A second session on the same day therefore resets `current` to 1. This
//! is not a distinct-day counter.

use chrono::{DateTime, FixedOffset, Utc};
use physio_core::calendar_date;
use serde::{Deserialize, Serialize};

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakState {
    pub current: u32,
    pub longest: u32,
}

impl StreakState {
    pub fn new(current: u32, longest: u32) -> Self {
        Self {
            current,
            longest: longest.max(current),
        }
    }

    /// Updates the streak after `sessions` gained a new last entry.
    /// Returns `false` when the newest session is not dated today.
    pub fn record(&mut self, sessions: &[Session], now: DateTime<Utc>, offset: FixedOffset) -> bool {
        let Some((latest, earlier)) = sessions.split_last() else {
            return false;
        };

        let today = calendar_date(now, offset);
        if calendar_date(latest.timestamp, offset) != today {
            return false;
        }

        let yesterday = today.pred_opt();
        self.current = match earlier.last() {
            Some(previous) if Some(calendar_date(previous.timestamp, offset)) == yesterday => {
                self.current.saturating_add(1)
            }
            _ => 1,
        };
        self.longest = self.longest.max(self.current);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionId;
    use chrono::{Duration, TimeZone};
    use physio_core::{BodyPart, Difficulty};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn day(d: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, hour, 0, 0).unwrap()
    }

    fn session_at(timestamp: DateTime<Utc>) -> Session {
        Session {
            id: SessionId::new(),
            timestamp,
            body_part: BodyPart::Back,
            exercise_name: "Thoracic Extension".to_string(),
            accuracy: 80.0,
            duration_secs: 60,
            rep_count: 12,
            difficulty: Difficulty::Intermediate,
        }
    }

    /// Appends a session at `now` and updates the streak like the tracker does
    fn practice(streak: &mut StreakState, sessions: &mut Vec<Session>, now: DateTime<Utc>) {
        sessions.push(session_at(now));
        streak.record(sessions, now, utc());
    }

    #[test]
    fn test_first_session_starts_streak() {
        let mut streak = StreakState::default();
        let mut sessions = Vec::new();
        practice(&mut streak, &mut sessions, day(1, 9));
        assert_eq!(streak, StreakState::new(1, 1));
    }

    #[test]
    fn test_consecutive_days_extend_streak() {
        let mut streak = StreakState::default();
        let mut sessions = Vec::new();
        for d in 1..=7 {
            practice(&mut streak, &mut sessions, day(d, 18));
        }
        assert_eq!(streak.current, 7);
        assert_eq!(streak.longest, 7);
    }

    #[test]
    fn test_same_day_session_resets_to_one() {
        let mut streak = StreakState::default();
        let mut sessions = Vec::new();
        practice(&mut streak, &mut sessions, day(1, 9));
        practice(&mut streak, &mut sessions, day(2, 9));
        assert_eq!(streak.current, 2);

        practice(&mut streak, &mut sessions, day(2, 17));
        assert_eq!(streak.current, 1);
        assert_eq!(streak.longest, 2);
    }

    #[test]
    fn test_gap_resets_but_keeps_longest() {
        let mut streak = StreakState::default();
        let mut sessions = Vec::new();
        for d in 1..=3 {
            practice(&mut streak, &mut sessions, day(d, 12));
        }
        practice(&mut streak, &mut sessions, day(6, 12));
        assert_eq!(streak, StreakState::new(1, 3));
    }

    #[test]
    fn test_session_not_dated_today_is_ignored() {
        let mut streak = StreakState::new(4, 9);
        let sessions = vec![session_at(day(1, 12))];
        assert!(!streak.record(&sessions, day(1, 12) + Duration::days(1), utc()));
        assert_eq!(streak, StreakState::new(4, 9));

        assert!(!streak.record(&[], day(1, 12), utc()));
    }

    #[test]
    fn test_offset_moves_day_boundary() {
        // Same UTC day, but 23:00 and 00:30 on consecutive days at UTC+1
        let plus_one = FixedOffset::east_opt(3600).unwrap();
        let first = Utc.with_ymd_and_hms(2024, 3, 1, 22, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 3, 1, 23, 30, 0).unwrap();

        let mut local = StreakState::default();
        let mut in_utc = StreakState::default();
        let mut sessions = vec![session_at(first)];
        local.record(&sessions, first, plus_one);
        in_utc.record(&sessions, first, utc());

        sessions.push(session_at(second));
        local.record(&sessions, second, plus_one);
        in_utc.record(&sessions, second, utc());

        assert_eq!(local.current, 2);
        assert_eq!(in_utc.current, 1);
    }

    #[test]
    fn test_saturates_at_max() {
        let mut streak = StreakState::new(u32::MAX, u32::MAX);
        let sessions = vec![session_at(day(1, 9)), session_at(day(2, 9))];
        assert!(streak.record(&sessions, day(2, 9), utc()));
        assert_eq!(streak, StreakState::new(u32::MAX, u32::MAX));
    }

    #[test]
    fn test_longest_never_below_current() {
        let mut streak = StreakState::default();
        let mut sessions = Vec::new();
        let mut now = day(1, 8);
        for step in 0..40 {
            let gap = [Duration::hours(3), Duration::days(1), Duration::days(2)][step % 3];
            now += gap;
            practice(&mut streak, &mut sessions, now);
            assert!(streak.longest >= streak.current);
        }
    }
}
