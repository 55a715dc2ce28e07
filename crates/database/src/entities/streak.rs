//! Study streak entity and the day-to-day transition rule

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserStreak {
    pub profile_id: String,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub last_activity_date: Option<NaiveDate>,
    pub updated_at: String,
}

impl UserStreak {
    pub fn empty(profile_id: impl Into<String>, updated_at: impl Into<String>) -> Self {
        Self {
            profile_id: profile_id.into(),
            current_streak: 0,
            longest_streak: 0,
            last_activity_date: None,
            updated_at: updated_at.into(),
        }
    }

    /// Apply a study day to the streak.
    ///
    /// Logging again on the same day leaves the counters alone, logging on
    /// the day after the last activity extends the streak, and any other gap
    /// restarts it at one.
    pub fn record_activity(&mut self, today: NaiveDate) {
        let next = match self.last_activity_date {
            Some(last) if last == today => self.current_streak,
            Some(last) if last.succ_opt() == Some(today) => self.current_streak + 1,
            _ => 1,
        };

        self.current_streak = next;
        self.longest_streak = self.longest_streak.max(next);
        self.last_activity_date = Some(today);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn first_activity_starts_a_streak() {
        let mut streak = UserStreak::empty("p", "");
        streak.record_activity(day(1));
        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.longest_streak, 1);
        assert_eq!(streak.last_activity_date, Some(day(1)));
    }

    #[test]
    fn same_day_leaves_streak_unchanged() {
        let mut streak = UserStreak::empty("p", "");
        streak.record_activity(day(1));
        streak.record_activity(day(2));
        streak.record_activity(day(2));
        assert_eq!(streak.current_streak, 2);
        assert_eq!(streak.longest_streak, 2);
    }

    #[test]
    fn consecutive_days_extend_and_gaps_reset() {
        let mut streak = UserStreak::empty("p", "");
        for d in 1..=4 {
            streak.record_activity(day(d));
        }
        assert_eq!(streak.current_streak, 4);

        streak.record_activity(day(10));
        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.longest_streak, 4);
    }

    #[test]
    fn month_boundary_counts_as_consecutive() {
        let mut streak = UserStreak::empty("p", "");
        streak.record_activity(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        streak.record_activity(day(1));
        assert_eq!(streak.current_streak, 2);
    }
}
