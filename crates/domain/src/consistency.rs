use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use crate::WorkoutSessionEntry;

/// Number of days, including today, taken into account for the consistency summary.
pub const LOOKBACK_DAYS: u32 = 14;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ConsistencySummary {
    /// Consecutive days with a session, counted backwards from today.
    pub streak: u32,
    pub adherence_percent: f32,
}

/// Summarize how consistently the user trained during the last [`LOOKBACK_DAYS`].
///
/// A day without a session today resets the streak, even if the user trained yesterday.
/// Several sessions on the same day count as one day.
#[must_use]
pub fn build_consistency_summary(
    sessions: &[WorkoutSessionEntry],
    today: NaiveDate,
) -> ConsistencySummary {
    let window_start = today - Duration::days(i64::from(LOOKBACK_DAYS) - 1);
    let dates = sessions
        .iter()
        .map(|s| s.date)
        .filter(|date| (window_start..=today).contains(date))
        .collect::<BTreeSet<_>>();

    let streak = (0..LOOKBACK_DAYS)
        .map(|offset| today - Duration::days(i64::from(offset)))
        .take_while(|day| dates.contains(day))
        .fold(0, |streak, _| streak + 1);

    ConsistencySummary {
        streak,
        adherence_percent: adherence_percent(dates.len()),
    }
}

/// Share of the lookback window with at least one session, capped at 100.
#[must_use]
pub fn adherence_percent(distinct_days: usize) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let percent = distinct_days as f32 / LOOKBACK_DAYS as f32 * 100.0;
    percent.min(100.0)
}
