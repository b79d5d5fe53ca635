//! Progress aggregation: the daily checklist, the challenge-day counter and
//! the monthly views. Everything recomputes from the store on demand; the
//! volumes involved are one user's month of button presses.
//!
//! Each entry point has an `_at` variant taking an explicit date so tests
//! control the clock.

use chrono::{Local, NaiveDate};

use crate::errors::Error;
use crate::goals::{CATALOG, GoalDef};
use crate::store::{Store, YearMonth};

/// Calendar date in local time; every "today" default resolves through here.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// One checklist row.
#[derive(Debug, Clone, Copy)]
pub struct GoalStatus {
    pub goal: &'static GoalDef,
    pub done: bool,
}

/// The six-goal checklist for one day.
#[derive(Debug, Clone)]
pub struct DailyProgress {
    pub entries: Vec<GoalStatus>,
    pub completed: usize,
    pub total: usize,
    /// Sum of the weights of completed goals; 100 on a perfect day.
    pub percent: u32,
}

impl DailyProgress {
    pub fn is_perfect(&self) -> bool {
        self.completed == self.total
    }
}

pub async fn daily_progress(
    store: &Store,
    user_id: i64,
    date: NaiveDate,
) -> Result<DailyProgress, Error> {
    let done_ids = store.completed_goal_ids(user_id, date).await?;

    let mut entries = Vec::with_capacity(CATALOG.len());
    let mut completed = 0;
    let mut percent = 0;
    for goal in &CATALOG {
        let done = done_ids.contains(&goal.id);
        if done {
            completed += 1;
            percent += goal.weight;
        }
        entries.push(GoalStatus { goal, done });
    }

    Ok(DailyProgress {
        entries,
        completed,
        total: CATALOG.len(),
        percent,
    })
}

/// 1-based day number while the challenge runs, `None` once the user opted
/// out or never registered.
pub async fn challenge_day(store: &Store, user_id: i64) -> Result<Option<i64>, Error> {
    challenge_day_at(store, user_id, today()).await
}

pub async fn challenge_day_at(
    store: &Store,
    user_id: i64,
    today: NaiveDate,
) -> Result<Option<i64>, Error> {
    let Some(status) = store.challenge_status(user_id).await? else {
        return Ok(None);
    };
    if !status.active {
        return Ok(None);
    }
    // Whole calendar days, so the time of day never moves the counter.
    Ok(Some((today - status.start_date).num_days() + 1))
}

/// Per-day totals for the current month, most recent day first.
pub async fn month_history(store: &Store, user_id: i64) -> Result<Vec<(NaiveDate, i64)>, Error> {
    month_history_at(store, user_id, today()).await
}

pub async fn month_history_at(
    store: &Store,
    user_id: i64,
    today: NaiveDate,
) -> Result<Vec<(NaiveDate, i64)>, Error> {
    let mut totals = store
        .daily_totals_for_month(user_id, YearMonth::of(today))
        .await?;
    totals.reverse();
    Ok(totals)
}

/// Grand total for the current month.
pub async fn month_summary(store: &Store, user_id: i64) -> Result<i64, Error> {
    month_summary_at(store, user_id, today()).await
}

pub async fn month_summary_at(
    store: &Store,
    user_id: i64,
    today: NaiveDate,
) -> Result<i64, Error> {
    store.month_total(user_id, YearMonth::of(today)).await
}
