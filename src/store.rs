//! SQLite persistence: user profiles and the append-only achievement log.
//!
//! Dates are stored as `YYYY-MM-DD` text so the month queries can filter
//! with `strftime('%Y-%m', date)`. Duplicate logs of the same goal on the
//! same day are kept as separate rows.

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::warn;

use crate::errors::Error;
use crate::goals::{Category, GoalId};

/// Month filter key; renders as `YYYY-MM` to match the stored date prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    fn key(self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Challenge state from a user's profile row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeStatus {
    pub start_date: NaiveDate,
    pub active: bool,
}

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open the database at `path`, creating the file and schema if missing.
    pub async fn connect(path: &Path) -> Result<Self, Error> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;

        Self::init_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// In-memory database, used by tests. A single connection keeps every
    /// query on the same database.
    pub async fn connect_in_memory() -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Self::init_schema(&pool).await?;
        Ok(Self { pool })
    }

    async fn init_schema(pool: &SqlitePool) -> Result<(), Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY,
                username TEXT,
                first_name TEXT NOT NULL,
                challenge_start_date TEXT NOT NULL,
                challenge_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS achievements (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                category TEXT NOT NULL,
                goal TEXT NOT NULL,
                points INTEGER NOT NULL,
                date TEXT NOT NULL
            )",
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_achievements_user_date
             ON achievements (user_id, date)",
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Register a user on first contact. Re-registration keeps the original
    /// challenge start date and active flag.
    pub async fn create_user_if_absent(
        &self,
        user_id: i64,
        username: Option<&str>,
        first_name: &str,
        today: NaiveDate,
    ) -> Result<(), Error> {
        sqlx::query(
            "INSERT OR IGNORE INTO users (user_id, username, first_name, challenge_start_date, challenge_active)
             VALUES (?, ?, ?, ?, 1)",
        )
        .bind(user_id)
        .bind(username)
        .bind(first_name)
        .bind(today)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn record_achievement(
        &self,
        user_id: i64,
        category: Category,
        goal: GoalId,
        points: i64,
        date: NaiveDate,
    ) -> Result<(), Error> {
        sqlx::query(
            "INSERT INTO achievements (user_id, category, goal, points, date)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(category.as_str())
        .bind(goal.as_str())
        .bind(points)
        .bind(date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Total points logged on `date`.
    pub async fn sum_points(&self, user_id: i64, date: NaiveDate) -> Result<i64, Error> {
        let total: Option<i64> = sqlx::query_scalar(
            "SELECT SUM(points) FROM achievements WHERE user_id = ? AND date = ?",
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;
        Ok(total.unwrap_or(0))
    }

    /// Per-category point totals for `date`. Rows with a category this build
    /// no longer knows are skipped with a warning.
    pub async fn points_by_category(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<(Category, i64)>, Error> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT category, SUM(points) FROM achievements
             WHERE user_id = ? AND date = ?
             GROUP BY category ORDER BY category",
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(name, points)| match Category::parse(&name) {
                Some(category) => Some((category, points)),
                None => {
                    warn!("skipping unknown category in achievements: {name}");
                    None
                }
            })
            .collect())
    }

    /// Distinct goals with at least one log on `date`, for the checklist.
    pub async fn completed_goal_ids(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<HashSet<GoalId>, Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT goal FROM achievements WHERE user_id = ? AND date = ?",
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        let mut completed = HashSet::new();
        for (name,) in rows {
            match GoalId::parse(&name) {
                Some(goal) => {
                    completed.insert(goal);
                }
                None => warn!("skipping unknown goal in achievements: {name}"),
            }
        }
        Ok(completed)
    }

    /// Per-day totals within `month`, oldest first. Days without logs do not
    /// appear.
    pub async fn daily_totals_for_month(
        &self,
        user_id: i64,
        month: YearMonth,
    ) -> Result<Vec<(NaiveDate, i64)>, Error> {
        let rows: Vec<(NaiveDate, i64)> = sqlx::query_as(
            "SELECT date, SUM(points) FROM achievements
             WHERE user_id = ? AND strftime('%Y-%m', date) = ?
             GROUP BY date ORDER BY date",
        )
        .bind(user_id)
        .bind(month.key())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn month_total(&self, user_id: i64, month: YearMonth) -> Result<i64, Error> {
        let total: Option<i64> = sqlx::query_scalar(
            "SELECT SUM(points) FROM achievements
             WHERE user_id = ? AND strftime('%Y-%m', date) = ?",
        )
        .bind(user_id)
        .bind(month.key())
        .fetch_one(&self.pool)
        .await?;
        Ok(total.unwrap_or(0))
    }

    /// `None` for users that never registered.
    pub async fn challenge_status(&self, user_id: i64) -> Result<Option<ChallengeStatus>, Error> {
        let row: Option<(NaiveDate, bool)> = sqlx::query_as(
            "SELECT challenge_start_date, challenge_active FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(start_date, active)| ChallengeStatus { start_date, active }))
    }

    /// Stop the day counter. Logged points stay untouched; calling this for
    /// an already inactive (or unknown) user changes nothing.
    pub async fn deactivate_challenge(&self, user_id: i64) -> Result<(), Error> {
        sqlx::query("UPDATE users SET challenge_active = 0 WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
