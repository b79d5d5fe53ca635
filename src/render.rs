//! Message formatting. Every piece of user-facing copy lives here so the
//! dispatcher stays free of literal text.

use chrono::NaiveDate;

use crate::goals::{Achievement, Category};
use crate::progress::DailyProgress;

pub const GENERIC_FAILURE: &str = "⚠️ Something went wrong. Please try again.";
pub const BODY_PROMPT: &str = "What did you do for your body?";
pub const MIND_PROMPT: &str = "What did you do for your mind?";
pub const CHINESE_PROMPT: &str = "How long did you study Chinese?";
pub const STATS_PROMPT: &str = "📊 Pick a statistics view:";
pub const EMPTY_MONTH: &str = "📅 No achievements this month yet!";
pub const NO_CHART_DATA: &str = "📊 Not enough data for a chart yet!";
pub const CHART_CAPTION: &str = "📈 Your progress this month!";
pub const NO_ACTIVE_CHALLENGE: &str =
    "🎯 You have no active challenge.\nStart a new one with /start!";
pub const LEAVE_WARNING: &str = "⚠️ Are you sure you want to leave the challenge?\n\n\
    📊 Your points will be kept, but the day counter stops.\n\
    This cannot be undone!";
pub const LEAVE_CONFIRMED: &str = "🎯 Challenge finished! Your points are kept, \
    but the day counter has stopped.\nYou can always start a new one!";

pub fn challenge_banner(day: Option<i64>) -> String {
    match day {
        Some(day) => format!("🎯 Challenge day: {day}"),
        None => "🎯 Challenge finished".to_string(),
    }
}

/// The six-line checklist with the completion percentage underneath.
pub fn checklist(progress: &DailyProgress) -> String {
    let mut text = String::from("📊 Daily goals:\n\n");
    for entry in &progress.entries {
        let mark = if entry.done { "✅" } else { "⭕" };
        text.push_str(&format!("{mark} {} {}\n", entry.goal.emoji, entry.goal.title));
    }
    text.push_str(&format!("\n📈 Progress: {}% complete", progress.percent));
    text
}

/// First reply to /start: introduction, date, day counter, checklist.
pub fn greeting(today: NaiveDate, day: Option<i64>, progress: &DailyProgress) -> String {
    format!(
        "Hi! I'm your daily achievement tracker. 🎯\nToday: {}\n{}\n\n{}",
        today.format("%d.%m.%Y"),
        challenge_banner(day),
        checklist(progress),
    )
}

/// The greeting without the introduction line; shown when returning to the
/// top menu.
pub fn progress_view(today: NaiveDate, day: Option<i64>, progress: &DailyProgress) -> String {
    format!(
        "Today: {}\n{}\n\n{}",
        today.format("%d.%m.%Y"),
        challenge_banner(day),
        checklist(progress),
    )
}

pub fn achievement_confirmation(achievement: Achievement, day: Option<i64>) -> String {
    format!(
        "🎉 +{} points for {}!\n{}",
        achievement.points,
        achievement.phrase,
        challenge_banner(day),
    )
}

/// Second message of the logging flow. A perfect day gets its own framing.
pub fn achievement_followup(progress: &DailyProgress) -> String {
    if progress.is_perfect() {
        format!(
            "🔥 Perfect day! Every goal is done. Keep the streak alive!\n\n{}",
            checklist(progress)
        )
    } else {
        format!("Keep going! Here's where you stand:\n\n{}", checklist(progress))
    }
}

/// Today's totals. Storage knows three categories but the report shows two
/// labels; everything that is not body folds into the mind line.
pub fn today_stats(today: NaiveDate, total: i64, by_category: &[(Category, i64)]) -> String {
    let mut body = 0;
    let mut mind = 0;
    for &(category, points) in by_category {
        match category {
            Category::Body => body += points,
            Category::Mind | Category::Mindfulness => mind += points,
        }
    }

    let mut text = format!(
        "📊 Today {}:\nTotal points: {total}\n\n",
        today.format("%d.%m.%Y")
    );
    if body > 0 {
        text.push_str(&format!("💪 Body: {body} points\n"));
    }
    if mind > 0 {
        text.push_str(&format!("🧠 Mind: {mind} points\n"));
    }
    text
}

pub fn month_history(today: NaiveDate, history: &[(NaiveDate, i64)]) -> String {
    let mut text = format!("📅 History for {}:\n\n", today.format("%B %Y"));
    for (date, points) in history {
        text.push_str(&format!("{}: {points} points\n", date.format("%d.%m")));
    }
    text
}

pub fn month_total(today: NaiveDate, total: i64) -> String {
    format!(
        "💰 Total for {}: {total} points!\nKeep it up! 💥",
        today.format("%B %Y")
    )
}

pub fn challenge_overview(day: i64) -> String {
    format!(
        "🎯 Current challenge: day {day}\n\n\
        You can leave the challenge if you need a break.\n\
        Your points will be kept, but the day counter stops."
    )
}
