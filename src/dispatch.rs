//! Button dispatch: resolves each inbound press to an [`Intent`] and runs
//! the handler behind it. The transport stays behind [`Channel`], so the
//! whole conversation is testable without a network.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::time::sleep;
use tracing::info;

use crate::chart::{self, ChartImage};
use crate::errors::Error;
use crate::goals::Achievement;
use crate::menu::{self, Button, Keyboard};
use crate::progress::{self, today};
use crate::render;
use crate::state::Sessions;
use crate::store::Store;

/// An inbound button press, already stripped of transport detail.
#[derive(Debug, Clone)]
pub struct Inbound {
    pub chat_id: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub text: String,
}

/// Outbound side of the conversation.
#[async_trait]
pub trait Channel {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<(), Error>;

    async fn send_chart(
        &self,
        chat_id: i64,
        chart: &ChartImage,
        caption: &str,
    ) -> Result<(), Error>;
}

/// What a press means, given the session state it arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Start,
    ShowBodyMenu,
    ShowMindMenu,
    ShowChineseMenu,
    ShowStatsMenu,
    ShowChallengeMenu,
    Log(Achievement),
    Back,
    AskLeave,
    ConfirmLeave,
    DeclineLeave,
    TodayStats,
    MonthHistory,
    ProgressChart,
    MonthTotal,
    Ignore,
}

/// Derive the intent from the pending-confirmation flag and the text.
///
/// While a confirmation is pending only the two answer buttons are special;
/// any other known button falls through to its normal meaning and the flag
/// stays set. Unknown text maps to [`Intent::Ignore`]: the client keyboard
/// is the only input surface, so anything else is a stale keyboard or
/// free-typed text.
pub fn resolve_intent(awaiting_leave: bool, text: &str) -> Intent {
    if text == "/start" {
        return Intent::Start;
    }
    let Some(button) = Button::from_label(text) else {
        return Intent::Ignore;
    };

    if awaiting_leave {
        match button {
            Button::ConfirmLeave => return Intent::ConfirmLeave,
            Button::DeclineLeave => return Intent::DeclineLeave,
            _ => {}
        }
    }

    match button {
        Button::Body => Intent::ShowBodyMenu,
        Button::Mind => Intent::ShowMindMenu,
        Button::Meditation => Intent::Log(Achievement::MEDITATION),
        Button::Statistics => Intent::ShowStatsMenu,
        Button::ChallengeSettings => Intent::ShowChallengeMenu,
        Button::Steps => Intent::Log(Achievement::STEPS),
        Button::Workout => Intent::Log(Achievement::WORKOUT),
        Button::Reading => Intent::Log(Achievement::READING),
        Button::Chinese => Intent::ShowChineseMenu,
        Button::ChineseOneHour => Intent::Log(Achievement::CHINESE_ONE_HOUR),
        Button::ChineseTwoHours => Intent::Log(Achievement::CHINESE_TWO_HOURS),
        Button::Thesis => Intent::Log(Achievement::THESIS),
        Button::TodayStats => Intent::TodayStats,
        Button::MonthHistory => Intent::MonthHistory,
        Button::ProgressChart => Intent::ProgressChart,
        Button::MonthTotal => Intent::MonthTotal,
        Button::LeaveChallenge => Intent::AskLeave,
        // Answer buttons without a pending question are stale keyboards.
        Button::ConfirmLeave | Button::DeclineLeave => Intent::Ignore,
        Button::Back => Intent::Back,
    }
}

pub struct Dispatcher {
    store: Store,
    sessions: Sessions,
    /// Delay between the two replies of the logging flow; zero in tests.
    pause: Duration,
}

impl Dispatcher {
    pub fn new(store: Store, pause: Duration) -> Self {
        Self {
            store,
            sessions: Sessions::new(),
            pause,
        }
    }

    /// Handle one press to completion. A storage or send failure bubbles up
    /// so the polling loop can log it and notify the user.
    pub async fn handle<C: Channel>(&self, channel: &C, inbound: &Inbound) -> Result<(), Error> {
        let awaiting = self.sessions.awaiting_leave(inbound.user_id).await;
        let intent = resolve_intent(awaiting, &inbound.text);

        match intent {
            Intent::Start => self.start(channel, inbound).await,
            Intent::ShowBodyMenu => {
                channel
                    .send_text(inbound.chat_id, render::BODY_PROMPT, Some(menu::BODY_MENU))
                    .await
            }
            Intent::ShowMindMenu => {
                channel
                    .send_text(inbound.chat_id, render::MIND_PROMPT, Some(menu::MIND_MENU))
                    .await
            }
            Intent::ShowChineseMenu => {
                channel
                    .send_text(
                        inbound.chat_id,
                        render::CHINESE_PROMPT,
                        Some(menu::CHINESE_MENU),
                    )
                    .await
            }
            Intent::ShowStatsMenu => {
                channel
                    .send_text(
                        inbound.chat_id,
                        render::STATS_PROMPT,
                        Some(menu::STATS_MENU),
                    )
                    .await
            }
            Intent::ShowChallengeMenu => self.challenge_menu(channel, inbound).await,
            Intent::Log(achievement) => self.log_achievement(channel, inbound, achievement).await,
            Intent::Back => self.show_progress(channel, inbound).await,
            Intent::AskLeave => self.ask_leave(channel, inbound).await,
            Intent::ConfirmLeave => self.confirm_leave(channel, inbound).await,
            Intent::DeclineLeave => self.decline_leave(channel, inbound).await,
            Intent::TodayStats => self.today_stats(channel, inbound).await,
            Intent::MonthHistory => self.month_history(channel, inbound).await,
            Intent::ProgressChart => self.progress_chart(channel, inbound).await,
            Intent::MonthTotal => self.month_total(channel, inbound).await,
            Intent::Ignore => Ok(()),
        }
    }

    async fn start<C: Channel>(&self, channel: &C, inbound: &Inbound) -> Result<(), Error> {
        let date = today();
        self.store
            .create_user_if_absent(
                inbound.user_id,
                inbound.username.as_deref(),
                &inbound.first_name,
                date,
            )
            .await?;
        info!(user_id = inbound.user_id, "start");

        let (day, daily) = self.day_and_progress(inbound.user_id, date).await?;
        channel
            .send_text(
                inbound.chat_id,
                &render::greeting(date, day, &daily),
                Some(menu::TOP_MENU),
            )
            .await
    }

    async fn show_progress<C: Channel>(&self, channel: &C, inbound: &Inbound) -> Result<(), Error> {
        let date = today();
        let (day, daily) = self.day_and_progress(inbound.user_id, date).await?;
        channel
            .send_text(
                inbound.chat_id,
                &render::progress_view(date, day, &daily),
                Some(menu::TOP_MENU),
            )
            .await
    }

    async fn log_achievement<C: Channel>(
        &self,
        channel: &C,
        inbound: &Inbound,
        achievement: Achievement,
    ) -> Result<(), Error> {
        let date = today();
        self.store
            .record_achievement(
                inbound.user_id,
                achievement.category(),
                achievement.goal,
                achievement.points,
                date,
            )
            .await?;
        info!(
            user_id = inbound.user_id,
            goal = achievement.goal.as_str(),
            points = achievement.points,
            "achievement recorded"
        );

        let day = progress::challenge_day(&self.store, inbound.user_id).await?;
        channel
            .send_text(
                inbound.chat_id,
                &render::achievement_confirmation(achievement, day),
                None,
            )
            .await?;

        // Small pause so the two replies arrive as separate bubbles.
        sleep(self.pause).await;

        let daily = progress::daily_progress(&self.store, inbound.user_id, date).await?;
        channel
            .send_text(
                inbound.chat_id,
                &render::achievement_followup(&daily),
                Some(menu::TOP_MENU),
            )
            .await
    }

    async fn challenge_menu<C: Channel>(
        &self,
        channel: &C,
        inbound: &Inbound,
    ) -> Result<(), Error> {
        match progress::challenge_day(&self.store, inbound.user_id).await? {
            Some(day) => {
                channel
                    .send_text(
                        inbound.chat_id,
                        &render::challenge_overview(day),
                        Some(menu::CHALLENGE_MENU),
                    )
                    .await
            }
            None => {
                channel
                    .send_text(
                        inbound.chat_id,
                        render::NO_ACTIVE_CHALLENGE,
                        Some(menu::CHALLENGE_MENU_INACTIVE),
                    )
                    .await
            }
        }
    }

    async fn ask_leave<C: Channel>(&self, channel: &C, inbound: &Inbound) -> Result<(), Error> {
        self.sessions.begin_leave(inbound.user_id).await;
        channel
            .send_text(
                inbound.chat_id,
                render::LEAVE_WARNING,
                Some(menu::LEAVE_CONFIRM),
            )
            .await
    }

    async fn confirm_leave<C: Channel>(&self, channel: &C, inbound: &Inbound) -> Result<(), Error> {
        // Deactivate before clearing the flag: if the update fails the
        // question stays pending and the answer can be retried.
        self.store.deactivate_challenge(inbound.user_id).await?;
        self.sessions.clear(inbound.user_id).await;
        info!(user_id = inbound.user_id, "challenge deactivated");
        channel
            .send_text(
                inbound.chat_id,
                render::LEAVE_CONFIRMED,
                Some(menu::RESTART_ONLY),
            )
            .await
    }

    async fn decline_leave<C: Channel>(&self, channel: &C, inbound: &Inbound) -> Result<(), Error> {
        self.sessions.clear(inbound.user_id).await;
        self.show_progress(channel, inbound).await
    }

    async fn today_stats<C: Channel>(&self, channel: &C, inbound: &Inbound) -> Result<(), Error> {
        let date = today();
        let total = self.store.sum_points(inbound.user_id, date).await?;
        let by_category = self.store.points_by_category(inbound.user_id, date).await?;
        channel
            .send_text(
                inbound.chat_id,
                &render::today_stats(date, total, &by_category),
                None,
            )
            .await
    }

    async fn month_history<C: Channel>(&self, channel: &C, inbound: &Inbound) -> Result<(), Error> {
        let history = progress::month_history(&self.store, inbound.user_id).await?;
        if history.is_empty() {
            return channel
                .send_text(inbound.chat_id, render::EMPTY_MONTH, None)
                .await;
        }
        channel
            .send_text(
                inbound.chat_id,
                &render::month_history(today(), &history),
                None,
            )
            .await
    }

    async fn progress_chart<C: Channel>(
        &self,
        channel: &C,
        inbound: &Inbound,
    ) -> Result<(), Error> {
        let mut history = progress::month_history(&self.store, inbound.user_id).await?;
        // The chart reads oldest to newest.
        history.reverse();
        let points: Vec<(String, i64)> = history
            .into_iter()
            .map(|(date, points)| (date.format("%d.%m").to_string(), points))
            .collect();

        match chart::line_chart("Monthly progress", &points) {
            Some(image) => {
                channel
                    .send_chart(inbound.chat_id, &image, render::CHART_CAPTION)
                    .await
            }
            None => {
                channel
                    .send_text(inbound.chat_id, render::NO_CHART_DATA, None)
                    .await
            }
        }
    }

    async fn month_total<C: Channel>(&self, channel: &C, inbound: &Inbound) -> Result<(), Error> {
        let total = progress::month_summary(&self.store, inbound.user_id).await?;
        channel
            .send_text(inbound.chat_id, &render::month_total(today(), total), None)
            .await
    }

    async fn day_and_progress(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<(Option<i64>, progress::DailyProgress), Error> {
        let day = progress::challenge_day(&self.store, user_id).await?;
        let daily = progress::daily_progress(&self.store, user_id, date).await?;
        Ok((day, daily))
    }
}
