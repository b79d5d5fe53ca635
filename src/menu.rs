//! Button vocabulary and reply-keyboard layouts.
//!
//! Inbound text never drives control flow directly: it is looked up here to
//! get a [`Button`], and the dispatcher derives an intent from the button
//! plus the session state. Renaming a label therefore happens in exactly one
//! place.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Body,
    Mind,
    Meditation,
    Statistics,
    ChallengeSettings,
    Steps,
    Workout,
    Reading,
    Chinese,
    ChineseOneHour,
    ChineseTwoHours,
    Thesis,
    TodayStats,
    MonthHistory,
    ProgressChart,
    MonthTotal,
    LeaveChallenge,
    ConfirmLeave,
    DeclineLeave,
    Back,
}

impl Button {
    pub const ALL: [Button; 20] = [
        Button::Body,
        Button::Mind,
        Button::Meditation,
        Button::Statistics,
        Button::ChallengeSettings,
        Button::Steps,
        Button::Workout,
        Button::Reading,
        Button::Chinese,
        Button::ChineseOneHour,
        Button::ChineseTwoHours,
        Button::Thesis,
        Button::TodayStats,
        Button::MonthHistory,
        Button::ProgressChart,
        Button::MonthTotal,
        Button::LeaveChallenge,
        Button::ConfirmLeave,
        Button::DeclineLeave,
        Button::Back,
    ];

    /// Exact label shown on the client keyboard.
    pub const fn label(self) -> &'static str {
        match self {
            Button::Body => "💪 Body",
            Button::Mind => "🧠 Mind",
            Button::Meditation => "🧘 Meditation",
            Button::Statistics => "📊 Statistics",
            Button::ChallengeSettings => "🔧 Challenge settings",
            Button::Steps => "🚶 10,000 steps",
            Button::Workout => "💪 Workout",
            Button::Reading => "📚 Reading 30 min",
            Button::Chinese => "🀅 Chinese",
            Button::ChineseOneHour => "🀅 1 hour",
            Button::ChineseTwoHours => "🀅 2 hours",
            Button::Thesis => "📝 Thesis",
            Button::TodayStats => "📈 Today's stats",
            Button::MonthHistory => "📅 Month history",
            Button::ProgressChart => "📊 Progress chart",
            Button::MonthTotal => "💰 Month total",
            Button::LeaveChallenge => "❌ Leave the challenge",
            Button::ConfirmLeave => "✅ Yes, leave",
            Button::DeclineLeave => "❌ No, keep going",
            Button::Back => "← Back",
        }
    }

    pub fn from_label(text: &str) -> Option<Button> {
        Button::ALL.into_iter().find(|button| button.label() == text)
    }
}

/// A reply-keyboard layout: rows of button labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: &'static [&'static [&'static str]],
}

pub const TOP_MENU: Keyboard = Keyboard {
    rows: &[
        &[
            Button::Body.label(),
            Button::Mind.label(),
            Button::Meditation.label(),
        ],
        &[Button::Statistics.label(), Button::ChallengeSettings.label()],
    ],
};

pub const BODY_MENU: Keyboard = Keyboard {
    rows: &[
        &[Button::Steps.label(), Button::Workout.label()],
        &[Button::Back.label()],
    ],
};

pub const MIND_MENU: Keyboard = Keyboard {
    rows: &[
        &[Button::Reading.label(), Button::Chinese.label()],
        &[Button::Thesis.label(), Button::Back.label()],
    ],
};

pub const CHINESE_MENU: Keyboard = Keyboard {
    rows: &[
        &[Button::ChineseOneHour.label(), Button::ChineseTwoHours.label()],
        &[Button::Back.label()],
    ],
};

pub const STATS_MENU: Keyboard = Keyboard {
    rows: &[
        &[Button::TodayStats.label(), Button::MonthHistory.label()],
        &[Button::ProgressChart.label(), Button::MonthTotal.label()],
        &[Button::Back.label()],
    ],
};

pub const CHALLENGE_MENU: Keyboard = Keyboard {
    rows: &[&[Button::LeaveChallenge.label()], &[Button::Back.label()]],
};

/// Challenge settings with nothing left to leave.
pub const CHALLENGE_MENU_INACTIVE: Keyboard = Keyboard {
    rows: &[&[Button::Back.label()]],
};

pub const LEAVE_CONFIRM: Keyboard = Keyboard {
    rows: &[&[Button::ConfirmLeave.label(), Button::DeclineLeave.label()]],
};

/// Shown after leaving; the only way forward is a fresh /start.
pub const RESTART_ONLY: Keyboard = Keyboard {
    rows: &[&["/start"]],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_label_maps_back_to_its_button() {
        for button in Button::ALL {
            assert_eq!(Button::from_label(button.label()), Some(button));
        }
    }

    #[test]
    fn labels_are_unique() {
        for (i, a) in Button::ALL.iter().enumerate() {
            for b in &Button::ALL[i + 1..] {
                assert_ne!(a.label(), b.label());
            }
        }
    }

    #[test]
    fn unknown_text_maps_to_nothing() {
        assert_eq!(Button::from_label("free-form message"), None);
        assert_eq!(Button::from_label(""), None);
        // Close misses must not match.
        assert_eq!(Button::from_label("💪 body"), None);
        assert_eq!(Button::from_label("💪 Body "), None);
    }

    #[test]
    fn menus_only_reference_known_labels() {
        for keyboard in [
            TOP_MENU,
            BODY_MENU,
            MIND_MENU,
            CHINESE_MENU,
            STATS_MENU,
            CHALLENGE_MENU,
            CHALLENGE_MENU_INACTIVE,
            LEAVE_CONFIRM,
        ] {
            for row in keyboard.rows {
                for label in *row {
                    assert!(Button::from_label(label).is_some(), "unknown label {label}");
                }
            }
        }
    }
}
