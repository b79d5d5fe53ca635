//! The fixed daily-goal catalog.
//!
//! Six goals, each with a point value and a completion weight; the weights
//! sum to 100 so a fully checked day reads as 100%. The catalog is compiled
//! in and never changes at runtime.

/// Coarse grouping used for sub-menus and per-category stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Body,
    Mind,
    Mindfulness,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Body => "body",
            Category::Mind => "mind",
            Category::Mindfulness => "mindfulness",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "body" => Some(Category::Body),
            "mind" => Some(Category::Mind),
            "mindfulness" => Some(Category::Mindfulness),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoalId {
    Workout,
    Meditation,
    Reading,
    Steps,
    Chinese,
    Thesis,
}

impl GoalId {
    pub fn as_str(self) -> &'static str {
        match self {
            GoalId::Workout => "workout",
            GoalId::Meditation => "meditation",
            GoalId::Reading => "reading",
            GoalId::Steps => "steps",
            GoalId::Chinese => "chinese",
            GoalId::Thesis => "thesis",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "workout" => Some(GoalId::Workout),
            "meditation" => Some(GoalId::Meditation),
            "reading" => Some(GoalId::Reading),
            "steps" => Some(GoalId::Steps),
            "chinese" => Some(GoalId::Chinese),
            "thesis" => Some(GoalId::Thesis),
            _ => None,
        }
    }

    /// Catalog entry for this goal. Relies on [`CATALOG`] matching the
    /// variant order.
    pub fn def(self) -> &'static GoalDef {
        &CATALOG[self as usize]
    }
}

/// One catalog entry.
#[derive(Debug)]
pub struct GoalDef {
    pub id: GoalId,
    pub category: Category,
    pub title: &'static str,
    pub emoji: &'static str,
    pub points: i64,
    /// Contribution to the daily completion percentage.
    pub weight: u32,
}

/// All goals in display order.
pub static CATALOG: [GoalDef; 6] = [
    GoalDef {
        id: GoalId::Workout,
        category: Category::Body,
        title: "Workout",
        emoji: "💪",
        points: 10,
        weight: 15,
    },
    GoalDef {
        id: GoalId::Meditation,
        category: Category::Mindfulness,
        title: "Meditation",
        emoji: "🧘",
        points: 5,
        weight: 10,
    },
    GoalDef {
        id: GoalId::Reading,
        category: Category::Mind,
        title: "Reading (30 min)",
        emoji: "📚",
        points: 5,
        weight: 15,
    },
    GoalDef {
        id: GoalId::Steps,
        category: Category::Body,
        title: "10,000 steps",
        emoji: "🚶",
        points: 10,
        weight: 20,
    },
    GoalDef {
        id: GoalId::Chinese,
        category: Category::Mind,
        title: "Chinese (1 hour)",
        emoji: "🀅",
        points: 10,
        weight: 20,
    },
    GoalDef {
        id: GoalId::Thesis,
        category: Category::Mind,
        title: "Thesis (1 page)",
        emoji: "📝",
        points: 10,
        weight: 20,
    },
];

/// A loggable variant of a goal: what one button press records, with the
/// phrase used in the confirmation reply. The two-hour Chinese variant
/// doubles the base points under the same goal id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub goal: GoalId,
    pub points: i64,
    pub phrase: &'static str,
}

impl Achievement {
    pub const WORKOUT: Achievement = Achievement {
        goal: GoalId::Workout,
        points: 10,
        phrase: "a workout",
    };
    pub const MEDITATION: Achievement = Achievement {
        goal: GoalId::Meditation,
        points: 5,
        phrase: "meditation",
    };
    pub const READING: Achievement = Achievement {
        goal: GoalId::Reading,
        points: 5,
        phrase: "30 minutes of reading",
    };
    pub const STEPS: Achievement = Achievement {
        goal: GoalId::Steps,
        points: 10,
        phrase: "10,000 steps",
    };
    pub const CHINESE_ONE_HOUR: Achievement = Achievement {
        goal: GoalId::Chinese,
        points: 10,
        phrase: "an hour of Chinese",
    };
    pub const CHINESE_TWO_HOURS: Achievement = Achievement {
        goal: GoalId::Chinese,
        points: 20,
        phrase: "two hours of Chinese",
    };
    pub const THESIS: Achievement = Achievement {
        goal: GoalId::Thesis,
        points: 10,
        phrase: "a thesis page",
    };

    pub fn category(self) -> Category {
        self.goal.def().category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_a_full_day() {
        let total: u32 = CATALOG.iter().map(|goal| goal.weight).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn catalog_order_matches_goal_ids() {
        for (index, goal) in CATALOG.iter().enumerate() {
            assert_eq!(goal.id as usize, index);
            assert_eq!(goal.id.def().id, goal.id);
        }
    }

    #[test]
    fn goal_names_round_trip() {
        for goal in &CATALOG {
            assert_eq!(GoalId::parse(goal.id.as_str()), Some(goal.id));
            assert_eq!(Category::parse(goal.category.as_str()), Some(goal.category));
        }
        assert_eq!(GoalId::parse("juggling"), None);
        assert_eq!(Category::parse("spirit"), None);
    }

    #[test]
    fn two_hour_chinese_doubles_the_base_points() {
        assert_eq!(
            Achievement::CHINESE_TWO_HOURS.points,
            2 * Achievement::CHINESE_ONE_HOUR.points
        );
        assert_eq!(
            Achievement::CHINESE_TWO_HOURS.goal,
            Achievement::CHINESE_ONE_HOUR.goal
        );
    }

    #[test]
    fn achievement_points_match_the_catalog() {
        for achievement in [
            Achievement::WORKOUT,
            Achievement::MEDITATION,
            Achievement::READING,
            Achievement::STEPS,
            Achievement::CHINESE_ONE_HOUR,
            Achievement::THESIS,
        ] {
            assert_eq!(achievement.points, achievement.goal.def().points);
        }
    }
}
