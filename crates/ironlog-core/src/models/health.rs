// ABOUTME: Health goal and daily entry models for the auxiliary habit tracker
// ABOUTME: Also carries the summary and stats views computed from goals and entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Category of a health goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HealthGoalType {
    /// Vitamins and supplements
    Supplement,
    /// Water intake
    Hydration,
    /// Sleep duration
    Sleep,
    /// Movement outside training
    Activity,
    /// Anything else
    #[default]
    Custom,
}

impl HealthGoalType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Supplement => "supplement",
            Self::Hydration => "hydration",
            Self::Sleep => "sleep",
            Self::Activity => "activity",
            Self::Custom => "custom",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "supplement" => Self::Supplement,
            "hydration" => Self::Hydration,
            "sleep" => Self::Sleep,
            "activity" => Self::Activity,
            _ => Self::Custom,
        }
    }

    /// Emoji shown when the user did not pick one
    #[must_use]
    pub const fn default_emoji(&self) -> &'static str {
        match self {
            Self::Supplement => "💊",
            Self::Hydration => "💧",
            Self::Sleep => "😴",
            Self::Activity => "🚶",
            Self::Custom => "🎯",
        }
    }

    /// Unit used when the user did not pick one
    #[must_use]
    pub const fn default_unit(&self) -> Option<&'static str> {
        match self {
            Self::Hydration => Some("glasses"),
            Self::Sleep => Some("hours"),
            Self::Activity => Some("minutes"),
            Self::Supplement | Self::Custom => None,
        }
    }
}

impl fmt::Display for HealthGoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often a goal is meant to be completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HealthGoalFrequency {
    /// Once per calendar day
    #[default]
    Daily,
    /// Once per week
    Weekly,
}

impl HealthGoalFrequency {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("weekly") {
            Self::Weekly
        } else {
            Self::Daily
        }
    }
}

/// A recurring health habit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthGoal {
    /// Goal identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Category
    #[serde(rename = "type")]
    pub goal_type: HealthGoalType,
    /// Daily or weekly
    pub frequency: HealthGoalFrequency,
    /// Optional quantity to reach
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    /// Unit of `target`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Display emoji
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Inactive goals are excluded from completion rates
    pub active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl HealthGoal {
    /// Active daily goals count toward daily completion
    #[must_use]
    pub fn counts_daily(&self) -> bool {
        self.active && self.frequency == HealthGoalFrequency::Daily
    }
}

/// Partial update for a [`HealthGoal`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthGoalUpdate {
    /// New name
    #[serde(default)]
    pub name: Option<String>,
    /// New category
    #[serde(default, rename = "type")]
    pub goal_type: Option<HealthGoalType>,
    /// New frequency
    #[serde(default)]
    pub frequency: Option<HealthGoalFrequency>,
    /// New target
    #[serde(default)]
    pub target: Option<Option<f64>>,
    /// New unit
    #[serde(default)]
    pub unit: Option<Option<String>>,
    /// New emoji
    #[serde(default)]
    pub emoji: Option<Option<String>>,
    /// New description
    #[serde(default)]
    pub description: Option<Option<String>>,
    /// New active flag
    #[serde(default)]
    pub active: Option<bool>,
}

impl HealthGoalUpdate {
    /// Merge into `goal`
    pub fn apply(&self, goal: &mut HealthGoal) {
        if let Some(name) = &self.name {
            goal.name.clone_from(name);
        }
        if let Some(goal_type) = self.goal_type {
            goal.goal_type = goal_type;
        }
        if let Some(frequency) = self.frequency {
            goal.frequency = frequency;
        }
        if let Some(target) = self.target {
            goal.target = target;
        }
        if let Some(unit) = &self.unit {
            goal.unit.clone_from(unit);
        }
        if let Some(emoji) = &self.emoji {
            goal.emoji.clone_from(emoji);
        }
        if let Some(description) = &self.description {
            goal.description.clone_from(description);
        }
        if let Some(active) = self.active {
            goal.active = active;
        }
    }
}

/// Completion record for one goal on one calendar day
///
/// At most one entry exists per `(goal_id, date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthEntry {
    /// Entry identifier
    pub id: Uuid,
    /// Owning goal
    pub goal_id: Uuid,
    /// Calendar day, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Whether the goal was met
    pub completed: bool,
    /// Amount actually achieved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the entry was last marked complete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Partial update for a [`HealthEntry`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthEntryUpdate {
    /// New completed flag
    #[serde(default)]
    pub completed: Option<bool>,
    /// New value
    #[serde(default)]
    pub value: Option<Option<f64>>,
    /// New notes
    #[serde(default)]
    pub notes: Option<Option<String>>,
}

impl HealthEntryUpdate {
    /// Merge into `entry`
    pub fn apply(&self, entry: &mut HealthEntry) {
        if let Some(completed) = self.completed {
            entry.completed = completed;
        }
        if let Some(value) = self.value {
            entry.value = value;
        }
        if let Some(notes) = &self.notes {
            entry.notes.clone_from(notes);
        }
    }
}

/// Completion view for a single day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyHealthSummary {
    /// The summarized day
    pub date: NaiveDate,
    /// Active daily goals
    pub total_goals: usize,
    /// Completed entries dated that day
    pub completed_goals: usize,
    /// Rounded percentage, 0 when there are no goals
    pub completion_rate: u32,
    /// Entries dated that day
    pub entries: Vec<HealthEntry>,
}

/// Completion view for a seven-day week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyHealthSummary {
    /// First day (Sunday)
    pub week_start: NaiveDate,
    /// Last day
    pub week_end: NaiveDate,
    /// Active daily goals × 7
    pub total_daily_goals: usize,
    /// Completed daily-goal entries within the week
    pub completed_daily_goals: usize,
    /// Active weekly goals
    pub weekly_goals: Vec<HealthGoal>,
    /// Entries for weekly goals dated within the week
    pub weekly_entries: Vec<HealthEntry>,
    /// Rounded mean of the seven daily completion rates
    pub average_completion_rate: u32,
}

/// Headline health tracker statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStats {
    /// All goals
    pub total_goals: usize,
    /// Goals currently active
    pub active_goals: usize,
    /// Consecutive fully completed days ending today
    pub current_streak: u32,
    /// Longest run of fully completed days in the trailing window
    pub longest_streak: u32,
    /// Rounded average completion rate of the current Sunday-start week
    pub this_week_completion: u32,
    /// Same for the previous week
    pub last_week_completion: u32,
}
