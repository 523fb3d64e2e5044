// ABOUTME: Health goal store owning daily and weekly goals and their dated entries
// ABOUTME: Upserts one entry per goal and day; summaries delegate to the analytics crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::cache::{load_json, save_json, LocalStorage};
use crate::clock::Clock;
use crate::database::repositories::HealthRepository;
use crate::errors::{AppError, AppResult};
use crate::sync::{SyncHandle, SyncOperation};
use chrono::NaiveDate;
use ironlog_core::constants::storage_keys;
use ironlog_core::models::{
    DailyHealthSummary, HealthEntry, HealthEntryUpdate, HealthGoal, HealthGoalFrequency,
    HealthGoalType, HealthGoalUpdate, HealthStats, WeeklyHealthSummary,
};
use ironlog_intelligence::{daily_summary, health_stats, weekly_summary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Local-only health document (`fitness_health_data`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalHealthData {
    /// Goals in creation order
    #[serde(default)]
    pub goals: Vec<HealthGoal>,
    /// Entries in insertion order
    #[serde(default)]
    pub entries: Vec<HealthEntry>,
}

/// Input for [`HealthStore::create_goal`]
#[derive(Debug, Clone, PartialEq)]
pub struct NewHealthGoal {
    /// Display name
    pub name: String,
    /// Category
    pub goal_type: HealthGoalType,
    /// Daily or weekly
    pub frequency: HealthGoalFrequency,
    /// Numeric target
    pub target: Option<f64>,
    /// Unit for the target, defaulted from the type when absent
    pub unit: Option<String>,
    /// Emoji, defaulted from the type when absent
    pub emoji: Option<String>,
    /// Longer description
    pub description: Option<String>,
}

impl NewHealthGoal {
    /// Goal with no target, emoji or description
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        goal_type: HealthGoalType,
        frequency: HealthGoalFrequency,
    ) -> Self {
        Self {
            name: name.into(),
            goal_type,
            frequency,
            target: None,
            unit: None,
            emoji: None,
            description: None,
        }
    }

    /// Set a numeric target
    #[must_use]
    pub const fn with_target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the unit
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set the emoji
    #[must_use]
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone)]
enum Persistence {
    Local,
    Remote(SyncHandle),
}

/// Owner of health goals and entries
pub struct HealthStore {
    storage: Arc<dyn LocalStorage>,
    clock: Arc<dyn Clock>,
    persistence: Persistence,
    goals: Vec<HealthGoal>,
    entries: Vec<HealthEntry>,
}

impl HealthStore {
    /// Open in local-only mode from `storage`
    ///
    /// # Errors
    ///
    /// Returns an error if the stored document cannot be read or decoded
    pub fn open_local(storage: Arc<dyn LocalStorage>, clock: Arc<dyn Clock>) -> AppResult<Self> {
        let data: LocalHealthData =
            load_json(storage.as_ref(), storage_keys::HEALTH_DATA)?.unwrap_or_default();
        info!(
            goals = data.goals.len(),
            entries = data.entries.len(),
            "Loaded local health data"
        );
        Ok(Self {
            storage,
            clock,
            persistence: Persistence::Local,
            goals: data.goals,
            entries: data.entries,
        })
    }

    /// Open in remote mode, loading goals and entries for `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if either list cannot be loaded
    pub async fn open_remote(
        storage: Arc<dyn LocalStorage>,
        clock: Arc<dyn Clock>,
        repository: &dyn HealthRepository,
        user_id: Uuid,
        sync: SyncHandle,
    ) -> AppResult<Self> {
        let goals = repository
            .list_goals(user_id)
            .await
            .map_err(AppError::from)?;
        let entries = repository
            .list_entries(user_id)
            .await
            .map_err(AppError::from)?;
        info!(goals = goals.len(), entries = entries.len(), %user_id, "Loaded remote health data");
        Ok(Self {
            storage,
            clock,
            persistence: Persistence::Remote(sync),
            goals,
            entries,
        })
    }

    /// All goals
    #[must_use]
    pub fn goals(&self) -> &[HealthGoal] {
        &self.goals
    }

    /// All entries
    #[must_use]
    pub fn entries(&self) -> &[HealthEntry] {
        &self.entries
    }

    /// Goal by id
    #[must_use]
    pub fn goal(&self, goal_id: Uuid) -> Option<&HealthGoal> {
        self.goals.iter().find(|g| g.id == goal_id)
    }

    /// Active goals with the given frequency
    #[must_use]
    pub fn active_goals_by_frequency(&self, frequency: HealthGoalFrequency) -> Vec<&HealthGoal> {
        self.goals
            .iter()
            .filter(|g| g.active && g.frequency == frequency)
            .collect()
    }

    /// Entries dated `date`
    #[must_use]
    pub fn entries_for_date(&self, date: NaiveDate) -> Vec<&HealthEntry> {
        self.entries.iter().filter(|e| e.date == date).collect()
    }

    /// The entry for `goal_id` on `date`
    #[must_use]
    pub fn entry_for_goal_and_date(&self, goal_id: Uuid, date: NaiveDate) -> Option<&HealthEntry> {
        self.entries
            .iter()
            .find(|e| e.goal_id == goal_id && e.date == date)
    }

    /// Completion summary for `date`
    #[must_use]
    pub fn daily_summary(&self, date: NaiveDate) -> DailyHealthSummary {
        daily_summary(&self.goals, &self.entries, date)
    }

    /// Seven-day rollup starting at `week_start`
    #[must_use]
    pub fn weekly_summary(&self, week_start: NaiveDate) -> WeeklyHealthSummary {
        weekly_summary(&self.goals, &self.entries, week_start)
    }

    /// Streaks and week-over-week completion as of `today`
    #[must_use]
    pub fn stats(&self, today: NaiveDate) -> HealthStats {
        health_stats(&self.goals, &self.entries, today)
    }

    /// Stats as of the clock's local day
    #[must_use]
    pub fn stats_today(&self) -> HealthStats {
        self.stats(self.clock.today())
    }

    /// Create an active goal; emoji and unit fall back to the type's defaults
    pub fn create_goal(&mut self, draft: NewHealthGoal) -> HealthGoal {
        let goal = HealthGoal {
            id: Uuid::new_v4(),
            emoji: draft
                .emoji
                .or_else(|| Some(draft.goal_type.default_emoji().to_owned())),
            unit: draft
                .unit
                .or_else(|| draft.goal_type.default_unit().map(str::to_owned)),
            name: draft.name,
            goal_type: draft.goal_type,
            frequency: draft.frequency,
            target: draft.target,
            description: draft.description,
            active: true,
            created_at: self.clock.now_utc(),
        };
        info!(goal_id = %goal.id, goal_type = %goal.goal_type, "Created health goal");
        self.goals.push(goal.clone());
        self.goal_saved(&goal);
        goal
    }

    /// Merge `update` into a goal
    pub fn update_goal(&mut self, goal_id: Uuid, update: &HealthGoalUpdate) {
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == goal_id) else {
            debug!(%goal_id, "update_goal ignored: unknown goal");
            return;
        };
        update.apply(goal);
        let saved = goal.clone();
        self.goal_saved(&saved);
    }

    /// Flip a goal's active flag, returning the new value
    pub fn toggle_goal_active(&mut self, goal_id: Uuid) -> Option<bool> {
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == goal_id) else {
            debug!(%goal_id, "toggle_goal_active ignored: unknown goal");
            return None;
        };
        goal.active = !goal.active;
        let saved = goal.clone();
        self.goal_saved(&saved);
        Some(saved.active)
    }

    /// Remove a goal and every entry recorded against it
    pub fn delete_goal(&mut self, goal_id: Uuid) {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != goal_id);
        if self.goals.len() == before {
            debug!(%goal_id, "delete_goal ignored: unknown goal");
            return;
        }
        self.entries.retain(|e| e.goal_id != goal_id);
        info!(%goal_id, "Deleted health goal");
        match &self.persistence {
            Persistence::Local => self.persist_local(),
            Persistence::Remote(sync) => sync.dispatch(SyncOperation::DeleteHealthGoal(goal_id)),
        }
    }

    /// Mark `goal_id` complete on `date`, creating the entry if needed
    pub fn mark_goal_complete(
        &mut self,
        goal_id: Uuid,
        date: NaiveDate,
        value: Option<f64>,
        notes: Option<String>,
    ) -> Option<Uuid> {
        if self.goal(goal_id).is_none() {
            debug!(%goal_id, "mark_goal_complete ignored: unknown goal");
            return None;
        }
        let completed_at = Some(self.clock.now_utc());

        let entry = if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|e| e.goal_id == goal_id && e.date == date)
        {
            existing.completed = true;
            existing.value = value;
            existing.notes = notes;
            existing.completed_at = completed_at;
            existing.clone()
        } else {
            let entry = HealthEntry {
                id: Uuid::new_v4(),
                goal_id,
                date,
                completed: true,
                value,
                notes,
                completed_at,
            };
            self.entries.push(entry.clone());
            entry
        };

        debug!(%goal_id, %date, "Marked goal complete");
        let id = entry.id;
        self.entry_saved(entry);
        Some(id)
    }

    /// Mark an existing entry for `goal_id` on `date` as not completed
    pub fn mark_goal_incomplete(&mut self, goal_id: Uuid, date: NaiveDate) {
        let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.goal_id == goal_id && e.date == date)
        else {
            debug!(%goal_id, %date, "mark_goal_incomplete ignored: no entry");
            return;
        };
        entry.completed = false;
        entry.completed_at = None;
        let saved = entry.clone();
        self.entry_saved(saved);
    }

    /// Merge `update` into an entry
    ///
    /// Completing an entry stamps `completed_at`; un-completing clears it.
    pub fn update_entry(&mut self, entry_id: Uuid, update: &HealthEntryUpdate) {
        let now = self.clock.now_utc();
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == entry_id) else {
            debug!(%entry_id, "update_entry ignored: unknown entry");
            return;
        };
        let was_completed = entry.completed;
        update.apply(entry);
        match (was_completed, entry.completed) {
            (false, true) => entry.completed_at = Some(now),
            (_, false) => entry.completed_at = None,
            (true, true) => {}
        }
        let saved = entry.clone();
        self.entry_saved(saved);
    }

    fn goal_saved(&self, goal: &HealthGoal) {
        match &self.persistence {
            Persistence::Local => self.persist_local(),
            Persistence::Remote(sync) => sync.dispatch(SyncOperation::SaveHealthGoal(goal.clone())),
        }
    }

    fn entry_saved(&self, entry: HealthEntry) {
        match &self.persistence {
            Persistence::Local => self.persist_local(),
            Persistence::Remote(sync) => sync.dispatch(SyncOperation::SaveHealthEntry(entry)),
        }
    }

    fn persist_local(&self) {
        let data = LocalHealthDataRef {
            goals: &self.goals,
            entries: &self.entries,
        };
        if let Err(e) = save_json(self.storage.as_ref(), storage_keys::HEALTH_DATA, &data) {
            warn!(error = %e, "Failed to persist health data");
        }
    }
}

impl std::fmt::Debug for HealthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthStore")
            .field("persistence", &self.persistence)
            .field("goals", &self.goals.len())
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct LocalHealthDataRef<'a> {
    goals: &'a [HealthGoal],
    entries: &'a [HealthEntry],
}
