// ABOUTME: Single-workout recap against prior history with personal record detection
// ABOUTME: Also computes progress streaks and next-session weight suggestions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use ironlog_core::constants::analytics::{
    COMPOUND_INCREMENT, COMPOUND_LIFTS, ISOLATION_INCREMENT, SUGGESTED_GOAL_COUNT, WEIGHT_UNIT,
};
use ironlog_core::models::{Workout, WorkoutExercise};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Outcome of an exercise compared with its baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    /// Heavier than the baseline max
    Progressed,
    /// Same weight, or no baseline
    Maintained,
    /// Lighter than the baseline max
    Decreased,
}

/// Per-exercise comparison inside a [`WorkoutRecap`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseComparison {
    /// Exercise name
    pub name: String,
    /// Max completed weight in the target workout
    pub current_max_weight: f64,
    /// Max completed reps in the target workout
    pub current_max_reps: f64,
    /// Completed volume in the target workout
    pub current_total_volume: f64,
    /// Completed sets in the target workout
    pub current_sets: usize,
    /// Baseline max weight, 0 without baseline
    pub previous_max_weight: f64,
    /// Baseline max reps, 0 without baseline
    pub previous_max_reps: f64,
    /// Baseline volume, 0 without baseline
    pub previous_total_volume: f64,
    /// Baseline completed sets
    pub previous_sets: usize,
    /// Progress classification
    pub status: ProgressStatus,
    /// Absolute max-weight difference for progressed/decreased, else 0
    pub change: f64,
    /// Volume difference, 0 when the baseline had no volume
    pub volume_change: f64,
}

/// Which record was broken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Heavier max weight
    Weight,
    /// More reps without dropping weight
    Reps,
}

/// A record broken in the target workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    /// Exercise name
    pub exercise_name: String,
    /// Record kind
    #[serde(rename = "type")]
    pub kind: RecordKind,
    /// Baseline value
    pub previous_value: f64,
    /// New value
    pub new_value: f64,
    /// Human-readable delta, e.g. `+10 lbs` or `+2 reps`
    pub improvement: String,
}

/// Volume and completed sets of a whole workout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTotals {
    /// Completed volume
    pub volume: f64,
    /// Completed sets
    pub sets: usize,
}

impl WorkoutTotals {
    fn of(workout: &Workout) -> Self {
        Self {
            volume: workout.completed_volume(),
            sets: workout.completed_set_count(),
        }
    }
}

/// Consecutive workouts with a heavier lift than last time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStreak {
    /// Run ending at the newest completed workout
    pub current: u32,
    /// Longest run anywhere in history
    pub best: u32,
}

/// A weight to aim for next session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum SessionGoal {
    /// Add the standard increment to the current max
    Increase {
        /// Exercise name
        exercise_name: String,
        /// Suggested weight
        target_weight: f64,
    },
    /// Get back to the previous max after a regression
    Match {
        /// Exercise name
        exercise_name: String,
        /// Previous max weight
        target_weight: f64,
    },
}

impl fmt::Display for SessionGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increase {
                exercise_name,
                target_weight,
            } => write!(f, "{exercise_name}: Try {target_weight} {WEIGHT_UNIT}"),
            Self::Match {
                exercise_name,
                target_weight,
            } => write!(f, "{exercise_name}: Match {target_weight} {WEIGHT_UNIT}"),
        }
    }
}

/// Full recap for one workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecap {
    /// Target workout id
    pub workout_id: Uuid,
    /// Target workout name
    pub workout_name: String,
    /// Target workout date
    pub date: DateTime<Utc>,
    /// One comparison per exercise instance, in workout order
    pub exercises: Vec<ExerciseComparison>,
    /// Weight and reps records
    pub personal_records: Vec<PersonalRecord>,
    /// Totals of the target workout
    pub totals: WorkoutTotals,
    /// Totals of the most recent prior completed workout
    pub previous_workout: Option<WorkoutTotals>,
    /// Volume percent change vs the previous workout
    pub volume_change_percent: f64,
    /// Completed-set difference vs the previous workout
    pub sets_change: i64,
    /// Progress streak over the whole history
    pub streak: ProgressStreak,
    /// Suggestions for the next session
    pub next_goals: Vec<SessionGoal>,
}

impl WorkoutRecap {
    /// Whether there was nothing earlier to compare with
    #[must_use]
    pub const fn is_first_workout(&self) -> bool {
        self.previous_workout.is_none()
    }

    /// Plain-text summary suitable for sharing
    #[must_use]
    pub fn share_text(&self) -> String {
        let mut lines = vec![
            "🔥 Workout Complete!".to_owned(),
            format!("📋 {}", self.workout_name),
            format!("📅 {}", self.date.format("%b %d, %Y")),
            String::new(),
        ];
        let change = self.volume_change_percent.round();
        let change_suffix = if change > 0.0 {
            format!(" (+{change}%)")
        } else if change < 0.0 {
            format!(" ({change}%)")
        } else {
            String::new()
        };
        lines.push(format!(
            "💪 Total Volume: {} {WEIGHT_UNIT}{change_suffix}",
            self.totals.volume
        ));
        lines.push(format!("🎯 Sets Completed: {}", self.totals.sets));
        if !self.personal_records.is_empty() {
            lines.push("\n🏆 Personal Records:".to_owned());
            for record in &self.personal_records {
                lines.push(format!(
                    "  • {}: {} {WEIGHT_UNIT} {}",
                    record.exercise_name, record.new_value, record.improvement
                ));
            }
        }
        if self.streak.current > 0 {
            lines.push(format!(
                "\n🔥 {} workout progress streak!",
                self.streak.current
            ));
        }
        lines
            .into_iter()
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Completed workouts strictly before `target`, newest first
fn prior_completed<'a>(target: &Workout, all: &'a [Workout]) -> Vec<&'a Workout> {
    let mut prior: Vec<&Workout> = all
        .iter()
        .filter(|w| w.completed && w.id != target.id && w.date < target.date)
        .collect();
    prior.sort_by(|a, b| b.date.cmp(&a.date));
    prior
}

fn compare_exercise(
    instance: &WorkoutExercise,
    baseline: Option<&WorkoutExercise>,
) -> ExerciseComparison {
    let current_max_weight = instance.max_completed_weight();
    let current_total_volume = instance.completed_volume();
    let previous_max_weight = baseline.map_or(0.0, WorkoutExercise::max_completed_weight);
    let previous_total_volume = baseline.map_or(0.0, WorkoutExercise::completed_volume);

    let (status, change) = if previous_max_weight > 0.0 && current_max_weight > previous_max_weight
    {
        (
            ProgressStatus::Progressed,
            current_max_weight - previous_max_weight,
        )
    } else if previous_max_weight > 0.0 && current_max_weight < previous_max_weight {
        (
            ProgressStatus::Decreased,
            previous_max_weight - current_max_weight,
        )
    } else {
        (ProgressStatus::Maintained, 0.0)
    };

    ExerciseComparison {
        name: instance.exercise.name.clone(),
        current_max_weight,
        current_max_reps: instance.max_completed_reps(),
        current_total_volume,
        current_sets: instance.completed_set_count(),
        previous_max_weight,
        previous_max_reps: baseline.map_or(0.0, WorkoutExercise::max_completed_reps),
        previous_total_volume,
        previous_sets: baseline.map_or(0, WorkoutExercise::completed_set_count),
        status,
        change,
        volume_change: if previous_total_volume > 0.0 {
            current_total_volume - previous_total_volume
        } else {
            0.0
        },
    }
}

fn personal_records(comparisons: &[ExerciseComparison]) -> Vec<PersonalRecord> {
    let mut records = Vec::new();
    for comparison in comparisons {
        if comparison.status == ProgressStatus::Progressed && comparison.previous_max_weight > 0.0 {
            records.push(PersonalRecord {
                exercise_name: comparison.name.clone(),
                kind: RecordKind::Weight,
                previous_value: comparison.previous_max_weight,
                new_value: comparison.current_max_weight,
                improvement: format!("+{} {WEIGHT_UNIT}", comparison.change),
            });
        }
        // rep records never count when weight was dropped to get them
        if comparison.previous_max_reps > 0.0
            && comparison.current_max_reps > comparison.previous_max_reps
            && comparison.current_max_weight >= comparison.previous_max_weight
        {
            records.push(PersonalRecord {
                exercise_name: comparison.name.clone(),
                kind: RecordKind::Reps,
                previous_value: comparison.previous_max_reps,
                new_value: comparison.current_max_reps,
                improvement: format!(
                    "+{} reps",
                    comparison.current_max_reps - comparison.previous_max_reps
                ),
            });
        }
    }
    records
}

fn is_compound(name: &str) -> bool {
    let lowered = name.to_lowercase();
    COMPOUND_LIFTS
        .iter()
        .any(|lift| lowered.contains(&lift.to_lowercase()))
}

/// Suggestions for the first few exercises of a recap
#[must_use]
pub fn next_session_goals(comparisons: &[ExerciseComparison]) -> Vec<SessionGoal> {
    comparisons
        .iter()
        .take(SUGGESTED_GOAL_COUNT)
        .map(|comparison| {
            let exercise_name = comparison.name.clone();
            if comparison.status == ProgressStatus::Decreased {
                SessionGoal::Match {
                    exercise_name,
                    target_weight: comparison.previous_max_weight,
                }
            } else {
                let increment = if is_compound(&comparison.name) {
                    COMPOUND_INCREMENT
                } else {
                    ISOLATION_INCREMENT
                };
                SessionGoal::Increase {
                    exercise_name,
                    target_weight: comparison.current_max_weight + increment,
                }
            }
        })
        .collect()
}

/// Progress streak over all completed workouts
///
/// A workout has progress when any of its exercises beats the max weight of the
/// most recent older workout containing that exercise. First occurrences never
/// count.
///
/// The baseline may sit several workouts back; it is not limited to the
/// adjacent older workout.
#[must_use]
pub fn progress_streak(workouts: &[Workout]) -> ProgressStreak {
    let mut history: Vec<&Workout> = workouts.iter().filter(|w| w.completed).collect();
    history.sort_by(|a, b| b.date.cmp(&a.date));

    let progressed: Vec<bool> = history
        .iter()
        .enumerate()
        .map(|(index, workout)| {
            workout.exercises.iter().any(|instance| {
                history[index + 1..]
                    .iter()
                    .find_map(|older| older.exercise_by_name(&instance.exercise.name))
                    .is_some_and(|previous| {
                        instance.max_completed_weight() > previous.max_completed_weight()
                    })
            })
        })
        .collect();

    let current = progressed.iter().take_while(|p| **p).count() as u32;
    let mut best = 0_u32;
    let mut run = 0_u32;
    for has_progress in progressed {
        run = if has_progress { run + 1 } else { 0 };
        best = best.max(run);
    }
    ProgressStreak { current, best }
}

/// Recap `target` against the rest of `all`
///
/// Each exercise draws its baseline from the most recent earlier completed
/// workout containing an exercise of the same name.
#[must_use]
pub fn workout_recap(target: &Workout, all: &[Workout]) -> WorkoutRecap {
    let prior = prior_completed(target, all);

    let exercises: Vec<ExerciseComparison> = target
        .exercises
        .iter()
        .map(|instance| {
            let baseline = prior
                .iter()
                .find_map(|w| w.exercise_by_name(&instance.exercise.name));
            compare_exercise(instance, baseline)
        })
        .collect();

    let totals = WorkoutTotals::of(target);
    let previous_workout = prior.first().map(|w| WorkoutTotals::of(w));
    let (volume_change_percent, sets_change) = previous_workout.map_or((0.0, 0), |previous| {
        let percent = if previous.volume > 0.0 {
            ((totals.volume - previous.volume) / previous.volume) * 100.0
        } else {
            0.0
        };
        (percent, totals.sets as i64 - previous.sets as i64)
    });

    WorkoutRecap {
        workout_id: target.id,
        workout_name: target.name.clone(),
        date: target.date,
        personal_records: personal_records(&exercises),
        next_goals: next_session_goals(&exercises),
        exercises,
        totals,
        previous_workout,
        volume_change_percent,
        sets_change,
        streak: progress_streak(all),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use ironlog_core::models::{Exercise, ExerciseType, SetUpdate, WorkoutSet};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap() + Duration::days(n)
    }

    fn session(on: i64, lifts: &[(&str, f64, u32)]) -> Workout {
        let mut workout = Workout::new_active("Session", day(on));
        for (name, weight, reps) in lifts {
            let mut instance =
                WorkoutExercise::new(Exercise::new(*name, *name, ExerciseType::Strength, &[]));
            instance.sets = vec![{
                let mut set = WorkoutSet::empty(*name);
                SetUpdate::weight(*weight)
                    .with_reps(*reps)
                    .with_completed(true)
                    .apply(&mut set);
                set
            }];
            workout.exercises.push(instance);
        }
        workout.completed = true;
        workout
    }

    #[test]
    fn test_weight_progress_reports_pr() {
        let earlier = session(0, &[("Bench Press", 125.0, 8)]);
        let target = session(3, &[("Bench Press", 135.0, 8)]);
        let all = vec![earlier, target.clone()];

        let recap = workout_recap(&target, &all);
        let bench = &recap.exercises[0];
        assert_eq!(bench.status, ProgressStatus::Progressed);
        assert_eq!(bench.change, 10.0);
        assert_eq!(recap.personal_records.len(), 1);
        assert_eq!(recap.personal_records[0].kind, RecordKind::Weight);
        assert_eq!(recap.personal_records[0].improvement, "+10 lbs");
    }

    #[test]
    fn test_rep_pr_at_same_weight() {
        let earlier = session(0, &[("Bench Press", 135.0, 8)]);
        let target = session(2, &[("Bench Press", 135.0, 10)]);
        let recap = workout_recap(&target, &[earlier, target.clone()]);
        assert_eq!(recap.exercises[0].status, ProgressStatus::Maintained);
        assert_eq!(recap.personal_records.len(), 1);
        assert_eq!(recap.personal_records[0].kind, RecordKind::Reps);
        assert_eq!(recap.personal_records[0].improvement, "+2 reps");
    }

    #[test]
    fn test_no_rep_pr_when_weight_dropped() {
        let earlier = session(0, &[("Bench Press", 135.0, 8)]);
        let target = session(2, &[("Bench Press", 130.0, 10)]);
        let recap = workout_recap(&target, &[earlier, target.clone()]);
        assert_eq!(recap.exercises[0].status, ProgressStatus::Decreased);
        assert!(recap.personal_records.is_empty());
        assert_eq!(
            recap.next_goals[0].to_string(),
            "Bench Press: Match 135 lbs"
        );
    }

    #[test]
    fn test_baseline_found_independently_per_exercise() {
        let oldest = session(0, &[("Squat", 200.0, 5)]);
        let middle = session(1, &[("Bench Press", 150.0, 5)]);
        let target = session(2, &[("Squat", 210.0, 5), ("Bench Press", 140.0, 5)]);
        let all = vec![oldest, middle, target.clone()];
        let recap = workout_recap(&target, &all);
        assert_eq!(recap.exercises[0].previous_max_weight, 200.0);
        assert_eq!(recap.exercises[1].previous_max_weight, 150.0);
        // totals compare with the single most recent workout
        let previous = recap.previous_workout.unwrap();
        assert_eq!(previous.volume, 750.0);
        assert_eq!(recap.sets_change, 1);
    }

    #[test]
    fn test_first_workout_has_no_comparison() {
        let target = session(0, &[("Plank Row", 40.0, 10)]);
        let recap = workout_recap(&target, std::slice::from_ref(&target));
        assert!(recap.is_first_workout());
        assert_eq!(recap.volume_change_percent, 0.0);
        assert_eq!(recap.exercises[0].status, ProgressStatus::Maintained);
        assert_eq!(recap.next_goals[0].to_string(), "Plank Row: Try 42.5 lbs");
        assert_eq!(recap.streak, ProgressStreak::default());
    }

    #[test]
    fn test_goals_limited_and_compound_increment() {
        let target = session(
            0,
            &[
                ("Barbell Back Squat", 100.0, 5),
                ("Curl", 30.0, 10),
                ("Incline Bench Press", 80.0, 8),
                ("Fly", 20.0, 12),
            ],
        );
        let goals = next_session_goals(&workout_recap(&target, &[]).exercises);
        let rendered: Vec<String> = goals.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "Barbell Back Squat: Try 105 lbs",
                "Curl: Try 32.5 lbs",
                "Incline Bench Press: Try 85 lbs",
            ]
        );
    }

    #[test]
    fn test_progress_streak_current_and_best() {
        let workouts = vec![
            session(0, &[("Squat", 100.0, 5)]),
            session(1, &[("Squat", 105.0, 5)]),
            session(2, &[("Squat", 110.0, 5)]),
            session(3, &[("Squat", 110.0, 5)]),
            session(4, &[("Bench Press", 100.0, 5)]),
            session(5, &[("Squat", 115.0, 5)]),
        ];
        let streak = progress_streak(&workouts);
        // day 5 beats day 3 (its most recent Squat), day 4 has no predecessor
        assert_eq!(streak.current, 1);
        assert_eq!(streak.best, 2);
    }

    #[test]
    fn test_share_text_lists_records() {
        let earlier = session(0, &[("Bench Press", 125.0, 8)]);
        let target = session(3, &[("Bench Press", 135.0, 8)]);
        let text = workout_recap(&target, &[earlier, target.clone()]).share_text();
        assert!(text.contains("📋 Session"));
        assert!(text.contains("💪 Total Volume: 1080 lbs (+8%)"));
        assert!(text.contains("Bench Press: 135 lbs +10 lbs"));
        assert!(text.contains("1 workout progress streak!"));
    }
}
