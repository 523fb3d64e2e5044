// ABOUTME: Built-in exercise catalog shipped with the application
// ABOUTME: Twenty fixed entries with ids "1".."20" that can never be deleted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::{Exercise, ExerciseType};

type CatalogRow = (
    &'static str,
    &'static str,
    ExerciseType,
    &'static [&'static str],
    &'static str,
);

const CATALOG: &[CatalogRow] = &[
    (
        "1",
        "Bench Press",
        ExerciseType::Strength,
        &["chest", "triceps", "shoulders"],
        "Lie on a bench with your feet on the ground. Grip the barbell with hands slightly wider than shoulder-width apart. Lower the barbell to your chest, then press it back up.",
    ),
    (
        "2",
        "Squat",
        ExerciseType::Strength,
        &["quadriceps", "hamstrings", "glutes"],
        "Stand with feet shoulder-width apart. Lower your body by bending your knees and pushing your hips back as if sitting in a chair. Lower until thighs are parallel to the ground, then return to standing.",
    ),
    (
        "3",
        "Deadlift",
        ExerciseType::Strength,
        &["back", "hamstrings", "glutes"],
        "Stand with feet hip-width apart, barbell over midfoot. Bend at hips and knees to grip the bar. Keeping back straight, stand up with the weight by driving through your heels.",
    ),
    (
        "4",
        "Pull Up",
        ExerciseType::Strength,
        &["back", "biceps"],
        "Hang from a bar with palms facing away from you. Pull your body up until your chin is over the bar, then lower with control.",
    ),
    (
        "5",
        "Running",
        ExerciseType::Cardio,
        &["legs", "cardiovascular"],
        "Maintain good posture, land midfoot, and keep a consistent pace.",
    ),
    (
        "6",
        "Plank",
        ExerciseType::Strength,
        &["core", "shoulders"],
        "Start in push-up position. Keep your body in a straight line from head to heels, engaging your core muscles.",
    ),
    (
        "7",
        "Shoulder Press",
        ExerciseType::Strength,
        &["shoulders", "triceps"],
        "Hold weights at shoulder height with palms facing forward. Press weights overhead until arms are extended, then lower back to starting position.",
    ),
    (
        "8",
        "Bicycle Crunch",
        ExerciseType::Strength,
        &["core", "obliques"],
        "Lie on your back with hands behind head. Bring opposite elbow to opposite knee while extending the other leg.",
    ),
    (
        "9",
        "Jumping Rope",
        ExerciseType::Cardio,
        &["calves", "shoulders", "cardiovascular"],
        "Jump with both feet, keeping jumps small and quick. Rotate the rope with wrists, not arms.",
    ),
    (
        "10",
        "Downward Dog",
        ExerciseType::Flexibility,
        &["hamstrings", "shoulders", "calves"],
        "Start on hands and knees. Lift hips up and back, straightening legs and pressing chest toward thighs to form an inverted V shape.",
    ),
    (
        "11",
        "Dumbbell Row",
        ExerciseType::Strength,
        &["back", "biceps", "forearms"],
        "Place one knee and hand on a bench, with the other foot on the floor. Hold a dumbbell in your free hand, arm extended. Pull the weight up to your side while keeping your back flat.",
    ),
    (
        "12",
        "Barbell Curl",
        ExerciseType::Strength,
        &["biceps", "forearms"],
        "Stand with feet shoulder-width apart, holding a barbell with an underhand grip. Keeping elbows close to sides, curl the weight up toward your shoulders, then lower with control.",
    ),
    (
        "13",
        "Tricep Dips",
        ExerciseType::Strength,
        &["triceps", "shoulders"],
        "Sit on the edge of a bench or chair, hands gripping the edge. Slide your butt off the bench, lower your body by bending your elbows, then push back up.",
    ),
    (
        "14",
        "Leg Press",
        ExerciseType::Strength,
        &["quadriceps", "hamstrings", "glutes"],
        "Sit in the leg press machine with feet on the platform shoulder-width apart. Release the safety bars, lower the platform by bending your knees, then push it back up.",
    ),
    (
        "15",
        "Lat Pulldown",
        ExerciseType::Strength,
        &["back", "biceps", "shoulders"],
        "Sit at a lat pulldown machine, grasp the bar with a wide grip. Pull the bar down to chest level while keeping your back straight, then slowly return to the starting position.",
    ),
    (
        "16",
        "Romanian Deadlift",
        ExerciseType::Strength,
        &["hamstrings", "glutes", "lower back"],
        "Stand holding a barbell in front of your thighs. Keeping your back straight and knees slightly bent, hinge at the hips to lower the bar toward the floor, then return to standing.",
    ),
    (
        "17",
        "Incline Bench Press",
        ExerciseType::Strength,
        &["upper chest", "shoulders", "triceps"],
        "Lie on an incline bench with feet on the floor. Grip the barbell with hands wider than shoulder-width. Lower the bar to your upper chest, then press back up.",
    ),
    (
        "18",
        "Face Pull",
        ExerciseType::Strength,
        &["rear delts", "upper back", "rotator cuff"],
        "Stand facing a cable machine with rope attachment at head height. Pull the rope toward your face, separating the ends as you pull, then slowly return to start.",
    ),
    (
        "19",
        "Dumbbell Lateral Raise",
        ExerciseType::Strength,
        &["shoulders", "traps"],
        "Stand holding dumbbells at your sides. Keeping a slight bend in the elbows, raise the weights out to the sides until arms are parallel to the floor, then lower with control.",
    ),
    (
        "20",
        "Cable Crossover",
        ExerciseType::Strength,
        &["chest", "shoulders"],
        "Stand between two cable machines with handles at chest height. With arms extended, pull the handles forward and across your body, then slowly return to the starting position.",
    ),
];

/// The full built-in catalog in id order
#[must_use]
pub fn builtin_exercises() -> Vec<Exercise> {
    CATALOG
        .iter()
        .map(|(id, name, exercise_type, groups, instructions)| {
            Exercise::new(*id, *name, *exercise_type, groups).with_instructions(*instructions)
        })
        .collect()
}

/// Built-in exercises of one type
#[must_use]
pub fn exercises_by_type(exercise_type: ExerciseType) -> Vec<Exercise> {
    builtin_exercises()
        .into_iter()
        .filter(|e| e.exercise_type == exercise_type)
        .collect()
}

/// Whether `id` belongs to the built-in catalog
#[must_use]
pub fn is_builtin_id(id: &str) -> bool {
    CATALOG.iter().any(|(builtin, ..)| *builtin == id)
}
