use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    LiftId, MovementPattern, MuscleGroup, Reps, Weight, WorkoutSessionEntry, WorkoutSessionID,
    empty_movement_volume, empty_muscle_volume, infer_lift_id, infer_movement_pattern,
};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct WorkoutAnalytics {
    pub workout_logs: Vec<WorkoutLog>,
    pub strength_snapshots: Vec<StrengthSnapshot>,
}

/// Training volume of a single session, measured in sets.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutLog {
    pub session_id: WorkoutSessionID,
    pub date: NaiveDate,
    pub muscle_volume: BTreeMap<MuscleGroup, u32>,
    pub movement_volume: BTreeMap<MovementPattern, u32>,
    pub lifts: Vec<LiftRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiftRecord {
    pub lift: LiftId,
    pub weight: Weight,
    pub reps: Option<Reps>,
}

/// The heaviest set of a tracked lift in one session.
#[derive(Debug, Clone, PartialEq)]
pub struct StrengthSnapshot {
    pub id: String,
    pub session_id: WorkoutSessionID,
    pub date: NaiveDate,
    pub lift: LiftId,
    pub weight: Weight,
    pub reps: Option<Reps>,
}

/// Derive one workout log per session and a strength snapshot per tracked lift performed.
///
/// Every exercise adds its counted sets to each of its muscle groups and to its movement
/// pattern, if one can be inferred from its name. For exercises recognized as a tracked lift the
/// heaviest set is recorded, where a set without weight counts as a set with zero weight.
#[must_use]
pub fn build_workout_analytics(sessions: &[WorkoutSessionEntry]) -> WorkoutAnalytics {
    let mut analytics = WorkoutAnalytics::default();

    for session in sessions {
        let mut log = WorkoutLog {
            session_id: session.id,
            date: session.date,
            muscle_volume: empty_muscle_volume(),
            movement_volume: empty_movement_volume(),
            lifts: vec![],
        };

        for (index, exercise) in session.exercises.iter().enumerate() {
            let set_count = exercise.counted_sets();
            for muscle_group in &exercise.muscle_groups {
                *log.muscle_volume.entry(*muscle_group).or_default() += set_count;
            }
            if let Some(pattern) = infer_movement_pattern(&exercise.name) {
                *log.movement_volume.entry(pattern).or_default() += set_count;
            }

            let Some(lift) = infer_lift_id(&exercise.name) else {
                continue;
            };
            let Some(set) = exercise.heaviest_set() else {
                continue;
            };
            let record = LiftRecord {
                lift,
                weight: set.weight_or_zero(),
                reps: set.reps,
            };
            let exercise_key = if exercise.id.is_nil() {
                index.to_string()
            } else {
                exercise.id.to_string()
            };
            analytics.strength_snapshots.push(StrengthSnapshot {
                id: format!("{}-{exercise_key}-{}", *session.id, lift.key()),
                session_id: session.id,
                date: session.date,
                lift,
                weight: record.weight,
                reps: record.reps,
            });
            log.lifts.push(record);
        }

        analytics.workout_logs.push(log);
    }

    analytics
}

/// Heaviest snapshot of a lift per date, in ascending date order.
///
/// On equal weight the snapshot seen first is kept.
#[must_use]
pub fn strength_progression(
    snapshots: &[StrengthSnapshot],
    lift: LiftId,
) -> Vec<&StrengthSnapshot> {
    let mut heaviest: BTreeMap<NaiveDate, &StrengthSnapshot> = BTreeMap::new();
    for snapshot in snapshots.iter().filter(|s| s.lift == lift) {
        heaviest
            .entry(snapshot.date)
            .and_modify(|best| {
                if snapshot.weight > best.weight {
                    *best = snapshot;
                }
            })
            .or_insert(snapshot);
    }
    heaviest.into_values().collect()
}

#[must_use]
pub fn total_muscle_volume(logs: &[WorkoutLog]) -> BTreeMap<MuscleGroup, u32> {
    let mut total = empty_muscle_volume();
    for log in logs {
        for (muscle_group, sets) in &log.muscle_volume {
            *total.entry(*muscle_group).or_default() += sets;
        }
    }
    total
}

#[must_use]
pub fn total_movement_volume(logs: &[WorkoutLog]) -> BTreeMap<MovementPattern, u32> {
    let mut total = empty_movement_volume();
    for log in logs {
        for (pattern, sets) in &log.movement_volume {
            *total.entry(*pattern).or_default() += sets;
        }
    }
    total
}
