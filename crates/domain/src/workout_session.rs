use std::collections::BTreeSet;

use chrono::NaiveDate;
use derive_more::Deref;
use uuid::Uuid;

use crate::{ExerciseID, MuscleGroup, PlanID, RPE, ReadError, Reps, RestTime, UserID, Weight};

#[allow(async_fn_in_trait)]
pub trait WorkoutSessionRepository {
    async fn read_workout_sessions(
        &self,
        user_id: UserID,
        plan_id: PlanID,
    ) -> Result<Vec<WorkoutSessionEntry>, ReadError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSessionEntry {
    pub id: WorkoutSessionID,
    pub plan_id: Option<PlanID>,
    pub date: NaiveDate,
    pub exercises: Vec<SessionExercise>,
    pub complete: bool,
    pub notes: Option<String>,
}

impl WorkoutSessionEntry {
    /// The session date as `YYYY-MM-DD`.
    #[must_use]
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Order exercises by display order. Exercises with equal display order keep their relative
    /// order.
    pub fn sort_exercises(&mut self) {
        self.exercises.sort_by_key(|e| e.display_order);
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutSessionID(Uuid);

impl WorkoutSessionID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutSessionID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutSessionID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionExercise {
    pub id: SessionExerciseID,
    pub exercise_id: Option<ExerciseID>,
    pub name: String,
    pub muscle_groups: BTreeSet<MuscleGroup>,
    pub target_sets: Option<u32>,
    pub target_reps: Option<String>,
    pub complete: bool,
    pub display_order: i32,
    pub notes: Option<String>,
    pub sets: Vec<SetEntry>,
}

impl SessionExercise {
    /// Number of sets counted for volume. An exercise without logged sets still counts once.
    #[must_use]
    pub fn counted_sets(&self) -> u32 {
        if self.sets.is_empty() {
            1
        } else {
            u32::try_from(self.sets.len()).unwrap_or(u32::MAX)
        }
    }

    /// The set with the greatest weight, ties resolved in favour of the earliest set.
    ///
    /// Sets without a weight compete with a weight of zero.
    #[must_use]
    pub fn heaviest_set(&self) -> Option<&SetEntry> {
        self.sets.iter().fold(None, |best: Option<&SetEntry>, set| {
            match best {
                Some(b) if set.weight_or_zero() <= b.weight_or_zero() => Some(b),
                _ => Some(set),
            }
        })
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionExerciseID(Uuid);

impl SessionExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for SessionExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SessionExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SetEntry {
    pub set_number: u32,
    pub weight: Option<Weight>,
    pub reps: Option<Reps>,
    pub rpe: Option<RPE>,
    pub rest: Option<RestTime>,
}

impl SetEntry {
    #[must_use]
    pub fn weight_or_zero(&self) -> Weight {
        self.weight.unwrap_or(Weight::ZERO)
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.weight.is_none() && self.reps.is_none() && self.rpe.is_none() && self.rest.is_none()
    }
}
