use std::collections::BTreeSet;

use chrono::NaiveDate;
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    ExerciseID, MovementPattern, MuscleGroup, NormalizedTemplate, NormalizedTemplateExercise,
    TemplateID, UpdateError, UserID,
};

#[allow(async_fn_in_trait)]
pub trait PlanRepository {
    /// Replace all exercises planned for a date. Concurrent readers must either see the previous
    /// or the new exercises of that date, never a mix.
    async fn replace_plan_exercises_for_date(
        &self,
        user_id: UserID,
        plan_id: PlanID,
        date: NaiveDate,
        exercises: Vec<PlanExercise>,
        source: TemplateSource,
    ) -> Result<(), UpdateError>;
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlanID(Uuid);

impl PlanID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for PlanID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for PlanID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// An exercise scheduled for a plan day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanExercise {
    pub exercise_id: ExerciseID,
    pub name: String,
    pub muscle_groups: BTreeSet<MuscleGroup>,
    pub movement_pattern: Option<MovementPattern>,
    pub target_sets: Option<u32>,
    pub target_reps: Option<String>,
    pub display_order: i32,
    pub notes: Option<String>,
}

impl From<&NormalizedTemplateExercise> for PlanExercise {
    fn from(value: &NormalizedTemplateExercise) -> Self {
        Self {
            exercise_id: value.exercise_id,
            name: value.name.clone(),
            muscle_groups: value.muscle_groups.clone(),
            movement_pattern: value.movement_pattern,
            target_sets: value.target_sets,
            target_reps: value.target_reps.clone(),
            display_order: value.display_order,
            notes: value.notes.clone(),
        }
    }
}

/// The template a plan day was generated from. Generated blueprints have no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    pub id: Option<TemplateID>,
    pub title: String,
}

impl From<&NormalizedTemplate> for TemplateSource {
    fn from(value: &NormalizedTemplate) -> Self {
        Self {
            id: Some(value.id).filter(|id| !id.is_nil()),
            title: value.title.clone(),
        }
    }
}
