use std::collections::BTreeSet;

use derive_more::Deref;
use uuid::Uuid;

use crate::{EquipmentTier, MovementPattern, MuscleGroup, ReadError, infer_movement_pattern};

#[allow(async_fn_in_trait)]
pub trait ExerciseCatalogRepository {
    async fn read_exercise_catalog(&self) -> Result<Vec<ExerciseCatalogEntry>, ReadError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseCatalogEntry {
    pub id: ExerciseID,
    pub name: String,
    pub movement_pattern: Option<MovementPattern>,
    pub equipment: Option<String>,
    pub primary_muscles: BTreeSet<String>,
    pub secondary_muscles: BTreeSet<String>,
}

impl ExerciseCatalogEntry {
    /// The declared movement pattern, or the one inferred from the name.
    #[must_use]
    pub fn movement_pattern(&self) -> Option<MovementPattern> {
        self.movement_pattern
            .or_else(|| infer_movement_pattern(&self.name))
    }

    #[must_use]
    pub fn primary_muscle_groups(&self) -> BTreeSet<MuscleGroup> {
        crate::muscle_groups(self.primary_muscles.iter().map(String::as_str))
    }

    #[must_use]
    pub fn muscle_groups(&self) -> BTreeSet<MuscleGroup> {
        crate::muscle_groups(
            self.primary_muscles
                .iter()
                .chain(self.secondary_muscles.iter())
                .map(String::as_str),
        )
    }

    /// The equipment tier needed for this exercise. Exercises without equipment need none.
    #[must_use]
    pub fn required_equipment(&self) -> EquipmentTier {
        self.equipment
            .as_deref()
            .map_or(Some(EquipmentTier::Bodyweight), EquipmentTier::parse)
            .unwrap_or(EquipmentTier::FullGym)
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
