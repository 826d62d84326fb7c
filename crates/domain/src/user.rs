use derive_more::Deref;
use uuid::Uuid;

use crate::{TrainingSplit, normalize_tag};

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserID(Uuid);

impl UserID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for UserID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for UserID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// What the user brings to a training phase.
///
/// A missing equipment tier is treated as a full gym, a missing experience level matches every
/// template difficulty.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UserProfile {
    pub experience: Option<ExperienceLevel>,
    pub equipment: Option<EquipmentTier>,
}

impl UserProfile {
    #[must_use]
    pub fn available_equipment(&self) -> EquipmentTier {
        self.equipment.unwrap_or(EquipmentTier::FullGym)
    }
}

/// How the user wants to train during a phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TrainingPreferences {
    pub goal: Option<Goal>,
    pub split: TrainingSplit,
    pub days_per_week: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner = 0,
    Intermediate = 1,
    Advanced = 2,
}

impl ExperienceLevel {
    /// Parse a free-text difficulty or experience label. Unknown labels yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<ExperienceLevel> {
        match normalize_tag(value).as_str() {
            "beginner" | "novice" | "easy" => Some(ExperienceLevel::Beginner),
            "intermediate" | "moderate" => Some(ExperienceLevel::Intermediate),
            "advanced" | "expert" | "hard" => Some(ExperienceLevel::Advanced),
            _ => None,
        }
    }

    #[must_use]
    pub fn rank(self) -> i8 {
        self as i8
    }
}

/// Ordinal equipment scale: bodyweight < dumbbells < full gym.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum EquipmentTier {
    Bodyweight = 0,
    Dumbbells = 1,
    FullGym = 2,
}

impl EquipmentTier {
    /// Parse an equipment tier or a single equipment tag such as `"kettlebell"`.
    #[must_use]
    pub fn parse(value: &str) -> Option<EquipmentTier> {
        match normalize_tag(value).as_str() {
            "bodyweight" | "body_weight" | "none" | "no_equipment" => {
                Some(EquipmentTier::Bodyweight)
            }
            "dumbbells" | "dumbbell" | "kettlebell" | "kettlebells" | "resistance_band" | "band"
            | "bands" | "home" | "home_gym" | "minimal" => Some(EquipmentTier::Dumbbells),
            "full_gym" | "gym" | "commercial_gym" | "barbell" | "machine" | "cable"
            | "smith_machine" | "trap_bar" => Some(EquipmentTier::FullGym),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Goal {
    Strength,
    Hypertrophy,
    FatLoss,
    Endurance,
    GeneralFitness,
}

impl Goal {
    #[must_use]
    pub fn parse(value: &str) -> Option<Goal> {
        match normalize_tag(value).as_str() {
            "strength" | "get_stronger" | "powerlifting" => Some(Goal::Strength),
            "hypertrophy" | "muscle_gain" | "build_muscle" => Some(Goal::Hypertrophy),
            "fat_loss" | "weight_loss" | "lose_weight" => Some(Goal::FatLoss),
            "endurance" | "conditioning" => Some(Goal::Endurance),
            "general_fitness" | "general" | "maintenance" | "health" => {
                Some(Goal::GeneralFitness)
            }
            _ => None,
        }
    }

    /// Template goal tags that satisfy this goal. Every goal accepts the catch-all `general` tag.
    #[must_use]
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Goal::Strength => &["strength", "powerlifting", "power", "general"],
            Goal::Hypertrophy => &["hypertrophy", "muscle_gain", "bodybuilding", "general"],
            Goal::FatLoss => &["fat_loss", "weight_loss", "conditioning", "general"],
            Goal::Endurance => &["endurance", "conditioning", "cardio", "general"],
            Goal::GeneralFitness => &["general_fitness", "general", "maintenance"],
        }
    }
}
