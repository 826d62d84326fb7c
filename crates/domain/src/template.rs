use std::collections::{BTreeMap, BTreeSet};

use derive_more::Deref;
use log::warn;
use uuid::Uuid;

use crate::{
    EquipmentTier, ExerciseID, ExperienceLevel, MovementPattern, MuscleGroup, ReadError, UserID,
    infer_movement_pattern, muscle_groups,
};

#[allow(async_fn_in_trait)]
pub trait TemplateCatalogRepository {
    async fn read_template_catalog(
        &self,
        user_id: UserID,
    ) -> Result<Vec<WorkoutTemplate>, ReadError>;
}

/// A workout template as authored in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutTemplate {
    pub id: TemplateID,
    pub title: String,
    pub rotation_tag: Option<String>,
    pub difficulty: Option<String>,
    pub equipment: Option<String>,
    pub goal_tags: Vec<String>,
    pub exercises: Vec<TemplateExercise>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateExercise {
    pub exercise_id: Option<ExerciseID>,
    pub name: String,
    pub muscles: Vec<String>,
    pub movement_pattern: Option<MovementPattern>,
    pub target_sets: Option<u32>,
    pub target_reps: Option<String>,
    pub display_order: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TemplateID(Uuid);

impl TemplateID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for TemplateID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for TemplateID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// A validated template ready for selection.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTemplate {
    pub id: TemplateID,
    pub title: String,
    pub rotation_tag: Option<String>,
    pub difficulty: Option<ExperienceLevel>,
    pub equipment: Option<EquipmentTier>,
    pub goal_tags: BTreeSet<String>,
    pub exercises: Vec<NormalizedTemplateExercise>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTemplateExercise {
    pub exercise_id: ExerciseID,
    pub name: String,
    pub muscle_groups: BTreeSet<MuscleGroup>,
    pub movement_pattern: Option<MovementPattern>,
    pub target_sets: Option<u32>,
    pub target_reps: Option<String>,
    pub display_order: i32,
    pub notes: Option<String>,
}

/// Trim, lowercase and replace whitespace runs by underscores.
#[must_use]
pub fn normalize_tag(tag: &str) -> String {
    tag.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

#[must_use]
pub fn normalize_templates(templates: &[WorkoutTemplate]) -> Vec<NormalizedTemplate> {
    templates.iter().map(normalize_template).collect()
}

fn normalize_template(template: &WorkoutTemplate) -> NormalizedTemplate {
    let mut exercises = template
        .exercises
        .iter()
        .enumerate()
        .filter_map(|(index, exercise)| {
            let Some(exercise_id) = exercise.exercise_id.filter(|id| !id.is_nil()) else {
                warn!(
                    "dropping exercise \"{}\" of template \"{}\" ({}): no exercise id",
                    exercise.name, template.title, *template.id
                );
                return None;
            };
            Some(NormalizedTemplateExercise {
                exercise_id,
                name: exercise.name.trim().to_string(),
                muscle_groups: muscle_groups(exercise.muscles.iter().map(String::as_str)),
                movement_pattern: exercise
                    .movement_pattern
                    .or_else(|| infer_movement_pattern(&exercise.name)),
                target_sets: exercise.target_sets,
                target_reps: exercise.target_reps.clone(),
                display_order: exercise
                    .display_order
                    .unwrap_or_else(|| i32::try_from(index).unwrap_or(i32::MAX)),
                notes: exercise.notes.clone(),
            })
        })
        .collect::<Vec<_>>();
    exercises.sort_by_key(|e| e.display_order);

    NormalizedTemplate {
        id: template.id,
        title: template.title.trim().to_string(),
        rotation_tag: template
            .rotation_tag
            .as_deref()
            .map(normalize_tag)
            .filter(|tag| !tag.is_empty()),
        difficulty: template
            .difficulty
            .as_deref()
            .and_then(ExperienceLevel::parse),
        equipment: template.equipment.as_deref().and_then(EquipmentTier::parse),
        goal_tags: template
            .goal_tags
            .iter()
            .map(String::as_str)
            .map(normalize_tag)
            .filter(|tag| !tag.is_empty())
            .collect(),
        exercises,
    }
}

/// Group templates by their rotation tag. Templates without a tag are not part of any group.
#[must_use]
pub fn templates_by_tag(
    templates: &[NormalizedTemplate],
) -> BTreeMap<String, Vec<NormalizedTemplate>> {
    let mut result: BTreeMap<String, Vec<NormalizedTemplate>> = BTreeMap::new();
    for template in templates {
        if let Some(tag) = &template.rotation_tag {
            result.entry(tag.clone()).or_default().push(template.clone());
        }
    }
    result
}
