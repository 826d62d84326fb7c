use std::collections::BTreeSet;

use crate::{
    EquipmentTier, ExerciseCatalogEntry, NormalizedTemplate, NormalizedTemplateExercise,
    TemplateID, TrainingSplit, rotation_tag_muscle_groups,
};

pub const BLUEPRINT_EXERCISES: usize = 5;
pub const BLUEPRINT_TARGET_SETS: u32 = 3;
pub const BLUEPRINT_TARGET_REPS: &str = "10";

/// Build one generic template per rotation tag of a split from the exercise catalog.
///
/// Used if no workout templates are authored. A template takes the first exercises of the
/// catalog that primarily train one of the tag's muscle groups and need no more than the
/// available equipment. Tags without a suitable exercise get no template.
#[must_use]
pub fn build_blueprint_templates(
    split: TrainingSplit,
    catalog: &[ExerciseCatalogEntry],
    equipment: EquipmentTier,
) -> Vec<NormalizedTemplate> {
    split
        .rotation_tags()
        .iter()
        .filter_map(|tag| {
            let targets = rotation_tag_muscle_groups(tag);
            let exercises = catalog
                .iter()
                .filter(|e| !e.id.is_nil() && e.required_equipment() <= equipment)
                .filter(|e| {
                    e.primary_muscle_groups()
                        .iter()
                        .any(|m| targets.contains(m))
                })
                .take(BLUEPRINT_EXERCISES)
                .zip(0..)
                .map(|(e, display_order)| NormalizedTemplateExercise {
                    exercise_id: e.id,
                    name: e.name.clone(),
                    muscle_groups: e.muscle_groups(),
                    movement_pattern: e.movement_pattern(),
                    target_sets: Some(BLUEPRINT_TARGET_SETS),
                    target_reps: Some(BLUEPRINT_TARGET_REPS.to_string()),
                    display_order,
                    notes: None,
                })
                .collect::<Vec<_>>();
            if exercises.is_empty() {
                return None;
            }
            Some(NormalizedTemplate {
                id: TemplateID::nil(),
                title: format!("{} Workout", title_case(tag)),
                rotation_tag: Some((*tag).to_string()),
                difficulty: None,
                equipment: None,
                goal_tags: BTreeSet::new(),
                exercises,
            })
        })
        .collect()
}

fn title_case(tag: &str) -> String {
    tag.split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
