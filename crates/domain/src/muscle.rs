use std::{
    collections::{BTreeMap, BTreeSet},
    slice::Iter,
};

use crate::Property;

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Ord,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
}

impl Property for MuscleGroup {
    fn iter() -> Iter<'static, MuscleGroup> {
        static MUSCLE_GROUPS: [MuscleGroup; 6] = [
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::Legs,
            MuscleGroup::Shoulders,
            MuscleGroup::Arms,
            MuscleGroup::Core,
        ];
        MUSCLE_GROUPS.iter()
    }
}

impl MuscleGroup {
    #[must_use]
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Map a free-text muscle name onto its muscle group.
    ///
    /// The lookup is case-insensitive and ignores surrounding whitespace. Names which are not in
    /// the alias table yield `None`.
    #[must_use]
    pub fn from_muscle_name(name: &str) -> Option<MuscleGroup> {
        let name = name.trim().to_lowercase();
        MUSCLE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, group)| *group)
    }
}

static MUSCLE_ALIASES: &[(&str, MuscleGroup)] = &[
    ("chest", MuscleGroup::Chest),
    ("pecs", MuscleGroup::Chest),
    ("pectorals", MuscleGroup::Chest),
    ("upper chest", MuscleGroup::Chest),
    ("lower chest", MuscleGroup::Chest),
    ("back", MuscleGroup::Back),
    ("lats", MuscleGroup::Back),
    ("latissimus dorsi", MuscleGroup::Back),
    ("traps", MuscleGroup::Back),
    ("trapezius", MuscleGroup::Back),
    ("rhomboids", MuscleGroup::Back),
    ("upper back", MuscleGroup::Back),
    ("lower back", MuscleGroup::Back),
    ("erector spinae", MuscleGroup::Back),
    ("legs", MuscleGroup::Legs),
    ("quads", MuscleGroup::Legs),
    ("quadriceps", MuscleGroup::Legs),
    ("hamstrings", MuscleGroup::Legs),
    ("glutes", MuscleGroup::Legs),
    ("calves", MuscleGroup::Legs),
    ("adductors", MuscleGroup::Legs),
    ("abductors", MuscleGroup::Legs),
    ("hip flexors", MuscleGroup::Legs),
    ("shoulders", MuscleGroup::Shoulders),
    ("delts", MuscleGroup::Shoulders),
    ("deltoids", MuscleGroup::Shoulders),
    ("front delts", MuscleGroup::Shoulders),
    ("side delts", MuscleGroup::Shoulders),
    ("rear delts", MuscleGroup::Shoulders),
    ("rotator cuff", MuscleGroup::Shoulders),
    ("arms", MuscleGroup::Arms),
    ("biceps", MuscleGroup::Arms),
    ("triceps", MuscleGroup::Arms),
    ("forearms", MuscleGroup::Arms),
    ("brachialis", MuscleGroup::Arms),
    ("core", MuscleGroup::Core),
    ("abs", MuscleGroup::Core),
    ("abdominals", MuscleGroup::Core),
    ("obliques", MuscleGroup::Core),
    ("transverse abdominis", MuscleGroup::Core),
    ("rectus abdominis", MuscleGroup::Core),
    ("serratus", MuscleGroup::Core),
];

/// Muscle groups of a list of free-text muscle names. Unknown names are dropped.
pub fn muscle_groups<'a>(names: impl IntoIterator<Item = &'a str>) -> BTreeSet<MuscleGroup> {
    names
        .into_iter()
        .filter_map(MuscleGroup::from_muscle_name)
        .collect()
}

/// A volume map containing every muscle group with a count of zero.
#[must_use]
pub fn empty_muscle_volume() -> BTreeMap<MuscleGroup, u32> {
    MuscleGroup::iter().map(|m| (*m, 0)).collect()
}
