use std::collections::BTreeMap;

use log::debug;

use crate::{
    EquipmentTier, ExperienceLevel, NormalizedTemplate, TrainingPreferences, UserProfile,
    normalize_tag,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    Goal,
    Equipment,
    Difficulty,
}

/// Selection tiers from most to least specific. The first tier with a match wins.
pub const SELECTION_TIERS: [&[Criterion]; 6] = [
    &[Criterion::Goal, Criterion::Equipment, Criterion::Difficulty],
    &[Criterion::Goal, Criterion::Equipment],
    &[Criterion::Goal],
    &[Criterion::Equipment, Criterion::Difficulty],
    &[Criterion::Equipment],
    &[Criterion::Difficulty],
];

/// The parts of a user's profile and preferences that templates are matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionContext {
    pub goal_aliases: &'static [&'static str],
    pub equipment: EquipmentTier,
    pub experience: Option<ExperienceLevel>,
}

impl SelectionContext {
    #[must_use]
    pub fn new(profile: &UserProfile, preferences: &TrainingPreferences) -> Self {
        Self {
            goal_aliases: preferences.goal.map(|g| g.aliases()).unwrap_or_default(),
            equipment: profile.available_equipment(),
            experience: profile.experience,
        }
    }

    #[must_use]
    pub fn matches(&self, criterion: Criterion, template: &NormalizedTemplate) -> bool {
        match criterion {
            Criterion::Goal => self
                .goal_aliases
                .iter()
                .any(|alias| template.goal_tags.contains(*alias)),
            Criterion::Equipment => template
                .equipment
                .is_none_or(|required| required <= self.equipment),
            Criterion::Difficulty => match (template.difficulty, self.experience) {
                (Some(difficulty), Some(experience)) => {
                    (difficulty.rank() - experience.rank()).abs() <= 1
                }
                _ => true,
            },
        }
    }

    #[must_use]
    pub fn matches_all(&self, criteria: &[Criterion], template: &NormalizedTemplate) -> bool {
        criteria.iter().all(|c| self.matches(*c, template))
    }

    fn cascade<'a>(
        &self,
        pool: impl Iterator<Item = &'a NormalizedTemplate> + Clone,
    ) -> Option<(usize, Vec<&'a NormalizedTemplate>)> {
        SELECTION_TIERS.iter().enumerate().find_map(|(tier, criteria)| {
            let matching = pool
                .clone()
                .filter(|t| self.matches_all(criteria, t))
                .collect::<Vec<_>>();
            (!matching.is_empty()).then_some((tier, matching))
        })
    }
}

/// Select the candidate templates for one rotation slot.
///
/// The cascade of [`SELECTION_TIERS`] is tried against the templates of the rotation tag first
/// and against the whole catalog second. If that fails, any template matching the goal is
/// taken, then the templates of the rotation tag, then the whole catalog. The result is only
/// empty if the catalog is empty.
#[must_use]
pub fn select_candidates<'a>(
    tag: &str,
    templates_by_tag: &'a BTreeMap<String, Vec<NormalizedTemplate>>,
    all_templates: &'a [NormalizedTemplate],
    profile: &UserProfile,
    preferences: &TrainingPreferences,
) -> Vec<&'a NormalizedTemplate> {
    let context = SelectionContext::new(profile, preferences);
    let pool = templates_by_tag
        .get(&normalize_tag(tag))
        .map(Vec::as_slice)
        .unwrap_or_default();

    if let Some((tier, candidates)) = context.cascade(pool.iter()) {
        debug!(
            "selected {} template(s) for \"{tag}\" in tier {tier}",
            candidates.len()
        );
        return candidates;
    }

    if let Some((tier, candidates)) = context.cascade(all_templates.iter()) {
        debug!(
            "selected {} template(s) for \"{tag}\" from whole catalog in tier {tier}",
            candidates.len()
        );
        return candidates;
    }

    if !context.goal_aliases.is_empty() {
        let candidates = all_templates
            .iter()
            .filter(|t| context.matches(Criterion::Goal, t))
            .collect::<Vec<_>>();
        if !candidates.is_empty() {
            return candidates;
        }
    }

    debug!("no template matches profile for \"{tag}\"");

    if pool.is_empty() {
        all_templates.iter().collect()
    } else {
        pool.iter().collect()
    }
}

/// Round-robin choice of a candidate for the given schedule day.
///
/// The index is the position in the whole schedule, not among the days sharing a rotation tag.
/// If the number of candidates divides the rotation length, a tag always gets the same
/// candidate: with two rotation tags and two candidates for one of them, days 0, 2, 4 all pick
/// the first candidate.
#[must_use]
pub fn pick_candidate<T>(candidates: &[T], day_index: usize) -> Option<&T> {
    if candidates.is_empty() {
        None
    } else {
        candidates.get(day_index % candidates.len())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use crate::{Goal, TrainingSplit, templates_by_tag};

    use super::*;

    fn template(
        id: u128,
        tag: &str,
        goal_tags: &[&str],
        equipment: Option<EquipmentTier>,
        difficulty: Option<ExperienceLevel>,
    ) -> NormalizedTemplate {
        NormalizedTemplate {
            id: id.into(),
            title: format!("Template {id}"),
            rotation_tag: Some(tag.to_string()),
            difficulty,
            equipment,
            goal_tags: goal_tags.iter().map(|t| (*t).to_string()).collect(),
            exercises: vec![],
        }
    }

    fn preferences(goal: Option<Goal>) -> TrainingPreferences {
        TrainingPreferences {
            goal,
            split: TrainingSplit::PushPullLegs,
            days_per_week: Some(3),
        }
    }

    fn profile(
        equipment: Option<EquipmentTier>,
        experience: Option<ExperienceLevel>,
    ) -> UserProfile {
        UserProfile {
            experience,
            equipment,
        }
    }

    fn ids(candidates: &[&NormalizedTemplate]) -> Vec<u128> {
        candidates.iter().map(|t| t.id.as_u128()).collect()
    }

    #[fixture]
    fn catalog() -> Vec<NormalizedTemplate> {
        vec![
            template(
                1,
                "push",
                &["hypertrophy"],
                Some(EquipmentTier::FullGym),
                Some(ExperienceLevel::Advanced),
            ),
            template(
                2,
                "push",
                &["strength"],
                Some(EquipmentTier::Dumbbells),
                Some(ExperienceLevel::Beginner),
            ),
            template(
                3,
                "push",
                &["hypertrophy"],
                Some(EquipmentTier::Dumbbells),
                Some(ExperienceLevel::Intermediate),
            ),
            template(
                4,
                "pull",
                &["general"],
                Some(EquipmentTier::Bodyweight),
                None,
            ),
            template(5, "legs", &["endurance"], None, Some(ExperienceLevel::Advanced)),
        ]
    }

    #[rstest]
    #[case(Criterion::Goal, Some(Goal::Hypertrophy), 1, true)]
    #[case(Criterion::Goal, Some(Goal::Strength), 1, false)]
    #[case(Criterion::Goal, Some(Goal::Strength), 4, true)]
    #[case(Criterion::Goal, None, 4, false)]
    #[case(Criterion::Equipment, None, 1, false)]
    #[case(Criterion::Equipment, None, 3, true)]
    #[case(Criterion::Equipment, None, 5, true)]
    #[case(Criterion::Difficulty, None, 1, false)]
    #[case(Criterion::Difficulty, None, 3, true)]
    #[case(Criterion::Difficulty, None, 4, true)]
    fn test_selection_context_matches(
        catalog: Vec<NormalizedTemplate>,
        #[case] criterion: Criterion,
        #[case] goal: Option<Goal>,
        #[case] id: u128,
        #[case] expected: bool,
    ) {
        let context = SelectionContext::new(
            &profile(
                Some(EquipmentTier::Dumbbells),
                Some(ExperienceLevel::Beginner),
            ),
            &preferences(goal),
        );
        let template = catalog.iter().find(|t| t.id.as_u128() == id).unwrap();
        assert_eq!(context.matches(criterion, template), expected);
    }

    #[test]
    fn test_selection_context_unknown_experience_matches_every_difficulty() {
        let context = SelectionContext::new(&profile(None, None), &preferences(None));
        for experience in [
            ExperienceLevel::Beginner,
            ExperienceLevel::Intermediate,
            ExperienceLevel::Advanced,
        ] {
            assert!(context.matches(
                Criterion::Difficulty,
                &template(1, "a", &[], None, Some(experience))
            ));
        }
        assert_eq!(context.equipment, EquipmentTier::FullGym);
    }

    #[rstest]
    // goal + equipment + difficulty within the tag
    #[case("push", Some(Goal::Hypertrophy), Some(EquipmentTier::Dumbbells), Some(ExperienceLevel::Beginner), vec![3])]
    // goal + equipment within the tag, difficulty too far away
    #[case("push", Some(Goal::Strength), Some(EquipmentTier::Dumbbells), Some(ExperienceLevel::Advanced), vec![2])]
    // goal only within the tag
    #[case("push", Some(Goal::Hypertrophy), Some(EquipmentTier::Bodyweight), Some(ExperienceLevel::Beginner), vec![1, 3])]
    // equipment + difficulty within the tag, no goal match
    #[case("push", Some(Goal::Endurance), Some(EquipmentTier::Dumbbells), Some(ExperienceLevel::Beginner), vec![2, 3])]
    // equipment only within the tag
    #[case("legs", Some(Goal::Strength), Some(EquipmentTier::FullGym), Some(ExperienceLevel::Beginner), vec![5])]
    // difficulty only within the tag
    #[case("push", None, Some(EquipmentTier::Bodyweight), Some(ExperienceLevel::Advanced), vec![1, 3])]
    // tag lookup is normalized
    #[case(" PUSH ", Some(Goal::Hypertrophy), Some(EquipmentTier::Dumbbells), Some(ExperienceLevel::Beginner), vec![3])]
    fn test_select_candidates_tiers(
        catalog: Vec<NormalizedTemplate>,
        #[case] tag: &str,
        #[case] goal: Option<Goal>,
        #[case] equipment: Option<EquipmentTier>,
        #[case] experience: Option<ExperienceLevel>,
        #[case] expected: Vec<u128>,
    ) {
        let by_tag = templates_by_tag(&catalog);
        assert_eq!(
            ids(&select_candidates(
                tag,
                &by_tag,
                &catalog,
                &profile(equipment, experience),
                &preferences(goal),
            )),
            expected
        );
    }

    #[test]
    fn test_select_candidates_falls_back_to_whole_catalog() {
        let catalog = vec![
            template(
                1,
                "push",
                &["strength"],
                Some(EquipmentTier::FullGym),
                Some(ExperienceLevel::Advanced),
            ),
            template(
                2,
                "legs",
                &["endurance"],
                Some(EquipmentTier::Bodyweight),
                Some(ExperienceLevel::Advanced),
            ),
        ];
        let by_tag = templates_by_tag(&catalog);
        // Nothing in "push" fits a bodyweight beginner, but "legs" fits the equipment.
        assert_eq!(
            ids(&select_candidates(
                "push",
                &by_tag,
                &catalog,
                &profile(
                    Some(EquipmentTier::Bodyweight),
                    Some(ExperienceLevel::Beginner)
                ),
                &preferences(Some(Goal::Hypertrophy)),
            )),
            vec![2]
        );
        // Unknown tag uses the whole catalog.
        assert_eq!(
            ids(&select_candidates(
                "arms",
                &by_tag,
                &catalog,
                &profile(Some(EquipmentTier::FullGym), None),
                &preferences(Some(Goal::Strength)),
            )),
            vec![1]
        );
    }

    #[test]
    fn test_select_candidates_never_empty_for_mismatched_catalog() {
        let catalog = vec![
            template(
                1,
                "push",
                &["strength"],
                Some(EquipmentTier::FullGym),
                Some(ExperienceLevel::Advanced),
            ),
            template(
                2,
                "pull",
                &["powerlifting"],
                Some(EquipmentTier::FullGym),
                Some(ExperienceLevel::Advanced),
            ),
        ];
        let by_tag = templates_by_tag(&catalog);
        let mismatched_profile = profile(
            Some(EquipmentTier::Bodyweight),
            Some(ExperienceLevel::Beginner),
        );

        assert_eq!(
            ids(&select_candidates(
                "push",
                &by_tag,
                &catalog,
                &mismatched_profile,
                &preferences(Some(Goal::Endurance)),
            )),
            vec![1]
        );
        assert_eq!(
            ids(&select_candidates(
                "legs",
                &by_tag,
                &catalog,
                &mismatched_profile,
                &preferences(None),
            )),
            vec![1, 2]
        );
    }

    #[test]
    fn test_select_candidates_empty_catalog() {
        let catalog: Vec<NormalizedTemplate> = vec![];
        assert!(
            select_candidates(
                "push",
                &BTreeMap::new(),
                &catalog,
                &UserProfile::default(),
                &preferences(Some(Goal::Strength)),
            )
            .is_empty()
        );
    }

    #[rstest]
    #[case(0, Some(10))]
    #[case(1, Some(20))]
    #[case(2, Some(30))]
    #[case(3, Some(10))]
    #[case(7, Some(20))]
    fn test_pick_candidate(#[case] day_index: usize, #[case] expected: Option<u32>) {
        assert_eq!(pick_candidate(&[10, 20, 30], day_index).copied(), expected);
    }

    #[test]
    fn test_pick_candidate_uses_schedule_index() {
        let rotation_days = [0, 2, 4];
        assert_eq!(
            rotation_days
                .iter()
                .map(|&day| pick_candidate(&["a", "b"], day).copied())
                .collect::<Vec<_>>(),
            vec![Some("a"), Some("a"), Some("a")]
        );
    }

    #[test]
    fn test_pick_candidate_empty() {
        assert_eq!(pick_candidate::<u32>(&[], 3), None);
    }

    #[test]
    fn test_selection_tiers_are_distinct() {
        let tiers = SELECTION_TIERS
            .iter()
            .map(|criteria| format!("{criteria:?}"))
            .collect::<BTreeSet<_>>();
        assert_eq!(tiers.len(), SELECTION_TIERS.len());
    }
}
