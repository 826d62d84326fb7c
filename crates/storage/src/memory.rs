//! In-memory store
//!
//! Keeps rows in the same shape as the relational store and implements all repositories of the
//! domain on top of them. Writes of a plan day replace the whole day at once.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Mutex, MutexGuard, PoisonError},
};

use chrono::NaiveDate;
use chrono_tz::Tz;
use phasefit_domain as domain;

use crate::rows::{ExerciseRow, SessionRow, TemplateRow, map_session_rows};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDay {
    pub exercises: Vec<domain::PlanExercise>,
    pub source: domain::TemplateSource,
}

#[derive(Debug, Default)]
struct State {
    connected: bool,
    templates: BTreeMap<domain::UserID, Vec<TemplateRow>>,
    exercises: Vec<ExerciseRow>,
    sessions: BTreeMap<domain::UserID, Vec<SessionRow>>,
    plan_days: BTreeMap<(domain::UserID, domain::PlanID, NaiveDate), PlanDay>,
    failing_dates: BTreeSet<NaiveDate>,
}

#[derive(Debug)]
pub struct InMemoryStore {
    time_zone: Tz,
    state: Mutex<State>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new(time_zone: Tz) -> Self {
        Self {
            time_zone,
            state: Mutex::new(State {
                connected: true,
                ..State::default()
            }),
        }
    }

    #[must_use]
    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    pub fn add_templates(&self, user_id: domain::UserID, templates: Vec<TemplateRow>) {
        self.state()
            .templates
            .entry(user_id)
            .or_default()
            .extend(templates);
    }

    pub fn add_exercises(&self, exercises: Vec<ExerciseRow>) {
        self.state().exercises.extend(exercises);
    }

    pub fn add_sessions(&self, user_id: domain::UserID, sessions: Vec<SessionRow>) {
        self.state()
            .sessions
            .entry(user_id)
            .or_default()
            .extend(sessions);
    }

    /// Let every write of a plan day at the given date fail.
    pub fn fail_writes_on(&self, date: NaiveDate) {
        self.state().failing_dates.insert(date);
    }

    /// Let all operations fail with [`domain::StorageError::NoConnection`].
    pub fn set_connected(&self, connected: bool) {
        self.state().connected = connected;
    }

    #[must_use]
    pub fn plan_day(
        &self,
        user_id: domain::UserID,
        plan_id: domain::PlanID,
        date: NaiveDate,
    ) -> Option<PlanDay> {
        self.state()
            .plan_days
            .get(&(user_id, plan_id, date))
            .cloned()
    }

    #[must_use]
    pub fn plan_dates(&self, user_id: domain::UserID, plan_id: domain::PlanID) -> Vec<NaiveDate> {
        self.state()
            .plan_days
            .keys()
            .filter(|(user, plan, _)| *user == user_id && *plan == plan_id)
            .map(|(_, _, date)| *date)
            .collect()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn connected_state(&self) -> Result<MutexGuard<'_, State>, domain::StorageError> {
        let state = self.state();
        if state.connected {
            Ok(state)
        } else {
            Err(domain::StorageError::NoConnection)
        }
    }
}

impl domain::TemplateCatalogRepository for InMemoryStore {
    async fn read_template_catalog(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::WorkoutTemplate>, domain::ReadError> {
        Ok(self
            .connected_state()?
            .templates
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(domain::WorkoutTemplate::from)
            .collect())
    }
}

impl domain::ExerciseCatalogRepository for InMemoryStore {
    async fn read_exercise_catalog(
        &self,
    ) -> Result<Vec<domain::ExerciseCatalogEntry>, domain::ReadError> {
        Ok(self
            .connected_state()?
            .exercises
            .iter()
            .cloned()
            .map(domain::ExerciseCatalogEntry::from)
            .collect())
    }
}

impl domain::WorkoutSessionRepository for InMemoryStore {
    async fn read_workout_sessions(
        &self,
        user_id: domain::UserID,
        plan_id: domain::PlanID,
    ) -> Result<Vec<domain::WorkoutSessionEntry>, domain::ReadError> {
        let rows = self
            .connected_state()?
            .sessions
            .get(&user_id)
            .into_iter()
            .flatten()
            .filter(|row| row.plan_id.is_none_or(|id| id == *plan_id))
            .cloned()
            .collect::<Vec<_>>();
        let mut sessions = map_session_rows(rows, Some(plan_id), self.time_zone);
        sessions.sort_by_key(|s| s.date);
        Ok(sessions)
    }
}

impl domain::PlanRepository for InMemoryStore {
    async fn replace_plan_exercises_for_date(
        &self,
        user_id: domain::UserID,
        plan_id: domain::PlanID,
        date: NaiveDate,
        exercises: Vec<domain::PlanExercise>,
        source: domain::TemplateSource,
    ) -> Result<(), domain::UpdateError> {
        let mut state = self.connected_state()?;
        if state.failing_dates.contains(&date) {
            return Err(domain::UpdateError::Other(
                format!("failed to write plan day {date}").into(),
            ));
        }
        state
            .plan_days
            .insert((user_id, plan_id, date), PlanDay { exercises, source });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    use crate::tests::data::{EXERCISE_ROW, NEW_YORK, SESSION_ROW, TEMPLATE_ROW};

    use super::*;
    use phasefit_domain::{
        ExerciseCatalogRepository, PlanRepository, TemplateCatalogRepository,
        WorkoutSessionRepository,
    };

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn plan_exercise(id: u128) -> domain::PlanExercise {
        domain::PlanExercise {
            exercise_id: id.into(),
            name: format!("Exercise {id}"),
            muscle_groups: BTreeSet::new(),
            movement_pattern: None,
            target_sets: Some(3),
            target_reps: Some("10".to_string()),
            display_order: 0,
            notes: None,
        }
    }

    fn source(title: &str) -> domain::TemplateSource {
        domain::TemplateSource {
            id: None,
            title: title.to_string(),
        }
    }

    #[fixture]
    fn store() -> InMemoryStore {
        let store = InMemoryStore::new(*NEW_YORK);
        store.add_templates(1.into(), vec![TEMPLATE_ROW.clone()]);
        store.add_exercises(vec![EXERCISE_ROW.clone()]);
        store
    }

    #[rstest]
    #[tokio::test]
    async fn test_read_template_catalog(store: InMemoryStore) {
        let templates = store.read_template_catalog(1.into()).await.unwrap();
        assert_eq!(
            templates,
            vec![domain::WorkoutTemplate::from(TEMPLATE_ROW.clone())]
        );
        assert!(
            store
                .read_template_catalog(2.into())
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_read_exercise_catalog(store: InMemoryStore) {
        assert_eq!(
            store.read_exercise_catalog().await.unwrap(),
            vec![domain::ExerciseCatalogEntry::from(EXERCISE_ROW.clone())]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_read_workout_sessions(store: InMemoryStore) {
        let mut earlier = SESSION_ROW.clone();
        earlier.id = Uuid::from_u128(3);
        earlier.plan_id = None;
        earlier.performed_at = "2024-03-02T15:00:00Z".to_string();
        let mut other_plan = SESSION_ROW.clone();
        other_plan.id = Uuid::from_u128(4);
        other_plan.plan_id = Some(Uuid::from_u128(5));
        store.add_sessions(1.into(), vec![SESSION_ROW.clone(), earlier, other_plan]);

        let sessions = store
            .read_workout_sessions(1.into(), 2.into())
            .await
            .unwrap();

        assert_eq!(
            sessions
                .iter()
                .map(|s| (s.id, s.plan_id, s.date_key()))
                .collect::<Vec<_>>(),
            vec![
                (3.into(), Some(2.into()), "2024-03-02".to_string()),
                (1.into(), Some(2.into()), "2024-03-05".to_string()),
            ]
        );
        assert!(
            store
                .read_workout_sessions(2.into(), 2.into())
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_replace_plan_exercises_for_date(store: InMemoryStore) {
        store
            .replace_plan_exercises_for_date(
                1.into(),
                2.into(),
                date(4),
                vec![plan_exercise(1), plan_exercise(2)],
                source("A"),
            )
            .await
            .unwrap();
        store
            .replace_plan_exercises_for_date(
                1.into(),
                2.into(),
                date(4),
                vec![plan_exercise(3)],
                source("B"),
            )
            .await
            .unwrap();

        assert_eq!(
            store.plan_day(1.into(), 2.into(), date(4)),
            Some(PlanDay {
                exercises: vec![plan_exercise(3)],
                source: source("B"),
            })
        );
        assert_eq!(store.plan_dates(1.into(), 2.into()), vec![date(4)]);
        assert_eq!(store.plan_dates(1.into(), 3.into()), vec![]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_replace_plan_exercises_for_date_failure(store: InMemoryStore) {
        store.fail_writes_on(date(4));

        let result = store
            .replace_plan_exercises_for_date(
                1.into(),
                2.into(),
                date(4),
                vec![plan_exercise(1)],
                source("A"),
            )
            .await;

        assert!(matches!(result, Err(domain::UpdateError::Other(_))));
        assert_eq!(store.plan_day(1.into(), 2.into(), date(4)), None);
    }

    #[rstest]
    #[tokio::test]
    async fn test_disconnected(store: InMemoryStore) {
        store.set_connected(false);

        assert!(matches!(
            store.read_template_catalog(1.into()).await,
            Err(domain::ReadError::Storage(domain::StorageError::NoConnection))
        ));
        assert!(matches!(
            store
                .replace_plan_exercises_for_date(1.into(), 2.into(), date(4), vec![], source("A"))
                .await,
            Err(domain::UpdateError::Storage(
                domain::StorageError::NoConnection
            ))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn test_generate_plan(store: InMemoryStore) {
        store.fail_writes_on(date(6));
        let generator =
            domain::PlanGenerator::new(store, domain::GenerationSettings::default());

        let report = generator
            .generate_plan(
                &domain::GenerationRequest {
                    user_id: 1.into(),
                    plan_id: 2.into(),
                    start: date(4),
                    total_days: 7,
                    profile: domain::UserProfile::default(),
                    preferences: domain::TrainingPreferences {
                        goal: Some(domain::Goal::Hypertrophy),
                        split: domain::TrainingSplit::PushPullLegs,
                        days_per_week: Some(3),
                    },
                },
                &domain::Cancellation::new(),
            )
            .await
            .unwrap();

        assert_eq!(report.to_string(), "2 of 3 workouts generated");
        assert_eq!(report.failed, vec![date(6)]);
        let store = generator.repository();
        assert_eq!(store.plan_dates(1.into(), 2.into()), vec![date(4), date(8)]);
        let plan_day = store.plan_day(1.into(), 2.into(), date(4)).unwrap();
        assert_eq!(
            plan_day.source,
            domain::TemplateSource {
                id: Some(0x30.into()),
                title: "Push Day".to_string(),
            }
        );
        assert_eq!(
            plan_day
                .exercises
                .iter()
                .map(|e| (e.exercise_id, e.movement_pattern))
                .collect::<Vec<_>>(),
            vec![
                (0x21.into(), Some(domain::MovementPattern::HorizontalPush)),
                (0x22.into(), Some(domain::MovementPattern::VerticalPush)),
            ]
        );
        assert_eq!(
            plan_day.exercises[0].muscle_groups,
            BTreeSet::from([domain::MuscleGroup::Chest, domain::MuscleGroup::Arms])
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_analytics_of_stored_sessions(store: InMemoryStore) {
        store.add_sessions(1.into(), vec![SESSION_ROW.clone()]);

        let sessions = store
            .read_workout_sessions(1.into(), 2.into())
            .await
            .unwrap();
        let analytics = domain::build_workout_analytics(&sessions);
        let summary = domain::build_consistency_summary(&sessions, date(5));

        assert_eq!(analytics.workout_logs.len(), 1);
        assert_eq!(
            analytics.workout_logs[0].muscle_volume[&domain::MuscleGroup::Legs],
            3
        );
        assert_eq!(
            analytics.workout_logs[0].movement_volume[&domain::MovementPattern::Squat],
            2
        );
        assert_eq!(
            analytics
                .strength_snapshots
                .iter()
                .map(|s| (s.lift, s.weight, s.reps))
                .collect::<Vec<_>>(),
            vec![
                (
                    domain::LiftId::Squat,
                    domain::Weight::new(102.5).unwrap(),
                    None
                ),
                (domain::LiftId::BenchPress, domain::Weight::ZERO, None),
                (
                    domain::LiftId::Deadlift,
                    domain::Weight::new(60.0).unwrap(),
                    Some(domain::Reps::new(8).unwrap())
                ),
            ]
        );
        assert_eq!(summary.streak, 1);
    }
}
