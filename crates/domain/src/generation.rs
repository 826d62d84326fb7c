use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use chrono::NaiveDate;
use futures_util::{StreamExt, future, stream};
use log::{debug, error, info};

use crate::{
    ExerciseCatalogRepository, GenerationError, PlanExercise, PlanID, PlanRepository,
    StorageError, TemplateCatalogRepository, TemplateSource, TrainingPreferences, UpdateError,
    UserID, UserProfile, build_blueprint_templates, build_schedule_dates, normalize_templates,
    pick_candidate, select_candidates, templates_by_tag,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSettings {
    /// Upper bound of plan days written concurrently.
    pub max_concurrent_writes: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_concurrent_writes: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub user_id: UserID,
    pub plan_id: PlanID,
    pub start: NaiveDate,
    pub total_days: u32,
    pub profile: UserProfile,
    pub preferences: TrainingPreferences,
}

/// Stops a running generation. Plan days already being written are completed.
#[derive(Debug, Default, Clone)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub generated: usize,
    pub total: usize,
    /// Days without a template containing exercises.
    pub skipped: usize,
    /// Days not attempted due to cancellation.
    pub cancelled: usize,
    pub failed: Vec<NaiveDate>,
}

impl GenerationReport {
    /// True if workouts were scheduled but none of them could be generated.
    #[must_use]
    pub fn is_complete_failure(&self) -> bool {
        self.total > 0 && self.generated == 0
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} workouts generated", self.generated, self.total)
    }
}

pub struct PlanGenerator<R> {
    repository: R,
    settings: GenerationSettings,
}

impl<R> PlanGenerator<R>
where
    R: TemplateCatalogRepository + ExerciseCatalogRepository + PlanRepository,
{
    pub fn new(repository: R, settings: GenerationSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Fill the plan with a workout for every training day of the requested period.
    ///
    /// Failing to write a single day does not stop the generation, the day is reported as
    /// failed instead. Only a failed catalog fetch or a catalog without any template or exercise
    /// aborts the generation.
    pub async fn generate_plan(
        &self,
        request: &GenerationRequest,
        cancellation: &Cancellation,
    ) -> Result<GenerationReport, GenerationError> {
        let raw_templates = self
            .repository
            .read_template_catalog(request.user_id)
            .await?;
        let mut templates = normalize_templates(&raw_templates);

        if templates.is_empty() {
            let exercises = self.repository.read_exercise_catalog().await?;
            templates = build_blueprint_templates(
                request.preferences.split,
                &exercises,
                request.profile.available_equipment(),
            );
            info!(
                "no workout templates available, using {} generic blueprint(s)",
                templates.len()
            );
        }

        if templates.is_empty() {
            return Err(GenerationError::NoCandidateAvailable);
        }

        let grouped_templates = templates_by_tag(&templates);
        let dates = build_schedule_dates(
            request.start,
            request.total_days,
            request.preferences.days_per_week,
        );
        let mut report = GenerationReport {
            total: dates.len(),
            ..GenerationReport::default()
        };

        let mut plan_days = vec![];
        for (index, date) in dates.into_iter().enumerate() {
            let tag = request.preferences.split.rotation_tag(index);
            let candidates = select_candidates(
                tag,
                &grouped_templates,
                &templates,
                &request.profile,
                &request.preferences,
            );
            let Some(template) = pick_candidate(&candidates, index) else {
                report.skipped += 1;
                continue;
            };
            if template.exercises.is_empty() {
                debug!(
                    "skipping {date}: template \"{}\" has no exercises",
                    template.title
                );
                report.skipped += 1;
                continue;
            }
            debug!("scheduling \"{}\" ({tag}) on {date}", template.title);
            plan_days.push((
                date,
                template
                    .exercises
                    .iter()
                    .map(PlanExercise::from)
                    .collect::<Vec<_>>(),
                TemplateSource::from(*template),
            ));
        }

        let scheduled = plan_days.len();
        let results = stream::iter(plan_days)
            .take_while(|_| future::ready(!cancellation.is_cancelled()))
            .map(|(date, exercises, source)| async move {
                let result = self
                    .repository
                    .replace_plan_exercises_for_date(
                        request.user_id,
                        request.plan_id,
                        date,
                        exercises,
                        source,
                    )
                    .await;
                (date, result)
            })
            .buffer_unordered(self.settings.max_concurrent_writes.max(1))
            .collect::<Vec<_>>()
            .await;

        report.cancelled = scheduled - results.len();
        for (date, result) in results {
            match result {
                Ok(()) => report.generated += 1,
                Err(err) => {
                    if let UpdateError::Storage(StorageError::NoConnection) = err {
                        debug!("failed to replace plan exercises for {date}: {err}");
                    } else {
                        error!("failed to replace plan exercises for {date}: {err}");
                    }
                    report.failed.push(date);
                }
            }
        }
        report.failed.sort();

        info!("{report}");

        Ok(report)
    }
}
