//! Rows as returned by the relational store and their conversion into domain entities.
//!
//! Sessions are fetched together with their exercises, the linked catalog exercise including its
//! muscles and the logged sets in a single nested row.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use log::warn;
use phasefit_domain as domain;
use serde_json::Value;
use uuid::Uuid;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct SessionRow {
    pub id: Uuid,
    #[serde(default)]
    pub plan_id: Option<Uuid>,
    pub performed_at: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub complete: bool,
    #[serde(default)]
    pub session_exercises: Vec<SessionExerciseRow>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct SessionExerciseRow {
    pub id: Option<Uuid>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub complete: bool,
    #[serde(default)]
    pub target_sets: Option<u32>,
    #[serde(default)]
    pub target_reps: Option<String>,
    #[serde(default)]
    pub exercise: Option<ExerciseRef>,
    #[serde(default)]
    pub sets: Vec<SetRow>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseRef {
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub muscle_links: Vec<MuscleLink>,
}

impl ExerciseRef {
    fn muscle_names(&self) -> impl Iterator<Item = &str> {
        self.muscle_links
            .iter()
            .filter_map(|link| link.muscle.as_ref())
            .map(|muscle| muscle.name.as_str())
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct MuscleLink {
    pub muscle: Option<MuscleRef>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct MuscleRef {
    pub name: String,
}

/// A logged set. The values are kept as raw JSON, as the store returns numeric columns either
/// as numbers or as strings.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct SetRow {
    #[serde(default)]
    pub set_number: Option<u32>,
    #[serde(default)]
    pub reps: Value,
    #[serde(default)]
    pub weight: Value,
    #[serde(default)]
    pub rpe: Value,
    #[serde(default)]
    pub rest_seconds: Value,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MappingError {
    #[error("session has no id")]
    InvalidSessionId,
    #[error("invalid timestamp \"{0}\"")]
    InvalidTimestamp(String),
    #[error("unknown time zone \"{0}\"")]
    UnknownTimeZone(String),
}

pub fn parse_time_zone(name: &str) -> Result<Tz, MappingError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| MappingError::UnknownTimeZone(name.to_string()))
}

/// The current calendar date in the given time zone.
#[must_use]
pub fn today_in(time_zone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&time_zone).date_naive()
}

/// Resolve the calendar date of a session timestamp.
///
/// Dates without time are taken as is. Timestamps at exactly midnight UTC are date-only values
/// which were stored as timestamps, so their date is taken literally as well. All other
/// timestamps are converted into the given time zone.
pub fn resolve_session_date(
    performed_at: &str,
    time_zone: Tz,
) -> Result<NaiveDate, MappingError> {
    let value = performed_at.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%#z"))
    {
        if timestamp.offset().local_minus_utc() == 0 && timestamp.time() == NaiveTime::MIN {
            return Ok(timestamp.date_naive());
        }
        return Ok(timestamp.with_timezone(&time_zone).date_naive());
    }

    // Timestamps without offset are already local.
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|timestamp| timestamp.date())
        .map_err(|_| MappingError::InvalidTimestamp(performed_at.to_string()))
}

/// Map a nested session row into a workout session.
///
/// If no plan is given, the plan referenced by the row is used. Exercises without an id are
/// kept with a nil id and set values which are not numeric or out of range are left empty.
pub fn map_session_row(
    row: SessionRow,
    plan_id: Option<domain::PlanID>,
    time_zone: Tz,
) -> Result<domain::WorkoutSessionEntry, MappingError> {
    if row.id.is_nil() {
        return Err(MappingError::InvalidSessionId);
    }

    let date = resolve_session_date(&row.performed_at, time_zone)?;
    let session_id = row.id;

    let mut entry = domain::WorkoutSessionEntry {
        id: row.id.into(),
        plan_id: plan_id.or(row.plan_id.map(domain::PlanID::from)),
        date,
        exercises: row
            .session_exercises
            .into_iter()
            .enumerate()
            .map(|(index, exercise)| map_session_exercise(session_id, index, exercise))
            .collect(),
        complete: row.complete,
        notes: row.notes,
    };
    entry.sort_exercises();

    Ok(entry)
}

/// Map rows skipping those which cannot be mapped.
#[must_use]
pub fn map_session_rows(
    rows: Vec<SessionRow>,
    plan_id: Option<domain::PlanID>,
    time_zone: Tz,
) -> Vec<domain::WorkoutSessionEntry> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            map_session_row(row, plan_id, time_zone)
                .map_err(|err| warn!("dropping session {id}: {err}"))
                .ok()
        })
        .collect()
}

fn map_session_exercise(
    session_id: Uuid,
    index: usize,
    row: SessionExerciseRow,
) -> domain::SessionExercise {
    let id = row.id.filter(|id| !id.is_nil()).map_or_else(
        || {
            warn!("exercise {index} of session {session_id} has no id");
            domain::SessionExerciseID::nil()
        },
        domain::SessionExerciseID::from,
    );

    let sets = row
        .sets
        .iter()
        .zip(1..)
        .map(|(set, position)| map_set(session_id, set, position))
        .collect();

    domain::SessionExercise {
        id,
        exercise_id: row
            .exercise
            .as_ref()
            .and_then(|e| e.id)
            .filter(|id| !id.is_nil())
            .map(domain::ExerciseID::from),
        name: row
            .exercise
            .as_ref()
            .map(|e| e.name.trim().to_string())
            .unwrap_or_default(),
        muscle_groups: row
            .exercise
            .as_ref()
            .map(|e| domain::muscle_groups(e.muscle_names()))
            .unwrap_or_default(),
        target_sets: row.target_sets,
        target_reps: row.target_reps,
        complete: row.complete,
        display_order: row
            .display_order
            .unwrap_or_else(|| i32::try_from(index).unwrap_or(i32::MAX)),
        notes: row.notes,
        sets,
    }
}

fn map_set(session_id: Uuid, row: &SetRow, position: u32) -> domain::SetEntry {
    let set_number = row.set_number.unwrap_or(position);
    let set = domain::SetEntry {
        set_number,
        weight: numeric(&row.weight, "weight", session_id),
        reps: numeric(&row.reps, "reps", session_id),
        rpe: numeric(&row.rpe, "rpe", session_id),
        rest: numeric(&row.rest_seconds, "rest_seconds", session_id),
    };
    if set.is_placeholder() {
        warn!("set {set_number} of session {session_id} has no values");
    }
    set
}

fn numeric<T>(value: &Value, field: &str, session_id: Uuid) -> Option<T>
where
    T: TryFrom<f64>,
    T::Error: fmt::Display,
{
    let number = match value {
        Value::Null => return None,
        Value::Number(number) => number.as_f64(),
        Value::String(string) => string.trim().parse::<f64>().ok(),
        _ => None,
    };
    let Some(number) = number else {
        warn!("ignoring {field} of session {session_id}: {value} is not a number");
        return None;
    };
    T::try_from(number)
        .map_err(|err| warn!("ignoring {field} of session {session_id}: {err}"))
        .ok()
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct TemplateRow {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub rotation_tag: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default)]
    pub goal_tags: Vec<String>,
    #[serde(default)]
    pub template_exercises: Vec<TemplateExerciseRow>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct TemplateExerciseRow {
    #[serde(default)]
    pub exercise_id: Option<Uuid>,
    #[serde(default)]
    pub exercise: Option<ExerciseRef>,
    #[serde(default)]
    pub movement_pattern: Option<String>,
    #[serde(default)]
    pub target_sets: Option<u32>,
    #[serde(default)]
    pub target_reps: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<TemplateRow> for domain::WorkoutTemplate {
    fn from(value: TemplateRow) -> Self {
        Self {
            id: value.id.into(),
            title: value.title,
            rotation_tag: value.rotation_tag,
            difficulty: value.difficulty,
            equipment: value.equipment,
            goal_tags: value.goal_tags,
            exercises: value
                .template_exercises
                .into_iter()
                .map(domain::TemplateExercise::from)
                .collect(),
        }
    }
}

impl From<TemplateExerciseRow> for domain::TemplateExercise {
    fn from(value: TemplateExerciseRow) -> Self {
        let exercise = value.exercise.as_ref();
        Self {
            exercise_id: value
                .exercise_id
                .or_else(|| exercise.and_then(|e| e.id))
                .map(domain::ExerciseID::from),
            name: exercise.map(|e| e.name.clone()).unwrap_or_default(),
            muscles: exercise
                .map(|e| e.muscle_names().map(str::to_string).collect())
                .unwrap_or_default(),
            movement_pattern: parse_movement_pattern(value.movement_pattern.as_deref()),
            target_sets: value.target_sets,
            target_reps: value.target_reps,
            display_order: value.display_order,
            notes: value.notes,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExerciseRow {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub movement_pattern: Option<String>,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default)]
    pub primary_muscles: Vec<String>,
    #[serde(default)]
    pub secondary_muscles: Vec<String>,
}

impl From<ExerciseRow> for domain::ExerciseCatalogEntry {
    fn from(value: ExerciseRow) -> Self {
        Self {
            id: value.id.into(),
            name: value.name,
            movement_pattern: parse_movement_pattern(value.movement_pattern.as_deref()),
            equipment: value.equipment.filter(|e| !e.trim().is_empty()),
            primary_muscles: value.primary_muscles.into_iter().collect(),
            secondary_muscles: value.secondary_muscles.into_iter().collect(),
        }
    }
}

fn parse_movement_pattern(value: Option<&str>) -> Option<domain::MovementPattern> {
    let value = value?;
    value
        .parse::<domain::MovementPattern>()
        .or_else(|_| domain::normalize_tag(value).parse())
        .map_err(|_| warn!("ignoring unknown movement pattern \"{value}\""))
        .ok()
}
