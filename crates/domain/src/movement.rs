use std::{collections::BTreeMap, slice::Iter, sync::LazyLock};

use regex::Regex;

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
pub enum MovementPattern {
    Squat,
    Hinge,
    HorizontalPush,
    VerticalPush,
    HorizontalPull,
    VerticalPull,
}

impl Property for MovementPattern {
    fn iter() -> Iter<'static, MovementPattern> {
        static MOVEMENT_PATTERNS: [MovementPattern; 6] = [
            MovementPattern::Squat,
            MovementPattern::Hinge,
            MovementPattern::HorizontalPush,
            MovementPattern::VerticalPush,
            MovementPattern::HorizontalPull,
            MovementPattern::VerticalPull,
        ];
        MOVEMENT_PATTERNS.iter()
    }
}

impl MovementPattern {
    #[must_use]
    pub fn key(self) -> &'static str {
        self.into()
    }
}

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
pub enum LiftId {
    BenchPress,
    Squat,
    Deadlift,
    OverheadPress,
    BarbellRow,
    PullUp,
}

impl LiftId {
    #[must_use]
    pub fn key(self) -> &'static str {
        self.into()
    }
}

// Evaluated top-down, the first match wins. Entries overlap, so the order must not change.
static MOVEMENT_PATTERN_MATCHERS: LazyLock<Vec<(MovementPattern, Regex)>> = LazyLock::new(|| {
    matchers(&[
        (
            MovementPattern::Squat,
            r"(?i)\b(squats?|leg press|lunges?|step[- ]?ups?|pistol)\b",
        ),
        (
            MovementPattern::Hinge,
            r"(?i)\b(deadlifts?|rdls?|romanian|good mornings?|hip thrusts?|glute bridges?|kettlebell swings?|rack pulls?|back extensions?|hyperextensions?)\b",
        ),
        (
            MovementPattern::HorizontalPush,
            r"(?i)\b(bench|push[- ]?ups?|chest press|floor press|dips?|chest fl(y|yes?)|pec deck)\b",
        ),
        (
            MovementPattern::VerticalPush,
            r"(?i)\b(overhead press|shoulder press|military press|ohp|push press|arnold press|landmine press|handstand push[- ]?ups?)\b",
        ),
        (
            MovementPattern::HorizontalPull,
            r"(?i)\b(rows?|face pulls?|reverse fl(y|yes?)|rear delt fl(y|yes?))\b",
        ),
        (
            MovementPattern::VerticalPull,
            r"(?i)\b(pull[- ]?ups?|chin[- ]?ups?|pull[- ]?downs?|lat pull)\b",
        ),
    ])
});

static LIFT_MATCHERS: LazyLock<Vec<(LiftId, Regex)>> = LazyLock::new(|| {
    matchers(&[
        (LiftId::BenchPress, r"(?i)\bbench press\b"),
        (
            LiftId::Squat,
            r"(?i)(\b(back|front|barbell|high[- ]bar|low[- ]bar) squats?\b|^\s*squats?\s*$)",
        ),
        (LiftId::Deadlift, r"(?i)\bdeadlifts?\b"),
        (
            LiftId::OverheadPress,
            r"(?i)\b(overhead press|military press|ohp|standing shoulder press)\b",
        ),
        (
            LiftId::BarbellRow,
            r"(?i)\b(barbell rows?|bent[- ]over rows?|pendlay rows?)\b",
        ),
        (LiftId::PullUp, r"(?i)\b(pull[- ]?ups?|chin[- ]?ups?)\b"),
    ])
});

fn matchers<T: Copy>(table: &[(T, &str)]) -> Vec<(T, Regex)> {
    table
        .iter()
        .map(|(result, pattern)| {
            (
                *result,
                Regex::new(pattern).expect("classifier patterns are valid regexes"),
            )
        })
        .collect()
}

fn first_match<T: Copy>(matchers: &[(T, Regex)], name: &str) -> Option<T> {
    matchers
        .iter()
        .find(|(_, pattern)| pattern.is_match(name))
        .map(|(result, _)| *result)
}

/// Infer the movement pattern of an exercise from its display name.
#[must_use]
pub fn infer_movement_pattern(name: &str) -> Option<MovementPattern> {
    first_match(&MOVEMENT_PATTERN_MATCHERS, name)
}

/// Infer which tracked compound lift an exercise is from its display name.
#[must_use]
pub fn infer_lift_id(name: &str) -> Option<LiftId> {
    first_match(&LIFT_MATCHERS, name)
}

/// A volume map containing every movement pattern with a count of zero.
#[must_use]
pub fn empty_movement_volume() -> BTreeMap<MovementPattern, u32> {
    MovementPattern::iter().map(|p| (*p, 0)).collect()
}
