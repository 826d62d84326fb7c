use chrono::{Datelike, NaiveDate, Weekday};

use crate::{MuscleGroup, normalize_tag};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum TrainingSplit {
    #[default]
    FullBody,
    UpperLower,
    PushPullLegs,
    BroSplit,
}

impl TrainingSplit {
    #[must_use]
    pub fn parse(value: &str) -> Option<TrainingSplit> {
        match normalize_tag(value).as_str() {
            "full_body" | "fullbody" => Some(TrainingSplit::FullBody),
            "upper_lower" | "upper/lower" => Some(TrainingSplit::UpperLower),
            "push_pull_legs" | "ppl" => Some(TrainingSplit::PushPullLegs),
            "bro_split" | "body_part" | "body_part_split" => Some(TrainingSplit::BroSplit),
            _ => None,
        }
    }

    /// Tags of the workouts this split cycles through.
    #[must_use]
    pub fn rotation_tags(self) -> &'static [&'static str] {
        match self {
            TrainingSplit::FullBody => &["full_body"],
            TrainingSplit::UpperLower => &["upper", "lower"],
            TrainingSplit::PushPullLegs => &["push", "pull", "legs"],
            TrainingSplit::BroSplit => &["chest", "back", "shoulders", "arms", "legs"],
        }
    }

    /// Tag of the workout at the given position of the schedule.
    #[must_use]
    pub fn rotation_tag(self, index: usize) -> &'static str {
        let tags = self.rotation_tags();
        tags[index % tags.len()]
    }
}

/// Muscle groups a workout with the given rotation tag is meant to train.
#[must_use]
pub fn rotation_tag_muscle_groups(tag: &str) -> &'static [MuscleGroup] {
    match normalize_tag(tag).as_str() {
        "upper" => &[
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::Shoulders,
            MuscleGroup::Arms,
        ],
        "lower" | "legs" => &[MuscleGroup::Legs, MuscleGroup::Core],
        "push" => &[MuscleGroup::Chest, MuscleGroup::Shoulders, MuscleGroup::Arms],
        "pull" => &[MuscleGroup::Back, MuscleGroup::Arms],
        "chest" => &[MuscleGroup::Chest],
        "back" => &[MuscleGroup::Back],
        "shoulders" => &[MuscleGroup::Shoulders],
        "arms" => &[MuscleGroup::Arms],
        _ => &[
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::Legs,
            MuscleGroup::Shoulders,
            MuscleGroup::Arms,
            MuscleGroup::Core,
        ],
    }
}

/// Weekdays trained for a number of training days per week.
///
/// Seven or more days, zero or an unset value train every day. Fewer than three days use the
/// three day pattern.
#[must_use]
pub fn training_weekdays(days_per_week: Option<u8>) -> &'static [Weekday] {
    match days_per_week {
        None | Some(0 | 7..) => &[
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ],
        Some(6) => &[
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ],
        Some(5) => &[
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ],
        Some(4) => &[Weekday::Mon, Weekday::Tue, Weekday::Thu, Weekday::Sat],
        Some(1..=3) => &[Weekday::Mon, Weekday::Wed, Weekday::Fri],
    }
}

/// Training dates within `total_days` consecutive days starting at `start`.
#[must_use]
pub fn build_schedule_dates(
    start: NaiveDate,
    total_days: u32,
    days_per_week: Option<u8>,
) -> Vec<NaiveDate> {
    let weekdays = training_weekdays(days_per_week);
    start
        .iter_days()
        .take(total_days as usize)
        .filter(|d| weekdays.contains(&d.weekday()))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    static MONDAY: std::sync::LazyLock<NaiveDate> =
        std::sync::LazyLock::new(|| NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());

    #[test]
    fn test_build_schedule_dates_three_days() {
        let dates = build_schedule_dates(*MONDAY, 14, Some(3));
        assert_eq!(dates.len(), 6);
        assert!(
            dates
                .iter()
                .all(|d| [Weekday::Mon, Weekday::Wed, Weekday::Fri].contains(&d.weekday()))
        );
        assert_eq!(
            dates.iter().map(Datelike::day).collect::<Vec<_>>(),
            vec![4, 6, 8, 11, 13, 15]
        );
    }

    #[rstest]
    #[case(None, 14)]
    #[case(Some(0), 14)]
    #[case(Some(7), 14)]
    #[case(Some(9), 14)]
    #[case(Some(6), 12)]
    #[case(Some(5), 10)]
    #[case(Some(4), 8)]
    #[case(Some(3), 6)]
    #[case(Some(2), 6)]
    #[case(Some(1), 6)]
    fn test_build_schedule_dates_count(
        #[case] days_per_week: Option<u8>,
        #[case] expected: usize,
    ) {
        assert_eq!(
            build_schedule_dates(*MONDAY, 14, days_per_week).len(),
            expected
        );
    }

    #[test]
    fn test_build_schedule_dates_four_days() {
        assert_eq!(
            build_schedule_dates(*MONDAY, 7, Some(4))
                .iter()
                .map(Datelike::weekday)
                .collect::<Vec<_>>(),
            vec![Weekday::Mon, Weekday::Tue, Weekday::Thu, Weekday::Sat]
        );
    }

    #[test]
    fn test_build_schedule_dates_six_days_skips_sunday() {
        assert!(
            build_schedule_dates(*MONDAY, 28, Some(6))
                .iter()
                .all(|d| d.weekday() != Weekday::Sun)
        );
    }

    #[test]
    fn test_build_schedule_dates_mid_week_start() {
        let wednesday = *MONDAY + chrono::Duration::days(2);
        assert_eq!(
            build_schedule_dates(wednesday, 7, Some(3)),
            vec![
                wednesday,
                wednesday + chrono::Duration::days(2),
                wednesday + chrono::Duration::days(5),
            ]
        );
    }

    #[test]
    fn test_build_schedule_dates_no_days() {
        assert!(build_schedule_dates(*MONDAY, 0, None).is_empty());
    }

    #[rstest]
    #[case(TrainingSplit::FullBody, 0, "full_body")]
    #[case(TrainingSplit::FullBody, 5, "full_body")]
    #[case(TrainingSplit::UpperLower, 1, "lower")]
    #[case(TrainingSplit::UpperLower, 2, "upper")]
    #[case(TrainingSplit::PushPullLegs, 4, "pull")]
    #[case(TrainingSplit::BroSplit, 3, "arms")]
    #[case(TrainingSplit::BroSplit, 5, "chest")]
    fn test_training_split_rotation_tag(
        #[case] split: TrainingSplit,
        #[case] index: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(split.rotation_tag(index), expected);
    }

    #[rstest]
    #[case("Push Pull Legs", Some(TrainingSplit::PushPullLegs))]
    #[case("upper_lower", Some(TrainingSplit::UpperLower))]
    #[case("bro split", Some(TrainingSplit::BroSplit))]
    #[case("full body", Some(TrainingSplit::FullBody))]
    #[case("random", None)]
    fn test_training_split_parse(#[case] value: &str, #[case] expected: Option<TrainingSplit>) {
        assert_eq!(TrainingSplit::parse(value), expected);
    }

    #[test]
    fn test_rotation_tag_muscle_groups() {
        assert_eq!(
            rotation_tag_muscle_groups("Legs"),
            &[MuscleGroup::Legs, MuscleGroup::Core]
        );
        assert_eq!(rotation_tag_muscle_groups("full_body").len(), 6);
    }
}
