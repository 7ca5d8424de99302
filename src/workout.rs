use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

pub(crate) static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Lowest and highest values accepted for mood and intensity ratings
pub(crate) const RATING_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum BodyPart {
    Chest,
    Back,
    Shoulders,
    Arms,
    Legs,
    Core,
    Cardio,
    FullBody,
}

impl BodyPart {
    pub(crate) const ALL: [BodyPart; 8] = [
        BodyPart::Chest,
        BodyPart::Back,
        BodyPart::Shoulders,
        BodyPart::Arms,
        BodyPart::Legs,
        BodyPart::Core,
        BodyPart::Cardio,
        BodyPart::FullBody,
    ];

    /// The tag under which the body part is stored
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            BodyPart::Chest => "chest",
            BodyPart::Back => "back",
            BodyPart::Shoulders => "shoulders",
            BodyPart::Arms => "arms",
            BodyPart::Legs => "legs",
            BodyPart::Core => "core",
            BodyPart::Cardio => "cardio",
            BodyPart::FullBody => "full_body",
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            BodyPart::Chest => "Chest",
            BodyPart::Back => "Back",
            BodyPart::Shoulders => "Shoulders",
            BodyPart::Arms => "Arms",
            BodyPart::Legs => "Legs",
            BodyPart::Core => "Core",
            BodyPart::Cardio => "Cardio",
            BodyPart::FullBody => "Full Body",
        }
    }

    /// Label trimmed to fit under a day number in the calendar
    pub(crate) fn short_label(self) -> &'static str {
        match self {
            BodyPart::Shoulders => "Shldr",
            BodyPart::Cardio => "Cardi",
            BodyPart::FullBody => "Full",
            bp => bp.label(),
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyPart {
    type Err = ParseBodyPartError;

    fn from_str(s: &str) -> Result<BodyPart, ParseBodyPartError> {
        let norm = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        BodyPart::ALL
            .into_iter()
            .find(|bp| bp.as_str() == norm)
            .ok_or_else(|| ParseBodyPartError(s.to_owned()))
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown body part {0:?}")]
pub(crate) struct ParseBodyPartError(String);

/// A logged workout as read back from a workout source.  Ratings are kept as
/// stored and are not range-checked.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct WorkoutRecord {
    pub(crate) date: Date,
    pub(crate) body_part: BodyPart,
    pub(crate) mood: i64,
    pub(crate) intensity: Option<i64>,
    pub(crate) notes: Option<String>,
    pub(crate) struggles: Option<String>,
    pub(crate) user_id: Option<String>,
}

impl WorkoutRecord {
    pub(crate) fn new(date: Date, body_part: BodyPart, mood: i64) -> WorkoutRecord {
        WorkoutRecord {
            date,
            body_part,
            mood,
            intensity: None,
            notes: None,
            struggles: None,
            user_id: None,
        }
    }
}

/// A workout about to be logged.  Unlike [`WorkoutRecord`], its ratings are
/// guaranteed to be in range.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct NewWorkout {
    date: Date,
    body_part: BodyPart,
    mood: i64,
    intensity: Option<i64>,
    notes: Option<String>,
    struggles: Option<String>,
}

impl NewWorkout {
    pub(crate) fn new(date: Date, body_part: BodyPart, mood: i64) -> Result<NewWorkout, WorkoutError> {
        Ok(NewWorkout {
            date,
            body_part,
            mood: check_rating("mood", mood)?,
            intensity: None,
            notes: None,
            struggles: None,
        })
    }

    pub(crate) fn intensity(mut self, intensity: i64) -> Result<NewWorkout, WorkoutError> {
        self.intensity = Some(check_rating("intensity", intensity)?);
        Ok(self)
    }

    pub(crate) fn notes(mut self, notes: String) -> NewWorkout {
        self.notes = non_blank(notes);
        self
    }

    pub(crate) fn struggles(mut self, struggles: String) -> NewWorkout {
        self.struggles = non_blank(struggles);
        self
    }

    pub(crate) fn into_record(self, user_id: Option<String>) -> WorkoutRecord {
        WorkoutRecord {
            intensity: self.intensity,
            notes: self.notes,
            struggles: self.struggles,
            user_id,
            ..WorkoutRecord::new(self.date, self.body_part, self.mood)
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum WorkoutError {
    #[error("{field} rating must be between 1 and 5, got {value}")]
    RatingOutOfRange { field: &'static str, value: i64 },
}

fn check_rating(field: &'static str, value: i64) -> Result<i64, WorkoutError> {
    if RATING_RANGE.contains(&value) {
        Ok(value)
    } else {
        Err(WorkoutError::RatingOutOfRange { field, value })
    }
}

fn non_blank(s: String) -> Option<String> {
    (!s.trim().is_empty()).then_some(s)
}
