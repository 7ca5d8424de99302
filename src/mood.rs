use crate::theme::mood::{
    FRUSTRATED_STYLE, GOOD_STYLE, GREAT_STYLE, NEUTRAL_STYLE, UNEASY_STYLE, UNRATED_STYLE,
};
use ratatui::style::Style;

/// How a workout's mood rating is presented.  Every rating, including ones
/// outside of 1 through 5 and missing ones, maps to some tag.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum MoodTag {
    Frustrated,
    Uneasy,
    Neutral,
    Good,
    Great,
    Unrated,
}

impl MoodTag {
    pub(crate) fn from_rating(rating: Option<i64>) -> MoodTag {
        match rating {
            Some(1) => MoodTag::Frustrated,
            Some(2) => MoodTag::Uneasy,
            Some(3) => MoodTag::Neutral,
            Some(4) => MoodTag::Good,
            Some(5) => MoodTag::Great,
            _ => MoodTag::Unrated,
        }
    }

    pub(crate) fn emoji(self) -> &'static str {
        match self {
            MoodTag::Frustrated => "😤",
            MoodTag::Uneasy => "😕",
            MoodTag::Neutral | MoodTag::Unrated => "😐",
            MoodTag::Good => "😊",
            MoodTag::Great => "😄",
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            MoodTag::Frustrated => "frustrated",
            MoodTag::Uneasy => "uneasy",
            MoodTag::Neutral => "okay",
            MoodTag::Good => "good",
            MoodTag::Great => "great",
            MoodTag::Unrated => "unrated",
        }
    }

    pub(crate) fn style(self) -> Style {
        match self {
            MoodTag::Frustrated => FRUSTRATED_STYLE,
            MoodTag::Uneasy => UNEASY_STYLE,
            MoodTag::Neutral => NEUTRAL_STYLE,
            MoodTag::Good => GOOD_STYLE,
            MoodTag::Great => GREAT_STYLE,
            MoodTag::Unrated => UNRATED_STYLE,
        }
    }
}

impl From<i64> for MoodTag {
    fn from(rating: i64) -> MoodTag {
        MoodTag::from_rating(Some(rating))
    }
}
