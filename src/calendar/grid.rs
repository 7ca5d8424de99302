use super::util::{iter_month_from, WeekdayExt, DAYS_IN_WEEK};
use crate::workout::WorkoutRecord;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{Date, Month};

/// A calendar month.  Integer months crossing this type's API are one-based.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    pub(crate) fn new(year: i32, month: u8) -> Result<YearMonth, GridError> {
        let Ok(m) = Month::try_from(month) else {
            return Err(GridError::InvalidArgument { year, month });
        };
        Ok(YearMonth { year, month: m })
    }

    pub(crate) fn containing(date: Date) -> YearMonth {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub(crate) fn year(self) -> i32 {
        self.year
    }

    pub(crate) fn month(self) -> Month {
        self.month
    }

    /// Returns the first day of the month, or `InvalidArgument` if the year
    /// is outside the range of supported dates
    pub(crate) fn first_day(self) -> Result<Date, GridError> {
        Date::from_calendar_date(self.year, self.month, 1).map_err(|_| {
            GridError::InvalidArgument {
                year: self.year,
                month: self.month.into(),
            }
        })
    }

    /// Returns the first and last days of the month
    pub(crate) fn bounds(self) -> Result<(Date, Date), GridError> {
        let first = self.first_day()?;
        let last = iter_month_from(first).last().unwrap_or(first);
        Ok((first, last))
    }

    pub(crate) fn advance(self, direction: Direction) -> YearMonth {
        advance_month(self, direction)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

impl FromStr for YearMonth {
    type Err = ParseYearMonthError;

    /// Parse a `YYYY-MM` string.  A leading minus sign denotes a year BCE.
    /// Months outside the range of supported dates are rejected.
    fn from_str(s: &str) -> Result<YearMonth, ParseYearMonthError> {
        let err = || ParseYearMonthError(s.to_owned());
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (year, month) = rest.split_once('-').ok_or_else(err)?;
        if year.is_empty() || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let mut year = year.parse::<i32>().map_err(|_| err())?;
        if negative {
            year = -year;
        }
        let month = month.parse::<u8>().map_err(|_| err())?;
        let ym = YearMonth::new(year, month).map_err(|_| err())?;
        ym.first_day().map_err(|_| err())?;
        Ok(ym)
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid month {0:?}; expected YYYY-MM")]
pub(crate) struct ParseYearMonthError(String);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    Previous,
    Next,
}

/// Returns the month before or after `current`, rolling over the year
/// boundary as needed.
pub(crate) fn advance_month(current: YearMonth, direction: Direction) -> YearMonth {
    let YearMonth { year, month } = current;
    match (direction, month) {
        (Direction::Next, Month::December) => YearMonth {
            year: year.saturating_add(1),
            month: Month::January,
        },
        (Direction::Next, m) => YearMonth {
            year,
            month: m.next(),
        },
        (Direction::Previous, Month::January) => YearMonth {
            year: year.saturating_sub(1),
            month: Month::December,
        },
        (Direction::Previous, m) => YearMonth {
            year,
            month: m.previous(),
        },
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum CalendarCell<'a> {
    /// Padding before the first day of the month
    Empty,
    Day {
        day: u8,
        date: Date,
        workout: Option<&'a WorkoutRecord>,
        is_today: bool,
    },
}

impl<'a> CalendarCell<'a> {
    /// Returns the day of the month, or `None` for padding
    pub(crate) fn day_number(&self) -> Option<u8> {
        match *self {
            CalendarCell::Day { day, .. } => Some(day),
            CalendarCell::Empty => None,
        }
    }

    pub(crate) fn workout(&self) -> Option<&'a WorkoutRecord> {
        match *self {
            CalendarCell::Day { workout, .. } => workout,
            CalendarCell::Empty => None,
        }
    }

    pub(crate) fn is_today(&self) -> bool {
        matches!(self, CalendarCell::Day { is_today: true, .. })
    }
}

/// The cells for one month of the calendar, aligned so that index 0 is a
/// Sunday.  Trailing cells after the last day of the month are not included.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid<'a> {
    month: YearMonth,
    leading_blanks: usize,
    cells: Vec<CalendarCell<'a>>,
}

impl<'a> MonthGrid<'a> {
    pub(crate) fn for_month(
        month: YearMonth,
        workouts: &'a [WorkoutRecord],
        today: Date,
    ) -> Result<MonthGrid<'a>, GridError> {
        let first = month.first_day()?;
        let leading_blanks = usize::from(first.weekday().index0());
        let mut cells = Vec::with_capacity(leading_blanks + 31);
        cells.resize(leading_blanks, CalendarCell::Empty);
        cells.extend(iter_month_from(first).map(|date| CalendarCell::Day {
            day: date.day(),
            date,
            workout: workout_for_date(workouts, date),
            is_today: date == today,
        }));
        Ok(MonthGrid {
            month,
            leading_blanks,
            cells,
        })
    }

    pub(crate) fn month(&self) -> YearMonth {
        self.month
    }

    pub(crate) fn cells(&self) -> &[CalendarCell<'a>] {
        &self.cells
    }

    pub(crate) fn days_in_month(&self) -> usize {
        self.cells.len() - self.leading_blanks
    }

    /// Returns the cell for the given day of the month
    pub(crate) fn day(&self, day: u8) -> Option<&CalendarCell<'a>> {
        let i = usize::from(day).checked_sub(1)?;
        self.cells.get(self.leading_blanks + i)
    }

    pub(crate) fn workout_on(&self, day: u8) -> Option<&'a WorkoutRecord> {
        self.day(day).and_then(CalendarCell::workout)
    }

    /// Rows of up to seven cells, starting on Sunday
    pub(crate) fn weeks(&self) -> std::slice::Chunks<'_, CalendarCell<'a>> {
        self.cells.chunks(DAYS_IN_WEEK)
    }
}

/// Build the calendar grid for a one-based `month` of `year`.
///
/// `workouts` need not be limited to the month in question; records dated
/// outside of it are ignored.  If more than one record falls on the same
/// day, the first in `workouts` is used.
pub(crate) fn build_grid(
    year: i32,
    month: u8,
    workouts: &[WorkoutRecord],
    today: Date,
) -> Result<MonthGrid<'_>, GridError> {
    MonthGrid::for_month(YearMonth::new(year, month)?, workouts, today)
}

/// Returns the first record dated `date`
pub(crate) fn workout_for_date(workouts: &[WorkoutRecord], date: Date) -> Option<&WorkoutRecord> {
    workouts.iter().find(|w| w.date == date)
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum GridError {
    #[error("invalid calendar month: year {year}, month {month}")]
    InvalidArgument { year: i32, month: u8 },
}
