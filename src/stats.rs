use crate::workout::WorkoutRecord;
use std::collections::BTreeSet;
use time::Date;

/// Number of workouts shown under "Recent Activity"
pub(crate) const RECENT_LIMIT: usize = 5;

/// Dashboard statistics for one user's workouts as of a given day
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Summary {
    pub(crate) total_workouts: usize,
    pub(crate) last_workout: Option<Date>,
    pub(crate) current_streak: u32,
    pub(crate) longest_streak: u32,
    /// Most recent workouts, newest first
    pub(crate) recent: Vec<WorkoutRecord>,
}

impl Summary {
    /// Compute statistics from `workouts`, which may be in any order.
    ///
    /// A streak is a run of consecutive calendar days each having at least
    /// one workout.  The current streak is the run ending on the latest
    /// workout day, provided that day is `today` or the day before;
    /// otherwise it is zero.  Workouts dated after `today` are ignored for
    /// streak purposes.
    pub(crate) fn compute(workouts: &[WorkoutRecord], today: Date) -> Summary {
        let days = workouts
            .iter()
            .map(|w| w.date)
            .filter(|&d| d <= today)
            .collect::<BTreeSet<_>>();
        let (current_streak, longest_streak) = calculate_streaks(&days, today);
        let mut recent = workouts.iter().enumerate().collect::<Vec<_>>();
        // Newest date first; among same-day workouts, the later-logged first
        recent.sort_by(|(i, a), (j, b)| b.date.cmp(&a.date).then(j.cmp(i)));
        let recent = recent
            .into_iter()
            .take(RECENT_LIMIT)
            .map(|(_, w)| w.clone())
            .collect::<Vec<_>>();
        Summary {
            total_workouts: workouts.len(),
            last_workout: workouts.iter().map(|w| w.date).max(),
            current_streak,
            longest_streak,
            recent,
        }
    }

    /// The motivational line shown above the calendar
    pub(crate) fn headline(&self) -> String {
        if self.current_streak > 0 {
            format!("🔥 {} day streak! Keep going!", self.current_streak)
        } else if self.total_workouts == 0 {
            String::from("Welcome! Log your first workout to get started.")
        } else {
            String::from("Ready for your next workout?")
        }
    }
}

fn calculate_streaks(days: &BTreeSet<Date>, today: Date) -> (u32, u32) {
    let mut current = 0u32;
    let mut longest = 0u32;
    let mut prev: Option<Date> = None;
    for &day in days {
        current = match prev.and_then(Date::next_day) {
            Some(expected) if expected == day => current.saturating_add(1),
            _ => 1,
        };
        longest = longest.max(current);
        prev = Some(day);
    }
    let active = prev.is_some_and(|last| last == today || last.next_day() == Some(today));
    if !active {
        current = 0;
    }
    (current, longest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::BodyPart;
    use time::macros::date;

    fn on(dates: &[Date]) -> Vec<WorkoutRecord> {
        dates
            .iter()
            .map(|&d| WorkoutRecord::new(d, BodyPart::Cardio, 3))
            .collect()
    }

    #[test]
    fn test_empty() {
        let summary = Summary::compute(&[], date!(2024 - 02 - 15));
        assert_eq!(
            summary,
            Summary {
                total_workouts: 0,
                last_workout: None,
                current_streak: 0,
                longest_streak: 0,
                recent: Vec::new(),
            }
        );
        assert_eq!(
            summary.headline(),
            "Welcome! Log your first workout to get started."
        );
    }

    #[test]
    fn test_streak_through_today() {
        let workouts = on(&[
            date!(2024 - 02 - 15),
            date!(2024 - 02 - 13),
            date!(2024 - 02 - 14),
            date!(2024 - 02 - 10),
        ]);
        let summary = Summary::compute(&workouts, date!(2024 - 02 - 15));
        assert_eq!(summary.current_streak, 3);
        assert_eq!(summary.longest_streak, 3);
        assert_eq!(summary.total_workouts, 4);
        assert_eq!(summary.last_workout, Some(date!(2024 - 02 - 15)));
        assert_eq!(summary.headline(), "🔥 3 day streak! Keep going!");
    }

    #[test]
    fn test_streak_still_alive_yesterday() {
        let workouts = on(&[date!(2024 - 02 - 28), date!(2024 - 02 - 29)]);
        let summary = Summary::compute(&workouts, date!(2024 - 03 - 01));
        assert_eq!(summary.current_streak, 2);
    }

    #[test]
    fn test_broken_streak() {
        let workouts = on(&[
            date!(2024 - 01 - 01),
            date!(2024 - 01 - 02),
            date!(2024 - 01 - 03),
            date!(2024 - 01 - 04),
            date!(2024 - 02 - 10),
        ]);
        let summary = Summary::compute(&workouts, date!(2024 - 02 - 15));
        assert_eq!(summary.current_streak, 0);
        assert_eq!(summary.longest_streak, 4);
        assert_eq!(summary.headline(), "Ready for your next workout?");
    }

    #[test]
    fn test_same_day_counts_once() {
        let workouts = on(&[
            date!(2024 - 02 - 14),
            date!(2024 - 02 - 15),
            date!(2024 - 02 - 15),
        ]);
        let summary = Summary::compute(&workouts, date!(2024 - 02 - 15));
        assert_eq!(summary.total_workouts, 3);
        assert_eq!(summary.current_streak, 2);
        assert_eq!(summary.longest_streak, 2);
    }

    #[test]
    fn test_streak_across_year_end() {
        let workouts = on(&[date!(2024 - 12 - 31), date!(2025 - 01 - 01)]);
        let summary = Summary::compute(&workouts, date!(2025 - 01 - 01));
        assert_eq!(summary.current_streak, 2);
    }

    #[test]
    fn test_future_workouts_ignored_for_streaks() {
        let workouts = on(&[date!(2024 - 02 - 15), date!(2024 - 02 - 16)]);
        let summary = Summary::compute(&workouts, date!(2024 - 02 - 15));
        assert_eq!(summary.current_streak, 1);
        assert_eq!(summary.longest_streak, 1);
        assert_eq!(summary.last_workout, Some(date!(2024 - 02 - 16)));
    }

    #[test]
    fn test_recent() {
        let mut workouts = on(&[
            date!(2024 - 02 - 01),
            date!(2024 - 02 - 07),
            date!(2024 - 02 - 03),
            date!(2024 - 02 - 05),
            date!(2024 - 02 - 02),
            date!(2024 - 02 - 06),
        ]);
        workouts.push(WorkoutRecord::new(date!(2024 - 02 - 07), BodyPart::Legs, 5));
        let summary = Summary::compute(&workouts, date!(2024 - 02 - 07));
        let recent = summary
            .recent
            .iter()
            .map(|w| (w.date, w.body_part))
            .collect::<Vec<_>>();
        assert_eq!(
            recent,
            [
                (date!(2024 - 02 - 07), BodyPart::Legs),
                (date!(2024 - 02 - 07), BodyPart::Cardio),
                (date!(2024 - 02 - 06), BodyPart::Cardio),
                (date!(2024 - 02 - 05), BodyPart::Cardio),
                (date!(2024 - 02 - 03), BodyPart::Cardio),
            ]
        );
    }
}
