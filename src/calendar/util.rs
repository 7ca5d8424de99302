use std::iter::successors;
use time::{Date, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

/// Iterate over `date` and every following day in the same month
pub(super) fn iter_month_from(date: Date) -> impl Iterator<Item = Date> {
    let month = date.month();
    successors(Some(date), |&d| d.next_day()).take_while(move |d| d.month() == month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_index0() {
        assert_eq!(Weekday::Sunday.index0(), 0);
        assert_eq!(Weekday::Thursday.index0(), 4);
        assert_eq!(Weekday::Saturday.index0(), 6);
    }

    #[test]
    fn test_iter_month_from() {
        let days = iter_month_from(date!(2023 - 02 - 26)).collect::<Vec<_>>();
        assert_eq!(
            days,
            [date!(2023 - 02 - 26), date!(2023 - 02 - 27), date!(2023 - 02 - 28)]
        );
    }

    #[test]
    fn test_iter_month_from_end_of_time() {
        let days = iter_month_from(date!(9999 - 12 - 30)).collect::<Vec<_>>();
        assert_eq!(days, [date!(9999 - 12 - 30), date!(9999 - 12 - 31)]);
    }
}
