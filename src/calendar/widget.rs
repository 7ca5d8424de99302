use super::grid::MonthGrid;
use super::util::WeekdayExt;
use crate::mood::MoodTag;
use crate::theme::{REST_DAY_STYLE, TITLE_STYLE, WEEKDAY_STYLE};
use ratatui::{prelude::*, widgets::*};
use time::Weekday;

static HEADER: &str = " Su     Mo     Tu     We     Th     Fr     Sa ";

/// Width of the calendar in columns
pub(crate) const MAIN_WIDTH: u16 = 46;

/// Number of lines taken up by the title, weekday header, and its rule
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week of the calendar: one for the day
/// numbers and one for the body part worked that day
const WEEK_LINES: u16 = 2;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 7;

const ACS_HLINE: char = '─';

/// Renders one month of workouts.  Each day is coloured by the mood of its
/// workout, if any, and today's date is shown in brackets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthCalendar<'a> {
    grid: &'a MonthGrid<'a>,
}

impl<'a> MonthCalendar<'a> {
    pub(crate) fn new(grid: &'a MonthGrid<'a>) -> MonthCalendar<'a> {
        MonthCalendar { grid }
    }

    /// Number of lines needed to draw the whole month
    pub(crate) fn height(&self) -> u16 {
        let weeks = u16::try_from(self.grid.weeks().len()).unwrap_or(u16::MAX);
        HEADER_LINES.saturating_add(weeks.saturating_mul(WEEK_LINES))
    }
}

impl Widget for MonthCalendar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        let [_, area, _] = Layout::horizontal([
            Constraint::Length(left),
            Constraint::Length(MAIN_WIDTH.min(area.width)),
            Constraint::Min(0),
        ])
        .areas(area);
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(&self.grid.month().to_string());
        canvas.draw_header();
        for (week_no, week) in std::iter::zip(0u16.., self.grid.weeks()) {
            for (wd, cell) in std::iter::zip(WEEKDAYS, week) {
                let Some(day) = cell.day_number() else {
                    continue;
                };
                let workout = cell.workout();
                let style = workout.map_or(REST_DAY_STYLE, |w| MoodTag::from(w.mood).style());
                let s = if cell.is_today() {
                    format!("[{day:2}]")
                } else {
                    format!(" {day:2} ")
                };
                canvas.draw_day(week_no, wd, Span::styled(s, style));
                if let Some(w) = workout {
                    canvas.draw_label(week_no, wd, Span::styled(w.body_part.short_label(), style));
                }
            }
        }
    }
}

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sunday,
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
];

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let width = u16::try_from(title.len()).unwrap_or(u16::MAX);
        let x = MAIN_WIDTH.saturating_sub(width) / 2;
        self.mvprint(0, x, title, Some(TITLE_STYLE));
    }

    fn draw_header(&mut self) {
        self.mvprint(1, 0, HEADER, Some(WEEKDAY_STYLE));
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, wd: Weekday, s: Span<'_>) {
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            DAY_WIDTH * wd.index0(),
            s.content,
            Some(s.style),
        );
    }

    fn draw_label(&mut self, week_no: u16, wd: Weekday, s: Span<'_>) {
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES + 1,
            DAY_WIDTH * wd.index0(),
            s.content,
            Some(s.style),
        );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // A Paragraph truncates text that runs past the calendar's area,
            // as long as the Rect given to it lies within the frame.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::grid::build_grid;
    use crate::theme::{mood::GREAT_STYLE, mood::UNEASY_STYLE, BASE_STYLE};
    use crate::workout::{BodyPart, WorkoutRecord};
    use time::macros::date;

    fn row(buf: &Buffer, y: u16) -> String {
        let area = buf.area;
        (area.left()..area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_owned()
    }

    #[test]
    fn test_february_2024() {
        let workouts = [
            WorkoutRecord::new(date!(2024 - 02 - 15), BodyPart::Legs, 5),
            WorkoutRecord::new(date!(2024 - 02 - 03), BodyPart::FullBody, 2),
        ];
        let grid = build_grid(2024, 2, &workouts, date!(2024 - 02 - 15)).unwrap();
        let cal = MonthCalendar::new(&grid);
        assert_eq!(cal.height(), 13);
        let area = Rect::new(0, 0, 46, 13);
        let mut buffer = Buffer::empty(area);
        buffer.set_style(area, BASE_STYLE);
        cal.render(area, &mut buffer);
        let lines = (0..13).map(|y| row(&buffer, y)).collect::<Vec<_>>();
        assert_eq!(
            lines,
            [
                "                February 2024",
                " Su     Mo     Tu     We     Th     Fr     Sa",
                "──────────────────────────────────────────────",
                "                              1      2      3",
                "                                          Full",
                "  4      5      6      7      8      9     10",
                "",
                " 11     12     13     14    [15]    16     17",
                "                            Legs",
                " 18     19     20     21     22     23     24",
                "",
                " 25     26     27     28     29",
                "",
            ]
        );
        assert_eq!(buffer[(29, 7)].style(), GREAT_STYLE);
        assert_eq!(buffer[(28, 8)].style(), GREAT_STYLE);
        assert_eq!(buffer[(42, 4)].style(), UNEASY_STYLE);
        assert_eq!(buffer[(43, 3)].style(), UNEASY_STYLE);
        assert_eq!(buffer[(1, 5)].style(), REST_DAY_STYLE);
    }

    #[test]
    fn test_centered_and_truncated() {
        let grid = build_grid(2023, 10, &[], date!(2023 - 10 - 01)).unwrap();
        let cal = MonthCalendar::new(&grid);
        let area = Rect::new(0, 0, 50, 4);
        let mut buffer = Buffer::empty(area);
        cal.render(area, &mut buffer);
        assert_eq!(row(&buffer, 0), "                   October 2023");
        assert_eq!(row(&buffer, 1), "   Su     Mo     Tu     We     Th     Fr     Sa");
        assert_eq!(
            row(&buffer, 3),
            "  [ 1]     2      3      4      5      6      7"
        );
    }
}
