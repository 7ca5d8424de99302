mod grid;
mod util;
mod widget;
pub(crate) use self::grid::{build_grid, Direction, MonthGrid, YearMonth};
pub(crate) use self::widget::MonthCalendar;
