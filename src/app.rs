use crate::calendar::{build_grid, Direction, MonthCalendar, MonthGrid, YearMonth};
use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::mood::MoodTag;
use crate::stats::Summary;
use crate::store::WorkoutSource;
use crate::theme::{BASE_STYLE, STATUS_STYLE, TITLE_STYLE};
use crate::workout::WorkoutRecord;
use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Paragraph, StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::Date;
use tracing::{debug, warn};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<W> {
    source: W,
    user: Option<String>,
    today: Date,
    month: YearMonth,
    /// Workouts for the displayed month
    workouts: Vec<WorkoutRecord>,
    summary: Summary,
    /// Set when the full history could not be loaded
    history_error: Option<String>,
    /// Set when the displayed month could not be loaded
    month_error: Option<String>,
    state: AppState,
}

impl<W: WorkoutSource> App<W> {
    pub(crate) fn new(source: W, user: Option<String>, today: Date) -> App<W> {
        let mut app = App {
            source,
            user,
            today,
            month: YearMonth::containing(today),
            workouts: Vec::new(),
            summary: Summary::compute(&[], today),
            history_error: None,
            month_error: None,
            state: AppState::Calendar,
        };
        app.refresh_summary();
        app.load_month();
        app
    }

    /// Start out displaying `month` instead of the current month
    pub(crate) fn start_month(mut self, month: YearMonth) -> App<W> {
        self.show_month(month);
        self
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = read()?
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h' | 'p') | KeyCode::Left => self.step(Direction::Previous),
                KeyCode::Char('l' | 'n') | KeyCode::Right => self.step(Direction::Next),
                KeyCode::Char('0') | KeyCode::Home => self.show_month(YearMonth::containing(self.today)),
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char('-') => state.handle_input(JumpToInput::Negative),
                        KeyCode::Char('+') => state.handle_input(JumpToInput::Positive),
                        KeyCode::Char(c) => match c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                            Some(d) => state.handle_input(JumpToInput::Digit(d)),
                            None => JumpToOutput::Invalid,
                        },
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(month) => {
                            self.state = AppState::Calendar;
                            self.show_month(month)
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn step(&mut self, direction: Direction) -> bool {
        self.show_month(self.month.advance(direction))
    }

    // Returns `false` if the month is outside the supported range of dates
    fn show_month(&mut self, month: YearMonth) -> bool {
        if month.first_day().is_err() {
            return false;
        }
        self.month = month;
        self.load_month();
        true
    }

    fn load_month(&mut self) {
        let Ok((start, end)) = self.month.bounds() else {
            self.workouts.clear();
            return;
        };
        match self
            .source
            .workouts_between(self.user.as_deref(), start, end)
        {
            Ok(workouts) => {
                debug!(month = %self.month, workouts = workouts.len(), "loaded month");
                self.workouts = workouts;
                self.month_error = None;
            }
            Err(e) => {
                warn!(month = %self.month, "failed to load workouts: {e}");
                self.workouts.clear();
                self.month_error = Some(format!("Could not load workouts: {e}"));
            }
        }
    }

    fn refresh_summary(&mut self) {
        match self.source.all(self.user.as_deref()) {
            Ok(all) => {
                self.summary = Summary::compute(&all, self.today);
                self.history_error = None;
            }
            Err(e) => {
                warn!("failed to load workout history: {e}");
                self.history_error = Some(format!("Could not load workout history: {e}"));
            }
        }
    }

    fn status(&self) -> Option<String> {
        let errors = [&self.history_error, &self.month_error]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>();
        (!errors.is_empty()).then(|| errors.join(" · "))
    }

    fn stats_line(&self) -> String {
        let last = self
            .summary
            .last_workout
            .map_or_else(|| String::from("never"), |d| d.to_string());
        format!(
            "Streak: {} · Longest: {} · Total: {} · Last: {last}",
            days(self.summary.current_streak),
            days(self.summary.longest_streak),
            self.summary.total_workouts,
        )
    }

    fn month_line(&self, grid: &MonthGrid<'_>) -> String {
        let trained = grid
            .cells()
            .iter()
            .filter(|c| c.workout().is_some())
            .count();
        let today = if grid.month() == YearMonth::containing(self.today) {
            grid.workout_on(self.today.day())
        } else {
            None
        };
        let today = today.map_or_else(String::new, |w| {
            format!(
                " · Today: {} ({})",
                w.body_part.label(),
                MoodTag::from(w.mood).label()
            )
        });
        format!(
            "{trained} of {} days trained{today}",
            grid.days_in_month()
        )
    }

    fn recent_text(&self) -> Text<'static> {
        let mut lines = vec![Line::styled("Recent Activity", TITLE_STYLE)];
        if self.summary.recent.is_empty() {
            lines.push(Line::styled("No workouts logged yet", BASE_STYLE));
        }
        for w in &self.summary.recent {
            let tag = MoodTag::from(w.mood);
            let intensity = w
                .intensity
                .map_or_else(String::new, |i| format!("  intensity {i}/5"));
            lines.push(Line::from_iter([
                Span::styled(tag.emoji(), tag.style()),
                Span::styled(
                    format!(
                        " {:<10} {} {:<10}{intensity:<16}",
                        w.body_part.label(),
                        w.date,
                        tag.label()
                    ),
                    BASE_STYLE,
                ),
            ]));
        }
        Text::from(lines).alignment(Alignment::Center)
    }
}

fn days(n: u32) -> String {
    if n == 1 {
        String::from("1 day")
    } else {
        format!("{n} days")
    }
}

impl<W: WorkoutSource> Widget for &mut App<W> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let grid = match build_grid(
            self.month.year(),
            u8::from(self.month.month()),
            &self.workouts,
            self.today,
        ) {
            Ok(grid) => grid,
            Err(e) => {
                Paragraph::new(e.to_string())
                    .style(STATUS_STYLE)
                    .render(area, buf);
                return;
            }
        };
        let cal = MonthCalendar::new(&grid);
        let [head_area, cal_area, stats_area, recent_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(cal.height()),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .areas(area);
        let mut head = vec![Line::styled(self.summary.headline(), TITLE_STYLE)];
        if let Some(status) = self.status() {
            head.push(Line::styled(status, STATUS_STYLE));
        }
        Paragraph::new(head)
            .alignment(Alignment::Center)
            .render(head_area, buf);
        cal.render(cal_area, buf);
        Paragraph::new(vec![
            Line::raw(self.stats_line()),
            Line::raw(self.month_line(&grid)),
        ])
        .alignment(Alignment::Center)
        .render(stats_area, buf);
        Paragraph::new(self.recent_text()).render(recent_area, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Jumping(JumpToState),
    Quitting,
}
