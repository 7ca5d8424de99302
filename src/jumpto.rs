use crate::calendar::YearMonth;
use crate::theme::{
    jumpto::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

const OUTER_WIDTH: u16 = 17;
const OUTER_HEIGHT: u16 = 8;
const YEAR_DIGITS: usize = 4;
const ENTER_POS: usize = YEAR_DIGITS + 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct JumpTo;

impl StatefulWidget for JumpTo {
    type State = JumpToState;

    /*
     * .................
     * .┌─ Jump To… ──┐.
     * .│             │.
     * .│  -YYYY-MM   │.
     * .│             │.
     * .│   [ENTER]   │.
     * .└─────────────┘.
     * .................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Jump To… ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

/// Partially-entered `YYYY-MM` month to jump to
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct JumpToState {
    negative: bool,
    year: [Option<u8>; YEAR_DIGITS],
    month: [Option<u8>; 2],
    pos: usize,
}

impl JumpToState {
    pub(crate) fn new() -> JumpToState {
        JumpToState::default()
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.to_line(),
            Line::styled("", BASE_STYLE),
            // Only the "[ENTER]" text and not its centering padding should be
            // underlined, so style a span rather than the line
            Line::from(Span::styled(
                "[ENTER]",
                if self.pos == ENTER_POS {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
        ])
        .centered()
    }

    fn to_line(self) -> Line<'static> {
        let mut spans = Vec::new();
        spans.push(Span::styled(
            if self.negative { "-" } else { " " },
            BASE_STYLE,
        ));
        let mut first = true;
        for (fallback, digits) in [("Y", self.year.as_slice()), ("M", self.month.as_slice())] {
            if !std::mem::replace(&mut first, false) {
                spans.push(Span::styled("-", BASE_STYLE));
            }
            for dg in digits {
                spans.push(match dg {
                    Some(d) => Span::styled(format!("{d}"), BASE_STYLE),
                    None => Span::styled(fallback, UNFILLED_CELL_STYLE),
                });
            }
        }
        Line::from_iter(spans)
    }

    pub(crate) fn handle_input(&mut self, input: JumpToInput) -> JumpToOutput {
        match (input, self.pos) {
            (JumpToInput::Negative, 0) => {
                self.negative = !self.negative;
                JumpToOutput::Ok
            }
            (JumpToInput::Positive, 0) => {
                self.negative = false;
                JumpToOutput::Ok
            }
            (JumpToInput::Digit(d), 0..ENTER_POS) if d < 10 => {
                *self.slot(self.pos) = Some(d);
                self.pos += 1;
                JumpToOutput::Ok
            }
            (JumpToInput::Backspace, 1..) => {
                self.pos -= 1;
                *self.slot(self.pos) = None;
                JumpToOutput::Ok
            }
            (JumpToInput::Enter, ENTER_POS) => match self.entered() {
                Some(ym) => JumpToOutput::Jump(ym),
                None => JumpToOutput::Invalid,
            },
            _ => JumpToOutput::Invalid,
        }
    }

    fn slot(&mut self, pos: usize) -> &mut Option<u8> {
        if pos < YEAR_DIGITS {
            &mut self.year[pos]
        } else {
            &mut self.month[pos - YEAR_DIGITS]
        }
    }

    fn entered(&self) -> Option<YearMonth> {
        let mut year = 0i32;
        for d in self.year {
            year = year * 10 + i32::from(d?);
        }
        if self.negative {
            year = -year;
        }
        let mut month = 0u8;
        for d in self.month {
            month = month * 10 + d?;
        }
        let ym = YearMonth::new(year, month).ok()?;
        // Only offer months that the calendar can display
        ym.first_day().ok().map(|_| ym)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToInput {
    Negative,
    Positive,
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToOutput {
    Ok,
    Invalid,
    Jump(YearMonth),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_digits(state: &mut JumpToState, digits: &[u8]) {
        for &d in digits {
            assert_eq!(state.handle_input(JumpToInput::Digit(d)), JumpToOutput::Ok);
        }
    }

    #[test]
    fn test_jump() {
        let mut state = JumpToState::new();
        type_digits(&mut state, &[2, 0, 2, 4, 0, 2]);
        assert_eq!(
            state.handle_input(JumpToInput::Enter),
            JumpToOutput::Jump(YearMonth::new(2024, 2).unwrap())
        );
    }

    #[test]
    fn test_negative_year() {
        let mut state = JumpToState::new();
        assert_eq!(state.handle_input(JumpToInput::Negative), JumpToOutput::Ok);
        type_digits(&mut state, &[0, 0, 4, 4, 0, 3]);
        assert_eq!(
            state.handle_input(JumpToInput::Enter),
            JumpToOutput::Jump(YearMonth::new(-44, 3).unwrap())
        );
    }

    #[test]
    fn test_enter_too_early() {
        let mut state = JumpToState::new();
        type_digits(&mut state, &[2, 0, 2, 4, 1]);
        assert_eq!(state.handle_input(JumpToInput::Enter), JumpToOutput::Invalid);
    }

    #[test]
    fn test_bad_month() {
        let mut state = JumpToState::new();
        type_digits(&mut state, &[2, 0, 2, 4, 1, 3]);
        assert_eq!(state.handle_input(JumpToInput::Enter), JumpToOutput::Invalid);
    }

    #[test]
    fn test_too_many_digits() {
        let mut state = JumpToState::new();
        type_digits(&mut state, &[2, 0, 2, 4, 1, 2]);
        assert_eq!(
            state.handle_input(JumpToInput::Digit(5)),
            JumpToOutput::Invalid
        );
    }

    #[test]
    fn test_backspace() {
        let mut state = JumpToState::new();
        assert_eq!(
            state.handle_input(JumpToInput::Backspace),
            JumpToOutput::Invalid
        );
        type_digits(&mut state, &[2, 0, 2, 4, 1, 3]);
        assert_eq!(state.handle_input(JumpToInput::Backspace), JumpToOutput::Ok);
        type_digits(&mut state, &[1]);
        assert_eq!(
            state.handle_input(JumpToInput::Enter),
            JumpToOutput::Jump(YearMonth::new(2024, 11).unwrap())
        );
    }

    #[test]
    fn test_sign_only_at_start() {
        let mut state = JumpToState::new();
        type_digits(&mut state, &[2]);
        assert_eq!(
            state.handle_input(JumpToInput::Negative),
            JumpToOutput::Invalid
        );
    }
}
