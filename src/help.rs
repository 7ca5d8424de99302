use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Key bindings and their descriptions, in display order
static KEYS: &[(&str, &str)] = &[
    ("h, LEFT, p", "Previous month"),
    ("l, RIGHT, n", "Next month"),
    ("0, HOME", "Jump to this month"),
    ("g", "Input month to jump to"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

const KEY_COLUMN_WIDTH: usize = 16;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Help {
    fn text() -> Text<'static> {
        let mut lines = KEYS
            .iter()
            .map(|(keys, desc)| Line::raw(format!("{keys:KEY_COLUMN_WIDTH$}{desc}")))
            .collect::<Vec<_>>();
        lines.push(Line::raw(""));
        lines.push(Line::raw("Press the Any Key to dismiss."));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.0);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2),
            height: help_area.height,
        };
        Clear.render(outer_area, buf);
        Block::new().style(self.0).render(outer_area, buf);
        para.render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::BASE_STYLE;

    #[test]
    fn test_text() {
        let text = Help::text();
        assert_eq!(text.height(), KEYS.len() + 2);
        assert_eq!(text.lines[0].to_string(), "h, LEFT, p      Previous month");
        assert_eq!(text.lines[3].to_string(), "g               Input month to jump to");
    }

    #[test]
    fn test_render_centered() {
        let area = Rect::new(0, 0, 60, 12);
        let mut buffer = Buffer::empty(area);
        Help(BASE_STYLE).render(area, &mut buffer);
        // 38 columns of text plus borders, centered in 60
        assert_eq!(buffer[(10, 1)].symbol(), "┌");
        assert_eq!(buffer[(49, 1)].symbol(), "┐");
        assert_eq!(buffer[(11, 2)].symbol(), "h");
        assert_eq!(buffer[(10, 10)].symbol(), "└");
    }
}
