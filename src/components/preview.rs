use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

use crate::markdown::renderer::{render_markdown, RenderedDocument};
use crate::session::PreviewSurface;
use crate::theme;

/// Scroll units per terminal row.
pub const ROW_UNITS: i32 = 20;

/// Row counts past `u16::MAX` pin to it rather than wrapping.
fn clamp_rows(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// The rendered, read-only view of a note.
///
/// Scroll offsets are kept in units rather than rows so a scroll step
/// can be finer than a whole line.
#[derive(Debug, Default)]
pub struct PreviewPane {
    document: RenderedDocument,
    scroll_offset: i32,
    /// Wrapped row count from the last render.
    pub content_height: u16,
    pub viewport_height: u16,
    focused: bool,
    /// Bumped every time the content is re-rendered into a fresh surface.
    epoch: u64,
}

impl PreviewPane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `content` into a fresh surface: scrolled to the top,
    /// unfocused, math not yet typeset.
    pub fn load(&mut self, content: &str) {
        self.document = render_markdown(content);
        self.content_height = clamp_rows(self.document.line_count());
        self.scroll_offset = 0;
        self.focused = false;
        self.epoch += 1;
    }

    pub fn typeset(&mut self) {
        self.document.typeset();
    }

    pub fn document(&self) -> &RenderedDocument {
        &self.document
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// First visible row.
    pub fn top_row(&self) -> u16 {
        (self.scroll_offset / ROW_UNITS) as u16
    }

    fn max_offset(&self) -> i32 {
        self.content_height.saturating_sub(self.viewport_height) as i32 * ROW_UNITS
    }

    fn scroll_rows(&mut self, rows: i32) {
        self.scroll_by(rows.saturating_mul(ROW_UNITS));
    }

    /// Plain scrolling keys a focused scroll region answers to.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let page = self.viewport_height.saturating_sub(2).max(1) as i32;
        match key.code {
            KeyCode::Up => self.scroll_rows(-1),
            KeyCode::Down => self.scroll_rows(1),
            KeyCode::PageUp => self.scroll_rows(-page),
            KeyCode::PageDown => self.scroll_rows(page),
            KeyCode::Home => self.scroll_offset = 0,
            KeyCode::End => self.scroll_offset = self.max_offset(),
            _ => return false,
        }
        true
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.width < 2 {
            return;
        }
        // Leave the last column for the scrollbar.
        let text_area = Rect::new(area.x, area.y, area.width - 1, area.height);

        let paragraph = if self.document.line_count() == 0 {
            Paragraph::new(Line::styled("  Nothing to preview", Style::default().fg(theme::TILDE)))
        } else {
            Paragraph::new(self.document.text()).wrap(Wrap { trim: false })
        };

        self.viewport_height = area.height;
        self.content_height = clamp_rows(paragraph.line_count(text_area.width));
        self.scroll_offset = self.scroll_offset.min(self.max_offset());

        frame.render_widget(paragraph.scroll((self.top_row(), 0)), text_area);

        if self.content_height > self.viewport_height {
            let mut state = ScrollbarState::new(self.max_offset() as usize / ROW_UNITS as usize)
                .position(self.top_row() as usize);
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .thumb_style(theme::focus_border_style(self.focused));
            frame.render_stateful_widget(scrollbar, area, &mut state);
        }
    }
}

impl PreviewSurface for PreviewPane {
    fn scroll_by(&mut self, delta: i32) {
        self.scroll_offset = self
            .scroll_offset
            .saturating_add(delta)
            .clamp(0, self.max_offset());
    }

    fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn pane_with_rows(rows: usize, viewport: u16) -> PreviewPane {
        let content: Vec<String> = (0..rows).map(|i| format!("line {}\n", i)).collect();
        let mut pane = PreviewPane::new();
        pane.load(&content.join("\n"));
        pane.viewport_height = viewport;
        pane
    }

    #[test]
    fn load_resets_surface() {
        let mut pane = pane_with_rows(50, 10);
        pane.scroll_by(100);
        pane.focus();
        let epoch = pane.epoch();

        pane.load("# again");

        assert_eq!(pane.scroll_offset(), 0);
        assert!(!pane.is_focused());
        assert_eq!(pane.epoch(), epoch + 1);
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut pane = pane_with_rows(30, 10);
        // 30 paragraphs render with blank lines between them.
        let max = (pane.content_height - 10) as i32 * ROW_UNITS;
        pane.scroll_by(-100);
        assert_eq!(pane.scroll_offset(), 0);
        pane.scroll_by(1_000_000);
        assert_eq!(pane.scroll_offset(), max);
    }

    #[test]
    fn hundred_units_is_five_rows() {
        let mut pane = pane_with_rows(50, 10);
        pane.scroll_by(100);
        assert_eq!(pane.top_row(), 5);
    }

    #[test]
    fn arrow_keys_scroll_by_row() {
        let mut pane = pane_with_rows(50, 10);
        assert!(pane.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)));
        assert_eq!(pane.scroll_offset(), ROW_UNITS);
        pane.handle_key(KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        assert_eq!(pane.scroll_offset(), pane.max_offset());
        pane.handle_key(KeyEvent::new(KeyCode::Home, KeyModifiers::NONE));
        assert_eq!(pane.scroll_offset(), 0);
        assert!(!pane.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)));
    }

    #[test]
    fn huge_scroll_steps_saturate_at_bottom() {
        let mut pane = pane_with_rows(50, 10);
        pane.scroll_by(i32::MAX);
        pane.scroll_by(i32::MAX);
        assert_eq!(pane.scroll_offset(), pane.max_offset());
        pane.scroll_by(i32::MIN);
        pane.scroll_by(i32::MIN);
        assert_eq!(pane.scroll_offset(), 0);
    }

    #[test]
    fn very_long_document_stays_reachable() {
        let body = "x\n".repeat(70_000);
        let mut pane = PreviewPane::new();
        pane.load(&format!("```\n{}```\n", body));
        pane.viewport_height = 10;
        assert_eq!(pane.content_height, u16::MAX);

        pane.handle_key(KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        assert_eq!(pane.top_row(), u16::MAX - 10);
    }

    #[test]
    fn row_counts_pin_at_u16_max() {
        assert_eq!(clamp_rows(12), 12);
        assert_eq!(clamp_rows(69_999), u16::MAX);
    }
}
