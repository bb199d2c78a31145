use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::session::Mode;
use crate::theme;

pub struct StatusInfo<'a> {
    pub mode: Mode,
    pub line: usize,
    pub col: usize,
    pub message: &'a str,
    pub is_error: bool,
    pub word_count: usize,
    pub modified: bool,
}

pub fn render(frame: &mut Frame, area: Rect, info: StatusInfo) {
    frame.render_widget(Paragraph::new("").style(theme::status_style()), area);

    let chunks = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Fill(2),
        Constraint::Fill(1),
    ])
    .split(area);

    // Left: cursor position while editing, key hints in preview
    let left_text = match info.mode {
        Mode::Editing => format!("  Ln {}, Col {}", info.line, info.col),
        Mode::Previewing => "  i: edit  j/k: scroll".to_string(),
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(left_text, theme::status_style()))),
        chunks[0],
    );

    if !info.message.is_empty() {
        let style = if info.is_error {
            Style::default().fg(theme::ERROR)
        } else {
            theme::status_style()
        };
        let center = Paragraph::new(Line::from(Span::styled(info.message.to_string(), style)))
            .alignment(Alignment::Center);
        frame.render_widget(center, chunks[1]);
    }

    let save_status = if info.modified { "Modified" } else { "Saved" };
    let right = Paragraph::new(Line::from(Span::styled(
        format!("{} words | {}  ", info.word_count, save_status),
        theme::status_style(),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(right, chunks[2]);
}
