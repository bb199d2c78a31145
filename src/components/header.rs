use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::session::Mode;
use crate::theme;

pub fn render(frame: &mut Frame, area: Rect, name: &str, modified: bool, mode: Mode) {
    let mut left_spans = vec![Span::styled(format!("  {}", name), theme::header_style())];
    if modified {
        left_spans.push(Span::styled(
            " \u{2022}",
            Style::default().fg(theme::WARNING).bg(theme::BAR_BG),
        ));
    }

    let mut right_spans: Vec<Span> = Vec::new();
    for tab in [Mode::Editing, Mode::Previewing] {
        let label = format!(" {} ", tab.label());
        if tab == mode {
            right_spans.push(Span::styled(
                label,
                Style::default()
                    .fg(theme::WHITE)
                    .bg(theme::ACTIVE_TAB)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            right_spans.push(Span::styled(
                label,
                Style::default().fg(theme::INACTIVE_TAB).bg(theme::BAR_BG),
            ));
        }
    }

    let chunks = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(right_spans.iter().map(|s| s.width() as u16).sum()),
    ])
    .split(area);

    frame.render_widget(Paragraph::new("").style(theme::header_style()), area);
    frame.render_widget(Paragraph::new(Line::from(left_spans)), chunks[0]);
    frame.render_widget(Paragraph::new(Line::from(right_spans)), chunks[1]);
}
