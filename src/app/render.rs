//! UI rendering: frame layout, mode-dependent content, and the help and
//! unsaved-changes overlays.

use super::*;

impl App {
    /// Runs one frame of the main loop: draw + tick.
    pub fn render_frame<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> std::io::Result<()> {
        terminal.draw(|frame| self.render(frame))?;
        self.tick();
        Ok(())
    }

    /// Name shown in the header: the title field as typed, or the file stem.
    pub fn display_name(&self) -> String {
        let editor = self.editor();
        match editor.title() {
            Some(title) if !title.value().is_empty() => title.value().to_string(),
            _ => editor
                .file_path()
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("untitled")
                .to_string(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let full = frame.area();
        frame.render_widget(Paragraph::new(""), full);

        // Outside full screen, cap width and center horizontally
        let usable_area = if self.editor().is_full_screen() {
            full
        } else {
            let capped_width = full.width.min(MAX_WIDTH);
            let x_offset = (full.width - capped_width) / 2;
            Rect::new(x_offset, full.y, capped_width, full.height)
        };

        let chunks = Layout::vertical([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Divider
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Divider
            Constraint::Length(1), // Status
        ])
        .split(usable_area);

        let mode = self.mode();
        let modified = self.session.is_dirty();
        header::render(frame, chunks[0], &self.display_name(), modified, mode);

        let divider_style = Style::default().fg(theme::BORDER);
        for &i in &[1usize, 3] {
            let divider =
                Paragraph::new("\u{2500}".repeat(chunks[i].width as usize)).style(divider_style);
            frame.render_widget(divider, chunks[i]);
        }

        let editor = self.session.widget_mut();
        match mode {
            Mode::Editing => editor.render_edit(frame, chunks[2]),
            Mode::Previewing => editor.preview_mut().render(frame, chunks[2]),
        }

        let (line, col) = self.editor().cursor();
        status::render(
            frame,
            chunks[4],
            status::StatusInfo {
                mode,
                line: line + 1,
                col,
                message: &self.status_message,
                is_error: self.status_is_error,
                word_count: self.editor().word_count(),
                modified,
            },
        );

        // Overlays last so they sit on top of everything
        if self.show_help {
            self.render_help(frame);
        }
        if let Some(pending) = self.pending_exit.as_ref() {
            render_confirm(frame, pending);
        }
    }

    /// Renders a centered modal listing the keybindings. Any key dismisses it.
    fn render_help(&self, frame: &mut Frame) {
        let key_style = Style::default().fg(theme::LINK);
        let row = |keys: &'static str, what: &'static str| {
            Line::from(vec![Span::styled(keys, key_style), Span::raw(what)])
        };
        let help_text = vec![
            Line::from(Span::styled(
                "Keybindings",
                Style::default()
                    .fg(theme::HEADING)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            // -- Preview --
            row("  i / a            ", "Edit"),
            row("  j / k            ", "Scroll down / up"),
            row("  Up / Down / PgUp ", "Scroll"),
            row("  Backspace        ", "Go to folder"),
            Line::from(""),
            // -- Editing --
            row("  Esc              ", "Back to preview"),
            row("  Ctrl+T           ", "Title / text"),
            Line::from(""),
            // -- Both --
            row("  Ctrl+Enter       ", "Save"),
            row("  Ctrl+S           ", "Save"),
            row("  Ctrl+Q           ", "Quit"),
            row("  F1               ", "This help"),
        ];
        let height = help_text.len() as u16 + 2;

        let area = centered(frame.area(), 42, height);
        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER));
        let paragraph = Paragraph::new(help_text)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

fn render_confirm(frame: &mut Frame, pending: &PendingExit) {
    let area = centered(frame.area(), 46, 5);
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(Span::styled(
            pending.prompt.message,
            Style::default().fg(theme::WARNING).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme::LINK)),
            Span::raw(": leave   "),
            Span::styled("n", Style::default().fg(theme::LINK)),
            Span::raw(": stay"),
        ]),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::WARNING));
    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// A `width` x `height` rect centered in `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
