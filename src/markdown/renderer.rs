use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use crate::markdown::math::latex_to_unicode;
use crate::theme;

/// Markdown rendered to terminal lines.
///
/// Math is emitted as its raw LaTeX source. [`typeset`] converts it in
/// place, so the preview can show the document before the math pass runs.
///
/// [`typeset`]: RenderedDocument::typeset
#[derive(Debug, Clone, Default)]
pub struct RenderedDocument {
    lines: Vec<Line<'static>>,
    math: Vec<MathSpan>,
    typeset: bool,
}

/// Where a piece of math sits in the rendered lines.
#[derive(Debug, Clone)]
struct MathSpan {
    line: usize,
    span: usize,
    source: String,
}

impl RenderedDocument {
    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    pub fn text(&self) -> Text<'static> {
        Text::from(self.lines.clone())
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn math_count(&self) -> usize {
        self.math.len()
    }

    pub fn is_typeset(&self) -> bool {
        self.typeset
    }

    /// Replaces every math span with its Unicode rendering. Always works
    /// from the LaTeX source, so running it again changes nothing.
    pub fn typeset(&mut self) {
        for math in &self.math {
            if let Some(span) = self
                .lines
                .get_mut(math.line)
                .and_then(|line| line.spans.get_mut(math.span))
            {
                *span = Span::styled(latex_to_unicode(&math.source), theme::math_style());
            }
        }
        self.typeset = true;
    }

    /// Plain text of each line, for tests and hit-testing.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }
}

pub fn render_markdown(content: &str) -> RenderedDocument {
    let options = Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TABLES
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_MATH;
    let mut builder = Builder::default();
    for event in Parser::new_ext(content, options) {
        builder.event(event);
    }
    builder.finish()
}

#[derive(Default)]
struct Builder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    styles: Vec<Style>,
    math: Vec<MathSpan>,
    quote_depth: usize,
    /// None = bullet list, Some(n) = next number of an ordered list.
    lists: Vec<Option<u64>>,
    code_block: Option<String>,
}

impl Builder {
    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, style: Style) {
        let base = self.style();
        self.styles.push(base.patch(style));
    }

    /// Quote bars go in front of the first span of every line.
    fn begin_span(&mut self) {
        if self.current.is_empty() && self.quote_depth > 0 {
            self.current.push(Span::styled(
                "│ ".repeat(self.quote_depth),
                theme::quote_style(),
            ));
        }
    }

    fn push_span(&mut self, span: Span<'static>) {
        self.begin_span();
        self.current.push(span);
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.current)));
        }
    }

    fn blank(&mut self) {
        self.flush();
        if self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn push_math(&mut self, source: &str, display: bool) {
        if display {
            self.flush();
        }
        let raw = if display {
            format!("$${}$$", source)
        } else {
            format!("${}$", source)
        };
        self.begin_span();
        self.math.push(MathSpan {
            line: self.lines.len(),
            span: self.current.len(),
            source: source.to_string(),
        });
        self.current.push(Span::styled(raw, theme::math_raw_style()));
        if display {
            self.flush();
        }
    }

    fn event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if let Some(code) = self.code_block.as_mut() {
                    code.push_str(&text);
                } else {
                    let style = self.style();
                    self.push_span(Span::styled(text.into_string(), style));
                }
            }
            Event::Code(code) => self.push_span(Span::styled(code.into_string(), theme::code_style())),
            Event::InlineMath(source) => self.push_math(&source, false),
            Event::DisplayMath(source) => self.push_math(&source, true),
            Event::Html(html) | Event::InlineHtml(html) => {
                let style = self.style();
                self.push_span(Span::styled(html.trim_end().to_string(), style));
            }
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.blank();
                self.lines.push(Line::styled("─".repeat(40), Style::default().fg(theme::BORDER)));
                self.lines.push(Line::default());
            }
            Event::TaskListMarker(done) => {
                let marker = if done { "[x] " } else { "[ ] " };
                self.push_span(Span::raw(marker));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag) {
        match tag {
            Tag::Heading { level, .. } => {
                self.blank();
                let prefix = "#".repeat(level as usize);
                self.push_span(Span::styled(format!("{} ", prefix), theme::heading_style()));
                self.push_style(theme::heading_style());
            }
            Tag::Strong => self.push_style(theme::bold_style()),
            Tag::Emphasis => self.push_style(theme::italic_style()),
            Tag::Strikethrough => self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT)),
            Tag::Link { .. } => self.push_style(theme::link_style()),
            Tag::Image { dest_url, .. } => {
                self.push_span(Span::styled(format!("[image: {}] ", dest_url), theme::link_style()));
                self.push_style(Style::default().fg(theme::BORDER));
            }
            Tag::CodeBlock(kind) => {
                self.blank();
                if let CodeBlockKind::Fenced(lang) = kind {
                    if !lang.is_empty() {
                        self.lines.push(Line::styled(
                            format!("  {}", lang),
                            Style::default().fg(theme::BORDER),
                        ));
                    }
                }
                self.code_block = Some(String::new());
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.quote_depth += 1;
                self.push_style(theme::quote_style());
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let bullet = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let bullet = format!("{}{}. ", indent, n);
                        *n += 1;
                        bullet
                    }
                    _ => format!("{}• ", indent),
                };
                self.push_span(Span::raw(bullet));
            }
            Tag::TableCell => {
                if !self.current.is_empty() {
                    self.push_span(Span::styled(" │ ", Style::default().fg(theme::BORDER)));
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.blank();
            }
            TagEnd::Paragraph => {
                if self.lists.is_empty() {
                    self.blank();
                } else {
                    self.flush();
                }
            }
            TagEnd::Strong
            | TagEnd::Emphasis
            | TagEnd::Strikethrough
            | TagEnd::Link
            | TagEnd::Image => {
                self.styles.pop();
            }
            TagEnd::CodeBlock => {
                let code = self.code_block.take().unwrap_or_default();
                for line in code.lines() {
                    self.lines.push(Line::from(Span::styled(
                        format!("  {}", line),
                        theme::code_style(),
                    )));
                }
                self.lines.push(Line::default());
            }
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.styles.pop();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                if self.quote_depth == 0 {
                    self.blank();
                }
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Item | TagEnd::TableHead | TagEnd::TableRow => self.flush(),
            TagEnd::Table => self.blank(),
            _ => {}
        }
    }

    fn finish(mut self) -> RenderedDocument {
        self.flush();
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        RenderedDocument {
            lines: self.lines,
            math: self.math,
            typeset: false,
        }
    }
}
