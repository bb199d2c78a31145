use ratatui::style::{Color, Modifier, Style};

// Base colors: Color::Reset inherits terminal defaults
pub const FG: Color = Color::Reset;
pub const BORDER: Color = Color::DarkGray;

// UI elements
pub const BAR_BG: Color = Color::Reset;
pub const LINE_NUMBER: Color = Color::DarkGray;
pub const FOCUS: Color = Color::Blue;

// Markdown
pub const HEADING: Color = Color::Rgb(130, 170, 255);
pub const BOLD: Color = Color::Yellow;
pub const ITALIC: Color = Color::Cyan;
pub const LINK: Color = Color::Cyan;
pub const CODE: Color = Color::Red;
pub const QUOTE: Color = Color::Green;
pub const MATH: Color = Color::Magenta;

// Status indicators
pub const WARNING: Color = Color::Yellow;
pub const ERROR: Color = Color::Red;

pub const WHITE: Color = Color::White;
pub const TILDE: Color = Color::DarkGray;

// Mode tabs
pub const ACTIVE_TAB: Color = Color::Blue;
pub const INACTIVE_TAB: Color = Color::Gray;

pub fn header_style() -> Style {
    Style::default()
}

pub fn status_style() -> Style {
    Style::default()
}

pub fn line_number_style() -> Style {
    Style::default().fg(LINE_NUMBER)
}

pub fn title_style() -> Style {
    Style::default().fg(HEADING).add_modifier(Modifier::BOLD)
}

pub fn heading_style() -> Style {
    Style::default().fg(HEADING).add_modifier(Modifier::BOLD)
}

pub fn bold_style() -> Style {
    Style::default().fg(BOLD).add_modifier(Modifier::BOLD)
}

pub fn italic_style() -> Style {
    Style::default().fg(ITALIC).add_modifier(Modifier::ITALIC)
}

pub fn code_style() -> Style {
    Style::default().fg(CODE)
}

pub fn quote_style() -> Style {
    Style::default().fg(QUOTE).add_modifier(Modifier::ITALIC)
}

pub fn link_style() -> Style {
    Style::default().fg(LINK).add_modifier(Modifier::UNDERLINED)
}

/// Math before the typeset pass: shown as source.
pub fn math_raw_style() -> Style {
    Style::default().fg(BORDER)
}

pub fn math_style() -> Style {
    Style::default().fg(MATH)
}

pub fn focus_border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(FOCUS)
    } else {
        Style::default().fg(BORDER)
    }
}
