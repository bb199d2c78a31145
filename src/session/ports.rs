//! Capabilities the session needs from the editor widget and the page
//! hosting it. The session only ever calls these; it never reaches into
//! the widget's internals.

use std::path::PathBuf;

use crate::components::title::TitleField;
use crate::error::Result;

/// The scrollable region showing rendered, non-editable content.
pub trait PreviewSurface {
    /// Scrolls by `delta` units (positive is down).
    fn scroll_by(&mut self, delta: i32);
    fn scroll_offset(&self) -> i32;
    fn focus(&mut self);
}

/// An embeddable markdown editor with an edit surface and a preview.
pub trait EditorWidget {
    type Surface: PreviewSurface;

    fn toggle_full_screen(&mut self);
    /// Flips between the edit surface and the rendered preview.
    fn toggle_preview(&mut self);
    fn is_preview_active(&self) -> bool;
    /// Persists the current content.
    fn save_note(&mut self) -> Result<()>;
    /// Current text of the note.
    fn value(&self) -> String;
    /// Focuses the editable surface.
    fn focus(&mut self);
    /// The current preview surface. The widget may replace it whenever it
    /// re-renders, so callers must not hold on to it.
    fn preview_surface(&mut self) -> Option<&mut Self::Surface>;
    /// Places `field` at the widget's title slot, above the edit surface.
    fn insert_title(&mut self, field: TitleField) -> Result<()>;
}

/// The page around the widget.
pub trait Host {
    /// Value of the page's own title input, if it has one.
    fn title_input(&self) -> Option<String>;
    /// Where the page currently is.
    fn location(&self) -> PathBuf;
    /// Navigates to `location`.
    fn assign(&mut self, location: PathBuf);
    /// Runs the rich-content (math) pass over the rendered content.
    fn typeset(&mut self);
}
