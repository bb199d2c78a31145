//! The terminal stands in for the page around the editor: it supplies the
//! note's title, knows where the page is, and queues navigation and math
//! passes for the app loop to carry out.

use std::path::{Path, PathBuf};

use crate::session::Host;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalHost {
    location: PathBuf,
    title: Option<String>,
    pending_navigation: Option<PathBuf>,
    typeset_requested: bool,
    typeset_count: usize,
}

impl TerminalHost {
    /// Host page for the note at `path`; its title is the file stem.
    pub fn for_note(path: &Path) -> Self {
        Self {
            location: path.to_path_buf(),
            title: path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned()),
            pending_navigation: None,
            typeset_requested: false,
            typeset_count: 0,
        }
    }

    /// Takes the location the session asked to go to, if any.
    pub fn take_navigation(&mut self) -> Option<PathBuf> {
        self.pending_navigation.take()
    }

    /// Takes a pending math pass request.
    pub fn take_typeset(&mut self) -> bool {
        std::mem::take(&mut self.typeset_requested)
    }

    /// How many math passes were requested over the host's lifetime.
    pub fn typeset_count(&self) -> usize {
        self.typeset_count
    }
}

impl Host for TerminalHost {
    fn title_input(&self) -> Option<String> {
        self.title.clone()
    }

    fn location(&self) -> PathBuf {
        self.location.clone()
    }

    fn assign(&mut self, location: PathBuf) {
        self.pending_navigation = Some(location);
    }

    fn typeset(&mut self) {
        self.typeset_requested = true;
        self.typeset_count += 1;
    }
}
