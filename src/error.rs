use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A part of the page the editor relies on is not there.
    #[error("required element `{0}` is missing")]
    MissingElement(&'static str),

    #[error("editor widget does not support `{0}`")]
    WidgetUnavailable(&'static str),

    #[error("invalid title: {0}")]
    InvalidTitle(String),

    #[error("a note named `{0}` already exists")]
    TitleTaken(String),

    #[error("failed to parse config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Convenience type alias for Results with the crate error.
pub type Result<T> = std::result::Result<T, Error>;
