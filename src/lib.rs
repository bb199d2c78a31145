pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod markdown;
pub mod session;
pub mod theme;

pub use error::{Error, Result};
