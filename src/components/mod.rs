pub mod editor;
pub mod header;
pub mod index;
pub mod preview;
pub mod status;
pub mod title;
