//! UI components

pub mod artwork;
pub mod search_bar;
pub mod theme;
