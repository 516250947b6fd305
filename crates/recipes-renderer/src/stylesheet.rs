//! Site stylesheet served at `/style.css`.

/// Compiled site stylesheet.
pub const STYLESHEET: &str = include_str!("../assets/style.css");
