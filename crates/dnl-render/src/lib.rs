/// TUI rendering module for ratioline.
///
/// Provides number line drawing, themes, focus model and the full layout.
pub mod number_line;
pub mod theme;
pub mod ui;
pub mod widgets;
