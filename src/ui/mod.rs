//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* ruler and turns it into cells on the terminal.
//! No input handling happens here.

pub mod layout;
pub mod popup;
pub mod ruler_widget;
pub mod theme;
