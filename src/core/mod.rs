//! Core ruler engine – scale geometry, motion physics, and notification.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Time is
//! always passed in, so every operation is deterministic under test.

pub mod error;
pub mod motion;
pub mod observer;
pub mod ruler;
pub mod scale;
pub mod value;
pub mod velocity;
