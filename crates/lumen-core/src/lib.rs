#![forbid(unsafe_code)]

//! Core: canonical input events shared by Lumen widgets.

pub mod event;

pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyParseError, Modifiers, PasteEvent};
