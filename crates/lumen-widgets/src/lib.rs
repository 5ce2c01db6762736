#![forbid(unsafe_code)]

//! Interaction cores for Lumen widgets.
//!
//! Widgets here hold presentational state and react to input; drawing is
//! left to the host's rendering layer.

pub mod command_palette;

pub use command_palette::{
    Command, Direction, Intent, PaletteConfig, PaletteController, PaletteError, PaletteOutcome,
};
