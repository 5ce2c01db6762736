#![forbid(unsafe_code)]

//! Errors surfaced by the command palette.

use std::error::Error as StdError;

/// Failure reported by a command's action.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// A plain failure message.
    #[error("{0}")]
    Message(String),
    /// An underlying error raised by the action.
    #[error(transparent)]
    Failed(Box<dyn StdError + Send + Sync + 'static>),
}

impl ActionError {
    /// Create an action error from a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Wrap an underlying error.
    pub fn new<E>(source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Failed(Box::new(source))
    }
}

/// Errors returned by [`PaletteController`](super::PaletteController).
#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    /// Two commands in one set share an id.
    #[error("duplicate command id `{0}`")]
    DuplicateCommandId(String),

    /// The palette configuration is unusable.
    #[error("invalid palette config: {0}")]
    InvalidConfig(&'static str),

    /// `set_selection` was given an index outside the filtered results.
    #[error("selection index {index} out of range for {len} result(s)")]
    SelectionOutOfRange { index: usize, len: usize },

    /// The selected command's action failed; the palette stays open.
    #[error("command `{id}` failed")]
    Action {
        id: String,
        #[source]
        source: ActionError,
    },
}
