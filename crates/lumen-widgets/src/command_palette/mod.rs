#![forbid(unsafe_code)]

//! Command palette controller for instant action search.
//!
//! This module provides the interaction core of a command palette:
//! - Substring and subsequence match scoring over title, description and keywords
//! - Stable ranking truncated to a configurable result count
//! - Circular keyboard navigation with a single flat selection index
//! - A grouped-by-category view whose entries map back to that index
//!
//! The controller owns no global state. Whoever mounts the palette owns a
//! [`PaletteController`] and drives it with [`Intent`]s or raw [`Event`]s.
//!
//! # Usage
//!
//! ```
//! use lumen_widgets::command_palette::{Command, Intent, PaletteController, PaletteOutcome};
//!
//! let commands = vec![
//!     Command::new("home", "Go to Home").with_keywords(&["home", "main"]),
//!     Command::new("components", "View Components").with_category("Navigation"),
//! ];
//! let mut palette = PaletteController::new(commands).unwrap();
//!
//! palette.dispatch(Intent::Open).unwrap();
//! palette.dispatch(Intent::SetQuery("comp".into())).unwrap();
//! assert_eq!(palette.result_count(), 1);
//!
//! let outcome = palette.dispatch(Intent::Confirm).unwrap();
//! assert_eq!(outcome, Some(PaletteOutcome::Executed("components".into())));
//! assert!(!palette.is_open());
//! ```
//!
//! # Submodules
//!
//! - [`scorer`]: field scoring and ranking
//! - [`view`]: grouped view for renderers

pub mod error;
pub mod scorer;
pub mod view;

pub use error::{ActionError, PaletteError};
pub use scorer::{
    CommandMatch, DEFAULT_MIN_SCORE, MatchField, MatchKind, MatchResult, RankedCommand,
    ScoreModel, Scorer,
};
pub use view::{CommandGroup, PaletteView, ViewEntry};

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use lumen_core::event::{Event, KeyCode, KeyEvent};
use unicode_segmentation::UnicodeSegmentation;

/// Category used for commands that do not name one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Default cap on the number of filtered results.
pub const DEFAULT_MAX_RESULTS: usize = 10;

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Callable invoked when a command is confirmed.
pub type CommandAction = dyn Fn() -> Result<(), ActionError> + Send + Sync;

/// A single action that can be invoked from the command palette.
#[derive(Clone)]
pub struct Command {
    /// Unique identifier for this command.
    pub id: String,
    /// Display title (searched by the scorer).
    pub title: String,
    /// Optional description (searched by the scorer).
    pub description: Option<String>,
    /// Grouping key for the rendered list.
    pub category: String,
    /// Extra search terms.
    pub keywords: Vec<String>,
    /// Display-only shortcut hint, e.g. `"Ctrl+Shift+H"`.
    pub shortcut: Option<String>,
    action: Arc<CommandAction>,
}

impl Command {
    /// Create a command with a no-op action in the default category.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            category: DEFAULT_CATEGORY.to_string(),
            keywords: Vec::new(),
            shortcut: None,
            action: Arc::new(noop_action),
        }
    }

    /// Set description (builder).
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Set category (builder).
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set keywords (builder).
    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Set the displayed shortcut (builder).
    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    /// Set a fallible action (builder).
    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.action = Arc::new(action);
        self
    }

    /// Set an infallible action (builder).
    pub fn with_handler<F>(self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.with_action(move || {
            handler();
            Ok(())
        })
    }

    /// Invoke the action.
    pub fn run(&self) -> Result<(), ActionError> {
        (self.action)()
    }
}

fn noop_action() -> Result<(), ActionError> {
    Ok(())
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("category", &self.category)
            .field("keywords", &self.keywords)
            .field("shortcut", &self.shortcut)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Config, intents and outcomes
// ---------------------------------------------------------------------------

/// Tunables for a [`PaletteController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteConfig {
    /// Maximum number of filtered results (at least 1).
    pub max_results: usize,
    /// Commands must score strictly above this to be listed.
    pub min_score: f64,
    /// Subsequence scoring model.
    pub score_model: ScoreModel,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            min_score: DEFAULT_MIN_SCORE,
            score_model: ScoreModel::Compatible,
        }
    }
}

impl PaletteConfig {
    /// Set max results (builder).
    pub fn with_max_results(mut self, n: usize) -> Self {
        self.max_results = n;
        self
    }

    /// Set the minimum score (builder).
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    /// Set the score model (builder).
    pub fn with_score_model(mut self, model: ScoreModel) -> Self {
        self.score_model = model;
        self
    }

    /// Check that the config can produce a usable palette.
    pub fn validate(&self) -> Result<(), PaletteError> {
        if self.max_results == 0 {
            return Err(PaletteError::InvalidConfig("max_results must be at least 1"));
        }
        if !(0.0..1.0).contains(&self.min_score) {
            return Err(PaletteError::InvalidConfig("min_score must be in [0, 1)"));
        }
        Ok(())
    }
}

/// Direction for [`PaletteController::move_selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the end of the list, wrapping to the first entry.
    Next,
    /// Towards the start of the list, wrapping to the last entry.
    Previous,
}

/// A discrete request to the palette.
///
/// ```
/// use lumen_widgets::command_palette::{Command, Direction, Intent, PaletteController};
///
/// let mut palette = PaletteController::new(vec![
///     Command::new("home", "Go to Home"),
///     Command::new("docs", "Open Docs"),
/// ])?;
/// palette.dispatch(Intent::Open)?;
/// palette.dispatch(Intent::Move(Direction::Previous))?;
/// assert_eq!(palette.selected_index(), Some(1));
/// palette.dispatch(Intent::SetQuery("home".into()))?;
/// assert_eq!(palette.selected_index(), Some(0));
/// assert!(palette.dispatch(Intent::SetSelection(5)).is_err());
/// # Ok::<(), lumen_widgets::PaletteError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Open with an empty query and the first result selected.
    Open,
    /// Close and clear the query.
    Close,
    /// Open if closed, close if open.
    Toggle,
    /// Replace the query and re-filter. Ignored while closed.
    SetQuery(String),
    /// Move the selection one step, wrapping at either end.
    Move(Direction),
    /// Select the result at this index. Out-of-range indices are an error.
    SetSelection(usize),
    /// Run the selected command.
    Confirm,
}

/// What happened to the palette as a result of an intent or event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteOutcome {
    /// The command with this id ran and the palette closed.
    Executed(String),
    /// The palette was closed without running anything.
    Dismissed,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Interaction state of a command palette.
///
/// # Invariants
///
/// 1. `selected < filtered.len()` whenever `filtered` is non-empty, else 0.
/// 2. Every recomputation of `filtered` resets `selected` to 0.
/// 3. `filtered.len() <= config.max_results`.
/// 4. While closed, `query` is empty and `filtered` is empty.
#[derive(Debug)]
pub struct PaletteController {
    commands: Vec<Command>,
    config: PaletteConfig,
    scorer: Scorer,
    query: String,
    filtered: Vec<RankedCommand>,
    selected: usize,
    open: bool,
}

impl PaletteController {
    /// Create a closed palette over `commands` with the default config.
    pub fn new(commands: Vec<Command>) -> Result<Self, PaletteError> {
        Self::with_config(commands, PaletteConfig::default())
    }

    /// Create a closed palette with an explicit config.
    pub fn with_config(
        commands: Vec<Command>,
        config: PaletteConfig,
    ) -> Result<Self, PaletteError> {
        config.validate()?;
        check_unique_ids(&commands)?;
        Ok(Self {
            commands,
            config,
            scorer: Scorer::new(config.score_model),
            query: String::new(),
            filtered: Vec::new(),
            selected: 0,
            open: false,
        })
    }

    /// Replace the command set.
    ///
    /// When open, the view is recomputed for the current query and the
    /// selection resets.
    pub fn set_commands(&mut self, commands: Vec<Command>) -> Result<(), PaletteError> {
        check_unique_ids(&commands)?;
        self.commands = commands;
        if self.open {
            self.recompute();
        }
        Ok(())
    }

    // --- Visibility ---

    /// Open the palette with an empty query.
    ///
    /// Calling this while already open resets to the same fresh state.
    pub fn open(&mut self) {
        self.open = true;
        self.query.clear();
        self.recompute();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            event = "palette_opened",
            commands = self.commands.len(),
            results = self.filtered.len()
        );
    }

    /// Close the palette and discard the query and results.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.query.clear();
        self.filtered.clear();
        self.selected = 0;

        #[cfg(feature = "tracing")]
        tracing::debug!(event = "palette_closed");
    }

    /// Open when closed, close when open.
    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Whether the palette is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    // --- Query & selection ---

    /// Replace the query, re-rank, and reset the selection.
    ///
    /// Ignored while closed.
    pub fn set_query(&mut self, text: impl Into<String>) {
        if !self.open {
            return;
        }
        self.query = text.into();
        self.recompute();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            event = "query_changed",
            query_len = self.query.chars().count(),
            results = self.filtered.len()
        );
    }

    /// Move the selection one step, wrapping at both ends.
    ///
    /// No-op when closed or when there are no results.
    pub fn move_selection(&mut self, direction: Direction) {
        if !self.open || self.filtered.is_empty() {
            return;
        }
        let len = self.filtered.len();
        self.selected = match direction {
            Direction::Next => (self.selected + 1) % len,
            Direction::Previous => (self.selected + len - 1) % len,
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(event = "selection_moved", selected = self.selected, len);
    }

    /// Select the result at `index` (pointer hover).
    ///
    /// Out-of-range indices are rejected and leave the selection unchanged.
    /// No-op when closed.
    pub fn set_selection(&mut self, index: usize) -> Result<(), PaletteError> {
        if !self.open {
            return Ok(());
        }
        if index >= self.filtered.len() {
            return Err(PaletteError::SelectionOutOfRange {
                index,
                len: self.filtered.len(),
            });
        }
        self.selected = index;
        Ok(())
    }

    /// Run the selected command, then close.
    ///
    /// Returns the executed command id, or `None` when closed or there are
    /// no results (the palette stays as it was). If the action fails the
    /// error is returned and the palette stays open with its state intact.
    pub fn confirm_selection(&mut self) -> Result<Option<String>, PaletteError> {
        if !self.open {
            return Ok(None);
        }
        let Some(ranked) = self.filtered.get(self.selected) else {
            return Ok(None);
        };
        let command = &self.commands[ranked.index];
        let id = command.id.clone();

        if let Err(source) = command.run() {
            #[cfg(feature = "tracing")]
            tracing::warn!(event = "command_failed", id = %id, error = %source);
            return Err(PaletteError::Action { id, source });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(event = "command_executed", id = %id);

        self.close();
        Ok(Some(id))
    }

    // --- Intent dispatch ---

    /// Apply one intent.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Option<PaletteOutcome>, PaletteError> {
        match intent {
            Intent::Open => self.open(),
            Intent::Close => return Ok(self.dismiss()),
            Intent::Toggle => {
                if self.open {
                    return Ok(self.dismiss());
                }
                self.open();
            }
            Intent::SetQuery(text) => self.set_query(text),
            Intent::Move(direction) => self.move_selection(direction),
            Intent::SetSelection(index) => self.set_selection(index)?,
            Intent::Confirm => {
                return Ok(self.confirm_selection()?.map(PaletteOutcome::Executed));
            }
        }
        Ok(None)
    }

    fn dismiss(&mut self) -> Option<PaletteOutcome> {
        if !self.open {
            return None;
        }
        self.close();
        Some(PaletteOutcome::Dismissed)
    }

    // --- Event handling ---

    /// Handle an input event while open.
    ///
    /// Closed palettes ignore every event; opening is the host's job.
    pub fn handle_event(&mut self, event: &Event) -> Result<Option<PaletteOutcome>, PaletteError> {
        if !self.open {
            return Ok(None);
        }
        match event {
            Event::Key(key) if key.is_press() => self.handle_key(key),
            Event::Paste(paste) => {
                let text: String = paste
                    .text
                    .chars()
                    .filter(|c| !matches!(c, '\n' | '\r'))
                    .collect();
                if !text.is_empty() {
                    let query = format!("{}{}", self.query, text);
                    self.set_query(query);
                }
                Ok(None)
            }
            Event::Key(_) => Ok(None),
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Result<Option<PaletteOutcome>, PaletteError> {
        let ctrl = key.ctrl();
        let intent = match key.code {
            KeyCode::Escape => Intent::Close,
            KeyCode::Enter => Intent::Confirm,
            KeyCode::Up | KeyCode::BackTab => Intent::Move(Direction::Previous),
            KeyCode::Down | KeyCode::Tab => Intent::Move(Direction::Next),
            KeyCode::Char('p') if ctrl => Intent::Move(Direction::Previous),
            KeyCode::Char('n') if ctrl => Intent::Move(Direction::Next),
            KeyCode::Char('u') if ctrl => Intent::SetQuery(String::new()),
            KeyCode::Home | KeyCode::PageUp => {
                return self.select_edge(false).map(|()| None);
            }
            KeyCode::End | KeyCode::PageDown => {
                return self.select_edge(true).map(|()| None);
            }
            KeyCode::Backspace => match self.query.grapheme_indices(true).next_back() {
                Some((idx, _)) => Intent::SetQuery(self.query[..idx].to_string()),
                None => return Ok(None),
            },
            KeyCode::Char(c) if !ctrl && !key.alt() => {
                let mut query = self.query.clone();
                query.push(c);
                Intent::SetQuery(query)
            }
            _ => return Ok(None),
        };
        self.dispatch(intent)
    }

    fn select_edge(&mut self, last: bool) -> Result<(), PaletteError> {
        match self.filtered.len() {
            0 => Ok(()),
            len => self.set_selection(if last { len - 1 } else { 0 }),
        }
    }

    // --- Accessors ---

    /// Current query string.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Active configuration.
    pub fn config(&self) -> &PaletteConfig {
        &self.config
    }

    /// Number of registered commands.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// All registered commands in input order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Number of filtered results.
    pub fn result_count(&self) -> usize {
        self.filtered.len()
    }

    /// Filtered results, best first.
    pub fn results(&self) -> impl Iterator<Item = (&Command, &CommandMatch)> {
        self.filtered
            .iter()
            .map(|r| (&self.commands[r.index], &r.matched))
    }

    /// Selected flat index, or `None` when there are no results.
    pub fn selected_index(&self) -> Option<usize> {
        (!self.filtered.is_empty()).then_some(self.selected)
    }

    /// The selected command, if any.
    pub fn selected_command(&self) -> Option<&Command> {
        self.filtered
            .get(self.selected)
            .map(|r| &self.commands[r.index])
    }

    /// Grouped view of the current results for rendering.
    pub fn view(&self) -> PaletteView<'_> {
        PaletteView::build(
            &self.query,
            self.open,
            &self.commands,
            &self.filtered,
            self.selected_index(),
        )
    }

    /// Re-rank against the current query and reset the selection.
    fn recompute(&mut self) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "palette_recompute",
            commands = self.commands.len(),
            model = self.scorer.model().as_str()
        )
        .entered();

        self.filtered = self.scorer.rank(
            &self.query,
            &self.commands,
            self.config.min_score,
            self.config.max_results,
        );
        self.selected = 0;
    }
}

fn check_unique_ids(commands: &[Command]) -> Result<(), PaletteError> {
    let mut seen = HashSet::with_capacity(commands.len());
    for command in commands {
        if !seen.insert(command.id.as_str()) {
            return Err(PaletteError::DuplicateCommandId(command.id.clone()));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
