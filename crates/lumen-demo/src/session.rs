#![forbid(unsafe_code)]

//! Replays intent scripts against a palette and records a transcript.

use std::fmt::Write as _;

use lumen_widgets::command_palette::{PaletteController, PaletteError, PaletteOutcome};

use crate::navigation::NavigationLog;
use crate::render::render_view;
use crate::script::{ScriptLine, Step};

/// A palette plus everything needed to report on a run.
#[derive(Debug)]
pub struct Session {
    palette: PaletteController,
    log: NavigationLog,
    transcript: String,
}

impl Session {
    /// Start an empty transcript. `log` must be the one the commands navigate through.
    pub fn new(palette: PaletteController, log: NavigationLog) -> Self {
        Self {
            palette,
            log,
            transcript: String::new(),
        }
    }

    /// The palette being driven.
    pub fn palette(&self) -> &PaletteController {
        &self.palette
    }

    /// Routes visited so far.
    pub fn navigation(&self) -> &NavigationLog {
        &self.log
    }

    /// Open the palette, optionally with a starting query.
    pub fn open_with(&mut self, query: Option<&str>) {
        self.palette.open();
        if let Some(query) = query {
            self.palette.set_query(query);
        }
    }

    /// Apply one script line and append its effect to the transcript.
    ///
    /// Palette errors are reported in the transcript and do not stop the run.
    pub fn apply(&mut self, line: &ScriptLine) {
        let _ = writeln!(self.transcript, "{line}");

        let result = match &line.step {
            Step::Intent(intent) => self.palette.dispatch(intent.clone()),
            Step::Events(events) => self.feed(events),
        };

        match result {
            Ok(Some(PaletteOutcome::Executed(id))) => {
                let _ = writeln!(self.transcript, "  executed {id}");
            }
            Ok(Some(PaletteOutcome::Dismissed)) => {
                self.transcript.push_str("  dismissed\n");
            }
            Ok(None) => {}
            Err(err) => {
                let message = format!("{:#}", anyhow::Error::from(err));
                tracing::warn!(line = line.line, error = %message, "script step failed");
                let _ = writeln!(self.transcript, "  error: {message}");
            }
        }
        self.snapshot();
    }

    /// Feed events in order, stopping at the first outcome or error.
    fn feed(
        &mut self,
        events: &[lumen_core::Event],
    ) -> Result<Option<PaletteOutcome>, PaletteError> {
        for event in events {
            if let Some(outcome) = self.palette.handle_event(event)? {
                return Ok(Some(outcome));
            }
        }
        Ok(None)
    }

    /// Append the current view to the transcript.
    pub fn snapshot(&mut self) {
        let view = render_view(&self.palette.view());
        self.transcript.push_str(&view);
    }

    /// Finish the run: transcript followed by the navigation log.
    pub fn finish(mut self) -> String {
        self.transcript.push('\n');
        self.transcript.push_str(&self.log.render());
        self.transcript
    }
}
