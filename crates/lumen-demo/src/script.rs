#![forbid(unsafe_code)]

//! Intent scripts.
//!
//! One step per line. Blank lines and lines starting with `#` are skipped.
//!
//! ```text
//! open
//! type comp       # typed key by key
//! key down
//! confirm
//! ```

use std::fmt;

use lumen_core::event::{Event, KeyCode, KeyEvent, KeyParseError};
use lumen_widgets::command_palette::{Direction, Intent};

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Apply an intent directly.
    Intent(Intent),
    /// Feed input events, e.g. typed characters or a single key.
    Events(Vec<Event>),
}

/// A step with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based line number.
    pub line: usize,
    /// The directive as written, without comment or padding.
    pub text: String,
    pub step: Step,
}

impl fmt::Display for ScriptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3}: {}", self.line, self.text)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptErrorKind {
    #[error("unknown directive `{0}`")]
    UnknownDirective(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("`{directive}` takes no argument, got `{extra}`")]
    UnexpectedArgument {
        directive: &'static str,
        extra: String,
    },

    #[error("invalid result index `{0}`")]
    InvalidIndex(String),

    #[error(transparent)]
    InvalidKey(#[from] KeyParseError),
}

/// A script line that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ScriptError {
    pub line: usize,
    #[source]
    pub kind: ScriptErrorKind,
}

/// Parse a whole script, stopping at the first bad line.
pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut steps = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = strip_comment(raw).trim();
        if text.is_empty() {
            continue;
        }
        let step = parse_step(text).map_err(|kind| ScriptError { line, kind })?;
        steps.push(ScriptLine {
            line,
            text: text.to_string(),
            step,
        });
    }
    Ok(steps)
}

/// Drop a trailing `# comment`.
///
/// A `#` only starts a comment at the beginning of the line or after
/// whitespace, so `type #1` still types `#1`.
fn strip_comment(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'#' && (i == 0 || bytes[i - 1].is_ascii_whitespace()) {
            let before = raw[..i].trim();
            if before == "type" || before == "query" {
                continue;
            }
            return &raw[..i];
        }
    }
    raw
}

fn parse_step(text: &str) -> Result<Step, ScriptErrorKind> {
    let (directive, rest) = match text.split_once(char::is_whitespace) {
        Some((directive, rest)) => (directive, rest.trim()),
        None => (text, ""),
    };

    let bare = |name: &'static str, intent: Intent| {
        if rest.is_empty() {
            Ok(Step::Intent(intent))
        } else {
            Err(ScriptErrorKind::UnexpectedArgument {
                directive: name,
                extra: rest.to_string(),
            })
        }
    };

    match directive {
        "open" => bare("open", Intent::Open),
        "close" => bare("close", Intent::Close),
        "toggle" => bare("toggle", Intent::Toggle),
        "next" => bare("next", Intent::Move(Direction::Next)),
        "prev" => bare("prev", Intent::Move(Direction::Previous)),
        "confirm" => bare("confirm", Intent::Confirm),
        "query" => Ok(Step::Intent(Intent::SetQuery(rest.to_string()))),
        "type" => {
            if rest.is_empty() {
                return Err(ScriptErrorKind::MissingArgument("type"));
            }
            Ok(Step::Events(
                rest.chars()
                    .map(|c| Event::Key(KeyEvent::new(KeyCode::Char(c))))
                    .collect(),
            ))
        }
        "key" => {
            if rest.is_empty() {
                return Err(ScriptErrorKind::MissingArgument("key"));
            }
            let key: KeyEvent = rest.parse()?;
            Ok(Step::Events(vec![Event::Key(key)]))
        }
        "select" => {
            if rest.is_empty() {
                return Err(ScriptErrorKind::MissingArgument("select"));
            }
            rest.parse::<usize>()
                .map(|n| Step::Intent(Intent::SetSelection(n)))
                .map_err(|_| ScriptErrorKind::InvalidIndex(rest.to_string()))
        }
        other => Err(ScriptErrorKind::UnknownDirective(other.to_string())),
    }
}
