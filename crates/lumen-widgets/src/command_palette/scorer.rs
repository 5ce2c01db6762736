#![forbid(unsafe_code)]

//! Match scoring for the command palette.
//!
//! A query is scored against a single text field in three tiers:
//!
//! ```text
//! empty query            -> 1.0  (browse: everything matches)
//! substring (any case)   -> 0.9
//! in-order subsequence   -> 1.0 (Compatible) | 0.8 × |q| / span (Graded)
//! otherwise              -> 0.0
//! ```
//!
//! A command's aggregate score is the maximum over its title, description
//! and keywords. Commands at or below the minimum score are dropped.
//!
//! # Score models
//!
//! [`ScoreModel::Compatible`] keeps the historical subsequence formula
//! (`consumed / query_len`), which can only ever produce 1.0 or 0.0 and
//! therefore ranks every fuzzy hit above substring hits.
//! [`ScoreModel::Graded`] grades a subsequence by how tightly it packs and
//! caps it below the substring tier.
//!
//! # Invariants
//!
//! 1. Scores are bounded: 0.0 ≤ score ≤ 1.0
//! 2. Determinism: same input → identical score
//! 3. A case-insensitive substring always scores ≥ 0.9
//! 4. Ranking is a stable sort: ties keep input order

use super::Command;

/// Score for an empty query (browse mode).
pub const BROWSE_SCORE: f64 = 1.0;

/// Score for a case-insensitive substring hit.
pub const SUBSTRING_SCORE: f64 = 0.9;

/// Upper bound for a graded subsequence hit.
pub const GRADED_SUBSEQUENCE_CEILING: f64 = 0.8;

/// Default exclusive threshold below which commands are hidden.
pub const DEFAULT_MIN_SCORE: f64 = 0.1;

// ---------------------------------------------------------------------------
// Match Types
// ---------------------------------------------------------------------------

/// How subsequence matches are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreModel {
    /// `consumed / query_len`: every full subsequence scores 1.0.
    #[default]
    Compatible,
    /// `0.8 × query_len / span_len`: tighter subsequences score higher and
    /// never reach the substring tier.
    Graded,
}

impl ScoreModel {
    /// Stable lowercase name, used in logs and configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compatible => "compatible",
            Self::Graded => "graded",
        }
    }
}

/// Type of match between a query and one text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    /// Not all query characters were found in order.
    None,
    /// Query characters found in order, with gaps.
    Subsequence,
    /// Query found as a contiguous case-insensitive substring.
    Substring,
    /// Empty query; every field matches.
    Browse,
}

/// Which field of a command produced its aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    /// The display title.
    Title,
    /// The optional description.
    Description,
    /// The keyword at this index.
    Keyword(usize),
}

// ---------------------------------------------------------------------------
// Match Results
// ---------------------------------------------------------------------------

/// Result of scoring a query against one text field.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Match strength in `[0, 1]`.
    pub score: f64,
    /// Type of match detected.
    pub kind: MatchKind,
    /// Char indices of the matched characters in the original text.
    ///
    /// Empty for browse and no-match results, and when lowercasing changed
    /// the character count of the text (positions would not line up).
    pub positions: Vec<usize>,
}

impl MatchResult {
    /// Create a no-match result.
    pub fn no_match() -> Self {
        Self {
            score: 0.0,
            kind: MatchKind::None,
            positions: Vec::new(),
        }
    }

    fn browse() -> Self {
        Self {
            score: BROWSE_SCORE,
            kind: MatchKind::Browse,
            positions: Vec::new(),
        }
    }

    /// Whether any match was found.
    pub fn is_match(&self) -> bool {
        self.kind != MatchKind::None
    }
}

/// Aggregate result of scoring a query against a whole command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandMatch {
    /// Maximum score over title, description and keywords.
    pub score: f64,
    /// Field that produced `score`.
    pub field: MatchField,
    /// Match kind of the winning field.
    pub kind: MatchKind,
    /// Matched char positions in the title, for highlighting.
    pub title_positions: Vec<usize>,
}

/// A command that survived filtering, with its index in the input set.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCommand {
    /// Index into the command slice that was ranked.
    pub index: usize,
    /// How the command matched.
    pub matched: CommandMatch,
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

/// Score `query` against `text` with the compatible model.
///
/// ```
/// use lumen_widgets::command_palette::scorer::score;
///
/// assert_eq!(score("", "anything"), 1.0);
/// assert_eq!(score("comp", "View Components"), 0.9);
/// assert_eq!(score("vcs", "View Components"), 1.0);
/// assert_eq!(score("xyz", "View Components"), 0.0);
/// ```
pub fn score(query: &str, text: &str) -> f64 {
    Scorer::default().score(query, text).score
}

/// Query/field matcher used by the palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scorer {
    model: ScoreModel,
}

impl Scorer {
    /// Create a scorer using the given model.
    pub const fn new(model: ScoreModel) -> Self {
        Self { model }
    }

    /// The active score model.
    pub const fn model(&self) -> ScoreModel {
        self.model
    }

    /// Score a query against a single text field.
    pub fn score(&self, query: &str, text: &str) -> MatchResult {
        if query.is_empty() {
            return MatchResult::browse();
        }
        self.score_lowered(&fold_case(query), text)
    }

    /// Score with a query that is already case-folded.
    fn score_lowered(&self, query_lower: &str, text: &str) -> MatchResult {
        if query_lower.is_empty() {
            return MatchResult::browse();
        }

        let text_lower = fold_case(text);
        let positions_valid = text_lower.chars().count() == text.chars().count();

        if let Some(byte_idx) = text_lower.find(query_lower) {
            let positions = if positions_valid {
                let start = text_lower[..byte_idx].chars().count();
                (start..start + query_lower.chars().count()).collect()
            } else {
                Vec::new()
            };
            return MatchResult {
                score: SUBSTRING_SCORE,
                kind: MatchKind::Substring,
                positions,
            };
        }

        let Some(positions) = subsequence_positions(query_lower, &text_lower) else {
            return MatchResult::no_match();
        };

        let query_len = query_lower.chars().count();
        let score = match self.model {
            // Every query char was consumed, so this is always 1.0.
            ScoreModel::Compatible => positions.len() as f64 / query_len as f64,
            ScoreModel::Graded => {
                let span = match (positions.first(), positions.last()) {
                    (Some(first), Some(last)) => last - first + 1,
                    _ => query_len,
                };
                GRADED_SUBSEQUENCE_CEILING * query_len as f64 / span as f64
            }
        };

        MatchResult {
            score,
            kind: MatchKind::Subsequence,
            positions: if positions_valid { positions } else { Vec::new() },
        }
    }

    /// Aggregate score of a query against a command's searchable fields.
    ///
    /// Ties between fields prefer the title, then the description, then the
    /// earliest keyword.
    pub fn score_command(&self, query: &str, command: &Command) -> CommandMatch {
        self.score_command_lowered(&fold_case(query), command)
    }

    fn score_command_lowered(&self, query_lower: &str, command: &Command) -> CommandMatch {
        let title = self.score_lowered(query_lower, &command.title);
        let mut best = CommandMatch {
            score: title.score,
            field: MatchField::Title,
            kind: title.kind,
            title_positions: title.positions,
        };

        let others = command
            .description
            .iter()
            .map(|d| (MatchField::Description, d.as_str()))
            .chain(
                command
                    .keywords
                    .iter()
                    .enumerate()
                    .map(|(i, k)| (MatchField::Keyword(i), k.as_str())),
            );

        for (field, text) in others {
            // Browse scores are identical everywhere; the title already holds one.
            if best.score >= BROWSE_SCORE {
                break;
            }
            let result = self.score_lowered(query_lower, text);
            if result.score > best.score {
                best.score = result.score;
                best.field = field;
                best.kind = result.kind;
            }
        }

        best
    }

    /// Filter and rank commands for a query.
    ///
    /// Keeps commands whose aggregate score is strictly greater than
    /// `min_score`, sorts them by descending score (stable on input order)
    /// and truncates to `max_results`.
    pub fn rank(
        &self,
        query: &str,
        commands: &[Command],
        min_score: f64,
        max_results: usize,
    ) -> Vec<RankedCommand> {
        let query_lower = fold_case(query);

        let mut ranked: Vec<RankedCommand> = commands
            .iter()
            .enumerate()
            .filter_map(|(index, command)| {
                let matched = self.score_command_lowered(&query_lower, command);
                (matched.score > min_score).then_some(RankedCommand { index, matched })
            })
            .collect();

        // `sort_by` is stable, which gives the input-order tie-break.
        ranked.sort_by(|a, b| b.matched.score.total_cmp(&a.matched.score));
        ranked.truncate(max_results);
        ranked
    }
}

/// Lowercase one char at a time.
///
/// `str::to_lowercase` maps a capital sigma by its position in the word, so
/// the same letter could fold differently in query and text.
fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Greedy left-to-right subsequence scan.
///
/// Returns the char index in `text` of each consumed query char, or `None`
/// if the query is not a subsequence of `text`.
fn subsequence_positions(query: &str, text: &str) -> Option<Vec<usize>> {
    let mut wanted = query.chars().peekable();
    let mut positions = Vec::with_capacity(query.len());

    for (idx, ch) in text.chars().enumerate() {
        match wanted.peek() {
            Some(&q) if q == ch => {
                positions.push(idx);
                wanted.next();
            }
            Some(_) => {}
            None => break,
        }
    }

    wanted.peek().is_none().then_some(positions)
}
