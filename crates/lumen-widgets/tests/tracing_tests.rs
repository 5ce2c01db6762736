#![forbid(unsafe_code)]

//! Palette telemetry integration tests.
//!
//! Events and spans enabled:
//!   cargo test -p lumen-widgets --features tracing --test tracing_tests
//!
//! Zero-overhead verification (no feature):
//!   cargo test -p lumen-widgets --test tracing_tests -- zero_overhead

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use lumen_widgets::command_palette::{ActionError, Command, Direction, PaletteController};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured event or span with its fields.
#[derive(Debug, Clone)]
struct Captured {
    name: String,
    fields: HashMap<String, String>,
}

#[derive(Default)]
struct Captures {
    events: Vec<Captured>,
    spans: Vec<Captured>,
}

/// A tracing Layer that records events and new spans.
struct PaletteCapture {
    inner: Arc<Mutex<Captures>>,
}

impl PaletteCapture {
    fn new() -> (Self, CaptureHandle) {
        let inner = Arc::new(Mutex::new(Captures::default()));
        (
            Self {
                inner: inner.clone(),
            },
            CaptureHandle { inner },
        )
    }
}

struct CaptureHandle {
    inner: Arc<Mutex<Captures>>,
}

impl CaptureHandle {
    /// Values of the `event` field, in emission order.
    fn event_names(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .events
            .iter()
            .filter_map(|e| e.fields.get("event").cloned())
            .collect()
    }

    fn event(&self, name: &str) -> Option<Captured> {
        self.inner
            .lock()
            .unwrap()
            .events
            .iter()
            .find(|e| e.fields.get("event").map(String::as_str) == Some(name))
            .cloned()
    }

    fn spans_named(&self, name: &str) -> Vec<Captured> {
        self.inner
            .lock()
            .unwrap()
            .spans
            .iter()
            .filter(|s| s.name == name)
            .cloned()
            .collect()
    }

    fn total(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.events.len() + inner.spans.len()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for PaletteCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.inner.lock().unwrap().spans.push(Captured {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.inner.lock().unwrap().events.push(Captured {
            name: event.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let (layer, handle) = PaletteCapture::new();
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    handle
}

fn commands() -> Vec<Command> {
    vec![
        Command::new("home", "Go to Home").with_category("Navigation"),
        Command::new("tabs", "Tabs").with_category("Components"),
        Command::new("broken", "Broken Link").with_action(|| Err(ActionError::msg("404"))),
    ]
}

// ============================================================================
// Event emission (feature on)
// ============================================================================

#[cfg(feature = "tracing")]
#[test]
fn lifecycle_events_in_order() {
    let handle = with_captured(|| {
        let mut palette = PaletteController::new(commands()).unwrap();
        palette.open();
        palette.set_query("ta");
        palette.move_selection(Direction::Next);
        palette.confirm_selection().unwrap();
        palette.open();
        palette.close();
    });

    assert_eq!(
        handle.event_names(),
        vec![
            "palette_opened",
            "query_changed",
            "selection_moved",
            "command_executed",
            "palette_closed",
            "palette_opened",
            "palette_closed",
        ]
    );
}

#[cfg(feature = "tracing")]
#[test]
fn event_fields_carry_counts() {
    let handle = with_captured(|| {
        let mut palette = PaletteController::new(commands()).unwrap();
        palette.open();
        palette.set_query("tabs");
        palette.confirm_selection().unwrap();
    });

    let opened = handle.event("palette_opened").expect("palette_opened");
    assert_eq!(opened.fields.get("commands").map(String::as_str), Some("3"));
    assert_eq!(opened.fields.get("results").map(String::as_str), Some("3"));

    let changed = handle.event("query_changed").expect("query_changed");
    assert_eq!(changed.fields.get("query_len").map(String::as_str), Some("4"));
    assert_eq!(changed.fields.get("results").map(String::as_str), Some("1"));

    let executed = handle.event("command_executed").expect("command_executed");
    assert_eq!(executed.fields.get("id").map(String::as_str), Some("tabs"));
}

#[cfg(feature = "tracing")]
#[test]
fn failed_action_emits_command_failed() {
    let handle = with_captured(|| {
        let mut palette = PaletteController::new(commands()).unwrap();
        palette.open();
        palette.set_query("broken");
        assert!(palette.confirm_selection().is_err());
    });

    let names = handle.event_names();
    assert!(names.contains(&"command_failed".to_string()));
    assert!(!names.contains(&"command_executed".to_string()));
    assert!(!names.contains(&"palette_closed".to_string()));

    let failed = handle.event("command_failed").expect("command_failed");
    assert_eq!(failed.fields.get("id").map(String::as_str), Some("broken"));
    assert_eq!(failed.fields.get("error").map(String::as_str), Some("404"));
}

#[cfg(feature = "tracing")]
#[test]
fn recompute_span_per_query_change() {
    let handle = with_captured(|| {
        let mut palette = PaletteController::new(commands()).unwrap();
        palette.open();
        palette.set_query("g");
        palette.set_query("go");
    });

    let spans = handle.spans_named("palette_recompute");
    assert_eq!(spans.len(), 3, "open + two query changes");
    assert_eq!(
        spans[0].fields.get("model").map(String::as_str),
        Some("compatible")
    );
    assert_eq!(spans[0].fields.get("commands").map(String::as_str), Some("3"));
}

#[cfg(feature = "tracing")]
#[test]
fn closed_palette_emits_nothing() {
    let handle = with_captured(|| {
        let mut palette = PaletteController::new(commands()).unwrap();
        palette.close();
        palette.set_query("x");
        palette.move_selection(Direction::Previous);
    });
    assert_eq!(handle.total(), 0);
}

// ============================================================================
// Zero overhead (feature off)
// ============================================================================

#[cfg(not(feature = "tracing"))]
#[test]
fn zero_overhead_no_palette_telemetry() {
    let handle = with_captured(|| {
        let mut palette = PaletteController::new(commands()).unwrap();
        palette.open();
        palette.set_query("home");
        palette.confirm_selection().unwrap();
    });
    assert_eq!(handle.total(), 0);
    assert!(handle.event_names().is_empty());
    assert!(handle.spans_named("palette_recompute").is_empty());
    assert!(handle.event("palette_opened").is_none());
}
