#![forbid(unsafe_code)]

//! In-memory navigation log standing in for a router.

use std::sync::{Arc, Mutex, PoisonError};

use lumen_widgets::command_palette::ActionError;

/// Shared record of visited routes.
///
/// Clones share the same log, so every command action can hold one.
#[derive(Debug, Clone, Default)]
pub struct NavigationLog {
    visits: Arc<Mutex<Vec<String>>>,
}

impl NavigationLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit to `route`.
    ///
    /// Routes must be absolute (start with `/`).
    pub fn navigate(&self, route: &str) -> Result<(), ActionError> {
        if !route.starts_with('/') {
            return Err(ActionError::msg(format!("cannot navigate to relative route `{route}`")));
        }
        tracing::info!(route, "navigate");
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route.to_string());
        Ok(())
    }

    /// Visited routes, oldest first.
    pub fn visits(&self) -> Vec<String> {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Plain-text listing of the log.
    pub fn render(&self) -> String {
        let visits = self.visits();
        if visits.is_empty() {
            return "navigation: (none)\n".to_string();
        }
        let mut out = String::from("navigation:\n");
        for (i, route) in visits.iter().enumerate() {
            out.push_str(&format!("  {}. {route}\n", i + 1));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_visits() {
        let log = NavigationLog::new();
        let handle = log.clone();
        handle.navigate("/components/tabs").unwrap();
        log.navigate("/").unwrap();
        assert_eq!(log.visits(), vec!["/components/tabs", "/"]);
    }

    #[test]
    fn relative_route_fails() {
        let log = NavigationLog::new();
        let err = log.navigate("tabs").unwrap_err();
        assert_eq!(err.to_string(), "cannot navigate to relative route `tabs`");
        assert!(log.visits().is_empty());
    }

    #[test]
    fn render_lists_numbered_routes() {
        let log = NavigationLog::new();
        assert_eq!(log.render(), "navigation: (none)\n");
        log.navigate("/a").unwrap();
        log.navigate("/b").unwrap();
        assert_eq!(log.render(), "navigation:\n  1. /a\n  2. /b\n");
    }
}
