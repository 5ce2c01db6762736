#![forbid(unsafe_code)]

//! Plain-text rendering of the palette view.
//!
//! ```text
//! palette: query "go" (2 results)
//! Navigation
//! > Go to Home                      g h
//!     Landing page of the documentation site
//!   View Components                 g c
//! ```

use std::fmt::Write as _;

use lumen_widgets::command_palette::PaletteView;

const TITLE_COLUMN: usize = 32;

/// Render a view snapshot.
pub fn render_view(view: &PaletteView<'_>) -> String {
    let mut out = String::new();
    if !view.is_open {
        out.push_str("palette: closed\n");
        return out;
    }

    let plural = if view.len() == 1 { "" } else { "s" };
    let _ = writeln!(
        out,
        "palette: query {:?} ({} result{plural})",
        view.query,
        view.len()
    );
    if view.is_empty() {
        out.push_str("  no matching commands\n");
        return out;
    }

    for group in &view.groups {
        let _ = writeln!(out, "{}", group.category);
        for entry in &group.entries {
            let marker = if entry.selected { '>' } else { ' ' };
            let command = entry.command;
            match &command.shortcut {
                Some(shortcut) => {
                    let _ = writeln!(
                        out,
                        "{marker} {:<width$}{shortcut}",
                        command.title,
                        width = TITLE_COLUMN
                    );
                }
                None => {
                    let _ = writeln!(out, "{marker} {}", command.title);
                }
            }
            if entry.selected
                && let Some(description) = &command.description
            {
                let _ = writeln!(out, "    {description}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_widgets::command_palette::{Command, PaletteController};

    fn palette() -> PaletteController {
        PaletteController::new(vec![
            Command::new("home", "Go to Home")
                .with_category("Navigation")
                .with_description("Landing page")
                .with_shortcut("g h"),
            Command::new("tabs", "Tabs").with_category("Components"),
            Command::new("components", "View Components").with_category("Navigation"),
        ])
        .unwrap()
    }

    #[test]
    fn closed_palette() {
        let palette = palette();
        assert_eq!(render_view(&palette.view()), "palette: closed\n");
    }

    #[test]
    fn grouped_listing_marks_selection() {
        let mut palette = palette();
        palette.open();
        let text = render_view(&palette.view());
        let expected = format!(
            "palette: query \"\" (3 results)\n\
             Navigation\n\
             > {:<32}g h\n    \
             Landing page\n  \
             View Components\n\
             Components\n  \
             Tabs\n",
            "Go to Home"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn description_only_for_selected() {
        let mut palette = palette();
        palette.open();
        palette.set_selection(1).unwrap();
        let text = render_view(&palette.view());
        assert!(text.contains("> Tabs\n"));
        assert!(!text.contains("Landing page"));
    }

    #[test]
    fn empty_results() {
        let mut palette = palette();
        palette.open();
        palette.set_query("xyz123");
        assert_eq!(
            render_view(&palette.view()),
            "palette: query \"xyz123\" (0 results)\n  no matching commands\n"
        );
    }
}
