#![forbid(unsafe_code)]

//! Command catalogs and palette settings.
//!
//! A catalog is a TOML file:
//!
//! ```toml
//! max_results = 5
//! score_model = "graded"
//!
//! [[commands]]
//! id = "tabs"
//! title = "Tabs"
//! category = "Components"
//! keywords = ["tablist", "panel"]
//! route = "/components/tabs"
//! ```
//!
//! Without a catalog the harness uses [`builtin_catalog`].

use std::fs;
use std::path::{Path, PathBuf};

use lumen_widgets::command_palette::{Command, PaletteConfig, ScoreModel};
use serde::Deserialize;

use crate::cli::Cli;
use crate::navigation::NavigationLog;

/// Failure loading a catalog file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read catalog {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("catalog entry {index} has an empty {field}")]
    EmptyField { index: usize, field: &'static str },
}

/// Score model name as written in catalog files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreModelName {
    Compatible,
    Graded,
}

impl From<ScoreModelName> for ScoreModel {
    fn from(name: ScoreModelName) -> Self {
        match name {
            ScoreModelName::Compatible => ScoreModel::Compatible,
            ScoreModelName::Graded => ScoreModel::Graded,
        }
    }
}

/// Top level of a catalog file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    pub max_results: Option<usize>,
    pub min_score: Option<f64>,
    pub score_model: Option<ScoreModelName>,
    #[serde(default)]
    pub commands: Vec<CommandEntry>,
}

/// One `[[commands]]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandEntry {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub shortcut: Option<String>,
    /// Defaults to `/<id>`.
    pub route: Option<String>,
}

impl CommandEntry {
    fn new(id: &str, title: &str, category: &str, route: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            category: Some(category.to_string()),
            keywords: Vec::new(),
            shortcut: None,
            route: Some(route.to_string()),
        }
    }

    fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    fn keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|k| (*k).to_string()).collect();
        self
    }

    fn shortcut(mut self, shortcut: &str) -> Self {
        self.shortcut = Some(shortcut.to_string());
        self
    }

    /// The route this entry navigates to.
    pub fn route(&self) -> String {
        self.route.clone().unwrap_or_else(|| format!("/{}", self.id))
    }

    /// Build a palette command whose action navigates through `log`.
    pub fn to_command(&self, log: &NavigationLog) -> Command {
        let route = self.route();
        let log = log.clone();
        let keywords: Vec<&str> = self.keywords.iter().map(String::as_str).collect();

        let mut command = Command::new(&self.id, &self.title)
            .with_keywords(&keywords)
            .with_action(move || log.navigate(&route));
        if let Some(description) = &self.description {
            command = command.with_description(description);
        }
        if let Some(category) = &self.category {
            command = command.with_category(category);
        }
        if let Some(shortcut) = &self.shortcut {
            command = command.with_shortcut(shortcut);
        }
        command
    }
}

impl CatalogFile {
    /// Parse catalog text. `path` is only used in error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let catalog: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        catalog.check()?;
        Ok(catalog)
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::parse(&text, path)?;
        tracing::debug!(
            path = %path.display(),
            commands = catalog.commands.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    fn check(&self) -> Result<(), ConfigError> {
        for (index, entry) in self.commands.iter().enumerate() {
            if entry.id.trim().is_empty() {
                return Err(ConfigError::EmptyField { index, field: "id" });
            }
            if entry.title.trim().is_empty() {
                return Err(ConfigError::EmptyField {
                    index,
                    field: "title",
                });
            }
        }
        Ok(())
    }
}

/// Resolved harness settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub palette: PaletteConfig,
    pub entries: Vec<CommandEntry>,
}

impl Settings {
    /// Merge CLI/env values over the catalog file over defaults.
    ///
    /// A catalog without `[[commands]]` keeps the built-in command set.
    pub fn resolve(cli: &Cli, file: Option<CatalogFile>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = PaletteConfig::default();

        let score_model = if cli.graded {
            ScoreModel::Graded
        } else {
            file.score_model.map_or(defaults.score_model, ScoreModel::from)
        };
        let palette = PaletteConfig::default()
            .with_max_results(
                cli.max_results
                    .or(file.max_results)
                    .unwrap_or(defaults.max_results),
            )
            .with_min_score(cli.min_score.or(file.min_score).unwrap_or(defaults.min_score))
            .with_score_model(score_model);

        let entries = if file.commands.is_empty() {
            builtin_catalog()
        } else {
            file.commands
        };

        Self { palette, entries }
    }

    /// Commands wired to `log`, in catalog order.
    pub fn commands(&self, log: &NavigationLog) -> Vec<Command> {
        self.entries.iter().map(|e| e.to_command(log)).collect()
    }
}

/// Pages of the component library documentation site.
pub fn builtin_catalog() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("home", "Go to Home", "Navigation", "/")
            .describe("Landing page of the documentation site")
            .keywords(&["home", "main", "start"])
            .shortcut("g h"),
        CommandEntry::new("components", "View Components", "Navigation", "/components")
            .describe("Browse every component in the library")
            .keywords(&["catalog", "widgets", "library"])
            .shortcut("g c"),
        CommandEntry::new("tabs", "Tabs", "Components", "/components/tabs")
            .describe("Switch between related panels")
            .keywords(&["tablist", "panel"]),
        CommandEntry::new("drawer", "Drawer", "Components", "/components/drawer")
            .describe("Slide-in panel anchored to a screen edge")
            .keywords(&["sidebar", "sheet", "overlay"]),
        CommandEntry::new("checkbox", "Checkbox", "Components", "/components/checkbox")
            .describe("Binary or indeterminate toggle")
            .keywords(&["toggle", "check", "form"]),
        CommandEntry::new("select", "Select", "Components", "/components/select")
            .describe("Pick one option from a dropdown list")
            .keywords(&["dropdown", "combobox", "form"]),
        CommandEntry::new(
            "breadcrumbs",
            "Breadcrumbs",
            "Components",
            "/components/breadcrumbs",
        )
        .describe("Show the path to the current page")
        .keywords(&["path", "trail"]),
        CommandEntry::new(
            "command-palette",
            "Command Palette",
            "Components",
            "/components/command-palette",
        )
        .describe("Search and run commands from the keyboard")
        .keywords(&["search", "launcher", "quick open"])
        .shortcut("ctrl+k"),
        CommandEntry::new(
            "color-swatch",
            "Color Swatch",
            "Components",
            "/components/color-swatch",
        )
        .describe("Preview a color with its value")
        .keywords(&["colour", "palette", "theme"]),
        CommandEntry::new(
            "copy-button",
            "Copy Button",
            "Components",
            "/components/copy-button",
        )
        .describe("Copy text to the clipboard")
        .keywords(&["clipboard", "paste"]),
        CommandEntry::new("spinner", "Spinner", "Components", "/components/spinner")
            .describe("Indeterminate loading indicator")
            .keywords(&["loading", "progress", "busy"]),
        CommandEntry::new("theme", "Toggle Theme", "Preferences", "/settings/theme")
            .describe("Switch between light and dark mode")
            .keywords(&["dark", "light", "appearance"])
            .shortcut("ctrl+shift+l"),
    ]
}
