#![forbid(unsafe_code)]

//! Grouped view of palette results.
//!
//! Renderers show results grouped by category, while the controller keeps a
//! single flat selection index over the ranked list. Groups appear in the
//! order their category first occurs in the ranked list, and each group keeps
//! the ranked order of its entries:
//!
//! ```text
//! ranked:  0:A(Nav)  1:B(Edit)  2:C(Nav)
//! groups:  Nav  -> [0:A, 2:C]
//!          Edit -> [1:B]
//! ```
//!
//! [`PaletteView::locate`] and [`PaletteView::flat_index`] convert between
//! the two coordinate systems without loss.

use super::{Command, CommandMatch, RankedCommand};

/// One rendered result row.
#[derive(Debug, Clone, Copy)]
pub struct ViewEntry<'a> {
    /// Position in the flat ranked list (the selection index space).
    pub index: usize,
    /// The command behind this row.
    pub command: &'a Command,
    /// How the command matched the query.
    pub matched: &'a CommandMatch,
    /// Whether this row holds the selection.
    pub selected: bool,
}

/// Results sharing one category.
#[derive(Debug, Clone)]
pub struct CommandGroup<'a> {
    /// Category label.
    pub category: &'a str,
    /// Entries in ranked order.
    pub entries: Vec<ViewEntry<'a>>,
}

/// Snapshot of the palette for a rendering layer.
#[derive(Debug, Clone)]
pub struct PaletteView<'a> {
    /// Current query text.
    pub query: &'a str,
    /// Whether the palette is open.
    pub is_open: bool,
    /// Selected flat index, `None` when there are no results.
    pub selected: Option<usize>,
    /// Results grouped by category.
    pub groups: Vec<CommandGroup<'a>>,
    /// `locations[flat] == (group, position)`.
    locations: Vec<(usize, usize)>,
}

impl<'a> PaletteView<'a> {
    pub(super) fn build(
        query: &'a str,
        is_open: bool,
        commands: &'a [Command],
        ranked: &'a [RankedCommand],
        selected: Option<usize>,
    ) -> Self {
        let mut groups: Vec<CommandGroup<'a>> = Vec::new();
        let mut locations = Vec::with_capacity(ranked.len());

        for (index, item) in ranked.iter().enumerate() {
            let command = &commands[item.index];
            let group_idx = match groups
                .iter()
                .position(|g| g.category == command.category)
            {
                Some(idx) => idx,
                None => {
                    groups.push(CommandGroup {
                        category: &command.category,
                        entries: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
            let group = &mut groups[group_idx];
            locations.push((group_idx, group.entries.len()));
            group.entries.push(ViewEntry {
                index,
                command,
                matched: &item.matched,
                selected: selected == Some(index),
            });
        }

        Self {
            query,
            is_open,
            selected,
            groups,
            locations,
        }
    }

    /// Total number of entries across all groups.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether there are no results.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Map a flat index to `(group, position within group)`.
    pub fn locate(&self, index: usize) -> Option<(usize, usize)> {
        self.locations.get(index).copied()
    }

    /// Map `(group, position within group)` back to the flat index.
    pub fn flat_index(&self, group: usize, position: usize) -> Option<usize> {
        self.groups
            .get(group)?
            .entries
            .get(position)
            .map(|entry| entry.index)
    }

    /// The entry at a flat index.
    pub fn entry(&self, index: usize) -> Option<&ViewEntry<'a>> {
        let (group, position) = self.locate(index)?;
        self.groups[group].entries.get(position)
    }

    /// The selected entry, if any.
    pub fn selected_entry(&self) -> Option<&ViewEntry<'a>> {
        self.entry(self.selected?)
    }

    /// Entries in display order (group by group).
    pub fn entries(&self) -> impl Iterator<Item = &ViewEntry<'a>> {
        self.groups.iter().flat_map(|g| g.entries.iter())
    }
}
