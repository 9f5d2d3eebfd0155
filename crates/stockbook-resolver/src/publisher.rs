//! Publisher autocomplete
//!
//! [`PublisherIndex`] holds the known names; [`PublisherDropdown`] is the
//! candidate list shown under the publisher input, with keyboard
//! navigation and a scrolling viewport.

use indexmap::IndexSet;
use stockbook_model::contains_ignore_case;

/// Known publisher names in collaborator order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublisherIndex {
    names: IndexSet<String>,
}

impl PublisherIndex {
    /// Create empty index
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace contents, collapsing blanks and duplicates
    ///
    /// Returns whether the contents changed.
    pub fn replace<I, S>(&mut self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next: IndexSet<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| !name.trim().is_empty())
            .collect();
        let changed = next != self.names;
        self.names = next;
        changed
    }

    /// Names containing `query`, ignoring case, in index order
    ///
    /// An empty query yields nothing.
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<String> {
        if query.is_empty() {
            return Vec::new();
        }
        self.names
            .iter()
            .filter(|name| contains_ignore_case(name, query))
            .cloned()
            .collect()
    }

    /// Whether a name is known
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of names
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names are known
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Keys the dropdown reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownKey {
    /// Arrow down
    Down,
    /// Arrow up
    Up,
    /// Enter
    Enter,
    /// Escape
    Escape,
}

/// Where focus went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// The publisher input
    PublisherInput,
    /// The candidate list
    PublisherList,
    /// Anything else
    Elsewhere,
}

/// What a key or focus event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownAction {
    /// Nothing
    Ignored,
    /// List became visible
    Opened,
    /// Highlight moved to this row
    Highlighted(usize),
    /// A name was chosen
    Selected(String),
    /// List hidden
    Closed,
}

/// Window of rows currently scrolled into view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    rows: usize,
    offset: usize,
}

impl Viewport {
    /// Viewport showing `rows` rows at once
    #[inline]
    #[must_use]
    pub fn new(rows: usize) -> Self {
        Self {
            rows: rows.max(1),
            offset: 0,
        }
    }

    /// First visible row
    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Visible row range
    #[inline]
    #[must_use]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.rows
    }

    /// Scroll the minimum amount needed to show `row`
    pub fn ensure_visible(&mut self, row: usize) {
        if row < self.offset {
            self.offset = row;
        } else if row >= self.offset + self.rows {
            self.offset = row + 1 - self.rows;
        }
    }

    fn reset(&mut self) {
        self.offset = 0;
    }
}

/// Filtered candidate list under the publisher input
#[derive(Debug, Clone)]
pub struct PublisherDropdown {
    candidates: Vec<String>,
    open: bool,
    highlighted: Option<usize>,
    viewport: Viewport,
}

impl PublisherDropdown {
    /// Closed, empty dropdown
    #[inline]
    #[must_use]
    pub fn new(visible_rows: usize) -> Self {
        Self {
            candidates: Vec::new(),
            open: false,
            highlighted: None,
            viewport: Viewport::new(visible_rows),
        }
    }

    /// Current candidates
    #[inline]
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Whether the list is shown (open and non-empty)
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.open && !self.candidates.is_empty()
    }

    /// Highlighted row
    #[inline]
    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Scroll position
    #[inline]
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Recompute candidates for the input text
    pub fn recompute(&mut self, query: &str, index: &PublisherIndex) {
        self.candidates = index.filter(query);
        self.highlighted = None;
        self.viewport.reset();
    }

    /// Show the list
    #[inline]
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the list
    pub fn close(&mut self) {
        self.open = false;
        self.highlighted = None;
        self.viewport.reset();
    }

    /// React to a key pressed in the publisher input
    pub fn key(&mut self, key: DropdownKey) -> DropdownAction {
        match key {
            DropdownKey::Down if !self.candidates.is_empty() => {
                if self.open {
                    self.step(true)
                } else {
                    self.open = true;
                    DropdownAction::Opened
                }
            }
            DropdownKey::Up if self.is_visible() => self.step(false),
            DropdownKey::Enter if self.is_visible() => match self.highlighted {
                Some(row) => self
                    .select(row)
                    .map_or(DropdownAction::Ignored, DropdownAction::Selected),
                None => DropdownAction::Ignored,
            },
            DropdownKey::Escape if self.open => {
                self.close();
                DropdownAction::Closed
            }
            _ => DropdownAction::Ignored,
        }
    }

    /// Focus moved; leaving the input/list pair closes the list
    pub fn focus(&mut self, target: FocusTarget) -> DropdownAction {
        match target {
            FocusTarget::PublisherInput if !self.open && !self.candidates.is_empty() => {
                self.open = true;
                DropdownAction::Opened
            }
            FocusTarget::Elsewhere if self.open => {
                self.close();
                DropdownAction::Closed
            }
            _ => DropdownAction::Ignored,
        }
    }

    /// Choose a row; closes the list
    pub fn select(&mut self, row: usize) -> Option<String> {
        let chosen = self.candidates.get(row).cloned()?;
        self.close();
        Some(chosen)
    }

    fn step(&mut self, forward: bool) -> DropdownAction {
        let len = self.candidates.len();
        let next = match (self.highlighted, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(row), true) => (row + 1) % len,
            (Some(row), false) => (row + len - 1) % len,
        };
        self.highlighted = Some(next);
        self.viewport.ensure_visible(next);
        DropdownAction::Highlighted(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn index(names: &[&str]) -> PublisherIndex {
        let mut index = PublisherIndex::new();
        index.replace(names.iter().copied());
        index
    }

    fn open_dropdown(names: &[&str], query: &str, rows: usize) -> PublisherDropdown {
        let mut dropdown = PublisherDropdown::new(rows);
        dropdown.recompute(query, &index(names));
        dropdown.open();
        dropdown
    }

    #[test]
    fn substring_filter_keeps_index_order() {
        let index = index(&["Penguin", "Pearson", "Tor"]);
        assert_eq!(index.filter("pe"), vec!["Penguin", "Pearson"]);
        assert_eq!(index.filter("PEN"), vec!["Penguin"]);
        assert_eq!(index.filter("son"), vec!["Pearson"]);
        assert!(index.filter("").is_empty());
    }

    #[test]
    fn replace_reports_change() {
        let mut index = PublisherIndex::new();
        assert!(index.replace(["Tor", "", "Tor", "Ace"]));
        assert_eq!(index.iter().collect::<Vec<_>>(), vec!["Tor", "Ace"]);
        assert!(!index.replace(["Tor", "Ace"]));
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut dropdown = open_dropdown(&["Ace", "Acme", "Arcade"], "a", 6);
        assert_eq!(dropdown.key(DropdownKey::Up), DropdownAction::Highlighted(2));
        assert_eq!(dropdown.key(DropdownKey::Down), DropdownAction::Highlighted(0));
        assert_eq!(dropdown.key(DropdownKey::Up), DropdownAction::Highlighted(2));
    }

    #[test]
    fn down_opens_closed_list_first() {
        let mut dropdown = PublisherDropdown::new(6);
        dropdown.recompute("a", &index(&["Ace"]));
        assert!(!dropdown.is_visible());
        assert_eq!(dropdown.key(DropdownKey::Down), DropdownAction::Opened);
        assert_eq!(dropdown.key(DropdownKey::Down), DropdownAction::Highlighted(0));
    }

    #[test]
    fn enter_selects_and_closes() {
        let mut dropdown = open_dropdown(&["Ace", "Acme"], "ac", 6);
        dropdown.key(DropdownKey::Down);
        dropdown.key(DropdownKey::Down);
        assert_eq!(
            dropdown.key(DropdownKey::Enter),
            DropdownAction::Selected("Acme".into())
        );
        assert!(!dropdown.is_visible());
    }

    #[test]
    fn escape_and_outside_focus_close() {
        let mut dropdown = open_dropdown(&["Ace"], "a", 6);
        assert_eq!(dropdown.focus(FocusTarget::PublisherList), DropdownAction::Ignored);
        assert!(dropdown.is_visible());
        assert_eq!(dropdown.focus(FocusTarget::Elsewhere), DropdownAction::Closed);

        dropdown.open();
        assert_eq!(dropdown.key(DropdownKey::Escape), DropdownAction::Closed);
        assert_eq!(dropdown.focus(FocusTarget::PublisherInput), DropdownAction::Opened);
    }

    #[test]
    fn highlight_scrolls_into_view() {
        let names: Vec<String> = (0..10).map(|i| format!("Pub {i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut dropdown = open_dropdown(&refs, "pub", 3);

        for _ in 0..5 {
            dropdown.key(DropdownKey::Down);
        }
        assert_eq!(dropdown.highlighted(), Some(4));
        assert_eq!(dropdown.viewport().range(), 2..5);

        dropdown.key(DropdownKey::Up);
        dropdown.key(DropdownKey::Up);
        dropdown.key(DropdownKey::Up);
        assert_eq!(dropdown.viewport().offset(), 1);

        // wrap to the end
        for _ in 0..2 {
            dropdown.key(DropdownKey::Up);
        }
        assert_eq!(dropdown.highlighted(), Some(9));
        assert_eq!(dropdown.viewport().range(), 7..10);
    }

    proptest! {
        #[test]
        fn prop_highlight_stays_in_bounds_and_visible(
            len in 1usize..20,
            rows in 1usize..8,
            keys in proptest::collection::vec(any::<bool>(), 0..60),
        ) {
            let names: Vec<String> = (0..len).map(|i| format!("P{i}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let mut dropdown = open_dropdown(&refs, "p", rows);

            for down in keys {
                dropdown.key(if down { DropdownKey::Down } else { DropdownKey::Up });
                let row = dropdown.highlighted().unwrap();
                prop_assert!(row < len);
                prop_assert!(dropdown.viewport().range().contains(&row));
            }
        }

        #[test]
        fn prop_full_cycle_returns_to_start(len in 1usize..20) {
            let names: Vec<String> = (0..len).map(|i| format!("P{i}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let mut dropdown = open_dropdown(&refs, "p", 4);

            dropdown.key(DropdownKey::Down);
            let start = dropdown.highlighted();
            for _ in 0..len {
                dropdown.key(DropdownKey::Down);
            }
            prop_assert_eq!(dropdown.highlighted(), start);
        }
    }
}
