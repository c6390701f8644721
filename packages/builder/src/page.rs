//! # Pages and Workspace
//!
//! A page aggregates everything one landing page owns: blocks, theme copy,
//! publishing settings and its own undo history. A user works with several
//! pages and exactly one is active.
//!
//! ## Active page
//!
//! Edits go straight to the active page inside [`Workspace`], so the stored
//! page and the state the editor reads are the same value. Switching pages
//! changes which page is active; the outgoing page keeps its blocks, theme,
//! settings and history exactly as they were.
//!
//! ```text
//! pages: [ A (active) | B | C ]  --switch_to(C)-->  [ A | B | C (active) ]
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::collection::BlockCollection;
use crate::history::History;
use crate::settings::PageSettings;
use crate::theme::ThemePreset;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,
    pub name: String,
    pub slug: String,
    pub blocks: BlockCollection,
    pub current_theme: ThemePreset,
    pub page_settings: PageSettings,
    pub history: History,
}

impl Page {
    /// Empty page with settings seeded from `slug` and a fresh history
    pub fn new(
        id: PageId,
        name: impl Into<String>,
        slug: impl Into<String>,
        theme: ThemePreset,
        history_limit: usize,
    ) -> Self {
        let slug = slug.into();
        Self {
            id,
            name: name.into(),
            page_settings: PageSettings::with_slug(slug.clone()),
            slug,
            blocks: BlockCollection::new(),
            current_theme: theme,
            history: History::with_max_levels(history_limit),
        }
    }

    /// Replace the blocks, recording the current ones as an undo step
    pub(crate) fn record(&mut self, next: BlockCollection) {
        self.history.push_snapshot(&self.blocks);
        self.blocks = next;
    }
}

/// Slug proposal for a page name: lowercase, whitespace runs become `-`
pub fn suggest_slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// All pages of one session plus the active one
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pages: Vec<Page>,
    /// Index into `pages`; pages are never removed so it stays valid
    active: usize,
}

impl Workspace {
    pub fn new(first: Page) -> Self {
        Self {
            pages: vec![first],
            active: 0,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, id: &PageId) -> Option<&Page> {
        self.pages.iter().find(|page| &page.id == id)
    }

    pub fn active(&self) -> &Page {
        &self.pages[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Page {
        &mut self.pages[self.active]
    }

    pub fn active_page_id(&self) -> &PageId {
        &self.active().id
    }

    /// Make `id` the active page.
    ///
    /// Returns `false` when `id` is unknown or already active.
    pub fn switch_to(&mut self, id: &PageId) -> bool {
        match self.pages.iter().position(|page| &page.id == id) {
            Some(index) if index != self.active => {
                self.active = index;
                true
            }
            _ => false,
        }
    }

    /// Append `page` and make it active
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
        self.active = self.pages.len() - 1;
    }
}
