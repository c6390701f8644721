//! # Builder Store
//!
//! The single state container for one editing session. Views read from it
//! and call its entry points; it never calls back into views.
//!
//! Every block edit follows the same protocol: the edit runs against a copy
//! of the collection, and if it reports an edit the current collection is
//! pushed onto the page history and replaced. The history therefore holds
//! pre-edit states. Edits aimed at unknown ids and layout reports that move
//! nothing leave no undo step; every other block edit records one and drops
//! the redo branch.
//!
//! The store is not internally synchronized. A multi-threaded host must
//! serialize calls, e.g. by owning it behind a `Mutex` or a single task.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::analytics::AnalyticsStats;
use crate::block::{Block, BlockId, BlockKind, SizeVariant};
use crate::collection::BlockCollection;
use crate::errors::{BuilderError, BuilderResult};
use crate::history::{History, DEFAULT_HISTORY_LIMIT};
use crate::layout::{apply_layout_delta, layout_delta_changes, Compactor, LayoutItem};
use crate::mutations::{Mutation, MutationOutcome};
use crate::page::{Page, PageId, Workspace};
use crate::patch::ContentPatch;
use crate::settings::{PageSettings, PageSettingsPatch};
use crate::theme::{find_preset, ThemePreset, ThemeSection, DEFAULT_THEME_ID};
use crate::view::{Panel, ViewMode, ViewState};

/// Session-wide settings for a [`BuilderStore`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreOptions {
    /// Undo levels kept per page (0 = unlimited)
    pub history_limit: usize,
    pub default_page_id: String,
    pub default_page_name: String,
    pub default_slug: String,
    /// Preset id new pages start with
    pub default_theme: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            default_page_id: "default".to_string(),
            default_page_name: "My Personal Page".to_string(),
            default_slug: "my-page".to_string(),
            default_theme: DEFAULT_THEME_ID.to_string(),
        }
    }
}

/// Serializable view of the whole session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSnapshot {
    pub active_page_id: PageId,
    pub pages: Vec<Page>,
    pub view: ViewState,
    pub stats: AnalyticsStats,
}

pub struct BuilderStore {
    workspace: Workspace,
    view: ViewState,
    /// Shown while the analytics view is open
    stats: AnalyticsStats,
    /// Theme every new page starts with
    base_theme: ThemePreset,
    options: StoreOptions,
}

impl BuilderStore {
    /// Store with one empty default page
    pub fn new() -> Self {
        let options = StoreOptions::default();
        let base_theme = crate::theme::default_theme();
        Self::build(options, base_theme)
    }

    /// Store configured by `options`; fails if the default theme is unknown
    pub fn with_options(options: StoreOptions) -> BuilderResult<Self> {
        let base_theme = find_preset(&options.default_theme)
            .cloned()
            .ok_or_else(|| BuilderError::UnknownTheme(options.default_theme.clone()))?;
        Ok(Self::build(options, base_theme))
    }

    fn build(options: StoreOptions, base_theme: ThemePreset) -> Self {
        let first = Page::new(
            PageId::new(options.default_page_id.clone()),
            options.default_page_name.clone(),
            options.default_slug.clone(),
            base_theme.clone(),
            options.history_limit,
        );

        Self {
            workspace: Workspace::new(first),
            view: ViewState::default(),
            stats: AnalyticsStats::sample(),
            base_theme,
            options,
        }
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn blocks(&self) -> &BlockCollection {
        &self.workspace.active().blocks
    }

    pub fn current_theme(&self) -> &ThemePreset {
        &self.workspace.active().current_theme
    }

    pub fn page_settings(&self) -> &PageSettings {
        &self.workspace.active().page_settings
    }

    pub fn history(&self) -> &History {
        &self.workspace.active().history
    }

    pub fn can_undo(&self) -> bool {
        self.history().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history().can_redo()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn stats(&self) -> &AnalyticsStats {
        &self.stats
    }

    pub fn pages(&self) -> &[Page] {
        self.workspace.pages()
    }

    pub fn active_page(&self) -> &Page {
        self.workspace.active()
    }

    pub fn active_page_id(&self) -> &PageId {
        self.workspace.active_page_id()
    }

    pub fn snapshot(&self) -> WorkspaceSnapshot {
        WorkspaceSnapshot {
            active_page_id: self.active_page_id().clone(),
            pages: self.pages().to_vec(),
            view: self.view.clone(),
            stats: self.stats.clone(),
        }
    }

    /// Run `edit` on a copy of the active collection and commit it as one
    /// undo step if it reports an edit
    fn commit<F>(&mut self, edit: F) -> bool
    where
        F: FnOnce(&mut BlockCollection) -> bool,
    {
        let page = self.workspace.active_mut();
        let mut next = page.blocks.clone();

        if !edit(&mut next) {
            return false;
        }

        page.record(next);
        true
    }

    /// [`BuilderStore::commit`] for edits that can fail; an error leaves the
    /// page and its history untouched
    fn try_commit<F>(&mut self, edit: F) -> BuilderResult<bool>
    where
        F: FnOnce(&mut BlockCollection) -> BuilderResult<bool>,
    {
        let page = self.workspace.active_mut();
        let mut next = page.blocks.clone();

        if !edit(&mut next)? {
            return Ok(false);
        }

        page.record(next);
        Ok(true)
    }

    // ---- Blocks ----

    /// Append a default block of `kind`, returning its id
    pub fn add_block(&mut self, kind: BlockKind) -> BuilderResult<BlockId> {
        self.add_block_at(kind, Utc::now())
    }

    /// [`BuilderStore::add_block`] with an explicit clock reading
    pub fn add_block_at(&mut self, kind: BlockKind, now: DateTime<Utc>) -> BuilderResult<BlockId> {
        let block = Block::new_at(kind, now);
        let id = block.id.clone();

        self.try_commit(|blocks| blocks.push(block).map(|_| true))?;
        debug!(block_id = %id, kind = %kind, "Added block");
        Ok(id)
    }

    /// Shallow-merge `patch` into a block's content.
    ///
    /// Any edit of an existing block is an undo step and drops the redo
    /// branch, even when the merged content equals the old one. Returns
    /// `false` only for unknown ids.
    pub fn update_block(&mut self, id: &BlockId, patch: &ContentPatch) -> BuilderResult<bool> {
        let mut changed = false;
        let recorded = self.try_commit(|blocks| {
            if !blocks.contains(id) {
                return Ok(false);
            }
            changed = blocks.update_content(id, patch)?;
            Ok(true)
        })?;
        debug!(block_id = %id, fields = patch.len(), recorded, changed, "Updated block content");
        Ok(recorded)
    }

    pub fn remove_block(&mut self, id: &BlockId) -> bool {
        let removed = self.commit(|blocks| blocks.remove(id).is_some());
        debug!(block_id = %id, removed, "Removed block");
        removed
    }

    /// Switch a block's size class and grid span as a single undo step.
    ///
    /// Like content updates, resizing an existing block always records.
    pub fn resize_block(&mut self, id: &BlockId, variant: SizeVariant) -> bool {
        let resized = self.commit(|blocks| match blocks.get_mut(id) {
            Some(block) => {
                block.resize(variant);
                true
            }
            None => false,
        });
        debug!(block_id = %id, %variant, resized, "Resized block");
        resized
    }

    /// Merge positions reported by the grid engine.
    ///
    /// Callers coalesce drag events; each call that moves anything is one
    /// undo step.
    pub fn update_layout(&mut self, items: &[LayoutItem]) -> bool {
        if !layout_delta_changes(self.blocks(), items) {
            debug!(items = items.len(), "Layout unchanged");
            return false;
        }

        let moved = self.commit(|blocks| apply_layout_delta(blocks, items) > 0);
        debug!(items = items.len(), moved, "Applied layout change");
        moved
    }

    /// Resolve placements through `compactor` and merge them like a drag
    pub fn compact(&mut self, compactor: &dyn Compactor) -> bool {
        let items = compactor.compact(&self.blocks().layouts());
        self.update_layout(&items)
    }

    /// Replace the whole collection (non-grid reordering).
    ///
    /// A valid replacement is always one undo step, even if it matches the
    /// current order.
    pub fn reorder_blocks(&mut self, blocks: Vec<Block>) -> BuilderResult<bool> {
        let replacement = BlockCollection::from_blocks(blocks)?;
        self.commit(|current| {
            *current = replacement;
            true
        });
        debug!(blocks = self.blocks().len(), "Reordered blocks");
        Ok(true)
    }

    pub fn undo(&mut self) -> bool {
        let page = self.workspace.active_mut();
        let undone = page.history.undo(&mut page.blocks);
        debug!(undone, remaining = page.history.undo_levels(), "Undo");
        undone
    }

    pub fn redo(&mut self) -> bool {
        let page = self.workspace.active_mut();
        let redone = page.history.redo(&mut page.blocks);
        debug!(redone, remaining = page.history.redo_levels(), "Redo");
        redone
    }

    // ---- Theme & settings ----

    /// Replace the page theme with a copy of `preset`
    pub fn set_theme(&mut self, preset: ThemePreset) {
        debug!(theme = %preset.id, "Set theme");
        self.workspace.active_mut().current_theme = preset;
    }

    pub fn set_theme_by_id(&mut self, id: &str) -> BuilderResult<()> {
        let preset = find_preset(id).ok_or_else(|| BuilderError::UnknownTheme(id.to_string()))?;
        self.set_theme(preset.clone());
        Ok(())
    }

    pub fn update_theme_property(
        &mut self,
        section: ThemeSection,
        key: &str,
        value: Value,
    ) -> BuilderResult<bool> {
        let changed = self
            .workspace
            .active_mut()
            .current_theme
            .set_property(section, key, value)?;
        debug!(?section, key, changed, "Updated theme property");
        Ok(changed)
    }

    pub fn update_page_settings(&mut self, patch: PageSettingsPatch) -> bool {
        let changed = self.workspace.active_mut().page_settings.apply(patch);
        debug!(changed, "Updated page settings");
        changed
    }

    // ---- View flags ----

    pub fn set_active_panel(&mut self, panel: Option<Panel>) {
        self.view.set_active_panel(panel);
    }

    pub fn toggle_panel(&mut self, panel: Panel) {
        self.view.toggle_panel(panel);
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view.set_view(view);
    }

    pub fn toggle_preview(&mut self) {
        self.view.toggle_preview();
    }

    pub fn open_support(&mut self) {
        self.view.is_support_open = true;
    }

    pub fn close_support(&mut self) {
        self.view.is_support_open = false;
    }

    pub fn open_create_page(&mut self) {
        self.view.is_create_page_open = true;
    }

    pub fn close_create_page(&mut self) {
        self.view.is_create_page_open = false;
    }

    // ---- Pages ----

    /// Add an empty page and make it active
    #[instrument(skip(self))]
    pub fn create_page(&mut self, name: &str, slug: &str) -> PageId {
        let page = Page::new(
            PageId::generate(),
            name,
            slug,
            self.base_theme.clone(),
            self.options.history_limit,
        );
        let id = page.id.clone();

        self.workspace.add_page(page);
        self.view.set_view(ViewMode::Editor);

        info!(page_id = %id, pages = self.workspace.pages().len(), "Created page");
        id
    }

    /// Make `id` the active page; unknown ids leave everything as is
    #[instrument(skip(self), fields(from = %self.workspace.active_page_id()))]
    pub fn set_active_page(&mut self, id: &PageId) -> bool {
        if !self.workspace.switch_to(id) {
            debug!("Page switch skipped");
            return false;
        }

        self.view.set_view(ViewMode::Editor);
        info!(blocks = self.blocks().len(), "Switched page");
        true
    }

    // ---- Commands ----

    /// Dispatch a [`Mutation`] to the matching entry point
    #[instrument(skip(self, mutation), fields(op = mutation.name()))]
    pub fn apply(&mut self, mutation: Mutation) -> BuilderResult<MutationOutcome> {
        let outcome = match mutation {
            Mutation::AddBlock { kind } => MutationOutcome::block(self.add_block(kind)?),
            Mutation::UpdateBlock { id, content } => {
                MutationOutcome::changed(self.update_block(&id, &content)?)
            }
            Mutation::RemoveBlock { id } => MutationOutcome::changed(self.remove_block(&id)),
            Mutation::ResizeBlock { id, variant } => {
                MutationOutcome::changed(self.resize_block(&id, variant))
            }
            Mutation::UpdateLayout { layout } => {
                MutationOutcome::changed(self.update_layout(&layout))
            }
            Mutation::ReorderBlocks { blocks } => {
                MutationOutcome::changed(self.reorder_blocks(blocks)?)
            }
            Mutation::Undo => MutationOutcome::changed(self.undo()),
            Mutation::Redo => MutationOutcome::changed(self.redo()),
            Mutation::SetTheme { theme } => {
                let changed = *self.current_theme() != theme;
                self.set_theme(theme);
                MutationOutcome::changed(changed)
            }
            Mutation::SetThemeById { id } => {
                let before = self.current_theme().clone();
                self.set_theme_by_id(&id)?;
                MutationOutcome::changed(*self.current_theme() != before)
            }
            Mutation::UpdateThemeProperty { section, key, value } => {
                MutationOutcome::changed(self.update_theme_property(section, &key, value)?)
            }
            Mutation::UpdatePageSettings { settings } => {
                MutationOutcome::changed(self.update_page_settings(settings))
            }
            other => self.apply_view_or_page(other),
        };

        Ok(outcome)
    }

    fn apply_view_or_page(&mut self, mutation: Mutation) -> MutationOutcome {
        let before = self.view.clone();

        match mutation {
            Mutation::SetActivePanel { panel } => self.set_active_panel(panel),
            Mutation::TogglePanel { panel } => self.toggle_panel(panel),
            Mutation::SetView { view } => self.set_view(view),
            Mutation::TogglePreview => self.toggle_preview(),
            Mutation::OpenSupport => self.open_support(),
            Mutation::CloseSupport => self.close_support(),
            Mutation::OpenCreatePage => self.open_create_page(),
            Mutation::CloseCreatePage => self.close_create_page(),
            Mutation::CreatePage { name, slug } => {
                return MutationOutcome::page(self.create_page(&name, &slug));
            }
            Mutation::SetActivePage { id } => {
                return MutationOutcome::changed(self.set_active_page(&id));
            }
            _ => return MutationOutcome::default(),
        }

        MutationOutcome::changed(self.view != before)
    }
}

impl Default for BuilderStore {
    fn default() -> Self {
        Self::new()
    }
}
