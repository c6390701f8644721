//! # Linq Builder
//!
//! State core of the link-in-bio page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ views / grid engine (host)                  │
//! └─────────────────────────────────────────────┘
//!          ↓ entry points / Mutation    ↑ reads
//! ┌─────────────────────────────────────────────┐
//! │ store: BuilderStore                         │
//! │  - Workspace: pages, active page            │
//! │  - ViewState: panel, view mode, preview     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ page: blocks + theme + settings + history   │
//! │  - collection / patch: content edits        │
//! │  - layout: grid reconciliation              │
//! │  - history: snapshot undo/redo              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Typed content**: one payload struct per block type, no loose maps
//! 2. **Snapshot history**: block edits record the full pre-edit collection
//! 3. **Silent no-ops**: unknown ids and empty stacks change nothing
//! 4. **Host owns packing**: the grid engine resolves rows via [`Compactor`]
//!
//! ## Usage
//!
//! ```rust
//! use linq_builder::{BlockKind, BuilderStore, ContentPatch, SizeVariant};
//!
//! let mut store = BuilderStore::new();
//!
//! let id = store.add_block(BlockKind::Link)?;
//! store.update_block(&id, &ContentPatch::new().set("url", "https://example.com"))?;
//! store.resize_block(&id, SizeVariant::Hero);
//!
//! store.undo();
//! assert_eq!(store.blocks()[0].layout.h, 1);
//!
//! let shop = store.create_page("Shop", "shop");
//! assert!(store.blocks().is_empty());
//! assert_eq!(store.active_page_id(), &shop);
//! # Ok::<(), linq_builder::BuilderError>(())
//! ```

mod analytics;
mod block;
mod collection;
mod errors;
mod history;
mod layout;
mod mutations;
mod page;
mod patch;
mod settings;
mod store;
mod theme;
mod view;

pub use analytics::{format_ctr, AnalyticsStats, DailyStats, LinkClicks};
pub use block::{
    Block, BlockContent, BlockFields, BlockId, BlockKind, CalendlyFields, CommerceFields,
    ContactFields, EmbedFields, GalleryFields, GalleryImage, GalleryStyle, HeaderFields,
    ImageFields, LinkFields, MapFields, MediaFields, NewsletterFields, SizeVariant, SocialLink,
    SocialPlatform, SocialsFields, TextFields, TimerFields, GRID_COLUMNS,
};
pub use collection::BlockCollection;
pub use errors::{BuilderError, BuilderResult};
pub use history::{History, DEFAULT_HISTORY_LIMIT};
pub use layout::{
    apply_layout_delta, layout_delta_changes, BottomAppend, Compactor, LayoutItem, LayoutRect,
};
pub use mutations::{Mutation, MutationOutcome};
pub use page::{suggest_slug, Page, PageId, Workspace};
pub use patch::ContentPatch;
pub use settings::{PageSettings, PageSettingsPatch};
pub use store::{BuilderStore, StoreOptions, WorkspaceSnapshot};
pub use theme::{
    default_theme, find_preset, presets, ThemeColors, ThemeFamily, ThemePreset, ThemeSection,
    ThemeStyles, DEFAULT_THEME_ID,
};
pub use view::{Panel, ViewMode, ViewState};
