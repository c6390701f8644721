//! # Builder Mutations
//!
//! Serializable form of every store entry point, so edits can be recorded,
//! sent around and replayed.
//!
//! ## Semantics
//!
//! - Block edits (`addBlock`, `updateBlock`, `removeBlock`, `resizeBlock`,
//!   `updateLayout`, `reorderBlocks`) record one undo step and clear redo;
//!   edits of unknown ids and layouts that move nothing record nothing
//! - `undo`/`redo` move through that history and never record steps
//! - Theme, settings and view mutations are not undoable
//! - Unknown block or page ids are no-ops, reported as `changed: false`
//!
//! ## Wire format
//!
//! ```json
//! [
//!   { "op": "addBlock", "type": "timer" },
//!   { "op": "togglePanel", "panel": "themes" },
//!   { "op": "undo" }
//! ]
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::block::{Block, BlockId, BlockKind, SizeVariant};
use crate::layout::LayoutItem;
use crate::page::PageId;
use crate::patch::ContentPatch;
use crate::settings::PageSettingsPatch;
use crate::theme::{ThemePreset, ThemeSection};
use crate::view::{Panel, ViewMode};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    /// Append a default block of the given type
    AddBlock {
        #[serde(rename = "type")]
        kind: BlockKind,
    },

    /// Shallow-merge content fields into a block
    UpdateBlock { id: BlockId, content: ContentPatch },

    RemoveBlock { id: BlockId },

    /// Change size class and grid span together
    ResizeBlock { id: BlockId, variant: SizeVariant },

    /// Positions reported by the grid engine after a drag
    UpdateLayout { layout: Vec<LayoutItem> },

    /// Replace the whole collection
    ReorderBlocks { blocks: Vec<Block> },

    Undo,
    Redo,

    SetTheme { theme: ThemePreset },
    SetThemeById { id: String },
    UpdateThemeProperty {
        section: ThemeSection,
        key: String,
        value: Value,
    },

    UpdatePageSettings { settings: PageSettingsPatch },

    SetActivePanel { panel: Option<Panel> },
    TogglePanel { panel: Panel },
    SetView { view: ViewMode },
    TogglePreview,
    OpenSupport,
    CloseSupport,
    OpenCreatePage,
    CloseCreatePage,

    CreatePage { name: String, slug: String },
    SetActivePage { id: PageId },
}

impl Mutation {
    /// Operation name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddBlock { .. } => "addBlock",
            Mutation::UpdateBlock { .. } => "updateBlock",
            Mutation::RemoveBlock { .. } => "removeBlock",
            Mutation::ResizeBlock { .. } => "resizeBlock",
            Mutation::UpdateLayout { .. } => "updateLayout",
            Mutation::ReorderBlocks { .. } => "reorderBlocks",
            Mutation::Undo => "undo",
            Mutation::Redo => "redo",
            Mutation::SetTheme { .. } => "setTheme",
            Mutation::SetThemeById { .. } => "setThemeById",
            Mutation::UpdateThemeProperty { .. } => "updateThemeProperty",
            Mutation::UpdatePageSettings { .. } => "updatePageSettings",
            Mutation::SetActivePanel { .. } => "setActivePanel",
            Mutation::TogglePanel { .. } => "togglePanel",
            Mutation::SetView { .. } => "setView",
            Mutation::TogglePreview => "togglePreview",
            Mutation::OpenSupport => "openSupport",
            Mutation::CloseSupport => "closeSupport",
            Mutation::OpenCreatePage => "openCreatePage",
            Mutation::CloseCreatePage => "closeCreatePage",
            Mutation::CreatePage { .. } => "createPage",
            Mutation::SetActivePage { .. } => "setActivePage",
        }
    }

    /// Whether this mutation can add an undo step
    pub fn is_undoable(&self) -> bool {
        matches!(
            self,
            Mutation::AddBlock { .. }
                | Mutation::UpdateBlock { .. }
                | Mutation::RemoveBlock { .. }
                | Mutation::ResizeBlock { .. }
                | Mutation::UpdateLayout { .. }
                | Mutation::ReorderBlocks { .. }
        )
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationOutcome {
    /// Whether any state changed
    pub changed: bool,

    /// Id of the block created by `addBlock`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<BlockId>,

    /// Id of the page created by `createPage`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<PageId>,
}

impl MutationOutcome {
    pub fn changed(changed: bool) -> Self {
        Self {
            changed,
            ..Self::default()
        }
    }

    pub fn block(id: BlockId) -> Self {
        Self {
            changed: true,
            block_id: Some(id),
            page_id: None,
        }
    }

    pub fn page(id: PageId) -> Self {
        Self {
            changed: true,
            block_id: None,
            page_id: Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::UpdateBlock {
            id: BlockId::new("block-123"),
            content: ContentPatch::new().set("title", "Hello World"),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_wire_format() {
        let script = r#"[
            { "op": "addBlock", "type": "timer" },
            { "op": "togglePanel", "panel": "themes" },
            { "op": "setActivePanel", "panel": null },
            { "op": "updateLayout", "layout": [{ "i": "a", "x": 0, "y": 2, "w": 6, "h": 1 }] },
            { "op": "undo" }
        ]"#;

        let mutations: Vec<Mutation> = serde_json::from_str(script).unwrap();

        assert_eq!(mutations[0], Mutation::AddBlock { kind: BlockKind::Timer });
        assert_eq!(mutations[1], Mutation::TogglePanel { panel: Panel::Themes });
        assert_eq!(mutations[2], Mutation::SetActivePanel { panel: None });
        assert_eq!(mutations[3].name(), "updateLayout");
        assert_eq!(mutations[4], Mutation::Undo);
    }

    #[test]
    fn test_undoable_classification() {
        assert!(Mutation::RemoveBlock { id: BlockId::new("x") }.is_undoable());
        assert!(!Mutation::Undo.is_undoable());
        assert!(!Mutation::TogglePreview.is_undoable());
    }
}
