//! # Layout Reconciler
//!
//! The grid engine owns block positions while the user drags; it reports the
//! result as a list of `{i, x, y, w, h}` items. This module merges those items
//! back into the block collection, touching only the coordinates of matched
//! blocks.
//!
//! Packing blocks into rows is NOT done here. New blocks carry an unplaced
//! row (`y: None`) and a [`Compactor`] supplied by the host resolves it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::block::BlockId;
use crate::collection::BlockCollection;

/// Grid rectangle stored on a block. `i` always mirrors the block id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRect {
    pub i: BlockId,
    pub x: u32,
    /// `None` means "below the last occupied row", resolved by compaction
    pub y: Option<u32>,
    pub w: u32,
    pub h: u32,
}

impl LayoutRect {
    /// Rectangle for a block appended at the bottom of the grid
    pub fn appended(i: BlockId, w: u32, h: u32) -> Self {
        Self { i, x: 0, y: None, w, h }
    }

    pub fn is_placed(&self) -> bool {
        self.y.is_some()
    }

    /// First row below this rectangle (0 when unplaced), clamped at `u32::MAX`
    pub fn bottom(&self) -> u32 {
        self.y.map(|y| y.saturating_add(self.h)).unwrap_or(0)
    }

    fn matches(&self, item: &LayoutItem) -> bool {
        self.x == item.x && self.y == Some(item.y) && self.w == item.w && self.h == item.h
    }
}

/// One entry of a layout-change event from the grid engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutItem {
    pub i: BlockId,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl LayoutItem {
    pub fn new(i: impl Into<BlockId>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { i: i.into(), x, y, w, h }
    }
}

impl From<&LayoutRect> for LayoutItem {
    fn from(rect: &LayoutRect) -> Self {
        Self {
            i: rect.i.clone(),
            x: rect.x,
            y: rect.y.unwrap_or(0),
            w: rect.w,
            h: rect.h,
        }
    }
}

fn index_items(items: &[LayoutItem]) -> HashMap<&BlockId, &LayoutItem> {
    items.iter().map(|item| (&item.i, item)).collect()
}

/// Whether applying `items` would move or resize at least one block
pub fn layout_delta_changes(blocks: &BlockCollection, items: &[LayoutItem]) -> bool {
    let by_id = index_items(items);
    blocks.iter().any(|block| {
        by_id
            .get(&block.id)
            .is_some_and(|item| !block.layout.matches(item))
    })
}

/// Copy `x, y, w, h` from matching items onto the blocks.
///
/// Blocks without an item and items without a block are ignored. Returns the
/// number of blocks whose rectangle changed.
pub fn apply_layout_delta(blocks: &mut BlockCollection, items: &[LayoutItem]) -> usize {
    let by_id = index_items(items);
    let mut changed = 0;

    for block in blocks.iter_mut() {
        let Some(item) = by_id.get(&block.id) else {
            continue;
        };
        if block.layout.matches(item) {
            continue;
        }

        block.layout.x = item.x;
        block.layout.y = Some(item.y);
        block.layout.w = item.w;
        block.layout.h = item.h;
        changed += 1;
    }

    changed
}

/// Vertical compaction step, owned by whichever grid engine hosts the canvas
pub trait Compactor {
    /// Produce concrete placements for the given rectangles, in any order
    fn compact(&self, layout: &[LayoutRect]) -> Vec<LayoutItem>;
}

/// Minimal compactor: keeps placed blocks where they are and stacks unplaced
/// ones, in collection order, under the lowest occupied row.
#[derive(Debug, Default, Clone, Copy)]
pub struct BottomAppend;

impl Compactor for BottomAppend {
    fn compact(&self, layout: &[LayoutRect]) -> Vec<LayoutItem> {
        let mut next_row = layout.iter().map(LayoutRect::bottom).max().unwrap_or(0);

        layout
            .iter()
            .map(|rect| match rect.y {
                Some(_) => LayoutItem::from(rect),
                None => {
                    let item = LayoutItem::new(rect.i.clone(), rect.x, next_row, rect.w, rect.h);
                    next_row = next_row.saturating_add(rect.h);
                    item
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, BlockKind};

    fn placed(kind: BlockKind, y: u32) -> Block {
        let mut block = Block::new(kind);
        block.layout.y = Some(y);
        block
    }

    #[test]
    fn test_apply_only_touches_coordinates() {
        let mut blocks = BlockCollection::from_blocks(vec![
            placed(BlockKind::Link, 0),
            placed(BlockKind::Text, 1),
        ])
        .unwrap();
        let before = blocks.clone();
        let moved = blocks[0].id.clone();

        let changed = apply_layout_delta(&mut blocks, &[LayoutItem::new(moved.clone(), 2, 3, 4, 2)]);

        assert_eq!(changed, 1);
        assert_eq!(blocks[0].layout.x, 2);
        assert_eq!(blocks[0].layout.y, Some(3));
        assert_eq!(blocks[0].layout.i, moved);
        assert_eq!(blocks[0].content, before[0].content);
        assert_eq!(blocks[1], before[1]);
    }

    #[test]
    fn test_unknown_items_are_ignored() {
        let mut blocks = BlockCollection::from_blocks(vec![placed(BlockKind::Link, 0)]).unwrap();
        let before = blocks.clone();

        let items = [LayoutItem::new("ghost", 0, 0, 1, 1)];
        assert!(!layout_delta_changes(&blocks, &items));
        assert_eq!(apply_layout_delta(&mut blocks, &items), 0);
        assert_eq!(blocks, before);
    }

    #[test]
    fn test_identical_items_report_no_change() {
        let blocks = BlockCollection::from_blocks(vec![placed(BlockKind::Link, 4)]).unwrap();
        let items: Vec<LayoutItem> = blocks.iter().map(|b| LayoutItem::from(&b.layout)).collect();
        assert!(!layout_delta_changes(&blocks, &items));
    }

    #[test]
    fn test_bottom_append_places_unplaced_rows() {
        let a = placed(BlockKind::Header, 0); // rows 0..4
        let b = Block::new(BlockKind::Link);
        let c = Block::new(BlockKind::Timer);
        let layout = vec![a.layout.clone(), b.layout.clone(), c.layout.clone()];

        let items = BottomAppend.compact(&layout);

        assert_eq!(items[0].y, 0);
        assert_eq!(items[1].y, 4);
        assert_eq!(items[2].y, 5);
    }

    #[test]
    fn test_bottom_append_clamps_at_last_row() {
        let a = placed(BlockKind::Calendly, u32::MAX - 1);
        let b = Block::new(BlockKind::Text);
        let c = Block::new(BlockKind::Link);
        assert_eq!(a.layout.bottom(), u32::MAX);

        let items = BottomAppend.compact(&[a.layout.clone(), b.layout.clone(), c.layout.clone()]);

        assert_eq!(items[0].y, u32::MAX - 1);
        assert_eq!(items[1].y, u32::MAX);
        assert_eq!(items[2].y, u32::MAX);
    }
}
