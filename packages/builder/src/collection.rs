//! Ordered block collection owned by a page.
//!
//! Insertion order is the display fallback; visual order comes from the grid
//! rows. Every id appears once and every `layout.i` mirrors its block id.

use std::collections::HashSet;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockId};
use crate::errors::{BuilderError, BuilderResult};
use crate::layout::LayoutRect;
use crate::patch::ContentPatch;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Block>", into = "Vec<Block>")]
pub struct BlockCollection(Vec<Block>);

impl BlockCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection, rejecting duplicate ids and detached layouts
    pub fn from_blocks(blocks: Vec<Block>) -> BuilderResult<Self> {
        let mut seen = HashSet::with_capacity(blocks.len());
        for block in &blocks {
            if block.layout.i != block.id {
                return Err(BuilderError::LayoutMismatch {
                    id: block.id.clone(),
                    layout_id: block.layout.i.clone(),
                });
            }
            if !seen.insert(&block.id) {
                return Err(BuilderError::DuplicateBlockId(block.id.clone()));
            }
        }
        Ok(Self(blocks))
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.0.iter().find(|block| &block.id == id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &BlockId> {
        self.0.iter().map(|block| &block.id)
    }

    pub fn layouts(&self) -> Vec<LayoutRect> {
        self.0.iter().map(|block| block.layout.clone()).collect()
    }

    pub fn into_vec(self) -> Vec<Block> {
        self.0
    }

    /// Append a freshly created block.
    ///
    /// Ids come from [`BlockId::generate`], so a clash means the caller built
    /// the block by hand; it is refused.
    pub(crate) fn push(&mut self, block: Block) -> BuilderResult<()> {
        if self.contains(&block.id) {
            return Err(BuilderError::DuplicateBlockId(block.id));
        }
        self.0.push(block);
        Ok(())
    }

    pub(crate) fn get_mut(&mut self, id: &BlockId) -> Option<&mut Block> {
        self.0.iter_mut().find(|block| &block.id == id)
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Block> {
        self.0.iter_mut()
    }

    /// Shallow-merge `patch` into the content of block `id`.
    ///
    /// Returns `Ok(false)` when the block does not exist or the patch leaves
    /// the content as it was. Layout, id and every other block are untouched.
    pub fn update_content(&mut self, id: &BlockId, patch: &ContentPatch) -> BuilderResult<bool> {
        let Some(block) = self.get_mut(id) else {
            return Ok(false);
        };

        let merged = patch.merge_into(&block.content)?;
        if merged == block.content {
            return Ok(false);
        }
        block.content = merged;
        Ok(true)
    }

    /// Drop block `id`, returning it if it was present
    pub fn remove(&mut self, id: &BlockId) -> Option<Block> {
        let index = self.0.iter().position(|block| &block.id == id)?;
        Some(self.0.remove(index))
    }
}

impl Deref for BlockCollection {
    type Target = [Block];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a BlockCollection {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl TryFrom<Vec<Block>> for BlockCollection {
    type Error = BuilderError;

    fn try_from(blocks: Vec<Block>) -> Result<Self, Self::Error> {
        Self::from_blocks(blocks)
    }
}

impl From<BlockCollection> for Vec<Block> {
    fn from(collection: BlockCollection) -> Self {
        collection.0
    }
}
