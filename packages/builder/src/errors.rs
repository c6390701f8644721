//! Error types for the builder

use thiserror::Error;

use crate::block::BlockId;

#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidPatch { field: String, reason: String },

    #[error("Block type cannot be changed by a content patch")]
    KindImmutable,

    #[error("Duplicate block id: {0}")]
    DuplicateBlockId(BlockId),

    #[error("Layout id {layout_id} does not match block id {id}")]
    LayoutMismatch { id: BlockId, layout_id: BlockId },

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Unknown block type: {0}")]
    UnknownBlockKind(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type BuilderResult<T> = Result<T, BuilderError>;
