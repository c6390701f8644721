//! # Partial Content Updates
//!
//! A [`ContentPatch`] is a flat JSON object shallow-merged into a block's
//! content. Keys may name shared fields (`isActive`, `variant`, `title`) or
//! fields of the block's own type (`targetDate`, `images`, ...). Each merged
//! key must still deserialize into the typed model; unknown keys are dropped.
//!
//! ```rust
//! use linq_builder::ContentPatch;
//!
//! let patch = ContentPatch::new()
//!     .set("title", "My Portfolio")
//!     .set("url", "https://example.com");
//! assert_eq!(patch.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::block::BlockContent;
use crate::errors::{BuilderError, BuilderResult};

const TYPE_KEY: &str = "type";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentPatch(Map<String, Value>);

impl ContentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for toggling visibility
    pub fn active(is_active: bool) -> Self {
        Self::new().set("isActive", is_active)
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Merge into `content`, returning the new content value.
    ///
    /// Fails without side effects if a key would change the block type or
    /// carries a value of the wrong shape.
    pub fn merge_into(&self, content: &BlockContent) -> BuilderResult<BlockContent> {
        let kind = content.fields.kind();
        let mut merged = match serde_json::to_value(content)? {
            Value::Object(map) => map,
            other => {
                return Err(BuilderError::InvalidPatch {
                    field: TYPE_KEY.to_string(),
                    reason: format!("content serialized as {}", other),
                })
            }
        };

        for (key, value) in &self.0 {
            if key == TYPE_KEY {
                if value.as_str() != Some(kind.as_str()) {
                    return Err(BuilderError::KindImmutable);
                }
                continue;
            }

            merged.insert(key.clone(), value.clone());
            check_field(&merged, key)?;
        }

        Ok(serde_json::from_value(Value::Object(merged))?)
    }
}

fn check_field(merged: &Map<String, Value>, key: &str) -> BuilderResult<()> {
    serde_json::from_value::<BlockContent>(Value::Object(merged.clone()))
        .map(|_| ())
        .map_err(|e| BuilderError::InvalidPatch {
            field: key.to_string(),
            reason: e.to_string(),
        })
}

impl From<Map<String, Value>> for ContentPatch {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockFields, BlockKind, SizeVariant};
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_merge_shared_field_only() {
        let content = BlockContent::defaults(BlockKind::Text, Utc::now());
        let merged = ContentPatch::active(false).merge_into(&content).unwrap();

        assert!(!merged.is_active);
        assert_eq!(merged.variant, content.variant);
        assert_eq!(merged.title, content.title);
        assert_eq!(merged.fields, content.fields);
    }

    #[test]
    fn test_merge_type_specific_field() {
        let content = BlockContent::defaults(BlockKind::Commerce, Utc::now());
        let patch = ContentPatch::new().set("price", "25.00").set("variant", "wide");
        let merged = patch.merge_into(&content).unwrap();

        assert_eq!(merged.variant, SizeVariant::Wide);
        match merged.fields {
            BlockFields::Commerce(c) => {
                assert_eq!(c.price, "25.00");
                assert_eq!(c.currency, "$");
            }
            other => panic!("expected commerce fields, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_rejects_type_change() {
        let content = BlockContent::defaults(BlockKind::Link, Utc::now());
        let patch = ContentPatch::new().set("type", "video");
        assert!(matches!(
            patch.merge_into(&content),
            Err(BuilderError::KindImmutable)
        ));

        // Restating the same type is harmless
        let same = ContentPatch::new().set("type", "link");
        assert!(same.merge_into(&content).is_ok());
    }

    #[test]
    fn test_merge_rejects_wrong_shape() {
        let content = BlockContent::defaults(BlockKind::Gallery, Utc::now());
        let patch = ContentPatch::new().set("images", "not-a-list");

        match patch.merge_into(&content) {
            Err(BuilderError::InvalidPatch { field, .. }) => assert_eq!(field, "images"),
            other => panic!("expected InvalidPatch, got {:?}", other),
        }
    }

    #[test]
    fn test_null_clears_optional_field() {
        let content = BlockContent::defaults(BlockKind::Link, Utc::now());
        let with_icon = ContentPatch::new()
            .set("icon", "star")
            .merge_into(&content)
            .unwrap();
        let cleared = ContentPatch::new()
            .set("icon", json!(null))
            .merge_into(&with_icon)
            .unwrap();

        assert_eq!(cleared, content);
    }
}
