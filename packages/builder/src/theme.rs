//! # Theme Model
//!
//! Read-only preset catalog plus the mutable theme value a page carries.
//! Overrides land on the page's copy; presets never change.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{BuilderError, BuilderResult};

/// Id of the preset new pages start with
pub const DEFAULT_THEME_ID: &str = "clean";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeFamily {
    Modern,
    Retro,
    Minimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    /// Page background
    pub background: String,
    pub text: String,
    /// Block background
    pub card: String,
    /// Buttons and accents
    pub primary: String,
    pub border: String,
    /// Ad-hoc overrides such as `blockLabelColor`
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeStyles {
    /// CSS font stack
    pub font_family: String,
    pub border_radius: String,
    pub border_width: String,
    /// CSS box-shadow
    pub shadow: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Which half of a theme a property override targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSection {
    Colors,
    Styles,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemePreset {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub family: ThemeFamily,
    pub colors: ThemeColors,
    pub styles: ThemeStyles,
}

impl ThemePreset {
    /// Override one property of the page's theme copy.
    ///
    /// `null` removes an extra key; known keys must keep a string value.
    /// Returns whether the theme changed.
    pub fn set_property(
        &mut self,
        section: ThemeSection,
        key: &str,
        value: Value,
    ) -> BuilderResult<bool> {
        match section {
            ThemeSection::Colors => set_field(&mut self.colors, key, value),
            ThemeSection::Styles => set_field(&mut self.styles, key, value),
        }
    }
}

fn set_field<T>(target: &mut T, key: &str, value: Value) -> BuilderResult<bool>
where
    T: Serialize + DeserializeOwned + PartialEq,
{
    let mut fields = match serde_json::to_value(&*target)? {
        Value::Object(map) => map,
        other => {
            return Err(BuilderError::InvalidPatch {
                field: key.to_string(),
                reason: format!("theme section serialized as {}", other),
            })
        }
    };

    if value.is_null() {
        fields.remove(key);
    } else {
        fields.insert(key.to_string(), value);
    }

    let updated: T = serde_json::from_value(Value::Object(fields)).map_err(|e| {
        BuilderError::InvalidPatch {
            field: key.to_string(),
            reason: e.to_string(),
        }
    })?;

    if updated == *target {
        return Ok(false);
    }
    *target = updated;
    Ok(true)
}

fn preset(
    id: &str,
    name: &str,
    family: ThemeFamily,
    colors: [&str; 5],
    styles: [&str; 4],
) -> ThemePreset {
    let [background, text, card, primary, border] = colors.map(str::to_string);
    let [font_family, border_radius, border_width, shadow] = styles.map(str::to_string);

    ThemePreset {
        id: id.to_string(),
        name: name.to_string(),
        family,
        colors: ThemeColors {
            background,
            text,
            card,
            primary,
            border,
            extra: BTreeMap::new(),
        },
        styles: ThemeStyles {
            font_family,
            border_radius,
            border_width,
            shadow,
            extra: BTreeMap::new(),
        },
    }
}

/// The preset catalog, in display order
pub fn presets() -> &'static [ThemePreset] {
    static PRESETS: OnceLock<Vec<ThemePreset>> = OnceLock::new();
    PRESETS.get_or_init(|| {
        vec![
            preset(
                DEFAULT_THEME_ID,
                "Clean",
                ThemeFamily::Modern,
                ["#ffffff", "#0f172a", "#ffffff", "#000000", "#e2e8f0"],
                [
                    "Inter, sans-serif",
                    "0.75rem",
                    "1px",
                    "0 1px 2px 0 rgb(0 0 0 / 0.05)",
                ],
            ),
            preset(
                "retro-pop",
                "Retro Pop",
                ThemeFamily::Retro,
                ["#FEFCE8", "#000000", "#FFFFFF", "#FACC15", "#000000"],
                [
                    "\"Space Mono\", monospace",
                    "0px",
                    "2px",
                    "4px 4px 0px 0px #000000",
                ],
            ),
        ]
    })
}

pub fn find_preset(id: &str) -> Option<&'static ThemePreset> {
    presets().iter().find(|preset| preset.id == id)
}

/// Copy of the preset new pages start with (first in the catalog)
pub fn default_theme() -> ThemePreset {
    presets()[0].clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog() {
        assert_eq!(presets().len(), 2);
        assert_eq!(default_theme().id, "clean");
        assert_eq!(find_preset("retro-pop").unwrap().family, ThemeFamily::Retro);
        assert!(find_preset("neon").is_none());
    }

    #[test]
    fn test_override_leaves_preset_untouched() {
        let mut theme = default_theme();
        let changed = theme
            .set_property(ThemeSection::Styles, "borderRadius", json!("0px"))
            .unwrap();

        assert!(changed);
        assert_eq!(theme.styles.border_radius, "0px");
        assert_eq!(find_preset("clean").unwrap().styles.border_radius, "0.75rem");
    }

    #[test]
    fn test_extra_keys_and_null_removal() {
        let mut theme = default_theme();
        theme
            .set_property(ThemeSection::Styles, "blockLabelColor", json!("#64748b"))
            .unwrap();
        assert_eq!(theme.styles.extra["blockLabelColor"], json!("#64748b"));

        let json = serde_json::to_value(&theme).unwrap();
        assert_eq!(json["styles"]["blockLabelColor"], "#64748b");
        assert_eq!(json["type"], "modern");

        let removed = theme
            .set_property(ThemeSection::Styles, "blockLabelColor", Value::Null)
            .unwrap();
        assert!(removed);
        assert!(theme.styles.extra.is_empty());
    }

    #[test]
    fn test_known_key_keeps_its_type() {
        let mut theme = default_theme();
        let result = theme.set_property(ThemeSection::Colors, "text", json!(12));
        assert!(matches!(result, Err(BuilderError::InvalidPatch { .. })));

        let result = theme.set_property(ThemeSection::Colors, "text", Value::Null);
        assert!(result.is_err());
        assert_eq!(theme, default_theme());
    }

    #[test]
    fn test_same_value_reports_unchanged() {
        let mut theme = default_theme();
        let changed = theme
            .set_property(ThemeSection::Colors, "primary", json!("#000000"))
            .unwrap();
        assert!(!changed);
    }
}
