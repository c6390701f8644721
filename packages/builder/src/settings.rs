//! Publishing metadata for a page.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSettings {
    // Identity
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,

    // SEO & social
    pub seo_title: String,
    pub seo_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_image: Option<String>,

    // Integrations & compliance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_analytics_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_pixel_id: Option<String>,
    pub cookie_banner: bool,
}

impl PageSettings {
    /// Default settings seeded with `slug`
    pub fn with_slug(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Self::default()
        }
    }

    /// Apply every field present in `patch`; returns whether anything changed
    pub fn apply(&mut self, patch: PageSettingsPatch) -> bool {
        let before = self.clone();

        if let Some(slug) = patch.slug {
            self.slug = slug;
        }
        if let Some(custom_domain) = patch.custom_domain {
            self.custom_domain = custom_domain;
        }
        if let Some(favicon) = patch.favicon {
            self.favicon = favicon;
        }
        if let Some(seo_title) = patch.seo_title {
            self.seo_title = seo_title;
        }
        if let Some(seo_description) = patch.seo_description {
            self.seo_description = seo_description;
        }
        if let Some(social_image) = patch.social_image {
            self.social_image = social_image;
        }
        if let Some(google_analytics_id) = patch.google_analytics_id {
            self.google_analytics_id = google_analytics_id;
        }
        if let Some(meta_pixel_id) = patch.meta_pixel_id {
            self.meta_pixel_id = meta_pixel_id;
        }
        if let Some(cookie_banner) = patch.cookie_banner {
            self.cookie_banner = cookie_banner;
        }

        *self != before
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            slug: "my-page".to_string(),
            custom_domain: None,
            favicon: None,
            seo_title: "My Linq Page".to_string(),
            seo_description: "Welcome to my page".to_string(),
            social_image: None,
            google_analytics_id: None,
            meta_pixel_id: None,
            cookie_banner: true,
        }
    }
}

/// Partial settings update.
///
/// Optional settings take `Some(None)` to clear them; in JSON an explicit
/// `null` clears and an absent key leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub custom_domain: Option<Option<String>>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub favicon: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub social_image: Option<Option<String>>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub google_analytics_id: Option<Option<String>>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub meta_pixel_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_banner: Option<bool>,
}

/// Distinguishes a missing key from an explicit `null`
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
