//! # Block Entity Model
//!
//! One placeable content unit on the canvas: an id, a typed content payload
//! and the grid rectangle it occupies.
//!
//! ## Content shape
//!
//! Every block shares `isActive`, `variant` and `title`. The remaining fields
//! depend on the block type and live in [`BlockFields`], one struct per type.
//! The `type` tag is serialized next to the shared fields so the content of a
//! timer block looks like:
//!
//! ```json
//! {
//!   "isActive": true,
//!   "variant": "classic",
//!   "title": "Countdown",
//!   "type": "timer",
//!   "targetDate": "2026-10-17T09:00:00Z",
//!   "timerLabel": "Launching in:"
//! }
//! ```
//!
//! ## Sizing
//!
//! New blocks span the full 6-column row. Height depends on the type (see
//! [`BlockKind::default_height`]). Picking a size class later remaps both
//! dimensions through [`SizeVariant::dimensions`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BuilderError;
use crate::layout::LayoutRect;

/// Columns of the desktop grid breakpoint
pub const GRID_COLUMNS: u32 = 6;

/// How far in the future a fresh countdown points
const TIMER_DEFAULT_HOURS: i64 = 24;

/// Opaque block identifier, stable for the block's lifetime
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Allocate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Closed set of block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Link,
    Header,
    Video,
    Audio,
    Image,
    Newsletter,
    Gallery,
    Timer,
    Text,
    Map,
    Socials,
    Contact,
    Calendly,
    Embed,
    Commerce,
}

impl BlockKind {
    pub const ALL: [BlockKind; 15] = [
        BlockKind::Link,
        BlockKind::Header,
        BlockKind::Video,
        BlockKind::Audio,
        BlockKind::Image,
        BlockKind::Newsletter,
        BlockKind::Gallery,
        BlockKind::Timer,
        BlockKind::Text,
        BlockKind::Map,
        BlockKind::Socials,
        BlockKind::Contact,
        BlockKind::Calendly,
        BlockKind::Embed,
        BlockKind::Commerce,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Link => "link",
            BlockKind::Header => "header",
            BlockKind::Video => "video",
            BlockKind::Audio => "audio",
            BlockKind::Image => "image",
            BlockKind::Newsletter => "newsletter",
            BlockKind::Gallery => "gallery",
            BlockKind::Timer => "timer",
            BlockKind::Text => "text",
            BlockKind::Map => "map",
            BlockKind::Socials => "socials",
            BlockKind::Contact => "contact",
            BlockKind::Calendly => "calendly",
            BlockKind::Embed => "embed",
            BlockKind::Commerce => "commerce",
        }
    }

    /// Grid rows a freshly added block occupies
    pub fn default_height(self) -> u32 {
        match self {
            BlockKind::Link | BlockKind::Socials => 1,
            BlockKind::Audio | BlockKind::Timer | BlockKind::Newsletter | BlockKind::Text => 2,
            BlockKind::Header
            | BlockKind::Video
            | BlockKind::Image
            | BlockKind::Gallery
            | BlockKind::Map => 4,
            BlockKind::Contact | BlockKind::Calendly | BlockKind::Embed | BlockKind::Commerce => 5,
        }
    }

    pub fn default_width(self) -> u32 {
        GRID_COLUMNS
    }

    pub fn default_variant(self) -> SizeVariant {
        match self {
            BlockKind::Gallery => SizeVariant::Wide,
            BlockKind::Calendly | BlockKind::Embed | BlockKind::Commerce => SizeVariant::Hero,
            _ => SizeVariant::Classic,
        }
    }

    pub fn default_title(self) -> &'static str {
        match self {
            BlockKind::Link | BlockKind::Image => "",
            BlockKind::Header => "Profile Header",
            BlockKind::Video => "New Video",
            BlockKind::Audio => "New Audio",
            BlockKind::Gallery => "Gallery",
            BlockKind::Timer => "Countdown",
            BlockKind::Newsletter => "Newsletter",
            BlockKind::Text => "Text Block",
            BlockKind::Map => "Map",
            BlockKind::Socials => "Social Links",
            BlockKind::Contact => "Contact Me",
            BlockKind::Calendly => "Booking",
            BlockKind::Embed => "Embed",
            BlockKind::Commerce => "Digital Product",
        }
    }

    /// Size classes the editor offers for this type.
    ///
    /// Not enforced by the store; a block may carry any variant.
    pub fn allowed_variants(self) -> &'static [SizeVariant] {
        use SizeVariant::*;
        match self {
            BlockKind::Link => &[Icon, Square, Classic, Wide, Hero],
            BlockKind::Header => &[Square, Wide, Hero, Classic],
            BlockKind::Video
            | BlockKind::Audio
            | BlockKind::Image
            | BlockKind::Gallery
            | BlockKind::Timer
            | BlockKind::Map
            | BlockKind::Embed => &[Square, Wide, Hero],
            BlockKind::Newsletter
            | BlockKind::Text
            | BlockKind::Contact
            | BlockKind::Calendly
            | BlockKind::Commerce => &[Wide, Hero],
            BlockKind::Socials => &[Wide],
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| BuilderError::UnknownBlockKind(s.to_string()))
    }
}

/// Size class of a block; drives both rendering and grid span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeVariant {
    Icon,
    Square,
    Classic,
    Wide,
    Hero,
}

impl SizeVariant {
    /// Grid span `(w, h)` for this size class.
    ///
    /// Headers get three rows in the classic bar so the avatar fits.
    pub fn dimensions(self, kind: BlockKind) -> (u32, u32) {
        match self {
            SizeVariant::Icon => (1, 2),
            SizeVariant::Square => (2, 4),
            SizeVariant::Classic if kind == BlockKind::Header => (GRID_COLUMNS, 3),
            SizeVariant::Classic => (GRID_COLUMNS, 1),
            SizeVariant::Wide => (4, 2),
            SizeVariant::Hero => (GRID_COLUMNS, 5),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SizeVariant::Icon => "icon",
            SizeVariant::Square => "square",
            SizeVariant::Classic => "classic",
            SizeVariant::Wide => "wide",
            SizeVariant::Hero => "hero",
        }
    }
}

impl fmt::Display for SizeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryStyle {
    #[default]
    Carousel,
    Accordion,
    Creative,
    Stack,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Instagram,
    Twitter,
    Linkedin,
    Github,
    Youtube,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub url: String,
}

impl SocialLink {
    pub fn new(platform: SocialPlatform, url: impl Into<String>) -> Self {
        Self {
            platform,
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkFields {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub highlight: bool,
}

/// Profile header: bio text plus avatar
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Shared by video and audio embeds
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFields {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFields {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterFields {
    pub placeholder_text: String,
    pub button_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryFields {
    #[serde(default)]
    pub gallery_type: GalleryStyle,
    #[serde(default)]
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerFields {
    pub target_date: DateTime<Utc>,
    pub timer_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFields {
    pub text_title: String,
    pub text_content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapFields {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialsFields {
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFields {
    pub contact_email: String,
    pub submit_button_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendlyFields {
    #[serde(default)]
    pub calendly_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedFields {
    #[serde(default)]
    pub embed_url: String,
}

/// Product card with an external checkout link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommerceFields {
    pub price: String,
    pub currency: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub product_url: String,
    pub button_text: String,
    #[serde(default)]
    pub description: String,
}

/// Type-specific content, tagged by the block type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockFields {
    Link(LinkFields),
    Header(HeaderFields),
    Video(MediaFields),
    Audio(MediaFields),
    Image(ImageFields),
    Newsletter(NewsletterFields),
    Gallery(GalleryFields),
    Timer(TimerFields),
    Text(TextFields),
    Map(MapFields),
    Socials(SocialsFields),
    Contact(ContactFields),
    Calendly(CalendlyFields),
    Embed(EmbedFields),
    Commerce(CommerceFields),
}

impl BlockFields {
    /// Starting content for a new block of `kind`
    pub fn defaults(kind: BlockKind, now: DateTime<Utc>) -> Self {
        match kind {
            BlockKind::Link => BlockFields::Link(LinkFields::default()),
            BlockKind::Header => BlockFields::Header(HeaderFields::default()),
            BlockKind::Video => BlockFields::Video(MediaFields::default()),
            BlockKind::Audio => BlockFields::Audio(MediaFields::default()),
            BlockKind::Image => BlockFields::Image(ImageFields::default()),
            BlockKind::Newsletter => BlockFields::Newsletter(NewsletterFields {
                placeholder_text: "email@example.com".to_string(),
                button_text: "Subscribe".to_string(),
            }),
            BlockKind::Gallery => BlockFields::Gallery(GalleryFields::default()),
            BlockKind::Timer => BlockFields::Timer(TimerFields {
                target_date: now + Duration::hours(TIMER_DEFAULT_HOURS),
                timer_label: "Launching in:".to_string(),
            }),
            BlockKind::Text => BlockFields::Text(TextFields {
                text_title: "Welcome".to_string(),
                text_content: "Add clear and concise text here.".to_string(),
            }),
            BlockKind::Map => BlockFields::Map(MapFields {
                address: "New York, NY".to_string(),
                map_url: None,
            }),
            BlockKind::Socials => BlockFields::Socials(SocialsFields {
                social_links: vec![
                    SocialLink::new(SocialPlatform::Instagram, "https://instagram.com"),
                    SocialLink::new(SocialPlatform::Twitter, "https://twitter.com"),
                ],
            }),
            BlockKind::Contact => BlockFields::Contact(ContactFields {
                contact_email: "me@example.com".to_string(),
                submit_button_text: "Send Message".to_string(),
            }),
            BlockKind::Calendly => BlockFields::Calendly(CalendlyFields::default()),
            BlockKind::Embed => BlockFields::Embed(EmbedFields::default()),
            BlockKind::Commerce => BlockFields::Commerce(CommerceFields {
                price: "10.00".to_string(),
                currency: "$".to_string(),
                image: String::new(),
                product_url: String::new(),
                button_text: "Buy Now".to_string(),
                description: "Description of your product.".to_string(),
            }),
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            BlockFields::Link(_) => BlockKind::Link,
            BlockFields::Header(_) => BlockKind::Header,
            BlockFields::Video(_) => BlockKind::Video,
            BlockFields::Audio(_) => BlockKind::Audio,
            BlockFields::Image(_) => BlockKind::Image,
            BlockFields::Newsletter(_) => BlockKind::Newsletter,
            BlockFields::Gallery(_) => BlockKind::Gallery,
            BlockFields::Timer(_) => BlockKind::Timer,
            BlockFields::Text(_) => BlockKind::Text,
            BlockFields::Map(_) => BlockKind::Map,
            BlockFields::Socials(_) => BlockKind::Socials,
            BlockFields::Contact(_) => BlockKind::Contact,
            BlockFields::Calendly(_) => BlockKind::Calendly,
            BlockFields::Embed(_) => BlockKind::Embed,
            BlockFields::Commerce(_) => BlockKind::Commerce,
        }
    }
}

/// Block content: shared flags plus the type-specific fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockContent {
    /// Hidden blocks stay on the canvas but are not published
    pub is_active: bool,
    pub variant: SizeVariant,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub fields: BlockFields,
}

impl BlockContent {
    pub fn defaults(kind: BlockKind, now: DateTime<Utc>) -> Self {
        Self {
            is_active: true,
            variant: kind.default_variant(),
            title: kind.default_title().to_string(),
            fields: BlockFields::defaults(kind, now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub content: BlockContent,
    pub layout: LayoutRect,
}

impl Block {
    /// Create a block of `kind` with default content, appended below the
    /// last occupied row
    pub fn new(kind: BlockKind) -> Self {
        Self::new_at(kind, Utc::now())
    }

    /// Same as [`Block::new`] with an explicit clock reading
    pub fn new_at(kind: BlockKind, now: DateTime<Utc>) -> Self {
        let id = BlockId::generate();
        let layout = LayoutRect::appended(
            id.clone(),
            kind.default_width(),
            kind.default_height(),
        );

        Self {
            id,
            content: BlockContent::defaults(kind, now),
            layout,
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.content.fields.kind()
    }

    /// Switch size class and remap the grid span to match.
    ///
    /// Returns `false` when nothing changed.
    pub fn resize(&mut self, variant: SizeVariant) -> bool {
        let (w, h) = variant.dimensions(self.kind());
        if self.content.variant == variant && self.layout.w == w && self.layout.h == h {
            return false;
        }

        self.content.variant = variant;
        self.layout.w = w;
        self.layout.h = h;
        true
    }
}
