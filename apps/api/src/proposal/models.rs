use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_BACKGROUND_COLOR: &str = "#1f2937";
pub const DEFAULT_TEXT_COLOR: &str = "#f9fafb";

/// Layout tag a renderer uses to pick a slide design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideTemplate {
    Title,
    Content,
    Bullets,
    Image,
}

impl SlideTemplate {
    /// Exact, case-sensitive match against the wire names.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "title" => Some(Self::Title),
            "content" => Some(Self::Content),
            "bullets" => Some(Self::Bullets),
            "image" => Some(Self::Image),
            _ => None,
        }
    }

    /// Template used when the model omits one: the opening slide is a title slide.
    pub fn positional_default(index: usize) -> Self {
        if index == 0 {
            Self::Title
        } else {
            Self::Content
        }
    }
}

/// A single renderable slide. Every field is always populated and valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub bullet_points: Vec<String>,
    pub template: SlideTemplate,
    pub background_color: String,
    pub text_color: String,
}

impl Slide {
    /// A slide with a fresh id and the default colour pair.
    pub fn new(title: impl Into<String>, content: impl Into<String>, template: SlideTemplate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            bullet_points: Vec::new(),
            template,
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
        }
    }
}

/// Request body for `POST /api/proposals/generate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRequest {
    pub description: Option<String>,
    pub extracted_text: Option<String>,
    pub customization: Option<Customization>,
}

/// Caller-supplied styling hints. Validated at the boundary but not required
/// to produce output; the model picks colours from the context instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
