//! Response Normalizer: turns a raw model reply into a validated slide deck.
//!
//! Flow: refusal check → tiered JSON extraction (direct → fenced block →
//! bracket scan) → per-slide repair. Anything that yields no JSON array goes to
//! the heuristic line-scan in `fallback`. `normalize` never fails and never
//! returns an empty deck.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::proposal::color::is_valid_hex_color;
use crate::proposal::fallback::build_fallback_slides;
use crate::proposal::models::{Slide, SlideTemplate, DEFAULT_BACKGROUND_COLOR, DEFAULT_TEXT_COLOR};
use crate::proposal::prompts::REFUSAL_MARKER;

const PLACEHOLDER_TITLE: &str = "Generated Proposal";
const PLACEHOLDER_CONTENT: &str = "Proposal content generated from your input.";

/// Characters of the raw reply included in fallback warnings.
const LOG_PREVIEW_CHARS: usize = 200;

/// A fenced code block (optionally tagged `json`) whose body is a JSON array.
static FENCED_ARRAY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\s*(\[[\s\S]*?\])\s*```").unwrap());

/// Ways of locating a JSON array in a model reply, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtractionStrategy {
    Direct,
    FencedBlock,
    BracketScan,
}

impl ExtractionStrategy {
    const ORDERED: [ExtractionStrategy; 3] = [
        ExtractionStrategy::Direct,
        ExtractionStrategy::FencedBlock,
        ExtractionStrategy::BracketScan,
    ];

    fn name(self) -> &'static str {
        match self {
            ExtractionStrategy::Direct => "direct",
            ExtractionStrategy::FencedBlock => "fenced_block",
            ExtractionStrategy::BracketScan => "bracket_scan",
        }
    }

    fn extract(self, raw: &str) -> Option<Vec<Value>> {
        match self {
            ExtractionStrategy::Direct => parse_array(raw.trim()),
            ExtractionStrategy::FencedBlock => FENCED_ARRAY_REGEX
                .captures_iter(raw)
                .find_map(|caps| parse_array(caps.get(1)?.as_str())),
            ExtractionStrategy::BracketScan => {
                let start = raw.find('[')?;
                let end = raw.rfind(']')?;
                if end < start {
                    return None;
                }
                parse_array(&raw[start..=end])
            }
        }
    }
}

fn parse_array(text: &str) -> Option<Vec<Value>> {
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Array(items) => Some(items),
        _ => None,
    }
}

/// Converts a raw model reply into at least one fully-populated slide.
pub fn normalize(raw: &str) -> Vec<Slide> {
    if raw.to_lowercase().contains(REFUSAL_MARKER) {
        warn!("Model declined the proposal request; building fallback slides");
        return build_fallback_slides(raw);
    }

    match extract_slide_array(raw) {
        Some(items) => repair_slides(&items),
        None => {
            warn!(
                "No JSON slide array in model reply; building fallback slides. Reply starts: {:?}",
                raw.chars().take(LOG_PREVIEW_CHARS).collect::<String>()
            );
            build_fallback_slides(raw)
        }
    }
}

fn extract_slide_array(raw: &str) -> Option<Vec<Value>> {
    ExtractionStrategy::ORDERED.iter().find_map(|strategy| {
        let items = strategy.extract(raw)?;
        debug!(
            "Extracted {} slide candidates via {} strategy",
            items.len(),
            strategy.name()
        );
        Some(items)
    })
}

/// Repairs every element in order; an empty array yields one placeholder slide.
pub fn repair_slides(items: &[Value]) -> Vec<Slide> {
    let mut slides: Vec<Slide> = items
        .iter()
        .enumerate()
        .map(|(index, item)| repair_slide(item, index))
        .collect();

    if slides.is_empty() {
        slides.push(Slide::new(
            PLACEHOLDER_TITLE,
            PLACEHOLDER_CONTENT,
            SlideTemplate::Title,
        ));
    }

    slides
}

/// Builds a valid slide from one loosely-typed array element at position `index`.
///
/// Each field is repaired on its own; a bad field never discards the others.
/// Non-object elements are treated as objects with no fields.
pub fn repair_slide(value: &Value, index: usize) -> Slide {
    let title = value
        .get("title")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Slide {}", index + 1));

    let content = value
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let bullet_points: Vec<String> = value
        .get("bulletPoints")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(bullet_text).collect())
        .unwrap_or_default();

    let template = match value.get("template") {
        None | Some(Value::Null) => SlideTemplate::positional_default(index),
        Some(Value::String(tag)) if tag.is_empty() => SlideTemplate::positional_default(index),
        Some(Value::String(tag)) => SlideTemplate::parse(tag).unwrap_or(SlideTemplate::Content),
        Some(_) => SlideTemplate::Content,
    };
    let template = if template == SlideTemplate::Bullets && bullet_points.is_empty() {
        SlideTemplate::Content
    } else {
        template
    };

    let mut slide = Slide::new(title, content, template);
    slide.bullet_points = bullet_points;
    slide.background_color = hex_color_or(value.get("backgroundColor"), DEFAULT_BACKGROUND_COLOR);
    slide.text_color = hex_color_or(value.get("textColor"), DEFAULT_TEXT_COLOR);
    slide
}

fn bullet_text(item: &Value) -> Option<String> {
    match item {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn hex_color_or(value: Option<&Value>, default: &str) -> String {
    value
        .and_then(Value::as_str)
        .filter(|c| is_valid_hex_color(c))
        .unwrap_or(default)
        .to_string()
}
