//! Heuristic plain-text fallback: builds slides from a reply that carried no
//! usable JSON by scanning it line by line for headings, bullets and prose.

use std::mem;
use std::sync::LazyLock;

use regex::Regex;

use crate::proposal::models::{Slide, SlideTemplate};

const FALLBACK_TITLE: &str = "Business Proposal";
const FALLBACK_SUBTITLE: &str = "Generated from your document and requirements";
const DETAILS_TITLE: &str = "Proposal Details";

/// Lines at or above this many characters are never headings.
const MAX_HEADING_CHARS: usize = 100;
/// Prose lines must be longer than this to count as slide content.
const MIN_CONTENT_CHARS: usize = 20;
/// Characters of the raw reply kept on the "Proposal Details" slide.
const DETAILS_EXCERPT_CHARS: usize = 500;

const BULLET_MARKERS: &[char] = &['•', '-', '*'];
const TERMINAL_PUNCTUATION: &[char] = &['.', '!', '?'];

/// `1.`, `12.` ... at the start of a line.
static ENUMERATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s*").unwrap());

/// How a single trimmed line contributes to the deck.
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    Heading(String),
    Bullet(&'a str),
    Content(&'a str),
    Ignored,
}

fn classify(line: &str) -> LineKind<'_> {
    let line = line.trim();
    if line.is_empty() || line.starts_with("```") {
        return LineKind::Ignored;
    }

    if is_heading(line) {
        return LineKind::Heading(heading_title(line));
    }

    if let Some(rest) = line.strip_prefix(BULLET_MARKERS) {
        let text = rest.trim_start();
        return if text.is_empty() {
            LineKind::Ignored
        } else {
            LineKind::Bullet(text)
        };
    }

    if line.chars().count() > MIN_CONTENT_CHARS {
        LineKind::Content(line)
    } else {
        LineKind::Ignored
    }
}

fn is_heading(line: &str) -> bool {
    line.chars().count() < MAX_HEADING_CHARS
        && (line.ends_with(':')
            || ENUMERATION_REGEX.is_match(line)
            || is_capitalized_phrase(line))
}

fn is_capitalized_phrase(line: &str) -> bool {
    line.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && !line.contains(TERMINAL_PUNCTUATION)
}

fn heading_title(line: &str) -> String {
    let title = ENUMERATION_REGEX.replace(line, "");
    let title = title.strip_suffix(':').unwrap_or(&*title);
    title.trim().to_string()
}

/// Accumulator for the line fold.
struct ScanState {
    slides: Vec<Slide>,
    open: Option<Slide>,
    pending_bullets: Vec<String>,
}

impl ScanState {
    fn new(title_slide: Slide) -> Self {
        Self {
            slides: vec![title_slide],
            open: None,
            pending_bullets: Vec::new(),
        }
    }

    fn step(mut self, line: LineKind<'_>) -> Self {
        match line {
            LineKind::Heading(title) => {
                self.close_open();
                let title = if title.is_empty() {
                    format!("Slide {}", self.slides.len() + 1)
                } else {
                    title
                };
                self.open = Some(Slide::new(title, "", SlideTemplate::Content));
            }
            LineKind::Bullet(text) => self.pending_bullets.push(text.to_string()),
            LineKind::Content(text) => {
                if let Some(slide) = self.open.as_mut() {
                    if !slide.content.is_empty() {
                        slide.content.push(' ');
                    }
                    slide.content.push_str(text);
                }
            }
            LineKind::Ignored => {}
        }
        self
    }

    /// Bullets seen while no slide is open are dropped here.
    fn close_open(&mut self) {
        let bullets = mem::take(&mut self.pending_bullets);
        if let Some(mut slide) = self.open.take() {
            slide.bullet_points = bullets;
            self.slides.push(slide);
        }
    }

    /// Only the last slide is promoted to the bullets template.
    fn finish(mut self) -> Vec<Slide> {
        let bullets = mem::take(&mut self.pending_bullets);
        if let Some(mut slide) = self.open.take() {
            if !bullets.is_empty() {
                slide.template = SlideTemplate::Bullets;
            }
            slide.bullet_points = bullets;
            self.slides.push(slide);
        }
        self.slides
    }
}

/// Builds a deck from free text: a fixed title slide, one slide per detected
/// heading, and a "Proposal Details" excerpt when no heading was found.
pub fn build_fallback_slides(raw: &str) -> Vec<Slide> {
    let title_slide = Slide::new(FALLBACK_TITLE, FALLBACK_SUBTITLE, SlideTemplate::Title);

    let mut slides = raw
        .lines()
        .map(classify)
        .fold(ScanState::new(title_slide), ScanState::step)
        .finish();

    if slides.len() == 1 {
        slides.push(Slide::new(
            DETAILS_TITLE,
            excerpt(raw, DETAILS_EXCERPT_CHARS),
            SlideTemplate::Content,
        ));
    }

    slides
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_headings() {
        assert_eq!(
            classify("Overview:"),
            LineKind::Heading("Overview".to_string())
        );
        assert_eq!(
            classify("  2. Proposed Solution  "),
            LineKind::Heading("Proposed Solution".to_string())
        );
        assert_eq!(
            classify("3. Timeline:"),
            LineKind::Heading("Timeline".to_string())
        );
        assert_eq!(
            classify("Key Benefits"),
            LineKind::Heading("Key Benefits".to_string())
        );
    }

    #[test]
    fn test_sentence_is_not_a_heading() {
        assert_eq!(
            classify("We will deliver the platform in three phases."),
            LineKind::Content("We will deliver the platform in three phases.")
        );
        assert_eq!(classify("Ready?"), LineKind::Ignored);
    }

    #[test]
    fn test_long_line_is_never_a_heading() {
        let line = format!("{}:", "A".repeat(MAX_HEADING_CHARS));
        assert_eq!(classify(&line), LineKind::Content(line.as_str()));
    }

    #[test]
    fn test_classify_bullets() {
        assert_eq!(classify("- point one"), LineKind::Bullet("point one"));
        assert_eq!(classify("• shared cart"), LineKind::Bullet("shared cart"));
        assert_eq!(classify("*   lower churn"), LineKind::Bullet("lower churn"));
        assert_eq!(classify("-"), LineKind::Ignored);
    }

    #[test]
    fn test_short_prose_and_fences_are_ignored() {
        assert_eq!(classify("ok then"), LineKind::Ignored);
        assert_eq!(classify("```json"), LineKind::Ignored);
        assert_eq!(classify("   "), LineKind::Ignored);
    }

    #[test]
    fn test_heading_with_bullets_becomes_bullet_slide() {
        let slides = build_fallback_slides("Overview:\n- point one\n- point two\n");

        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].title, FALLBACK_TITLE);
        assert_eq!(slides[0].content, FALLBACK_SUBTITLE);
        assert_eq!(slides[0].template, SlideTemplate::Title);
        assert_eq!(slides[1].title, "Overview");
        assert_eq!(slides[1].template, SlideTemplate::Bullets);
        assert_eq!(slides[1].bullet_points, vec!["point one", "point two"]);
    }

    #[test]
    fn test_content_lines_are_space_joined() {
        let raw = "1. Problem\nCustomers abandon carts on mobile devices.\nCheckout takes eleven taps on average.\n";
        let slides = build_fallback_slides(raw);

        assert_eq!(slides.len(), 2);
        assert_eq!(slides[1].title, "Problem");
        assert_eq!(
            slides[1].content,
            "Customers abandon carts on mobile devices. Checkout takes eleven taps on average."
        );
        assert_eq!(slides[1].template, SlideTemplate::Content);
    }

    #[test]
    fn test_only_last_slide_is_promoted_to_bullets() {
        let raw = "Benefits:\n- faster\n- cheaper\nNext Steps:\n- sign off\n";
        let slides = build_fallback_slides(raw);

        assert_eq!(slides.len(), 3);
        assert_eq!(slides[1].bullet_points, vec!["faster", "cheaper"]);
        assert_eq!(slides[1].template, SlideTemplate::Content);
        assert_eq!(slides[2].bullet_points, vec!["sign off"]);
        assert_eq!(slides[2].template, SlideTemplate::Bullets);
    }

    #[test]
    fn test_content_and_bullets_before_first_heading_are_dropped() {
        let raw = "this preamble sentence has no heading yet.\n- orphan\nScope:\n- real\n";
        let slides = build_fallback_slides(raw);

        assert_eq!(slides.len(), 2);
        assert_eq!(slides[1].title, "Scope");
        assert_eq!(slides[1].content, "");
        assert_eq!(slides[1].bullet_points, vec!["real"]);
    }

    #[test]
    fn test_bare_colon_heading_gets_positional_title() {
        let slides = build_fallback_slides(":\nthe body of an untitled section goes here");
        assert_eq!(slides[1].title, "Slide 2");
    }

    #[test]
    fn test_no_headings_yields_details_slide() {
        let raw = "lowercase prose without any structure at all, just words";
        let slides = build_fallback_slides(raw);

        assert_eq!(slides.len(), 2);
        assert_eq!(slides[1].title, DETAILS_TITLE);
        assert_eq!(slides[1].content, raw);
        assert_eq!(slides[1].template, SlideTemplate::Content);
    }

    #[test]
    fn test_details_slide_is_truncated_with_ellipsis() {
        let raw = "x".repeat(DETAILS_EXCERPT_CHARS + 10);
        let slides = build_fallback_slides(&raw);

        let expected = format!("{}...", "x".repeat(DETAILS_EXCERPT_CHARS));
        assert_eq!(slides[1].content, expected);
    }

    #[test]
    fn test_empty_reply_still_yields_two_slides() {
        let slides = build_fallback_slides("");
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[1].content, "");
    }

    #[test]
    fn test_excerpt_counts_chars_not_bytes() {
        assert_eq!(excerpt("ééé", 3), "ééé");
        assert_eq!(excerpt("éééé", 3), "ééé...");
    }
}
