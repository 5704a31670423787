//! Preview loading for resolved notes.
//!
//! # Responsibility
//! - Read resolved notes' markdown through the host.
//! - Derive a plain-text excerpt for compact preview blocks.
//!
//! # Invariants
//! - Loading is best-effort: an unreadable note yields an empty block,
//!   never an error.
//! - Note contents are never logged.

use crate::host::PeriodicNotesHost;
use crate::service::orchestrator::RenderInstruction;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

static FRONTMATTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A---\r?\n.*?\r?\n---(\r?\n|\z)").expect("valid frontmatter regex"));
static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static WIKI_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!?\[\[([^\]|]+)(?:\|([^\]]+))?]]").expect("valid wiki link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\-\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// One preview block handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewBlock {
    pub years_back: u32,
    pub title: String,
    /// Raw markdown for host-side rendering; empty when the read failed.
    pub markdown: String,
    pub excerpt: Option<String>,
}

/// Reads every resolved note of `instruction` in lookback order.
pub fn load_previews<H>(
    host: &H,
    instruction: &RenderInstruction,
    excerpt_chars: usize,
) -> Vec<PreviewBlock>
where
    H: PeriodicNotesHost + ?Sized,
{
    instruction
        .entries
        .iter()
        .map(|entry| {
            let markdown = match host.read_note_contents(&entry.note) {
                Ok(markdown) => markdown,
                Err(err) => {
                    warn!(
                        "event=preview_load module=preview status=error path={} error={}",
                        entry.note.path(),
                        err
                    );
                    String::new()
                }
            };
            PreviewBlock {
                years_back: entry.years_back,
                title: entry.title.clone(),
                excerpt: derive_excerpt(&markdown, excerpt_chars),
                markdown,
            }
        })
        .collect()
}

/// Derives a plain-text excerpt from markdown.
///
/// Rules:
/// - leading YAML frontmatter is dropped;
/// - images are removed, links and wiki links keep their label;
/// - markdown symbols are removed and whitespace collapsed;
/// - at most `max_chars` characters are kept.
pub fn derive_excerpt(content: &str, max_chars: usize) -> Option<String> {
    let body = FRONTMATTER_RE.replace(content, "");
    let without_images = MARKDOWN_IMAGE_RE.replace_all(&body, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_wiki = WIKI_LINK_RE.replace_all(&without_links, |caps: &regex::Captures<'_>| {
        caps.get(2)
            .or_else(|| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    });
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_wiki, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() || max_chars == 0 {
        return None;
    }
    Some(trimmed.chars().take(max_chars).collect())
}
