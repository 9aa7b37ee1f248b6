//! Article linking: turns topic mentions in a model response into anchors
//! pointing at the site's own articles.
//!
//! Every rewrite works on byte spans of the current text. Spans already
//! covered by markup (a whole `<a>…</a>` element, or any other tag) are
//! protected, and a candidate that touches a protected span is left alone.
//! That rule is what keeps `annotate` idempotent.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::tables::{ARTICLE_MAPPINGS, LITERAL_TOPIC_PHRASES};

/// Sentences that introduce a topic, capturing it up to the next `,` `.` or newline.
static INTRO_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)For more (?:detailed )?information (?:about|on) ([^,.\n]+)",
        r"(?i)You can (?:also )?(?:read|learn) (?:more )?about ([^,.\n]+)",
        r"(?i)(?:Learn|Read) more about ([^,.\n]+)",
        r"(?i)More information (?:about|on) ([^,.\n]+)",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// Leftovers of a half-written anchor such as `cancer.html" target=blank>`.
static MALFORMED_ANCHOR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"(?i)([^"]\w+\.html)"?\s*target="?blank"?>"#).ok());

static ANCHOR_OPEN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?i)<a\b[^>]*>").ok());
static ANCHOR_CLOSE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?i)</a\s*>").ok());
/// A `<` only opens a tag when a name or `/` follows, so `< 10%` stays prose.
static ANY_TAG: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z][^<>]*>").ok());

pub fn anchor(url: &str, label: &str) -> String {
    format!(r#"<a href="{url}" target="_blank">{label}</a>"#)
}

/// Byte ranges of `text` that a rewrite must not touch.
///
/// An anchor with no closing tag protects everything after it.
pub fn protected_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    if let (Some(open), Some(close)) = (ANCHOR_OPEN.as_ref(), ANCHOR_CLOSE.as_ref()) {
        let mut pos = 0;
        while let Some(m) = open.find_at(text, pos) {
            let end = close.find_at(text, m.end()).map_or(text.len(), |c| c.end());
            spans.push(m.start()..end);
            pos = end.max(m.end());
            if pos >= text.len() {
                break;
            }
        }
    }
    if let Some(tag) = ANY_TAG.as_ref() {
        spans.extend(tag.find_iter(text).map(|m| m.range()));
    }
    spans
}

fn overlaps(spans: &[Range<usize>], r: &Range<usize>) -> bool {
    spans.iter().any(|s| s.start < r.end && r.start < s.end)
}

struct LiteralPhrase {
    regex: Regex,
    url: &'static str,
}

/// Rewrites topic mentions into article links.
pub struct ArticleLinker {
    mappings: &'static [(&'static str, &'static str)],
    literals: Vec<LiteralPhrase>,
}

impl Default for ArticleLinker {
    fn default() -> Self {
        Self::new(ARTICLE_MAPPINGS, LITERAL_TOPIC_PHRASES)
    }
}

impl ArticleLinker {
    /// Phrases without an entry in `mappings` are dropped.
    pub fn new(
        mappings: &'static [(&'static str, &'static str)],
        phrases: &[&str],
    ) -> Self {
        let literals = phrases
            .iter()
            .filter_map(|phrase| {
                let Some(url) = mappings
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(phrase))
                    .map(|(_, url)| *url)
                else {
                    debug!(phrase, "literal phrase has no article, skipping");
                    return None;
                };
                let regex = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(phrase))).ok()?;
                Some(LiteralPhrase { regex, url })
            })
            .collect();
        Self { mappings, literals }
    }

    /// First mapping whose key contains the topic, or which the topic contains.
    pub fn lookup(&self, topic: &str) -> Option<&'static str> {
        let topic = topic.trim().to_lowercase();
        if topic.is_empty() {
            return None;
        }
        self.mappings
            .iter()
            .find(|(key, _)| topic.contains(key) || key.contains(topic.as_str()))
            .map(|(_, url)| *url)
    }

    pub fn annotate(&self, text: &str) -> String {
        let mut out = text.to_string();
        for pattern in INTRO_PATTERNS.iter() {
            out = self.rewrite_intro(&out, pattern);
        }
        out = strip_malformed(&out);
        for literal in &self.literals {
            out = wrap_literal(&out, literal);
        }
        out
    }

    /// Link the topic captured by one intro pattern, wherever it is still bare text.
    fn rewrite_intro(&self, text: &str, pattern: &Regex) -> String {
        let spans = protected_spans(text);
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in pattern.captures_iter(text) {
            let Some(topic) = caps.get(1) else { continue };
            let raw = topic.as_str();
            let label = raw.trim();
            if label.is_empty() || overlaps(&spans, &topic.range()) {
                continue;
            }
            let Some(url) = self.lookup(label) else { continue };
            let start = topic.start() + (raw.len() - raw.trim_start().len());
            let end = start + label.len();
            out.push_str(&text[last..start]);
            out.push_str(&anchor(url, label));
            last = end;
        }
        out.push_str(&text[last..]);
        out
    }
}

fn strip_malformed(text: &str) -> String {
    match MALFORMED_ANCHOR.as_ref() {
        Some(re) => re.replace_all(text, "").into_owned(),
        None => text.to_string(),
    }
}

/// Wrap every whole-word occurrence of the phrase that is not already markup.
fn wrap_literal(text: &str, literal: &LiteralPhrase) -> String {
    let spans = protected_spans(text);
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in literal.regex.find_iter(text) {
        if overlaps(&spans, &m.range()) {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        out.push_str(&anchor(literal.url, m.as_str()));
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

/// Annotate with the built-in tables.
pub fn annotate(text: &str) -> String {
    static LINKER: LazyLock<ArticleLinker> = LazyLock::new(ArticleLinker::default);
    LINKER.annotate(text)
}
