//! Minimal Markdown → HTML for chat replies: bold, italic, flat lists,
//! line breaks. Input is trusted and existing markup passes through.

use std::sync::LazyLock;

use regex::{Captures, Regex};

fn re(pattern: &str) -> Option<Regex> {
    Regex::new(pattern).ok()
}

/// Real tags, plus any stray sentinel char already in the input so it
/// round-trips untouched.
static TAG: LazyLock<Option<Regex>> =
    LazyLock::new(|| re("</?[A-Za-z][^<>]*>|[\u{E000}\u{E001}\u{E002}]"));
static TAG_SLOT: LazyLock<Option<Regex>> = LazyLock::new(|| re("\u{E000}(\\d+)\u{E001}"));
static BULLET_MARKER: LazyLock<Option<Regex>> = LazyLock::new(|| re(r"(?m)^[-*•][ \t]+"));
static BOLD_STARS: LazyLock<Option<Regex>> = LazyLock::new(|| re(r"\*\*(.*?)\*\*"));
static BOLD_UNDERSCORES: LazyLock<Option<Regex>> = LazyLock::new(|| re(r"__(.*?)__"));
static ITALIC_STAR: LazyLock<Option<Regex>> = LazyLock::new(|| re(r"\*(.*?)\*"));
static ITALIC_UNDERSCORE: LazyLock<Option<Regex>> = LazyLock::new(|| re(r"_(.*?)_"));
static ORDERED_ITEM: LazyLock<Option<Regex>> = LazyLock::new(|| re(r"(?m)^\d+\.[ \t]+(.*)$"));
static BULLET_ITEM: LazyLock<Option<Regex>> = LazyLock::new(|| re("(?m)^\u{E002}(.*)$"));
static PARAGRAPH_BREAK: LazyLock<Option<Regex>> = LazyLock::new(|| re(r"\n{3,}"));

/// Stands in for a bullet marker while emphasis runs, so `* item` is not read as `*italic*`.
const BULLET: &str = "\u{E002}";

const BLOCK_TAGS: &[&str] = &[
    "p", "ul", "ol", "li", "div", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "table",
];

fn replace(re: &LazyLock<Option<Regex>>, text: &str, rep: &str) -> String {
    match re.as_ref() {
        Some(r) => r.replace_all(text, rep).into_owned(),
        None => text.to_string(),
    }
}

/// Swap every tag for an opaque slot so emphasis never sees attribute text
/// such as `target="_blank"`.
fn mask_tags(text: &str) -> (String, Vec<String>) {
    let Some(tag) = TAG.as_ref() else {
        return (text.to_string(), Vec::new());
    };
    let mut saved = Vec::new();
    let masked = tag.replace_all(text, |c: &Captures| {
        saved.push(c[0].to_string());
        format!("\u{E000}{}\u{E001}", saved.len() - 1)
    });
    (masked.into_owned(), saved)
}

fn unmask_tags(text: &str, saved: &[String]) -> String {
    let Some(slot) = TAG_SLOT.as_ref() else {
        return text.to_string();
    };
    slot.replace_all(text, |c: &Captures| {
        c[1].parse::<usize>()
            .ok()
            .and_then(|i| saved.get(i).cloned())
            .unwrap_or_default()
    })
    .into_owned()
}

/// Merge each run of adjacent `<li>` lines into a single `<ul>`.
/// Numbered and bulleted items both end up unordered.
fn wrap_lists(text: &str) -> String {
    let is_item = |l: &str| l.starts_with("<li>") && l.ends_with("</li>");
    let mut lines: Vec<String> = Vec::new();
    let mut run = String::new();
    for line in text.split('\n') {
        if is_item(line) {
            run.push_str(line);
            continue;
        }
        if !run.is_empty() {
            lines.push(format!("<ul>{}</ul>", std::mem::take(&mut run)));
        }
        lines.push(line.to_string());
    }
    if !run.is_empty() {
        lines.push(format!("<ul>{run}</ul>"));
    }
    lines.join("\n")
}

fn starts_with_block_tag(html: &str) -> bool {
    let Some(rest) = html.strip_prefix('<') else {
        return false;
    };
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    BLOCK_TAGS.contains(&name.as_str())
}

pub fn render(md: &str) -> String {
    if md.is_empty() {
        return String::new();
    }
    let text = md.replace("\r\n", "\n");

    let (masked, saved) = mask_tags(&text);
    let mut html = replace(&BULLET_MARKER, &masked, BULLET);
    html = replace(&BOLD_STARS, &html, "<strong>${1}</strong>");
    html = replace(&BOLD_UNDERSCORES, &html, "<strong>${1}</strong>");
    html = replace(&ITALIC_STAR, &html, "<em>${1}</em>");
    html = replace(&ITALIC_UNDERSCORE, &html, "<em>${1}</em>");
    html = replace(&ORDERED_ITEM, &html, "<li>${1}</li>");
    html = replace(&BULLET_ITEM, &html, "<li>${1}</li>");
    html = unmask_tags(&html, &saved);
    html = wrap_lists(&html);

    html = replace(&PARAGRAPH_BREAK, &html, "</p><p>");
    html = html.replace("\n\n", "<br><br>");
    html = html.replace('\n', "<br>");

    if starts_with_block_tag(&html) {
        html
    } else {
        format!("<p>{html}</p>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_in_empty_out() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn bold_is_wrapped_in_paragraph() {
        assert_eq!(render("**hi**"), "<p><strong>hi</strong></p>");
        assert_eq!(render("__hi__ there"), "<p><strong>hi</strong> there</p>");
    }

    #[test]
    fn comparison_signs_do_not_hide_emphasis() {
        let out = render("a < b and **bold** > c");
        assert!(out.contains("<strong>bold</strong>"), "{out}");
        assert_eq!(out, "<p>a < b and <strong>bold</strong> > c</p>");
    }

    #[test]
    fn sentinel_chars_in_input_survive() {
        assert_eq!(
            render("keep \u{E000}0\u{E001} this <b>x</b>"),
            "<p>keep \u{E000}0\u{E001} this <b>x</b></p>"
        );
        assert_eq!(render("\u{E002}not a bullet"), "<p>\u{E002}not a bullet</p>");
    }

    #[test]
    fn italic_after_bold() {
        assert_eq!(
            render("**bold** and *soft* and _low_"),
            "<p><strong>bold</strong> and <em>soft</em> and <em>low</em></p>"
        );
    }

    #[test]
    fn bullets_and_numbers_collapse_to_one_list() {
        let out = render("Options:\n- one\n* two\n1. three");
        assert_eq!(out, "<p>Options:<br><ul><li>one</li><li>two</li><li>three</li></ul></p>");
    }

    #[test]
    fn bullet_with_emphasis() {
        assert_eq!(
            render("* see *this*"),
            "<ul><li>see <em>this</em></li></ul>"
        );
    }

    #[test]
    fn separate_lists_stay_separate() {
        let out = render("- a\n\n- b");
        assert_eq!(out, "<ul><li>a</li></ul><br><br><ul><li>b</li></ul>");
    }

    #[test]
    fn line_breaks() {
        assert_eq!(render("a\nb"), "<p>a<br>b</p>");
        assert_eq!(render("a\n\nb"), "<p>a<br><br>b</p>");
        assert_eq!(render("a\n\n\n\nb"), "<p>a</p><p>b</p>");
        assert_eq!(render("a\r\nb"), "<p>a<br>b</p>");
    }

    #[test]
    fn existing_anchor_attributes_survive() {
        let a = r#"<a href="/a.html" target="_blank">x</a>"#;
        let b = r#"<a href="/b.html" target="_blank">y</a>"#;
        let out = render(&format!("see {a} and {b}"));
        assert_eq!(out, format!("<p>see {a} and {b}</p>"));
    }

    #[test]
    fn block_markup_is_not_rewrapped() {
        assert_eq!(render("<p>done</p>"), "<p>done</p>");
        assert_eq!(render("<strong>x</strong>"), "<p><strong>x</strong></p>");
    }

    #[test]
    fn html_is_not_escaped() {
        assert_eq!(render("1 < 2 & <b>ok</b>"), "<p>1 < 2 & <b>ok</b></p>");
    }
}
