//! Shopify HTML formatting
//!
//! Deterministic rewrite of Markdown-style emphasis, paragraphs and lists
//! into the HTML subset Shopify descriptions accept. Passes run in a fixed
//! order: bold, italic, paragraph wrapping, list items, newline collapse,
//! explicit line breaks. Re-running on already-formatted output must not
//! double-wrap existing tags.

use regex::Regex;
use std::sync::LazyLock;

static BOLD_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));
static BOLD_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.+?)__").expect("valid regex"));
static ITALIC_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\n]+?)\*").expect("valid regex"));
static ITALIC_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([^_\n]+?)_").expect("valid regex"));
static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n").expect("valid regex"));
static NEWLINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Rewrite Markdown-like text into Shopify-ready HTML
pub fn format_shopify_html(text: &str) -> String {
    let emphasized = apply_emphasis(text);

    let paragraphs: Vec<&str> = BLANK_LINES
        .split(&emphasized)
        .filter(|p| !p.trim().is_empty())
        .collect();
    let multi = paragraphs.len() > 1;

    let blocks: Vec<String> = paragraphs
        .iter()
        .map(|para| {
            if has_bullet_lines(para) {
                convert_bullet_lines(para)
            } else if multi {
                format!("<p>{}</p>", para.trim())
            } else {
                para.trim_matches('\n').to_string()
            }
        })
        .collect();

    let joined = blocks.join("\n");
    let collapsed = NEWLINE_RUNS.replace_all(&joined, "\n\n");

    insert_line_breaks(&collapsed)
}

fn apply_emphasis(text: &str) -> String {
    let out = BOLD_STARS.replace_all(text, "<strong>$1</strong>");
    let out = BOLD_UNDERSCORES.replace_all(&out, "<strong>$1</strong>");
    let out = ITALIC_STARS.replace_all(&out, "<em>$1</em>");
    ITALIC_UNDERSCORES.replace_all(&out, "<em>$1</em>").into_owned()
}

fn is_bullet_line(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
}

fn has_bullet_lines(text: &str) -> bool {
    text.lines().any(|l| is_bullet_line(l).is_some())
}

/// Convert bullet lines to `<li>` and wrap each consecutive run in one `<ul>`
fn convert_bullet_lines(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut run: Vec<String> = Vec::new();

    for line in text.lines() {
        if let Some(item) = is_bullet_line(line) {
            run.push(format!("<li>{}</li>", item.trim_end()));
        } else {
            flush_list(&mut out, &mut run);
            out.push(line.to_string());
        }
    }
    flush_list(&mut out, &mut run);

    out.join("\n")
}

fn flush_list(out: &mut Vec<String>, run: &mut Vec<String>) {
    if run.is_empty() {
        return;
    }
    out.push(format!("<ul>\n{}\n</ul>", run.join("\n")));
    run.clear();
}

/// Bare newlines not adjacent to a tag become `<br>` plus the newline
fn insert_line_breaks(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        if c == '\n' {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1).copied();
            let adjacent_to_tag = prev == Some('>') || next == Some('<');
            let in_blank_run = prev == Some('\n') || next == Some('\n');
            if prev.is_some() && next.is_some() && !adjacent_to_tag && !in_blank_run {
                out.push_str("<br>");
            }
        }
        out.push(c);
    }

    out
}
