// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lightweight Markdown to Telegram HTML rendering.
//!
//! Handles the subset the summary prompt asks the model to use: fenced code
//! blocks, inline code, `**bold**`, `*italic*`, `* ` bullets and `#` headers.
//! Everything else is HTML-escaped so stray `<` or `&` never break parsing.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static CODE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(\w+)?\n(.*?)\n```").expect("valid regex"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").expect("valid regex"));
static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\* ").expect("valid regex"));
static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+(.+)$").expect("valid regex"));
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\n]+)\*").expect("valid regex"));
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x00(\d+)\x00").expect("valid regex"));

/// Escapes text for Telegram's HTML parse mode.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Renders model Markdown into Telegram HTML.
pub fn render_markup(text: &str) -> String {
    let mut stash: Vec<String> = Vec::new();

    // Code is set aside first so its contents escape Markdown substitution.
    let text = CODE_BLOCK.replace_all(text, |caps: &Captures| {
        let lang = caps.get(1).map_or("", |m| m.as_str());
        let code = caps.get(2).map_or("", |m| m.as_str()).trim();
        stash_fragment(
            &mut stash,
            format!(
                "<pre><code class=\"language-{lang}\">{}</code></pre>",
                escape_html(code)
            ),
        )
    });
    let text = INLINE_CODE.replace_all(&text, |caps: &Captures| {
        stash_fragment(&mut stash, format!("<code>{}</code>", escape_html(&caps[1])))
    });

    let text = escape_html(&text);
    let text = BULLET.replace_all(&text, "• ");
    let text = HEADER.replace_all(&text, "<b>$1</b>");
    let text = BOLD.replace_all(&text, "<b>$1</b>");
    let text = ITALIC.replace_all(&text, "<i>$1</i>");

    PLACEHOLDER
        .replace_all(&text, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| stash.get(i).cloned())
                .unwrap_or_default()
        })
        .into_owned()
}

fn stash_fragment(stash: &mut Vec<String>, html: String) -> String {
    stash.push(html);
    format!("\u{0}{}\u{0}", stash.len() - 1)
}

/// Prefixes a bold title and optionally hides the body behind a spoiler.
///
/// With a spoiler, everything after the first blank line is wrapped; text
/// without a blank line is wrapped whole.
pub fn compose_reply(title: Option<&str>, body: &str, spoiler: bool) -> String {
    let full = match title {
        Some(title) if !title.is_empty() => format!("<b>{title}</b>\n\n{body}"),
        _ => body.to_string(),
    };
    if !spoiler {
        return full;
    }
    match full.split_once("\n\n") {
        Some((head, rest)) => format!("{head}\n\n<tg-spoiler>{rest}</tg-spoiler>"),
        None => format!("<tg-spoiler>{full}</tg-spoiler>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_specials() {
        assert_eq!(
            escape_html(r#"a < b && c > "d" 'e'"#),
            "a &lt; b &amp;&amp; c &gt; &quot;d&quot; &#39;e&#39;"
        );
    }

    #[test]
    fn renders_bold_and_italic() {
        assert_eq!(
            render_markup("**Тема**: *важно*"),
            "<b>Тема</b>: <i>важно</i>"
        );
    }

    #[test]
    fn renders_bullets_before_italic() {
        assert_eq!(
            render_markup("* первый *пункт*\n* второй"),
            "• первый <i>пункт</i>\n• второй"
        );
    }

    #[test]
    fn headers_become_bold_lines() {
        assert_eq!(render_markup("## Итог\ntext"), "<b>Итог</b>\ntext");
    }

    #[test]
    fn code_block_is_escaped_and_left_alone() {
        let md = "before\n```python\nif a < b and **x**:\n    pass\n```\nafter";
        assert_eq!(
            render_markup(md),
            "before\n<pre><code class=\"language-python\">if a &lt; b and **x**:\n    pass</code></pre>\nafter"
        );
    }

    #[test]
    fn code_block_without_language() {
        assert_eq!(
            render_markup("```\nx\n```"),
            "<pre><code class=\"language-\">x</code></pre>"
        );
    }

    #[test]
    fn inline_code_is_not_italicized() {
        assert_eq!(render_markup("run `a*b*c` now"), "run <code>a*b*c</code> now");
    }

    #[test]
    fn plain_text_angle_brackets_are_escaped() {
        assert_eq!(render_markup("x <y> & z"), "x &lt;y&gt; &amp; z");
    }

    #[test]
    fn horizontal_rule_survives() {
        assert_eq!(render_markup("---\n**a**"), "---\n<b>a</b>");
    }

    #[test]
    fn compose_without_spoiler() {
        assert_eq!(
            compose_reply(Some("Transcription"), "hello", false),
            "<b>Transcription</b>\n\nhello"
        );
    }

    #[test]
    fn compose_with_spoiler_hides_body_only() {
        assert_eq!(
            compose_reply(Some("Summary"), "line one\n\nline two", true),
            "<b>Summary</b>\n\n<tg-spoiler>line one\n\nline two</tg-spoiler>"
        );
    }

    #[test]
    fn spoiler_without_blank_line_wraps_everything() {
        assert_eq!(
            compose_reply(None, "just text", true),
            "<tg-spoiler>just text</tg-spoiler>"
        );
    }
}
