//! # Inline Markup
//!
//! Output log entries may carry a small inline markup language. Plain status
//! text is escaped with [`escape`] before it is stored, so user input such as
//! `<b>` is displayed literally instead of being interpreted.
//!
//! ## Supported Markup
//!
//! | Markup                 | Rendering                       |
//! |------------------------|---------------------------------|
//! | `<b>`, `<strong>`      | bold                            |
//! | `<i>`, `<em>`          | italic                          |
//! | `<u>`                  | underlined                      |
//! | `<code>`, `<kbd>`      | accent colour                   |
//! | `<br>`, `\n`           | line break                      |
//! | `&lt; &gt; &amp; &quot; &#39;` | the corresponding character |
//!
//! Unknown tags are dropped, their text content is kept.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use regex::Regex;
use std::sync::OnceLock;

static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn token_re() -> &'static Regex {
    TOKEN_RE.get_or_init(|| {
        Regex::new(r"<(/?)([A-Za-z]+)[^<>]*>|&(lt|gt|amp|quot|#39);")
            .expect("markup token pattern is a valid regex")
    })
}

/// Escape text so that it renders literally when treated as markup.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render markup into styled lines.
///
/// `base` is the style of untagged text, `accent` the colour used for
/// `<code>`/`<kbd>` runs.
pub fn to_lines(markup: &str, base: Style, accent: Color) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    // (open tag, style in effect before it)
    let mut stack: Vec<(String, Style)> = Vec::new();
    let mut style = base;
    let mut last = 0;

    for caps in token_re().captures_iter(markup) {
        let Some(token) = caps.get(0) else {
            continue;
        };
        push_text(&markup[last..token.start()], style, &mut spans, &mut lines);
        last = token.end();

        if let Some(entity) = caps.get(3) {
            let decoded = match entity.as_str() {
                "lt" => "<",
                "gt" => ">",
                "amp" => "&",
                "quot" => "\"",
                _ => "'",
            };
            spans.push(Span::styled(decoded, style));
            continue;
        }

        let closing = caps.get(1).is_some_and(|c| !c.as_str().is_empty());
        let tag = caps
            .get(2)
            .map(|t| t.as_str().to_ascii_lowercase())
            .unwrap_or_default();

        if tag == "br" {
            lines.push(Line::from(std::mem::take(&mut spans)));
        } else if closing {
            if let Some(pos) = stack.iter().rposition(|(open, _)| *open == tag) {
                style = stack[pos].1;
                stack.truncate(pos);
            }
        } else if let Some(next) = tag_style(&tag, style, accent) {
            stack.push((tag, style));
            style = next;
        }
    }

    push_text(&markup[last..], style, &mut spans, &mut lines);
    lines.push(Line::from(spans));
    lines
}

/// Strip markup and decode entities, keeping line breaks as `\n`.
pub fn plain_text(markup: &str) -> String {
    to_lines(markup, Style::default(), Color::Reset)
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn tag_style(tag: &str, current: Style, accent: Color) -> Option<Style> {
    match tag {
        "b" | "strong" => Some(current.add_modifier(Modifier::BOLD)),
        "i" | "em" => Some(current.add_modifier(Modifier::ITALIC)),
        "u" => Some(current.add_modifier(Modifier::UNDERLINED)),
        "code" | "kbd" => Some(current.fg(accent)),
        _ => None,
    }
}

fn push_text(
    text: &str,
    style: Style,
    spans: &mut Vec<Span<'static>>,
    lines: &mut Vec<Line<'static>>,
) {
    let mut parts = text.split('\n');
    if let Some(first) = parts.next() {
        if !first.is_empty() {
            spans.push(Span::styled(first.to_string(), style));
        }
    }
    for part in parts {
        lines.push(Line::from(std::mem::take(spans)));
        if !part.is_empty() {
            spans.push(Span::styled(part.to_string(), style));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape("Connected to /blog"), "Connected to /blog");
    }

    #[test]
    fn test_escaped_text_renders_literally() {
        let raw = "<script>alert('x')</script> & more";
        assert_eq!(plain_text(&escape(raw)), raw);
    }

    #[test]
    fn test_double_escaped_entity_survives() {
        assert_eq!(plain_text(&escape("&lt;")), "&lt;");
    }

    #[test]
    fn test_bold_tag_is_styled() {
        let lines = to_lines("say <b>hi</b>!", Style::default(), Color::Cyan);
        assert_eq!(lines.len(), 1);
        let spans = &lines[0].spans;
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].content, "hi");
        assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert!(!spans[2].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_code_uses_accent() {
        let lines = to_lines("<code>help</code>", Style::default(), Color::Yellow);
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Yellow));
    }

    #[test]
    fn test_nested_tags() {
        let lines = to_lines("<b><i>x</i>y</b>", Style::default(), Color::Cyan);
        let spans = &lines[0].spans;
        assert!(spans[0].style.add_modifier.contains(Modifier::ITALIC));
        assert!(spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert!(!spans[1].style.add_modifier.contains(Modifier::ITALIC));
        assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_unknown_tag_dropped_text_kept() {
        assert_eq!(plain_text(r#"<a href="/blog">blog</a>"#), "blog");
    }

    #[test]
    fn test_newlines_and_br_split_lines() {
        let lines = to_lines("one\ntwo<br>three", Style::default(), Color::Cyan);
        assert_eq!(lines.len(), 3);
        assert_eq!(plain_text("one\ntwo<br>three"), "one\ntwo\nthree");
    }

    #[test]
    fn test_unmatched_closing_tag_ignored() {
        assert_eq!(plain_text("a</b>b"), "ab");
    }
}
