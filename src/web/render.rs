//! Markdown to HTML for the result panel

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// Link and image targets other than these schemes are replaced by `#`
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Render model-written markdown to HTML
///
/// Raw HTML in the markdown is emitted as escaped text, never as markup,
/// and link or image targets with an unsafe scheme are neutralized.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Keep relative URLs and the allowed schemes, replace anything else
fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    // browsers ignore control characters and whitespace inside a scheme
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_ascii_control() && !c.is_whitespace())
        .collect();

    let scheme = match cleaned.find(':') {
        // a ':' after '/', '?' or '#' belongs to the path, not a scheme
        Some(colon) if !cleaned[..colon].contains(['/', '?', '#']) => &cleaned[..colon],
        _ => return url,
    };

    if SAFE_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) {
        url
    } else {
        CowStr::Borrowed("#")
    }
}

/// Drop a ```` ```markdown ```` fence wrapping the whole document, if present
pub fn strip_markdown_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return text;
    };
    let Some((lang, body)) = rest.split_once('\n') else {
        return text;
    };
    if !matches!(lang.trim(), "" | "markdown" | "md") {
        return text;
    }
    match body.trim_end().strip_suffix("```") {
        // an inner fence would make this a code block, not a wrapper
        Some(inner) if !inner.contains("```") => inner.trim_end(),
        _ => text,
    }
}

/// Escape text for use inside HTML element content or double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // writing into a String cannot fail
    let _ = pulldown_cmark_escape::escape_html(&mut out, text);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_lists() {
        let html = markdown_to_html("# Solar\n\n## Panels\n\n- **cheap**\n- *clean*\n");
        assert!(html.contains("<h1>Solar</h1>"));
        assert!(html.contains("<h2>Panels</h2>"));
        assert!(html.contains("<strong>cheap</strong>"));
        assert!(html.contains("<em>clean</em>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html =
            markdown_to_html("Hello <script>alert(1)</script>\n\n<div onclick=\"x\">hi</div>\n");
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<div"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_script_links_are_neutralized() {
        let html = markdown_to_html("[Read more](javascript:alert(document.cookie))\n");
        assert!(!html.contains("javascript:"));
        assert!(html.contains(r##"<a href="#">Read more</a>"##));

        let html = markdown_to_html(
            "![x](data:text/html;base64,PHNjcmlwdD4=)\n\n[y](JaVaScript&#58;alert(1))\n",
        );
        assert!(!html.contains("data:"));
        assert!(!html.to_ascii_lowercase().contains("javascript"));
        assert!(html.contains(r##"<img src="#" alt="x" />"##));
    }

    #[test]
    fn test_safe_links_are_kept() {
        let html = markdown_to_html(
            "[a](https://example.org/x) [b](mailto:me@example.org) [c](/docs/page:1) [d](#notes)\n",
        );
        assert!(html.contains(r#"href="https://example.org/x""#));
        assert!(html.contains(r#"href="mailto:me@example.org""#));
        assert!(html.contains(r#"href="/docs/page:1""#));
        assert!(html.contains(r##"href="#notes""##));
    }

    #[test]
    fn test_fence_stripping() {
        assert_eq!(strip_markdown_fence("```markdown\n# Title\n\nBody\n```\n"), "# Title\n\nBody");
        assert_eq!(strip_markdown_fence("# Title"), "# Title");
        let code = "```rust\nfn main() {}\n```";
        assert_eq!(strip_markdown_fence(code), code);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&"#), "&lt;a href=&quot;x&quot;&gt;&amp;");
    }
}
