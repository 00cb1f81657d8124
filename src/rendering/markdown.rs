use pulldown_cmark::{html, Options, Parser};

/// Render page Markdown to HTML that is safe to inject with `inner_html`.
///
/// Tables, footnotes, strikethrough and smart punctuation are enabled. The
/// output is passed through `ammonia`, which drops scripts, event handlers
/// and form elements and adds `rel="noopener noreferrer"` to links.
pub fn render_markdown(raw: &str) -> String {
    ammonia::clean(&to_html(raw))
}

fn to_html(raw: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_SMART_PUNCTUATION;

    let parser = Parser::new_ext(raw, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_paragraph() {
        let result = render_markdown("Hello, world!");
        assert_eq!(result.trim(), "<p>Hello, world!</p>");
    }

    #[test]
    fn test_heading_and_emphasis() {
        let result = render_markdown("# Our story\n\n**bold** and *italic*");
        assert!(result.contains("<h1>Our story</h1>"));
        assert!(result.contains("<strong>bold</strong>"));
        assert!(result.contains("<em>italic</em>"));
    }

    #[test]
    fn test_table() {
        let input = "| Model | HP |\n|---|---|\n| 458 | 562 |";
        let result = render_markdown(input);
        assert!(result.contains("<table>"));
        assert!(result.contains("<td>458</td>"));
    }

    #[test]
    fn test_strikethrough() {
        let result = render_markdown("~~sold out~~");
        assert!(result.contains("<del>sold out</del>"));
    }

    #[test]
    fn test_links_get_safe_rel() {
        let result = render_markdown("[Dealers](https://example.com/dealers)");
        assert!(result.contains("href=\"https://example.com/dealers\""));
        assert!(result.contains("rel=\"noopener noreferrer\""));
    }

    #[test]
    fn test_inline_script_is_removed() {
        let result = render_markdown("Hi <script>alert('x')</script> there");
        assert!(!result.contains("<script"));
        assert!(!result.contains("alert"));
    }

    #[test]
    fn test_event_handlers_are_removed() {
        let result = render_markdown("<img src=\"/logo.png\" onerror=\"steal()\">");
        assert!(result.contains("src=\"/logo.png\""));
        assert!(!result.contains("onerror"));
    }

    #[test]
    fn test_javascript_urls_are_removed() {
        let result = render_markdown("[click](javascript:alert(1))");
        assert!(!result.contains("javascript:"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_markdown(""), "");
    }
}
