use pulldown_cmark::{html, Options, Parser};

use crate::assistant::DocumentKind;

/// Renders generated markdown to HTML for the document viewer.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

/// Display code for a generated document, e.g. `SRS-FILE-MANAGEMENT-001`.
pub fn document_code(kind: DocumentKind, feature: &str) -> String {
    let slug = feature
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_uppercase();
    format!("{}-{}-001", kind.as_str(), slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_code() {
        assert_eq!(
            document_code(DocumentKind::Srs, "File Management"),
            "SRS-FILE-MANAGEMENT-001"
        );
        assert_eq!(
            document_code(DocumentKind::Brd, "  quota   rules "),
            "BRD-QUOTA-RULES-001"
        );
    }

    #[test]
    fn test_render_markdown() {
        let html = render_markdown("# Title\n\n- one\n- **two**\n");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<strong>two</strong>"));
    }

    #[test]
    fn test_render_table() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }
}
