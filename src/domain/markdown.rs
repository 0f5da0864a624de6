//! Markdown helpers: HTML rendering and title detection.

use pulldown_cmark::{html, Options, Parser};
use std::path::Path;

pub const UNTITLED: &str = "Untitled";

/// Render Markdown source to HTML. Content is trusted; no sanitizing.
pub fn render_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(source, options);
    let mut out = String::with_capacity(source.len() + source.len() / 2);
    html::push_html(&mut out, parser);
    out
}

/// Text of the first non-empty `# ` heading line, if any.
pub fn first_heading(source: &str) -> Option<&str> {
    source
        .lines()
        .filter_map(|line| line.strip_prefix("# "))
        .map(str::trim)
        .find(|title| !title.is_empty())
}

/// Title for an imported document: its first heading, else the file stem.
pub fn derive_title(source: &str, path: &Path) -> String {
    if let Some(title) = first_heading(source) {
        return title.to_string();
    }
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_heading_and_paragraph() {
        let html = render_html("# Hi\nBody");
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("<p>Body</p>"));
    }

    #[test]
    fn renders_tables() {
        let html = render_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn first_heading_skips_lower_levels() {
        assert_eq!(first_heading("intro\n## Sub\n# Main\n# Other"), Some("Main"));
        assert_eq!(first_heading("#NoSpace\ntext"), None);
        assert_eq!(first_heading("# \n# Real"), Some("Real"));
    }

    #[test]
    fn first_heading_trims_padding() {
        assert_eq!(first_heading("#  Padded  \nbody"), Some("Padded"));
        assert_eq!(first_heading("#   \n#\tTab\n#  Next"), Some("Next"));
    }

    #[test]
    fn first_heading_handles_crlf() {
        assert_eq!(first_heading("# Windows\r\nbody"), Some("Windows"));
    }

    #[test]
    fn derive_title_falls_back_to_file_stem() {
        assert_eq!(derive_title("# My Title\n", Path::new("x.md")), "My Title");
        assert_eq!(
            derive_title("no heading", Path::new("/notes/day-seven.md")),
            "day-seven"
        );
        assert_eq!(derive_title("", Path::new("/")), UNTITLED);
    }
}
