//! Markdown to HTML conversion.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Title extracted from first H1 heading (if title extraction was enabled).
    pub title: Option<String>,
}

/// Markdown renderer producing HTML fragments.
///
/// Fenced code blocks carry their language as `class="language-*"` on the
/// `<code>` element. No syntax highlighting is applied.
#[derive(Clone, Debug)]
pub struct MarkdownRenderer {
    gfm: bool,
    extract_title: bool,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Create a new renderer with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gfm: true,
            extract_title: false,
        }
    }

    /// Enable title extraction from first H1 heading.
    ///
    /// The heading is still rendered.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.extract_title = true;
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render markdown text to HTML.
    pub fn render_markdown(&self, markdown: &str) -> RenderResult {
        let events: Vec<Event<'_>> = Parser::new_ext(markdown, self.parser_options()).collect();

        let title = if self.extract_title {
            extract_title(&events)
        } else {
            None
        };

        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut html, events.into_iter());

        RenderResult { html, title }
    }
}

/// Plain text of the first H1 heading.
fn extract_title(events: &[Event<'_>]) -> Option<String> {
    let mut in_h1 = false;
    let mut title = String::new();

    for event in events {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_h1 = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                let trimmed = title.trim();
                return (!trimmed.is_empty()).then(|| trimmed.to_owned());
            }
            Event::Text(text) | Event::Code(text) if in_h1 => title.push_str(text),
            _ => {}
        }
    }

    None
}
