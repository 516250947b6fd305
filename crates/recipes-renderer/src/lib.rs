//! HTML rendering for the recipes server.
//!
//! - [`MarkdownRenderer`] converts article markdown to an HTML fragment.
//! - [`render_page`] wraps a fragment with the shared site layout.
//! - [`STYLESHEET`] is the stylesheet the layout links to.
//!
//! # Example
//!
//! ```
//! use recipes_renderer::{MarkdownRenderer, PageData, render_page};
//!
//! let result = MarkdownRenderer::new()
//!     .with_title_extraction()
//!     .render_markdown("# Routing\n\nHello");
//! let html = render_page(&PageData {
//!     title: result.title,
//!     content_html: result.html,
//!     ..Default::default()
//! });
//! assert!(html.contains("<title>Routing - Sinatra Recipes</title>"));
//! ```

mod layout;
mod markdown;
mod stylesheet;
mod util;

pub use layout::{ChildList, ContributorData, PageData, SITE_TITLE, TocSection, render_page};
pub use markdown::{MarkdownRenderer, RenderResult};
pub use stylesheet::STYLESHEET;
pub use util::{display_name, encode_segment, escape_html};
