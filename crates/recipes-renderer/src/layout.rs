//! Shared page layout.
//!
//! Wraps rendered article HTML with the site header, topic menu, table of
//! contents, child-article list and footer. Every interpolated string is
//! escaped; link targets are percent-encoded per path segment.

use std::fmt::Write;

use crate::util::{display_name, encode_segment, escape_html};

/// Site name shown in the header and the document title.
pub const SITE_TITLE: &str = "Sinatra Recipes";

const SITE_TAGLINE: &str = "Community contributed recipes and techniques";
const LOGO_URL: &str =
    "https://github.com/sinatra/resources/raw/master/logo/sinatra-classic-156.png";
const FAVICON_URL: &str = "https://github.com/sinatra/resources/raw/master/logo/favicon.ico";
const PROJECT_README_URL: &str = "https://github.com/sinatra/sinatra-recipes#readme";

/// One topic of the table of contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TocSection {
    pub topic: String,
    pub articles: Vec<String>,
}

/// Articles of the topic being displayed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChildList {
    pub topic: String,
    pub articles: Vec<String>,
}

/// Contributor avatar entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContributorData {
    pub login: String,
    pub gravatar_id: String,
}

/// All data needed to render a page.
#[derive(Clone, Debug, Default)]
pub struct PageData {
    /// Article title (from its first H1), if any.
    pub title: Option<String>,
    /// Rendered article HTML.
    pub content_html: String,
    /// Topics shown in the header menu.
    pub menu: Vec<String>,
    /// Table of contents.
    pub toc: Vec<TocSection>,
    /// Child articles (topic pages only).
    pub children: Option<ChildList>,
    /// Show the "Did we miss something?" footer.
    pub show_missing_recipe_footer: bool,
    /// Contributor avatars (home page only).
    pub contributors: Option<Vec<ContributorData>>,
}

/// Render a complete HTML page.
pub fn render_page(page: &PageData) -> String {
    let mut html = String::with_capacity(8192 + page.content_html.len());

    render_head(&mut html, page.title.as_deref());
    html.push_str("<body>\n<a name=\"top\"></a>\n<div class=\"wrapper\">\n");

    render_header(&mut html, &page.menu);
    html.push_str("<div class=\"clear\"></div>\n");

    html.push_str("<div id=\"content\">\n<div id=\"post\">\n<a name=\"article\"></a>\n");
    html.push_str(&page.content_html);
    html.push_str("\n</div>\n</div>\n");

    html.push_str("<div id=\"toc\">\n");
    render_toc(&mut html, &page.toc);
    if let Some(children) = &page.children {
        render_children(&mut html, children);
    }
    html.push_str("</div>\n");

    html.push_str("<div id=\"footer\">\n");
    if page.show_missing_recipe_footer {
        render_missing_recipe(&mut html);
    }
    if let Some(contributors) = &page.contributors {
        render_contributors(&mut html, contributors);
    }
    html.push_str("</div>\n");

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_head(html: &mut String, title: Option<&str>) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta http-equiv=\"X-UA-Compatible\" content=\"IE=edge,chrome=1\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0, \
         maximum-scale=1, user-scalable=no\">\n",
    );
    match title {
        Some(title) if title != SITE_TITLE => {
            let _ = writeln!(
                html,
                "<title>{} - {SITE_TITLE}</title>",
                escape_html(title)
            );
        }
        _ => {
            let _ = writeln!(html, "<title>{SITE_TITLE}</title>");
        }
    }
    html.push_str(
        "<link rel=\"stylesheet\" type=\"text/css\" href=\"/stylesheets/normalize.css\">\n",
    );
    html.push_str("<link rel=\"stylesheet\" type=\"text/css\" href=\"/style.css\">\n");
    html.push_str("<link rel=\"stylesheet\" type=\"text/css\" href=\"/stylesheets/chosen.css\">\n");
    let _ = writeln!(html, "<link rel=\"shortcut icon\" href=\"{FAVICON_URL}\">");
    html.push_str("<script src=\"/javascripts/scale.fix.js\"></script>\n");
    html.push_str(
        "<script src=\"https://ajax.googleapis.com/ajax/libs/jquery/1.5.1/jquery.min.js\"></script>\n",
    );
    html.push_str("<script src=\"/javascripts/chosen.jquery.min.js\"></script>\n");
    html.push_str("</head>\n");
}

fn render_header(html: &mut String, menu: &[String]) {
    html.push_str("<div id=\"header\">\n<a href=\"/\">\n");
    let _ = writeln!(
        html,
        "<div id=\"logo\"><img id=\"logo\" src=\"{LOGO_URL}\" alt=\"Sinatra\"></div>"
    );
    let _ = writeln!(
        html,
        "<div id=\"logoname\">\n<h1>{SITE_TITLE}</h1>\n<h2>{SITE_TAGLINE}</h2>\n</div>"
    );
    html.push_str("</a>\n");

    if !menu.is_empty() {
        html.push_str("<nav>\n");
        for topic in menu {
            let _ = writeln!(
                html,
                "<a href=\"/p/{}\">{}</a>",
                encode_segment(topic),
                escape_html(&display_name(topic))
            );
        }
        html.push_str("</nav>\n");
    }

    html.push_str("</div>\n");
}

fn render_toc(html: &mut String, toc: &[TocSection]) {
    if toc.is_empty() {
        return;
    }

    html.push_str("<dl>\n");
    for section in toc {
        let topic_href = encode_segment(&section.topic);
        let _ = writeln!(
            html,
            "<dt><a href=\"/p/{topic_href}\">{}</a></dt>",
            escape_html(&display_name(&section.topic))
        );
        for article in &section.articles {
            let _ = writeln!(
                html,
                "<dd><a href=\"/p/{topic_href}/{}?#article\">{}</a></dd>",
                encode_segment(article),
                escape_html(&display_name(article))
            );
        }
    }
    html.push_str("</dl>\n");
}

fn render_children(html: &mut String, children: &ChildList) {
    let topic_href = encode_segment(&children.topic);

    html.push_str("<div id=\"children\">\n<ul>\n");
    for article in &children.articles {
        let _ = writeln!(
            html,
            "<li><a href=\"/p/{topic_href}/{}?#article\">{}</a></li>",
            encode_segment(article),
            escape_html(&display_name(article))
        );
    }
    html.push_str("</ul>\n</div>\n");
}

fn render_missing_recipe(html: &mut String) {
    html.push_str("<h2>Did we miss something?</h2>\n");
    html.push_str(
        "<p>It's very possible we've left something out, that's why we need your help! \
         This is a community driven project after all. Feel free to fork the project \
         and send us a pull request to get your recipe or tutorial included in the book.</p>\n",
    );
    let _ = writeln!(
        html,
        "<p>See the <a href=\"{PROJECT_README_URL}\">README</a> for more details.</p>"
    );
}

fn render_contributors(html: &mut String, contributors: &[ContributorData]) {
    html.push_str("<div id=\"contributors\">\n<h2>Contributors</h2>\n");
    html.push_str(
        "<p>These recipes are provided by the following outstanding members of the \
         Sinatra community:</p>\n",
    );
    html.push_str("<dl id=\"contributors\">\n");
    for contributor in contributors {
        let login = escape_html(&contributor.login);
        let _ = writeln!(
            html,
            "<dt><a href=\"https://github.com/{}\"><img src=\"https://www.gravatar.com/avatar/{}?s=50\" alt=\"{login}\" title=\"{login}\"></a></dt>",
            encode_segment(&contributor.login),
            encode_segment(&contributor.gravatar_id),
        );
    }
    html.push_str("</dl>\n</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> PageData {
        PageData {
            title: Some("Routing".to_owned()),
            content_html: "<h1>Routing</h1>".to_owned(),
            menu: vec!["models".to_owned(), "routing".to_owned()],
            toc: vec![TocSection {
                topic: "routing".to_owned(),
                articles: vec!["nested_routes".to_owned()],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_render_page_structure() {
        let html = render_page(&sample_page());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Routing - Sinatra Recipes</title>"));
        assert!(html.contains("<h1>Routing</h1>"));
        assert!(html.contains("<a href=\"/p/models\">Models</a>"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_render_toc_links() {
        let html = render_page(&sample_page());

        assert!(html.contains("<dt><a href=\"/p/routing\">Routing</a></dt>"));
        assert!(html.contains(
            "<dd><a href=\"/p/routing/nested_routes?#article\">Nested routes</a></dd>"
        ));
    }

    #[test]
    fn test_render_children_only_when_present() {
        let mut page = sample_page();
        assert!(!render_page(&page).contains("id=\"children\""));

        page.children = Some(ChildList {
            topic: "routing".to_owned(),
            articles: vec!["basics".to_owned()],
        });
        let html = render_page(&page);
        assert!(html.contains("<li><a href=\"/p/routing/basics?#article\">Basics</a></li>"));
    }

    #[test]
    fn test_render_missing_recipe_footer_flag() {
        let mut page = sample_page();
        assert!(!render_page(&page).contains("Did we miss something?"));

        page.show_missing_recipe_footer = true;
        assert!(render_page(&page).contains("Did we miss something?"));
    }

    #[test]
    fn test_render_contributors() {
        let mut page = sample_page();
        assert!(!render_page(&page).contains("<h2>Contributors</h2>"));

        page.contributors = Some(vec![ContributorData {
            login: "octocat".to_owned(),
            gravatar_id: "abc123".to_owned(),
        }]);
        let html = render_page(&page);
        assert!(html.contains("<h2>Contributors</h2>"));
        assert!(html.contains("href=\"https://github.com/octocat\""));
        assert!(html.contains("https://www.gravatar.com/avatar/abc123?s=50"));
    }

    #[test]
    fn test_render_escapes_names() {
        let mut page = sample_page();
        page.menu = vec!["<script>".to_owned()];
        page.title = Some("A & B".to_owned());

        let html = render_page(&page);

        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<title>A &amp; B - Sinatra Recipes</title>"));
        assert!(html.contains("href=\"/p/%3Cscript%3E\""));
    }

    #[test]
    fn test_render_default_title() {
        let page = PageData::default();

        assert!(render_page(&page).contains("<title>Sinatra Recipes</title>"));
    }
}
