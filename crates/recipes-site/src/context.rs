//! Per-request page context.
//!
//! A [`PageContext`] is the read-only data every page needs besides its own
//! content: the topic menu, the table of contents and, depending on the
//! route, the child articles of a topic or the contributor list.

use recipes_renderer::{ChildList, ContributorData, PageData, RenderResult, TocSection};
use serde::{Deserialize, Serialize};

use crate::index::{ContentIndex, SiteError, TableOfContents, is_segment};

/// A person listed in the home page footer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    #[serde(default)]
    pub gravatar_id: String,
}

/// The page being rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// Home page, with the contributor list if it could be fetched.
    Home(Option<Vec<Contributor>>),
    /// Topic landing page.
    Topic(String),
    /// Single article.
    Article { topic: String, article: String },
}

/// Data shared by every page layout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PageContext {
    /// Topic menu.
    pub menu: Vec<String>,
    /// Table of contents.
    pub toc: TableOfContents,
    /// Articles of the requested topic (topic pages only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
    /// Contributor list (home page only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributors: Option<Vec<Contributor>>,
    /// Whether to invite readers to contribute a missing recipe.
    pub show_missing_recipe_footer: bool,
    /// Requested topic, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl PageContext {
    /// Build the context for `route` from the current content tree.
    ///
    /// Fails when a topic or article is not a valid name, or when the topic
    /// directory cannot be listed.
    pub fn build(index: &ContentIndex, route: Route) -> Result<Self, SiteError> {
        let mut context = Self {
            menu: index.list_topics(),
            toc: index.table_of_contents(),
            ..Self::default()
        };

        match route {
            Route::Home(contributors) => {
                context.contributors = contributors;
            }
            Route::Topic(topic) => {
                context.children = Some(index.list_articles(&topic)?);
                context.show_missing_recipe_footer = true;
                context.topic = Some(topic);
            }
            Route::Article { topic, article } => {
                if !is_segment(&article) {
                    return Err(SiteError::InvalidArticle(article));
                }
                context.topic = Some(topic);
            }
        }

        Ok(context)
    }

    /// Combine the context with rendered content into layout data.
    #[must_use]
    pub fn into_page_data(self, content: RenderResult) -> PageData {
        let children = match (self.children, self.topic) {
            (Some(articles), Some(topic)) => Some(ChildList { topic, articles }),
            _ => None,
        };

        PageData {
            title: content.title,
            content_html: content.html,
            menu: self.menu,
            toc: self
                .toc
                .into_iter()
                .map(|(topic, articles)| TocSection { topic, articles })
                .collect(),
            children,
            show_missing_recipe_footer: self.show_missing_recipe_footer,
            contributors: self.contributors.map(|list| {
                list.into_iter()
                    .map(|c| ContributorData {
                        login: c.login,
                        gravatar_id: c.gravatar_id,
                    })
                    .collect()
            }),
        }
    }
}
