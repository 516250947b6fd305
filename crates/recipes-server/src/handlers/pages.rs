//! Page endpoints.
//!
//! Every page is built the same way: a fresh [`PageContext`] from the
//! content index, the page's markdown rendered to HTML, and both wrapped by
//! the site layout.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Html;
use recipes_renderer::render_page;
use recipes_site::{Contributor, PageContext, Route};

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET / (home page with contributors).
pub(crate) async fn get_home(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    let contributors = fetch_contributors(&state).await?;
    let source = state.index.home_readme()?;
    render(&state, Route::Home(contributors), &source)
}

/// Handle GET /p/{topic} (topic landing page).
pub(crate) async fn get_topic(
    Path(topic): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    let source = state.index.topic_readme(&topic)?;
    render(&state, Route::Topic(topic), &source)
}

/// Handle GET /p/{topic}/{article}.
pub(crate) async fn get_article(
    Path((topic, article)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    let source = state.index.article_source(&topic, &article)?;
    render(&state, Route::Article { topic, article }, &source)
}

/// Fetch the contributor list on the blocking pool.
async fn fetch_contributors(state: &AppState) -> Result<Option<Vec<Contributor>>, ServerError> {
    let Some(source) = &state.contributors else {
        return Ok(None);
    };
    let source = Arc::clone(source);
    Ok(tokio::task::spawn_blocking(move || source.fetch()).await??)
}

fn render(state: &AppState, route: Route, source: &str) -> Result<Html<String>, ServerError> {
    let context = PageContext::build(&state.index, route)?;
    let content = state.renderer.render_markdown(source);
    Ok(Html(render_page(&context.into_page_data(content))))
}
