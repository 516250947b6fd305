//! Topic and article index derived from the content tree.
//!
//! Nothing is cached: every call lists the tree again, so the index always
//! reflects the current state of the content root.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use recipes_storage::{ContentTree, StorageError};

use crate::ignore::IgnoreSet;

/// Topic name → article names.
pub type TableOfContents = BTreeMap<String, Vec<String>>;

const MARKDOWN_EXT: &str = ".md";
const README: &str = "README";

/// Error returned by index and page operations.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Topic name is not a single path segment.
    #[error("Invalid topic: {0:?}")]
    InvalidTopic(String),
    /// Article name is not a single path segment.
    #[error("Invalid article: {0:?}")]
    InvalidArticle(String),
    /// Content tree failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SiteError {
    /// Whether the error should be answered as "not found".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::InvalidTopic(_) | Self::InvalidArticle(_) => true,
            Self::Storage(e) => e.is_not_found(),
        }
    }
}

/// Index over a content tree.
#[derive(Clone)]
pub struct ContentIndex {
    tree: Arc<dyn ContentTree>,
    ignore: IgnoreSet,
}

impl ContentIndex {
    /// Create an index over `tree`.
    pub fn new(tree: Arc<dyn ContentTree>, ignore: IgnoreSet) -> Self {
        Self { tree, ignore }
    }

    /// First-level directories that are not ignored, sorted and unique.
    ///
    /// An unreadable root yields an empty list.
    pub fn list_topics(&self) -> Vec<String> {
        let dirs = match self.tree.dirs() {
            Ok(dirs) => dirs,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list topics");
                return Vec::new();
            }
        };

        let mut topics: Vec<String> = dirs
            .into_iter()
            .filter(|name| !self.ignore.is_ignored(name))
            .collect();
        topics.sort();
        topics.dedup();
        topics
    }

    /// Markdown files grouped by their immediate parent directory.
    ///
    /// Files at the root have no topic and are skipped. README files and
    /// articles named like their topic are dropped. Article order is the walk
    /// order with duplicates removed.
    pub fn table_of_contents(&self) -> TableOfContents {
        let files = match self.tree.markdown_files() {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to scan markdown files");
                return TableOfContents::new();
            }
        };

        let mut toc = TableOfContents::new();
        for path in &files {
            let Some((dir, file)) = path.rsplit_once('/') else {
                continue;
            };
            let topic = dir.rsplit('/').next().unwrap_or(dir);
            let Some(article) = article_name(file) else {
                continue;
            };
            if article == topic {
                continue;
            }

            let articles = toc.entry(topic.to_owned()).or_default();
            if !articles.iter().any(|a| a == article) {
                articles.push(article.to_owned());
            }
        }

        tracing::debug!(topics = toc.len(), files = files.len(), "Built table of contents");
        toc
    }

    /// Articles directly inside `topic`, sorted and unique.
    ///
    /// A missing or unreadable topic directory yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::InvalidTopic`] if `topic` is not a single path segment.
    pub fn list_articles(&self, topic: &str) -> Result<Vec<String>, SiteError> {
        if !is_segment(topic) {
            return Err(SiteError::InvalidTopic(topic.to_owned()));
        }

        let files = match self.tree.files(topic) {
            Ok(files) => files,
            Err(e) if e.is_not_found() => return Ok(Vec::new()),
            Err(e) => {
                tracing::warn!(topic, error = %e, "Failed to list articles");
                return Ok(Vec::new());
            }
        };

        let mut seen = HashSet::new();
        let mut articles: Vec<String> = files
            .iter()
            .filter_map(|file| article_name(file))
            .filter(|name| seen.insert(*name))
            .map(str::to_owned)
            .collect();
        articles.sort();
        Ok(articles)
    }

    /// Markdown source of a topic landing page (`{topic}/README.md`).
    pub fn topic_readme(&self, topic: &str) -> Result<String, SiteError> {
        if !is_segment(topic) {
            return Err(SiteError::InvalidTopic(topic.to_owned()));
        }
        Ok(self.tree.read(&format!("{topic}/{README}{MARKDOWN_EXT}"))?)
    }

    /// Markdown source of an article (`{topic}/{article}.md`).
    pub fn article_source(&self, topic: &str, article: &str) -> Result<String, SiteError> {
        if !is_segment(topic) {
            return Err(SiteError::InvalidTopic(topic.to_owned()));
        }
        if !is_segment(article) {
            return Err(SiteError::InvalidArticle(article.to_owned()));
        }
        Ok(self.tree.read(&format!("{topic}/{article}{MARKDOWN_EXT}"))?)
    }

    /// Markdown source of the home page (`README.md`).
    pub fn home_readme(&self) -> Result<String, SiteError> {
        Ok(self.tree.read(&format!("{README}{MARKDOWN_EXT}"))?)
    }
}

/// Article name for a markdown file name, or `None` if it is not an article.
fn article_name(file: &str) -> Option<&str> {
    let name = file.strip_suffix(MARKDOWN_EXT)?;
    (!name.is_empty() && !name.contains(README)).then_some(name)
}

/// Whether `name` is a single, non-special path segment.
pub(crate) fn is_segment(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use recipes_config::IgnoreMatch;
    use recipes_storage::MockContentTree;

    use super::*;

    fn index(tree: MockContentTree) -> ContentIndex {
        ContentIndex::new(Arc::new(tree), IgnoreSet::default())
    }

    #[test]
    fn test_list_topics_excludes_ignored() {
        let index = index(
            MockContentTree::new()
                .with_dir("routing")
                .with_dir("config")
                .with_dir("Config")
                .with_dir("models"),
        );

        assert_eq!(index.list_topics(), vec!["models", "routing"]);
    }

    #[test]
    fn test_list_topics_exact_keeps_mylog() {
        let index = index(MockContentTree::new().with_dir("mylog").with_dir("log"));

        assert_eq!(index.list_topics(), vec!["mylog"]);
    }

    #[test]
    fn test_list_topics_substring_drops_mylog() {
        let tree = MockContentTree::new().with_dir("mylog").with_dir("routing");
        let ignore = IgnoreSet::new(["log"], IgnoreMatch::Substring);
        let index = ContentIndex::new(Arc::new(tree), ignore);

        assert_eq!(index.list_topics(), vec!["routing"]);
    }

    #[test]
    fn test_list_topics_unavailable_root() {
        let index = index(MockContentTree::new().with_dir("routing").unavailable());

        assert!(index.list_topics().is_empty());
    }

    #[test]
    fn test_table_of_contents_dedupes_and_drops_readme() {
        let index = index(
            MockContentTree::new()
                .with_file("guides/README.md", "# Guides")
                .with_file("guides/basics.md", "# Basics")
                .with_file("guides/basics.md", "# Basics again"),
        );

        let expected = TableOfContents::from([("guides".to_owned(), vec!["basics".to_owned()])]);
        assert_eq!(index.table_of_contents(), expected);
    }

    #[test]
    fn test_table_of_contents_groups_by_parent() {
        let index = index(
            MockContentTree::new()
                .with_file("README.md", "# Home")
                .with_file("routing/routing.md", "# Self")
                .with_file("routing/nested.md", "")
                .with_file("routing/advanced/filters.md", "")
                .with_file("models/datamapper.md", "")
                .with_file("models/notes.txt", ""),
        );

        let toc = index.table_of_contents();

        assert_eq!(
            toc.keys().collect::<Vec<_>>(),
            vec!["advanced", "models", "routing"]
        );
        assert_eq!(toc["routing"], vec!["nested"]);
        assert_eq!(toc["advanced"], vec!["filters"]);
        assert_eq!(toc["models"], vec!["datamapper"]);
    }

    #[test]
    fn test_table_of_contents_is_idempotent() {
        let index = index(
            MockContentTree::new()
                .with_file("routing/b.md", "")
                .with_file("routing/a.md", "")
                .with_file("models/c.md", ""),
        );

        assert_eq!(index.table_of_contents(), index.table_of_contents());
    }

    #[test]
    fn test_list_articles_sorted_without_readme() {
        let index = index(
            MockContentTree::new()
                .with_file("guides/README.md", "")
                .with_file("guides/Z.md", "")
                .with_file("guides/A.md", "")
                .with_file("guides/image.png", ""),
        );

        assert_eq!(index.list_articles("guides").unwrap(), vec!["A", "Z"]);
    }

    #[test]
    fn test_list_articles_missing_topic_is_empty() {
        let index = index(MockContentTree::new().with_dir("routing"));

        assert!(index.list_articles("missing").unwrap().is_empty());
    }

    #[test]
    fn test_list_articles_unavailable_tree_is_empty() {
        let index = index(
            MockContentTree::new()
                .with_file("routing/README.md", "# Routing")
                .with_file("routing/filters.md", "")
                .unavailable(),
        );

        assert!(index.list_articles("routing").unwrap().is_empty());
    }

    #[test]
    fn test_list_articles_rejects_traversal() {
        let index = index(MockContentTree::new().with_file("routing/a.md", ""));

        for topic in ["..", ".", "", "a/b", "a\\b"] {
            let err = index.list_articles(topic).unwrap_err();
            assert!(matches!(err, SiteError::InvalidTopic(_)), "topic: {topic:?}");
            assert!(err.is_not_found());
        }
    }

    #[test]
    fn test_article_source() {
        let index = index(MockContentTree::new().with_file("routing/nested.md", "# Nested"));

        assert_eq!(index.article_source("routing", "nested").unwrap(), "# Nested");
        assert!(index.article_source("routing", "missing").unwrap_err().is_not_found());
        assert!(matches!(
            index.article_source("routing", ".."),
            Err(SiteError::InvalidArticle(_))
        ));
        assert!(matches!(
            index.article_source("..", "nested"),
            Err(SiteError::InvalidTopic(_))
        ));
    }

    #[test]
    fn test_readmes() {
        let index = index(
            MockContentTree::new()
                .with_file("README.md", "# Home")
                .with_file("routing/README.md", "# Routing"),
        );

        assert_eq!(index.home_readme().unwrap(), "# Home");
        assert_eq!(index.topic_readme("routing").unwrap(), "# Routing");
        assert!(index.topic_readme("models").unwrap_err().is_not_found());
    }

    #[test]
    fn test_filesystem_tree() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir(root.join("routing")).unwrap();
        std::fs::create_dir(root.join("config")).unwrap();
        std::fs::write(root.join("routing").join("README.md"), "").unwrap();
        std::fs::write(root.join("routing").join("nested.md"), "").unwrap();
        std::fs::write(root.join("config").join("settings.md"), "").unwrap();

        let tree = recipes_storage_fs::FsContentTree::new(root.to_path_buf());
        let index = ContentIndex::new(Arc::new(tree), IgnoreSet::default());

        assert_eq!(index.list_topics(), vec!["routing"]);
        assert_eq!(index.list_articles("routing").unwrap(), vec!["nested"]);
        assert_eq!(index.table_of_contents()["config"], vec!["settings"]);
    }
}
