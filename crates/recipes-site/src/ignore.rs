//! Topic directory exclusion.

use recipes_config::IgnoreMatch;

/// Names excluded from the topic menu when nothing is configured.
pub const DEFAULT_IGNORED_DIRS: [&str; 5] = ["tmp", "log", "config", "public", "bin"];

/// Case-insensitive predicate deciding which directories are not topics.
#[derive(Clone, Debug)]
pub struct IgnoreSet {
    fragments: Vec<String>,
    mode: IgnoreMatch,
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORED_DIRS, IgnoreMatch::Exact)
    }
}

impl IgnoreSet {
    /// Create an ignore set from name fragments.
    pub fn new<I, S>(fragments: I, mode: IgnoreMatch) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            fragments: fragments
                .into_iter()
                .map(|f| f.as_ref().to_lowercase())
                .filter(|f| !f.is_empty())
                .collect(),
            mode,
        }
    }

    /// Whether `name` is excluded.
    #[must_use]
    pub fn is_ignored(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        match self.mode {
            IgnoreMatch::Exact => self.fragments.iter().any(|f| *f == name),
            IgnoreMatch::Substring => self.fragments.iter().any(|f| name.contains(f.as_str())),
        }
    }
}
