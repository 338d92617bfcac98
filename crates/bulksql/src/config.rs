//! Repository configuration.

use crate::describe::DEFAULT_SCHEME;
use serde::Deserialize;

/// Settings shared by every statement a [`Repository`](crate::Repository) runs.
///
/// Deserializable, so it can live inside an application's own config file:
///
/// ```ignore
/// #[derive(Deserialize)]
/// struct AppConfig {
///     database_url: String,
///     #[serde(default)]
///     repo: bulksql::RepoConfig,
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    /// Naming scheme used to resolve wire names.
    pub scheme: String,
    /// Truncate logged SQL to this many bytes. `None` means no truncation.
    pub sql_log_max_length: Option<usize>,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            sql_log_max_length: Some(200),
        }
    }
}

impl RepoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve wire names with another naming scheme.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Set maximum SQL length to log.
    pub fn sql_log_max_length(mut self, len: usize) -> Self {
        self.sql_log_max_length = Some(len);
        self
    }

    /// Log SQL in full.
    pub fn no_truncate(mut self) -> Self {
        self.sql_log_max_length = None;
        self
    }

    pub(crate) fn truncate_sql<'a>(&self, sql: &'a str) -> std::borrow::Cow<'a, str> {
        match self.sql_log_max_length {
            Some(max) if sql.len() > max => {
                let mut end = max;
                while end > 0 && !sql.is_char_boundary(end) {
                    end -= 1;
                }
                format!("{}...", &sql[..end]).into()
            }
            _ => sql.into(),
        }
    }
}
