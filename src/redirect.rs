//! Redirect records as kept by a redirect store.

use chrono::{DateTime, Utc};

use crate::source::RedirectSourceValue;

/// Status code used for redirects created from a source value.
pub const DEFAULT_STATUS_CODE: u16 = 301;

/// Default location of the edit form for a stored redirect.
pub const DEFAULT_EDIT_PATH: &str = "/admin/config/search/redirect/edit/{id}";

/// Where a redirect sends the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Target URI, e.g. `internal:/node/5`.
    pub uri: String,
    /// Optional link title, copied from the host item.
    pub title: Option<String>,
}

/// A redirect that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRedirect {
    /// Path (and query) the redirect triggers on.
    pub source: RedirectSourceValue,
    /// Redirect target.
    pub destination: Destination,
    /// HTTP status code to answer with.
    pub status_code: u16,
}

/// A persisted redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRecord {
    /// Store-assigned identifier.
    pub id: u64,
    /// Stable unique identifier.
    pub uuid: String,
    /// Path (and query) the redirect triggers on.
    pub source: RedirectSourceValue,
    /// Redirect target.
    pub destination: Destination,
    /// HTTP status code to answer with.
    pub status_code: u16,
    /// When the record was created.
    pub created: DateTime<Utc>,
}

impl RedirectRecord {
    /// Source path the record triggers on.
    #[must_use]
    pub fn source_path(&self) -> &str {
        self.source.path()
    }

    /// Edit-form link for this record, filling `{id}` in `template`.
    #[must_use]
    pub fn edit_link(&self, template: &str) -> String {
        template.replace("{id}", &self.id.to_string())
    }
}
