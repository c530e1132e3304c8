//! Post-save redirect reconciliation.
//!
//! After a content item is saved, its redirect source is checked against the
//! item's own path and against the redirect store:
//!
//! 1. source and destination canonicalize to the same URL: self-loop error;
//! 2. a redirect already claims the source path: duplicate error, unless the
//!    item is being updated and the match carries the item's own id;
//! 3. otherwise a `301` redirect from the source to the item is created.
//!
//! The store lookup always runs, even after a self-loop was found, and a
//! self-loop always wins over a duplicate.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::canonical::{same_target, CanonicalUrl, INTERNAL_SCHEME};
use crate::host::{EntityKind, HostEntity};
use crate::ports::{Message, MessageSink, PortError, RedirectStore};
use crate::redirect::{
    Destination, NewRedirect, RedirectRecord, DEFAULT_EDIT_PATH, DEFAULT_STATUS_CODE,
};
use crate::source::RedirectSourceValue;

/// Store failures surfaced to the caller, who should fail the host save.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The duplicate lookup failed.
    #[error("redirect store unavailable while looking up {path:?}: {source}")]
    StoreUnavailable {
        /// Source path being looked up.
        path: String,
        /// Error reported by the store.
        #[source]
        source: PortError,
    },
    /// Writing the new redirect failed.
    #[error("failed to persist redirect for {path:?}: {source}")]
    PersistenceFailure {
        /// Source path of the redirect being created.
        path: String,
        /// Error reported by the store.
        #[source]
        source: PortError,
    },
}

/// What a reconciliation decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconciliationOutcome {
    /// The source points back at the item itself.
    SelfLoop {
        /// The offending source path.
        source_path: String,
    },
    /// Another redirect already claims the source path.
    Duplicate {
        /// The contested source path.
        source_path: String,
        /// Id of the first matching record.
        existing_id: u64,
        /// Edit-form link of that record.
        edit_link: String,
    },
    /// The item is re-saving the redirect that already carries its id.
    AlreadyRedirected {
        /// Id of the matching record.
        record_id: u64,
    },
    /// A new redirect was written.
    Created {
        /// The persisted record.
        record: RedirectRecord,
    },
}

/// Reconciles a host item's redirect source with the redirect store.
pub struct Reconciler<'a> {
    store: &'a dyn RedirectStore,
    sink: &'a dyn MessageSink,
    status_code: u16,
    edit_path_template: String,
}

impl<'a> Reconciler<'a> {
    /// Creates a reconciler writing to `store` and notifying through `sink`.
    #[must_use]
    pub fn new(store: &'a dyn RedirectStore, sink: &'a dyn MessageSink) -> Self {
        Self {
            store,
            sink,
            status_code: DEFAULT_STATUS_CODE,
            edit_path_template: DEFAULT_EDIT_PATH.to_string(),
        }
    }

    /// Overrides the status code given to created redirects.
    #[must_use]
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Overrides the edit-form template used in duplicate messages.
    #[must_use]
    pub fn with_edit_path(mut self, template: impl Into<String>) -> Self {
        self.edit_path_template = template.into();
        self
    }

    /// Runs reconciliation for one save of `host`.
    ///
    /// Returns `Ok(None)` for config items and empty source values; neither
    /// touches the store nor emits a message. Otherwise exactly one outcome
    /// is returned and at most one message is emitted.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError`] when the store lookup or write fails.
    /// Malformed paths are not errors.
    pub fn reconcile<H>(
        &self,
        value: &RedirectSourceValue,
        host: &H,
    ) -> Result<Option<ReconciliationOutcome>, ReconcileError>
    where
        H: HostEntity + ?Sized,
    {
        if host.kind() != EntityKind::Content {
            debug!(host_id = host.id(), "skipping redirect reconciliation for config item");
            return Ok(None);
        }
        if value.is_empty() {
            debug!(host_id = host.id(), "no redirect source set");
            return Ok(None);
        }

        let source_path = value.path();
        let redirect_uri = redirect_uri(host);

        let source_url = CanonicalUrl::from_internal_path(source_path);
        let redirect_url = CanonicalUrl::from_uri(&redirect_uri);
        for (side, parsed) in [("source", &source_url), ("destination", &redirect_url)] {
            if let Err(err) = parsed {
                debug!(side, %err, "not comparing malformed URL");
            }
        }

        let same = same_target(&source_url, &redirect_url);
        if same {
            warn!(source_path, %redirect_uri, "redirect source points at its own item");
            self.sink.emit(&Message::error(format!(
                "The source path {source_path} is attempting to redirect the page to itself. \
                 This will result in an infinite loop."
            )));
        }

        let existing = self.store.find_by_source_path(source_path).map_err(|source| {
            ReconcileError::StoreUnavailable { path: source_path.to_string(), source }
        })?;

        if let Some(first) = existing.into_iter().next() {
            if same {
                debug!(source_path, existing_id = first.id, "self-loop takes precedence");
                return Ok(Some(ReconciliationOutcome::SelfLoop {
                    source_path: source_path.to_string(),
                }));
            }
            if host.is_new() || first.id != host.id() {
                let edit_link = first.edit_link(&self.edit_path_template);
                warn!(source_path, existing_id = first.id, "source path already redirected");
                self.sink.emit(&Message::error(format!(
                    "The source path {source_path} is already being redirected. \
                     Do you want to edit the existing redirect ({edit_link})?"
                )));
                return Ok(Some(ReconciliationOutcome::Duplicate {
                    source_path: source_path.to_string(),
                    existing_id: first.id,
                    edit_link,
                }));
            }
            debug!(source_path, record_id = first.id, "item already owns this redirect");
            return Ok(Some(ReconciliationOutcome::AlreadyRedirected { record_id: first.id }));
        }

        if same {
            return Ok(Some(ReconciliationOutcome::SelfLoop {
                source_path: source_path.to_string(),
            }));
        }

        let draft = NewRedirect {
            source: value.clone(),
            destination: Destination {
                uri: redirect_uri,
                title: host.title().filter(|title| !title.is_empty()).map(str::to_string),
            },
            status_code: self.status_code,
        };
        let record = self.store.create(draft).map_err(|source| {
            ReconcileError::PersistenceFailure { path: source_path.to_string(), source }
        })?;
        info!(source_path, record_id = record.id, "created redirect");
        self.sink.emit(&Message::status(format!("The redirect {source_path} has been saved.")));

        Ok(Some(ReconciliationOutcome::Created { record }))
    }
}

/// Destination URI for a host item: `internal:/<internal path>`.
#[must_use]
pub fn redirect_uri<H>(host: &H) -> String
where
    H: HostEntity + ?Sized,
{
    format!("{INTERNAL_SCHEME}/{}", host.internal_path().trim_start_matches('/'))
}
