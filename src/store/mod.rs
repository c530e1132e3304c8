//! File-backed redirect store.
//!
//! Records live outside any content database and go through the
//! `FileSystem` port for all I/O. Directory layout:
//!
//! ```text
//! <root>/
//!   ├── redirects/<id>.yaml
//!   └── path_index.yaml
//! ```
//!
//! The source query is written as an opaque blob and decoded exactly once
//! when a record is read back. `path_index.yaml` maps the first
//! [`PATH_INDEX_PREFIX`] characters of each source path to record ids, so a
//! lookup only loads records that can possibly match.
//!
//! A record is only written once the index lists it. An index entry without
//! a record file is skipped on lookup, so a failed write never leaves a
//! record the index cannot find.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::context::ServiceContext;
use crate::ports::{PortError, RedirectStore};
use crate::redirect::{Destination, NewRedirect, RedirectRecord};
use crate::source::{RedirectSourceValue, SourceError};

/// Number of leading path characters covered by the lookup index.
pub const PATH_INDEX_PREFIX: usize = 50;

const RECORD_DIR: &str = "redirects";
const INDEX_FILE: &str = "path_index.yaml";

/// Failures of the file-backed store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file could not be read or a directory listed.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: PortError,
    },
    /// A file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// File involved.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: PortError,
    },
    /// A file's YAML could not be parsed.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// File involved.
        path: PathBuf,
        /// YAML error.
        #[source]
        source: serde_yaml::Error,
    },
    /// A record or the index could not be serialized.
    #[error("failed to serialize redirect store data: {0}")]
    Serialize(#[source] serde_yaml::Error),
    /// A record's source column failed its codec.
    #[error("redirect {id} has an invalid source: {source}")]
    Codec {
        /// Record id.
        id: u64,
        /// Codec error.
        #[source]
        source: SourceError,
    },
}

/// On-disk shape of a record: flat columns, query kept as a blob.
#[derive(Debug, Serialize, Deserialize)]
struct StoredRedirect {
    id: u64,
    uuid: String,
    source_path: String,
    #[serde(default)]
    source_query: String,
    destination_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    destination_title: Option<String>,
    status_code: u16,
    created: DateTime<Utc>,
}

impl StoredRedirect {
    fn encode(record: &RedirectRecord) -> Result<Self, StoreError> {
        let source_query = if record.source.query().is_empty() {
            String::new()
        } else {
            record
                .source
                .query()
                .encode_blob()
                .map_err(|source| StoreError::Codec { id: record.id, source })?
        };
        Ok(Self {
            id: record.id,
            uuid: record.uuid.clone(),
            source_path: record.source.path().to_string(),
            source_query,
            destination_uri: record.destination.uri.clone(),
            destination_title: record.destination.title.clone(),
            status_code: record.status_code,
            created: record.created,
        })
    }

    fn decode(self) -> Result<RedirectRecord, StoreError> {
        let source = RedirectSourceValue::from_stored(self.source_path, &self.source_query)
            .map_err(|source| StoreError::Codec { id: self.id, source })?;
        Ok(RedirectRecord {
            id: self.id,
            uuid: self.uuid,
            source,
            destination: Destination { uri: self.destination_uri, title: self.destination_title },
            status_code: self.status_code,
            created: self.created,
        })
    }
}

type PathIndex = BTreeMap<String, Vec<u64>>;

/// Redirect store persisting one YAML file per record.
pub struct FileRedirectStore<'a> {
    ctx: &'a ServiceContext,
    root: PathBuf,
}

impl<'a> FileRedirectStore<'a> {
    /// Creates a store rooted at `root`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, root: &Path) -> Self {
        Self { ctx, root: root.to_path_buf() }
    }

    /// Loads a record by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the record file is missing or invalid.
    pub fn load(&self, id: u64) -> Result<RedirectRecord, StoreError> {
        let path = self.record_path(id);
        let contents = self
            .ctx
            .fs
            .read_to_string(&path)
            .map_err(|source| StoreError::Read { path: path.clone(), source })?;
        let stored: StoredRedirect = serde_yaml::from_str(&contents)
            .map_err(|source| StoreError::Parse { path, source })?;
        stored.decode()
    }

    /// Ids of all stored records, ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the record directory cannot be listed.
    pub fn ids(&self) -> Result<Vec<u64>, StoreError> {
        let dir = self.root.join(RECORD_DIR);
        if !self.ctx.fs.exists(&dir) {
            return Ok(Vec::new());
        }
        let names = self
            .ctx
            .fs
            .list_dir(&dir)
            .map_err(|source| StoreError::Read { path: dir.clone(), source })?;
        let mut ids: Vec<u64> = names
            .iter()
            .filter_map(|name| name.strip_suffix(".yaml"))
            .filter_map(|stem| stem.parse().ok())
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn find(&self, path: &str) -> Result<Vec<RedirectRecord>, StoreError> {
        let index = self.load_index()?;
        let Some(candidates) = index.get(&index_key(path)) else {
            return Ok(Vec::new());
        };
        debug!(path, candidates = candidates.len(), "path index hit");

        let mut matches = Vec::new();
        for id in candidates {
            if !self.ctx.fs.exists(&self.record_path(*id)) {
                debug!(id, "skipping index entry without a record");
                continue;
            }
            let record = self.load(*id)?;
            if record.source_path() == path {
                matches.push(record);
            }
        }
        matches.sort_by_key(|r| r.id);
        Ok(matches)
    }

    fn insert(&self, redirect: NewRedirect) -> Result<RedirectRecord, StoreError> {
        let id = self.ids()?.last().map_or(1, |last| last + 1);
        let record = RedirectRecord {
            id,
            uuid: self.ctx.id_gen.generate_id(),
            source: redirect.source,
            destination: redirect.destination,
            status_code: redirect.status_code,
            created: self.ctx.clock.now(),
        };

        let yaml = serde_yaml::to_string(&StoredRedirect::encode(&record)?)
            .map_err(StoreError::Serialize)?;

        let mut index = self.load_index()?;
        let ids = index.entry(index_key(record.source_path())).or_default();
        // An earlier failed write may have left this id behind.
        if !ids.contains(&id) {
            ids.push(id);
        }
        self.save_index(&index)?;

        let path = self.record_path(id);
        self.ctx.fs.write(&path, &yaml).map_err(|source| StoreError::Write { path, source })?;

        debug!(id, path = record.source_path(), "stored redirect");
        Ok(record)
    }

    fn all(&self) -> Result<Vec<RedirectRecord>, StoreError> {
        self.ids()?.into_iter().map(|id| self.load(id)).collect()
    }

    /// Reads the path index, rebuilding it from the records when absent.
    fn load_index(&self) -> Result<PathIndex, StoreError> {
        let path = self.root.join(INDEX_FILE);
        if !self.ctx.fs.exists(&path) {
            return self.rebuild_index();
        }
        let contents = self
            .ctx
            .fs
            .read_to_string(&path)
            .map_err(|source| StoreError::Read { path: path.clone(), source })?;
        serde_yaml::from_str(&contents).map_err(|source| StoreError::Parse { path, source })
    }

    fn rebuild_index(&self) -> Result<PathIndex, StoreError> {
        let mut index = PathIndex::new();
        for record in self.all()? {
            index.entry(index_key(record.source_path())).or_default().push(record.id);
        }
        Ok(index)
    }

    fn save_index(&self, index: &PathIndex) -> Result<(), StoreError> {
        let yaml = serde_yaml::to_string(index).map_err(StoreError::Serialize)?;
        let path = self.root.join(INDEX_FILE);
        self.ctx.fs.write(&path, &yaml).map_err(|source| StoreError::Write { path, source })
    }

    fn record_path(&self, id: u64) -> PathBuf {
        self.root.join(RECORD_DIR).join(format!("{id}.yaml"))
    }
}

impl RedirectStore for FileRedirectStore<'_> {
    fn find_by_source_path(&self, path: &str) -> Result<Vec<RedirectRecord>, PortError> {
        Ok(self.find(path)?)
    }

    fn create(&self, redirect: NewRedirect) -> Result<RedirectRecord, PortError> {
        Ok(self.insert(redirect)?)
    }

    fn list(&self) -> Result<Vec<RedirectRecord>, PortError> {
        Ok(self.all()?)
    }
}

fn index_key(path: &str) -> String {
    path.chars().take(PATH_INDEX_PREFIX).collect()
}
