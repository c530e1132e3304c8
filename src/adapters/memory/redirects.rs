//! Redirect store kept in memory.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::FixedClock;
use crate::ports::{Clock, PortError, RedirectStore};
use crate::redirect::{NewRedirect, RedirectRecord};

/// Holds redirects in insertion order and counts lookups.
pub struct MemoryRedirectStore {
    records: Mutex<Vec<RedirectRecord>>,
    lookups: AtomicUsize,
    clock: Box<dyn Clock>,
}

impl Default for MemoryRedirectStore {
    fn default() -> Self {
        Self::with_clock(Box::new(FixedClock::new(DateTime::<Utc>::default())))
    }
}

impl MemoryRedirectStore {
    /// Creates an empty store whose records are stamped at the Unix epoch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store stamping records with `clock`.
    #[must_use]
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self { records: Mutex::default(), lookups: AtomicUsize::new(0), clock }
    }

    /// Number of `find_by_source_path` calls served.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    fn records(&self) -> Result<std::sync::MutexGuard<'_, Vec<RedirectRecord>>, PortError> {
        self.records.lock().map_err(|e| format!("redirect store lock poisoned: {e}").into())
    }
}

impl RedirectStore for MemoryRedirectStore {
    fn find_by_source_path(&self, path: &str) -> Result<Vec<RedirectRecord>, PortError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.records()?.iter().filter(|r| r.source_path() == path).cloned().collect())
    }

    fn create(&self, redirect: NewRedirect) -> Result<RedirectRecord, PortError> {
        let mut records = self.records()?;
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let record = RedirectRecord {
            id,
            uuid: format!("memory-{id}"),
            source: redirect.source,
            destination: redirect.destination,
            status_code: redirect.status_code,
            created: self.clock.now(),
        };
        records.push(record.clone());
        Ok(record)
    }

    fn list(&self) -> Result<Vec<RedirectRecord>, PortError> {
        let mut records = self.records()?.clone();
        records.sort_by_key(|r| r.id);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::redirect::Destination;
    use crate::source::RedirectSourceValue;

    fn draft(path: &str) -> NewRedirect {
        NewRedirect {
            source: RedirectSourceValue::from_path(path).unwrap(),
            destination: Destination { uri: "internal:/node/1".into(), title: None },
            status_code: 301,
        }
    }

    #[test]
    fn created_records_are_found_by_exact_path() {
        let store = MemoryRedirectStore::new();
        let first = store.create(draft("old")).unwrap();
        let second = store.create(draft("older")).unwrap();

        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(store.find_by_source_path("old").unwrap(), vec![first]);
        assert!(store.find_by_source_path("/old").unwrap().is_empty());
        assert_eq!(store.lookups(), 2);
    }

    #[test]
    fn records_are_stamped_by_the_clock() {
        assert_eq!(
            MemoryRedirectStore::new().create(draft("old")).unwrap().created,
            DateTime::<Utc>::default()
        );

        let instant = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        let store = MemoryRedirectStore::with_clock(Box::new(FixedClock::new(instant)));
        assert_eq!(store.create(draft("old")).unwrap().created, instant);
    }
}
