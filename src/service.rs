//! The bounded append-log operations.
//!
//! Both operations read the whole list, change it in memory and write it back. The store offers no
//! conditional write, so two appends racing on the same document can lose one of the entries; the
//! last write wins.

use crate::{
    entry::{
        now_millis,
        LogEntry,
        Timestamp,
    },
    error::AppError,
    log::LogList,
    request::AppendRequest,
    store::{
        get_typed,
        set_typed,
        SharedStore,
    },
};

/// Key of the single document holding the list
pub const ENTRIES_KEY: &str = "entries";

/// Result of a successful append
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appended {
    pub entry: LogEntry,
    pub entries: LogList,
}

#[derive(Clone)]
pub struct LogService {
    store: SharedStore,
    clock: fn() -> Timestamp,
}

impl LogService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            clock: now_millis,
        }
    }

    /// Replaces the wall clock, mostly for tests
    pub fn with_clock(mut self, clock: fn() -> Timestamp) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the stored list, seeding and persisting the sample entries on first use
    pub async fn fetch_entries(&self) -> Result<LogList, AppError> {
        if let Some(entries) = get_typed::<LogList>(self.store.as_ref(), ENTRIES_KEY).await? {
            return Ok(entries);
        }

        let seed = LogList::seed((self.clock)());
        set_typed(self.store.as_ref(), ENTRIES_KEY, &seed).await?;
        tracing::info!("Seeded empty log with {} sample entries", seed.len());
        Ok(seed)
    }

    /// Validates the request, prepends the resolved entry and persists the capped list
    pub async fn append_entry(&self, req: &AppendRequest) -> Result<Appended, AppError> {
        req.validate()?;

        // Resolve before touching the store so the thread-local rng is not held across an await
        let entry = req.resolve(&mut rand::thread_rng(), (self.clock)());

        let mut entries = get_typed::<LogList>(self.store.as_ref(), ENTRIES_KEY)
            .await?
            .unwrap_or_default();
        entries.push_front(entry.clone());
        set_typed(self.store.as_ref(), ENTRIES_KEY, &entries).await?;

        tracing::info!(
            "Appended {} @ {} ({} entries)",
            entry.name,
            entry.location,
            entries.len()
        );
        Ok(Appended { entry, entries })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::{
        log::MAX_ENTRIES,
        store::{
            BlobStore,
            MemoryStore,
        },
        tables::{
            APPLIANCES,
            LOCATIONS,
        },
    };

    const NOW: Timestamp = 1_700_000_000_000;

    fn fixed_clock() -> Timestamp {
        NOW
    }

    fn service() -> (LogService, MemoryStore) {
        let store = MemoryStore::new();
        let service = LogService::new(Arc::new(store.clone())).with_clock(fixed_clock);
        (service, store)
    }

    fn custom(name: &str, location: &str) -> AppendRequest {
        AppendRequest {
            custom_name: Some(name.into()),
            custom_location: Some(location.into()),
            email: Some("me@example.com".into()),
        }
    }

    #[tokio::test]
    async fn first_fetch_seeds_once() {
        let (service, store) = service();

        let first = service.fetch_entries().await.unwrap();
        assert_eq!(first, LogList::seed(NOW));
        assert_eq!(store.write_count(), 1);

        let second = service.fetch_entries().await.unwrap();
        assert_eq!(second, first);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn fetch_returns_an_empty_stored_list_without_seeding() {
        let (service, store) = service();
        store.set_json(ENTRIES_KEY, &json!([])).await.unwrap();

        assert!(service.fetch_entries().await.unwrap().is_empty());
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn append_to_empty_store_does_not_seed() {
        let (service, _store) = service();
        let appended = service.append_entry(&custom("Foo", "Bar")).await.unwrap();

        assert_eq!(appended.entry, LogEntry::new("Foo", "Bar", NOW));
        assert_eq!(appended.entries.entries(), [appended.entry.clone()]);
    }

    #[tokio::test]
    async fn append_prepends_to_seeded_list() {
        let (service, _store) = service();
        service.fetch_entries().await.unwrap();

        let appended = service.append_entry(&custom("Foo", "Bar")).await.unwrap();
        assert_eq!(appended.entries.len(), 5);
        assert_eq!(appended.entries.first(), Some(&appended.entry));
        assert_eq!(service.fetch_entries().await.unwrap(), appended.entries);
    }

    #[tokio::test]
    async fn invalid_request_leaves_store_untouched() {
        let (service, store) = service();
        let req = AppendRequest {
            custom_name: Some("Foo".into()),
            ..Default::default()
        };

        assert!(matches!(
            service.append_entry(&req).await,
            Err(AppError::InvalidEmail)
        ));
        assert_eq!(store.write_count(), 0);
        assert_eq!(store.get_json(ENTRIES_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn random_entry_comes_from_the_tables() {
        let (service, _store) = service();
        let appended = service
            .append_entry(&AppendRequest::default())
            .await
            .unwrap();
        assert!(APPLIANCES.contains(&appended.entry.name.as_str()));
        assert!(LOCATIONS.contains(&appended.entry.location.as_str()));
        assert_eq!(appended.entry.timestamp, NOW);
    }

    #[tokio::test]
    async fn list_is_capped_at_the_most_recent_entries() {
        let (service, _store) = service();
        for i in 0..(MAX_ENTRIES + 20) {
            service
                .append_entry(&custom(&format!("n{i}"), "x"))
                .await
                .unwrap();
        }

        let entries = service.fetch_entries().await.unwrap();
        assert_eq!(entries.len(), MAX_ENTRIES);
        assert_eq!(entries.entries()[0].name, format!("n{}", MAX_ENTRIES + 19));
        assert_eq!(entries.entries()[MAX_ENTRIES - 1].name, "n20");
    }

    #[tokio::test]
    async fn corrupt_document_is_a_store_error() {
        let (service, store) = service();
        store.set_json(ENTRIES_KEY, &json!("oops")).await.unwrap();

        assert!(matches!(
            service.fetch_entries().await,
            Err(AppError::Store(_))
        ));
        assert!(matches!(
            service.append_entry(&AppendRequest::default()).await,
            Err(AppError::Store(_))
        ));
    }
}
