//! In-memory [`Cache`] used in tests.

use std::{
    collections::HashMap,
    future,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    infra::{
        cache::{self, bucket, Entry, Key},
        Cache,
    },
    read::Payload,
};

/// Stored value along with its TTL in seconds.
type Stored<T> = (T, u64);

/// In-memory [`Cache`] able to simulate an unresponsive server.
#[derive(Debug, Default)]
pub(crate) struct Memory {
    /// Plain entries by their keys.
    entries: Mutex<HashMap<String, Stored<String>>>,

    /// Search buckets by their keys.
    buckets: Mutex<HashMap<String, Stored<HashMap<u32, String>>>>,

    /// Whether reads never complete.
    stalled_reads: AtomicBool,

    /// Whether writes never complete.
    stalled_writes: AtomicBool,

    /// Number of completed writes.
    writes: AtomicUsize,
}

impl Memory {
    /// Makes reads hang forever.
    pub(crate) fn stall_reads(&self) {
        self.stalled_reads.store(true, Ordering::SeqCst);
    }

    /// Makes writes hang forever.
    pub(crate) fn stall_writes(&self) {
        self.stalled_writes.store(true, Ordering::SeqCst);
    }

    /// Stores the `raw` value under the `key` bypassing any validation.
    pub(crate) fn put_raw(&self, key: &str, raw: &str) {
        drop(
            self.entries
                .lock()
                .unwrap()
                .insert(key.into(), (raw.into(), u64::MAX)),
        );
    }

    /// Stores the `raw` value as the `page` of the bucket under the `key`
    /// bypassing any validation.
    pub(crate) fn put_raw_page(&self, key: &str, page: u32, raw: &str) {
        let mut buckets = self.buckets.lock().unwrap();
        let (pages, _) = buckets
            .entry(key.into())
            .or_insert_with(|| (HashMap::new(), u64::MAX));
        drop(pages.insert(page, raw.into()));
    }

    /// Returns the value stored under the `key` along with its TTL.
    pub(crate) fn get(&self, key: &str) -> Option<Stored<String>> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Returns the `page` stored in the bucket under the `key` along with the
    /// bucket's TTL.
    pub(crate) fn page(&self, key: &str, page: u32) -> Option<Stored<String>> {
        let buckets = self.buckets.lock().unwrap();
        let (pages, ttl) = buckets.get(key)?;
        pages.get(&page).map(|p| (p.clone(), *ttl))
    }

    /// Returns the number of completed writes.
    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Hangs forever if the `flag` is set.
    async fn maybe_stall(flag: &AtomicBool) {
        if flag.load(Ordering::SeqCst) {
            future::pending::<()>().await;
        }
    }
}

/// Parses a raw stored value, if any.
fn parse(raw: Option<String>) -> Result<Option<Payload>, Traced<cache::Error>> {
    raw.map(Payload::from_json)
        .transpose()
        .map_err(tracerr::from_and_wrap!(=> cache::Error))
}

impl Cache<Select<By<Option<Payload>, Key>>> for Memory {
    type Ok = Option<Payload>;
    type Err = Traced<cache::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Payload>, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        Self::maybe_stall(&self.stalled_reads).await;

        parse(self.get(by.as_inner().as_ref()).map(|(raw, _)| raw))
    }
}

impl Cache<Insert<Entry>> for Memory {
    type Ok = ();
    type Err = Traced<cache::Error>;

    async fn execute(
        &self,
        Insert(entry): Insert<Entry>,
    ) -> Result<Self::Ok, Self::Err> {
        Self::maybe_stall(&self.stalled_writes).await;

        let Entry { key, payload, ttl } = entry;
        drop(self.entries.lock().unwrap().insert(
            key.to_string(),
            (payload.as_str().into(), ttl.secs()),
        ));
        _ = self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Cache<Select<By<Option<Payload>, bucket::Slot>>> for Memory {
    type Ok = Option<Payload>;
    type Err = Traced<cache::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Payload>, bucket::Slot>>,
    ) -> Result<Self::Ok, Self::Err> {
        Self::maybe_stall(&self.stalled_reads).await;

        let bucket::Slot { key, page } = by.into_inner();
        parse(self.page(key.as_ref(), page.get()).map(|(raw, _)| raw))
    }
}

impl Cache<Insert<bucket::PageEntry>> for Memory {
    type Ok = ();
    type Err = Traced<cache::Error>;

    async fn execute(
        &self,
        Insert(entry): Insert<bucket::PageEntry>,
    ) -> Result<Self::Ok, Self::Err> {
        Self::maybe_stall(&self.stalled_writes).await;

        let bucket::PageEntry {
            slot: bucket::Slot { key, page },
            payload,
            ttl,
        } = entry;
        let mut buckets = self.buckets.lock().unwrap();
        let (pages, bucket_ttl) =
            buckets.entry(key.to_string()).or_default();
        drop(pages.insert(page.get(), payload.as_str().into()));
        *bucket_ttl = ttl.secs();
        _ = self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
