//! [`Query`] definition.
//!
//! Every [`Query`] reads through the [`Cache`] first, falling back to the
//! [`Database`] on a miss and populating the [`Cache`] afterwards. An
//! unavailable [`Cache`] only degrades latency, never failing a [`Query`].

pub mod areas;
pub mod conflicts;
#[cfg(test)]
mod fixture;
pub mod home;
pub mod house;
pub mod search;

use std::fmt;

use common::operations::{By, Insert, Select};
use tokio::time;
use tracerr::Traced;

use crate::{
    infra::{cache, database, Cache, Database},
    read::Payload,
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

pub use self::{
    areas::ListAreas, conflicts::ResolveConflicts, home::HomeHighlights,
    house::HouseDetail, search::SearchHouses,
};

impl<Db, Ch> Service<Db, Ch> {
    /// Looks up the [`Payload`] stored in the [`Cache`] under the provided
    /// `key`.
    ///
    /// Any [`Cache`] failure is logged and treated as a miss.
    async fn cached<K>(&self, key: K) -> Option<Payload>
    where
        K: fmt::Display,
        Ch: Cache<
            Select<By<Option<Payload>, K>>,
            Ok = Option<Payload>,
            Err = Traced<cache::Error>,
        >,
    {
        let label = key.to_string();
        let res = time::timeout(
            self.config().cache_timeout,
            self.cache().execute(Select(By::new(key))),
        )
        .await
        .map_err(tracerr::from_and_wrap!(=> cache::Error))
        .and_then(|res| res.map_err(tracerr::wrap!()));

        match res {
            Ok(Some(payload)) => {
                tracing::debug!(key = %label, "cache hit");
                Some(payload)
            }
            Ok(None) => {
                tracing::debug!(key = %label, "cache miss");
                None
            }
            Err(e) => {
                tracing::warn!(key = %label, "failed to read cache: {e}");
                None
            }
        }
    }

    /// Stores the provided `entry` in the [`Cache`].
    ///
    /// Any [`Cache`] failure is logged and ignored.
    async fn populate<E>(&self, entry: E)
    where
        E: fmt::Display,
        Ch: Cache<Insert<E>, Ok = (), Err = Traced<cache::Error>>,
    {
        let label = entry.to_string();
        let res = time::timeout(
            self.config().cache_timeout,
            self.cache().execute(Insert(entry)),
        )
        .await
        .map_err(tracerr::from_and_wrap!(=> cache::Error))
        .and_then(|res| res.map_err(tracerr::wrap!()));

        if let Err(e) = res {
            tracing::warn!(key = %label, "failed to populate cache: {e}");
        }
    }

    /// [`Select`]s a `W` by the provided `B` from the [`Database`].
    ///
    /// # Errors
    ///
    /// If the [`Database`] fails or doesn't respond in time.
    async fn fetch<W, B>(&self, by: B) -> Result<W, Traced<database::Error>>
    where
        Db: Database<Select<By<W, B>>, Ok = W, Err = Traced<database::Error>>,
    {
        let res = time::timeout(
            self.config().store_timeout,
            self.database().execute(Select(By::new(by))),
        )
        .await
        .map_err(tracerr::from_and_wrap!(=> database::Error))
        .and_then(|res| res.map_err(tracerr::wrap!()));

        if let Err(e) = &res {
            tracing::error!("`Database` operation failed: {e}");
        }
        res
    }
}
