//! Redis [`Cache`] implementation.

use std::sync::Arc;

use ::redis::{aio::ConnectionManager, AsyncCommands as _, Client};
use common::operations::{By, Insert, Select};
use derive_more::Debug;
use tokio::sync::OnceCell;
use tracerr::Traced;

use crate::{
    infra::{
        cache::{self, bucket, Entry, Key},
        Cache,
    },
    read::Payload,
};

pub use ::redis::RedisError as Error;

/// Redis [`Cache`] client.
///
/// The connection is established by the first operation, so an unreachable
/// server only fails operations until it comes back. Once established, it is
/// shared by all the clones and re-established automatically when lost.
#[derive(Clone, Debug)]
pub struct Redis {
    /// [`Client`] opening the connection.
    #[debug(skip)]
    client: Client,

    /// Multiplexed connection, once established.
    #[debug(skip)]
    conn: Arc<OnceCell<ConnectionManager>>,
}

impl Redis {
    /// Creates a new [`Redis`] client for the provided `url`.
    ///
    /// Doesn't connect to the server.
    ///
    /// # Errors
    ///
    /// If the `url` is invalid.
    pub fn new(url: &str) -> Result<Self, Traced<cache::Error>> {
        let client =
            Client::open(url).map_err(tracerr::from_and_wrap!(=> cache::Error))?;
        Ok(Self {
            client,
            conn: Arc::default(),
        })
    }

    /// Returns the connection of this [`Redis`] client, establishing it if
    /// it wasn't yet.
    async fn connection(
        &self,
    ) -> Result<ConnectionManager, Traced<cache::Error>> {
        self.conn
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await
            .cloned()
            .map_err(tracerr::from_and_wrap!(=> cache::Error))
    }
}

/// Parses a raw cached value, if any.
fn parse(
    raw: Option<String>,
) -> Result<Option<Payload>, Traced<cache::Error>> {
    raw.map(Payload::from_json)
        .transpose()
        .map_err(tracerr::from_and_wrap!(=> cache::Error))
}

impl Cache<Select<By<Option<Payload>, Key>>> for Redis {
    type Ok = Option<Payload>;
    type Err = Traced<cache::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Payload>, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let key = by.into_inner();

        let mut conn = self.connection().await.map_err(tracerr::wrap!())?;
        let raw: Option<String> = conn
            .get(key.as_ref())
            .await
            .map_err(tracerr::from_and_wrap!(=> cache::Error))?;
        parse(raw).map_err(tracerr::wrap!())
    }
}

impl Cache<Insert<Entry>> for Redis {
    type Ok = ();
    type Err = Traced<cache::Error>;

    async fn execute(
        &self,
        Insert(entry): Insert<Entry>,
    ) -> Result<Self::Ok, Self::Err> {
        let Entry { key, payload, ttl } = entry;

        let mut conn = self.connection().await.map_err(tracerr::wrap!())?;
        conn.set_ex::<_, _, ()>(key.as_ref(), payload.as_str(), ttl.secs())
            .await
            .map_err(tracerr::from_and_wrap!(=> cache::Error))
    }
}

impl Cache<Select<By<Option<Payload>, bucket::Slot>>> for Redis {
    type Ok = Option<Payload>;
    type Err = Traced<cache::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Payload>, bucket::Slot>>,
    ) -> Result<Self::Ok, Self::Err> {
        let bucket::Slot { key, page } = by.into_inner();

        let mut conn = self.connection().await.map_err(tracerr::wrap!())?;
        let raw: Option<String> = conn
            .hget(key.as_ref(), page.get())
            .await
            .map_err(tracerr::from_and_wrap!(=> cache::Error))?;
        parse(raw).map_err(tracerr::wrap!())
    }
}

impl Cache<Insert<bucket::PageEntry>> for Redis {
    type Ok = ();
    type Err = Traced<cache::Error>;

    async fn execute(
        &self,
        Insert(entry): Insert<bucket::PageEntry>,
    ) -> Result<Self::Ok, Self::Err> {
        let bucket::PageEntry {
            slot: bucket::Slot { key, page },
            payload,
            ttl,
        } = entry;
        let secs = i64::try_from(ttl.secs()).unwrap_or(i64::MAX);

        // Both commands are applied in a single `MULTI`/`EXEC`, so the bucket
        // never outlives its expiration.
        let mut conn = self.connection().await.map_err(tracerr::wrap!())?;
        ::redis::pipe()
            .atomic()
            .hset(key.as_ref(), page.get(), payload.as_str())
            .ignore()
            .expire(key.as_ref(), secs)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(tracerr::from_and_wrap!(=> cache::Error))
    }
}
