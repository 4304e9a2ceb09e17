//! [`Query`] listing all [`Area`]s.

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::Area,
    infra::{cache, database, Cache, Database},
    read::{
        area::{Item, Listing},
        Payload,
    },
    Service,
};

use super::Query;

/// [`Query`] listing all [`Area`]s, ordered by their IDs.
#[derive(Clone, Copy, Debug, Default)]
pub struct ListAreas;

impl<Db, Ch> Query<ListAreas> for Service<Db, Ch>
where
    Db: Database<
        Select<By<Vec<Area>, ()>>,
        Ok = Vec<Area>,
        Err = Traced<database::Error>,
    >,
    Ch: Cache<
            Select<By<Option<Payload>, cache::Key>>,
            Ok = Option<Payload>,
            Err = Traced<cache::Error>,
        > + Cache<Insert<cache::Entry>, Ok = (), Err = Traced<cache::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: ListAreas) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let key = cache::Key::areas();
        if let Some(areas) = self.cached(key.clone()).await {
            return Ok(Listing { areas });
        }

        let areas = self
            .fetch::<Vec<Area>, _>(())
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if areas.is_empty() {
            return Err(tracerr::new!(E::NoData));
        }

        let items = areas.into_iter().map(Item::from).collect::<Vec<_>>();
        let areas =
            Payload::new(&items).map_err(tracerr::from_and_wrap!(=> E))?;

        self.populate(cache::Entry {
            key,
            payload: areas.clone(),
            ttl: self.config().ttl.areas,
        })
        .await;

        Ok(Listing { areas })
    }
}

/// Error of [`ListAreas`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// No [`Area`]s exist.
    #[display("No `Area`s exist")]
    #[from(ignore)]
    NoData,

    /// [`Area`]s cannot be serialized.
    #[display("Failed to serialize `Area`s: {_0}")]
    Serialization(serde_json::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        infra::database::memory::Memory,
        query::fixture::{area, service, TTL_SECS},
        Query as _,
    };

    use super::{ExecutionError, ListAreas};

    #[tokio::test]
    async fn serves_second_read_from_cache_verbatim() {
        let svc = service(Memory {
            areas: vec![area(2, "Shanghai"), area(1, "Beijing")],
            ..Memory::default()
        });

        let first = svc.execute(ListAreas).await.unwrap();
        let second = svc.execute(ListAreas).await.unwrap();

        assert_eq!(
            first.areas.as_str(),
            r#"[{"area_id":1,"name":"Beijing"},{"area_id":2,"name":"Shanghai"}]"#,
        );
        assert_eq!(first.areas.as_str(), second.areas.as_str());
        assert_eq!(svc.database().queries(), 1);

        let (stored, ttl) = svc.cache().get("area_info").unwrap();
        assert_eq!(stored, first.areas.as_str());
        assert_eq!(ttl, TTL_SECS);
    }

    #[tokio::test]
    async fn wraps_areas_into_object() {
        let svc = service(Memory {
            areas: vec![area(1, "Beijing")],
            ..Memory::default()
        });

        let listing = svc.execute(ListAreas).await.unwrap();

        assert_eq!(
            serde_json::to_string(&listing).unwrap(),
            r#"{"areas":[{"area_id":1,"name":"Beijing"}]}"#,
        );
    }

    #[tokio::test]
    async fn reports_no_data_without_caching() {
        let svc = service(Memory::default());

        let err = svc.execute(ListAreas).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NoData));
        assert!(svc.cache().get("area_info").is_none());
        assert_eq!(svc.cache().writes(), 0);
    }

    #[tokio::test]
    async fn treats_malformed_cache_as_miss() {
        let svc = service(Memory {
            areas: vec![area(1, "Beijing")],
            ..Memory::default()
        });
        svc.cache().put_raw("area_info", "[{\"area_id\":");

        let listing = svc.execute(ListAreas).await.unwrap();

        assert_eq!(listing.areas.as_str(), r#"[{"area_id":1,"name":"Beijing"}]"#);
        assert_eq!(svc.database().queries(), 1);
    }

    #[cfg(feature = "redis")]
    #[tokio::test]
    async fn serves_areas_over_unreachable_redis() {
        use crate::{infra::Redis, query::fixture::config, Service};

        let redis = Redis::new("redis://127.0.0.1:1").unwrap();
        let svc = Service::new(
            config(),
            Memory {
                areas: vec![area(1, "Beijing")],
                ..Memory::default()
            },
            redis,
        );

        let first = svc.execute(ListAreas).await.unwrap();
        let second = svc.execute(ListAreas).await.unwrap();

        assert_eq!(first.areas.as_str(), r#"[{"area_id":1,"name":"Beijing"}]"#);
        assert_eq!(first.areas.as_str(), second.areas.as_str());
        assert_eq!(svc.database().queries(), 2);
    }

    #[tokio::test]
    async fn fails_on_unresponsive_store() {
        let db = Memory {
            areas: vec![area(1, "Beijing")],
            ..Memory::default()
        };
        db.stall();
        let svc = service(db);

        let err = svc.execute(ListAreas).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Db(_)));
        assert_eq!(svc.cache().writes(), 0);
    }
}
