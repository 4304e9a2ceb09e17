//! [`Query`] of the home page highlights.

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::House;
use crate::{
    infra::{cache, database, Cache, Database},
    read::{
        house::{Basic, Highlights, Summary, TopBooked},
        Payload,
    },
    Service,
};

use super::Query;

/// [`Query`] of the most booked [`House`]s having a primary image.
#[derive(Clone, Copy, Debug, Default)]
pub struct HomeHighlights;

impl<Db, Ch> Query<HomeHighlights> for Service<Db, Ch>
where
    Db: Database<
        Select<By<Vec<Summary>, TopBooked>>,
        Ok = Vec<Summary>,
        Err = Traced<database::Error>,
    >,
    Ch: Cache<
            Select<By<Option<Payload>, cache::Key>>,
            Ok = Option<Payload>,
            Err = Traced<cache::Error>,
        > + Cache<Insert<cache::Entry>, Ok = (), Err = Traced<cache::Error>>,
{
    type Ok = Highlights;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: HomeHighlights) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let key = cache::Key::home_page();
        if let Some(houses) = self.cached(key.clone()).await {
            return Ok(Highlights { houses });
        }

        let prefix = &self.config().image_url_prefix;
        // Houses without a primary image are skipped, so fewer than the
        // limit may be highlighted.
        let basics = self
            .fetch::<Vec<Summary>, _>(TopBooked {
                limit: self.config().home_page_houses,
            })
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .iter()
            .filter(|s| s.house.index_image.is_some())
            .map(|s| Basic::new(s, prefix))
            .collect::<Vec<_>>();
        let houses =
            Payload::new(&basics).map_err(tracerr::from_and_wrap!(=> E))?;

        self.populate(cache::Entry {
            key,
            payload: houses.clone(),
            ttl: self.config().ttl.home_page,
        })
        .await;

        Ok(Highlights { houses })
    }
}

/// Error of [`HomeHighlights`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Highlights cannot be serialized.
    #[display("Failed to serialize highlights: {_0}")]
    Serialization(serde_json::Error),
}
