//! [`Query`] of a search results page.

use common::{
    operations::{By, Insert, Select},
    page, Page,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::House;
use crate::{
    domain::Order,
    infra::{
        cache::{self, bucket},
        database, Cache, Database,
    },
    read::{
        house::{Basic, Summary},
        search::{DateRange, Filter, Listing, Plan},
        Payload,
    },
    Service,
};

use super::{Query, ResolveConflicts};

/// [`Query`] of a single page of [`House`]s matching the [`Filter`].
///
/// Results are served as a whole serialized [`Listing`].
#[derive(Clone, Copy, Debug)]
pub struct SearchHouses {
    /// Search criteria.
    pub filter: Filter,

    /// Requested page.
    pub page: page::Number,
}

impl<Db, Ch> Query<SearchHouses> for Service<Db, Ch>
where
    Db: Database<
            Select<By<Vec<Order>, DateRange>>,
            Ok = Vec<Order>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Page<Summary>, Plan>>,
            Ok = Page<Summary>,
            Err = Traced<database::Error>,
        >,
    Ch: Cache<
            Select<By<Option<Payload>, bucket::Slot>>,
            Ok = Option<Payload>,
            Err = Traced<cache::Error>,
        > + Cache<
            Insert<bucket::PageEntry>,
            Ok = (),
            Err = Traced<cache::Error>,
        >,
{
    type Ok = Payload;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        query: SearchHouses,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SearchHouses { filter, page } = query;

        let slot = bucket::Slot {
            key: bucket::Key::search(&filter),
            page,
        };
        if let Some(listing) = self.cached(slot.clone()).await {
            if !listing.is_envelope() {
                return Ok(listing);
            }
            tracing::debug!(slot = %slot, "replacing legacy search page");
        }

        let conflicts = self
            .execute(ResolveConflicts(filter.dates))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let plan = Plan::new(&filter, conflicts, page, self.config().page_size);
        let Page { items, total } = self
            .fetch::<Page<Summary>, _>(plan)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let prefix = &self.config().image_url_prefix;
        let listing = Listing {
            houses: items.iter().map(|s| Basic::new(s, prefix)).collect(),
            total_page: total,
            current_page: page,
        };
        let payload =
            Payload::new(&listing).map_err(tracerr::from_and_wrap!(=> E))?;

        // Pages beyond the last one are served, but never cached.
        if page.is_within(total) {
            self.populate(bucket::PageEntry {
                slot,
                payload: payload.clone(),
                ttl: self.config().ttl.search,
            })
            .await;
        }

        Ok(payload)
    }
}

/// Error of [`SearchHouses`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Listing`] cannot be serialized.
    #[display("Failed to serialize search results: {_0}")]
    Serialization(serde_json::Error),
}
