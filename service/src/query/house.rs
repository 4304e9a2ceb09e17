//! [`Query`] of a [`House`] detail page.

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::House;
use crate::{
    domain::{house, user},
    infra::{cache, database, Cache, Database},
    read::{
        house::{Detail, DetailView, Full, FullSelector},
        Payload,
    },
    Service,
};

use super::Query;

/// [`Query`] of a [`House`] detail page.
#[derive(Clone, Copy, Debug)]
pub struct HouseDetail {
    /// ID of the [`House`] to show.
    pub house_id: house::Id,

    /// ID of the [`User`] viewing the page, if identified.
    ///
    /// [`User`]: crate::domain::User
    pub viewer: Option<user::Id>,
}

impl<Db, Ch> Query<HouseDetail> for Service<Db, Ch>
where
    Db: Database<
        Select<By<Option<Full>, FullSelector>>,
        Ok = Option<Full>,
        Err = Traced<database::Error>,
    >,
    Ch: Cache<
            Select<By<Option<Payload>, cache::Key>>,
            Ok = Option<Payload>,
            Err = Traced<cache::Error>,
        > + Cache<Insert<cache::Entry>, Ok = (), Err = Traced<cache::Error>>,
{
    type Ok = DetailView;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        query: HouseDetail,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let HouseDetail { house_id, viewer } = query;

        // The viewer is never cached, so all of them share the entry.
        let key = cache::Key::house(house_id);
        if let Some(house) = self.cached(key.clone()).await {
            return Ok(DetailView {
                user_id: viewer,
                house,
            });
        }

        let full = self
            .fetch::<Option<Full>, _>(FullSelector {
                id: house_id,
                comments_limit: self.config().comments_limit,
            })
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::HouseNotExists(house_id))
            .map_err(tracerr::wrap!())?;
        let detail = Detail::new(full, &self.config().image_url_prefix);
        let house =
            Payload::new(&detail).map_err(tracerr::from_and_wrap!(=> E))?;

        self.populate(cache::Entry {
            key,
            payload: house.clone(),
            ttl: self.config().ttl.house,
        })
        .await;

        Ok(DetailView {
            user_id: viewer,
            house,
        })
    }
}

/// Error of [`HouseDetail`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`House`] doesn't exist.
    #[display("`House(id: {_0})` does not exist")]
    #[from(ignore)]
    HouseNotExists(#[error(not(source))] house::Id),

    /// [`Detail`] page cannot be serialized.
    #[display("Failed to serialize `House` detail: {_0}")]
    Serialization(serde_json::Error),
}
