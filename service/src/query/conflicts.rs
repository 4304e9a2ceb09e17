//! [`Query`] resolving booking conflicts.

use common::operations::{By, Select};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::House;
use crate::{
    domain::Order,
    infra::{database, Database},
    read::search::{Conflicts, DateRange},
    Service,
};

use super::Query;

/// [`Query`] of the [`House`]s having an [`Order`] intersecting the
/// [`DateRange`].
#[derive(Clone, Copy, Debug)]
pub struct ResolveConflicts(pub DateRange);

impl<Db, Ch> Query<ResolveConflicts> for Service<Db, Ch>
where
    Db: Database<
        Select<By<Vec<Order>, DateRange>>,
        Ok = Vec<Order>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Conflicts;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        ResolveConflicts(range): ResolveConflicts,
    ) -> Result<Self::Ok, Self::Err> {
        if range.is_unbounded() {
            return Ok(Conflicts::default());
        }

        let orders = self
            .fetch::<Vec<Order>, _>(range)
            .await
            .map_err(tracerr::wrap!())?;
        Ok(Conflicts::collect(&range, orders))
    }
}
