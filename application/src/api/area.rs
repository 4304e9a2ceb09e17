//! Area-related HTTP API handlers.

use axum::Extension;
use service::{
    query::{areas, ListAreas},
    read::area::Listing,
    Query as _,
};

use crate::{api::DataError, AsError, Error, Service};

use super::Reply;

/// Lists all the areas.
#[tracing::instrument(skip_all)]
pub async fn list(
    Extension(service): Extension<Service>,
) -> Result<Reply<Listing>, Error> {
    service
        .execute(ListAreas)
        .await
        .map(Reply::new)
        .map_err(AsError::into_error)
}

impl AsError for areas::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NoData => Some(DataError::NoData.into()),
            Self::Serialization(_) => None,
        }
    }
}
