//! House-related HTTP API handlers.

use axum::{
    extract::{rejection::QueryRejection, Path, Query},
    Extension,
};
use common::page;
use serde::Deserialize;
use service::{
    domain::house,
    query::{self, HomeHighlights, HouseDetail, SearchHouses},
    read::{
        house::{DetailView, Highlights},
        search::Filter,
        Payload,
    },
    Query as _,
};

use crate::{api::DataError, AsError, Error, Service};

use super::{Reply, Viewer};

/// Lists the most booked houses for the home page.
#[tracing::instrument(skip_all)]
pub async fn index(
    Extension(service): Extension<Service>,
) -> Result<Reply<Highlights>, Error> {
    service
        .execute(HomeHighlights)
        .await
        .map(Reply::new)
        .map_err(AsError::into_error)
}

/// Shows the detail page of a single house.
#[tracing::instrument(skip(service))]
pub async fn detail(
    Extension(service): Extension<Service>,
    Path(house_id): Path<String>,
    Viewer(viewer): Viewer,
) -> Result<Reply<DetailView>, Error> {
    let house_id = house_id
        .parse::<house::Id>()
        .map_err(AsError::into_error)?;

    service
        .execute(HouseDetail { house_id, viewer })
        .await
        .map(Reply::new)
        .map_err(AsError::into_error)
}

/// Query parameters of a [`search`] request.
///
/// Empty values are treated as absent ones.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// ID of the area to search in.
    pub aid: Option<String>,

    /// First day of the stay, as `YYYY-MM-DD`.
    pub sd: Option<String>,

    /// Last day of the stay, as `YYYY-MM-DD`.
    pub ed: Option<String>,

    /// Sort key.
    pub sk: Option<String>,

    /// Requested page number, `1` by default.
    pub p: Option<String>,
}

impl SearchParams {
    /// Validates these [`SearchParams`] into a [`SearchHouses`] query.
    ///
    /// # Errors
    ///
    /// If any of the parameters is malformed.
    pub fn into_query(self) -> Result<SearchHouses, Error> {
        let Self { aid, sd, ed, sk, p } = self;

        let filter = Filter::parse(
            aid.as_deref(),
            sd.as_deref(),
            ed.as_deref(),
            sk.as_deref(),
        )
        .map_err(AsError::into_error)?;
        let page = p
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(str::parse::<page::Number>)
            .transpose()
            .map_err(AsError::into_error)?
            .unwrap_or_default();

        Ok(SearchHouses { filter, page })
    }
}

/// Searches houses page by page.
#[tracing::instrument(skip(service))]
pub async fn search(
    Extension(service): Extension<Service>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Reply<Payload>, Error> {
    let Query(params) = params.map_err(AsError::into_error)?;
    let query = params.into_query()?;

    service
        .execute(query)
        .await
        .map(Reply::new)
        .map_err(AsError::into_error)
}

impl AsError for QueryRejection {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::params(&self.body_text()))
    }
}

impl AsError for query::home::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Serialization(_) => None,
        }
    }
}

impl AsError for query::house::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::HouseNotExists(_) => Some(DataError::HouseNotExists.into()),
            Self::Serialization(_) => None,
        }
    }
}

impl AsError for query::search::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Serialization(_) => None,
        }
    }
}

#[cfg(test)]
mod spec {
    use common::page;

    use super::SearchParams;

    fn params(
        aid: &str,
        sd: &str,
        ed: &str,
        sk: &str,
        p: &str,
    ) -> SearchParams {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_owned());
        SearchParams {
            aid: opt(aid),
            sd: opt(sd),
            ed: opt(ed),
            sk: opt(sk),
            p: opt(p),
        }
    }

    #[test]
    fn defaults_to_first_page() {
        let query = SearchParams::default().into_query().unwrap();

        assert_eq!(query.page, page::Number::FIRST);
        assert!(query.filter.area.is_none());
        assert!(query.filter.dates.is_unbounded());
    }

    #[test]
    fn treats_empty_page_as_absent() {
        let query = SearchParams {
            p: Some(String::new()),
            ..SearchParams::default()
        }
        .into_query()
        .unwrap();

        assert_eq!(query.page, page::Number::FIRST);
    }

    #[test]
    fn parses_all_params() {
        let query = params("3", "2024-01-10", "2024-01-15", "booking", "2")
            .into_query()
            .unwrap();

        assert_eq!(query.page.get(), 2);
        assert_eq!(query.filter.area, Some(3.into()));
        assert!(!query.filter.dates.is_unbounded());
    }

    #[test]
    fn rejects_invalid_params() {
        for p in [
            params("", "", "", "", "0"),
            params("", "", "", "", "-1"),
            params("", "", "", "", "abc"),
            params("", "2024-13-01", "", "", ""),
            params("", "2024-01-15", "2024-01-10", "", ""),
            params("abc", "", "", "", ""),
        ] {
            let err = p.into_query().unwrap_err();

            assert_eq!(err.code, "4103", "{err}");
            assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
        }
    }
}
