//! HTTP API definitions.

pub mod area;
pub mod house;
pub mod viewer;

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::define_error;

pub use self::viewer::{Identity, Viewer};

/// Builds the [`Router`] serving all the HTTP API routes.
///
/// The returned [`Router`] expects [`Service`] and [`Identity`] extensions
/// to be provided.
///
/// [`Service`]: crate::Service
pub fn router() -> Router {
    Router::new()
        .route("/api/v1.0/areas", get(area::list))
        .route("/api/v1.0/houses", get(house::search))
        .route("/api/v1.0/houses/index", get(house::index))
        .route("/api/v1.0/houses/:house_id", get(house::detail))
}

/// Successful HTTP API response carrying the `data`.
#[derive(Debug, Serialize)]
pub struct Reply<T> {
    /// Always `"0"`.
    errno: &'static str,

    /// Always `"OK"`.
    errmsg: &'static str,

    /// Response data.
    data: T,
}

impl<T> Reply<T> {
    /// Wraps the provided `data` into a new [`Reply`].
    pub const fn new(data: T) -> Self {
        Self {
            errno: "0",
            errmsg: "OK",
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

define_error! {
    enum DataError {
        #[code = "4002"]
        #[status = NOT_FOUND]
        #[message = "No data"]
        NoData,

        #[code = "4002"]
        #[status = NOT_FOUND]
        #[message = "House does not exist"]
        HouseNotExists,
    }
}
