//! [`Viewer`] identification.

use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, RequestPartsExt as _};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use derive_more::Debug;
use jsonwebtoken::{DecodingKey, Validation};
use serde::Deserialize;
use service::domain::user;

/// Verifier of the [JWT]s identifying viewers.
///
/// [JWT]: https://wikipedia.org/wiki/JSON_Web_Token
#[derive(Clone, Debug)]
pub struct Identity {
    /// Key the tokens are signed with.
    #[debug(skip)]
    key: DecodingKey,

    /// Rules the tokens are validated against.
    validation: Validation,
}

impl Identity {
    /// Creates a new [`Identity`] verifying tokens signed with the provided
    /// HMAC `secret`.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    /// Resolves the ID of the [`User`] the provided `token` is issued for.
    ///
    /// Returns [`None`] if the `token` is malformed, forged or expired.
    ///
    /// [`User`]: service::domain::User
    #[must_use]
    pub fn identify(&self, token: &str) -> Option<user::Id> {
        jsonwebtoken::decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims.user_id)
            .map_err(|e| tracing::debug!("rejected identity token: {e}"))
            .ok()
    }
}

/// Claims of an identity token.
#[derive(Deserialize)]
struct Claims {
    /// ID of the identified [`User`].
    ///
    /// [`User`]: service::domain::User
    user_id: user::Id,
}

/// [`User`] viewing the requested page, if identified.
///
/// Never rejects a request: a missing or invalid `Authorization` header
/// makes the viewer anonymous.
///
/// [`User`]: service::domain::User
#[derive(Clone, Copy, Debug)]
pub struct Viewer(pub Option<user::Id>);

#[async_trait]
impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let Ok(TypedHeader(Authorization(bearer))) =
            parts.extract::<TypedHeader<Authorization<Bearer>>>().await
        else {
            return Ok(Self(None));
        };
        let Some(identity) = parts.extensions.get::<Identity>() else {
            tracing::warn!("missing `Identity` extension");
            return Ok(Self(None));
        };

        Ok(Self(identity.identify(bearer.token())))
    }
}
