use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use std::convert::Infallible;
use toolhub_core::AccessToken;

/// Bearer token from the `Authorization` header, if one was sent.
///
/// Never rejects: a missing or malformed header is simply "no session",
/// and the Session Gate decides what that means for the route.
#[derive(Debug, Clone, Default)]
pub struct BearerToken(pub Option<AccessToken>);

impl BearerToken {
    pub fn as_ref(&self) -> Option<&AccessToken> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(AccessToken::from_bearer);
        Ok(Self(token))
    }
}
