use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Per-request cancellation token
///
/// The token is cancelled when the extractor is dropped, which happens when
/// the handler finishes or when the client goes away and axum drops the
/// request future.
pub struct RequestCancellation {
    token: CancellationToken,
    _guard: DropGuard,
}

impl RequestCancellation {
    pub fn new() -> Self {
        let token = CancellationToken::new();
        let guard = token.clone().drop_guard();
        Self {
            token,
            _guard: guard,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Default for RequestCancellation {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> FromRequestParts<S> for RequestCancellation
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::new())
    }
}
