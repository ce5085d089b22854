use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::models::GeolocationData;

/// Outbound port resolving a free-text address to coordinates.
///
/// Implementations make a single attempt and never retry. Every expected
/// failure (missing credentials, network errors, non-success responses,
/// empty results, cancellation) collapses to `None`; implementations may log
/// the specific cause but must not surface it.
#[async_trait]
pub trait GeolocationLookup: Send + Sync + 'static {
    async fn resolve(&self, address: &str, cancel: &CancellationToken)
        -> Option<GeolocationData>;
}
