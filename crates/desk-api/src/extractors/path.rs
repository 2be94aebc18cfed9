//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use desk_core::value_objects::TicketId;

use crate::response::ApiError;

/// Ticket id from the last path segment
///
/// Anything that is not an integer id is treated as an unknown route (`404`).
#[derive(Debug, Clone, Copy)]
pub struct TicketIdPath(pub TicketId);

#[async_trait]
impl<S> FromRequestParts<S> for TicketIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;

        raw.parse::<i64>()
            .map(|id| TicketIdPath(TicketId::new(id)))
            .map_err(|_| ApiError::NotFound)
    }
}
