//! Attachment downloads

use axum::{
    body::Body,
    extract::{Path, Request, State},
    response::Response,
};
use desk_service::TicketService;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::extractors::CurrentUser;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Stream a stored attachment to its ticket's owner or an admin
///
/// GET /uploads/{filename}
pub async fn download(
    State(state): State<AppState>,
    CurrentUser { user, .. }: CurrentUser,
    Path(filename): Path<String>,
    request: Request,
) -> ApiResult<Response> {
    let path = TicketService::new(state.service_context())
        .open_attachment(&user, &filename)
        .await?;

    let response = ServeFile::new(path)
        .oneshot(request)
        .await
        .map_err(ApiError::internal)?;

    Ok(response.map(Body::new))
}
