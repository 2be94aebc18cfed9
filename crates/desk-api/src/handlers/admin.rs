//! Admin panel handlers

use axum::{extract::State, response::Redirect, Json};
use axum_extra::extract::cookie::SignedCookieJar;
use desk_service::{AdminPage, AdminTicketResponse, TicketService, UpdateStatusRequest, UserSummary};

use super::paths;
use crate::extractors::{AdminUser, FormData, TicketIdPath};
use crate::flash;
use crate::response::ApiResult;
use crate::state::AppState;

/// Every ticket with its owner
///
/// GET /admin
pub async fn admin_panel(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    jar: SignedCookieJar,
) -> ApiResult<(SignedCookieJar, Json<AdminPage>)> {
    let tickets = TicketService::new(state.service_context())
        .list_all(&admin)
        .await?;

    let (jar, messages) = flash::take(jar);
    let page = AdminPage::new(
        UserSummary::from(&admin),
        tickets.into_iter().map(AdminTicketResponse::from).collect(),
        messages,
    );
    Ok((jar, Json(page)))
}

/// Change a ticket's status
///
/// POST /update_status/{id} (form: status)
pub async fn update_status(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    TicketIdPath(ticket_id): TicketIdPath,
    jar: SignedCookieJar,
    FormData(request): FormData<UpdateStatusRequest>,
) -> ApiResult<(SignedCookieJar, Redirect)> {
    match TicketService::new(state.service_context())
        .update_status(&admin, ticket_id, request)
        .await
    {
        Ok(()) => Ok((jar, Redirect::to(paths::ADMIN))),
        Err(e) if e.is_form_error() => {
            Ok((flash::push(jar, e.user_message()), Redirect::to(paths::ADMIN)))
        }
        Err(e) => Err(e.into()),
    }
}
