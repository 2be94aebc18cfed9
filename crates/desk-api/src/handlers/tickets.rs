//! Dashboard and ticket submission handlers

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::Redirect,
    Json,
};
use axum_extra::extract::cookie::SignedCookieJar;
use desk_common::AppError;
use desk_service::{
    CreateTicketRequest, DashboardPage, FormPage, TicketResponse, TicketService, Upload,
    UserSummary,
};

use super::paths;
use crate::extractors::CurrentUser;
use crate::flash;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

const TICKET_CREATED: &str = "Ticket created successfully!";

/// The signed-in user's tickets
///
/// GET /dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentUser { user, .. }: CurrentUser,
    jar: SignedCookieJar,
) -> ApiResult<(SignedCookieJar, Json<DashboardPage>)> {
    let tickets = TicketService::new(state.service_context())
        .list_for_user(&user)
        .await?;

    let (jar, messages) = flash::take(jar);
    let page = DashboardPage::new(
        UserSummary::from(&user),
        tickets.into_iter().map(TicketResponse::from).collect(),
        messages,
    );
    Ok((jar, Json(page)))
}

/// New ticket form
///
/// GET /create_ticket
pub async fn create_ticket_page(
    _current: CurrentUser,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Json<FormPage>) {
    let (jar, messages) = flash::take(jar);
    (jar, Json(FormPage::create_ticket(messages)))
}

/// File a ticket, with an optional attachment
///
/// POST /create_ticket (multipart/form-data: title, description, file)
pub async fn create_ticket(
    State(state): State<AppState>,
    CurrentUser { user, .. }: CurrentUser,
    jar: SignedCookieJar,
    multipart: Multipart,
) -> ApiResult<(SignedCookieJar, Redirect)> {
    let ctx = state.service_context();
    let (request, upload) = read_ticket_form(multipart, ctx.attachments().max_bytes()).await?;

    match TicketService::new(ctx).create(&user, request, upload).await {
        Ok(_) => Ok((flash::push(jar, TICKET_CREATED), Redirect::to(paths::DASHBOARD))),
        Err(e) if e.is_form_error() => Ok((
            flash::push(jar, e.user_message()),
            Redirect::to(paths::CREATE_TICKET),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Collect the ticket fields and the file part, failing if the file exceeds `max_bytes`
async fn read_ticket_form(
    mut multipart: Multipart,
    max_bytes: usize,
) -> ApiResult<(CreateTicketRequest, Option<Upload>)> {
    let mut request = CreateTicketRequest::default();
    let mut upload = None;
    let mut too_large = false;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" | "description" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, max_bytes))?;
                if name == "title" {
                    request.title = value;
                } else {
                    request.description = value;
                }
            }
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let mut bytes = Vec::new();
                while let Some(chunk) = field
                    .chunk()
                    .await
                    .map_err(|e| multipart_error(e, max_bytes))?
                {
                    // Drain the rest of an oversized file before answering
                    if too_large || bytes.len() + chunk.len() > max_bytes {
                        too_large = true;
                        continue;
                    }
                    bytes.extend_from_slice(&chunk);
                }
                upload = Some(Upload::new(filename, bytes));
            }
            _ => {}
        }
    }

    if too_large {
        return Err(AppError::PayloadTooLarge { max_bytes }.into());
    }
    Ok((request, upload))
}

fn multipart_error(e: MultipartError, max_bytes: usize) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { max_bytes }.into()
    } else {
        ApiError::invalid_form(e.body_text())
    }
}
