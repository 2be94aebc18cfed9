//! URL-encoded form extractor
//!
//! Wraps `axum::Form` so malformed bodies produce the crate's error type.
//! Field validation happens in the service layer, where failures become
//! flash messages instead of error pages.

use axum::{
    async_trait,
    extract::{rejection::FormRejection, FromRequest, Request},
    Form,
};
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// Form body extractor
#[derive(Debug, Clone)]
pub struct FormData<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormData<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await.map_err(|e| match e {
            FormRejection::InvalidFormContentType(e) => ApiError::invalid_form(e.to_string()),
            FormRejection::FailedToDeserializeForm(e) => ApiError::invalid_form(e.to_string()),
            FormRejection::FailedToDeserializeFormBody(e) => ApiError::invalid_form(e.to_string()),
            _ => ApiError::invalid_form("Invalid form body"),
        })?;

        Ok(FormData(value))
    }
}
