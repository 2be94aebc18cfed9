use axum::response::Redirect;

use super::paths;

/// GET /
pub async fn index() -> Redirect {
    Redirect::to(paths::LOGIN)
}
