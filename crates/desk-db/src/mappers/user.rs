//! User model -> entity mapper

use desk_core::entities::User;
use desk_core::value_objects::{Role, UserId};
use tracing::warn;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        // Roles may be edited by hand; only an exact "admin" grants admin
        let role = model.role.parse().unwrap_or_else(|e| {
            warn!(user_id = model.id, error = %e, "Unrecognised role, treating as user");
            Role::User
        });

        User {
            id: UserId::new(model.id),
            username: model.username,
            email: model.email,
            role,
        }
    }
}
