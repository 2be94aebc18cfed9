//! Session model -> entity mapper

use desk_core::entities::Session;
use desk_core::value_objects::UserId;

use crate::models::SessionModel;

impl From<SessionModel> for Session {
    fn from(model: SessionModel) -> Self {
        Session {
            id: model.id,
            user_id: UserId::new(model.user_id),
            created_at: model.created_at,
            expires_at: model.expires_at,
        }
    }
}
