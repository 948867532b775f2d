use crate::entities::user_entity;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The authenticated caller, as asserted by a verified access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
}

impl Identity {
    pub fn owns(&self, owner_id: i64) -> bool {
        self.id == owner_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    #[schema(example = "maria")]
    pub username: String,
    #[schema(example = "maria@example.com")]
    pub email: String,
}

impl From<user_entity::Model> for UserResponse {
    fn from(m: user_entity::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            email: m.email,
        }
    }
}

impl From<&Identity> for UserResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username.clone(),
            email: identity.email.clone(),
        }
    }
}
