use crate::entities::address_entity;
use crate::models::nullable;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddressResponse {
    pub id: i64,
    pub user_id: i64,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub is_default: bool,
}

impl From<address_entity::Model> for AddressResponse {
    fn from(m: address_entity::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            street: m.street,
            number: m.number,
            complement: m.complement,
            neighborhood: m.neighborhood,
            city: m.city,
            state: m.state,
            zip_code: m.zip_code,
            is_default: m.is_default,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAddressRequest {
    #[schema(example = "Rua das Flores")]
    pub street: String,
    #[schema(example = "123")]
    pub number: String,
    pub complement: Option<String>,
    #[schema(example = "Centro")]
    pub neighborhood: String,
    #[schema(example = "Curitiba")]
    pub city: String,
    #[schema(example = "PR")]
    pub state: String,
    #[schema(example = "80010-000")]
    pub zip_code: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAddressRequest {
    pub street: Option<String>,
    pub number: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub complement: Option<Option<String>>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub is_default: Option<bool>,
}
