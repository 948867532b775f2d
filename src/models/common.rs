use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }
}

/// Lets update requests tell "field absent" (`None`) from "field set to
/// null" (`Some(None)`). Use with `#[serde(default, deserialize_with = "nullable")]`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "nullable")]
        category_id: Option<Option<i64>>,
    }

    #[test]
    fn test_nullable_distinguishes_absent_and_null() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.category_id, None);

        let null: Patch = serde_json::from_str(r#"{"category_id": null}"#).unwrap();
        assert_eq!(null.category_id, Some(None));

        let set: Patch = serde_json::from_str(r#"{"category_id": 7}"#).unwrap();
        assert_eq!(set.category_id, Some(Some(7)));
    }

    #[test]
    fn test_success_envelope_skips_empty_fields() {
        let body = serde_json::to_value(ApiResponse::success(1)).unwrap();
        assert_eq!(body, serde_json::json!({"success": true, "data": 1}));
    }
}
