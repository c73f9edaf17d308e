//! Response envelope for API handlers.
//!
//! Successful responses carry their payload under a `data` key so clients
//! can distinguish them from the `{ "error", "code" }` shape produced by
//! `AppError`. Handlers return [`DataResponse`] directly; it serializes
//! itself as JSON.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    /// Wrap a payload for a 200 response.
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Wrap a payload for a 201 response, for resource-creating handlers.
    pub fn created(data: T) -> (StatusCode, Self) {
        (StatusCode::CREATED, Self::new(data))
    }
}

impl<T: Serialize> IntoResponse for DataResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let value = serde_json::to_value(DataResponse::new(vec![1, 2, 3])).unwrap();
        assert_eq!(value, serde_json::json!({ "data": [1, 2, 3] }));
    }

    #[test]
    fn test_created_sets_status() {
        let (status, _) = DataResponse::created("order");
        assert_eq!(status, StatusCode::CREATED);
    }
}
