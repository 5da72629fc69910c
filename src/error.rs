use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{kind} with id {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("{0}")]
    Validation(String),

    #[error("Price update failed: {0}")]
    PriceUpdate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn not_found_product(id: &str) -> Self {
        AppError::NotFound { kind: "Product", id: id.to_string() }
    }

    pub fn not_found_instrument(id: &str) -> Self {
        AppError::NotFound { kind: "Instrument", id: id.to_string() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PriceUpdate(_)
            | AppError::Config(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short caller-facing message; the full error goes in the `error` field.
    fn message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::PriceUpdate(_) => "Failed to update prices".to_string(),
            other => other.to_string(),
        }
    }

    /// Value of the `error` field. Price update failures report the bare
    /// parser detail.
    fn detail(&self) -> String {
        match self {
            AppError::PriceUpdate(detail) => detail.clone(),
            other => other.to_string(),
        }
    }
}

/// Malformed or mistyped JSON bodies answer with the crate's error body
/// instead of axum's plain-text rejection.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = serde_json::json!({
            "success": false,
            "message": self.message(),
            "error": self.detail(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::not_found_product("lafite-2010");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Product with id lafite-2010 not found");
    }

    #[test]
    fn price_update_failure_keeps_detail_out_of_message() {
        let err = AppError::PriceUpdate("expected value at line 1".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Failed to update prices");
        assert_eq!(err.detail(), "expected value at line 1");
    }

    #[tokio::test]
    async fn error_body_carries_success_message_and_detail() {
        let response = AppError::PriceUpdate("trailing comma".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Failed to update prices");
        assert_eq!(body["error"], "trailing comma");
    }

    #[test]
    fn not_found_detail_is_the_full_message() {
        let err = AppError::not_found_instrument("trading-9");
        assert_eq!(err.detail(), "Instrument with id trading-9 not found");
    }
}
