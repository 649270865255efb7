//! Error conversions - HTTP response rendering (feature-gated)

#[cfg(feature = "axum")]
use super::app_error::AppError;

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.to_body())).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_status_follows_kind() {
        let response = AppError::not_found("Route not found").into_response();
        assert_eq!(response.status().as_u16(), 404);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );
    }
}
