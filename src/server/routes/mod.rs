//! HTTP route modules

pub mod ai;
pub mod health;

/// Error response helpers
pub mod errors {
    use actix_web::http::StatusCode;
    use actix_web::HttpResponse;
    use serde_json::json;

    use crate::utils::error::GatewayError;

    /// Convert a GatewayError to an HTTP response with an `{"error": …}` body
    pub fn gateway_error_to_response(error: &GatewayError) -> HttpResponse {
        let status = StatusCode::from_u16(error.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        HttpResponse::build(status).json(json!({ "error": error.to_string() }))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::core::providers::ProviderError;

        #[test]
        fn test_upstream_status_is_preserved() {
            let error = GatewayError::from(ProviderError::api_error(
                "openrouter",
                429,
                "rate limited",
            ));
            let response = gateway_error_to_response(&error);
            assert_eq!(response.status().as_u16(), 429);
        }

        #[test]
        fn test_validation_maps_to_bad_request() {
            let error = GatewayError::validation("messages cannot be empty");
            let response = gateway_error_to_response(&error);
            assert_eq!(response.status().as_u16(), 400);
        }
    }
}
