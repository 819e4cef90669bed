use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;
use thiserror::Error;

/// Transport-level failures. The service keeps the original contract of a
/// single generic failure shape: status 500 with an `{ "error": … }` body.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    #[error("Game state is unavailable")]
    LockPoisoned,
}

impl actix_web::ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_every_error_is_a_server_fault() {
        let errors = [
            ServiceError::BadRequest("broken".to_string()),
            ServiceError::LockPoisoned,
        ];
        for error in errors {
            assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_error_message_mentions_cause() {
        let error = ServiceError::BadRequest("missing field".to_string());
        assert_eq!(error.to_string(), "Invalid request body: missing field");
    }
}
