use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::domain::DomainError;
use serde::Serialize;
use tracing::error;

/// Minimal JSON error body; internal details stay in the logs and are never
/// echoed to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub reason: String,
}

/// Convert a domain error to an HTTP response
pub fn domain_error_to_response(err: DomainError) -> Response {
    let (status, reason) = match &err {
        DomainError::SpaceNotFound(_)
        | DomainError::WorkspaceNotFound(_)
        | DomainError::TierNotFound(_) => (StatusCode::NOT_FOUND, "NotFound"),

        DomainError::NotApproved(_) | DomainError::PermissionDenied(_) => {
            (StatusCode::FORBIDDEN, "Forbidden")
        }

        DomainError::ValidationError(_) => (StatusCode::BAD_REQUEST, "BadRequest"),

        DomainError::Conflict(_) | DomainError::StoreError(_) => {
            error!(error = %err, "internal failure serving workspace request");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal")
        }
    };

    (
        status,
        Json(ErrorBody {
            status: status.as_u16(),
            reason: reason.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = domain_error_to_response(DomainError::WorkspaceNotFound("home".to_string()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_not_approved_maps_to_403() {
        let response = domain_error_to_response(DomainError::NotApproved("bob".to_string()));
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_validation_error_maps_to_400() {
        let response =
            domain_error_to_response(DomainError::ValidationError("bad payload".to_string()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_conflict_maps_to_500() {
        let response = domain_error_to_response(DomainError::Conflict("stale".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
