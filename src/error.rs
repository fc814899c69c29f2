// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::DatabaseError;
use crate::models::Resource;

/// HTTP API error rendered as `{ "status", "title", "detail" }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError(Vec<String>),
    InvalidJson(String),

    // 404 Not Found
    NotFound { title: String, detail: String },

    // 405 Method Not Allowed
    MethodNotAllowed(String),

    // 409 Conflict
    Conflict { title: String, detail: String },

    // 413 Payload Too Large
    PayloadTooLarge(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Short human-readable summary
    pub fn title(&self) -> &str {
        match self {
            ApiError::NotFound { title, .. } | ApiError::Conflict { title, .. } => title,
            ApiError::BadRequest(_) | ApiError::ValidationError(_) | ApiError::InvalidJson(_) => {
                "Bad Request"
            }
            ApiError::MethodNotAllowed(_) => "Method Not Allowed",
            ApiError::PayloadTooLarge(_) => "Payload Too Large",
            ApiError::InternalServerError(_) => "Internal Server Error",
            ApiError::ServiceUnavailable(_) => "Service Unavailable",
        }
    }

    /// Client-safe explanation
    pub fn detail(&self) -> String {
        match self {
            ApiError::ValidationError(errors) => errors.join(". "),
            ApiError::NotFound { detail, .. } | ApiError::Conflict { detail, .. } => detail.clone(),
            ApiError::BadRequest(msg)
            | ApiError::InvalidJson(msg)
            | ApiError::MethodNotAllowed(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::ServiceUnavailable(msg) => msg.clone(),
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "status": self.status_code().as_u16(),
            "title": self.title(),
            "detail": self.detail()
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(errors: Vec<String>) -> Self {
        ApiError::ValidationError(errors)
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn not_found(title: impl Into<String>, detail: impl Into<String>) -> Self {
        ApiError::NotFound { title: title.into(), detail: detail.into() }
    }

    pub fn conflict(title: impl Into<String>, detail: impl Into<String>) -> Self {
        ApiError::Conflict { title: title.into(), detail: detail.into() }
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        ApiError::MethodNotAllowed(message.into())
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        ApiError::PayloadTooLarge(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }

    /// `{Title} Not Found` / `No {noun} '{name}' found.`
    pub fn record_not_found(resource: Resource, name: &str) -> Self {
        Self::not_found(
            format!("{} Not Found", resource.title()),
            format!("No {} '{}' found.", resource.noun(), name),
        )
    }

    /// `{Title} Already Exists` / `There is already a {noun} with name '{name}'.`
    pub fn already_exists(resource: Resource, name: &str) -> Self {
        Self::conflict(
            format!("{} Already Exists", resource.title()),
            format!("There is already a {} with name '{}'.", resource.noun(), name),
        )
    }

    /// Translate a storage failure for the given resource
    pub fn from_database(resource: Resource, err: DatabaseError) -> Self {
        match err {
            DatabaseError::Duplicate(name) => Self::already_exists(resource, &name),
            other => other.into(),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Duplicate(name) => ApiError::conflict(
                "Already Exists",
                format!("There is already a record with name '{}'.", name),
            ),
            DatabaseError::ConnectionError(msg) => {
                tracing::error!("Database connection error: {}", msg);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            DatabaseError::QueryError(msg) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("Database query error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
            DatabaseError::ConfigMissing(_)
            | DatabaseError::InvalidDatabaseUrl
            | DatabaseError::InvalidTableName(_) => {
                tracing::error!("Database misconfiguration: {}", err);
                ApiError::service_unavailable("Database is not configured")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title(), self.detail())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_status_title_detail() {
        let err = ApiError::record_not_found(Resource::Collective, "vase");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            err.to_json(),
            json!({
                "status": 404,
                "title": "Collective Not Found",
                "detail": "No collective 'vase' found."
            })
        );
    }

    #[test]
    fn joins_validation_messages() {
        let err = ApiError::validation_error(vec!["first".into(), "second".into()]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.detail(), "first. second");
    }

    #[test]
    fn duplicate_maps_to_resource_conflict() {
        let err = ApiError::from_database(Resource::Collection, DatabaseError::Duplicate("ball".into()));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.title(), "Collection Already Exists");
        assert_eq!(err.detail(), "There is already a collection with name 'ball'.");
    }

    #[test]
    fn storage_failures_hide_driver_details() {
        let err: ApiError = DatabaseError::QueryError("syntax error at or near".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.detail().contains("syntax"));

        let err: ApiError = DatabaseError::ConnectionError("refused".into()).into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
