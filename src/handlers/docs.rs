//! Static OpenAPI documentation.

use axum::{
    http::header,
    response::{Html, IntoResponse, Json},
};
use serde_json::Value;

use crate::error::ApiError;

pub const OPENAPI_YAML: &str = include_str!("../../docs/openapi.yaml");

const SWAGGER_UI: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Collectibles API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/api-docs/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

/// Parse the embedded YAML document into JSON
pub fn openapi_document() -> Result<Value, serde_yaml::Error> {
    serde_yaml::from_str(OPENAPI_YAML)
}

/// GET /api-docs - Swagger UI page
pub async fn ui() -> Html<&'static str> {
    Html(SWAGGER_UI)
}

/// GET /api-docs/openapi.yaml
pub async fn yaml() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/yaml")], OPENAPI_YAML)
}

/// GET /api-docs/openapi.json
pub async fn json() -> Result<Json<Value>, ApiError> {
    openapi_document().map(Json).map_err(|e| {
        tracing::error!("Embedded OpenAPI document is invalid: {}", e);
        ApiError::internal_server_error("API documentation is unavailable")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_document_parses() {
        let doc = openapi_document().unwrap();
        assert!(doc["openapi"].as_str().unwrap().starts_with("3."));
        for path in ["/collections", "/collections/groups", "/collectives/{name}"] {
            assert!(doc["paths"].get(path).is_some(), "missing path {}", path);
        }
    }

    #[test]
    fn swagger_page_mounts_embedded_document() {
        assert!(SWAGGER_UI.contains(r##"dom_id: "#swagger-ui""##));
        assert!(SWAGGER_UI.contains("/api-docs/openapi.json"));
        assert!(SWAGGER_UI.trim_end().ends_with("</html>"));
    }
}
