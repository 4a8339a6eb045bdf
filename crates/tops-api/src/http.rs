use std::sync::Arc;

use axum::{Json, Router, extract::State, http::Uri, response::IntoResponse, routing::get};
use serde::Serialize;
use tops_core::InfoSnapshot;
use tracing::debug;

use crate::{error::ApiError, routes::ROUTES};

/// Read-only HTTP facade over a validated snapshot.
///
/// The snapshot is shared by reference and never mutated after construction.
pub struct InfoApi {
    snapshot: Arc<InfoSnapshot>,
}

impl InfoApi {
    pub fn new(snapshot: InfoSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes are listed in [`ROUTES`] and served by `GET /`.
    pub fn router(self) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/status", get(status))
            .route("/metadata", get(metadata))
            .route("/labinfo", get(labinfo))
            .route("/petname", get(petname))
            .fallback(not_found)
            .with_state(self.snapshot)
    }
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct PetnameResponse<'a> {
    petname: &'a str,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
async fn index() -> impl IntoResponse {
    Json(ROUTES)
}

/// GET /status
async fn status() -> impl IntoResponse {
    Json(StatusResponse { status: "running" })
}

/// GET /metadata
async fn metadata(State(snapshot): State<Arc<InfoSnapshot>>) -> impl IntoResponse {
    Json(snapshot.metadata.clone())
}

/// GET /labinfo
async fn labinfo(State(snapshot): State<Arc<InfoSnapshot>>) -> impl IntoResponse {
    Json(snapshot.labinfo.clone())
}

/// GET /petname
async fn petname(State(snapshot): State<Arc<InfoSnapshot>>) -> impl IntoResponse {
    Json(PetnameResponse {
        petname: &snapshot.petname,
    })
    .into_response()
}

async fn not_found(uri: Uri) -> ApiError {
    debug!(%uri, "unknown route");
    ApiError::NotFound(uri.path().to_string())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn snapshot() -> InfoSnapshot {
        let doc = json!({
            "metadata": {
                "depID": "d1",
                "labID": "l1",
                "petname": "brave-otter",
                "sqsURL": "https://queue/r1/q",
                "custom": {"kept": true},
            },
            "labinfo": {"sqsURL": "https://queue/r1/q", "modules": ["waf", "bot"]},
        });
        tops_core::validate(serde_json::from_value(doc).unwrap()).unwrap()
    }

    async fn get_json(router: Router, path: &str) -> (StatusCode, Value) {
        let req = Request::builder().uri(path).body(Body::empty()).unwrap();
        let resp = router.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn status_reports_running() {
        let router = InfoApi::new(snapshot()).router();
        let (code, body) = get_json(router, "/status").await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, json!({"status": "running"}));
    }

    #[tokio::test]
    async fn sub_documents_are_served_unmodified() {
        let snap = snapshot();
        let router = InfoApi::new(snap.clone()).router();

        let (code, body) = get_json(router.clone(), "/metadata").await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, Value::Object(snap.metadata.clone()));

        let (code, body) = get_json(router.clone(), "/labinfo").await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, Value::Object(snap.labinfo.clone()));

        let (code, body) = get_json(router, "/petname").await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, json!({"petname": "brave-otter"}));
    }

    #[tokio::test]
    async fn index_lists_every_route_and_each_responds() {
        let router = InfoApi::new(snapshot()).router();
        let (code, body) = get_json(router.clone(), "/").await;
        assert_eq!(code, StatusCode::OK);

        let listed: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["route"].as_str().unwrap())
            .collect();
        assert_eq!(listed, vec!["/", "/status", "/metadata", "/labinfo", "/petname"]);
        assert_eq!(body[1]["methods"], json!(["GET"]));

        for route in ROUTES {
            let (code, _) = get_json(router.clone(), route.path).await;
            assert_eq!(code, StatusCode::OK, "route {}", route.path);
        }
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let router = InfoApi::new(snapshot()).router();
        let (code, body) = get_json(router, "/credentials").await;
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "not found: /credentials"}));
    }
}
