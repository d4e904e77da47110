mod location_types;
mod locations;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use kidspots_core::Region;
use kidspots_overpass::OverpassClient;
use kidspots_store::{LocationStore, StoreError};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<LocationStore>,
    pub overpass: Arc<OverpassClient>,
    pub region: Arc<Region>,
}

/// JSON error body returned by every route.
///
/// `message` is the human-readable summary; `error` carries the underlying
/// cause when one is worth showing (upstream failures).
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub request_id: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    locations: usize,
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            error: None,
            request_id: request_id.into(),
        }
    }

    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_store_error(request_id: String, error: &StoreError) -> ApiError {
    tracing::error!(error = %error, "location store access failed");
    ApiError::new(request_id, "internal_error", "Failed to fetch locations")
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

fn refresh_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/locations/refresh", post(locations::refresh))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, refresh_rate_limit: RateLimitState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/location-types",
            get(location_types::list_location_types),
        )
        .route("/api/locations", get(locations::list_locations))
        .route(
            "/api/locations/summary",
            get(locations::get_locations_summary),
        )
        .route(
            "/api/locations/type/{location_type}",
            get(locations::list_locations_by_type),
        )
        .route(
            "/api/locations/osm/{element_type}/{element_id}",
            get(locations::get_location_by_osm_id),
        )
        .merge(refresh_router(refresh_rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(request_id))
                .layer(build_cors())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.len() {
        Ok(locations) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                locations,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: location store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    locations: 0,
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use kidspots_core::{LocationType, NewLocation};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_state(overpass_endpoint: &str) -> AppState {
        AppState {
            store: Arc::new(LocationStore::new()),
            overpass: Arc::new(
                OverpassClient::with_endpoint(overpass_endpoint, 5, "kidspots-test")
                    .expect("client"),
            ),
            region: Arc::new(Region::san_francisco()),
        }
    }

    fn offline_state() -> AppState {
        test_state("http://127.0.0.1:9/api/interpreter")
    }

    fn app(state: AppState) -> Router {
        build_app(state, RateLimitState::new(10, Duration::from_secs(60)))
    }

    fn seed(state: &AppState) {
        let make = |location_type: LocationType, osm_id: &str, name: &str| NewLocation {
            location_type,
            name: name.to_string(),
            latitude: 37.77,
            longitude: -122.42,
            address: Some("San Francisco, CA".to_string()),
            website: None,
            phone: None,
            opening_hours: None,
            tags: None,
            osm_id: Some(osm_id.to_string()),
        };
        state
            .store
            .replace_all(vec![
                make(LocationType::Playground, "node/1", "Tiny Tots Yard"),
                make(LocationType::Park, "way/2", "Golden Gate Park"),
                make(LocationType::Playground, "node/3", "Koret Playground"),
            ])
            .expect("seed store");
    }

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).expect("json parse");
        (status, json)
    }

    fn overpass_body() -> serde_json::Value {
        serde_json::json!({
            "elements": [
                { "type": "node", "id": 100, "lat": 37.77, "lon": -122.42,
                  "tags": { "leisure": "playground", "name": "Tiny Tots Yard" } },
                { "type": "way", "id": 200, "center": { "lat": 37.80, "lon": -122.41 },
                  "tags": { "tourism": "museum" } },
                { "type": "node", "id": 300, "lat": 37.70, "lon": -122.40,
                  "tags": { "amenity": "toilets" } }
            ]
        })
    }

    #[test]
    fn api_error_codes_map_to_status() {
        let cases = [
            ("bad_request", StatusCode::BAD_REQUEST),
            ("not_found", StatusCode::NOT_FOUND),
            ("rate_limited", StatusCode::TOO_MANY_REQUESTS),
            ("upstream_error", StatusCode::INTERNAL_SERVER_ERROR),
            ("internal_error", StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (code, status) in cases {
            let response = ApiError::new("req-1", code, "msg").into_response();
            assert_eq!(response.status(), status, "code {code}");
        }
    }

    #[test]
    fn api_error_omits_absent_detail() {
        let json = serde_json::to_value(ApiError::new("req-1", "bad_request", "nope")).unwrap();
        assert!(json.get("error").is_none());
        let json = serde_json::to_value(
            ApiError::new("req-1", "upstream_error", "nope").with_error("boom"),
        )
        .unwrap();
        assert_eq!(json["error"], "boom");
    }

    #[tokio::test]
    async fn health_reports_location_count() {
        let state = offline_state();
        seed(&state);
        let (status, json) = send(app(state), "GET", "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["locations"], 3);
    }

    #[tokio::test]
    async fn list_locations_returns_empty_array_before_refresh() {
        let (status, json) = send(app(offline_state()), "GET", "/api/locations").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!([]));
    }

    #[tokio::test]
    async fn list_locations_returns_all_records() {
        let state = offline_state();
        seed(&state);
        let (status, json) = send(app(state), "GET", "/api/locations").await;
        assert_eq!(status, StatusCode::OK);
        let items = json.as_array().expect("array");
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["id"], 1);
        assert_eq!(items[0]["osmId"], "node/1");
    }

    #[tokio::test]
    async fn list_by_type_filters_records() {
        let state = offline_state();
        seed(&state);
        let (status, json) = send(app(state), "GET", "/api/locations/type/playground").await;
        assert_eq!(status, StatusCode::OK);
        let items = json.as_array().expect("array");
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i["type"] == "playground"));
    }

    #[tokio::test]
    async fn list_by_type_rejects_unknown_type() {
        let (status, json) = send(app(offline_state()), "GET", "/api/locations/type/zoo").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Invalid location type");
        assert_eq!(json["code"], "bad_request");
    }

    #[tokio::test]
    async fn get_by_osm_id_finds_record_or_404s() {
        let state = offline_state();
        seed(&state);
        let router = app(state);

        let (status, json) = send(router.clone(), "GET", "/api/locations/osm/way/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Golden Gate Park");

        let (status, json) = send(router, "GET", "/api/locations/osm/node/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Location not found");
    }

    #[tokio::test]
    async fn summary_counts_every_type() {
        let state = offline_state();
        seed(&state);
        let (status, json) = send(app(state), "GET", "/api/locations/summary").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 3);
        assert_eq!(json["by_type"]["playground"], 2);
        assert_eq!(json["by_type"]["park"], 1);
        assert_eq!(json["by_type"]["planetarium"], 0);
        assert!(json["refreshed_at"].is_string());
    }

    #[tokio::test]
    async fn location_types_lists_registry_in_order() {
        let (status, json) = send(app(offline_state()), "GET", "/api/location-types").await;
        assert_eq!(status, StatusCode::OK);
        let items = json.as_array().expect("array");
        let names: Vec<&str> = items.iter().map(|i| i["type"].as_str().unwrap()).collect();
        assert_eq!(
            names,
            vec!["playground", "park", "museum", "science_center", "planetarium"]
        );
        assert_eq!(items[0]["predicate"], "leisure=playground");
        assert_eq!(items[3]["name"], "Science Centers");
        assert_eq!(items[4]["color"], "#3F51B5");
    }

    #[tokio::test]
    async fn refresh_loads_locations_from_overpass() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/interpreter"))
            .respond_with(ResponseTemplate::new(200).set_body_json(overpass_body()))
            .expect(1)
            .mount(&server)
            .await;

        let state = test_state(&format!("{}/api/interpreter", server.uri()));
        let store = Arc::clone(&state.store);
        let (status, json) = send(app(state), "POST", "/api/locations/refresh").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Successfully loaded 2 locations");
        assert_eq!(json["count"], 2);
        assert_eq!(json["skipped"], 1);
        let locations = json["locations"].as_array().expect("array");
        assert_eq!(locations[0]["id"], 1);
        assert_eq!(locations[0]["name"], "Tiny Tots Yard");
        assert_eq!(locations[1]["id"], 2);
        assert_eq!(locations[1]["name"], "Museum");
        assert_eq!(store.len().unwrap(), 2);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_collection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let state = test_state(&format!("{}/api/interpreter", server.uri()));
        seed(&state);
        let before = state.store.list_locations().unwrap();
        let router = app(state.clone());

        let (status, json) = send(router.clone(), "POST", "/api/locations/refresh").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "Failed to refresh location data");
        assert!(json["error"].as_str().unwrap().contains("500"));

        assert_eq!(state.store.list_locations().unwrap(), before);
        let (status, json) = send(router, "GET", "/api/locations").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn refresh_is_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(overpass_body()))
            .mount(&server)
            .await;

        let state = test_state(&format!("{}/api/interpreter", server.uri()));
        let router = build_app(state, RateLimitState::new(1, Duration::from_secs(60)));

        let (status, _) = send(router.clone(), "POST", "/api/locations/refresh").await;
        assert_eq!(status, StatusCode::OK);
        let (status, json) = send(router, "POST", "/api/locations/refresh").await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(json["code"], "rate_limited");
        assert!(json["request_id"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn get_by_osm_id_rejects_non_numeric_id() {
        let (status, json) =
            send(app(offline_state()), "GET", "/api/locations/osm/node/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "bad_request");
        assert_eq!(json["message"], "Invalid OpenStreetMap id");
        assert!(json["request_id"].is_string());
    }
}
