//! The HTTP API. Handlers convert each request into a RouteConfig, fetch the
//! base graph from the cache (building it if required), then plan the routes
//! on a blocking thread so the runtime is free to serve other requests.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::common::config::{RouteConfig, RoutingSettings, UserRouteConfig};
use crate::common::destinations::{
    Destination, DestinationInput, ServiceType,
};
use crate::common::error::{RoutingError, RoutingResult};
use crate::loading::GraphProvider;
use crate::loading::cache::{GraphCache, GraphKey};
use crate::routing::planner::plan_for_config;
use crate::routing::structs::{Marker, RouteResponse};

/// Shared between all handlers. The provider builds base graphs on a cache
/// miss, everything else is read-only
pub struct AppState<P: GraphProvider> {
    pub provider: Arc<P>,
    pub cache: Arc<GraphCache>,
    pub settings: Arc<RoutingSettings>,
}

impl<P: GraphProvider> AppState<P> {
    pub fn new(provider: P, settings: RoutingSettings) -> AppState<P> {
        AppState {
            provider: Arc::new(provider),
            cache: Arc::new(GraphCache::new(settings.cache_ttl())),
            settings: Arc::new(settings),
        }
    }
}

// Derived Clone would require P: Clone
impl<P: GraphProvider> Clone for AppState<P> {
    fn clone(&self) -> Self {
        AppState {
            provider: Arc::clone(&self.provider),
            cache: Arc::clone(&self.cache),
            settings: Arc::clone(&self.settings),
        }
    }
}

impl IntoResponse for RoutingError {
    fn into_response(self) -> Response {
        let status = match &self {
            RoutingError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RoutingError::NodeNotFound(_)
            | RoutingError::NoPathFound { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {self}");
        } else {
            warn!("Request rejected: {self}");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

async fn health_check() -> impl IntoResponse {
    let msg = "Emergency router is running";

    let json_response = json!({
        "status": "success",
        "message": msg
    });

    Json(json_response)
}

#[derive(Deserialize, Debug, Default)]
struct DestinationsQuery {
    service: Option<String>,
}

/// The presets for a service, along with the point offered when the user
/// switches to manual entry
#[derive(Serialize, Debug)]
struct DestinationsResponse {
    service: String,
    destinations: Vec<Destination>,
    manual_default: Marker,
}

/// List the preset destinations for a service, defaulting to ambulance
async fn get_destinations(
    Query(query): Query<DestinationsQuery>,
) -> RoutingResult<Json<DestinationsResponse>> {
    let service = match query.service.as_deref() {
        Some(service) => ServiceType::from_str(service)?,
        None => ServiceType::default(),
    };

    let manual = DestinationInput::default();
    let (lat, lon) = manual.coords();

    Ok(Json(DestinationsResponse {
        service: service.to_string(),
        destinations: service.destinations().to_vec(),
        manual_default: Marker {
            label: manual.label(),
            lat,
            lon,
        },
    }))
}

async fn get_routes<P: GraphProvider>(
    State(state): State<AppState<P>>,
    Query(query): Query<UserRouteConfig>,
) -> RoutingResult<Json<RouteResponse>> {
    let now = Instant::now();

    let route_config = RouteConfig::from_user(query, &state.settings)?;

    let key = GraphKey::new(route_config.origin, route_config.radius_m);
    let graph = state
        .cache
        .get_or_load(key, || {
            state
                .provider
                .build_graph(route_config.origin, route_config.radius_m)
        })
        .await?;

    let planner = move || plan_for_config(&graph, &route_config);
    let response = tokio::task::spawn_blocking(planner)
        .await
        .map_err(|err| RoutingError::Task(err.to_string()))??;

    info!("Routes planned in {:.2?}", now.elapsed());

    Ok(Json(response))
}

/// Build the API router for the provided state
pub fn create_router<P: GraphProvider>(state: AppState<P>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthcheck", get(health_check))
        .route("/destinations", get(get_destinations))
        .route("/route", get(get_routes::<P>))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
