//! `/nba` routes

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, Method},
    routing::{get, MethodRouter},
    Json, Router,
};
use courtside_core::{ChatReply, Endpoint, Entities, MetricsSnapshot, StatRecord};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

/// Query string shared by the stats lookups
#[derive(Debug, Default, Deserialize)]
pub struct LookupParams {
    pub player: Option<String>,
    pub team: Option<String>,
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub season: Option<String>,
}

impl LookupParams {
    fn into_entities(self) -> Entities {
        let filled = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Entities {
            player: filled(self.player),
            team: filled(self.team),
            team1: filled(self.team1),
            team2: filled(self.team2),
            season: filled(self.season),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub query: Entities,
    pub record: StatRecord,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub llm: Option<MetricsSnapshot>,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let mut nba: Router<AppState> = Router::new()
        .route("/chat", get(handle_chat_query).post(handle_chat))
        .route("/health", get(handle_health));
    for endpoint in Endpoint::ALL {
        nba = nba.route(endpoint.route(), lookup_route(endpoint));
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .nest("/nba", nba)
        .layer(cors)
        .layer(trace)
        .with_state(state)
}

fn lookup_route(endpoint: Endpoint) -> MethodRouter<AppState> {
    get(
        move |State(state): State<AppState>, Query(params): Query<LookupParams>| async move {
            handle_lookup(state, endpoint, params).await
        },
    )
}

async fn handle_chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(request) =
        body.map_err(|e| ApiError::invalid_input(format!("Invalid request body: {}", e)))?;
    answer(&state, request.message).await
}

async fn handle_chat_query(
    State(state): State<AppState>,
    Query(query): Query<ChatQuery>,
) -> Result<Json<ChatReply>, ApiError> {
    answer(&state, query.message.or(query.q)).await
}

async fn answer(state: &AppState, message: Option<String>) -> Result<Json<ChatReply>, ApiError> {
    let message = message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::invalid_input("No message provided"))?;

    let reply = state.pipeline().answer(&message).await?;
    tracing::info!("Answered {} question", reply.intent);
    Ok(Json(reply))
}

async fn handle_lookup(
    state: AppState,
    endpoint: Endpoint,
    params: LookupParams,
) -> Result<Json<LookupResponse>, ApiError> {
    let entities = params.into_entities();
    let record = state.fetcher().fetch_endpoint(endpoint, &entities).await?;
    Ok(Json(LookupResponse {
        query: entities,
        record,
    }))
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        llm: state.llm_metrics(),
    })
}
