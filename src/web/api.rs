//! The status HTTP API: one write endpoint and two read queries, plus the
//! user document endpoints and the Mini App page.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, Method},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use tower_http::cors::CorsLayer;

use crate::storage::db::{self, DbPool, StatusRecord, UserRecord};
use crate::telegram::notifications;
use crate::telegram::Bot;
use crate::web::error::ApiError;
use crate::web::page;

/// Read queries return at most this many records.
pub const LATEST_LIMIT: usize = 3;

// ============================================================================
// WIRE TYPES
// ============================================================================

/// Accept an identifier as either a JSON string or number. Telegram user ids
/// arrive as numbers from the Mini App, while curl users tend to send strings.
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

/// Body of `POST /status`. The `id` field is the poster's user id; the
/// original client sends it under that name.
#[derive(Debug, Deserialize)]
pub struct CreateStatusRequest {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
}

/// Body of `POST /mystatus`.
#[derive(Debug, Deserialize)]
pub struct MyStatusRequest {
    #[serde(default, deserialize_with = "deserialize_id", rename = "userId")]
    pub user_id: Option<String>,
}

/// Body of `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

/// A status record as it appears on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDto {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub status: String,
    pub created_at: String,
}

impl From<StatusRecord> for StatusDto {
    fn from(record: StatusRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            name: record.name,
            status: record.status,
            created_at: record.created_at,
        }
    }
}

/// A user document as it appears on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub role: String,
    pub created_at: String,
}

impl From<UserRecord> for UserDto {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            role: record.role,
            created_at: record.created_at,
        }
    }
}

/// Response of the write endpoints. The message text is kept from the
/// original service verbatim.
#[derive(Debug, Serialize)]
pub struct WriteResponse {
    pub message: String,
    pub id: String,
}

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared state for all endpoints. The bot handle is optional so the API can
/// run standalone (`serve` mode) without a Telegram token.
#[derive(Clone)]
pub struct ApiState {
    pub db_pool: Arc<DbPool>,
    pub bot: Option<Bot>,
}

impl ApiState {
    pub fn new(db_pool: Arc<DbPool>, bot: Option<Bot>) -> Self {
        Self { db_pool, bot }
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Build the API router.
///
/// When `allowed_origin` is set, CORS is restricted to that single origin
/// with GET+POST and the Content-Type header, matching the original service.
pub fn create_api_router(state: ApiState, allowed_origin: Option<HeaderValue>) -> Router {
    let router = Router::new()
        .route("/", get(page::miniapp_page))
        .route("/status", post(handle_create_status))
        .route("/latest", get(handle_latest))
        .route("/mystatus", post(handle_my_statuses))
        .route("/users", post(handle_create_user))
        .route("/users/:id", get(handle_get_user))
        .route("/health", get(health_check));

    let router = if let Some(origin) = allowed_origin {
        let cors = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]);
        router.layer(cors)
    } else {
        router
    };

    router.with_state(state)
}

/// Run the API server until the task is aborted or the listener fails.
pub async fn run_web_server(port: u16, state: ApiState, allowed_origin: &str) -> anyhow::Result<()> {
    let origin: HeaderValue = allowed_origin
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid ALLOWED_ORIGIN {allowed_origin:?}: {e}"))?;
    let app = create_api_router(state, Some(origin));

    let addr = format!("0.0.0.0:{}", port);
    log::info!("Starting status API server on http://{}", addr);
    log::info!("  /          - Mini App page");
    log::info!("  /status    - POST a new status");
    log::info!("  /latest    - GET latest statuses");
    log::info!("  /mystatus  - POST, statuses of one user");
    log::info!("  /health    - Health check");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /health
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "statusboard-api"
    }))
}

/// POST /status - persist a new status record.
///
/// The HTTP response is complete once the record is written; the Telegram
/// confirmation is fired afterwards as a detached task and can only log its
/// own failure.
async fn handle_create_status(
    State(state): State<ApiState>,
    Json(req): Json<CreateStatusRequest>,
) -> Result<Json<WriteResponse>, ApiError> {
    let user_id = req.id.unwrap_or_default();
    let name = req.name.unwrap_or_default();
    let status = req.status.unwrap_or_default();

    let conn = db::get_connection(&state.db_pool).map_err(|e| ApiError::internal("DB pool error", e))?;
    let record = db::insert_status(&conn, &user_id, &name, &status)?;

    log::info!("Status {} posted by user {}", record.id, record.user_id);

    if let Some(bot) = &state.bot {
        tokio::spawn(notifications::notify_status_posted(
            bot.clone(),
            record.user_id.clone(),
            record.status.clone(),
        ));
    }

    Ok(Json(WriteResponse {
        message: "User added successfully".to_string(),
        id: record.id,
    }))
}

/// GET /latest - the most recent statuses across all users.
async fn handle_latest(State(state): State<ApiState>) -> Result<Json<Vec<StatusDto>>, ApiError> {
    let conn = db::get_connection(&state.db_pool).map_err(|e| ApiError::internal("DB pool error", e))?;
    let records = db::latest_statuses(&conn, LATEST_LIMIT)?;
    Ok(Json(records.into_iter().map(StatusDto::from).collect()))
}

/// POST /mystatus - one user's recent statuses. Empty array, not an error,
/// when the user has never posted.
async fn handle_my_statuses(
    State(state): State<ApiState>,
    Json(req): Json<MyStatusRequest>,
) -> Result<Json<Vec<StatusDto>>, ApiError> {
    let user_id = match req.user_id {
        Some(id) if !id.trim().is_empty() => id,
        _ => return Err(ApiError::BadRequest("userId is required".to_string())),
    };

    let conn = db::get_connection(&state.db_pool).map_err(|e| ApiError::internal("DB pool error", e))?;
    let records = db::statuses_by_user(&conn, user_id.trim(), LATEST_LIMIT)?;
    Ok(Json(records.into_iter().map(StatusDto::from).collect()))
}

/// POST /users - create or replace a user document.
async fn handle_create_user(
    State(state): State<ApiState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<WriteResponse>, ApiError> {
    let id = req.id.unwrap_or_default();
    let name = req.name.unwrap_or_default();
    let role = req.role.unwrap_or_default();

    let conn = db::get_connection(&state.db_pool).map_err(|e| ApiError::internal("DB pool error", e))?;
    let record = db::upsert_user(&conn, &id, &name, &role)?;

    Ok(Json(WriteResponse {
        message: "User added successfully".to_string(),
        id: record.id,
    }))
}

/// GET /users/:id - fetch a user document.
async fn handle_get_user(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<UserDto>, ApiError> {
    let conn = db::get_connection(&state.db_pool).map_err(|e| ApiError::internal("DB pool error", e))?;
    let user = db::get_user(&conn, &id)?.ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    Ok(Json(UserDto::from(user)))
}
