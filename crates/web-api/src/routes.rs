use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{HeaderName, HeaderValue, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use application::{
    MessageDto, ParticipantDto, PostMessageRequest, RegisterParticipantRequest,
    RetrieveMessagesRequest,
};

use crate::{error::ApiError, requester::Requester, state::AppState, USER_HEADER};

#[derive(Debug, Deserialize)]
struct RegisterPayload {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostMessagePayload {
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default, rename = "type")]
    message_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct HistoryQuery {
    limit: Option<String>,
}

impl HistoryQuery {
    /// 非整数的 limit 视为未提供。
    fn limit(&self) -> Option<i64> {
        self.limit
            .as_deref()
            .and_then(|value| value.trim().parse::<i64>().ok())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/participants",
            post(register_participant).get(list_participants),
        )
        .route("/messages", post(post_message).get(get_messages))
        .route("/status", post(refresh_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 空列表表示允许任意来源。
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        AllowOrigin::from(Any)
    } else {
        let parsed = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!(origin = %origin, error = %err, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect::<Vec<_>>();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static(USER_HEADER),
        ])
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn register_participant(
    State(state): State<AppState>,
    payload: Result<Json<RegisterPayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(payload) = payload?;
    state
        .participant_service
        .register(RegisterParticipantRequest {
            name: payload.name.unwrap_or_default(),
        })
        .await?;

    Ok(StatusCode::CREATED)
}

async fn list_participants(
    State(state): State<AppState>,
) -> Result<Json<Vec<ParticipantDto>>, ApiError> {
    let participants = state.participant_service.list().await?;
    Ok(Json(participants))
}

async fn post_message(
    State(state): State<AppState>,
    requester: Requester,
    payload: Result<Json<PostMessagePayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(payload) = payload?;
    state
        .message_service
        .post(PostMessageRequest {
            from: requester.into_name(),
            to: payload.to.unwrap_or_default(),
            text: payload.text.unwrap_or_default(),
            message_type: payload.message_type.unwrap_or_default(),
        })
        .await?;

    Ok(StatusCode::CREATED)
}

async fn get_messages(
    State(state): State<AppState>,
    Requester(requester): Requester,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    // 无法解析的查询串与非整数 limit 同样处理：视为未提供
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "ignoring malformed history query");
            HistoryQuery::default()
        }
    };
    let messages = state
        .message_service
        .retrieve(RetrieveMessagesRequest {
            requester,
            limit: query.limit(),
        })
        .await?;

    Ok(Json(messages))
}

async fn refresh_status(
    State(state): State<AppState>,
    requester: Requester,
) -> Result<StatusCode, ApiError> {
    state
        .participant_service
        .refresh_liveness(&requester.into_name())
        .await?;

    Ok(StatusCode::OK)
}
