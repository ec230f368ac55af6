use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS,
            CONTENT_TYPE,
        },
        HeaderValue,
        Method,
        StatusCode,
    },
    middleware::map_response,
    response::{
        IntoResponse,
        Response,
    },
    routing::get,
    Json,
    Router,
};
use serde::{
    Deserialize,
    Serialize,
};
use tower_http::{
    cors::{
        Any,
        CorsLayer,
    },
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    entry::LogEntry,
    error::AppError,
    log::LogList,
    request::AppendRequest,
    service::LogService,
};

/// Body of `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntriesResponse {
    pub entries: LogList,
}

/// Body of a successful `POST /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendResponse {
    pub success: bool,
    pub entry: LogEntry,
    pub entries: LogList,
}

const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";

/// Every response carries the same permissive CORS headers; `OPTIONS` is acknowledged by the CORS
/// layer before it reaches a handler. HEAD is refused like any other unsupported method.
pub fn router(service: LogService, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route(
            "/",
            get(entries_handler)
                .post(append_handler)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .layer(TimeoutLayer::new(request_timeout))
        .layer(map_response(timeout_as_error))
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

// Handlers never answer 408 themselves, so any 408 here came from the timeout layer
async fn timeout_as_error(resp: Response) -> Response {
    if resp.status() == StatusCode::REQUEST_TIMEOUT {
        return AppError::Timeout.into_response();
    }
    resp
}

async fn entries_handler(
    State(service): State<LogService>,
) -> Result<Json<EntriesResponse>, AppError> {
    let entries = service.fetch_entries().await?;
    Ok(Json(EntriesResponse { entries }))
}

// The body is parsed by hand so that malformed JSON surfaces as an internal error instead of the
// extractor's plain-text rejection
async fn append_handler(
    State(service): State<LogService>,
    body: Bytes,
) -> Result<Json<AppendResponse>, AppError> {
    let req: AppendRequest = serde_json::from_slice(&body)?;
    let appended = service.append_entry(&req).await?;
    Ok(Json(AppendResponse {
        success: true,
        entry: appended.entry,
        entries: appended.entries,
    }))
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
