//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::error;

use crate::board::{ArrivalSource, BoardError, CycleOutcome, StopLocationSource};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router<A, S>(state: AppState<A, S>, static_dir: &str) -> Router
where
    A: ArrivalSource + Send + Sync + 'static,
    S: StopLocationSource + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index_page::<A, S>))
        .route("/health", get(health))
        .route("/board", get(board::<A, S>))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the search form and map.
async fn index_page<A, S>(State(state): State<AppState<A, S>>) -> IndexTemplate
where
    A: ArrivalSource + Send + Sync + 'static,
    S: StopLocationSource + Send + Sync + 'static,
{
    IndexTemplate {
        popular_stops: state
            .popular_stops
            .iter()
            .map(PopularStopView::from_stop)
            .collect(),
    }
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Run one query cycle and render the board.
///
/// Returns an HTML table fragment or a JSON body depending on the
/// Accept header. A superseded cycle answers 204 No Content; the
/// surface drops it on the floor.
async fn board<A, S>(
    State(state): State<AppState<A, S>>,
    headers: HeaderMap,
    Query(req): Query<BoardRequest>,
) -> Result<Response, AppError>
where
    A: ArrivalSource + Send + Sync + 'static,
    S: StopLocationSource + Send + Sync + 'static,
{
    let snapshot = match state.controller.submit(&req.id).await {
        Ok(CycleOutcome::Rendered(snapshot)) => snapshot,
        Ok(CycleOutcome::Superseded) => return Ok(StatusCode::NO_CONTENT.into_response()),
        Err(e) if accepts_html(&headers) => {
            // HTML clients get the message area as a fragment.
            let (status, message) = AppError::from(e).status_and_message();
            let html = ErrorTemplate { message }
                .render()
                .map_err(|e| AppError::Internal {
                    message: format!("Template error: {}", e),
                })?;
            return Ok((status, Html(html)).into_response());
        }
        Err(e) => return Err(AppError::from(e)),
    };

    if accepts_html(&headers) {
        let template = BoardTemplate::from_snapshot(&snapshot);
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(BoardResponse::from_snapshot(&snapshot)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<BoardError> for AppError {
    fn from(e: BoardError) -> Self {
        match e {
            BoardError::Validation(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            BoardError::NoArrivals { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            BoardError::Transport { .. } => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl AppError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        error!(%status, %message, "request failed");

        let body = Json(ErrorResponse {
            error: message,
        });
        (status, body).into_response()
    }
}
