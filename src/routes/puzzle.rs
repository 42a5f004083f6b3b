use crate::{
    config::parse_word_list,
    game::{render_table, GridGenerator},
    models::{Grid, ParamsError, PuzzleParams},
    AppState,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

/// Query string form: `?height=8&width=8&words=cat,dog&seed=42`
#[derive(Debug, Default, Deserialize)]
pub struct PuzzleQuery {
    pub height: Option<usize>,
    pub width: Option<usize>,
    /// Comma-separated
    pub words: Option<String>,
    pub seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PuzzleRequest {
    pub height: Option<usize>,
    pub width: Option<usize>,
    pub words: Option<Vec<String>>,
    /// Makes the grid reproducible
    pub seed: Option<u64>,
}

impl From<PuzzleQuery> for PuzzleRequest {
    fn from(query: PuzzleQuery) -> Self {
        Self {
            height: query.height,
            width: query.width,
            words: query.words.as_deref().map(parse_word_list),
            seed: query.seed,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PuzzleResponse {
    pub height: usize,
    pub width: usize,
    pub grid: Grid,
}

/// Everything a puzzle request can be rejected for, answered as `{ "error": ... }`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Params(#[from] ParamsError),
    #[error(transparent)]
    Query(#[from] QueryRejection),
    #[error(transparent)]
    Json(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Params(_) => StatusCode::BAD_REQUEST,
            ApiError::Query(rejection) => rejection.status(),
            ApiError::Json(rejection) => rejection.status(),
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Generate a puzzle from query parameters
pub async fn get_puzzle(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PuzzleQuery>, QueryRejection>,
) -> Result<Json<PuzzleResponse>, ApiError> {
    let Query(query) = query.inspect_err(log_rejection)?;
    Ok(Json(generate(&state, query.into())?))
}

/// Generate a puzzle from a JSON body
pub async fn create_puzzle(
    State(state): State<Arc<AppState>>,
    request: Result<Json<PuzzleRequest>, JsonRejection>,
) -> Result<Json<PuzzleResponse>, ApiError> {
    let Json(request) = request.inspect_err(log_rejection)?;
    Ok(Json(generate(&state, request)?))
}

/// Generate a puzzle and render it as a plain-text table
pub async fn get_puzzle_table(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PuzzleQuery>, QueryRejection>,
) -> Result<String, ApiError> {
    let Query(query) = query.inspect_err(log_rejection)?;
    let puzzle = generate(&state, query.into())?;
    Ok(render_table(&puzzle.grid))
}

fn log_rejection<E: std::fmt::Display>(e: &E) {
    tracing::warn!("Malformed puzzle request: {}", e);
}

fn generate(state: &AppState, request: PuzzleRequest) -> Result<PuzzleResponse, ParamsError> {
    let puzzle_config = &state.config.puzzle;
    let defaults = puzzle_config.default_params();

    let params = PuzzleParams {
        height: request.height.unwrap_or(defaults.height),
        width: request.width.unwrap_or(defaults.width),
        words: request.words.unwrap_or(defaults.words),
    };

    params
        .validate(puzzle_config.max_dimension, puzzle_config.max_words)
        .inspect_err(|e| tracing::warn!("Rejected puzzle request {:?}: {}", params, e))?;

    let (height, width) = (params.height, params.width);
    let search = match request.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            GridGenerator::generate_with_rng(height, width, &params.words, &mut rng)
        }
        None => GridGenerator::generate_with_rng(height, width, &params.words, &mut rand::rng()),
    };

    // Skipped words stay out of the response
    tracing::debug!(
        "Generated {}x{} puzzle, placed {} of {} words ({} skipped)",
        height,
        width,
        search.placed.len(),
        params.words.len(),
        search.skipped.len()
    );

    Ok(PuzzleResponse {
        height,
        width,
        grid: search.grid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_app, test_state};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request},
    };
    use tokio_test::assert_ok;
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, String) {
        let app = create_app(test_state());
        let response = assert_ok!(app.oneshot(request).await);
        let status = response.status();
        let body = assert_ok!(to_bytes(response.into_body(), usize::MAX).await);
        (status, assert_ok!(String::from_utf8(body.to_vec())))
    }

    fn get(uri: &str) -> Request<Body> {
        assert_ok!(Request::builder().uri(uri).body(Body::empty()))
    }

    #[tokio::test]
    async fn test_get_puzzle_with_query() {
        let (status, body) = send(get("/api/puzzle?height=4&width=6&words=cat,dog")).await;
        assert_eq!(status, StatusCode::OK);

        let puzzle: PuzzleResponse = assert_ok!(serde_json::from_str(&body));
        assert_eq!(puzzle.height, 4);
        assert_eq!(puzzle.width, 6);
        assert_eq!(puzzle.grid.len(), 4);
        assert!(puzzle.grid.iter().all(|row| row.len() == 6));
        assert!(puzzle.grid.iter().flatten().all(|c| c.is_ascii_uppercase()));
    }

    #[tokio::test]
    async fn test_get_puzzle_uses_defaults() {
        let (status, body) = send(get("/api/puzzle")).await;
        assert_eq!(status, StatusCode::OK);

        let puzzle: PuzzleResponse = assert_ok!(serde_json::from_str(&body));
        assert_eq!((puzzle.height, puzzle.width), (10, 10));
    }

    #[tokio::test]
    async fn test_seeded_puzzles_match() {
        let uri = "/api/puzzle?height=8&width=8&words=seed,grid&seed=1234";
        let (_, first) = send(get(uri)).await;
        let (_, second) = send(get(uri)).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_cells_serialize_as_strings() {
        let (_, body) = send(get("/api/puzzle?height=1&width=1&words=q")).await;
        let value: serde_json::Value = assert_ok!(serde_json::from_str(&body));
        assert_eq!(value["grid"], json!([["Q"]]));
    }

    #[tokio::test]
    async fn test_post_puzzle() {
        let request = assert_ok!(Request::builder()
            .method("POST")
            .uri("/api/puzzle")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"height":5,"width":7,"words":["Rust"]}"#)));
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);

        let puzzle: PuzzleResponse = assert_ok!(serde_json::from_str(&body));
        assert_eq!(puzzle.grid.len(), 5);
        assert!(puzzle.grid.iter().all(|row| row.len() == 7));
    }

    #[tokio::test]
    async fn test_invalid_params_are_rejected() {
        let (status, body) = send(get("/api/puzzle?height=0&width=5")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: serde_json::Value = assert_ok!(serde_json::from_str(&body));
        assert_eq!(value["error"], "height and width must be at least 1");

        let (status, _) = send(get("/api/puzzle?height=5&width=500")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_query_returns_json_error() {
        let (status, body) = send(get("/api/puzzle?height=abc&width=5")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: serde_json::Value = assert_ok!(serde_json::from_str(&body));
        assert!(value["error"].is_string());

        let (status, body) = send(get("/api/puzzle/table?height=-1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: serde_json::Value = assert_ok!(serde_json::from_str(&body));
        assert!(value["error"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_body_returns_json_error() {
        let request = assert_ok!(Request::builder()
            .method("POST")
            .uri("/api/puzzle")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json")));
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: serde_json::Value = assert_ok!(serde_json::from_str(&body));
        assert!(value["error"].is_string());

        let request = assert_ok!(Request::builder()
            .method("POST")
            .uri("/api/puzzle")
            .body(Body::from(r#"{"height":5}"#)));
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let value: serde_json::Value = assert_ok!(serde_json::from_str(&body));
        assert!(value["error"].is_string());
    }

    #[tokio::test]
    async fn test_puzzle_table() {
        let (status, body) = send(get("/api/puzzle/table?height=2&width=3")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.lines().count(), 5);
        assert!(body.starts_with("+---+---+---+\n"));
    }

    #[test]
    fn test_query_into_request() {
        let query = PuzzleQuery {
            words: Some("cat, dog".to_string()),
            ..Default::default()
        };
        let request = PuzzleRequest::from(query);
        assert_eq!(
            request.words,
            Some(vec!["cat".to_string(), "dog".to_string()])
        );
        assert!(request.height.is_none());
    }
}
