use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use twig_api::{Comment, CommentId, Deleted, Error, ListParams, NewComment, Page, COMMENTS_PATH};

use crate::SharedMock;

/// Serve `mock` with the same HTTP contract as the real comment service
pub fn router(mock: SharedMock) -> Router {
    Router::new()
        .route(COMMENTS_PATH, get(list).post(create))
        .route("/comments/:id", delete(remove))
        .with_state(mock)
}

struct HttpError(Error);

impl axum::response::IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        tracing::info!("returning error to client: {}", self.0);
        (self.0.status_code(), self.0.contents()).into_response()
    }
}

async fn list(
    State(mock): State<SharedMock>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page>, HttpError> {
    Ok(Json(mock.lock().list(&params).map_err(HttpError)?))
}

async fn create(
    State(mock): State<SharedMock>,
    Json(data): Json<NewComment>,
) -> Result<(StatusCode, Json<Comment>), HttpError> {
    let c = mock.lock().create(data).map_err(HttpError)?;
    Ok((StatusCode::CREATED, Json(c)))
}

async fn remove(
    State(mock): State<SharedMock>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>, HttpError> {
    Ok(Json(mock.lock().delete(CommentId(id)).map_err(HttpError)?))
}
