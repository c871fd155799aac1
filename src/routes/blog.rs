//! Blog routes: method/path matching only, work is delegated to the
//! `BlogController` in `AppState`.

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};

use crate::services::blog::{BlogError, BlogPost, GuideQuery, NewBlogPost};
use crate::state::AppState;

/// `POST /post`, `GET /get`, `POST /guideblogs`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/post", post(post_blog))
        .route("/get", get(fetch_all_blogs))
        .route("/guideblogs", post(fetch_guide_blogs))
}

/// `POST /post`: create a blog post.
pub async fn post_blog(
    State(state): State<AppState>,
    Json(draft): Json<NewBlogPost>,
) -> Result<(StatusCode, Json<BlogPost>), BlogError> {
    let post = state.blogs.post_blog(draft).await?;
    tracing::info!(post_id = %post.id, category = %post.category, "blog post created");
    Ok((StatusCode::CREATED, Json(post)))
}

/// `GET /get`: list every blog post.
pub async fn fetch_all_blogs(State(state): State<AppState>) -> Result<Json<Vec<BlogPost>>, BlogError> {
    Ok(Json(state.blogs.fetch_all_blogs().await?))
}

/// `POST /guideblogs`: list guide posts. An empty body means no filter.
pub async fn fetch_guide_blogs(State(state): State<AppState>, body: Bytes) -> Result<Json<Vec<BlogPost>>, BlogError> {
    let query = parse_guide_query(&body)?;
    Ok(Json(state.blogs.fetch_guide_blogs(query).await?))
}

pub(crate) fn parse_guide_query(body: &[u8]) -> Result<GuideQuery, BlogError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GuideQuery::default());
    }
    serde_json::from_slice(body).map_err(|e| BlogError::Invalid(format!("guide query: {e}")))
}

pub(crate) fn blog_error_to_status(err: &BlogError) -> StatusCode {
    match err {
        BlogError::Invalid(_) => StatusCode::BAD_REQUEST,
        BlogError::NotFound(_) => StatusCode::NOT_FOUND,
        BlogError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        let status = blog_error_to_status(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "blog request failed");
        } else {
            tracing::warn!(error = %self, "blog request rejected");
        }
        (status, Json(serde_json::json!({ "message": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
#[path = "blog_test.rs"]
mod tests;
