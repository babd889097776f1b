//! Quiz endpoint
//!
//! Serves the quiz document as JSON with image paths made absolute.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http;
use crate::logger;
use crate::quiz;

/// Route served by [`serve_quiz`]
pub const QUIZ_PATH: &str = "/api/quiz";

/// Pick the base URL image paths are resolved against
///
/// Order: configured `quiz.public_url`, then the request's Host header,
/// then `http://localhost:<port>`.
pub fn resolve_base_url(ctx: &RequestContext, state: &AppState) -> String {
    if let Some(url) = state.public_url() {
        return url.trim_end_matches('/').to_string();
    }
    match ctx.host.as_deref() {
        Some(host) if !host.is_empty() => format!("http://{host}"),
        _ => state.config.fallback_base_url(),
    }
}

/// Handle `GET`/`HEAD /api/quiz`
pub fn serve_quiz(ctx: &RequestContext, state: &AppState) -> Response<Full<Bytes>> {
    let base_url = resolve_base_url(ctx, state);
    let document = quiz::build_quiz(&base_url);

    match serde_json::to_string(&document) {
        Ok(json) => {
            logger::log_debug(&format!(
                "Serving {} questions with base URL {base_url}",
                document.questions.len()
            ));
            http::build_json_response(json, ctx.is_head())
        }
        Err(e) => {
            logger::log_error(&format!("Failed to serialize quiz: {e}"));
            http::build_500_response()
        }
    }
}
