//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: runs the interceptor chain,
//! checks request size and method, and dispatches to the quiz endpoint,
//! the asset server or the health checks.

use crate::config::AppState;
use crate::handler::middleware::RequestHead;
use crate::handler::{quiz, static_files};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::header::{HeaderMap, CONTENT_LENGTH, HOST, IF_NONE_MATCH, REFERER, USER_AGENT};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Everything routing needs from a request, detached from its body
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub version: Version,
    pub host: Option<String>,
    pub if_none_match: Option<String>,
    pub content_length: Option<String>,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
}

impl RequestContext {
    pub fn from_request<B>(req: &Request<B>) -> Self {
        let headers = req.headers();
        Self {
            method: req.method().clone(),
            path: req.uri().path().to_string(),
            query: req.uri().query().map(ToString::to_string),
            version: req.version(),
            host: header_string(headers, &HOST),
            if_none_match: header_string(headers, &IF_NONE_MATCH),
            content_length: header_string(headers, &CONTENT_LENGTH),
            referer: header_string(headers, &REFERER),
            user_agent: header_string(headers, &USER_AGENT),
        }
    }

    pub fn is_head(&self) -> bool {
        self.method == Method::HEAD
    }
}

fn header_string(headers: &HeaderMap, name: &hyper::header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let ctx = RequestContext::from_request(&req);
    drop(req);

    let head = RequestHead {
        method: &ctx.method,
        path: &ctx.path,
    };
    let response = state
        .interceptors
        .run(&head, || route_request(&ctx, &state))
        .await;

    if state.config.logging.access_log {
        log_access(&ctx, &response, peer_addr, started, &state);
    }

    Ok(response)
}

/// Route request based on path and configuration
async fn route_request(ctx: &RequestContext, state: &AppState) -> Response<Full<Bytes>> {
    if let Some(resp) = check_body_size(ctx, state.config.http.max_body_size) {
        return resp;
    }

    // Health check endpoints (highest priority, always fast)
    let health = &state.config.health;
    if health.enabled && (ctx.path == health.liveness_path || ctx.path == health.readiness_path) {
        return http::build_health_response("ok");
    }

    let readable = matches!(ctx.method, Method::GET | Method::HEAD);

    if ctx.path == quiz::QUIZ_PATH {
        if !readable {
            return method_not_allowed(ctx);
        }
        return quiz::serve_quiz(ctx, state);
    }

    if let Some(relative) = static_files::strip_prefix(&ctx.path, &state.config.assets.url_prefix) {
        if !readable {
            return method_not_allowed(ctx);
        }
        return static_files::serve_asset(ctx, &state.config.assets.dir, relative).await;
    }

    http::build_404_response()
}

fn method_not_allowed(ctx: &RequestContext) -> Response<Full<Bytes>> {
    logger::log_debug(&format!("Method not allowed: {} {}", ctx.method, ctx.path));
    http::build_405_response()
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(ctx: &RequestContext, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let size_str = ctx.content_length.as_deref()?;
    match size_str.trim().parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
        _ => None,
    }
}

fn log_access(
    ctx: &RequestContext,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
    state: &AppState,
) {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        ctx.method.to_string(),
        ctx.path.clone(),
    );
    entry.query.clone_from(&ctx.query);
    entry.http_version = match ctx.version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.referer.clone_from(&ctx.referer);
    entry.user_agent.clone_from(&ctx.user_agent);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}
