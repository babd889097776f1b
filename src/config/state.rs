// Application state module
// Immutable state shared by every connection

use std::sync::Arc;
use tokio::sync::Notify;

use super::types::Config;
use crate::handler::middleware::{CorsInterceptor, InterceptorChain, ServerHeaderInterceptor};
use crate::logger;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Interceptors run around every request, in order
    pub interceptors: InterceptorChain,
    /// Notified once when the process is asked to stop
    pub shutdown: Arc<Notify>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        // Server header first so it also lands on preflight responses CORS answers itself
        let mut interceptors = InterceptorChain::new();
        match ServerHeaderInterceptor::new(&config.http.server_name) {
            Some(server_header) => interceptors = interceptors.with(server_header),
            None => logger::log_warning(&format!(
                "Ignoring http.server_name '{}': not a valid header value",
                config.http.server_name
            )),
        }
        let interceptors = interceptors.with(CorsInterceptor::permissive());

        Self {
            config: config.clone(),
            interceptors,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Base URL for image links when the request does not say otherwise
    pub fn public_url(&self) -> Option<&str> {
        self.config.quiz.public_url.as_deref()
    }
}
