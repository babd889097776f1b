//! Request interceptors
//!
//! An [`InterceptorChain`] wraps the router. Each interceptor may answer a
//! request itself (short-circuit) or let it continue to the next one; on the
//! way back every interceptor that was entered gets to adjust the response,
//! innermost first.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, SERVER,
};
use hyper::{Method, Response};
use std::future::Future;

use crate::http;
use crate::logger;

/// The parts of a request interceptors look at
pub struct RequestHead<'a> {
    pub method: &'a Method,
    pub path: &'a str,
}

/// Outcome of an interceptor's request hook
pub enum Flow {
    Continue,
    Respond(Response<Full<Bytes>>),
}

pub trait Interceptor: Send + Sync {
    fn name(&self) -> &'static str;

    fn on_request(&self, _head: &RequestHead<'_>) -> Flow {
        Flow::Continue
    }

    fn on_response(&self, _response: &mut Response<Full<Bytes>>) {}
}

/// Ordered list of interceptors
#[derive(Default)]
pub struct InterceptorChain {
    interceptors: Vec<Box<dyn Interceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor; earlier ones see the request first
    #[must_use]
    pub fn with(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Box::new(interceptor));
        self
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Run `handler` inside the chain
    pub async fn run<F, Fut>(&self, head: &RequestHead<'_>, handler: F) -> Response<Full<Bytes>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Response<Full<Bytes>>>,
    {
        let mut entered = 0;
        let mut short_circuit = None;

        for interceptor in &self.interceptors {
            entered += 1;
            if let Flow::Respond(response) = interceptor.on_request(head) {
                logger::log_debug(&format!(
                    "{} answered {} {}",
                    interceptor.name(),
                    head.method,
                    head.path
                ));
                short_circuit = Some(response);
                break;
            }
        }

        let mut response = match short_circuit {
            Some(response) => response,
            None => handler().await,
        };

        for interceptor in self.interceptors[..entered].iter().rev() {
            interceptor.on_response(&mut response);
        }

        response
    }
}

/// Adds cross-origin headers to every response and answers preflight requests
pub struct CorsInterceptor {
    allow_origin: HeaderValue,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
}

impl CorsInterceptor {
    /// Any origin; GET, POST and OPTIONS; `Content-Type` request header
    pub fn permissive() -> Self {
        Self {
            allow_origin: HeaderValue::from_static("*"),
            allow_methods: HeaderValue::from_static("GET, POST, OPTIONS"),
            allow_headers: HeaderValue::from_static("Content-Type"),
        }
    }
}

impl Interceptor for CorsInterceptor {
    fn name(&self) -> &'static str {
        "cors"
    }

    fn on_request(&self, head: &RequestHead<'_>) -> Flow {
        if *head.method == Method::OPTIONS {
            Flow::Respond(http::build_preflight_response())
        } else {
            Flow::Continue
        }
    }

    fn on_response(&self, response: &mut Response<Full<Bytes>>) {
        let headers = response.headers_mut();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
    }
}

/// Sets the `Server` response header
pub struct ServerHeaderInterceptor {
    value: HeaderValue,
}

impl ServerHeaderInterceptor {
    /// Returns `None` when `name` is not a valid header value
    pub fn new(name: &str) -> Option<Self> {
        HeaderValue::from_str(name).ok().map(|value| Self { value })
    }
}

impl Interceptor for ServerHeaderInterceptor {
    fn name(&self) -> &'static str {
        "server-header"
    }

    fn on_response(&self, response: &mut Response<Full<Bytes>>) {
        response.headers_mut().insert(SERVER, self.value.clone());
    }
}
