// Connection handling module
// Accepts a single TCP connection and serves it with hyper

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::config;
use crate::handler;
use crate::logger;

/// Accept and process a connection, enforcing the connection limit.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state
/// * `conn_counter` - Active connection counter
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: &Arc<config::AppState>,
    conn_counter: &Arc<AtomicUsize>,
) {
    // Increment first, then check, so concurrent accepts cannot both slip under the limit
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection rejected."
            ));
            drop(stream);
            return;
        }
    }

    logger::log_connection_accepted(&peer_addr);

    handle_connection(stream, peer_addr, Arc::clone(state), Arc::clone(conn_counter));
}

/// Tracks requests on one connection so idle keep-alive time can be bounded
struct ConnectionActivity {
    opened: Instant,
    in_flight: AtomicUsize,
    /// Milliseconds after `opened` of the last request start or finish
    last_active_ms: AtomicU64,
}

impl ConnectionActivity {
    fn new() -> Self {
        Self {
            opened: Instant::now(),
            in_flight: AtomicUsize::new(0),
            last_active_ms: AtomicU64::new(0),
        }
    }

    fn touch(&self) {
        let ms = u64::try_from(self.opened.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.last_active_ms.store(ms, Ordering::SeqCst);
    }

    fn begin(&self) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.touch();
    }

    fn end(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.touch();
    }

    fn last_active(&self) -> Instant {
        self.opened + Duration::from_millis(self.last_active_ms.load(Ordering::SeqCst))
    }

    /// When the connection becomes idle for `idle`, if nothing happens first
    fn idle_deadline(&self, idle: Duration) -> Instant {
        if self.in_flight.load(Ordering::SeqCst) > 0 {
            Instant::now() + idle
        } else {
            self.last_active() + idle
        }
    }

    fn is_idle_for(&self, idle: Duration) -> bool {
        self.in_flight.load(Ordering::SeqCst) == 0 && self.last_active().elapsed() >= idle
    }
}

/// Serve one connection in a spawned task.
///
/// `read_timeout` bounds how long a request head may take to arrive;
/// `keep_alive_timeout` closes the connection once it has been idle that
/// long between requests. The counter is decremented when the task ends.
fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: Arc<config::AppState>,
    conn_counter: Arc<AtomicUsize>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let performance = &state.config.performance;
        let keep_alive = performance.keep_alive_timeout > 0;
        let idle_timeout = Duration::from_secs(performance.keep_alive_timeout);

        let mut builder = http1::Builder::new();
        builder.keep_alive(keep_alive).timer(TokioTimer::new());
        if performance.read_timeout > 0 {
            builder.header_read_timeout(Duration::from_secs(performance.read_timeout));
        }

        let activity = Arc::new(ConnectionActivity::new());
        let service_activity = Arc::clone(&activity);
        let service_state = Arc::clone(&state);
        let mut conn = std::pin::pin!(builder.serve_connection(
            io,
            service_fn(move |req| {
                let activity = Arc::clone(&service_activity);
                let state = Arc::clone(&service_state);
                async move {
                    activity.begin();
                    let response = handler::handle_request(req, state, peer_addr).await;
                    activity.end();
                    response
                }
            }),
        ));

        let mut closing = false;
        let result = loop {
            let deadline = activity.idle_deadline(idle_timeout);
            tokio::select! {
                result = conn.as_mut() => break result,
                () = tokio::time::sleep_until(deadline), if keep_alive && !closing => {
                    if activity.is_idle_for(idle_timeout) {
                        logger::log_debug(&format!(
                            "Closing idle connection from {peer_addr} after {}s",
                            idle_timeout.as_secs()
                        ));
                        conn.as_mut().graceful_shutdown();
                        closing = true;
                    }
                }
            }
        };

        if let Err(err) = result {
            if err.is_timeout() {
                logger::log_debug(&format!("Timed out reading request head from {peer_addr}"));
            } else {
                logger::log_connection_error(&err);
            }
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_activity_idle_tracking() {
        let activity = ConnectionActivity::new();
        let idle = Duration::from_millis(50);
        assert!(!activity.is_idle_for(idle));

        activity.begin();
        tokio::time::sleep(Duration::from_millis(80)).await;
        // A request in progress is never idle
        assert!(!activity.is_idle_for(idle));
        assert!(activity.idle_deadline(idle) > Instant::now());

        activity.end();
        assert!(!activity.is_idle_for(idle));
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(activity.is_idle_for(idle));
    }
}
