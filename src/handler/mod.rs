//! Request handler module
//!
//! Routing dispatch, the quiz endpoint, static asset serving and the
//! interceptors wrapped around all of them.

pub mod middleware;
pub mod quiz;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
