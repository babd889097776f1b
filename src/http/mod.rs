//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the quiz endpoint and the asset server,
//! decoupled from any particular route.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_404_response, build_405_response, build_413_response,
    build_500_response, build_health_response, build_json_response, build_preflight_response,
};
