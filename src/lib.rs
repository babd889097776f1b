//! Quiz server library
//!
//! Serves a fixed quiz over `GET /api/quiz`, question images from a local
//! directory, and permissive CORS headers on every response.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod quiz;
pub mod server;
