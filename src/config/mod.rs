// Configuration module entry point
// Loads layered configuration and holds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    AssetsConfig, Config, HealthConfig, HttpConfig, LoggingConfig, PerformanceConfig,
    QuizConfig, ServerConfig,
};

/// Default config file, looked up without extension
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Environment variables use the `QUIZ_` prefix and `__` between
    /// nested keys, e.g. `QUIZ_SERVER__PORT=9090`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("QUIZ")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("assets.url_prefix", "/images")?
            .set_default("assets.dir", "images")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("http.server_name", "quiz-server")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Base URL used when neither `quiz.public_url` nor a Host header is available
    pub fn fallback_base_url(&self) -> String {
        format!("http://localhost:{}", self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("does-not-exist/quiz-config").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.assets.url_prefix, "/images");
        assert_eq!(cfg.assets.dir, "images");
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(cfg.quiz.public_url.is_none());
        assert!(cfg.health.enabled);
        assert_eq!(cfg.health.liveness_path, "/healthz");
        assert_eq!(cfg.http.max_body_size, 1_048_576);
        assert_eq!(cfg.performance.keep_alive_timeout, 75);
        assert_eq!(cfg.performance.read_timeout, 30);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9191

[quiz]
public_url = "https://quiz.example.com"

[assets]
dir = "/srv/quiz/images"
"#,
        )
        .unwrap();

        let stem = dir.path().join("quiz");
        let cfg = Config::load_from(stem.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9191);
        assert_eq!(
            cfg.quiz.public_url.as_deref(),
            Some("https://quiz.example.com")
        );
        assert_eq!(cfg.assets.dir, "/srv/quiz/images");
        // Untouched keys keep their defaults
        assert_eq!(cfg.assets.url_prefix, "/images");
        assert_eq!(cfg.fallback_base_url(), "http://localhost:9191");
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::load_from("does-not-exist/quiz-config").unwrap();
        let addr = cfg.get_socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
        assert!(addr.ip().is_unspecified());
    }
}
