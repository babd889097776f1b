//! Static asset serving module
//!
//! Maps `<url_prefix>/<file>` onto files inside the configured assets
//! directory. Directories are never listed and nothing outside the directory
//! is reachable.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Return the part of `path` after `prefix`, if `path` lives under it
///
/// ```
/// use quiz_server::handler::static_files::strip_prefix;
/// assert_eq!(strip_prefix("/images/a.jpg", "/images"), Some("a.jpg"));
/// assert_eq!(strip_prefix("/images/a.jpg", "/images/"), Some("a.jpg"));
/// assert_eq!(strip_prefix("/imagesx/a.jpg", "/images"), None);
/// ```
pub fn strip_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let prefix = prefix.trim_end_matches('/');
    if path == prefix {
        return Some("");
    }
    path.strip_prefix(prefix)?.strip_prefix('/')
}

/// Serve one asset from `dir`
pub async fn serve_asset(ctx: &RequestContext, dir: &str, relative: &str) -> Response<Full<Bytes>> {
    let Some((content, content_type)) = load_asset(dir, relative).await else {
        return http::build_404_response();
    };

    let etag = cache::generate_etag(&content);
    if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }

    http::response::build_cached_response(Bytes::from(content), content_type, &etag, ctx.is_head())
}

/// Percent-decode a URL path below the asset prefix into a relative file path
///
/// Each segment is decoded on its own. Segments that are not UTF-8 after
/// decoding, or that decode to `/`, NUL or `..`, make the whole path invalid.
///
/// ```
/// use quiz_server::handler::static_files::decode_relative_path;
/// assert_eq!(
///     decode_relative_path("eiffel%20tower.jpg").unwrap(),
///     std::path::PathBuf::from("eiffel tower.jpg")
/// );
/// assert!(decode_relative_path("a%2Fb.jpg").is_none());
/// ```
pub fn decode_relative_path(relative: &str) -> Option<PathBuf> {
    let mut path = PathBuf::new();
    for segment in relative.split('/').filter(|s| !s.is_empty()) {
        let decoded = percent_decode_str(segment).decode_utf8().ok()?;
        if decoded == ".." || decoded.contains(['/', '\\', '\0']) {
            return None;
        }
        if decoded != "." {
            path.push(&*decoded);
        }
    }
    (!path.as_os_str().is_empty()).then_some(path)
}

/// Load a file from `dir`, refusing directories and anything outside `dir`
///
/// `relative` is the still percent-encoded path below the asset prefix.
pub async fn load_asset(dir: &str, relative: &str) -> Option<(Vec<u8>, &'static str)> {
    let Some(relative) = decode_relative_path(relative) else {
        if !relative.trim_matches('/').is_empty() {
            logger::log_warning(&format!("Rejected asset path: {relative}"));
        }
        return None;
    };

    let dir_canonical = match fs::canonicalize(dir).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Assets directory not found or inaccessible '{dir}': {e}"
            ));
            return None;
        }
    };

    // Missing files are an ordinary 404, not worth a warning
    let file_canonical = fs::canonicalize(Path::new(dir).join(&relative)).await.ok()?;
    if !file_canonical.starts_with(&dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            relative.display(),
            file_canonical.display()
        ));
        return None;
    }

    if !fs::metadata(&file_canonical).await.ok()?.is_file() {
        return None;
    }

    let content = match fs::read(&file_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_canonical.display()
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(file_canonical.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}
