#![allow(dead_code)]

use axum::extract::ConnectInfo;
use axum::{Extension, Router};
use duhigure::config::{AppConfig, RateLimitConfig};
use duhigure::startup::build_router;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const INDEX_HTML: &str = "<!doctype html><title>DUHIGURE</title><h1>Murakaza neza</h1>";
pub const NOT_FOUND_HTML: &str = "<!doctype html><title>Not found</title><h1>404</h1>";
pub const SITE_CSS: &str = "body { color: #198754; }";

static PUBLIC_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Create a throwaway static root with an index page, a 404 page and one asset
pub fn create_public_dir() -> PathBuf {
    let n = PUBLIC_DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    let root = std::env::temp_dir().join(format!("duhigure-public-{}-{}", std::process::id(), n));

    std::fs::create_dir_all(root.join("css")).unwrap();
    std::fs::write(root.join("index.html"), INDEX_HTML).unwrap();
    std::fs::write(root.join("404.html"), NOT_FOUND_HTML).unwrap();
    std::fs::write(root.join("css").join("site.css"), SITE_CSS).unwrap();

    root
}

/// Default configuration pointed at a fresh static root
pub fn create_test_app_config() -> AppConfig {
    let mut config = AppConfig::default_config();
    config.static_files.root = create_public_dir().to_string_lossy().into_owned();
    config
}

pub fn create_test_app_config_with_limit(max_requests: usize) -> AppConfig {
    let mut config = create_test_app_config();
    config.rate_limit = RateLimitConfig {
        window_secs: 900,
        max_requests,
        trust_proxy_headers: false,
    };
    config
}

pub fn setup_test_app(app_config: AppConfig) -> Router {
    build_router(Arc::new(app_config))
}

/// Router whose every request appears to come from the TCP peer `peer`
pub fn setup_test_app_from_peer(app_config: AppConfig, peer: SocketAddr) -> Router {
    setup_test_app(app_config).layer(Extension(ConnectInfo(peer)))
}
