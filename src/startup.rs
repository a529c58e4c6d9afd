use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::any::Any;
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};
use tracing::{error, info};

use crate::config::AppConfig;
use crate::error::internal_error_response;
use crate::logging::logging_middleware;
use crate::resource;
use crate::security::{headers_middleware, rate_limit_middleware, RateLimiter};

/// Assemble the full application: API routes, static pages and middleware
pub fn build_router(config: Arc<AppConfig>) -> Router {
    let limiter = Arc::new(RateLimiter::new(&config.rate_limit));

    // Unmatched /api paths fall through to the static 404 page
    let api = Router::new()
        .route("/health", get(resource::health::health))
        .route("/stats", get(resource::stats::stats))
        .route("/dashboard/stats", get(resource::stats::dashboard_stats))
        .route("/catalog", get(resource::catalog::catalog))
        .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware));

    let static_root = Path::new(&config.static_files.root);
    let not_found_page = static_root.join(&config.static_files.not_found_page);
    let static_files = ServeDir::new(static_root).not_found_service(ServeFile::new(not_found_page));

    let expose_panic_detail = config.is_development();
    let asset_max_age = config.static_files.asset_max_age_secs;

    Router::new()
        .nest("/api", api)
        .fallback_service(static_files)
        .with_state(config)
        .layer(middleware::from_fn_with_state(
            asset_max_age,
            cache_control_middleware,
        ))
        .layer(CatchPanicLayer::custom(move |panic: Box<dyn Any + Send + 'static>| {
            panic_response(panic, expose_panic_detail)
        }))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

/// HTML is always revalidated; other static assets may be cached for `max_age` seconds
async fn cache_control_middleware(
    State(max_age): State<u64>,
    request: Request,
    next: Next,
) -> Response {
    if request.uri().path().starts_with("/api/") {
        return next.run(request).await;
    }

    let mut response = next.run(request).await;
    if response.headers().contains_key(header::CACHE_CONTROL) {
        return response;
    }

    let is_html = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .map(|ct| ct.to_ascii_lowercase().starts_with("text/html"))
        .unwrap_or(false);

    let value = if is_html || !response.status().is_success() {
        HeaderValue::from_static("public, max-age=0")
    } else {
        match HeaderValue::from_str(&format!("public, max-age={}", max_age)) {
            Ok(value) => value,
            Err(_) => return response,
        }
    };
    response.headers_mut().insert(header::CACHE_CONTROL, value);

    response
}

fn panic_response(panic: Box<dyn Any + Send + 'static>, expose_detail: bool) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };
    error!("handler panicked: {}", detail);

    internal_error_response(expose_detail.then_some(detail.as_str())).into_response()
}

/// Print the startup banner listing the public endpoints
pub fn print_banner(config: &AppConfig) {
    let base = format!("http://{}:{}", config.server.host, config.server.port);
    println!("🚀 DUHIGURE MU MIRYANGO server is running!");
    println!("   📍 Address: {}", base);
    println!("   🌐 Environment: {}", config.server.environment);
    println!("   📁 Static files: {}", config.static_files.root);
    println!();
    println!("   📊 API endpoints:");
    println!("   - Health check: {}/api/health", base);
    println!("   - Statistics: {}/api/stats", base);
    println!("   - Dashboard: {}/api/dashboard/stats", base);
    println!("   - Form options: {}/api/catalog", base);
    println!("   - Home page: {}", base);
    println!();
    println!("   🔧 Press Ctrl+C to stop");
}

/// Resolves on Ctrl-C, or SIGTERM on Unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl-C received, shutting down gracefully..."),
        _ = terminate => info!("SIGTERM received, shutting down gracefully..."),
    }
}
