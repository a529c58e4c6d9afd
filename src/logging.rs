use axum::{
    extract::Request,
    http::{header, HeaderMap, Method, Uri, Version},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use std::time::Instant;
use tracing::info;

use crate::security::peer_addr;

/// One access log line per request, in the Apache combined format
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let version = request.version();
    let remote_addr = peer_addr(&request).unwrap_or_else(|| "-".to_string());
    let referer = header_or_dash(request.headers(), header::REFERER);
    let user_agent = header_or_dash(request.headers(), header::USER_AGENT);

    let response = next.run(request).await;

    let duration = start.elapsed();
    let timestamp = Utc::now().format("%d/%b/%Y:%H:%M:%S +0000");
    let content_length = header_or_dash(response.headers(), header::CONTENT_LENGTH);

    info!(
        target: "access_log",
        "{} - - [{}] \"{}\" {} {} \"{}\" \"{}\" {}ms",
        remote_addr,
        timestamp,
        format_request(&method, &uri, version),
        response.status().as_u16(),
        content_length,
        referer,
        user_agent,
        duration.as_millis(),
    );

    response
}

fn header_or_dash(headers: &HeaderMap, name: header::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-")
        .to_string()
}

fn format_request(method: &Method, uri: &Uri, version: Version) -> String {
    format!("{} {} {:?}", method, uri, version)
}
