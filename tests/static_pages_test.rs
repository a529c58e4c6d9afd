use axum_test::TestServer;
use http::StatusCode;

mod common;

#[tokio::test]
async fn test_home_page_is_served_as_html() {
    let server = TestServer::new(common::setup_test_app(common::create_test_app_config())).unwrap();

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response
        .headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(response.text(), common::INDEX_HTML);
    assert_eq!(response.headers()["cache-control"], "public, max-age=0");
}

#[tokio::test]
async fn test_assets_are_cacheable() {
    let server = TestServer::new(common::setup_test_app(common::create_test_app_config())).unwrap();

    let response = server.get("/css/site.css").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), common::SITE_CSS);
    assert_eq!(response.headers()["cache-control"], "public, max-age=86400");
}

#[tokio::test]
async fn test_unknown_page_gets_not_found_page() {
    let server = TestServer::new(common::setup_test_app(common::create_test_app_config())).unwrap();

    let response = server.get("/nonexistent").expect_failure().await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.text(), common::NOT_FOUND_HTML);
}

#[tokio::test]
async fn test_unknown_api_route_gets_not_found_page() {
    let server = TestServer::new(common::setup_test_app(common::create_test_app_config())).unwrap();

    let response = server.get("/api/dashboard/unknown").expect_failure().await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_static_root_still_answers_not_found() {
    let mut config = common::create_test_app_config();
    config.static_files.root = "/nonexistent/duhigure/public".to_string();
    let server = TestServer::new(common::setup_test_app(config)).unwrap();

    let response = server.get("/").expect_failure().await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    // The API does not depend on the static root
    let response = server.get("/api/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
}
