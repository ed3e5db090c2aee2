use super::*;
use crate::config::ConsoleConfig;
use crate::routes::api_routes;
use axum::Router;
use axum::extract::Request;
use axum::routing::{any, get};
use serde_json::Value;
use tokio::net::TcpListener;

/// Backend stand-in that echoes what it received.
async fn echo(method: Method, RawQuery(query): RawQuery, headers: HeaderMap, request: Request) -> Json<Value> {
    let path = request.uri().path().to_owned();
    let body = axum::body::to_bytes(request.into_body(), usize::MAX).await.unwrap_or_default();
    Json(json!({
        "method": method.as_str(),
        "path": path,
        "query": query,
        "content_type": headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn spawn_router(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_backend() -> String {
    let router = Router::new()
        .route("/api/v1/missing", get(|| async { (StatusCode::NOT_FOUND, Json(json!({ "error": "Employee not found" }))) }))
        .route("/api/v1/plain", get(|| async { "ok" }))
        .route(
            "/api/v1/allocation-reports/export-excel",
            get(|| async { ([(CONTENT_DISPOSITION, "attachment; filename=allocation_report.xlsx")], "xlsx") }),
        )
        .route("/api/v1/{*rest}", any(echo));
    spawn_router(router).await
}

async fn spawn_console(backend_url: String) -> String {
    let config = ConsoleConfig { backend_url, max_body_bytes: 1024, ..ConsoleConfig::default() };
    let state = AppState::new(config).unwrap();
    spawn_router(api_routes(state)).await
}

#[test]
fn upstream_url_joins_path_and_query() {
    assert_eq!(upstream_url("http://b:5000", "employees/", None), "http://b:5000/api/v1/employees/");
    assert_eq!(
        upstream_url("http://b:5000/", "/employees/", Some("status=BENCH&search=ana")),
        "http://b:5000/api/v1/employees/?status=BENCH&search=ana"
    );
    assert_eq!(upstream_url("http://b:5000", "kpi", Some("")), "http://b:5000/api/v1/kpi");
}

#[test]
fn proxy_error_renders_bad_gateway_json() {
    let response = ProxyError::Timeout.into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        response.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
}

#[tokio::test]
async fn forwards_get_with_query() {
    let console = spawn_console(spawn_backend().await).await;

    let res = reqwest::get(format!("{console}/api/v1/employees/?status=BENCH&search=ana%20maria"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["method"], "GET");
    assert_eq!(body["path"], "/api/v1/employees/");
    assert_eq!(body["query"], "status=BENCH&search=ana%20maria");
}

#[tokio::test]
async fn forwards_body_method_and_content_type() {
    let console = spawn_console(spawn_backend().await).await;

    let res = reqwest::Client::new()
        .put(format!("{console}/api/v1/projects/7/team"))
        .header(CONTENT_TYPE, "application/json")
        .body(r#"{"team":[]}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["method"], "PUT");
    assert_eq!(body["path"], "/api/v1/projects/7/team");
    assert_eq!(body["content_type"], "application/json");
    assert_eq!(body["body"], r#"{"team":[]}"#);
}

#[tokio::test]
async fn backend_error_status_and_body_pass_through() {
    let console = spawn_console(spawn_backend().await).await;

    let res = reqwest::get(format!("{console}/api/v1/missing")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Employee not found");
}

#[tokio::test]
async fn upstream_content_type_is_preserved() {
    let console = spawn_console(spawn_backend().await).await;

    let res = reqwest::get(format!("{console}/api/v1/plain")).await.unwrap();
    assert_eq!(
        res.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("text/plain; charset=utf-8")
    );
    assert_eq!(res.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn export_download_filename_is_preserved() {
    let console = spawn_console(spawn_backend().await).await;

    let res = reqwest::get(format!("{console}/api/v1/allocation-reports/export-excel?report_type=internal"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(CONTENT_DISPOSITION).and_then(|v| v.to_str().ok()),
        Some("attachment; filename=allocation_report.xlsx")
    );
    assert_eq!(res.text().await.unwrap(), "xlsx");
}

#[tokio::test]
async fn plain_response_has_no_download_header() {
    let console = spawn_console(spawn_backend().await).await;

    let res = reqwest::get(format!("{console}/api/v1/plain")).await.unwrap();
    assert!(res.headers().get(CONTENT_DISPOSITION).is_none());
}

#[tokio::test]
async fn unreachable_backend_yields_bad_gateway() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let console = spawn_console(dead).await;

    let res = reqwest::get(format!("{console}/api/v1/kpi")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("backend"));
}

#[tokio::test]
async fn oversized_body_is_rejected_before_forwarding() {
    let console = spawn_console(spawn_backend().await).await;

    let res = reqwest::Client::new()
        .post(format!("{console}/api/v1/documents/upload"))
        .body(vec![b'x'; 4096])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn healthz_is_ok() {
    let console = spawn_console(spawn_backend().await).await;

    let res = reqwest::get(format!("{console}/healthz")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
