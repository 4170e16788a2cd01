//! HTTP endpoint tests: a real listener on an ephemeral port

use crate::{create_test_config, mount_body, mount_sitemap, page_html};
use seo_audit::crawler::Coordinator;
use seo_audit::server::router;
use serde_json::Value;
use wiremock::MockServer;

/// Starts the endpoint on 127.0.0.1:0 and returns its base URL
async fn start_endpoint() -> String {
    let coordinator = Coordinator::new(create_test_config()).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, router(coordinator)).await;
    });

    format!("http://{}", address)
}

async fn get_json(url: &str, query: &[(&str, String)]) -> (u16, Value) {
    let response = reqwest::Client::new()
        .get(url)
        .query(query)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    let body: Value = serde_json::from_str(&response.text().await.unwrap()).unwrap();
    (status, body)
}

/// A site with three pages listed in its sitemap
async fn three_page_site() -> MockServer {
    let mock_server = MockServer::start().await;
    mount_sitemap(&mock_server, &["/", "/a", "/b"]).await;
    for (route, title) in [("/", "Home"), ("/a", "A"), ("/b", "B")] {
        mount_body(&mock_server, route, 200, page_html(title, "")).await;
    }
    mock_server
}

#[tokio::test]
async fn test_health() {
    let endpoint = start_endpoint().await;
    let (status, body) = get_json(&format!("{}/health", endpoint), &[]).await;

    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!({ "ok": true }));
}

#[tokio::test]
async fn test_single_domain_payload_shape() {
    let site = three_page_site().await;
    let endpoint = start_endpoint().await;

    let (status, body) = get_json(
        &format!("{}/api/seo-audit", endpoint),
        &[("domain", site.uri())],
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["ok"], true);
    assert_eq!(body["domain"], site.uri());
    assert_eq!(body["count"], 3);
    assert!(body.get("compareDomain").is_none());
    assert!(body["generatedAt"].is_string());

    let first = &body["results"][0];
    assert_eq!(first["url"], format!("{}/", site.uri()));
    assert_eq!(first["status"], 200);
    assert_eq!(first["title"], "Home");
    assert_eq!(first["titleLength"], 4);
    assert_eq!(first["indexable"], true);
    assert!(first["metaDescription"].is_null());
    assert!(first["loadMs"].is_u64());
}

#[tokio::test]
async fn test_limit_is_clamped_to_at_least_one() {
    let site = three_page_site().await;
    let endpoint = start_endpoint().await;

    let (status, body) = get_json(
        &format!("{}/api/seo-audit", endpoint),
        &[("domain", site.uri()), ("limit", "0".to_string())],
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_unparseable_numbers_fall_back_to_defaults() {
    let site = three_page_site().await;
    let endpoint = start_endpoint().await;

    let (status, body) = get_json(
        &format!("{}/api/seo-audit", endpoint),
        &[
            ("domain", site.uri()),
            ("limit", "many".to_string()),
            ("concurrency", "fast".to_string()),
            ("timeout", "soon".to_string()),
        ],
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn test_limit_two_audits_two_pages() {
    let site = three_page_site().await;
    let endpoint = start_endpoint().await;

    let (_, body) = get_json(
        &format!("{}/api/seo-audit", endpoint),
        &[
            ("domain", site.uri()),
            ("limit", "2".to_string()),
            ("concurrency", "99".to_string()),
        ],
    )
    .await;

    assert_eq!(body["count"], 2);
    assert_eq!(body["results"][1]["url"], format!("{}/a", site.uri()));
}

#[tokio::test]
async fn test_comparator_payload_shape() {
    let base = three_page_site().await;
    let compare = three_page_site().await;
    let endpoint = start_endpoint().await;

    let (status, body) = get_json(
        &format!("{}/api/seo-audit", endpoint),
        &[("domain", base.uri()), ("compareDomain", compare.uri())],
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["ok"], true);
    assert_eq!(body["compareDomain"], compare.uri());
    assert_eq!(body["count"], 3);

    let pair = &body["results"][1];
    assert_eq!(pair["base"]["url"], format!("{}/a", base.uri()));
    assert_eq!(pair["compare"]["url"], format!("{}/a", compare.uri()));
    assert_eq!(pair["equal"]["title"], true);
    assert_eq!(pair["equal"]["lang"], true);
}

#[tokio::test]
async fn test_malformed_domain_is_server_error() {
    let endpoint = start_endpoint().await;

    let (status, body) = get_json(
        &format!("{}/api/seo-audit", endpoint),
        &[("domain", "http://".to_string())],
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body["ok"], false);
    assert!(!body["error"].as_str().unwrap().is_empty());
}
