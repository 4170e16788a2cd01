//! Discovery, page audit and comparison scenarios against mock servers

use crate::{
    create_test_config, mount_body, mount_sitemap, page_html, sitemap_index, urlset,
};
use seo_audit::crawler::{
    audit_page, build_http_client, AuditResults, Coordinator, RawAuditParams,
};
use seo_audit::discover;
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn params_for(domain: &str) -> RawAuditParams {
    RawAuditParams {
        domain: Some(domain.to_string()),
        ..RawAuditParams::default()
    }
}

#[tokio::test]
async fn test_sitemap_urls_are_audited_in_order() {
    let mock_server = MockServer::start().await;
    let urls = mount_sitemap(&mock_server, &["/", "/a", "/b"]).await;

    mount_body(&mock_server, "/", 200, page_html("Home", "")).await;
    mount_body(&mock_server, "/a", 200, page_html("Page A", "")).await;
    mount_body(&mock_server, "/b", 200, page_html("Page B", "")).await;

    let coordinator = Coordinator::new(create_test_config()).unwrap();
    let response = coordinator
        .handle(&params_for(&mock_server.uri()))
        .await
        .unwrap();

    assert!(response.ok);
    assert_eq!(response.domain, mock_server.uri());
    assert_eq!(response.count, 3);
    assert_eq!(response.compare_domain, None);

    let AuditResults::Pages(pages) = response.results else {
        panic!("expected plain page results");
    };
    let audited: Vec<&str> = pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(audited, urls.iter().map(String::as_str).collect::<Vec<_>>());

    let titles: Vec<Option<&str>> = pages.iter().map(|p| p.title.as_deref()).collect();
    assert_eq!(titles, vec![Some("Home"), Some("Page A"), Some("Page B")]);
    assert!(pages.iter().all(|p| p.status == 200 && p.indexable));
}

#[tokio::test]
async fn test_error_status_page_still_extracted() {
    let mock_server = MockServer::start().await;
    mount_body(
        &mock_server,
        "/broken",
        500,
        page_html("Server Error", "<meta name=\"description\" content=\"Oops\">"),
    )
    .await;

    let client = build_http_client(&create_test_config().user_agent).unwrap();
    let url = format!("{}/broken", mock_server.uri());
    let metrics = audit_page(&client, &url, Duration::from_secs(5)).await;

    assert_eq!(metrics.status, 500);
    assert_eq!(metrics.title.as_deref(), Some("Server Error"));
    assert_eq!(metrics.meta_description.as_deref(), Some("Oops"));
    assert_eq!(metrics.h1.as_deref(), Some("Heading"));
}

#[tokio::test]
async fn test_redirected_page_resolves_against_requested_url() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new/deep/page"))
        .mount(&mock_server)
        .await;
    mount_body(
        &mock_server,
        "/new/deep/page",
        200,
        page_html(
            "Moved",
            "<link rel=\"canonical\" href=\"canonical-target\">\
             <meta property=\"og:image\" content=\"img/cover.png\">",
        ),
    )
    .await;

    let client = build_http_client(&create_test_config().user_agent).unwrap();
    let url = format!("{}/old", mock_server.uri());
    let metrics = audit_page(&client, &url, Duration::from_secs(5)).await;

    assert_eq!(metrics.status, 200);
    assert_eq!(metrics.url, url);
    assert_eq!(metrics.title.as_deref(), Some("Moved"));
    assert_eq!(
        metrics.canonical.as_deref(),
        Some(format!("{}/canonical-target", mock_server.uri()).as_str())
    );
    assert_eq!(
        metrics.og_image.as_deref(),
        Some(format!("{}/img/cover.png", mock_server.uri()).as_str())
    );
}

#[tokio::test]
async fn test_meta_robots_noindex_nofollow() {
    let mock_server = MockServer::start().await;
    mount_body(
        &mock_server,
        "/private",
        200,
        page_html("Private", "<meta name=\"robots\" content=\"noindex,nofollow\">"),
    )
    .await;

    let client = build_http_client(&create_test_config().user_agent).unwrap();
    let url = format!("{}/private", mock_server.uri());
    let metrics = audit_page(&client, &url, Duration::from_secs(5)).await;

    assert_eq!(metrics.robots_meta.as_deref(), Some("noindex,nofollow"));
    assert!(metrics.robots_noindex);
    assert!(metrics.robots_nofollow);
    assert!(!metrics.robots_noarchive);
    assert!(!metrics.indexable);
}

#[tokio::test]
async fn test_x_robots_tag_header_sets_noindex() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/header"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page_html("Header", ""))
                .insert_header("content-type", "text/html")
                .insert_header("x-robots-tag", "noindex, noarchive"),
        )
        .mount(&mock_server)
        .await;

    let client = build_http_client(&create_test_config().user_agent).unwrap();
    let url = format!("{}/header", mock_server.uri());
    let metrics = audit_page(&client, &url, Duration::from_secs(5)).await;

    assert_eq!(metrics.robots_meta, None);
    assert_eq!(metrics.x_robots_tag.as_deref(), Some("noindex, noarchive"));
    assert!(metrics.robots_noindex);
    assert!(metrics.robots_noarchive);
    assert!(!metrics.indexable);
}

#[tokio::test]
async fn test_slow_page_degrades_to_failed_record() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page_html("Slow", ""))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = build_http_client(&create_test_config().user_agent).unwrap();
    let url = format!("{}/slow", mock_server.uri());

    let started = Instant::now();
    let metrics = audit_page(&client, &url, Duration::from_millis(300)).await;

    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(metrics.status, 0);
    assert_eq!(metrics.title, None);
    assert_eq!(metrics.url, url);
    assert!(metrics.load_ms >= 300);
}

#[tokio::test]
async fn test_user_agent_header_sent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_html("UA", "")))
        .mount(&mock_server)
        .await;

    let client = build_http_client(&create_test_config().user_agent).unwrap();
    let url = format!("{}/ua", mock_server.uri());
    let metrics = audit_page(&client, &url, Duration::from_secs(5)).await;

    // Without the matching header wiremock answers 404
    assert_eq!(metrics.status, 200);
}

#[tokio::test]
async fn test_robots_txt_sitemap_hint() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "User-agent: *\nDisallow: /admin\nSitemap: {}/custom-sitemap.xml\n",
            uri
        )))
        .mount(&mock_server)
        .await;

    let hinted = vec![format!("{}/from-hint", uri)];
    Mock::given(method("GET"))
        .and(path("/custom-sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&hinted)))
        .mount(&mock_server)
        .await;

    let config = create_test_config();
    let client = build_http_client(&config.user_agent).unwrap();
    let urls = discover(&client, &uri, 10, &config.discovery).await;

    assert_eq!(urls, hinted);
}

#[tokio::test]
async fn test_sitemap_index_expansion() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    let children = vec![
        format!("{}/pages-sitemap.xml", uri),
        format!("{}/posts-sitemap.xml", uri),
    ];
    Mock::given(method("GET"))
        .and(path("/sitemap_index.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sitemap_index(&children)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pages-sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&[
            format!("{}/", uri),
            format!("{}/about", uri),
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/posts-sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&[
            format!("{}/about", uri),
            format!("{}/blog/first", uri),
            "https://elsewhere.example.org/blog/second".to_string(),
        ])))
        .mount(&mock_server)
        .await;

    let config = create_test_config();
    let client = build_http_client(&config.user_agent).unwrap();
    let urls = discover(&client, &uri, 10, &config.discovery).await;

    assert_eq!(
        urls,
        vec![
            format!("{}/", uri),
            format!("{}/about", uri),
            format!("{}/blog/first", uri),
        ]
    );
}

#[tokio::test]
async fn test_discovery_respects_limit() {
    let mock_server = MockServer::start().await;
    let urls = mount_sitemap(&mock_server, &["/1", "/2", "/3", "/4", "/5"]).await;

    let config = create_test_config();
    let client = build_http_client(&config.user_agent).unwrap();
    let discovered = discover(&client, &mock_server.uri(), 2, &config.discovery).await;

    assert_eq!(discovered, urls[..2].to_vec());
}

#[tokio::test]
async fn test_no_sitemap_falls_back_to_root() {
    let mock_server = MockServer::start().await;
    mount_body(&mock_server, "/", 200, page_html("Only Root", "")).await;

    let coordinator = Coordinator::new(create_test_config()).unwrap();
    let response = coordinator
        .handle(&params_for(&mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(response.count, 1);
    let AuditResults::Pages(pages) = response.results else {
        panic!("expected plain page results");
    };
    assert_eq!(pages[0].url, format!("{}/", mock_server.uri()));
    assert_eq!(pages[0].title.as_deref(), Some("Only Root"));
}

#[tokio::test]
async fn test_compare_domains_title_case_and_canonical_slash() {
    let base_server = MockServer::start().await;
    let compare_server = MockServer::start().await;

    mount_sitemap(&base_server, &["/tours"]).await;
    mount_body(
        &base_server,
        "/tours",
        200,
        page_html(
            "Home",
            "<link rel=\"canonical\" href=\"https://example.com/tours\">",
        ),
    )
    .await;
    mount_body(
        &compare_server,
        "/tours",
        200,
        page_html(
            "home",
            "<link rel=\"canonical\" href=\"https://example.com/tours/\">",
        ),
    )
    .await;

    let coordinator = Coordinator::new(create_test_config()).unwrap();
    let params = RawAuditParams {
        domain: Some(base_server.uri()),
        compare_domain: Some(compare_server.uri()),
        ..RawAuditParams::default()
    };
    let response = coordinator.handle(&params).await.unwrap();

    assert_eq!(response.compare_domain.as_deref(), Some(compare_server.uri().as_str()));
    assert_eq!(response.count, 1);

    let AuditResults::Comparisons(pairs) = response.results else {
        panic!("expected comparison results");
    };
    let pair = &pairs[0];
    assert_eq!(pair.base.url, format!("{}/tours", base_server.uri()));
    assert_eq!(pair.compare.url, format!("{}/tours", compare_server.uri()));
    assert!(!pair.equal.title);
    assert!(pair.equal.canonical);
    assert!(pair.equal.h1);
    assert!(pair.equal.robots);
    assert_eq!(pair.equal.differing(), vec!["title"]);
}

#[tokio::test]
async fn test_compare_domain_unreachable_counterpart() {
    let base_server = MockServer::start().await;
    mount_sitemap(&base_server, &["/"]).await;
    mount_body(&base_server, "/", 200, page_html("Home", "")).await;

    let coordinator = Coordinator::new(create_test_config()).unwrap();
    let params = RawAuditParams {
        domain: Some(base_server.uri()),
        compare_domain: Some("http://nonexistent.invalid".to_string()),
        ..RawAuditParams::default()
    };
    let response = coordinator.handle(&params).await.unwrap();

    let AuditResults::Comparisons(pairs) = response.results else {
        panic!("expected comparison results");
    };
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].base.status, 200);
    assert_eq!(pairs[0].compare.status, 0);
    assert_eq!(pairs[0].compare.url, "http://nonexistent.invalid/");
    assert!(!pairs[0].equal.title);
}
