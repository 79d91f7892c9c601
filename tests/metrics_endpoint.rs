use serial_test::serial;

mod common;

// NOTE: Metrics use a global Prometheus registry.
// Tests are serial to avoid double-registration races.

#[tokio::test]
#[serial]
async fn metrics_endpoint_with_prometheus() {
    // ---
    common::setup_test_env();
    std::env::set_var("MARKET_METRICS_TYPE", "prom");

    let server = common::TestServer::new().await;

    // Hit some endpoints to generate metrics
    let _ = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .unwrap();
    let _ = server.client.get(server.url("/api")).send().await.unwrap();

    let res = server
        .client
        .get(server.url("/metrics"))
        .send()
        .await
        .unwrap();

    assert!(
        res.status().is_success(),
        "Metrics endpoint should return success"
    );

    let content_type = res
        .headers()
        .get("content-type")
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.contains("text/plain"),
        "unexpected content type: {content_type}"
    );

    let body = res.text().await.unwrap();
    assert!(!body.is_empty(), "Metrics should not be empty");

    std::env::set_var("MARKET_METRICS_TYPE", "noop");
}

#[tokio::test]
#[serial]
async fn metrics_endpoint_with_noop() {
    // ---
    common::setup_test_env();
    std::env::set_var("MARKET_METRICS_TYPE", "noop");

    let server = common::TestServer::new().await;

    let _ = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .unwrap();

    let res = server
        .client
        .get(server.url("/metrics"))
        .send()
        .await
        .unwrap();

    // Should still return success even with noop metrics
    assert!(
        res.status().is_success(),
        "Metrics endpoint should return success even with noop"
    );
}
