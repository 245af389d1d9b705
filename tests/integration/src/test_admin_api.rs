//! REST API tests: addressing, method semantics, and error statuses.

use serde_json::Value;

use crate::{PAYMENTS_CONFIG, client, start_server, url};

/// Find a bucket by name in a namespace JSON document.
fn bucket<'a>(namespace: &'a Value, name: &str) -> &'a Value {
    namespace["buckets"]
        .as_array()
        .expect("buckets array")
        .iter()
        .find(|b| b["name"] == name)
        .unwrap_or_else(|| panic!("bucket {name} not found in {namespace}"))
}

#[tokio::test]
async fn test_should_return_whole_config_for_api_root() {
    let addr = start_server(PAYMENTS_CONFIG).await;

    let resp = client().get(url(addr, "/api")).send().await.expect("send");
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["version"], 1);
    let namespaces = body["namespaces"].as_array().expect("namespaces array");
    assert_eq!(namespaces.len(), 1);
    assert_eq!(namespaces[0]["name"], "payments");
}

#[tokio::test]
async fn test_should_return_namespace_with_defaulted_bucket_fields() {
    let addr = start_server(PAYMENTS_CONFIG).await;

    // The bucket segment addresses reads at namespace granularity.
    let resp = client()
        .get(url(addr, "/api/payments/checkout"))
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.expect("json body");
    let checkout = bucket(&body, "checkout");
    assert_eq!(checkout["fill_rate"], 200);
    assert_eq!(checkout["size"], 100);
    assert_eq!(checkout["max_idle_millis"], -1);
}

#[tokio::test]
async fn test_should_return_not_found_for_unknown_namespace() {
    let addr = start_server(PAYMENTS_CONFIG).await;

    let resp = client()
        .get(url(addr, "/api/missing"))
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_should_apply_store_defaults_to_put_bodies() {
    let addr = start_server(PAYMENTS_CONFIG).await;

    let resp = client()
        .put(url(addr, "/api/payments/checkout"))
        .body(r#"{"fill_rate":500}"#)
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 200);

    let body: Value = client()
        .get(url(addr, "/api/payments"))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json body");

    let checkout = bucket(&body, "checkout");
    assert_eq!(checkout["fill_rate"], 500);
    assert_eq!(checkout["size"], 100);
    assert_eq!(checkout["max_tokens_per_request"], 500);
}

#[tokio::test]
async fn test_should_reject_malformed_put_body_without_mutating() {
    let addr = start_server(PAYMENTS_CONFIG).await;

    let resp = client()
        .put(url(addr, "/api/payments/checkout"))
        .body("this is not json")
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 500);

    let body: Value = client()
        .get(url(addr, "/api/payments"))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json body");
    assert_eq!(bucket(&body, "checkout")["fill_rate"], 200);
}

#[tokio::test]
async fn test_should_update_existing_bucket_via_post() {
    let addr = start_server(PAYMENTS_CONFIG).await;

    let resp = client()
        .post(url(addr, "/api/payments/checkout"))
        .body(r#"{"size":42}"#)
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 200);

    let body: Value = client()
        .get(url(addr, "/api/payments"))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json body");
    assert_eq!(bucket(&body, "checkout")["size"], 42);
}

#[tokio::test]
async fn test_should_propagate_store_failure_on_post_to_missing_bucket() {
    let addr = start_server(PAYMENTS_CONFIG).await;

    let resp = client()
        .post(url(addr, "/api/payments/missing"))
        .body(r#"{"size":42}"#)
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 500);
}

#[tokio::test]
async fn test_should_delete_bucket() {
    let addr = start_server(PAYMENTS_CONFIG).await;

    let resp = client()
        .delete(url(addr, "/api/payments/checkout"))
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 200);

    let body: Value = client()
        .get(url(addr, "/api/payments"))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json body");
    assert!(body["buckets"].as_array().expect("buckets").is_empty());
}

#[tokio::test]
async fn test_should_create_namespace_via_put() {
    let addr = start_server(PAYMENTS_CONFIG).await;

    let resp = client()
        .put(url(addr, "/api/namespace/search"))
        .body(r#"{"max_dynamic_buckets":5000,"dynamic_bucket_template":{"size":50}}"#)
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 200);

    let body: Value = client()
        .get(url(addr, "/api/search"))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json body");
    assert_eq!(body["max_dynamic_buckets"], 5000);
    assert_eq!(body["dynamic_bucket_template"]["size"], 50);
    // The template was defaulted on the way into the store.
    assert_eq!(body["dynamic_bucket_template"]["fill_rate"], 50);
}

#[tokio::test]
async fn test_should_return_not_found_after_namespace_delete() {
    let addr = start_server(PAYMENTS_CONFIG).await;

    let resp = client()
        .delete(url(addr, "/api/namespace/payments"))
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 200);

    let resp = client()
        .get(url(addr, "/api/payments/checkout"))
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_should_reject_conflicting_namespace_definition() {
    let addr = start_server(PAYMENTS_CONFIG).await;

    let resp = client()
        .put(url(addr, "/api/namespace/clashing"))
        .body(r#"{"default_bucket":{"size":1},"dynamic_bucket_template":{"size":2}}"#)
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 500);

    let resp = client()
        .get(url(addr, "/api/clashing"))
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_should_not_define_get_on_namespace_address() {
    let addr = start_server(PAYMENTS_CONFIG).await;

    let resp = client()
        .get(url(addr, "/api/namespace/payments"))
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_should_reject_unknown_methods_and_routes() {
    let addr = start_server(PAYMENTS_CONFIG).await;

    let resp = client()
        .patch(url(addr, "/api/payments/checkout"))
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 404);

    let resp = client()
        .get(url(addr, "/metrics"))
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_should_redirect_root_to_console() {
    let addr = start_server(PAYMENTS_CONFIG).await;

    let resp = client().get(url(addr, "/")).send().await.expect("send");
    assert_eq!(resp.status(), 301);
    assert_eq!(
        resp.headers().get("location").expect("location header"),
        "/admin/"
    );
}

#[tokio::test]
async fn test_should_tag_responses_with_request_id() {
    let addr = start_server(PAYMENTS_CONFIG).await;

    let resp = client().get(url(addr, "/api")).send().await.expect("send");
    assert!(resp.headers().get("x-request-id").is_some());
    assert_eq!(resp.headers().get("server").expect("server header"), "quotaserve");
}

#[tokio::test]
async fn test_should_set_namespace_default_bucket_via_single_segment_put() {
    let addr = start_server(PAYMENTS_CONFIG).await;

    let resp = client()
        .put(url(addr, "/api/payments"))
        .body(r#"{"wait_timeout_millis":250}"#)
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 200);

    let body: Value = client()
        .get(url(addr, "/api/payments"))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json body");
    assert_eq!(body["default_bucket"]["wait_timeout_millis"], 250);
    assert_eq!(body["default_bucket"]["size"], 100);
}
