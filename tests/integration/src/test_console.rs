//! HTML console tests.

use crate::{PAYMENTS_CONFIG, client, start_server, start_server_with_assets, url};

fn temp_assets_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("quotaserve-console-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create assets dir");
    std::fs::write(
        dir.join("index.html"),
        "<h1>namespaces: {{#each namespaces}}{{name}} {{/each}}</h1>",
    )
    .expect("write template");
    dir
}

#[tokio::test]
async fn test_should_render_console_index() {
    let addr = start_server_with_assets(PAYMENTS_CONFIG, Some(temp_assets_dir())).await;

    let resp = client()
        .get(url(addr, "/admin/"))
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 200);

    let html = resp.text().await.expect("body");
    assert!(html.contains("payments"));
}

#[tokio::test]
async fn test_should_return_not_found_for_unmapped_page() {
    let addr = start_server_with_assets(PAYMENTS_CONFIG, Some(temp_assets_dir())).await;

    let resp = client()
        .get(url(addr, "/admin/missing.html"))
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_should_not_serve_console_without_assets_dir() {
    let addr = start_server(PAYMENTS_CONFIG).await;

    let resp = client()
        .get(url(addr, "/admin/"))
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 404);
}
