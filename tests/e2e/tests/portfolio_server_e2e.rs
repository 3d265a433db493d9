mod common;

use mocks::{base_url, cdn_server, expect_listing};
use tempfile::TempDir;

#[tokio::main]
async fn main() {
    let dir = TempDir::new().expect("temp dir");
    let cdn = cdn_server();
    expect_listing(
        &cdn,
        "jrotc",
        &[
            "jrotc/raiders-state-comp/Awards",
            "jrotc/yuletide-parade-25-26/Float",
            "jrotc/raider-county/Inspection",
            "jrotc/IMG_0001",
        ],
    );
    expect_listing(&cdn, "sports", &["sports/homecoming/Kickoff"]);

    let mut cfg = common::base_config(dir.path());
    cfg.cdn_base_url = base_url(&cdn);
    cfg.delivery_base_url = base_url(&cdn);
    let site = common::start(cfg).await;
    let client = reqwest::Client::new();

    let page: serde_json::Value = client
        .get(site.url("/jrotc"))
        .send()
        .await
        .expect("gallery request")
        .json()
        .await
        .expect("gallery json");
    let names: Vec<&str> = page["groups"]
        .as_array()
        .expect("groups")
        .iter()
        .map(|g| g["name"].as_str().expect("name"))
        .collect();
    assert_eq!(
        names,
        vec![
            "Yuletide Parade 25 26",
            "Raiders State Comp",
            "Raider County",
            "Recent Uploads"
        ]
    );

    let response = client
        .get(site.url("/sports/western-comp"))
        .send()
        .await
        .expect("sub-category request");
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get("refresh").expect("refresh header"),
        "3; url=/sports"
    );

    assert!(site.state.rotation.is_running());
    let state = site.state.clone();
    site.stop().await;
    assert!(!state.rotation.is_running());
}
