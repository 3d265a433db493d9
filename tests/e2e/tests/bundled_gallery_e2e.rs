mod common;

use tempfile::TempDir;

#[tokio::main]
async fn main() {
    let dir = TempDir::new().expect("temp dir");
    let images = dir.path().join("images");
    let finals = images.join("Sports").join("Western-Comp_Finals");
    std::fs::create_dir_all(&finals).expect("images dir");
    std::fs::write(finals.join("Relay_Start.jpg"), b"jpeg").expect("write");
    std::fs::write(images.join("Sports").join("Warmups.jpeg"), b"jpeg").expect("write");
    std::fs::write(images.join("notes.txt"), b"skip me").expect("write");

    let mut cfg = common::base_config(dir.path());
    cfg.photo_source = "bundled".into();
    // Nothing listens here; bundled mode never calls the CDN.
    cfg.cdn_base_url = "http://127.0.0.1:9".into();
    let site = common::start(cfg).await;
    let client = reqwest::Client::new();

    let page: serde_json::Value = client
        .get(site.url("/sports"))
        .send()
        .await
        .expect("gallery request")
        .json()
        .await
        .expect("gallery json");
    assert_eq!(page["groups"][0]["name"], "Western Comp");
    assert_eq!(page["groups"][0]["photos"][0]["title"], "Relay Start");
    assert_eq!(page["groups"][1]["name"], "Recent Uploads");
    assert_eq!(page["groups"][1]["photos"][0]["url"], "/images/Sports/Warmups.jpeg");

    let home: serde_json::Value = client
        .get(site.url("/"))
        .send()
        .await
        .expect("home request")
        .json()
        .await
        .expect("home json");
    assert_eq!(home["featured"], serde_json::json!([]));
    assert_eq!(home["previews"][0]["name"], "Sports");
    assert_eq!(home["previews"][0]["photos"].as_array().expect("photos").len(), 2);

    let bytes = client
        .get(site.url("/images/Sports/Warmups.jpeg"))
        .send()
        .await
        .expect("image request")
        .bytes()
        .await
        .expect("image bytes");
    assert_eq!(&bytes[..], b"jpeg");

    let empty: serde_json::Value = client
        .get(site.url("/landscape"))
        .send()
        .await
        .expect("empty request")
        .json()
        .await
        .expect("empty json");
    assert_eq!(empty["message"], "No photos found in this specific collection yet.");

    site.stop().await;
}
