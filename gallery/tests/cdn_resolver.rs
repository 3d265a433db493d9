use cdn_client::CdnClient;
use gallery::{featured_photos, EventMatchers, GalleryOutcome, GalleryResolver, FALLBACK_GROUP};
use mocks::{base_url, cdn_server, expect_listing, expect_listing_raw, expect_listing_status, CLOUD};

fn resolver(server: &mocks::httptest::Server) -> GalleryResolver<CdnClient> {
    let client = CdnClient::with_base_url(CLOUD.into(), base_url(server));
    GalleryResolver::new(client, EventMatchers::default(), "jrotc".into())
}

#[tokio::test]
async fn test_resolve_groups_remote_listing() {
    let server = cdn_server();
    expect_listing(
        &server,
        "jrotc",
        &[
            "jrotc/Western_Comp/IMG_9",
            "jrotc/uploads/IMG_7",
            "jrotc/yuletide-parade-25-26/IMG_1",
        ],
    );

    match resolver(&server).resolve("JROTC", None).await {
        GalleryOutcome::Groups { groups, .. } => {
            let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
            assert_eq!(names, vec!["Yuletide Parade 25 26", "Western Comp", FALLBACK_GROUP]);
            let photo = &groups[1].photos[0];
            assert_eq!(photo.title, "IMG 9");
            assert!(photo
                .url
                .ends_with("/demo/image/upload/f_auto,q_auto/jrotc/Western_Comp/IMG_9"));
            assert_eq!(photo.width, Some(4000));
        }
        other => panic!("expected groups, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_500_is_empty() {
    let server = cdn_server();
    expect_listing_status(&server, "sports", 500);

    let outcome = resolver(&server).resolve("sports", None).await;
    assert_eq!(
        outcome,
        GalleryOutcome::Empty {
            category: "sports".into()
        }
    );
}

#[tokio::test]
async fn test_malformed_json_is_empty() {
    let server = cdn_server();
    expect_listing_raw(&server, "landscape", "{\"resources\": [");

    let outcome = resolver(&server).resolve("landscape", None).await;
    assert!(matches!(outcome, GalleryOutcome::Empty { .. }));
}

#[tokio::test]
async fn test_sub_category_not_found_on_remote_listing() {
    let server = cdn_server();
    expect_listing(&server, "jrotc", &["jrotc/raider-county/IMG_1"]);

    let outcome = resolver(&server).resolve("jrotc", Some("open-house-25-26")).await;
    assert!(matches!(outcome, GalleryOutcome::NotFound { .. }));
}

#[tokio::test]
async fn test_featured_from_remote_listing() {
    let server = cdn_server();
    expect_listing(
        &server,
        "featuredphoto",
        &["sports/hero", "jrotc/hero", "sports/other"],
    );

    let client = CdnClient::with_base_url(CLOUD.into(), base_url(&server));
    let featured = featured_photos(&client).await;
    assert_eq!(featured.len(), 2);
    assert_eq!(featured[0].category, "sports");
    assert_eq!(featured[1].photo.id, "jrotc/hero");
}

#[tokio::test]
async fn test_featured_failure_is_empty() {
    let server = cdn_server();
    expect_listing_status(&server, "featuredphoto", 503);

    let client = CdnClient::with_base_url(CLOUD.into(), base_url(&server));
    assert!(featured_photos(&client).await.is_empty());
}
