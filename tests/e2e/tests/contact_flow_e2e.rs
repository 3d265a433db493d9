mod common;

use mocks::{base_url, expect_email_send, expect_form_post, relay_server, FORM_PATH};
use serde_json::json;
use tempfile::TempDir;

#[tokio::main]
async fn main() {
    let dir = TempDir::new().expect("temp dir");
    let relays = relay_server();
    // Two visitors, two emails each.
    expect_email_send(&relays, 4, 200);
    expect_form_post(&relays, 200);

    let mut cfg = common::base_config(dir.path());
    cfg.email_relay_url = base_url(&relays);
    cfg.email_service_id = "service_portfolio".into();
    cfg.email_notify_template = "template_notify".into();
    cfg.email_reply_template = "template_reply".into();
    cfg.email_public_key = "public_key".into();
    cfg.form_relay_url = relays.url_str(FORM_PATH);
    let site = common::start(cfg).await;
    let client = reqwest::Client::new();

    let message = json!({
        "name": "Dana",
        "email": "dana@example.com",
        "subject": "Commercial Licensing",
        "message": "May I license the parade set?"
    });

    let first = client
        .post(site.url("/contact"))
        .header("x-forwarded-for", "203.0.113.7")
        .json(&message)
        .send()
        .await
        .expect("first submit");
    assert_eq!(first.status(), reqwest::StatusCode::OK);

    let repeat = client
        .post(site.url("/contact"))
        .header("x-forwarded-for", "203.0.113.7")
        .json(&message)
        .send()
        .await
        .expect("repeat submit");
    assert_eq!(repeat.status(), reqwest::StatusCode::TOO_MANY_REQUESTS);
    assert!(repeat.headers().get("retry-after").is_some());

    let other = client
        .post(site.url("/contact"))
        .header("x-forwarded-for", "198.51.100.4")
        .json(&message)
        .send()
        .await
        .expect("other visitor submit");
    assert_eq!(other.status(), reqwest::StatusCode::OK);

    let booking = client
        .post(site.url("/contact/booking"))
        .json(&json!({
            "name": "Sam",
            "email": "sam@example.com",
            "phone": "555-0100",
            "event_type": "Senior portraits",
            "details": "Beach at sunset"
        }))
        .send()
        .await
        .expect("booking submit");
    assert_eq!(booking.status(), reqwest::StatusCode::OK);

    site.stop().await;
}
