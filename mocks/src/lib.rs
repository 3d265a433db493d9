use httptest::{matchers::*, responders::*, Expectation, Server};
use serde_json::json;

pub use httptest;

pub const CLOUD: &str = "demo";
pub const EMAIL_SEND_PATH: &str = "/api/v1.0/email/send";
pub const FORM_PATH: &str = "/f/booking";

/// Create an empty mock server standing in for the CDN listing host.
pub fn cdn_server() -> Server {
    Server::run()
}

/// Base URL to hand to a `CdnClient` or a relay sender.
pub fn base_url(server: &Server) -> String {
    server.url_str("")
}

pub fn listing_path(tag: &str) -> String {
    format!("/{}/image/list/{}.json", CLOUD, tag)
}

pub fn resource(public_id: &str) -> serde_json::Value {
    json!({
        "public_id": public_id,
        "version": 1712000000,
        "format": "jpg",
        "width": 4000,
        "height": 3000,
        "type": "upload",
        "created_at": "2025-03-01T12:00:00Z"
    })
}

pub fn listing_body(public_ids: &[&str]) -> serde_json::Value {
    let resources: Vec<_> = public_ids.iter().map(|id| resource(id)).collect();
    json!({
        "resources": resources,
        "updated_at": "2025-03-02T00:00:00Z"
    })
}

/// Expect one GET for `tag` carrying a cache buster, answered with `public_ids`.
pub fn expect_listing(server: &Server, tag: &str, public_ids: &[&str]) {
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", listing_path(tag)),
            request::query(url_decoded(contains(key("cb")))),
        ])
        .respond_with(json_encoded(listing_body(public_ids))),
    );
}

/// Expect one GET for `tag` answered with a bare status code.
pub fn expect_listing_status(server: &Server, tag: &str, status: u16) {
    server.expect(
        Expectation::matching(request::method_path("GET", listing_path(tag)))
            .respond_with(status_code(status)),
    );
}

/// Expect one GET for `tag` answered 200 with an arbitrary body.
pub fn expect_listing_raw(server: &Server, tag: &str, body: &'static str) {
    server.expect(
        Expectation::matching(request::method_path("GET", listing_path(tag)))
            .respond_with(status_code(200).body(body)),
    );
}

/// Create an empty mock server for the email and form relays.
pub fn relay_server() -> Server {
    Server::run()
}

/// Expect `times` JSON POSTs to the email relay send endpoint.
pub fn expect_email_send(server: &Server, times: usize, status: u16) {
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", EMAIL_SEND_PATH),
            request::headers(contains(("content-type", "application/json"))),
        ])
        .times(times..=times)
        .respond_with(status_code(status).body("OK")),
    );
}

/// Expect one JSON POST to the form relay endpoint.
pub fn expect_form_post(server: &Server, status: u16) {
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", FORM_PATH),
            request::headers(contains(("accept", "application/json"))),
        ])
        .respond_with(status_code(status).body(r#"{"ok":true}"#)),
    );
}
