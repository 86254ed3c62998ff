//! Wiremock helpers

use serde_json::Value;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serve `body` as the choices list at `/api/kits`
pub async fn mock_choices(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/kits"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Answer `/api/kits` with a bare status code
pub async fn mock_choices_status(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/api/kits"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Serve a snapshot tarball at the codeload path for `owner/name@reference`
pub async fn mock_snapshot(server: &MockServer, owner: &str, name: &str, reference: &str, tarball: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/{}/tar.gz/{}", owner, name, reference)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(tarball))
        .mount(server)
        .await;
}

/// URL of the choices endpoint on `server`
pub fn choices_url(server: &MockServer) -> String {
    format!("{}/api/kits", server.uri())
}
