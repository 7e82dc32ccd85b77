#![allow(dead_code)]

use std::path::PathBuf;

use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// The weekly schedule fixture used across tests.
pub fn weekly_schedule() -> String {
    std::fs::read_to_string(fixture_path("weekly_schedule.csv")).expect("read fixture")
}

/// Serves `body` as CSV for `GET route` on `server`.
pub async fn serve_csv(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/csv")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

/// Answers `GET route` with an empty body and `status`.
pub async fn serve_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// A loopback address nothing listens on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    let port = listener.local_addr().expect("local address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}/sheet.csv")
}
