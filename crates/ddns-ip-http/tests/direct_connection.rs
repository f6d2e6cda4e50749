//! Contract Test: Direct Connection
//!
//! The observer must reach the trace endpoint directly even when proxy
//! variables are set; a proxy would report its own address instead of ours.
//!
//! Runs as its own test binary because it changes process environment.

use ddns_core::{AddressObserver, Error};
use ddns_ip_http::HttpAddressObserver;
use std::time::Duration;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn proxy_variables_are_ignored() {
    let proxy = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("h=proxy\nip=10.9.9.9\n"))
        .expect(0)
        .mount(&proxy)
        .await;

    // SAFETY: this test binary holds a single test, so no other thread reads
    // the environment concurrently.
    unsafe {
        for var in ["HTTP_PROXY", "http_proxy", "HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"] {
            std::env::set_var(var, proxy.uri());
        }
        std::env::remove_var("NO_PROXY");
        std::env::remove_var("no_proxy");
    }

    let observer = HttpAddressObserver::with_timeout(
        "http://trace.example.invalid/cdn-cgi/trace",
        Duration::from_secs(2),
    )
    .expect("observer construction succeeds");

    // A direct connection to an unresolvable host fails; through the proxy
    // it would have returned 10.9.9.9.
    let result = observer.observe().await;
    assert!(
        matches!(result, Err(Error::Network { .. })),
        "expected a direct-connection failure, got {result:?}"
    );

    let received = proxy.received_requests().await.unwrap_or_default();
    assert!(received.is_empty(), "proxy saw {} requests", received.len());
}
