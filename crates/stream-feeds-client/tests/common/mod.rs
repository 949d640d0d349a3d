/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for stream-feeds-client tests

use stream_feeds_client::Config;
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Canned configuration pointed at the given mock server
#[allow(dead_code)]
pub fn test_config(server: &MockServer) -> Config {
    Config::with_base_url("K", "test-secret", &format!("{}/", server.uri()))
        .expect("test config")
}

/// Canned configuration pointed at the production default base URL
#[allow(dead_code)]
pub fn offline_config() -> Config {
    Config::new("K", "test-secret").expect("offline config")
}
