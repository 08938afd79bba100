//! Shared fixtures: a recording transport and a client wired to it

#![allow(dead_code)]

use async_trait::async_trait;
use lattice::core::http::{ApiRequest, ApiResponse, HttpClient};
use lattice::{Configuration, LatticeClient, LatticeError, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

pub const BASE_URL: &str = "https://api.example.org";
pub const TOKEN: &str = "test-token";

pub const ORGANIZATION_ID: &str = "69682f1e-6039-44da-8342-522395b43738";
pub const ROLE_ID: &str = "2b5b5b06-7cf9-4e2a-9f5b-58f5e2f1d6a1";
pub const ENTITY_SET_ID: &str = "0a48e29c-5b1c-4b9c-9a53-3a8b0ad1c1a5";
pub const ENTITY_TYPE_ID: &str = "8c1fd4ec-8dd8-4cbc-8a0e-5ab4f3f2d0c4";
pub const PROPERTY_TYPE_ID: &str = "4b08e1f9-4a00-4169-92ea-10e377070220";
pub const SYNC_ID: &str = "e5fd4f8a-5ff2-4a36-8a4c-b1f1b3a2c7f0";
pub const TICKET_ID: &str = "7f2b9a3e-1d7c-4e55-8c1a-2f4d6e8b0a13";

/// Transport that records every request and answers from a queue
///
/// When the queue is empty it answers `200` with an empty body.
#[derive(Default)]
pub struct MockHttpClient {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<Result<ApiResponse>>>,
}

impl MockHttpClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse::new(status, body)));
    }

    pub fn respond_json(&self, body: serde_json::Value) {
        self.respond(200, &body.to_string());
    }

    pub fn fail(&self, error: LatticeError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The only request sent so far
    pub fn single_request(&self) -> ApiRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request: {requests:?}");
        requests.into_iter().next().unwrap()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::ok("")))
    }
}

pub fn config() -> Configuration {
    Configuration::new(BASE_URL).unwrap().with_auth_token(TOKEN)
}

/// Client over a fresh [`MockHttpClient`]
pub fn client() -> (LatticeClient, Arc<MockHttpClient>) {
    init_tracing();
    let mock = MockHttpClient::new();
    let client = LatticeClient::with_http_client(config(), mock.clone());
    (client, mock)
}

pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn assert_invalid_parameter<T: std::fmt::Debug>(result: Result<T>, message: &str) {
    match result {
        Err(LatticeError::InvalidParameter(actual)) => assert_eq!(actual, message),
        other => panic!("expected invalid parameter '{message}', got {other:?}"),
    }
}
