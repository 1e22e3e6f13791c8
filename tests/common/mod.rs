//! Common test utilities for entra-groupsync integration tests.

use std::collections::HashSet;

use async_trait::async_trait;
use entra_groupsync::{HandlerError, SyncConfig, SyncHandler, UserRecord};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test data factory for creating group member records.
pub fn create_test_user(id: &str, email_prefix: &str) -> Value {
    json!({
        "id": id,
        "userPrincipalName": format!("{}@test.onmicrosoft.com", email_prefix),
        "displayName": format!("Test User {}", email_prefix),
        "accountEnabled": true
    })
}

/// Generate a sequence of test users.
pub fn generate_test_users(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| create_test_user(&format!("user-{}", i), &format!("user{}", i)))
        .collect()
}

/// Wraps items in an OData response format.
pub fn create_odata_response(items: Vec<Value>, next_link: Option<&str>) -> Value {
    let mut response = json!({ "value": items });
    if let Some(link) = next_link {
        response["@odata.nextLink"] = json!(link);
    }
    response
}

/// Creates a mock OAuth token response.
pub fn create_token_response(access_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": 3600
    })
}

/// Mock server wrapper with common setup helpers.
pub struct MockGraphServer {
    pub server: MockServer,
}

impl MockGraphServer {
    /// Creates a new mock Graph API server.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Returns the mock server's base URL.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Builds a config pointing both endpoint bases at this server.
    pub fn config(&self, tenant_id: &str, group_id: &str) -> SyncConfig {
        SyncConfig::builder()
            .tenant_id(tenant_id)
            .client_id("test-client")
            .client_secret("test-secret")
            .group_id(group_id)
            .login_endpoint(self.url())
            .graph_endpoint(self.url())
            .build()
            .unwrap()
    }

    /// Sets up the OAuth token endpoint, expecting exactly one POST.
    pub async fn mock_token_endpoint(&self, tenant_id: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/{}/oauth2/v2.0/token", tenant_id)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(create_token_response("mock-access-token")),
            )
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Sets up the first membership page, expecting exactly one GET.
    pub async fn mock_first_members_page(&self, group_id: &str, response: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/v1.0/groups/{}/members", group_id)))
            .and(query_param_is_missing("$skiptoken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Sets up a continuation page keyed by skiptoken, expecting one GET.
    pub async fn mock_continuation_page(&self, group_id: &str, skiptoken: &str, response: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/v1.0/groups/{}/members", group_id)))
            .and(query_param("$skiptoken", skiptoken))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Returns the continuation link for a skiptoken on this server.
    pub fn continuation_link(&self, group_id: &str, skiptoken: &str) -> String {
        format!(
            "{}/v1.0/groups/{}/members?$skiptoken={}",
            self.url(),
            group_id,
            skiptoken
        )
    }
}

/// One observed handler callback.
#[derive(Debug, PartialEq, Eq)]
pub enum Call {
    Begin,
    Batch(usize),
    Commit,
}

/// Handler that records the callback sequence it is driven through.
#[derive(Default)]
pub struct RecordingHandler {
    pub calls: Vec<Call>,
}

#[async_trait]
impl SyncHandler for RecordingHandler {
    async fn begin(&mut self) -> Result<(), HandlerError> {
        self.calls.push(Call::Begin);
        Ok(())
    }

    async fn on_user_batch(&mut self, users: Vec<UserRecord>) -> Result<(), HandlerError> {
        assert!(!users.is_empty(), "batch callback received an empty batch");
        self.calls.push(Call::Batch(users.len()));
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), HandlerError> {
        self.calls.push(Call::Commit);
        Ok(())
    }
}

/// Reference reconciliation handler: any known user not observed during the
/// run is deleted at commit time.
pub struct DeletionListHandler {
    known: HashSet<String>,
    pending: HashSet<String>,
    pub deleted: Vec<String>,
}

impl DeletionListHandler {
    pub fn new(known: impl IntoIterator<Item = String>) -> Self {
        Self {
            known: known.into_iter().collect(),
            pending: HashSet::new(),
            deleted: Vec::new(),
        }
    }
}

#[async_trait]
impl SyncHandler for DeletionListHandler {
    async fn begin(&mut self) -> Result<(), HandlerError> {
        self.pending = self.known.clone();
        Ok(())
    }

    async fn on_user_batch(&mut self, users: Vec<UserRecord>) -> Result<(), HandlerError> {
        for user in &users {
            if let Some(id) = user.get("id").and_then(|v| v.as_str()) {
                self.pending.remove(id);
            }
        }
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), HandlerError> {
        let mut remaining: Vec<String> = self.pending.drain().collect();
        remaining.sort();
        self.deleted = remaining;
        Ok(())
    }
}
