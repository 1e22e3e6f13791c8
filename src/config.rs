//! Run configuration and its validating builder.

use secrecy::SecretString;

use crate::error::{SyncError, SyncResult};

const DEFAULT_LOGIN_ENDPOINT: &str = "https://login.microsoftonline.com";
const DEFAULT_GRAPH_ENDPOINT: &str = "https://graph.microsoft.com";

/// Validated configuration for one sync target.
///
/// Construct via [`SyncConfig::builder`]. Building fails before any network
/// activity when a required option is missing or empty, and the error names
/// every offending option. The configuration is immutable afterwards and
/// may be reused across sequential runs.
#[derive(Debug)]
pub struct SyncConfig {
    tenant_id: String,
    client_id: String,
    client_secret: SecretString,
    group_id: String,
    login_endpoint: String,
    graph_endpoint: String,
}

impl SyncConfig {
    /// Creates a new builder.
    pub fn builder() -> SyncConfigBuilder {
        SyncConfigBuilder::default()
    }

    /// Directory tenant the token endpoint is scoped to.
    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    /// OAuth2 application (client) ID.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// OAuth2 client secret.
    pub(crate) fn client_secret(&self) -> &SecretString {
        &self.client_secret
    }

    /// Group whose membership is synchronized.
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// OAuth2 token endpoint for this tenant.
    pub(crate) fn token_url(&self) -> String {
        format!("{}/{}/oauth2/v2.0/token", self.login_endpoint, self.tenant_id)
    }

    /// Requested scope, derived from the Graph endpoint base.
    pub(crate) fn scope(&self) -> String {
        format!("{}/.default", self.graph_endpoint)
    }

    /// First page of the group membership listing.
    pub(crate) fn members_url(&self) -> String {
        format!(
            "{}/v1.0/groups/{}/members",
            self.graph_endpoint, self.group_id
        )
    }
}

/// Builder for [`SyncConfig`].
#[derive(Debug, Default)]
pub struct SyncConfigBuilder {
    tenant_id: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    group_id: Option<String>,
    login_endpoint: Option<String>,
    graph_endpoint: Option<String>,
}

impl SyncConfigBuilder {
    /// Sets the directory tenant ID. Required.
    pub fn tenant_id(mut self, value: impl Into<String>) -> Self {
        self.tenant_id = Some(value.into());
        self
    }

    /// Sets the OAuth2 application (client) ID. Required.
    pub fn client_id(mut self, value: impl Into<String>) -> Self {
        self.client_id = Some(value.into());
        self
    }

    /// Sets the OAuth2 client secret. Required.
    pub fn client_secret(mut self, value: impl Into<String>) -> Self {
        self.client_secret = Some(value.into());
        self
    }

    /// Sets the group whose membership is synchronized. Required.
    pub fn group_id(mut self, value: impl Into<String>) -> Self {
        self.group_id = Some(value.into());
        self
    }

    /// Overrides the token endpoint base (sovereign clouds, tests).
    pub fn login_endpoint(mut self, value: impl Into<String>) -> Self {
        self.login_endpoint = Some(value.into());
        self
    }

    /// Overrides the Graph endpoint base (sovereign clouds, tests).
    pub fn graph_endpoint(mut self, value: impl Into<String>) -> Self {
        self.graph_endpoint = Some(value.into());
        self
    }

    /// Validates the options and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Config`] naming every required option that is
    /// missing or empty.
    pub fn build(self) -> SyncResult<SyncConfig> {
        let mut missing = Vec::new();

        let tenant_id = require("tenant_id", self.tenant_id, &mut missing);
        let client_id = require("client_id", self.client_id, &mut missing);
        let client_secret = require("client_secret", self.client_secret, &mut missing);
        let group_id = require("group_id", self.group_id, &mut missing);

        if !missing.is_empty() {
            return Err(SyncError::Config(format!(
                "missing required option(s): {}",
                missing.join(", ")
            )));
        }

        Ok(SyncConfig {
            tenant_id,
            client_id,
            client_secret: SecretString::from(client_secret),
            group_id,
            login_endpoint: self
                .login_endpoint
                .unwrap_or_else(|| DEFAULT_LOGIN_ENDPOINT.to_string()),
            graph_endpoint: self
                .graph_endpoint
                .unwrap_or_else(|| DEFAULT_GRAPH_ENDPOINT.to_string()),
        })
    }
}

fn require(name: &'static str, value: Option<String>, missing: &mut Vec<&'static str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}
