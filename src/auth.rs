//! OAuth2 client-credentials token acquisition.

use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::debug;

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::transport::{HttpTransport, TransportRequest};

/// OAuth2 token response from Azure AD.
///
/// Fields default to empty strings when absent: a well-formed but
/// incomplete body is not rejected here. The malformed authorization header
/// it produces is rejected by the remote API on the first page fetch.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    token_type: String,
    #[serde(default)]
    access_token: String,
}

impl TokenResponse {
    /// Value for the `authorization` header on membership page fetches.
    pub(crate) fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// Acquires a fresh access token using the client credentials flow.
///
/// Called once per run; tokens are never cached across runs.
pub(crate) async fn acquire_token<T>(transport: &T, config: &SyncConfig) -> SyncResult<TokenResponse>
where
    T: HttpTransport + ?Sized,
{
    let request = TransportRequest::post(config.token_url())
        .form_param("client_id", config.client_id())
        .form_param("client_secret", config.client_secret().expose_secret())
        .form_param("scope", config.scope())
        .form_param("grant_type", "client_credentials");

    let response = transport
        .execute(request)
        .await
        .map_err(|source| SyncError::Token { source })?;

    let token: TokenResponse = serde_json::from_str(&response.body)
        .map_err(|e| SyncError::decode("cannot decode token response", e))?;

    debug!("Acquired access token");

    Ok(token)
}
