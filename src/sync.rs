//! Group membership synchronization controller.

use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::auth;
use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::handler::SyncHandler;
use crate::transport::{HttpTransport, TransportRequest};

/// Raw member record as returned by the directory API.
///
/// The controller does not interpret individual fields; records are counted
/// and forwarded to the handler untouched.
pub type UserRecord = serde_json::Value;

/// One page of the membership listing.
#[derive(Debug, Deserialize)]
struct MemberPage {
    /// Absent and empty listings are equivalent: no batch callback.
    #[serde(default)]
    value: Vec<UserRecord>,
    #[serde(rename = "@odata.nextLink")]
    next_link: Option<String>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct SyncSummary {
    /// Pages fetched, including empty ones.
    pub pages: usize,
    /// Total member records forwarded to the handler.
    pub users: usize,
}

/// Drives one group membership sync per [`run`](SyncController::run) call.
///
/// The controller is a pure event producer: it pushes the begin / batch /
/// commit sequence into the handler and never reads handler state back. It
/// holds no state across runs; every run re-authenticates and re-paginates
/// from the first page. Sequential reuse of one controller is supported;
/// concurrent `run` calls on the same instance are not.
#[derive(Debug)]
pub struct SyncController<T> {
    transport: T,
    config: SyncConfig,
}

impl<T: HttpTransport> SyncController<T> {
    /// Creates a controller for one sync target.
    pub fn new(transport: T, config: SyncConfig) -> Self {
        Self { transport, config }
    }

    /// Runs one full synchronization against `handler`.
    ///
    /// Acquires a token, calls `begin`, walks every membership page in
    /// continuation order dispatching one batch per non-empty page, then
    /// commits. An entirely empty listing is treated as a likely
    /// misconfiguration and fails the run instead of committing, so the
    /// handler's pending-deletion set is never finalized against a
    /// suspiciously empty result.
    ///
    /// Any failure aborts the run permanently: no commit, no internal
    /// retry. Retrying is the scheduler's job and means a complete fresh
    /// run.
    ///
    /// # Errors
    ///
    /// [`SyncError::Token`] when the token endpoint cannot be reached (no
    /// handler call has been made), [`SyncError::Network`] when a page
    /// fetch fails mid-run, [`SyncError::Data`] for an undecodable body or
    /// an empty membership listing, and [`SyncError::Handler`] when a
    /// callback fails.
    #[instrument(skip(self, handler), fields(group_id = %self.config.group_id()))]
    pub async fn run<H>(&self, handler: &mut H) -> SyncResult<SyncSummary>
    where
        H: SyncHandler + ?Sized,
    {
        info!("Starting group membership sync");

        let token = auth::acquire_token(&self.transport, &self.config).await?;
        let authorization = token.authorization_header();

        handler.begin().await.map_err(|source| SyncError::Handler {
            phase: "begin",
            source,
        })?;

        let mut next_url = Some(self.config.members_url());
        let mut pages = 0usize;
        let mut total_users = 0usize;

        while let Some(url) = next_url {
            debug!("Fetching page: {}", url);
            let page = self.fetch_page(&url, &authorization).await?;
            pages += 1;

            if !page.value.is_empty() {
                total_users += page.value.len();
                handler
                    .on_user_batch(page.value)
                    .await
                    .map_err(|source| SyncError::Handler {
                        phase: "on_user_batch",
                        source,
                    })?;
            }

            next_url = page.next_link;
        }

        if total_users == 0 {
            return Err(SyncError::data("no users found in group"));
        }

        handler.commit().await.map_err(|source| SyncError::Handler {
            phase: "commit",
            source,
        })?;

        info!(
            "Sync completed, {} users across {} pages",
            total_users, pages
        );

        Ok(SyncSummary {
            pages,
            users: total_users,
        })
    }

    /// Fetches and decodes one membership page.
    async fn fetch_page(&self, url: &str, authorization: &str) -> SyncResult<MemberPage> {
        let request = TransportRequest::get(url).header("authorization", authorization);

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|source| SyncError::Network { source })?;

        serde_json::from_str(&response.body)
            .map_err(|e| SyncError::decode("cannot decode membership page", e))
    }
}
