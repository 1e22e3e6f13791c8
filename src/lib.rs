//! Group membership sync for Microsoft Entra ID.
//!
//! Drives a deletion-list reconciliation flow from the membership of a
//! single Entra ID (Azure AD) group: authenticate with `OAuth2` client
//! credentials, walk the paginated membership listing, and relay each page
//! of raw member records to a caller-supplied [`SyncHandler`].
//!
//! # Protocol
//!
//! For every [`SyncController::run`] call the handler sees, in order:
//!
//! 1. `begin` — once, before any page is fetched.
//! 2. `on_user_batch` — once per non-empty page, in page order, never with
//!    an empty batch.
//! 3. `commit` — once, only when the whole listing was read and at least
//!    one member was seen. An entirely empty listing fails the run instead
//!    of committing, so a misconfigured group never finalizes a deletion
//!    list.
//!
//! The typical handler snapshots its known users in `begin`, removes every
//! member it is handed in `on_user_batch`, and deletes whatever remains in
//! `commit`.
//!
//! # Example
//!
//! ```no_run
//! use entra_groupsync::{ReqwestTransport, SyncConfig, SyncController, SyncHandler};
//!
//! # async fn example(handler: &mut impl SyncHandler) -> Result<(), Box<dyn std::error::Error>> {
//! let config = SyncConfig::builder()
//!     .tenant_id("your-tenant-id")
//!     .client_id("your-client-id")
//!     .client_secret("your-client-secret")
//!     .group_id("your-group-id")
//!     .build()?;
//!
//! let controller = SyncController::new(ReqwestTransport::new()?, config);
//! let summary = controller.run(handler).await?;
//! println!("saw {} users across {} pages", summary.users, summary.pages);
//! # Ok(())
//! # }
//! ```

mod auth;
mod config;
mod error;
mod handler;
mod sync;
mod transport;

// Re-exports
pub use config::{SyncConfig, SyncConfigBuilder};
pub use error::{SyncError, SyncResult};
pub use handler::{HandlerError, SyncHandler};
pub use sync::{SyncController, SyncSummary, UserRecord};
pub use transport::{
    HttpTransport, Method, ReqwestTransport, TransportError, TransportRequest, TransportResponse,
};
