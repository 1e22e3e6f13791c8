//! The reconciliation handler capability.

use async_trait::async_trait;

use crate::sync::UserRecord;

/// Error type returned by handler callbacks.
///
/// Boxed so implementations keep their own error types. Any callback
/// failure aborts the run without commit.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Receives the begin / batch / commit sequence of one sync run.
///
/// The controller drives implementations through a strict protocol:
///
/// 1. [`begin`](SyncHandler::begin) — exactly once, before any page fetch.
/// 2. [`on_user_batch`](SyncHandler::on_user_batch) — once per non-empty
///    page, in page order, with the full unsplit batch. Never called with
///    an empty batch.
/// 3. [`commit`](SyncHandler::commit) — at most once, only when every page
///    was fetched and at least one member was seen.
///
/// A failed run ends the sequence permanently: any state initialized in
/// `begin` must be treated as discarded, and implementations must tolerate
/// being driven through the whole protocol again on the next scheduled run.
///
/// The intended use is deletion-list reconciliation: snapshot the known
/// users in `begin`, drop every observed user from the snapshot in
/// `on_user_batch`, and act on whatever remains in `commit`.
#[async_trait]
pub trait SyncHandler: Send {
    /// Opens a reconciliation session.
    async fn begin(&mut self) -> Result<(), HandlerError>;

    /// Receives one page worth of raw member records.
    async fn on_user_batch(&mut self, users: Vec<UserRecord>) -> Result<(), HandlerError>;

    /// Finalizes the session after a fully successful listing.
    async fn commit(&mut self) -> Result<(), HandlerError>;
}
