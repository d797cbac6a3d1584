//! # Sync Errors
//!
//! This module defines the error types shared by every sync manager.
//! By centralizing error definitions, we keep failure handling uniform
//! across all resources and their candidate endpoints.

/// A failed call against the remote fetch interface.
///
/// The variants mirror the ways a paginated REST backend can fail as seen
/// from the client: an HTTP-like status, a transport breakdown, or a payload
/// the client could not decode. The type is `Clone` so a failure can be
/// stored in a [`Snapshot`](crate::sync::Snapshot) and observed by any
/// number of watchers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The endpoint answered with a non-success status code.
    #[error("endpoint returned status {0}")]
    Status(u16),
    /// The request never produced a response (DNS, connection reset, ...).
    #[error("transport failure: {0}")]
    Transport(String),
    /// The response arrived but its payload was not decodable.
    #[error("malformed payload: {0}")]
    Decode(String),
}

impl FetchError {
    /// Whether this failure means the caller's session is no longer valid.
    ///
    /// Expired sessions are handled specially everywhere: cached data is
    /// cleared (it belongs to a dead identity) and no error is surfaced,
    /// since an outer authentication layer is expected to redirect.
    pub fn auth_expired(&self) -> bool {
        matches!(self, FetchError::Status(401))
    }

    /// Whether the endpoint reported the resource as absent.
    pub fn not_found(&self) -> bool {
        matches!(self, FetchError::Status(404))
    }
}

/// Errors that can occur when talking to a sync manager itself.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The manager task has shut down and no longer accepts commands.
    #[error("sync manager closed")]
    ManagerClosed,
}
