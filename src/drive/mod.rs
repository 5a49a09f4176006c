pub mod client;
pub mod metrics;
pub mod node;
pub mod query;

pub use client::{ClientConfig, DriveClient};
pub use metrics::{LookupMetrics, RequestKind};
pub use node::{FOLDER_MIME_TYPE, RemoteNode};
pub use query::{Field, SearchQuery};

use async_trait::async_trait;

use crate::error::LookupError;

/// Read access to the remote store.
///
/// The bearer token is passed per call so the caller decides when a
/// credential is missing or must be invalidated.
#[async_trait]
pub trait LookupService: Send + Sync {
    /// Run a search and return every matching, non-trashed record
    async fn search(
        &self,
        token: &str,
        query: &SearchQuery,
        fields: &[Field],
    ) -> Result<Vec<RemoteNode>, LookupError>;

    /// Fetch a single record by id; `Ok(None)` if the store has no such record
    async fn get_by_id(
        &self,
        token: &str,
        id: &str,
        fields: &[Field],
    ) -> Result<Option<RemoteNode>, LookupError>;
}

/// Browser URL that opens a file in the Drive web viewer
pub fn file_view_url(file_id: &str) -> String {
    format!("https://drive.google.com/file/d/{file_id}/view")
}
