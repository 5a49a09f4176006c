mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

/// Source of the bearer token used for Drive requests
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Current access token, if the user is signed in
    async fn token(&self) -> Option<String>;

    /// Forget the current token after the service rejected it
    async fn invalidate(&self);
}

/// Source of the id of the logical root folder
#[async_trait]
pub trait RootIdStore: Send + Sync {
    async fn root_id(&self) -> Option<String>;
}
