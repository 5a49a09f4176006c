use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use super::{CredentialProvider, RootIdStore};

/// In-process settings store holding the access token and root folder id
#[derive(Debug, Default)]
pub struct MemoryStore {
    token: RwLock<Option<String>>,
    root_id: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new(token: Option<String>, root_id: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
            root_id: RwLock::new(root_id),
        }
    }

    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut current) = self.token.write() {
            *current = token;
        }
    }

    pub fn set_root_id(&self, root_id: Option<String>) {
        if let Ok(mut current) = self.root_id.write() {
            *current = root_id;
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.read().map(|t| t.is_some()).unwrap_or(false)
    }

    pub fn current_root_id(&self) -> Option<String> {
        self.root_id.read().ok()?.clone()
    }
}

#[async_trait]
impl CredentialProvider for MemoryStore {
    async fn token(&self) -> Option<String> {
        self.token.read().ok()?.clone()
    }

    async fn invalidate(&self) {
        debug!("clearing stored access token");
        self.set_token(None);
    }
}

#[async_trait]
impl RootIdStore for MemoryStore {
    async fn root_id(&self) -> Option<String> {
        self.current_root_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalidate_clears_token() {
        let store = MemoryStore::new(Some("tok".to_string()), Some("root".to_string()));
        assert_eq!(store.token().await.as_deref(), Some("tok"));
        assert!(store.has_token());

        store.invalidate().await;
        assert_eq!(store.token().await, None);
        assert!(!store.has_token());
        assert_eq!(store.root_id().await.as_deref(), Some("root"));
    }

    #[tokio::test]
    async fn test_default_is_signed_out() {
        let store = MemoryStore::default();
        assert_eq!(store.token().await, None);
        assert_eq!(store.root_id().await, None);

        store.set_root_id(Some("0AB".to_string()));
        assert_eq!(store.current_root_id().as_deref(), Some("0AB"));
    }
}
