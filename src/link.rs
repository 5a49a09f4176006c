//! Entry points for host events (page loads, tab focus, toolbar clicks,
//! tab closes), tying the session cache to the resolver.

use tracing::debug;

use crate::cache::{SessionCache, SessionKey};
use crate::drive::file_view_url;
use crate::error::ResolveError;
use crate::resolver::{LocalPath, MatchResult, PathResolver};

/// What a session currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// The page is not a local file
    Idle,
    Resolved(MatchResult),
}

/// What to do when the user activates the link for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Sign-in is required first
    Login,
    /// Nothing to open
    NoMatch,
    /// Open the Drive viewer; `exact` is false for partial matches
    Open { url: String, exact: bool },
}

pub struct LinkService {
    resolver: PathResolver,
    cache: SessionCache,
}

impl LinkService {
    pub fn new(resolver: PathResolver, cache: SessionCache) -> Self {
        LinkService { resolver, cache }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    /// A session loaded `url`; always resolves afresh.
    ///
    /// On error the cached state for the session is left untouched.
    pub async fn navigate(&self, key: SessionKey, url: &str) -> Result<LinkState, ResolveError> {
        let Some(path) = LocalPath::from_file_url(url) else {
            self.cache.delete(key);
            return Ok(LinkState::Idle);
        };

        let result = self.resolver.resolve_path(&path).await?;
        if result == MatchResult::Login {
            self.cache.delete(key);
        } else {
            self.cache.set(key, result.clone());
        }
        Ok(LinkState::Resolved(result))
    }

    /// A session came to the foreground; a live cached result is reused
    pub async fn focus(&self, key: SessionKey, url: &str) -> Result<LinkState, ResolveError> {
        if LocalPath::from_file_url(url).is_some() {
            if let Some(entry) = self.cache.get(key) {
                debug!(key, "session cache hit");
                return Ok(LinkState::Resolved(entry.result));
            }
        }
        self.navigate(key, url).await
    }

    /// The user clicked the link for a session
    pub async fn click(&self, key: SessionKey) -> Activation {
        if self.resolver.credentials().token().await.is_none() {
            return Activation::Login;
        }

        match self.cache.get(key).map(|entry| entry.result) {
            Some(MatchResult::Full { file_id }) => Activation::Open {
                url: file_view_url(&file_id),
                exact: true,
            },
            Some(MatchResult::Partial { file_id, .. }) => Activation::Open {
                url: file_view_url(&file_id),
                exact: false,
            },
            Some(MatchResult::Login) => Activation::Login,
            Some(MatchResult::None) | None => Activation::NoMatch,
        }
    }

    /// The session ended
    pub fn close(&self, key: SessionKey) {
        self.cache.delete(key);
    }
}
