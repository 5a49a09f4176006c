//! Local path to Drive file resolution.
//!
//! One broad search fetches every record whose name matches any path
//! segment; the leaf candidates are then verified by walking their parent
//! links through that snapshot, looking up by id only ancestors the search
//! did not return.

mod chain;
pub mod outcome;
pub mod path;

pub use outcome::{MatchResult, MatchType};
pub use path::LocalPath;

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::drive::{Field, LookupService, SearchQuery};
use crate::error::{LookupError, ResolveError};
use crate::providers::{CredentialProvider, RootIdStore};
use chain::{ChainWalker, Snapshot};

/// Fields requested by the broad search
const SEARCH_FIELDS: &[Field] = &[Field::Id, Field::Name, Field::MimeType, Field::Parents];

/// Resolves local paths against the remote store
pub struct PathResolver {
    lookup: Arc<dyn LookupService>,
    credentials: Arc<dyn CredentialProvider>,
    roots: Arc<dyn RootIdStore>,
}

impl PathResolver {
    pub fn new(
        lookup: Arc<dyn LookupService>,
        credentials: Arc<dyn CredentialProvider>,
        roots: Arc<dyn RootIdStore>,
    ) -> Self {
        PathResolver {
            lookup,
            credentials,
            roots,
        }
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialProvider> {
        &self.credentials
    }

    /// Resolve a slash-separated local path
    pub async fn resolve(&self, path: &str) -> Result<MatchResult, ResolveError> {
        self.resolve_path(&LocalPath::parse(path)).await
    }

    /// Resolve an already parsed path.
    ///
    /// Returns [`MatchResult::Login`] when no credential is available or the
    /// service rejects it (the credential is invalidated in that case).
    /// Transport and service failures are returned as errors, never as
    /// [`MatchResult::None`].
    pub async fn resolve_path(&self, path: &LocalPath) -> Result<MatchResult, ResolveError> {
        let Some(token) = self.credentials.token().await else {
            debug!("no access token; login required");
            return Ok(MatchResult::Login);
        };
        let Some(leaf) = path.leaf() else {
            return Ok(MatchResult::None);
        };

        match self.reconcile(&token, path, leaf).await {
            Ok(result) => {
                debug!(%path, %result, "path resolved");
                Ok(result)
            }
            Err(LookupError::Unauthorized) => {
                warn!(%path, "access token rejected; invalidating");
                self.credentials.invalidate().await;
                Ok(MatchResult::Login)
            }
            Err(LookupError::Transport(e)) => Err(ResolveError::Transport(e)),
            Err(LookupError::Service { status, body }) => {
                Err(ResolveError::Service { status, body })
            }
        }
    }

    async fn reconcile(
        &self,
        token: &str,
        path: &LocalPath,
        leaf: &str,
    ) -> Result<MatchResult, LookupError> {
        let query = SearchQuery::for_segments(path.segments());
        let nodes = self.lookup.search(token, &query, SEARCH_FIELDS).await?;
        if nodes.is_empty() {
            return Ok(MatchResult::None);
        }
        debug!(records = nodes.len(), "search returned");

        let snapshot = Snapshot::new(nodes);
        let candidates = snapshot.leaf_candidates(leaf);
        if candidates.is_empty() {
            return Ok(MatchResult::None);
        }

        let root_id = self.roots.root_id().await;
        let walker = ChainWalker {
            lookup: self.lookup.as_ref(),
            token,
            snapshot: &snapshot,
            ancestors: path.ancestors(),
            root_id: root_id.as_deref(),
        };

        // Every candidate is walked before selecting so the winner follows
        // discovery order rather than lookup completion order.
        let outcomes = join_all(candidates.iter().map(|&candidate| walker.walk(candidate))).await;

        let mut walks = Vec::with_capacity(outcomes.len());
        let mut failure = None;
        for outcome in outcomes {
            match outcome {
                Ok(walk) => walks.push(walk),
                Err(LookupError::Unauthorized) => return Err(LookupError::Unauthorized),
                Err(e) => {
                    failure.get_or_insert(e);
                }
            }
        }
        if let Some(e) = failure {
            return Err(e);
        }

        Ok(match chain::select(&candidates, &walks) {
            Some((node, walk)) if walk.is_full() => MatchResult::Full {
                file_id: node.id.clone(),
            },
            Some((node, walk)) => MatchResult::Partial {
                file_id: node.id.clone(),
                depth: walk.depth,
            },
            None => MatchResult::None,
        })
    }
}
