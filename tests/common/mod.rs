#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use drivelink::drive::{Field, LookupService, RemoteNode, SearchQuery};
use drivelink::error::LookupError;
use drivelink::providers::MemoryStore;
use drivelink::resolver::PathResolver;

/// Failure to inject into a fake request
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Unauthorized,
    Status(u16),
}

impl Failure {
    fn into_error(self) -> LookupError {
        match self {
            Failure::Unauthorized => LookupError::Unauthorized,
            Failure::Status(status) => LookupError::Service {
                status,
                body: "injected".to_string(),
            },
        }
    }
}

/// In-memory Drive: searches filter the store with the query predicate,
/// point lookups return only the parents of the requested record
#[derive(Default)]
pub struct FakeDrive {
    store: Vec<RemoteNode>,
    /// Ids never returned by search, only by point lookup
    hidden: HashSet<String>,
    search_failure: Option<Failure>,
    get_failure: Option<Failure>,
    searches: AtomicUsize,
    gets: AtomicUsize,
    looked_up: Mutex<Vec<String>>,
}

impl FakeDrive {
    pub fn new(store: Vec<RemoteNode>) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    /// Keep a record out of search results
    pub fn hide_from_search(mut self, id: &str) -> Self {
        self.hidden.insert(id.to_string());
        self
    }

    pub fn fail_search(mut self, failure: Failure) -> Self {
        self.search_failure = Some(failure);
        self
    }

    pub fn fail_get(mut self, failure: Failure) -> Self {
        self.get_failure = Some(failure);
        self
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.searches() + self.gets()
    }

    pub fn looked_up(&self) -> Vec<String> {
        self.looked_up.lock().unwrap().clone()
    }
}

#[async_trait]
impl LookupService for FakeDrive {
    async fn search(
        &self,
        token: &str,
        query: &SearchQuery,
        _fields: &[Field],
    ) -> Result<Vec<RemoteNode>, LookupError> {
        assert!(!token.is_empty());
        self.searches.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = self.search_failure {
            return Err(failure.into_error());
        }

        Ok(self
            .store
            .iter()
            .filter(|node| !self.hidden.contains(&node.id) && query.matches(node))
            .cloned()
            .collect())
    }

    async fn get_by_id(
        &self,
        _token: &str,
        id: &str,
        fields: &[Field],
    ) -> Result<Option<RemoteNode>, LookupError> {
        assert_eq!(fields, [Field::Parents]);
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.looked_up.lock().unwrap().push(id.to_string());
        if let Some(failure) = self.get_failure {
            return Err(failure.into_error());
        }

        Ok(self.store.iter().find(|node| node.id == id).map(|node| RemoteNode {
            id: node.id.clone(),
            name: String::new(),
            is_container: false,
            parents: node.parents.clone(),
        }))
    }
}

/// Resolver over `drive` with a signed-in store
pub fn resolver(drive: Arc<FakeDrive>, root_id: Option<&str>) -> (PathResolver, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new(
        Some("test-token".to_string()),
        root_id.map(String::from),
    ));
    let resolver = PathResolver::new(drive, store.clone(), store.clone());
    (resolver, store)
}

/// `/Users/me/report.pdf` with a fully rooted chain
pub fn report_store() -> Vec<RemoteNode> {
    vec![
        RemoteNode::file("F1", "report.pdf").with_parent("P1"),
        RemoteNode::folder("P1", "me").with_parent("P0"),
        RemoteNode::folder("P0", "Users").at_root(),
    ]
}
