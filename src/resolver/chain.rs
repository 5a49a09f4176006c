//! Ancestor chain verification against a flat search snapshot.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::drive::{Field, LookupService, RemoteNode};
use crate::error::LookupError;

/// Fields requested when looking up an ancestor the search did not return
const PARENT_LOOKUP_FIELDS: &[Field] = &[Field::Parents];

/// The records returned by one search, indexed by id
#[derive(Debug)]
pub(crate) struct Snapshot {
    nodes: Vec<RemoteNode>,
    by_id: HashMap<String, usize>,
}

impl Snapshot {
    /// Duplicate ids keep their first occurrence
    pub fn new(nodes: Vec<RemoteNode>) -> Self {
        let mut by_id = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            by_id.entry(node.id.clone()).or_insert(i);
        }
        Snapshot { nodes, by_id }
    }

    pub fn get(&self, id: &str) -> Option<&RemoteNode> {
        self.by_id.get(id).map(|&i| &self.nodes[i])
    }

    /// Non-folder records named `name`, in the order the service returned them
    pub fn leaf_candidates(&self, name: &str) -> Vec<&RemoteNode> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(i, node)| {
                !node.is_container && node.name == name && self.by_id.get(&node.id) == Some(i)
            })
            .map(|(_, node)| node)
            .collect()
    }
}

/// Why a chain walk stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChainEnd {
    /// Reached a node with no parents, or the configured root folder
    Root,
    /// Every folder segment matched
    Exhausted,
    /// A parent in the snapshot carried a different name
    Mismatch,
    /// Ancestry is unknown past this point
    Unknown,
    /// A parent looked up by id does not exist
    Unresolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChainWalk {
    /// Folder segments verified above the leaf
    pub depth: usize,
    pub end: ChainEnd,
}

impl ChainWalk {
    pub fn is_full(&self) -> bool {
        matches!(self.end, ChainEnd::Root | ChainEnd::Exhausted)
    }
}

/// Walks one leaf candidate's parent links, comparing folder names against
/// the expected path segments from the innermost folder outward
pub(crate) struct ChainWalker<'a> {
    pub lookup: &'a dyn LookupService,
    pub token: &'a str,
    pub snapshot: &'a Snapshot,
    /// Folder segments, outermost first
    pub ancestors: &'a [String],
    pub root_id: Option<&'a str>,
}

impl<'a> ChainWalker<'a> {
    pub async fn walk(&self, leaf: &'a RemoteNode) -> Result<ChainWalk, LookupError> {
        let mut current = leaf;
        let mut depth = 0;

        for expected in self.ancestors.iter().rev() {
            let parent_id = match &current.parents {
                Some(parents) => match parents.first() {
                    Some(id) => id.as_str(),
                    None => return Ok(stop(leaf, depth, ChainEnd::Root)),
                },
                None => return Ok(stop(leaf, depth, ChainEnd::Unknown)),
            };

            if self.root_id == Some(parent_id) {
                return Ok(stop(leaf, depth, ChainEnd::Root));
            }

            match self.snapshot.get(parent_id) {
                Some(parent) if parent.is_container && parent.name == *expected => {
                    trace!(leaf = %leaf.id, folder = %parent.name, "ancestor verified");
                    depth += 1;
                    current = parent;
                }
                Some(parent) => {
                    debug!(
                        leaf = %leaf.id,
                        expected = %expected,
                        found = %parent.name,
                        "ancestor name mismatch"
                    );
                    return Ok(stop(leaf, depth, ChainEnd::Mismatch));
                }
                None => return self.lookup_parent(leaf, parent_id, depth).await,
            }
        }

        Ok(stop(leaf, depth, ChainEnd::Exhausted))
    }

    /// Look up a parent the search did not return
    async fn lookup_parent(
        &self,
        leaf: &RemoteNode,
        parent_id: &str,
        depth: usize,
    ) -> Result<ChainWalk, LookupError> {
        debug!(leaf = %leaf.id, parent = parent_id, "looking up ancestor outside snapshot");
        let end = match self.lookup.get_by_id(self.token, parent_id, PARENT_LOOKUP_FIELDS).await? {
            None => ChainEnd::Unresolved,
            Some(parent) if parent.is_root_level() => ChainEnd::Root,
            Some(_) => ChainEnd::Unknown,
        };
        Ok(stop(leaf, depth, end))
    }
}

fn stop(leaf: &RemoteNode, depth: usize, end: ChainEnd) -> ChainWalk {
    trace!(leaf = %leaf.id, depth, ?end, "chain walk finished");
    ChainWalk { depth, end }
}

/// Pick the winning candidate: the first full chain in discovery order,
/// otherwise the deepest partial chain with earlier candidates winning ties
pub(crate) fn select<'n>(
    candidates: &[&'n RemoteNode],
    walks: &[ChainWalk],
) -> Option<(&'n RemoteNode, ChainWalk)> {
    let pairs = candidates.iter().copied().zip(walks.iter().copied());

    if let Some(full) = pairs.clone().find(|(_, walk)| walk.is_full()) {
        return Some(full);
    }

    pairs.fold(None, |best, (node, walk)| match best {
        Some((_, best_walk)) if best_walk.depth >= walk.depth => best,
        _ => Some((node, walk)),
    })
}
