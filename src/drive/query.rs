//! Drive search predicates.
//!
//! A path lookup is a single disjunction of `name = '...' and mimeType ...`
//! clauses, one per path segment, restricted to non-trashed files.

use std::fmt;

use super::node::{FOLDER_MIME_TYPE, RemoteNode};

/// Fields that can be requested from the Drive API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Name,
    MimeType,
    Parents,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::MimeType => "mimeType",
            Field::Parents => "parents",
        }
    }
}

/// Render a field selector such as `id, name, parents`
pub fn field_list(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Escape a value for use inside a single-quoted query string literal
pub fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Whether a clause targets folders or non-folder items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    Container,
    Leaf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameClause {
    pub name: String,
    pub kind: KindFilter,
}

/// Disjunction of name clauses over non-trashed files
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    clauses: Vec<NameClause>,
}

impl SearchQuery {
    /// One clause per segment: the last segment must be a non-folder,
    /// every other segment a folder
    pub fn for_segments(segments: &[String]) -> Self {
        let last = segments.len().saturating_sub(1);
        let clauses = segments
            .iter()
            .enumerate()
            .map(|(i, name)| NameClause {
                name: name.clone(),
                kind: if i == last {
                    KindFilter::Leaf
                } else {
                    KindFilter::Container
                },
            })
            .collect();

        SearchQuery { clauses }
    }

    pub fn clauses(&self) -> &[NameClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate the predicate locally against a node
    pub fn matches(&self, node: &RemoteNode) -> bool {
        self.clauses.iter().any(|clause| {
            clause.name == node.name
                && match clause.kind {
                    KindFilter::Container => node.is_container,
                    KindFilter::Leaf => !node.is_container,
                }
        })
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self
            .clauses
            .iter()
            .map(|clause| {
                let op = match clause.kind {
                    KindFilter::Container => "=",
                    KindFilter::Leaf => "!=",
                };
                format!(
                    "(name = '{}' and mimeType {} '{}')",
                    escape(&clause.name),
                    op,
                    FOLDER_MIME_TYPE
                )
            })
            .collect::<Vec<_>>()
            .join(" or ");

        write!(f, "({names}) and trashed = false")
    }
}
