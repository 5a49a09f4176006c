use serde::Deserialize;

use super::query::Field;

/// MIME type Drive uses for folders
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// A file or folder record as returned by the Drive API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteNode {
    pub id: String,
    pub name: String,
    /// True for folders
    pub is_container: bool,
    /// `None` when the field was not requested (unknown ancestry),
    /// `Some(vec![])` when the node sits at the top of the store
    pub parents: Option<Vec<String>>,
}

impl RemoteNode {
    /// A leaf item with unknown parents
    pub fn file(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_container: false,
            parents: None,
        }
    }

    /// A folder with unknown parents
    pub fn folder(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            is_container: true,
            ..Self::file(id, name)
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parents = Some(vec![parent.into()]);
        self
    }

    /// Mark the node as having no parents at all
    pub fn at_root(mut self) -> Self {
        self.parents = Some(Vec::new());
        self
    }

    /// First parent id, if the parents field was returned and non-empty
    pub fn parent_id(&self) -> Option<&str> {
        self.parents.as_ref()?.first().map(String::as_str)
    }

    /// True only when Drive confirmed the node has zero parents
    pub fn is_root_level(&self) -> bool {
        matches!(&self.parents, Some(parents) if parents.is_empty())
    }
}

/// Wire shape of a Drive `File` resource.
/// Every field is optional since callers pick which fields the API returns.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DriveFile {
    pub id: Option<String>,
    pub name: Option<String>,
    pub mime_type: Option<String>,
    pub parents: Option<Vec<String>>,
}

impl DriveFile {
    /// Drive leaves empty repeated fields out of its JSON, so a requested
    /// `parents` missing from the body means the record has no parents
    pub fn with_requested(mut self, fields: &[Field]) -> Self {
        if fields.contains(&Field::Parents) {
            self.parents.get_or_insert_with(Vec::new);
        }
        self
    }

    /// Convert to a [`RemoteNode`]; records without an id are dropped
    pub fn into_node(self) -> Option<RemoteNode> {
        let is_container = self.mime_type.as_deref() == Some(FOLDER_MIME_TYPE);
        Some(RemoteNode {
            id: self.id?,
            name: self.name.unwrap_or_default(),
            is_container,
            parents: self.parents,
        })
    }
}

/// Response body of `files.list`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,
    pub next_page_token: Option<String>,
}
