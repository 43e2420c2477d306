use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use serde::Serialize;

/// One entry of a scanned hierarchy. Built once by the tree builder and
/// never patched afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    path: PathBuf,
    kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    File { size: u64 },
    /// Keyed by the raw file name, so entries whose display names collide
    /// stay distinct.
    Folder { children: BTreeMap<OsString, Node> },
}

impl Node {
    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::File { size },
        }
    }

    pub fn folder(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        children: impl IntoIterator<Item = Node>,
    ) -> Self {
        let children = children
            .into_iter()
            .map(|child| (child.key().to_os_string(), child))
            .collect();
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Folder { children },
        }
    }

    /// Raw last path segment; the display name when the path has none.
    pub fn key(&self) -> &OsStr {
        self.path
            .file_name()
            .unwrap_or_else(|| OsStr::new(&self.name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    /// Byte size, `None` for folders.
    pub fn size(&self) -> Option<u64> {
        match self.kind {
            NodeKind::File { size } => Some(size),
            NodeKind::Folder { .. } => None,
        }
    }

    /// Children keyed by name, `None` for files.
    pub fn children(&self) -> Option<&BTreeMap<OsString, Node>> {
        match &self.kind {
            NodeKind::Folder { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    pub fn child(&self, name: impl AsRef<OsStr>) -> Option<&Node> {
        self.children()?.get(name.as_ref())
    }

    pub fn has_children(&self) -> bool {
        self.children().is_some_and(|c| !c.is_empty())
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            total += 1;
            if let Some(children) = node.children() {
                stack.extend(children.values());
            }
        }
        total
    }

    /// Serializable view in the `{ name, path, isFolder, size?, children? }` shape.
    pub fn to_dto(&self) -> NodeDto<'_> {
        let (size, children) = match &self.kind {
            NodeKind::File { size } => (Some(*size), None),
            NodeKind::Folder { children } => {
                let dtos: BTreeMap<String, NodeDto<'_>> = children
                    .iter()
                    .map(|(key, child)| (key.to_string_lossy().into_owned(), child.to_dto()))
                    .collect();
                (None, Some(dtos))
            }
        };
        NodeDto {
            name: &self.name,
            path: self.path.to_string_lossy().into_owned(),
            is_folder: self.is_folder(),
            size,
            children,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDto<'a> {
    pub name: &'a str,
    pub path: String,
    pub is_folder: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<BTreeMap<String, NodeDto<'a>>>,
}

/// Display name for a path: its last segment, or the whole path when it
/// has none (`/`, `.`, `C:\`).
pub fn last_segment(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
