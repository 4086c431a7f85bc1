//! The `MediaNode` capability shared by items, playlists and decorators

use crate::Result;
use serde::Serialize;
use std::fmt::{self, Debug};
use std::sync::Arc;

/// Anything that can be played: a single item, a playlist, or a decorator
/// wrapping another node
///
/// Nodes are shared as `Arc<dyn MediaNode>` so that one node may appear in
/// several places of a tree.
pub trait MediaNode: Debug + Send + Sync {
    /// Plays the node, recursing through its children
    ///
    /// # Errors
    ///
    /// The first failure encountered aborts the traversal and is returned.
    fn play(&self) -> Result<()>;

    /// Tagged description of the node
    fn describe(&self) -> NodeDescription;

    /// Nodes directly reachable from this one
    ///
    /// Used to walk the tree without inspecting concrete types. Leaves have
    /// none.
    fn children(&self) -> Vec<Arc<dyn MediaNode>> {
        Vec::new()
    }
}

/// Description of a node, by kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeDescription {
    Item {
        title: String,
        description: String,
    },
    Playlist {
        name: String,
        item_count: usize,
    },
    Decorated {
        info: String,
        inner: Box<NodeDescription>,
    },
}

impl NodeDescription {
    /// Display name: item title or playlist name, looking through decorators
    pub fn name(&self) -> &str {
        match self {
            NodeDescription::Item { title, .. } => title,
            NodeDescription::Playlist { name, .. } => name,
            NodeDescription::Decorated { inner, .. } => inner.name(),
        }
    }
}

impl fmt::Display for NodeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeDescription::Item { title, description } => {
                write!(f, "{} - {}", title, description)
            }
            NodeDescription::Playlist { name, item_count } => {
                write!(f, "Playlist: {} ({} items)", name, item_count)
            }
            NodeDescription::Decorated { info, inner } => write!(f, "{} [{}]", inner, info),
        }
    }
}

/// Data address of a node, used for identity comparisons
pub(crate) fn node_addr(node: &dyn MediaNode) -> *const () {
    node as *const dyn MediaNode as *const ()
}

/// `true` if `target` is `root` or is reachable from it
pub(crate) fn reaches(root: &Arc<dyn MediaNode>, target: *const ()) -> bool {
    let mut stack = vec![root.clone()];
    while let Some(node) = stack.pop() {
        if node_addr(node.as_ref()) == target {
            return true;
        }
        stack.extend(node.children());
    }
    false
}
