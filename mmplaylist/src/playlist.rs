//! Composite node: an ordered, named collection of nodes

use crate::events::{EventPublisher, PlaybackEvent};
use crate::node::{node_addr, reaches, MediaNode, NodeDescription};
use crate::{Error, Result};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Serializes structural changes so that two concurrent `add` calls cannot
/// build a cycle between them.
static TOPOLOGY: Mutex<()> = parking_lot::const_mutex(());

/// Ordered collection of [`MediaNode`]s, itself a `MediaNode`
///
/// Insertion order is playback order. The same node may be added several
/// times; a node may never contain itself, directly or through descendants.
///
/// # Exemple
///
/// ```rust
/// use mmplaylist::{MediaItem, MediaNode, Playlist};
/// use mmsource::LocalFileSource;
/// use std::sync::Arc;
///
/// let root = Arc::new(Playlist::new("Evening"));
/// root.add(Arc::new(MediaItem::new("Intro", LocalFileSource::new("intro.mp4"))))?;
///
/// let shorts = Arc::new(Playlist::new("Shorts"));
/// shorts.add(Arc::new(MediaItem::new("Short", LocalFileSource::new("short.mkv"))))?;
/// root.add(shorts.clone())?;
///
/// // A playlist cannot end up inside itself
/// assert!(shorts.add(root.clone()).is_err());
///
/// root.play()?;
/// # Ok::<(), mmplaylist::Error>(())
/// ```
#[derive(Debug)]
pub struct Playlist {
    name: String,
    items: RwLock<Vec<Arc<dyn MediaNode>>>,
    events: Option<EventPublisher>,
}

impl Playlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: RwLock::new(Vec::new()),
            events: None,
        }
    }

    /// Publishes `PlaylistStarted`/`PlaylistFinished` around playback
    pub fn with_events(mut self, events: EventPublisher) -> Self {
        self.events = Some(events);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a node at the end of the playlist
    ///
    /// # Errors
    ///
    /// [`Error::CycleRejected`] if `node` is this playlist or contains it.
    pub fn add(&self, node: Arc<dyn MediaNode>) -> Result<()> {
        let _topology = TOPOLOGY.lock();

        if reaches(&node, node_addr(self)) {
            let node_name = node.describe().name().to_string();
            warn!(playlist = %self.name, node = %node_name, "Cycle rejected");
            return Err(Error::CycleRejected {
                playlist: self.name.clone(),
                node: node_name,
            });
        }

        debug!(playlist = %self.name, node = %node.describe().name(), "Node added");
        self.items.write().push(node);
        Ok(())
    }

    /// Removes the first occurrence of `node` (compared by identity)
    ///
    /// Returns `false` if the node is not a direct child.
    pub fn remove(&self, node: &Arc<dyn MediaNode>) -> bool {
        let _topology = TOPOLOGY.lock();
        let mut items = self.items.write();
        match items.iter().position(|item| Arc::ptr_eq(item, node)) {
            Some(index) => {
                items.remove(index);
                debug!(playlist = %self.name, index, "Node removed");
                true
            }
            None => false,
        }
    }

    /// Number of direct children
    pub fn item_count(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Snapshot of the direct children
    ///
    /// Modifying the returned vector does not affect the playlist.
    pub fn items(&self) -> Vec<Arc<dyn MediaNode>> {
        self.items.read().clone()
    }

    fn publish(&self, event: PlaybackEvent) {
        if let Some(events) = &self.events {
            events.publish(event);
        }
    }
}

impl MediaNode for Playlist {
    fn play(&self) -> Result<()> {
        let items = self.items();
        info!(playlist = %self.name, items = items.len(), "Playing playlist");
        self.publish(PlaybackEvent::PlaylistStarted {
            name: self.name.clone(),
            item_count: items.len(),
        });

        for (index, item) in items.iter().enumerate() {
            if let Err(e) = item.play() {
                error!(
                    playlist = %self.name,
                    index,
                    skipped = items.len() - index - 1,
                    "Playlist aborted"
                );
                return Err(e);
            }
        }

        debug!(playlist = %self.name, "Playlist finished");
        self.publish(PlaybackEvent::PlaylistFinished {
            name: self.name.clone(),
        });
        Ok(())
    }

    fn describe(&self) -> NodeDescription {
        NodeDescription::Playlist {
            name: self.name.clone(),
            item_count: self.item_count(),
        }
    }

    fn children(&self) -> Vec<Arc<dyn MediaNode>> {
        self.items()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MediaItem;
    use mmsource::LocalFileSource;

    fn item(title: &str) -> Arc<dyn MediaNode> {
        Arc::new(MediaItem::new(title, LocalFileSource::new(format!("{title}.mp4"))))
    }

    #[test]
    fn test_add_keeps_order_and_duplicates() {
        let playlist = Playlist::new("Mix");
        let a = item("a");
        playlist.add(a.clone()).unwrap();
        playlist.add(item("b")).unwrap();
        playlist.add(a.clone()).unwrap();

        let names: Vec<String> = playlist
            .items()
            .iter()
            .map(|n| n.describe().name().to_string())
            .collect();
        assert_eq!(names, ["a", "b", "a"]);
    }

    #[test]
    fn test_remove_first_occurrence_only() {
        let playlist = Playlist::new("Mix");
        let a = item("a");
        playlist.add(a.clone()).unwrap();
        playlist.add(item("b")).unwrap();
        playlist.add(a.clone()).unwrap();

        assert!(playlist.remove(&a));
        assert_eq!(playlist.item_count(), 2);
        assert_eq!(playlist.items()[0].describe().name(), "b");
        assert!(Arc::ptr_eq(&playlist.items()[1], &a));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let playlist = Playlist::new("Mix");
        playlist.add(item("a")).unwrap();
        assert!(!playlist.remove(&item("a")));
        assert_eq!(playlist.item_count(), 1);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let playlist = Playlist::new("Mix");
        playlist.add(item("a")).unwrap();

        let mut snapshot = playlist.items();
        snapshot.clear();
        assert_eq!(playlist.item_count(), 1);
    }

    #[test]
    fn test_self_insertion_is_rejected() {
        let playlist = Arc::new(Playlist::new("Loop"));
        let err = playlist.add(playlist.clone()).unwrap_err();
        assert!(matches!(err, Error::CycleRejected { .. }));
        assert!(playlist.is_empty());
    }

    #[test]
    fn test_describe() {
        let playlist = Playlist::new("Mix");
        playlist.add(item("a")).unwrap();
        assert_eq!(
            playlist.describe(),
            NodeDescription::Playlist {
                name: "Mix".to_string(),
                item_count: 1,
            }
        );
    }
}
