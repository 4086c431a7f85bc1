//! # mmplaylist - Arbre de médias composites
//!
//! Cette crate fournit l'arbre de lecture de ModularMedia :
//! - [`MediaItem`] : une feuille qui enveloppe une seule [`mmsource::Source`]
//! - [`Playlist`] : une collection ordonnée de nœuds, elle-même un nœud
//! - [`MediaNode`] : la capacité commune (`play`, `describe`, `children`)
//!
//! La lecture d'une playlist est un parcours en profondeur, préfixe, dans
//! l'ordre d'insertion. La première erreur interrompt le parcours.
//!
//! # Exemple d'utilisation
//!
//! ```rust
//! use mmplaylist::{EventPublisher, MediaItem, MediaNode, PlaybackEvent, Playlist};
//! use mmsource::{LocalFileSource, RemoteApiSource};
//! use std::sync::Arc;
//!
//! let events = EventPublisher::new();
//! let rx = events.subscribe();
//!
//! let root = Playlist::new("root").with_events(events.clone());
//! root.add(Arc::new(
//!     MediaItem::new("Local", LocalFileSource::new("a.mp4")).with_events(events.clone()),
//! ))?;
//! root.add(Arc::new(MediaItem::new(
//!     "Remote",
//!     RemoteApiSource::new("https://api.example.com/media?id=7"),
//! )))?;
//!
//! root.play()?;
//!
//! let received: Vec<PlaybackEvent> = rx.try_iter().collect();
//! assert_eq!(received.len(), 4);
//! # Ok::<(), mmplaylist::Error>(())
//! ```

mod error;
mod events;
mod item;
mod node;
mod playlist;

// Réexports publics
pub use error::{Error, Result};
pub use events::{EventPublisher, PlaybackEvent};
pub use item::MediaItem;
pub use node::{MediaNode, NodeDescription};
pub use playlist::Playlist;
