//! Tests d'intégration des décorateurs et du gestionnaire de plugins

use mmplaylist::{
    EventPublisher, MediaItem, MediaNode, NodeDescription, PlaybackEvent, Playlist, Result,
};
use mmplugins::{Decorator, Effect, PluginManager, Subtitles, Watermark};
use mmsource::{Result as SourceResult, Source};
use parking_lot::Mutex;
use std::sync::Arc;

type Journal = Arc<Mutex<Vec<String>>>;

#[derive(Debug)]
struct Recorder {
    journal: Journal,
}

impl Source for Recorder {
    fn load(&self) -> SourceResult<()> {
        Ok(())
    }

    fn play(&self) -> SourceResult<()> {
        self.journal.lock().push("leaf".to_string());
        Ok(())
    }

    fn info(&self) -> String {
        "Recorder".to_string()
    }

    fn is_ready(&self) -> bool {
        true
    }
}

/// Effet qui note son passage dans le journal
#[derive(Debug, Clone)]
struct Mark {
    label: &'static str,
    journal: Journal,
}

impl Effect for Mark {
    fn apply(&self, _target: &NodeDescription) -> Result<()> {
        self.journal.lock().push(self.label.to_string());
        Ok(())
    }

    fn info(&self) -> String {
        format!("Mark {}", self.label)
    }
}

fn leaf(journal: &Journal) -> Arc<dyn MediaNode> {
    Arc::new(MediaItem::new(
        "Movie",
        Recorder {
            journal: journal.clone(),
        },
    ))
}

#[test]
fn test_registration_order_is_effect_order() {
    let journal = Journal::default();
    let plugins = PluginManager::new();
    for label in ["f1", "f2", "f3"] {
        plugins.register_effect(Mark {
            label,
            journal: journal.clone(),
        });
    }

    let decorated = plugins.apply_decorators(leaf(&journal));

    // Structure: f3(f2(f1(N)))
    let mut labels = Vec::new();
    let mut description = decorated.describe();
    while let NodeDescription::Decorated { info, inner } = description {
        labels.push(info);
        description = *inner;
    }
    assert_eq!(labels, ["Mark f3", "Mark f2", "Mark f1"]);
    assert_eq!(description.name(), "Movie");

    decorated.play().unwrap();
    assert_eq!(*journal.lock(), ["leaf", "f1", "f2", "f3"]);
}

#[test]
fn test_overlay_then_subtitles() {
    let journal = Journal::default();
    let events = EventPublisher::new();
    let rx = events.subscribe();

    let plugins = PluginManager::new().with_events(events.clone());
    plugins.register_effect(Watermark::new("Preview"));
    plugins.register_effect(Subtitles::new("movie.srt"));

    let item = MediaItem::new(
        "Movie",
        Recorder {
            journal: journal.clone(),
        },
    )
    .with_events(events.clone());
    let decorated = plugins.apply_decorators(Arc::new(item));
    decorated.play().unwrap();

    let received: Vec<PlaybackEvent> = rx.try_iter().collect();
    assert_eq!(
        received,
        vec![
            PlaybackEvent::ItemStarted {
                title: "Movie".to_string()
            },
            PlaybackEvent::ItemFinished {
                title: "Movie".to_string()
            },
            PlaybackEvent::EffectApplied {
                info: "Watermark: 'Preview' at bottom-right".to_string()
            },
            PlaybackEvent::EffectApplied {
                info: "Subtitles: movie.srt (en)".to_string()
            },
        ]
    );
    assert_eq!(*journal.lock(), ["leaf"]);
}

#[test]
fn test_manual_nesting_matches_manager() {
    let journal = Journal::default();
    let mark = |label| Mark {
        label,
        journal: journal.clone(),
    };

    let inner = Arc::new(Decorator::new(leaf(&journal), mark("inner")));
    let outer = Decorator::new(inner, mark("outer"));
    assert_eq!(outer.decorator_info(), "Mark outer");

    outer.play().unwrap();
    assert_eq!(*journal.lock(), ["leaf", "inner", "outer"]);
}

#[test]
fn test_decorated_playlist() {
    let journal = Journal::default();
    let playlist = Arc::new(Playlist::new("Festival"));
    playlist.add(leaf(&journal)).unwrap();
    playlist.add(leaf(&journal)).unwrap();

    let node = Decorator::new(
        playlist,
        Mark {
            label: "eq",
            journal: journal.clone(),
        },
    );
    node.play().unwrap();

    // L'effet s'applique une fois, après toute la playlist
    assert_eq!(*journal.lock(), ["leaf", "leaf", "eq"]);
    assert_eq!(node.describe().name(), "Festival");
}

#[test]
fn test_playlist_cannot_contain_its_own_decorator() {
    let journal = Journal::default();
    let playlist = Arc::new(Playlist::new("Loop"));
    playlist.add(leaf(&journal)).unwrap();

    let decorated: Arc<dyn MediaNode> = Arc::new(Decorator::new(
        playlist.clone(),
        Watermark::new("Loop"),
    ));

    assert!(matches!(
        playlist.add(decorated),
        Err(mmplaylist::Error::CycleRejected { .. })
    ));
    assert_eq!(playlist.item_count(), 1);
}
