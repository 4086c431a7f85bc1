//! Leaf node wrapping one source

use crate::events::{EventPublisher, PlaybackEvent};
use crate::node::{MediaNode, NodeDescription};
use crate::Result;
use mmsource::Source;
use tracing::{debug, error, info};

/// A titled media item backed by exactly one [`Source`]
///
/// The description defaults to the source's own `info()`, captured at
/// construction. An item is immutable once built.
#[derive(Debug)]
pub struct MediaItem {
    title: String,
    description: String,
    source: Box<dyn Source>,
    events: Option<EventPublisher>,
}

impl MediaItem {
    pub fn new(title: impl Into<String>, source: impl Source + 'static) -> Self {
        let description = source.info();
        Self {
            title: title.into(),
            description,
            source: Box::new(source),
            events: None,
        }
    }

    /// Replaces the description taken from the source
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Publishes `ItemStarted`/`ItemFinished` around playback
    pub fn with_events(mut self, events: EventPublisher) -> Self {
        self.events = Some(events);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn source(&self) -> &dyn Source {
        self.source.as_ref()
    }

    fn publish(&self, event: PlaybackEvent) {
        if let Some(events) = &self.events {
            events.publish(event);
        }
    }
}

impl MediaNode for MediaItem {
    fn play(&self) -> Result<()> {
        info!(title = %self.title, "Playing media item");
        self.publish(PlaybackEvent::ItemStarted {
            title: self.title.clone(),
        });

        let outcome = self.source.load().and_then(|()| self.source.play());
        if let Err(e) = outcome {
            error!(title = %self.title, error = %e, "Media item failed");
            return Err(e.into());
        }

        debug!(title = %self.title, "Media item finished");
        self.publish(PlaybackEvent::ItemFinished {
            title: self.title.clone(),
        });
        Ok(())
    }

    fn describe(&self) -> NodeDescription {
        NodeDescription::Item {
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmsource::{LocalFileSource, SourceError};

    #[test]
    fn test_description_defaults_to_source_info() {
        let item = MediaItem::new("Trailer", LocalFileSource::new("trailer.mov"));
        assert_eq!(item.description(), "Local File: trailer.mov (MOV)");

        let item = item.with_description("Official trailer");
        assert_eq!(
            item.describe(),
            NodeDescription::Item {
                title: "Trailer".to_string(),
                description: "Official trailer".to_string(),
            }
        );
    }

    #[test]
    fn test_play_loads_the_source() {
        let item = MediaItem::new("Clip", LocalFileSource::new("clip.mp4"));
        assert!(!item.source().is_ready());
        item.play().unwrap();
        assert!(item.source().is_ready());
    }

    #[test]
    fn test_source_error_is_propagated() {
        let item = MediaItem::new("Broken", LocalFileSource::new(""));
        let err = item.play().unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Source(SourceError::InvalidLocator(_))
        ));
    }
}
