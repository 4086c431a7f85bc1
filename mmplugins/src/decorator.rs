//! Generic decorator: a node plus one post-playback effect

use mmplaylist::{EventPublisher, MediaNode, NodeDescription, PlaybackEvent, Result};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::debug;

/// Side effect layered on top of a node's playback
pub trait Effect: Debug + Send + Sync {
    /// Runs the effect once the wrapped node has finished playing
    ///
    /// `target` describes the wrapped node.
    fn apply(&self, target: &NodeDescription) -> Result<()>;

    /// Human-readable description of the effect configuration
    fn info(&self) -> String;
}

/// A [`MediaNode`] that plays `inner`, then applies `effect`
///
/// Decorators nest: in `A(B(item))` the item plays first, then B's effect,
/// then A's.
#[derive(Debug)]
pub struct Decorator<E> {
    inner: Arc<dyn MediaNode>,
    effect: E,
    events: Option<EventPublisher>,
}

impl<E: Effect> Decorator<E> {
    pub fn new(inner: Arc<dyn MediaNode>, effect: E) -> Self {
        Self {
            inner,
            effect,
            events: None,
        }
    }

    /// Publishes `EffectApplied` after each effect
    pub fn with_events(mut self, events: EventPublisher) -> Self {
        self.events = Some(events);
        self
    }

    pub fn inner(&self) -> &Arc<dyn MediaNode> {
        &self.inner
    }

    pub fn effect(&self) -> &E {
        &self.effect
    }

    /// Configuration of this decorator; has no effect on playback
    pub fn decorator_info(&self) -> String {
        self.effect.info()
    }
}

impl<E: Effect> MediaNode for Decorator<E> {
    fn play(&self) -> Result<()> {
        self.inner.play()?;

        let target = self.inner.describe();
        self.effect.apply(&target)?;

        let info = self.effect.info();
        debug!(node = %target.name(), effect = %info, "Effect applied");
        if let Some(events) = &self.events {
            events.publish(PlaybackEvent::EffectApplied { info });
        }
        Ok(())
    }

    fn describe(&self) -> NodeDescription {
        NodeDescription::Decorated {
            info: self.effect.info(),
            inner: Box::new(self.inner.describe()),
        }
    }

    fn children(&self) -> Vec<Arc<dyn MediaNode>> {
        vec![self.inner.clone()]
    }
}
