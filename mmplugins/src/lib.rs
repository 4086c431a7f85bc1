//! # mmplugins
//!
//! Optional effects layered onto any [`mmplaylist::MediaNode`].
//!
//! - [`Effect`]: one post-playback side effect (overlay, subtitles, equalizer)
//! - [`Decorator`]: a node that plays its inner node, then applies an effect
//! - [`PluginManager`]: an ordered list of decorator factories folded onto a
//!   base node
//!
//! ```rust
//! use mmplugins::{Decorator, Equalizer, Watermark};
//! use mmplaylist::{MediaItem, MediaNode};
//! use mmsource::LocalFileSource;
//! use std::sync::Arc;
//!
//! let item = Arc::new(MediaItem::new("Concert", LocalFileSource::new("live.mkv")));
//! let with_eq = Arc::new(Decorator::new(item, Equalizer::new("vocal")));
//! let node = Decorator::new(with_eq, Watermark::at("LIVE", "top-right"));
//!
//! assert_eq!(node.decorator_info(), "Watermark: 'LIVE' at top-right");
//! node.play()?;
//! # Ok::<(), mmplaylist::Error>(())
//! ```

mod decorator;
mod effects;
mod manager;

pub use decorator::{Decorator, Effect};
pub use effects::{Equalizer, Subtitles, Watermark, EQUALIZER_FREQUENCIES};
pub use manager::{DecoratorFactory, PluginManager, RegistrationId};

/// Node with a text overlay
pub type WatermarkDecorator = Decorator<Watermark>;
/// Node with a subtitle track
pub type SubtitleDecorator = Decorator<Subtitles>;
/// Node with an equalizer preset
pub type EqualizerDecorator = Decorator<Equalizer>;
