//! Built-in effects

mod equalizer;
mod subtitles;
mod watermark;

pub use equalizer::{Equalizer, EQUALIZER_FREQUENCIES};
pub use subtitles::Subtitles;
pub use watermark::Watermark;
