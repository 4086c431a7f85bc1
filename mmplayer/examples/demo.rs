//! End-to-end walkthrough of ModularMedia.
//!
//! Builds a small library from the three source adapters, wraps the remote
//! one in a caching proxy, decorates items through the plugin manager, and
//! plays everything through the facade, switching renderers on the way.
//!
//! Run with `cargo run -p mmplayer --example demo`; `RUST_LOG` overrides the
//! level configured under `host.logger.min_level`.

use std::sync::Arc;

use anyhow::{Context, Result};
use mmconfig::get_config;
use mmplayer::PlayerFacade;
use mmplaylist::{EventPublisher, MediaItem, MediaNode, PlaybackEvent, Playlist};
use mmplugins::{Decorator, Equalizer, PluginManager, Subtitles, Watermark};
use mmrender::{HardwareRenderer, SoftwareRenderer};
use mmsource::{CachingProxy, HlsStreamSource, LocalFileSource, RemoteApiSource, SourceConfigExt};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = get_config();
    let level = config
        .get_log_min_level()
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.to_lowercase()))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();

    info!("🎬 ModularMedia demo");
    let events = EventPublisher::new();
    let rx = events.subscribe();

    // ========== Sources ==========
    let local = MediaItem::new("Big Buck Bunny", LocalFileSource::new("/videos/bunny.mp4"))
        .with_events(events.clone());
    let remote = MediaItem::new(
        "Conference Keynote",
        CachingProxy::from_config(
            RemoteApiSource::new("https://api.example.com/media?id=12345"),
            &config,
        ),
    )
    .with_events(events.clone());
    let live = MediaItem::new(
        "Live Concert",
        HlsStreamSource::from_config("https://cdn.example.com/live/master.m3u8", &config),
    )
    .with_events(events.clone());
    info!(ttl_ms = config.cache_ttl().as_millis() as u64, "Remote loads are cached");

    // ========== Plugins ==========
    let plugins = PluginManager::new().with_events(events.clone());
    plugins.register_effect(Watermark::new("ModularMedia"));
    let subtitles = plugins.register_effect(Subtitles::in_language("keynote.srt", "fr"));

    let keynote = plugins.apply_decorators(Arc::new(remote));
    plugins.unregister_decorator(subtitles);
    let bunny = plugins.apply_decorators(Arc::new(local));
    let concert: Arc<dyn MediaNode> = Arc::new(
        Decorator::new(Arc::new(live), Equalizer::new("bass boost")).with_events(events.clone()),
    );

    // ========== Playlists ==========
    let evening = Arc::new(Playlist::new("Evening").with_events(events.clone()));
    evening.add(bunny).context("adding movie")?;
    evening.add(keynote).context("adding keynote")?;

    let library = Arc::new(Playlist::new("Library").with_events(events.clone()));
    library.add(evening.clone()).context("adding evening playlist")?;
    library.add(concert).context("adding concert")?;

    if let Err(e) = evening.add(library.clone()) {
        warn!(error = %e, "Nesting refused");
    }

    // ========== Facade ==========
    let player = PlayerFacade::from_config(&config);
    info!("{}", player.status());
    player.play()?;

    player.load(library);
    player.play()?;

    if let Err(e) = player.set_renderer(Arc::new(HardwareRenderer::new(false))) {
        warn!(error = %e, "Renderer switch refused");
    }
    player.set_renderer(Arc::new(SoftwareRenderer::new()))?;
    player.play()?;
    info!("{}", player.status());

    // ========== Events ==========
    let received: Vec<PlaybackEvent> = rx.try_iter().collect();
    let effects = received
        .iter()
        .filter(|e| matches!(e, PlaybackEvent::EffectApplied { .. }))
        .count();
    info!(events = received.len(), effects, "✅ Demo finished");
    Ok(())
}
