//! Tests d'intégration du proxy de cache

use mmsource::{
    CacheLookup, CacheStatistics, CachingProxy, LocalFileSource, ManualClock, RemoteApiSource,
    Result, Source, SourceError,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Source qui note chaque appel dans un journal partagé
#[derive(Debug)]
struct JournalSource {
    name: &'static str,
    journal: Arc<Mutex<Vec<String>>>,
}

impl JournalSource {
    fn new(name: &'static str) -> (Self, Arc<Mutex<Vec<String>>>) {
        let journal = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                name,
                journal: journal.clone(),
            },
            journal,
        )
    }

    fn loads(journal: &Arc<Mutex<Vec<String>>>) -> usize {
        journal.lock().iter().filter(|e| e.ends_with(".load")).count()
    }
}

impl Source for JournalSource {
    fn load(&self) -> Result<()> {
        self.journal.lock().push(format!("{}.load", self.name));
        Ok(())
    }

    fn play(&self) -> Result<()> {
        self.journal.lock().push(format!("{}.play", self.name));
        Ok(())
    }

    fn info(&self) -> String {
        format!("Journal {}", self.name)
    }

    fn is_ready(&self) -> bool {
        self.journal.lock().iter().any(|e| e.ends_with(".load"))
    }
}

fn proxy_with_clock(ttl_ms: u64) -> (CachingProxy<JournalSource>, Arc<Mutex<Vec<String>>>, Arc<ManualClock>) {
    let (source, journal) = JournalSource::new("A");
    let clock = Arc::new(ManualClock::new());
    let proxy = CachingProxy::new(source)
        .with_ttl(Duration::from_millis(ttl_ms))
        .with_clock(clock.clone());
    (proxy, journal, clock)
}

#[test]
fn test_second_load_within_ttl_is_a_hit() {
    let (proxy, journal, clock) = proxy_with_clock(5_000);

    proxy.load().unwrap();
    clock.set_elapsed(Duration::from_millis(3_000));
    proxy.load().unwrap();

    assert_eq!(JournalSource::loads(&journal), 1);
    assert_eq!(proxy.statistics(), CacheStatistics { hits: 1, misses: 1 });
}

#[test]
fn test_second_load_after_ttl_is_a_miss() {
    let (proxy, journal, clock) = proxy_with_clock(5_000);

    proxy.load().unwrap();
    clock.set_elapsed(Duration::from_millis(6_000));
    assert_eq!(proxy.load_cached().unwrap(), CacheLookup::Miss);

    assert_eq!(JournalSource::loads(&journal), 2);
    assert_eq!(proxy.cache_age(), Some(Duration::ZERO));
}

#[test]
fn test_clear_cache_forces_a_miss() {
    let (proxy, journal, _clock) = proxy_with_clock(5_000);

    proxy.load().unwrap();
    proxy.clear_cache();
    assert!(!proxy.is_cached());
    assert_eq!(proxy.cache_age(), None);

    proxy.load().unwrap();
    assert_eq!(JournalSource::loads(&journal), 2);
}

#[test]
fn test_play_loads_then_plays() {
    let (proxy, journal, clock) = proxy_with_clock(5_000);

    proxy.play().unwrap();
    clock.advance(Duration::from_millis(1_000));
    proxy.play().unwrap();

    assert_eq!(
        *journal.lock(),
        vec!["A.load", "A.play", "A.play"]
    );
}

#[test]
fn test_is_ready_requires_cache_and_inner() {
    let (proxy, _journal, _clock) = proxy_with_clock(5_000);
    assert!(!proxy.is_ready());

    proxy.load().unwrap();
    assert!(proxy.is_ready());

    proxy.clear_cache();
    // La source enveloppée est toujours prête, mais plus le cache
    assert!(proxy.inner().is_ready());
    assert!(!proxy.is_ready());
}

#[test]
fn test_info_is_annotated() {
    let proxy = CachingProxy::new(RemoteApiSource::new("https://api.example.com/media?id=42"));
    assert_eq!(
        proxy.info(),
        "Cached: Remote API: https://api.example.com/media?id=42 (ID: 42)"
    );
    assert!(proxy.cache_key().starts_with("cache_"));
}

#[test]
fn test_invalid_locator_is_not_cached() {
    let proxy = CachingProxy::new(LocalFileSource::new(""));

    let err = proxy.load().unwrap_err();
    assert!(matches!(err, SourceError::InvalidLocator(_)));
    assert!(!proxy.is_cached());
    assert_eq!(proxy.statistics(), CacheStatistics::default());
}

#[test]
fn test_shared_proxy_across_threads() {
    let (proxy, journal, _clock) = proxy_with_clock(60_000);
    let proxy = Arc::new(proxy);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let proxy = proxy.clone();
            std::thread::spawn(move || proxy.load().unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(JournalSource::loads(&journal), 1);
    assert_eq!(proxy.statistics().hits, 7);
}
