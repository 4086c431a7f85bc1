//! Registre ordonné de fabriques de décorateurs

use crate::{Decorator, Effect};
use mmplaylist::{EventPublisher, MediaNode};
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Fonction qui enveloppe un nœud et retourne le nœud décoré
pub type DecoratorFactory = Arc<dyn Fn(Arc<dyn MediaNode>) -> Arc<dyn MediaNode> + Send + Sync>;

/// Jeton retourné par [`PluginManager::register_decorator`]
///
/// Les closures n'ont pas d'identité stable : c'est ce jeton qui permet de
/// désenregistrer une fabrique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationId(u64);

/// Gestionnaire de plugins
///
/// `apply_decorators` replie les fabriques dans l'ordre d'enregistrement : la
/// première produit l'enveloppe la plus interne, la dernière l'enveloppe
/// externe, dont l'effet s'exécute donc en dernier.
///
/// # Exemple
///
/// ```rust
/// use mmplugins::{PluginManager, Subtitles, Watermark};
/// use mmplaylist::{MediaItem, MediaNode};
/// use mmsource::LocalFileSource;
/// use std::sync::Arc;
///
/// let plugins = PluginManager::new();
/// plugins.register_effect(Watermark::new("Preview"));
/// plugins.register_effect(Subtitles::new("movie.srt"));
///
/// let base = Arc::new(MediaItem::new("Movie", LocalFileSource::new("movie.mp4")));
/// let decorated = plugins.apply_decorators(base);
/// decorated.play()?;
/// # Ok::<(), mmplaylist::Error>(())
/// ```
#[derive(Default)]
pub struct PluginManager {
    factories: RwLock<Vec<(RegistrationId, DecoratorFactory)>>,
    next_id: AtomicU64,
    events: Option<EventPublisher>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Les décorateurs créés par [`PluginManager::register_effect`] publient
    /// leurs événements sur `events`
    pub fn with_events(mut self, events: EventPublisher) -> Self {
        self.events = Some(events);
        self
    }

    /// Ajoute une fabrique en fin de séquence
    pub fn register_decorator<F>(&self, factory: F) -> RegistrationId
    where
        F: Fn(Arc<dyn MediaNode>) -> Arc<dyn MediaNode> + Send + Sync + 'static,
    {
        let id = RegistrationId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut factories = self.factories.write();
        factories.push((id, Arc::new(factory)));
        debug!(id = id.0, registered = factories.len(), "Decorator factory registered");
        id
    }

    /// Enregistre une fabrique qui enveloppe le nœud dans un [`Decorator`]
    /// portant une copie de `effect`
    pub fn register_effect<E>(&self, effect: E) -> RegistrationId
    where
        E: Effect + Clone + 'static,
    {
        let events = self.events.clone();
        self.register_decorator(move |node: Arc<dyn MediaNode>| -> Arc<dyn MediaNode> {
            let decorator = Decorator::new(node, effect.clone());
            match &events {
                Some(events) => Arc::new(decorator.with_events(events.clone())),
                None => Arc::new(decorator),
            }
        })
    }

    /// Retire la fabrique enregistrée sous `id`
    ///
    /// Retourne `false` si le jeton est inconnu (déjà retiré ou après `clear`).
    pub fn unregister_decorator(&self, id: RegistrationId) -> bool {
        let mut factories = self.factories.write();
        match factories.iter().position(|(registered, _)| *registered == id) {
            Some(index) => {
                factories.remove(index);
                debug!(id = id.0, "Decorator factory unregistered");
                true
            }
            None => false,
        }
    }

    /// Enveloppe `base` avec toutes les fabriques, dans l'ordre
    ///
    /// Les fabriques sont copiées avant application : une fabrique peut donc
    /// utiliser le gestionnaire sans interblocage.
    pub fn apply_decorators(&self, base: Arc<dyn MediaNode>) -> Arc<dyn MediaNode> {
        let factories: Vec<DecoratorFactory> = self
            .factories
            .read()
            .iter()
            .map(|(_, factory)| factory.clone())
            .collect();

        info!(
            node = %base.describe().name(),
            decorators = factories.len(),
            "Applying decorators"
        );
        factories
            .iter()
            .fold(base, |current, factory| factory(current))
    }

    /// Vide la séquence
    pub fn clear(&self) {
        self.factories.write().clear();
        debug!("Decorator factories cleared");
    }

    pub fn len(&self) -> usize {
        self.factories.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.read().is_empty()
    }
}

impl fmt::Debug for PluginManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<RegistrationId> = self.factories.read().iter().map(|(id, _)| *id).collect();
        f.debug_struct("PluginManager")
            .field("registrations", &ids)
            .field("events", &self.events.is_some())
            .finish()
    }
}
