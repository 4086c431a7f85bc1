//! Événements de lecture
//!
//! Les nœuds de l'arbre publient des [`PlaybackEvent`] au fil de la lecture.
//! Un [`EventPublisher`] est partagé (clonable) entre tous les nœuds d'un même
//! arbre ; chaque abonné reçoit les événements dans l'ordre de publication.

use crossbeam_channel::{Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

/// Événement émis pendant la traversée d'un arbre
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlaybackEvent {
    PlaylistStarted { name: String, item_count: usize },
    ItemStarted { title: String },
    ItemFinished { title: String },
    PlaylistFinished { name: String },
    EffectApplied { info: String },
}

/// Diffuseur d'événements de lecture
///
/// La publication est synchrone et ne bloque jamais : les abonnés dont le
/// canal est plein perdent l'événement, ceux qui sont déconnectés sont
/// retirés.
#[derive(Debug, Clone, Default)]
pub struct EventPublisher {
    subscribers: Arc<Mutex<Vec<Sender<PlaybackEvent>>>>,
}

impl EventPublisher {
    /// Crée un diffuseur sans abonné
    pub fn new() -> Self {
        Self::default()
    }

    /// Abonne un nouveau récepteur (canal non borné)
    pub fn subscribe(&self) -> Receiver<PlaybackEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribe_with(tx);
        rx
    }

    /// Abonne un canal fourni par l'appelant (borné ou non)
    pub fn subscribe_with(&self, tx: Sender<PlaybackEvent>) {
        self.subscribers.lock().push(tx);
    }

    /// Publie un événement à tous les abonnés
    pub fn publish(&self, event: PlaybackEvent) {
        self.subscribers
            .lock()
            .retain(|tx| match tx.try_send(event.clone()) {
                Ok(()) | Err(TrySendError::Full(_)) => true,
                Err(TrySendError::Disconnected(_)) => false,
            });
    }

    /// Nombre d'abonnés encore connectés au dernier envoi
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}
