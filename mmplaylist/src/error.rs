//! Types d'erreurs pour mmplaylist

/// Erreurs de construction et de lecture d'un arbre de médias
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Source(#[from] mmsource::SourceError),

    #[error("Cycle rejected: adding {node} to playlist {playlist} would make it contain itself")]
    CycleRejected { playlist: String, node: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Type Result spécialisé pour mmplaylist
pub type Result<T> = std::result::Result<T, Error>;
