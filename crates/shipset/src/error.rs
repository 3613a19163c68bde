use thiserror::Error;

use shipset_engine::EngineError;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Git(#[from] shipset_git::GitError),

    #[error("failed to resolve current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("{count} changeset file(s) failed validation")]
    ChangesetsRejected { count: usize },

    #[error("{count} package(s) failed to resolve")]
    ResolutionFailed { count: usize },

    #[error("changeset check failed")]
    CheckFailed,

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

pub(crate) type Result<T> = std::result::Result<T, CliError>;
