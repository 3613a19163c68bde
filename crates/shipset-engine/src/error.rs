use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use shipset_parse::MalformedChangeset;
use shipset_version::VersionError;

use crate::intake::RejectedChangeset;

/// Why one package could not be resolved into a version bump.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Version(#[from] VersionError),

    #[error("package is not part of the project")]
    NotInProject,
}

#[derive(Debug)]
pub struct PackageFailure {
    pub package: String,
    pub error: ResolveError,
}

/// Aggregate failure raised when one or more packages cannot be resolved.
/// Carries every failing package so nothing is reported piecemeal; no plan
/// is emitted when this is returned.
#[derive(Debug)]
pub struct ResolutionFailure {
    pub failures: Vec<PackageFailure>,
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to resolve {} package(s):", self.failures.len())?;
        for failure in &self.failures {
            write!(f, " {} ({})", failure.package, failure.error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ResolutionFailure {}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Git(#[from] shipset_git::GitError),

    #[error(transparent)]
    Resolution(#[from] ResolutionFailure),

    #[error("{} changeset file(s) failed validation", .0.len())]
    RejectedChangesets(Vec<RejectedChangeset>),

    #[error("failed to read changeset file '{path}'")]
    ChangesetFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write changeset file")]
    ChangesetFileWrite(#[source] std::io::Error),

    #[error("failed to list changeset files in '{path}'")]
    ChangesetList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to delete changeset file '{path}'")]
    ChangesetDelete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize changeset")]
    ChangesetSerialize(#[source] MalformedChangeset),

    #[error("failed to read manifest '{path}'")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest '{path}'")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    #[error("failed to parse manifest '{path}'")]
    ManifestEdit {
        path: PathBuf,
        #[source]
        source: toml_edit::TomlError,
    },

    #[error("manifest '{path}' is missing field '{field}'")]
    ManifestField { path: PathBuf, field: &'static str },

    #[error("failed to write manifest '{path}'")]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write changelog '{path}'")]
    ChangelogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config '{path}'")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config '{path}'")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write config '{path}'")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to scan project directory")]
    Scan(#[from] glob::PatternError),

    #[error("no project found from '{0}'")]
    ProjectNotFound(PathBuf),

    #[error("no packages found in project at '{0}'")]
    EmptyProject(PathBuf),

    #[error("unknown package '{name}' (available: {available})")]
    UnknownPackage { name: String, available: String },

    #[error("changeset summary cannot be empty")]
    EmptySummary,

    #[error("interactive terminal required")]
    InteractionRequired,

    #[error("IO error")]
    Io(#[from] std::io::Error),
}
