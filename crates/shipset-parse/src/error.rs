use shipset_core::UnknownBumpToken;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MalformedChangeset {
    #[error("missing opening delimiter '---'")]
    MissingOpeningDelimiter,

    #[error("missing closing delimiter '---'")]
    MissingClosingDelimiter,

    #[error("front matter is empty")]
    EmptyFrontMatter,

    #[error("failed to parse front matter YAML: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("missing bump level")]
    MissingBumpLevel,

    #[error(transparent)]
    UnknownBumpToken(#[from] UnknownBumpToken),

    #[error("changeset must list at least one package")]
    NoPackages,

    #[error("changeset summary is empty")]
    EmptySummary,

    #[error("input exceeds maximum size of {max_bytes} bytes")]
    InputTooLarge { max_bytes: usize },
}
