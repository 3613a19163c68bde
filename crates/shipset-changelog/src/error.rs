use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChangelogError {
    #[error("failed to parse repository URL '{url}'")]
    UrlParse {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("repository URL '{url}' has no owner/name path")]
    InvalidRepositoryPath { url: String },
}
