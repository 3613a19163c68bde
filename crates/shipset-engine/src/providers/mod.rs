mod changelog_io;
mod changeset_io;
mod git;
mod hosting;
mod manifest;
mod project;

pub use changelog_io::FsChangelogWriter;
pub use changeset_io::FsChangesetStore;
pub use git::{GitDiffProvider, GitMetadataSource};
pub use hosting::{GhCli, NoHosting};
pub use manifest::TomlManifestWriter;
pub use project::FsProjectSource;
