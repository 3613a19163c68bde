mod changelog_writer;
mod changeset_store;
mod diff;
mod interaction;
mod manifest_writer;
mod metadata;
mod project_source;

pub use changelog_writer::ChangelogWriter;
pub use changeset_store::ChangesetStore;
pub use diff::DiffProvider;
pub use interaction::{BumpSelection, InteractionProvider, PackageSelection, SummaryInput};
pub use manifest_writer::ManifestWriter;
pub use metadata::{ChangeAttribution, HostingClient, MetadataSource};
pub use project_source::{Project, ProjectSource};
