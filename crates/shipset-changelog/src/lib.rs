mod entry;
mod error;
mod forge;
mod merge;
mod render;

pub use entry::ChangelogEntry;
pub use error::ChangelogError;
pub use forge::{Forge, RepositoryInfo};
pub use merge::{merge_release_into, new_changelog};
pub use render::{render_entry, render_pull_request_description, render_release, PackageUpdate};

pub type Result<T> = std::result::Result<T, ChangelogError>;
