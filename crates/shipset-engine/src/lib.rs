mod aggregate;
mod config;
mod error;
mod intake;
pub mod operations;
mod plan;
pub mod providers;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::{aggregate, PackageBumpGroup, ReleaseEntry};
pub use config::{ShipsetConfig, CHANGESET_DIR, CONFIG_FILE};
pub use error::{EngineError, PackageFailure, ResolutionFailure, ResolveError};
pub use intake::{intake, RejectReason, RejectedChangeset};
pub use plan::{build_plan, plan_release, resolve_bump, PlanOutcome, ReleasePlan, VersionBump};

pub type Result<T> = std::result::Result<T, EngineError>;
