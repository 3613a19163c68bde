use shipset_core::{BumpLevel, PackageInfo};

use crate::Result;

#[derive(Debug, Clone)]
pub enum PackageSelection {
    Selected(Vec<PackageInfo>),
    Cancelled,
}

#[derive(Debug, Clone)]
pub enum BumpSelection {
    Selected(BumpLevel),
    Cancelled,
}

#[derive(Debug, Clone)]
pub enum SummaryInput {
    Provided(String),
    Cancelled,
}

pub trait InteractionProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn select_packages(&self, available: &[PackageInfo]) -> Result<PackageSelection>;

    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn select_bump(&self) -> Result<BumpSelection>;

    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn summary(&self) -> Result<SummaryInput>;
}
