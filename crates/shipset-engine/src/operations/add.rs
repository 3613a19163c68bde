use std::path::Path;

use tracing::debug;

use shipset_core::{BumpLevel, ChangesetRecord, PackageInfo};

use crate::error::EngineError;
use crate::traits::{
    BumpSelection, ChangesetStore, InteractionProvider, PackageSelection, ProjectSource,
    SummaryInput,
};
use crate::Result;

#[derive(Debug, Default)]
pub struct AddInput {
    /// Packages named on the command line; prompts fill in the rest.
    pub packages: Vec<String>,
    pub bump: Option<BumpLevel>,
    pub summary: Option<String>,
}

#[derive(Debug)]
pub enum AddResult {
    Created {
        record: ChangesetRecord,
        source_id: String,
    },
    Cancelled,
    NoPackages,
}

pub struct AddOperation<P, S, I> {
    project_source: P,
    store: S,
    interaction: I,
}

impl<P, S, I> AddOperation<P, S, I>
where
    P: ProjectSource,
    S: ChangesetStore,
    I: InteractionProvider,
{
    pub fn new(project_source: P, store: S, interaction: I) -> Self {
        Self {
            project_source,
            store,
            interaction,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the project cannot be discovered, has no packages,
    /// an explicitly named package is unknown, the summary is empty, or the
    /// changeset cannot be written.
    pub fn execute(&self, start_path: &Path, input: AddInput) -> Result<AddResult> {
        let project = self.project_source.discover(start_path)?;

        if project.packages.is_empty() {
            return Err(EngineError::EmptyProject(project.root));
        }

        let packages = match self.select_packages(&project.packages, &input)? {
            Some(packages) if packages.is_empty() => return Ok(AddResult::NoPackages),
            Some(packages) => packages,
            None => return Ok(AddResult::Cancelled),
        };

        let Some(bump) = self.select_bump(&input)? else {
            return Ok(AddResult::Cancelled);
        };

        let Some(summary) = self.summary(&input)? else {
            return Ok(AddResult::Cancelled);
        };

        let summary = summary.trim();
        if summary.is_empty() {
            return Err(EngineError::EmptySummary);
        }

        let record = ChangesetRecord::new(
            String::new(),
            packages.iter().map(|p| p.name.clone()).collect(),
            bump,
            summary,
        );

        let source_id = self.store.write_new(&record)?;
        debug!(source_id, "changeset written");

        Ok(AddResult::Created {
            record: ChangesetRecord {
                source_id: source_id.clone(),
                ..record
            },
            source_id,
        })
    }

    fn select_packages(
        &self,
        available: &[PackageInfo],
        input: &AddInput,
    ) -> Result<Option<Vec<PackageInfo>>> {
        if !input.packages.is_empty() {
            return resolve_explicit_packages(available, &input.packages).map(Some);
        }

        match self.interaction.select_packages(available)? {
            PackageSelection::Selected(packages) => Ok(Some(packages)),
            PackageSelection::Cancelled => Ok(None),
        }
    }

    fn select_bump(&self, input: &AddInput) -> Result<Option<BumpLevel>> {
        if let Some(bump) = input.bump {
            return Ok(Some(bump));
        }

        match self.interaction.select_bump()? {
            BumpSelection::Selected(bump) => Ok(Some(bump)),
            BumpSelection::Cancelled => Ok(None),
        }
    }

    fn summary(&self, input: &AddInput) -> Result<Option<String>> {
        if let Some(summary) = &input.summary {
            return Ok(Some(summary.clone()));
        }

        match self.interaction.summary()? {
            SummaryInput::Provided(summary) => Ok(Some(summary)),
            SummaryInput::Cancelled => Ok(None),
        }
    }
}

fn resolve_explicit_packages(
    available: &[PackageInfo],
    names: &[String],
) -> Result<Vec<PackageInfo>> {
    let mut selected = Vec::new();

    for name in names {
        let package = available.iter().find(|p| &p.name == name).ok_or_else(|| {
            EngineError::UnknownPackage {
                name: name.clone(),
                available: available
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }
        })?;
        selected.push(package.clone());
    }

    Ok(selected)
}
