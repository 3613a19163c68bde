use std::path::Path;

use indexmap::IndexSet;
use tracing::debug;

use shipset_changelog::{render_pull_request_description, PackageUpdate, RepositoryInfo};
use shipset_core::ChangesetRecord;

use crate::aggregate::aggregate;
use crate::error::EngineError;
use crate::intake::intake;
use crate::plan::{build_plan, ReleasePlan};
use crate::traits::{
    ChangelogWriter, ChangesetStore, ManifestWriter, MetadataSource, Project, ProjectSource,
};
use crate::Result;

#[derive(Debug, Default)]
pub struct ReleaseInput {
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct ReleaseOutcome {
    pub plans: Vec<ReleasePlan>,
    pub pr_description: String,
    /// False for dry runs; nothing was written.
    pub applied: bool,
}

/// The end-to-end release: plan everything, then write manifests, merge
/// changelogs, and delete consumed changesets, in that order. Refuses to
/// write anything when any file or package fails, so a failed run leaves the
/// working tree untouched and is safe to re-run.
pub struct ReleaseOperation<P, S, M, C, E> {
    project_source: P,
    store: S,
    manifest_writer: M,
    changelog_writer: C,
    metadata: Option<E>,
    repo: Option<RepositoryInfo>,
}

impl<P, S, M, C, E> ReleaseOperation<P, S, M, C, E>
where
    P: ProjectSource,
    S: ChangesetStore,
    M: ManifestWriter,
    C: ChangelogWriter,
    E: MetadataSource,
{
    pub fn new(project_source: P, store: S, manifest_writer: M, changelog_writer: C) -> Self {
        Self {
            project_source,
            store,
            manifest_writer,
            changelog_writer,
            metadata: None,
            repo: None,
        }
    }

    #[must_use]
    pub fn with_metadata_source(mut self, metadata: E) -> Self {
        self.metadata = Some(metadata);
        self
    }

    #[must_use]
    pub fn with_repository(mut self, repo: Option<RepositoryInfo>) -> Self {
        self.repo = repo;
        self
    }

    /// # Errors
    ///
    /// Returns `RejectedChangesets` when any changeset file fails validation,
    /// `Resolution` when any package cannot be resolved, or an IO error from
    /// the apply step. No writes happen in the first two cases.
    pub fn execute(&self, start_path: &Path, input: &ReleaseInput) -> Result<ReleaseOutcome> {
        let project = self.project_source.discover(start_path)?;
        let files = self.store.load_pending()?;

        let known: IndexSet<String> =
            project.packages.iter().map(|p| p.name.clone()).collect();
        let (records, rejected) = intake(&files, &known);

        if !rejected.is_empty() {
            return Err(EngineError::RejectedChangesets(rejected));
        }

        let records = self.enrich(records)?;
        let groups = aggregate(&records);
        let plans = build_plan(&groups, &project.current_versions(), self.repo.as_ref())?;

        let pr_description = render_pull_request_description(
            &plans
                .iter()
                .map(|plan| PackageUpdate {
                    package: plan.package.clone(),
                    version: plan.next_version.clone(),
                    body: plan.changelog_body.clone(),
                })
                .collect::<Vec<_>>(),
        );

        if input.dry_run {
            return Ok(ReleaseOutcome {
                plans,
                pr_description,
                applied: false,
            });
        }

        self.apply(&project, &plans)?;

        Ok(ReleaseOutcome {
            plans,
            pr_description,
            applied: true,
        })
    }

    /// Attaches reference and authors from the metadata source to records
    /// that do not carry them yet.
    fn enrich(&self, records: Vec<ChangesetRecord>) -> Result<Vec<ChangesetRecord>> {
        let Some(metadata) = &self.metadata else {
            return Ok(records);
        };

        records
            .into_iter()
            .map(|mut record| {
                if let Some(attribution) = metadata.attribution(&record.source_id)? {
                    if record.reference.is_none() {
                        record.reference = attribution.reference;
                    }
                    if record.authors.is_empty() {
                        record.authors = attribution.authors;
                    }
                }
                Ok(record)
            })
            .collect()
    }

    fn apply(&self, project: &Project, plans: &[ReleasePlan]) -> Result<()> {
        for plan in plans {
            let Some(package) = project.package(&plan.package) else {
                // build_plan only emits packages taken from the project.
                continue;
            };

            debug!(
                package = plan.package,
                from = %plan.current_version,
                to = %plan.next_version,
                "applying version bump"
            );
            self.manifest_writer
                .write_version(package, &plan.next_version)?;
            self.changelog_writer
                .merge_release(package, &plan.changelog_body)?;
        }

        // Consumed files are deleted only after every write succeeded, and a
        // file shared by several packages is deleted once.
        let consumed: IndexSet<&String> = plans
            .iter()
            .flat_map(|plan| plan.consumed_source_ids.iter())
            .collect();
        for source_id in consumed {
            debug!(source_id, "removing consumed changeset");
            self.store.remove(source_id)?;
        }

        Ok(())
    }
}
