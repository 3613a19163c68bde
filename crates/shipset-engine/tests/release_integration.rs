use std::path::Path;

use tempfile::TempDir;

use shipset_engine::operations::{ReleaseInput, ReleaseOperation, StatusOperation};
use shipset_engine::providers::{
    FsChangelogWriter, FsChangesetStore, FsProjectSource, GitMetadataSource, NoHosting,
    TomlManifestWriter,
};
use shipset_engine::EngineError;

type FsRelease = ReleaseOperation<
    FsProjectSource,
    FsChangesetStore,
    TomlManifestWriter,
    FsChangelogWriter,
    GitMetadataSource<NoHosting>,
>;

fn write_package(root: &Path, dir: &str, name: &str, version: &str) -> anyhow::Result<()> {
    let package_dir = root.join(dir);
    std::fs::create_dir_all(&package_dir)?;
    std::fs::write(
        package_dir.join("pyproject.toml"),
        format!("[project]\nname = \"{name}\"\nversion = \"{version}\"\n"),
    )?;
    Ok(())
}

fn write_changeset(root: &Path, file: &str, package: &str, bump: &str, summary: &str) -> anyhow::Result<()> {
    let changeset_dir = root.join(".changeset");
    std::fs::create_dir_all(&changeset_dir)?;
    std::fs::write(
        changeset_dir.join(file),
        format!("---\nbump: {bump}\npackages:\n  - {package}\n---\n{summary}\n"),
    )?;
    Ok(())
}

fn release_operation(root: &Path) -> FsRelease {
    ReleaseOperation::new(
        FsProjectSource::new(),
        FsChangesetStore::new(root),
        TomlManifestWriter::new(),
        FsChangelogWriter::new(),
    )
}

#[test]
fn full_release_updates_manifests_changelogs_and_consumes_changesets() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let root = dir.path();

    write_package(root, "packages/alpha", "alpha", "1.2.3")?;
    write_package(root, "packages/beta", "beta", "0.4.0")?;
    write_changeset(root, "one.md", "alpha", "minor", "Add alpha feature.")?;
    write_changeset(root, "two.md", "alpha", "patch", "Fix alpha bug.")?;
    write_changeset(root, "three.md", "beta", "patch", "Fix beta bug.")?;

    let outcome = release_operation(root).execute(root, &ReleaseInput::default())?;

    assert!(outcome.applied);
    assert_eq!(outcome.plans.len(), 2);

    let alpha_manifest = std::fs::read_to_string(root.join("packages/alpha/pyproject.toml"))?;
    assert!(alpha_manifest.contains("version = \"1.3.0\""));
    let beta_manifest = std::fs::read_to_string(root.join("packages/beta/pyproject.toml"))?;
    assert!(beta_manifest.contains("version = \"0.4.1\""));

    let alpha_changelog = std::fs::read_to_string(root.join("packages/alpha/CHANGELOG.md"))?;
    assert!(alpha_changelog.starts_with("# alpha\n"));
    assert!(alpha_changelog.contains("## 1.3.0"));
    assert!(alpha_changelog.contains("### Minor Changes"));
    assert!(alpha_changelog.contains("- Add alpha feature."));
    assert!(alpha_changelog.contains("### Patch Changes"));
    assert!(alpha_changelog.contains("- Fix alpha bug."));

    for consumed in ["one.md", "two.md", "three.md"] {
        assert!(
            !root.join(".changeset").join(consumed).exists(),
            "{consumed} should be deleted"
        );
    }

    assert!(outcome.pr_description.contains("## alpha@1.3.0"));
    assert!(outcome.pr_description.contains("## beta@0.4.1"));

    Ok(())
}

#[test]
fn dry_run_leaves_the_tree_untouched() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let root = dir.path();

    write_package(root, "packages/alpha", "alpha", "1.0.0")?;
    write_changeset(root, "one.md", "alpha", "patch", "Fix.")?;

    let outcome = release_operation(root).execute(root, &ReleaseInput { dry_run: true })?;

    assert!(!outcome.applied);
    assert_eq!(outcome.plans.len(), 1);
    assert_eq!(outcome.plans[0].next_version.to_string(), "1.0.1");

    let manifest = std::fs::read_to_string(root.join("packages/alpha/pyproject.toml"))?;
    assert!(manifest.contains("version = \"1.0.0\""));
    assert!(root.join(".changeset/one.md").exists());
    assert!(!root.join("packages/alpha/CHANGELOG.md").exists());

    Ok(())
}

#[test]
fn unknown_package_aborts_without_writing() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let root = dir.path();

    write_package(root, "packages/alpha", "alpha", "1.0.0")?;
    write_changeset(root, "good.md", "alpha", "patch", "Fix.")?;
    write_changeset(root, "typo.md", "alpah", "patch", "Mistyped.")?;

    let err = release_operation(root)
        .execute(root, &ReleaseInput::default())
        .expect_err("release must refuse");

    match err {
        EngineError::RejectedChangesets(rejected) => {
            assert_eq!(rejected.len(), 1);
            assert_eq!(rejected[0].source_id, "typo.md");
        }
        other => panic!("expected RejectedChangesets, got {other}"),
    }

    let manifest = std::fs::read_to_string(root.join("packages/alpha/pyproject.toml"))?;
    assert!(manifest.contains("version = \"1.0.0\""));
    assert!(root.join(".changeset/good.md").exists());
    assert!(root.join(".changeset/typo.md").exists());

    Ok(())
}

#[test]
fn duplicate_notes_render_once_but_both_files_are_consumed() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let root = dir.path();

    write_package(root, "packages/alpha", "alpha", "1.0.0")?;
    write_changeset(root, "one.md", "alpha", "patch", "Fix the flaky retry.")?;
    write_changeset(root, "two.md", "alpha", "patch", "Fix the flaky retry.")?;

    let outcome = release_operation(root).execute(root, &ReleaseInput::default())?;

    let changelog = std::fs::read_to_string(root.join("packages/alpha/CHANGELOG.md"))?;
    assert_eq!(
        changelog.matches("Fix the flaky retry.").count(),
        1,
        "duplicate note must render a single line"
    );

    assert!(!root.join(".changeset/one.md").exists());
    assert!(!root.join(".changeset/two.md").exists());
    assert_eq!(outcome.plans[0].consumed_source_ids, ["one.md", "two.md"]);

    Ok(())
}

#[test]
fn status_then_release_agree_on_the_projection() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let root = dir.path();

    write_package(root, "packages/alpha", "alpha", "2.1.0")?;
    write_changeset(root, "one.md", "alpha", "major", "Breaking rework.")?;

    let status = StatusOperation::new(FsProjectSource::new(), FsChangesetStore::new(root))
        .execute(root)?;
    let release = release_operation(root).execute(root, &ReleaseInput { dry_run: true })?;

    assert_eq!(status.projected.len(), 1);
    assert_eq!(
        status.projected[0].next_version,
        release.plans[0].next_version
    );
    assert_eq!(release.plans[0].next_version.to_string(), "3.0.0");

    Ok(())
}
