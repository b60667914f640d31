//! One-directional sync of remote repositories into the projects directory
//!
//! `to_clone = universe - local`. Local state is never modified beyond adding
//! the cloned directories, and one failed clone does not stop the others.

use crate::error::Result;
use crate::git::Cloner;
use crate::project::{local_project_names, validate_name, Project};
use crate::registry::RepoRegistry;
use camino::{Utf8Path, Utf8PathBuf};
use futures::stream::{self, StreamExt};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Pending sets at or below this size are listed by name in the prompt
const LIST_NAMES_MAX: usize = 5;

/// Names considered for cloning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Universe {
    /// Every repository on the registry
    Remote,
    /// A caller-supplied set; the registry is not consulted
    These(BTreeSet<String>),
}

/// Sync behavior switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Skip the confirmation gate
    pub force: bool,
    /// Maximum concurrent clones
    pub jobs: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            force: false,
            jobs: 1,
        }
    }
}

/// Aggregate result of a sync, ordered by project name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub succeeded: Vec<String>,
    /// Project name and failure reason
    pub failed: Vec<(String, String)>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// How a sync ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing to clone
    UpToDate,
    /// Confirmation was declined; nothing was cloned
    Declined(BTreeSet<String>),
    /// Clones were attempted
    Completed(SyncReport),
}

/// Names in `universe` with no local directory
pub fn plan(universe: &BTreeSet<String>, local: &BTreeSet<String>) -> BTreeSet<String> {
    universe.difference(local).cloned().collect()
}

/// Confirmation question for a pending clone set
pub fn confirmation_prompt(pending: &BTreeSet<String>) -> String {
    if pending.len() <= LIST_NAMES_MAX {
        let names: Vec<&str> = pending.iter().map(String::as_str).collect();
        format!("This will clone {}. Are you sure?", names.join(", "))
    } else {
        format!("This will clone {} repos. Are you sure?", pending.len())
    }
}

/// Clones missing projects into the projects directory
pub struct SyncEngine<'a> {
    projects_dir: Utf8PathBuf,
    owner: String,
    registry: &'a dyn RepoRegistry,
    cloner: &'a dyn Cloner,
}

impl<'a> SyncEngine<'a> {
    pub fn new(
        projects_dir: &Utf8Path,
        owner: &str,
        registry: &'a dyn RepoRegistry,
        cloner: &'a dyn Cloner,
    ) -> Self {
        Self {
            projects_dir: projects_dir.to_owned(),
            owner: owner.to_string(),
            registry,
            cloner,
        }
    }

    /// Names that would be cloned for `universe`
    pub async fn pending(&self, universe: &Universe) -> Result<BTreeSet<String>> {
        let local = local_project_names(&self.projects_dir)?;
        let universe = match universe {
            Universe::Remote => self
                .registry
                .repo_names()
                .await?
                .into_iter()
                .filter(|name| match validate_name(name) {
                    Ok(()) => true,
                    Err(e) => {
                        debug!("Skipping remote repository: {}", e);
                        false
                    }
                })
                .collect(),
            Universe::These(names) => {
                for name in names {
                    validate_name(name)?;
                }
                names.clone()
            }
        };

        let to_clone = plan(&universe, &local);
        debug!(
            "{} candidates, {} local, {} to clone",
            universe.len(),
            local.len(),
            to_clone.len()
        );
        Ok(to_clone)
    }

    /// Clone every name in `pending`, at most `jobs` at a time
    pub async fn clone_all(&self, pending: &BTreeSet<String>, jobs: usize) -> SyncReport {
        let cloner = self.cloner;

        let mut results: Vec<(String, Result<()>)> = stream::iter(pending.iter())
            .map(|name| {
                let project = Project::new(name, &self.owner, &self.projects_dir);
                async move {
                    let result = match project {
                        Ok(project) => {
                            cloner
                                .clone_repo(&project.clone_url(), project.path())
                                .await
                        }
                        Err(e) => Err(e),
                    };
                    (name.clone(), result)
                }
            })
            .buffer_unordered(jobs.max(1))
            .collect()
            .await;
        results.sort_by(|a, b| a.0.cmp(&b.0));

        let mut report = SyncReport::default();
        for (name, result) in results {
            match result {
                Ok(()) => {
                    info!("Cloned {}", name);
                    report.succeeded.push(name);
                }
                Err(e) => {
                    warn!("Failed to clone {}: {}", name, e);
                    report.failed.push((name, e.to_string()));
                }
            }
        }
        report
    }

    /// Plan, confirm unless forced, then clone
    ///
    /// `confirm` is only called when there is something to clone and
    /// `options.force` is unset.
    pub async fn run<F>(
        &self,
        universe: &Universe,
        options: &SyncOptions,
        confirm: F,
    ) -> Result<SyncOutcome>
    where
        F: FnOnce(&BTreeSet<String>) -> Result<bool>,
    {
        let pending = self.pending(universe).await?;
        if pending.is_empty() {
            return Ok(SyncOutcome::UpToDate);
        }

        if !options.force && !confirm(&pending)? {
            return Ok(SyncOutcome::Declined(pending));
        }

        let report = self.clone_all(&pending, options.jobs).await;
        Ok(SyncOutcome::Completed(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::git::MockCloner;
    use crate::registry::MockRepoRegistry;
    use tempfile::TempDir;

    fn names(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn projects_dir(local: &[&str]) -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        for name in local {
            std::fs::create_dir(path.join(name)).unwrap();
        }
        (dir, path)
    }

    #[test]
    fn test_plan_is_set_difference() {
        let to_clone = plan(&names(&["foo", "bar", "baz"]), &names(&["foo", "extra"]));
        assert_eq!(to_clone, names(&["bar", "baz"]));
    }

    #[test]
    fn test_plan_empty_when_universe_is_local() {
        assert!(plan(&names(&["a"]), &names(&["a", "b"])).is_empty());
        assert!(plan(&names(&[]), &names(&["a"])).is_empty());
    }

    #[test]
    fn test_prompt_lists_few_names() {
        assert_eq!(
            confirmation_prompt(&names(&["bar", "baz"])),
            "This will clone bar, baz. Are you sure?"
        );
        let many = names(&["a", "b", "c", "d", "e", "f"]);
        assert_eq!(
            confirmation_prompt(&many),
            "This will clone 6 repos. Are you sure?"
        );
    }

    #[tokio::test]
    async fn test_declined_clones_nothing() {
        let (_dir, root) = projects_dir(&["foo"]);

        let mut registry = MockRepoRegistry::new();
        registry
            .expect_repo_names()
            .returning(|| Ok(names(&["foo", "bar"])));
        let mut cloner = MockCloner::new();
        cloner.expect_clone_repo().never();

        let engine = SyncEngine::new(&root, "me", &registry, &cloner);
        let outcome = engine
            .run(&Universe::Remote, &SyncOptions::default(), |_| Ok(false))
            .await
            .unwrap();

        assert_eq!(outcome, SyncOutcome::Declined(names(&["bar"])));
    }

    #[tokio::test]
    async fn test_up_to_date_skips_confirmation() {
        let (_dir, root) = projects_dir(&["foo"]);

        let mut registry = MockRepoRegistry::new();
        registry.expect_repo_names().returning(|| Ok(names(&["foo"])));
        let cloner = MockCloner::new();

        let engine = SyncEngine::new(&root, "me", &registry, &cloner);
        let outcome = engine
            .run(&Universe::Remote, &SyncOptions::default(), |_| {
                panic!("confirmation must not be requested")
            })
            .await
            .unwrap();

        assert_eq!(outcome, SyncOutcome::UpToDate);
    }

    #[tokio::test]
    async fn test_these_does_not_consult_registry() {
        let (_dir, root) = projects_dir(&[]);

        let mut registry = MockRepoRegistry::new();
        registry.expect_repo_names().never();
        let mut cloner = MockCloner::new();
        cloner
            .expect_clone_repo()
            .withf(|url, _| url == "https://github.com/me/only.git")
            .times(1)
            .returning(|_, _| Ok(()));

        let engine = SyncEngine::new(&root, "me", &registry, &cloner);
        let options = SyncOptions {
            force: true,
            jobs: 1,
        };
        let outcome = engine
            .run(&Universe::These(names(&["only"])), &options, |_| Ok(false))
            .await
            .unwrap();

        match outcome {
            SyncOutcome::Completed(report) => assert_eq!(report.succeeded, vec!["only"]),
            other => panic!("expected Completed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let (_dir, root) = projects_dir(&[]);

        let registry = MockRepoRegistry::new();
        let mut cloner = MockCloner::new();
        cloner.expect_clone_repo().times(3).returning(|url, _| {
            if url.ends_with("/b.git") {
                Err(Error::clone_failed("remote hung up"))
            } else {
                Ok(())
            }
        });

        let engine = SyncEngine::new(&root, "me", &registry, &cloner);
        let report = engine.clone_all(&names(&["a", "b", "c"]), 2).await;

        assert_eq!(report.succeeded, vec!["a", "c"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "b");
        assert!(report.failed[0].1.contains("remote hung up"));
        assert!(!report.is_success());
        assert_eq!(report.total(), 3);
    }

    #[tokio::test]
    async fn test_these_rejects_names_outside_projects_dir() {
        let (_dir, root) = projects_dir(&[]);

        let registry = MockRepoRegistry::new();
        let mut cloner = MockCloner::new();
        cloner.expect_clone_repo().never();

        let engine = SyncEngine::new(&root, "me", &registry, &cloner);
        let result = engine
            .run(
                &Universe::These(names(&["ok", "../x"])),
                &SyncOptions::default(),
                |_| Ok(true),
            )
            .await;

        assert!(matches!(result, Err(Error::InvalidArguments { .. })));
    }

    #[tokio::test]
    async fn test_remote_hidden_repositories_are_skipped() {
        let (_dir, root) = projects_dir(&[]);

        let mut registry = MockRepoRegistry::new();
        registry
            .expect_repo_names()
            .returning(|| Ok(names(&[".github", "real"])));
        let cloner = MockCloner::new();

        let engine = SyncEngine::new(&root, "me", &registry, &cloner);
        let pending = engine.pending(&Universe::Remote).await.unwrap();

        assert_eq!(pending, names(&["real"]));
    }

    #[tokio::test]
    async fn test_clone_all_reports_invalid_names() {
        let (_dir, root) = projects_dir(&[]);

        let registry = MockRepoRegistry::new();
        let mut cloner = MockCloner::new();
        cloner.expect_clone_repo().never();

        let engine = SyncEngine::new(&root, "me", &registry, &cloner);
        let report = engine.clone_all(&names(&[".."]), 1).await;

        assert!(report.succeeded.is_empty());
        assert_eq!(report.failed[0].0, "..");
    }
}
