//! Purge orchestrator
//!
//! Drives a full purge against a [`PulpApi`] in four strictly ordered phases:
//! 1. Delete every OSTree repository
//! 2. Delete every OSTree distribution
//! 3. Request an orphan cleanup with zero protection time
//! 4. Poll the cleanup task until it leaves `waiting`/`running`
//!
//! Deletion tasks are not awaited; the server processes them on its own.
//! The first error from any call aborts the run.

use std::sync::Arc;
use std::time::Duration;

use colored::*;
use purge_client::PulpApi;
use purge_core::domain::resource::{Distribution, Repository};
use purge_core::domain::task::{Task, TaskError, TaskRef, TaskState};
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::config::{Config, DEFAULT_POLL_INTERVAL};
use crate::error::{PurgeError, Result};

/// Protection window sent with every orphan cleanup
pub const ORPHAN_PROTECTION_TIME: u32 = 0;

/// What a completed purge did
#[derive(Debug, Clone)]
pub struct PurgeSummary {
    pub repository_tasks: Vec<TaskRef>,
    pub distribution_tasks: Vec<TaskRef>,
    pub cleanup_task: TaskRef,
    pub final_task: Task,
}

/// What a purge would delete
#[derive(Debug, Clone)]
pub struct PurgePlan {
    pub repositories: Vec<Repository>,
    pub distributions: Vec<Distribution>,
}

/// Sequential purge driver
pub struct Purger {
    api: Arc<dyn PulpApi>,
    poll_interval: Duration,
    task_timeout: Option<Duration>,
}

impl Purger {
    /// Creates a purger with the default 2 second poll interval and no deadline
    pub fn new(api: Arc<dyn PulpApi>) -> Self {
        Self {
            api,
            poll_interval: DEFAULT_POLL_INTERVAL,
            task_timeout: None,
        }
    }

    /// Creates a purger using the polling settings from `config`
    pub fn from_config(api: Arc<dyn PulpApi>, config: &Config) -> Self {
        Self::new(api)
            .with_poll_interval(config.poll_interval)
            .with_task_timeout(config.task_timeout)
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_task_timeout(mut self, task_timeout: Option<Duration>) -> Self {
        self.task_timeout = task_timeout;
        self
    }

    /// Runs all four phases in order
    pub async fn run(&self) -> Result<PurgeSummary> {
        info!("Starting purge");

        let repository_tasks = self.delete_repositories().await?;
        let distribution_tasks = self.delete_distributions().await?;
        let cleanup_task = self.trigger_orphan_cleanup().await?;
        let final_task = self.await_task(&cleanup_task).await?;

        if !final_task.state.is_success() {
            warn!(
                "Cleanup task {} ended in state {}",
                final_task.pulp_href, final_task.state
            );
            return Err(PurgeError::TaskFailed {
                href: cleanup_task.href().to_string(),
                state: final_task.state,
                detail: final_task.error.as_ref().map(describe_task_error),
            });
        }

        info!("Purge finished");

        Ok(PurgeSummary {
            repository_tasks,
            distribution_tasks,
            cleanup_task,
            final_task,
        })
    }

    /// Lists everything a purge would delete, without deleting it
    pub async fn plan(&self) -> Result<PurgePlan> {
        let repositories = self.list_repositories().await?;
        let distributions = self.list_distributions().await?;

        Ok(PurgePlan {
            repositories,
            distributions,
        })
    }

    // =============================================================================
    // Phases
    // =============================================================================

    /// Phase 1: delete every repository in list order
    pub async fn delete_repositories(&self) -> Result<Vec<TaskRef>> {
        println!("{}", "Deleting repositories".bold());

        let repositories = self.list_repositories().await?;
        print_count(repositories.len(), "repository", "repositories");

        let mut tasks = Vec::with_capacity(repositories.len());
        for repo in repositories {
            let task = self
                .api
                .delete_repository(&repo.pulp_href)
                .await
                .map_err(|e| {
                    PurgeError::api(
                        format!("delete repository '{}' ({})", repo.name, repo.pulp_href),
                        e,
                    )
                })?;

            print_deleted(&repo.name, &task);
            tasks.push(task);
        }

        Ok(tasks)
    }

    /// Phase 2: delete every distribution in list order
    pub async fn delete_distributions(&self) -> Result<Vec<TaskRef>> {
        println!("{}", "Deleting distributions".bold());

        let distributions = self.list_distributions().await?;
        print_count(distributions.len(), "distribution", "distributions");

        let mut tasks = Vec::with_capacity(distributions.len());
        for dist in distributions {
            let task = self
                .api
                .delete_distribution(&dist.pulp_href)
                .await
                .map_err(|e| {
                    PurgeError::api(
                        format!("delete distribution '{}' ({})", dist.name, dist.pulp_href),
                        e,
                    )
                })?;

            print_deleted(&dist.name, &task);
            tasks.push(task);
        }

        Ok(tasks)
    }

    /// Phase 3: request removal of unreferenced content
    pub async fn trigger_orphan_cleanup(&self) -> Result<TaskRef> {
        println!("{}", "Cleaning up orphaned content".bold());

        let task = self
            .api
            .cleanup_orphans(ORPHAN_PROTECTION_TIME)
            .await
            .map_err(|e| PurgeError::api("trigger orphan cleanup", e))?;

        info!("Orphan cleanup task: {}", task);
        println!("  {} {}", "task:".dimmed(), task);

        Ok(task)
    }

    /// Phase 4: poll a task until it is no longer waiting or running
    ///
    /// Every read prints the current state. Without a deadline this waits
    /// for as long as the server keeps the task pending.
    pub async fn await_task(&self, task: &TaskRef) -> Result<Task> {
        let started = Instant::now();

        loop {
            let current = self
                .api
                .get_task(task.href())
                .await
                .map_err(|e| PurgeError::api(format!("read task {}", task), e))?;

            print_task_state(task, current.state);

            if !current.state.is_pending() {
                if let Some(elapsed) = current.duration() {
                    debug!("Task {} ran for {}s", task, elapsed.num_seconds());
                }
                return Ok(current);
            }

            let mut pause = self.poll_interval;
            if let Some(limit) = self.task_timeout {
                let waited = started.elapsed();
                if waited >= limit {
                    return Err(PurgeError::Timeout {
                        href: task.href().to_string(),
                        state: current.state,
                        waited,
                    });
                }
                // Never sleep past the deadline
                pause = pause.min(limit - waited);
            }

            time::sleep(pause).await;
        }
    }

    // =============================================================================
    // Listing
    // =============================================================================

    async fn list_repositories(&self) -> Result<Vec<Repository>> {
        let repositories = self
            .api
            .list_repositories()
            .await
            .map_err(|e| PurgeError::api("list repositories", e))?;
        info!("Found {} repositories", repositories.len());
        Ok(repositories)
    }

    async fn list_distributions(&self) -> Result<Vec<Distribution>> {
        let distributions = self
            .api
            .list_distributions()
            .await
            .map_err(|e| PurgeError::api("list distributions", e))?;
        info!("Found {} distributions", distributions.len());
        Ok(distributions)
    }
}

/// Pulls the human-readable part out of a task's error payload
fn describe_task_error(error: &TaskError) -> String {
    error
        .get("description")
        .and_then(|d| d.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string())
}

// =============================================================================
// Output
// =============================================================================

fn print_count(count: usize, singular: &str, plural: &str) {
    if count == 0 {
        println!("  {}", format!("No {} found.", plural).yellow());
    } else {
        let noun = if count == 1 { singular } else { plural };
        println!("  Found {} {}", count, noun);
    }
}

fn print_deleted(name: &str, task: &TaskRef) {
    println!("  {} {} {} {}", "✓".green(), name, "->".dimmed(), task);
}

fn print_task_state(task: &TaskRef, state: TaskState) {
    let label = match state {
        TaskState::Completed => state.as_str().green(),
        TaskState::Failed | TaskState::Canceled | TaskState::Canceling => state.as_str().red(),
        TaskState::Waiting | TaskState::Running => state.as_str().yellow(),
        TaskState::Skipped | TaskState::Unknown => state.as_str().normal(),
    };
    println!("  {} {}", format!("{}:", task).dimmed(), label);
}

/// Prints the outcome of a finished purge
pub fn print_summary(summary: &PurgeSummary) {
    println!();
    println!("{}", "Purge complete".green().bold());
    println!("  Repositories deleted:  {}", summary.repository_tasks.len());
    println!("  Distributions deleted: {}", summary.distribution_tasks.len());
    match summary.final_task.duration() {
        Some(d) => println!(
            "  Orphan cleanup:        {} ({}s, {})",
            summary.final_task.state,
            d.num_seconds(),
            summary.cleanup_task
        ),
        None => println!(
            "  Orphan cleanup:        {} ({})",
            summary.final_task.state, summary.cleanup_task
        ),
    }
}

/// Prints what a purge would delete
pub fn print_plan(plan: &PurgePlan) {
    println!("{}", "Dry run: nothing will be deleted".yellow().bold());
    println!();

    println!("{}", format!("{} repository(ies):", plan.repositories.len()).bold());
    for repo in &plan.repositories {
        println!("  {} {}", repo.name, repo.pulp_href.dimmed());
    }

    println!("{}", format!("{} distribution(s):", plan.distributions.len()).bold());
    for dist in &plan.distributions {
        println!("  {} {}", dist.name, dist.pulp_href.dimmed());
    }

    println!();
    println!(
        "An orphan cleanup with protection time {} would follow.",
        ORPHAN_PROTECTION_TIME
    );
}
