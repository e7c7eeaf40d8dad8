//! Capability trait over the Pulp API
//!
//! The purge logic only depends on this trait. [`PulpClient`] implements it
//! over HTTP; tests implement it in memory.

use async_trait::async_trait;
use purge_core::domain::resource::{Distribution, Repository};
use purge_core::domain::task::{Task, TaskRef};

use crate::PulpClient;
use crate::error::Result;

/// Operations a purge needs from a Pulp server
#[async_trait]
pub trait PulpApi: Send + Sync {
    /// Lists all OSTree repositories
    async fn list_repositories(&self) -> Result<Vec<Repository>>;

    /// Deletes a repository, returning the spawned task
    async fn delete_repository(&self, href: &str) -> Result<TaskRef>;

    /// Lists all OSTree distributions
    async fn list_distributions(&self) -> Result<Vec<Distribution>>;

    /// Deletes a distribution, returning the spawned task
    async fn delete_distribution(&self, href: &str) -> Result<TaskRef>;

    /// Starts an orphan cleanup with the given protection time
    async fn cleanup_orphans(&self, protection_time: u32) -> Result<TaskRef>;

    /// Reads a task's current state
    async fn get_task(&self, href: &str) -> Result<Task>;
}

#[async_trait]
impl PulpApi for PulpClient {
    async fn list_repositories(&self) -> Result<Vec<Repository>> {
        self.list_ostree_repositories().await
    }

    async fn delete_repository(&self, href: &str) -> Result<TaskRef> {
        self.delete_ostree_repository(href).await
    }

    async fn list_distributions(&self) -> Result<Vec<Distribution>> {
        self.list_ostree_distributions().await
    }

    async fn delete_distribution(&self, href: &str) -> Result<TaskRef> {
        self.delete_ostree_distribution(href).await
    }

    async fn cleanup_orphans(&self, protection_time: u32) -> Result<TaskRef> {
        self.request_orphan_cleanup(protection_time).await
    }

    async fn get_task(&self, href: &str) -> Result<Task> {
        self.read_task(href).await
    }
}
