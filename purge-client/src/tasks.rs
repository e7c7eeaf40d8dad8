//! Orphan cleanup and task endpoints

use crate::PulpClient;
use crate::error::Result;
use purge_core::domain::task::{Task, TaskRef};
use purge_core::dto::{OrphansCleanup, TaskResponse};
use reqwest::Method;

impl PulpClient {
    /// Request removal of all content not referenced by any repository
    ///
    /// # Arguments
    /// * `protection_time` - Grace window in minutes; 0 makes every orphan eligible
    ///
    /// # Returns
    /// Reference to the cleanup task
    pub async fn request_orphan_cleanup(&self, protection_time: u32) -> Result<TaskRef> {
        let url = self.endpoint_url("orphans/cleanup/");
        let response = self
            .request(Method::POST, &url)
            .json(&OrphansCleanup {
                orphan_protection_time: protection_time,
            })
            .send()
            .await?;

        let body: TaskResponse = self.handle_response(response).await?;
        Ok(body.task)
    }

    /// Read the current record of a task
    pub async fn read_task(&self, href: &str) -> Result<Task> {
        let url = self.href_url(href)?;
        let response = self.request(Method::GET, &url).send().await?;

        self.handle_response(response).await
    }
}
