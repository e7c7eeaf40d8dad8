//! Repository and distribution endpoints

use crate::PulpClient;
use crate::error::Result;
use purge_core::domain::resource::{Distribution, Repository};
use purge_core::domain::task::TaskRef;
use purge_core::dto::{Page, TaskResponse};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

const OSTREE_REPOSITORIES: &str = "repositories/ostree/ostree/";
const OSTREE_DISTRIBUTIONS: &str = "distributions/ostree/ostree/";

impl PulpClient {
    // =============================================================================
    // OSTree Repositories
    // =============================================================================

    /// List every OSTree repository, following pagination
    pub async fn list_ostree_repositories(&self) -> Result<Vec<Repository>> {
        self.list_all(self.endpoint_url(OSTREE_REPOSITORIES)).await
    }

    /// Delete a repository by href
    ///
    /// # Returns
    /// Reference to the deletion task spawned on the server
    pub async fn delete_ostree_repository(&self, href: &str) -> Result<TaskRef> {
        self.delete_resource(href).await
    }

    // =============================================================================
    // OSTree Distributions
    // =============================================================================

    /// List every OSTree distribution, following pagination
    pub async fn list_ostree_distributions(&self) -> Result<Vec<Distribution>> {
        self.list_all(self.endpoint_url(OSTREE_DISTRIBUTIONS)).await
    }

    /// Delete a distribution by href
    pub async fn delete_ostree_distribution(&self, href: &str) -> Result<TaskRef> {
        self.delete_resource(href).await
    }

    // =============================================================================
    // Shared helpers
    // =============================================================================

    /// Fetch a list endpoint page by page until `next` runs out
    async fn list_all<T: DeserializeOwned>(&self, first_url: String) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut next = Some(first_url);

        while let Some(url) = next {
            let response = self.request(Method::GET, &url).send().await?;
            let page: Page<T> = self.handle_response(response).await?;

            debug!(
                "Fetched {} of {} item(s) from {}",
                page.results.len(),
                page.count,
                url
            );

            items.extend(page.results);
            next = match page.next {
                Some(link) if link == url => {
                    warn!("{} lists itself as the next page; stopping", url);
                    None
                }
                link => link,
            };
        }

        Ok(items)
    }

    async fn delete_resource(&self, href: &str) -> Result<TaskRef> {
        let url = self.href_url(href)?;
        let response = self.request(Method::DELETE, &url).send().await?;
        let body: TaskResponse = self.handle_response(response).await?;

        Ok(body.task)
    }
}
