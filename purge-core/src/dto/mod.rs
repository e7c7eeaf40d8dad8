//! Data Transfer Objects for the Pulp REST API
//!
//! Envelopes the API wraps around domain types, and request bodies the
//! client sends.

use serde::{Deserialize, Serialize};

use crate::domain::task::TaskRef;

/// One page of a paginated list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Response of any call that spawns a task (deletes, orphan cleanup)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    pub task: TaskRef,
}

/// Orphan cleanup request body
///
/// `orphan_protection_time` is the grace window in minutes; content orphaned
/// more recently than this is kept. Zero makes every orphan eligible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrphansCleanup {
    pub orphan_protection_time: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resource::Repository;

    #[test]
    fn test_page_decodes() {
        let json = r#"{
            "count": 2,
            "next": "http://pulp/pulp/api/v3/repositories/ostree/ostree/?limit=1&offset=1",
            "previous": null,
            "results": [{"pulp_href": "/r1", "name": "r1"}]
        }"#;

        let page: Page<Repository> = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, 2);
        assert!(page.next.is_some());
        assert_eq!(page.results, vec![Repository::new("r1", "/r1")]);
    }

    #[test]
    fn test_task_response_decodes() {
        let resp: TaskResponse =
            serde_json::from_str(r#"{"task": "/pulp/api/v3/tasks/9/"}"#).unwrap();
        assert_eq!(resp.task.href(), "/pulp/api/v3/tasks/9/");
    }

    #[test]
    fn test_orphans_cleanup_body() {
        let body = serde_json::to_value(OrphansCleanup {
            orphan_protection_time: 0,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"orphan_protection_time": 0}));
    }
}
