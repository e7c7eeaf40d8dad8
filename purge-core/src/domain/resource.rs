//! Repository and distribution domain types

use serde::{Deserialize, Serialize};

/// An OSTree repository on the Pulp server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub pulp_href: String,
    pub name: String,
}

/// An OSTree distribution on the Pulp server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    pub pulp_href: String,
    pub name: String,
}

impl Repository {
    pub fn new(name: impl Into<String>, pulp_href: impl Into<String>) -> Self {
        Self {
            pulp_href: pulp_href.into(),
            name: name.into(),
        }
    }
}

impl Distribution {
    pub fn new(name: impl Into<String>, pulp_href: impl Into<String>) -> Self {
        Self {
            pulp_href: pulp_href.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_ignores_extra_fields() {
        let json = r#"{
            "pulp_href": "/pulp/api/v3/repositories/ostree/ostree/0189/",
            "pulp_created": "2024-01-01T00:00:00Z",
            "name": "fedora-iot",
            "retain_repo_versions": null
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "fedora-iot");
        assert_eq!(repo.pulp_href, "/pulp/api/v3/repositories/ostree/ostree/0189/");
    }

    #[test]
    fn test_distribution_new() {
        let dist = Distribution::new("d1", "/d1");
        assert_eq!(dist.name, "d1");
        assert_eq!(dist.pulp_href, "/d1");
    }
}
