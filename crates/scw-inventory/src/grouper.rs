//! `--list` mode: servers grouped by tag.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::InventoryError;
use crate::naming::NamePattern;
use crate::providers::{Directory, Server};

/// Tag to server names, in discovery order.
pub type Groups = IndexMap<String, Vec<String>>;

/// Group allowed servers under each of their tags.
///
/// Servers whose name fails `pattern` are skipped; untagged servers
/// contribute nothing.
#[must_use]
pub fn group_by_tag(servers: &[Server], pattern: &NamePattern) -> Groups {
    let mut groups = Groups::new();

    for server in servers {
        if !pattern.matches(&server.name) {
            debug!(name = %server.name, "Skipping server with disallowed name");
            continue;
        }
        for tag in &server.tags {
            groups
                .entry(tag.clone())
                .or_default()
                .push(server.name.clone());
        }
    }

    groups
}

/// Fetch every server from `directory` and group it by tag.
///
/// # Errors
/// Returns the directory failure; no partial grouping is produced.
pub async fn list_inventory(
    directory: &dyn Directory,
    pattern: &NamePattern,
) -> Result<Groups, InventoryError> {
    let servers = directory.list_servers().await?;
    let groups = group_by_tag(&servers, pattern);
    info!(
        servers = servers.len(),
        groups = groups.len(),
        "Built inventory"
    );
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderError;

    fn server(name: &str, tags: &[&str]) -> Server {
        Server {
            id: format!("id-{name}"),
            name: name.to_string(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            public_ip: None,
            private_ip: "10.0.0.1".to_string(),
        }
    }

    #[test]
    fn test_server_listed_under_every_tag() {
        let servers = vec![
            server("master1", &["k8s", "master"]),
            server("worker1", &["k8s", "worker"]),
            server("worker2", &["k8s", "worker"]),
        ];
        let groups = group_by_tag(&servers, &NamePattern::default());

        assert_eq!(groups["k8s"], vec!["master1", "worker1", "worker2"]);
        assert_eq!(groups["master"], vec!["master1"]);
        assert_eq!(groups["worker"], vec!["worker1", "worker2"]);
        assert_eq!(
            groups.keys().collect::<Vec<_>>(),
            vec!["k8s", "master", "worker"]
        );
    }

    #[test]
    fn test_untagged_servers_dropped() {
        let servers = vec![server("proxy0", &[]), server("master1", &["k8s"])];
        let groups = group_by_tag(&servers, &NamePattern::default());

        assert_eq!(groups.len(), 1);
        assert!(groups.values().all(|names| !names.contains(&"proxy0".to_string())));
    }

    #[test]
    fn test_disallowed_names_never_grouped() {
        let pattern = NamePattern::new("^(proxy|master|worker)[0-9]$").unwrap();
        let servers = vec![
            server("worker1", &["k8s"]),
            server("scratch box", &["k8s", "scratch"]),
        ];
        let groups = group_by_tag(&servers, &pattern);

        assert_eq!(groups["k8s"], vec!["worker1"]);
        assert!(!groups.contains_key("scratch"));
    }

    #[test]
    fn test_empty_listing() {
        assert!(group_by_tag(&[], &NamePattern::default()).is_empty());
    }

    struct StaticDirectory(Vec<Server>);

    #[async_trait::async_trait]
    impl Directory for StaticDirectory {
        async fn list_servers(&self) -> Result<Vec<Server>, ProviderError> {
            Ok(self.0.clone())
        }

        async fn server_id_by_name(&self, name: &str) -> Result<String, ProviderError> {
            Err(ProviderError::NotFound(name.to_string()))
        }

        async fn get_server(&self, id: &str) -> Result<Server, ProviderError> {
            Err(ProviderError::NotFound(id.to_string()))
        }
    }

    struct DownDirectory;

    #[async_trait::async_trait]
    impl Directory for DownDirectory {
        async fn list_servers(&self) -> Result<Vec<Server>, ProviderError> {
            Err(ProviderError::Api {
                status: 503,
                message: "maintenance".to_string(),
            })
        }

        async fn server_id_by_name(&self, name: &str) -> Result<String, ProviderError> {
            Err(ProviderError::NotFound(name.to_string()))
        }

        async fn get_server(&self, id: &str) -> Result<Server, ProviderError> {
            Err(ProviderError::NotFound(id.to_string()))
        }
    }

    #[tokio::test]
    async fn test_list_inventory_is_reproducible() {
        let dir = StaticDirectory(vec![
            server("worker2", &["worker", "k8s"]),
            server("master1", &["k8s"]),
            server("proxy0", &["edge"]),
        ]);
        let pattern = NamePattern::default();

        let first = crate::output::render(&list_inventory(&dir, &pattern).await.unwrap()).unwrap();
        let second = crate::output::render(&list_inventory(&dir, &pattern).await.unwrap()).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first,
            r#"{"worker":["worker2"],"k8s":["worker2","master1"],"edge":["proxy0"]}"#
        );
    }

    #[tokio::test]
    async fn test_list_inventory_directory_failure() {
        let err = list_inventory(&DownDirectory, &NamePattern::default())
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::DirectoryUnavailable(_)));
    }
}
