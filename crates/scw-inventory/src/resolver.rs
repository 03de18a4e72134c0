//! `--host` mode: per-host Ansible variables.
//!
//! Every host except the gateway is reached through an SSH `ProxyCommand`
//! hop on the gateway's public address. The gateway itself is flagged with
//! `proxy_inet` and connected to directly.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::InventoryError;
use crate::naming::{self, NamePattern};
use crate::providers::Directory;

/// Variable name to value.
pub type HostVars = IndexMap<String, String>;

/// Server every SSH session is relayed through.
pub const GATEWAY_HOST: &str = "proxy0";

/// Interpreter Ansible runs modules with.
pub const PYTHON_INTERPRETER: &str = "/usr/bin/python3";

/// Remote login user.
pub const ANSIBLE_USER: &str = "root";

/// Private key used for the gateway hop.
pub const GATEWAY_KEY_PATH: &str = "~/.ssh/scaleway.pem";

/// SSH options shared by every host.
pub const SSH_COMMON_ARGS: &str = "-o ControlMaster=auto -o ControlPersist=5m -o ForwardAgent=yes \
                                   -o StrictHostKeyChecking=no -o UserKnownHostsFile=/dev/null";

/// `ProxyCommand` option relaying through `gateway_ip`.
#[must_use]
pub fn proxy_command(gateway_ip: &str) -> String {
    format!(
        "-o ProxyCommand=\"ssh -W %h:%p -q {ANSIBLE_USER}@{gateway_ip} -i {GATEWAY_KEY_PATH}\""
    )
}

/// Derive the Ansible variables for `name`.
///
/// # Errors
/// - `InvalidName` if `name` fails `pattern`; no directory call is made.
/// - `NotFound` / `DirectoryUnavailable` if a lookup fails.
/// - `GatewayUnreachable` if a relayed host's gateway has no public address.
pub async fn resolve_host(
    name: &str,
    pattern: &NamePattern,
    directory: &dyn Directory,
) -> Result<HostVars, InventoryError> {
    if !pattern.matches(name) {
        return Err(InventoryError::InvalidName(name.to_string()));
    }

    let gateway = directory.find_server_by_name(GATEWAY_HOST).await?;

    let mut vars = HostVars::new();
    vars.insert(
        "ansible_python_interpreter".to_string(),
        PYTHON_INTERPRETER.to_string(),
    );
    vars.insert("ansible_user".to_string(), ANSIBLE_USER.to_string());

    let mut ssh_args = SSH_COMMON_ARGS.to_string();
    let server = if name == GATEWAY_HOST {
        vars.insert("proxy_inet".to_string(), "True".to_string());
        gateway
    } else {
        let server = directory.find_server_by_name(name).await?;
        let gateway_ip = gateway
            .public_ip
            .as_deref()
            .filter(|ip| !ip.is_empty())
            .ok_or_else(|| InventoryError::GatewayUnreachable(GATEWAY_HOST.to_string()))?;
        ssh_args.push(' ');
        ssh_args.push_str(&proxy_command(gateway_ip));
        server
    };
    vars.insert("ansible_ssh_common_args".to_string(), ssh_args);
    vars.insert(
        "ansible_host".to_string(),
        server.reachable_address().to_string(),
    );

    match naming::vpn_ip(&server.name) {
        Some(ip) => {
            vars.insert("vpn_ip".to_string(), ip);
        }
        None => debug!(name = %server.name, "No VPN address for server"),
    }

    info!(name = %name, server_id = %server.id, "Resolved host variables");
    Ok(vars)
}
