//! Server naming conventions.
//!
//! Servers are named `<class><n>` (`proxy0`, `master1`, `worker3`, ...).
//! The class and the trailing digit determine the address a host gets on
//! the `192.168.66.0/24` VPN overlay.

use regex::Regex;

use crate::error::InventoryError;

/// Default allowed server name: hostname-like labels.
pub const DEFAULT_NAME_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9._-]*$";

/// VPN overlay network prefix.
const VPN_NETWORK: &str = "192.168.66";

/// Class substrings and their VPN octet prefix, in match priority order.
const CLASS_TABLE: &[(NameClass, &str, char)] = &[
    (NameClass::Proxy, "proxy", '1'),
    (NameClass::Master, "master", '2'),
    (NameClass::Worker, "worker", '3'),
];

/// Compiled allowed-name pattern.
#[derive(Debug, Clone)]
pub struct NamePattern(Regex);

impl NamePattern {
    /// Compile a name pattern.
    ///
    /// # Errors
    /// Returns `InventoryError::Config` if the expression does not compile.
    pub fn new(pattern: &str) -> Result<Self, InventoryError> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|e| InventoryError::Config(format!("invalid name pattern '{pattern}': {e}")))
    }

    /// Whether `name` is an allowed server name.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.0.is_match(name)
    }

    /// The source expression.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for NamePattern {
    fn default() -> Self {
        Self(Regex::new(DEFAULT_NAME_PATTERN).expect("default name pattern compiles"))
    }
}

/// Role of a server, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameClass {
    /// SSH gateway / ingress.
    Proxy,
    /// Control plane node.
    Master,
    /// Worker node.
    Worker,
}

impl NameClass {
    /// Classify a name by substring, checking `proxy`, `master`, `worker` in order.
    #[must_use]
    pub fn classify(name: &str) -> Option<Self> {
        CLASS_TABLE
            .iter()
            .find(|(_, needle, _)| name.contains(needle))
            .map(|(class, _, _)| *class)
    }

    /// Leading digit of the last VPN octet for this class.
    #[must_use]
    pub fn octet_prefix(self) -> char {
        CLASS_TABLE
            .iter()
            .find(|(class, _, _)| *class == self)
            .map_or('0', |(_, _, prefix)| *prefix)
    }
}

/// Derive the VPN address of a server from its name.
///
/// Only the last character is used as host number, so `worker10` maps to
/// the same address as `worker0`. Returns `None` when the name is shorter
/// than two characters, does not end in a digit, or has no known class.
#[must_use]
pub fn vpn_ip(name: &str) -> Option<String> {
    if name.chars().count() < 2 {
        return None;
    }
    let tail = name.chars().last().filter(char::is_ascii_digit)?;
    let class = NameClass::classify(name)?;
    Some(format!("{VPN_NETWORK}.{}{tail}", class.octet_prefix()))
}
