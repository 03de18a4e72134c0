//! JSON output for Ansible.

use std::io::Write;

use serde::Serialize;

use crate::error::InventoryError;

/// Render a result as a single-line JSON document.
///
/// # Errors
/// Returns `InventoryError::Serialization` if encoding fails.
pub fn render<T: Serialize>(value: &T) -> Result<String, InventoryError> {
    Ok(serde_json::to_string(value)?)
}

/// Render `value` and write it, newline terminated, to `out`.
///
/// Nothing is written unless encoding succeeds.
///
/// # Errors
/// Returns `InventoryError::Serialization` on encoding or write failure.
pub fn write_json<T: Serialize, W: Write>(value: &T, mut out: W) -> Result<(), InventoryError> {
    let json = render(value)?;
    writeln!(out, "{json}")
        .and_then(|()| out.flush())
        .map_err(|e| InventoryError::Serialization(serde_json::Error::io(e)))
}
