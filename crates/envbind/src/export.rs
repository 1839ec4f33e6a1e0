//! The reverse serialization: tree → `KEY=value` lines.
//!
//! Every leaf with a declared key serializes, whatever its report policy —
//! redaction belongs to the report pass only. Lines come out in traversal
//! order, and a key declared twice in the tree yields two lines.

use crate::walk::EnvBind;

/// Serializes every keyed leaf of `tree` back to `KEY=value` strings.
#[must_use]
pub fn to_env<T: EnvBind>(tree: &T) -> Vec<String> {
    let mut lines = Vec::new();
    tree.export_fields(&mut lines);
    lines
}
