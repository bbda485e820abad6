// Assemble the per-arity entries of one mode into an ordered table.

use crate::emit_arity::{Mode, emit_procedure};
use tracing::debug;

/// Entries for `k = 1..=n`, index `k - 1` holding arity `k`.
pub fn assemble(mode: Mode, n: usize) -> Vec<String> {
    let table: Vec<String> = (1..=n).map(|k| emit_procedure(mode, k)).collect();
    debug!(%mode, entries = table.len(), "assembled table");
    table
}

/// The table as text, entries separated by one blank line.
pub fn render_table(mode: Mode, n: usize) -> String {
    assemble(mode, n).join("\n")
}
