// Table validation for composed artifacts.
//
// Reads the artifact text back and proves what dispatch relies on:
// T1: the mode's table module is present
// T2: arity markers are exactly 1..=N, increasing, no gaps or repeats
// T3: every decomposition in the entry for k binds _001.._k, in order
// T4: the published maximum equals N

use crate::emit_arity::Mode;
use crate::emit_header::max_constant;
use crate::error::GenError;
use crate::ident::binding_idents;
use regex::Regex;
use std::sync::LazyLock;

static ARITY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^    // arity (\d+)$").expect("valid marker regex"));

static DECOMPOSITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"let \(([^)]*)\) = self;").expect("valid decomposition regex"));

static VISIT_MAX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"pub const MAX_VISIT_MEMBERS: usize = (\d+);").expect("valid constant regex")
});

static TIE_MAX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"pub const MAX_TIE_MEMBERS: usize = (\d+);").expect("valid constant regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    pub mode: Mode,
    pub entries: usize,
    /// Decomposition patterns checked across all entries.
    pub decompositions: usize,
}

/// Validate the `mode` table inside `text` against maximum arity `n`.
pub fn validate_artifact(text: &str, mode: Mode, n: usize) -> Result<TableReport, GenError> {
    let table = table_section(text, mode)?;

    let markers: Vec<(usize, usize)> = ARITY_MARKER
        .captures_iter(table)
        .map(|caps| {
            let whole = caps.get(0).map(|m| m.start()).unwrap_or(0);
            let k = caps[1].parse::<usize>().unwrap_or(0);
            (whole, k)
        })
        .collect();

    let found: Vec<usize> = markers.iter().map(|(_, k)| *k).collect();
    let expected: Vec<usize> = (1..=n).collect();
    if found != expected {
        return Err(GenError::TableInconsistency(format!(
            "{mode} table has arities {} but expected 1..={n}",
            summarize(&found)
        )));
    }

    let per_entry = match mode {
        Mode::Visit => 3,
        Mode::Tie => 1,
    };
    let mut decompositions = 0;
    for (idx, (start, k)) in markers.iter().enumerate() {
        let end = markers.get(idx + 1).map(|(s, _)| *s).unwrap_or(table.len());
        let entry = &table[*start..end];
        let expected_bindings = binding_idents(*k);

        let mut count = 0;
        for caps in DECOMPOSITION.captures_iter(entry) {
            let bindings: Vec<&str> = caps[1]
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            if bindings != expected_bindings {
                return Err(GenError::TableInconsistency(format!(
                    "{mode} entry {k} binds {} identifiers, expected {k} in field order",
                    bindings.len()
                )));
            }
            count += 1;
        }
        if count != per_entry {
            return Err(GenError::TableInconsistency(format!(
                "{mode} entry {k} has {count} decompositions, expected {per_entry}"
            )));
        }
        decompositions += count;
    }

    let constant = max_constant(mode);
    let published_max = match mode {
        Mode::Visit => &VISIT_MAX,
        Mode::Tie => &TIE_MAX,
    };
    let published = published_max
        .captures(text)
        .and_then(|caps| caps[1].parse::<usize>().ok());
    if published != Some(n) {
        return Err(GenError::TableInconsistency(format!(
            "{constant} is {published:?}, expected {n}"
        )));
    }

    Ok(TableReport {
        mode,
        entries: markers.len(),
        decompositions,
    })
}

// Text between the table module's opening line and the published constant.
fn table_section(text: &str, mode: Mode) -> Result<&str, GenError> {
    let open = format!("pub mod {} {{\n", mode.table_module());
    let start = text.find(&open).ok_or_else(|| {
        GenError::TableInconsistency(format!("missing {} module", mode.table_module()))
    })?;
    let rest = &text[start + open.len()..];
    let close = format!("pub const {}", max_constant(mode));
    let end = rest.find(&close).ok_or_else(|| {
        GenError::TableInconsistency(format!("missing {}", max_constant(mode)))
    })?;
    Ok(&rest[..end])
}

fn summarize(arities: &[usize]) -> String {
    if arities.len() <= 8 {
        return format!("{arities:?}");
    }
    format!(
        "[{}, {}, .., {}] ({} entries)",
        arities[0],
        arities[1],
        arities[arities.len() - 1],
        arities.len()
    )
}
