// Regression tests for table emission.
// Tests that:
// 1. Every arity 1..=N has exactly one entry, in order, per mode
// 2. Entries decompose into exactly k ordered bindings
// 3. Output is byte-identical across runs
// 4. The table validator accepts composed output and rejects damaged tables

use crate::config::GeneratorConfig;
use crate::emit_arity::{Mode, arity_marker, emit_procedure};
use crate::emit_header::{PREAMBLE, compose, compose_body, compose_combined};
use crate::error::GenError;
use crate::table::{assemble, render_table};
use crate::table_validator::validate_artifact;

fn config(n: i64) -> GeneratorConfig {
    GeneratorConfig::new(n).unwrap()
}

#[test]
fn test_visit_entry_forwards_bindings_in_order() {
    let entry = emit_procedure(Mode::Visit, 3);

    assert!(entry.starts_with("    // arity 3\n"));
    assert!(entry.contains("impl<T001, T002, T003> MemberTuple for (T001, T002, T003) {"));
    assert!(entry.contains("const COUNT: usize = 3;"));
    assert!(entry.contains("impl<'a, T001, T002, T003> Decompose for &'a (T001, T002, T003) {"));
    assert!(entry.contains("type Members = (&'a T001, &'a T002, &'a T003);"));
    assert!(
        entry.contains("impl<'a, T001, T002, T003> Decompose for &'a mut (T001, T002, T003) {")
    );
    assert!(entry.contains("type Members = (&'a mut T001, &'a mut T002, &'a mut T003);"));
    assert!(entry.contains("impl<F, R, T001, T002, T003> VisitMembers<F> for (T001, T002, T003)"));
    assert!(entry.contains("F: FnOnce(T001, T002, T003) -> R,"));
    assert!(entry.contains("let (_001, _002, _003) = self;"));
    assert!(entry.contains("f(_001, _002, _003)"));
    // The callable's result is returned as is.
    assert!(!entry.contains(".clone()"));
}

#[test]
fn test_tie_entry_returns_unique_aliases() {
    let entry = emit_procedure(Mode::Tie, 2);

    assert!(entry.starts_with("    // arity 2\n"));
    assert!(entry.contains("impl<'a, T001, T002> TieMembers for (&'a mut T001, &'a mut T002) {"));
    assert!(entry.contains("type Tied = (&'a mut T001, &'a mut T002);"));
    assert!(entry.contains("let (_001, _002) = self;"));
    assert!(entry.contains("        (_001, _002)\n"));
    assert!(!entry.contains("VisitMembers"));
}

#[test]
fn test_single_member_entries_use_tuple_syntax() {
    let visit = emit_procedure(Mode::Visit, 1);
    assert!(visit.contains("MemberTuple for (T001,) {"));
    assert!(visit.contains("Decompose for &'a (T001,) {"));
    assert!(visit.contains("type Members = (&'a T001,);"));
    assert!(visit.contains("let (_001,) = self;"));
    assert!(visit.contains("F: FnOnce(T001) -> R,"));
    assert!(visit.contains("f(_001)"));

    let tie = emit_procedure(Mode::Tie, 1);
    assert!(tie.contains("TieMembers for (&'a mut T001,) {"));
    assert!(tie.contains("        (_001,)\n"));
}

#[test]
fn test_long_binding_lists_wrap_after_twenty() {
    let entry = emit_procedure(Mode::Tie, 21);
    assert!(entry.contains("_019, _020,\n            _021) = self;"));

    let entry = emit_procedure(Mode::Tie, 20);
    assert!(entry.contains("let (_001, _002, _003, _004, _005, _006, _007, _008, _009, _010, _011, _012, _013, _014, _015, _016, _017, _018, _019, _020) = self;"));
}

#[test]
fn test_table_has_one_entry_per_arity() {
    for mode in Mode::ALL {
        let table = render_table(mode, 64);
        for k in 1..=64 {
            assert_eq!(
                table.matches(&arity_marker(k)).count(),
                1,
                "{mode} table should hold arity {k} exactly once"
            );
        }
        assert!(!table.contains(&arity_marker(65)));
        assert_eq!(assemble(mode, 64).len(), 64);
    }
}

#[test]
fn test_table_entries_are_ordered_and_blank_line_separated() {
    let entries = assemble(Mode::Visit, 5);
    for (idx, entry) in entries.iter().enumerate() {
        assert!(entry.starts_with(&arity_marker(idx + 1)));
    }
    let table = render_table(Mode::Visit, 5);
    assert_eq!(table, entries.join("\n"));
    assert!(table.contains("}\n\n    // arity 2\n"));
    assert!(!table.contains("\n\n\n"));
}

#[test]
fn test_entries_for_different_arities_are_distinct() {
    for mode in Mode::ALL {
        let entries = assemble(mode, 12);
        for (i, a) in entries.iter().enumerate() {
            for b in entries.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}

#[test]
fn test_max_arity_one_generates_single_entry() {
    for mode in Mode::ALL {
        let body = compose_body(mode, 1);
        assert_eq!(body.matches("    // arity ").count(), 1);
        assert!(body.contains(&arity_marker(1)));
    }
    let visit = compose(Mode::Visit, &config(1));
    assert!(visit.contains("pub const MAX_VISIT_MEMBERS: usize = 1;"));
    assert!(visit.contains("member_count >= 1 && member_count <= MAX_VISIT_MEMBERS"));
}

#[test]
fn test_generation_is_idempotent() {
    let config = config(64);
    for mode in Mode::ALL {
        assert_eq!(compose(mode, &config), compose(mode, &config));
    }
    assert_eq!(compose_combined(&config), compose_combined(&config));
}

#[test]
fn test_preamble_is_independent_of_arity_and_mode() {
    for n in [1, 3, 64] {
        for mode in Mode::ALL {
            assert!(compose(mode, &config(n)).starts_with(PREAMBLE));
        }
        assert!(compose_combined(&config(n)).starts_with(PREAMBLE));
    }
}

#[test]
fn test_separate_artifacts_import_their_collaborators() {
    let config = config(4)
        .with_reflect_path("crate::reflect")
        .unwrap()
        .with_visitor_path("super::members_visitor")
        .unwrap();

    let visit = compose(Mode::Visit, &config);
    assert!(visit.contains("use crate::reflect::Decompose;\n"));
    assert!(visit.contains("#[doc(hidden)]\npub mod visit_table {\n"));
    assert!(visit.contains("pub mod concepts {"));
    assert!(visit.contains("pub const fn is_decomposable<T: Decompose>() -> bool {"));
    assert!(visit.contains("pub fn visit_members<F, T>(f: F, t: T)"));
    assert!(visit.contains("pub const fn is_dispatchable<T: AccessibleAggregate>() -> bool {"));
    assert!(!visit.contains("tie_table"));

    let tie = compose(Mode::Tie, &config);
    assert!(tie.contains("use crate::reflect::Decompose;\n"));
    assert!(tie.contains("use super::members_visitor::concepts;\n"));
    assert!(tie.contains("pub const MAX_TIE_MEMBERS: usize = 4;"));
    assert!(tie.contains("pub fn tie_members<'a, T>("));
    assert!(!tie.contains("pub mod concepts"));
}

#[test]
fn test_combined_artifact_holds_both_tables_once() {
    let combined = compose_combined(&config(3));
    assert_eq!(combined.matches(PREAMBLE).count(), 1);
    assert_eq!(combined.matches("pub mod visit_table {").count(), 1);
    assert_eq!(combined.matches("pub mod tie_table {").count(), 1);
    assert_eq!(combined.matches("use crate::reflect::Decompose;").count(), 1);
    // Tie resolves `concepts` from the same module.
    assert!(!combined.contains("::concepts;"));
    assert!(
        combined.find("pub mod visit_table").unwrap() < combined.find("pub mod tie_table").unwrap()
    );
}

#[test]
fn test_validator_accepts_composed_artifacts() {
    for n in [1, 2, 3, 20, 21, 64] {
        let config = config(n);
        for mode in Mode::ALL {
            let report = validate_artifact(&compose(mode, &config), mode, n as usize).unwrap();
            assert_eq!(report.entries, n as usize);
        }
        let combined = compose_combined(&config);
        let visit = validate_artifact(&combined, Mode::Visit, n as usize).unwrap();
        let tie = validate_artifact(&combined, Mode::Tie, n as usize).unwrap();
        assert_eq!(visit.decompositions, 3 * n as usize);
        assert_eq!(tie.decompositions, n as usize);
    }
}

#[test]
fn test_validator_rejects_missing_entry() {
    let text = compose(Mode::Tie, &config(4));
    let third = emit_procedure(Mode::Tie, 3);
    let damaged = text.replacen(&format!("{third}\n"), "", 1);
    assert_ne!(damaged, text);

    let err = validate_artifact(&damaged, Mode::Tie, 4).unwrap_err();
    assert!(matches!(err, GenError::TableInconsistency(_)));
    assert!(err.to_string().contains("[1, 2, 4]"));
}

#[test]
fn test_validator_rejects_duplicate_entry() {
    let text = compose(Mode::Visit, &config(3));
    let second = emit_procedure(Mode::Visit, 2);
    let damaged = text.replacen(&second, &format!("{second}\n{second}"), 1);

    let err = validate_artifact(&damaged, Mode::Visit, 3).unwrap_err();
    assert!(err.to_string().contains("[1, 2, 2, 3]"));
}

#[test]
fn test_validator_rejects_short_decomposition() {
    let text = compose(Mode::Tie, &config(3));
    let damaged = text.replacen("let (_001, _002, _003) = self;", "let (_001, _002) = self;", 1);

    let err = validate_artifact(&damaged, Mode::Tie, 3).unwrap_err();
    assert!(err.to_string().contains("entry 3 binds 2 identifiers"));
}

#[test]
fn test_validator_rejects_mismatched_bound() {
    let text = compose(Mode::Visit, &config(3));
    let damaged = text.replace(
        "pub const MAX_VISIT_MEMBERS: usize = 3;",
        "pub const MAX_VISIT_MEMBERS: usize = 4;",
    );
    let err = validate_artifact(&damaged, Mode::Visit, 3).unwrap_err();
    assert!(err.to_string().contains("MAX_VISIT_MEMBERS"));

    // Asking for a tie table in a visit artifact fails on the missing module.
    assert!(validate_artifact(&text, Mode::Tie, 3).is_err());

    // Each mode reads its own constant out of a combined artifact.
    let combined = compose_combined(&config(3));
    let damaged = combined.replace(
        "pub const MAX_TIE_MEMBERS: usize = 3;",
        "pub const MAX_TIE_MEMBERS: usize = 2;",
    );
    validate_artifact(&damaged, Mode::Visit, 3).unwrap();
    let err = validate_artifact(&damaged, Mode::Tie, 3).unwrap_err();
    assert!(err.to_string().contains("MAX_TIE_MEMBERS is Some(2), expected 3"));
}

#[test]
fn test_entry_points_assert_the_published_gate() {
    let combined = compose_combined(&config(3));
    // Both entry points check exactly the exported predicate.
    assert_eq!(
        combined
            .matches("            concepts::is_dispatchable::<T>(),\n")
            .count(),
        2
    );
    assert!(!combined.contains("<T as concepts::AccessibleAggregate>::ACCESSIBLE,"));
    // The gate builds on the count predicate.
    assert!(combined.contains(
        "is_decomposable::<T>() && <T::Members as MemberTuple>::COUNT == T::MEMBER_COUNT;"
    ));
}
