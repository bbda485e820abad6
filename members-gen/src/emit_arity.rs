// Emit the table entry for one arity.
//
// INVARIANT:
// - Every entry starts with an `// arity k` marker line; the table validator
//   keys on it.
// - Decomposition is always `let (_001, .., _k) = self;` on the member tuple.
//   The tuple's element types carry ownership (`T`, `&T`, `&mut T`), so the
//   bindings keep whatever category the receiver produced.

use crate::ident::{binding_idents, render_list, render_tuple, type_params};

/// What the decomposed bindings are used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Forward the bindings to a callable.
    Visit,
    /// Return the bindings as a tuple of `&mut` aliases.
    Tie,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Visit, Mode::Tie];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Visit => "visit",
            Mode::Tie => "tie",
        }
    }

    /// Module that holds this mode's table in the artifact.
    pub fn table_module(self) -> &'static str {
        match self {
            Mode::Visit => "visit_table",
            Mode::Tie => "tie_table",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// Entries are emitted one level deep inside the table module.
const ITEM: &str = "    ";
const HEADER_WRAP: &str = "        ";
const BODY_WRAP: &str = "            ";

pub fn arity_marker(k: usize) -> String {
    format!("{ITEM}// arity {k}\n")
}

/// Render the table entry for `(mode, k)`.
pub fn emit_procedure(mode: Mode, k: usize) -> String {
    assert!(k >= 1, "arity must be at least 1");
    match mode {
        Mode::Visit => emit_visit(k),
        Mode::Tie => emit_tie(k),
    }
}

/// The shared decomposition step: bind every member of `self` in order.
fn emit_decomposition(k: usize) -> String {
    format!(
        "{ITEM}{ITEM}{ITEM}let {} = self;\n",
        render_tuple(&binding_idents(k), BODY_WRAP)
    )
}

fn generics(prefix: &[&str], k: usize) -> String {
    let mut params: Vec<String> = prefix.iter().map(|p| p.to_string()).collect();
    params.extend(type_params(k));
    render_list(&params, HEADER_WRAP)
}

fn tuple_of(k: usize, element: impl Fn(&str) -> String) -> String {
    let elements: Vec<String> = type_params(k).iter().map(|t| element(t.as_str())).collect();
    render_tuple(&elements, HEADER_WRAP)
}

fn emit_visit(k: usize) -> String {
    let owned = tuple_of(k, |t| t.to_string());
    let shared = tuple_of(k, |t| format!("&'a {t}"));
    let unique = tuple_of(k, |t| format!("&'a mut {t}"));
    let bindings = binding_idents(k);
    let plain = generics(&[], k);
    let with_lifetime = generics(&["'a"], k);
    let decompose = emit_decomposition(k);
    let rebuilt = render_tuple(&bindings, BODY_WRAP);

    let mut out = arity_marker(k);

    out.push_str(&format!(
        "{ITEM}impl<{plain}> MemberTuple for {owned} {{\n\
         {ITEM}    const COUNT: usize = {k};\n\
         {ITEM}}}\n\n"
    ));

    out.push_str(&format!(
        "{ITEM}impl<{plain}> Decompose for {owned} {{\n\
         {ITEM}    const MEMBER_COUNT: usize = {k};\n\
         {ITEM}    type Members = Self;\n\n\
         {ITEM}    #[inline]\n\
         {ITEM}    fn decompose(self) -> Self {{\n\
         {ITEM}        self\n\
         {ITEM}    }}\n\
         {ITEM}}}\n\n"
    ));

    let references = [
        (format!("&'a {owned}"), &shared),
        (format!("&'a mut {owned}"), &unique),
    ];
    for (receiver, members) in references {
        out.push_str(&format!(
            "{ITEM}impl<{with_lifetime}> Decompose for {receiver} {{\n\
             {ITEM}    const MEMBER_COUNT: usize = {k};\n\
             {ITEM}    type Members = {members};\n\n\
             {ITEM}    #[inline]\n\
             {ITEM}    fn decompose(self) -> Self::Members {{\n\
             {decompose}\
             {ITEM}        {rebuilt}\n\
             {ITEM}    }}\n\
             {ITEM}}}\n\n"
        ));
    }

    let args = render_list(&type_params(k), HEADER_WRAP);
    let call = render_list(&bindings, BODY_WRAP);
    let visit_generics = generics(&["F", "R"], k);
    out.push_str(&format!(
        "{ITEM}impl<{visit_generics}> VisitMembers<F> for {owned}\n\
         {ITEM}where\n\
         {ITEM}    F: FnOnce({args}) -> R,\n\
         {ITEM}{{\n\
         {ITEM}    type Output = R;\n\n\
         {ITEM}    #[inline]\n\
         {ITEM}    fn visit_members(self, f: F) -> R {{\n\
         {decompose}\
         {ITEM}        f({call})\n\
         {ITEM}    }}\n\
         {ITEM}}}\n"
    ));

    out
}

fn emit_tie(k: usize) -> String {
    let unique = tuple_of(k, |t| format!("&'a mut {t}"));
    let with_lifetime = generics(&["'a"], k);
    let decompose = emit_decomposition(k);
    let tied = render_tuple(&binding_idents(k), BODY_WRAP);

    let mut out = arity_marker(k);
    out.push_str(&format!(
        "{ITEM}impl<{with_lifetime}> TieMembers for {unique} {{\n\
         {ITEM}    type Tied = {unique};\n\n\
         {ITEM}    #[inline]\n\
         {ITEM}    fn tie_members(self) -> Self::Tied {{\n\
         {decompose}\
         {ITEM}        {tied}\n\
         {ITEM}    }}\n\
         {ITEM}}}\n"
    ));
    out
}
