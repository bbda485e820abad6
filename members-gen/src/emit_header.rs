// Compose complete artifacts: preamble, internal table module, published
// bound, eligibility predicate and public entry points.
//
// INVARIANT: the table, `MAX_*_MEMBERS` and the predicate are all rendered
// from the same `n`.

use crate::config::GeneratorConfig;
use crate::emit_arity::Mode;
use crate::table::render_table;
use tracing::debug;

/// Fixed notice at the top of every artifact, independent of mode and arity.
pub const PREAMBLE: &str = "\
// @generated by members-gen. Do not edit by hand.
//
// Per-arity member tables for aggregate decomposition. Each table module
// holds one entry for every member count from 1 through the published
// maximum; the entry points below select the entry from the member tuple
// type at compile time. Change the maximum by regenerating with
// `members-gen --max-arity <N>` and commit the result.
";

/// Full text of the artifact for one mode.
pub fn compose(mode: Mode, config: &GeneratorConfig) -> String {
    let mut out = String::new();
    out.push_str(PREAMBLE);
    out.push('\n');
    out.push_str(&format!("use {}::Decompose;\n", config.reflect_path));
    if mode == Mode::Tie {
        out.push_str(&format!("use {}::concepts;\n", config.visitor_path));
    }
    out.push('\n');
    out.push_str(&compose_body(mode, config.n()));
    debug!(%mode, n = config.n(), bytes = out.len(), "composed artifact");
    out
}

/// Visit and tie tables in a single artifact sharing one preamble.
pub fn compose_combined(config: &GeneratorConfig) -> String {
    let mut out = String::new();
    out.push_str(PREAMBLE);
    out.push('\n');
    out.push_str(&format!("use {}::Decompose;\n\n", config.reflect_path));
    out.push_str(&compose_body(Mode::Visit, config.n()));
    out.push('\n');
    out.push_str(&compose_body(Mode::Tie, config.n()));
    debug!(n = config.n(), bytes = out.len(), "composed combined artifact");
    out
}

/// Everything below the imports for one mode.
pub fn compose_body(mode: Mode, n: usize) -> String {
    let module = mode.table_module();
    let support = match mode {
        Mode::Visit => VISIT_SUPPORT,
        Mode::Tie => TIE_SUPPORT,
    };
    let mut out = String::new();
    out.push_str(&format!("#[doc(hidden)]\npub mod {module} {{\n{support}\n"));
    out.push_str(&render_table(mode, n));
    out.push_str("}\n\n");
    match mode {
        Mode::Visit => out.push_str(&visit_api(n)),
        Mode::Tie => out.push_str(&tie_api(n)),
    }
    out
}

/// Name of the published bound for a mode.
pub fn max_constant(mode: Mode) -> &'static str {
    match mode {
        Mode::Visit => "MAX_VISIT_MEMBERS",
        Mode::Tie => "MAX_TIE_MEMBERS",
    }
}

const VISIT_SUPPORT: &str = "    use super::Decompose;

    /// Element count a member tuple declares for itself.
    pub trait MemberTuple {
        const COUNT: usize;
    }

    /// Forward the members of a tuple to `f` as positional arguments.
    pub trait VisitMembers<F>: MemberTuple {
        type Output;

        fn visit_members(self, f: F) -> Self::Output;
    }
";

const TIE_SUPPORT: &str = "    /// A tuple of `&mut` aliases that can be handed out as a tie.
    pub trait TieMembers {
        type Tied;

        fn tie_members(self) -> Self::Tied;
    }
";

fn visit_api(n: usize) -> String {
    format!(
        "\
/// The maximum number of members that can be visited with [`visit_members`].
pub const MAX_VISIT_MEMBERS: usize = {n};

pub mod concepts {{
    use super::visit_table::MemberTuple;
    use super::{{Decompose, MAX_VISIT_MEMBERS}};

    /// Whether an aggregate with `member_count` members has a table entry.
    pub const fn is_accessible_count(member_count: usize) -> bool {{
        member_count >= 1 && member_count <= MAX_VISIT_MEMBERS
    }}

    /// Whether `T` is covered by the generated tables, judged by its
    /// reflected member count alone.
    ///
    /// Usable with any `Decompose` type, including ones outside the table.
    /// A `true` result does not imply the entry points accept `T`: its member
    /// tuple must also have an entry with the same count. See
    /// [`is_dispatchable`].
    pub const fn is_decomposable<T: Decompose>() -> bool {{
        is_accessible_count(T::MEMBER_COUNT)
    }}

    /// The condition `visit_members` and `tie_members` assert for `T`.
    ///
    /// Implies [`is_decomposable`]. Types whose member tuple has no table
    /// entry do not satisfy the bound at all.
    pub const fn is_dispatchable<T: AccessibleAggregate>() -> bool {{
        T::ACCESSIBLE
    }}

    /// An aggregate whose member tuple has an entry in the generated tables.
    ///
    /// Implemented for every `Decompose` type whose member tuple arity is in
    /// `1..=MAX_VISIT_MEMBERS`; other types do not satisfy the bound.
    pub trait AccessibleAggregate: Decompose {{
        /// The member tuple's declared count is in range and agrees with
        /// `MEMBER_COUNT`.
        const ACCESSIBLE: bool;
    }}

    impl<T> AccessibleAggregate for T
    where
        T: Decompose,
        T::Members: MemberTuple,
    {{
        const ACCESSIBLE: bool =
            is_decomposable::<T>() && <T::Members as MemberTuple>::COUNT == T::MEMBER_COUNT;
    }}
}}

/// Invoke `f` with the members of `t` as arguments, in declaration order.
///
/// Passing `t` by value moves the members into `f`; passing `&t` or
/// `&mut t` hands out shared or unique references to them. The result of
/// `f` is returned as is.
///
/// ```ignore
/// struct S {{ a: i32, b: i32, c: i32 }}
/// aggregate!(S {{ a: i32, b: i32, c: i32 }});
///
/// let sum = visit_members(|a: i32, b: i32, c: i32| a + b + c, S {{ a: 1, b: 2, c: 3 }});
/// assert_eq!(sum, 6);
/// ```
#[inline]
pub fn visit_members<F, T>(f: F, t: T) -> <T::Members as visit_table::VisitMembers<F>>::Output
where
    T: concepts::AccessibleAggregate,
    T::Members: visit_table::VisitMembers<F>,
{{
    const {{
        assert!(
            concepts::is_dispatchable::<T>(),
            \"member count is not covered by the generated visit table\"
        )
    }};
    visit_table::VisitMembers::visit_members(t.decompose(), f)
}}
"
    )
}

fn tie_api(n: usize) -> String {
    format!(
        "\
/// The maximum number of members that can be tied with [`tie_members`].
pub const MAX_TIE_MEMBERS: usize = {n};

/// A tuple of `&mut` references to the members of `t`, in declaration order.
///
/// Assigning through an element assigns the corresponding member of `t`.
///
/// ```ignore
/// let mut p = Point {{ x: 1, y: 2 }};
/// *tie_members(&mut p).0 = 5;
/// assert_eq!(p.x, 5);
/// ```
#[inline]
pub fn tie_members<'a, T>(
    t: &'a mut T,
) -> <<&'a mut T as Decompose>::Members as tie_table::TieMembers>::Tied
where
    T: concepts::AccessibleAggregate,
    &'a mut T: Decompose,
    <&'a mut T as Decompose>::Members: tie_table::TieMembers,
{{
    const {{
        assert!(
            concepts::is_dispatchable::<T>(),
            \"member count is not covered by the generated tie table\"
        )
    }};
    tie_table::TieMembers::tie_members(t.decompose())
}}
"
    )
}
