// Runtime side of the member tables.
// `build.rs` generates the visit and tie tables into OUT_DIR; they are
// included here next to the reflection trait they dispatch over.

pub mod reflect;

pub mod members_visitor {
    include!(concat!(env!("OUT_DIR"), "/members_visitor.rs"));
}

pub mod members_tie {
    include!(concat!(env!("OUT_DIR"), "/members_tie.rs"));
}

pub use members_tie::{tie_members, MAX_TIE_MEMBERS};
pub use members_visitor::concepts;
pub use members_visitor::{visit_members, MAX_VISIT_MEMBERS};
pub use reflect::Decompose;
