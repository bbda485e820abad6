// Reflection facility the generated tables dispatch over.
//
// An aggregate exposes its members as a tuple. Implementing `Decompose` for
// `T`, `&T` and `&mut T` lets a single call site move, borrow or mutably
// borrow the members depending on what it was given.

/// A value that can be taken apart into an ordered tuple of its members.
///
/// The generated tables cover member tuples of arity 1 through
/// [`MAX_VISIT_MEMBERS`](crate::MAX_VISIT_MEMBERS):
///
/// ```
/// use members_bridge::{aggregate, tie_members, visit_members};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// aggregate!(Point { x: i32, y: i32 });
///
/// let mut p = Point { x: 1, y: 2 };
/// *tie_members(&mut p).0 = 5;
/// assert_eq!(visit_members(|x: &i32, y: &i32| x + y, &p), 7);
/// ```
///
/// An aggregate without members has no table entry:
///
/// ```compile_fail
/// use members_bridge::{aggregate, tie_members};
///
/// struct Empty {}
///
/// aggregate!(Empty {});
///
/// let mut e = Empty {};
/// let _ = tie_members(&mut e);
/// ```
///
/// Neither has one with more members than the maximum. This case assumes
/// the default maximum of 64 and is skipped when `MEMBERS_MAX_ARITY` widens
/// the table:
///
#[cfg_attr(not(members_wide_table), doc = "```compile_fail")]
#[cfg_attr(members_wide_table, doc = "```ignore")]
/// let mut wide = (
///     0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8,
///     0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8,
///     0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8,
///     0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8,
///     0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8,
/// );
/// let _ = members_bridge::tie_members(&mut wide);
/// ```
///
/// A reported count that disagrees with the member tuple fails when the
/// entry point is instantiated:
///
/// ```compile_fail
/// use members_bridge::{visit_members, Decompose};
///
/// struct Liar(u8);
///
/// impl Decompose for Liar {
///     const MEMBER_COUNT: usize = 2;
///     type Members = (u8,);
///
///     fn decompose(self) -> Self::Members {
///         (self.0,)
///     }
/// }
///
/// visit_members(|a: u8| a, Liar(1));
/// ```
///
/// Nor does a member type that is not a tuple:
///
/// ```compile_fail
/// use members_bridge::{concepts, Decompose};
///
/// struct Opaque(String);
///
/// impl Decompose for Opaque {
///     const MEMBER_COUNT: usize = 1;
///     type Members = String;
///
///     fn decompose(self) -> Self::Members {
///         self.0
///     }
/// }
///
/// assert!(concepts::is_decomposable::<Opaque>());
/// let _ = concepts::is_dispatchable::<Opaque>();
/// ```
pub trait Decompose {
    /// Number of members, as reported by the aggregate itself.
    const MEMBER_COUNT: usize;

    /// The member tuple: `(A, B)` for an owned value, `(&A, &B)` for a shared
    /// reference, `(&mut A, &mut B)` for a unique reference.
    type Members;

    fn decompose(self) -> Self::Members;
}

/// Implement [`Decompose`] for a struct with named fields, listed in
/// declaration order together with their types.
///
/// ```
/// use members_bridge::aggregate;
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// aggregate!(Point { x: i32, y: i32 });
/// ```
#[macro_export]
macro_rules! aggregate {
    (@count $($field:ident)*) => {
        <[()]>::len(&[$($crate::aggregate!(@unit $field)),*])
    };
    (@unit $field:ident) => {
        ()
    };
    ($ty:ident { $($field:ident : $fty:ty),* $(,)? }) => {
        impl $crate::reflect::Decompose for $ty {
            const MEMBER_COUNT: usize = $crate::aggregate!(@count $($field)*);
            type Members = ($($fty,)*);

            #[inline]
            fn decompose(self) -> Self::Members {
                let $ty { $($field),* } = self;
                ($($field,)*)
            }
        }

        impl<'a> $crate::reflect::Decompose for &'a $ty {
            const MEMBER_COUNT: usize = $crate::aggregate!(@count $($field)*);
            type Members = ($(&'a $fty,)*);

            #[inline]
            fn decompose(self) -> Self::Members {
                let $ty { $($field),* } = self;
                ($($field,)*)
            }
        }

        impl<'a> $crate::reflect::Decompose for &'a mut $ty {
            const MEMBER_COUNT: usize = $crate::aggregate!(@count $($field)*);
            type Members = ($(&'a mut $fty,)*);

            #[inline]
            fn decompose(self) -> Self::Members {
                let $ty { $($field),* } = self;
                ($($field,)*)
            }
        }
    };
}
