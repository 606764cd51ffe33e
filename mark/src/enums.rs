//! Enum compaction.
//!
//! A fieldless enum with an explicit primitive `#[repr]` occupies exactly
//! its discriminant type, and almost never uses every value of it. The
//! [`mark_enum!`] macro reserves one of the unused integral values as the
//! marked pattern, producing a [`BufferMark`](crate::BufferMark) policy:
//! while empty, the buffer holds the reserved integer, a pattern that is
//! not a valid enum; while occupied it holds the enum itself.

/// Defines a buffer-storage policy for a fieldless enum.
///
/// ```
/// use mark::{mark_enum, BufferMark};
///
/// #[repr(i8)]
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// pub enum Dir { N, E, S, W }
///
/// mark_enum! {
///     /// Absence encoded as the out-of-range discriminant -1.
///     pub struct MarkDir: Dir as i8 = -1;
/// }
///
/// assert_eq!(MarkDir::marked(), -1);
/// assert!(!MarkDir::is_marked(&(Dir::W as i8)));
/// ```
///
/// # Safety
///
/// The macro expands to an `unsafe impl`, so its preconditions fall on the
/// caller: the enum must be fieldless with the named explicit `#[repr]`,
/// and the reserved value must not be one of its discriminants. The size
/// half of the contract is checked at compile time.
#[macro_export]
macro_rules! mark_enum {
    ($(#[$attr:meta])* $vis:vis struct $name:ident : $enum:ty as $raw:ty = $marked:expr;) => {
        $(#[$attr])*
        $vis struct $name;

        const _: () = {
            assert!(::core::mem::size_of::<$enum>() == ::core::mem::size_of::<$raw>());
            assert!(::core::mem::align_of::<$enum>() == ::core::mem::align_of::<$raw>());
        };

        unsafe impl $crate::BufferMark for $name {
            type Value = $enum;
            type Raw = $raw;

            #[inline(always)]
            fn marked() -> $raw {
                $marked
            }

            #[inline(always)]
            fn is_marked(raw: &$raw) -> bool {
                *raw == $marked
            }
        }
    };
}
