//! Scalar sentinel policies.

use core::marker::PhantomData;

use static_assertions::{assert_eq_size, const_assert};

use crate::Mark;

/// Integer with a reserved sentinel value.
///
/// The sentinel is given as an `i128` and cast to the storage type, so
/// `MarkInt<u64, -1>` reserves `u64::MAX`. A default-constructed wrapper
/// holds exactly the sentinel; storing the sentinel itself yields an empty
/// wrapper, which is the collision the policy author promises not to care
/// about (or rules out with `try_new`).
pub struct MarkInt<T, const MARKED: i128>(PhantomData<T>);

macro_rules! impl_mark_int {
    ( $( $t:ty, )* ) => {
        $(
            impl<const MARKED: i128> Mark for MarkInt<$t, MARKED> {
                type Value = $t;
                type Storage = $t;

                #[inline(always)]
                fn marked() -> $t {
                    MARKED as $t
                }

                #[inline(always)]
                fn is_marked(storage: &$t) -> bool {
                    *storage == MARKED as $t
                }

                #[inline(always)]
                fn store(value: $t) -> $t {
                    value
                }

                #[inline(always)]
                unsafe fn access(storage: &$t) -> &$t {
                    storage
                }

                #[inline(always)]
                unsafe fn access_mut(storage: &mut $t) -> &mut $t {
                    storage
                }

                #[inline(always)]
                unsafe fn unstore(storage: $t) -> $t {
                    storage
                }
            }
        )*
    }
}

impl_mark_int! {
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
}

/// Floating point with quiet NaN as the sentinel.
///
/// Any NaN counts as marked, so a wrapper constructed from a NaN reports
/// `has_value() == false`. That is the point: NaN is the one pattern the
/// stored domain gives up.
pub struct MarkNan<F>(PhantomData<F>);

macro_rules! impl_mark_nan {
    ( $( $t:ty, )* ) => {
        $(
            impl Mark for MarkNan<$t> {
                type Value = $t;
                type Storage = $t;

                #[inline(always)]
                fn marked() -> $t {
                    <$t>::NAN
                }

                #[inline(always)]
                fn is_marked(storage: &$t) -> bool {
                    storage.is_nan()
                }

                #[inline(always)]
                fn store(value: $t) -> $t {
                    value
                }

                #[inline(always)]
                unsafe fn access(storage: &$t) -> &$t {
                    storage
                }

                #[inline(always)]
                unsafe fn access_mut(storage: &mut $t) -> &mut $t {
                    storage
                }

                #[inline(always)]
                unsafe fn unstore(storage: $t) -> $t {
                    storage
                }
            }
        )*
    }
}

impl_mark_nan! {
    f32, f64,
}

/// Default-constructed value as the sentinel.
///
/// Usable for any `T: Default + PartialEq` whose default is outside the
/// domain being stored (`0` for a nonzero id, `""` for a nonempty name).
pub struct MarkDefault<T>(PhantomData<T>);

impl<T: Default + PartialEq> Mark for MarkDefault<T> {
    type Value = T;
    type Storage = T;

    #[inline]
    fn marked() -> T {
        T::default()
    }

    #[inline]
    fn is_marked(storage: &T) -> bool {
        *storage == T::default()
    }

    #[inline]
    fn store(value: T) -> T {
        value
    }

    #[inline]
    unsafe fn access(storage: &T) -> &T {
        storage
    }

    #[inline]
    unsafe fn access_mut(storage: &mut T) -> &mut T {
        storage
    }

    #[inline]
    unsafe fn unstore(storage: T) -> T {
        storage
    }
}

/// Boolean compacted into one byte: `0`/`1` are the two values, `2` is the
/// marked pattern. The whole optional-bool fits in a single byte.
pub struct MarkBool;

const MARKED_BYTE: u8 = 2;

assert_eq_size!(bool, u8);
const_assert!(MARKED_BYTE != false as u8 && MARKED_BYTE != true as u8);

impl Mark for MarkBool {
    type Value = bool;
    type Storage = u8;

    #[inline(always)]
    fn marked() -> u8 {
        MARKED_BYTE
    }

    #[inline(always)]
    fn is_marked(storage: &u8) -> bool {
        *storage == MARKED_BYTE
    }

    #[inline(always)]
    fn store(value: bool) -> u8 {
        value as u8
    }

    #[inline(always)]
    unsafe fn access(storage: &u8) -> &bool {
        // Occupied storage is always 0 or 1, both valid bool patterns.
        &*(storage as *const u8 as *const bool)
    }

    #[inline(always)]
    unsafe fn access_mut(storage: &mut u8) -> &mut bool {
        &mut *(storage as *mut u8 as *mut bool)
    }

    #[inline(always)]
    unsafe fn unstore(storage: u8) -> bool {
        storage != 0
    }
}
