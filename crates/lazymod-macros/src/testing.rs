// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Testing helper macros.
//!
//! Provides macros for writing cleaner and more expressive tests.

/// Assert that an expression matches a pattern.
///
/// # Example
///
/// ```
/// use lazymod_macros::assert_matches;
///
/// #[derive(Debug)]
/// enum Lookup { Hit(u32), Miss(String) }
///
/// let result = Lookup::Hit(42);
/// assert_matches!(result, Lookup::Hit(n) if n > 0);
/// assert_matches!(Lookup::Miss("a".into()), Lookup::Miss(_));
/// ```
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match $expr {
            $pat => {}
            ref e => panic!(
                "assertion failed: `{}` does not match pattern `{}`\n  value: {:?}",
                stringify!($expr),
                stringify!($pat),
                e
            ),
        }
    };
    ($expr:expr, $pat:pat if $guard:expr) => {
        match $expr {
            $pat if $guard => {}
            ref e => panic!(
                "assertion failed: `{}` does not match pattern `{} if {}`\n  value: {:?}",
                stringify!($expr),
                stringify!($pat),
                stringify!($guard),
                e
            ),
        }
    };
}

/// Assert that a Result is Ok and extract the value.
///
/// # Example
///
/// ```
/// use lazymod_macros::assert_ok;
///
/// let value = assert_ok!("42".parse::<i32>());
/// assert_eq!(value, 42);
/// ```
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!(
                "assertion failed: expected Ok, got Err\n  expression: `{}`\n  error: {:?}",
                stringify!($expr),
                e
            ),
        }
    };
}

/// Assert that a Result is Err and extract the error.
///
/// # Example
///
/// ```
/// use lazymod_macros::assert_err;
///
/// let err = assert_err!("abc".parse::<i32>());
/// assert!(!err.to_string().is_empty());
/// ```
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!(
                "assertion failed: expected Err, got Ok\n  expression: `{}`\n  value: {:?}",
                stringify!($expr),
                v
            ),
            Err(e) => e,
        }
    };
}

/// Assert that a string contains a substring.
///
/// # Example
///
/// ```
/// use lazymod_macros::assert_contains;
///
/// assert_contains!("Circular dependency detected: a -> b -> a", "a -> b");
/// ```
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        if !$haystack.contains($needle) {
            panic!(
                "assertion failed: string does not contain substring\n  string: `{}`\n  expected: `{}`",
                $haystack, $needle
            );
        }
    };
}

/// Assert that a collection has a specific length.
///
/// # Example
///
/// ```
/// use lazymod_macros::assert_len;
///
/// let v = vec!["a", "b", "c"];
/// assert_len!(v, 3);
/// ```
#[macro_export]
macro_rules! assert_len {
    ($collection:expr, $expected:expr) => {{
        let actual = $collection.len();
        if actual != $expected {
            panic!(
                "assertion failed: length mismatch\n  expected: `{}`\n  actual: `{}`",
                $expected, actual
            );
        }
    }};
}
