// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collection creation macros.

/// Creates a dependency list (`Vec<String>`) from string-like ids.
///
/// # Example
///
/// ```
/// use lazymod_macros::deps;
///
/// let deps = deps!["jquery", String::from("./util")];
/// assert_eq!(deps, vec!["jquery".to_string(), "./util".to_string()]);
///
/// let none: Vec<String> = deps![];
/// assert!(none.is_empty());
/// ```
#[macro_export]
macro_rules! deps {
    () => {
        ::std::vec::Vec::<::std::string::String>::new()
    };
    ($($id:expr),+ $(,)?) => {
        <[_]>::into_vec(::std::boxed::Box::new([
            $(::std::string::String::from($id)),+
        ]))
    };
}
