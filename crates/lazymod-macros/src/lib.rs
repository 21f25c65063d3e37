// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Developer-friendly macros for the lazymod module runtime.
//!
//! # Macros Overview
//!
//! ## Error Handling
//! - [`bail!`] - Early return with an error
//! - [`ensure!`] - Assertion that returns an error instead of panicking
//!
//! ## Module Definitions
//! - [`deps!`] - Build a dependency list from string-like ids
//!
//! ## Testing
//! - [`assert_matches!`] - Assert that a value matches a pattern
//! - [`assert_ok!`] / [`assert_err!`] - Unwrap a `Result` in tests
//! - [`assert_contains!`] - Assert on a substring
//! - [`assert_len!`] - Assert on a collection length
//!
//! # Examples
//!
//! ```
//! use lazymod_macros::*;
//!
//! fn check(id: &str) -> Result<Vec<String>, String> {
//!     ensure!(!id.is_empty(), "module id must not be empty");
//!     Ok(deps!["./util", id])
//! }
//!
//! let deps = assert_ok!(check("core"));
//! assert_eq!(deps, vec!["./util".to_string(), "core".to_string()]);
//! assert_err!(check(""));
//! ```

#![warn(missing_docs)]

mod collections;
mod error;
mod testing;
