// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error handling macros.

/// Early return with an error.
///
/// The error is converted with `Into`, so a message literal works for
/// `String` errors and a constructed error value works for typed errors.
///
/// # Example
///
/// ```
/// use lazymod_macros::bail;
///
/// fn lookup(id: &str) -> Result<u32, String> {
///     if id.starts_with('-') {
///         bail!("'{}' still carries its eager marker", id);
///     }
///     Ok(1)
/// }
///
/// assert!(lookup("-player").is_err());
/// assert!(lookup("player").is_ok());
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($msg.into())
    };
    ($fmt:literal, $($arg:tt)*) => {
        return Err(format!($fmt, $($arg)*).into())
    };
    ($err:expr $(,)?) => {
        return Err($err.into())
    };
}

/// Ensure a condition is true, or return an error.
///
/// # Example
///
/// ```
/// use lazymod_macros::ensure;
///
/// #[derive(Debug)]
/// struct Missing(String);
///
/// fn define(id: &str, factory: Option<u32>) -> Result<u32, Missing> {
///     ensure!(factory.is_some(), Missing(id.to_string()));
///     Ok(factory.unwrap_or_default())
/// }
///
/// assert!(define("a", None).is_err());
/// assert_eq!(define("a", Some(7)).unwrap(), 7);
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return Err($msg.into());
        }
    };
    ($cond:expr, $fmt:literal, $($arg:tt)*) => {
        if !$cond {
            return Err(format!($fmt, $($arg)*).into());
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err.into());
        }
    };
}
