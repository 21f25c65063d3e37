// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # lazymod
//!
//! Define modules now, run them when first needed, run them once.
//!
//! [`Loader`] is the entry point: `define` registers a module, `require`
//! executes it (dependencies first) and returns its memoized export, `use_modules`
//! executes several at once, and `config` merges alias tables and options.
//!
//! ```
//! use lazymod::{Factory, Loader, Value};
//! use serde_json::json;
//!
//! # fn main() -> lazymod::Result<()> {
//! let mut loader = Loader::new();
//! loader.config(json!({"alias": {"fmt": "./format"}}))?;
//!
//! loader.define("app/format", Factory::callable(|_, exports, _| {
//!     exports.set("name", "format");
//!     Ok(Value::Undefined)
//! }))?;
//! loader.define_with_deps("app/main", ["app/format"], Factory::callable(|require, _, _| {
//!     let format = require.require("fmt")?;
//!     Ok(format.get("name").unwrap_or_default())
//! }))?;
//!
//! assert_eq!(loader.require("app/main")?, Value::from("format"));
//! # Ok(())
//! # }
//! ```
//!
//! Ids starting with `-` are executed as soon as they are defined:
//!
//! ```
//! use lazymod::{Factory, Loader, Value};
//!
//! let mut loader = Loader::new();
//! loader.define("-boot", Factory::value(true)).unwrap();
//! assert!(loader.is_executed("boot"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod ids;
mod shared;

pub use ids::IntoIds;
pub use lazymod_runtime::{
    Config, Context, DuplicatePolicy, ErrorKind, Factory, Function, Module, ModuleError,
    Object, Require, Result, Value, exports,
};
pub use shared::SharedLoader;

use tracing::debug;

/// Version of the lazymod runtime
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Module loader façade over a [`Context`]
#[derive(Debug, Default)]
pub struct Loader {
    context: Context,
}

impl Loader {
    /// Create a loader with an empty registry and configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing context
    pub fn with_context(context: Context) -> Self {
        Self { context }
    }

    /// The underlying context
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Consume the loader, returning its context
    pub fn into_context(self) -> Context {
        self.context
    }

    /// Forget every module and configuration entry
    pub fn reset(&mut self) {
        self.context.reset();
    }

    /// Define a module without dependencies.
    pub fn define(&mut self, id: &str, factory: impl Into<Factory>) -> Result<()> {
        self.define_args(id, Vec::new(), Some(factory.into()))
    }

    /// Define a module with declared dependencies.
    ///
    /// Declared dependencies are executed by their literal ids before the
    /// factory runs; they are not resolved against `id`.
    pub fn define_with_deps(
        &mut self,
        id: &str,
        dependencies: impl IntoIds,
        factory: impl Into<Factory>,
    ) -> Result<()> {
        self.define_args(id, dependencies.into_ids(), Some(factory.into()))
    }

    /// Define a module from loosely-typed arguments; a missing factory is an
    /// [`ErrorKind::InvalidArgument`] error.
    pub fn define_args(
        &mut self,
        id: &str,
        dependencies: Vec<String>,
        factory: Option<Factory>,
    ) -> Result<()> {
        self.context.register(id, dependencies, factory).map(|_| ())
    }

    /// Execute a module by its canonical id and return its export.
    pub fn require(&mut self, id: &str) -> Result<Value> {
        self.context.execute(id)
    }

    /// Same as [`Loader::require`].
    pub fn exec(&mut self, id: &str) -> Result<Value> {
        self.require(id)
    }

    /// Execute one or more modules in order and collect their exports.
    pub fn use_modules(&mut self, ids: impl IntoIds) -> Result<Vec<Value>> {
        let ids = ids.into_ids();
        debug!(count = ids.len(), "using modules");
        ids.iter().map(|id| self.context.execute(id)).collect()
    }

    /// Execute modules like [`Loader::use_modules`], then hand the exports
    /// to `callback` in the same order.
    pub fn use_modules_with<F>(&mut self, ids: impl IntoIds, callback: F) -> Result<()>
    where
        F: FnOnce(&[Value]),
    {
        let exports = self.use_modules(ids)?;
        callback(&exports);
        Ok(())
    }

    /// Merge a configuration patch. Returns the loader for chaining.
    pub fn config(&mut self, patch: serde_json::Value) -> Result<&mut Self> {
        self.context.configure(patch)?;
        Ok(self)
    }

    /// Merge a configuration patch given as JSON text.
    pub fn config_json(&mut self, text: &str) -> Result<&mut Self> {
        let patch: serde_json::Value = serde_json::from_str(text)?;
        self.config(patch)
    }

    /// The current configuration
    pub fn configuration(&self) -> &Config {
        self.context.config()
    }

    /// Ids of all defined modules, sorted
    pub fn modules(&self) -> Vec<String> {
        self.context.registry().ids()
    }

    /// Whether a module id is defined
    pub fn is_defined(&self, id: &str) -> bool {
        self.context.registry().contains(id)
    }

    /// Whether a module has been executed
    pub fn is_executed(&self, id: &str) -> bool {
        self.context.is_executed(id)
    }
}
