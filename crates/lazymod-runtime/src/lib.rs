// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # lazymod-runtime
//!
//! The core of the lazymod loader: a registry of named modules, an
//! identifier resolver, and an executor that runs each module exactly once.
//!
//! - Modules are registered with an id, a dependency list and a factory
//!   (a closure or a plain value). Nothing runs at registration time unless
//!   the id carries the eager `-` marker.
//! - Executing a module runs its dependencies first, then its factory, and
//!   memoizes the export. Later executions return the memoized export.
//! - Factories pull further modules through a scoped [`Require`], which
//!   resolves aliases and relative ids (`./x`, `../x`) against the requesting
//!   module's id.
//! - Circular dependencies fail with [`ModuleError::CycleDetected`].
//!
//! ## Quick Start
//!
//! ```
//! use lazymod_runtime::{Context, Factory, Value};
//!
//! let mut ctx = Context::new();
//! ctx.register("b", vec![], Some(Factory::value(42))).unwrap();
//! ctx.register(
//!     "a",
//!     vec!["b".to_string()],
//!     Some(Factory::callable(|require, _, _| {
//!         let b = require.require("b")?.as_number().unwrap_or_default();
//!         Ok(Value::Number(b + 1.0))
//!     })),
//! )
//! .unwrap();
//!
//! assert_eq!(ctx.execute("a").unwrap(), Value::Number(43.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod registry;
pub mod resolver;
pub mod value;

// Re-exports
pub use config::{Config, DuplicatePolicy};
pub use context::Context;
pub use error::{ErrorKind, ModuleError, Result};
pub use executor::Require;
pub use registry::{Factory, Module, ModuleRecord, Registry};
pub use resolver::IdResolver;
pub use value::{Function, Object, Value};
