// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Module registry: canonical id -> module record

use crate::config::DuplicatePolicy;
use crate::error::{ModuleError, Result};
use crate::executor::Require;
use crate::value::{Object, Value};
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

/// `-id` requests execution right after definition
static EAGER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-([\w./-]+)$").expect("eager id pattern is valid"));

/// Signature of a callable factory.
///
/// Receives the scoped `require`, the fresh exports object and the module
/// being defined. Returning [`Value::Undefined`] means "use `module.exports`".
pub type FactoryFn =
    dyn FnMut(&mut Require<'_>, &Object, &mut Module) -> Result<Value> + Send + 'static;

/// What a module is built from
pub enum Factory {
    /// Invoked once on first execution
    Callable(Box<FactoryFn>),
    /// Used as the export directly
    Value(Value),
}

impl Factory {
    /// Wrap a closure as a factory
    pub fn callable<F>(func: F) -> Self
    where
        F: FnMut(&mut Require<'_>, &Object, &mut Module) -> Result<Value> + Send + 'static,
    {
        Factory::Callable(Box::new(func))
    }

    /// Use a plain value as the export
    pub fn value(value: impl Into<Value>) -> Self {
        Factory::Value(value.into())
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factory::Callable(_) => write!(f, "Factory::Callable"),
            Factory::Value(value) => f.debug_tuple("Factory::Value").field(value).finish(),
        }
    }
}

impl From<Value> for Factory {
    fn from(value: Value) -> Self {
        Factory::Value(value)
    }
}

impl From<serde_json::Value> for Factory {
    fn from(json: serde_json::Value) -> Self {
        Factory::Value(json.into())
    }
}

/// The module as seen by its own factory (CommonJS `module`).
///
/// `exports` starts out as the same object passed as the factory's second
/// argument; a factory may replace it instead of returning a value.
#[derive(Debug, Clone)]
pub struct Module {
    /// Canonical id
    pub id: String,
    /// Declared dependencies
    pub dependencies: Vec<String>,
    /// The module's exports
    pub exports: Value,
}

/// Registry entry
#[derive(Debug)]
pub struct ModuleRecord {
    id: String,
    dependencies: Vec<String>,
    factory: Option<Factory>,
    exports: Option<Value>,
}

impl ModuleRecord {
    /// Create an unexecuted record
    pub fn new(id: impl Into<String>, dependencies: Vec<String>, factory: Factory) -> Self {
        Self {
            id: id.into(),
            dependencies,
            factory: Some(factory),
            exports: None,
        }
    }

    /// Canonical id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Declared dependencies, in declaration order
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// The memoized export, once executed
    pub fn exports(&self) -> Option<&Value> {
        self.exports.as_ref()
    }

    /// Whether the module has been executed
    pub fn is_executed(&self) -> bool {
        self.exports.is_some()
    }

    pub(crate) fn take_factory(&mut self) -> Option<Factory> {
        self.factory.take()
    }

    pub(crate) fn restore_factory(&mut self, factory: Factory) {
        self.factory = Some(factory);
    }

    pub(crate) fn memoize(&mut self, exports: Value) {
        self.factory = None;
        self.exports = Some(exports);
    }
}

/// Mapping from canonical id to module record
#[derive(Debug, Default)]
pub struct Registry {
    modules: HashMap<String, ModuleRecord>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record, honoring the duplicate policy.
    ///
    /// Returns the record it replaced, if any.
    pub fn insert(
        &mut self,
        record: ModuleRecord,
        policy: DuplicatePolicy,
    ) -> Result<Option<ModuleRecord>> {
        if policy == DuplicatePolicy::Reject && self.modules.contains_key(record.id()) {
            debug!(module = record.id(), "rejected duplicate definition");
            return Err(ModuleError::DuplicateDefinition(record.id));
        }
        Ok(self.modules.insert(record.id.clone(), record))
    }

    /// Get a record by canonical id
    pub fn get(&self, id: &str) -> Option<&ModuleRecord> {
        self.modules.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut ModuleRecord> {
        self.modules.get_mut(id)
    }

    /// Check if an id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.modules.contains_key(id)
    }

    /// Remove a record
    pub fn remove(&mut self, id: &str) -> Option<ModuleRecord> {
        self.modules.remove(id)
    }

    /// All registered ids, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.modules.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of registered modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.modules.clear();
    }
}

/// Split a leading eager-execution marker off a raw id.
///
/// `"-player"` yields `("player", true)`; ids without a marker, and a bare
/// `"-"`, come back unchanged with `false`.
pub fn split_eager_marker(raw_id: &str) -> (&str, bool) {
    match EAGER_ID.captures(raw_id).and_then(|caps| caps.get(1)) {
        Some(id) => (id.as_str(), true),
        None => (raw_id, false),
    }
}
