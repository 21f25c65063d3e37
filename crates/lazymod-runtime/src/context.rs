// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Loader context: one registry plus one configuration store.
//!
//! Contexts are independent. Code that needs an isolated module namespace
//! constructs its own context instead of sharing one.

use crate::config::Config;
use crate::error::{ModuleError, Result};
use crate::registry::{Factory, ModuleRecord, Registry, split_eager_marker};
use crate::resolver::IdResolver;
use lazymod_macros::ensure;
use tracing::debug;

/// Registry and configuration bundled together
#[derive(Debug, Default)]
pub struct Context {
    pub(crate) registry: Registry,
    pub(crate) config: Config,
}

impl Context {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a preset configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            registry: Registry::new(),
            config,
        }
    }

    /// Drop every module and configuration entry
    pub fn reset(&mut self) {
        debug!(modules = self.registry.len(), "resetting loader context");
        self.registry.clear();
        self.config.clear();
    }

    /// The module registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The configuration store
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Merge a configuration patch (must be a JSON object)
    pub fn configure(&mut self, patch: serde_json::Value) -> Result<()> {
        self.config.merge(patch)
    }

    /// Resolve `raw_id` as requested from `requester`
    pub fn resolve(&self, raw_id: &str, requester: &str) -> String {
        IdResolver::new(&self.config).resolve(raw_id, requester)
    }

    /// Register a module.
    ///
    /// A `-` prefix on the id marks the module for eager execution: it is
    /// stored under the unprefixed id and executed before this returns.
    /// Returns the id the module was stored under.
    pub fn register(
        &mut self,
        raw_id: &str,
        dependencies: Vec<String>,
        factory: Option<Factory>,
    ) -> Result<String> {
        ensure!(
            !raw_id.is_empty(),
            ModuleError::invalid_argument("module id must not be empty")
        );
        let Some(factory) = factory else {
            return Err(ModuleError::invalid_argument(format!(
                "module '{}' must have an id and a factory",
                raw_id
            )));
        };

        let (id, eager) = split_eager_marker(raw_id);
        let record = ModuleRecord::new(id, dependencies, factory);

        if self
            .registry
            .insert(record, self.config.duplicate_policy())?
            .is_some()
        {
            debug!(module = id, "redefined module, previous record replaced");
        } else {
            debug!(module = id, "defined module");
        }

        if eager {
            debug!(module = id, "executing eager module");
            self.execute(id)?;
        }

        Ok(id.to_string())
    }
}
