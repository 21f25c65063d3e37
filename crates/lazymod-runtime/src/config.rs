// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Loader configuration store.
//!
//! Configuration is a flat map of keys to JSON values. Patches are merged
//! key by key:
//!
//! - a mapping merged into a mapping is merged field-by-field (patch wins)
//! - anything merged into a sequence is appended after the existing items
//! - everything else overwrites
//!
//! A key that holds a mapping only accepts another mapping; any other value
//! rejects the whole patch.
//!
//! Two keys carry meaning for the runtime: `alias` (raw id -> canonical id)
//! and `duplicates` (`"overwrite"` or `"reject"`).

use crate::error::{ModuleError, Result};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use tracing::trace;

/// Config key holding the alias table
pub const ALIAS_KEY: &str = "alias";

/// Config key holding the duplicate definition policy
pub const DUPLICATES_KEY: &str = "duplicates";

/// What happens when a module id is defined a second time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Silently replace the previous record
    #[default]
    Overwrite,
    /// Fail with [`ModuleError::DuplicateDefinition`]
    Reject,
}

/// Process-lifetime configuration of a loader context
#[derive(Debug, Clone, Default)]
pub struct Config {
    entries: Map<String, JsonValue>,
}

impl Config {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a patch; the patch must be a JSON object.
    pub fn merge(&mut self, patch: JsonValue) -> Result<()> {
        match patch {
            JsonValue::Object(map) => self.merge_map(map),
            other => Err(ModuleError::Config(format!(
                "configuration patch must be an object, got {}",
                json_type(&other)
            ))),
        }
    }

    /// Merge a patch given as JSON text.
    pub fn merge_str(&mut self, text: &str) -> Result<()> {
        let patch: JsonValue = serde_json::from_str(text)?;
        self.merge(patch)
    }

    /// Merge a patch map key by key.
    ///
    /// The patch is validated before anything is written, so a rejected
    /// patch leaves the configuration untouched.
    pub fn merge_map(&mut self, patch: Map<String, JsonValue>) -> Result<()> {
        if let Some(policy) = patch.get(DUPLICATES_KEY) {
            parse_policy(policy)?;
        }
        for (key, value) in &patch {
            if matches!(self.entries.get(key), Some(JsonValue::Object(_))) && !value.is_object() {
                return Err(ModuleError::Config(format!(
                    "'{}' holds an object and cannot be merged with {}",
                    key,
                    json_type(value)
                )));
            }
        }

        for (key, value) in patch {
            trace!(key = %key, "merging config key");
            match self.entries.get_mut(&key) {
                Some(JsonValue::Object(existing)) => {
                    if let JsonValue::Object(fields) = value {
                        existing.extend(fields);
                    }
                }
                Some(JsonValue::Array(existing)) => match value {
                    JsonValue::Array(items) => existing.extend(items),
                    other => existing.push(other),
                },
                _ => {
                    self.entries.insert(key, value);
                }
            }
        }

        Ok(())
    }

    /// Get a raw configuration value
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.entries.get(key)
    }

    /// The alias table, if any
    pub fn aliases(&self) -> Option<&Map<String, JsonValue>> {
        self.entries.get(ALIAS_KEY).and_then(JsonValue::as_object)
    }

    /// Look up an alias target. Non-string targets are ignored.
    pub fn alias(&self, raw_id: &str) -> Option<&str> {
        self.aliases()?.get(raw_id)?.as_str()
    }

    /// The configured duplicate definition policy
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.entries
            .get(DUPLICATES_KEY)
            .and_then(|value| parse_policy(value).ok())
            .unwrap_or_default()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn parse_policy(value: &JsonValue) -> Result<DuplicatePolicy> {
    DuplicatePolicy::deserialize(value).map_err(|_| {
        ModuleError::Config(format!(
            "'{}' must be \"overwrite\" or \"reject\", got {}",
            DUPLICATES_KEY, value
        ))
    })
}

fn json_type(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
