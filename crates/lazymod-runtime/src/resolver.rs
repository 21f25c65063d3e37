// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Module identifier resolution
//!
//! Turns the id a factory asks for into the canonical id it is registered
//! under:
//!
//! 1. an alias table lookup on the raw id,
//! 2. relative ids (leading `.`) are joined onto the requesting module's
//!    directory and collapsed, `.` segments vanishing and `..` removing the
//!    segment before it.
//!
//! Anything not starting with `.` is already canonical. `..` segments that
//! climb past the first segment are kept as-is.

use crate::config::Config;

/// Resolves raw module ids against a configuration's alias table
#[derive(Debug, Clone, Copy)]
pub struct IdResolver<'a> {
    config: &'a Config,
}

impl<'a> IdResolver<'a> {
    /// Create a resolver reading aliases from `config`
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Resolve `raw_id` as requested from the module `requester`.
    pub fn resolve(&self, raw_id: &str, requester: &str) -> String {
        if raw_id.is_empty() {
            return String::new();
        }

        let id = self.config.alias(raw_id).unwrap_or(raw_id);

        if !is_relative(id) {
            return id.to_string();
        }

        collapse(&format!("{}{}", dirname(requester), id))
    }
}

/// Whether an id is relative to its requester
pub fn is_relative(id: &str) -> bool {
    id.starts_with('.')
}

/// The directory part of an id, including the trailing `/`
pub fn dirname(id: &str) -> &str {
    match id.rfind('/') {
        Some(pos) => &id[..=pos],
        None => "",
    }
}

/// Collapse `.` and `..` segments of a slash-separated id.
pub fn collapse(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "." => {}
            ".." if segments
                .last()
                .is_some_and(|prev| !prev.is_empty() && *prev != "..") =>
            {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    segments.join("/")
}
