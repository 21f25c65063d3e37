// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Thread-safe loader handle

use crate::{Factory, IntoIds, Loader, Result, Value};
use parking_lot::Mutex;
use std::sync::Arc;

/// A [`Loader`] shared between threads.
///
/// Every operation takes one lock for its whole duration, so the
/// "already executed?" check and the memoizing write of a `require` can't
/// interleave with another thread's: each module still runs once.
/// Factories run under the lock and must not call back into the same
/// `SharedLoader`; they use their `Require` instead.
#[derive(Debug, Clone, Default)]
pub struct SharedLoader {
    inner: Arc<Mutex<Loader>>,
}

impl SharedLoader {
    /// Create a shared loader with an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`Loader::define`]
    pub fn define(&self, id: &str, factory: impl Into<Factory>) -> Result<()> {
        self.inner.lock().define(id, factory)
    }

    /// See [`Loader::define_with_deps`]
    pub fn define_with_deps(
        &self,
        id: &str,
        dependencies: impl IntoIds,
        factory: impl Into<Factory>,
    ) -> Result<()> {
        self.inner.lock().define_with_deps(id, dependencies, factory)
    }

    /// See [`Loader::require`]
    pub fn require(&self, id: &str) -> Result<Value> {
        self.inner.lock().require(id)
    }

    /// See [`Loader::use_modules`]
    pub fn use_modules(&self, ids: impl IntoIds) -> Result<Vec<Value>> {
        self.inner.lock().use_modules(ids)
    }

    /// See [`Loader::config`]
    pub fn config(&self, patch: serde_json::Value) -> Result<&Self> {
        self.inner.lock().config(patch)?;
        Ok(self)
    }

    /// Run `f` with exclusive access to the loader
    pub fn with<R>(&self, f: impl FnOnce(&mut Loader) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<Loader> for SharedLoader {
    fn from(loader: Loader) -> Self {
        Self {
            inner: Arc::new(Mutex::new(loader)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_concurrent_requires_run_once() {
        let runs = Arc::new(AtomicUsize::new(0));
        let loader = SharedLoader::new();
        let counter = Arc::clone(&runs);
        loader
            .define("slow", Factory::callable(move |_, _, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                thread::sleep(std::time::Duration::from_millis(5));
                Ok(Value::from("done"))
            }))
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let loader = loader.clone();
                thread::spawn(move || loader.require("slow").unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Value::from("done"));
        }
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_with_exclusive_access() {
        let loader = SharedLoader::from(Loader::new());
        loader.config(serde_json::json!({"alias": {"x": "y"}})).unwrap();
        let alias = loader.with(|inner| inner.configuration().alias("x").map(String::from));
        assert_eq!(alias.as_deref(), Some("y"));
    }
}
