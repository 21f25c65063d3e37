// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Module executor
//!
//! Executing a module runs its declared dependencies first (by their literal
//! ids), then its factory with a `require` scoped to the module, and memoizes
//! the result. A memoized module is never executed again.
//!
//! Every top-level execution carries a chain of the modules currently being
//! executed; re-entering one of them is a circular dependency.

use crate::context::Context;
use crate::error::{ModuleError, Result};
use crate::registry::{Factory, Module};
use crate::value::{Object, Value};
use tracing::{debug, instrument, trace, warn};

/// Modules currently executing, outermost first
#[derive(Debug, Default)]
struct ExecutionChain {
    stack: Vec<String>,
}

impl ExecutionChain {
    fn contains(&self, id: &str) -> bool {
        self.stack.iter().any(|entry| entry == id)
    }

    fn describe_cycle(&self, id: &str) -> String {
        let start = self.stack.iter().position(|entry| entry == id).unwrap_or(0);
        let mut path: Vec<&str> = self.stack[start..].iter().map(String::as_str).collect();
        path.push(id);
        path.join(" -> ")
    }
}

impl Context {
    /// Execute a module by canonical id and return its export.
    #[instrument(level = "debug", skip(self))]
    pub fn execute(&mut self, id: &str) -> Result<Value> {
        let mut chain = ExecutionChain::default();
        self.execute_in(id, &mut chain)
    }

    /// Whether a module has been executed
    pub fn is_executed(&self, id: &str) -> bool {
        self.registry
            .get(id)
            .is_some_and(|record| record.is_executed())
    }

    fn execute_in(&mut self, id: &str, chain: &mut ExecutionChain) -> Result<Value> {
        let record = self
            .registry
            .get(id)
            .ok_or_else(|| ModuleError::not_found(id))?;

        if let Some(exports) = record.exports() {
            trace!(module = id, "module already executed");
            return Ok(exports.clone());
        }

        if chain.contains(id) {
            let cycle = chain.describe_cycle(id);
            warn!(cycle = %cycle, "circular dependency");
            return Err(ModuleError::CycleDetected(cycle));
        }

        let dependencies = record.dependencies().to_vec();

        chain.stack.push(id.to_string());
        let result = self.run(id, dependencies, chain);
        chain.stack.pop();
        result
    }

    fn run(
        &mut self,
        id: &str,
        dependencies: Vec<String>,
        chain: &mut ExecutionChain,
    ) -> Result<Value> {
        for dependency in &dependencies {
            self.execute_in(dependency, chain)?;
        }

        // The factory leaves the record while it runs, so `require` can
        // borrow the context.
        let factory = self
            .registry
            .get_mut(id)
            .ok_or_else(|| ModuleError::not_found(id))?
            .take_factory()
            .ok_or_else(|| ModuleError::CycleDetected(chain.describe_cycle(id)))?;

        let exports = match factory {
            Factory::Value(value) => value,
            Factory::Callable(mut func) => {
                let container = Object::new();
                let mut module = Module {
                    id: id.to_string(),
                    dependencies,
                    exports: Value::Object(container.clone()),
                };

                debug!(module = id, "running factory");
                let returned = {
                    let mut require = Require {
                        context: &mut *self,
                        base: id,
                        chain: &mut *chain,
                    };
                    func(&mut require, &container, &mut module)
                };

                match returned {
                    Ok(Value::Undefined) => module.exports,
                    Ok(value) => value,
                    Err(err) => {
                        debug!(module = id, error = %err, "factory failed");
                        if let Some(record) = self.registry.get_mut(id) {
                            record.restore_factory(Factory::Callable(func));
                        }
                        return Err(err);
                    }
                }
            }
        };

        let record = self
            .registry
            .get_mut(id)
            .ok_or_else(|| ModuleError::not_found(id))?;
        record.memoize(exports.clone());
        Ok(exports)
    }
}

/// The `require` handed to a factory.
///
/// Ids are resolved relative to the module the factory belongs to, then
/// executed within the same execution chain.
pub struct Require<'a> {
    context: &'a mut Context,
    base: &'a str,
    chain: &'a mut ExecutionChain,
}

impl Require<'_> {
    /// Id of the module this `require` belongs to
    pub fn module_id(&self) -> &str {
        self.base
    }

    /// Resolve an id without executing it
    pub fn resolve(&self, raw_id: &str) -> String {
        self.context.resolve(raw_id, self.base)
    }

    /// Resolve, execute and return a module's export
    pub fn require(&mut self, raw_id: &str) -> Result<Value> {
        let id = self.resolve(raw_id);
        if !self.context.registry.contains(&id) {
            return Err(ModuleError::not_found(id));
        }
        self.context.execute_in(&id, self.chain)
    }

    /// Same as [`Require::require`]; kept for factories written against the
    /// `require.async` calling convention. Runs synchronously.
    pub fn r#async(&mut self, raw_id: &str) -> Result<Value> {
        self.require(raw_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn define(ctx: &mut Context, id: &str, deps: &[&str], factory: Factory) {
        let deps = deps.iter().map(|d| d.to_string()).collect();
        ctx.register(id, deps, Some(factory)).unwrap();
    }

    fn counting(counter: &Arc<AtomicUsize>, value: i32) -> Factory {
        let counter = Arc::clone(counter);
        Factory::callable(move |_, _, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Value::from(value))
        })
    }

    #[test]
    fn test_value_factory() {
        let mut ctx = Context::new();
        define(&mut ctx, "v", &[], Factory::value("plain"));
        assert_eq!(ctx.execute("v").unwrap(), Value::from("plain"));
    }

    #[test]
    fn test_not_found() {
        let mut ctx = Context::new();
        assert_eq!(ctx.execute("nope").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_runs_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut ctx = Context::new();
        define(&mut ctx, "a", &[], counting(&counter, 7));
        for _ in 0..3 {
            assert_eq!(ctx.execute("a").unwrap(), Value::from(7));
        }
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(ctx.is_executed("a"));
    }

    #[test]
    fn test_dependencies_run_first() {
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let mut ctx = Context::new();
        for id in ["c", "b"] {
            let order = Arc::clone(&order);
            define(&mut ctx, id, &[], Factory::callable(move |_, _, _| {
                order.lock().push(id);
                Ok(Value::Null)
            }));
        }
        let seen = Arc::clone(&order);
        define(&mut ctx, "a", &["b", "c"], Factory::callable(move |_, _, _| {
            seen.lock().push("a");
            Ok(Value::Null)
        }));

        ctx.execute("a").unwrap();
        assert_eq!(*order.lock(), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_exports_container_fallback() {
        let mut ctx = Context::new();
        define(&mut ctx, "lib", &[], Factory::callable(|_, exports, _| {
            exports.set("answer", 42);
            Ok(Value::Undefined)
        }));
        let lib = ctx.execute("lib").unwrap();
        assert_eq!(lib.get("answer"), Some(Value::from(42)));
    }

    #[test]
    fn test_module_exports_replaced() {
        let mut ctx = Context::new();
        define(&mut ctx, "lib", &["dep"], Factory::callable(|_, _, module| {
            assert_eq!(module.id, "lib");
            assert_eq!(module.dependencies, vec!["dep".to_string()]);
            module.exports = Value::from("replaced");
            Ok(Value::Undefined)
        }));
        define(&mut ctx, "dep", &[], Factory::value(0));
        assert_eq!(ctx.execute("lib").unwrap(), Value::from("replaced"));
    }

    #[test]
    fn test_falsy_export_is_memoized() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut ctx = Context::new();
        let seen = Arc::clone(&counter);
        define(&mut ctx, "zero", &[], Factory::callable(move |_, _, _| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Null)
        }));
        ctx.execute("zero").unwrap();
        ctx.execute("zero").unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_require_resolves_relative_to_module() {
        let mut ctx = Context::new();
        define(&mut ctx, "app/util", &[], Factory::value("util"));
        define(&mut ctx, "app/main", &[], Factory::callable(|require, _, _| {
            assert_eq!(require.module_id(), "app/main");
            assert_eq!(require.resolve("./util"), "app/util");
            require.require("./util")
        }));
        assert_eq!(ctx.execute("app/main").unwrap(), Value::from("util"));
    }

    #[test]
    fn test_require_async_alias() {
        let mut ctx = Context::new();
        define(&mut ctx, "b", &[], Factory::value(1));
        define(&mut ctx, "a", &[], Factory::callable(|require, _, _| require.r#async("b")));
        assert_eq!(ctx.execute("a").unwrap(), Value::from(1));
    }

    #[test]
    fn test_require_missing_module() {
        let mut ctx = Context::new();
        define(&mut ctx, "a", &[], Factory::callable(|require, _, _| require.require("./gone")));
        let err = ctx.execute("a").unwrap_err();
        assert!(matches!(err, ModuleError::NotFound(ref id) if id == "gone"));
        assert!(!ctx.is_executed("a"));
    }

    #[test]
    fn test_failed_factory_can_retry() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let mut ctx = Context::new();
        let seen = Arc::clone(&attempts);
        define(&mut ctx, "flaky", &[], Factory::callable(move |_, _, _| {
            if seen.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ModuleError::generic("not yet"))
            } else {
                Ok(Value::from("ready"))
            }
        }));

        assert_eq!(ctx.execute("flaky").unwrap_err().kind(), ErrorKind::Generic);
        assert!(!ctx.is_executed("flaky"));
        assert_eq!(ctx.execute("flaky").unwrap(), Value::from("ready"));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_static_cycle_detected() {
        let mut ctx = Context::new();
        define(&mut ctx, "a", &["b"], Factory::value(1));
        define(&mut ctx, "b", &["a"], Factory::value(2));
        let err = ctx.execute("a").unwrap_err();
        assert!(matches!(err, ModuleError::CycleDetected(ref path) if path == "a -> b -> a"));
    }

    #[test]
    fn test_dynamic_cycle_detected() {
        let mut ctx = Context::new();
        define(&mut ctx, "a", &[], Factory::callable(|require, _, _| require.require("b")));
        define(&mut ctx, "b", &[], Factory::callable(|require, _, _| require.require("a")));
        let err = ctx.execute("b").unwrap_err();
        assert!(matches!(err, ModuleError::CycleDetected(ref path) if path == "b -> a -> b"));

        // Both factories are back in place after the failure.
        define(&mut ctx, "a", &[], Factory::value("fixed"));
        assert_eq!(ctx.execute("b").unwrap(), Value::from("fixed"));
    }

    #[test]
    fn test_self_cycle_detected() {
        let mut ctx = Context::new();
        define(&mut ctx, "self", &["self"], Factory::value(1));
        assert_eq!(ctx.execute("self").unwrap_err().kind(), ErrorKind::CycleDetected);
    }

    #[test]
    fn test_shared_dependency_is_not_a_cycle() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut ctx = Context::new();
        define(&mut ctx, "shared", &[], counting(&counter, 1));
        define(&mut ctx, "left", &["shared"], Factory::value("l"));
        define(&mut ctx, "right", &["shared"], Factory::value("r"));
        define(&mut ctx, "top", &["left", "right"], Factory::value("t"));
        assert_eq!(ctx.execute("top").unwrap(), Value::from("t"));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
