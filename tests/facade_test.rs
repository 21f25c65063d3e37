//! Loader façade tests
//!
//! Drives `define` / `require` / `use_modules` / `config` the way caller code
//! does.

use lazymod::{ErrorKind, Factory, Loader, ModuleError, Value, exports};
use lazymod_macros::{assert_err, assert_len, assert_matches, assert_ok};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_require_counts_factory_runs() {
    init_tracing();
    let runs = Arc::new(AtomicUsize::new(0));
    let mut loader = Loader::new();

    let counter = Arc::clone(&runs);
    assert_ok!(loader.define("b", Factory::callable(move |_, _, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Value::from(42))
    })));
    assert_ok!(loader.define_with_deps("a", ["b"], Factory::callable(|require, _, _| {
        let b = require.require("b")?;
        Ok(Value::Number(b.as_number().unwrap_or_default() + 1.0))
    })));

    assert_eq!(assert_ok!(loader.require("a")), Value::Number(43.0));
    assert_eq!(assert_ok!(loader.require("a")), Value::Number(43.0));
    assert_eq!(assert_ok!(loader.require("b")), Value::Number(42.0));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_use_single_and_many() {
    init_tracing();
    let mut loader = Loader::new();
    assert_ok!(loader.define("x", Factory::value(1)));
    assert_ok!(loader.define("y", Factory::value("two")));

    let one = assert_ok!(loader.use_modules("x"));
    assert_eq!(one, vec![Value::from(1)]);

    let mut seen = Vec::new();
    assert_ok!(loader.use_modules_with(["y", "x"], |exports| {
        seen.extend_from_slice(exports);
    }));
    assert_eq!(seen, vec![Value::from("two"), Value::from(1)]);
}

#[test]
fn test_use_stops_at_first_missing_module() {
    init_tracing();
    let mut loader = Loader::new();
    assert_ok!(loader.define("x", Factory::value(1)));

    let mut called = false;
    let err = assert_err!(loader.use_modules_with(vec!["x", "nope"], |_| called = true));
    assert_matches!(err, ModuleError::NotFound(ref id) if id == "nope");
    assert!(!called);
    assert!(loader.is_executed("x"));
}

#[test]
fn test_config_merges_instead_of_overwriting() {
    init_tracing();
    let mut loader = Loader::new();
    assert_ok!(loader.config(json!({"alias": {"x": "y"}})));
    assert_ok!(loader.config(json!({"alias": {"z": "w"}})));
    assert_ok!(loader.config(json!({"tags": ["a"]})));
    assert_ok!(loader.config(json!({"tags": ["b"]})));

    assert_ok!(loader.define("y", Factory::value("from y")));
    assert_ok!(loader.define("w", Factory::value("from w")));
    assert_ok!(loader.define("probe", Factory::callable(|require, exports, _| {
        exports.set("x", require.require("x")?);
        exports.set("z", require.require("z")?);
        Ok(Value::Undefined)
    })));

    let probe = assert_ok!(loader.require("probe"));
    assert_eq!(probe.get("x"), Some(Value::from("from y")));
    assert_eq!(probe.get("z"), Some(Value::from("from w")));
    assert_eq!(loader.configuration().get("tags"), Some(&json!(["a", "b"])));
}

#[test]
fn test_eager_definition() {
    init_tracing();
    let runs = Arc::new(AtomicUsize::new(0));
    let mut loader = Loader::new();
    let counter = Arc::clone(&runs);
    assert_ok!(loader.define("-foo", Factory::callable(move |_, _, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(exports! { "ready" => true })
    })));

    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(loader.is_defined("foo"));
    let foo = assert_ok!(loader.require("foo"));
    assert_eq!(foo.get("ready"), Some(Value::Boolean(true)));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_circular_modules_fail_cleanly() {
    init_tracing();
    let mut loader = Loader::new();
    assert_ok!(loader.define("a", Factory::callable(|require, _, _| require.require("b"))));
    assert_ok!(loader.define("b", Factory::callable(|require, _, _| require.require("a"))));

    let err = assert_err!(loader.require("a"));
    assert_eq!(err.kind(), ErrorKind::CycleDetected);
}

#[test]
fn test_exported_functions() {
    init_tracing();
    let mut loader = Loader::new();
    assert_ok!(loader.define("math", Factory::callable(|_, exports, _| {
        exports.set(
            "double",
            lazymod::Function::new("double", |args| {
                let n = args.first().and_then(Value::as_number).unwrap_or_default();
                Ok(Value::Number(n * 2.0))
            }),
        );
        Ok(Value::Undefined)
    })));
    assert_ok!(loader.define_with_deps("calc", ["math"], Factory::callable(|require, _, _| {
        let double = require.require("math")?.get("double").unwrap_or_default();
        double.call(&[Value::from(21)])
    })));

    assert_eq!(assert_ok!(loader.require("calc")), Value::Number(42.0));
}

#[test]
fn test_isolated_loaders() {
    init_tracing();
    let mut first = Loader::new();
    let mut second = Loader::new();
    assert_ok!(first.define("shared-name", Factory::value(1)));
    assert_ok!(second.define("shared-name", Factory::value(2)));

    assert_eq!(assert_ok!(first.require("shared-name")), Value::from(1));
    assert_eq!(assert_ok!(second.require("shared-name")), Value::from(2));
    assert_len!(first.modules(), 1);
    assert!(!lazymod::VERSION.is_empty());
}
