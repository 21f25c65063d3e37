// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for the module runtime

use thiserror::Error;

/// Result type for module runtime operations
pub type Result<T> = std::result::Result<T, ModuleError>;

/// Errors that can occur while defining, resolving or executing modules
#[derive(Debug, Error)]
pub enum ModuleError {
    /// A definition was missing a required argument (id or factory)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Module not found
    #[error("Cannot find module '{0}'")]
    NotFound(String),

    /// A module id was defined twice while duplicates are rejected
    #[error("Module '{0}' has already been defined")]
    DuplicateDefinition(String),

    /// Circular dependency detected
    #[error("Circular dependency detected: {0}")]
    CycleDetected(String),

    /// Malformed configuration patch
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Type error (wrong value type, e.g. calling a non-function export)
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Generic error with message, raised by factories
    #[error("{0}")]
    Generic(String),
}

/// Discriminant of a [`ModuleError`], for callers that branch on the kind only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ModuleError::InvalidArgument`]
    InvalidArgument,
    /// See [`ModuleError::NotFound`]
    NotFound,
    /// See [`ModuleError::DuplicateDefinition`]
    DuplicateDefinition,
    /// See [`ModuleError::CycleDetected`]
    CycleDetected,
    /// See [`ModuleError::Config`] and [`ModuleError::JsonParse`]
    Config,
    /// See [`ModuleError::TypeError`]
    TypeError,
    /// See [`ModuleError::Generic`]
    Generic,
}

impl ModuleError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a module not found error
    pub fn not_found(module: impl Into<String>) -> Self {
        Self::NotFound(module.into())
    }

    /// Create a new TypeError
    pub fn type_error(msg: impl Into<String>) -> Self {
        Self::TypeError(msg.into())
    }

    /// Create a generic error, typically from inside a factory
    pub fn generic(msg: impl Into<String>) -> Self {
        Self::Generic(msg.into())
    }

    /// The kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DuplicateDefinition(_) => ErrorKind::DuplicateDefinition,
            Self::CycleDetected(_) => ErrorKind::CycleDetected,
            Self::Config(_) | Self::JsonParse(_) => ErrorKind::Config,
            Self::TypeError(_) => ErrorKind::TypeError,
            Self::Generic(_) => ErrorKind::Generic,
        }
    }
}

impl From<String> for ModuleError {
    fn from(msg: String) -> Self {
        Self::Generic(msg)
    }
}

impl From<&str> for ModuleError {
    fn from(msg: &str) -> Self {
        Self::Generic(msg.to_string())
    }
}
