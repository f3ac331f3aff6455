// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

/// The per-field error reported to the host engine.
///
/// Annotation functions and resolvers produce `Message` errors; the intercepted resolver
/// attaches the phase that failed (argument/pre validation or generation). Failures of the
/// primary resolver are passed along untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("{0}")]
    Message(String),

    #[error("Validation failed for '{path}': {source}")]
    Validation {
        path: String,
        #[source]
        source: Box<FieldError>,
    },

    #[error("Generator for argument '{argument}' failed: {source}")]
    Generator {
        argument: String,
        #[source]
        source: Box<FieldError>,
    },
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        FieldError::Message(message.into())
    }

    pub fn validation(path: impl Into<String>, source: FieldError) -> Self {
        FieldError::Validation {
            path: path.into(),
            source: Box::new(source),
        }
    }

    pub fn generator(argument: impl Into<String>, source: FieldError) -> Self {
        FieldError::Generator {
            argument: argument.into(),
            source: Box::new(source),
        }
    }

    /// The error originally raised by user code, with phase information peeled off.
    pub fn root_cause(&self) -> &FieldError {
        match self {
            FieldError::Message(_) => self,
            FieldError::Validation { source, .. } | FieldError::Generator { source, .. } => {
                source.root_cause()
            }
        }
    }
}
