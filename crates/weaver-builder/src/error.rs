// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Schema must declare at least one query")]
    MissingQueries,

    #[error("Composite type without a name")]
    UnnamedType,

    #[error("Type '{0}' must declare at least one field")]
    EmptyType(String),

    #[error("Type '{type_name}' referenced by '{referenced_by}' is not defined")]
    UnresolvedType {
        type_name: String,
        referenced_by: String,
    },

    #[error("Type name '{0}' is reserved for a root operation type or a built-in scalar")]
    ReservedTypeName(String),

    #[error("Input type '{type_name}' cannot be the type of output field '{field}'")]
    InputTypeAsOutput { type_name: String, field: String },

    #[error("Output type '{type_name}' cannot be the type of argument '{argument}'")]
    OutputTypeAsArgument { type_name: String, argument: String },
}
