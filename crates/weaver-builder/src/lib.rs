// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use tracing::{debug, instrument};

use weaver_model::{
    Config, SchemaDescriptor,
    types::{CompiledSchema, MUTATION_ROOT_TYPENAME, QUERY_ROOT_TYPENAME},
};

mod arg_tree_builder;
pub mod error;
mod interception_builder;
mod schema_builder;
mod type_builder;
mod type_registry;

use error::CompileError;
use schema_builder::SchemaBuilding;
use type_registry::TypeRegistry;

/// Compile a schema description into types ready for a query engine.
///
/// Every composite type reachable from the queries and mutations is compiled once. Fields
/// that carry functions under the keys of `config` get a resolver that runs those functions
/// around the declared one; all other fields keep their resolver untouched.
#[instrument(skip_all)]
pub fn build_schema<C: Send + Sync + 'static>(
    schema: &SchemaDescriptor<C>,
    config: &Config,
) -> Result<CompiledSchema<C>, CompileError> {
    if schema.queries.is_empty() {
        return Err(CompileError::MissingQueries);
    }

    let registry = TypeRegistry::collect(schema);
    let mut building = SchemaBuilding::new(&registry, config);

    let query = building.build_root(QUERY_ROOT_TYPENAME, &schema.queries)?;
    let mutation = if schema.mutations.is_empty() {
        None
    } else {
        Some(building.build_root(MUTATION_ROOT_TYPENAME, &schema.mutations)?)
    };

    let compiled = building.finish(query, mutation);
    debug!(types = compiled.types.len(), "Compiled schema");

    Ok(compiled)
}
