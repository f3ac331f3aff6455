// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use tracing::debug;

use weaver_model::{
    Config,
    mapped_arena::MappedArena,
    types::{CompiledSchema, CompiledType, TypeIndex},
};
use weaver_resolver::{FieldInterception, InterceptedResolver};

use crate::{arg_tree_builder::ArgTreeBuilder, type_registry::TypeRegistry};

/// State of one schema compilation.
///
/// Owns the type cache (compiled types by name) and the argument forest. Both start empty for
/// each compilation and are never shared with another one.
pub struct SchemaBuilding<'a, 'r, C> {
    pub(crate) registry: &'r TypeRegistry<'a, C>,
    pub(crate) config: &'r Config,
    pub(crate) types: MappedArena<CompiledType<C>>,
    pub(crate) arg_trees: ArgTreeBuilder<'a, 'r, C>,
    pub(crate) interceptions: Vec<PendingInterception<C>>,
}

/// An interception planned during the walk, installed once the argument forest is complete.
pub(crate) struct PendingInterception<C> {
    pub type_id: TypeIndex<C>,
    pub field_name: String,
    pub interception: FieldInterception<C>,
}

impl<'a, 'r, C> SchemaBuilding<'a, 'r, C> {
    pub fn new(registry: &'r TypeRegistry<'a, C>, config: &'r Config) -> Self {
        Self {
            registry,
            config,
            types: MappedArena::default(),
            arg_trees: ArgTreeBuilder::new(registry, &config.args),
            interceptions: vec![],
        }
    }
}

impl<C: Send + Sync + 'static> SchemaBuilding<'_, '_, C> {
    /// Replace the resolvers of intercepted fields and hand the types over.
    pub fn finish(
        self,
        query: TypeIndex<C>,
        mutation: Option<TypeIndex<C>>,
    ) -> CompiledSchema<C> {
        let SchemaBuilding {
            mut types,
            arg_trees,
            interceptions,
            ..
        } = self;

        let arg_forest = Arc::new(arg_trees.into_forest());

        for PendingInterception {
            type_id,
            field_name,
            interception,
        } in interceptions
        {
            if let CompiledType::Object(object) = &mut types[type_id]
                && let Some(field) = object.fields.get_mut(&field_name)
            {
                debug!(type_name = %object.name, field = %field_name, "Intercepting field");
                let resolver = InterceptedResolver::new(interception, arg_forest.clone());
                field.resolver = Some(resolver.into_resolver());
                field.intercepted = true;
            }
        }

        CompiledSchema {
            types,
            query,
            mutation,
        }
    }
}
