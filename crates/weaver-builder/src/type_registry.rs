// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_value::indexmap::IndexMap;
use tracing::warn;

use weaver_model::{CompositeDescriptor, FieldDescriptor, SchemaDescriptor, TypeDescriptor};

/// Composite descriptors by name, so that [`TypeDescriptor::Named`] references can be resolved.
///
/// Collected from the explicit `types` of a schema first, then from every inline definition
/// reachable from the queries and mutations. The first definition of a name wins.
pub struct TypeRegistry<'a, C> {
    composites: IndexMap<&'a str, &'a CompositeDescriptor<C>>,
}

impl<'a, C> TypeRegistry<'a, C> {
    pub fn collect(schema: &'a SchemaDescriptor<C>) -> Self {
        let mut registry = Self {
            composites: IndexMap::new(),
        };

        for composite in schema.types.values() {
            registry.register(composite);
        }
        for field in schema.queries.values().chain(schema.mutations.values()) {
            registry.register_field(field);
        }

        registry
    }

    pub fn get(&self, name: &str) -> Option<&'a CompositeDescriptor<C>> {
        self.composites.get(name).copied()
    }

    /// The registered definition for a type reference (`None` for scalars and unknown names).
    pub fn lookup(&self, typ: &'a TypeDescriptor<C>) -> Option<&'a CompositeDescriptor<C>> {
        match typ {
            TypeDescriptor::Scalar(_) => None,
            TypeDescriptor::Named(name) => self.get(name),
            TypeDescriptor::Composite(composite) => self.get(&composite.name).or(Some(composite)),
        }
    }

    fn register(&mut self, composite: &'a CompositeDescriptor<C>) {
        if self.composites.contains_key(composite.name.as_str()) {
            warn!(
                "Type '{}' is already registered, ignoring later definition and its annotations",
                composite.name
            );
            return;
        }

        self.composites.insert(&composite.name, composite);

        for field in composite.fields.values() {
            self.register_field(field);
        }
    }

    fn register_field(&mut self, field: &'a FieldDescriptor<C>) {
        if let TypeDescriptor::Composite(composite) = &field.typ {
            self.register(composite);
        }
        for arg in field.args.values() {
            self.register_field(arg);
        }
    }
}
