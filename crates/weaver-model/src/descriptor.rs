// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The declarative schema handed to the builder.
//!
//! A schema is a set of root operations (queries and mutations) whose types form a graph. Each
//! field or argument may carry annotation functions under arbitrary keys; a
//! [`Config`](crate::config::Config) decides which keys run in which phase.

use async_graphql_value::indexmap::IndexMap;

use crate::{
    annotation::{Annotation, Annotations, Resolver},
    scalar_type::ScalarType,
};

#[derive(Debug)]
pub enum TypeDescriptor<C> {
    Scalar(ScalarType),
    /// A reference to a composite type defined elsewhere in the schema (or to a scalar by
    /// name). Cyclic type graphs are expressed this way.
    Named(String),
    Composite(CompositeDescriptor<C>),
}

impl<C> TypeDescriptor<C> {
    pub fn named(name: impl Into<String>) -> Self {
        TypeDescriptor::Named(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            TypeDescriptor::Scalar(scalar) => scalar.name(),
            TypeDescriptor::Named(name) => name,
            TypeDescriptor::Composite(composite) => &composite.name,
        }
    }
}

impl<C> From<ScalarType> for TypeDescriptor<C> {
    fn from(scalar: ScalarType) -> Self {
        TypeDescriptor::Scalar(scalar)
    }
}

impl<C> From<CompositeDescriptor<C>> for TypeDescriptor<C> {
    fn from(composite: CompositeDescriptor<C>) -> Self {
        TypeDescriptor::Composite(composite)
    }
}

#[derive(Debug)]
pub struct CompositeDescriptor<C> {
    pub name: String,
    pub description: Option<String>,
    /// Build an input object (usable as an argument type) rather than an output object.
    pub input: bool,
    pub fields: IndexMap<String, FieldDescriptor<C>>,
}

impl<C> CompositeDescriptor<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input: false,
            fields: IndexMap::new(),
        }
    }

    pub fn input(name: impl Into<String>) -> Self {
        Self {
            input: true,
            ..Self::new(name)
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, field: FieldDescriptor<C>) -> Self {
        self.fields.insert(name.into(), field);
        self
    }
}

/// A field of a composite type, an argument, or a root operation.
#[derive(Debug)]
pub struct FieldDescriptor<C> {
    pub typ: TypeDescriptor<C>,
    pub description: Option<String>,
    pub list: bool,
    pub required: bool,
    pub args: IndexMap<String, FieldDescriptor<C>>,
    pub resolve: Option<Resolver<C>>,
    pub annotations: IndexMap<String, Annotations<C>>,
}

impl<C> FieldDescriptor<C> {
    pub fn new(typ: impl Into<TypeDescriptor<C>>) -> Self {
        Self {
            typ: typ.into(),
            description: None,
            list: false,
            required: false,
            args: IndexMap::new(),
            resolve: None,
            annotations: IndexMap::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn arg(mut self, name: impl Into<String>, arg: FieldDescriptor<C>) -> Self {
        self.args.insert(name.into(), arg);
        self
    }

    pub fn resolve(mut self, resolver: Resolver<C>) -> Self {
        self.resolve = Some(resolver);
        self
    }

    /// Attach function(s) under `key`. Annotating the same key again appends.
    pub fn annotate(mut self, key: impl Into<String>, value: impl Into<Annotations<C>>) -> Self {
        let key = key.into();
        let value = value.into();

        match self.annotations.get_mut(&key) {
            Some(existing) => {
                for annotation in value.into_vec() {
                    existing.push(annotation);
                }
            }
            None => {
                self.annotations.insert(key, value);
            }
        }
        self
    }

    /// Every function found under any of `keys`, in key order and then declaration order.
    pub fn annotations_for<'a>(
        &'a self,
        keys: &'a [String],
    ) -> impl Iterator<Item = &'a Annotation<C>> + 'a {
        keys.iter()
            .filter_map(|key| self.annotations.get(key))
            .flat_map(|annotations| annotations.as_slice())
    }

    /// Does this field carry anything under at least one of `keys`?
    pub fn has_keys(&self, keys: &[String]) -> bool {
        crate::util::has_keys(&self.annotations, keys)
    }
}

#[derive(Debug)]
pub struct SchemaDescriptor<C> {
    pub queries: IndexMap<String, FieldDescriptor<C>>,
    pub mutations: IndexMap<String, FieldDescriptor<C>>,
    /// Composite types that may be referenced by name. Inline composites are registered
    /// automatically and don't need to be listed.
    pub types: IndexMap<String, CompositeDescriptor<C>>,
}

impl<C> SchemaDescriptor<C> {
    pub fn new() -> Self {
        Self {
            queries: IndexMap::new(),
            mutations: IndexMap::new(),
            types: IndexMap::new(),
        }
    }

    pub fn query(mut self, name: impl Into<String>, field: FieldDescriptor<C>) -> Self {
        self.queries.insert(name.into(), field);
        self
    }

    pub fn mutation(mut self, name: impl Into<String>, field: FieldDescriptor<C>) -> Self {
        self.mutations.insert(name.into(), field);
        self
    }

    pub fn typ(mut self, composite: CompositeDescriptor<C>) -> Self {
        self.types.insert(composite.name.clone(), composite);
        self
    }
}

impl<C> Default for SchemaDescriptor<C> {
    fn default() -> Self {
        Self::new()
    }
}
