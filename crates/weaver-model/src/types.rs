// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The compiled schema, as handed over to the host engine.

use std::fmt::{Display, Formatter};

use async_graphql_value::indexmap::IndexMap;

use crate::{
    annotation::{FieldFuture, Resolver},
    field_call::FieldCall,
    mapped_arena::{MappedArena, SlabIndex},
    scalar_type::ScalarType,
};

pub const QUERY_ROOT_TYPENAME: &str = "Query";
pub const MUTATION_ROOT_TYPENAME: &str = "Mutation";

pub type TypeIndex<C> = SlabIndex<CompiledType<C>>;

#[derive(Debug)]
pub enum BaseFieldType<C> {
    Scalar(ScalarType),
    Composite {
        type_id: TypeIndex<C>,
        type_name: String,
    },
}

/// A base type with its modifiers. Modifiers are applied base -> required -> list, so a
/// required list field is a list of non-null items (`[T!]`).
#[derive(Debug)]
pub enum FieldType<C> {
    Plain(BaseFieldType<C>),
    NonNull(Box<FieldType<C>>),
    List(Box<FieldType<C>>),
}

impl<C> FieldType<C> {
    pub fn base(&self) -> &BaseFieldType<C> {
        match self {
            FieldType::Plain(base) => base,
            FieldType::NonNull(underlying) | FieldType::List(underlying) => underlying.base(),
        }
    }

    pub fn type_name(&self) -> &str {
        match self.base() {
            BaseFieldType::Scalar(scalar) => scalar.name(),
            BaseFieldType::Composite { type_name, .. } => type_name,
        }
    }

    pub fn type_id(&self) -> Option<TypeIndex<C>> {
        match self.base() {
            BaseFieldType::Scalar(_) => None,
            BaseFieldType::Composite { type_id, .. } => Some(*type_id),
        }
    }

    pub fn is_list(&self) -> bool {
        match self {
            FieldType::Plain(_) => false,
            FieldType::List(_) => true,
            FieldType::NonNull(underlying) => underlying.is_list(),
        }
    }
}

impl<C> Display for FieldType<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Plain(_) => f.write_str(self.type_name()),
            FieldType::NonNull(underlying) => write!(f, "{underlying}!"),
            FieldType::List(underlying) => write!(f, "[{underlying}]"),
        }
    }
}

#[derive(Debug)]
pub enum CompiledType<C> {
    Object(ObjectType<C>),
    InputObject(InputObjectType<C>),
}

impl<C> CompiledType<C> {
    pub fn name(&self) -> &str {
        match self {
            CompiledType::Object(object) => &object.name,
            CompiledType::InputObject(input) => &input.name,
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self, CompiledType::InputObject(_))
    }

    pub fn as_object(&self) -> Option<&ObjectType<C>> {
        match self {
            CompiledType::Object(object) => Some(object),
            CompiledType::InputObject(_) => None,
        }
    }

    pub fn as_input_object(&self) -> Option<&InputObjectType<C>> {
        match self {
            CompiledType::Object(_) => None,
            CompiledType::InputObject(input) => Some(input),
        }
    }
}

#[derive(Debug)]
pub struct ObjectType<C> {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, ObjectField<C>>,
}

#[derive(Debug)]
pub struct InputObjectType<C> {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, InputField<C>>,
}

#[derive(Debug)]
pub struct ObjectField<C> {
    pub name: String,
    pub description: Option<String>,
    pub typ: FieldType<C>,
    pub args: IndexMap<String, InputField<C>>,
    /// `None` means the engine's default (parent property) resolution.
    pub resolver: Option<Resolver<C>>,
    /// Whether `resolver` was replaced by an intercepted resolver.
    pub intercepted: bool,
}

impl<C: 'static> ObjectField<C> {
    pub fn resolve(&self, call: FieldCall<C>) -> FieldFuture {
        match &self.resolver {
            Some(resolver) => resolver.call(call),
            None => Resolver::default_field().call(call),
        }
    }
}

#[derive(Debug)]
pub struct InputField<C> {
    pub name: String,
    pub description: Option<String>,
    pub typ: FieldType<C>,
}

/// The output of a schema compilation.
///
/// All composite types live in `types`; fields refer to them by index, so two fields with the
/// same named type share a single compiled type.
#[derive(Debug)]
pub struct CompiledSchema<C> {
    pub types: MappedArena<CompiledType<C>>,
    pub query: TypeIndex<C>,
    pub mutation: Option<TypeIndex<C>>,
}

impl<C> CompiledSchema<C> {
    pub fn query_type(&self) -> Option<&ObjectType<C>> {
        self.types[self.query].as_object()
    }

    pub fn mutation_type(&self) -> Option<&ObjectType<C>> {
        self.mutation.and_then(|id| self.types[id].as_object())
    }

    pub fn get_type(&self, name: &str) -> Option<&CompiledType<C>> {
        self.types.get_by_key(name)
    }

    pub fn object(&self, name: &str) -> Option<&ObjectType<C>> {
        self.get_type(name).and_then(CompiledType::as_object)
    }

    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&ObjectField<C>> {
        self.object(type_name)
            .and_then(|object| object.fields.get(field_name))
    }
}
