// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Expose a compiled schema as GraphQL type definitions, for engines and introspection that
//! consume the `async_graphql_parser` representation.

use std::collections::BTreeSet;

use async_graphql_parser::{
    Pos, Positioned,
    types::{
        BaseType, FieldDefinition, InputObjectType as InputObjectTypeDefinition,
        InputValueDefinition, ObjectType as ObjectTypeDefinition, Type, TypeDefinition, TypeKind,
    },
};
use async_graphql_value::Name;

use crate::{
    scalar_type::ScalarType,
    types::{
        BaseFieldType, CompiledSchema, CompiledType, FieldType, InputField, InputObjectType,
        ObjectField, ObjectType,
    },
};

pub trait TypeDefinitionProvider {
    fn type_definition(&self) -> TypeDefinition;
}

pub trait FieldDefinitionProvider {
    fn field_definition(&self) -> FieldDefinition;
}

pub trait InputValueProvider {
    fn input_value(&self) -> InputValueDefinition;
}

pub fn default_positioned<T>(value: T) -> Positioned<T> {
    Positioned::new(value, Pos::default())
}

pub fn default_positioned_name(value: &str) -> Positioned<Name> {
    default_positioned(Name::new(value))
}

fn positioned_description(description: &Option<String>) -> Option<Positioned<String>> {
    description.clone().map(default_positioned)
}

impl<C> FieldType<C> {
    pub fn to_type(&self) -> Type {
        match self {
            FieldType::Plain(_) => Type {
                base: BaseType::Named(Name::new(self.type_name())),
                nullable: true,
            },
            FieldType::NonNull(underlying) => Type {
                nullable: false,
                ..underlying.to_type()
            },
            FieldType::List(underlying) => Type {
                base: BaseType::List(Box::new(underlying.to_type())),
                nullable: true,
            },
        }
    }
}

impl<C> InputValueProvider for InputField<C> {
    fn input_value(&self) -> InputValueDefinition {
        InputValueDefinition {
            description: positioned_description(&self.description),
            name: default_positioned_name(&self.name),
            ty: default_positioned(self.typ.to_type()),
            default_value: None,
            directives: vec![],
        }
    }
}

impl<C> FieldDefinitionProvider for ObjectField<C> {
    fn field_definition(&self) -> FieldDefinition {
        FieldDefinition {
            description: positioned_description(&self.description),
            name: default_positioned_name(&self.name),
            arguments: self
                .args
                .values()
                .map(|arg| default_positioned(arg.input_value()))
                .collect(),
            ty: default_positioned(self.typ.to_type()),
            directives: vec![],
        }
    }
}

impl<C> TypeDefinitionProvider for ObjectType<C> {
    fn type_definition(&self) -> TypeDefinition {
        let fields = self
            .fields
            .values()
            .map(|field| default_positioned(field.field_definition()))
            .collect();

        TypeDefinition {
            extend: false,
            description: positioned_description(&self.description),
            name: default_positioned_name(&self.name),
            directives: vec![],
            kind: TypeKind::Object(ObjectTypeDefinition {
                implements: vec![],
                fields,
            }),
        }
    }
}

impl<C> TypeDefinitionProvider for InputObjectType<C> {
    fn type_definition(&self) -> TypeDefinition {
        let fields = self
            .fields
            .values()
            .map(|field| default_positioned(field.input_value()))
            .collect();

        TypeDefinition {
            extend: false,
            description: positioned_description(&self.description),
            name: default_positioned_name(&self.name),
            directives: vec![],
            kind: TypeKind::InputObject(InputObjectTypeDefinition { fields }),
        }
    }
}

impl TypeDefinitionProvider for ScalarType {
    fn type_definition(&self) -> TypeDefinition {
        TypeDefinition {
            extend: false,
            description: None,
            name: default_positioned_name(self.name()),
            directives: vec![],
            kind: TypeKind::Scalar,
        }
    }
}

impl<C> TypeDefinitionProvider for CompiledType<C> {
    fn type_definition(&self) -> TypeDefinition {
        match self {
            CompiledType::Object(object) => object.type_definition(),
            CompiledType::InputObject(input) => input.type_definition(),
        }
    }
}

impl<C> CompiledSchema<C> {
    /// Definitions of every composite type plus the custom (non-builtin) scalars in use, sorted
    /// by name so that the output is stable.
    pub fn type_definitions(&self) -> Vec<TypeDefinition> {
        let mut custom_scalars = BTreeSet::new();
        let mut record = |typ: &FieldType<C>| {
            if let BaseFieldType::Scalar(scalar) = typ.base()
                && !scalar.is_builtin()
            {
                custom_scalars.insert(scalar.name());
            }
        };

        for (_, compiled) in self.types.iter() {
            match compiled {
                CompiledType::Object(object) => {
                    for field in object.fields.values() {
                        record(&field.typ);
                        field.args.values().for_each(|arg| record(&arg.typ));
                    }
                }
                CompiledType::InputObject(input) => {
                    input.fields.values().for_each(|field| record(&field.typ));
                }
            }
        }

        let mut definitions: Vec<TypeDefinition> = self
            .types
            .iter()
            .map(|(_, compiled)| compiled.type_definition())
            .chain(
                custom_scalars
                    .into_iter()
                    .filter_map(ScalarType::from_name)
                    .map(|scalar| scalar.type_definition()),
            )
            .collect();

        definitions.sort_by(|a, b| a.name.node.as_str().cmp(b.name.node.as_str()));
        definitions
    }
}
