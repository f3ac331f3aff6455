// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Type graph walk.
//!
//! Composite types are compiled at most once per name. A type's slot in the arena is reserved
//! before its fields are resolved, so a field referring back to the type (directly or through
//! other types) finds the reserved slot instead of recursing forever.

use async_graphql_value::indexmap::IndexMap;
use tracing::debug;

use weaver_model::{
    CompositeDescriptor, FieldDescriptor, ScalarType, TypeDescriptor,
    types::{
        BaseFieldType, CompiledType, FieldType, InputField, InputObjectType, MUTATION_ROOT_TYPENAME,
        ObjectField, ObjectType, QUERY_ROOT_TYPENAME, TypeIndex,
    },
    util::map_object,
};

use crate::{
    error::CompileError,
    interception_builder::plan_interception,
    schema_builder::{PendingInterception, SchemaBuilding},
};

impl<'a, C> SchemaBuilding<'a, '_, C> {
    /// Compile a root operation type (`Query` or `Mutation`) from the operation fields.
    pub fn build_root(
        &mut self,
        name: &str,
        fields: &'a IndexMap<String, FieldDescriptor<C>>,
    ) -> Result<TypeIndex<C>, CompileError> {
        let type_id = self.types.add(
            name,
            CompiledType::Object(ObjectType {
                name: name.to_string(),
                description: None,
                fields: IndexMap::new(),
            }),
        );
        self.expand_object(type_id, name, fields)?;

        Ok(type_id)
    }

    pub fn resolve_type(
        &mut self,
        typ: &'a TypeDescriptor<C>,
        referenced_by: &str,
    ) -> Result<BaseFieldType<C>, CompileError> {
        if let TypeDescriptor::Scalar(scalar) = typ {
            return Ok(BaseFieldType::Scalar(*scalar));
        }
        if let TypeDescriptor::Named(name) = typ
            && let Some(scalar) = ScalarType::from_name(name)
        {
            return Ok(BaseFieldType::Scalar(scalar));
        }

        let composite =
            self.registry
                .lookup(typ)
                .ok_or_else(|| CompileError::UnresolvedType {
                    type_name: typ.name().to_string(),
                    referenced_by: referenced_by.to_string(),
                })?;
        let type_name = composite.name.as_str();

        if type_name == QUERY_ROOT_TYPENAME || type_name == MUTATION_ROOT_TYPENAME {
            return Err(CompileError::ReservedTypeName(type_name.to_string()));
        }

        let type_id = match self.types.get_id(type_name) {
            Some(type_id) => {
                debug!(type_name, "Type cache hit");
                type_id
            }
            None => self.build_composite(composite)?,
        };

        Ok(BaseFieldType::Composite {
            type_id,
            type_name: type_name.to_string(),
        })
    }

    /// Resolve the field's type and apply its modifiers: first `required` (the item is
    /// non-null), then `list`. A field that is both is `[T!]`.
    pub fn resolve_field_type(
        &mut self,
        field: &'a FieldDescriptor<C>,
        referenced_by: &str,
    ) -> Result<FieldType<C>, CompileError> {
        let mut typ = FieldType::Plain(self.resolve_type(&field.typ, referenced_by)?);

        if field.required {
            typ = FieldType::NonNull(Box::new(typ));
        }
        if field.list {
            typ = FieldType::List(Box::new(typ));
        }

        Ok(typ)
    }

    fn build_composite(
        &mut self,
        composite: &'a CompositeDescriptor<C>,
    ) -> Result<TypeIndex<C>, CompileError> {
        let name = composite.name.as_str();

        if name.is_empty() {
            return Err(CompileError::UnnamedType);
        }
        if composite.fields.is_empty() {
            return Err(CompileError::EmptyType(name.to_string()));
        }
        // A composite may not shadow a built-in scalar.
        if ScalarType::from_name(name).is_some() {
            return Err(CompileError::ReservedTypeName(name.to_string()));
        }

        if composite.input {
            let type_id = self.types.add(
                name,
                CompiledType::InputObject(InputObjectType {
                    name: name.to_string(),
                    description: composite.description.clone(),
                    fields: IndexMap::new(),
                }),
            );

            let fields: IndexMap<_, _> = map_object(&composite.fields, |field, field_name| {
                self.build_input_field(field_name, field, &format!("{name}.{field_name}"))
            })
            .into_iter()
            .map(|(field_name, field)| field.map(|field| (field_name, field)))
            .collect::<Result<_, _>>()?;

            if let CompiledType::InputObject(input) = &mut self.types[type_id] {
                input.fields = fields;
            }

            Ok(type_id)
        } else {
            let type_id = self.types.add(
                name,
                CompiledType::Object(ObjectType {
                    name: name.to_string(),
                    description: composite.description.clone(),
                    fields: IndexMap::new(),
                }),
            );
            self.expand_object(type_id, name, &composite.fields)?;

            Ok(type_id)
        }
    }

    fn expand_object(
        &mut self,
        type_id: TypeIndex<C>,
        type_name: &str,
        fields: &'a IndexMap<String, FieldDescriptor<C>>,
    ) -> Result<(), CompileError> {
        let mut object_fields = IndexMap::new();

        for (field_name, field) in fields {
            let object_field = self.build_object_field(type_name, field_name, field)?;

            if let Some(interception) = plan_interception(field, &mut self.arg_trees, self.config)
            {
                self.interceptions.push(PendingInterception {
                    type_id,
                    field_name: field_name.clone(),
                    interception,
                });
            }

            object_fields.insert(field_name.clone(), object_field);
        }

        if let CompiledType::Object(object) = &mut self.types[type_id] {
            object.fields = object_fields;
        }

        Ok(())
    }

    fn build_object_field(
        &mut self,
        type_name: &str,
        field_name: &str,
        field: &'a FieldDescriptor<C>,
    ) -> Result<ObjectField<C>, CompileError> {
        let location = format!("{type_name}.{field_name}");
        let typ = self.resolve_field_type(field, &location)?;

        if let Some(field_type_id) = typ.type_id()
            && self.types[field_type_id].is_input()
        {
            return Err(CompileError::InputTypeAsOutput {
                type_name: typ.type_name().to_string(),
                field: location,
            });
        }

        let mut args = IndexMap::new();
        for (arg_name, arg) in &field.args {
            let arg_location = format!("{location}({arg_name})");
            args.insert(
                arg_name.clone(),
                self.build_input_field(arg_name, arg, &arg_location)?,
            );
        }

        Ok(ObjectField {
            name: field_name.to_string(),
            description: field.description.clone(),
            typ,
            args,
            resolver: field.resolve.clone(),
            intercepted: false,
        })
    }

    // Arguments and input object fields.
    fn build_input_field(
        &mut self,
        name: &str,
        field: &'a FieldDescriptor<C>,
        location: &str,
    ) -> Result<InputField<C>, CompileError> {
        let typ = self.resolve_field_type(field, location)?;

        if let Some(field_type_id) = typ.type_id()
            && !self.types[field_type_id].is_input()
        {
            return Err(CompileError::OutputTypeAsArgument {
                type_name: typ.type_name().to_string(),
                argument: location.to_string(),
            });
        }

        Ok(InputField {
            name: name.to_string(),
            description: field.description.clone(),
            typ,
        })
    }
}
