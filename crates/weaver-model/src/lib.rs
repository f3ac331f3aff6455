// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub mod annotation;
pub mod arg_tree;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod field_call;
pub mod mapped_arena;
pub mod scalar_type;
pub mod type_definition;
pub mod types;
pub mod util;

pub use annotation::{Annotation, Annotations, FieldFuture, Resolver};
pub use config::{Config, Phase};
pub use descriptor::{CompositeDescriptor, FieldDescriptor, SchemaDescriptor, TypeDescriptor};
pub use error::FieldError;
pub use field_call::{Arguments, FieldCall, ResolveInfo};
pub use scalar_type::ScalarType;
