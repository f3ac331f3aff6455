// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Callables attached to a schema: annotation functions (validators, permission checks,
//! analytics, generators) and primary resolvers.

use std::{fmt::Debug, future::Future, sync::Arc};

use async_graphql_value::ConstValue;
use futures::{FutureExt, future::BoxFuture};

use crate::{error::FieldError, field_call::FieldCall};

pub type FieldFuture = BoxFuture<'static, Result<ConstValue, FieldError>>;

type AnnotationFn<C> = dyn Fn(FieldCall<C>, Option<ConstValue>) -> FieldFuture + Send + Sync;
type ResolverFn<C> = dyn Fn(FieldCall<C>) -> FieldFuture + Send + Sync;

/// A side-effect function attached to a field or argument under an annotation key.
///
/// Receives the resolve parameters and the result of the function that ran before it in the
/// same chain (`None` for the first one).
pub struct Annotation<C>(Arc<AnnotationFn<C>>);

impl<C: 'static> Annotation<C> {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(FieldCall<C>, Option<ConstValue>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ConstValue, FieldError>> + Send + 'static,
    {
        Self(Arc::new(move |call, previous| f(call, previous).boxed()))
    }
}

impl<C> Annotation<C> {
    pub fn call(&self, call: FieldCall<C>, previous: Option<ConstValue>) -> FieldFuture {
        (self.0)(call, previous)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<C> Clone for Annotation<C> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<C> Debug for Annotation<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Annotation")
    }
}

/// One function or an ordered list of them, as declared under a single annotation key.
pub enum Annotations<C> {
    Single(Annotation<C>),
    List(Vec<Annotation<C>>),
}

impl<C> Annotations<C> {
    pub fn as_slice(&self) -> &[Annotation<C>] {
        match self {
            Annotations::Single(annotation) => std::slice::from_ref(annotation),
            Annotations::List(annotations) => annotations,
        }
    }

    pub fn into_vec(self) -> Vec<Annotation<C>> {
        match self {
            Annotations::Single(annotation) => vec![annotation],
            Annotations::List(annotations) => annotations,
        }
    }

    pub fn push(&mut self, annotation: Annotation<C>) {
        match self {
            Annotations::Single(existing) => {
                *self = Annotations::List(vec![existing.clone(), annotation]);
            }
            Annotations::List(annotations) => annotations.push(annotation),
        }
    }
}

impl<C> From<Annotation<C>> for Annotations<C> {
    fn from(annotation: Annotation<C>) -> Self {
        Annotations::Single(annotation)
    }
}

impl<C> From<Vec<Annotation<C>>> for Annotations<C> {
    fn from(annotations: Vec<Annotation<C>>) -> Self {
        Annotations::List(annotations)
    }
}

impl<C> Clone for Annotations<C> {
    fn clone(&self) -> Self {
        match self {
            Annotations::Single(annotation) => Annotations::Single(annotation.clone()),
            Annotations::List(annotations) => Annotations::List(annotations.clone()),
        }
    }
}

impl<C> Debug for Annotations<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// A field's primary (business) resolver.
pub struct Resolver<C>(Arc<ResolverFn<C>>);

impl<C: 'static> Resolver<C> {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(FieldCall<C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ConstValue, FieldError>> + Send + 'static,
    {
        Self(Arc::new(move |call| f(call).boxed()))
    }

    /// Returns the property of the parent object named like the field being resolved (or
    /// `null` if there is no such property).
    pub fn default_field() -> Self {
        Self::new(|call: FieldCall<C>| {
            let value = default_field_value(&call);
            async move { Ok(value) }
        })
    }
}

impl<C> Resolver<C> {
    pub fn call(&self, call: FieldCall<C>) -> FieldFuture {
        (self.0)(call)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<C> Clone for Resolver<C> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<C> Debug for Resolver<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Resolver")
    }
}

pub fn default_field_value<C>(call: &FieldCall<C>) -> ConstValue {
    match call.root.as_ref() {
        ConstValue::Object(fields) => fields
            .get(call.info.field_name.as_str())
            .cloned()
            .unwrap_or(ConstValue::Null),
        _ => ConstValue::Null,
    }
}
