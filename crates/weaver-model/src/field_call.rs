// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_graphql_value::{ConstValue, Name, indexmap::IndexMap};

pub type Arguments = IndexMap<Name, ConstValue>;

/// Where in the schema a function is being invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveInfo {
    pub parent_type: String,
    pub field_name: String,
    /// Path into the (possibly nested) arguments when running argument functions, such as
    /// `["filter", "name"]`. Empty for field-level functions and resolvers.
    pub argument_path: Vec<String>,
}

impl ResolveInfo {
    pub fn new(parent_type: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            parent_type: parent_type.into(),
            field_name: field_name.into(),
            argument_path: vec![],
        }
    }

    pub fn with_argument(&self, argument: &str) -> Self {
        let mut argument_path = self.argument_path.clone();
        argument_path.push(argument.to_string());

        Self {
            argument_path,
            ..self.clone()
        }
    }

    /// The innermost argument being processed, if any.
    pub fn argument(&self) -> Option<&str> {
        self.argument_path.last().map(String::as_str)
    }

    /// A human readable location, such as `Query.users(filter.name)`.
    pub fn path(&self) -> String {
        if self.argument_path.is_empty() {
            format!("{}.{}", self.parent_type, self.field_name)
        } else {
            format!(
                "{}.{}({})",
                self.parent_type,
                self.field_name,
                self.argument_path.join(".")
            )
        }
    }
}

/// The usual resolve parameters, handed to resolvers and annotation functions alike.
///
/// Every part sits behind an `Arc` so that a call can be cloned into a detached task.
pub struct FieldCall<C> {
    pub root: Arc<ConstValue>,
    pub args: Arc<Arguments>,
    pub context: Arc<C>,
    pub info: Arc<ResolveInfo>,
}

impl<C> FieldCall<C> {
    pub fn new(root: ConstValue, args: Arguments, context: Arc<C>, info: ResolveInfo) -> Self {
        Self {
            root: Arc::new(root),
            args: Arc::new(args),
            context,
            info: Arc::new(info),
        }
    }

    pub fn arg(&self, name: &str) -> Option<&ConstValue> {
        self.args.get(name)
    }

    pub fn with_args(&self, args: Arguments) -> Self {
        Self {
            args: Arc::new(args),
            ..self.clone()
        }
    }

    pub fn with_info(&self, info: ResolveInfo) -> Self {
        Self {
            info: Arc::new(info),
            ..self.clone()
        }
    }
}

impl<C> Clone for FieldCall<C> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            args: self.args.clone(),
            context: self.context.clone(),
            info: self.info.clone(),
        }
    }
}

impl<C> std::fmt::Debug for FieldCall<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldCall")
            .field("root", &self.root)
            .field("args", &self.args)
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}
