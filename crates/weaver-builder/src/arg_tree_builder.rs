// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashSet;

use async_graphql_value::indexmap::IndexMap;

use weaver_model::{
    CompositeDescriptor, FieldDescriptor,
    arg_tree::{ArgBranch, ArgForest, ArgTree, ArgTreeIndex},
};

use crate::type_registry::TypeRegistry;

/// Builds argument trees for fields, sharing one tree per input type across the whole schema.
pub struct ArgTreeBuilder<'a, 'r, C> {
    registry: &'r TypeRegistry<'a, C>,
    keys: &'r [String],
    forest: ArgForest<C>,
}

impl<'a, 'r, C> ArgTreeBuilder<'a, 'r, C> {
    pub fn new(registry: &'r TypeRegistry<'a, C>, keys: &'r [String]) -> Self {
        Self {
            registry,
            keys,
            forest: ArgForest::default(),
        }
    }

    pub fn into_forest(self) -> ArgForest<C> {
        self.forest
    }

    /// The tree for a set of arguments, or `None` if no argument (however deeply nested) carries
    /// a function under the configured keys.
    pub fn build(&mut self, args: &'a IndexMap<String, FieldDescriptor<C>>) -> Option<ArgTree<C>> {
        let keys = self.keys;
        if keys.is_empty() {
            return None;
        }

        let branches: IndexMap<_, _> = args
            .iter()
            .filter_map(|(name, arg)| {
                let functions: Vec<_> = arg.annotations_for(keys).cloned().collect();
                let children = self.input_tree(arg);

                (!functions.is_empty() || children.is_some())
                    .then(|| (name.clone(), ArgBranch { functions, children }))
            })
            .collect();

        (!branches.is_empty()).then_some(ArgTree { branches })
    }

    fn input_tree(&mut self, arg: &'a FieldDescriptor<C>) -> Option<ArgTreeIndex<C>> {
        let input = self.registry.lookup(&arg.typ).filter(|c| c.input)?;

        if let Some(existing) = self.forest.get_id(&input.name) {
            // Only types that reach a function get a slot, so a tree still being built (for a
            // cyclic input type) will end up non-empty.
            return Some(existing);
        }

        if !self.reaches_functions(input, &mut HashSet::new()) {
            return None;
        }

        let id = self.forest.add(&input.name, ArgTree::default());
        let tree = self.build(&input.fields);
        self.forest[id] = tree.unwrap_or_default();

        Some(id)
    }

    fn reaches_functions(
        &self,
        input: &'a CompositeDescriptor<C>,
        visited: &mut HashSet<&'a str>,
    ) -> bool {
        if self.forest.contains_key(&input.name) {
            return true;
        }
        if !visited.insert(&input.name) {
            return false;
        }

        input.fields.values().any(|field| {
            field.has_keys(self.keys)
                || self
                    .registry
                    .lookup(&field.typ)
                    .filter(|c| c.input)
                    .is_some_and(|nested| self.reaches_functions(nested, visited))
        })
    }
}
