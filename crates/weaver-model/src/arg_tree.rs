// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_value::indexmap::IndexMap;

use crate::{
    annotation::Annotation,
    mapped_arena::{MappedArena, SlabIndex},
};

/// Argument functions of one field (or of one input type), mirroring the argument structure.
///
/// Only arguments that have functions, or whose input type has functions somewhere below, get
/// a branch.
#[derive(Debug)]
pub struct ArgTree<C> {
    pub branches: IndexMap<String, ArgBranch<C>>,
}

#[derive(Debug)]
pub struct ArgBranch<C> {
    pub functions: Vec<Annotation<C>>,
    /// The tree of the argument's input type, if it has one.
    pub children: Option<ArgTreeIndex<C>>,
}

pub type ArgTreeIndex<C> = SlabIndex<ArgTree<C>>;

/// Trees of all input types reachable from arguments, keyed by input type name. Input types
/// may be recursive, so branches refer to their children by index.
pub type ArgForest<C> = MappedArena<ArgTree<C>>;

impl<C> ArgTree<C> {
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

impl<C> Default for ArgTree<C> {
    fn default() -> Self {
        Self {
            branches: IndexMap::new(),
        }
    }
}
