// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! A `typed_generational_arena::Arena` keyed by name.
//!
//! Compiled types and argument trees are addressed both by name (while compiling, to find out
//! if a type has already been constructed) and by index (from the fields and branches that
//! reference them). Reserving a slot under a name before its contents are known is what lets
//! a self-referential type point at itself: the index exists as soon as the slot is added.

use std::{collections::HashMap, ops};

use typed_generational_arena::{Arena, IgnoreGeneration, Index};

pub type Slab<T> = Arena<T, usize, IgnoreGeneration>;
pub type SlabIndex<T> = Index<T, usize, IgnoreGeneration>;

#[derive(Debug)]
pub struct MappedArena<V> {
    values: Slab<V>,
    map: HashMap<String, SlabIndex<V>>,
}

impl<V> MappedArena<V> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn get_id(&self, key: &str) -> Option<SlabIndex<V>> {
        self.map.get(key).copied()
    }

    pub fn get_by_key(&self, key: &str) -> Option<&V> {
        self.get_id(key).map(|id| &self[id])
    }

    pub fn get_by_key_mut(&mut self, key: &str) -> Option<&mut V> {
        let id = self.get_id(key)?;
        Some(&mut self[id])
    }

    /// Add a value under `key`. If the key is already taken, the existing index is returned and
    /// `value` is dropped.
    pub fn add(&mut self, key: &str, value: V) -> SlabIndex<V> {
        if let Some(existing) = self.get_id(key) {
            return existing;
        }

        let id = self.values.insert(value);
        self.map.insert(key.to_string(), id);
        id
    }

    pub fn iter(&self) -> typed_generational_arena::Iter<'_, V, usize, IgnoreGeneration> {
        self.values.iter()
    }
}

impl<V> Default for MappedArena<V> {
    fn default() -> Self {
        MappedArena {
            values: Slab::new(),
            map: HashMap::default(),
        }
    }
}

impl<V> ops::Index<SlabIndex<V>> for MappedArena<V> {
    type Output = V;

    #[inline]
    fn index(&self, id: SlabIndex<V>) -> &V {
        &self.values[id]
    }
}

impl<V> ops::IndexMut<SlabIndex<V>> for MappedArena<V> {
    #[inline]
    fn index_mut(&mut self, id: SlabIndex<V>) -> &mut V {
        &mut self.values[id]
    }
}
