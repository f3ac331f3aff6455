// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::hash::Hash;

use async_graphql_value::indexmap::IndexMap;

/// Map the values of an ordered map, keeping its keys (and their order).
pub fn map_object<'m, K, V, U>(
    map: &'m IndexMap<K, V>,
    mut f: impl FnMut(&'m V, &'m K) -> U,
) -> IndexMap<K, U>
where
    K: Clone + Hash + Eq,
{
    map.iter()
        .map(|(key, value)| (key.clone(), f(value, key)))
        .collect()
}

/// Is any of `keys` present in `map`?
pub fn has_keys<V>(map: &IndexMap<String, V>, keys: &[String]) -> bool {
    keys.iter().any(|key| map.contains_key(key))
}
