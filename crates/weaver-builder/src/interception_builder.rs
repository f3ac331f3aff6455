// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use weaver_model::{Annotation, Config, FieldDescriptor, Phase};
use weaver_resolver::{FieldInterception, Generators};

use crate::arg_tree_builder::ArgTreeBuilder;

/// Gather the functions configured for each phase of a field.
///
/// Returns `None` when nothing matched, in which case the field keeps its resolver as is.
pub fn plan_interception<'a, C>(
    field: &'a FieldDescriptor<C>,
    arg_trees: &mut ArgTreeBuilder<'a, '_, C>,
    config: &Config,
) -> Option<FieldInterception<C>> {
    let interception = FieldInterception {
        arguments: arg_trees.build(&field.args),
        pre: phase_functions(field, config, Phase::Pre),
        generators: generators(field, config),
        primary: field.resolve.clone(),
        post: phase_functions(field, config, Phase::Post),
    };

    (!interception.is_empty()).then_some(interception)
}

fn phase_functions<C>(
    field: &FieldDescriptor<C>,
    config: &Config,
    phase: Phase,
) -> Vec<Annotation<C>> {
    field
        .annotations_for(config.keys(phase))
        .cloned()
        .collect()
}

// Generators apply to top-level arguments only.
fn generators<C>(field: &FieldDescriptor<C>, config: &Config) -> Generators<C> {
    field
        .args
        .iter()
        .filter_map(|(name, arg)| {
            let functions = phase_functions(arg, config, Phase::Generate);
            (!functions.is_empty()).then(|| (name.clone(), functions))
        })
        .collect()
}
