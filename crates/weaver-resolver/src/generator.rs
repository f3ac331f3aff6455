// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_value::{Name, indexmap::IndexMap};
use weaver_model::{Annotation, FieldCall, FieldError};

/// Generator functions per argument, in argument declaration order.
pub type Generators<C> = IndexMap<String, Vec<Annotation<C>>>;

/// Replace the value of every argument that has generators with what the generators produce.
///
/// Arguments are processed in declaration order; a generator sees the values produced for
/// earlier arguments. The first generator of an argument receives the supplied value (if any)
/// as its previous result, later ones receive the value produced before them.
pub async fn run_generators<C>(
    generators: &Generators<C>,
    call: FieldCall<C>,
) -> Result<FieldCall<C>, FieldError> {
    if generators.is_empty() {
        return Ok(call);
    }

    let mut args = call.args.as_ref().clone();

    for (name, functions) in generators {
        let info = call.info.with_argument(name);
        let mut value = args.get(name.as_str()).cloned();

        for generator in functions {
            let generator_call = call.with_args(args.clone()).with_info(info.clone());
            value = Some(
                generator
                    .call(generator_call, value)
                    .await
                    .map_err(|err| FieldError::generator(name, err))?,
            );
        }

        if let Some(value) = value {
            args.insert(Name::new(name), value);
        }
    }

    Ok(call.with_args(args))
}
