// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use weaver_model::{Annotation, Annotations, FieldError};

/// Logical OR of annotation functions, for use inside a chain (for example "is admin OR is
/// the owner").
///
/// Alternatives are tried in order, one at a time, and the first success wins; later
/// alternatives are not invoked. If every alternative fails, the error of the last one is
/// returned.
pub fn or<C: Send + Sync + 'static>(alternatives: impl Into<Annotations<C>>) -> Annotation<C> {
    let alternatives = Arc::new(alternatives.into().into_vec());

    Annotation::new(move |call, previous| {
        let alternatives = alternatives.clone();

        async move {
            let mut last_error = None;

            for alternative in alternatives.iter() {
                match alternative.call(call.clone(), previous.clone()).await {
                    Ok(value) => return Ok(value),
                    Err(err) => last_error = Some(err),
                }
            }

            Err(last_error.unwrap_or_else(|| FieldError::new("No alternatives to evaluate")))
        }
    })
}
