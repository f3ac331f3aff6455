// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::future::Future;

use async_graphql_value::ConstValue;
use weaver_model::{Annotation, FieldCall, FieldError};

/// Run `step` over `items` one after another, handing each step the previous step's result.
///
/// Resolves to the last result (`None` for no items) and stops at the first error. Steps never
/// overlap: a function may rely on whatever an earlier one left in the shared context. A
/// single item can be passed as `std::iter::once(item)` or `Some(item)`.
pub async fn chain<I, T, E, F, Fut>(items: I, mut step: F) -> Result<Option<T>, E>
where
    I: IntoIterator,
    F: FnMut(I::Item, Option<T>) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut previous = None;

    for item in items {
        previous = Some(step(item, previous).await?);
    }

    Ok(previous)
}

/// Run annotation functions in order against the same call, threading each result into the next.
pub async fn annotation_chain<C>(
    annotations: &[Annotation<C>],
    call: &FieldCall<C>,
) -> Result<Option<ConstValue>, FieldError> {
    chain(annotations, |annotation, previous| {
        annotation.call(call.clone(), previous)
    })
    .await
}
