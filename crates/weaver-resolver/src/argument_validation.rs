// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_value::ConstValue;
use async_recursion::async_recursion;
use weaver_model::{
    FieldCall, FieldError,
    arg_tree::{ArgForest, ArgTree},
};

use crate::chain::annotation_chain;

/// Run the argument functions of `tree` over the arguments actually supplied in `call`.
///
/// Branches are visited in declaration order. A branch whose argument was not supplied is
/// skipped together with everything below it, so a validator on an optional argument only
/// runs when a caller passes that argument. Functions see the arguments of their own level
/// (the nested object for nested input fields) and an info whose argument path points at the
/// argument being processed.
#[async_recursion]
pub async fn run_arg_tree<C: Send + Sync + 'static>(
    tree: &ArgTree<C>,
    forest: &ArgForest<C>,
    call: &FieldCall<C>,
) -> Result<(), FieldError> {
    for (name, branch) in &tree.branches {
        let Some(value) = call.arg(name) else {
            continue;
        };

        let branch_call = call.with_info(call.info.with_argument(name));

        annotation_chain(&branch.functions, &branch_call)
            .await
            .map_err(|err| FieldError::validation(branch_call.info.path(), err))?;

        if let Some(children) = branch.children {
            let subtree = &forest[children];

            match value {
                ConstValue::Object(fields) => {
                    let nested_call = branch_call.with_args(fields.clone());
                    run_arg_tree(subtree, forest, &nested_call).await?;
                }
                ConstValue::List(elems) => {
                    for elem in elems {
                        if let ConstValue::Object(fields) = elem {
                            let nested_call = branch_call.with_args(fields.clone());
                            run_arg_tree(subtree, forest, &nested_call).await?;
                        }
                    }
                }
                _ => {}
            }
        }
    }

    Ok(())
}
