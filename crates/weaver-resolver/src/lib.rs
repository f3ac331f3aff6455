// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Runtime side of field interception: sequential chains, the `or` combinator, argument
//! validation over nested inputs, generators and the resolver wrapper that ties them together.

mod argument_validation;
mod chain;
mod conditionals;
mod generator;
mod interception;

pub use argument_validation::run_arg_tree;
pub use chain::{annotation_chain, chain};
pub use conditionals::or;
pub use generator::{Generators, run_generators};
pub use interception::{FieldInterception, InterceptedResolver};
