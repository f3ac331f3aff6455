// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_graphql_value::ConstValue;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use weaver_model::{
    Annotation, FieldCall, FieldError, Resolver,
    annotation::default_field_value,
    arg_tree::{ArgForest, ArgTree},
};

use crate::{
    argument_validation::run_arg_tree,
    chain::annotation_chain,
    generator::{Generators, run_generators},
};

/// Everything that must happen around one field's primary resolver.
pub struct FieldInterception<C> {
    /// Argument functions, run over supplied arguments only.
    pub arguments: Option<ArgTree<C>>,
    pub pre: Vec<Annotation<C>>,
    pub generators: Generators<C>,
    /// The declared resolver, `None` for the default (parent property) resolver.
    pub primary: Option<Resolver<C>>,
    /// Run after the primary resolver without delaying its result.
    pub post: Vec<Annotation<C>>,
}

impl<C> FieldInterception<C> {
    pub fn is_empty(&self) -> bool {
        self.arguments.is_none()
            && self.pre.is_empty()
            && self.generators.is_empty()
            && self.post.is_empty()
    }
}

/// A resolver that wraps the primary one with the interception phases.
///
/// The phases run strictly in order:
///
/// 1. argument functions (only for supplied arguments)
/// 2. pre functions
/// 3. generators
/// 4. the primary resolver, whose result is the result of the field
/// 5. post functions, launched on a background task and not awaited
///
/// A failure in 1-3 fails the field; the primary resolver and post functions don't run.
/// Failures in 5 are logged and otherwise ignored.
pub struct InterceptedResolver<C> {
    interception: FieldInterception<C>,
    arg_forest: Arc<ArgForest<C>>,
}

impl<C: Send + Sync + 'static> InterceptedResolver<C> {
    pub fn new(interception: FieldInterception<C>, arg_forest: Arc<ArgForest<C>>) -> Self {
        Self {
            interception,
            arg_forest,
        }
    }

    pub fn into_resolver(self) -> Resolver<C> {
        let intercepted = Arc::new(self);

        Resolver::new(move |call| {
            let intercepted = intercepted.clone();
            async move { intercepted.resolve(call).await }
        })
    }

    pub async fn resolve(&self, call: FieldCall<C>) -> Result<ConstValue, FieldError> {
        let interception = &self.interception;

        if let Some(arguments) = &interception.arguments {
            run_arg_tree(arguments, &self.arg_forest, &call).await?;
        }

        annotation_chain(&interception.pre, &call)
            .await
            .map_err(|err| FieldError::validation(call.info.path(), err))?;

        let call = run_generators(&interception.generators, call).await?;

        let result = match &interception.primary {
            Some(primary) => primary.call(call.clone()).await?,
            None => default_field_value(&call),
        };

        self.launch_post(call);

        Ok(result)
    }

    fn launch_post(&self, call: FieldCall<C>) {
        if self.interception.post.is_empty() {
            return;
        }

        let post = self.interception.post.clone();
        let path = call.info.path();

        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    match annotation_chain(&post, &call).await {
                        Ok(_) => debug!(field = %path, "Post chain completed"),
                        Err(err) => warn!(field = %path, "Post chain failed: {err}"),
                    }
                });
            }
            Err(_) => {
                warn!(field = %path, "No tokio runtime available, skipping post chain");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Mutex, time::Duration};

    use async_graphql_value::{Name, indexmap::IndexMap};
    use tokio::sync::mpsc;
    use weaver_model::{Arguments, ResolveInfo, arg_tree::ArgBranch};

    use super::*;

    type Calls = Arc<Mutex<Vec<String>>>;

    fn spy(name: &'static str, calls: &Calls) -> Annotation<()> {
        let calls = calls.clone();
        Annotation::new(move |_: FieldCall<()>, _| {
            calls.lock().unwrap().push(name.to_string());
            async { Ok(ConstValue::Null) }
        })
    }

    fn failing(name: &'static str, calls: &Calls) -> Annotation<()> {
        let calls = calls.clone();
        Annotation::new(move |_: FieldCall<()>, _| {
            calls.lock().unwrap().push(name.to_string());
            async move { Err(FieldError::new(format!("{name} failed"))) }
        })
    }

    fn echo_primary(calls: &Calls) -> Resolver<()> {
        let calls = calls.clone();
        Resolver::new(move |call: FieldCall<()>| {
            calls.lock().unwrap().push("primary".to_string());
            let value = call.arg("firstArg").cloned().unwrap_or(ConstValue::Null);
            async move { Ok(value) }
        })
    }

    fn validated_first_arg(validator: Annotation<()>) -> ArgTree<()> {
        ArgTree {
            branches: IndexMap::from([(
                "firstArg".to_string(),
                ArgBranch {
                    functions: vec![validator],
                    children: None,
                },
            )]),
        }
    }

    fn call_with_first_arg(value: Option<&str>) -> FieldCall<()> {
        let mut args = Arguments::new();
        if let Some(value) = value {
            args.insert(Name::new("firstArg"), ConstValue::String(value.to_string()));
        }
        FieldCall::new(
            ConstValue::Null,
            args,
            Arc::new(()),
            ResolveInfo::new("Query", "testQuery"),
        )
    }

    fn intercepted(interception: FieldInterception<()>) -> InterceptedResolver<()> {
        InterceptedResolver::new(interception, Arc::new(ArgForest::default()))
    }

    #[tokio::test]
    async fn phases_run_in_order() {
        let calls = Calls::default();
        let (post_sender, mut post_receiver) = mpsc::unbounded_channel();
        let post_calls = calls.clone();
        let post = Annotation::new(move |_: FieldCall<()>, _| {
            post_calls.lock().unwrap().push("post".to_string());
            post_sender.send(()).ok();
            async { Ok(ConstValue::Null) }
        });

        let resolver = intercepted(FieldInterception {
            arguments: Some(validated_first_arg(spy("args", &calls))),
            pre: vec![spy("pre", &calls)],
            generators: Generators::new(),
            primary: Some(echo_primary(&calls)),
            post: vec![post],
        });

        let result = resolver.resolve(call_with_first_arg(Some("value"))).await;
        assert_eq!(result, Ok(ConstValue::String("value".to_string())));

        tokio::time::timeout(Duration::from_secs(5), post_receiver.recv())
            .await
            .expect("post chain should run");

        assert_eq!(*calls.lock().unwrap(), vec!["args", "pre", "primary", "post"]);
    }

    #[tokio::test]
    async fn failing_pre_short_circuits() {
        let calls = Calls::default();
        let resolver = intercepted(FieldInterception {
            arguments: None,
            pre: vec![failing("pre", &calls), spy("pre2", &calls)],
            generators: Generators::new(),
            primary: Some(echo_primary(&calls)),
            post: vec![spy("post", &calls)],
        });

        let result = resolver.resolve(call_with_first_arg(Some("value"))).await;

        assert_eq!(
            result,
            Err(FieldError::validation(
                "Query.testQuery",
                FieldError::new("pre failed")
            ))
        );
        tokio::task::yield_now().await;
        assert_eq!(*calls.lock().unwrap(), vec!["pre"]);
    }

    #[tokio::test]
    async fn failing_argument_validation_short_circuits() {
        let calls = Calls::default();
        let resolver = intercepted(FieldInterception {
            arguments: Some(validated_first_arg(failing("args", &calls))),
            pre: vec![spy("pre", &calls)],
            generators: Generators::new(),
            primary: Some(echo_primary(&calls)),
            post: vec![],
        });

        assert!(resolver.resolve(call_with_first_arg(Some("x"))).await.is_err());
        assert_eq!(*calls.lock().unwrap(), vec!["args"]);

        // Without the argument, its validator doesn't run.
        calls.lock().unwrap().clear();
        assert_eq!(
            resolver.resolve(call_with_first_arg(None)).await,
            Ok(ConstValue::Null)
        );
        assert_eq!(*calls.lock().unwrap(), vec!["pre", "primary"]);
    }

    #[tokio::test]
    async fn failing_generator_short_circuits() {
        let calls = Calls::default();
        let resolver = intercepted(FieldInterception {
            arguments: None,
            pre: vec![spy("pre", &calls)],
            generators: Generators::from([(
                "firstArg".to_string(),
                vec![failing("generator", &calls)],
            )]),
            primary: Some(echo_primary(&calls)),
            post: vec![spy("post", &calls)],
        });

        let result = resolver.resolve(call_with_first_arg(Some("value"))).await;

        assert_eq!(
            result,
            Err(FieldError::generator(
                "firstArg",
                FieldError::new("generator failed")
            ))
        );
        tokio::task::yield_now().await;
        assert_eq!(*calls.lock().unwrap(), vec!["pre", "generator"]);
    }

    #[test_log::test(tokio::test)]
    async fn failing_post_does_not_affect_result() {
        let calls = Calls::default();
        let (done_sender, mut done_receiver) = mpsc::unbounded_channel();
        let after_failure = Annotation::new(move |_: FieldCall<()>, _| {
            done_sender.send(()).ok();
            async { Ok(ConstValue::Null) }
        });

        let resolver = intercepted(FieldInterception {
            arguments: None,
            pre: vec![],
            generators: Generators::new(),
            primary: Some(echo_primary(&calls)),
            post: vec![failing("post", &calls), after_failure],
        });

        let result = resolver.resolve(call_with_first_arg(Some("value"))).await;
        assert_eq!(result, Ok(ConstValue::String("value".to_string())));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(*calls.lock().unwrap(), vec!["primary", "post"]);
        // The post chain stops at its first failure.
        assert!(done_receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn primary_sees_generated_values() {
        let calls = Calls::default();
        let generator =
            Annotation::new(|_: FieldCall<()>, _| async { Ok(ConstValue::String("y".into())) });

        let resolver = intercepted(FieldInterception {
            arguments: None,
            pre: vec![],
            generators: Generators::from([("firstArg".to_string(), vec![generator])]),
            primary: Some(echo_primary(&calls)),
            post: vec![],
        });

        assert_eq!(
            resolver.resolve(call_with_first_arg(Some("x"))).await,
            Ok(ConstValue::String("y".to_string()))
        );
    }

    #[tokio::test]
    async fn default_primary_reads_parent_property() {
        let calls = Calls::default();
        let resolver = intercepted(FieldInterception {
            arguments: None,
            pre: vec![spy("pre", &calls)],
            generators: Generators::new(),
            primary: None,
            post: vec![],
        });

        let mut parent = IndexMap::new();
        parent.insert(Name::new("testQuery"), ConstValue::Boolean(true));
        let call = FieldCall::new(
            ConstValue::Object(parent),
            Arguments::new(),
            Arc::new(()),
            ResolveInfo::new("Query", "testQuery"),
        );

        let resolver = resolver.into_resolver();
        assert_eq!(resolver.call(call).await, Ok(ConstValue::Boolean(true)));
        assert_eq!(*calls.lock().unwrap(), vec!["pre"]);
    }
}
