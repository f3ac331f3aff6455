// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_graphql_value::{ConstValue, Name};
use tokio::sync::mpsc;

use weaver_builder::build_schema;
use weaver_model::{
    Annotation, Arguments, CompositeDescriptor, Config, FieldCall, FieldDescriptor, FieldError,
    ResolveInfo, Resolver, ScalarType, SchemaDescriptor, TypeDescriptor, types::CompiledSchema,
};
use weaver_resolver::or;

type Log = Arc<Mutex<Vec<String>>>;

fn record(log: &Log, entry: &'static str) -> Annotation<()> {
    let log = log.clone();
    Annotation::new(move |_: FieldCall<()>, _| {
        log.lock().unwrap().push(entry.to_string());
        async { Ok(ConstValue::Null) }
    })
}

fn reject(log: &Log, entry: &'static str) -> Annotation<()> {
    let log = log.clone();
    Annotation::new(move |_: FieldCall<()>, _| {
        log.lock().unwrap().push(entry.to_string());
        async move { Err(FieldError::new(format!("{entry} rejected"))) }
    })
}

/// Records `entry` and signals the returned receiver, for functions running in the background.
fn notify(log: &Log, entry: &'static str) -> (Annotation<()>, mpsc::UnboundedReceiver<()>) {
    let log = log.clone();
    let (sender, receiver) = mpsc::unbounded_channel();
    let annotation = Annotation::new(move |_: FieldCall<()>, _| {
        log.lock().unwrap().push(entry.to_string());
        sender.send(()).ok();
        async { Ok(ConstValue::Null) }
    });
    (annotation, receiver)
}

fn string(value: &str) -> ConstValue {
    ConstValue::String(value.to_string())
}

fn object(entries: &[(&str, ConstValue)]) -> ConstValue {
    ConstValue::Object(
        entries
            .iter()
            .map(|(name, value)| (Name::new(name), value.clone()))
            .collect(),
    )
}

fn arguments(entries: &[(&str, ConstValue)]) -> Arguments {
    entries
        .iter()
        .map(|(name, value)| (Name::new(name), value.clone()))
        .collect()
}

fn config() -> Config {
    Config::new()
        .with_args(["validators"])
        .with_pre(["permissions"])
        .with_post(["analytics"])
}

/// Returns `{ testField: args.firstArg }`.
fn echo_first_arg(log: &Log) -> Resolver<()> {
    let log = log.clone();
    Resolver::new(move |call: FieldCall<()>| {
        log.lock().unwrap().push("primary".to_string());
        let first = call.arg("firstArg").cloned().unwrap_or(ConstValue::Null);
        async move { Ok(object(&[("testField", first)])) }
    })
}

/// What a query engine does for one field: look it up and call its resolver.
async fn resolve(
    schema: &CompiledSchema<()>,
    type_name: &str,
    field_name: &str,
    root: ConstValue,
    args: Arguments,
) -> Result<ConstValue, FieldError> {
    let field = schema
        .field(type_name, field_name)
        .expect("field should exist");
    let call = FieldCall::new(
        root,
        args,
        Arc::new(()),
        ResolveInfo::new(type_name, field_name),
    );
    field.resolve(call).await
}

async fn received(receiver: &mut mpsc::UnboundedReceiver<()>) {
    tokio::time::timeout(Duration::from_secs(5), receiver.recv())
        .await
        .expect("background function should run");
}

struct TestSchema {
    schema: CompiledSchema<()>,
    log: Log,
    analytics: mpsc::UnboundedReceiver<()>,
}

fn test_schema() -> TestSchema {
    let log = Log::default();
    let (analytics, analytics_receiver) = notify(&log, "analytics");

    let test_type = CompositeDescriptor::new("testType")
        .description("test description")
        .field(
            "testField",
            FieldDescriptor::new(ScalarType::String).annotate("permissions", record(&log, "field")),
        );

    let custom = CompositeDescriptor::input("somecustom")
        .description("custom nested type")
        .field(
            "afield",
            FieldDescriptor::new(ScalarType::String)
                .annotate("validators", record(&log, "afield")),
        );

    let query = FieldDescriptor::new(test_type)
        .description("test query")
        .annotate("permissions", record(&log, "permissions"))
        .arg(
            "firstArg",
            FieldDescriptor::new(ScalarType::String)
                .annotate("validators", record(&log, "firstArg")),
        )
        .arg("secondArgs", FieldDescriptor::new(custom))
        .annotate("analytics", analytics)
        .resolve(echo_first_arg(&log));

    let schema = build_schema(&SchemaDescriptor::new().query("testQuery", query), &config())
        .expect("schema should compile");

    TestSchema {
        schema,
        log,
        analytics: analytics_receiver,
    }
}

#[test_log::test(tokio::test)]
async fn runs_all_chains_for_a_query() {
    let TestSchema {
        schema,
        log,
        mut analytics,
    } = test_schema();

    let result = resolve(
        &schema,
        "Query",
        "testQuery",
        ConstValue::Null,
        arguments(&[
            ("firstArg", string("somevalue")),
            ("secondArgs", object(&[("afield", string("x"))])),
        ]),
    )
    .await
    .unwrap();

    assert_eq!(result, object(&[("testField", string("somevalue"))]));

    received(&mut analytics).await;
    assert_eq!(
        *log.lock().unwrap(),
        vec!["firstArg", "afield", "permissions", "primary", "analytics"]
    );

    let test_field = resolve(
        &schema,
        "testType",
        "testField",
        result,
        Arguments::new(),
    )
    .await;

    assert_eq!(test_field, Ok(string("somevalue")));
    assert_eq!(log.lock().unwrap().last().map(String::as_str), Some("field"));
}

#[tokio::test]
async fn validators_of_omitted_arguments_do_not_run() {
    let TestSchema {
        schema,
        log,
        mut analytics,
    } = test_schema();

    let result = resolve(
        &schema,
        "Query",
        "testQuery",
        ConstValue::Null,
        Arguments::new(),
    )
    .await;

    assert_eq!(result, Ok(object(&[("testField", ConstValue::Null)])));

    received(&mut analytics).await;
    assert_eq!(
        *log.lock().unwrap(),
        vec!["permissions", "primary", "analytics"]
    );
}

#[tokio::test]
async fn rejected_permission_skips_resolver_and_post_chain() {
    let log = Log::default();
    let query = FieldDescriptor::new(ScalarType::String)
        .annotate("permissions", reject(&log, "permissions"))
        .annotate("analytics", record(&log, "analytics"))
        .resolve(echo_first_arg(&log));

    let schema = build_schema(&SchemaDescriptor::new().query("testQuery", query), &config())
        .unwrap();

    let result = resolve(&schema, "Query", "testQuery", ConstValue::Null, Arguments::new()).await;

    assert_eq!(
        result,
        Err(FieldError::validation(
            "Query.testQuery",
            FieldError::new("permissions rejected")
        ))
    );

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(*log.lock().unwrap(), vec!["permissions"]);
}

#[test_log::test(tokio::test)]
async fn rejected_post_function_keeps_the_result() {
    let log = Log::default();
    let query = FieldDescriptor::new(ScalarType::String)
        .arg("firstArg", FieldDescriptor::new(ScalarType::String))
        .annotate("analytics", reject(&log, "analytics"))
        .resolve(Resolver::new(|call: FieldCall<()>| {
            let first = call.arg("firstArg").cloned().unwrap_or(ConstValue::Null);
            async move { Ok(first) }
        }));

    let schema = build_schema(&SchemaDescriptor::new().query("testQuery", query), &config())
        .unwrap();

    let result = resolve(
        &schema,
        "Query",
        "testQuery",
        ConstValue::Null,
        arguments(&[("firstArg", string("value"))]),
    )
    .await;

    assert_eq!(result, Ok(string("value")));

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(*log.lock().unwrap(), vec!["analytics"]);
}

#[tokio::test]
async fn resolver_observes_generated_values() {
    let log = Log::default();
    let query = FieldDescriptor::new(TypeDescriptor::named("Result"))
        .arg(
            "firstArg",
            FieldDescriptor::new(ScalarType::String).annotate(
                "generator",
                Annotation::new(|_: FieldCall<()>, _| async { Ok(string("y")) }),
            ),
        )
        .resolve(echo_first_arg(&log));

    let schema = build_schema(
        &SchemaDescriptor::new().query("testQuery", query).typ(
            CompositeDescriptor::new("Result")
                .field("testField", FieldDescriptor::new(ScalarType::String)),
        ),
        &Config::default(),
    )
    .unwrap();

    let result = resolve(
        &schema,
        "Query",
        "testQuery",
        ConstValue::Null,
        arguments(&[("firstArg", string("x"))]),
    )
    .await;

    assert_eq!(result, Ok(object(&[("testField", string("y"))])));
}

#[tokio::test]
async fn permissions_combined_with_or() {
    let log = Log::default();
    let query = FieldDescriptor::new(ScalarType::Boolean).annotate(
        "permissions",
        or(vec![
            reject(&log, "is admin"),
            record(&log, "is owner"),
            record(&log, "is public"),
        ]),
    );

    let schema = build_schema(&SchemaDescriptor::new().query("allowed", query), &config())
        .unwrap();

    let root = object(&[("allowed", ConstValue::Boolean(true))]);
    let result = resolve(&schema, "Query", "allowed", root, Arguments::new()).await;

    assert_eq!(result, Ok(ConstValue::Boolean(true)));
    assert_eq!(*log.lock().unwrap(), vec!["is admin", "is owner"]);
}

#[test]
fn unannotated_fields_keep_their_resolver() {
    let resolver = Resolver::new(|_: FieldCall<()>| async { Ok(ConstValue::Null) });

    let user = CompositeDescriptor::new("User")
        .field("name", FieldDescriptor::new(ScalarType::String))
        .field(
            "email",
            FieldDescriptor::new(ScalarType::String)
                .annotate("permissions", record(&Log::default(), "email")),
        );
    let schema = SchemaDescriptor::new().query(
        "user",
        FieldDescriptor::new(user)
            .arg("id", FieldDescriptor::new(ScalarType::ID))
            .annotate("unrelated", record(&Log::default(), "unrelated"))
            .resolve(resolver.clone()),
    );

    let compiled = build_schema(&schema, &config()).unwrap();

    let user_field = compiled.field("Query", "user").unwrap();
    assert!(!user_field.intercepted);
    assert!(user_field.resolver.as_ref().unwrap().ptr_eq(&resolver));

    let name = compiled.field("User", "name").unwrap();
    assert!(!name.intercepted);
    assert!(name.resolver.is_none());

    // Reached only through `Query.user`, yet still intercepted.
    let email = compiled.field("User", "email").unwrap();
    assert!(email.intercepted);
    assert!(email.resolver.is_some());
}
