//! Behavioural laws of the model codec, exercised through public types

use beamlit::codec::{decode_list, JsonMap, Number, Reason, Record, Shape, Value, Wire};
use beamlit::models::{
    Agent, AgentDeploymentHistory, AgentSpec, Function, Labels, Metadata, Metric, Model,
    ModelDeployment, ModelWithDeployments, PendingInvitationAccept, ResourceDeploymentLog,
    ResourceMetrics, UpdateWorkspaceUserRoleBody, Workspace, WorkspaceUser,
};
use beamlit::Field;
use serde_json::json;

beamlit::record! {
    /// One field per presence mode
    pub struct Sample {
        required id: String = "id",
        nullable note: String = "note",
        optional count: i64 = "count",
        optional tags: Vec<String> = "tags",
    }
}

beamlit::record_union! {
    pub enum IntOrFloat {
        Int(i64),
        Float(Number),
    }
}

beamlit::record! {
    pub struct Envelope {
        optional value: IntOrFloat = "value",
        optional labels: Labels = "labels",
    }
}

fn object(value: Value) -> JsonMap {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

/// Decode then encode, requiring the exact same map back
fn assert_round_trip<R: Record>(wire: Value) -> R {
    let wire = object(wire);
    let record = R::decode(wire.clone()).unwrap();
    assert_eq!(record.encode(), wire, "{} did not round trip", R::SCHEMA.name);
    record
}

#[test]
fn test_round_trip_preserves_unknown_keys() {
    let wire = object(json!({
        "metadata": {
            "name": "support",
            "labels": {"team": "core"},
            "generation": 4
        },
        "spec": {
            "enabled": true,
            "flavors": [{"name": "t4", "type": "gpu", "vram": "16Gi"}],
            "runtime": {"image": "org/agent:1", "serving_port": 8080},
            "future_field": {"nested": [1, 2, 3]}
        },
        "status": "DEPLOYED",
        "x-trace": "abc"
    }));

    let agent = Agent::decode(wire.clone()).unwrap();
    assert_eq!(agent.additional_property("x-trace"), Some(&json!("abc")));
    assert_eq!(
        agent.spec.value().unwrap().additional_keys(),
        vec!["future_field"]
    );
    assert_eq!(agent.encode(), wire);
}

#[test]
fn test_absent_and_null_are_distinct() {
    let absent = Sample::decode(object(json!({"id": "a", "note": "n"}))).unwrap();
    assert!(absent.count.is_absent());
    assert!(!absent.encode().contains_key("count"));

    let null = Sample::decode(object(json!({"id": "a", "note": "n", "count": null}))).unwrap();
    assert!(null.count.is_null());
    assert_eq!(null.encode().get("count"), Some(&Value::Null));

    assert_ne!(absent, null);
}

#[test]
fn test_nullable_requires_key_but_accepts_null() {
    let sample = Sample::decode(object(json!({"id": "a", "note": null}))).unwrap();
    assert_eq!(sample.note, None);
    assert_eq!(sample.encode().get("note"), Some(&Value::Null));

    let err = Sample::decode(object(json!({"id": "a"}))).unwrap_err();
    assert_eq!(err.field, "note");
    assert_eq!(err.reason, Reason::Missing);
}

#[test]
fn test_required_field_missing_or_null() {
    let err = UpdateWorkspaceUserRoleBody::decode(JsonMap::new()).unwrap_err();
    assert_eq!(err.record, "UpdateWorkspaceUserRoleBody");
    assert_eq!(err.field, "role");
    assert_eq!(err.reason, Reason::Missing);

    let err = UpdateWorkspaceUserRoleBody::decode(object(json!({"role": null}))).unwrap_err();
    assert_eq!(err.reason, Reason::UnexpectedNull);

    let body = UpdateWorkspaceUserRoleBody::new("admin");
    assert_eq!(Value::Object(body.encode()), json!({"role": "admin"}));
}

#[test]
fn test_nested_violation_path() {
    let err = Agent::decode(object(json!({
        "spec": {"flavors": [{"name": "a"}, {"name": 7}]}
    })))
    .unwrap_err();
    assert_eq!(err.record, "Agent");
    assert_eq!(err.field, "spec.flavors[1].name");
    assert!(matches!(err.reason, Reason::Shape { expected: Shape::String, .. }));

    let err = Agent::decode(object(json!({
        "spec": {"runtime": {"serving_port": 70000}}
    })))
    .unwrap_err();
    assert_eq!(err.field, "spec.runtime.serving_port");
    assert_eq!(err.reason, Reason::OutOfRange { expected: Shape::Integer });
}

#[test]
fn test_declared_fields_take_precedence_over_overflow() {
    let mut metadata = Metadata::named("live");
    metadata.set_additional_property("name", json!("stale"));
    metadata.set_additional_property("display_name", json!("ghost"));
    metadata.set_additional_property("owner", json!("ops"));

    let wire = metadata.encode();
    assert_eq!(wire.get("name"), Some(&json!("live")));
    assert!(!wire.contains_key("display_name"));
    assert_eq!(wire.get("owner"), Some(&json!("ops")));
}

#[test]
fn test_constructed_record_encodes_only_set_fields() {
    let agent = Agent::new(
        "support",
        AgentSpec {
            model: Field::Present("gpt-4o".into()),
            ..Default::default()
        },
    );
    assert_eq!(
        Value::Object(agent.encode()),
        json!({"metadata": {"name": "support"}, "spec": {"model": "gpt-4o"}})
    );
}

#[test]
fn test_union_tries_variants_in_order() {
    let decode = |v: Value| Envelope::decode(object(json!({ "value": v }))).unwrap().value;

    assert_eq!(decode(json!(3)), Field::Present(IntOrFloat::Int(3)));
    assert_eq!(decode(json!(3.5)), Field::Present(IntOrFloat::Float(Number::from_f64(3.5).unwrap())));
    assert_eq!(decode(json!("3")), Field::Present(IntOrFloat::Raw(json!("3"))));
}

#[test]
fn test_union_reports_failure_of_matching_shape() {
    let ok = Envelope::decode(object(json!({"labels": {"team": "core"}}))).unwrap();
    assert_eq!(ok.labels.value().and_then(|l| l.get("team")), Some("core"));

    let raw = Envelope::decode(object(json!({"labels": ["core"]}))).unwrap();
    assert!(raw.labels.value().unwrap().is_raw());

    let err = Envelope::decode(object(json!({"labels": {"team": 1}}))).unwrap_err();
    assert_eq!(err.field, "labels.team");
}

#[test]
fn test_list_fails_as_a_whole() {
    let items = vec![json!({"name": "a"}), json!("b"), json!({"name": "c"})];
    let err = decode_list::<Workspace>(items).unwrap_err();
    assert_eq!(err.record, "Workspace");
    assert_eq!(err.field, "[1]");
    assert!(matches!(err.reason, Reason::Shape { .. }));

    let ok = decode_list::<Workspace>(vec![json!({"name": "a"}), json!({})]).unwrap();
    assert_eq!(ok.len(), 2);
    assert!(ok[1].name.is_absent());
}

#[test]
fn test_list_field_presence() {
    let empty = Sample::decode(object(json!({"id": "a", "note": null, "tags": []}))).unwrap();
    assert_eq!(empty.tags, Field::Present(vec![]));
    assert_eq!(empty.encode().get("tags"), Some(&json!([])));

    let missing = Sample::decode(object(json!({"id": "a", "note": null}))).unwrap();
    assert!(missing.tags.is_absent());
}

#[test]
fn test_metrics_keep_integer_numbers() {
    let metrics: ResourceMetrics = assert_round_trip(json!({
        "request_total": 42,
        "rps": 0,
        "request_total_per_code": {"200": 40, "500": 2},
        "rps_per_code": {"200": 0.5},
        "query": [{"rate": 1, "request_total": 7, "timestamp": "2024-11-02T10:00:00Z"}],
        "inference_global": [],
        "latency": {"p99": 120}
    }));
    assert_eq!(metrics.request_total.value().and_then(Number::as_f64), Some(42.0));
    assert_eq!(
        Value::Object(metrics.encode())["request_total"].to_string(),
        "42"
    );

    let metric = Metric::decode(object(json!({"rate": 2}))).unwrap();
    assert_eq!(Value::Object(metric.encode()), json!({"rate": 2}));
    assert_ne!(Value::Object(metric.encode()), json!({"rate": 2.0}));
}

#[test]
fn test_function_round_trip() {
    let function: Function = assert_round_trip(json!({
        "metadata": {"name": "github", "workspace": "acme", "labels": {"team": "tools"}},
        "spec": {
            "description": "GitHub toolkit",
            "kit": [
                {
                    "name": "list_issues",
                    "description": "List issues",
                    "parameters": [
                        {"name": "repo", "type": "string", "required": true, "default": "main"}
                    ],
                    "x-order": 1
                },
                {"name": "close_issue"}
            ],
            "parameters": [{"name": "token", "type": "string", "required": false}],
            "runtime": {"image": "org/github:2", "serving_port": 8080, "metric_port": 9090},
            "serverless_config": {"min_num_replicas": 0, "max_num_replicas": 3},
            "store_id": "github",
            "timeout": 30
        },
        "status": "DEPLOYED",
        "revision": 12
    }));
    let kit = function.spec.value().unwrap().kit.value().unwrap();
    assert_eq!(kit[0].additional_property("x-order"), Some(&json!(1)));
}

#[test]
fn test_model_round_trips() {
    assert_round_trip::<Model>(json!({
        "metadata": {"name": "gpt-4o", "environment": "production"},
        "spec": {
            "enabled": true,
            "flavors": [{"name": "t4", "type": "gpu"}],
            "runtime": {"model": "gpt-4o", "type": "openai"},
            "weights": 3
        },
        "status": "DEPLOYING"
    }));

    let deployment = json!({
        "environment": "production",
        "model": "llama",
        "labels": {"tier": "gold"},
        "serving_port": 8000,
        "metric_port": 9000,
        "model_provider_ref": {"name": "hf", "type": "huggingface", "url": "https://hf.co"},
        "pod_template": {"spec": {"containers": [{"name": "llama"}]}},
        "replicas": 2
    });
    assert_round_trip::<ModelDeployment>(deployment.clone());

    let with_deployments: ModelWithDeployments = assert_round_trip(json!({
        "name": "llama",
        "workspace": "acme",
        "labels": ["not", "a", "map"],
        "deployments": [deployment],
        "size_gb": 14
    }));
    assert!(with_deployments.labels.value().unwrap().is_raw());
}

#[test]
fn test_workspace_records_round_trip() {
    let workspace = json!({
        "name": "acme",
        "display_name": "Acme",
        "region": "us-west-2",
        "account_id": "a-1",
        "labels": {},
        "quota": 10
    });
    assert_round_trip::<Workspace>(workspace.clone());
    assert_round_trip::<WorkspaceUser>(json!({
        "email": "dev@acme.io",
        "email_verified": true,
        "accepted": false,
        "role": "member",
        "sub": "auth0|42",
        "login_count": 5
    }));
    assert_round_trip::<PendingInvitationAccept>(json!({
        "email": "dev@acme.io",
        "workspace": workspace,
        "expires_in": 3600
    }));
}

#[test]
fn test_deployment_log_and_history_round_trip() {
    assert_round_trip::<ResourceDeploymentLog>(json!({
        "message": "pulled image",
        "timestamp": "2024-11-02T10:00:00Z",
        "level": 3
    }));

    let history: AgentDeploymentHistory = assert_round_trip(json!({
        "agent": "support",
        "request_id": "req-1",
        "status": "SUCCESS",
        "took": 1250,
        "events": [
            {"name": "build", "status": "SUCCESS", "took": 1000, "type": "step"},
            {"name": "deploy", "status": "SUCCESS", "took": 250, "retries": 0}
        ],
        "region": "eu"
    }));
    assert_eq!(history.took.value(), Some(&1250));
}

#[test]
fn test_record_nested_as_wire_value() {
    let metadata = Metadata::from_wire(json!({"name": "n", "extra": true})).unwrap();
    assert_eq!(metadata.to_wire(), json!({"name": "n", "extra": true}));

    let err = Metadata::from_wire(json!("n")).unwrap_err();
    assert!(matches!(err.reason, Reason::Shape { expected: Shape::Record("Metadata"), .. }));
}
