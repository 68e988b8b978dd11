//! Integration tests for the sample schemas and the builtin registry.

use forma_resources::dynamodb::{KeySchema, Table};
use forma_resources::lambda::{Alias, Function};
use forma_resources::s3::{Bucket, VersioningConfiguration};
use forma_resources::stepfunctions::StateMachine;
use forma_resources::{builtin_registry, Tag};
use forma_template::{
    DeletionPolicy, ResourceAttributes, Template, TemplateError, TypedResource,
};
use forma_value::{IntrinsicFunction, Prop, Value};
use pretty_assertions::assert_eq;
use serde_json::json;

const STACK: &str = r#"
AWSTemplateFormatVersion: "2010-09-09"
Parameters:
  Env:
    Type: String
Resources:
  Handler:
    Type: AWS::Lambda::Function
    Properties:
      Runtime: python3.12
      Handler: app.handler
      MemorySize: 256
      Role: !GetAtt HandlerRole.Arn
      Code:
        S3Bucket: !ImportValue artifacts-bucket
        S3Key: handler.zip
      Environment:
        Variables:
          TABLE: !Ref Jobs
          STAGE: !Ref Env
      Tags:
        - Key: team
          Value: platform
  Live:
    Type: AWS::Lambda::Alias
    UpdatePolicy:
      CodeDeployLambdaAliasUpdate:
        ApplicationName: !Ref DeployApp
        DeploymentGroupName: !Ref DeployGroup
    Properties:
      FunctionName: !Ref Handler
      FunctionVersion: "1"
      Name: live
  Jobs:
    Type: AWS::DynamoDB::Table
    DeletionPolicy: Retain
    UpdateReplacePolicy: Retain
    Properties:
      BillingMode: PAY_PER_REQUEST
      AttributeDefinitions:
        - AttributeName: id
          AttributeType: S
      KeySchema:
        - AttributeName: id
          KeyType: HASH
  Flow:
    Type: AWS::StepFunctions::StateMachine
    Properties:
      RoleArn: !GetAtt FlowRole.Arn
      Definition:
        StartAt: Run
        States:
          Run:
            Type: Task
            Resource: !GetAtt Handler.Arn
            End: true
  HandlerRole:
    Type: AWS::IAM::Role
    Properties:
      AssumeRolePolicyDocument: {}
"#;

#[test]
fn test_lambda_function_resolves() {
    let template = Template::from_yaml(STACK).unwrap();
    let function = template.resolve_one::<Function>("Handler").unwrap();
    let properties = &function.properties;

    assert_eq!(properties.runtime, Some(Value::string("python3.12")));
    assert_eq!(properties.memory_size.as_ref().and_then(Value::as_i64), Some(256));
    assert_eq!(properties.role, Some(Value::get_att("HandlerRole", "Arn")));

    let code = properties.code.as_ref().and_then(Prop::as_value).unwrap();
    assert_eq!(code.s3_bucket, Some(Value::import_value("artifacts-bucket")));
    assert_eq!(code.s3_key, Some(Value::string("handler.zip")));

    let environment = properties.environment.as_ref().and_then(Prop::as_value).unwrap();
    let variables = environment.variables.as_ref().and_then(Prop::as_value).unwrap();
    assert_eq!(variables["TABLE"], Value::reference("Jobs"));
    assert_eq!(properties.tags, Some(Prop::list(vec![Tag::new("team", "platform")])));
}

#[test]
fn test_alias_with_update_policy() {
    let template = Template::from_yaml(STACK).unwrap();
    let alias = template.resolve_one::<Alias>("Live").unwrap();

    assert_eq!(alias.properties.function_name, Value::reference("Handler"));
    assert_eq!(alias.properties.function_version, Value::string("1"));

    let policy = alias.attributes.update_policy().unwrap().unwrap();
    let update = policy.code_deploy_lambda_alias_update.unwrap();
    assert_eq!(update.application_name, Value::reference("DeployApp"));
    assert_eq!(update.deployment_group_name, Value::reference("DeployGroup"));
}

#[test]
fn test_table_and_state_machine() {
    let template = Template::from_yaml(STACK).unwrap();

    let table = template.resolve_one::<Table>("Jobs").unwrap();
    assert_eq!(
        table.properties.key_schema,
        Prop::list(vec![KeySchema {
            attribute_name: "id".into(),
            key_type: "HASH".into(),
        }])
    );
    assert_eq!(table.attributes.deletion_policy(), Some(DeletionPolicy::Retain));
    assert_eq!(table.attributes.update_replace_policy(), Some(DeletionPolicy::Retain));

    let flow = template.resolve_one::<StateMachine>("Flow").unwrap();
    let definition = flow.properties.definition.unwrap();
    assert_eq!(definition.references(), vec!["Handler"]);
}

#[test]
fn test_registry_over_template() {
    let template = Template::from_yaml(STACK).unwrap();
    let registry = builtin_registry();

    let resolved = registry.resolve_template(&template);
    assert_eq!(
        resolved.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["Flow", "Handler", "Jobs", "Live"]
    );
    assert!(resolved.values().all(Result::is_ok));

    let handler = resolved["Handler"].as_ref().unwrap();
    assert_eq!(handler.resource_type(), "AWS::Lambda::Function");
    assert!(handler.downcast_ref::<Function>().is_some());
    assert!(handler.downcast_ref::<Alias>().is_none());

    assert_eq!(
        registry.unknown_types(&template).into_iter().collect::<Vec<_>>(),
        vec!["AWS::IAM::Role"]
    );
}

#[test]
fn test_unknown_property_is_a_schema_error() {
    let template = Template::from_json(
        r#"{"Resources": {"Logs": {"Type": "AWS::S3::Bucket", "Properties": {"BucketNme": "typo"}}}}"#,
    )
    .unwrap();

    assert!(matches!(
        template.resolve_one::<Bucket>("Logs"),
        Err(TemplateError::Schema { .. })
    ));
    assert!(template.resolve_all::<Bucket>().is_empty());
    assert!(matches!(
        builtin_registry().resolve("Logs", template.get("Logs").unwrap()),
        Some(Err(TemplateError::Schema { .. }))
    ));
}

#[test]
fn test_missing_required_property_is_a_schema_error() {
    let template = Template::from_json(
        r#"{"Resources": {"Live": {"Type": "AWS::Lambda::Alias", "Properties": {"Name": "live"}}}}"#,
    )
    .unwrap();
    assert!(matches!(
        template.resolve_one::<Alias>("Live"),
        Err(TemplateError::Schema { .. })
    ));
}

#[test]
fn test_absent_and_empty_properties_agree() {
    let template = Template::from_json(
        r#"{"Resources": {
            "Bare": {"Type": "AWS::Lambda::Alias"},
            "Empty": {"Type": "AWS::Lambda::Alias", "Properties": {}}
        }}"#,
    )
    .unwrap();

    for logical_id in ["Bare", "Empty"] {
        let error = template.resolve_one::<Alias>(logical_id).unwrap_err();
        assert!(matches!(error, TemplateError::Schema { .. }));
        assert!(error.to_string().contains("missing field `FunctionName`"));
    }
    assert!(template.resolve_all::<Alias>().is_empty());
}

const CONDITIONAL_BUCKET: &str = r#"{
    "Conditions": {"IsProd": {"Fn::Equals": [{"Ref": "Env"}, "prod"]}},
    "Resources": {
        "Logs": {
            "Type": "AWS::S3::Bucket",
            "Properties": {
                "VersioningConfiguration": {
                    "Fn::If": ["IsProd", {"Status": "Enabled"}, {"Ref": "AWS::NoValue"}]
                },
                "Tags": [
                    {"Key": "team", "Value": "platform"},
                    {"Fn::If": ["IsProd", {"Key": "tier", "Value": "gold"}, {"Ref": "AWS::NoValue"}]}
                ]
            }
        },
        "Archive": {
            "Type": "AWS::S3::Bucket",
            "Properties": {
                "VersioningConfiguration": {"Ref": "AWS::NoValue"},
                "Tags": {"Fn::If": ["IsProd", [{"Key": "tier", "Value": "gold"}], {"Ref": "AWS::NoValue"}]}
            }
        }
    }
}"#;

#[test]
fn test_intrinsic_in_nested_block_resolves() {
    let template = Template::from_json(CONDITIONAL_BUCKET).unwrap();

    let logs = template.resolve_one::<Bucket>("Logs").unwrap();
    let versioning = logs.properties.versioning_configuration.as_ref().unwrap();
    assert_eq!(versioning.as_intrinsic().unwrap().function, IntrinsicFunction::If);

    let tags = logs.properties.tags.as_ref().unwrap();
    assert_eq!(tags.values().collect::<Vec<_>>(), vec![&Tag::new("team", "platform")]);
    assert_eq!(tags.as_value().unwrap().len(), 2);

    let archive = template.resolve_one::<Bucket>("Archive").unwrap();
    assert!(archive.properties.versioning_configuration.unwrap().is_no_value());
    assert!(archive.properties.tags.unwrap().is_intrinsic());

    assert_eq!(template.resolve_all::<Bucket>().len(), 2);
    assert!(builtin_registry()
        .resolve_template(&template)
        .values()
        .all(Result::is_ok));
}

#[test]
fn test_intrinsic_in_nested_block_round_trips() {
    let source = Template::from_json(CONDITIONAL_BUCKET).unwrap();
    let mut rebuilt = Template::from_json(CONDITIONAL_BUCKET).unwrap();
    for (logical_id, bucket) in source.resolve_all::<Bucket>() {
        rebuilt.insert_typed(logical_id, bucket);
    }

    assert!(rebuilt.get("Logs").unwrap().is_typed());
    assert_eq!(rebuilt, source);
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&rebuilt.to_json().unwrap()).unwrap(),
        serde_json::from_str::<serde_json::Value>(CONDITIONAL_BUCKET).unwrap()
    );
}

#[test]
fn test_build_template_in_code() {
    let mut template = Template::new();
    template.insert_typed(
        "Logs",
        TypedResource::new(Bucket {
            bucket_name: Some(Value::name("logs")),
            versioning_configuration: Some(
                VersioningConfiguration {
                    status: "Enabled".into(),
                }
                .into(),
            ),
            tags: Some(Prop::list(vec![Tag::new("env", Value::reference("Env"))])),
            ..Default::default()
        })
        .with_attributes(ResourceAttributes::new().with_deletion_policy(DeletionPolicy::Retain)),
    );

    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&template.to_json().unwrap()).unwrap(),
        json!({
            "AWSTemplateFormatVersion": "2010-09-09",
            "Resources": {
                "Logs": {
                    "Type": "AWS::S3::Bucket",
                    "DeletionPolicy": "Retain",
                    "Properties": {
                        "BucketName": {"Fn::Sub": "${AWS::StackName}-logs"},
                        "Tags": [{"Key": "env", "Value": {"Ref": "Env"}}],
                        "VersioningConfiguration": {"Status": "Enabled"}
                    }
                }
            }
        })
    );
}
