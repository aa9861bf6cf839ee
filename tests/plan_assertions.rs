//! End-to-end assertion chains over the bundled plan fixtures.

use std::path::PathBuf;

use serde_json::{Value, json};
use tfplan_assert::error::{AssertionError, FormatVersionError, LookupError};
use tfplan_assert::{PlanAssertError, PlanAssertions, PlanLoader, Result, plan_assertions};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn resource_group() -> PlanAssertions {
    PlanLoader::new()
        .load_file(fixture("resource-group.json"))
        .expect("fixture loads")
}

fn aks() -> PlanAssertions {
    PlanLoader::new().load_file(fixture("aks.json")).expect("fixture loads")
}

const RESOURCE_GROUP: &str = "azurerm_resource_group.cloudcommons-test";

#[test]
fn terraform_version() {
    let plan = resource_group();
    assert!(plan.terraform_version().is("0.12.23").is_ok());
    assert!(plan.terraform_version().is("0.13.0").unwrap_err().is_assertion_failure());
}

#[test]
fn variables() -> Result<()> {
    let plan = resource_group();
    plan.variable("APP")?.is("cloudcommons")?;
    plan.variable("CREATOR")?.is("cloudcommons")?;
    plan.variable("ENVIRONMENT")?.is("default")?;
    plan.variable("LOCATION")?.is("uksouth")?;
    plan.variable("RESOURCE_GROUP_NAME")?.is("cloudcommons-test")?;

    assert!(plan.variable("DONT_EXIST").unwrap_err().is_lookup_failure());
    assert!(plan.variable("APP")?.is("invalid_value").unwrap_err().is_assertion_failure());
    Ok(())
}

#[test]
fn planned_outputs() -> Result<()> {
    let plan = resource_group();
    let output = plan.planned_values()?.output("RESOURCE_GROUP_ID")?;
    output.is_not_sensitive()?;
    assert!(output.is_sensitive().is_err());
    assert!(output.value().get().is_err());
    assert!(plan.planned_values()?.output("DONT_EXIST").is_err());
    Ok(())
}

#[test]
fn root_module_resource_chain() -> Result<()> {
    let plan = resource_group();
    plan.planned_values()?
        .root_module()?
        .resource(RESOURCE_GROUP)?
        .mode()
        .is("managed")?
        .name()
        .is("cloudcommons-test")?
        .provider_name()
        .is("azurerm")?
        .resource_type()
        .is("azurerm_resource_group")?
        .value("location")
        .is("uksouth")?
        .value("timeouts")
        .is(Value::Null)?
        .schema_version()
        .is(0)?;

    assert!(plan.planned_values()?.root_module()?.resource("NOT_FOUND").is_err());
    Ok(())
}

#[test]
fn location_mismatch_names_both_values() -> Result<()> {
    let plan = resource_group();
    let err = plan
        .planned_values()?
        .root_module()?
        .resource(RESOURCE_GROUP)?
        .value("location")
        .is("westus")
        .unwrap_err();

    match err {
        PlanAssertError::Assertion(AssertionError::Mismatch {
            ref key,
            ref property,
            ref expected,
            ref actual,
            ..
        }) => {
            assert_eq!(key, RESOURCE_GROUP);
            assert_eq!(property, "location");
            assert_eq!(expected, "\"westus\"");
            assert_eq!(actual, "\"uksouth\"");
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[test]
fn resource_change() -> Result<()> {
    let plan = resource_group();
    let change = plan.resource_change(RESOURCE_GROUP)?;
    change.mode().is("managed")?.action().is("create")?;
    change.before().is_null()?;
    change.after().is("location", "uksouth")?;
    change.unknown().is("id")?.is("name")?.is("tags")?;

    assert!(change.action().is("delete").is_err());
    assert!(change.after().is_null().is_err());
    assert!(plan.resource_change("azurerm_resource_group.other").unwrap_err().is_lookup_failure());
    Ok(())
}

#[test]
fn output_changes() -> Result<()> {
    let plan = resource_group();
    plan.output_changes()
        .contains("RESOURCE_GROUP_ID")?
        .change("RESOURCE_GROUP_ID")?
        .action_is("create")?
        .before_is(Value::Null)?
        .after_unknown_is(true)?;
    Ok(())
}

#[test]
fn configuration_providers() -> Result<()> {
    let plan = resource_group();
    let configuration = plan.configuration()?;

    let azurerm = configuration
        .provider("azurerm")?
        .name()
        .is("azurerm")?
        .version_constraint()
        .is("~> 2.0")?;
    assert!(azurerm.get("expressions").is_some());

    configuration
        .provider("random")?
        .name()
        .is("random")?
        .version_constraint()
        .is("~> 2.2")?;

    assert!(configuration.provider("aws").is_err());
    Ok(())
}

#[test]
fn configuration_variables() -> Result<()> {
    let plan = resource_group();
    let configuration = plan.configuration()?;

    configuration
        .variable("APP")?
        .default_is("cloudcommons")?
        .has_description()?
        .description_is("(Required) Application to which the resources belongs to")?;

    configuration.variable("ENVIRONMENT")?.has_description()?;
    configuration.variable("RESOURCE_GROUP_NAME")?.default_is(Value::Null)?;
    assert!(configuration.variable("CREATOR")?.has_description().is_err());
    assert!(configuration.variable("DONT_EXIST").unwrap_err().is_lookup_failure());
    Ok(())
}

#[test]
fn nested_child_modules() -> Result<()> {
    let plan = aks();
    let root = plan.planned_values()?.root_module()?;
    let children = root.child_modules().expect("root has child modules");

    let aks_module = children.module("module.cloudcomons-aks-kubernetes")?;
    aks_module.resource("module.cloudcomons-aks-kubernetes.azurerm_kubernetes_cluster.cloudcommons")?;

    let vnet = aks_module
        .child_modules()
        .expect("aks module has child modules")
        .module("module.cloudcomons-aks-kubernetes.module.vnet")?
        .resource(
            "module.cloudcomons-aks-kubernetes.module.vnet.azurerm_virtual_network.cloudcommons[0]",
        )?
        .value("address_space")
        .is("172.0.0.0/22")?
        .value("location")
        .is("uksouth")?;

    let subnet = vnet.value("subnet").get()?;
    assert_eq!(subnet[0]["address_prefix"], "172.0.0.0/23");
    assert_eq!(subnet[0]["name"], "Cluster");
    Ok(())
}

#[test]
fn resources_do_not_leak_between_modules() -> Result<()> {
    let plan = aks();
    let root = plan.planned_values()?.root_module()?;
    assert!(root.resource_addresses().is_empty());
    assert!(
        root.resource("module.cloudcomons-aks-kubernetes.azurerm_kubernetes_cluster.cloudcommons")
            .unwrap_err()
            .is_lookup_failure()
    );
    Ok(())
}

#[test]
fn unsupported_format_version() {
    let err = plan_assertions(&json!({ "format_version": "0.2" })).unwrap_err();
    assert!(matches!(
        err,
        PlanAssertError::FormatVersion(FormatVersionError::Unsupported { ref expected, ref found })
            if expected == "0.1" && found == "0.2"
    ));

    let err = plan_assertions(&json!({ "terraform_version": "0.12.23" })).unwrap_err();
    assert!(matches!(err, PlanAssertError::FormatVersion(FormatVersionError::Missing)));
}

#[test]
fn duplicate_addresses_are_ambiguous() {
    let plan = plan_assertions(&json!({
        "format_version": "0.1",
        "resource_changes": [
            { "address": "random_id.x", "change": { "actions": ["create"] } },
            { "address": "random_id.x", "change": { "actions": ["delete"] } }
        ]
    }))
    .expect("valid plan");

    assert!(matches!(
        plan.resource_change("random_id.x").unwrap_err(),
        PlanAssertError::Lookup(LookupError::Ambiguous { count: 2, .. })
    ));
}
