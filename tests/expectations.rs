//! Expectation files run against the bundled plan fixtures.

use std::path::PathBuf;

use tempfile::TempDir;
use tfplan_assert::error::{AssertionError, ExpectationError, LookupError};
use tfplan_assert::expectations::find_expectations_file;
use tfplan_assert::{
    ExpectationParser, ExpectationRunner, ExpectationValidator, PlanAssertError, PlanAssertions,
    PlanLoader, Result,
};

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

fn run(plan: &PlanAssertions, yaml: &str) -> Result<usize> {
    let file = ExpectationParser::new().parse_yaml(yaml, None)?;
    ExpectationValidator::new().validate(&file)?;
    Ok(ExpectationRunner::new(plan).run(&file)?.checks)
}

#[test]
fn bundled_expectations_pass() -> Result<()> {
    let plan = resource_group();
    let file = ExpectationParser::new().load_file(fixture("resource-group.expect.yaml"))?;
    let validation = ExpectationValidator::new().validate(&file)?;
    assert!(validation.is_valid());

    let summary = ExpectationRunner::new(&plan).run(&file)?;
    assert_eq!(summary.checks, 27);
    Ok(())
}

#[test]
fn mismatch_surfaces_verbatim() {
    let plan = resource_group();
    let err = run(
        &plan,
        r"
resources:
  - address: azurerm_resource_group.cloudcommons-test
    values:
      location: westus
",
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Assertion failed: Expected resource azurerm_resource_group.cloudcommons-test location to be \"westus\". Actual: \"uksouth\""
    );
}

#[test]
fn run_stops_at_first_failure() {
    let plan = resource_group();
    let err = run(
        &plan,
        r"
variables:
  DONT_EXIST: x
resource_changes:
  - address: azurerm_resource_group.cloudcommons-test
    actions: [delete]
",
    )
    .unwrap_err();
    assert!(matches!(err, PlanAssertError::Lookup(LookupError::NotFound { .. })));
}

#[test]
fn action_failure_lists_planned_actions() {
    let plan = resource_group();
    let err = run(
        &plan,
        "resource_changes:\n  - address: azurerm_resource_group.cloudcommons-test\n    actions: [update]\n",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        PlanAssertError::Assertion(AssertionError::ActionNotPlanned { ref actions, .. }) if actions == "create"
    ));
}

#[test]
fn null_snapshot_expectation() -> Result<()> {
    let plan = resource_group();
    let checks = run(
        &plan,
        "resource_changes:\n  - address: azurerm_resource_group.cloudcommons-test\n    before: null\n",
    )?;
    assert_eq!(checks, 1);

    let err = run(
        &plan,
        "resource_changes:\n  - address: azurerm_resource_group.cloudcommons-test\n    after: null\n",
    )
    .unwrap_err();
    assert!(err.is_assertion_failure());
    Ok(())
}

#[test]
fn nested_module_resources() -> Result<()> {
    let plan = PlanLoader::new().load_file(fixture("aks.json"))?;
    let checks = run(
        &plan,
        r#"
resources:
  - address: "module.cloudcomons-aks-kubernetes.module.vnet.azurerm_virtual_network.cloudcommons[0]"
    module:
      - module.cloudcomons-aks-kubernetes
      - module.cloudcomons-aks-kubernetes.module.vnet
    values:
      address_space: 172.0.0.0/22
      subnet:
        - address_prefix: 172.0.0.0/23
          name: Cluster
          security_group: ""
"#,
    )?;
    assert_eq!(checks, 2);
    Ok(())
}

#[test]
fn invalid_file_is_rejected_before_running() {
    let plan = resource_group();
    let err = run(
        &plan,
        "output_changes:\n  RESOURCE_GROUP_ID:\n    actions: [destroy]\n",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        PlanAssertError::Expectation(ExpectationError::ValidationError { field: Some(ref field), .. })
            if field == "output_changes.RESOURCE_GROUP_ID.actions[0]"
    ));
}

#[test]
fn discovers_expectation_file_from_subdirectory() {
    let temp = TempDir::new().expect("temp dir");
    let nested = temp.path().join("modules").join("network");
    std::fs::create_dir_all(&nested).expect("create dirs");
    std::fs::write(temp.path().join("tfplan.expect.yaml"), "variables: {}\n").expect("write");

    let found = find_expectations_file(&nested).expect("found");
    assert_eq!(found, temp.path().join("tfplan.expect.yaml"));
    assert!(ExpectationParser::new().load_file(found).expect("parse").is_empty());
}

#[test]
fn discovers_expectation_file_from_relative_current_directory() {
    let temp = TempDir::new().expect("temp dir");
    let nested = temp.path().join("envs").join("prod");
    std::fs::create_dir_all(&nested).expect("create dirs");
    std::fs::write(temp.path().join("tfplan.expect.yaml"), "{}\n").expect("write");

    let previous = std::env::current_dir().expect("current dir");
    std::env::set_current_dir(&nested).expect("enter nested dir");
    let found = find_expectations_file(".");
    std::env::set_current_dir(previous).expect("restore current dir");

    let found = found.expect("found in a parent directory");
    assert_eq!(
        found.canonicalize().expect("canonical found"),
        temp.path().join("tfplan.expect.yaml").canonicalize().expect("canonical expected")
    );
}
