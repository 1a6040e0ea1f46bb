//! Tests for access settings patch planning

use pretty_assertions::assert_eq;
use recon_content::{Setting, yaml};
use recon_core::settings::{BASELINE_FILE, PATCH_FILE};
use recon_core::{
    AccessSettings, AccessSettingsParams, FileEnsure, PatchDecision, load_baseline, plan,
};
use recon_test_utils::dir::ConfigDir;
use recon_test_utils::logs::capture_warnings;
use rstest::rstest;

fn desired_settings() -> Vec<Setting> {
    vec![
        Setting::new("security.password.expiry", 60),
        Setting::new("security.ldap.enabled", true),
        Setting::new("token.default.expiry", 3600),
    ]
}

#[test]
fn test_patch_minimality() {
    let observed = yaml::parse("a:\n  b: 1\n").unwrap();
    let desired = vec![Setting::new("a.b", 1), Setting::new("a.c", 2)];

    let PatchDecision::Patch(patch) = plan(&desired, &observed) else {
        panic!("expected a patch");
    };
    assert_eq!(
        serde_yaml::Value::Mapping(patch),
        yaml::parse("a:\n  c: 2\n").unwrap()
    );
}

#[test]
fn test_missing_baseline_patches_everything() {
    let dir = ConfigDir::new();
    let params = AccessSettingsParams::new(dir.root());

    let instruction = AccessSettings::new(&params)
        .instruction(&desired_settings())
        .unwrap();

    assert_eq!(instruction.path, dir.path(PATCH_FILE));
    assert_eq!(
        instruction.content.as_deref(),
        Some("security:\n  password:\n    expiry: 60\n  ldap:\n    enabled: true\ntoken:\n  default:\n    expiry: 3600\n")
    );
}

#[test]
fn test_consumer_stringified_integers_are_converged() {
    let dir = ConfigDir::new();
    dir.write(
        BASELINE_FILE,
        "security:\n  password:\n    expiry: \"60\"\n  ldap:\n    enabled: true\ntoken:\n  default:\n    expiry: \"3600\"\n",
    );
    let params = AccessSettingsParams::new(dir.root());

    let instruction = AccessSettings::new(&params)
        .instruction(&desired_settings())
        .unwrap();

    assert_eq!(instruction.ensure, FileEnsure::Absent);
    assert_eq!(instruction.content, None);
}

#[rstest]
#[case("security: yes-please\n")]
#[case("security:\n  - a\n")]
#[case("{{{ not yaml")]
fn test_unusable_baseline_patches_everything(#[case] baseline: &str) {
    let dir = ConfigDir::new();
    dir.write(BASELINE_FILE, baseline);
    let params = AccessSettingsParams::new(dir.root());

    let decision = AccessSettings::new(&params).plan(&desired_settings());
    let PatchDecision::Patch(patch) = decision else {
        panic!("expected a patch");
    };
    assert_eq!(patch.len(), 2);
}

#[test]
fn test_custom_owner_and_group() {
    let dir = ConfigDir::new();
    let params: AccessSettingsParams = serde_yaml::from_str(&format!(
        "path: {}\nowner: jfrog\ngroup: ops\n",
        dir.root().display()
    ))
    .unwrap();

    let instruction = AccessSettings::new(&params)
        .instruction(&desired_settings())
        .unwrap();

    assert_eq!(instruction.owner.as_deref(), Some("jfrog"));
    assert_eq!(instruction.group.as_deref(), Some("ops"));
    assert_eq!(instruction.mode.as_deref(), Some("0640"));
}

#[test]
fn test_unparseable_baseline_warns() {
    let dir = ConfigDir::new();
    let path = dir.write(BASELINE_FILE, "{{{ not yaml");

    let (baseline, logs) = capture_warnings(|| load_baseline(&path));

    assert_eq!(baseline, serde_yaml::Value::Mapping(serde_yaml::Mapping::new()));
    let warnings = logs.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("Error parsing baseline"));
}

#[test]
fn test_missing_and_empty_baselines_do_not_warn() {
    let dir = ConfigDir::new();
    let ((), logs) = capture_warnings(|| {
        load_baseline(&dir.path(BASELINE_FILE));
        dir.write(BASELINE_FILE, "");
        load_baseline(&dir.path(BASELINE_FILE));
    });
    assert!(logs.warnings().is_empty());
}
