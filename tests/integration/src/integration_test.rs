//! End-to-end reconciliation passes
//!
//! Each test plays the host: it runs a pass, applies the returned
//! instruction to a temporary directory, lets the downstream consumer react,
//! and runs the next pass.

use pretty_assertions::assert_eq;
use recon_content::{Setting, yaml};
use recon_core::settings::{BASELINE_FILE, PATCH_FILE};
use recon_core::{
    AccessSettings, AccessSettingsParams, Desired, FileEnsure, FileInstruction, YamlFile,
    YamlFileParams,
};
use recon_test_utils::dir::ConfigDir;
use recon_test_utils::keys::{KEY_128_HEX, encrypted, inline_source, key_128};
use serde_yaml::{Mapping, Value};
use std::fs;

/// Apply an instruction the way the host's file primitive would.
fn apply(instruction: &FileInstruction) {
    match instruction.ensure {
        FileEnsure::Absent => {
            let _ = fs::remove_file(&instruction.path);
        }
        FileEnsure::File => {
            if let Some(content) = &instruction.content {
                fs::write(&instruction.path, content).unwrap();
            }
        }
    }
}

/// The consumer merges the patch into its configuration, stores integers as
/// strings in the snapshot, and deletes the patch file.
fn consumer_imports_patch(dir: &ConfigDir) {
    let Some(patch) = dir.read(PATCH_FILE) else {
        return;
    };
    let mut baseline = dir
        .read(BASELINE_FILE)
        .map(|source| yaml::parse(&source).unwrap())
        .unwrap_or(Value::Mapping(Mapping::new()));

    merge(&mut baseline, stringify_integers(yaml::parse(&patch).unwrap()));
    dir.write(BASELINE_FILE, &yaml::render(&baseline).unwrap());
    dir.remove(PATCH_FILE);
}

fn merge(into: &mut Value, from: Value) {
    match (into, from) {
        (Value::Mapping(into_map), Value::Mapping(from_map)) => {
            for (key, value) in from_map {
                match into_map.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        into_map.insert(key, value);
                    }
                }
            }
        }
        (into, from) => *into = from,
    }
}

fn stringify_integers(value: Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| (k, stringify_integers(v)))
                .collect(),
        ),
        Value::Number(n) if n.is_i64() || n.is_u64() => Value::String(n.to_string()),
        other => other,
    }
}

fn access_settings() -> Vec<Setting> {
    vec![
        Setting::new("security.password.expiry", 60),
        Setting::new("security.ldap.enabled", true),
        Setting::new("token.default.expiry", 3600),
        Setting::new("server.name", "art-prod"),
    ]
}

#[test]
fn test_settings_pass_is_idempotent() {
    let dir = ConfigDir::new();
    dir.write(BASELINE_FILE, "security:\n  ldap:\n    enabled: true\nserver:\n  name: art-dev\n");
    let params = AccessSettingsParams::new(dir.root());
    let resource = AccessSettings::new(&params);

    let first = resource.instruction(&access_settings()).unwrap();
    assert_eq!(first.ensure, FileEnsure::File);
    assert_eq!(
        yaml::parse(first.content.as_deref().unwrap()).unwrap(),
        yaml::parse("security:\n  password:\n    expiry: 60\ntoken:\n  default:\n    expiry: 3600\nserver:\n  name: art-prod\n")
            .unwrap()
    );
    apply(&first);
    dir.assert_file_exists(PATCH_FILE);

    consumer_imports_patch(&dir);

    let second = resource.instruction(&access_settings()).unwrap();
    assert_eq!(second.ensure, FileEnsure::Absent);
    assert_eq!(second.content, None);
    apply(&second);
    dir.assert_file_absent(PATCH_FILE);
}

#[test]
fn test_settings_pass_reacts_to_new_desired_value() {
    let dir = ConfigDir::new();
    let params = AccessSettingsParams::new(dir.root());
    let resource = AccessSettings::new(&params);

    apply(&resource.instruction(&access_settings()).unwrap());
    consumer_imports_patch(&dir);

    let mut changed = access_settings();
    changed[0] = Setting::new("security.password.expiry", 90);
    let instruction = resource.instruction(&changed).unwrap();

    assert_eq!(
        instruction.content.as_deref(),
        Some("security:\n  password:\n    expiry: 90\n")
    );
}

#[test]
fn test_secrets_file_converges_after_consumer_encrypts() {
    let dir = ConfigDir::new();
    let params =
        YamlFileParams::new(dir.path("system.yaml")).with_key(inline_source(KEY_128_HEX));
    let resource = YamlFile::new(&params).unwrap();
    let target = Desired::mapping([(
        "shared",
        Desired::mapping([
            ("node", Desired::from(yaml::parse("id: art1\nport: 8082\n").unwrap())),
            (
                "security",
                Desired::mapping([("joinKey", Desired::sensitive(Value::from("hunter2")))]),
            ),
        ]),
    )]);

    let first = resource.instruction(&target).unwrap();
    assert!(first.replaces_content());
    assert!(first.sensitive);
    apply(&first);

    // The consumer encrypts secrets in place and stringifies the port
    let on_disk = format!(
        "shared:\n  node:\n    id: art1\n    port: \"8082\"\n  security:\n    joinKey: {}\n",
        encrypted("hunter2", &key_128())
    );
    dir.write("system.yaml", &on_disk);

    let second = resource.instruction(&target).unwrap();
    assert!(!second.replaces_content());
    apply(&second);
    assert_eq!(dir.read("system.yaml").as_deref(), Some(on_disk.as_str()));

    let rotated = Desired::mapping([(
        "shared",
        Desired::mapping([
            ("node", Desired::from(yaml::parse("id: art1\nport: 8082\n").unwrap())),
            (
                "security",
                Desired::mapping([("joinKey", Desired::sensitive(Value::from("correct-horse")))]),
            ),
        ]),
    )]);
    let third = resource.instruction(&rotated).unwrap();
    assert!(third.replaces_content());
    apply(&third);
    assert!(dir.read("system.yaml").unwrap().contains("correct-horse"));
}

#[test]
fn test_secrets_file_without_key_always_rewrites() {
    let dir = ConfigDir::new();
    let params = YamlFileParams::new(dir.path("system.yaml"));
    let resource = YamlFile::new(&params).unwrap();
    let target = Desired::from(yaml::parse("a: 1\n").unwrap());

    apply(&resource.instruction(&target).unwrap());
    let second = resource.instruction(&target).unwrap();

    assert_eq!(second.content.as_deref(), Some("a: 1\n"));
}
