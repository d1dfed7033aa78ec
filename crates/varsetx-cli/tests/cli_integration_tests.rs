//! CLI integration tests
//!
//! Run the built binary against a scene fixture and a chain file in a
//! temporary directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const SCENE: &str = r#"
schema_version: 0
nodes:
  - name: A
    groups:
      - name: look
        choices: [red, blue]
        active: red
  - name: B
"#;

fn setup(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
    let scene = temp_dir.path().join("scene.yaml");
    fs::write(&scene, SCENE).unwrap();
    (scene, temp_dir.path().join("chain.json"))
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_varsetx-cli"))
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn apply_choice(dir: &Path, scene: &Path, chain: &Path, choice: &str) -> Output {
    run(
        dir,
        &[
            "apply",
            scene.to_str().unwrap(),
            "--node",
            "/A",
            "--choice",
            choice,
            "--chain",
            chain.to_str().unwrap(),
        ],
    )
}

fn chain_json(chain: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(chain).unwrap()).unwrap()
}

#[test]
fn test_cli_inspect_lists_candidates() {
    let temp_dir = TempDir::new().unwrap();
    let (scene, _) = setup(&temp_dir);

    let output = run(temp_dir.path(), &["inspect", scene.to_str().unwrap()]);

    assert!(
        output.status.success(),
        "inspect should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("/A\n"));
    assert!(stdout.contains("  look: *red, blue"));
    assert!(!stdout.contains("/B"));
}

#[test]
fn test_cli_apply_reuse_and_reset() {
    let temp_dir = TempDir::new().unwrap();
    let (scene, chain) = setup(&temp_dir);
    let dir = temp_dir.path();

    // First apply creates a node
    let output = apply_choice(dir, &scene, &chain, "blue");
    assert!(
        output.status.success(),
        "apply should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Created edit node 'blue'"));
    assert_eq!(chain_json(&chain)["chain"]["nodes"].as_array().unwrap().len(), 1);

    // Same selection again is reused
    let output = apply_choice(dir, &scene, &chain, "blue");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Reused edit node 'blue'"));
    assert_eq!(chain_json(&chain)["chain"]["nodes"].as_array().unwrap().len(), 1);

    // A different choice chains a second node
    let output = apply_choice(dir, &scene, &chain, "red");
    assert!(output.status.success());
    assert_eq!(chain_json(&chain)["chain"]["nodes"].as_array().unwrap().len(), 2);

    let output = run(dir, &["show", "--chain", chain.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("**Active output**: `red`"));
    assert!(stdout.contains("2. **blue** `/A {look=blue}`"));

    // Reset removes both and re-activates the root input
    let output = run(dir, &["reset", "--chain", chain.to_str().unwrap()]);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Removed 2 edit node(s)"));
    let json = chain_json(&chain);
    assert!(json["chain"]["nodes"].as_array().unwrap().is_empty());
    assert_eq!(json["chain"]["active_output"], json["root_input"]);
}

#[test]
fn test_cli_invalid_choice_fails_with_code() {
    let temp_dir = TempDir::new().unwrap();
    let (scene, chain) = setup(&temp_dir);

    let output = apply_choice(temp_dir.path(), &scene, &chain, "green");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_INVALID_SELECTION"), "stderr: {}", stderr);
    assert!(!chain.exists(), "failed apply must not write the chain file");
}

#[test]
fn test_cli_custom_marker_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let (scene, chain) = setup(&temp_dir);
    let dir = temp_dir.path();
    let config = dir.join("varsetx.toml");
    fs::write(&config, "marker = \"studio.lookdev\"\nname_prefix = \"set_\"\n").unwrap();

    let output = run(
        dir,
        &[
            "--config",
            config.to_str().unwrap(),
            "apply",
            scene.to_str().unwrap(),
            "--node",
            "/A",
            "--group",
            "look",
            "--choice",
            "blue",
            "--chain",
            chain.to_str().unwrap(),
        ],
    );
    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json = chain_json(&chain);
    let node = &json["chain"]["nodes"][0];
    assert_eq!(node["name"], "set_blue");
    assert_eq!(node["marker"], "studio.lookdev");

    // Reset without the config does not touch the custom-marked node
    let output = run(dir, &["reset", "--chain", chain.to_str().unwrap()]);
    assert!(String::from_utf8_lossy(&output.stdout).contains("No applier-created edit nodes"));
    assert_eq!(chain_json(&chain)["chain"]["nodes"].as_array().unwrap().len(), 1);
}

#[test]
fn test_cli_missing_scene_fails() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(temp_dir.path(), &["inspect", "does-not-exist.yaml"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load scene"));
}
