use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn vriksha_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_vriksha"))
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = format!(
        r#"[db]
path = "{root}/data/vriksha.sqlite"

[logging]
level = "warn"

[auth]
session_path = "{root}/data/session.json"

[assistant.gemini]
api_key_env = "VRIKSHA_TEST_KEY_THAT_IS_NEVER_SET"

[assistant.openai]
api_key_env = "VRIKSHA_TEST_KEY_THAT_IS_NEVER_SET"
"#,
        root = root.display()
    );

    let config_path = config_dir.join("vriksha.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_vriksha(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = vriksha_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run vriksha binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_catalog_lists_plants() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, ok) = run_vriksha(&config, &["catalog"]);
    assert!(ok, "catalog failed: {}", stderr);
    assert_eq!(stdout.lines().count(), 6);
    assert!(stdout.contains("Snake Plant"));
    assert!(stdout.contains("25.00"));
}

#[test]
fn test_catalog_runs_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.toml");
    let (stdout, _, ok) = run_vriksha(&missing, &["catalog"]);
    assert!(ok);
    assert!(stdout.contains("Monstera Deliciosa"));
}

#[test]
fn test_chat_without_credentials_uses_rules() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, ok) = run_vriksha(&config, &["chat", "How do I contact support?"]);
    assert!(ok, "chat failed: {}", stderr);
    assert!(stdout.contains("+91 8542986911"));
    assert!(stdout.contains("status: simulated"));
}

#[test]
fn test_chat_with_image_without_credentials() {
    let (tmp, config) = setup_test_env();
    let image = tmp.path().join("leaf.png");
    fs::write(&image, [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]).unwrap();

    let (stdout, stderr, ok) = run_vriksha(
        &config,
        &["chat", "--image", image.to_str().unwrap()],
    );
    assert!(ok, "chat failed: {}", stderr);
    assert!(stdout.contains("Describe what you see"));
}

#[test]
fn test_chat_requires_message_or_image() {
    let (_tmp, config) = setup_test_env();
    let (_, stderr, ok) = run_vriksha(&config, &["chat", "   "]);
    assert!(!ok);
    assert!(stderr.contains("provide a message"));
}

#[test]
fn test_init_idempotent() {
    let (tmp, config) = setup_test_env();
    let (stdout, _, ok) = run_vriksha(&config, &["init"]);
    assert!(ok);
    assert!(stdout.contains("initialized"));
    assert!(tmp.path().join("data/vriksha.sqlite").exists());

    let (_, _, ok) = run_vriksha(&config, &["init"]);
    assert!(ok);
}

#[test]
fn test_account_sign_in_flow() {
    let (_tmp, config) = setup_test_env();
    run_vriksha(&config, &["init"]);

    let (stdout, _, _) = run_vriksha(&config, &["account", "whoami"]);
    assert!(stdout.contains("Not signed in"));

    let (_, stderr, ok) = run_vriksha(
        &config,
        &["account", "sign-in", "demo@vriksha.com", "--password", "wrong"],
    );
    assert!(!ok);
    assert!(stderr.contains("invalid password"));

    let (stdout, stderr, ok) = run_vriksha(
        &config,
        &["account", "sign-in", "demo@vriksha.com", "--password", "password123"],
    );
    assert!(ok, "sign-in failed: {}", stderr);
    assert!(stdout.contains("Demo User"));

    let (stdout, _, _) = run_vriksha(&config, &["account", "whoami"]);
    assert!(stdout.contains("demo@vriksha.com"));
    assert!(stdout.contains("since 2024-01-01"));

    let (_, _, ok) = run_vriksha(&config, &["account", "sign-out"]);
    assert!(ok);
    let (stdout, _, _) = run_vriksha(&config, &["account", "whoami"]);
    assert!(stdout.contains("Not signed in"));
}

#[test]
fn test_account_sign_up_rejects_duplicates() {
    let (_tmp, config) = setup_test_env();
    let args = [
        "account",
        "sign-up",
        "fern@example.com",
        "--password",
        "secret",
        "--name",
        "Fern",
    ];
    let (stdout, stderr, ok) = run_vriksha(&config, &args);
    assert!(ok, "sign-up failed: {}", stderr);
    assert!(stdout.contains("Created account Fern"));

    let (_, stderr, ok) = run_vriksha(&config, &args);
    assert!(!ok);
    assert!(stderr.contains("already exists"));
}
