use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const CHEAP: [&str; 6] = [
    "--argon-mem",
    "1024",
    "--argon-time",
    "1",
    "--argon-parallelism",
    "1",
];

fn bin() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("argonhash"));
    cmd.env_remove("ARGONHASH_PASSWORD")
        .env_remove("ARGONHASH_CONFIG")
        .env_remove("ARGONHASH_MEM")
        .env_remove("ARGONHASH_TIME")
        .env_remove("ARGONHASH_PARALLELISM")
        .env_remove("ARGONHASH_KEY_LEN");
    cmd
}

fn hash_with(password: &str, extra: &[&str]) -> String {
    let output = bin()
        .env("ARGONHASH_PASSWORD", password)
        .arg("hash")
        .args(CHEAP)
        .args(extra)
        .output()
        .unwrap();

    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[test]
fn hash_prints_phc_string() {
    bin()
        .env("ARGONHASH_PASSWORD", "MyP@55w0rd")
        .arg("hash")
        .args(CHEAP)
        .arg("--salt")
        .arg("ab12CD34ef")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "$argon2id$v=19$m=1024,t=1,p=1$YWIxMkNEMzRlZg$",
        ));
}

#[test]
fn hash_with_fixed_salt_is_deterministic() {
    let a = hash_with("pw", &["--salt", "ab12CD34ef"]);
    let b = hash_with("pw", &["--salt", "ab12CD34ef"]);
    assert_eq!(a, b);
}

#[test]
fn hash_uses_random_salt_by_default() {
    let a = hash_with("pw", &[]);
    let b = hash_with("pw", &[]);
    assert_ne!(a, b);
}

#[test]
fn hash_reads_password_from_stdin() {
    let from_env = hash_with("piped", &["--salt", "ab12CD34ef"]);

    bin()
        .arg("hash")
        .args(CHEAP)
        .arg("--salt")
        .arg("ab12CD34ef")
        .write_stdin("piped\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(from_env));
}

#[test]
fn hash_rejects_short_salt() {
    bin()
        .env("ARGONHASH_PASSWORD", "pw")
        .arg("hash")
        .args(CHEAP)
        .arg("--salt")
        .arg("abc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to hash password"));
}

#[test]
fn hash_rejects_zero_time_cost() {
    bin()
        .env("ARGONHASH_PASSWORD", "pw")
        .arg("hash")
        .arg("--argon-time")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid Argon2 parameters"));
}

#[test]
fn verify_correct_password_matches() {
    let hash = hash_with("MyP@55w0rd", &[]);

    bin()
        .env("ARGONHASH_PASSWORD", "MyP@55w0rd")
        .arg("verify")
        .arg(&hash)
        .args(CHEAP)
        .assert()
        .success()
        .stdout(predicate::str::contains("hash matched!"));
}

#[test]
fn verify_wrong_password_fails() {
    let hash = hash_with("MyP@55w0rd", &[]);

    bin()
        .env("ARGONHASH_PASSWORD", "wrong")
        .arg("verify")
        .arg(&hash)
        .args(CHEAP)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("hash does not match!"));
}

#[test]
fn verify_reports_outdated_params() {
    let hash = hash_with("pw", &[]);

    bin()
        .env("ARGONHASH_PASSWORD", "pw")
        .arg("verify")
        .arg(&hash)
        .args(["--argon-mem", "2048", "--argon-time", "1", "--argon-parallelism", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hash matched!"))
        .stderr(predicate::str::contains("consider rehashing"));
}

#[test]
fn verify_with_configured_params_ignores_stored_ones() {
    let hash = hash_with("pw", &[]);

    bin()
        .env("ARGONHASH_PASSWORD", "pw")
        .arg("verify")
        .arg(&hash)
        .arg("--configured-params")
        .args(["--argon-mem", "2048", "--argon-time", "1", "--argon-parallelism", "1"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("hash does not match!"));
}

#[test]
fn verify_malformed_hash_is_an_error() {
    bin()
        .env("ARGONHASH_PASSWORD", "pw")
        .arg("verify")
        .arg("$argon2i$v=19$m=1024,t=1,p=1$YWIxMkNEMzRlZg$AAAA")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("incompatible variant"));

    bin()
        .env("ARGONHASH_PASSWORD", "pw")
        .arg("verify")
        .arg("$argon2id$v=19$m=1024,t=1,p=1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not in the correct format"));
}

#[test]
fn verify_refuses_oversized_stored_params() {
    bin()
        .env("ARGONHASH_PASSWORD", "pw")
        .arg("verify")
        .arg("$argon2id$v=19$m=8,t=4000000000,p=1$YWIxMkNEMzRlZg$c2VjcmV0LWtleS1ieXRlcy0wMTIzNDU2Nzg5YWJjZGVm")
        .args(CHEAP)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("exceed the allowed cost"));
}

#[test]
fn config_file_supplies_params() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("argon.json");
    std::fs::write(
        &config,
        r#"{"time_cost": 1, "mem_cost_kib": 1024, "parallelism": 1, "key_len": 16}"#,
    )
    .unwrap();

    bin()
        .env("ARGONHASH_PASSWORD", "pw")
        .arg("hash")
        .arg("--config")
        .arg(&config)
        .arg("--salt")
        .arg("ab12CD34ef")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));
}

#[test]
fn env_vars_supply_params() {
    bin()
        .env("ARGONHASH_PASSWORD", "pw")
        .env("ARGONHASH_MEM", "1024")
        .env("ARGONHASH_TIME", "1")
        .env("ARGONHASH_PARALLELISM", "1")
        .arg("hash")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));
}

#[test]
fn salt_prints_alphanumeric_string() {
    bin()
        .arg("salt")
        .arg("--len")
        .arg("10")
        .assert()
        .success()
        .stdout(predicate::str::is_match("^[A-Za-z0-9]{10}\n$").unwrap());
}

#[test]
fn salt_rejects_zero_length() {
    bin().arg("salt").arg("--len").arg("0").assert().failure();
}

#[test]
fn inspect_prints_fields() {
    let output = bin()
        .arg("inspect")
        .arg("$argon2id$v=19$m=65536,t=2,p=4$YWIxMkNEMzRlZg$c2VjcmV0LWtleS1ieXRlcy0wMTIzNDU2Nzg5YWJjZGVm")
        .output()
        .unwrap();
    assert!(output.status.success());

    let info: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(info["variant"], "argon2id");
    assert_eq!(info["version"], 19);
    assert_eq!(info["params"]["mem_cost_kib"], 65536);
    assert_eq!(info["params"]["time_cost"], 2);
    assert_eq!(info["params"]["parallelism"], 4);
    assert_eq!(info["salt_len"], 10);
    assert_eq!(info["key_len"], 33);
}
