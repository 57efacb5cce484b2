//! End-to-end tests of the `confseal` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const PASSPHRASE: &str = "aquickredfox";
const SALT: &str = "some-salt";
const KEY: &str = "//iQh9KYe7pM+mevjifZPrm7YE2+rRloG1E15zzjR88=";
const PAYLOAD: &str = "ARDuFSOqVc5l8dPe2l8jLnRvf2Y2/ZnhWNtkuZuoP1Updxo4cFAsFr+eM4WVcH/yIogK3ypO4sLp7sSXjkXv3L5Ci/5poJG2U/+No5ySBR1BhDjcV3mkO3TBYp4nQu65mpA=";
const PLAINTEXT: &str = "SSL_KEYSTORE_PASSWORD=keypass1234\nSSL_TRUSTSTORE_PASSWORD=trustpass1234";

/// A `confseal` command isolated from the caller's environment.
fn confseal() -> Command {
    let mut cmd = Command::cargo_bin("confseal").unwrap();
    for var in [
        "CONFSEAL_LOG_LEVEL",
        "CONFSEAL_LOG_FORMAT",
        "CONFSEAL_KEY",
        "CONFSEAL_KEY_FILE",
        "CONFSEAL_PASSPHRASE",
        "CONFSEAL_SALT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Replace the first four base64 characters (bytes 0..3 of the envelope).
fn with_prefix(prefix: &str) -> String {
    format!("{prefix}{}", &PAYLOAD[4..])
}

#[test]
fn decrypts_reference_payload_with_passphrase() {
    confseal()
        .args(["--passphrase", PASSPHRASE, "--salt", SALT])
        .args(["decrypt", "--text", PAYLOAD])
        .assert()
        .success()
        .stdout(format!("{PLAINTEXT}\n"));
}

#[test]
fn decrypts_reference_payload_with_key() {
    confseal()
        .args(["--key", KEY, "decrypt", "--text", PAYLOAD])
        .assert()
        .success()
        .stdout(format!("{PLAINTEXT}\n"));
}

#[test]
fn key_from_environment() {
    confseal()
        .env("CONFSEAL_KEY", KEY)
        .args(["decrypt", "--text", PAYLOAD])
        .assert()
        .success()
        .stdout(format!("{PLAINTEXT}\n"));
}

#[test]
fn encrypt_then_decrypt_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let key_file = dir.path().join("key.b64");
    let input = dir.path().join("secrets.properties");
    let sealed = dir.path().join("secrets.enc");
    let opened = dir.path().join("secrets.out");

    fs::write(&key_file, format!("{KEY}\n")).unwrap();
    fs::write(&input, "db.password=hunter2\n").unwrap();

    confseal()
        .arg("--key-file")
        .arg(&key_file)
        .arg("encrypt")
        .arg("--file")
        .arg(&input)
        .arg("--out")
        .arg(&sealed)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    confseal()
        .args(["--passphrase", PASSPHRASE, "--salt", SALT])
        .arg("decrypt")
        .arg("--file")
        .arg(&sealed)
        .arg("--out")
        .arg(&opened)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&opened).unwrap(), "db.password=hunter2\n");
}

#[test]
fn decrypt_as_map() {
    confseal()
        .args(["--key", KEY, "decrypt", "--text", PAYLOAD, "--format", "map"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""SSL_KEYSTORE_PASSWORD": "keypass1234""#))
        .stdout(predicate::str::contains(r#""SSL_TRUSTSTORE_PASSWORD": "trustpass1234""#));
}

#[test]
fn decrypt_as_props() {
    confseal()
        .args(["--key", KEY, "decrypt", "--text", PAYLOAD, "--format", "props"])
        .assert()
        .success()
        .stdout(format!("{PLAINTEXT}\n"));
}

#[test]
fn inspect_needs_no_key() {
    confseal()
        .args(["inspect", "--text", PAYLOAD])
        .assert()
        .success()
        .stdout("{\"version\":1,\"iv_len\":16,\"ciphertext_len\":80}\n");
}

#[test]
fn unsupported_version_exits_4() {
    // 0x02 0x10 0xEE
    confseal()
        .args(["--key", KEY, "decrypt", "--text", &with_prefix("AhDu")])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("unsupported scheme version: 2"));
}

#[test]
fn bad_iv_length_exits_4() {
    // 0x01 0x08 0xEE
    confseal()
        .args(["--key", KEY, "decrypt", "--text", &with_prefix("AQju")])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("invalid IV length: 8"));
}

#[test]
fn wrong_passphrase_exits_5() {
    confseal()
        .args(["--passphrase", "wrongpass", "--salt", SALT])
        .args(["decrypt", "--text", PAYLOAD])
        .assert()
        .code(5)
        .stdout(predicate::str::is_empty());
}

#[test]
fn empty_passphrase_exits_3() {
    confseal()
        .args(["--passphrase", "", "--salt", SALT, "encrypt", "--text", "x"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid key material"));
}

#[test]
fn missing_key_exits_1() {
    confseal()
        .args(["encrypt", "--text", "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no key given"));
}

#[test]
fn conflicting_environment_is_rejected() {
    confseal()
        .env("CONFSEAL_KEY", KEY)
        .env("CONFSEAL_PASSPHRASE", PASSPHRASE)
        .args(["inspect", "--text", PAYLOAD])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("configuration invalid"));
}

#[test]
fn logs_never_reach_stdout() {
    let output = confseal()
        .env("CONFSEAL_LOG_LEVEL", "debug")
        .env("CONFSEAL_LOG_FORMAT", "json")
        .args(["--key", KEY, "encrypt", "--text", "x"])
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.trim().starts_with("AR"));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("payload encrypted"));
    assert!(!stderr.contains(KEY));
}
