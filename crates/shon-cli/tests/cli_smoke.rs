use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn shon() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("shon"))
}

fn json_of(output: std::process::Output) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn help_works() -> Result<(), Box<dyn std::error::Error>> {
    shon().arg("--help").assert().success();
    Ok(())
}

#[test]
fn scalar_prints_json_string() -> Result<(), Box<dyn std::error::Error>> {
    let out = json_of(shon().arg("foo").output()?)?;
    assert_eq!(out, serde_json::json!("foo"));
    Ok(())
}

#[test]
fn object_is_indented_by_default() -> Result<(), Box<dyn std::error::Error>> {
    let output = shon()
        .args(["[", "--name", "foo", "--tags", "[", "a", "b", "]", "--size=3", "]"])
        .output()?;
    let text = String::from_utf8(output.stdout.clone())?;
    assert!(text.contains("\n  \"name\": \"foo\""), "got {text}");
    let out = json_of(output)?;
    assert_eq!(out, serde_json::json!({"name": "foo", "tags": ["a", "b"], "size": 3}));
    Ok(())
}

#[test]
fn tokens_pass_through_verbatim() -> Result<(), Box<dyn std::error::Error>> {
    let out = json_of(shon().args(["--compact", "-t"]).output()?)?;
    assert_eq!(out, serde_json::json!(true));

    let out = json_of(shon().args(["--", "-t"]).output()?)?;
    assert_eq!(out, serde_json::json!("-t"));

    let out = json_of(shon().args(["--", "10"]).output()?)?;
    assert_eq!(out, serde_json::json!("10"));

    let out = json_of(shon().args(["--", "--"]).output()?)?;
    assert_eq!(out, serde_json::json!("--"));

    let out = json_of(shon().args(["[", "--compact", "-t", "]"]).output()?)?;
    assert_eq!(out, serde_json::json!({"compact": true}));
    Ok(())
}

#[test]
fn implicit_object_mode() -> Result<(), Box<dyn std::error::Error>> {
    let out = json_of(
        shon()
            .args(["--object", "--name", "foo", "--debug", "-t", "--parent", "-n"])
            .output()?,
    )?;
    assert_eq!(out, serde_json::json!({"name": "foo", "debug": true, "parent": null}));
    Ok(())
}

#[test]
fn preserve_numbers_keeps_literals() -> Result<(), Box<dyn std::error::Error>> {
    shon()
        .args(["--compact", "--preserve-numbers", "[", "1.50", "10", "]"])
        .assert()
        .success()
        .stdout("[1.50,10]\n");
    Ok(())
}

#[test]
fn tokens_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut tmp = NamedTempFile::new()?;
    write!(tmp, "[ --msg 'hello world' --list [ 1 2 ] ]")?;
    let out = json_of(shon().arg("--from").arg(tmp.path()).output()?)?;
    assert_eq!(out, serde_json::json!({"msg": "hello world", "list": [1, 2]}));
    Ok(())
}

#[test]
fn from_rejects_extra_tokens() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = NamedTempFile::new()?;
    shon()
        .arg("--from")
        .arg(tmp.path())
        .arg("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be combined with tokens"));
    Ok(())
}

#[test]
fn parse_failure_exits_nonzero() -> Result<(), Box<dyn std::error::Error>> {
    shon()
        .arg("]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected a value"));

    shon()
        .args(["[", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected an array item"));

    shon()
        .args(["1", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected trailing arguments"));
    Ok(())
}
