// srtext/tests/cli_integration_tests.rs
//! End-to-end tests for the `srtext` binary: sanitize, lookup and replay.

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn srtext() -> Command {
    Command::new(assert_cmd::cargo_bin!("srtext"))
}

fn sanitize_stdin(input: &str, args: &[&str]) -> Assert {
    srtext().arg("sanitize").args(args).write_stdin(input).assert()
}

fn write_data_dir(dir: &Path) {
    fs::write(
        dir.join("Items.json"),
        r#"[null, {"id": 1, "name": "Potion", "iconIndex": 176}, {"id": 2, "name": "Ether", "iconIndex": 177}]"#,
    )
    .unwrap();
    fs::write(
        dir.join("Skills.json"),
        r#"[null, {"id": 1, "name": "Heal", "iconIndex": 72}, {"id": 2, "name": "Cure", "iconIndex": 176}]"#,
    )
    .unwrap();
    fs::write(
        dir.join("Actors.json"),
        r#"[null, {"id": 1, "name": "Harold", "faceName": "Actor1"}]"#,
    )
    .unwrap();
}

#[test]
fn test_sanitize_general_from_stdin() {
    sanitize_stdin("\\c[2]Welcome\\c[0] home!<br>RESETCOLOR", &["--quiet"])
        .success()
        .stdout("Welcome home! \n");
}

#[test]
fn test_sanitize_name_box_mode() {
    sanitize_stdin("\\c[2]Lara Croft\\c", &["--mode", "name-box"])
        .success()
        .stdout("Lara Croft\n");
}

#[test]
fn test_sanitize_line_buffered() {
    sanitize_stdin("one<br>\n\\{two\\}\n", &["--line-buffered"])
        .success()
        .stdout("one \n\\two\\\n");
}

#[test]
fn test_sanitize_file_to_file_with_icons() {
    let dir = tempdir().unwrap();
    write_data_dir(dir.path());
    let input = dir.path().join("page.txt");
    let output = dir.path().join("out.txt");
    fs::write(&input, "Take \\I[176]and \\i[72]quickly.\n").unwrap();

    srtext()
        .arg("sanitize")
        .arg("--input-file")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fs::read_to_string(&output).unwrap(), "Take Potion and Heal quickly.\n");
}

#[test]
fn test_sanitize_with_disabled_rule() {
    sanitize_stdin("{big}<br>", &["--disable", "display_escape_characters"])
        .success()
        .stdout("{big} \n");
}

#[test]
fn test_sanitize_with_user_rule_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("rules.yaml");
    fs::write(
        &config,
        r#"
general:
  rules:
    - name: shake
      pattern_type: literal
      pattern: "<SHAKE>"
      replace_with: ""
"#,
    )
    .unwrap();

    srtext()
        .arg("--config")
        .arg(&config)
        .arg("sanitize")
        .write_stdin("<SHAKE>Earthquake!<br>Run!")
        .assert()
        .success()
        .stdout("Earthquake! Run!\n");
}

#[test]
fn test_bad_rule_file_fails() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("rules.yaml");
    fs::write(
        &config,
        "general:\n  rules:\n    - name: broken\n      pattern: '[oops'\n",
    )
    .unwrap();

    srtext()
        .arg("--config")
        .arg(&config)
        .arg("sanitize")
        .write_stdin("text")
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken"));
}

#[test]
fn test_lookup_respects_priority() {
    let dir = tempdir().unwrap();
    write_data_dir(dir.path());

    srtext()
        .args(["lookup", "176", "--data-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout("Potion\n");
}

#[test]
fn test_lookup_unknown_icon_fails() {
    let dir = tempdir().unwrap();
    write_data_dir(dir.path());

    srtext()
        .args(["lookup", "9999", "--data-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No named entry uses icon 9999"));
}

#[test]
fn test_replay_prints_spoken_lines_and_history() {
    let dir = tempdir().unwrap();
    write_data_dir(dir.path());
    let events = concat!(
        r#"{"kind":"message","body":"Morning\\c[4] already?","speaker":{"type":"face","value":"Actor1"}}"#,
        "\n",
        r#"{"kind":"item","name":"Potion","count":3,"description":"Restores HP. See \\I[72]."}"#,
        "\n",
        r#"{"kind":"item","name":"Potion","count":3,"description":"Restores HP. See \\I[72]."}"#,
        "\n",
    );

    srtext()
        .arg("replay")
        .arg("--data-dir")
        .arg(dir.path())
        .write_stdin(events)
        .assert()
        .success()
        .stdout(
            "Harold: Morning already?\nPotion: 3. Restores HP. See Heal .\nPotion: 3. Restores HP. See Heal .\n",
        )
        .stderr(predicate::str::contains("Announcement history (2 of 20)"));
}

#[test]
fn test_replay_json_report() {
    let output = srtext()
        .args(["replay", "--json"])
        .write_stdin("{\"kind\":\"battler\",\"name\":\"Slime\",\"hp\":12,\"max_hp\":30}\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["spoken"][0], "Slime: 12 / 30");
    assert_eq!(report["history"][0]["text"], "Slime: 12 / 30");
    assert_eq!(report["history"][0]["inserted_at"], 0);
}

#[test]
fn test_replay_rejects_malformed_event() {
    srtext()
        .arg("replay")
        .write_stdin("{\"kind\":\"text\",\"text\":\"fine\"}\nnot json\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}
