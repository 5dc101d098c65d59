//! End-to-end tests for the `pp` binary
//!
//! Every command runs inside a scratch directory with HOME and the XDG
//! directories pointed at it, so user config, catalog overrides and the log
//! file never touch the real environment.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pp(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pp").expect("binary should build");
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_DATA_HOME", home.join(".local/share"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn write_project_entry(home: &Path, file: &str, yaml: &str) {
    let dir = home.join(".promptplus").join("catalog");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), yaml).unwrap();
}

const HAIKU: &str = r#"
icon: "🌸"
card:
  title: Haiku
  description: Three lines about anything.
title: "🌸 Haiku"
fields:
  - name: subject
    kind: short-text
    label: Subject
template: "Write a haiku about [subject]."
"#;

// =============================================================================
// list / show
// =============================================================================

#[test]
fn test_list_shows_builtin_categories() {
    let home = TempDir::new().unwrap();
    pp(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Prompt++"))
        .stdout(predicate::str::contains("content-creation"))
        .stdout(predicate::str::contains("Code Generation"))
        .stdout(predicate::str::contains("debugging"));
}

#[test]
fn test_list_json_keeps_listing_order() {
    let home = TempDir::new().unwrap();
    let output = pp(home.path()).args(["list", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let cards: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = cards
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            "content-creation",
            "code-generation",
            "learning",
            "brainstorming",
            "writing",
            "debugging"
        ]
    );
}

#[test]
fn test_show_lists_fields_and_options() {
    let home = TempDir::new().unwrap();
    pp(home.path())
        .args(["show", "content-creation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Content Creation"))
        .stdout(predicate::str::contains("Tone"))
        .stdout(predicate::str::contains("authoritative"))
        .stdout(predicate::str::contains("skeptical readers"));
}

#[test]
fn test_show_unknown_category_is_not_fatal() {
    let home = TempDir::new().unwrap();
    pp(home.path())
        .args(["show", "nonexistent-category"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page not found"))
        .stdout(predicate::str::contains("Return Home"));
}

// =============================================================================
// generate
// =============================================================================

#[test]
fn test_generate_writing_prompt() {
    let home = TempDir::new().unwrap();
    pp(home.path())
        .args(["generate", "writing", "-s", "type=email", "-s", "tone=formal", "-s", "goal=inform"])
        .assert()
        .success()
        .stdout(
            "Write a email with a formal tone to inform. Keep the message clear, concise, and engaging.\n\n\
             [PASTE YOUR TEXT HERE]\n",
        );
}

#[test]
fn test_generate_leaves_unset_placeholders() {
    let home = TempDir::new().unwrap();
    pp(home.path())
        .args(["generate", "writing", "--set", "tone=friendly"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Write a [type] with a friendly tone to [goal].",
        ));
}

#[test]
fn test_generate_value_is_inserted_verbatim() {
    let home = TempDir::new().unwrap();
    pp(home.path())
        .args(["generate", "content-creation", "-s", "topic=[tone] & $1 \\n"])
        .assert()
        .success()
        .stdout(predicate::str::contains("about \"[tone] & $1 \\n\""))
        .stdout(predicate::str::contains("with a [tone] tone"));
}

#[test]
fn test_generate_json_reports_unfilled() {
    let home = TempDir::new().unwrap();
    let output = pp(home.path())
        .args(["generate", "writing", "-s", "type=story", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["category"], "writing");
    assert!(body["prompt"].as_str().unwrap().starts_with("Write a story with a [tone] tone"));
    assert_eq!(body["unfilled"], serde_json::json!(["tone", "goal"]));
    assert_eq!(body["copied"], false);
}

#[test]
fn test_generate_unknown_category_shows_not_found() {
    let home = TempDir::new().unwrap();
    pp(home.path())
        .args(["generate", "nonexistent-category", "-s", "tone=formal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page not found"))
        .stdout(predicate::str::contains("writing"));
}

#[test]
fn test_generate_unknown_category_json() {
    let home = TempDir::new().unwrap();
    let output = pp(home.path())
        .args(["generate", "nope", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["error"], "not-found");
    assert_eq!(body["category"], "nope");
    assert_eq!(body["available"].as_array().unwrap().len(), 6);
}

#[test]
fn test_generate_rejects_malformed_assignment() {
    let home = TempDir::new().unwrap();
    pp(home.path())
        .args(["generate", "writing", "-s", "tone"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME=VALUE"));
}

#[test]
fn test_generate_all_flag_fills_every_occurrence() {
    let home = TempDir::new().unwrap();
    write_project_entry(
        home.path(),
        "echo.yml",
        r#"
title: Echo
fields:
  - name: word
    kind: short-text
    label: Word
template: "[word] and [word]"
"#,
    );

    pp(home.path())
        .args(["generate", "echo", "-s", "word=hi"])
        .assert()
        .success()
        .stdout("hi and [word]\n");

    pp(home.path())
        .args(["generate", "echo", "-s", "word=hi", "--all"])
        .assert()
        .success()
        .stdout("hi and hi\n");
}

#[test]
fn test_config_substitution_mode_all() {
    let home = TempDir::new().unwrap();
    write_project_entry(
        home.path(),
        "echo.yml",
        r#"
title: Echo
fields:
  - name: word
    kind: short-text
    label: Word
template: "[word] and [word]"
"#,
    );
    fs::write(home.path().join(".promptplus.yml"), "substitution:\n  mode: all\n").unwrap();

    pp(home.path())
        .args(["generate", "echo", "-s", "word=hi"])
        .assert()
        .success()
        .stdout("hi and hi\n");
}

// =============================================================================
// catalog overrides
// =============================================================================

#[test]
fn test_project_catalog_adds_category() {
    let home = TempDir::new().unwrap();
    write_project_entry(home.path(), "haiku.yml", HAIKU);

    pp(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Haiku"))
        .stdout(predicate::str::contains("(haiku)"));

    pp(home.path())
        .args(["generate", "haiku", "-s", "subject=the moon"])
        .assert()
        .success()
        .stdout("Write a haiku about the moon.\n");
}

#[test]
fn test_user_catalog_overrides_builtin() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".config").join("promptplus").join("catalog");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("writing.yml"),
        r#"
title: Short Writing
fields:
  - name: type
    kind: choice
    label: Type
    options: [memo]
template: "Draft a [type]."
"#,
    )
    .unwrap();

    pp(home.path())
        .args(["generate", "writing", "-s", "type=memo"])
        .assert()
        .success()
        .stdout("Draft a memo.\n");
}

#[test]
fn test_explicit_config_path() {
    let home = TempDir::new().unwrap();
    let custom = home.path().join("templates");
    fs::create_dir_all(&custom).unwrap();
    fs::write(custom.join("haiku.yml"), HAIKU).unwrap();

    let config = home.path().join("custom.yml");
    fs::write(
        &config,
        format!("catalog:\n  paths:\n    - {}\n", custom.display()),
    )
    .unwrap();

    let output = pp(home.path())
        .args(["-c", config.to_str().unwrap(), "list", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let cards: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let cards = cards.as_array().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["id"], "haiku");
}

// =============================================================================
// check
// =============================================================================

#[test]
fn test_check_builtin_catalog_passes() {
    let home = TempDir::new().unwrap();
    pp(home.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("6 categories checked"));
}

#[test]
fn test_check_reports_unknown_placeholder() {
    let home = TempDir::new().unwrap();
    write_project_entry(
        home.path(),
        "broken.yml",
        r#"
title: Broken
fields:
  - name: topic
    kind: short-text
    label: Topic
template: "Explain [topic] to [audience]."
"#,
    );

    pp(home.path())
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("broken: template references unknown field [audience]"));
}

#[test]
fn test_strict_catalog_refuses_to_load() {
    let home = TempDir::new().unwrap();
    write_project_entry(
        home.path(),
        "broken.yml",
        r#"
title: Broken
fields:
  - name: tone
    kind: choice
    label: Tone
template: "[tone]"
"#,
    );
    fs::write(home.path().join(".promptplus.yml"), "catalog:\n  strict: true\n").unwrap();

    pp(home.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load template catalog"));
}

// =============================================================================
// interactive session (scripted through stdin)
// =============================================================================

#[test]
fn test_interactive_back_discards_form_values() {
    let home = TempDir::new().unwrap();
    pp(home.path())
        .arg("interactive")
        .write_stdin("5\n1\n1\n1\n/generate\n/back\n5\n\n\n\n/generate\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Write a email with a formal tone to inform."))
        .stdout(predicate::str::contains("Write a [type] with a [tone] tone to [goal]."))
        .stdout(predicate::str::contains("Unfilled: type, tone, goal"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_interactive_set_replaces_value() {
    let home = TempDir::new().unwrap();
    pp(home.path())
        .args(["interactive", "writing"])
        .write_stdin("1\n1\n1\n/set tone\n2\n/generate\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Write a email with a friendly tone to inform."))
        .stdout(predicate::str::contains("formal tone").not());
}

#[test]
fn test_interactive_unknown_id_keeps_running() {
    let home = TempDir::new().unwrap();
    pp(home.path())
        .write_stdin("nonexistent-category\n5\n\n\n\n/generate\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Page not found"))
        .stdout(predicate::str::contains("Return Home"))
        .stdout(predicate::str::contains("Write a [type] with a [tone] tone to [goal]."))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_interactive_short_text_kept_as_typed() {
    let home = TempDir::new().unwrap();
    pp(home.path())
        .args(["interactive", "content-creation"])
        .write_stdin("\n  solar power  \n\n\n/generate\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("about \"  solar power  \" for [audience]"));
}

#[test]
fn test_interactive_ends_on_eof() {
    let home = TempDir::new().unwrap();
    pp(home.path())
        .arg("interactive")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Prompt++"));
}

// =============================================================================
// logging
// =============================================================================

#[test]
fn test_log_file_is_written() {
    let home = TempDir::new().unwrap();
    pp(home.path())
        .args(["-l", "debug", "list"])
        .assert()
        .success();

    let log = home
        .path()
        .join(".local/share")
        .join("promptplus")
        .join("logs")
        .join("promptplus.log");
    let content = fs::read_to_string(log).unwrap();
    assert!(content.contains("Logging initialized"));
    assert!(content.contains("cmd_list: called"));
}
