//! Integration tests for ziptask-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

fn ziptask_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("ziptask");
    cmd.env_remove("ZIPTASK_SESSION_DIR").env_remove("RUST_LOG");
    cmd
}

/// Writes a small ZIP archive with one directory and two files.
fn write_sample_zip(path: &Path) {
    let file = fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    zip.add_directory("docs/", options).unwrap();
    zip.start_file("docs/readme.md", options).unwrap();
    zip.write_all(b"# readme").unwrap();
    zip.start_file("data.txt", options).unwrap();
    zip.write_all(b"payload").unwrap();
    zip.finish().unwrap();
}

/// Writes a stored ZIP archive whose `broken.txt` data no longer matches its CRC.
fn write_damaged_zip(path: &Path) {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    zip.start_file("intact.txt", options).unwrap();
    zip.write_all(b"still fine").unwrap();
    zip.start_file("broken.txt", options).unwrap();
    zip.write_all(b"these bytes will rot").unwrap();
    let mut data = zip.finish().unwrap().into_inner();

    let pos = data
        .windows(20)
        .position(|w| w == b"these bytes will rot")
        .unwrap();
    data[pos] = !data[pos];
    fs::write(path, data).unwrap();
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("invalid JSON output")
}

#[test]
fn test_version_flag() {
    ziptask_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ziptask"));
}

#[test]
fn test_help_lists_subcommands() {
    ziptask_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("zip"))
        .stdout(predicate::str::contains("unzip"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn test_zip_file_into_session_dir() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = temp.path().join("report.pdf");
    fs::write(&source, b"%PDF-1.7").unwrap();
    let session = temp.path().join("sess/42");

    ziptask_cmd()
        .arg("--session-dir")
        .arg(&session)
        .arg("zip")
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive created"));

    assert!(session.join("report.pdf.zip").is_file());
}

#[test]
fn test_zip_session_dir_from_env() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = temp.path().join("notes.txt");
    fs::write(&source, "notes").unwrap();
    let session = temp.path().join("env-session");

    ziptask_cmd()
        .env("ZIPTASK_SESSION_DIR", &session)
        .arg("zip")
        .arg(&source)
        .assert()
        .success();

    assert!(session.join("notes.txt.zip").is_file());
}

#[test]
fn test_zip_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = temp.path().join("tree");
    fs::create_dir_all(source.join("a")).unwrap();
    fs::write(source.join("a/b.txt"), "b").unwrap();
    fs::write(source.join("c.txt"), "c").unwrap();
    let out = temp.path().join("out");

    let json = json_stdout(
        ziptask_cmd()
            .arg("--json")
            .arg("zip")
            .arg(&source)
            .arg(&out),
    );

    assert_eq!(json["operation"], "zip");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["files_added"], 2);
    assert_eq!(json["data"]["directories_added"], 1);
    assert_eq!(
        json["data"]["zip_address"],
        out.join("tree.zip").display().to_string()
    );
}

#[test]
fn test_zip_excludes_patterns() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = temp.path().join("logs");
    fs::create_dir(&source).unwrap();
    fs::write(source.join("keep.txt"), "keep").unwrap();
    fs::write(source.join("debug.log"), "drop").unwrap();
    let out = temp.path().join("out");

    ziptask_cmd()
        .arg("zip")
        .arg(&source)
        .arg(&out)
        .arg("-x")
        .arg("*.log")
        .assert()
        .success();

    ziptask_cmd()
        .arg("list")
        .arg(out.join("logs.zip"))
        .assert()
        .success()
        .stdout(predicate::str::contains("keep.txt"))
        .stdout(predicate::str::contains("debug.log").not());
}

#[test]
fn test_zip_nonexistent_source() {
    let temp = TempDir::new().expect("failed to create temp dir");

    ziptask_cmd()
        .arg("--session-dir")
        .arg(temp.path())
        .arg("zip")
        .arg(temp.path().join("ghost.txt"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("HINT"));

    assert!(!temp.path().join("ghost.txt.zip").exists());
}

#[test]
fn test_zip_rejects_invalid_level() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = temp.path().join("a.txt");
    fs::write(&source, "a").unwrap();

    ziptask_cmd()
        .arg("zip")
        .arg(&source)
        .arg("-l")
        .arg("12")
        .assert()
        .failure();
}

#[test]
fn test_unzip_extracts_files() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("sample.zip");
    write_sample_zip(&archive);
    let out = temp.path().join("out");

    ziptask_cmd()
        .arg("unzip")
        .arg(&archive)
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted into"));

    assert_eq!(fs::read_to_string(out.join("docs/readme.md")).unwrap(), "# readme");
    assert_eq!(fs::read_to_string(out.join("data.txt")).unwrap(), "payload");
}

#[test]
fn test_unzip_selected_entry_json() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("sample.zip");
    write_sample_zip(&archive);
    let out = temp.path().join("out");

    let json = json_stdout(
        ziptask_cmd()
            .arg("--json")
            .arg("unzip")
            .arg(&archive)
            .arg(&out)
            .arg("--entry")
            .arg("data.txt"),
    );

    assert_eq!(json["operation"], "unzip");
    assert_eq!(json["data"]["files_extracted"], 1);
    assert_eq!(json["data"]["unzip_address"], out.display().to_string());
    assert!(!out.join("docs/readme.md").exists());
}

#[test]
fn test_unzip_missing_entry() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("sample.zip");
    write_sample_zip(&archive);

    ziptask_cmd()
        .arg("unzip")
        .arg(&archive)
        .arg(temp.path().join("out"))
        .arg("--entry")
        .arg("missing.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.txt"))
        .stderr(predicate::str::contains("ziptask list"));
}

#[test]
fn test_unzip_not_a_zip_json_error() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let bogus = temp.path().join("bogus.zip");
    fs::write(&bogus, "not an archive").unwrap();

    let output = ziptask_cmd()
        .arg("--json")
        .arg("unzip")
        .arg(&bogus)
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["status"], "error");
    assert_eq!(json["operation"], "unzip");
    assert_eq!(json["code"], "corrupt_archive");
    assert!(json["error"].as_str().unwrap().contains("Invalid archive"));
}

#[test]
fn test_list_long_human_readable() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("sample.zip");
    write_sample_zip(&archive);

    ziptask_cmd()
        .arg("list")
        .arg(&archive)
        .arg("--long")
        .arg("-H")
        .assert()
        .success()
        .stdout(predicate::str::contains("docs/readme.md"))
        .stdout(predicate::str::contains("Total: 2 files, 1 directories"))
        .stdout(predicate::str::contains("ratio "));
}

#[test]
fn test_list_json() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("sample.zip");
    write_sample_zip(&archive);

    let json = json_stdout(ziptask_cmd().arg("--json").arg("list").arg(&archive));

    assert_eq!(json["operation"], "list");
    assert_eq!(json["data"]["total_files"], 2);
    assert_eq!(json["data"]["entries"][0]["name"], "docs/");
    assert_eq!(json["data"]["entries"][0]["is_dir"], true);
}

#[test]
fn test_verify_intact_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("sample.zip");
    write_sample_zip(&archive);

    ziptask_cmd()
        .arg("verify")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive verification: PASSED"))
        .stdout(predicate::str::contains("Entries checked: 2"));
}

#[test]
fn test_verify_damaged_archive_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("damaged.zip");
    write_damaged_zip(&archive);

    ziptask_cmd()
        .arg("verify")
        .arg(&archive)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Archive verification: FAILED"))
        .stdout(predicate::str::contains("broken.txt"))
        .stdout(predicate::str::contains("intact.txt").not());
}

#[test]
fn test_verify_damaged_archive_json() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("damaged.zip");
    write_damaged_zip(&archive);

    let output = ziptask_cmd()
        .arg("--json")
        .arg("verify")
        .arg(&archive)
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(json["operation"], "verify");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["is_valid"], false);
    assert_eq!(json["data"]["entries_checked"], 2);
    assert_eq!(json["data"]["failures"][0]["name"], "broken.txt");
}

#[test]
fn test_verify_not_a_zip() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("bogus.zip");
    fs::write(&archive, "not an archive").unwrap();

    ziptask_cmd()
        .arg("verify")
        .arg(&archive)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_run_validate_task() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("damaged.zip");
    write_damaged_zip(&archive);
    let inputs = serde_json::json!({ "file_path": archive }).to_string();

    let json = json_stdout(
        ziptask_cmd()
            .arg("run")
            .arg("zip-validate")
            .arg("--inputs")
            .arg(&inputs),
    );

    assert_eq!(json["is_valid"], false);
    assert_eq!(json["corrupted_files"][0], "broken.txt");
}

#[test]
fn test_run_task_with_inputs_flag() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = temp.path().join("report.pdf");
    fs::write(&source, b"%PDF").unwrap();
    let session = temp.path().join("session");
    let inputs = serde_json::json!({ "file_path": source, "save_path": "" });

    let json = json_stdout(
        ziptask_cmd()
            .arg("--session-dir")
            .arg(&session)
            .arg("run")
            .arg("file-to-zip")
            .arg("--inputs")
            .arg(inputs.to_string()),
    );

    assert_eq!(
        json["zip_address"],
        session.join("report.pdf.zip").display().to_string()
    );
}

#[test]
fn test_run_task_reads_stdin() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("sample.zip");
    write_sample_zip(&archive);
    let out = temp.path().join("unpacked");
    let inputs = serde_json::json!({ "file_path": archive, "save_path": out });

    let json = json_stdout(
        ziptask_cmd()
            .arg("--json")
            .arg("run")
            .arg("unzip")
            .write_stdin(inputs.to_string()),
    );

    assert_eq!(json["operation"], "unzip");
    assert_eq!(json["data"]["unzip_address"], out.display().to_string());
    assert!(out.join("data.txt").is_file());
}

#[test]
fn test_run_task_invalid_inputs() {
    ziptask_cmd()
        .arg("run")
        .arg("unzip")
        .arg("--inputs")
        .arg(r#"{"save_path": "/tmp"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid inputs for task 'unzip'"));
}

#[test]
fn test_run_task_malformed_json() {
    ziptask_cmd()
        .arg("run")
        .arg("file-to-zip")
        .arg("--inputs")
        .arg("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn test_completion_bash() {
    ziptask_cmd()
        .arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("ziptask"));
}

#[test]
fn test_quiet_suppresses_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = temp.path().join("a.txt");
    fs::write(&source, "a").unwrap();

    ziptask_cmd()
        .arg("--quiet")
        .arg("zip")
        .arg(&source)
        .arg(temp.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
