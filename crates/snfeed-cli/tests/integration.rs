//! Integration tests for the snfeed CLI

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn snfeed() -> Command {
    Command::new(env!("CARGO_BIN_EXE_snfeed"))
}

fn run(args: &[&OsStr]) -> Output {
    snfeed().args(args).output().expect("Failed to run snfeed")
}

/// Copy fixtures into a fresh directory so config lookup and outputs stay isolated
fn workspace(fixtures: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    for name in fixtures {
        fs::copy(fixtures_dir().join(name), dir.path().join(name)).expect("Failed to copy fixture");
    }
    dir
}

/// Run snfeed on a fixture file and return the written document
fn convert_fixture(name: &str, args: &[&str]) -> String {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let input = fixtures_dir().join(format!("{}.json", name));
    let output = dir.path().join(format!("{}.xml", name));

    let status = snfeed()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(args)
        .status()
        .expect("Failed to run snfeed");
    assert!(status.success(), "snfeed failed with status: {}", status);

    fs::read_to_string(&output).expect("Failed to read output file")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn relative_files(root: &Path) -> Vec<String> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).expect("Failed to read dir") {
            let path = entry.expect("Invalid entry").path();
            if path.is_dir() {
                stack.push(path);
            } else {
                let rel = path.strip_prefix(root).unwrap();
                files.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    files.sort();
    files
}

#[test]
fn test_minimal_conversion() {
    let output = convert_fixture("minimal", &[]);
    insta::assert_snapshot!("minimal_xml", output);
}

#[test]
fn test_with_content_conversion() {
    let output = convert_fixture("with_content", &[]);
    insta::assert_snapshot!("with_content_xml", output);
}

#[test]
fn test_stdout_output() {
    let input = fixtures_dir().join("minimal.json");
    let output = run(&[input.as_os_str(), OsStr::new("-o"), OsStr::new("-")]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8");
    let written = convert_fixture("minimal", &[]);
    assert_eq!(stdout, format!("{}\n", written));
}

#[test]
fn test_indent_flag() {
    let output = convert_fixture("minimal", &["--indent", "0"]);
    assert!(!output.contains('\n'));
    assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?><rss version=\"2.0\""));
    assert!(output.ends_with("</item></channel></rss>"));
}

#[test]
fn test_default_output_path() {
    let dir = workspace(&["minimal.json"]);
    let input = dir.path().join("minimal.json");

    let output = run(&[input.as_os_str()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let expected = dir.path().join("minimal.xml");
    assert!(expected.exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), expected.display().to_string());
}

#[test]
fn test_quiet_prints_nothing() {
    let dir = workspace(&["minimal.json"]);
    let input = dir.path().join("minimal.json");

    let output = run(&[input.as_os_str(), OsStr::new("-q")]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(dir.path().join("minimal.xml").exists());
}

#[test]
fn test_config_next_to_input() {
    let dir = workspace(&["minimal.json"]);
    fs::write(
        dir.path().join("_snfeed.toml"),
        "[output]\nindent = 2\nextension = \"rss\"\n\n[channel]\ngenerator = \"my-cms\"\n",
    )
    .unwrap();

    let output = run(&[dir.path().join("minimal.json").as_os_str()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let xml = fs::read_to_string(dir.path().join("minimal.rss")).expect("rss output");
    assert!(xml.contains("\n  <channel>\n    <title>T</title>"));
    assert!(xml.contains("<generator>my-cms</generator>"));
}

#[test]
fn test_explicit_config_and_indent_override() {
    let dir = workspace(&["minimal.json"]);
    let config = dir.path().join("custom.toml");
    fs::write(
        &config,
        "[output]\nindent = 2\n\n[channel]\ndocs = \"https://example.com/docs\"\n",
    )
    .unwrap();
    let out = dir.path().join("out.xml");

    let output = run(&[
        dir.path().join("minimal.json").as_os_str(),
        OsStr::new("-c"),
        config.as_os_str(),
        OsStr::new("--indent"),
        OsStr::new("1"),
        OsStr::new("-o"),
        out.as_os_str(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let xml = fs::read_to_string(&out).unwrap();
    assert!(xml.contains("\n <channel>\n  <title>T</title>"));
    assert!(xml.contains("<docs>https://example.com/docs</docs>"));
}

#[test]
fn test_feed_generator_beats_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("feed.json"),
        r#"{ "options": { "id": "x", "title": "T", "link": "l", "generator": "own",
             "updated": "2024-01-01T00:00:00Z" } }"#,
    )
    .unwrap();
    fs::write(dir.path().join("_snfeed.toml"), "[channel]\ngenerator = \"cfg\"\n").unwrap();

    let output = run(&[dir.path().join("feed.json").as_os_str(), OsStr::new("-q")]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let xml = fs::read_to_string(dir.path().join("feed.xml")).unwrap();
    assert!(xml.contains("<generator>own</generator>"));
}

#[test]
fn test_directory_conversion() {
    let input = workspace(&["minimal.json", "with_content.json"]);
    let nested = input.path().join("nested");
    fs::create_dir_all(&nested).unwrap();
    fs::copy(fixtures_dir().join("minimal.json"), nested.join("inner.json")).unwrap();
    fs::write(input.path().join("notes.txt"), "ignored").unwrap();

    let output_dir = tempfile::tempdir().unwrap();
    let output = run(&[
        input.path().as_os_str(),
        OsStr::new("-o"),
        output_dir.path().as_os_str(),
        OsStr::new("-r"),
        OsStr::new("-j2"),
        OsStr::new("-q"),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        relative_files(output_dir.path()),
        vec!["minimal.xml", "nested/inner.xml", "with_content.xml"]
    );
}

#[test]
fn test_directory_not_recursive() {
    let input = workspace(&["minimal.json"]);
    let nested = input.path().join("nested");
    fs::create_dir_all(&nested).unwrap();
    fs::copy(fixtures_dir().join("minimal.json"), nested.join("inner.json")).unwrap();

    let output_dir = tempfile::tempdir().unwrap();
    let output = run(&[
        input.path().as_os_str(),
        OsStr::new("-o"),
        output_dir.path().as_os_str(),
        OsStr::new("-q"),
    ]);
    assert!(output.status.success());
    assert_eq!(relative_files(output_dir.path()), vec!["minimal.xml"]);
}

#[test]
fn test_directory_with_invalid_feed_fails() {
    let input = workspace(&["minimal.json"]);
    fs::write(input.path().join("broken.json"), "{ \"options\": 42 }").unwrap();

    let output_dir = tempfile::tempdir().unwrap();
    let output = run(&[
        input.path().as_os_str(),
        OsStr::new("-o"),
        output_dir.path().as_os_str(),
    ]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Failed to parse feed"), "stderr: {}", err);
    assert!(err.contains("1 files failed to convert"), "stderr: {}", err);
    // Valid feeds in the same run are still written
    assert!(output_dir.path().join("minimal.xml").exists());
    assert!(!output_dir.path().join("broken.xml").exists());
}

#[test]
fn test_missing_input_fails() {
    let output = run(&[OsStr::new("does-not-exist.json")]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Input path does not exist"));
}

#[test]
fn test_init_config() {
    let dir = tempfile::tempdir().unwrap();
    let output_file = dir.path().join("_snfeed.toml");

    let output = run(&[OsStr::new("init"), OsStr::new("-o"), output_file.as_os_str()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let content = fs::read_to_string(&output_file).expect("Failed to read config file");
    assert!(content.starts_with("#:schema https://"));
    assert!(content.contains("[output]"));
    assert!(content.contains("indent = 4"));
    assert!(content.contains("[channel]"));
    assert!(content.contains("generator = \"snfeed\""));

    // Refuses to overwrite
    let again = run(&[OsStr::new("init"), OsStr::new("-o"), output_file.as_os_str()]);
    assert!(!again.status.success());
    assert!(stderr(&again).contains("already exists"));
}

#[test]
fn test_init_schema() {
    let output = run(&[OsStr::new("init"), OsStr::new("--schema")]);
    assert!(output.status.success(), "snfeed init --schema failed");

    let schema = String::from_utf8(output.stdout).expect("Invalid UTF-8");
    let value: serde_json::Value = serde_json::from_str(&schema).expect("schema is JSON");
    assert_eq!(value["title"], "Config");
    assert!(schema.contains("ChannelConfig"));
}

#[test]
fn test_stdout_output_rejects_directory() {
    let input = workspace(&["minimal.json"]);

    let output = snfeed()
        .arg(".")
        .args(["-o", "-"])
        .current_dir(input.path())
        .output()
        .expect("Failed to run snfeed");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("requires a single input file"));
    assert!(!input.path().join("-").exists());
}

#[test]
fn test_json_extension_does_not_overwrite_inputs() {
    let dir = workspace(&["minimal.json"]);
    fs::write(
        dir.path().join("_snfeed.toml"),
        "[output]\nextension = \"json\"\n",
    )
    .unwrap();
    let original = fs::read_to_string(dir.path().join("minimal.json")).unwrap();

    let output = run(&[dir.path().as_os_str(), OsStr::new("-q")]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("would overwrite the input feed"), "stderr: {}", err);
    assert!(err.contains("1 files failed to convert"), "stderr: {}", err);

    let single = run(&[dir.path().join("minimal.json").as_os_str()]);
    assert!(!single.status.success());
    assert!(stderr(&single).contains("would overwrite the input feed"));

    assert_eq!(
        fs::read_to_string(dir.path().join("minimal.json")).unwrap(),
        original
    );
}
