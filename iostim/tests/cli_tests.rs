//! CLI tests driving the built `iostim` binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

fn iostim() -> Command {
    Command::new(env!("CARGO_BIN_EXE_iostim"))
}

fn script(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp script");
    file.write_all(contents.as_bytes()).expect("write temp script");
    file
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = iostim()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn iostim");
    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for iostim")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_file_input() {
    let input = script("// hello\nrepeat(2) write_io(vdp_io0, 8'h01);\n");
    let output = iostim().arg(input.path()).output().unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "INFO,\"hello\"\nIO,0x88,0x01\nIO,0x88,0x01\n"
    );
}

#[test]
fn test_stdin_input() {
    let output = run_with_stdin(&["-"], "write_io(vdp_io3, 'h42);\n");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "IO,0x8b,0x42\n");
}

#[test]
fn test_emit_c_with_threshold() {
    let input = script("for (i = 0; i < 5; i++) begin write_io(vdp_io1, i) end\n");
    let output = iostim()
        .args(["--emit-c", "--threshold", "4"])
        .arg(input.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("// Generated C loop for vdp_io1 : 0x0 .. 0x5 step 1\n"));
    assert!(text.contains("vdp_cartridge_write_io(0x89, v);"));
}

#[test]
fn test_threshold_without_emit_c_unrolls() {
    let input = script("for (i = 0; i < 5; i++) begin write_io(vdp_io1, i) end\n");
    let output = iostim()
        .args(["--threshold", "4"])
        .arg(input.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output).lines().count(), 5);
}

#[test]
fn test_config_file_and_output_file() {
    let config = script("allow_compact = true\nexpand_threshold = 1\n[ports]\npsg = 0x40\n");
    let input = script("write_io(psg, 7);\n");
    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("trace.csv");

    let status = iostim()
        .arg("--config")
        .arg(config.path())
        .arg("-o")
        .arg(&out_path)
        .arg(input.path())
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(std::fs::read_to_string(&out_path).unwrap(), "IO,0x40,0x07\n");
}

#[test]
fn test_zero_step_fails() {
    let input = script("for (i=0;i<10;i+=0) begin write_io(vdp_io0, i) end\n");
    let output = iostim().arg(input.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).contains("error: line 1: for-loop increment evaluated to 0"));
}

#[test]
fn test_deep_nesting_reports_error() {
    let depth = 50_000;
    let input = script(&format!(
        "write_io(vdp_io0, {}1{});\n",
        "(".repeat(depth),
        ")".repeat(depth)
    ));
    let output = iostim().arg(input.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    let message = stderr(&output);
    assert!(message.starts_with("error: line 1: failed to evaluate"));
    assert!(message.contains("nested deeper than 128 levels"));
}

#[test]
fn test_empty_output_fails() {
    let output = run_with_stdin(&[], "\n\n");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no events"));
}

#[test]
fn test_missing_input_file_fails() {
    let output = iostim().arg("/nonexistent/input.v").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("/nonexistent/input.v"));
}

#[test]
fn test_syntax_error_shows_context() {
    let output = run_with_stdin(&[], "write_io(vdp_io0, 1 + * 2);\n");
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("failed to evaluate '1 + * 2'"));
    assert!(err.contains("  1 | 1 + * 2"));
}

#[test]
fn test_usage_error() {
    let output = iostim().arg("--no-such-flag").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}
