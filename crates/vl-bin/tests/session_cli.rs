// End-to-end: drive the binary through stdin and check what reached disk.

use std::io::Write;
use std::process::{Command, Stdio};

fn run(dir: &std::path::Path, args: &[&str], input: &str) -> (String, std::process::ExitStatus) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_vimline"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "debug")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    (String::from_utf8(output.stdout).unwrap(), output.status)
}

#[test]
fn edits_are_saved_with_colon_w() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("todo.txt");
    std::fs::write(&file, "keep\ndrop\nkeep too\n").unwrap();

    let (stdout, status) = run(dir.path(), &["todo.txt"], "jdd\n:w\n");
    assert!(status.success());
    assert_eq!(
        std::fs::read_to_string(&file).unwrap(),
        "keep\nkeep too\n"
    );
    assert_eq!(stdout.lines().last(), Some("todo.txt 2:1 [COMMAND]"));
    assert!(dir.path().join("vimline.log").exists());
}

#[test]
fn zz_ends_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.txt");
    std::fs::write(&file, "x\n").unwrap();

    let (stdout, status) = run(dir.path(), &["a.txt"], "A!\n<Esc>\nZZ\nj\n");
    assert!(status.success());
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "x!\n");
    assert_eq!(stdout.lines().last(), Some("[no document]"));
}

#[test]
fn missing_file_fails_to_start() {
    let dir = tempfile::tempdir().unwrap();
    let (_stdout, status) = run(dir.path(), &["nope.txt"], "");
    assert!(!status.success());
}
