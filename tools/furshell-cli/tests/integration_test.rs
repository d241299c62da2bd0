//! Integration tests for the furshell CLI
//!
//! Tests the full pipeline: write an OBJ + manifest -> run furshell -> verify outputs

use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// Unit quad in the XZ plane facing +Y
fn write_quad_obj(path: &Path) {
    std::fs::write(
        path,
        "\
v 0 0 0
v 1 0 0
v 1 0 1
v 0 0 1
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 1 0
f 1/1/1 2/2/1 3/3/1 4/4/1
",
    )
    .expect("Failed to write OBJ");
}

fn furshell(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_furshell"))
        .args(args)
        .output()
        .expect("Failed to run furshell")
}

fn count_lines(path: &Path, prefix: &str) -> usize {
    std::fs::read_to_string(path)
        .expect("Failed to read output")
        .lines()
        .filter(|l| l.starts_with(prefix))
        .count()
}

#[test]
fn test_build_from_manifest() {
    let dir = tempdir().expect("Failed to create temp dir");
    write_quad_obj(&dir.path().join("quad.obj"));
    std::fs::write(
        dir.path().join("furshell.toml"),
        r#"
input = "quad.obj"
output = "out"
seed = 7

[shells]
layers = 3
max_length = 0.3

[strands]
width = 32
height = 32
"#,
    )
    .expect("Failed to write manifest");

    let manifest = dir.path().join("furshell.toml");
    let out = furshell(&["build", manifest.to_str().unwrap()]);
    assert!(out.status.success(), "furshell build failed: {:?}", out);

    let out_dir = dir.path().join("out");
    for name in ["shells.obj", "fins.obj", "graftals.obj", "fur.png", "fin.png"] {
        assert!(out_dir.join(name).exists(), "{} should exist", name);
    }

    // 4 vertices and 2 triangles per layer
    assert_eq!(count_lines(&out_dir.join("shells.obj"), "v "), 12);
    assert_eq!(count_lines(&out_dir.join("shells.obj"), "f "), 6);
    // 2 layer gaps * 2 triangles * 3 edges, 2 triangles per quad
    assert_eq!(count_lines(&out_dir.join("fins.obj"), "f "), 24);
    assert_eq!(count_lines(&out_dir.join("graftals.obj"), "p "), 4);

    let png = std::fs::read(out_dir.join("fur.png")).unwrap();
    assert_eq!(&png[1..4], b"PNG");
}

#[test]
fn test_check_rejects_bad_density() {
    let dir = tempdir().expect("Failed to create temp dir");
    write_quad_obj(&dir.path().join("quad.obj"));
    let manifest = dir.path().join("furshell.toml");
    std::fs::write(&manifest, "input = \"quad.obj\"\n[strands]\ndensity = 1.5\n").unwrap();

    let out = furshell(&["check", manifest.to_str().unwrap()]);
    assert!(!out.status.success(), "check should fail on density 1.5");
}

#[test]
fn test_check_accepts_valid_manifest() {
    let dir = tempdir().expect("Failed to create temp dir");
    write_quad_obj(&dir.path().join("quad.obj"));
    let manifest = dir.path().join("furshell.toml");
    std::fs::write(&manifest, "input = \"quad.obj\"\n").unwrap();

    let out = furshell(&["check", manifest.to_str().unwrap()]);
    assert!(out.status.success(), "furshell check failed: {:?}", out);
}

#[test]
fn test_strands_command() {
    let dir = tempdir().expect("Failed to create temp dir");
    let out_dir = dir.path().join("maps");

    let out = furshell(&[
        "strands",
        "-o",
        out_dir.to_str().unwrap(),
        "--width",
        "16",
        "--height",
        "16",
        "--layers",
        "4",
        "--density",
        "0.5",
        "--seed",
        "1",
    ]);
    assert!(out.status.success(), "furshell strands failed: {:?}", out);
    assert!(out_dir.join("fur.png").exists());
    assert!(out_dir.join("fin.png").exists());
}
