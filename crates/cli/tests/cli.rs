//! End-to-end runs of the `polykit` binary over temporary JSON files.

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::Command;

fn write(dir: &Path, name: &str, v: &Value) -> PathBuf {
    let p = dir.join(name);
    std::fs::write(&p, serde_json::to_vec(v).unwrap()).unwrap();
    p
}

fn run(args: &[&str]) -> Value {
    let out = Command::new(env!("CARGO_BIN_EXE_polykit"))
        .args(args)
        .output()
        .expect("spawn polykit");
    assert!(
        out.status.success(),
        "polykit {args:?} failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).unwrap()
}

fn square(x: f64, y: f64, s: f64) -> Value {
    json!({ "coordinates": [[[x, y], [x + s, y], [x + s, y + s], [x, y + s]]] })
}

#[test]
fn union_merges_adjacent_squares() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "in.json", &json!([square(0.0, 0.0, 1.0), square(1.0, 0.0, 1.0)]));
    let v = run(&["union", "--input", input.to_str().unwrap()]);
    let polys = v.as_array().unwrap();
    assert_eq!(polys.len(), 1);
    assert_eq!(polys[0]["coordinates"][0].as_array().unwrap().len(), 4);
}

#[test]
fn safe_cut_writes_to_out_file() {
    let dir = tempfile::tempdir().unwrap();
    let cutters = write(dir.path(), "cutters.json", &json!([square(1.0, 1.0, 2.0)]));
    let input = write(dir.path(), "in.json", &json!([square(0.0, 0.0, 4.0)]));
    let out = dir.path().join("nested/out.json");
    let status = Command::new(env!("CARGO_BIN_EXE_polykit"))
        .args([
            "cut",
            "--safe",
            "--cutters",
            cutters.to_str().unwrap(),
            "--input",
            input.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());
    let v: Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
    // outline plus one hole
    assert_eq!(v[0]["coordinates"].as_array().unwrap().len(), 2);
}

#[test]
fn triangulate_and_svg() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "in.json", &json!([square(0.0, 0.0, 2.0)]));
    let path = input.to_str().unwrap();
    let t = run(&["triangulate", "--input", path, "--quality"]);
    assert_eq!(t[0]["tris"].as_array().unwrap().len(), 2);
    assert_eq!(t[0]["vs"][1], json!({ "x": 2.0, "y": 0.0 }));
    let s = run(&["svg", "--input", path]);
    assert_eq!(s, json!(["M 0,0 2,0 2,2 0,2 Z"]));
}

#[test]
fn clean_applies_matrix_and_precision() {
    let dir = tempfile::tempdir().unwrap();
    let mut poly = square(0.0, 0.0, 1.0);
    poly["meta"] = json!({ "id": 3 });
    let input = write(dir.path(), "in.json", &json!([poly]));
    let v = run(&[
        "clean",
        "--input",
        input.to_str().unwrap(),
        "--precision",
        "1",
        "--matrix",
        "matrix(1, 0, 0, 1, 0.04, 10)",
    ]);
    assert_eq!(v[0]["meta"]["id"], 3);
    assert_eq!(v[0]["coordinates"][0][0], json!([0.0, 10.0]));
}

#[test]
fn bad_input_fails_with_context() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.json");
    std::fs::write(&input, "{not json").unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_polykit"))
        .args(["union", "--input", input.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("parsing"));
}
