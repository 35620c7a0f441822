use assert_cmd::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;

const NAMES: [&str; 3] = [
    "qpsc_architecture_complete",
    "qpsc_architecture_simplified",
    "qpsc_architecture_slide",
];

fn count_with_extension(dir: &Path, ext: &str) -> usize {
    fs::read_dir(dir)
        .expect("read_dir")
        .filter(|e| {
            e.as_ref()
                .expect("entry")
                .path()
                .extension()
                .is_some_and(|x| x == ext)
        })
        .count()
}

#[test]
fn cli_writes_dot_files_without_graphviz() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out_dir = tmp.path().join("out");

    let exe = assert_cmd::cargo_bin!("qpsc-diagrams");
    let output = Command::new(exe)
        .current_dir(tmp.path())
        .args([
            "--out-dir",
            out_dir.to_string_lossy().as_ref(),
            "--dot",
            tmp.path().join("no-such-dot").to_string_lossy().as_ref(),
        ])
        .assert()
        .success()
        .get_output()
        .clone();

    for name in NAMES {
        let dot = fs::read_to_string(out_dir.join(format!("{name}.dot"))).expect("read dot");
        assert!(dot.contains("digraph "), "{name}");
    }
    assert_eq!(count_with_extension(&out_dir, "dot"), 3);
    assert_eq!(count_with_extension(&out_dir, "png"), 0);
    assert_eq!(count_with_extension(&out_dir, "svg"), 0);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Note: Could not render PNG").count(), 3);
}

#[test]
fn cli_defaults_to_docs_diagrams_under_the_working_directory() {
    let tmp = tempfile::tempdir().expect("tempdir");

    let exe = assert_cmd::cargo_bin!("qpsc-diagrams");
    Command::new(exe)
        .current_dir(tmp.path())
        .arg("--no-render")
        .assert()
        .success();

    let out_dir = tmp.path().join("docs").join("diagrams");
    assert_eq!(count_with_extension(&out_dir, "dot"), 3);
}

#[test]
fn cli_reads_json_config() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("diagrams.json");
    fs::write(&config, r#"{ "outDir": "from-config", "render": false }"#).expect("write config");

    let exe = assert_cmd::cargo_bin!("qpsc-diagrams");
    Command::new(exe)
        .args(["--config", config.to_string_lossy().as_ref()])
        .assert()
        .success();

    assert_eq!(count_with_extension(&tmp.path().join("from-config"), "dot"), 3);
}

#[test]
fn cli_rejects_bad_config() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("diagrams.json");
    fs::write(&config, r#"{ "formats": ["gif"] }"#).expect("write config");

    let exe = assert_cmd::cargo_bin!("qpsc-diagrams");
    Command::new(exe)
        .current_dir(tmp.path())
        .args(["--config", config.to_string_lossy().as_ref()])
        .assert()
        .code(1);
}

#[test]
fn cli_lists_diagram_names() {
    let exe = assert_cmd::cargo_bin!("qpsc-diagrams");
    let output = Command::new(exe)
        .arg("--list")
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), NAMES);
}

#[test]
fn cli_unknown_flag_is_a_usage_error() {
    let exe = assert_cmd::cargo_bin!("qpsc-diagrams");
    Command::new(exe).arg("--bogus").assert().code(2);

    let exe = assert_cmd::cargo_bin!("qpsc-diagrams");
    Command::new(exe).args(["--format", "gif"]).assert().code(2);
}

#[cfg(unix)]
#[test]
fn cli_renders_every_format_with_a_working_dot() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().expect("tempdir");
    let fake_dot = tmp.path().join("fake-dot");
    fs::write(
        &fake_dot,
        "#!/bin/sh\n\
out=\"\"\n\
while [ $# -gt 0 ]; do\n\
  case \"$1\" in\n\
    -o) shift; out=\"$1\" ;;\n\
  esac\n\
  shift\n\
done\n\
printf 'image' > \"$out\"\n",
    )
    .expect("write fake dot");
    fs::set_permissions(&fake_dot, fs::Permissions::from_mode(0o755)).expect("chmod");

    let out_dir = tmp.path().join("out");
    let exe = assert_cmd::cargo_bin!("qpsc-diagrams");
    Command::new(exe)
        .args([
            "--out-dir",
            out_dir.to_string_lossy().as_ref(),
            "--dot",
            fake_dot.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    assert_eq!(count_with_extension(&out_dir, "dot"), 3);
    assert_eq!(count_with_extension(&out_dir, "png"), 3);
    assert_eq!(count_with_extension(&out_dir, "svg"), 3);
}
