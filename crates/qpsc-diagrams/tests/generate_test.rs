use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use dotgraph::{Format, GraphvizRenderer, Renderer};
use qpsc_diagrams::{Error, GenerateOptions, diagrams, generate};

/// Writes a placeholder image instead of running Graphviz, recording every call.
#[derive(Default)]
struct FakeRenderer {
    calls: RefCell<Vec<(PathBuf, Format)>>,
}

impl Renderer for FakeRenderer {
    fn render(&self, source: &Path, format: Format, output: &Path) -> dotgraph::Result<()> {
        self.calls.borrow_mut().push((source.to_path_buf(), format));
        fs::write(output, format!("{format} of {}", source.display())).map_err(|err| {
            dotgraph::Error::Io {
                path: output.to_path_buf(),
                source: err,
            }
        })
    }
}

fn files_with_extension(dir: &Path, ext: &str) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .expect("read_dir")
        .map(|e| e.expect("entry").path())
        .filter(|p| p.extension().is_some_and(|e| e == ext))
        .map(|p| p.file_name().expect("name").to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn options_in(dir: &Path) -> GenerateOptions {
    GenerateOptions {
        out_dir: dir.join("diagrams"),
        ..Default::default()
    }
}

#[test]
fn missing_graphviz_writes_sources_only_and_succeeds() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let options = options_in(tmp.path());
    let renderer = GraphvizRenderer::new().with_program(tmp.path().join("missing-dot"));
    let mut report: Vec<u8> = Vec::new();

    let summary = generate(&diagrams(), &options, &renderer, &mut report).expect("generate");

    assert_eq!(
        files_with_extension(&options.out_dir, "dot"),
        vec![
            "qpsc_architecture_complete.dot",
            "qpsc_architecture_simplified.dot",
            "qpsc_architecture_slide.dot"
        ]
    );
    assert!(files_with_extension(&options.out_dir, "png").is_empty());
    assert!(files_with_extension(&options.out_dir, "svg").is_empty());
    assert_eq!(summary.sources.len(), 3);
    assert!(summary.images.is_empty());
    assert_eq!(summary.skipped.len(), 6);

    let report = String::from_utf8(report).expect("utf8");
    assert_eq!(report.matches("Saved: ").count(), 3);
    assert!(report.contains(
        "Note: Could not render PNG for qpsc_architecture_slide (graphviz binary not installed)"
    ));
    // Only the first format's failure is announced.
    assert!(!report.contains("Could not render SVG"));
    assert!(report.contains("https://edotor.net/"));
}

#[test]
fn working_renderer_produces_every_format_for_every_diagram() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let options = options_in(tmp.path());
    let renderer = FakeRenderer::default();
    let mut report: Vec<u8> = Vec::new();

    let summary = generate(&diagrams(), &options, &renderer, &mut report).expect("generate");

    assert_eq!(files_with_extension(&options.out_dir, "dot").len(), 3);
    assert_eq!(files_with_extension(&options.out_dir, "png").len(), 3);
    assert_eq!(files_with_extension(&options.out_dir, "svg").len(), 3);
    assert_eq!(summary.images.len(), 6);
    assert!(summary.skipped.is_empty());

    let calls = renderer.calls.borrow();
    assert_eq!(calls.len(), 6);
    assert_eq!(calls[0].1, Format::Png);
    assert_eq!(calls[1].1, Format::Svg);
    assert!(calls[0].0.ends_with("qpsc_architecture_complete.dot"));

    let report = String::from_utf8(report).expect("utf8");
    assert_eq!(report.matches("Rendered: ").count(), 6);
}

#[test]
fn disabled_rendering_never_calls_the_renderer() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let options = GenerateOptions {
        render: false,
        ..options_in(tmp.path())
    };
    let renderer = FakeRenderer::default();

    let summary = generate(&diagrams(), &options, &renderer, &mut std::io::sink()).expect("generate");

    assert!(renderer.calls.borrow().is_empty());
    assert_eq!(summary.sources.len(), 3);
    assert!(summary.images.is_empty());
}

#[test]
fn rerunning_overwrites_with_identical_bytes() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let options = GenerateOptions {
        render: false,
        ..options_in(tmp.path())
    };

    let first = generate(&diagrams(), &options, &FakeRenderer::default(), &mut std::io::sink())
        .expect("first run");
    let before: Vec<_> = first
        .sources
        .iter()
        .map(|p| fs::read(p).expect("read"))
        .collect();

    let second = generate(&diagrams(), &options, &FakeRenderer::default(), &mut std::io::sink())
        .expect("second run");
    assert_eq!(first.sources, second.sources);
    for (path, bytes) in second.sources.iter().zip(before) {
        assert!(!bytes.is_empty());
        assert_eq!(fs::read(path).expect("read"), bytes);
    }
}

#[test]
fn saved_sources_match_the_builders() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let options = GenerateOptions {
        render: false,
        ..options_in(tmp.path())
    };
    let all = diagrams();
    let summary = generate(&all, &options, &FakeRenderer::default(), &mut std::io::sink())
        .expect("generate");

    for (diagram, path) in all.iter().zip(&summary.sources) {
        let text = fs::read_to_string(path).expect("read");
        assert_eq!(text, diagram.graph.to_dot());
        for id in diagram.graph.node_ids() {
            assert!(text.contains(&format!("\t{id} [label=")), "{id} missing");
        }
    }
}

#[test]
fn unwritable_output_directory_is_an_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let blocker = tmp.path().join("not-a-dir");
    fs::write(&blocker, "file").expect("write blocker");
    let options = GenerateOptions {
        out_dir: blocker.join("diagrams"),
        ..Default::default()
    };

    let err = generate(&diagrams(), &options, &FakeRenderer::default(), &mut std::io::sink())
        .expect_err("must fail");
    assert!(
        matches!(err, Error::Graph(dotgraph::Error::Io { .. })),
        "{err}"
    );
}

#[cfg(unix)]
#[test]
fn failing_graphviz_is_noted_on_one_line_and_the_run_continues() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().expect("tempdir");
    let fake_dot = tmp.path().join("bad-dot");
    fs::write(
        &fake_dot,
        "#!/bin/sh\necho 'Error: line one' >&2\necho 'line two' >&2\nexit 3\n",
    )
    .expect("write fake dot");
    fs::set_permissions(&fake_dot, fs::Permissions::from_mode(0o755)).expect("chmod");

    let options = options_in(tmp.path());
    let renderer = GraphvizRenderer::new().with_program(&fake_dot);
    let mut report: Vec<u8> = Vec::new();

    let summary = generate(&diagrams(), &options, &renderer, &mut report).expect("generate");

    assert_eq!(summary.sources.len(), 3);
    assert_eq!(summary.skipped.len(), 6);

    let report = String::from_utf8(report).expect("utf8");
    assert!(
        report.contains(
            "Note: Could not render PNG for qpsc_architecture_complete (exit status: 3: Error: line one)\n"
        ),
        "{report}"
    );
    assert!(!report.contains("line two"));
    assert!(!report.contains("graphviz binary not installed"));
}
