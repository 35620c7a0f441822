//! Writes each diagram's DOT source and attempts the configured image renders.

use std::io::Write;
use std::path::{Path, PathBuf};

use dotgraph::{Format, Renderer};

use crate::builders::Diagram;
use crate::config::GenerateOptions;
use crate::{Error, Result};

const RULE_WIDTH: usize = 60;

const ONLINE_VIEWERS: [&str; 2] = [
    "https://dreampuf.github.io/GraphvizOnline/",
    "https://edotor.net/",
];

/// What a [`generate`] run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub sources: Vec<PathBuf>,
    pub images: Vec<PathBuf>,
    /// `(diagram name, format)` pairs whose render failed.
    pub skipped: Vec<(String, Format)>,
}

fn dot_path(base: &Path) -> PathBuf {
    let mut path = base.as_os_str().to_owned();
    path.push(".dot");
    PathBuf::from(path)
}

fn say(report: &mut impl Write, line: std::fmt::Arguments<'_>) -> Result<()> {
    report.write_fmt(line).map_err(Error::Report)?;
    report.write_all(b"\n").map_err(Error::Report)
}

/// Saves and renders `diagrams` in order, writing progress lines to `report`.
///
/// Failing to write a DOT source aborts the run. Render failures never do: the first format's
/// failure is reported as a note, later ones are only logged, and the next diagram proceeds.
pub fn generate(
    diagrams: &[Diagram],
    options: &GenerateOptions,
    renderer: &dyn Renderer,
    report: &mut impl Write,
) -> Result<Summary> {
    let mut summary = Summary::default();

    for diagram in diagrams {
        let base = options.out_dir.join(diagram.name);
        let source = dot_path(&base);

        diagram.graph.save(&source)?;
        tracing::info!(diagram = diagram.name, path = %source.display(), "saved");
        say(report, format_args!("Saved: {}", source.display()))?;
        summary.sources.push(source.clone());

        if !options.render {
            continue;
        }

        for (idx, &format) in options.formats.iter().enumerate() {
            let output = format.output_path(&base);
            match renderer.render(&source, format, &output) {
                Ok(()) => {
                    say(report, format_args!("Rendered: {}", output.display()))?;
                    summary.images.push(output);
                }
                Err(err) => {
                    if idx == 0 {
                        let reason = failure_reason(&err);
                        say(
                            report,
                            format_args!(
                                "Note: Could not render {} for {} ({reason})",
                                format.extension().to_ascii_uppercase(),
                                diagram.name
                            ),
                        )?;
                    }
                    tracing::debug!(
                        diagram = diagram.name,
                        %format,
                        error = %err,
                        "render skipped"
                    );
                    summary.skipped.push((diagram.name.to_string(), format));
                }
            }
        }
    }

    report_viewers(report)?;
    Ok(summary)
}

/// One-line reason for the stdout note; the full error goes to the debug log.
fn failure_reason(err: &dotgraph::Error) -> String {
    match err {
        dotgraph::Error::Spawn { .. } => "graphviz binary not installed".to_string(),
        dotgraph::Error::RenderFailed { status, stderr, .. } => {
            match stderr.lines().map(str::trim).find(|l| !l.is_empty()) {
                Some(line) => format!("{status}: {line}"),
                None => status.to_string(),
            }
        }
        other => other.to_string().lines().next().unwrap_or_default().to_string(),
    }
}

fn report_viewers(report: &mut impl Write) -> Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    say(report, format_args!("\n{rule}"))?;
    say(report, format_args!("DOT files can be rendered online at:"))?;
    for url in ONLINE_VIEWERS {
        say(report, format_args!("  {url}"))?;
    }
    say(report, format_args!("{rule}"))
}
