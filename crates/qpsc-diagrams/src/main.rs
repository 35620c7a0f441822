use dotgraph::Format;
use qpsc_diagrams::GenerateOptions;
use std::path::PathBuf;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Diagrams(qpsc_diagrams::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Diagrams(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<qpsc_diagrams::Error> for CliError {
    fn from(value: qpsc_diagrams::Error) -> Self {
        Self::Diagrams(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    list: bool,
    config: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    formats: Vec<Format>,
    no_render: bool,
    dot_program: Option<PathBuf>,
    engine: Option<String>,
}

fn usage() -> &'static str {
    "qpsc-diagrams\n\
\n\
USAGE:\n\
  qpsc-diagrams [--out-dir <dir>] [--format png|svg|pdf|jpg]... [--no-render] [--dot <program>] [--engine <layout>] [--config <path>]\n\
  qpsc-diagrams --list\n\
\n\
NOTES:\n\
  - Writes <out-dir>/<name>.dot for every diagram, then tries to render each --format with Graphviz.\n\
  - --out-dir defaults to ./docs/diagrams; --format defaults to png then svg.\n\
  - Missing Graphviz is not an error: renders are skipped and the DOT sources are still written.\n\
  - --config reads a JSON file (outDir, formats, render, dotProgram, layoutEngine); flags win over it.\n\
  - Set RUST_LOG=debug to see the Graphviz command lines.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--list" => args.list = true,
            "--no-render" => args.no_render = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(PathBuf::from(path));
            }
            "--out-dir" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out_dir = Some(PathBuf::from(dir));
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let fmt = fmt
                    .parse::<Format>()
                    .map_err(|_| CliError::Usage(usage()))?;
                if !args.formats.contains(&fmt) {
                    args.formats.push(fmt);
                }
            }
            "--dot" => {
                let Some(program) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.dot_program = Some(PathBuf::from(program));
            }
            "--engine" => {
                let Some(engine) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if engine.trim().is_empty() {
                    return Err(CliError::Usage(usage()));
                }
                args.engine = Some(engine.clone());
            }
            _ => return Err(CliError::Usage(usage())),
        }
    }

    Ok(args)
}

fn options_from_args(args: &Args) -> Result<GenerateOptions, CliError> {
    let mut options = match &args.config {
        Some(path) => GenerateOptions::from_json_file(path)?,
        None => GenerateOptions::default(),
    };
    if let Some(dir) = &args.out_dir {
        options.out_dir = dir.clone();
    }
    if !args.formats.is_empty() {
        options.formats = args.formats.clone();
    }
    if args.no_render {
        options.render = false;
    }
    if let Some(program) = &args.dot_program {
        options.dot_program = program.clone();
    }
    if let Some(engine) = &args.engine {
        options.layout_engine = engine.clone();
    }
    Ok(options)
}

fn run(args: Args) -> Result<(), CliError> {
    let diagrams = qpsc_diagrams::diagrams();

    if args.list {
        use std::io::Write;
        let mut out = std::io::stdout().lock();
        for diagram in &diagrams {
            writeln!(out, "{}", diagram.name)?;
        }
        return Ok(());
    }

    let options = options_from_args(&args)?;
    tracing::debug!(?options, "generating diagrams");

    let renderer = options.renderer();
    let summary = qpsc_diagrams::generate(
        &diagrams,
        &options,
        &renderer,
        &mut std::io::stdout().lock(),
    )?;
    tracing::info!(
        sources = summary.sources.len(),
        images = summary.images.len(),
        skipped = summary.skipped.len(),
        "done"
    );
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    // Diagnostics go to stderr so stdout only carries the progress lines.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
