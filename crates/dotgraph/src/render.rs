//! Rendering DOT sources to images through an external layout engine.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Png,
    Svg,
    Pdf,
    Jpeg,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Svg => "svg",
            Format::Pdf => "pdf",
            Format::Jpeg => "jpg",
        }
    }

    /// Name passed to Graphviz as `-T<name>`.
    pub fn graphviz_name(self) -> &'static str {
        self.extension()
    }

    /// `<base>.<ext>`; unlike [`Path::with_extension`] this never replaces part of the base name.
    pub fn output_path(self, base: &Path) -> PathBuf {
        let mut path = base.as_os_str().to_owned();
        path.push(".");
        path.push(self.extension());
        PathBuf::from(path)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(Error::UnknownFormat {
                name: s.to_string(),
            }),
        }
    }
}

/// Turns a saved DOT source file into an image.
pub trait Renderer {
    fn render(&self, source: &Path, format: Format, output: &Path) -> Result<()>;
}

/// Runs a Graphviz binary: `<program> -K<engine> -T<format> -o <output> <source>`.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    program: PathBuf,
    engine: String,
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self {
            program: PathBuf::from("dot"),
            engine: "dot".to_string(),
        }
    }
}

impl GraphvizRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Layout engine selected with `-K` (`dot`, `neato`, `fdp`, ...).
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }

    fn command(&self, source: &Path, format: Format, output: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(format!("-K{}", self.engine))
            .arg(format!("-T{}", format.graphviz_name()))
            .arg("-o")
            .arg(output)
            .arg(source);
        cmd
    }
}

impl Renderer for GraphvizRenderer {
    fn render(&self, source: &Path, format: Format, output: &Path) -> Result<()> {
        let program = self.program.display().to_string();
        tracing::debug!(
            program = %program,
            engine = %self.engine,
            %format,
            source = %source.display(),
            output = %output.display(),
            "running graphviz"
        );

        let out = self
            .command(source, format, output)
            .output()
            .map_err(|source| Error::Spawn {
                program: program.clone(),
                source,
            })?;

        if !out.status.success() {
            return Err(Error::RenderFailed {
                program,
                format,
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, source: &Path, format: Format, output: &Path) -> Result<()> {
        (**self).render(source, format, output)
    }
}
