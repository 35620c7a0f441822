//! Generator options and the optional JSON config file.

use std::path::{Path, PathBuf};

use dotgraph::{Format, GraphvizRenderer};
use serde::Deserialize;

use crate::{Error, Result};

pub const DEFAULT_OUT_DIR: &str = "docs/diagrams";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Directory receiving `<name>.dot` and the rendered images.
    pub out_dir: PathBuf,
    /// Image formats attempted per diagram, in order.
    pub formats: Vec<Format>,
    /// When false only DOT sources are written.
    pub render: bool,
    pub dot_program: PathBuf,
    pub layout_engine: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            formats: vec![Format::Png, Format::Svg],
            render: true,
            dot_program: PathBuf::from("dot"),
            layout_engine: "dot".to_string(),
        }
    }
}

/// On-disk shape of the config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
    out_dir: Option<PathBuf>,
    formats: Option<Vec<String>>,
    render: Option<bool>,
    dot_program: Option<PathBuf>,
    layout_engine: Option<String>,
}

impl GenerateOptions {
    /// Loads a JSON config file on top of the defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut options = Self::default();
        options.apply_json_file(path)?;
        Ok(options)
    }

    /// Overrides the keys present in the JSON config at `path`.
    ///
    /// A relative `outDir` is resolved against the directory containing the config file.
    pub fn apply_json_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| Error::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        self.apply_json(&text, base).map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })?;
        tracing::info!(config = %path.display(), "loaded config");
        Ok(())
    }

    fn apply_json(&mut self, text: &str, base: &Path) -> std::result::Result<(), String> {
        let file: ConfigFile = serde_json::from_str(text).map_err(|err| err.to_string())?;

        if let Some(out_dir) = file.out_dir {
            self.out_dir = if out_dir.is_relative() {
                base.join(out_dir)
            } else {
                out_dir
            };
        }
        if let Some(formats) = file.formats {
            self.formats = formats
                .iter()
                .map(|f| f.parse::<Format>().map_err(|err| err.to_string()))
                .collect::<std::result::Result<_, _>>()?;
        }
        if let Some(render) = file.render {
            self.render = render;
        }
        if let Some(program) = file.dot_program {
            self.dot_program = program;
        }
        if let Some(engine) = file.layout_engine {
            if engine.trim().is_empty() {
                return Err("layoutEngine must not be empty".to_string());
            }
            self.layout_engine = engine;
        }
        Ok(())
    }

    pub fn renderer(&self) -> GraphvizRenderer {
        GraphvizRenderer::new()
            .with_program(self.dot_program.clone())
            .with_engine(self.layout_engine.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_keeps_defaults() {
        let mut options = GenerateOptions::default();
        options.apply_json("{}", Path::new("cfg")).expect("apply");
        assert_eq!(options, GenerateOptions::default());
    }

    #[test]
    fn keys_override_and_relative_out_dir_follows_config() {
        let mut options = GenerateOptions::default();
        options
            .apply_json(
                r#"{"outDir": "out", "formats": ["SVG", "pdf"], "render": false, "dotProgram": "/opt/gv/bin/dot", "layoutEngine": "fdp"}"#,
                Path::new("cfg"),
            )
            .expect("apply");
        assert_eq!(options.out_dir, Path::new("cfg").join("out"));
        assert_eq!(options.formats, vec![Format::Svg, Format::Pdf]);
        assert!(!options.render);
        assert_eq!(options.dot_program, PathBuf::from("/opt/gv/bin/dot"));
        assert_eq!(options.renderer().engine(), "fdp");
    }

    #[test]
    fn unknown_keys_and_formats_are_rejected() {
        let mut options = GenerateOptions::default();
        assert!(options.apply_json(r#"{"outdir": "x"}"#, Path::new("")).is_err());
        let err = options
            .apply_json(r#"{"formats": ["bmp"]}"#, Path::new(""))
            .expect_err("bmp is not a format");
        assert!(err.contains("bmp"), "{err}");
    }
}
