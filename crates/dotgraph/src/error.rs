use std::path::PathBuf;
use std::process::ExitStatus;

use crate::render::Format;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("`{program}` could not render {format} ({status}): {stderr}")]
    RenderFailed {
        program: String,
        format: Format,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Unsupported output format: {name}")]
    UnknownFormat { name: String },
}
