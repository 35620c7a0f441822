#![forbid(unsafe_code)]

//! QPSC architecture diagrams.
//!
//! Builds the complete, simplified and single-slide views of the QPSC microscopy pipeline
//! (QuPath extension, Python command server, Micro-Manager stack) and writes them as Graphviz DOT
//! sources with best-effort PNG/SVG renders alongside.

pub mod builders;
pub mod config;
pub mod error;
pub mod generate;
pub mod palette;

pub use builders::{Diagram, compact_slide, complete_architecture, diagrams, simplified_slide};
pub use config::GenerateOptions;
pub use error::{Error, Result};
pub use generate::{Summary, generate};
