#![forbid(unsafe_code)]

//! Graphviz DOT graph model.
//!
//! Graphs are built statement by statement, serialized to deterministic DOT source with
//! [`Graph::to_dot`], and rendered to images through a [`Renderer`]. Layout and rasterization
//! stay with Graphviz itself; this crate only describes graphs and drives the `dot` binary.

pub mod dot;
pub mod error;
pub mod graph;
pub mod render;

pub use dot::quote_id;
pub use error::{Error, Result};
pub use graph::{Attrs, Graph, GraphKind, Stmt};
pub use render::{Format, GraphvizRenderer, Renderer};
