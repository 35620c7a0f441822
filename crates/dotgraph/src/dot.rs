//! DOT source serialization.

use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::path::Path;

use crate::graph::{Attrs, Graph, GraphKind, Stmt};
use crate::{Error, Result};

const KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `[-]?(.[0-9]+ | [0-9]+(.[0-9]*)?)`
fn is_numeral(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    match frac {
        None => !int.is_empty() && all_digits(int),
        Some(frac) => all_digits(int) && all_digits(frac) && !(int.is_empty() && frac.is_empty()),
    }
}

fn is_keyword(s: &str) -> bool {
    KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(s))
}

fn escape_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    let mut prev_backslash = false;
    for ch in s.chars() {
        match ch {
            '"' if !prev_backslash => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(ch),
        }
        // An escaped backslash must not escape the character after it.
        prev_backslash = ch == '\\' && !prev_backslash;
    }
    // A trailing unpaired backslash would escape the closing quote.
    if prev_backslash {
        out.push('\\');
    }
    out
}

/// Returns `id` as a DOT ID, quoting it unless it is a plain identifier or numeral.
///
/// Keywords are always quoted. Inside quotes, unescaped `"` becomes `\"` and line breaks become
/// `\n`; existing backslash escapes such as `\l` are passed through. A trailing unpaired `\` is
/// doubled so it cannot escape the closing quote. Carriage returns are dropped: Graphviz reads
/// `\r` as a right-justified line break, so there is no escape that preserves a literal CR.
pub fn quote_id(id: &str) -> Cow<'_, str> {
    if (is_identifier(id) || is_numeral(id)) && !is_keyword(id) {
        Cow::Borrowed(id)
    } else {
        Cow::Owned(format!("\"{}\"", escape_quoted(id)))
    }
}

fn write_a_list(out: &mut String, attrs: &Attrs, label_first: bool) {
    let mut first = true;
    let mut push = |out: &mut String, k: &str, v: &str| {
        if !first {
            out.push(' ');
        }
        first = false;
        let _ = write!(out, "{}={}", quote_id(k), quote_id(v));
    };

    let label = if label_first { attrs.get("label") } else { None };
    if let Some(label) = label {
        push(out, "label", label);
    }
    for (k, v) in attrs.iter() {
        if label.is_some() && k == "label" {
            continue;
        }
        push(out, k, v);
    }
}

fn write_attr_list(out: &mut String, attrs: &Attrs, label_first: bool) {
    if attrs.is_empty() {
        return;
    }
    out.push_str(" [");
    write_a_list(out, attrs, label_first);
    out.push(']');
}

fn write_graph(out: &mut String, graph: &Graph, depth: usize) {
    let indent = "\t".repeat(depth);
    let inner = "\t".repeat(depth + 1);

    let keyword = match graph.kind() {
        GraphKind::Digraph => "digraph",
        GraphKind::Subgraph => "subgraph",
    };
    let _ = writeln!(out, "{indent}{keyword} {} {{", quote_id(graph.name()));

    for stmt in graph.body() {
        match stmt {
            Stmt::GraphAttrs(attrs) => {
                out.push_str(&inner);
                write_a_list(out, attrs, false);
                out.push('\n');
            }
            Stmt::NodeDefaults(attrs) => {
                let _ = write!(out, "{inner}node");
                write_attr_list(out, attrs, false);
                out.push('\n');
            }
            Stmt::EdgeDefaults(attrs) => {
                let _ = write!(out, "{inner}edge");
                write_attr_list(out, attrs, false);
                out.push('\n');
            }
            Stmt::Node { id, attrs } => {
                let _ = write!(out, "{inner}{}", quote_id(id));
                write_attr_list(out, attrs, true);
                out.push('\n');
            }
            Stmt::Edge { tail, head, attrs } => {
                let _ = write!(out, "{inner}{} -> {}", quote_id(tail), quote_id(head));
                write_attr_list(out, attrs, true);
                out.push('\n');
            }
            Stmt::Subgraph(sub) => write_graph(out, sub, depth + 1),
        }
    }

    let _ = writeln!(out, "{indent}}}");
}

impl Graph {
    /// Serializes the graph to DOT source.
    ///
    /// The output is a pure function of the graph: the same statements always produce the same
    /// bytes.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        if let Some(comment) = self.comment() {
            for line in comment.lines() {
                let _ = writeln!(out, "// {line}");
            }
        }
        write_graph(&mut out, self, 0);
        out
    }

    /// Writes the DOT source to `path`, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let io_err = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_dot()).map_err(io_err)?;
        tracing::debug!(path = %path.display(), graph = self.name(), "saved DOT source");
        Ok(())
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dot())
    }
}
