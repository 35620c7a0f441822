//! In-memory graph description.

use std::collections::BTreeMap;

use indexmap::IndexSet;

/// A DOT attribute list.
///
/// Keys are unique; setting a key twice keeps the last value. Iteration is in key order, which
/// keeps serialized output independent of the order attributes were passed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs(BTreeMap<String, String>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut attrs = Self::new();
        for (k, v) in pairs {
            attrs.set(*k, *v);
        }
        attrs
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    Digraph,
    Subgraph,
}

/// One statement in a graph body, kept in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Graph attributes written as a bare `k=v k=v` line.
    GraphAttrs(Attrs),
    /// `node [...]` defaults for nodes declared after this statement.
    NodeDefaults(Attrs),
    /// `edge [...]` defaults for edges declared after this statement.
    EdgeDefaults(Attrs),
    Node {
        id: String,
        attrs: Attrs,
    },
    Edge {
        tail: String,
        head: String,
        attrs: Attrs,
    },
    Subgraph(Graph),
}

/// A directed graph or a nested subgraph.
///
/// Subgraphs whose name starts with `cluster` are drawn by Graphviz as boxed clusters.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    kind: GraphKind,
    name: String,
    comment: Option<String>,
    body: Vec<Stmt>,
}

impl Graph {
    pub fn digraph(name: impl Into<String>) -> Self {
        Self {
            kind: GraphKind::Digraph,
            name: name.into(),
            comment: None,
            body: Vec::new(),
        }
    }

    fn subgraph_named(name: String) -> Self {
        Self {
            kind: GraphKind::Subgraph,
            name,
            comment: None,
            body: Vec::new(),
        }
    }

    /// Sets the `// comment` line emitted above the graph header.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn body(&self) -> &[Stmt] {
        &self.body
    }

    pub fn attr(&mut self, attrs: &[(&str, &str)]) -> &mut Self {
        self.body.push(Stmt::GraphAttrs(Attrs::from_pairs(attrs)));
        self
    }

    pub fn node_attr(&mut self, attrs: &[(&str, &str)]) -> &mut Self {
        self.body.push(Stmt::NodeDefaults(Attrs::from_pairs(attrs)));
        self
    }

    pub fn edge_attr(&mut self, attrs: &[(&str, &str)]) -> &mut Self {
        self.body.push(Stmt::EdgeDefaults(Attrs::from_pairs(attrs)));
        self
    }

    pub fn node(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        attrs: &[(&str, &str)],
    ) -> &mut Self {
        let mut attrs = Attrs::from_pairs(attrs);
        attrs.set("label", label);
        self.body.push(Stmt::Node {
            id: id.into(),
            attrs,
        });
        self
    }

    pub fn edge(
        &mut self,
        tail: impl Into<String>,
        head: impl Into<String>,
        attrs: &[(&str, &str)],
    ) -> &mut Self {
        self.body.push(Stmt::Edge {
            tail: tail.into(),
            head: head.into(),
            attrs: Attrs::from_pairs(attrs),
        });
        self
    }

    /// Builds a nested subgraph in `build` and appends it to this graph's body.
    pub fn subgraph<F>(&mut self, name: impl Into<String>, build: F) -> &mut Self
    where
        F: FnOnce(&mut Graph),
    {
        let mut sub = Graph::subgraph_named(name.into());
        build(&mut sub);
        self.body.push(Stmt::Subgraph(sub));
        self
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Stmt)) {
        for stmt in &self.body {
            visit(stmt);
            if let Stmt::Subgraph(sub) = stmt {
                sub.walk(visit);
            }
        }
    }

    /// Unique node ids declared anywhere in the tree, in first-declaration order.
    ///
    /// Endpoints that only appear in edge statements are not included.
    pub fn node_ids(&self) -> Vec<&str> {
        let mut ids: IndexSet<&str> = IndexSet::new();
        self.walk(&mut |stmt| {
            if let Stmt::Node { id, .. } = stmt {
                ids.insert(id.as_str());
            }
        });
        ids.into_iter().collect()
    }

    /// Every `(tail, head)` pair in declaration order, including duplicates.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut out = Vec::new();
        self.walk(&mut |stmt| {
            if let Stmt::Edge { tail, head, .. } = stmt {
                out.push((tail.as_str(), head.as_str()));
            }
        });
        out
    }

    /// Attributes of the first node statement declaring `id`.
    pub fn node_attrs(&self, id: &str) -> Option<&Attrs> {
        let mut found = None;
        self.walk(&mut |stmt| {
            if found.is_some() {
                return;
            }
            if let Stmt::Node { id: node_id, attrs } = stmt {
                if node_id == id {
                    found = Some(attrs);
                }
            }
        });
        found
    }

    /// Attributes of the first `tail -> head` edge statement.
    pub fn edge_attrs(&self, tail: &str, head: &str) -> Option<&Attrs> {
        let mut found = None;
        self.walk(&mut |stmt| {
            if found.is_some() {
                return;
            }
            if let Stmt::Edge {
                tail: t,
                head: h,
                attrs,
            } = stmt
            {
                if t == tail && h == head {
                    found = Some(attrs);
                }
            }
        });
        found
    }

    /// Finds a nested subgraph by name at any depth.
    pub fn find_subgraph(&self, name: &str) -> Option<&Graph> {
        let mut found = None;
        self.walk(&mut |stmt| {
            if found.is_some() {
                return;
            }
            if let Stmt::Subgraph(sub) = stmt {
                if sub.name == name {
                    found = Some(sub);
                }
            }
        });
        found
    }
}
