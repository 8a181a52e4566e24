//! Owned Graphviz statement tree.
//!
//! Builders append statements in the order they should appear in the DOT output; nothing is
//! reordered when the tree is serialized. Attribute lists keep insertion order too.

pub type Attrs = Vec<(String, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrTarget {
    Node,
    Edge,
}

impl AttrTarget {
    pub fn keyword(self) -> &'static str {
        match self {
            AttrTarget::Node => "node",
            AttrTarget::Edge => "edge",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `key=value` pairs applied to the enclosing (sub)graph itself.
    GraphAttrs(Attrs),
    /// `node [...]` / `edge [...]` defaults for statements that follow.
    Defaults { target: AttrTarget, attrs: Attrs },
    Node(String),
    Edge { tail: String, head: String },
    Subgraph(Graph),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    pub name: Option<String>,
    pub comment: Option<String>,
    pub stmts: Vec<Stmt>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn attr(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        let pair = (key.to_string(), value.into());
        if let Some(Stmt::GraphAttrs(attrs)) = self.stmts.last_mut() {
            attrs.push(pair);
        } else {
            self.stmts.push(Stmt::GraphAttrs(vec![pair]));
        }
        self
    }

    pub fn defaults(&mut self, target: AttrTarget, attrs: &[(&str, &str)]) -> &mut Self {
        self.stmts.push(Stmt::Defaults {
            target,
            attrs: to_attrs(attrs),
        });
        self
    }

    pub fn node(&mut self, id: impl Into<String>) -> &mut Self {
        self.stmts.push(Stmt::Node(id.into()));
        self
    }

    pub fn edge(&mut self, tail: impl Into<String>, head: impl Into<String>) -> &mut Self {
        self.stmts.push(Stmt::Edge {
            tail: tail.into(),
            head: head.into(),
        });
        self
    }

    pub fn subgraph(&mut self, graph: Graph) -> &mut Self {
        self.stmts.push(Stmt::Subgraph(graph));
        self
    }

    /// Value of a graph attribute set directly on this graph (not inherited).
    pub fn graph_attr(&self, key: &str) -> Option<&str> {
        self.stmts.iter().find_map(|stmt| match stmt {
            Stmt::GraphAttrs(attrs) => attr_value(attrs, key),
            _ => None,
        })
    }

    /// Value of a `node [...]` / `edge [...]` default set directly on this graph.
    pub fn default_attr(&self, target: AttrTarget, key: &str) -> Option<&str> {
        self.stmts.iter().find_map(|stmt| match stmt {
            Stmt::Defaults { target: t, attrs } if *t == target => attr_value(attrs, key),
            _ => None,
        })
    }

    /// Node ids declared directly in this graph, in statement order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.stmts.iter().filter_map(|stmt| match stmt {
            Stmt::Node(id) => Some(id.as_str()),
            _ => None,
        })
    }

    /// `(tail, head)` pairs of the edges declared directly in this graph.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.stmts.iter().filter_map(|stmt| match stmt {
            Stmt::Edge { tail, head } => Some((tail.as_str(), head.as_str())),
            _ => None,
        })
    }

    pub fn subgraphs(&self) -> impl Iterator<Item = &Graph> + '_ {
        self.stmts.iter().filter_map(|stmt| match stmt {
            Stmt::Subgraph(graph) => Some(graph),
            _ => None,
        })
    }

    pub fn find_subgraph(&self, name: &str) -> Option<&Graph> {
        self.subgraphs().find(|g| g.name.as_deref() == Some(name))
    }

    /// Number of nested subgraph levels below this graph whose names start with `cluster`.
    pub fn cluster_depth(&self) -> usize {
        self.subgraphs()
            .filter(|g| g.is_cluster())
            .map(|g| 1 + g.cluster_depth())
            .max()
            .unwrap_or(0)
    }

    pub fn is_cluster(&self) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.starts_with("cluster"))
    }
}

fn to_attrs(attrs: &[(&str, &str)]) -> Attrs {
    attrs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn attr_value<'a>(attrs: &'a Attrs, key: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
