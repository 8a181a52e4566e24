//! DOT serialization for [`Graph`] trees.

use crate::graph::{Attrs, Graph, Stmt};
use std::borrow::Cow;
use std::fmt::Write as _;

const KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

/// Serializes `graph` as the root of a `digraph`.
///
/// The root comment is written above the `digraph` line; subgraph comments go on the first line
/// inside their braces. Indentation is one tab per nesting level.
pub fn write_digraph(graph: &Graph) -> String {
    let mut out = String::new();
    if let Some(comment) = &graph.comment {
        write_comment(&mut out, comment, 0);
    }
    out.push_str("digraph ");
    if let Some(name) = &graph.name {
        out.push_str(&quote_id(name));
        out.push(' ');
    }
    out.push_str("{\n");
    write_body(&mut out, graph, 1);
    out.push_str("}\n");
    out
}

fn write_subgraph(out: &mut String, graph: &Graph, depth: usize) {
    indent(out, depth);
    out.push_str("subgraph ");
    if let Some(name) = &graph.name {
        out.push_str(&quote_id(name));
        out.push(' ');
    }
    out.push_str("{\n");
    if let Some(comment) = &graph.comment {
        write_comment(out, comment, depth + 1);
    }
    write_body(out, graph, depth + 1);
    indent(out, depth);
    out.push_str("}\n");
}

fn write_body(out: &mut String, graph: &Graph, depth: usize) {
    for stmt in &graph.stmts {
        match stmt {
            Stmt::GraphAttrs(attrs) => {
                indent(out, depth);
                write_attr_pairs(out, attrs);
                out.push('\n');
            }
            Stmt::Defaults { target, attrs } => {
                indent(out, depth);
                out.push_str(target.keyword());
                out.push_str(" [");
                write_attr_pairs(out, attrs);
                out.push_str("]\n");
            }
            Stmt::Node(id) => {
                indent(out, depth);
                out.push_str(&quote_id(id));
                out.push('\n');
            }
            Stmt::Edge { tail, head } => {
                indent(out, depth);
                let _ = writeln!(out, "{} -> {}", quote_id(tail), quote_id(head));
            }
            Stmt::Subgraph(sub) => write_subgraph(out, sub, depth),
        }
    }
}

fn write_attr_pairs(out: &mut String, attrs: &Attrs) {
    for (i, (key, value)) in attrs.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}={}", quote_id(key), quote_id(value));
    }
}

fn write_comment(out: &mut String, comment: &str, depth: usize) {
    for line in comment.lines() {
        indent(out, depth);
        out.push_str("// ");
        out.push_str(line);
        out.push('\n');
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

/// Quotes `id` unless it is a plain identifier or numeral that Graphviz accepts bare.
///
/// Inside quotes, `"` is escaped and line breaks become the `\n` escape (a centered line break in
/// Graphviz labels).
pub fn quote_id(id: &str) -> Cow<'_, str> {
    if (is_identifier(id) && !is_keyword(id)) || is_numeral(id) {
        return Cow::Borrowed(id);
    }

    let mut out = String::with_capacity(id.len() + 2);
    out.push('"');
    let mut chars = id.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => out.push_str("\\\""),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    // A trailing backslash would escape the closing quote.
    if out.ends_with('\\') && !out.ends_with("\\\\") {
        out.push('\\');
    }
    out.push('"');
    Cow::Owned(out)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_keyword(s: &str) -> bool {
    KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(s))
}

fn is_numeral(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    let (int, frac) = match s.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (s, None),
    };
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    match frac {
        None => !int.is_empty() && all_digits(int),
        Some(frac) => all_digits(int) && all_digits(frac) && !(int.is_empty() && frac.is_empty()),
    }
}
