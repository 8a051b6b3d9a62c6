//! Graphviz rendering of an automaton, for debugging.
//!
//! Render the output with e.g. `dot -Tpng trie.dot > trie.png`.

use std::collections::VecDeque;
use std::fmt::{self, Display, Write};

use super::node::NodeRef;
use super::symbol::Symbol;
use super::trie::Automaton;

impl<S: Symbol + Display, P: Display> Automaton<S, P> {
    /// Renders the trie as a DOT digraph, building failure links first if
    /// needed.
    ///
    /// Each node is labelled with the payloads of every pattern that ends
    /// there, its own and those on its failure chain. Trie transitions are
    /// green edges labelled with their symbol; failure links are red dashed
    /// edges, omitted when they point at the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use libaho::Automaton;
    ///
    /// let mut ac = Automaton::new();
    /// ac.insert("he", "he");
    /// ac.insert("she", "she");
    /// let dot = ac.to_dot();
    /// assert!(dot.starts_with("digraph automaton {"));
    /// assert!(dot.contains("color=red"));
    /// ```
    pub fn to_dot(&mut self) -> String {
        self.ensure_failure_links_built();
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_dot(self.root(), &mut out);
        out
    }
}

fn write_dot<S: Symbol + Display, P: Display>(
    root: NodeRef<'_, S, P>,
    out: &mut impl Write,
) -> fmt::Result {
    writeln!(out, "digraph automaton {{")?;
    writeln!(out, "  graph [rankdir=LR];")?;
    writeln!(out, "  node [shape=box];")?;

    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        let id = node.id().index();

        let mut label = String::new();
        node.visit_suffix_matches(node.depth(), |payload, _, _| {
            if !label.is_empty() {
                label.push_str("\\n");
            }
            label.push_str(&escape(&payload.to_string()));
            true
        });
        writeln!(out, "  n{id} [label=\"{label}\"];")?;

        for (symbol, child) in node.children() {
            let symbol = escape(&symbol.to_string());
            writeln!(
                out,
                "  n{id} -> n{} [label=\"{symbol}\",color=green];",
                child.id().index()
            )?;
            queue.push_back(child);
        }
        if let Some(failure) = node.failure().filter(|f| !f.is_root()) {
            writeln!(
                out,
                "  n{id} -> n{} [color=red,style=dashed,constraint=false];",
                failure.id().index()
            )?;
        }
    }
    writeln!(out, "}}")
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
