//! Pattern compiler.
//!
//! Turns a whitespace-separated pattern such as `xxx $name? [good|RB*] <NN*>*`
//! into a [`PatternGraph`]: an arena of [`MatcherNode`]s rooted at a synthetic
//! skip node.
//!
//! Token grammar, checked left to right on every pattern token:
//!
//! | Form | Meaning |
//! |---|---|
//! | `x*` | optional and repeatable |
//! | `x?` | optional |
//! | `<CLASS>` | POS class (`NN*` expands to every noun tag) |
//! | `[word]`, `[word\|CLASS]` | synonym of `word`, optionally restricted |
//! | `$name` | captures one token per step into `name` |
//! | anything else | literal text |
//!
//! `<...>` and `[...]` bodies accept a `#name` suffix capturing the token
//! into `#name`.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::annotation::text::TextAnnotation;
use crate::dictionary::resolver::{Dictionary, SynonymResolver};
use crate::pattern::node::{MatcherNode, NodeId, edge_order};

/// Default language for synonym lookups.
pub const DEFAULT_LANGUAGE: &str = "en";

/// A compiled pattern automaton.
#[derive(Clone)]
pub struct PatternGraph {
    nodes: Vec<MatcherNode>,
    root: NodeId,
    resolver: Arc<dyn SynonymResolver>,
}

impl PatternGraph {
    fn new(resolver: Arc<dyn SynonymResolver>) -> Self {
        PatternGraph {
            nodes: vec![MatcherNode::skip()],
            root: 0,
            resolver,
        }
    }

    fn add_node(&mut self, node: MatcherNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn add_edge(&mut self, from: NodeId, to: NodeId) {
        self.nodes[from].next.push(to);
    }

    /// Two chained skip hops from `from`, both leading to `to`.
    fn add_skips(&mut self, from: NodeId, to: NodeId) {
        let first = self.add_node(MatcherNode::skip());
        let second = self.add_node(MatcherNode::skip());
        self.add_edge(from, first);
        self.add_edge(first, second);
        self.add_edge(first, to);
        self.add_edge(second, to);
    }

    /// Mark `start` and every node reachable from it through non-skip
    /// edges as final. Skip nodes are never final.
    fn mark_final(&mut self, start: NodeId) {
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let node = &mut self.nodes[id];
            if node.is_skip() || node.is_final {
                continue;
            }
            node.is_final = true;
            stack.extend(node.next.iter().copied().filter(|&next| next != id));
        }
    }

    fn sort_edges(&mut self) {
        for id in 0..self.nodes.len() {
            let mut next = std::mem::take(&mut self.nodes[id].next);
            next.sort_by(|&a, &b| edge_order(&self.nodes[a], &self.nodes[b]));
            self.nodes[id].next = next;
        }
    }

    /// The synthetic start node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &MatcherNode {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> &[MatcherNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// A graph is usable only if its root leads somewhere.
    pub fn is_valid(&self) -> bool {
        !self.nodes[self.root].next.is_empty()
    }

    /// Test the token at `index` against node `id`.
    pub fn matches(&self, id: NodeId, text: &TextAnnotation, index: usize) -> bool {
        self.nodes[id].matches(text, index, self.resolver.as_ref())
    }
}

impl fmt::Debug for PatternGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternGraph")
            .field("nodes", &self.nodes)
            .field("root", &self.root)
            .finish()
    }
}

/// Optionality of one pattern token plus its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TokenItem<'a> {
    mandatory: bool,
    repeatable: bool,
    body: &'a str,
}

impl<'a> TokenItem<'a> {
    fn parse(token: &'a str) -> Self {
        if let Some(body) = token.strip_suffix('*').filter(|body| !body.is_empty()) {
            return TokenItem {
                mandatory: false,
                repeatable: true,
                body,
            };
        }
        if let Some(body) = token.strip_suffix('?').filter(|body| !body.is_empty()) {
            return TokenItem {
                mandatory: false,
                repeatable: false,
                body,
            };
        }
        TokenItem {
            mandatory: true,
            repeatable: false,
            body: token,
        }
    }
}

/// Text between an opening delimiter and `close`, or to the end.
fn delimited(body: &str, close: char) -> &str {
    let inner = &body[1..];
    match inner.find(close) {
        Some(end) => &inner[..end],
        None => inner,
    }
}

/// Compiles pattern strings into graphs.
#[derive(Clone)]
pub struct PatternCompiler {
    language: String,
    resolver: Arc<dyn SynonymResolver>,
}

impl Default for PatternCompiler {
    fn default() -> Self {
        PatternCompiler::new(Arc::new(Dictionary::default()))
    }
}

impl PatternCompiler {
    /// Create a compiler resolving synonyms through `resolver`.
    pub fn new(resolver: Arc<dyn SynonymResolver>) -> Self {
        PatternCompiler {
            language: DEFAULT_LANGUAGE.to_string(),
            resolver,
        }
    }

    /// Set the language used for synonym lookups.
    pub fn with_language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = language.into();
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn resolver(&self) -> &Arc<dyn SynonymResolver> {
        &self.resolver
    }

    /// Compile a pattern using the compiler's language.
    pub fn compile(&self, pattern: &str) -> PatternGraph {
        self.compile_with_language(pattern, &self.language)
    }

    /// Compile a pattern, resolving synonyms in `language`.
    ///
    /// An empty pattern yields a graph whose root has no successors; see
    /// [`PatternGraph::is_valid`].
    pub fn compile_with_language(&self, pattern: &str, language: &str) -> PatternGraph {
        let mut graph = PatternGraph::new(self.resolver.clone());
        let start = graph.root;
        let mut last = start;
        let mut last_mandatory = start;

        for token in pattern.split_whitespace() {
            let item = TokenItem::parse(token);
            let current = graph.add_node(self.build_node(&item, language));

            graph.add_edge(last, current);
            if last != start {
                graph.add_skips(last, current);
            }
            if item.repeatable {
                graph.add_edge(current, current);
            }
            if last != last_mandatory {
                graph.add_edge(last_mandatory, current);
            }
            if item.mandatory {
                last_mandatory = current;
            }
            last = current;
        }

        graph.mark_final(last_mandatory);
        graph.sort_edges();

        debug!(
            "compiled pattern {:?} into {} nodes",
            pattern,
            graph.len()
        );
        graph
    }

    fn build_node(&self, item: &TokenItem<'_>, language: &str) -> MatcherNode {
        let body = item.body;
        if body.starts_with('<') {
            MatcherNode::pos_class(delimited(body, '>'), item.mandatory)
        } else if let Some(name) = body.strip_prefix('$') {
            MatcherNode::variable(name)
        } else if body.starts_with('[') {
            MatcherNode::synonym_set(
                delimited(body, ']'),
                item.mandatory,
                language,
                self.resolver.as_ref(),
            )
        } else {
            MatcherNode::literal(body, item.mandatory)
        }
    }
}

impl fmt::Debug for PatternCompiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternCompiler")
            .field("language", &self.language)
            .finish()
    }
}
