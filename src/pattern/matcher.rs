//! Single-pattern matcher: walks a compiled graph over a token window.

use std::collections::HashMap;
use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::annotation::text::TextAnnotation;
use crate::pattern::compiler::{PatternCompiler, PatternGraph};
use crate::pattern::node::Priority;
use crate::pattern::style::parse_style_labels;

/// Outcome of matching one pattern at one position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatch {
    /// Tokens matched by non-skip nodes
    pub match_count: usize,
    /// Tokens consumed in total, skip hops included
    pub window: usize,
    /// Captured variables, keyed by label
    pub variables: HashMap<String, String>,
}

impl PatternMatch {
    /// The "no match" result.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_match(&self) -> bool {
        self.match_count > 0 || self.window > 0
    }
}

/// Capture state of one walk. Created per call, so concurrent matches
/// against the same pattern never share buffers.
#[derive(Debug, Default)]
struct MatchContext {
    variables: HashMap<String, String>,
    open: Option<(String, String)>,
}

impl MatchContext {
    fn capture(&mut self, label: &str, text: &str) {
        match &mut self.open {
            Some((open_label, buffer)) if open_label.as_str() == label => {
                buffer.push(' ');
                buffer.push_str(text);
            }
            _ => {
                self.flush();
                self.open = Some((label.to_string(), text.to_string()));
            }
        }
    }

    /// Store the open capture, appending to an earlier value of the same label.
    fn flush(&mut self) {
        if let Some((label, value)) = self.open.take() {
            self.variables
                .entry(label)
                .and_modify(|existing| {
                    existing.push(' ');
                    existing.push_str(&value);
                })
                .or_insert(value);
        }
    }

    fn finish(mut self) -> HashMap<String, String> {
        self.flush();
        self.variables
    }
}

/// A compiled pattern with its identifier and style labels.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    id: String,
    pattern: String,
    styles: HashMap<String, String>,
    graph: PatternGraph,
}

impl PatternMatcher {
    /// Compile `pattern` with a default compiler (English, identity synonyms).
    pub fn new(id: &str, pattern: &str) -> Self {
        Self::compile(&PatternCompiler::default(), id, pattern, None)
    }

    /// Like [`Self::new`], with a `key=value;...` style string.
    pub fn with_styles(id: &str, pattern: &str, styles: &str) -> Self {
        Self::compile(&PatternCompiler::default(), id, pattern, Some(styles))
    }

    /// Compile `pattern` with the given compiler.
    pub fn compile(
        compiler: &PatternCompiler,
        id: &str,
        pattern: &str,
        styles: Option<&str>,
    ) -> Self {
        Self::from_graph(id, pattern, compiler.compile(pattern), styles)
    }

    /// Compile `pattern` with the given compiler, resolving synonyms in `language`.
    pub fn compile_with_language(
        compiler: &PatternCompiler,
        id: &str,
        pattern: &str,
        styles: Option<&str>,
        language: &str,
    ) -> Self {
        let graph = compiler.compile_with_language(pattern, language);
        Self::from_graph(id, pattern, graph, styles)
    }

    fn from_graph(id: &str, pattern: &str, graph: PatternGraph, styles: Option<&str>) -> Self {
        let mut matcher = PatternMatcher {
            id: id.to_string(),
            pattern: pattern.to_string(),
            styles: HashMap::new(),
            graph,
        };
        if let Some(styles) = styles {
            matcher.set_style_labels(styles);
        }
        matcher
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The source pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn graph(&self) -> &PatternGraph {
        &self.graph
    }

    pub fn style_labels(&self) -> &HashMap<String, String> {
        &self.styles
    }

    pub fn add_style_label(&mut self, key: &str, value: &str) {
        self.styles.insert(key.to_string(), value.to_string());
    }

    pub fn add_style_labels(&mut self, labels: &HashMap<String, String>) {
        self.styles
            .extend(labels.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Merge labels parsed from a `key=value;...` string.
    pub fn set_style_labels(&mut self, styles: &str) {
        self.styles.extend(parse_style_labels(styles));
    }

    /// Whether the pattern compiled to a usable graph.
    pub fn is_valid(&self) -> bool {
        self.graph.is_valid()
    }

    /// Match the tokens in `from..to`, starting at `from`.
    ///
    /// `to` is clamped to the text length. The walk always takes the first
    /// successor that accepts the next token and never backtracks; the
    /// result is a match only if the walk stops on a final node.
    pub fn match_at(&self, text: &TextAnnotation, from: usize, to: usize) -> PatternMatch {
        let to = to.min(text.len());
        let mut context = MatchContext::default();
        let mut current = self.graph.root();
        let mut window = 0;
        let mut match_count = 0;

        while from + window < to {
            let index = from + window;
            let next = self
                .graph
                .node(current)
                .successors()
                .iter()
                .copied()
                .find(|&id| self.graph.matches(id, text, index));
            let Some(next) = next else {
                break;
            };

            let node = self.graph.node(next);
            match &node.label {
                Some(label) => {
                    let word = text.token(index).map_or("", |token| token.text.as_str());
                    context.capture(label, word);
                }
                None => context.flush(),
            }

            window += 1;
            if node.priority != Priority::Skip {
                match_count += 1;
            }
            current = next;
        }

        let variables = context.finish();
        if self.graph.node(current).is_final {
            trace!(
                "pattern {} matched {} tokens over a window of {} at {}",
                self.id, match_count, window, from
            );
            PatternMatch {
                match_count,
                window,
                variables,
            }
        } else {
            PatternMatch::none()
        }
    }
}

impl fmt::Display for PatternMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}
