//! Matcher nodes: the states of a compiled pattern automaton.
//!
//! Each node tests one token. Nodes live in the arena of a
//! [`PatternGraph`](super::compiler::PatternGraph) and refer to their
//! successors by [`NodeId`], so self-loops and shared skip nodes need no
//! shared ownership.

use std::cmp::Ordering;

use ahash::AHashSet;

use crate::annotation::constants::{self, AnnotationLevel};
use crate::annotation::text::TextAnnotation;
use crate::dictionary::pos::WordClass;
use crate::dictionary::resolver::SynonymResolver;

/// Index of a node inside its graph.
pub type NodeId = usize;

/// Edge preference of a node; higher priorities are tried first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Unconditional bypass hop
    Skip = 0,
    /// Variable consumer (`$name`)
    Consume = 1,
    /// Optional constrained token (`x?`, `x*`)
    Optional = 2,
    /// Mandatory constrained token
    Mandatory = 3,
}

impl Priority {
    fn constrained(mandatory: bool) -> Self {
        if mandatory {
            Priority::Mandatory
        } else {
            Priority::Optional
        }
    }
}

/// The constraint a node applies to a token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Always matches; threads optional paths through the graph.
    Skip,
    /// Exact, case-sensitive token text.
    Literal(String),
    /// Any POS label in the set. An empty set never matches.
    PosClass(AHashSet<i8>),
    /// Token shares at least one synset with the pattern word.
    SynonymSet {
        language: String,
        synsets: AHashSet<String>,
    },
    /// Always matches and captures the token.
    Variable,
}

/// One state of the automaton.
#[derive(Clone, Debug)]
pub struct MatcherNode {
    pub kind: NodeKind,
    /// Pattern fragment this node was built from
    pub pattern: String,
    pub priority: Priority,
    /// Variable the matched token is captured into
    pub label: Option<String>,
    pub is_final: bool,
    pub(crate) next: Vec<NodeId>,
}

/// Split an optional `#name` capture suffix off a `<...>`/`[...]` body.
///
/// The label keeps its `#`. A `#` with nothing on one side is part of the
/// body (the `#` tag and the `#*` class), and `##name` captures the `#` tag
/// itself.
fn split_capture_label(body: &str) -> (&str, Option<String>) {
    match body.rsplit_once('#') {
        Some((head, name)) if !head.is_empty() && !name.is_empty() => {
            (head, Some(format!("#{name}")))
        }
        _ => (body, None),
    }
}

impl MatcherNode {
    fn with_kind(kind: NodeKind, pattern: String, priority: Priority) -> Self {
        MatcherNode {
            kind,
            pattern,
            priority,
            label: None,
            is_final: false,
            next: Vec::new(),
        }
    }

    /// An unconditional skip hop.
    pub fn skip() -> Self {
        Self::with_kind(NodeKind::Skip, String::new(), Priority::Skip)
    }

    /// A literal token.
    pub fn literal(text: &str, mandatory: bool) -> Self {
        Self::with_kind(
            NodeKind::Literal(text.to_string()),
            text.to_string(),
            Priority::constrained(mandatory),
        )
    }

    /// A POS-class token from the body of `<...>`, e.g. `NN*` or `RB*#how`.
    pub fn pos_class(body: &str, mandatory: bool) -> Self {
        let (class, label) = split_capture_label(body);
        let mut node = Self::with_kind(
            NodeKind::PosClass(constants::pos_class(class)),
            format!("<{body}>"),
            Priority::constrained(mandatory),
        );
        node.label = label;
        node
    }

    /// A synonym-set token from the body of `[...]`, e.g. `good|RB*#attribute`.
    ///
    /// The pattern word's synsets are resolved once, here.
    pub fn synonym_set(
        body: &str,
        mandatory: bool,
        language: &str,
        resolver: &dyn SynonymResolver,
    ) -> Self {
        let (rest, label) = split_capture_label(body);
        let mut parts = rest.split('|');
        let word = parts.next().unwrap_or_default();
        let restrictions: Vec<WordClass> = parts
            .next()
            .and_then(WordClass::from_generic_pos)
            .into_iter()
            .collect();

        let synsets = resolver.synsets(language, word, &restrictions);
        let mut node = Self::with_kind(
            NodeKind::SynonymSet {
                language: language.to_string(),
                synsets,
            },
            format!("[{body}]"),
            Priority::constrained(mandatory),
        );
        node.label = label;
        node
    }

    /// A variable consumer for `$name`.
    pub fn variable(name: &str) -> Self {
        let mut node = Self::with_kind(NodeKind::Variable, format!("${name}"), Priority::Consume);
        node.label = Some(name.to_string());
        node
    }

    /// Successors, in the order they are tried.
    pub fn successors(&self) -> &[NodeId] {
        &self.next
    }

    pub fn is_skip(&self) -> bool {
        self.priority == Priority::Skip
    }

    /// Test the token at `index`. Never mutates the text.
    pub fn matches(
        &self,
        text: &TextAnnotation,
        index: usize,
        resolver: &dyn SynonymResolver,
    ) -> bool {
        match &self.kind {
            NodeKind::Skip | NodeKind::Variable => true,
            NodeKind::Literal(literal) => text
                .token(index)
                .is_some_and(|token| token.text == *literal),
            NodeKind::PosClass(labels) => {
                if labels.is_empty() {
                    return false;
                }
                text.annotation(AnnotationLevel::Pos).is_some_and(|layer| {
                    layer
                        .tokens_at(index)
                        .any(|token| labels.contains(&token.label))
                })
            }
            NodeKind::SynonymSet { language, synsets } => {
                if synsets.is_empty() {
                    return false;
                }
                let Some(token) = text.token(index) else {
                    return false;
                };
                let restrictions = token_restrictions(text, index);
                resolver
                    .synsets(language, &token.text, &restrictions)
                    .iter()
                    .any(|id| synsets.contains(id))
            }
        }
    }
}

/// Word classes implied by the POS labels at `index`.
///
/// Without a POS annotation every class is allowed. Labels outside the
/// generic noun/verb/adjective/adverb classes contribute nothing, and an
/// empty result means "unrestricted" to the resolver.
fn token_restrictions(text: &TextAnnotation, index: usize) -> Vec<WordClass> {
    let mut labels = match text.annotation(AnnotationLevel::Pos) {
        Some(layer) => layer.tokens_at(index).peekable(),
        None => return WordClass::ALL.to_vec(),
    };
    if labels.peek().is_none() {
        return WordClass::ALL.to_vec();
    }

    let mut classes: Vec<WordClass> = labels
        .filter_map(|token| constants::generic_pos_label(token.label))
        .filter_map(WordClass::from_generic_pos)
        .collect();
    classes.sort();
    classes.dedup();
    classes
}

/// Order in which successors are tried: priority first, then pattern text,
/// both descending.
pub(crate) fn edge_order(a: &MatcherNode, b: &MatcherNode) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| b.pattern.cmp(&a.pattern))
}
