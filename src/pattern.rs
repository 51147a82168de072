//! Token-level patterns: compilation, matching and the registry.

pub mod compiler;
pub mod matcher;
pub mod node;
pub mod registry;
pub mod style;

pub use compiler::{DEFAULT_LANGUAGE, PatternCompiler, PatternGraph};
pub use matcher::{PatternMatch, PatternMatcher};
pub use node::{MatcherNode, NodeId, NodeKind, Priority};
pub use registry::{MatchResult, MatcherRegistry, ScanResult};
pub use style::{STYLE_WILDCARD, parse_style_labels};
