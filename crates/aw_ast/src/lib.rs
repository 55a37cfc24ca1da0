//! AST types shared by the awaitify crates.
//!
//! Re-exports the standard SWC AST and adds:
//! - `AccessPath`, a static property-access chain such as `module.f`
//! - `AwSyntax`, the source dialect the parser should accept

pub use swc_ecma_ast::*;

use serde::{Deserialize, Serialize};

/// Separator between the segments of a dotted access path.
pub const PATH_SEPARATOR: char = '.';

/// An ordered, immutable sequence of property names, e.g. `["module", "f"]`.
///
/// Segments are compared case-sensitively and exactly. No identifier syntax
/// is validated: a segment that can never be an identifier simply never
/// matches anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccessPath {
    segments: Box<[String]>,
}

impl AccessPath {
    /// Split a dotted pattern (`"a.b.c"`) into its segments.
    pub fn parse(pattern: &str) -> Self {
        Self {
            segments: pattern.split(PATH_SEPARATOR).map(str::to_owned).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for paths built by [`AccessPath::parse`]: splitting
    /// yields at least one (possibly empty) segment.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl From<&str> for AccessPath {
    fn from(pattern: &str) -> Self {
        Self::parse(pattern)
    }
}

impl std::fmt::Display for AccessPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// Dialect flags controlling which syntax the parser accepts.
///
/// The default is plain ECMAScript (latest edition) without JSX.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AwSyntax {
    /// Parse as TypeScript instead of ECMAScript.
    pub typescript: bool,
    /// Accept JSX (TSX when combined with `typescript`).
    pub jsx: bool,
    /// Accept decorators.
    pub decorators: bool,
}

impl AwSyntax {
    pub fn typescript() -> Self {
        Self {
            typescript: true,
            ..Self::default()
        }
    }
}
