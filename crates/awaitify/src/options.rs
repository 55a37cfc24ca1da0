use aw_ast::AwSyntax;
use serde::{Deserialize, Serialize};

/// Configuration for an [`Awaitifier`](crate::Awaitifier).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AwaitifyOptions {
    /// Dialect accepted by the parser.
    pub syntax: AwSyntax,
    /// Emit minified output.
    pub minify: bool,
    /// Re-emit comments found in the input.
    pub comments: bool,
}
