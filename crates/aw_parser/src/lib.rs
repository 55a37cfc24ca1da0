//! ECMAScript/TypeScript parser front end.
//!
//! Wraps the standard SWC parser: picks the dialect from [`AwSyntax`],
//! parses a whole program (script or module) and turns every parser
//! diagnostic, recovered or not, into a single [`ParseError`].
//!
//! [`AwSyntax`]: aw_ast::AwSyntax

pub mod parse;

pub use parse::{line_col, parse_program, ParseError, ParseResult};
