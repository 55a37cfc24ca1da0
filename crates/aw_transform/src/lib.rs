//! Call-site rewriting that puts `await` in front of known async calls.
//!
//! Passes, in pipeline order:
//! - [`patterns`]: caller-supplied dotted paths → deduplicated [`PatternSet`]
//! - [`path`]: does a callee expression spell a given access path?
//! - [`scan`]: collect every matching call expression as a [`CallSite`]
//! - [`rewrite`]: turn each collected call into `await <call>` in place
//!
//! `module.f(x).g(y)` with the pattern `module.f` becomes
//! `(await module.f(x)).g(y)`.

pub mod path;
pub mod patterns;
pub mod rewrite;
pub mod scan;

pub use path::path_matches;
pub use patterns::{PatternError, PatternSet};
pub use rewrite::rewrite;
pub use scan::{scan, CallSite};
