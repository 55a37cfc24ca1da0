//! Source-to-source transform that awaits calls to known async functions.
//!
//! Given program text and a list of dotted function paths (`module.f`,
//! `obj.a.b`), every call whose callee spells one of those paths is
//! rewritten so that its result is awaited:
//!
//! ```text
//! module.f(x).g(y);   // paths: ["module.f"]
//! (await module.f(x)).g(y);
//! ```
//!
//! The transform is purely static: parse → scan → rewrite → generate.

mod driver;
mod emit;
mod error;
mod options;

pub use aw_transform::{CallSite, PatternError, PatternSet};
pub use driver::{awaitify, awaitify_value, Awaitified, Awaitifier, RewrittenCall, Stage};
pub use error::AwaitifyError;
pub use options::AwaitifyOptions;
